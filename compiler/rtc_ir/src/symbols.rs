//! Symbol table: declared classes, methods, fields and locals.
//!
//! Symbols are append-only and addressed by [`SymbolId`]. Each symbol has an
//! owner and an ordered member list, so the table forms a tree of scopes
//! rooted at [`SymbolId::ROOT`].
//!
//! # Growth
//!
//! Appending a symbol may reallocate the backing `Vec`, and appending a member
//! may reallocate the owner's member list. Ids stay valid across both; a
//! `&SymbolInfo` does not. [`SymbolTable::declare_member`] therefore finishes
//! every read of the owner before pushing the new symbol, and indexes the
//! owner again to record the member.

use std::fmt;

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::names::{NameId, NameTable, UniqueNameKind};
use crate::TableConfig;

/// Handle to a declared symbol.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Sentinel: "no symbol".
    pub const NONE: SymbolId = SymbolId(0);
    pub const TOP: SymbolId = SymbolId(1);
    pub const BOTTOM: SymbolId = SymbolId(2);
    pub const ROOT: SymbolId = SymbolId(3);
    pub const NIL: SymbolId = SymbolId(4);
    /// Placeholder for definitions resolved by a later phase.
    pub const TODO: SymbolId = SymbolId(5);
    pub const TODO_LOCAL: SymbolId = SymbolId(6);
    pub const TODO_INSTANCE: SymbolId = SymbolId(7);
    pub const TODO_GLOBAL: SymbolId = SymbolId(8);
    pub const TODO_CLASS: SymbolId = SymbolId(9);

    /// Last symbol created during bootstrap.
    pub const LAST_BOOTSTRAP: SymbolId = SymbolId::TODO_CLASS;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        SymbolId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn exists(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// Bootstrap symbols, in creation order.
const BOOTSTRAP: [(SymbolId, &str); 10] = [
    (SymbolId::NONE, "<none>"),
    (SymbolId::TOP, "<top>"),
    (SymbolId::BOTTOM, "<bottom>"),
    (SymbolId::ROOT, "<root>"),
    (SymbolId::NIL, "nil"),
    (SymbolId::TODO, "<todo sym>"),
    (SymbolId::TODO_LOCAL, "<todo lvar sym>"),
    (SymbolId::TODO_INSTANCE, "<todo ivar sym>"),
    (SymbolId::TODO_GLOBAL, "<todo gvar sym>"),
    (SymbolId::TODO_CLASS, "<todo cvar sym>"),
];

bitflags! {
    /// Kind and state bits of a symbol.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct SymbolFlags: u8 {
        const CLASS = 1 << 0;
        const METHOD = 1 << 1;
        const FIELD = 1 << 2;
        const COMPLETED = 1 << 3;
    }
}

impl Default for SymbolFlags {
    fn default() -> Self {
        SymbolFlags::empty()
    }
}

/// Everything recorded about one symbol.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolInfo {
    pub owner: SymbolId,
    pub name: NameId,
    pub flags: SymbolFlags,
    /// Declared members in declaration order.
    pub members: Vec<(NameId, SymbolId)>,
    /// Result type for methods and fields; superclass for classes.
    result_or_parent: SymbolId,
    /// Arguments for methods; mixins for classes.
    arguments_or_mixins: Vec<SymbolId>,
}

impl SymbolInfo {
    pub fn is_class(&self) -> bool {
        self.flags.contains(SymbolFlags::CLASS)
    }

    pub fn is_method(&self) -> bool {
        self.flags.contains(SymbolFlags::METHOD)
    }

    pub fn is_field(&self) -> bool {
        self.flags.contains(SymbolFlags::FIELD)
    }

    pub fn is_completed(&self) -> bool {
        self.flags.contains(SymbolFlags::COMPLETED)
    }

    pub fn result(&self) -> SymbolId {
        debug_assert!(!self.is_class(), "classes have a parent, not a result");
        self.result_or_parent
    }

    pub fn parent(&self) -> SymbolId {
        debug_assert!(self.is_class(), "only classes have a parent");
        self.result_or_parent
    }

    pub fn arguments(&self) -> &[SymbolId] {
        debug_assert!(!self.is_class(), "classes have mixins, not arguments");
        &self.arguments_or_mixins
    }

    pub fn mixins(&self) -> &[SymbolId] {
        debug_assert!(self.is_class(), "only classes have mixins");
        &self.arguments_or_mixins
    }
}

/// Append-only store of symbols.
pub struct SymbolTable {
    symbols: Vec<SymbolInfo>,
    /// Root-scoped classes by name.
    classes: FxHashMap<NameId, SymbolId>,
}

impl SymbolTable {
    /// Create a table holding exactly the bootstrap symbols.
    ///
    /// Bootstrap names are interned into `names`.
    pub fn new(config: &TableConfig, names: &mut NameTable) -> Self {
        let mut table = SymbolTable {
            symbols: Vec::with_capacity(config.symbol_capacity.max(BOOTSTRAP.len())),
            classes: FxHashMap::default(),
        };
        for (expected, text) in BOOTSTRAP {
            let id = table.synthesize_class(names, text);
            if id != expected {
                panic!("internal error: bootstrap symbol `{text}` created as {id:?}, expected {expected:?}");
            }
        }
        if table.symbols.len() != SymbolId::LAST_BOOTSTRAP.index() + 1 {
            panic!(
                "internal error: {} symbols after bootstrap, expected {}",
                table.symbols.len(),
                SymbolId::LAST_BOOTSTRAP.index() + 1
            );
        }
        table
    }

    /// Intern `text`, declare it as a top-level class and mark it completed.
    pub fn synthesize_class(&mut self, names: &mut NameTable, text: &str) -> SymbolId {
        let name = names.intern_utf8(text);
        let id = self.declare_top_level_class(name);
        self.symbols[id.index()].flags |= SymbolFlags::COMPLETED;
        id
    }

    /// Return the root-scoped class named `name`, creating it if absent.
    pub fn declare_top_level_class(&mut self, name: NameId) -> SymbolId {
        if let Some(&existing) = self.classes.get(&name) {
            return existing;
        }
        let id = self.next_id();
        self.symbols.push(SymbolInfo {
            owner: SymbolId::ROOT,
            name,
            flags: SymbolFlags::CLASS,
            ..SymbolInfo::default()
        });
        self.classes.insert(name, id);
        id
    }

    /// Declare a member of `owner`.
    ///
    /// An existing member with the same name, result and arguments is
    /// returned instead of declaring a new one; any difference in `args`
    /// declares a separate symbol.
    pub fn declare_member(
        &mut self,
        owner: SymbolId,
        name: NameId,
        result: SymbolId,
        args: Vec<SymbolId>,
        is_method: bool,
    ) -> SymbolId {
        debug_assert!(owner.exists(), "declaring {name:?} under the no-symbol sentinel");
        let existing = self.symbols[owner.index()]
            .members
            .iter()
            .filter(|(member_name, _)| *member_name == name)
            .map(|&(_, member)| member)
            .find(|member| {
                let info = &self.symbols[member.index()];
                info.result_or_parent == result && info.arguments_or_mixins == args
            });
        if let Some(member) = existing {
            return member;
        }

        let grows = self.symbols.len() == self.symbols.capacity();
        let id = self.next_id();
        self.symbols.push(SymbolInfo {
            owner,
            name,
            flags: if is_method {
                SymbolFlags::METHOD
            } else {
                SymbolFlags::FIELD
            },
            members: Vec::new(),
            result_or_parent: result,
            arguments_or_mixins: args,
        });
        if grows {
            tracing::trace!(symbols = self.symbols.len(), "symbol table reallocated");
        }
        // Fresh index: the push above may have moved every `SymbolInfo`.
        self.symbols[owner.index()].members.push((name, id));
        id
    }

    /// Declare a fresh hidden variable under `owner`, named after `base`.
    pub fn new_temporary(
        &mut self,
        names: &mut NameTable,
        kind: UniqueNameKind,
        base: NameId,
        owner: SymbolId,
    ) -> SymbolId {
        let name = names.intern_unique(kind, base);
        let id = self.declare_member(owner, name, SymbolId::NONE, Vec::new(), false);
        tracing::debug!(?id, ?owner, base = base.raw(), "new temporary");
        id
    }

    /// # Panics
    /// Panics if `id` was not produced by this table.
    pub fn info(&self, id: SymbolId) -> &SymbolInfo {
        &self.symbols[id.index()]
    }

    pub fn members(&self, owner: SymbolId) -> &[(NameId, SymbolId)] {
        &self.info(owner).members
    }

    /// First member of `owner` named `name`.
    pub fn lookup_member(&self, owner: SymbolId, name: NameId) -> Option<SymbolId> {
        self.members(owner)
            .iter()
            .find(|(member_name, _)| *member_name == name)
            .map(|&(_, member)| member)
    }

    /// Root-scoped class named `name`, if declared.
    pub fn top_level_class(&self, name: NameId) -> Option<SymbolId> {
        self.classes.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false once bootstrapped.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Render `Owner::Name` for diagnostics, stopping at the root.
    pub fn show(&self, names: &NameTable, id: SymbolId) -> String {
        let info = self.info(id);
        let own = names.show(info.name);
        if info.owner == SymbolId::ROOT || info.owner == id || !info.owner.exists() {
            own
        } else {
            format!("{}::{own}", self.show(names, info.owner))
        }
    }

    fn next_id(&self) -> SymbolId {
        SymbolId(
            u32::try_from(self.symbols.len())
                .unwrap_or_else(|_| panic!("internal error: symbol table exceeds u32 ids")),
        )
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("symbols", &self.symbols.len())
            .field("classes", &self.classes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
