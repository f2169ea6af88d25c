//! Shared tables and the per-call context threaded through lowering.
//!
//! [`GlobalState`] owns both tables for the lifetime of a compilation.
//! [`Context`] pairs an exclusive borrow of that state with the symbol that
//! currently owns new declarations. Because the borrow is `&mut`, only one
//! context can write to the tables at a time; nested calls take a
//! [`Context::reborrow`] or [`Context::with_owner`] copy and hand it back
//! when they return.

use crate::names::{NameId, NameTable, UniqueNameKind};
use crate::symbols::{SymbolId, SymbolTable};
use crate::TableConfig;

/// Name and symbol tables for one compilation.
#[derive(Debug)]
pub struct GlobalState {
    pub names: NameTable,
    pub symbols: SymbolTable,
}

impl GlobalState {
    pub fn new(config: &TableConfig) -> Self {
        let mut names = NameTable::new(config);
        let symbols = SymbolTable::new(config, &mut names);
        GlobalState { names, symbols }
    }

    pub fn enter_name_utf8(&mut self, text: &str) -> NameId {
        self.names.intern_utf8(text)
    }

    pub fn fresh_name_unique(&mut self, kind: UniqueNameKind, original: NameId) -> NameId {
        self.names.intern_unique(kind, original)
    }

    pub fn declare_top_level_class(&mut self, name: NameId) -> SymbolId {
        self.symbols.declare_top_level_class(name)
    }

    pub fn synthesize_class(&mut self, text: &str) -> SymbolId {
        self.symbols.synthesize_class(&mut self.names, text)
    }

    pub fn declare_member(
        &mut self,
        owner: SymbolId,
        name: NameId,
        result: SymbolId,
        args: Vec<SymbolId>,
        is_method: bool,
    ) -> SymbolId {
        self.symbols.declare_member(owner, name, result, args, is_method)
    }

    pub fn new_temporary(
        &mut self,
        kind: UniqueNameKind,
        base: NameId,
        owner: SymbolId,
    ) -> SymbolId {
        self.symbols.new_temporary(&mut self.names, kind, base, owner)
    }

    pub fn show_name(&self, name: NameId) -> String {
        self.names.show(name)
    }

    pub fn show_symbol(&self, symbol: SymbolId) -> String {
        self.symbols.show(&self.names, symbol)
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        GlobalState::new(&TableConfig::default())
    }
}

/// Exclusive access to the tables plus the current owner.
#[derive(Debug)]
pub struct Context<'a> {
    state: &'a mut GlobalState,
    owner: SymbolId,
}

impl<'a> Context<'a> {
    pub fn new(state: &'a mut GlobalState, owner: SymbolId) -> Self {
        Context { state, owner }
    }

    /// Context for top-level code.
    pub fn root(state: &'a mut GlobalState) -> Self {
        Context::new(state, SymbolId::ROOT)
    }

    #[inline]
    pub fn owner(&self) -> SymbolId {
        self.owner
    }

    #[inline]
    pub fn state(&self) -> &GlobalState {
        &*self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut GlobalState {
        &mut *self.state
    }

    /// Shorter-lived context with the same owner.
    #[inline]
    pub fn reborrow(&mut self) -> Context<'_> {
        Context {
            state: &mut *self.state,
            owner: self.owner,
        }
    }

    /// Shorter-lived context declaring into `owner`.
    #[inline]
    pub fn with_owner(&mut self, owner: SymbolId) -> Context<'_> {
        Context {
            state: &mut *self.state,
            owner,
        }
    }

    /// Fresh hidden variable under the current owner.
    pub fn new_temporary(&mut self, kind: UniqueNameKind, base: NameId) -> SymbolId {
        self.state.new_temporary(kind, base, self.owner)
    }

    pub fn enter_name_utf8(&mut self, text: &str) -> NameId {
        self.state.enter_name_utf8(text)
    }
}
