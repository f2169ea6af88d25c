//! Name table: interned identifiers and synthesized unique names.
//!
//! Names are append-only and addressed by [`NameId`]. Identical UTF-8 text
//! always interns to the same id; unique names are always fresh.
//!
//! # Layout
//!
//! - `names`: one [`NameData`] per id. Id 0 is reserved and marks an empty
//!   hash bucket, so it is never handed out.
//! - `buckets`: open-addressing table mapping a content hash to a name id.
//!   Its length is always `2 * name_capacity`, a power of two, so bucket
//!   selection is a mask. Collisions advance by a growing step (1, 2, 3, ...),
//!   which visits every bucket of a power-of-two table.
//! - `pages`: string arena. Text is copied into fixed-size pages that are
//!   never reallocated or freed, so resolved `&str`s stay valid for as long
//!   as the table is borrowed and no name needs its own heap allocation.
//!
//! When `names` reaches `name_capacity` the capacity doubles and every
//! occupied bucket is re-inserted into a fresh table twice that size. Copying
//! buckets slot-for-slot would break the probe sequence, because bucket
//! positions depend on the mask.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::TableConfig;

/// Handle to an interned name.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct NameId(u32);

impl NameId {
    /// Reserved id; marks an empty bucket and "no name".
    pub const NONE: NameId = NameId(0);

    pub const INITIALIZE: NameId = NameId(1);
    pub const AND_AND: NameId = NameId(2);
    pub const OR_OR: NameId = NameId(3);
    pub const TO_S: NameId = NameId(4);
    pub const CONCAT: NameId = NameId(5);
    pub const CALL: NameId = NameId(6);
    pub const BANG: NameId = NameId(7);
    pub const SQUARE_BRACKETS: NameId = NameId(8);
    pub const SQUARE_BRACKETS_EQ: NameId = NameId(9);
    pub const UNARY_PLUS: NameId = NameId(10);
    pub const UNARY_MINUS: NameId = NameId(11);
    pub const STAR: NameId = NameId(12);
    pub const STAR_STAR: NameId = NameId(13);
    pub const MERGE: NameId = NameId(14);
    pub const ASSIGN_TEMP: NameId = NameId(15);
    pub const CURRENT_FILE: NameId = NameId(16);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        NameId(raw)
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

impl fmt::Debug for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameId({})", self.0)
    }
}

/// Names interned by every table, in this order, right after the reserved id.
const WELL_KNOWN: [(NameId, &str); 16] = [
    (NameId::INITIALIZE, "initialize"),
    (NameId::AND_AND, "&&"),
    (NameId::OR_OR, "||"),
    (NameId::TO_S, "to_s"),
    (NameId::CONCAT, "concat"),
    (NameId::CALL, "call"),
    (NameId::BANG, "!"),
    (NameId::SQUARE_BRACKETS, "[]"),
    (NameId::SQUARE_BRACKETS_EQ, "[]="),
    (NameId::UNARY_PLUS, "+@"),
    (NameId::UNARY_MINUS, "-@"),
    (NameId::STAR, "*"),
    (NameId::STAR_STAR, "**"),
    (NameId::MERGE, "merge"),
    (NameId::ASSIGN_TEMP, "<assign-temp>"),
    (NameId::CURRENT_FILE, "<current-file>"),
];

/// Why a unique name was synthesized.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum UniqueNameKind {
    /// Hidden variables introduced while desugaring.
    Desugar = 1,
    /// Names introduced during later name resolution.
    Namer = 2,
    /// Singleton-class names.
    Singleton = 3,
}

/// Errors from the fallible name table API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameTableError {
    #[error("name of {len} bytes does not fit in a {page_size}-byte string page")]
    NameTooLong { len: usize, page_size: usize },
    #[error("name hash table is full after {probes} probes")]
    TableFull { probes: usize },
    #[error("unique name {kind:?}#{num} for {original:?} already interned")]
    DuplicateUnique {
        kind: UniqueNameKind,
        num: u32,
        original: NameId,
    },
    #[error("{0:?} is not a UTF-8 name")]
    NotUtf8(NameId),
}

/// Stored form of a name.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum NameData {
    /// The reserved slot 0.
    Reserved,
    /// Text living in `pages[page][start..start + len]`.
    Utf8 { page: u32, start: u32, len: u32 },
    Unique {
        kind: UniqueNameKind,
        num: u32,
        original: NameId,
    },
}

/// Resolved content of a name.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NameRef<'a> {
    Utf8(&'a str),
    Unique {
        kind: UniqueNameKind,
        num: u32,
        original: NameId,
    },
}

#[derive(Copy, Clone, Default)]
struct Bucket {
    hash: u32,
    name: NameId,
}

enum Probe {
    Found(NameId),
    Vacant(usize),
}

/// Append-only interning store for names.
pub struct NameTable {
    names: Vec<NameData>,
    /// Logical capacity of `names`; growth is driven by this, not by `Vec`.
    name_capacity: usize,
    buckets: Vec<Bucket>,
    pages: Vec<String>,
    page_size: usize,
    next_unique: u32,
}

impl NameTable {
    /// Create a table with the well-known names pre-interned.
    pub fn new(config: &TableConfig) -> Self {
        let name_capacity = config.effective_name_capacity();
        let mut names = Vec::with_capacity(name_capacity);
        names.push(NameData::Reserved);
        let mut table = NameTable {
            names,
            name_capacity,
            buckets: vec![Bucket::default(); name_capacity * 2],
            pages: vec![String::with_capacity(config.page_size)],
            page_size: config.page_size,
            next_unique: 1,
        };
        for (expected, text) in WELL_KNOWN {
            let id = table.intern_utf8(text);
            if id != expected {
                panic!("internal error: well-known name `{text}` interned as {id:?}, expected {expected:?}");
            }
        }
        table
    }

    /// Intern UTF-8 text, returning the existing id if already present.
    ///
    /// # Panics
    /// Panics if the text is longer than one arena page, or if the hash
    /// table is found full (an internal invariant violation).
    pub fn intern_utf8(&mut self, text: &str) -> NameId {
        self.try_intern_utf8(text)
            .unwrap_or_else(|e| panic!("internal error: {e}"))
    }

    /// Fallible form of [`NameTable::intern_utf8`].
    pub fn try_intern_utf8(&mut self, text: &str) -> Result<NameId, NameTableError> {
        if text.len() > self.page_size {
            return Err(NameTableError::NameTooLong {
                len: text.len(),
                page_size: self.page_size,
            });
        }
        let hash = hash_utf8(text);
        let bucket = match self.probe(hash, |table, id| table.utf8_eq(id, text))? {
            Probe::Found(id) => return Ok(id),
            Probe::Vacant(bucket) => bucket,
        };
        let bucket = self.ensure_room(hash, bucket)?;
        let data = self.store_text(text);
        Ok(self.push(bucket, hash, data))
    }

    /// Look up text without interning it.
    pub fn lookup_utf8(&self, text: &str) -> Option<NameId> {
        match self.probe(hash_utf8(text), |table, id| table.utf8_eq(id, text)) {
            Ok(Probe::Found(id)) => Some(id),
            Ok(Probe::Vacant(_)) | Err(_) => None,
        }
    }

    /// Synthesize a name that is distinct from every other name, even one
    /// requested with the same `kind` and `original`.
    pub fn intern_unique(&mut self, kind: UniqueNameKind, original: NameId) -> NameId {
        self.try_intern_unique(kind, original)
            .unwrap_or_else(|e| panic!("internal error: {e}"))
    }

    /// Fallible form of [`NameTable::intern_unique`].
    pub fn try_intern_unique(
        &mut self,
        kind: UniqueNameKind,
        original: NameId,
    ) -> Result<NameId, NameTableError> {
        let num = self.next_unique;
        self.next_unique += 1;
        let hash = hash_unique(kind, num, original);
        let wanted = NameData::Unique {
            kind,
            num,
            original,
        };
        let bucket = match self.probe(hash, |table, id| table.names[id.index()] == wanted)? {
            Probe::Found(_) => {
                return Err(NameTableError::DuplicateUnique {
                    kind,
                    num,
                    original,
                })
            }
            Probe::Vacant(bucket) => bucket,
        };
        let bucket = self.ensure_room(hash, bucket)?;
        Ok(self.push(bucket, hash, wanted))
    }

    /// Resolve a name to its content.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this table.
    pub fn resolve(&self, id: NameId) -> NameRef<'_> {
        match self.names[id.index()] {
            NameData::Reserved => NameRef::Utf8(""),
            NameData::Utf8 { page, start, len } => {
                let start = start as usize;
                NameRef::Utf8(&self.pages[page as usize][start..start + len as usize])
            }
            NameData::Unique {
                kind,
                num,
                original,
            } => NameRef::Unique {
                kind,
                num,
                original,
            },
        }
    }

    /// Text of a UTF-8 name, or `None` for unique names.
    pub fn text(&self, id: NameId) -> Option<&str> {
        match self.resolve(id) {
            NameRef::Utf8(text) => Some(text),
            NameRef::Unique { .. } => None,
        }
    }

    /// Render any name for diagnostics. Unique names show as `original$num`.
    pub fn show(&self, id: NameId) -> String {
        match self.resolve(id) {
            NameRef::Utf8(text) => text.to_owned(),
            NameRef::Unique { num, original, .. } => format!("{}${num}", self.show(original)),
        }
    }

    /// Intern the setter form `name=` of a UTF-8 name.
    pub fn add_eq(&mut self, id: NameId) -> NameId {
        self.try_add_eq(id)
            .unwrap_or_else(|e| panic!("internal error: {e}"))
    }

    /// Fallible form of [`NameTable::add_eq`].
    pub fn try_add_eq(&mut self, id: NameId) -> Result<NameId, NameTableError> {
        let setter = match self.resolve(id) {
            NameRef::Utf8(text) => format!("{text}="),
            NameRef::Unique { .. } => return Err(NameTableError::NotUtf8(id)),
        };
        self.try_intern_utf8(&setter)
    }

    /// Number of names, including the reserved slot.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the reserved slot is present from construction.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Current hash table size in buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of arena pages allocated so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn utf8_eq(&self, id: NameId, text: &str) -> bool {
        match self.resolve(id) {
            NameRef::Utf8(existing) => existing == text,
            NameRef::Unique { .. } => false,
        }
    }

    #[inline]
    fn mask(&self) -> usize {
        self.buckets.len() - 1
    }

    /// Walk the probe sequence for `hash` until a matching name or an empty
    /// bucket is found.
    fn probe(
        &self,
        hash: u32,
        is_match: impl Fn(&NameTable, NameId) -> bool,
    ) -> Result<Probe, NameTableError> {
        let mask = self.mask();
        let mut bucket_id = hash as usize & mask;
        let mut probes = 1;
        loop {
            let bucket = self.buckets[bucket_id];
            if !bucket.name.exists() {
                return Ok(Probe::Vacant(bucket_id));
            }
            if bucket.hash == hash && is_match(self, bucket.name) {
                return Ok(Probe::Found(bucket.name));
            }
            if probes >= self.buckets.len() {
                return Err(NameTableError::TableFull { probes });
            }
            bucket_id = (bucket_id + probes) & mask;
            probes += 1;
        }
    }

    /// First empty bucket on the probe sequence for `hash`.
    fn vacant_bucket(&self, hash: u32) -> Result<usize, NameTableError> {
        match self.probe(hash, |_, _| false)? {
            Probe::Vacant(bucket) => Ok(bucket),
            Probe::Found(_) => Err(NameTableError::TableFull {
                probes: self.buckets.len(),
            }),
        }
    }

    /// Grow if the name array is at capacity. A bucket found before growth
    /// is meaningless afterwards, so the vacant bucket is looked up again.
    fn ensure_room(&mut self, hash: u32, bucket: usize) -> Result<usize, NameTableError> {
        if self.names.len() < self.name_capacity {
            return Ok(bucket);
        }
        self.expand();
        self.vacant_bucket(hash)
    }

    fn expand(&mut self) {
        let old_buckets = self.buckets.len();
        self.name_capacity *= 2;
        self.names
            .reserve(self.name_capacity.saturating_sub(self.names.len()));

        let mut buckets = vec![Bucket::default(); self.name_capacity * 2];
        let mask = buckets.len() - 1;
        for bucket in self.buckets.iter().filter(|b| b.name.exists()) {
            let mut bucket_id = bucket.hash as usize & mask;
            let mut probes = 1;
            while buckets[bucket_id].name.exists() {
                bucket_id = (bucket_id + probes) & mask;
                probes += 1;
            }
            buckets[bucket_id] = *bucket;
        }
        self.buckets = buckets;

        tracing::trace!(
            names = self.names.len(),
            old_buckets,
            new_buckets = self.buckets.len(),
            "expanded name table"
        );
    }

    /// Copy text into the arena, opening a new page if the current one lacks room.
    fn store_text(&mut self, text: &str) -> NameData {
        let needs_page = self
            .pages
            .last()
            .map_or(true, |page| page.len() + text.len() > self.page_size);
        if needs_page {
            tracing::trace!(pages = self.pages.len() + 1, "allocating string page");
            self.pages.push(String::with_capacity(self.page_size));
        }
        let page_index = self.pages.len() - 1;
        let page = &mut self.pages[page_index];
        let start = page.len();
        // Stays within the reserved capacity, so the page buffer never moves.
        page.push_str(text);
        NameData::Utf8 {
            page: to_u32(page_index),
            start: to_u32(start),
            len: to_u32(text.len()),
        }
    }

    fn push(&mut self, bucket: usize, hash: u32, data: NameData) -> NameId {
        let id = NameId(to_u32(self.names.len()));
        self.names.push(data);
        self.buckets[bucket] = Bucket { hash, name: id };
        id
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new(&TableConfig::default())
    }
}

impl fmt::Debug for NameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameTable")
            .field("names", &self.names.len())
            .field("buckets", &self.buckets.len())
            .field("pages", &self.pages.len())
            .finish_non_exhaustive()
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or_else(|_| panic!("internal error: name table index {n} exceeds u32"))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "folding a 64-bit hash into 32 bits"
)]
fn fold(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}

fn hash_utf8(text: &str) -> u32 {
    let mut hasher = FxHasher::default();
    hasher.write(text.as_bytes());
    fold(hasher.finish())
}

/// Separate derivation from [`hash_utf8`], keyed by a fixed tag. Bucket
/// matches still compare the stored `NameData`, so a hash collision with a
/// text name never aliases the two.
fn hash_unique(kind: UniqueNameKind, num: u32, original: NameId) -> u32 {
    const UNIQUE_TAG: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut hasher = FxHasher::default();
    UNIQUE_TAG.hash(&mut hasher);
    (kind as u8).hash(&mut hasher);
    num.hash(&mut hasher);
    original.0.hash(&mut hasher);
    fold(hasher.finish())
}

#[cfg(test)]
mod tests;
