//! rtc IR: tables and trees shared by the front end.
//!
//! - [`NameTable`]: interned identifiers and synthesized unique names
//! - [`SymbolTable`]: declared classes, methods, fields and locals
//! - [`GlobalState`] / [`Context`]: both tables plus the current owner
//! - [`parse_tree`]: the raw parser output consumed by desugaring
//! - [`ast`]: the canonical tree produced by desugaring
//! - [`visitor`]: the [`TreeMap`] rewrite protocol over [`ast`]
//!
//! Names and symbols are `u32` handles. They are never reused and stay
//! valid for the lifetime of the tables, however much the tables grow.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod config;
mod context;
mod names;
pub mod parse_tree;
mod span;
mod symbols;
pub mod visitor;

pub use config::TableConfig;
pub use context::{Context, GlobalState};
pub use names::{NameId, NameRef, NameTable, NameTableError, UniqueNameKind};
pub use span::{FileId, Span};
pub use symbols::{SymbolFlags, SymbolId, SymbolInfo, SymbolTable};
pub use visitor::{map_tree, TreeMap};

static_assert_size!(NameId, 4);
static_assert_size!(SymbolId, 4);
static_assert_size!(Span, 12);
