//! Table sizing.

/// Initial sizing of the name and symbol tables.
///
/// Capacities are starting points only; both tables grow on demand.
/// `page_size` is a hard limit: a single name longer than one arena page
/// cannot be interned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TableConfig {
    /// Names reserved up front. Rounded up to a power of two.
    pub name_capacity: usize,
    /// Symbols reserved up front.
    pub symbol_capacity: usize,
    /// Size in bytes of each string arena page.
    pub page_size: usize,
}

impl TableConfig {
    /// Default arena page size (64 KiB).
    pub const DEFAULT_PAGE_SIZE: usize = 64 * 1024;

    /// A deliberately tiny configuration that forces growth early.
    pub fn small() -> Self {
        TableConfig {
            name_capacity: 32,
            symbol_capacity: 16,
            page_size: 256,
        }
    }

    #[must_use]
    pub fn with_name_capacity(mut self, name_capacity: usize) -> Self {
        self.name_capacity = name_capacity;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Name capacity after rounding; never below the well-known set.
    pub(crate) fn effective_name_capacity(&self) -> usize {
        self.name_capacity.max(32).next_power_of_two()
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            name_capacity: 4096,
            symbol_capacity: 8192,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}
