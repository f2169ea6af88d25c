//! Stack growth for recursive tree passes.
//!
//! Desugaring and the tree rewrite both recurse once per level of source
//! nesting. Pathological input (thousands of nested parentheses or chained
//! `&&`) would overflow a thread's default stack, so every recursive step
//! goes through [`ensure_sufficient_stack`], which moves onto a freshly
//! allocated segment when the current one runs low.
//!
//! On `wasm32` the call is a plain passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the remaining stack
/// is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
