//! Diagnostic queue: collects, limits, deduplicates and sorts.

use rtc_ir::Span;
use rustc_hash::FxHashSet;

use crate::{Diagnostic, ErrorCode};

/// Queue behaviour.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical (code, span, message) to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 100,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// No limit and no deduplication.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Sink for recoverable diagnostics.
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.push(Diagnostic::error(ErrorCode::E2001, span));
/// for diag in queue.flush() { ... }
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<(ErrorCode, Span, String)>,
    error_count: usize,
    /// Errors refused because the limit was reached.
    dropped: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        DiagnosticQueue::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            error_count: 0,
            dropped: 0,
            config,
        }
    }

    /// Queue `diag`. Returns `false` if it was filtered out.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();
        if self.config.deduplicate
            && !self
                .seen
                .insert((diag.code, diag.span, diag.message.clone()))
        {
            return false;
        }
        if is_error && self.limit_reached() {
            self.dropped += 1;
            return false;
        }
        if is_error {
            self.error_count += 1;
        }
        self.diagnostics.push(diag);
        true
    }

    /// Shorthand for `push(Diagnostic::error(code, span).with_message(message))`.
    pub fn error(&mut self, span: Span, code: ErrorCode, message: impl Into<String>) -> bool {
        self.push(Diagnostic::error(code, span).with_message(message))
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Drain the queue, sorted by position.
    ///
    /// Diagnostics at the same position keep their report order. If errors
    /// were dropped at the limit, a final E9002 says how many.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let already_sorted = self
            .diagnostics
            .windows(2)
            .all(|w| position(&w[0]) <= position(&w[1]));
        if !already_sorted {
            self.diagnostics.sort_by_key(position);
        }

        let mut result: Vec<Diagnostic> = self.diagnostics.drain(..).collect();
        if self.dropped > 0 {
            let span = result.last().map_or(Span::DUMMY, |d| d.span);
            result.push(too_many_errors(self.config.error_limit, self.dropped, span));
        }

        self.seen.clear();
        self.error_count = 0;
        self.dropped = 0;
        result
    }
}

fn position(diag: &Diagnostic) -> (rtc_ir::FileId, u32, u32) {
    (diag.span.file, diag.span.start, diag.span.end)
}

#[cold]
fn too_many_errors(limit: usize, dropped: usize, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002, span)
        .with_message(format!("stopped after {limit} errors"))
        .with_note(format!("{dropped} further errors were not reported"))
}
