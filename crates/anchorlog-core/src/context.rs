//! Per-call merge context.

use crate::field::Field;
use crate::level::Level;

/// State accumulated while a call travels from a decorator up to its root.
///
/// A fresh context is built at the call site. Each logger on the way up
/// merges its own configuration into it before forwarding; the root reads
/// the result to decide whether and how to print.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeContext {
    /// Anchored line this call targets, or 0 for none.
    pub anchored_line: u32,
    /// Highest local minimum level seen so far.
    pub min_level: Level,
    /// Fields contributed by decorators, outermost (nearest the root) first.
    pub fields: Vec<Field>,
}

impl MergeContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the effective minimum level to `min` if it is higher.
    pub fn merge_min_level(&mut self, min: Level) {
        if self.min_level < min {
            self.min_level = min;
        }
    }

    /// Places `fields` before any fields already collected.
    pub fn merge_fields(&mut self, fields: &[Field]) {
        if fields.is_empty() {
            return;
        }
        self.fields.splice(0..0, fields.iter().cloned());
    }

    /// Whether a message at `level` survives filtering.
    ///
    /// Transient writes to an anchored line are always kept.
    #[must_use]
    pub fn keeps(&self, level: Level) -> bool {
        level >= self.min_level || (self.anchored_line != 0 && level == Level::Transient)
    }
}
