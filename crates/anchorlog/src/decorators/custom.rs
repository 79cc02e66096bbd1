use std::sync::Arc;

use anchorlog_core::{AtomicLevel, Field, Level, Logger, MergeContext, PrinterOption};

/// Adds fixed fields and printer options to every call.
pub struct CustomLogger {
    parent: Arc<dyn Logger>,
    min_level: AtomicLevel,
    fields: Vec<Field>,
    options: Vec<PrinterOption>,
}

impl CustomLogger {
    pub fn new(parent: Arc<dyn Logger>, fields: Vec<Field>, options: Vec<PrinterOption>) -> Self {
        Self {
            parent,
            min_level: AtomicLevel::default(),
            fields,
            options,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn options(&self) -> &[PrinterOption] {
        &self.options
    }
}

impl Logger for CustomLogger {
    fn log_impl(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        opts: &[PrinterOption],
        mut ctx: MergeContext,
    ) {
        ctx.merge_min_level(self.min_level.get());
        ctx.merge_fields(&self.fields);

        if self.options.is_empty() {
            self.parent.log_impl(level, msg, fields, opts, ctx);
        } else {
            let mut merged = Vec::with_capacity(self.options.len() + opts.len());
            merged.extend_from_slice(&self.options);
            merged.extend_from_slice(opts);
            self.parent.log_impl(level, msg, fields, &merged, ctx);
        }
    }

    fn min_level(&self) -> Level {
        self.min_level.get()
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.set(level);
    }

    fn parent(&self) -> Option<Arc<dyn Logger>> {
        Some(Arc::clone(&self.parent))
    }
}

impl std::fmt::Debug for CustomLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomLogger")
            .field("min_level", &self.min_level.get())
            .field("fields", &self.fields)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
