//! Chain-walking helpers for anchored lines.
//!
//! Callers hold plain `Arc<dyn Logger>` values and never need to know which
//! logger in a chain owns the terminal. These helpers walk `parent()` links
//! until they find the capability they need.

use std::sync::Arc;

use anchorlog_core::Logger;

use crate::decorators::NoAnchorLogger;
use crate::targets;

/// The logger `logger` forwards to, if any.
pub fn parent(logger: &Arc<dyn Logger>) -> Option<Arc<dyn Logger>> {
    logger.parent()
}

/// Anchors a new line below the output of `logger`.
///
/// The returned handle forwards to `logger`, so fields and levels set on the
/// chain still apply. When nothing on the chain can anchor lines, the handle
/// is a pass-through and transient calls are filtered as usual.
pub fn add_anchor(logger: &Arc<dyn Logger>) -> Arc<dyn Logger> {
    let mut current = Some(Arc::clone(logger));
    while let Some(node) = current {
        if let Some(adder) = node.anchor_adder() {
            return adder.add_anchor(Arc::clone(logger));
        }
        current = node.parent();
    }

    log::debug!(target: targets::ANCHORS, "no anchoring root on the chain, falling back to a pass-through");
    Arc::new(NoAnchorLogger::new(Arc::clone(logger)))
}

/// Releases the anchored line owned by `logger` or its nearest ancestor
/// owning one. Repeated calls do nothing.
pub fn remove_anchor(logger: &Arc<dyn Logger>) {
    let mut current = Some(Arc::clone(logger));
    while let Some(node) = current {
        if let Some(remover) = node.anchor_remover() {
            remover.remove_anchor();
            return;
        }
        current = node.parent();
    }
}
