//! Replace-in-progress state.

/// Target of a pending replacement.
///
/// `Idle` when `target` is `None`, `Pending(target)` otherwise. Beginning a
/// new replacement while one is pending discards the old target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceSession {
    target: Option<String>,
}

impl ReplaceSession {
    /// Enter `Pending(name)`. Returns the discarded target, if any.
    pub fn begin(&mut self, name: impl Into<String>) -> Option<String> {
        self.target.replace(name.into())
    }

    /// Back to `Idle`. Idempotent.
    pub fn clear(&mut self) {
        self.target = None;
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.target.is_some()
    }

    /// Status line shown above the replace panel.
    pub fn status_line(&self) -> Option<String> {
        self.target
            .as_ref()
            .map(|name| format!("Document to replace: {name}"))
    }
}
