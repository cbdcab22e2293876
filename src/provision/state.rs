//! Per-process session bookkeeping.

/// State carried across provisioning calls within one process.
///
/// The counter only ever grows; it resets when the process restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    containers_created: u32,
}

impl SessionState {
    /// A fresh session with nothing created yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            containers_created: 0,
        }
    }

    /// Number of successful creations so far.
    #[must_use]
    pub const fn containers_created(&self) -> u32 {
        self.containers_created
    }

    /// Record one successful creation.
    pub const fn record_creation(&mut self) {
        self.containers_created = self.containers_created.saturating_add(1);
    }
}
