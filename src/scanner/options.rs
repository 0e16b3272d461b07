//! Scan configuration.
//!
//! `ScanOptions` chooses how the engine is driven and how errors are labeled
//! when rendered. Every option combination yields the same tokens and errors
//! in the same order.

/// How the scanner engine is run relative to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyMode {
    /// Run the engine on the caller's thread, collecting results directly.
    #[default]
    Sequential,
    /// Run the engine on a worker thread and drain it through rendezvous channels.
    Threaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub concurrency: ConcurrencyMode,
    /// Name shown for the source in rendered diagnostics.
    pub source_name: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            concurrency: ConcurrencyMode::Sequential,
            source_name: "input".to_string(),
        }
    }
}

impl ScanOptions {
    pub fn with_concurrency(mut self, concurrency: ConcurrencyMode) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }
}
