use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// In-process request counters shared by every handler.
#[derive(Debug, Default)]
pub struct ApiMetrics {
    fileserver_hits: AtomicU64,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request served from `/app/`.
    pub fn record_fileserver_hit(&self) {
        self.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fileserver_hits(&self) -> u64 {
        self.fileserver_hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.fileserver_hits.store(0, Ordering::Relaxed);
    }
}
