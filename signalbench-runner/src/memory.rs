//! Heap allocation tracking for peak-memory measurement.
//!
//! `TrackingAllocator` wraps the system allocator and counts live bytes and
//! a resettable high-water mark. A binary opts in with:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: signalbench_runner::memory::TrackingAllocator =
//!     signalbench_runner::memory::TrackingAllocator;
//! ```
//!
//! Counters are process-wide: a probe attributes every allocation on every
//! thread to the measured pass, so passes must not overlap.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

static CURRENT: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Counting wrapper around [`System`].
pub struct TrackingAllocator;

#[inline]
fn record_alloc(size: usize) {
    if !INSTALLED.load(Ordering::Relaxed) {
        INSTALLED.store(true, Ordering::Relaxed);
    }
    let now = CURRENT.fetch_add(size, Ordering::Relaxed) + size;
    PEAK.fetch_max(now, Ordering::Relaxed);
}

#[inline]
fn record_dealloc(size: usize) {
    CURRENT.fetch_sub(size, Ordering::Relaxed);
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            let old_size = layout.size();
            if new_size >= old_size {
                record_alloc(new_size - old_size);
            } else {
                record_dealloc(old_size - new_size);
            }
        }
        new_ptr
    }
}

/// True once any allocation has gone through [`TrackingAllocator`].
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Relaxed)
}

/// Measures the allocation high-water mark above a baseline.
#[derive(Debug)]
pub struct MemoryProbe {
    baseline: usize,
}

impl MemoryProbe {
    /// Record the current allocation level and reset the peak to it.
    pub fn start() -> Self {
        let baseline = CURRENT.load(Ordering::Relaxed);
        PEAK.store(baseline, Ordering::Relaxed);
        Self { baseline }
    }

    /// Peak bytes above the baseline since `start`, or `None` when the
    /// tracking allocator is not the global allocator.
    pub fn peak_bytes(&self) -> Option<u64> {
        if !is_installed() {
            return None;
        }
        let peak = PEAK.load(Ordering::Relaxed);
        Some(peak.saturating_sub(self.baseline) as u64)
    }
}

/// Convert bytes to mebibytes for display.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
