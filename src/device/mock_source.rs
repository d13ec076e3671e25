//! Mock motion source for testing.
//!
//! Replays scripted batches instead of reading a real device. Once the
//! script runs out, reads fail the way an unplugged device would.

use crate::device::types::MotionSample;
use crate::device::{DeviceError, MotionSource};
use log::info;
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type ReadHook = Box<dyn FnMut(usize) + Send>;

/// Mock source that hands out pre-recorded batches.
pub struct MockMotionSource {
    name: String,
    batches: VecDeque<Vec<MotionSample>>,
    reads: usize,
    releases: Arc<AtomicUsize>,
    on_read: Option<ReadHook>,
}

impl MockMotionSource {
    /// Create a mock source with the given batches.
    pub fn new(batches: Vec<Vec<MotionSample>>) -> Self {
        Self {
            name: "Mock Trackball".to_string(),
            batches: batches.into(),
            reads: 0,
            releases: Arc::new(AtomicUsize::new(0)),
            on_read: None,
        }
    }

    /// Run `hook` after every successful read, with the 1-based read count.
    pub fn with_read_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.on_read = Some(Box::new(hook));
        self
    }

    /// Number of reads served so far
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Shared counter of release() calls
    pub fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.releases)
    }
}

impl MotionSource for MockMotionSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_batch(&mut self) -> Result<Vec<MotionSample>, DeviceError> {
        let batch = self.batches.pop_front().ok_or_else(|| {
            DeviceError::Read(io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted events"))
        })?;

        self.reads += 1;
        info!("[MOCK SOURCE] Read #{}: {} events", self.reads, batch.len());

        if let Some(hook) = self.on_read.as_mut() {
            hook(self.reads);
        }

        Ok(batch)
    }

    fn release(&mut self) -> Result<(), DeviceError> {
        info!("[MOCK SOURCE] Release");
        self.releases.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_batches_then_fails() {
        let mut source = MockMotionSource::new(vec![vec![MotionSample::new(2, 1, 5)]]);

        assert_eq!(source.read_batch().unwrap(), vec![MotionSample::new(2, 1, 5)]);
        assert!(matches!(source.read_batch(), Err(DeviceError::Read(_))));
        assert_eq!(source.reads(), 1);
    }
}
