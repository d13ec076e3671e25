//! Scroll manager
//!
//! Owns the grabbed trackball and the virtual scroll device, runs the
//! read -> translate -> emit loop and tears both devices down on the way out.
//!
//! States: Starting -> Running -> Stopping -> Stopped. Teardown runs exactly
//! once, virtual device first, whether the loop ended on a stop request or an
//! error. Dropping a manager that never reached Stopped runs the same teardown.

use crate::backend::{BackendError, ScrollSink};
use crate::device::{select_device, DeviceError, MotionSource};
use crate::mapping::config::{ConfigError, Policy, Settings};
use crate::mapping::translate::ScrollTranslator;
use crate::shutdown::ShutdownToken;
use log::{debug, info, trace, warn};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrollError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("cannot create virtual device: {0}")]
    VirtualDeviceSetup(#[source] BackendError),

    #[error("failed to emit scroll event: {0}")]
    Emission(#[source] BackendError),
}

/// Lifecycle of a manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// Manager for one trackball and one virtual scroll device
pub struct ScrollManager<S, V>
where
    S: MotionSource,
    V: ScrollSink,
{
    source: S,
    sink: V,
    translator: ScrollTranslator,
    state: LifecycleState,
    /// Scroll steps emitted so far
    emitted: u64,
}

#[cfg(target_os = "linux")]
impl ScrollManager<crate::device::PhysicalDevice, crate::backend::UinputScrollDevice> {
    /// Resolve the device, grab it and create the uinput scroll device.
    pub fn start(settings: &Settings) -> Result<Self, ScrollError> {
        Self::start_with(
            settings,
            |path| crate::device::PhysicalDevice::open(path),
            crate::backend::create_scroll_device,
        )
    }
}

impl<S, V> ScrollManager<S, V>
where
    S: MotionSource,
    V: ScrollSink,
{
    /// Resolve the device path, then acquire the source with `open` and the
    /// sink with `create`.
    ///
    /// If the sink can't be created the source is released before the error
    /// is returned, so a failed start never leaves the trackball grabbed.
    pub fn start_with<O, C>(settings: &Settings, open: O, create: C) -> Result<Self, ScrollError>
    where
        O: FnOnce(&Path) -> Result<S, DeviceError>,
        C: FnOnce() -> Result<V, BackendError>,
    {
        debug!("Manager state: {:?}", LifecycleState::Starting);
        settings.validate()?;

        let path = select_device(&settings.device)?;
        println!(
            "Device: {} | Sensitivity: {:.2} | Dead zone: {}",
            path.display(),
            settings.policy.sensitivity,
            settings.policy.dead_zone
        );

        let mut source = open(&path)?;
        let sink = match create() {
            Ok(sink) => sink,
            Err(e) => {
                if let Err(release_err) = source.release() {
                    warn!("Cleanup: {}", release_err);
                }
                return Err(ScrollError::VirtualDeviceSetup(e));
            }
        };

        Ok(Self::new(source, sink, settings.policy))
    }

    /// Wrap two ready devices. The manager starts in Running.
    pub fn new(source: S, sink: V, policy: Policy) -> Self {
        info!(
            "Translating {} (sensitivity {:.2}, dead zone {})",
            source.name(),
            policy.sensitivity,
            policy.dead_zone
        );

        Self {
            source,
            sink,
            translator: ScrollTranslator::new(policy),
            state: LifecycleState::Running,
            emitted: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Run until `token` is stopped or a device fails, then tear down.
    ///
    /// The stop request is checked between reads; a read in progress is
    /// allowed to finish and its batch is still emitted.
    pub fn run(&mut self, token: &ShutdownToken) -> Result<(), ScrollError> {
        if self.state != LifecycleState::Running {
            warn!("run() called in state {:?}", self.state);
            return Ok(());
        }

        let outcome = self.process_events(token);
        if let Err(e) = &outcome {
            warn!("Event loop failed: {}", e);
        }

        self.shutdown();
        outcome
    }

    fn process_events(&mut self, token: &ShutdownToken) -> Result<(), ScrollError> {
        loop {
            if token.is_stopped() {
                info!("Stop requested, leaving event loop");
                return Ok(());
            }

            let batch = self.source.read_batch()?;
            trace!("Read {} events", batch.len());

            for command in self.translator.translate_batch(&batch) {
                self.sink.emit(&command).map_err(ScrollError::Emission)?;
                self.emitted += 1;
            }
        }
    }

    /// Destroy the virtual device, then release the trackball.
    ///
    /// Failures are logged and never stop the remaining steps. Only the
    /// first call does anything.
    pub fn shutdown(&mut self) {
        if self.state == LifecycleState::Stopped {
            return;
        }
        self.state = LifecycleState::Stopping;
        debug!("Manager state: {:?}", self.state);

        if let Err(e) = self.sink.destroy() {
            warn!("Cleanup: {}", e);
        }
        if let Err(e) = self.source.release() {
            warn!("Cleanup: {}", e);
        }

        self.state = LifecycleState::Stopped;
        info!("Stopped after {} scroll events", self.emitted);
    }
}

impl<S, V> Drop for ScrollManager<S, V>
where
    S: MotionSource,
    V: ScrollSink,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockScrollBackend;
    use crate::device::constants::{EV_REL, REL_Y};
    use crate::device::types::{MotionSample, ScrollCommand};
    use crate::device::MockMotionSource;
    use crate::shutdown::shutdown_channel;

    #[test]
    fn new_manager_is_running() {
        let manager = ScrollManager::new(
            MockMotionSource::new(vec![]),
            MockScrollBackend::new(),
            Policy::default(),
        );
        assert_eq!(manager.state(), LifecycleState::Running);
    }

    #[test]
    fn stop_before_first_read_reads_nothing() {
        let backend = MockScrollBackend::new();
        let source = MockMotionSource::new(vec![vec![MotionSample::new(EV_REL, REL_Y, 20)]]);
        let mut manager = ScrollManager::new(source, backend.clone(), Policy::default());

        let (handle, token) = shutdown_channel();
        handle.close();

        assert!(manager.run(&token).is_ok());
        assert_eq!(manager.source().reads(), 0);
        assert!(backend.emitted().is_empty());
        assert_eq!(manager.state(), LifecycleState::Stopped);
    }

    #[test]
    fn shutdown_runs_once() {
        let backend = MockScrollBackend::new();
        let source = MockMotionSource::new(vec![]);
        let releases = source.release_counter();
        let mut manager = ScrollManager::new(source, backend.clone(), Policy::default());

        manager.shutdown();
        manager.shutdown();
        drop(manager);

        assert_eq!(backend.destroy_calls(), 1);
        assert_eq!(releases.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_tears_down_unfinished_manager() {
        let backend = MockScrollBackend::new();
        {
            let _manager = ScrollManager::new(
                MockMotionSource::new(vec![]),
                backend.clone(),
                Policy::default(),
            );
        }
        assert!(backend.is_destroyed());
    }

    #[test]
    fn run_after_stop_is_noop() {
        let backend = MockScrollBackend::new();
        let source = MockMotionSource::new(vec![vec![MotionSample::new(EV_REL, REL_Y, 20)]]);
        let mut manager = ScrollManager::new(source, backend.clone(), Policy::default());
        manager.shutdown();

        let (_handle, token) = shutdown_channel();
        assert!(manager.run(&token).is_ok());
        assert_eq!(manager.source().reads(), 0);
        assert_eq!(backend.emitted(), Vec::<ScrollCommand>::new());
    }
}
