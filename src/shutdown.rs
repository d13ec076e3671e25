//! Stop signalling between the signal listener and the event loop
//!
//! The indicator is a crossbeam channel nobody ever sends on. Closing it
//! drops the only sender, which disconnects the channel for every token.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use log::{debug, info};
use std::io;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Closes the stop indicator. Cheap to clone; closing twice is a no-op.
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    sender: Arc<Mutex<Option<Sender<()>>>>,
}

/// Observes the stop indicator
#[derive(Clone, Debug)]
pub struct ShutdownToken {
    receiver: Receiver<()>,
}

/// Create a connected handle/token pair
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownToken) {
    let (sender, receiver) = bounded(0);
    (
        ShutdownHandle {
            sender: Arc::new(Mutex::new(Some(sender))),
        },
        ShutdownToken { receiver },
    )
}

impl ShutdownHandle {
    /// Request shutdown
    pub fn close(&self) {
        let taken = match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if taken.is_some() {
            debug!("Stop requested");
        }
    }
}

impl ShutdownToken {
    /// Non-blocking check
    pub fn is_stopped(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }
}

/// Spawn a thread that closes `handle` on SIGINT or SIGTERM.
///
/// The runtime and signal handlers are installed before this returns, so
/// a signal arriving right after startup is not lost.
#[cfg(unix)]
pub fn spawn_signal_listener(handle: ShutdownHandle) -> io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let (mut interrupt, mut terminate) = {
        let _guard = rt.enter();
        (
            signal(SignalKind::interrupt())?,
            signal(SignalKind::terminate())?,
        )
    };

    thread::Builder::new()
        .name("signal-listener".to_string())
        .spawn(move || {
            rt.block_on(async {
                tokio::select! {
                    _ = interrupt.recv() => info!("Received SIGINT"),
                    _ = terminate.recv() => info!("Received SIGTERM"),
                }
            });
            handle.close();
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn starts_open() {
        let (_handle, token) = shutdown_channel();
        assert!(!token.is_stopped());
    }

    #[test]
    fn close_is_idempotent() {
        let (handle, token) = shutdown_channel();
        handle.close();
        handle.close();
        handle.clone().close();
        assert!(token.is_stopped());
        assert!(token.is_stopped());
    }

    #[test]
    fn every_token_sees_close() {
        let (handle, token) = shutdown_channel();
        let other = token.clone();
        handle.close();
        assert!(token.is_stopped());
        assert!(other.is_stopped());
    }

    #[test]
    fn close_from_another_thread_is_seen() {
        let (handle, token) = shutdown_channel();
        let closer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.close();
        });

        closer.join().unwrap();
        assert!(token.is_stopped());
    }
}
