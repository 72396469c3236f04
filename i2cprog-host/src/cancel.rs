//! Cooperative cancellation
//!
//! The transfer engine polls a [`CancelToken`] between bytes. The interrupt
//! adapter installed by [`install_interrupt_handler`] is the only writer: it
//! waits for SIGINT/SIGTERM (Ctrl-C on other platforms) on a background thread
//! and does nothing but set the flag.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Install the interrupt adapter for `token`
///
/// Spawns a background thread running a single-threaded tokio runtime that
/// waits for the first interrupt and cancels the token.
///
/// # Errors
///
/// Returns an error if the runtime or the thread cannot be created.
pub fn install_interrupt_handler(token: CancelToken) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;

    // Register the signal listeners before returning so an interrupt that
    // arrives right after installation is not lost.
    let listener = runtime.block_on(async { InterruptListener::new() })?;

    thread::Builder::new()
        .name("interrupt".into())
        .spawn(move || {
            runtime.block_on(listener.recv());
            token.cancel();
        })?;

    Ok(())
}

#[cfg(unix)]
struct InterruptListener {
    sigint: tokio::signal::unix::Signal,
    sigterm: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl InterruptListener {
    fn new() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(mut self) {
        tokio::select! {
            _ = self.sigint.recv() => {},
            _ = self.sigterm.recv() => {},
        }
    }
}

#[cfg(not(unix))]
struct InterruptListener;

#[cfg(not(unix))]
impl InterruptListener {
    fn new() -> io::Result<Self> {
        Ok(Self)
    }

    async fn recv(self) {
        if tokio::signal::ctrl_c().await.is_err() {
            // Without a listener the token can never be set; park forever
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_visible_through_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let token = CancelToken::new();
        let writer = token.clone();
        thread::spawn(move || writer.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }
}
