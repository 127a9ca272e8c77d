//! Shutdown hand-off between the signal handler and the HTTP server.
//!
//! The relay runs a single server task. [`signals::spawn_signal_handler`]
//! owns a [`Shutdown`] and calls [`Shutdown::trigger`] on SIGINT/SIGTERM;
//! [`HttpServer::run`] holds the receiver and, once it fires, stops
//! accepting and waits for in-flight upstream calls to finish.
//!
//! [`signals::spawn_signal_handler`]: crate::lifecycle::signals::spawn_signal_handler
//! [`HttpServer::run`]: crate::http::HttpServer::run

use tokio::sync::broadcast;

/// Sender side of the drain signal.
///
/// Take the server's receiver with [`subscribe`](Self::subscribe) before the
/// handle moves to the signal task; a receiver created after `trigger` never
/// sees it.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to hand to [`HttpServer::run`](crate::http::HttpServer::run).
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask the server to drain. Safe to call with no server listening.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
