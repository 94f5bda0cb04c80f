//! Hooks for metrics and connection lifecycle notifications
//!
//! The store reports command latency and the client reports connection
//! events through a [`StoreObserver`] handed to them at construction.

use std::fmt;
use std::time::Duration;

use crate::error::SessionError;

/// Key-value commands issued on behalf of session operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `GET`
    Get,
    /// `SET` without expiry
    Set,
    /// `SETEX`, atomic set with expiry
    SetEx,
    /// `DEL`
    Del,
    /// `EXPIRE`
    Expire,
    /// `SCAN` over the store prefix
    Scan,
}

impl Command {
    /// Command name as the backend spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Get => "GET",
            Command::Set => "SET",
            Command::SetEx => "SETEX",
            Command::Del => "DEL",
            Command::Expire => "EXPIRE",
            Command::Scan => "SCAN",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives latency samples and connection lifecycle events
///
/// All methods default to doing nothing, so implementors only override
/// what they collect.
pub trait StoreObserver: Send + Sync + 'static {
    /// A command finished, successfully or not
    fn command_completed(&self, _command: Command, _elapsed: Duration, _succeeded: bool) {}

    /// The client established its initial connection to `target`
    ///
    /// Reconnects performed inside the connection manager are not reported;
    /// expect one call per client, not one per connection.
    fn connected(&self, _target: &str) {}

    /// The client hit a transport-level failure
    fn connection_error(&self, _error: &SessionError) {}
}

/// Observer that writes everything to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn command_completed(&self, command: Command, elapsed: Duration, succeeded: bool) {
        tracing::debug!(
            command = command.as_str(),
            elapsed_us = elapsed.as_micros() as u64,
            succeeded,
            "session store command completed"
        );
    }

    fn connected(&self, target: &str) {
        tracing::info!(addr = target, "session store connected");
    }

    fn connection_error(&self, error: &SessionError) {
        tracing::warn!("session store connection error: {}", error);
    }
}
