//! Collaborator interfaces the demo system drives
//!
//! The demo core doesn't own the network, the filesystem or the client's
//! connection state. Hosts implement these traits and pass them into the
//! session operations that need them.

use super::error::DemoError;

/// Result of polling the live transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// A complete protocol message
    Message(Vec<u8>),
    /// Nothing available right now
    NoMessage,
    /// The connection was closed by the remote end
    Closed,
    /// The transport failed
    Error(String),
}

/// Non-blocking source of live protocol messages
pub trait LiveTransport {
    /// Poll for the next message; must never block
    fn get_message(&mut self) -> Received;
}

/// Finds recordings by name
pub trait DemoLoader {
    /// Load a recording, or `NotFound`
    fn find_file(&self, name: &str) -> Result<Vec<u8>, DemoError>;
}

/// Receives finished recordings
pub trait DemoExporter {
    /// Persist or hand off a finished recording
    fn export_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), DemoError>;
}

/// The client's connection and command surface
pub trait ClientControl {
    /// Drop any live connection (and its sign-on state)
    fn disconnect(&mut self);
    /// Whether a live server connection is up
    fn is_connected(&self) -> bool;
    /// Run a console command, e.g. `map e1m1`
    fn execute_command(&mut self, command: &str);
}

/// Transport for hosts without a network connection
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl LiveTransport for NullTransport {
    fn get_message(&mut self) -> Received {
        Received::NoMessage
    }
}

/// Client with no server connection
///
/// Collects issued commands so tools can report them.
#[derive(Debug, Default, Clone)]
pub struct DetachedClient {
    pub connected: bool,
    pub disconnects: u32,
    pub commands: Vec<String>,
}

impl ClientControl for DetachedClient {
    fn disconnect(&mut self) {
        self.connected = false;
        self.disconnects += 1;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn execute_command(&mut self, command: &str) {
        tracing::debug!(command, "Executing command");
        self.commands.push(command.to_string());
    }
}
