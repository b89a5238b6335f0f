//! Client session definition
//!
//! Represents a connected client with its registration state, joined
//! channels and outbound line channel.

use std::collections::BTreeSet;

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::types::ClientId;

/// Nickname placeholder before the client picks one
pub const UNSET_NICK: &str = "*";

/// Connected client session
///
/// Mutated only by the server actor. `channels` mirrors channel membership:
/// a name is in here iff this client is in that channel's member set.
#[derive(Debug)]
pub struct Client {
    /// Unique identifier for this client
    pub id: ClientId,
    /// Current (or pending, before registration) nickname
    pub nickname: String,
    /// Set once both nickname and real name are known
    pub registered: bool,
    /// Real name from USER
    pub real_name: Option<String>,
    /// Names of joined channels
    pub channels: BTreeSet<String>,
    /// Server → Client line channel
    pub sender: mpsc::UnboundedSender<String>,
}

impl Client {
    /// Create a new, unregistered client
    pub fn new(id: ClientId, sender: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id,
            nickname: UNSET_NICK.to_string(),
            registered: false,
            real_name: None,
            channels: BTreeSet::new(),
            sender,
        }
    }

    /// Queue a line for this client
    ///
    /// Never waits. Returns an error if the connection's writer is gone.
    pub fn send(&self, line: String) -> Result<(), SendError> {
        self.sender.send(line).map_err(|_| SendError::ChannelClosed)
    }

    /// Check if a nickname (pending or registered) has been chosen
    pub fn has_nickname(&self) -> bool {
        self.nickname != UNSET_NICK
    }

    /// Whether NICK and USER have both arrived but registration has not happened
    pub fn ready_to_register(&self) -> bool {
        !self.registered && self.has_nickname() && self.real_name.is_some()
    }

    /// Check channel membership by name
    pub fn is_in(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }
}
