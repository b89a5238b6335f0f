//! Channel struct definition
//!
//! A named group of clients. Channels are created on first JOIN and kept
//! even when the last member leaves.

use std::collections::HashSet;

use crate::types::ClientId;

/// Chat channel
#[derive(Debug)]
pub struct Channel {
    /// Channel name (`&...`), fixed at creation
    pub name: String,
    /// Current members
    pub members: HashSet<ClientId>,
    /// Channel topic (stored, never set by any command)
    pub topic: String,
}

impl Channel {
    /// Create an empty channel
    pub fn new(name: String) -> Self {
        Self {
            name,
            members: HashSet::new(),
            topic: String::new(),
        }
    }

    /// Check if a client is in this channel
    pub fn contains(&self, client_id: ClientId) -> bool {
        self.members.contains(&client_id)
    }

    /// Add a member
    ///
    /// Returns false if the client was already a member.
    pub fn add_member(&mut self, client_id: ClientId) -> bool {
        self.members.insert(client_id)
    }

    /// Remove a member
    ///
    /// Returns false if the client wasn't in the channel.
    pub fn remove_member(&mut self, client_id: ClientId) -> bool {
        self.members.remove(&client_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn set_topic(&mut self, topic: String) {
        self.topic = topic;
    }
}
