//! Server-wide state tables
//!
//! Owns every client session, the nickname table and the channel table, and
//! keeps the two sides of channel membership in step.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::channel::Channel;
use crate::client::Client;
use crate::types::ClientId;

/// Nickname, channel and session tables
///
/// Only registered clients appear in the nickname table, always under their
/// current nickname.
#[derive(Debug, Default)]
pub struct Registry {
    /// All connected clients: ClientId -> Client
    clients: HashMap<ClientId, Client>,
    /// Registered nicknames: nickname -> ClientId
    nicknames: HashMap<String, ClientId>,
    /// All channels ever joined: name -> Channel
    channels: HashMap<String, Channel>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly connected client
    pub fn add_client(&mut self, client: Client) {
        self.clients.insert(client.id, client);
    }

    /// Forget a client, releasing its nickname
    ///
    /// The caller is expected to have emptied its channel set first.
    pub fn remove_client(&mut self, client_id: ClientId) -> Option<Client> {
        let client = self.clients.remove(&client_id)?;
        if client.registered && self.nicknames.get(&client.nickname) == Some(&client_id) {
            self.nicknames.remove(&client.nickname);
        }
        Some(client)
    }

    pub fn client(&self, client_id: ClientId) -> Option<&Client> {
        self.clients.get(&client_id)
    }

    pub fn client_mut(&mut self, client_id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&client_id)
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Find the client registered under an exact nickname
    pub fn find_nick(&self, nickname: &str) -> Option<ClientId> {
        self.nicknames.get(nickname).copied()
    }

    /// Whether a nickname is registered to a client other than `client_id`
    pub fn nick_taken(&self, nickname: &str, client_id: ClientId) -> bool {
        self.find_nick(nickname)
            .is_some_and(|owner| owner != client_id)
    }

    /// Enter a client into the nickname table under its current nickname
    pub fn claim_nick(&mut self, client_id: ClientId) {
        if let Some(client) = self.clients.get(&client_id) {
            self.nicknames.insert(client.nickname.clone(), client_id);
        }
    }

    /// Change a registered client's nickname, moving its table entry
    ///
    /// Returns the old nickname.
    pub fn rename(&mut self, client_id: ClientId, nickname: &str) -> Option<String> {
        let client = self.clients.get_mut(&client_id)?;
        let old = std::mem::replace(&mut client.nickname, nickname.to_string());
        self.nicknames.remove(&old);
        self.nicknames.insert(nickname.to_string(), client_id);
        Some(old)
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Add a client to a channel, creating the channel if needed
    ///
    /// Returns false if the client was already a member.
    pub fn join(&mut self, client_id: ClientId, name: &str) -> bool {
        let Some(client) = self.clients.get_mut(&client_id) else {
            return false;
        };

        let channel = self.channels.entry(name.to_string()).or_insert_with(|| {
            debug!("Channel {} created", name);
            Channel::new(name.to_string())
        });

        if !channel.add_member(client_id) {
            return false;
        }
        client.channels.insert(name.to_string());
        true
    }

    /// Remove a client from a channel
    ///
    /// Returns false if the client wasn't a member. Empty channels are kept.
    pub fn part(&mut self, client_id: ClientId, name: &str) -> bool {
        let Some(channel) = self.channels.get_mut(name) else {
            return false;
        };
        if !channel.remove_member(client_id) {
            return false;
        }
        if let Some(client) = self.clients.get_mut(&client_id) {
            client.channels.remove(name);
        }
        true
    }

    /// Members of a channel (empty if it doesn't exist)
    pub fn members(&self, name: &str) -> Vec<ClientId> {
        self.channels
            .get(name)
            .map(|c| c.members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Sorted nicknames of a channel's members
    pub fn member_nicknames(&self, name: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .members(name)
            .into_iter()
            .filter_map(|id| self.clients.get(&id))
            .map(|c| c.nickname.clone())
            .collect();
        names.sort();
        names
    }

    /// Everyone sharing at least one channel with `client_id`, deduplicated
    ///
    /// Includes the client itself whenever it is in any channel.
    pub fn notify_set(&self, client_id: ClientId) -> HashSet<ClientId> {
        let Some(client) = self.clients.get(&client_id) else {
            return HashSet::new();
        };

        client
            .channels
            .iter()
            .filter_map(|name| self.channels.get(name))
            .flat_map(|channel| channel.members.iter().copied())
            .collect()
    }

    /// Queue a line for a client
    ///
    /// Fire-and-forget: a closed connection is logged, not reported.
    pub fn deliver(&self, client_id: ClientId, line: String) {
        let Some(client) = self.clients.get(&client_id) else {
            return;
        };

        debug!("send to {}: {}", client.nickname, line);
        if client.send(line).is_err() {
            warn!("Dropping line for {}: connection closed", client_id);
        }
    }
}
