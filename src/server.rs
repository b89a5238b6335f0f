//! ChatServer Actor implementation
//!
//! The single owner of all protocol state. Connection handlers send it
//! `ServerCommand`s over an mpsc channel; each command is processed to
//! completion before the next one is received, so no locking is needed.

use std::collections::HashMap;
use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::{Client, UNSET_NICK};
use crate::commands;
use crate::config::ServerConfig;
use crate::error::IrcError;
use crate::message::Message;
use crate::registry::Registry;
use crate::reply::{self, Reply};
use crate::types::ClientId;

/// Commands that are refused with ERR_NOTREGISTERED before registration
const REGISTRATION_REQUIRED: &[&str] = &["join", "part", "privmsg"];

/// A command handler: reads the parsed line and mutates server state
pub type CommandHandler = fn(&mut ChatServer, ClientId, &Message) -> Result<(), IrcError>;

/// Commands sent from connection handlers to the ChatServer actor
#[derive(Debug)]
pub enum ServerCommand {
    /// New client connected
    Connect {
        client_id: ClientId,
        sender: mpsc::UnboundedSender<String>,
    },
    /// Client disconnected
    Disconnect { client_id: ClientId },
    /// One framed line, terminator stripped
    Line { client_id: ClientId, line: String },
}

/// The main ChatServer actor
pub struct ChatServer {
    /// Static server identity
    pub(crate) info: ServerConfig,
    /// Clients, nicknames and channels
    pub(crate) registry: Registry,
    /// Lower-case command name -> handler, built once
    handlers: HashMap<&'static str, CommandHandler>,
}

impl ChatServer {
    /// Create a new ChatServer with the given identity
    pub fn new(info: ServerConfig) -> Self {
        Self {
            info,
            registry: Registry::new(),
            handlers: commands::table(),
        }
    }

    /// Run the ChatServer event loop
    ///
    /// Continuously receives and processes commands until all senders are dropped.
    pub async fn run(mut self, mut receiver: mpsc::Receiver<ServerCommand>) {
        info!("ChatServer '{}' started as {}", self.info.name, self.info.host);

        while let Some(cmd) = receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("ChatServer shutting down");
    }

    /// Process a single command
    pub fn handle_command(&mut self, cmd: ServerCommand) {
        match cmd {
            ServerCommand::Connect { client_id, sender } => self.connect(client_id, sender),
            ServerCommand::Disconnect { client_id } => self.disconnect(client_id),
            ServerCommand::Line { client_id, line } => self.process_line(client_id, &line),
        }
    }

    /// Handle new client connection
    pub fn connect(&mut self, client_id: ClientId, sender: mpsc::UnboundedSender<String>) {
        info!("Client {} connected", client_id);
        self.registry.add_client(Client::new(client_id, sender));
        debug!(
            "Total clients: {}, Total channels: {}",
            self.registry.client_count(),
            self.registry.channel_count()
        );
    }

    /// Handle client disconnection
    ///
    /// The client parts every channel it is in, then its nickname is released.
    pub fn disconnect(&mut self, client_id: ClientId) {
        if self.registry.client(client_id).is_none() {
            return;
        }

        commands::leave_all_channels(self, client_id);

        if let Some(client) = self.registry.remove_client(client_id) {
            info!("Client {} ({}) disconnected", client_id, client.nickname);
        }
        debug!(
            "Total clients: {}, Total channels: {}",
            self.registry.client_count(),
            self.registry.channel_count()
        );
    }

    /// Process one protocol line from a client
    pub fn process_line(&mut self, client_id: ClientId, line: &str) {
        let Some(client) = self.registry.client(client_id) else {
            warn!("Line from unknown client {}: {}", client_id, line);
            return;
        };
        debug!("received from {}: {}", client.nickname, line);

        match Message::parse(line) {
            Ok(msg) => self.dispatch(client_id, &msg),
            Err(e) => debug!("Ignoring line from {}: {}", client_id, e),
        }
    }

    /// Gate, look up and run the handler for a parsed message
    fn dispatch(&mut self, client_id: ClientId, msg: &Message) {
        let registered = self
            .registry
            .client(client_id)
            .is_some_and(|c| c.registered);

        let result = if !registered && REGISTRATION_REQUIRED.contains(&msg.command.as_str()) {
            Err(IrcError::NotRegistered)
        } else {
            match self.handlers.get(msg.command.as_str()).copied() {
                Some(handler) => handler(self, client_id, msg),
                None => {
                    debug!("Unsupported IRC command: {} {:?}", msg.command, msg.args);
                    Ok(())
                }
            }
        };

        if let Err(err) = result {
            debug!("{} from {} failed: {:?}", msg.command, client_id, err);
            self.reply(client_id, err.reply(), &err.to_string());
        }
    }

    /// Get the server identity
    pub fn info(&self) -> &ServerConfig {
        &self.info
    }

    /// Get the state tables
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current nickname of a client (`*` if unknown)
    pub(crate) fn nickname(&self, client_id: ClientId) -> String {
        self.registry
            .client(client_id)
            .map(|c| c.nickname.clone())
            .unwrap_or_else(|| UNSET_NICK.to_string())
    }

    /// Send a numeric from the server host, addressed to the client's nickname
    pub(crate) fn reply(&self, to: ClientId, reply: Reply, params: &str) {
        self.respond(to, &self.info.host, reply, params);
    }

    /// Send `:<prefix> <command> <recipient-nick>[ <params>]`
    pub(crate) fn respond(&self, to: ClientId, prefix: &str, command: impl fmt::Display, params: &str) {
        let Some(client) = self.registry.client(to) else {
            return;
        };
        let line = reply::to_nick(prefix, command, &client.nickname, params);
        self.registry.deliver(to, line);
    }

    /// Send `:<prefix> <command>[ <params>]`
    pub(crate) fn relay(&self, to: ClientId, prefix: &str, command: &str, params: &str) {
        self.registry.deliver(to, reply::relay(prefix, command, params));
    }
}
