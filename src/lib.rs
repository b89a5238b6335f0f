//! Minimal IRC Chat Server Library
//!
//! An in-memory IRC server core built on tokio, supporting the
//! `&` local channel namespace.
//!
//! # Features
//! - PASS / NICK / USER registration in any order
//! - Nickname changes announced to everyone sharing a channel
//! - JOIN (including `JOIN 0`), PART and NAMES replies
//! - PRIVMSG to nicknames and channels
//! - QUIT, LIST, KICK, NOTICE and TOPIC accepted and ignored
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `ChatServer` is the single actor owning every client, nickname and channel
//! - Each connection has a `handler` task that frames lines and forwards them
//! - No locks needed - every line is processed to completion before the next
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use irc_chat_server::{ChatServer, Config, handle_connection};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let listener = TcpListener::bind(&config.listen).await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::channel(256);
//!
//!     tokio::spawn(ChatServer::new(config.server).run(cmd_rx));
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         let cmd_tx = cmd_tx.clone();
//!         tokio::spawn(handle_connection(stream, cmd_tx));
//!     }
//! }
//! ```

pub mod channel;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod handler;
pub mod message;
pub mod registry;
pub mod reply;
pub mod server;
pub mod types;
pub mod validate;

// Re-export main types for convenience
pub use channel::Channel;
pub use client::Client;
pub use config::{Config, ConfigError, ServerConfig};
pub use error::{AppError, IrcError, ParseError, SendError};
pub use handler::handle_connection;
pub use message::Message;
pub use registry::Registry;
pub use reply::Reply;
pub use server::{ChatServer, ServerCommand};
pub use types::ClientId;
