//! Command handlers
//!
//! One function per supported command, registered by lower-case name in
//! [`table`]. Handlers validate their own arguments and return an
//! [`IrcError`] for the dispatcher to report.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::client::UNSET_NICK;
use crate::error::IrcError;
use crate::message::Message;
use crate::reply::Reply;
use crate::server::{ChatServer, CommandHandler};
use crate::types::ClientId;
use crate::validate::{truncate_nickname, valid_channel, valid_nickname};

/// Commands accepted and deliberately ignored
const INERT_COMMANDS: &[&str] = &["quit", "list", "kick", "notice", "topic"];

/// Build the command table
pub fn table() -> HashMap<&'static str, CommandHandler> {
    let mut table: HashMap<&'static str, CommandHandler> = HashMap::new();
    table.insert("pass", handle_pass);
    table.insert("nick", handle_nick);
    table.insert("user", handle_user);
    table.insert("join", handle_join);
    table.insert("part", handle_part);
    table.insert("privmsg", handle_privmsg);
    for &name in INERT_COMMANDS {
        table.insert(name, handle_inert);
    }
    table
}

fn is_registered(server: &ChatServer, client_id: ClientId) -> bool {
    server
        .registry
        .client(client_id)
        .is_some_and(|c| c.registered)
}

fn handle_pass(server: &mut ChatServer, client_id: ClientId, msg: &Message) -> Result<(), IrcError> {
    if is_registered(server, client_id) {
        return Err(IrcError::AlreadyRegistered);
    }
    if msg.args.is_empty() {
        return Err(IrcError::NeedMoreParams("PASS"));
    }
    // Passwords are accepted and not checked
    Ok(())
}

fn handle_nick(server: &mut ChatServer, client_id: ClientId, msg: &Message) -> Result<(), IrcError> {
    let Some(requested) = msg.arg(0) else {
        return Err(IrcError::NoNicknameGiven);
    };

    let nickname = truncate_nickname(requested);
    if !valid_nickname(nickname) {
        return Err(IrcError::ErroneousNickname(nickname.to_string()));
    }
    if server.registry.nick_taken(nickname, client_id) {
        return Err(IrcError::NicknameInUse(nickname.to_string()));
    }

    if !is_registered(server, client_id) {
        if let Some(client) = server.registry.client_mut(client_id) {
            client.nickname = nickname.to_string();
        }
        return try_register(server, client_id);
    }

    let Some(old) = server.registry.rename(client_id, nickname) else {
        return Ok(());
    };
    info!("{} is now known as {}", old, nickname);

    // The notice carries no new-nickname parameter; the recipient's own
    // nickname fills the target slot.
    for member in server.registry.notify_set(client_id) {
        server.respond(member, &old, "NICK", "");
    }
    Ok(())
}

fn handle_user(server: &mut ChatServer, client_id: ClientId, msg: &Message) -> Result<(), IrcError> {
    if is_registered(server, client_id) {
        return Err(IrcError::AlreadyRegistered);
    }
    let Some(real_name) = msg.arg(3) else {
        return Err(IrcError::NeedMoreParams("USER"));
    };

    if let Some(client) = server.registry.client_mut(client_id) {
        if client.real_name.is_none() {
            client.real_name = Some(real_name.to_string());
        } else {
            debug!("Keeping first real name for {}", client_id);
        }
    }
    try_register(server, client_id)
}

/// Complete registration once both NICK and USER have arrived
fn try_register(server: &mut ChatServer, client_id: ClientId) -> Result<(), IrcError> {
    let Some(client) = server.registry.client_mut(client_id) else {
        return Ok(());
    };
    if !client.ready_to_register() {
        return Ok(());
    }

    let nickname = client.nickname.clone();
    if server.registry.nick_taken(&nickname, client_id) {
        // Another client registered this nickname after it was picked
        if let Some(client) = server.registry.client_mut(client_id) {
            client.nickname = UNSET_NICK.to_string();
        }
        return Err(IrcError::NicknameInUse(nickname));
    }

    if let Some(client) = server.registry.client_mut(client_id) {
        client.registered = true;
    }
    server.registry.claim_nick(client_id);
    info!("Client {} registered as {}", client_id, nickname);

    send_welcome(server, client_id, &nickname);
    Ok(())
}

fn send_welcome(server: &ChatServer, client_id: ClientId, nickname: &str) {
    let info = &server.info;
    server.reply(
        client_id,
        Reply::RplWelcome,
        &format!(":Welcome to the IRC Chat Server {}", nickname),
    );
    server.reply(
        client_id,
        Reply::RplYourHost,
        &format!(":Your host is {}, running version {}", info.host, info.version),
    );
    server.reply(
        client_id,
        Reply::RplCreated,
        &format!(":This server was created {}", info.created),
    );
    server.reply(
        client_id,
        Reply::RplMyInfo,
        &format!("{} {}", info.host, info.version),
    );
}

fn handle_join(server: &mut ChatServer, client_id: ClientId, msg: &Message) -> Result<(), IrcError> {
    let Some(name) = msg.arg(0) else {
        return Err(IrcError::NeedMoreParams("JOIN"));
    };

    if name == "0" {
        leave_all_channels(server, client_id);
        return Ok(());
    }
    if !valid_channel(name) {
        return Err(IrcError::NoSuchChannel(name.to_string()));
    }

    if !server.registry.join(client_id, name) {
        return Ok(());
    }

    let nickname = server.nickname(client_id);
    info!("{} joined {}", nickname, name);
    for member in server.registry.members(name) {
        server.relay(member, &nickname, "JOIN", name);
    }
    send_names(server, client_id, name);
    Ok(())
}

fn send_names(server: &ChatServer, client_id: ClientId, name: &str) {
    let names = server.registry.member_nicknames(name).join(" ");
    server.reply(client_id, Reply::RplNamReply, &format!("@ {} :{}", name, names));
    server.reply(
        client_id,
        Reply::RplEndOfNames,
        &format!("{} :End of NAMES list", name),
    );
}

/// Part every joined channel, telling each channel's members (self included)
pub(crate) fn leave_all_channels(server: &mut ChatServer, client_id: ClientId) {
    let Some(client) = server.registry.client(client_id) else {
        return;
    };
    let nickname = client.nickname.clone();
    let channels: Vec<String> = client.channels.iter().cloned().collect();

    for name in &channels {
        for member in server.registry.members(name) {
            server.relay(member, &nickname, "PART", name);
        }
    }
    for name in &channels {
        server.registry.part(client_id, name);
    }
}

fn handle_part(server: &mut ChatServer, client_id: ClientId, msg: &Message) -> Result<(), IrcError> {
    let Some(name) = msg.arg(0) else {
        return Err(IrcError::NeedMoreParams("PART"));
    };

    let Some(channel) = server.registry.channel(name) else {
        return Err(IrcError::NoSuchChannel(name.to_string()));
    };
    if !channel.contains(client_id) {
        return Err(IrcError::NotOnChannel(name.to_string()));
    }

    let nickname = server.nickname(client_id);
    for member in server.registry.members(name) {
        server.relay(member, &nickname, "PART", name);
    }
    server.registry.part(client_id, name);
    info!("{} left {}", nickname, name);
    Ok(())
}

fn handle_privmsg(server: &mut ChatServer, client_id: ClientId, msg: &Message) -> Result<(), IrcError> {
    let Some(target) = msg.arg(0) else {
        return Err(IrcError::NoRecipient("PRIVMSG"));
    };
    let Some(text) = msg.arg(1) else {
        return Err(IrcError::NoTextToSend);
    };

    let sender = server.nickname(client_id);
    if let Some(recipient) = server.registry.find_nick(target) {
        server.respond(recipient, &sender, "PRIVMSG", &format!(":{}", text));
    } else if server.registry.channel(target).is_some() {
        let params = format!("{} :{}", target, text);
        for member in server.registry.members(target) {
            if member != client_id {
                server.relay(member, &sender, "PRIVMSG", &params);
            }
        }
    } else {
        return Err(IrcError::NoSuchNick(target.to_string()));
    }
    Ok(())
}

fn handle_inert(_server: &mut ChatServer, _client_id: ClientId, _msg: &Message) -> Result<(), IrcError> {
    Ok(())
}
