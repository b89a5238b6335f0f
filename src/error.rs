//! Error types for the IRC server
//!
//! Defines transport-level errors, line parse errors, outbound send errors
//! and the closed set of protocol errors reported to clients as numerics.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use crate::reply::Reply;

/// Application-level errors
///
/// Raised by connection tasks; all of them end the connection.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error (fatal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Line framing error (fatal)
    #[error("Line codec error: {0}")]
    Codec(#[from] tokio_util::codec::LinesCodecError),

    /// Channel send error (fatal - server actor gone)
    #[error("Channel send error")]
    ChannelSend,
}

/// Line parse errors
///
/// Never reported to the client; the line is logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing but whitespace
    #[error("empty line")]
    Empty,

    /// A prefix with no command after it
    #[error("missing command")]
    MissingCommand,
}

/// Message send errors
///
/// Occurs when attempting to send lines through closed channels.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}

/// Protocol errors
///
/// Each variant maps to one ERR_* numeric. Handlers return these and the
/// dispatcher sends the matching reply to the offending client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrcError {
    #[error("{0} :No such nick/channel")]
    NoSuchNick(String),

    #[error("{0} :No such channel")]
    NoSuchChannel(String),

    #[error(":No recipient given ({0})")]
    NoRecipient(&'static str),

    #[error(":No text to send")]
    NoTextToSend,

    #[error(":No nickname given")]
    NoNicknameGiven,

    #[error("{0} :Erroneous nickname")]
    ErroneousNickname(String),

    #[error("{0} :Nickname is already in use")]
    NicknameInUse(String),

    #[error("{0} :You're not on that channel")]
    NotOnChannel(String),

    #[error(":You have not registered")]
    NotRegistered,

    #[error("{0} :Not enough parameters")]
    NeedMoreParams(&'static str),

    #[error(":You may not reregister")]
    AlreadyRegistered,
}

impl IrcError {
    /// The numeric reply carrying this error
    pub fn reply(&self) -> Reply {
        match self {
            IrcError::NoSuchNick(_) => Reply::ErrNoSuchNick,
            IrcError::NoSuchChannel(_) => Reply::ErrNoSuchChannel,
            IrcError::NoRecipient(_) => Reply::ErrNoRecipient,
            IrcError::NoTextToSend => Reply::ErrNoTextToSend,
            IrcError::NoNicknameGiven => Reply::ErrNoNicknameGiven,
            IrcError::ErroneousNickname(_) => Reply::ErrErroneousNickname,
            IrcError::NicknameInUse(_) => Reply::ErrNicknameInUse,
            IrcError::NotOnChannel(_) => Reply::ErrNotOnChannel,
            IrcError::NotRegistered => Reply::ErrNotRegistered,
            IrcError::NeedMoreParams(_) => Reply::ErrNeedMoreParams,
            IrcError::AlreadyRegistered => Reply::ErrAlreadyRegistered,
        }
    }
}
