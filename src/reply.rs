//! Outbound line formatting
//!
//! Numeric reply codes and the two line shapes the server emits: replies
//! addressed to a nickname and relays that carry no target nickname.

use std::fmt;

/// Numeric replies used by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    RplWelcome,
    RplYourHost,
    RplCreated,
    RplMyInfo,
    RplNamReply,
    RplEndOfNames,
    ErrNoSuchNick,
    ErrNoSuchChannel,
    ErrNoRecipient,
    ErrNoTextToSend,
    ErrNoNicknameGiven,
    ErrErroneousNickname,
    ErrNicknameInUse,
    ErrNotOnChannel,
    ErrNotRegistered,
    ErrNeedMoreParams,
    ErrAlreadyRegistered,
}

impl Reply {
    /// Three-digit numeric as sent on the wire
    pub fn code(self) -> &'static str {
        match self {
            Reply::RplWelcome => "001",
            Reply::RplYourHost => "002",
            Reply::RplCreated => "003",
            Reply::RplMyInfo => "004",
            Reply::RplNamReply => "353",
            Reply::RplEndOfNames => "366",
            Reply::ErrNoSuchNick => "401",
            Reply::ErrNoSuchChannel => "403",
            Reply::ErrNoRecipient => "411",
            Reply::ErrNoTextToSend => "412",
            Reply::ErrNoNicknameGiven => "431",
            Reply::ErrErroneousNickname => "432",
            Reply::ErrNicknameInUse => "433",
            Reply::ErrNotOnChannel => "442",
            Reply::ErrNotRegistered => "451",
            Reply::ErrNeedMoreParams => "461",
            Reply::ErrAlreadyRegistered => "462",
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `:<prefix> <command> <target>[ <params>]`
///
/// `params` is appended as-is; a trailing free-text field must already carry
/// its leading `:`.
pub fn to_nick(prefix: &str, command: impl fmt::Display, target: &str, params: &str) -> String {
    let mut line = format!(":{} {} {}", prefix, command, target);
    if !params.is_empty() {
        line.push(' ');
        line.push_str(params);
    }
    line
}

/// `:<prefix> <command>[ <params>]`, used for JOIN/PART/PRIVMSG relays
pub fn relay(prefix: &str, command: &str, params: &str) -> String {
    let mut line = format!(":{} {}", prefix, command);
    if !params.is_empty() {
        line.push(' ');
        line.push_str(params);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_nick_with_params() {
        assert_eq!(
            to_nick(
                "server.host",
                Reply::RplWelcome,
                "shira",
                ":Welcome to the IRC Chat Server shira"
            ),
            ":server.host 001 shira :Welcome to the IRC Chat Server shira"
        );
    }

    #[test]
    fn test_to_nick_without_params() {
        assert_eq!(to_nick("santa", "NICK", "shira", ""), ":santa NICK shira");
    }

    #[test]
    fn test_relay() {
        assert_eq!(relay("shira", "JOIN", "&chan"), ":shira JOIN &chan");
        assert_eq!(relay("shira", "NICK", ""), ":shira NICK");
        assert_eq!(
            relay("shira", "PRIVMSG", "&chan :hi there"),
            ":shira PRIVMSG &chan :hi there"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(Reply::RplMyInfo.to_string(), "004");
        assert_eq!(Reply::RplNamReply.code(), "353");
        assert_eq!(Reply::ErrNeedMoreParams.code(), "461");
    }
}
