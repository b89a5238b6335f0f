//! Protocol line parsing
//!
//! Turns one raw IRC line (terminator already stripped) into a [`Message`]
//! carrying the optional prefix, the lower-cased command name and the
//! ordered argument list.

use std::str::FromStr;

use crate::error::ParseError;

/// A parsed client line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Source prefix without the leading `:` (empty when absent)
    pub prefix: String,
    /// Command name, always lower-case
    pub command: String,
    /// Arguments in order; a trailing `:` argument is kept verbatim
    pub args: Vec<String>,
}

impl Message {
    /// Parse a single line.
    ///
    /// When the line contains a `:` after the prefix, it is split at the
    /// *last* colon: everything before is whitespace-split and the remainder
    /// becomes the final argument, spaces included.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        if line.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let (prefix, rest) = match line.strip_prefix(':') {
            Some(stripped) => stripped
                .split_once(' ')
                .ok_or(ParseError::MissingCommand)?,
            None => ("", line),
        };

        let mut parts: Vec<String> = match rest.rsplit_once(':') {
            Some((head, trailing)) => head
                .split_whitespace()
                .map(String::from)
                .chain(std::iter::once(trailing.to_string()))
                .collect(),
            None => rest.split_whitespace().map(String::from).collect(),
        };

        if parts.is_empty() {
            return Err(ParseError::MissingCommand);
        }

        let command = parts.remove(0).to_lowercase();
        Ok(Self {
            prefix: prefix.to_string(),
            command,
            args: parts,
        })
    }

    /// Get an argument by position
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl FromStr for Message {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> (String, String, Vec<String>) {
        let msg = Message::parse(line).unwrap();
        (msg.prefix, msg.command, msg.args)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_prefix_and_trailing() {
        assert_eq!(
            parsed(":prefix command arg1 arg2 :trailing arg"),
            ("prefix".into(), "command".into(), strings(&["arg1", "arg2", "trailing arg"]))
        );
    }

    #[test]
    fn test_parse_no_prefix() {
        assert_eq!(
            parsed("command arg1 arg2 :trailing arg"),
            ("".into(), "command".into(), strings(&["arg1", "arg2", "trailing arg"]))
        );
    }

    #[test]
    fn test_parse_only_trailing() {
        assert_eq!(
            parsed(":prefix command :trailing arg"),
            ("prefix".into(), "command".into(), strings(&["trailing arg"]))
        );
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parsed(":prefix command"), ("prefix".into(), "command".into(), vec![]));
        assert_eq!(parsed("nick"), ("".into(), "nick".into(), vec![]));
    }

    #[test]
    fn test_parse_lowercases_command_only() {
        assert_eq!(
            parsed(":PREFIX COMMAND ARG1 :TRAILING arg"),
            ("PREFIX".into(), "command".into(), strings(&["ARG1", "TRAILING arg"]))
        );
    }

    #[test]
    fn test_parse_splits_at_last_colon() {
        let msg: Message = "privmsg &chan :see: this".parse().unwrap();
        assert_eq!(msg.args, strings(&["&chan", ":see", " this"]));
    }

    #[test]
    fn test_parse_empty_trailing() {
        let msg = Message::parse("privmsg santa :").unwrap();
        assert_eq!(msg.args, strings(&["santa", ""]));
        assert_eq!(msg.arg(1), Some(""));
        assert_eq!(msg.arg(2), None);
    }

    #[test]
    fn test_parse_rejects_empty_lines() {
        assert_eq!(Message::parse(""), Err(ParseError::Empty));
        assert_eq!(Message::parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_rejects_prefix_without_command() {
        assert_eq!(Message::parse(":prefix"), Err(ParseError::MissingCommand));
        assert_eq!(Message::parse(":prefix   "), Err(ParseError::MissingCommand));
    }
}
