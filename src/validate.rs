//! Nickname and channel name validation
//!
//! Pure predicates with no state. Only the `&` local channel namespace is
//! accepted.

/// Maximum nickname length; longer candidates are truncated, not rejected.
pub const MAX_NICK_LEN: usize = 9;

/// Maximum number of characters after the `&` channel prefix.
pub const MAX_CHANNEL_NAME_LEN: usize = 49;

/// Prefix character of local channels.
pub const CHANNEL_PREFIX: char = '&';

fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

fn is_nick_start(c: char) -> bool {
    c.is_ascii_alphabetic() || is_special(c)
}

fn is_nick_rest(c: char) -> bool {
    is_nick_start(c) || c.is_ascii_digit() || c == '-'
}

/// Cut a nickname candidate down to [`MAX_NICK_LEN`] characters.
pub fn truncate_nickname(nick: &str) -> &str {
    match nick.char_indices().nth(MAX_NICK_LEN) {
        Some((idx, _)) => &nick[..idx],
        None => nick,
    }
}

/// Check a (already truncated) nickname.
pub fn valid_nickname(nick: &str) -> bool {
    let mut chars = nick.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    is_nick_start(first) && nick.chars().count() <= MAX_NICK_LEN && chars.all(is_nick_rest)
}

/// Check a channel name: `&` followed by 1 to 49 allowed characters.
pub fn valid_channel(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(CHANNEL_PREFIX) else {
        return false;
    };

    let len = rest.chars().count();
    (1..=MAX_CHANNEL_NAME_LEN).contains(&len)
        && !rest
            .chars()
            .any(|c| matches!(c, '\0' | '\x07' | '\n' | '\r' | ' ' | ',' | ':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Vec<char> {
        ('a'..='z').chain('A'..='Z').collect()
    }

    fn specials() -> Vec<char> {
        "[\\]^_`{|}".chars().collect()
    }

    #[test]
    fn test_valid_nick_bounds() {
        assert!(valid_nickname("s"));
        assert!(valid_nickname("abcdefghi"));
        assert!(!valid_nickname(""));
        assert!(!valid_nickname("abcdefghij"));
    }

    #[test]
    fn test_valid_nick_initial_chars() {
        for c in letters().into_iter().chain(specials()) {
            assert!(valid_nickname(&format!("{}a1[", c)), "{:?}", c);
        }
    }

    #[test]
    fn test_valid_nick_following_chars() {
        let following = specials()
            .into_iter()
            .chain('0'..='9')
            .chain(std::iter::once('-'));
        for c in following {
            assert!(valid_nickname(&format!("a{}", c)), "{:?}", c);
        }
    }

    #[test]
    fn test_invalid_nick_initial_chars() {
        for c in ('0'..='9').chain(std::iter::once('-')) {
            assert!(!valid_nickname(&format!("{}a", c)), "{:?}", c);
        }
        assert!(!valid_nickname("sh ira"));
        assert!(!valid_nickname("shira!"));
    }

    #[test]
    fn test_truncate_nickname() {
        assert_eq!(truncate_nickname("shira6789012345"), "shira6789");
        assert_eq!(truncate_nickname("shira"), "shira");
        assert_eq!(truncate_nickname(""), "");
        assert!(valid_nickname(truncate_nickname("abcdefghij")));
    }

    #[test]
    fn test_valid_channel_prefixes() {
        assert!(valid_channel("&chan"));
        for name in ["#chan", "!chan", "+chan", "chan", "#", "&", "+", "!", ""] {
            assert!(!valid_channel(name), "{:?}", name);
        }
    }

    #[test]
    fn test_valid_channel_length() {
        assert!(valid_channel(&format!("&{}", "A".repeat(48))));
        assert!(valid_channel(&format!("&{}", "A".repeat(49))));
        assert!(!valid_channel(&format!("&{}", "A".repeat(50))));
    }

    #[test]
    fn test_valid_channel_forbidden_chars() {
        for name in [
            "&abc def",
            "&abc,def",
            "&abc:def",
            "&abc\x07def",
            "&abc\rdef",
            "&abc\ndef",
            "&abc\0def",
        ] {
            assert!(!valid_channel(name), "{:?}", name);
        }
        assert!(valid_channel("&abc-def.ghi"));
    }
}
