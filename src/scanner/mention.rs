//! MentionGrammar - @username, @username/list and reply detection
//!
//! The regex finds candidate runs; boundary rules the regex crate cannot
//! express (no look-behind) are checked on the surrounding text:
//! - the character before the at-sign must not be a username char or at-sign
//! - the text after the match must not continue the token (see
//!   [`is_invalid_mention_end`])

use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

use super::chars::{is_at_sign, is_latin_accent, is_username_char};

/// Usernames longer than this are not mentions at all.
pub const MAX_USERNAME_LEN: usize = 20;

// ==================== TYPE DEFINITIONS ====================

/// A mention candidate that passed every boundary rule.
///
/// Offsets are byte offsets into the scanned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionMatch<'t> {
    /// Offset of the at-sign
    pub start: usize,
    /// End of the username, or of the list slug when present
    pub end: usize,
    /// The at-sign as written (`@` or `＠`)
    pub at: &'t str,
    pub username: &'t str,
    pub list_slug: Option<&'t str>,
}

impl MentionMatch<'_> {
    pub fn is_list(&self) -> bool {
        self.list_slug.is_some()
    }
}

// ==================== MAIN IMPLEMENTATION ====================

pub struct MentionGrammar {
    // Group 1: username, Group 2: optional list slug
    mention_re: Regex,
    // Group 1: username of the leading mention
    reply_re: Regex,
}

impl MentionGrammar {
    pub fn new() -> Self {
        let mention_re = Regex::new(r"[@\x{FF20}]([A-Za-z0-9_]+)(?:/([A-Za-z0-9_\-]+))?")
            .expect("mention pattern is valid");
        // \s is Unicode-aware, so U+3000 (ideographic space) is skipped too.
        let reply_re =
            Regex::new(r"^\s*[@\x{FF20}]([A-Za-z0-9_]+)").expect("reply pattern is valid");

        Self { mention_re, reply_re }
    }

    /// Process-wide compiled grammar
    pub fn shared() -> &'static MentionGrammar {
        static GRAMMAR: OnceLock<MentionGrammar> = OnceLock::new();
        GRAMMAR.get_or_init(MentionGrammar::new)
    }

    /// Find every valid mention or list reference, left to right.
    pub fn scan<'t>(&self, text: &'t str) -> Vec<MentionMatch<'t>> {
        self.scan_after(text, None)
    }

    /// Like [`scan`](Self::scan), for a chunk cut out of a longer text:
    /// `before` is the character that preceded the chunk.
    pub fn scan_after<'t>(&self, text: &'t str, before: Option<char>) -> Vec<MentionMatch<'t>> {
        let mut found = Vec::new();

        for caps in self.mention_re.captures_iter(text) {
            let (Some(whole), Some(user)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            if let Some(prev) = text[..whole.start()].chars().next_back().or(before) {
                if is_username_char(prev) || is_at_sign(prev) {
                    trace!(offset = whole.start(), "mention rejected: glued to preceding word");
                    continue;
                }
            }

            if user.as_str().len() > MAX_USERNAME_LEN {
                trace!(offset = whole.start(), len = user.as_str().len(), "mention rejected: username too long");
                continue;
            }

            if is_invalid_mention_end(&text[whole.end()..]) {
                trace!(offset = whole.start(), "mention rejected: token continues past username");
                continue;
            }

            found.push(MentionMatch {
                start: whole.start(),
                end: whole.end(),
                at: &text[whole.start()..user.start()],
                username: user.as_str(),
                list_slug: caps.get(2).map(|m| m.as_str()),
            });
        }

        found
    }

    /// Username of the mention that opens the text, if any.
    pub fn reply<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = self.reply_re.captures(text)?;
        let user = caps.get(1)?;

        if user.as_str().len() > MAX_USERNAME_LEN || is_invalid_mention_end(&text[user.end()..]) {
            return None;
        }
        Some(user.as_str())
    }
}

impl Default for MentionGrammar {
    fn default() -> Self {
        Self::new()
    }
}

/// True when `rest` (the text right after a username) shows the username is
/// part of a longer token: another at-sign, an accented Latin letter, or a
/// `://` scheme separator.
pub fn is_invalid_mention_end(rest: &str) -> bool {
    match rest.chars().next() {
        Some(c) if is_at_sign(c) || is_latin_accent(c) => true,
        _ => rest.starts_with("://"),
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn usernames(text: &str) -> Vec<&str> {
        MentionGrammar::shared().scan(text).into_iter().map(|m| m.username).collect()
    }

    #[test]
    fn test_mention_simple() {
        let found = MentionGrammar::shared().scan("sample @user mention");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "user");
        assert_eq!(found[0].at, "@");
        assert_eq!((found[0].start, found[0].end), (7, 12));
    }

    #[test]
    fn test_full_width_at_sign() {
        let found = MentionGrammar::shared().scan("hi ＠user");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].at, "＠");
        assert_eq!(found[0].username, "user");
    }

    #[test]
    fn test_list_reference() {
        let found = MentionGrammar::shared().scan("@mention/list-name here");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "mention");
        assert_eq!(found[0].list_slug, Some("list-name"));
        assert!(found[0].is_list());
    }

    #[test]
    fn test_trailing_slash_is_not_a_list() {
        let found = MentionGrammar::shared().scan("@user/ ok");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].list_slug, None);
        assert_eq!(found[0].end, 5);
    }

    #[test]
    fn test_preceding_word_blocks_mention() {
        assert!(usernames("email foo@bar.com").is_empty());
        assert!(usernames("@@user").is_empty());
        assert!(usernames("_@user").is_empty());
        assert_eq!(usernames("(@user)"), vec!["user"]);
    }

    #[test]
    fn test_scan_after_uses_outer_context() {
        let grammar = MentionGrammar::shared();
        assert!(grammar.scan_after("@user", Some('g')).is_empty());
        assert_eq!(grammar.scan_after("@user", Some(' ')).len(), 1);
        assert_eq!(grammar.scan_after("x @user", Some('g')).len(), 1);
    }

    #[test]
    fn test_invalid_mention_ends() {
        assert!(usernames("@user@other").is_empty());
        assert!(usernames("@useré").is_empty());
        assert!(usernames("@http://example.com").is_empty());
        assert!(is_invalid_mention_end("＠x"));
        assert!(!is_invalid_mention_end(" text"));
        assert!(!is_invalid_mention_end(""));
    }

    #[test]
    fn test_username_length_limit() {
        let ok = format!("@{}", "a".repeat(MAX_USERNAME_LEN));
        let too_long = format!("@{}", "a".repeat(MAX_USERNAME_LEN + 1));
        assert_eq!(usernames(&ok).len(), 1);
        assert!(usernames(&too_long).is_empty());
    }

    #[test]
    fn test_reply() {
        let grammar = MentionGrammar::shared();
        assert_eq!(grammar.reply("@user reply"), Some("user"));
        assert_eq!(grammar.reply(" @user reply"), Some("user"));
        assert_eq!(grammar.reply("\u{3000}@user reply"), Some("user"));
        assert_eq!(grammar.reply("@user/list reply"), Some("user"));
        assert_eq!(grammar.reply("reply @user"), None);
        assert_eq!(grammar.reply("@user@other"), None);
    }
}
