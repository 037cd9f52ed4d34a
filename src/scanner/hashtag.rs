//! HashtagGrammar - #tag detection across scripts
//!
//! A tag body is a run of the hashtag word class (see `chars.rs`). The sigil
//! must not be glued to a preceding word character, `&` (HTML entities such
//! as `&#39;`), `/` (URL fragments) or another hash sign, which keeps tags from fusing with
//! adjacent Han/Kana text while still allowing CJK punctuation before them.

use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

use super::chars::{hashtag_class, is_digit_like, is_hash_sign, is_hashtag_char};

/// A hashtag candidate that passed every boundary rule (byte offsets).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashtagMatch<'t> {
    /// Offset of the hash sign
    pub start: usize,
    pub end: usize,
    /// The hash sign as written (`#` or `＃`)
    pub hash: &'t str,
    pub tag: &'t str,
}

pub struct HashtagGrammar {
    // Group 1: tag body
    hashtag_re: Regex,
}

impl HashtagGrammar {
    pub fn new() -> Self {
        let pattern = format!(r"[#\x{{FF03}}]({}+)", hashtag_class());
        let hashtag_re = Regex::new(&pattern).expect("hashtag pattern is valid");
        Self { hashtag_re }
    }

    /// Process-wide compiled grammar
    pub fn shared() -> &'static HashtagGrammar {
        static GRAMMAR: OnceLock<HashtagGrammar> = OnceLock::new();
        GRAMMAR.get_or_init(HashtagGrammar::new)
    }

    pub fn scan<'t>(&self, text: &'t str) -> Vec<HashtagMatch<'t>> {
        self.scan_after(text, None)
    }

    /// Scan a chunk whose preceding character in the full text is `before`
    pub fn scan_after<'t>(&self, text: &'t str, before: Option<char>) -> Vec<HashtagMatch<'t>> {
        let mut found = Vec::new();

        for caps in self.hashtag_re.captures_iter(text) {
            let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            if let Some(prev) = text[..whole.start()].chars().next_back().or(before) {
                if is_hashtag_char(prev) || is_hash_sign(prev) || prev == '&' || prev == '/' {
                    trace!(offset = whole.start(), "hashtag rejected: glued to preceding word");
                    continue;
                }
            }

            if !has_alphabetic_content(tag.as_str()) {
                trace!(offset = whole.start(), "hashtag rejected: numeric only");
                continue;
            }

            found.push(HashtagMatch {
                start: whole.start(),
                end: whole.end(),
                hash: &text[whole.start()..tag.start()],
                tag: tag.as_str(),
            });
        }

        found
    }
}

impl Default for HashtagGrammar {
    fn default() -> Self {
        Self::new()
    }
}

/// At least one word character that is not digit-like (`_` counts)
fn has_alphabetic_content(tag: &str) -> bool {
    tag.chars().any(|c| !is_digit_like(c))
}
