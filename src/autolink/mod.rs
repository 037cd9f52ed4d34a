//! Autolinker - rewrites message text into HTML anchors
//!
//! Each pass walks the text with [`TagScanner`] and only substitutes inside
//! plain text outside tags and outside existing `<a>` elements, so passes
//! can be chained without producing nested anchors. Output is assembled by
//! plain string pushes; no template syntax is involved, so `$` and `\` in
//! the input need no special handling.
//!
//! # Usage
//! ```
//! use tweetcore::{AutolinkConfig, Autolinker};
//!
//! let config = AutolinkConfig::builder().no_follow(false).build().unwrap();
//! let linker = Autolinker::with_config(config);
//! assert_eq!(
//!     linker.auto_link_urls("Url: http://example.com/$ABC"),
//!     r#"Url: <a href="http://example.com/$ABC">http://example.com/$ABC</a>"#
//! );
//! ```

pub mod config;
pub mod escape;
pub mod tags;

#[cfg(test)]
mod tests;

pub use config::*;
pub use escape::{escape_html, escape_html_into};
pub use tags::{is_anchor_tag, Segment, TagScanner};

use tracing::debug;

use crate::scanner::entity::{codepoint_boundaries, Entity, EntityKind};
use crate::scanner::hashtag::HashtagGrammar;
use crate::scanner::mention::MentionGrammar;
use crate::scanner::url::UrlScanner;

/// HTML renderer for hashtags, URLs, usernames and lists
#[derive(Clone, Debug, Default)]
pub struct Autolinker {
    config: AutolinkConfig,
}

impl Autolinker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AutolinkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AutolinkConfig {
        &self.config
    }

    fn url_scanner(&self) -> UrlScanner {
        if self.config.link_url_without_protocol() {
            UrlScanner::new()
        } else {
            UrlScanner::protocol_only()
        }
    }

    // ==================== PASSES ====================

    /// Hashtags, then URLs, then usernames and lists.
    ///
    /// The input is treated as HTML: a `<` with no closing `>` starts a tag
    /// that runs to the end, so nothing after it is linked (`I <3 #rust`).
    /// For plain text, extract entities and render them with
    /// [`Autolinker::auto_link_entities`], which escapes the text.
    pub fn auto_link(&self, text: &str) -> String {
        self.auto_link_usernames_and_lists(&self.auto_link_urls(&self.auto_link_hashtags(text)))
    }

    pub fn auto_link_hashtags(&self, text: &str) -> String {
        let mut linked = 0;
        let html = self.rewrite_text(text, |out, chunk, before| {
            let urls = self.url_spans(chunk, before);
            let mut last = 0;
            for m in HashtagGrammar::shared().scan_after(chunk, before) {
                if overlaps_any(&urls, m.start, m.end) {
                    continue;
                }
                out.push_str(&chunk[last..m.start]);
                self.push_hashtag(out, m.hash, m.tag);
                last = m.end;
                linked += 1;
            }
            out.push_str(&chunk[last..]);
        });
        debug!(linked, "auto-linked hashtags");
        html
    }

    /// Link URLs. Only URLs with a protocol unless the config says otherwise.
    pub fn auto_link_urls(&self, text: &str) -> String {
        let scanner = self.url_scanner();
        let mut linked = 0;
        let html = self.rewrite_text(text, |out, chunk, before| {
            let mut last = 0;
            for m in scanner.scan_after(chunk, before) {
                out.push_str(&chunk[last..m.start]);
                self.push_url(out, m.url, m.query, false);
                last = m.end;
                linked += 1;
            }
            out.push_str(&chunk[last..]);
        });
        debug!(linked, "auto-linked urls");
        html
    }

    pub fn auto_link_usernames_and_lists(&self, text: &str) -> String {
        let mut linked = 0;
        let html = self.rewrite_text(text, |out, chunk, before| {
            let urls = self.url_spans(chunk, before);
            let mut last = 0;
            for m in MentionGrammar::shared().scan_after(chunk, before) {
                if overlaps_any(&urls, m.start, m.end) {
                    continue;
                }
                out.push_str(&chunk[last..m.start]);
                match m.list_slug {
                    Some(slug) => self.push_list(out, m.at, m.username, slug),
                    None => self.push_username(out, m.at, m.username),
                }
                last = m.end;
                linked += 1;
            }
            out.push_str(&chunk[last..]);
        });
        debug!(linked, "auto-linked usernames and lists");
        html
    }

    /// Render precomputed entities (codepoint offsets into `text`).
    ///
    /// Unlike the scanning passes, `text` is treated as plain text: every
    /// character outside an entity is HTML-escaped. Entities that fall
    /// outside the text or overlap an earlier one are skipped.
    pub fn auto_link_entities(&self, text: &str, entities: &[Entity]) -> String {
        let bounds = codepoint_boundaries(text);
        let mut ordered: Vec<&Entity> = entities.iter().collect();
        ordered.sort_by_key(|e| e.start);

        let mut out = String::with_capacity(text.len() * 2);
        let mut last = 0;
        for entity in ordered {
            let (Some(&start), Some(&end)) = (bounds.get(entity.start), bounds.get(entity.end)) else {
                debug!(start = entity.start, end = entity.end, "entity outside text, skipped");
                continue;
            };
            if start >= end || start < last {
                continue;
            }

            escape_html_into(&mut out, &text[last..start]);
            let source = &text[start..end];
            let sigil = source.chars().next().map_or("", |c| &source[..c.len_utf8()]);
            match (entity.kind, entity.list_slug.as_deref()) {
                (EntityKind::Hashtag, _) => self.push_hashtag(&mut out, sigil, &entity.value),
                (EntityKind::Url, _) => self.push_url(&mut out, &entity.value, entity.query.as_deref(), true),
                (EntityKind::MentionList, Some(slug)) => self.push_list(&mut out, sigil, &entity.value, slug),
                (EntityKind::Mention | EntityKind::MentionList, _) => {
                    self.push_username(&mut out, sigil, &entity.value)
                }
            }
            last = end;
        }
        escape_html_into(&mut out, &text[last..]);
        out
    }

    // ==================== HELPERS ====================

    /// Copy tags and anchor contents through; hand each linkable chunk to
    /// `link` along with the last visible character before it. Context is
    /// carried across `<a>` markup only, so boundary rules see through
    /// anchors inserted by an earlier pass while `<br>` and friends still
    /// start a fresh chunk.
    fn rewrite_text<F>(&self, text: &str, mut link: F) -> String
    where
        F: FnMut(&mut String, &str, Option<char>),
    {
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        let mut before = None;
        for segment in TagScanner::new(text) {
            match segment.linkable_text() {
                Some(chunk) => link(&mut out, chunk, before),
                None => out.push_str(segment.as_str()),
            }
            match segment {
                Segment::Text { text, .. } => before = text.chars().next_back().or(before),
                Segment::Tag(tag) if !is_anchor_tag(tag) => before = None,
                Segment::Tag(_) => {}
            }
        }
        out
    }

    fn url_spans(&self, chunk: &str, before: Option<char>) -> Vec<(usize, usize)> {
        self.url_scanner()
            .scan_after(chunk, before)
            .iter()
            .map(|m| (m.start, m.end))
            .collect()
    }

    fn push_hashtag(&self, out: &mut String, hash: &str, tag: &str) {
        let c = &self.config;
        out.push_str("<a href=\"");
        out.push_str(c.hashtag_url_base());
        out.push_str(tag);
        out.push_str("\" title=\"#");
        out.push_str(tag);
        out.push_str("\" class=\"");
        out.push_str(c.url_class());
        out.push(' ');
        out.push_str(c.hashtag_class());
        out.push('"');
        out.push_str(c.rel_attribute());
        out.push('>');
        out.push_str(hash);
        out.push_str(tag);
        out.push_str("</a>");
    }

    fn push_username(&self, out: &mut String, at: &str, username: &str) {
        let c = &self.config;
        self.open_user_anchor(out, at, c.username_class(), c.username_url_base());
        out.push_str(username);
        out.push('"');
        out.push_str(c.rel_attribute());
        out.push('>');
        if c.username_include_symbol() {
            out.push_str(at);
        }
        out.push_str(username);
        out.push_str("</a>");
    }

    fn push_list(&self, out: &mut String, at: &str, username: &str, slug: &str) {
        let c = &self.config;
        self.open_user_anchor(out, at, c.list_class(), c.list_url_base());
        out.push_str(username);
        out.push('/');
        out.push_str(slug);
        out.push('"');
        out.push_str(c.rel_attribute());
        out.push('>');
        if c.username_include_symbol() {
            out.push_str(at);
        }
        out.push_str(username);
        out.push('/');
        out.push_str(slug);
        out.push_str("</a>");
    }

    /// `@<a class="… …" href="{base}` with the `@` outside unless configured in
    fn open_user_anchor(&self, out: &mut String, at: &str, class: &str, base: &str) {
        let c = &self.config;
        if !c.username_include_symbol() {
            out.push_str(at);
        }
        out.push_str("<a class=\"");
        out.push_str(c.url_class());
        out.push(' ');
        out.push_str(class);
        out.push_str("\" href=\"");
        out.push_str(base);
    }

    /// Anchor over the URL; only the query string is escaped in the href.
    fn push_url(&self, out: &mut String, url: &str, query: Option<&str>, escape_label: bool) {
        out.push_str("<a href=\"");
        match query_range(url, query) {
            Some((start, end)) => {
                out.push_str(&url[..start]);
                escape_html_into(out, &url[start..end]);
                out.push_str(&url[end..]);
            }
            None => out.push_str(url),
        }
        out.push('"');
        out.push_str(self.config.rel_attribute());
        out.push('>');
        if escape_label {
            escape_html_into(out, url);
        } else {
            out.push_str(url);
        }
        out.push_str("</a>");
    }
}

/// Byte range of `query` right after the first `?` in `url`
fn query_range(url: &str, query: Option<&str>) -> Option<(usize, usize)> {
    let query = query?;
    let start = url.find('?')? + 1;
    url[start..].starts_with(query).then(|| (start, start + query.len()))
}

fn overlaps_any(spans: &[(usize, usize)], start: usize, end: usize) -> bool {
    spans.iter().any(|&(s, e)| start < e && s < end)
}
