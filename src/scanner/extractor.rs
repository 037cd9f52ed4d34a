//! Extractor - ordered Entity records with codepoint offsets
//!
//! Runs the grammar matchers for one entity kind and converts their byte
//! ranges into codepoint ranges. Every call is independent; the compiled
//! grammars are shared process-wide.

use tracing::debug;

use super::entity::{CodepointCursor, Entity, EntityKind};
use super::hashtag::HashtagGrammar;
use super::mention::MentionGrammar;
use super::url::UrlScanner;

/// Entity extraction facade
#[derive(Clone, Copy, Debug)]
pub struct Extractor {
    extract_url_without_protocol: bool,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self { extract_url_without_protocol: true }
    }

    /// Toggle recognition of bare hosts such as `twitter.com`
    pub fn with_url_without_protocol(mut self, enabled: bool) -> Self {
        self.extract_url_without_protocol = enabled;
        self
    }

    fn url_scanner(&self) -> UrlScanner {
        if self.extract_url_without_protocol {
            UrlScanner::new()
        } else {
            UrlScanner::protocol_only()
        }
    }

    // ==================== GENERIC ====================

    /// Entities of one kind, ordered by `start`.
    pub fn extract(&self, text: &str, kind: EntityKind) -> Vec<Entity> {
        let entities = match kind {
            EntityKind::Mention => self.extract_mentioned_screennames_with_indices(text),
            EntityKind::MentionList => self
                .extract_mentions_or_lists_with_indices(text)
                .into_iter()
                .filter(|e| e.kind == EntityKind::MentionList)
                .collect(),
            EntityKind::Hashtag => self.extract_hashtags_with_indices(text),
            EntityKind::Url => self.extract_urls_with_indices(text),
        };
        debug!(kind = kind.as_str(), count = entities.len(), "extracted entities");
        entities
    }

    /// Every kind merged, ordered by `start`. An entity overlapping one
    /// already kept is dropped, so URLs win over the `#fragment` or `@user`
    /// they contain.
    pub fn extract_entities_with_indices(&self, text: &str) -> Vec<Entity> {
        let mut all = self.extract_urls_with_indices(text);
        all.extend(self.extract_hashtags_with_indices(text));
        all.extend(self.extract_mentions_or_lists_with_indices(text));
        // Stable: on equal starts URLs keep priority.
        all.sort_by_key(|e| e.start);

        let mut kept: Vec<Entity> = Vec::with_capacity(all.len());
        for entity in all {
            if kept.last().map_or(true, |last| !last.overlaps(&entity)) {
                kept.push(entity);
            }
        }
        kept
    }

    // ==================== MENTIONS ====================

    pub fn extract_mentioned_screennames(&self, text: &str) -> Vec<String> {
        MentionGrammar::shared()
            .scan(text)
            .into_iter()
            .filter(|m| !m.is_list())
            .map(|m| m.username.to_string())
            .collect()
    }

    /// Bare `@user` mentions; `@user/list` references are skipped.
    pub fn extract_mentioned_screennames_with_indices(&self, text: &str) -> Vec<Entity> {
        self.extract_mentions_or_lists_with_indices(text)
            .into_iter()
            .filter(|e| e.kind == EntityKind::Mention)
            .collect()
    }

    /// Mentions and list references together
    pub fn extract_mentions_or_lists_with_indices(&self, text: &str) -> Vec<Entity> {
        let mut cursor = CodepointCursor::new(text);

        MentionGrammar::shared()
            .scan(text)
            .into_iter()
            .map(|m| {
                let start = cursor.advance_to(m.start);
                let end = cursor.advance_to(m.end);
                match m.list_slug {
                    Some(slug) => {
                        let mut entity = Entity::new(EntityKind::MentionList, start, end, m.username);
                        entity.list_slug = Some(slug.to_string());
                        entity
                    }
                    None => Entity::new(EntityKind::Mention, start, end, m.username),
                }
            })
            .collect()
    }

    /// Username of a mention that opens the text (leading whitespace allowed)
    pub fn extract_reply_screenname(&self, text: &str) -> Option<String> {
        MentionGrammar::shared().reply(text).map(str::to_string)
    }

    // ==================== HASHTAGS ====================

    pub fn extract_hashtags(&self, text: &str) -> Vec<String> {
        HashtagGrammar::shared()
            .scan(text)
            .into_iter()
            .map(|m| m.tag.to_string())
            .collect()
    }

    pub fn extract_hashtags_with_indices(&self, text: &str) -> Vec<Entity> {
        let mut cursor = CodepointCursor::new(text);

        HashtagGrammar::shared()
            .scan(text)
            .into_iter()
            .map(|m| {
                let start = cursor.advance_to(m.start);
                let end = cursor.advance_to(m.end);
                Entity::new(EntityKind::Hashtag, start, end, m.tag)
            })
            .collect()
    }

    // ==================== URLS ====================

    pub fn extract_urls(&self, text: &str) -> Vec<String> {
        self.url_scanner()
            .scan(text)
            .into_iter()
            .map(|m| m.url.to_string())
            .collect()
    }

    pub fn extract_urls_with_indices(&self, text: &str) -> Vec<Entity> {
        let mut cursor = CodepointCursor::new(text);

        self.url_scanner()
            .scan(text)
            .into_iter()
            .map(|m| {
                let start = cursor.advance_to(m.start);
                let end = cursor.advance_to(m.end);
                let mut entity = Entity::new(EntityKind::Url, start, end, m.url);
                entity.query = m.query.map(str::to_string);
                entity
            })
            .collect()
    }
}
