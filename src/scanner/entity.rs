//! Entity records and codepoint offset bookkeeping

use serde::{Deserialize, Serialize};

// ==================== TYPE DEFINITIONS ====================

/// Kind of entity detected
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Mention,
    MentionList,
    Hashtag,
    Url,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Mention => "mention",
            EntityKind::MentionList => "mention_list",
            EntityKind::Hashtag => "hashtag",
            EntityKind::Url => "url",
        }
    }
}

/// One recognized occurrence in the source text.
///
/// `start`/`end` count Unicode scalar values, so a character outside the
/// Basic Multilingual Plane occupies exactly one unit. For mentions and
/// hashtags the range covers the sigil while `value` does not.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub start: usize,
    pub end: usize,
    pub value: String,
    /// List slug for `MentionList`, without the leading `/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_slug: Option<String>,
    /// Raw query string for `Url`, without the leading `?`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl Entity {
    pub fn new(kind: EntityKind, start: usize, end: usize, value: impl Into<String>) -> Self {
        Self {
            kind,
            start,
            end,
            value: value.into(),
            list_slug: None,
            query: None,
        }
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// ==================== OFFSETS ====================

/// Converts ascending byte offsets into codepoint offsets in one pass.
///
/// Grammar matchers report byte ranges into `&str`; entities report
/// codepoints. Offsets must be requested in non-decreasing order.
pub(crate) struct CodepointCursor<'t> {
    text: &'t str,
    byte: usize,
    chars: usize,
}

impl<'t> CodepointCursor<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self { text, byte: 0, chars: 0 }
    }

    pub(crate) fn advance_to(&mut self, byte: usize) -> usize {
        debug_assert!(byte >= self.byte, "offsets must be requested in order");
        if byte > self.byte {
            self.chars += self.text[self.byte..byte].chars().count();
            self.byte = byte;
        }
        self.chars
    }
}

/// Byte offset of every codepoint boundary, plus the end of the text.
///
/// Used to map caller-supplied codepoint ranges back onto `&str` slices.
pub(crate) fn codepoint_boundaries(text: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    bounds.push(text.len());
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_counts_supplementary_as_one() {
        let text = "𐐀 #tag";
        let mut cursor = CodepointCursor::new(text);
        let hash = text.find('#').unwrap();
        assert_eq!(cursor.advance_to(hash), 2);
        assert_eq!(cursor.advance_to(text.len()), 6);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(codepoint_boundaries("a𐐀b"), vec![0, 1, 5, 6]);
        assert_eq!(codepoint_boundaries(""), vec![0]);
    }

    #[test]
    fn test_entity_serializes_snake_case_kind() {
        let entity = Entity::new(EntityKind::MentionList, 0, 10, "user");
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["kind"], "mention_list");
        assert!(json.get("query").is_none());
    }

    #[test]
    fn test_overlap() {
        let a = Entity::new(EntityKind::Url, 0, 10, "x");
        let b = Entity::new(EntityKind::Hashtag, 9, 12, "y");
        let c = Entity::new(EntityKind::Hashtag, 10, 12, "y");
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
