//! TagScanner - splits HTML-ish text into tag and text segments
//!
//! Two states, `OutsideTag` and `InsideTag`, toggled by `<` and `>`. A `>`
//! seen outside a tag is plain text; a `<` with no closing `>` makes the rest
//! of the input one tag segment. Text between an `<a …>` and its `</a>` is
//! reported as `in_anchor`, so a later pass can leave anchors it or an
//! earlier pass produced alone.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    OutsideTag,
    InsideTag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'t> {
    Text { text: &'t str, in_anchor: bool },
    /// Tag including its delimiters
    Tag(&'t str),
}

impl<'t> Segment<'t> {
    pub fn as_str(&self) -> &'t str {
        match *self {
            Segment::Text { text, .. } | Segment::Tag(text) => text,
        }
    }

    /// Text a substitution pass may rewrite
    pub fn linkable_text(&self) -> Option<&'t str> {
        match *self {
            Segment::Text { text, in_anchor: false } => Some(text),
            _ => None,
        }
    }
}

pub struct TagScanner<'t> {
    text: &'t str,
    pos: usize,
    anchor_depth: usize,
}

impl<'t> TagScanner<'t> {
    pub fn new(text: &'t str) -> Self {
        Self { text, pos: 0, anchor_depth: 0 }
    }

    fn track_anchor(&mut self, tag: &str) {
        if !is_anchor_tag(tag) {
            return;
        }
        if tag.starts_with("</") {
            self.anchor_depth = self.anchor_depth.saturating_sub(1);
        } else if !tag.ends_with("/>") {
            self.anchor_depth += 1;
        }
    }
}

/// `<a …>` or `</a>`, case-insensitive
pub fn is_anchor_tag(tag: &str) -> bool {
    let name = tag.trim_start_matches('<');
    let name = name.strip_prefix('/').unwrap_or(name);
    let mut chars = name.chars();
    matches!(chars.next(), Some('a' | 'A'))
        && chars.next().map_or(true, |c| c.is_whitespace() || c == '>' || c == '/')
}

impl<'t> Iterator for TagScanner<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Segment<'t>> {
        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let start = self.pos;
        let state = if rest.starts_with('<') { State::InsideTag } else { State::OutsideTag };

        match state {
            State::OutsideTag => {
                let len = rest.find('<').unwrap_or(rest.len());
                self.pos += len;
                Some(Segment::Text {
                    text: &self.text[start..self.pos],
                    in_anchor: self.anchor_depth > 0,
                })
            }
            State::InsideTag => {
                let len = rest.find('>').map_or(rest.len(), |i| i + 1);
                self.pos += len;
                let tag = &self.text[start..self.pos];
                self.track_anchor(tag);
                Some(Segment::Tag(tag))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(text: &str) -> Vec<Segment<'_>> {
        TagScanner::new(text).collect()
    }

    #[test]
    fn test_split_reassembles() {
        let text = "a <b>c</b> > d <unterminated e";
        let joined: String = segments(text).iter().map(|s| s.as_str()).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_states() {
        let segs = segments("x<br>y");
        assert_eq!(segs[0], Segment::Text { text: "x", in_anchor: false });
        assert_eq!(segs[1], Segment::Tag("<br>"));
        assert_eq!(segs[2], Segment::Text { text: "y", in_anchor: false });
    }

    #[test]
    fn test_stray_close_is_text() {
        assert_eq!(segments("a > b"), vec![Segment::Text { text: "a > b", in_anchor: false }]);
    }

    #[test]
    fn test_unterminated_tag_runs_to_end() {
        let segs = segments("a <3 #tag");
        assert_eq!(segs[1], Segment::Tag("<3 #tag"));
    }

    #[test]
    fn test_anchor_text_not_linkable() {
        let segs = segments(r#"<a href="x">@user</a> @other <abbr>ok</abbr>"#);
        let linkable: Vec<_> = segs.iter().filter_map(|s| s.linkable_text()).collect();
        assert_eq!(linkable, vec![" @other ", "ok"]);
    }

    #[test]
    fn test_is_anchor_tag() {
        assert!(is_anchor_tag(r#"<a href="x">"#));
        assert!(is_anchor_tag("</A>"));
        assert!(!is_anchor_tag("<abbr>"));
        assert!(!is_anchor_tag("<br>"));
    }
}
