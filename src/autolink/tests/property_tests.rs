use proptest::prelude::*;

use crate::autolink::{Autolinker, Segment, TagScanner};

fn tweet_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(vec![
                "@", "#", "＃", "http://", "https://", ".com", "/", "?", "&", "$", " ", "<", ">", "𐐀",
            ])
            .prop_map(str::to_string),
            "[a-zA-Z0-9_]{1,6}",
            "[ぁ-ん一-龯]{1,3}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars();
    needle.chars().all(|c| hay.any(|h| h == c))
}

/// Deepest `<a>` nesting seen while walking `html`
fn max_anchor_depth(html: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0;
    for segment in TagScanner::new(html) {
        if let Segment::Tag(tag) = segment {
            if tag.starts_with("<a ") {
                depth += 1;
                max = max.max(depth);
            } else if tag == "</a>" {
                depth = depth.saturating_sub(1);
            }
        }
    }
    max
}

proptest! {
    #[test]
    fn prop_input_is_subsequence_of_output(text in tweet_text()) {
        let html = Autolinker::new().auto_link(&text);
        prop_assert!(is_subsequence(&text, &html), "{:?} -> {:?}", text, html);
    }

    #[test]
    fn prop_chaining_never_nests_anchors(text in tweet_text()) {
        let text = text.replace('<', "");
        let linker = Autolinker::new();
        let once = linker.auto_link(&text);
        let twice = linker.auto_link(&once);
        prop_assert!(max_anchor_depth(&once) <= 1);
        prop_assert!(max_anchor_depth(&twice) <= 1);
    }
}
