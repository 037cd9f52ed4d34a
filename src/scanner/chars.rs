//! Character classes shared by every grammar
//!
//! Each class is a sorted table of inclusive codepoint ranges so that one
//! table drives both the `char` predicate and the regex class text built
//! from it.

use std::cmp::Ordering;
use std::fmt::Write;

// ==================== SIGILS ====================

/// `@` and the full-width `＠`
pub fn is_at_sign(c: char) -> bool {
    matches!(c, '@' | '\u{FF20}')
}

/// `#` and the full-width `＃`
pub fn is_hash_sign(c: char) -> bool {
    matches!(c, '#' | '\u{FF03}')
}

/// LRE, RLE, PDF, LRO, RLO: the five directional formatting characters that
/// can visually reorder a link.
pub fn is_bidi_control(c: char) -> bool {
    matches!(c, '\u{202A}'..='\u{202E}')
}

// ==================== USERNAMES ====================

pub fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ==================== LATIN ACCENTS ====================

const LATIN_ACCENT_RANGES: &[(char, char)] = &[
    ('\u{00C0}', '\u{00D6}'),
    ('\u{00D8}', '\u{00F6}'),
    ('\u{00F8}', '\u{024F}'),
    ('\u{0253}', '\u{0254}'),
    ('\u{0256}', '\u{0257}'),
    ('\u{0259}', '\u{0259}'),
    ('\u{025B}', '\u{025B}'),
    ('\u{0263}', '\u{0263}'),
    ('\u{0268}', '\u{0268}'),
    ('\u{026F}', '\u{026F}'),
    ('\u{0272}', '\u{0272}'),
    ('\u{0289}', '\u{0289}'),
    ('\u{028B}', '\u{028B}'),
    ('\u{02BB}', '\u{02BB}'),
    ('\u{0300}', '\u{036F}'),
    ('\u{1E00}', '\u{1EFF}'),
];

/// Accented Latin letters and combining diacritics
pub fn is_latin_accent(c: char) -> bool {
    in_ranges(LATIN_ACCENT_RANGES, c)
}

// ==================== HASHTAG WORD CLASS ====================

/// Characters that may appear in a hashtag body. Sorted, non-overlapping.
const HASHTAG_RANGES: &[(char, char)] = &[
    ('0', '9'),
    ('A', 'Z'),
    ('_', '_'),
    ('a', 'z'),
    // Latin-1 letters, Latin Extended-A/B, IPA letters used in African orthographies
    ('\u{00C0}', '\u{00D6}'),
    ('\u{00D8}', '\u{00F6}'),
    ('\u{00F8}', '\u{024F}'),
    ('\u{0253}', '\u{0254}'),
    ('\u{0256}', '\u{0257}'),
    ('\u{0259}', '\u{0259}'),
    ('\u{025B}', '\u{025B}'),
    ('\u{0263}', '\u{0263}'),
    ('\u{0268}', '\u{0268}'),
    ('\u{026F}', '\u{026F}'),
    ('\u{0272}', '\u{0272}'),
    ('\u{0289}', '\u{0289}'),
    ('\u{028B}', '\u{028B}'),
    ('\u{02BB}', '\u{02BB}'),
    // Combining diacritical marks
    ('\u{0300}', '\u{036F}'),
    // Greek
    ('\u{0386}', '\u{0386}'),
    ('\u{0388}', '\u{03FF}'),
    // Cyrillic + supplement (U+0482 is a symbol)
    ('\u{0400}', '\u{0481}'),
    ('\u{0483}', '\u{0527}'),
    // Hebrew points and letters
    ('\u{0591}', '\u{05BD}'),
    ('\u{05BF}', '\u{05BF}'),
    ('\u{05C1}', '\u{05C2}'),
    ('\u{05C4}', '\u{05C5}'),
    ('\u{05C7}', '\u{05C7}'),
    ('\u{05D0}', '\u{05EA}'),
    ('\u{05F0}', '\u{05F2}'),
    // Arabic
    ('\u{0610}', '\u{061A}'),
    ('\u{0620}', '\u{065F}'),
    ('\u{0660}', '\u{0669}'),
    ('\u{066E}', '\u{06D3}'),
    ('\u{06D5}', '\u{06DC}'),
    ('\u{06DE}', '\u{06E8}'),
    ('\u{06EA}', '\u{06FC}'),
    ('\u{06FF}', '\u{06FF}'),
    ('\u{0750}', '\u{077F}'),
    ('\u{08A0}', '\u{08FF}'),
    // Thai
    ('\u{0E01}', '\u{0E3A}'),
    ('\u{0E40}', '\u{0E4E}'),
    // Hangul Jamo
    ('\u{1100}', '\u{11FF}'),
    // Latin Extended Additional
    ('\u{1E00}', '\u{1EFF}'),
    // Ditto mark, iteration mark, ideographic zero
    ('\u{3003}', '\u{3003}'),
    ('\u{3005}', '\u{3005}'),
    ('\u{3007}', '\u{3007}'),
    // Hangzhou numerals, vertical iteration mark
    ('\u{3021}', '\u{3029}'),
    ('\u{3038}', '\u{303B}'),
    // Hiragana
    ('\u{3041}', '\u{3096}'),
    ('\u{3099}', '\u{309E}'),
    // Katakana
    ('\u{30A1}', '\u{30FA}'),
    ('\u{30FC}', '\u{30FE}'),
    // Hangul compatibility Jamo
    ('\u{3130}', '\u{3185}'),
    // CJK Extension A, Unified Ideographs
    ('\u{3400}', '\u{4DBF}'),
    ('\u{4E00}', '\u{9FFF}'),
    // Hangul Jamo Extended-A, syllables, Jamo Extended-B
    ('\u{A960}', '\u{A97F}'),
    ('\u{AC00}', '\u{D7FF}'),
    // Hebrew + Arabic presentation forms
    ('\u{FB1D}', '\u{FB28}'),
    ('\u{FB2A}', '\u{FB4F}'),
    ('\u{FB50}', '\u{FD3D}'),
    ('\u{FD50}', '\u{FDFB}'),
    ('\u{FE70}', '\u{FEFC}'),
    // Full-width digits and Latin
    ('\u{FF10}', '\u{FF19}'),
    ('\u{FF21}', '\u{FF3A}'),
    ('\u{FF41}', '\u{FF5A}'),
    // Half-width Katakana, half-width Hangul
    ('\u{FF66}', '\u{FF9F}'),
    ('\u{FFA1}', '\u{FFDC}'),
    // CJK Extensions B-D, compatibility supplement
    ('\u{20000}', '\u{2A6DF}'),
    ('\u{2A700}', '\u{2B81F}'),
    ('\u{2F800}', '\u{2FA1F}'),
];

/// Digits in any script the word class admits
const DIGIT_RANGES: &[(char, char)] = &[
    ('0', '9'),
    ('\u{0660}', '\u{0669}'),
    ('\u{06F0}', '\u{06F9}'),
    ('\u{3007}', '\u{3007}'),
    ('\u{3021}', '\u{3029}'),
    ('\u{3038}', '\u{303A}'),
    ('\u{FF10}', '\u{FF19}'),
];

/// Han characters written as numerals in Japanese/Chinese text
const IDEOGRAPHIC_NUMERALS: &[char] = &[
    '一', '七', '万', '三', '九', '二', '五', '億', '八', '六', '十', '千', '四', '百', '零',
];

pub fn is_hashtag_char(c: char) -> bool {
    in_ranges(HASHTAG_RANGES, c)
}

/// Word characters that do not make a tag "alphabetic" on their own
pub fn is_digit_like(c: char) -> bool {
    in_ranges(DIGIT_RANGES, c) || IDEOGRAPHIC_NUMERALS.contains(&c)
}

/// Regex character class text (`[...]`) for the hashtag word class
pub fn hashtag_class() -> String {
    let mut class = String::with_capacity(HASHTAG_RANGES.len() * 20);
    class.push('[');
    for &(lo, hi) in HASHTAG_RANGES {
        // Writing into a String cannot fail.
        let _ = write!(class, "\\x{{{:X}}}-\\x{{{:X}}}", lo as u32, hi as u32);
    }
    class.push(']');
    class
}

// ==================== URL BOUNDARIES ====================

/// A URL may not begin right after one of these
pub fn is_invalid_url_preceding(c: char) -> bool {
    matches!(c, '-' | '/' | '"' | '\'' | '!' | '=' | '_' | '.')
        || is_at_sign(c)
        || c.is_ascii_alphanumeric()
        || is_latin_accent(c)
        || is_bidi_control(c)
}

fn in_ranges(ranges: &[(char, char)], c: char) -> bool {
    ranges
        .binary_search_by(|&(lo, hi)| {
            if hi < c {
                Ordering::Less
            } else if lo > c {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted(ranges: &[(char, char)]) {
        for window in ranges.windows(2) {
            assert!(window[0].0 <= window[0].1, "inverted range {:?}", window[0]);
            assert!(window[0].1 < window[1].0, "overlap between {:?} and {:?}", window[0], window[1]);
        }
    }

    #[test]
    fn test_tables_are_sorted() {
        assert_sorted(HASHTAG_RANGES);
        assert_sorted(LATIN_ACCENT_RANGES);
        assert_sorted(DIGIT_RANGES);
    }

    #[test]
    fn test_hashtag_word_class() {
        for c in ['a', 'Z', '_', '7', 'é', 'ж', 'ハ', '日', 'ー', '한', 'ا', '\u{20B9F}'] {
            assert!(is_hashtag_char(c), "{c:?} should be a hashtag char");
        }
        for c in ['#', '@', ' ', '。', '-', '!', '\u{3000}'] {
            assert!(!is_hashtag_char(c), "{c:?} should not be a hashtag char");
        }
    }

    #[test]
    fn test_digit_like() {
        assert!(is_digit_like('0'));
        assert!(is_digit_like('\u{FF15}'));
        assert!(is_digit_like('〇'));
        assert!(is_digit_like('三'));
        assert!(!is_digit_like('a'));
        assert!(!is_digit_like('日'));
    }

    #[test]
    fn test_bidi_controls() {
        for c in ['\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}'] {
            assert!(is_bidi_control(c));
            assert!(is_invalid_url_preceding(c));
        }
        assert!(!is_bidi_control('\u{200F}'));
    }

    #[test]
    fn test_hashtag_class_compiles() {
        let re = regex::Regex::new(&hashtag_class()).unwrap();
        assert!(re.is_match("日本語"));
        assert!(re.is_match("\u{20B9F}"));
        assert!(!re.is_match("!?"));
    }
}
