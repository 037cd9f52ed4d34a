//! Curated top-level domain table
//!
//! Consulted only for URLs written without a protocol. Built once on first
//! use and never mutated afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Which half of the table a label came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TldKind {
    Generic,
    CountryCode,
    Punycode,
}

const GENERIC_TLDS: &[&str] = &[
    "aero", "asia", "biz", "cat", "com", "coop", "edu", "gov", "info", "int", "jobs", "mil",
    "mobi", "museum", "name", "net", "org", "post", "pro", "tel", "travel", "xxx",
];

const COUNTRY_CODE_TLDS: &[&str] = &[
    "ac", "ad", "ae", "af", "ag", "ai", "al", "am", "an", "ao", "aq", "ar", "as", "at", "au",
    "aw", "ax", "az", "ba", "bb", "bd", "be", "bf", "bg", "bh", "bi", "bj", "bm", "bn", "bo",
    "br", "bs", "bt", "bv", "bw", "by", "bz", "ca", "cc", "cd", "cf", "cg", "ch", "ci", "ck",
    "cl", "cm", "cn", "co", "cr", "cs", "cu", "cv", "cx", "cy", "cz", "dd", "de", "dj", "dk",
    "dm", "do", "dz", "ec", "ee", "eg", "eh", "er", "es", "et", "eu", "fi", "fj", "fk", "fm",
    "fo", "fr", "ga", "gb", "gd", "ge", "gf", "gg", "gh", "gi", "gl", "gm", "gn", "gp", "gq",
    "gr", "gs", "gt", "gu", "gw", "gy", "hk", "hm", "hn", "hr", "ht", "hu", "id", "ie", "il",
    "im", "in", "io", "iq", "ir", "is", "it", "je", "jm", "jo", "jp", "ke", "kg", "kh", "ki",
    "km", "kn", "kp", "kr", "kw", "ky", "kz", "la", "lb", "lc", "li", "lk", "lr", "ls", "lt",
    "lu", "lv", "ly", "ma", "mc", "md", "me", "mg", "mh", "mk", "ml", "mm", "mn", "mo", "mp",
    "mq", "mr", "ms", "mt", "mu", "mv", "mw", "mx", "my", "mz", "na", "nc", "ne", "nf", "ng",
    "ni", "nl", "no", "np", "nr", "nu", "nz", "om", "pa", "pe", "pf", "pg", "ph", "pk", "pl",
    "pm", "pn", "pr", "ps", "pt", "pw", "py", "qa", "re", "ro", "rs", "ru", "rw", "sa", "sb",
    "sc", "sd", "se", "sg", "sh", "si", "sj", "sk", "sl", "sm", "sn", "so", "sr", "ss", "st",
    "su", "sv", "sy", "sz", "tc", "td", "tf", "tg", "th", "tj", "tk", "tl", "tm", "tn", "to",
    "tp", "tr", "tt", "tv", "tw", "tz", "ua", "ug", "uk", "us", "uy", "uz", "va", "vc", "ve",
    "vg", "vi", "vn", "vu", "wf", "ws", "ye", "yt", "za", "zm", "zw",
];

fn table() -> &'static HashMap<&'static str, TldKind> {
    static TABLE: OnceLock<HashMap<&'static str, TldKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = HashMap::with_capacity(GENERIC_TLDS.len() + COUNTRY_CODE_TLDS.len());
        map.extend(GENERIC_TLDS.iter().map(|&tld| (tld, TldKind::Generic)));
        map.extend(COUNTRY_CODE_TLDS.iter().map(|&tld| (tld, TldKind::CountryCode)));
        map
    })
}

/// Classify a host label as a TLD, ASCII case-insensitively
pub fn classify(label: &str) -> Option<TldKind> {
    if is_punycode(label) {
        return Some(TldKind::Punycode);
    }
    // Longest entry is "museum"/"travel"; skip the allocation for anything longer.
    if label.len() > 6 || !label.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let lower = label.to_ascii_lowercase();
    table().get(lower.as_str()).copied()
}

/// `xn--` followed by one or more ASCII alphanumerics
fn is_punycode(label: &str) -> bool {
    let bytes = label.as_bytes();
    bytes.len() > 4
        && bytes[..4].eq_ignore_ascii_case(b"xn--")
        && bytes[4..].iter().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_and_country_codes() {
        assert_eq!(classify("com"), Some(TldKind::Generic));
        assert_eq!(classify("COM"), Some(TldKind::Generic));
        assert_eq!(classify("jp"), Some(TldKind::CountryCode));
        assert_eq!(classify("co"), Some(TldKind::CountryCode));
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(classify("bar"), None);
        assert_eq!(classify("community"), None);
        assert_eq!(classify("c0m"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_punycode() {
        assert_eq!(classify("xn--p1ai"), Some(TldKind::Punycode));
        assert_eq!(classify("xn--"), None);
    }
}
