//! URL grammar tests: TLD rules, trailing punctuation, linear time

use std::time::{Duration, Instant};

use crate::scanner::url::UrlScanner;
use crate::scanner::Extractor;

fn first_url(text: &str) -> Option<String> {
    Extractor::new().extract_urls(text).into_iter().next()
}

// ============================================================================
// Full-match corpus
// ============================================================================

#[test]
fn test_urls_with_punctuation_match_whole() {
    let urls = [
        "http://www.foo.com/foo/path-with-period./",
        "http://www.foo.org.za/foo/bar/688.1",
        "http://www.foo.com/bar-path/some.stm?param1=foo;param2=P1|0||P2|0",
        "http://foo.com/bar/123/foo_&_bar/",
        "http://foo.com/bar(test)bar(test)bar(test)",
        "www.foo.com/foo/path-with-period./",
        "www.foo.org.za/foo/bar/688.1",
        "www.foo.com/bar-path/some.stm?param1=foo;param2=P1|0||P2|0",
        "foo.com/bar/123/foo_&_bar/",
    ];

    for url in urls {
        assert_eq!(first_url(url).as_deref(), Some(url), "did not match whole: {}", url);
    }
}

#[test]
fn test_blogspot_with_dash() {
    let url = "http://samsoum-us.blogspot.com/2010/05/la-censure-nuit-limage-de-notre-pays.html";
    assert_eq!(first_url(&format!("Url: {}", url)).as_deref(), Some(url));
}

#[test]
fn test_url_without_protocol_rules() {
    let scanner = UrlScanner::new();
    let whole = |text: &str| scanner.scan(text).first().map(|m| m.url) == Some(text);

    assert!(whole("twitter.com"));
    assert!(whole("www.foo.co.jp"));
    assert!(whole("www.foo.org.za"));
    assert!(whole("http://t.co"));
    assert!(whole("t.co/blahblah"));
    assert!(!whole("t.co"));
    assert!(scanner.scan("www.foo.bar").is_empty());
}

#[test]
fn test_punycode_tld() {
    assert_eq!(first_url("see example.xn--p1ai now").as_deref(), Some("example.xn--p1ai"));
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_bidi_controls_reject_whole_candidate() {
    for c in ['\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}'] {
        assert_eq!(first_url(&format!("http://twitt{}er.com", c)), None);
        assert_eq!(first_url(&format!("{}twitter.com", c)), None);
    }
}

#[test]
fn test_email_is_not_a_url() {
    assert_eq!(first_url("mail me at someone@example.com"), None);
}

#[test]
fn test_host_label_edges() {
    assert_eq!(first_url("http://-foo.com"), None);
    assert_eq!(first_url("http://foo-.com"), None);
    assert_eq!(first_url("foo_bar.com"), None);
    assert_eq!(first_url("http://foo_bar.example.com").as_deref(), Some("http://foo_bar.example.com"));
}

// ============================================================================
// Linear time
// ============================================================================

#[test]
fn test_repeated_punctuation_is_fast() {
    let texts = [
        format!("Try http://example.com/path{}", "*".repeat(40)),
        format!("http://foo.org/bar/foo-bar-foo-bar.aspx{} Test", "!".repeat(40)),
        format!("http://example.com/{}", "!".repeat(5_000)),
    ];

    for text in &texts {
        let start = Instant::now();
        let found = Extractor::new().extract_urls(text);
        let took = start.elapsed();

        assert_eq!(found.len(), 1, "{}", text);
        assert!(!found[0].ends_with('!') && !found[0].ends_with('*'));
        assert!(took < Duration::from_millis(10), "took {:?}", took);
    }
}

#[test]
fn test_very_long_path() {
    let text = format!("Check out http://example.com/{}", "a".repeat(2_000));
    let found = Extractor::new().extract_urls(&text);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].len(), "http://example.com/".len() + 2_000);
}
