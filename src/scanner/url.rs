//! UrlScanner - linear-time URL recognition
//!
//! Recognizes URLs with an explicit `http://`/`https://` protocol and bare
//! hosts ending in a known TLD. Hand-rolled rather than a single regex
//! because the rules need look-behind (preceding character), per-label TLD
//! decisions and balanced parentheses.
//!
//! # Shape
//! ```text
//! [protocol] host [":" port] ["/" path] ["?" query] ["#" fragment]
//! ```
//!
//! # Trailing punctuation
//! Path, query and fragment are first consumed as a maximal run of allowed
//! characters, then cut back to the last valid *ending* character. The cut
//! is a single backwards bound tracked during the forward scan, so a run of
//! hundreds of `!` after a link costs one pass and never backtracks.

use tracing::trace;

use super::chars::{is_bidi_control, is_invalid_url_preceding, is_latin_accent};
use super::tld::{self, TldKind};

// ==================== TYPE DEFINITIONS ====================

/// A recognized URL with its components (byte offsets, borrowed slices).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub url: &'t str,
    /// `http://` or `https://` as written
    pub protocol: Option<&'t str>,
    pub host: &'t str,
    pub port: Option<&'t str>,
    /// Path including the leading `/`
    pub path: Option<&'t str>,
    /// Query string without the leading `?`
    pub query: Option<&'t str>,
    /// Fragment without the leading `#` (only when not already part of the path)
    pub fragment: Option<&'t str>,
}

/// Result of scanning one trimmed run (path/query/fragment)
struct Run {
    /// Where the raw run stopped
    stop: usize,
    /// End after cutting back to the last valid ending character
    end: usize,
}

// ==================== MAIN IMPLEMENTATION ====================

/// URL recognizer
#[derive(Clone, Copy, Debug)]
pub struct UrlScanner {
    without_protocol: bool,
}

impl Default for UrlScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlScanner {
    /// Scanner that accepts protocol-less hosts with a known TLD
    pub fn new() -> Self {
        Self { without_protocol: true }
    }

    /// Scanner that only accepts URLs with an explicit protocol
    pub fn protocol_only() -> Self {
        Self { without_protocol: false }
    }

    /// Find every URL, left to right, non-overlapping.
    pub fn scan<'t>(&self, text: &'t str) -> Vec<UrlMatch<'t>> {
        self.scan_after(text, None)
    }

    /// Scan a chunk whose preceding character in the full text is `before`
    pub fn scan_after<'t>(&self, text: &'t str, before: Option<char>) -> Vec<UrlMatch<'t>> {
        let mut found = Vec::new();
        let mut pos = 0;
        let mut prev = before;

        while let Some(c) = text[pos..].chars().next() {
            if prev.map_or(true, |p| !is_invalid_url_preceding(p)) {
                if let Some(m) = self.match_at(text, pos) {
                    prev = text[..m.end].chars().next_back();
                    pos = m.end;
                    found.push(m);
                    continue;
                }
            }
            prev = Some(c);
            pos += c.len_utf8();
        }

        found
    }

    fn match_at<'t>(&self, text: &'t str, start: usize) -> Option<UrlMatch<'t>> {
        if let Some(len) = protocol_len(&text[start..]) {
            if let Some(m) = match_tail(text, start, Some(start + len)) {
                return Some(m);
            }
        }
        if self.without_protocol {
            return match_tail(text, start, None);
        }
        None
    }
}

// ==================== GRAMMAR PIECES ====================

fn protocol_len(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    if b.len() >= 7 && b[..7].eq_ignore_ascii_case(b"http://") {
        Some(7)
    } else if b.len() >= 8 && b[..8].eq_ignore_ascii_case(b"https://") {
        Some(8)
    } else {
        None
    }
}

/// Host, port, path, query and fragment starting at `host_start`
/// (just after the protocol, or at `start` when there is none).
fn match_tail(text: &str, start: usize, host_start: Option<usize>) -> Option<UrlMatch<'_>> {
    let has_protocol = host_start.is_some();
    let host_start = host_start.unwrap_or(start);

    let labels = scan_labels(text, host_start, has_protocol);
    let host_end = if has_protocol {
        host_with_protocol(text, &labels)?
    } else {
        host_without_protocol(text, &labels)?
    };
    if touches_bidi(text, host_end) {
        trace!(offset = start, "url rejected: bidi control after host");
        return None;
    }

    let mut end = host_end;

    let mut port = None;
    if text[end..].starts_with(':') {
        let digits = text[end + 1..].bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            port = Some(&text[end + 1..end + 1 + digits]);
            end += 1 + digits;
            if touches_bidi(text, end) {
                return None;
            }
        }
    }

    let mut path = None;
    if text[end..].starts_with('/') {
        let run = scan_path(text, end);
        if touches_bidi(text, run.stop) {
            trace!(offset = start, "url rejected: bidi control in path");
            return None;
        }
        path = Some(&text[end..run.end]);
        end = run.end;
    }

    let mut query = None;
    if text[end..].starts_with('?') {
        let run = scan_query(text, end);
        if touches_bidi(text, run.stop) {
            trace!(offset = start, "url rejected: bidi control in query");
            return None;
        }
        if run.end > end + 1 {
            query = Some(&text[end + 1..run.end]);
            end = run.end;
        }
    }

    let mut fragment = None;
    if text[end..].starts_with('#') {
        let run = scan_fragment(text, end);
        if touches_bidi(text, run.stop) {
            return None;
        }
        if run.end > end + 1 {
            fragment = Some(&text[end + 1..run.end]);
            end = run.end;
        }
    }

    Some(UrlMatch {
        start,
        end,
        url: &text[start..end],
        protocol: has_protocol.then(|| &text[start..host_start]),
        host: &text[host_start..host_end],
        port,
        path,
        query,
        fragment,
    })
}

fn is_host_char(c: char, unicode: bool) -> bool {
    let alnum = if unicode { c.is_alphanumeric() } else { c.is_ascii_alphanumeric() };
    alnum || is_latin_accent(c) || c == '-' || c == '_'
}

/// Dot-separated labels starting at `from`, as byte ranges.
///
/// A dot only continues the host when a label character follows it.
fn scan_labels(text: &str, from: usize, unicode: bool) -> Vec<(usize, usize)> {
    let mut labels = Vec::new();
    let mut pos = from;

    loop {
        let label_start = pos;
        for c in text[pos..].chars() {
            if !is_host_char(c, unicode) {
                break;
            }
            pos += c.len_utf8();
        }
        if pos == label_start {
            break;
        }
        labels.push((label_start, pos));

        let mut after_dot = text[pos..].chars();
        match (after_dot.next(), after_dot.next()) {
            (Some('.'), Some(next)) if is_host_char(next, unicode) => pos += 1,
            _ => break,
        }
    }

    labels
}

/// Label may not start or end with `-`/`_`; underscores only where allowed
fn label_ok(label: &str, allow_underscore: bool) -> bool {
    let edge_ok = |c: Option<char>| matches!(c, Some(c) if c != '-' && c != '_');
    edge_ok(label.chars().next())
        && edge_ok(label.chars().next_back())
        && (allow_underscore || !label.contains('_'))
}

/// Any well-formed host of two or more labels
fn host_with_protocol(text: &str, labels: &[(usize, usize)]) -> Option<usize> {
    if labels.len() < 2 {
        return None;
    }
    if !labels.iter().all(|&(s, e)| label_ok(&text[s..e], true)) {
        return None;
    }
    labels.last().map(|&(_, end)| end)
}

/// Longest label prefix that ends in an acceptable TLD.
///
/// - 3+ labels: any known TLD (`www.foo.co.jp`)
/// - 2 labels: generic TLD or punycode (`twitter.com`), or a country code
///   only when a `/` follows (`t.co/abc`, but never bare `t.co`)
fn host_without_protocol(text: &str, labels: &[(usize, usize)]) -> Option<usize> {
    for k in (2..=labels.len()).rev() {
        let (tld_start, tld_end) = labels[k - 1];
        let Some(kind) = tld::classify(&text[tld_start..tld_end]) else {
            continue;
        };

        let (name_start, name_end) = labels[k - 2];
        if !label_ok(&text[name_start..name_end], false) {
            continue;
        }
        if !labels[..k - 2].iter().all(|&(s, e)| label_ok(&text[s..e], true)) {
            continue;
        }

        let accepted = k >= 3
            || match kind {
                TldKind::Generic | TldKind::Punycode => true,
                TldKind::CountryCode => text[tld_end..].starts_with('/'),
            };
        if accepted {
            return Some(tld_end);
        }
    }
    None
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || is_latin_accent(c)
        || matches!(
            c,
            '!' | '*' | '\'' | ';' | ':' | '=' | '+' | ',' | '.' | '$' | '/' | '%' | '#' | '['
                | ']' | '-' | '_' | '~' | '|' | '&' | '@'
        )
}

fn is_path_ending_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_latin_accent(c) || matches!(c, '=' | '_' | '#' | '/' | '-' | '+')
}

fn is_query_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '?' | '*' | '\'' | '(' | ')' | ';' | ':' | '&' | '=' | '+' | '$' | '/' | '%'
                | '#' | '[' | ']' | '-' | '_' | '.' | ',' | '~' | '|'
        )
}

fn is_query_ending_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '&' | '=' | '#' | '/')
}

/// Path from the `/` at `start`. `( … )` groups of path characters count as
/// one ending unit; an unmatched paren stops the run.
fn scan_path(text: &str, start: usize) -> Run {
    let mut pos = start;
    let mut end = start;

    while let Some(c) = text[pos..].chars().next() {
        if c == '(' {
            let inner: usize = text[pos + 1..]
                .chars()
                .take_while(|&d| is_path_char(d))
                .map(char::len_utf8)
                .sum();
            let close = pos + 1 + inner;
            if inner > 0 && text[close..].starts_with(')') {
                pos = close + 1;
                end = pos;
                continue;
            }
            break;
        }
        if !is_path_char(c) {
            break;
        }
        pos += c.len_utf8();
        if is_path_ending_char(c) {
            end = pos;
        }
    }

    Run { stop: pos, end }
}

/// Query from the `?` at `start`; `end == start + 1` means nothing usable.
fn scan_query(text: &str, start: usize) -> Run {
    let mut pos = start + 1;
    let mut end = start + 1;

    for c in text[pos..].chars() {
        if !is_query_char(c) {
            break;
        }
        pos += c.len_utf8();
        if is_query_ending_char(c) {
            end = pos;
        }
    }

    Run { stop: pos, end }
}

/// Fragment from the `#` at `start`; `end == start + 1` means nothing usable.
fn scan_fragment(text: &str, start: usize) -> Run {
    let mut pos = start + 1;
    let mut end = start + 1;

    for c in text[pos..].chars() {
        if !is_path_char(c) {
            break;
        }
        pos += c.len_utf8();
        if is_path_ending_char(c) {
            end = pos;
        }
    }

    Run { stop: pos, end }
}

/// A bidi control at `pos`, or right after a dot at `pos`
fn touches_bidi(text: &str, pos: usize) -> bool {
    let mut chars = text[pos..].chars();
    match chars.next() {
        Some(c) if is_bidi_control(c) => true,
        Some('.') => chars.next().is_some_and(is_bidi_control),
        _ => false,
    }
}

// ==================== TESTS ====================
