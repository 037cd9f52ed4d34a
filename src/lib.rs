//! TweetCore: Entity Extraction + Autolinking for short messages
//!
//! A Rust/WASM implementation of the tweet text pipeline: find @mentions,
//! @mention/lists, #hashtags and URLs in Unicode-rich text, report their
//! codepoint ranges, and rewrite the text into HTML anchors.
//!
//! # Architecture
//!
//! ## Scanner Components
//! - `chars.rs` - Character classes (at-signs, hashtag word class, bidi controls)
//! - `tld.rs` - Curated top-level domain table
//! - `mention.rs` - MentionGrammar: @user, @user/list and reply detection
//! - `hashtag.rs` - HashtagGrammar: #tag detection across scripts
//! - `url.rs` - UrlScanner: linear-time URL recognizer (with/without protocol)
//! - `extractor.rs` - Extractor: ordered Entity records with codepoint offsets
//!
//! ## Autolink Components
//! - `config.rs` - AutolinkConfig + validating builder
//! - `tags.rs` - TagScanner: two-state tag skipper for chained passes
//! - `escape.rs` - HTML escaping for hrefs and plain text
//!
//! # Usage (Rust)
//! ```
//! use tweetcore::{Autolinker, Extractor};
//!
//! let extractor = Extractor::new();
//! assert_eq!(extractor.extract_hashtags("This has a #hashtag"), vec!["hashtag"]);
//!
//! let linker = Autolinker::new();
//! let html = linker.auto_link("Testing @mention");
//! assert!(html.contains(r#"href="http://twitter.com/mention""#));
//! ```
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { TextExtractor, TextAutolinker } from 'tweetcore';
//!
//! await init();
//!
//! const extractor = new TextExtractor();
//! extractor.extractHashtagsWithIndices("This has a #hashtag");
//! // [{ kind: "hashtag", start: 11, end: 19, value: "hashtag" }]
//!
//! const linker = new TextAutolinker({ noFollow: false });
//! linker.autoLink("Testing @mention and @mention/list");
//! ```

pub mod autolink;
pub mod error;
pub mod scanner;
pub mod wasm;

// Public exports - Scanner
pub use scanner::*;

// Public exports - Autolink
pub use autolink::*;

pub use error::ConfigError;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("tweetcore v{}", env!("CARGO_PKG_VERSION"))
}
