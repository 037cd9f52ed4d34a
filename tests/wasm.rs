//! Browser-side smoke tests for the JavaScript bindings
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use tweetcore::wasm::{TextAutolinker, TextExtractor};
use tweetcore::Entity;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn extractor_returns_entities() {
    let extractor = TextExtractor::new(JsValue::UNDEFINED).unwrap();
    let value = extractor.extract_hashtags_with_indices("This has a #hashtag").unwrap();
    let entities: Vec<Entity> = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!((entities[0].start, entities[0].end), (11, 19));
}

#[wasm_bindgen_test]
fn extractor_rejects_unknown_kind() {
    let extractor = TextExtractor::new(JsValue::NULL).unwrap();
    assert!(extractor.extract("#tag", "emoji").is_err());
}

#[wasm_bindgen_test]
fn autolinker_setters_validate() {
    let mut linker = TextAutolinker::new(JsValue::UNDEFINED).unwrap();
    linker.set_no_follow(false).unwrap();
    assert_eq!(
        linker.auto_link_urls("http://example.com"),
        r#"<a href="http://example.com">http://example.com</a>"#
    );
    assert!(linker.set_username_url_base(String::new()).is_err());
}

#[wasm_bindgen_test]
fn autolinker_renders_extracted_entities() {
    let extractor = TextExtractor::new(JsValue::UNDEFINED).unwrap();
    let linker = TextAutolinker::new(JsValue::UNDEFINED).unwrap();
    let text = "hi @user <3";
    let entities = extractor.extract_entities_with_indices(text).unwrap();
    let html = linker.auto_link_entities(text, entities).unwrap();
    assert!(html.ends_with("&lt;3"));
}
