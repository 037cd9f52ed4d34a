//! JavaScript bindings
//!
//! `TextExtractor` and `TextAutolinker` wrap the Rust API. Entity lists cross
//! the boundary as plain objects via serde-wasm-bindgen; configuration
//! errors surface as thrown strings.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::autolink::{AutolinkConfig, AutolinkConfigBuilder, Autolinker};
use crate::scanner::{Entity, EntityKind, Extractor};

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_kind(kind: &str) -> Result<EntityKind, JsValue> {
    match kind {
        "mention" => Ok(EntityKind::Mention),
        "mention_list" => Ok(EntityKind::MentionList),
        "hashtag" => Ok(EntityKind::Hashtag),
        "url" => Ok(EntityKind::Url),
        other => Err(JsValue::from_str(&format!("Unknown entity kind: {}", other))),
    }
}

// ==================== EXTRACTOR ====================

/// Options accepted by the `TextExtractor` constructor
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ExtractorOptions {
    #[serde(default = "default_true")]
    extract_url_without_protocol: bool,
}

fn default_true() -> bool { true }

#[wasm_bindgen]
pub struct TextExtractor {
    inner: Extractor,
}

#[wasm_bindgen]
impl TextExtractor {
    /// Create an extractor; `options` may be omitted
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<TextExtractor, JsValue> {
        let mut inner = Extractor::new();
        if !(options.is_null() || options.is_undefined()) {
            let options: ExtractorOptions = serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?;
            inner = inner.with_url_without_protocol(options.extract_url_without_protocol);
        }
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = setExtractUrlWithoutProtocol)]
    pub fn set_extract_url_without_protocol(&mut self, enabled: bool) {
        self.inner = self.inner.with_url_without_protocol(enabled);
    }

    /// Entities of one kind: "mention", "mention_list", "hashtag" or "url"
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, kind: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.extract(text, parse_kind(kind)?))
    }

    #[wasm_bindgen(js_name = extractEntitiesWithIndices)]
    pub fn extract_entities_with_indices(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.extract_entities_with_indices(text))
    }

    #[wasm_bindgen(js_name = extractMentionedScreennames)]
    pub fn extract_mentioned_screennames(&self, text: &str) -> Vec<String> {
        self.inner.extract_mentioned_screennames(text)
    }

    #[wasm_bindgen(js_name = extractMentionedScreennamesWithIndices)]
    pub fn extract_mentioned_screennames_with_indices(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.extract_mentioned_screennames_with_indices(text))
    }

    #[wasm_bindgen(js_name = extractMentionsOrListsWithIndices)]
    pub fn extract_mentions_or_lists_with_indices(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.extract_mentions_or_lists_with_indices(text))
    }

    #[wasm_bindgen(js_name = extractReplyScreenname)]
    pub fn extract_reply_screenname(&self, text: &str) -> Option<String> {
        self.inner.extract_reply_screenname(text)
    }

    #[wasm_bindgen(js_name = extractHashtags)]
    pub fn extract_hashtags(&self, text: &str) -> Vec<String> {
        self.inner.extract_hashtags(text)
    }

    #[wasm_bindgen(js_name = extractHashtagsWithIndices)]
    pub fn extract_hashtags_with_indices(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.extract_hashtags_with_indices(text))
    }

    #[wasm_bindgen(js_name = extractUrls)]
    pub fn extract_urls(&self, text: &str) -> Vec<String> {
        self.inner.extract_urls(text)
    }

    #[wasm_bindgen(js_name = extractUrlsWithIndices)]
    pub fn extract_urls_with_indices(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.extract_urls_with_indices(text))
    }
}

// ==================== AUTOLINKER ====================

#[wasm_bindgen]
pub struct TextAutolinker {
    inner: Autolinker,
}

#[wasm_bindgen]
impl TextAutolinker {
    /// Create a linker from an optional camelCase config object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<TextAutolinker, JsValue> {
        let config = if config.is_null() || config.is_undefined() {
            AutolinkConfig::default()
        } else {
            let builder: AutolinkConfigBuilder = serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
            builder.build().map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(Self { inner: Autolinker::with_config(config) })
    }

    /// Current config as a plain object
    #[wasm_bindgen]
    pub fn config(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.config())
    }

    #[wasm_bindgen(js_name = autoLink)]
    pub fn auto_link(&self, text: &str) -> String {
        self.inner.auto_link(text)
    }

    #[wasm_bindgen(js_name = autoLinkHashtags)]
    pub fn auto_link_hashtags(&self, text: &str) -> String {
        self.inner.auto_link_hashtags(text)
    }

    #[wasm_bindgen(js_name = autoLinkUsernamesAndLists)]
    pub fn auto_link_usernames_and_lists(&self, text: &str) -> String {
        self.inner.auto_link_usernames_and_lists(text)
    }

    #[wasm_bindgen(js_name = autoLinkUrls)]
    pub fn auto_link_urls(&self, text: &str) -> String {
        self.inner.auto_link_urls(text)
    }

    /// Render entities previously returned by `TextExtractor`
    #[wasm_bindgen(js_name = autoLinkEntities)]
    pub fn auto_link_entities(&self, text: &str, entities: JsValue) -> Result<String, JsValue> {
        let entities: Vec<Entity> = serde_wasm_bindgen::from_value(entities)
            .map_err(|e| JsValue::from_str(&format!("Invalid entities: {}", e)))?;
        Ok(self.inner.auto_link_entities(text, &entities))
    }

    // ========================================================================
    // Setters (each rebuilds and revalidates the config)
    // ========================================================================

    #[wasm_bindgen(js_name = setUrlClass)]
    pub fn set_url_class(&mut self, value: String) -> Result<(), JsValue> {
        self.rebuild(|b| b.url_class(value))
    }

    #[wasm_bindgen(js_name = setListClass)]
    pub fn set_list_class(&mut self, value: String) -> Result<(), JsValue> {
        self.rebuild(|b| b.list_class(value))
    }

    #[wasm_bindgen(js_name = setUsernameClass)]
    pub fn set_username_class(&mut self, value: String) -> Result<(), JsValue> {
        self.rebuild(|b| b.username_class(value))
    }

    #[wasm_bindgen(js_name = setHashtagClass)]
    pub fn set_hashtag_class(&mut self, value: String) -> Result<(), JsValue> {
        self.rebuild(|b| b.hashtag_class(value))
    }

    #[wasm_bindgen(js_name = setUsernameUrlBase)]
    pub fn set_username_url_base(&mut self, value: String) -> Result<(), JsValue> {
        self.rebuild(|b| b.username_url_base(value))
    }

    #[wasm_bindgen(js_name = setListUrlBase)]
    pub fn set_list_url_base(&mut self, value: String) -> Result<(), JsValue> {
        self.rebuild(|b| b.list_url_base(value))
    }

    #[wasm_bindgen(js_name = setHashtagUrlBase)]
    pub fn set_hashtag_url_base(&mut self, value: String) -> Result<(), JsValue> {
        self.rebuild(|b| b.hashtag_url_base(value))
    }

    #[wasm_bindgen(js_name = setNoFollow)]
    pub fn set_no_follow(&mut self, value: bool) -> Result<(), JsValue> {
        self.rebuild(|b| b.no_follow(value))
    }

    #[wasm_bindgen(js_name = setUsernameIncludeSymbol)]
    pub fn set_username_include_symbol(&mut self, value: bool) -> Result<(), JsValue> {
        self.rebuild(|b| b.username_include_symbol(value))
    }

    #[wasm_bindgen(js_name = setLinkUrlWithoutProtocol)]
    pub fn set_link_url_without_protocol(&mut self, value: bool) -> Result<(), JsValue> {
        self.rebuild(|b| b.link_url_without_protocol(value))
    }
}

impl TextAutolinker {
    fn rebuild(
        &mut self,
        change: impl FnOnce(AutolinkConfigBuilder) -> AutolinkConfigBuilder,
    ) -> Result<(), JsValue> {
        let config = change(self.inner.config().to_builder())
            .build()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner = Autolinker::with_config(config);
        Ok(())
    }
}
