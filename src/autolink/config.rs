//! AutolinkConfig - rendering options, validated once at build time
//!
//! # Usage
//! ```
//! use tweetcore::AutolinkConfig;
//!
//! let config = AutolinkConfig::builder()
//!     .url_class("link")
//!     .no_follow(false)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.url_class(), "link");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_URL_CLASS: &str = "tweet-url";
pub const DEFAULT_LIST_CLASS: &str = "list-slug";
pub const DEFAULT_USERNAME_CLASS: &str = "username";
pub const DEFAULT_HASHTAG_CLASS: &str = "hashtag";
pub const DEFAULT_USERNAME_URL_BASE: &str = "http://twitter.com/";
pub const DEFAULT_LIST_URL_BASE: &str = "http://twitter.com/";
pub const DEFAULT_HASHTAG_URL_BASE: &str = "http://twitter.com/#!/search?q=%23";

/// Attribute appended to every anchor when no-follow is on
pub const NO_FOLLOW_HTML_ATTRIBUTE: &str = r#" rel="nofollow""#;

// ==================== TYPE DEFINITIONS ====================

/// Immutable rendering options. Obtain one through [`AutolinkConfig::builder`],
/// [`AutolinkConfig::from_json`] or `Default`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutolinkConfig {
    url_class: String,
    list_class: String,
    username_class: String,
    hashtag_class: String,
    username_url_base: String,
    list_url_base: String,
    hashtag_url_base: String,
    no_follow: bool,
    username_include_symbol: bool,
    link_url_without_protocol: bool,
}

/// Mutable staging area for [`AutolinkConfig`]; every field is optional in JSON.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AutolinkConfigBuilder {
    #[serde(default = "default_url_class")]
    url_class: String,
    #[serde(default = "default_list_class")]
    list_class: String,
    #[serde(default = "default_username_class")]
    username_class: String,
    #[serde(default = "default_hashtag_class")]
    hashtag_class: String,
    #[serde(default = "default_username_url_base")]
    username_url_base: String,
    #[serde(default = "default_list_url_base")]
    list_url_base: String,
    #[serde(default = "default_hashtag_url_base")]
    hashtag_url_base: String,
    #[serde(default = "default_true")]
    no_follow: bool,
    #[serde(default)]
    username_include_symbol: bool,
    #[serde(default)]
    link_url_without_protocol: bool,
}

fn default_true() -> bool { true }
fn default_url_class() -> String { DEFAULT_URL_CLASS.to_string() }
fn default_list_class() -> String { DEFAULT_LIST_CLASS.to_string() }
fn default_username_class() -> String { DEFAULT_USERNAME_CLASS.to_string() }
fn default_hashtag_class() -> String { DEFAULT_HASHTAG_CLASS.to_string() }
fn default_username_url_base() -> String { DEFAULT_USERNAME_URL_BASE.to_string() }
fn default_list_url_base() -> String { DEFAULT_LIST_URL_BASE.to_string() }
fn default_hashtag_url_base() -> String { DEFAULT_HASHTAG_URL_BASE.to_string() }

impl Default for AutolinkConfigBuilder {
    fn default() -> Self {
        Self {
            url_class: default_url_class(),
            list_class: default_list_class(),
            username_class: default_username_class(),
            hashtag_class: default_hashtag_class(),
            username_url_base: default_username_url_base(),
            list_url_base: default_list_url_base(),
            hashtag_url_base: default_hashtag_url_base(),
            no_follow: true,
            username_include_symbol: false,
            link_url_without_protocol: false,
        }
    }
}

// ==================== BUILDER ====================

impl AutolinkConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_class(mut self, value: impl Into<String>) -> Self {
        self.url_class = value.into();
        self
    }

    pub fn list_class(mut self, value: impl Into<String>) -> Self {
        self.list_class = value.into();
        self
    }

    pub fn username_class(mut self, value: impl Into<String>) -> Self {
        self.username_class = value.into();
        self
    }

    pub fn hashtag_class(mut self, value: impl Into<String>) -> Self {
        self.hashtag_class = value.into();
        self
    }

    pub fn username_url_base(mut self, value: impl Into<String>) -> Self {
        self.username_url_base = value.into();
        self
    }

    pub fn list_url_base(mut self, value: impl Into<String>) -> Self {
        self.list_url_base = value.into();
        self
    }

    pub fn hashtag_url_base(mut self, value: impl Into<String>) -> Self {
        self.hashtag_url_base = value.into();
        self
    }

    /// Add `rel="nofollow"` to every anchor (on by default)
    pub fn no_follow(mut self, value: bool) -> Self {
        self.no_follow = value;
        self
    }

    /// Put the `@` inside username and list anchors instead of before them
    pub fn username_include_symbol(mut self, value: bool) -> Self {
        self.username_include_symbol = value;
        self
    }

    /// Also link bare hosts such as `www.twitter.com`
    pub fn link_url_without_protocol(mut self, value: bool) -> Self {
        self.link_url_without_protocol = value;
        self
    }

    /// Validate and freeze.
    ///
    /// URL bases must be non-empty; no value may contain `"`, `<` or `>`,
    /// since each one is written verbatim into a double-quoted attribute.
    pub fn build(self) -> Result<AutolinkConfig, ConfigError> {
        let classes = [
            ("urlClass", &self.url_class),
            ("listClass", &self.list_class),
            ("usernameClass", &self.username_class),
            ("hashtagClass", &self.hashtag_class),
        ];
        let bases = [
            ("usernameUrlBase", &self.username_url_base),
            ("listUrlBase", &self.list_url_base),
            ("hashtagUrlBase", &self.hashtag_url_base),
        ];

        for (field, value) in bases {
            if value.is_empty() {
                return Err(ConfigError::EmptyUrlBase { field });
            }
        }
        for (field, value) in classes.into_iter().chain(bases) {
            if value.contains(['"', '<', '>']) {
                return Err(ConfigError::UnsafeAttribute { field, value: value.clone() });
            }
        }

        Ok(AutolinkConfig {
            url_class: self.url_class,
            list_class: self.list_class,
            username_class: self.username_class,
            hashtag_class: self.hashtag_class,
            username_url_base: self.username_url_base,
            list_url_base: self.list_url_base,
            hashtag_url_base: self.hashtag_url_base,
            no_follow: self.no_follow,
            username_include_symbol: self.username_include_symbol,
            link_url_without_protocol: self.link_url_without_protocol,
        })
    }
}

// ==================== CONFIG ====================

impl Default for AutolinkConfig {
    fn default() -> Self {
        let b = AutolinkConfigBuilder::default();
        Self {
            url_class: b.url_class,
            list_class: b.list_class,
            username_class: b.username_class,
            hashtag_class: b.hashtag_class,
            username_url_base: b.username_url_base,
            list_url_base: b.list_url_base,
            hashtag_url_base: b.hashtag_url_base,
            no_follow: b.no_follow,
            username_include_symbol: b.username_include_symbol,
            link_url_without_protocol: b.link_url_without_protocol,
        }
    }
}

impl AutolinkConfig {
    pub fn builder() -> AutolinkConfigBuilder {
        AutolinkConfigBuilder::default()
    }

    /// Parse a camelCase JSON object (missing keys take defaults) and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let builder: AutolinkConfigBuilder = serde_json::from_str(json)?;
        builder.build()
    }

    /// Builder pre-filled with this config, for deriving a variant.
    pub fn to_builder(&self) -> AutolinkConfigBuilder {
        AutolinkConfigBuilder {
            url_class: self.url_class.clone(),
            list_class: self.list_class.clone(),
            username_class: self.username_class.clone(),
            hashtag_class: self.hashtag_class.clone(),
            username_url_base: self.username_url_base.clone(),
            list_url_base: self.list_url_base.clone(),
            hashtag_url_base: self.hashtag_url_base.clone(),
            no_follow: self.no_follow,
            username_include_symbol: self.username_include_symbol,
            link_url_without_protocol: self.link_url_without_protocol,
        }
    }

    pub fn url_class(&self) -> &str {
        &self.url_class
    }

    pub fn list_class(&self) -> &str {
        &self.list_class
    }

    pub fn username_class(&self) -> &str {
        &self.username_class
    }

    pub fn hashtag_class(&self) -> &str {
        &self.hashtag_class
    }

    pub fn username_url_base(&self) -> &str {
        &self.username_url_base
    }

    pub fn list_url_base(&self) -> &str {
        &self.list_url_base
    }

    pub fn hashtag_url_base(&self) -> &str {
        &self.hashtag_url_base
    }

    pub fn no_follow(&self) -> bool {
        self.no_follow
    }

    pub fn username_include_symbol(&self) -> bool {
        self.username_include_symbol
    }

    pub fn link_url_without_protocol(&self) -> bool {
        self.link_url_without_protocol
    }

    /// ` rel="nofollow"` or nothing
    pub(crate) fn rel_attribute(&self) -> &'static str {
        if self.no_follow {
            NO_FOLLOW_HTML_ATTRIBUTE
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AutolinkConfig::default();
        assert_eq!(config.url_class(), "tweet-url");
        assert_eq!(config.list_class(), "list-slug");
        assert_eq!(config.username_class(), "username");
        assert_eq!(config.hashtag_class(), "hashtag");
        assert_eq!(config.username_url_base(), "http://twitter.com/");
        assert_eq!(config.hashtag_url_base(), "http://twitter.com/#!/search?q=%23");
        assert!(config.no_follow());
        assert!(!config.username_include_symbol());
        assert_eq!(AutolinkConfigBuilder::new().build().unwrap(), config);
    }

    #[test]
    fn test_empty_base_rejected() {
        let err = AutolinkConfig::builder().list_url_base("").build().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyUrlBase { field: "listUrlBase" }));
    }

    #[test]
    fn test_attribute_breaking_values_rejected() {
        let err = AutolinkConfig::builder().url_class(r#"a" onclick="x"#).build().unwrap_err();
        assert!(matches!(err, ConfigError::UnsafeAttribute { field: "urlClass", .. }));
        assert!(AutolinkConfig::builder().hashtag_url_base("http://x/<").build().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = AutolinkConfig::from_json(r#"{"noFollow": false, "hashtagClass": "tag"}"#).unwrap();
        assert!(!config.no_follow());
        assert_eq!(config.hashtag_class(), "tag");
        assert_eq!(config.url_class(), "tweet-url");
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(AutolinkConfig::from_json("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            AutolinkConfig::from_json(r#"{"usernameUrlBase": ""}"#),
            Err(ConfigError::EmptyUrlBase { .. })
        ));
    }

    #[test]
    fn test_to_builder_round_trips() {
        let config = AutolinkConfig::builder().username_include_symbol(true).build().unwrap();
        let variant = config.to_builder().no_follow(false).build().unwrap();
        assert!(variant.username_include_symbol());
        assert!(!variant.no_follow());
    }
}
