pub mod chars;
pub mod tld;
pub mod entity;
pub mod mention;
pub mod hashtag;
pub mod url;
pub mod extractor;

#[cfg(test)]
mod tests;

pub use entity::{Entity, EntityKind};
pub use mention::{MentionGrammar, MentionMatch, MAX_USERNAME_LEN};
pub use hashtag::{HashtagGrammar, HashtagMatch};
pub use url::{UrlMatch, UrlScanner};
pub use extractor::*;
