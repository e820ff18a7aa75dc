

pub mod base;
pub mod oauth;
pub mod twitter;

pub use base::{ClientError, Item, ResourceClass, TimelineClient, Variant};
pub use oauth::OAuthSigner;
pub use twitter::TwitterClient;
