

use async_trait::async_trait;
use strum::{Display, IntoStaticStr};
use thiserror::Error;


#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Request signing failed: {0}")]
    Signing(String),
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceClass {
    Posts,
    Likes,
}

/// Sub-classification of an item that selects the matching action flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    Tweet,
    #[strum(serialize = "retweet")]
    Repost,
    Like,
}

impl Variant {
    /// Past-tense label used in progress lines.
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::Tweet => "tweeted",
            Self::Repost => "retweeted",
            Self::Like => "liked",
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub is_repost: bool,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_repost: false,
        }
    }


    pub fn repost(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_repost: true,
        }
    }


    pub fn classify(&self, class: ResourceClass) -> Variant {
        match class {
            ResourceClass::Posts if self.is_repost => Variant::Repost,
            ResourceClass::Posts => Variant::Tweet,
            ResourceClass::Likes => Variant::Like,
        }
    }
}

/// Remote timeline operations the drain loop depends on.
///
/// Listing never takes a cursor: every call returns the current head of the
/// collection. Implementations must guarantee that an item whose delete call
/// succeeded does not show up again in a later page for the same query.
#[async_trait]
pub trait TimelineClient: Send + Sync {

    async fn list_posts(&self, subject: &str, count: usize) -> Result<Vec<Item>, ClientError>;


    async fn list_likes(&self, subject: &str, count: usize) -> Result<Vec<Item>, ClientError>;


    async fn delete_post(&self, id: &str) -> Result<(), ClientError>;


    async fn delete_repost(&self, id: &str) -> Result<(), ClientError>;


    async fn delete_like(&self, id: &str) -> Result<(), ClientError>;


    async fn list_page(
        &self,
        class: ResourceClass,
        subject: &str,
        count: usize,
    ) -> Result<Vec<Item>, ClientError> {
        match class {
            ResourceClass::Posts => self.list_posts(subject, count).await,
            ResourceClass::Likes => self.list_likes(subject, count).await,
        }
    }


    async fn delete_item(&self, id: &str, variant: Variant) -> Result<(), ClientError> {
        match variant {
            Variant::Tweet => self.delete_post(id).await,
            Variant::Repost => self.delete_repost(id).await,
            Variant::Like => self.delete_like(id).await,
        }
    }
}
