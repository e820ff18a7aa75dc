

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use strum::{Display, EnumString, IntoStaticStr};
use tracing::{debug, info};

use super::error::{Result, WipeError};
use crate::client::Variant;
use crate::utils::redact;
use crate::{DEFAULT_API_BASE_URL, DEFAULT_DELAY_SECS, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};


const ENV_PREFIX: &str = "TWITTER_WIPE";


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionFlags {
    pub delete_posts: bool,
    pub delete_reposts: bool,
    pub delete_likes: bool,
}

impl ActionFlags {
    pub fn new(delete_posts: bool, delete_reposts: bool, delete_likes: bool) -> Self {
        Self {
            delete_posts,
            delete_reposts,
            delete_likes,
        }
    }

    /// Whether an item of this variant should be deleted.
    pub fn allows(&self, variant: Variant) -> bool {
        match variant {
            Variant::Tweet => self.delete_posts,
            Variant::Repost => self.delete_reposts,
            Variant::Like => self.delete_likes,
        }
    }


    pub fn wants_posts(&self) -> bool {
        self.delete_posts || self.delete_reposts
    }


    pub fn wants_likes(&self) -> bool {
        self.delete_likes
    }
}

/// What the drain loop does when a single delete call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeleteErrorPolicy {
    #[default]
    Continue,
    Abort,
}


#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &redact(&self.consumer_key))
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("access_token", &redact(&self.access_token))
            .field("access_secret", &redact(&self.access_secret))
            .finish()
    }
}


#[derive(Debug, Clone)]
pub struct WipeConfig {
    pub username: String,
    pub credentials: Credentials,
    pub actions: ActionFlags,
    pub page_size: usize,
    pub delay: Duration,
    pub delete_error_policy: DeleteErrorPolicy,
    pub stop_when_stalled: bool,
    pub api_base_url: String,
}

impl WipeConfig {

    pub fn new(username: impl Into<String>, credentials: Credentials, actions: ActionFlags) -> Self {
        Self {
            username: username.into(),
            credentials,
            actions,
            page_size: DEFAULT_PAGE_SIZE,
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
            delete_error_policy: DeleteErrorPolicy::default(),
            stop_when_stalled: true,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Loads the JSON file at `path`, then applies `TWITTER_WIPE_*` environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| WipeError::config(format!("Config path is not valid UTF-8: {}", path.display())))?;

        info!("Loading configuration from {}", path.display());
        let builder = Config::builder().add_source(File::new(path_str, FileFormat::Json));
        Self::from_builder(apply_env_overrides(builder)?)
    }


    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_builder(Config::builder().add_source(File::from_str(json, FileFormat::Json)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let raw: RawConfig = builder.build()?.try_deserialize()?;
        raw.validate()
    }
}


fn apply_env_overrides(mut builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>> {
    for (key, env_suffix) in KNOWN_KEYS {
        let var = format!("{ENV_PREFIX}_{env_suffix}");
        if let Ok(value) = std::env::var(&var) {
            debug!("Overriding {} from {}", key, var);
            builder = builder.set_override(*key, value)?;
        }
    }
    Ok(builder)
}


const KNOWN_KEYS: &[(&str, &str)] = &[
    ("Username", "USERNAME"),
    ("ConsumerKey", "CONSUMER_KEY"),
    ("ConsumerSecret", "CONSUMER_SECRET"),
    ("AccessToken", "ACCESS_TOKEN"),
    ("AccessSecret", "ACCESS_SECRET"),
    ("DeleteTweets", "DELETE_TWEETS"),
    ("DeleteRetweets", "DELETE_RETWEETS"),
    ("DeleteLikes", "DELETE_LIKES"),
    ("PageSize", "PAGE_SIZE"),
    ("DelaySecs", "DELAY_SECS"),
    ("OnDeleteError", "ON_DELETE_ERROR"),
    ("StopWhenStalled", "STOP_WHEN_STALLED"),
    ("ApiBaseUrl", "API_BASE_URL"),
];

// Lowercase aliases cover config backends that normalise key case.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(rename = "Username", alias = "username")]
    username: Option<String>,
    #[serde(rename = "ConsumerKey", alias = "consumerkey")]
    consumer_key: Option<String>,
    #[serde(rename = "ConsumerSecret", alias = "consumersecret")]
    consumer_secret: Option<String>,
    #[serde(rename = "AccessToken", alias = "accesstoken")]
    access_token: Option<String>,
    #[serde(rename = "AccessSecret", alias = "accesssecret")]
    access_secret: Option<String>,
    #[serde(rename = "DeleteTweets", alias = "deletetweets")]
    delete_tweets: Option<bool>,
    #[serde(rename = "DeleteRetweets", alias = "deleteretweets")]
    delete_retweets: Option<bool>,
    #[serde(rename = "DeleteLikes", alias = "deletelikes")]
    delete_likes: Option<bool>,

    #[serde(rename = "PageSize", alias = "pagesize")]
    page_size: Option<usize>,
    #[serde(rename = "DelaySecs", alias = "delaysecs")]
    delay_secs: Option<u64>,
    #[serde(rename = "OnDeleteError", alias = "ondeleteerror")]
    on_delete_error: Option<String>,
    #[serde(rename = "StopWhenStalled", alias = "stopwhenstalled")]
    stop_when_stalled: Option<bool>,
    #[serde(rename = "ApiBaseUrl", alias = "apibaseurl")]
    api_base_url: Option<String>,
}

impl RawConfig {
    fn missing_fields(&self) -> Vec<&'static str> {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        let checks = [
            ("Username", present(&self.username)),
            ("ConsumerKey", present(&self.consumer_key)),
            ("ConsumerSecret", present(&self.consumer_secret)),
            ("AccessToken", present(&self.access_token)),
            ("AccessSecret", present(&self.access_secret)),
            ("DeleteTweets", self.delete_tweets.is_some()),
            ("DeleteRetweets", self.delete_retweets.is_some()),
            ("DeleteLikes", self.delete_likes.is_some()),
        ];

        checks
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| name)
            .collect()
    }

    fn validate(self) -> Result<WipeConfig> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(WipeError::config(format!(
                "Required JSON value was not defined: {}",
                missing.join(", ")
            )));
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(WipeError::config(format!(
                "PageSize must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        let delete_error_policy = match self.on_delete_error.as_deref() {
            Some(value) => DeleteErrorPolicy::from_str(value.trim()).map_err(|_| {
                WipeError::config(format!(
                    "OnDeleteError must be 'continue' or 'abort', got '{value}'"
                ))
            })?,
            None => DeleteErrorPolicy::default(),
        };

        // All required fields were checked above.
        let (Some(username), Some(consumer_key), Some(consumer_secret), Some(access_token), Some(access_secret)) = (
            self.username,
            self.consumer_key,
            self.consumer_secret,
            self.access_token,
            self.access_secret,
        ) else {
            return Err(WipeError::config("Credentials are incomplete"));
        };

        let actions = ActionFlags::new(
            self.delete_tweets.unwrap_or_default(),
            self.delete_retweets.unwrap_or_default(),
            self.delete_likes.unwrap_or_default(),
        );

        Ok(WipeConfig {
            username: username.trim().trim_start_matches('@').to_string(),
            credentials: Credentials::new(consumer_key, consumer_secret, access_token, access_secret),
            actions,
            page_size,
            delay: Duration::from_secs(self.delay_secs.unwrap_or(DEFAULT_DELAY_SECS)),
            delete_error_policy,
            stop_when_stalled: self.stop_when_stalled.unwrap_or(true),
            api_base_url: self
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
