

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::base::{ClientError, Item, TimelineClient};
use super::oauth::{OAuthSigner, encode};
use crate::DEFAULT_HTTP_TIMEOUT_SECS;
use crate::core::config::{Credentials, WipeConfig};
use crate::utils::safe_truncate_ellipsis;


const MAX_ERROR_BODY_CHARS: usize = 300;


#[derive(Debug, Deserialize)]
struct TweetPayload {
    id_str: String,
    #[serde(default)]
    retweeted: bool,
    #[serde(default)]
    retweeted_status: Option<serde_json::Value>,
}

impl From<TweetPayload> for Item {
    fn from(tweet: TweetPayload) -> Self {
        Self {
            id: tweet.id_str,
            is_repost: tweet.retweeted || tweet.retweeted_status.is_some(),
        }
    }
}

/// Twitter v1.1 REST client signed with the account's OAuth 1.0a user credentials.
pub struct TwitterClient {
    base_url: String,
    signer: OAuthSigner,
    http: Client,
}

impl TwitterClient {

    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()?;

        info!("Twitter client initialized (url={})", base_url);
        Ok(Self {
            base_url,
            signer: OAuthSigner::new(credentials),
            http,
        })
    }


    pub fn from_config(config: &WipeConfig) -> Result<Self, ClientError> {
        Self::new(config.api_base_url.clone(), config.credentials.clone())
    }


    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    async fn get_items(&self, path: &str, params: Vec<(String, String)>) -> Result<Vec<Item>, ClientError> {
        let url = self.endpoint(path)?;
        let auth = self.signer.authorization_header("GET", &url, &params)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .query(&params)
            .header(AUTHORIZATION, auth)
            .send()
            .await?;

        let tweets: Vec<TweetPayload> = check_status(response).await?.json().await?;
        Ok(tweets.into_iter().map(Item::from).collect())
    }

    async fn post(&self, path: &str, params: Vec<(String, String)>) -> Result<(), ClientError> {
        let url = self.endpoint(path)?;
        let auth = self.signer.authorization_header("POST", &url, &params)?;
        debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .query(&params)
            .header(AUTHORIZATION, auth)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}


async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        body: safe_truncate_ellipsis(&body, MAX_ERROR_BODY_CHARS),
    })
}


fn trim_user() -> (String, String) {
    ("trim_user".to_string(), "true".to_string())
}

#[async_trait]
impl TimelineClient for TwitterClient {
    async fn list_posts(&self, subject: &str, count: usize) -> Result<Vec<Item>, ClientError> {
        self.get_items(
            "statuses/user_timeline.json",
            vec![
                ("screen_name".to_string(), subject.to_string()),
                ("count".to_string(), count.to_string()),
                trim_user(),
                ("include_rts".to_string(), "true".to_string()),
            ],
        )
        .await
    }

    async fn list_likes(&self, subject: &str, count: usize) -> Result<Vec<Item>, ClientError> {
        self.get_items(
            "favorites/list.json",
            vec![
                ("screen_name".to_string(), subject.to_string()),
                ("count".to_string(), count.to_string()),
            ],
        )
        .await
    }

    async fn delete_post(&self, id: &str) -> Result<(), ClientError> {
        self.post(&format!("statuses/destroy/{}.json", encode(id)), vec![trim_user()])
            .await
    }

    async fn delete_repost(&self, id: &str) -> Result<(), ClientError> {
        self.post(&format!("statuses/unretweet/{}.json", encode(id)), vec![trim_user()])
            .await
    }

    async fn delete_like(&self, id: &str) -> Result<(), ClientError> {
        self.post(
            "favorites/destroy.json",
            vec![("id".to_string(), id.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::assert_err;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        Credentials::new("ck", "cs", "at", "as")
    }

    async fn client_for(server: &MockServer) -> TwitterClient {
        TwitterClient::new(format!("{}/1.1/", server.uri()), credentials()).unwrap()
    }

    #[tokio::test]
    async fn test_list_posts_classifies_retweets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1.1/statuses/user_timeline.json"))
            .and(query_param("screen_name", "jack"))
            .and(query_param("count", "20"))
            .and(query_param("trim_user", "true"))
            .and(query_param("include_rts", "true"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 3, "id_str": "3", "retweeted": false, "text": "hello"},
                {"id": 2, "id_str": "2", "retweeted": true},
                {"id": 1, "id_str": "1", "retweeted_status": {"id_str": "99"}}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server).await.list_posts("jack", 20).await.unwrap();
        assert_eq!(items, vec![Item::new("3"), Item::repost("2"), Item::repost("1")]);
    }

    #[tokio::test]
    async fn test_list_likes_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1.1/favorites/list.json"))
            .and(query_param("screen_name", "jack"))
            .and(query_param("count", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server).await.list_likes("jack", 5).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_delete_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1.1/statuses/destroy/10.json"))
            .and(query_param("trim_user", "true"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id_str": "10"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/1.1/statuses/unretweet/11.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id_str": "11"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/1.1/favorites/destroy.json"))
            .and(query_param("id", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id_str": "12"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.delete_post("10").await.unwrap();
        client.delete_repost("11").await.unwrap();
        client.delete_like("12").await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1.1/statuses/user_timeline.json"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"errors":[{"code":32,"message":"Could not authenticate you."}]}"#),
            )
            .mount(&server)
            .await;

        let err = assert_err!(client_for(&server).await.list_posts("jack", 20).await);
        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Could not authenticate"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TwitterClient::new("https://api.twitter.com/1.1/", credentials()).unwrap();
        assert_eq!(client.base_url(), "https://api.twitter.com/1.1");
    }
}
