// WordPress client: a small blocking HTTP client that creates one draft
// post through the REST API. It is intentionally synchronous, and it does
// not judge the response; mapping status codes to messages is the job of
// the `report` module.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Path appended to the site's base URL.
pub const POSTS_PATH: &str = "/wp-json/wp/v2/posts";

/// Publication status sent with every post. Posts are never published
/// directly.
pub const DRAFT_STATUS: &str = "draft";

/// Category and tag IDs attached to the post. Defaults are `[1]` and
/// `[2, 3]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Taxonomy {
            categories: vec![1],
            tags: vec![2, 3],
        }
    }
}

/// JSON body for the post-creation endpoint.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    status: &'static str,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
}

impl PostDraft {
    /// Build a draft. `content` is taken as-is; the status is always
    /// `draft` and the taxonomy comes only from `taxonomy`.
    pub fn new(title: impl Into<String>, content: impl Into<String>, taxonomy: &Taxonomy) -> Self {
        PostDraft {
            title: title.into(),
            content: content.into(),
            status: DRAFT_STATUS,
            categories: taxonomy.categories.clone(),
            tags: taxonomy.tags.clone(),
        }
    }

    pub fn status(&self) -> &str {
        self.status
    }
}

/// Status code and body of the post-creation response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResult {
    pub status: u16,
    /// Parsed body, when the server sent valid JSON.
    pub body: Option<serde_json::Value>,
    /// Body text exactly as received.
    pub raw: String,
}

impl HttpResult {
    pub fn new(status: u16, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let body = serde_json::from_str(&raw).ok();
        HttpResult { status, body, raw }
    }
}

/// Only transport problems are errors here. Any HTTP status, including
/// 4xx and 5xx, is a successful `HttpResult`.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to reach WordPress: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid WordPress API key: {0}")]
    InvalidKey(#[source] reqwest::header::InvalidHeaderValue),
}

/// Anything that can submit a draft and hand back the raw response.
pub trait PostPublisher {
    fn publish(&self, draft: &PostDraft) -> Result<HttpResult, PublishError>;
}

/// Holds a reqwest blocking client, the site's base URL and the bearer
/// token used on every request.
pub struct WordPressClient {
    client: Client,
    base_url: String,
    token: String,
}

impl WordPressClient {
    /// Proxy settings from the environment are ignored.
    pub fn new(base_url: &str, token: &str) -> Result<Self, PublishError> {
        let client = Client::builder().no_proxy().build()?;
        Ok(Self::from_client(client, base_url, token))
    }

    /// Use an already configured reqwest client.
    pub fn from_client(client: Client, base_url: &str, token: &str) -> Self {
        WordPressClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Full URL of the post-creation endpoint.
    pub fn posts_url(&self) -> String {
        format!("{}{}", self.base_url, POSTS_PATH)
    }

    fn auth_headers(&self) -> Result<HeaderMap, PublishError> {
        let mut headers = HeaderMap::new();
        let mut val = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(PublishError::InvalidKey)?;
        val.set_sensitive(true);
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }
}

impl PostPublisher for WordPressClient {
    /// POST the draft once. `.json()` also sets `Content-Type: application/json`.
    fn publish(&self, draft: &PostDraft) -> Result<HttpResult, PublishError> {
        let url = self.posts_url();
        debug!(%url, title = %draft.title, "creating post");
        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(draft)
            .send()?;
        let status = res.status().as_u16();
        let txt = res.text()?;
        info!(status, "post endpoint responded");
        Ok(HttpResult::new(status, txt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_payload_matches_wire_shape() {
        let draft = PostDraft::new("My First Post", "Hello world blog content", &Taxonomy::default());
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "title": "My First Post",
                "content": "Hello world blog content",
                "status": "draft",
                "categories": [1],
                "tags": [2, 3]
            })
        );
    }

    #[test]
    fn status_is_draft_whatever_the_input() {
        for title in ["publish", "status: publish", ""] {
            let draft = PostDraft::new(title, "publish", &Taxonomy::default());
            assert_eq!(draft.status(), "draft");
        }
    }

    #[test]
    fn title_and_content_cannot_touch_taxonomy() {
        let draft = PostDraft::new(
            r#"{"categories":[9]}"#,
            r#"", "tags": [42], ""#,
            &Taxonomy::default(),
        );
        assert_eq!(draft.categories, vec![1]);
        assert_eq!(draft.tags, vec![2, 3]);
    }

    #[test]
    fn custom_taxonomy_is_used() {
        let taxonomy = Taxonomy {
            categories: vec![7],
            tags: vec![],
        };
        let value = serde_json::to_value(PostDraft::new("t", "c", &taxonomy)).unwrap();
        assert_eq!(value["categories"], json!([7]));
        assert_eq!(value["tags"], json!([]));
    }

    #[test]
    fn posts_url_appends_rest_path() {
        let client = WordPressClient::new("https://blog.example/", "k").unwrap();
        assert_eq!(client.posts_url(), "https://blog.example/wp-json/wp/v2/posts");
        let client = WordPressClient::new("https://blog.example", "k").unwrap();
        assert_eq!(client.posts_url(), "https://blog.example/wp-json/wp/v2/posts");
    }

    #[test]
    fn http_result_keeps_raw_text_when_not_json() {
        let res = HttpResult::new(502, "<html>bad gateway</html>");
        assert!(res.body.is_none());
        assert_eq!(res.raw, "<html>bad gateway</html>");

        let res = HttpResult::new(400, r#"{"message":"invalid title"}"#);
        assert_eq!(res.body, Some(json!({"message": "invalid title"})));
    }
}
