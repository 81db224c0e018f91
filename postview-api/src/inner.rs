use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use tracing::debug;

use crate::error::Error;
use crate::model::{Comment, Post};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can hand out posts and their comments.
///
/// [`API`] is the HTTP implementation; the screen controller only sees this trait.
pub trait PostSource {
    fn get_posts(&self) -> impl Future<Output = Result<Vec<Post>, Error>> + Send;

    fn get_comments(&self, post_id: u64)
        -> impl Future<Output = Result<Vec<Comment>, Error>> + Send;
}

#[derive(Clone, Debug)]
pub struct API {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Default for API {
    fn default() -> Self {
        Self::new()
    }
}

impl API {
    pub fn new() -> Self {
        API {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a client for any host serving the same `/posts` layout.
    ///
    /// Example: https://jsonplaceholder.typicode.com, http://127.0.0.1:3000
    pub fn try_with_base_url(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        if url.cannot_be_a_base() {
            anyhow::bail!("{base_url} cannot be used as a base url");
        }
        let client = reqwest::Client::builder().build()?;
        Ok(API {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>, Error> {
        let url = format!("{}/posts", self.base_url);
        self.get_json(url).await
    }

    pub async fn get_comments(&self, post_id: u64) -> Result<Vec<Comment>, Error> {
        let url = format!("{}/posts/{}/comments", self.base_url, post_id);
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, Error> {
        debug!("GET {url}");
        let fut = async {
            let resp = self.client.get(&url).send().await?;
            let status = resp.status();
            let bytes = resp.bytes().await?;
            Ok::<_, reqwest::Error>((status, bytes))
        };

        let result = timeout(self.timeout, fut).await;
        let (status, bytes) = match result {
            Ok(Ok(resp)) => resp,
            Ok(Err(source)) => return Err(Error::Transport { url, source }),
            Err(_) => {
                return Err(Error::Timeout {
                    url,
                    after: self.timeout,
                })
            }
        };

        if !status.is_success() {
            return Err(Error::Status { url, status });
        }

        serde_json::from_slice(&bytes).map_err(|source| Error::Decode { url, source })
    }
}

impl PostSource for API {
    async fn get_posts(&self) -> Result<Vec<Post>, Error> {
        API::get_posts(self).await
    }

    async fn get_comments(&self, post_id: u64) -> Result<Vec<Comment>, Error> {
        API::get_comments(self, post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let api = API::try_with_base_url("http://127.0.0.1:3000/").unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:3000");
        assert_eq!(api.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn rejects_garbage_base_url() {
        assert!(API::try_with_base_url("not a url").is_err());
        assert!(API::try_with_base_url("mailto:someone@example.com").is_err());
    }
}
