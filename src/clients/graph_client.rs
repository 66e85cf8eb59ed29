use crate::errors::GraphError;
use crate::types::graph::{Account, FollowingPage};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

const DEFAULT_RETRY_COUNT: u32 = 3;
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

const ACCOUNT_FIELDS: &str = "id,username,name,is_verified";

/// Capability interface over the remote follow graph.
///
/// The analyzer depends only on this trait; the concrete transport (HTTP,
/// mock) is supplied by the caller.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Resolve a handle to its account record. `NotFound` if the handle is
    /// unknown to the platform.
    async fn resolve_account(&self, handle: &str) -> Result<Account, GraphError>;

    /// The complete following list of an account, all pages aggregated.
    async fn list_following(&self, account_id: &str) -> Result<Vec<Account>, GraphError>;
}

#[derive(Debug)]
pub struct HttpGraphClient {
    base_url: String,
    token: String,
    client: Client,
    retry_count: u32,
    timeout: Duration,
}

impl HttpGraphClient {
    pub fn new(base_url: String, token: String) -> Self {
        HttpGraphClient {
            base_url,
            token,
            client: Client::new(),
            retry_count: DEFAULT_RETRY_COUNT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Override the retry budget for transient failures.
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// GET `url` and decode the body, retrying transient failures with
    /// exponential backoff.
    ///
    /// 401 and 404 return immediately: retrying a bad token or a missing
    /// resource cannot succeed. 429, 5xx, timeouts, connection failures and
    /// malformed bodies are retried up to `retry_count` attempts, then the
    /// last error is surfaced.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GraphError> {
        let mut last_error: Option<GraphError> = None;
        let mut wait_time = Duration::from_secs(1);

        for attempt in 0..self.retry_count {
            if attempt > 0 {
                debug!("retrying request (attempt {}): {}", attempt + 1, url);
                sleep(wait_time).await;
                wait_time *= 2;
            }

            let response_result = self
                .client
                .get(url)
                .query(&[("access_token", self.token.as_str())])
                .header(header::ACCEPT, "application/json")
                .timeout(self.timeout)
                .send()
                .await;

            match response_result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.text().await {
                            Ok(body) => match serde_json::from_str::<T>(&body) {
                                Ok(data) => return Ok(data),
                                Err(e) => last_error = Some(GraphError::Parse(e)),
                            },
                            Err(e) => last_error = Some(GraphError::Network(e)),
                        }
                    } else {
                        match status {
                            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                                return Err(GraphError::Auth)
                            }
                            StatusCode::NOT_FOUND => {
                                return Err(GraphError::Server { status_code: 404 })
                            }
                            StatusCode::TOO_MANY_REQUESTS => {
                                last_error = Some(GraphError::RateLimited)
                            }
                            s => last_error = Some(GraphError::Server {
                                status_code: s.as_u16(),
                            }),
                        }
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(GraphError::Timeout);
                    } else {
                        last_error = Some(GraphError::Network(e));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            GraphError::UnexpectedResponse(
                "request failed after multiple retries without a specific error".to_string(),
            )
        }))
    }
}

#[async_trait]
impl GraphApi for HttpGraphClient {
    async fn resolve_account(&self, handle: &str) -> Result<Account, GraphError> {
        let url = format!("{}/{}?fields={}", self.base_url, handle, ACCOUNT_FIELDS);

        match self.get_json::<Account>(&url).await {
            // A 404 on resolution means the handle itself is unknown.
            Err(GraphError::Server { status_code: 404 }) => Err(GraphError::NotFound {
                handle: handle.to_string(),
            }),
            other => other,
        }
    }

    async fn list_following(&self, account_id: &str) -> Result<Vec<Account>, GraphError> {
        let mut accounts = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut url = format!(
                "{}/{}/following?fields={}",
                self.base_url, account_id, ACCOUNT_FIELDS
            );
            if let Some(cursor) = &after {
                url.push_str("&after=");
                url.push_str(cursor);
            }

            let page: FollowingPage = self.get_json(&url).await?;
            let empty_page = page.data.is_empty();
            after = page.after_cursor().map(String::from);
            accounts.extend(page.data);

            // An empty page with a cursor would loop forever on a quirky
            // server; treat it as the end of the list.
            if after.is_none() || empty_page {
                break;
            }
        }

        debug!("account {} follows {} accounts", account_id, accounts.len());
        Ok(accounts)
    }
}
