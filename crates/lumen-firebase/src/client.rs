// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Realtime Database REST API.
//!
//! [`RestClient`] builds `<base>/<path>.json` URLs, attaches the `auth`
//! query parameter, enforces the request timeout and retries transient
//! errors.

use lumen_config::validation;
use lumen_core::{DbPath, LumenError};
use reqwest::{Method, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, RequestPolicy};

/// HTTP client bound to one database URL.
#[derive(Debug)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Option<SecretString>,
    policy: RequestPolicy,
}

impl RestClient {
    /// Creates a client for the database at `base_url`.
    ///
    /// Fails with [`LumenError::Config`] when the URL is not an http(s) URL
    /// or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        auth_token: Option<SecretString>,
        policy: RequestPolicy,
    ) -> Result<Self, LumenError> {
        let base_url = parse_base_url(base_url)?;

        let client = reqwest::Client::builder()
            .timeout(policy.timeout)
            .build()
            .map_err(|e| LumenError::Remote {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            auth_token,
            policy,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the REST URL for `path` (the root when `None`).
    pub fn url_for(&self, path: Option<&DbPath>) -> Url {
        let mut url = self.base_url.clone();
        // `parse_base_url` rejects URLs that cannot be a base.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            match path.and_then(|p| p.segments().split_last()) {
                Some((last, parents)) => {
                    segments.extend(parents);
                    segments.push(&format!("{last}.json"));
                }
                None => {
                    segments.push(".json");
                }
            }
        }
        if let Some(token) = &self.auth_token {
            url.query_pairs_mut()
                .append_pair("auth", token.expose_secret());
        }
        url
    }

    /// Replaces the value at `path` with `json`.
    pub async fn put_json(&self, path: &DbPath, json: String) -> Result<(), LumenError> {
        let url = self.url_for(Some(path));
        self.send(Method::PUT, url, Some(json)).await?;
        Ok(())
    }

    /// Reads the raw JSON at `path`. Absent values come back as `null`.
    pub async fn get_json(&self, path: &DbPath) -> Result<String, LumenError> {
        let url = self.url_for(Some(path));
        self.send(Method::GET, url, None).await
    }

    /// Issues a shallow GET against `path` and returns the status code.
    ///
    /// Transport failures are returned as errors; no retries are made.
    pub async fn probe(&self, path: Option<&DbPath>) -> Result<StatusCode, reqwest::Error> {
        let mut url = self.url_for(path);
        url.query_pairs_mut().append_pair("shallow", "true");
        let response = self.client.get(url).send().await?;
        Ok(response.status())
    }

    /// Sends a request, retrying transient statuses per the request policy.
    ///
    /// Returns the response body on success.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> Result<String, LumenError> {
        let mut last_error = None;

        for attempt in 0..=self.policy.max_retries {
            if attempt > 0 {
                warn!(attempt, %method, "retrying request after transient error");
                tokio::time::sleep(self.policy.retry_delay).await;
            }

            let mut request = self.client.request(method.clone(), url.clone());
            if let Some(body) = &body {
                request = request
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            let response = request.send().await.map_err(|e| self.transport_error(e))?;

            let status = response.status();
            debug!(status = %status, attempt, %method, "database response received");

            if status.is_success() {
                return response.text().await.map_err(|e| self.transport_error(e));
            }

            let text = response.text().await.unwrap_or_default();
            let error = LumenError::Remote {
                message: describe_failure(status, &text),
                source: None,
            };

            if is_transient_error(status) && attempt < self.policy.max_retries {
                warn!(status = %status, "transient error, will retry");
                last_error = Some(error);
                continue;
            }

            return Err(error);
        }

        Err(last_error.unwrap_or_else(|| LumenError::Remote {
            message: "request failed after retries".into(),
            source: None,
        }))
    }

    fn transport_error(&self, e: reqwest::Error) -> LumenError {
        if e.is_timeout() {
            LumenError::Timeout {
                duration: self.policy.timeout,
            }
        } else {
            LumenError::Remote {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

/// Parses and checks the database base URL.
pub fn parse_base_url(raw: &str) -> Result<Url, LumenError> {
    validation::parse_database_url(raw)
        .map_err(|reason| LumenError::Config(format!("database URL `{raw}` {reason}")))
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!("database returned {status}: {}", api_err.error),
        Err(_) if body.is_empty() => format!("database returned {status}"),
        Err(_) => format!("database returned {status}: {body}"),
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_policy() -> RequestPolicy {
        RequestPolicy {
            timeout: Duration::from_secs(5),
            max_retries: 1,
            retry_delay: Duration::from_millis(10),
        }
    }

    fn test_client(base_url: &str) -> RestClient {
        RestClient::new(base_url, None, fast_policy()).unwrap()
    }

    fn db_path(raw: &str) -> DbPath {
        DbPath::parse(raw).unwrap()
    }

    #[test]
    fn url_for_child_path_ends_in_json() {
        let client = test_client("https://demo-default-rtdb.firebaseio.com");
        let url = client.url_for(Some(&db_path("players/testUser")));
        assert_eq!(
            url.as_str(),
            "https://demo-default-rtdb.firebaseio.com/players/testUser.json"
        );
    }

    #[test]
    fn url_for_root_and_trailing_slash_base() {
        let client = test_client("https://demo.firebaseio.com/");
        assert_eq!(client.url_for(None).as_str(), "https://demo.firebaseio.com/.json");
        let url = client.url_for(Some(&db_path("scores")));
        assert_eq!(url.as_str(), "https://demo.firebaseio.com/scores.json");
    }

    #[test]
    fn url_carries_auth_token() {
        let client = RestClient::new(
            "https://demo.firebaseio.com",
            Some(SecretString::from("tok-1".to_string())),
            fast_policy(),
        )
        .unwrap();
        let url = client.url_for(Some(&db_path("players")));
        assert_eq!(url.as_str(), "https://demo.firebaseio.com/players.json?auth=tok-1");
    }

    #[test]
    fn debug_output_hides_auth_token() {
        let client = RestClient::new(
            "https://demo.firebaseio.com",
            Some(SecretString::from("tok-hidden".to_string())),
            fast_policy(),
        )
        .unwrap();
        assert!(!format!("{client:?}").contains("tok-hidden"));
    }

    #[test]
    fn rejects_non_http_base_urls() {
        for raw in ["ftp://demo.firebaseio.com", "not a url", "mailto:me@example.com"] {
            let err = RestClient::new(raw, None, fast_policy()).unwrap_err();
            assert!(matches!(err, LumenError::Config(_)), "{raw}: {err}");
        }
    }

    #[tokio::test]
    async fn put_sends_raw_json_body() {
        let server = MockServer::start().await;
        let body = r#"{"playerName":"TestPlayer","score":100,"playTime":45.5}"#;

        Mock::given(method("PUT"))
            .and(path("/players/testUser.json"))
            .and(header("content-type", "application/json"))
            .and(body_string(body))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client
            .put_json(&db_path("players/testUser"), body.to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn get_returns_null_for_absent_value() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/players/unknownUser.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let raw = client.get_json(&db_path("players/unknownUser")).await.unwrap();
        assert_eq!(raw, "null");
    }

    #[tokio::test]
    async fn get_retries_on_503() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/scores.json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/scores.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("42"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.get_json(&db_path("scores")).await.unwrap(), "42");
    }

    #[tokio::test]
    async fn get_exhausts_retries_on_500() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/scores.json"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "boom"})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_json(&db_path("scores")).await.unwrap_err();
        assert!(err.to_string().contains("boom"), "got: {err}");
    }

    #[tokio::test]
    async fn permission_denied_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/locked.json"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "Permission denied"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .put_json(&db_path("locked"), "1".into())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Permission denied"), "got: {err}");
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow.json"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let policy = RequestPolicy {
            timeout: Duration::from_millis(100),
            ..fast_policy()
        };
        let client = RestClient::new(&server.uri(), None, policy).unwrap();
        let err = client.get_json(&db_path("slow")).await.unwrap_err();
        assert!(matches!(err, LumenError::Timeout { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn stalled_body_times_out() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Sends the headers promptly, then stops before the body is complete.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 64\r\n\r\n{\"score\":")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let policy = RequestPolicy {
            timeout: Duration::from_millis(200),
            ..fast_policy()
        };
        let client = RestClient::new(&format!("http://{addr}"), None, policy).unwrap();
        let err = client.get_json(&db_path("scores")).await.unwrap_err();
        assert!(matches!(err, LumenError::Timeout { .. }), "got: {err}");
    }

    #[test]
    fn base_url_rules_match_config_validation() {
        for raw in ["https://host:notaport", "http://[::1", "https://"] {
            assert!(parse_base_url(raw).is_err(), "{raw}");
            assert!(validation::parse_database_url(raw).is_err(), "{raw}");
        }
        assert!(parse_base_url("https://demo.firebaseio.com").is_ok());
    }

    #[tokio::test]
    async fn probe_requests_shallow_root() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/.json"))
            .and(query_param("shallow", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.probe(None).await.unwrap(), StatusCode::OK);
    }
}
