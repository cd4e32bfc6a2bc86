//! Transport boundary for all HTTP I/O.
//!
//! Provider clients never talk to reqwest directly: they build an
//! [`HttpRequest`], hand it to an [`HttpTransport`], and interpret the
//! [`HttpResponse`]. Tests swap in the in-memory `MockTransport`.

use async_trait::async_trait;
use thiserror::Error;

/// Methods the Gitee API surface needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Request headers as ordered name/value pairs.
pub type HttpHeaders = Vec<(String, String)>;

/// A fully built request: absolute URL with query, headers and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

/// Status and body of a completed exchange.
///
/// Response headers are not surfaced; nothing in the Gitee mapping reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, for error messages.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("http transport error: {0}")]
    Transport(String),

    #[error("no mock response registered for {method} {url}")]
    NoMockResponse { method: String, url: String },
}

/// Sends one request and returns whatever status came back.
///
/// Implementations report only failures to complete the exchange; non-2xx
/// statuses are returned as ordinary responses.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Replace the value of an `access_token` query parameter with `***`.
///
/// Used before a URL reaches a log line.
#[must_use]
pub fn redact_token(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let redacted: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("access_token", _)) => "access_token=***".to_string(),
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", base, redacted.join("&"))
}

#[cfg(feature = "gitee")]
pub mod reqwest_transport {
    use std::time::Duration;

    use super::{HttpError, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
    use async_trait::async_trait;

    impl From<HttpMethod> for reqwest::Method {
        fn from(method: HttpMethod) -> Self {
            match method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Patch => reqwest::Method::PATCH,
                HttpMethod::Delete => reqwest::Method::DELETE,
            }
        }
    }

    fn transport_error(e: reqwest::Error) -> HttpError {
        HttpError::Transport(e.to_string())
    }

    /// reqwest client with a whole-request timeout.
    #[derive(Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(transport_error)?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl HttpTransport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            let HttpRequest {
                method,
                url,
                headers,
                body,
            } = request;

            let mut builder = self.client.request(method.into(), url);
            for (name, value) in &headers {
                builder = builder.header(name, value);
            }
            if !body.is_empty() {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(transport_error)?;
            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(transport_error)?.to_vec();

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(test)]
pub use mock::MockTransport;


#[cfg(test)]
mod tests {
    use super::*;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: Vec::new(),
        }
    }

    #[test]
    fn http_response_success_range() {
        let mut resp = HttpResponse {
            status: 204,
            body: Vec::new(),
        };
        assert!(resp.is_success());
        resp.status = 301;
        assert!(!resp.is_success());
        resp.status = 199;
        assert!(!resp.is_success());
    }

    #[test]
    fn body_text_is_lossy() {
        let resp = HttpResponse {
            status: 500,
            body: vec![b'o', b'k', 0xff],
        };
        assert_eq!(resp.body_text(), "ok\u{fffd}");
    }

    #[test]
    fn redact_token_hides_only_the_token() {
        assert_eq!(
            redact_token("https://gitee.com/api/v5/user/repos?access_token=abc&page=2"),
            "https://gitee.com/api/v5/user/repos?access_token=***&page=2"
        );
        assert_eq!(
            redact_token("https://gitee.com/api/v5/user"),
            "https://gitee.com/api/v5/user"
        );
        assert_eq!(
            redact_token("https://gitee.com/x?page=1&per_page=100"),
            "https://gitee.com/x?page=1&per_page=100"
        );
    }

    #[tokio::test]
    async fn mock_transport_serves_responses_in_order_and_logs_requests() {
        let transport = MockTransport::new();
        let url = "https://gitee.test/api/v5/user";
        for status in [200, 503] {
            transport.push_response(
                HttpMethod::Get,
                url,
                HttpResponse {
                    status,
                    body: b"{}".to_vec(),
                },
            );
        }

        let first = transport.send(get(url)).await.expect("first response");
        let second = transport.send(get(url)).await.expect("second response");
        assert_eq!(first.status, 200);
        assert_eq!(second.status, 503);
        assert_eq!(transport.requests(), vec![get(url), get(url)]);
    }

    #[tokio::test]
    async fn mock_transport_errors_when_no_response_is_registered() {
        let transport = MockTransport::new();
        let mut req = get("https://gitee.test/missing");
        req.method = HttpMethod::Delete;

        let err = transport
            .send(req)
            .await
            .expect_err("missing mock should error");
        match err {
            HttpError::NoMockResponse { method, url } => {
                assert_eq!(method, "DELETE");
                assert_eq!(url, "https://gitee.test/missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    #[cfg(feature = "gitee")]
    fn method_maps_to_reqwest() {
        assert_eq!(reqwest::Method::from(HttpMethod::Patch), reqwest::Method::PATCH);
        assert_eq!(reqwest::Method::from(HttpMethod::Delete), reqwest::Method::DELETE);
    }

    #[tokio::test]
    #[cfg(feature = "gitee")]
    async fn reqwest_transport_reports_unsendable_request_as_transport_error() {
        let transport =
            reqwest_transport::ReqwestTransport::with_timeout(std::time::Duration::from_secs(1))
                .expect("reqwest transport should build");

        let err = transport
            .send(get("not a url"))
            .await
            .expect_err("expected error");
        assert!(matches!(err, HttpError::Transport(_)));
    }
}
