use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

/// Header carrying the CSRF token on state-changing requests.
pub static CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

/// How the browser fetch layer handles cookies for API calls.
///
/// Selected once from configuration: `SameOrigin` for secure (https)
/// deployments, `Include` for plain-http development setups where the UI
/// and the API live on different origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsPolicy {
    #[default]
    SameOrigin,
    Include,
}

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub credentials: CredentialsPolicy,
    pub inner_client: reqwest::Client,
}

/// How a dispatched request settled: an HTTP response was received, whether
/// success or error. Transport failures never produce a `Settlement`; they
/// surface as `ClientError`.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub status_code: u16,
    pub ok: bool,
    /// Parsed JSON body, present only when the response carried a content
    /// type and the body parsed cleanly.
    pub body: Option<Value>,
}

/// Helper methods for http actions
impl APIClient {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    pub fn content_url(&self, path: &str) -> String {
        format!("{}/content/{path}", &self.address)
    }

    /// Issue a single request and report how it settled.
    ///
    /// A JSON body is attached only when a payload is present. Responses
    /// that declare a content type have their body parsed as JSON; a body
    /// that fails to parse yields no value, with the status still recorded.
    pub async fn dispatch(
        &self,
        method: Method,
        url: &str,
        payload: Option<&Value>,
        csrf_token: Option<&str>,
    ) -> Result<Settlement, ClientError> {
        let request = self
            .inner_client
            .request(method, url)
            .headers(request_headers(csrf_token));

        let request = if let Some(body) = payload {
            request.json(body)
        } else {
            request
        };

        #[cfg(target_arch = "wasm32")]
        let request = match self.credentials {
            CredentialsPolicy::SameOrigin => {
                request.fetch_credentials_same_origin()
            }
            CredentialsPolicy::Include => request.fetch_credentials_include(),
        };

        let response = request.send().await?;
        let status = response.status();
        let ok = status.is_success();

        let body = if response.headers().get(CONTENT_TYPE).is_some() {
            response.json::<Value>().await.ok()
        } else {
            None
        };

        Ok(Settlement {
            status_code: status.as_u16(),
            ok,
            body,
        })
    }
}

/// Build the header set for a single request.
///
/// Returns a fresh map every call so concurrent in-flight requests never
/// share header state. The CSRF header is included only when a token is
/// supplied; cookie values that are not valid header bytes are dropped.
pub fn request_headers(csrf_token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(token) = csrf_token
        && let Ok(value) = HeaderValue::from_str(token)
    {
        headers.insert(CSRF_HEADER.clone(), value);
    }
    headers
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("Could not connect to server. Check your connection.")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> APIClient {
        APIClient {
            address: "https://example.com".to_string(),
            credentials: CredentialsPolicy::SameOrigin,
            inner_client: reqwest::Client::new(),
        }
    }

    #[test]
    fn url_formatting() {
        let client = client();
        assert_eq!(
            client.api_url("auth/login/"),
            "https://example.com/api/auth/login/"
        );
        assert_eq!(
            client.content_url("about"),
            "https://example.com/content/about"
        );
    }

    #[test]
    fn headers_without_token() {
        let headers = request_headers(None);
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert!(headers.get(&CSRF_HEADER).is_none());
    }

    #[test]
    fn headers_with_token() {
        let headers = request_headers(Some("abc123"));
        assert_eq!(headers.get(&CSRF_HEADER).unwrap(), "abc123");
    }

    #[test]
    fn headers_are_fresh_per_call() {
        let with_token = request_headers(Some("abc123"));
        let without = request_headers(None);
        assert!(with_token.get(&CSRF_HEADER).is_some());
        assert!(without.get(&CSRF_HEADER).is_none());
    }

    #[test]
    fn invalid_token_bytes_are_dropped() {
        let headers = request_headers(Some("bad\nvalue"));
        assert!(headers.get(&CSRF_HEADER).is_none());
    }
}
