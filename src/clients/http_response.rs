//! HTTP response types for the LavvieBot API client.
//!
//! [`HttpResponse`] keeps the raw body text so that error classification can
//! report unreadable bodies verbatim, and exposes helpers for the two things
//! the protocol reads from a response: the `Set-Cookie` session cookie and
//! the GraphQL `errors` list.

use std::collections::HashMap;

use serde_json::Value;

/// An HTTP response from the PurrSong endpoint.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Builds a `Cookie` request header value from the `Set-Cookie` headers.
    ///
    /// Only the `name=value` pair of each cookie is kept; attributes such as
    /// `Path` or `HttpOnly` are dropped. Returns `None` when the response set
    /// no cookies.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lavviebot_api::clients::HttpResponse;
    /// use std::collections::HashMap;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert(
    ///     "set-cookie".to_string(),
    ///     vec![
    ///         "connect.sid=s%3Aabc; Path=/; HttpOnly".to_string(),
    ///         "AWSALB=xyz; Expires=Tue, 01 Jan 2030 00:00:00 GMT".to_string(),
    ///     ],
    /// );
    /// let response = HttpResponse::new(200, headers, String::new());
    ///
    /// assert_eq!(
    ///     response.cookie().as_deref(),
    ///     Some("connect.sid=s%3Aabc; AWSALB=xyz")
    /// );
    /// ```
    #[must_use]
    pub fn cookie(&self) -> Option<String> {
        let pairs: Vec<&str> = self
            .headers
            .get("set-cookie")?
            .iter()
            .filter_map(|value| value.split(';').next())
            .map(str::trim)
            .filter(|pair| pair.contains('='))
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

/// Returns the first GraphQL error message in a response body.
///
/// A body "has errors" when it carries a non-null top-level `errors` key. An
/// error entry without a string `message` yields an empty message.
#[must_use]
pub fn first_error_message(body: &Value) -> Option<String> {
    let errors = body.get("errors").filter(|errors| !errors.is_null())?;
    let message = errors
        .as_array()
        .and_then(|errors| errors.first())
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), String::new());
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 401, 429, 500, 503] {
            let response = HttpResponse::new(code, HashMap::new(), String::new());
            assert!(!response.is_ok());
        }
    }

    #[test]
    fn test_json_parses_body() {
        let response = HttpResponse::new(200, HashMap::new(), r#"{"data":{"ok":true}}"#.to_string());
        assert_eq!(response.json().unwrap()["data"]["ok"], true);
    }

    #[test]
    fn test_json_fails_for_html_body() {
        let response = HttpResponse::new(502, HashMap::new(), "<html>Bad Gateway</html>".to_string());
        assert!(response.json().is_err());
    }

    #[test]
    fn test_cookie_is_none_without_set_cookie() {
        let response = HttpResponse::new(200, HashMap::new(), String::new());
        assert!(response.cookie().is_none());
    }

    #[test]
    fn test_cookie_ignores_values_without_pairs() {
        let mut headers = HashMap::new();
        headers.insert("set-cookie".to_string(), vec!["garbage".to_string()]);
        let response = HttpResponse::new(200, headers, String::new());
        assert!(response.cookie().is_none());
    }

    #[test]
    fn test_first_error_message_reads_first_entry() {
        let body = json!({
            "errors": [
                {"message": "Please login again.", "extensions": {"code": "UNAUTHENTICATED"}},
                {"message": "second"}
            ],
            "data": null
        });
        assert_eq!(
            first_error_message(&body).as_deref(),
            Some("Please login again.")
        );
    }

    #[test]
    fn test_first_error_message_none_without_errors_key() {
        assert!(first_error_message(&json!({"data": {}})).is_none());
        assert!(first_error_message(&json!({"data": {}, "errors": null})).is_none());
    }

    #[test]
    fn test_first_error_message_empty_for_malformed_errors() {
        assert_eq!(first_error_message(&json!({"errors": []})).as_deref(), Some(""));
        assert_eq!(
            first_error_message(&json!({"errors": "boom"})).as_deref(),
            Some("")
        );
    }
}
