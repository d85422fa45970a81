// Session cookie transport for the signed token

use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::Environment;

pub const SESSION_COOKIE_NAME: &str = "jwt";

/// Find a cookie value by name in the request's `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Settings for the `jwt` cookie
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    secure: bool,
    max_age_seconds: i64,
}

impl SessionCookie {
    /// `Secure` is set everywhere except development
    pub fn new(environment: Environment, max_age_seconds: i64) -> Self {
        Self {
            secure: !environment.is_development(),
            max_age_seconds,
        }
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Build the `Set-Cookie` value carrying a session token
    pub fn build(&self, token: &str) -> String {
        let mut parts = vec![
            format!("{}={}", SESSION_COOKIE_NAME, token),
            "Path=/".to_string(),
            "HttpOnly".to_string(),
        ];
        if self.secure {
            parts.push("Secure".to_string());
        }
        parts.push(format!("Max-Age={}", self.max_age_seconds));
        parts.join("; ")
    }

    /// Append the session cookie to a response's headers
    pub fn append_set(&self, headers: &mut HeaderMap, token: &str) {
        // JWTs are base64url plus dots, always a valid header value
        if let Ok(value) = HeaderValue::from_str(&self.build(token)) {
            headers.append(header::SET_COOKIE, value);
        }
    }

    /// Append an expired `jwt` cookie so the browser drops the session.
    ///
    /// Tokens already issued stay cryptographically valid until `exp`.
    pub fn append_clear(headers: &mut HeaderMap) {
        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("jwt=; Path=/; HttpOnly; Max-Age=0"),
        );
    }

    /// Read the session token from a request
    pub fn token_from(headers: &HeaderMap) -> Option<String> {
        read_cookie(headers, SESSION_COOKIE_NAME).filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_cookie_is_secure() {
        let cookie = SessionCookie::new(Environment::Production, 3600);
        let value = cookie.build("abc.def.ghi");
        assert_eq!(value, "jwt=abc.def.ghi; Path=/; HttpOnly; Secure; Max-Age=3600");
    }

    #[test]
    fn test_development_cookie_is_not_secure() {
        let cookie = SessionCookie::new(Environment::Development, 3600);
        let value = cookie.build("abc.def.ghi");
        assert!(!value.contains("Secure"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=3600"));
    }

    #[test]
    fn test_read_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; jwt=tok.en.value; notice=hi"),
        );
        assert_eq!(SessionCookie::token_from(&headers).as_deref(), Some("tok.en.value"));
        assert_eq!(read_cookie(&headers, "notice").as_deref(), Some("hi"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_empty_token_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("jwt="));
        assert_eq!(SessionCookie::token_from(&headers), None);
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let mut headers = HeaderMap::new();
        SessionCookie::append_clear(&mut headers);
        let value = headers[header::SET_COOKIE].to_str().unwrap();
        assert!(value.starts_with("jwt=;"));
        assert!(value.contains("Max-Age=0"));
    }
}
