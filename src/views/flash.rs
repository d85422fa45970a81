// One-time notices carried across a redirect in the `notice` cookie

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::cookie::read_cookie;

pub const NOTICE_COOKIE_NAME: &str = "notice";
const NOTICE_MAX_AGE_SECONDS: u32 = 60;

/// Encode notices into a cookie-safe value
pub fn encode<S: AsRef<str>>(notices: &[S]) -> String {
    let joined = notices
        .iter()
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    urlencoding::encode(&joined).into_owned()
}

/// Decode a `notice` cookie value; undecodable values yield no notices
pub fn decode(raw: &str) -> Vec<String> {
    match urlencoding::decode(raw) {
        Ok(text) => text
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Append a `notice` cookie holding the given notices
pub fn append_set<S: AsRef<str>>(headers: &mut HeaderMap, notices: &[S]) {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; Max-Age={}",
        NOTICE_COOKIE_NAME,
        encode(notices),
        NOTICE_MAX_AGE_SECONDS
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Append an expired `notice` cookie once the notices have been shown
pub fn append_clear(headers: &mut HeaderMap) {
    headers.append(
        header::SET_COOKIE,
        HeaderValue::from_static("notice=; Path=/; HttpOnly; Max-Age=0"),
    );
}

/// 303 redirect that leaves notices for the next rendered page
pub fn redirect_with_notices<S: AsRef<str>>(to: &str, notices: &[S]) -> Response {
    let mut response = Redirect::to(to).into_response();
    if !notices.is_empty() {
        append_set(response.headers_mut(), notices);
    }
    response
}

/// Notices left by the previous response
#[derive(Debug, Clone, Default)]
pub struct Flash {
    notices: Vec<String>,
    present: bool,
}

impl Flash {
    pub fn from_notices(notices: Vec<String>) -> Self {
        Self {
            notices,
            present: true,
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        match read_cookie(headers, NOTICE_COOKIE_NAME) {
            Some(raw) if !raw.is_empty() => Self::from_notices(decode(&raw)),
            _ => Self::default(),
        }
    }

    pub fn was_present(&self) -> bool {
        self.present
    }

    pub fn into_notices(self) -> Vec<String> {
        self.notices
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Flash::from_headers(&parts.headers))
    }
}
