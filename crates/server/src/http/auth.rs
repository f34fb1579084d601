use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Header the cloud-hosting gateway fills with the caller's openid on
/// authenticated mini-program requests.
pub const OPENID_HEADER: &str = "x-wx-openid";
/// Marker header the gateway adds to every request it has authenticated.
pub const SOURCE_HEADER: &str = "x-wx-source";

/// Caller identity as asserted by the upstream gateway. The openid is
/// trusted verbatim; this service performs no verification of its own.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub openid: Option<String>,
    pub trusted: bool,
}

impl AuthContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let openid = headers
            .get(OPENID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
            .filter(|value| !value.is_empty());
        let trusted = headers.contains_key(SOURCE_HEADER);
        Self { openid, trusted }
    }
}

/// Builds the [`AuthContext`] once per request and hands it to handlers
/// as an extension, instead of each handler re-reading headers.
pub async fn inject_auth_context(mut request: Request, next: Next) -> Response {
    let context = AuthContext::from_headers(request.headers());
    request.extensions_mut().insert(context);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn context_reflects_gateway_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(OPENID_HEADER, HeaderValue::from_static("openid-1"));
        headers.insert(SOURCE_HEADER, HeaderValue::from_static("miniprogram"));

        let context = AuthContext::from_headers(&headers);
        assert_eq!(context.openid.as_deref(), Some("openid-1"));
        assert!(context.trusted);
    }

    #[test]
    fn missing_headers_yield_an_untrusted_anonymous_context() {
        let context = AuthContext::from_headers(&HeaderMap::new());
        assert!(context.openid.is_none());
        assert!(!context.trusted);
    }

    #[test]
    fn blank_openid_is_treated_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(OPENID_HEADER, HeaderValue::from_static(""));

        let context = AuthContext::from_headers(&headers);
        assert!(context.openid.is_none());
    }
}
