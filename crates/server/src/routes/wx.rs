use axum::{
    Extension, Router,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{AppState, http::auth::AuthContext};

pub fn router() -> Router<AppState> {
    Router::new().route("/wx_openid", get(wx_openid))
}

/// Echoes the gateway-injected openid back to the mini-program. Calls
/// that did not come through the gateway get an empty 200.
pub async fn wx_openid(Extension(auth): Extension<AuthContext>) -> Response {
    if auth.trusted {
        auth.openid.unwrap_or_default().into_response()
    } else {
        ().into_response()
    }
}
