use axum::{Router, middleware::from_fn, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{AppState, routes};

pub mod auth;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(routes::count::router())
        .merge(routes::wx::router())
        .layer(from_fn(auth::inject_auth_context));

    Router::new()
        .route("/", get(routes::frontend::landing))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{http::auth, test_support::test_state};

    async fn setup_router() -> Router {
        super::router(test_state().await)
    }

    fn count_post(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/count")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn inc_on_empty_store_returns_one() {
        let app = setup_router().await;

        let response = app.oneshot(count_post(json!({ "action": "inc" }))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await, json!({ "code": 0, "data": 1 }));
    }

    #[tokio::test]
    async fn clear_after_increments_returns_zero() {
        let app = setup_router().await;

        for _ in 0..5 {
            let response = app
                .clone()
                .oneshot(count_post(json!({ "action": "inc" })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(count_post(json!({ "action": "clear" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await, json!({ "code": 0, "data": 0 }));
    }

    #[tokio::test]
    async fn unknown_action_leaves_count_unchanged() {
        let app = setup_router().await;

        let response = app
            .clone()
            .oneshot(count_post(json!({ "action": "inc" })))
            .await
            .unwrap();
        assert_eq!(response_json(response).await["data"], 1);

        let response = app
            .oneshot(count_post(json!({ "action": "bump" })))
            .await
            .unwrap();

        assert_eq!(response_json(response).await, json!({ "code": 0, "data": 1 }));
    }

    #[tokio::test]
    async fn inc_with_status_but_no_openid_still_counts() {
        let app = setup_router().await;

        // No x-wx-openid header: the relay skips the notification but the
        // counter mutation and response are unaffected.
        let response = app
            .oneshot(count_post(json!({
                "action": "inc",
                "status": "confirmed",
                "bookingId": "B1",
                "roomNumber": "101"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await, json!({ "code": 0, "data": 1 }));
    }

    #[tokio::test]
    async fn get_count_returns_current_value() {
        let app = setup_router().await;

        for _ in 0..3 {
            app.clone()
                .oneshot(count_post(json!({ "action": "inc" })))
                .await
                .unwrap();
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/count")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await, json!({ "code": 0, "data": 3 }));
    }

    #[tokio::test]
    async fn wx_openid_echoes_header_for_gateway_calls() {
        let app = setup_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/wx_openid")
                    .header(auth::SOURCE_HEADER, "miniprogram")
                    .header(auth::OPENID_HEADER, "openid-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"openid-123");
    }

    #[tokio::test]
    async fn wx_openid_without_trust_marker_is_empty_ok() {
        let app = setup_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/wx_openid")
                    .header(auth::OPENID_HEADER, "openid-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn landing_page_is_served_at_root() {
        let app = setup_router().await;

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!bytes.is_empty());
    }
}
