mod auth;
mod bookings;
mod contact;
pub mod error;
mod hotels;
mod system;
pub mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

use self::error::ApiError;

pub fn create_router(state: Arc<AppState>) -> Router {
    let auth_routes = Router::new().route("/login", post(auth::login));

    // Every origin, method and header is allowed
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(system::root))
        .route("/test", get(system::test_database))
        .nest("/auth", auth_routes)
        // Hotels
        .route("/hotels", get(hotels::list_hotels))
        .route("/hotels", post(hotels::create_hotel))
        .route("/hotels/seed", post(hotels::seed_hotels))
        // Bookings
        .route("/bookings", post(bookings::create_booking))
        // Contact
        .route("/contact", post(contact::submit_contact))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}


#[cfg(test)]
mod tests {
    use super::test_support::{detached_state, memory_state};
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        router.oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_is_live() {
        let router = create_router(detached_state());
        let response = send(router, Method::GET, "/", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"message": "Hotel Booking API is running"})
        );
    }

    #[tokio::test]
    async fn test_unknown_route_uses_detail_shape() {
        let router = create_router(detached_state());
        let response = send(router, Method::GET, "/nope", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({"detail": "Not Found"}));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let router = create_router(detached_state());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/bookings")
            .header(header::ORIGIN, "https://example.org")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_seed_then_book_through_router() {
        let state = memory_state().await;
        let router = create_router(state);

        let response = send(router.clone(), Method::POST, "/hotels/seed", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));

        let response = send(router.clone(), Method::GET, "/hotels?city=New%20York", None).await;
        let hotels = json_body(response).await;
        let hotels = hotels.as_array().unwrap();
        assert_eq!(hotels.len(), 1);
        let hotel_id = hotels[0]["id"].as_str().unwrap().to_string();

        let response = send(
            router.clone(),
            Method::POST,
            "/bookings",
            Some(json!({
                "user_email": "a@b.com",
                "hotel_id": hotel_id,
                "check_in": "2025-06-01",
                "check_out": "2025-06-03",
                "guests": 2
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert_eq!(body["message"], "Booking confirmed");
    }

    #[tokio::test]
    async fn test_guest_bounds_rejected_before_store() {
        // No store attached: a 422 proves validation ran first
        let router = create_router(detached_state());

        for guests in [0, 11] {
            let response = send(
                router.clone(),
                Method::POST,
                "/bookings",
                Some(json!({
                    "user_email": "a@b.com",
                    "hotel_id": "anything",
                    "check_in": "2025-06-01",
                    "check_out": "2025-06-03",
                    "guests": guests
                })),
            )
            .await;

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            let body = json_body(response).await;
            assert_eq!(body["detail"][0]["loc"], json!(["body", "guests"]));
        }
    }

    #[tokio::test]
    async fn test_booking_unknown_hotel_is_404() {
        let router = create_router(memory_state().await);
        let response = send(
            router,
            Method::POST,
            "/bookings",
            Some(json!({
                "user_email": "a@b.com",
                "hotel_id": "missing",
                "check_in": "2025-06-01",
                "check_out": "2025-06-03",
                "guests": 2
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({"detail": "Hotel not found"}));
    }

    #[tokio::test]
    async fn test_contact_message_length_boundary() {
        let router = create_router(memory_state().await);

        let short = send(
            router.clone(),
            Method::POST,
            "/contact",
            Some(json!({"name": "Ada", "email": "ada@example.com", "message": "abcd"})),
        )
        .await;
        assert_eq!(short.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let ok = send(
            router,
            Method::POST,
            "/contact",
            Some(json!({"name": "Ada", "email": "ada@example.com", "message": "abcde"})),
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(json_body(ok).await["status"], "received");
    }

    #[tokio::test]
    async fn test_login_through_router() {
        let router = create_router(memory_state().await);
        let response = send(
            router,
            Method::POST,
            "/auth/login",
            Some(json!({"email": "grace@example.com", "password": "pw"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"user": {"name": "grace", "email": "grace@example.com"}})
        );
    }

    #[tokio::test]
    async fn test_malformed_date_is_422() {
        let router = create_router(memory_state().await);
        let response = send(
            router,
            Method::POST,
            "/bookings",
            Some(json!({
                "user_email": "a@b.com",
                "hotel_id": "x",
                "check_in": "June 1st",
                "check_out": "2025-06-03",
                "guests": 2
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["detail"][0]["loc"], json!(["body", "check_in"]));
        assert_eq!(body["detail"][0]["type"], "value_error");
    }

    #[tokio::test]
    async fn test_login_missing_email_is_located() {
        let router = create_router(memory_state().await);
        let response = send(
            router,
            Method::POST,
            "/auth/login",
            Some(json!({"password": "x"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(response).await,
            json!({"detail": [{
                "loc": ["body", "email"],
                "msg": "Field required",
                "type": "missing"
            }]})
        );
    }

    #[tokio::test]
    async fn test_invalid_json_syntax_is_422() {
        let router = create_router(detached_state());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["detail"][0]["loc"], json!(["body"]));
        assert_eq!(body["detail"][0]["type"], "json_invalid");
    }

    #[tokio::test]
    async fn test_seed_without_store_is_500() {
        let router = create_router(detached_state());
        let response = send(router, Method::POST, "/hotels/seed", None).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({"detail": "Database not configured"})
        );
    }
}
