pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::recommendations::handlers as recommendations;
use crate::session::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless API
        .route("/api/v1/examples", get(recommendations::handle_examples))
        .route(
            "/api/v1/recommendations",
            post(recommendations::handle_recommendations),
        )
        // Form sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/intake",
            patch(sessions::handle_update_intake),
        )
        .route(
            "/api/v1/sessions/:id/demo-mode",
            put(sessions::handle_set_demo_mode),
        )
        .route(
            "/api/v1/sessions/:id/examples/:index",
            post(sessions::handle_apply_example),
        )
        .route("/api/v1/sessions/:id/submit", post(sessions::handle_submit))
        .route("/api/v1/sessions/:id/copy", get(sessions::handle_copy))
        .route("/api/v1/sessions/:id/print", get(sessions::handle_print))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use reqwest::Client;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::AnthropicClient;

    fn test_app() -> Router {
        let config = Config {
            demo_delay_ms: 0,
            ..Config::default()
        };
        // No API key configured: live submissions fail before any network call.
        let advisor = AnthropicClient::new(Client::new(), None, config.anthropic_model.clone());
        build_router(AppState::new(config, std::sync::Arc::new(advisor), None))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        app.clone().oneshot(request).await.expect("router dispatch")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    async fn create_session(app: &Router) -> String {
        let response = send(app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"]
            .as_str()
            .expect("id")
            .to_string()
    }

    #[tokio::test]
    async fn test_health_reports_wiring() {
        let app = test_app();
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["demo_mode"], true);
        assert_eq!(json["llm_provider"], "anthropic");
        assert_eq!(json["places_enabled"], false);
    }

    #[tokio::test]
    async fn test_examples_listed() {
        let app = test_app();
        let json = body_json(send(&app, Method::GET, "/api/v1/examples", None).await).await;
        assert_eq!(json["examples"].as_array().map(Vec::len), Some(7));
        assert_eq!(json["location"], "Chicago, IL 60601");
    }

    #[tokio::test]
    async fn test_stateless_demo_recommendations() {
        let app = test_app();
        let response = send(
            &app,
            Method::POST,
            "/api/v1/recommendations",
            Some(json!({"needs": "hungry family", "location": "Chicago"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["source"], "demo");
        assert_eq!(json["functions_used"], json!(["demo_mode"]));
        assert!(json["recommendations"]
            .as_str()
            .unwrap()
            .contains("🍽️ EMERGENCY FOOD ASSISTANCE"));
    }

    #[tokio::test]
    async fn test_stateless_missing_location_rejected() {
        let app = test_app();
        let response = send(
            &app,
            Method::POST,
            "/api/v1/recommendations",
            Some(json!({"needs": "food"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_stateless_live_error_is_verbatim() {
        let app = test_app();
        let response = send(
            &app,
            Method::POST,
            "/api/v1/recommendations",
            Some(json!({"needs": "food", "location": "60601", "demo_mode": false})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Claude API key not configured - please add your real API key"
        );
    }

    #[tokio::test]
    async fn test_session_submit_requires_fields() {
        let app = test_app();
        let id = create_session(&app).await;

        let view = body_json(send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await).await;
        assert_eq!(view["can_submit"], false);

        let response = send(&app, Method::POST, &format!("/api/v1/sessions/{id}/submit"), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_session_example_then_submit_then_copy_and_print() {
        let app = test_app();
        let id = create_session(&app).await;

        let view = body_json(
            send(&app, Method::POST, &format!("/api/v1/sessions/{id}/examples/0"), None).await,
        )
        .await;
        assert_eq!(view["can_submit"], true);
        assert_eq!(view["recommendations"], Value::Null);
        assert_eq!(view["intake"]["location"], "Chicago, IL 60601");

        let view = body_json(
            send(&app, Method::POST, &format!("/api/v1/sessions/{id}/submit"), None).await,
        )
        .await;
        assert_eq!(view["loading"], false);
        assert_eq!(view["results_source"], "demo");
        let displayed = view["recommendations"].as_str().unwrap().to_string();
        assert!(displayed.contains("👶 CHILDCARE & FAMILY SERVICES"));

        let copy = send(&app, Method::GET, &format!("/api/v1/sessions/{id}/copy"), None).await;
        assert_eq!(copy.status(), StatusCode::OK);
        assert_eq!(body_text(copy).await, displayed);

        let print = send(&app, Method::GET, &format!("/api/v1/sessions/{id}/print"), None).await;
        assert_eq!(
            print.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let html = body_text(print).await;
        assert!(html.contains("<h1>Social Services Resource Recommendations</h1>"));
        assert!(html.contains("Greater Chicago Food Depository"));
    }

    #[tokio::test]
    async fn test_session_toggle_keeps_results_and_live_error_shows_in_view() {
        let app = test_app();
        let id = create_session(&app).await;

        send(
            &app,
            Method::PATCH,
            &format!("/api/v1/sessions/{id}/intake"),
            Some(json!({"needs": "shelter tonight", "location": "60607"})),
        )
        .await;
        let demo_view = body_json(
            send(&app, Method::POST, &format!("/api/v1/sessions/{id}/submit"), None).await,
        )
        .await;
        let demo_text = demo_view["recommendations"].clone();

        let toggled = body_json(
            send(
                &app,
                Method::PUT,
                &format!("/api/v1/sessions/{id}/demo-mode"),
                Some(json!({"demo_mode": false})),
            )
            .await,
        )
        .await;
        assert_eq!(toggled["recommendations"], demo_text);
        assert_eq!(toggled["results_source"], "demo");
        assert_eq!(toggled["demo_mode"], false);

        let response = send(&app, Method::POST, &format!("/api/v1/sessions/{id}/submit"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let live_view = body_json(response).await;
        assert_eq!(live_view["recommendations"], Value::Null);
        assert_eq!(
            live_view["error"],
            "Error: Claude API key not configured - please add your real API key"
        );
        assert!(live_view["error_hint"].is_string());

        let copy = send(&app, Method::GET, &format!("/api/v1/sessions/{id}/copy"), None).await;
        assert_eq!(copy.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_session_and_example() {
        let app = test_app();
        let response = send(
            &app,
            Method::GET,
            "/api/v1/sessions/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let id = create_session(&app).await;
        let response = send(&app, Method::POST, &format!("/api/v1/sessions/{id}/examples/99"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::DELETE, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
