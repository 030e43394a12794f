#[cfg(test)]
mod tests {
    use crate::handlers::AvailabilityState;
    use crate::routes::routes;
    use crate::service::{InMemoryBookingStore, SeedData};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use serviceconnect_common::models::{
        ServiceListing, TechnicianProfile, TimeOfDay, WeeklyAvailability, WorkingHours,
    };
    use serviceconnect_config::AppConfig;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn app(use_booking: bool) -> Router {
        let store = InMemoryBookingStore::from_seed(SeedData {
            technicians: vec![TechnicianProfile {
                id: "tech-1".into(),
                name: "Kamau".into(),
                working_hours: WorkingHours::new(t("09:00"), t("11:00")),
                availability: WeeklyAvailability::weekdays(),
            }],
            services: vec![ServiceListing {
                id: "svc-1".into(),
                technician_id: "tech-1".into(),
                title: "Wiring inspection".into(),
                duration_minutes: 60,
                price: None,
            }],
            bookings: vec![],
        });
        let config = AppConfig {
            use_booking,
            ..AppConfig::default()
        };
        routes(Arc::new(AvailabilityState::new(
            Arc::new(config),
            Arc::new(store),
        )))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn json(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_availability_route_returns_slot_array() {
        let (status, body) = send(
            app(false),
            get("/services/svc-1/availability?date=2025-05-05"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(["09:00", "09:30", "10:00"]));
    }

    #[tokio::test]
    async fn test_availability_route_error_shapes() {
        let (status, body) = send(app(false), get("/services/svc-1/availability")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);

        let (status, _) = send(
            app(false),
            get("/services/svc-9/availability?date=2025-05-05"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_booking_route_disabled() {
        let (status, body) = send(
            app(false),
            json(
                Method::POST,
                "/services/svc-1/bookings",
                serde_json::json!({
                    "date": "2025-05-05",
                    "start_time": "09:00",
                    "customer_id": "cust-1"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], 503);
    }

    #[tokio::test]
    async fn test_status_route_rejects_unknown_status() {
        let (status, body) = send(
            app(true),
            json(
                Method::PATCH,
                "/bookings/9b2f6a4e-2d1c-4f0e-8a55-0c3e1d7f9a10/status",
                serde_json::json!({ "status": "ARCHIVED" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);
    }

    #[tokio::test]
    async fn test_status_route_rejects_malformed_booking_id() {
        let (status, body) = send(
            app(true),
            json(
                Method::PATCH,
                "/bookings/not-a-uuid/status",
                serde_json::json!({ "status": "CONFIRMED" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);
    }

    #[tokio::test]
    async fn test_booking_route_rejects_malformed_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/services/svc-1/bookings")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"date\": \"2025-05-05\""))
            .unwrap();

        let (status, body) = send(app(true), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);
        assert!(body["error"]["message"].is_string());
    }
}
