use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::counselling::router::shortlist_handler;
use crate::counselling::CounsellingService;
use crate::scoring::FitPolicy;

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

#[tokio::test]
async fn list_route_applies_query_filters() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/universities?country=United%20Kingdom&budget=36000")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["universities"][0]["name"], "University of Oxford");
}

#[tokio::test]
async fn unknown_university_returns_not_found() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/universities/atlantis")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().expect("error text").contains("atlantis"));
}

#[tokio::test]
async fn fit_route_scores_string_encoded_profiles() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "/api/v1/universities/eth-zurich/fit",
            json!({ "gpa": "3.6", "ielts": "7.0", "budget": 20000 }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["score"], 100);
    assert_eq!(body["category"], "Safe");
    assert_eq!(body["components"].as_array().expect("components").len(), 3);
}

#[tokio::test]
async fn strength_route_handles_empty_profile() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request("/api/v1/profile/strength", json!({})))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body,
        json!({
            "overall": 0,
            "academics": "Not specified",
            "exams": "Not started",
            "sop": "Not started"
        })
    );
}

#[tokio::test]
async fn recommendations_route_returns_ranked_list() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "/api/v1/profiles/student-42/recommendations",
            serde_json::to_value(strong_profile()).expect("profile serializes"),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["profile_id"], "student-42");
    assert_eq!(body["count"], 6);
    let first = &body["universities"][0];
    assert_eq!(first["id"], "massachusetts-institute-of-technology-mit");
    assert_eq!(first["fit_score"], 100);
    assert_eq!(first["category"], "Safe");
    assert_eq!(first["is_shortlisted"], false);
    assert_eq!(body["universities"][5]["name"], "Stanford University");
}

#[tokio::test]
async fn shortlist_handler_reports_created_then_existing() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let path = || Path(("student-42".to_string(), "eth-zurich".to_string()));

    let created = shortlist_handler::<MemoryCatalog, MemoryShortlists>(
        State(service.clone()),
        path(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let existing =
        shortlist_handler::<MemoryCatalog, MemoryShortlists>(State(service), path()).await;
    assert_eq!(existing.status(), StatusCode::OK);
    let body = read_json_body(existing).await;
    assert_eq!(body["created"], false);
    assert_eq!(body["entry"]["status"], "Not Started");
}

#[tokio::test]
async fn lock_route_locks_and_unlock_route_clears() {
    let (service, _, shortlists) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "/api/v1/profiles/student-42/shortlist/eth-zurich/lock",
            Value::Null,
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["entry"]["is_locked"], true);

    let response = router
        .oneshot(json_request(
            "/api/v1/profiles/student-42/shortlist/eth-zurich/unlock",
            Value::Null,
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["entry"]["is_locked"], false);
    assert_eq!(shortlists.len(), 1);
}

#[tokio::test]
async fn advisor_context_route_returns_payload_and_summary() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "/api/v1/profiles/student-42/advisor-context",
            json!({
                "profile": serde_json::to_value(modest_profile()).expect("profile serializes"),
                "top_n": 2
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let top = body["context"]["top_universities"]
        .as_array()
        .expect("top universities");
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["category"], "Target");
    assert_eq!(body["context"]["stage"], "Discovering Universities");
    assert!(body["summary"]
        .as_str()
        .expect("summary text")
        .contains("National University of Singapore (NUS) (75, Target)"));
}

#[tokio::test]
async fn unavailable_store_maps_to_service_unavailable() {
    let service = CounsellingService::new(
        Arc::new(MemoryCatalog::seeded()),
        Arc::new(UnavailableShortlists),
        FitPolicy::default(),
    );
    let router = crate::counselling::counselling_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "/api/v1/profiles/student-42/recommendations",
            json!({ "gpa": 3.5 }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

fn put_request(uri: &str, body: Value) -> Request<Body> {
    Request::put(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn application_routes_update_and_list_locked_tasks() {
    let (service, _, _) = build_service();
    service.lock(&profile_id(), &eth()).expect("lock");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(put_request(
            "/api/v1/profiles/student-42/applications/eth-zurich",
            json!({
                "applicationStatus": "Submitted",
                "deadline": "2027-01-15T00:00:00Z",
                "tasks": [{ "title": "Pay application fee", "completed": true }],
                "documents": [{ "name": "CV" }]
            }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["entry"]["status"], "Submitted");
    assert_eq!(body["entry"]["deadline"], "2027-01-15T00:00:00Z");

    let response = router
        .clone()
        .oneshot(get_request("/api/v1/profiles/student-42/applications"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["applications"][0]["university"]["name"], "ETH Zurich");
    assert_eq!(body["applications"][0]["tasks"][0]["completed"], true);

    let response = router
        .clone()
        .oneshot(get_request("/api/v1/profiles/student-42/tasks"))
        .await
        .expect("router responds");
    let body = read_json_body(response).await;
    assert_eq!(
        body["tasks"],
        json!([{
            "university_id": "eth-zurich",
            "title": "Pay application fee",
            "completed": true
        }])
    );

    let response = router
        .oneshot(get_request("/api/v1/profiles/student-42/documents"))
        .await
        .expect("router responds");
    let body = read_json_body(response).await;
    assert_eq!(body["documents"][0]["name"], "CV");
    assert_eq!(body["documents"][0]["uploaded"], false);
}

#[tokio::test]
async fn updating_missing_application_returns_not_found() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(put_request(
            "/api/v1/profiles/student-42/applications/eth-zurich",
            json!({ "status": "In Progress" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error text")
        .contains("eth-zurich"));
}

#[tokio::test]
async fn unknown_application_status_is_rejected() {
    let (service, _, _) = build_service();
    service.shortlist(&profile_id(), &eth()).expect("shortlist");
    let router = router_with_service(service);

    let response = router
        .oneshot(put_request(
            "/api/v1/profiles/student-42/applications/eth-zurich",
            json!({ "status": "Pending" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
