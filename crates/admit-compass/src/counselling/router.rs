use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::application::ApplicationUpdate;
use super::service::{CounsellingError, CounsellingService};
use super::shortlist::{ProfileId, ShortlistRepository};
use crate::catalog::{CatalogError, CatalogQuery, UniversityCatalog, UniversityId};
use crate::profile::StudentProfile;

/// Router builder exposing catalog, scoring, and shortlist endpoints.
pub fn counselling_router<C, S>(service: Arc<CounsellingService<C, S>>) -> Router
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    Router::new()
        .route("/api/v1/universities", get(list_handler::<C, S>))
        .route(
            "/api/v1/universities/:university_id",
            get(university_handler::<C, S>),
        )
        .route(
            "/api/v1/universities/:university_id/fit",
            post(fit_handler::<C, S>),
        )
        .route("/api/v1/profile/strength", post(strength_handler::<C, S>))
        .route(
            "/api/v1/profiles/:profile_id/recommendations",
            post(recommendations_handler::<C, S>),
        )
        .route(
            "/api/v1/profiles/:profile_id/advisor-context",
            post(advisor_context_handler::<C, S>),
        )
        .route(
            "/api/v1/profiles/:profile_id/shortlist/:university_id",
            post(shortlist_handler::<C, S>),
        )
        .route(
            "/api/v1/profiles/:profile_id/shortlist/:university_id/lock",
            post(lock_handler::<C, S>),
        )
        .route(
            "/api/v1/profiles/:profile_id/shortlist/:university_id/unlock",
            post(unlock_handler::<C, S>),
        )
        .route(
            "/api/v1/profiles/:profile_id/applications",
            get(applications_handler::<C, S>),
        )
        .route(
            "/api/v1/profiles/:profile_id/applications/:university_id",
            put(update_application_handler::<C, S>),
        )
        .route(
            "/api/v1/profiles/:profile_id/tasks",
            get(tasks_handler::<C, S>),
        )
        .route(
            "/api/v1/profiles/:profile_id/documents",
            get(documents_handler::<C, S>),
        )
        .with_state(service)
}

type SharedService<C, S> = State<Arc<CounsellingService<C, S>>>;

/// Body accepted by the advisor-context endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AdvisorContextRequest {
    #[serde(default)]
    pub profile: Option<StudentProfile>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

pub(crate) async fn list_handler<C, S>(
    State(service): SharedService<C, S>,
    Query(query): Query<CatalogQuery>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.search(&query) {
        Ok(universities) => {
            let payload = json!({
                "count": universities.len(),
                "universities": universities,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn university_handler<C, S>(
    State(service): SharedService<C, S>,
    Path(university_id): Path<String>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.university(&UniversityId(university_id)) {
        Ok(university) => (StatusCode::OK, Json(university)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fit_handler<C, S>(
    State(service): SharedService<C, S>,
    Path(university_id): Path<String>,
    Json(profile): Json<StudentProfile>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.university_fit(&UniversityId(university_id), &profile) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn strength_handler<C, S>(
    State(service): SharedService<C, S>,
    Json(profile): Json<Option<StudentProfile>>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    let strength = service.profile_strength(profile.as_ref());
    (StatusCode::OK, Json(strength)).into_response()
}

pub(crate) async fn recommendations_handler<C, S>(
    State(service): SharedService<C, S>,
    Path(profile_id): Path<String>,
    Json(profile): Json<StudentProfile>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    let profile_id = ProfileId(profile_id);
    match service.recommend(&profile_id, &profile) {
        Ok(universities) => {
            let payload = json!({
                "profile_id": profile_id,
                "count": universities.len(),
                "universities": universities,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn advisor_context_handler<C, S>(
    State(service): SharedService<C, S>,
    Path(profile_id): Path<String>,
    Json(request): Json<AdvisorContextRequest>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    let profile_id = ProfileId(profile_id);
    match service.advisor_context(&profile_id, request.profile.as_ref(), request.top_n) {
        Ok(context) => {
            let summary = context.summary();
            let payload = json!({
                "context": context,
                "summary": summary,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn shortlist_handler<C, S>(
    State(service): SharedService<C, S>,
    Path((profile_id, university_id)): Path<(String, String)>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.shortlist(&ProfileId(profile_id), &UniversityId(university_id)) {
        Ok(outcome) => {
            let (status, message) = if outcome.created {
                (StatusCode::CREATED, "university shortlisted")
            } else {
                (StatusCode::OK, "university already shortlisted")
            };
            let payload = json!({
                "message": message,
                "created": outcome.created,
                "entry": outcome.entry,
            });
            (status, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn lock_handler<C, S>(
    State(service): SharedService<C, S>,
    Path((profile_id, university_id)): Path<(String, String)>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.lock(&ProfileId(profile_id), &UniversityId(university_id)) {
        Ok(entry) => {
            let payload = json!({
                "message": "university locked",
                "entry": entry,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn unlock_handler<C, S>(
    State(service): SharedService<C, S>,
    Path((profile_id, university_id)): Path<(String, String)>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.unlock(&ProfileId(profile_id), &UniversityId(university_id)) {
        Ok(entry) => {
            let payload = json!({
                "message": "university unlocked",
                "entry": entry,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn applications_handler<C, S>(
    State(service): SharedService<C, S>,
    Path(profile_id): Path<String>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.applications(&ProfileId(profile_id)) {
        Ok(applications) => {
            let payload = json!({
                "count": applications.len(),
                "applications": applications,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_application_handler<C, S>(
    State(service): SharedService<C, S>,
    Path((profile_id, university_id)): Path<(String, String)>,
    Json(update): Json<ApplicationUpdate>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.update_application(
        &ProfileId(profile_id),
        &UniversityId(university_id),
        &update,
    ) {
        Ok(entry) => {
            let payload = json!({
                "message": "application updated",
                "entry": entry,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn tasks_handler<C, S>(
    State(service): SharedService<C, S>,
    Path(profile_id): Path<String>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.locked_tasks(&ProfileId(profile_id)) {
        Ok(tasks) => (StatusCode::OK, Json(json!({ "tasks": tasks }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn documents_handler<C, S>(
    State(service): SharedService<C, S>,
    Path(profile_id): Path<String>,
) -> Response
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    match service.locked_documents(&ProfileId(profile_id)) {
        Ok(documents) => {
            (StatusCode::OK, Json(json!({ "documents": documents }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: CounsellingError) -> Response {
    let status = match &err {
        CounsellingError::Catalog(CatalogError::NotFound(_))
        | CounsellingError::ApplicationNotFound { .. } => StatusCode::NOT_FOUND,
        CounsellingError::Catalog(CatalogError::Unavailable(_))
        | CounsellingError::Shortlist(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    if status.is_server_error() {
        error!(error = %err, "counselling request failed");
    }
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
