use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::auth::AuthUser;
use crate::engine::{LifecycleEngine, RequestInput};
use crate::error::ApiError;
use crate::model::request::DecisionKind;
use crate::view::{RequestView, ViewComposer};

/// Submitter-supplied fields, shared by create and edit.
#[derive(Deserialize, ToSchema)]
pub struct RequestPayload {
    pub category_id: Uuid,
    #[schema(example = "2026-09-07", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2026-09-11", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    #[schema(example = "moving house")]
    pub justification: String,
}

impl From<RequestPayload> for RequestInput {
    fn from(payload: RequestPayload) -> Self {
        RequestInput {
            category_id: payload.category_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            justification: payload.justification,
        }
    }
}

/* =========================
Create request (Employee)
========================= */
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body(
        content = RequestPayload,
        description = "Leave request fields",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Request created", body = RequestView),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Only employees submit requests")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn create_request(
    auth: AuthUser,
    engine: web::Data<LifecycleEngine>,
    composer: web::Data<ViewComposer>,
    payload: web::Json<RequestPayload>,
) -> Result<impl Responder, ApiError> {
    let created = engine.create(&auth, payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(composer.enrich(created).await))
}

/* =========================
Edit request (owner, Pending only)
========================= */
#[utoipa::path(
    put,
    path = "/api/requests/{id}",
    params(("id" = Uuid, Path, description = "Request id")),
    request_body(content = RequestPayload, content_type = "application/json"),
    responses(
        (status = 200, description = "Request updated", body = RequestView),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller does not own the request"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn edit_request(
    auth: AuthUser,
    engine: web::Data<LifecycleEngine>,
    composer: web::Data<ViewComposer>,
    path: web::Path<Uuid>,
    payload: web::Json<RequestPayload>,
) -> Result<impl Responder, ApiError> {
    let updated = engine
        .edit(&auth, path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(composer.enrich(updated).await))
}

/* =========================
Delete request (owner, Pending only)
========================= */
#[utoipa::path(
    delete,
    path = "/api/requests/{id}",
    params(("id" = Uuid, Path, description = "Request id")),
    responses(
        (status = 204, description = "Request deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller does not own the request"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn delete_request(
    auth: AuthUser,
    engine: web::Data<LifecycleEngine>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    engine.delete(&auth, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/* =========================
Approve request (Manager)
========================= */
#[utoipa::path(
    put,
    path = "/api/requests/{id}/approve",
    params(("id" = Uuid, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request approved", body = RequestView),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Managers only"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn approve_request(
    auth: AuthUser,
    engine: web::Data<LifecycleEngine>,
    composer: web::Data<ViewComposer>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let decided = engine
        .decide(&auth, path.into_inner(), DecisionKind::Approve)
        .await?;
    Ok(HttpResponse::Ok().json(composer.enrich(decided).await))
}

/* =========================
Reject request (Manager)
========================= */
#[utoipa::path(
    put,
    path = "/api/requests/{id}/reject",
    params(("id" = Uuid, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request rejected", body = RequestView),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Managers only"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn reject_request(
    auth: AuthUser,
    engine: web::Data<LifecycleEngine>,
    composer: web::Data<ViewComposer>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let decided = engine
        .decide(&auth, path.into_inner(), DecisionKind::Reject)
        .await?;
    Ok(HttpResponse::Ok().json(composer.enrich(decided).await))
}

/* =========================
Get single request
========================= */
#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(("id" = Uuid, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request found", body = RequestView),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not the owner and not a manager"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn get_request(
    auth: AuthUser,
    engine: web::Data<LifecycleEngine>,
    composer: web::Data<ViewComposer>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let request = engine.get(&auth, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(composer.enrich(request).await))
}

/* =========================
List requests (role-scoped)
========================= */
#[utoipa::path(
    get,
    path = "/api/requests",
    responses(
        (status = 200, description = "Managers get every request, employees their own",
         body = [RequestView]),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn list_requests(
    auth: AuthUser,
    engine: web::Data<LifecycleEngine>,
    composer: web::Data<ViewComposer>,
) -> Result<impl Responder, ApiError> {
    let requests = engine.list(&auth).await;
    Ok(HttpResponse::Ok().json(composer.enrich_all(requests).await))
}
