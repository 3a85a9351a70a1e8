use actix_web::{HttpResponse, Responder, web};

use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::category::Category;
use crate::store::CategoryCatalog;

/* =========================
List categories
========================= */
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All permitted leave categories", body = [Category]),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn list_categories(
    _auth: AuthUser,
    catalog: web::Data<dyn CategoryCatalog>,
) -> Result<impl Responder, ApiError> {
    Ok(HttpResponse::Ok().json(catalog.list().await))
}
