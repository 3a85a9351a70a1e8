use crate::api::leave_request::RequestPayload;
use crate::model::category::Category;
use crate::model::request::{Decision, DecisionKind, RequestState};
use crate::model::role::Role;
use crate::view::RequestView;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Time-Off Request Service API",
        version = "1.0.0",
        description = r#"
## Time-Off Request Service

Internal leave-request management for an organization.

### 🔹 Key Features
- **Employees** submit, edit, and withdraw their own pending requests
- **Managers** review and approve/reject any pending request
- Requests move through a strict lifecycle: Pending → Approved | Rejected

### 🔐 Security
All request endpoints are protected using **JWT Bearer authentication**
issued by `/auth/login`.

### 📦 Response Format
JSON-based RESTful responses; each request is returned enriched with the
submitter's display name.
"#,
    ),
    paths(
        crate::api::leave_request::list_requests,
        crate::api::leave_request::get_request,
        crate::api::leave_request::create_request,
        crate::api::leave_request::edit_request,
        crate::api::leave_request::delete_request,
        crate::api::leave_request::approve_request,
        crate::api::leave_request::reject_request,

        crate::api::category::list_categories,
    ),
    components(
        schemas(
            RequestPayload,
            RequestView,
            RequestState,
            DecisionKind,
            Decision,
            Category,
            Role
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Requests", description = "Leave request lifecycle APIs"),
        (name = "Categories", description = "Leave category catalog"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
