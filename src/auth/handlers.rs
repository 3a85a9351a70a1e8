use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    auth::{
        jwt::generate_access_token,
        password::{hash_password, verify_password},
    },
    config::Config,
    model::{role::Role, user::UserRecord},
    store::{DirectoryError, UserDirectory},
};

#[derive(Deserialize)]
pub struct RegisterReq {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub role: Role,
}

#[derive(Deserialize)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
struct UserSummary {
    id: Uuid,
    username: String,
    display_name: String,
    role: Role,
}

#[derive(Serialize)]
struct LoginResponse {
    access_token: String,
    user: UserSummary,
}

/// User registration handler
pub async fn register(
    payload: web::Json<RegisterReq>,
    directory: web::Data<dyn UserDirectory>,
) -> impl Responder {
    let username = payload.username.trim();

    if username.is_empty() || payload.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Username and password must not be empty"
        }));
    }

    let hashed = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!(error = %e, "Failed to hash password");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let record = UserRecord {
        id: Uuid::new_v4(),
        username: username.to_string(),
        display_name: payload.display_name.trim().to_string(),
        password_hash: hashed,
        role: payload.role,
    };
    let user_id = record.id;

    match directory.insert(record).await {
        Ok(()) => {
            info!(%user_id, username, "User registered");
            HttpResponse::Created().json(json!({
                "message": "User registered successfully",
                "id": user_id
            }))
        }
        Err(DirectoryError::UsernameTaken) => HttpResponse::Conflict().json(json!({
            "error": "Username already taken"
        })),
    }
}

#[instrument(
    name = "auth_login",
    skip(payload, directory, config),
    fields(username = %payload.username)
)]
pub async fn login(
    payload: web::Json<LoginReq>,
    directory: web::Data<dyn UserDirectory>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if payload.username.trim().is_empty() || payload.password.is_empty() {
        info!("Validation failed: empty username or password");
        return HttpResponse::BadRequest().body("Username or password required");
    }

    debug!("Looking up user in directory");

    let user = match directory.find_by_username(payload.username.trim()).await {
        Some(u) => u,
        None => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        info!("Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    debug!(user_id = %user.id, "Password verified, generating access token");

    let access_token =
        match generate_access_token(&user, &config.jwt_secret, config.access_token_ttl) {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(error = %e, "Failed to generate access token");
                return HttpResponse::InternalServerError().finish();
            }
        };

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        user: UserSummary {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            role: user.role,
        },
    })
}
