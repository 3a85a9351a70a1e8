use crate::{
    api::{category, leave_request},
    auth::handlers,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let register_limiter = build_limiter(config.rate_register_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(Governor::new(&register_limiter))
                    .route(web::post().to(handlers::register)),
            ),
    );

    // Protected routes; identity is resolved per handler by the AuthUser
    // extractor, so an unauthenticated call fails before any processing.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(&protected_limiter))
            .service(
                web::scope("/requests")
                    // /requests
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::list_requests))
                            .route(web::post().to(leave_request::create_request)),
                    )
                    // /requests/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leave_request::get_request))
                            .route(web::put().to(leave_request::edit_request))
                            .route(web::delete().to(leave_request::delete_request)),
                    )
                    // /requests/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave_request::approve_request)),
                    )
                    // /requests/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(leave_request::reject_request)),
                    ),
            )
            .service(
                web::scope("/categories")
                    .service(web::resource("").route(web::get().to(category::list_categories))),
            ),
    );
}
