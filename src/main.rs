use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

use timeoff::config::Config;
use timeoff::docs::ApiDoc;
use timeoff::engine::{DecisionPolicy, LifecycleEngine};
use timeoff::routes;
use timeoff::store::{
    CategoryCatalog, MemoryCatalog, MemoryDirectory, MemoryStore, RequestStore, UserDirectory,
    seed::load_seed,
};
use timeoff::view::ViewComposer;

use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Time-Off Request Service"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    // One store, directory, and catalog for the run duration; everything
    // downstream receives them by handle, no process-wide singletons.
    let store: Arc<dyn RequestStore> = Arc::new(MemoryStore::new());
    let directory = Arc::new(MemoryDirectory::new());
    let catalog = Arc::new(MemoryCatalog::new());

    if let Some(path) = &config.seed_file {
        match load_seed(path, &directory, &catalog).await {
            Ok((users, categories)) => {
                info!(users, categories, path, "seed applied");
            }
            Err(e) => warn!(error = %e, path, "seed failed, starting empty"),
        }
    }

    let directory: Arc<dyn UserDirectory> = directory;
    let catalog: Arc<dyn CategoryCatalog> = catalog;

    let engine = Data::new(LifecycleEngine::new(
        store.clone(),
        catalog.clone(),
        DecisionPolicy {
            allow_self_decision: config.allow_self_decision,
        },
    ));
    let composer = Data::new(ViewComposer::new(directory.clone()));

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(config.clone()))
            .app_data(Data::from(directory.clone()))
            .app_data(Data::from(catalog.clone()))
            .app_data(engine.clone())
            .app_data(composer.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
