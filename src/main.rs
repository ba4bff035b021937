pub mod auth;
pub mod config;
pub mod err;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod update;
pub mod validation;

use std::sync::Arc;

use axum::Json;
use serde::Serialize;

use crate::config::Settings;
use crate::err::Success;
use crate::service::StudentService;
use crate::store::PgStore;

pub use crate::err::Error;

pub type Payload<T> = Result<Json<Success<T>>, Error>;

pub fn proceeds<V>(value: V) -> Payload<V>
where
    V: Serialize,
{
    Ok(Json(Success::of(value)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let settings = Settings::from_env()?;

    let store = PgStore::connect(&settings.database_url, settings.max_connections).await?;
    log::info!("Connected to the database");

    let app = routes::router(StudentService::new(Arc::new(store)));

    let addr = settings.addr();
    log::info!("Starting student registry on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown())
        .await?;
    Ok(())
}

async fn shutdown() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Could not listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
