//! Server entry-point: wires the REST endpoints, session middleware, store,
//! and OpenAPI docs.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::RequestTrace;
use backend::config::ServerConfig;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::{HttpState, HttpStatePorts, routes, session_middleware};
use backend::outbound::Argon2Hasher;
use backend::outbound::persistence::{
    DbPool, DieselListRepository, DieselUserRepository, MemoryStore, PoolConfig, run_migrations,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::parse();
    let key = config.session_key()?;
    let cookie_secure = !config.session_cookie_insecure;

    let state = build_state(&config).await?;

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(session_middleware(key.clone(), cookie_secure))
            .configure(routes::configure);

        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(web::Data::new(state.clone()))
            .wrap(RequestTrace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_address)?;

    health_state.mark_ready();
    info!(address = %config.bind_address, "server listening");
    server.run().await
}

/// Wire the HTTP state onto PostgreSQL when configured, or onto the
/// in-memory store otherwise.
async fn build_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let ports = match &config.database_url {
        Some(url) => {
            run_migrations(url)
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            info!("using PostgreSQL store");
            HttpStatePorts {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                lists: Arc::new(DieselListRepository::new(pool)),
                hasher: Arc::new(Argon2Hasher::new()),
            }
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store, data is lost on restart");
            let store = MemoryStore::new();
            HttpStatePorts {
                users: Arc::new(store.clone()),
                lists: Arc::new(store),
                hasher: Arc::new(Argon2Hasher::new()),
            }
        }
    };
    Ok(HttpState::new(ports))
}
