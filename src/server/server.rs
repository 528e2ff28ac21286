//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::middleware::RequestContextMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{ConsoleError, Result};
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer as ActixHttpServer, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Build the Actix-web application for `state`
///
/// Registers the state, the guard and the page guard as app data so that
/// handlers and the guard adapters can reach them.
pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session_cookie = state.config.auth().session_cookie.clone();
    let guard = web::Data::new(state.guard.clone());
    let pages = web::Data::new(state.pages.clone());

    App::new()
        .app_data(web::Data::new(state))
        .app_data(guard)
        .app_data(pages)
        .wrap(RequestContextMiddleware::new(&session_cookie))
        .wrap(TracingLogger::default())
        .wrap(DefaultHeaders::new().add(("Server", "console-guard")))
        .configure(routes::configure_routes)
}

/// HTTP server
#[derive(Debug)]
pub struct ConsoleServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl ConsoleServer {
    /// Create a new HTTP server, connecting storage on the way
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let state = AppState::new(config.clone()).await?;
        Ok(Self::with_state(config.server().clone(), state))
    }

    /// Create a server around prepared state
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Start the HTTP server and run until shutdown
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = self.state;
        let mut server = ActixHttpServer::new(move || create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| ConsoleError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);
        info!("   GET   /health");
        info!("   GET   /api/auth/me");
        info!("   GET   /api/admin/users");
        info!("   PATCH /api/admin/users/{{id}}");
        info!("   GET   /api/admin/audit-logs");
        info!("   GET   /admin, /admin/settings, /admin/audit-logs");
        server.await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
