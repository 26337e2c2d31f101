use axum::{Router, routing::get};

use std::sync::Arc;

use crate::{dashboard, sales};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Build the application router around an engine.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route(
            "/sales",
            get(sales::list)
                .post(sales::create)
                .patch(sales::update)
                .delete(sales::delete),
        )
        .route("/sales/{id}", get(sales::get).put(sales::update_one))
        .route("/dashboard", get(dashboard::get))
        .with_state(state)
}

/// Serve the router on an already bound listener.
pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}
