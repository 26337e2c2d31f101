use api_types::ErrorBody;
use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{router, run_with_listener};

mod dashboard;
mod sales;
mod server;

pub enum ServerError {
    Engine(EngineError),
    Payload(JsonRejection),
    NotFound(String),
}

// Every engine error is a 500. Storage messages stay in the log.
fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Validation(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Payload(rejection) => {
                (StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text())
            }
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Payload(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_validation_maps_to_500() {
        let res = ServerError::from(EngineError::Validation("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn engine_database_maps_to_500() {
        let err = EngineError::Database(sea_orm_err());
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn database_message_is_not_leaked() {
        let message = message_for_engine_error(EngineError::Database(sea_orm_err()));
        assert_eq!(message, "internal server error");
    }

    #[test]
    fn validation_message_is_kept() {
        let message =
            message_for_engine_error(EngineError::Validation("sales is required".to_string()));
        assert_eq!(message, "Invalid record: sales is required");
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = ServerError::NotFound("x".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    fn sea_orm_err() -> sea_orm::DbErr {
        sea_orm::DbErr::Custom("disk I/O error at /var/lib/sales.db".to_string())
    }
}
