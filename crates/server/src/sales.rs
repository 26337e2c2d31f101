//! Sales API endpoints
//!
//! One resource, four verbs. Filters come from the query string, record
//! payloads and patches from the JSON body. Keys outside the schema are
//! dropped by the engine in both places. A body that is not the expected
//! JSON is a server error like any other failed write.

use std::collections::HashMap;

use api_types::{
    FieldMap,
    sales::{SalesList, SalesMessage},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{Affected, Predicate, Projection, schema};

use crate::{ServerError, server::ServerState};

const NOT_FOUND_MESSAGE: &str = "Record(s) not found!";

fn mutation_response(affected: Affected, verb: &str) -> (StatusCode, Json<SalesMessage>) {
    match affected {
        Affected::NotFound => (
            StatusCode::NOT_FOUND,
            Json(SalesMessage {
                message: NOT_FOUND_MESSAGE.to_string(),
                count: None,
            }),
        ),
        Affected::Rows(count) => (
            StatusCode::OK,
            Json(SalesMessage {
                message: format!("{count} record(s) {verb} successfully!"),
                count: Some(count),
            }),
        ),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Vec<FieldMap>>, JsonRejection>,
) -> Result<(StatusCode, Json<SalesMessage>), ServerError> {
    let Json(payload) = payload?;
    let created = state.engine.create_many(&payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SalesMessage {
            message: format!("{created} record(s) created successfully!"),
            count: Some(created),
        }),
    ))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<Json<SalesList>, ServerError> {
    let predicate = Predicate::compile(&filters);
    let records = state
        .engine
        .find(&predicate)
        .await?
        .iter()
        .map(|record| schema::project(record, Projection::Fields))
        .collect();

    Ok(Json(SalesList { records }))
}

pub async fn update(
    State(state): State<ServerState>,
    Query(filters): Query<HashMap<String, String>>,
    patch: Result<Json<FieldMap>, JsonRejection>,
) -> Result<(StatusCode, Json<SalesMessage>), ServerError> {
    let Json(patch) = patch?;
    let affected = state
        .engine
        .update_matching(&Predicate::compile(&filters), &patch)
        .await?;
    Ok(mutation_response(affected, "updated"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<(StatusCode, Json<SalesMessage>), ServerError> {
    let affected = state
        .engine
        .delete_matching(&Predicate::compile(&filters))
        .await?;
    Ok(mutation_response(affected, "deleted"))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<FieldMap>, ServerError> {
    let record = state
        .engine
        .record(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("record {id} not found")))?;
    Ok(Json(schema::project(&record, Projection::Fields)))
}

pub async fn update_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    patch: Result<Json<FieldMap>, JsonRejection>,
) -> Result<(StatusCode, Json<SalesMessage>), ServerError> {
    let Json(patch) = patch?;
    let affected = state
        .engine
        .update_matching(&Predicate::by_id(id), &patch)
        .await?;
    Ok(mutation_response(affected, "updated"))
}
