//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use axum_htmx::HxRequest;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionData, create_transaction},
    ui::{SyncAction, sync_response},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction from a JSON body.
///
/// Responds with `201 Created` and the new transaction as JSON. Requests from
/// the page also get told to reload.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    HxRequest(is_htmx): HxRequest,
    payload: Result<Json<TransactionData>, JsonRejection>,
) -> Response {
    let result = create(&state, payload).map(|transaction| {
        tracing::info!("Created transaction {}", transaction.id);
        (StatusCode::CREATED, Json(transaction))
    });

    sync_response(is_htmx, SyncAction::Save, result)
}

fn create(
    state: &CreateTransactionState,
    payload: Result<Json<TransactionData>, JsonRejection>,
) -> Result<Transaction, Error> {
    let builder = TransactionData::from_extractor(payload)?.into_builder()?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    create_transaction(builder, &connection)
}
