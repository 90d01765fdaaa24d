//! Defines the endpoint for updating an existing transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    response::Response,
};
use axum_htmx::HxRequest;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionData, update_transaction},
    ui::{SyncAction, sync_response},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that replaces the fields of a transaction with the JSON body.
///
/// Responds with `200 OK` and the updated transaction as JSON, or
/// `404 Not Found` if the transaction does not exist.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    HxRequest(is_htmx): HxRequest,
    payload: Result<Json<TransactionData>, JsonRejection>,
) -> Response {
    let result = update(&state, transaction_id, payload).map(|transaction| {
        tracing::info!("Updated transaction {transaction_id}");
        Json(transaction)
    });

    sync_response(is_htmx, SyncAction::Save, result)
}

fn update(
    state: &EditTransactionState,
    transaction_id: TransactionId,
    payload: Result<Json<TransactionData>, JsonRejection>,
) -> Result<Transaction, Error> {
    let builder = TransactionData::from_extractor(payload)?.into_builder()?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_transaction(transaction_id, builder, &connection)
}
