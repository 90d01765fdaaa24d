//! Defines the endpoint for listing transactions as JSON.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    filters::{FilterParams, FilterQuery},
    transaction::{Transaction, query_transactions},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the transactions matching the query string
/// filters as a JSON array, newest first.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(query): Query<FilterQuery>,
) -> Response {
    match list(&state, query) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("could not list transactions: {error}");
            error.into_json_response()
        }
    }
}

fn list(state: &ListTransactionsState, query: FilterQuery) -> Result<Vec<Transaction>, Error> {
    let filter = FilterParams::try_from(query)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    query_transactions(&filter, &connection)
}
