//! Defines the endpoint for deleting a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use axum_htmx::HxRequest;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::delete_transaction,
    ui::{SyncAction, sync_response},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with `204 No Content`.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    HxRequest(is_htmx): HxRequest,
) -> Response {
    let result = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| delete_transaction(transaction_id, &connection))
        .map(|_| {
            tracing::info!("Deleted transaction {transaction_id}");
            StatusCode::NO_CONTENT
        });

    sync_response(is_htmx, SyncAction::Delete, result)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_htmx::{HX_REDIRECT, HX_REFRESH, HxRequest};
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        Error, initialize_db,
        test_utils::parse_html_fragment,
        transaction::{
            Transaction, TransactionType, create_transaction,
            delete_endpoint::{DeleteTransactionState, delete_transaction_endpoint},
            get_transaction,
        },
    };

    fn must_create_test_state() -> DeleteTransactionState {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        create_transaction(
            Transaction::build(1.23, date!(2025 - 10 - 26), "Test", TransactionType::Expense),
            &connection,
        )
        .unwrap();

        DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_transaction_and_reloads_page() {
        let state = must_create_test_state();

        let response =
            delete_transaction_endpoint(State(state.clone()), Path(1), HxRequest(true)).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers().get(HX_REFRESH).unwrap(), "true");
        assert_eq!(
            get_transaction(1, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn deleting_missing_transaction_shows_alert() {
        let state = must_create_test_state();

        let response = delete_transaction_endpoint(State(state), Path(2), HxRequest(true)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(HX_REFRESH).is_none());
        assert!(response.headers().get(HX_REDIRECT).is_none());
        let html = parse_html_fragment(response).await;
        let message = html
            .select(&Selector::parse("[role=alert] p").unwrap())
            .next()
            .expect("want alert message")
            .text()
            .collect::<String>();
        assert_eq!(message, "Error deleting transaction.");
    }

    #[tokio::test]
    async fn plain_delete_returns_no_content() {
        let state = must_create_test_state();

        let response = delete_transaction_endpoint(State(state), Path(1), HxRequest(false)).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(HX_REFRESH).is_none());
    }
}
