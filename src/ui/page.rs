//! The transactions page: summary, table and the buttons that open the modals.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    filters::{FilterParams, FilterQuery},
    html::{
        BUTTON_SECONDARY_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles,
    },
    summary::Summary,
    transaction::{Transaction, query_transactions},
    ui::{
        modal::MODAL_ROOT,
        render::{summary_view, transactions_table},
    },
};

const BUTTON_ADD_STYLE: &str = "py-2 px-4 text-sm font-medium text-white \
    bg-blue-500 dark:bg-blue-600 hover:bg-blue-600 dark:hover:bg-blue-700 rounded";

fn transactions_view(transactions: &[Transaction], filters: &FilterParams) -> Markup {
    let summary = Summary::from_transactions(transactions);
    let query = filters.query_string();
    let filter_modal_url = if query.is_empty() {
        endpoints::FILTER_MODAL.to_owned()
    } else {
        format!("{}?{query}", endpoints::FILTER_MODAL)
    };

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full lg:max-w-5xl space-y-6"
            {
                header class="flex flex-wrap items-end justify-between gap-4"
                {
                    h1 class="text-3xl font-bold" { "Budget Tracker" }

                    div class="flex gap-2"
                    {
                        button
                            type="button"
                            id="openFilterModalBtn"
                            class=(BUTTON_SECONDARY_STYLE)
                            hx-get=(filter_modal_url)
                            hx-target=(MODAL_ROOT)
                            hx-target-error="#alert-container"
                        {
                            "Filter"
                        }

                        button
                            type="button"
                            id="openModalBtn"
                            class=(BUTTON_ADD_STYLE)
                            hx-get=(endpoints::NEW_TRANSACTION_MODAL)
                            hx-target=(MODAL_ROOT)
                            hx-target-error="#alert-container"
                        {
                            "Add Transaction"
                        }
                    }
                }

                @if !filters.is_empty() {
                    p id="activeFilters" class="text-sm"
                    {
                        "Showing: " (filters.describe()) " "
                        a href=(endpoints::ROOT) class=(LINK_STYLE) { "Clear filters" }
                    }
                }

                (summary_view(&summary))

                (transactions_table(transactions))
            }
        }

        div id="modal-root" {}
    };

    base("Transactions", &[dollar_input_styles()], &content)
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The database connection for querying transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the transactions page, only showing the transactions that match
/// the filters in the query string.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let filters = FilterParams::try_from(query)
        .inspect_err(|error| tracing::warn!("Rejected transactions page filters: {error}"))?;

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        query_transactions(&filters, &connection)
            .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?
    };

    Ok(transactions_view(&transactions, &filters).into_response())
}
