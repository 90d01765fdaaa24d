//! The add/edit transaction modal and the filter modal.
//!
//! The modals are HTML fragments swapped into `#modal-root`. Opening a modal
//! requests its fragment, closing it swaps in an empty fragment.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints,
    filters::{ALL, FilterParams, FilterQuery, MONTH_NAMES},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        loading_spinner,
    },
    timezone::get_local_offset,
    transaction::{Transaction, TransactionType, get_categories, get_transaction, get_years},
    ui::state::{ClickTarget, FilterFormState, ModalState, SubmitRequest, TransactionFormState},
};

/// The element the modal fragments are swapped into.
pub const MODAL_ROOT: &str = "#modal-root";

fn close_url(target: &str) -> String {
    format!("{}?target={target}", endpoints::CLOSE_MODAL)
}

/// Render `state`, [ModalState::Closed] renders nothing.
pub fn modal_view(state: &ModalState) -> Markup {
    match state {
        ModalState::Closed => html! {},
        ModalState::Transaction(form) => {
            modal_container("transactionModal", form.title(), transaction_form(form))
        }
        ModalState::Filter(form) => {
            modal_container("filterModal", "Filter Transactions", filter_form(form))
        }
    }
}

fn modal_container(id: &str, title: &str, body: Markup) -> Markup {
    html! {
        // Only clicks on the backdrop itself close the modal, not clicks that
        // bubble up from the dialog.
        div
            id=(id)
            class="modal fixed inset-0 z-50 flex items-center justify-center p-4 bg-black/50"
            hx-get=(close_url("backdrop"))
            hx-trigger="click[target===this], keyup[key=='Escape'] from:body"
            hx-target=(MODAL_ROOT)
        {
            div
                class="modal-content relative w-full max-w-md p-6 rounded shadow-lg
                    bg-white dark:bg-gray-800 text-gray-900 dark:text-white"
            {
                div class="flex items-center justify-between mb-4"
                {
                    h2 class="text-xl font-bold" { (title) }

                    button
                        type="button"
                        class="close text-2xl leading-none"
                        aria-label="Close"
                        hx-get=(close_url("close-button"))
                        hx-target=(MODAL_ROOT)
                    {
                        "×"
                    }
                }

                (body)
            }
        }
    }
}

fn type_label(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => "Income",
        TransactionType::Expense => "Expense",
    }
}

fn transaction_form(form: &TransactionFormState) -> Markup {
    let (create_url, update_url) = match form.submit_request() {
        SubmitRequest::Create(url) => (Some(url), None),
        SubmitRequest::Update(url) => (None, Some(url)),
    };
    let spinner = loading_spinner();

    html! {
        form
            id="transactionForm"
            hx-post=[create_url]
            hx-put=[update_url]
            hx-ext="json-enc"
            hx-swap="none"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            class="w-full space-y-4"
        {
            input type="hidden" name="id" id="transactionId" value=[form.id];

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    required
                    value=(form.date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    required
                    value=(form.description)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    name="category"
                    id="category"
                    type="text"
                    placeholder="Category"
                    list="categoryOptions"
                    required
                    value=(form.category)
                    class=(FORM_TEXT_INPUT_STYLE);

                datalist id="categoryOptions"
                {
                    @for category in &form.category_suggestions {
                        option value=(category) {}
                    }
                }
            }

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }

                select name="type" id="type" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for transaction_type in [TransactionType::Expense, TransactionType::Income] {
                        option
                            value=(transaction_type.as_str())
                            selected[transaction_type == form.transaction_type]
                        {
                            (type_label(transaction_type))
                        }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        min="0"
                        step="0.01"
                        placeholder="0.00"
                        required
                        value=[form.amount]
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator"
                {
                    (spinner)
                }
                (form.submit_label())
            }
        }
    }
}

fn filter_select(
    name: &str,
    id: &str,
    label: &str,
    options: &[(String, String)],
    selected: &str,
) -> Markup {
    html! {
        div
        {
            label for=(id) class=(FORM_LABEL_STYLE) { (label) }

            select name=(name) id=(id) class=(FORM_TEXT_INPUT_STYLE)
            {
                @for (value, text) in options {
                    option value=(value) selected[value == selected] { (text) }
                }
            }
        }
    }
}

fn filter_form(form: &FilterFormState) -> Markup {
    let all_option = |text: &str| (ALL.to_owned(), text.to_owned());

    let categories: Vec<_> = std::iter::once(all_option("All Categories"))
        .chain(
            form.categories
                .iter()
                .map(|category| (category.clone(), category.clone())),
        )
        .collect();

    let types: Vec<_> = std::iter::once(all_option("All Types"))
        .chain(
            [TransactionType::Income, TransactionType::Expense]
                .into_iter()
                .map(|transaction_type| {
                    (
                        transaction_type.as_str().to_owned(),
                        type_label(transaction_type).to_owned(),
                    )
                }),
        )
        .collect();

    let years: Vec<_> = std::iter::once(all_option("All Years"))
        .chain(
            form.years
                .iter()
                .map(|year| (year.to_string(), year.to_string())),
        )
        .collect();

    let months: Vec<_> = std::iter::once(all_option("All Months"))
        .chain(
            MONTH_NAMES
                .iter()
                .enumerate()
                .map(|(index, name)| ((index + 1).to_string(), (*name).to_owned())),
        )
        .collect();

    let params = &form.params;

    html! {
        form
            id="filterForm"
            hx-post=(endpoints::FILTER)
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            (filter_select("category", "filterCategory", "Category", &categories, params.selected_category()))
            (filter_select("type", "filterType", "Type", &types, params.selected_type()))
            (filter_select("year", "filterYear", "Year", &years, &params.selected_year()))
            (filter_select("month", "filterMonth", "Month", &months, &params.selected_month()))

            div class="flex gap-4"
            {
                a href=(endpoints::ROOT) class={ (BUTTON_SECONDARY_STYLE) " text-center flex-1" }
                {
                    "Clear"
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Apply Filters"
                }
            }
        }
    }
}

/// The state needed to render the modals.
#[derive(Debug, Clone)]
pub struct ModalsState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection for looking up transactions and filter options.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ModalsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl ModalsState {
    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let connection = self
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        f(&connection)
    }
}

fn render(state: ModalState) -> Response {
    modal_view(&state).into_response()
}

fn new_transaction_form(state: &ModalsState) -> Result<TransactionFormState, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();
    let categories = state.with_connection(get_categories)?;

    Ok(TransactionFormState::new_transaction(today).with_category_suggestions(categories))
}

/// Renders the modal for adding a transaction, dated today in the local timezone.
pub async fn get_new_transaction_modal(State(state): State<ModalsState>) -> Response {
    match new_transaction_form(&state) {
        Ok(form) => render(ModalState::Transaction(form)),
        Err(error) => error.into_alert_response("Could not open the transaction form."),
    }
}

fn load_transaction(
    state: &ModalsState,
    transaction_id: TransactionId,
) -> Result<(Transaction, Vec<String>), Error> {
    state.with_connection(|connection| {
        let transaction = get_transaction(transaction_id, connection)?;
        let categories = get_categories(connection)?;
        Ok((transaction, categories))
    })
}

/// Renders the modal for editing the transaction `transaction_id`.
///
/// Responds with `204 No Content`, leaving the page as is, if the transaction
/// does not exist.
pub async fn get_edit_transaction_modal(
    State(state): State<ModalsState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match load_transaction(&state, transaction_id) {
        Ok((transaction, categories)) => render(ModalState::Transaction(
            TransactionFormState::edit(&transaction).with_category_suggestions(categories),
        )),
        Err(Error::NotFound) => {
            tracing::warn!("Tried to edit missing transaction {transaction_id}");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(error) => error.into_alert_response("Could not open the transaction."),
    }
}

/// Renders the filter modal pre-filled with the filters in the query string.
pub async fn get_filter_modal(
    State(state): State<ModalsState>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let result = FilterParams::try_from(query).and_then(|params| {
        let (categories, years) = state.with_connection(|connection| {
            Ok((get_categories(connection)?, get_years(connection)?))
        })?;

        Ok(FilterFormState::new(params, categories, years))
    });

    match result {
        Ok(form) => render(ModalState::Filter(form)),
        Err(error) => error.into_alert_response("Could not open the filters."),
    }
}

/// The query parameters for closing a modal.
#[derive(Debug, Deserialize)]
pub struct CloseModalQuery {
    pub target: ClickTarget,
}

/// Closes the open modal if the click landed on the backdrop or the close button.
///
/// Clicks on the modal content respond with `204 No Content` so htmx leaves
/// the modal in place.
pub async fn close_modal(Query(query): Query<CloseModalQuery>) -> Response {
    if query.target.closes_modal() {
        render(ModalState::Closed)
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
