//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        list_transactions_endpoint,
    },
    ui::{
        close_modal, get_edit_transaction_modal, get_filter_modal, get_new_transaction_modal,
        get_transactions_page, submit_filter,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        );

    let ui_routes = Router::new()
        .route(endpoints::ROOT, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_MODAL,
            get(get_new_transaction_modal),
        )
        .route(
            endpoints::EDIT_TRANSACTION_MODAL,
            get(get_edit_transaction_modal),
        )
        .route(endpoints::FILTER_MODAL, get(get_filter_modal))
        .route(endpoints::CLOSE_MODAL, get(close_modal))
        .route(endpoints::FILTER, post(submit_filter));

    api_routes
        .merge(ui_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
