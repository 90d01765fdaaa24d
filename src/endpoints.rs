//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

/// The page that lists transactions with their summary.
pub const ROOT: &str = "/";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";

/// The fragment for the modal used to add a transaction.
pub const NEW_TRANSACTION_MODAL: &str = "/ui/modals/transaction/new";
/// The fragment for the modal used to edit a transaction.
pub const EDIT_TRANSACTION_MODAL: &str = "/ui/modals/transaction/{transaction_id}";
/// The fragment for the modal used to filter transactions.
pub const FILTER_MODAL: &str = "/ui/modals/filter";
/// The route that closes any open modal.
pub const CLOSE_MODAL: &str = "/ui/modals/close";
/// The route the filter form is submitted to.
pub const FILTER: &str = "/ui/filter";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
