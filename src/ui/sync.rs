//! Turns the result of a transaction mutation into the response the page expects.
//!
//! htmx requests get `HX-Refresh: true` on success so the browser reloads the
//! page and shows the server state, and an error alert on failure. Other
//! clients get plain REST responses with JSON error bodies.

use axum::response::{IntoResponse, Response};
use axum_htmx::HxRefresh;

use crate::Error;

/// The mutation a response belongs to, which decides the alert headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Creating or updating a transaction.
    Save,
    /// Deleting a transaction.
    Delete,
}

impl SyncAction {
    pub fn error_message(self) -> &'static str {
        match self {
            SyncAction::Save => "Error saving transaction.",
            SyncAction::Delete => "Error deleting transaction.",
        }
    }
}

/// Build the response for a create, update or delete request.
///
/// `is_htmx` should be set when the request came from the page (the
/// `HX-Request` header was set).
pub fn sync_response<T: IntoResponse>(
    is_htmx: bool,
    action: SyncAction,
    result: Result<T, Error>,
) -> Response {
    match result {
        Ok(body) if is_htmx => (HxRefresh(true), body).into_response(),
        Ok(body) => body.into_response(),
        Err(error) => {
            tracing::error!("{} {error}", action.error_message());

            if is_htmx {
                error.into_alert_response(action.error_message())
            } else {
                error.into_json_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{StatusCode, header::CONTENT_TYPE},
        response::IntoResponse,
    };
    use axum_htmx::{HX_REDIRECT, HX_REFRESH, HX_RESWAP};

    use crate::{
        Error,
        test_utils::{parse_html_fragment, parse_json},
        ui::sync::{SyncAction, sync_response},
    };

    #[tokio::test]
    async fn htmx_success_reloads_page() {
        let response = sync_response(true, SyncAction::Save, Ok(StatusCode::CREATED));

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(HX_REFRESH).unwrap(), "true");
    }

    #[tokio::test]
    async fn plain_success_does_not_set_htmx_headers() {
        let response = sync_response(false, SyncAction::Delete, Ok(StatusCode::NO_CONTENT));

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(HX_REFRESH).is_none());
    }

    #[tokio::test]
    async fn htmx_failure_shows_alert_without_navigating() {
        let cases = [
            (SyncAction::Save, "Error saving transaction."),
            (SyncAction::Delete, "Error deleting transaction."),
        ];

        for (action, want_message) in cases {
            let response = sync_response::<StatusCode>(true, action, Err(Error::NotFound));

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert!(response.headers().get(HX_REFRESH).is_none());
            assert!(response.headers().get(HX_REDIRECT).is_none());
            assert_eq!(
                response.headers().get(HX_RESWAP).unwrap(),
                "innerHTML",
                "the alert must be swapped in even though the form uses hx-swap=\"none\""
            );

            let html = parse_html_fragment(response).await;
            let message = html
                .select(&scraper::Selector::parse("[role=alert] p").unwrap())
                .next()
                .expect("want alert message")
                .text()
                .collect::<String>();
            assert_eq!(message, want_message);
        }
    }

    #[tokio::test]
    async fn plain_failure_returns_json_error() {
        let response = sync_response::<StatusCode>(
            false,
            SyncAction::Save,
            Err(Error::InvalidTransaction("amount must not be negative".to_owned())),
        );

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = parse_json(response.into_response()).await;
        assert_eq!(
            body,
            serde_json::json!({ "error": "invalid transaction: amount must not be negative" })
        );
    }
}
