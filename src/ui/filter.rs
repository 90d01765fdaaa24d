//! Applies the filter form by navigating to the filtered URL.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use axum_htmx::{HxCurrentUrl, HxRedirect, HxRequest};

use crate::{
    endpoints,
    filters::{FilterParams, FilterQuery},
};

/// A route handler for the filter form.
///
/// Redirects to the current page with only the set filters in the query
/// string, e.g. choosing only the category "Food" navigates to `/?category=Food`.
pub async fn submit_filter(
    HxRequest(is_htmx): HxRequest,
    HxCurrentUrl(current_url): HxCurrentUrl,
    Form(query): Form<FilterQuery>,
) -> Response {
    let params = match FilterParams::try_from(query) {
        Ok(params) => params,
        Err(error) => {
            tracing::warn!("Rejected filter form: {error}");

            return if is_htmx {
                error.into_alert_response("Could not apply the filters.")
            } else {
                error.into_response()
            };
        }
    };

    let base_path = current_url
        .as_ref()
        .map(|url| url.path())
        .unwrap_or(endpoints::ROOT);
    let url = params.to_url(base_path);

    if is_htmx {
        (HxRedirect(url), StatusCode::SEE_OTHER).into_response()
    } else {
        Redirect::to(&url).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post};
    use axum_htmx::HX_REDIRECT;
    use axum_test::TestServer;

    use crate::{endpoints, ui::filter::submit_filter};

    fn get_test_server() -> TestServer {
        let app = axum::Router::new().route(endpoints::FILTER, post(submit_filter));

        TestServer::new(app)
    }

    #[tokio::test]
    async fn omits_unset_filters_from_url() {
        let server = get_test_server();

        let response = server
            .post(endpoints::FILTER)
            .add_header("HX-Request", "true")
            .add_header("HX-Current-URL", "http://localhost:3000/?type=income")
            .form(&[
                ("category", "Food"),
                ("type", "all"),
                ("year", "all"),
                ("month", "all"),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(HX_REDIRECT), "/?category=Food");
    }

    #[tokio::test]
    async fn all_filters_unset_returns_to_page() {
        let server = get_test_server();

        let response = server
            .post(endpoints::FILTER)
            .add_header("HX-Request", "true")
            .add_header("HX-Current-URL", "http://localhost:3000/?category=Food")
            .form(&[
                ("category", "all"),
                ("type", "all"),
                ("year", "all"),
                ("month", "all"),
            ])
            .await;

        assert_eq!(response.header(HX_REDIRECT), "/");
    }

    #[tokio::test]
    async fn keeps_filter_order() {
        let server = get_test_server();

        let response = server
            .post(endpoints::FILTER)
            .add_header("HX-Request", "true")
            .form(&[
                ("category", "Food"),
                ("type", "expense"),
                ("year", "2025"),
                ("month", "3"),
            ])
            .await;

        assert_eq!(
            response.header(HX_REDIRECT),
            "/?category=Food&type=expense&year=2025&month=3"
        );
    }

    #[tokio::test]
    async fn plain_form_post_redirects() {
        let server = get_test_server();

        let response = server
            .post(endpoints::FILTER)
            .form(&[("category", "all"), ("type", "income")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/?type=income");
    }

    #[tokio::test]
    async fn invalid_filter_shows_alert() {
        let server = get_test_server();

        let response = server
            .post(endpoints::FILTER)
            .add_header("HX-Request", "true")
            .form(&[("month", "13")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Could not apply the filters."));
        assert!(response.headers().get(HX_REDIRECT).is_none());
    }
}
