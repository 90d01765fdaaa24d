//! Error alerts shown at the bottom of the page.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the alert
//! container.

use maud::{Markup, html};

/// An error message with a headline and optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    pub fn into_html(self) -> Markup {
        html! {
            div
                role="alert"
                class="flex items-start gap-3 p-4 mb-4 rounded text-red-800 bg-red-50 \
                    dark:bg-gray-800 dark:text-red-400 border border-red-300 shadow"
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="text-sm" { (self.details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="ms-auto font-bold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}
