//! The server-rendered transactions page and the fragments htmx swaps into it.
//!
//! - `page`: the full page with the summary and the transactions table
//! - `render`: the table rows and summary cards
//! - `modal`: the add/edit transaction and filter modals
//! - `filter`: applying the filter form
//! - `sync`: the responses to create, update and delete requests

mod filter;
mod modal;
mod page;
mod render;
mod state;
mod sync;

pub use filter::submit_filter;
pub use modal::{
    close_modal, get_edit_transaction_modal, get_filter_modal, get_new_transaction_modal,
};
pub use page::get_transactions_page;
pub use sync::{SyncAction, sync_response};
