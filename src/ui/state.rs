//! The state of the page's modal dialogs.
//!
//! Each modal request builds one of these values and renders it, the browser
//! keeps no state of its own.

use serde::Deserialize;
use time::Date;

use crate::{
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    filters::FilterParams,
    transaction::{Transaction, TransactionType},
};

/// Which modal is open, if any, and what its form contains.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    Transaction(TransactionFormState),
    Filter(FilterFormState),
}

/// The element a click on an open modal landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClickTarget {
    /// The explicit close control in the modal's corner.
    CloseButton,
    /// The dimmed area around the dialog, i.e. the modal container itself.
    Backdrop,
    /// Anywhere inside the dialog body.
    Content,
}

impl ClickTarget {
    pub fn closes_modal(self) -> bool {
        match self {
            ClickTarget::CloseButton | ClickTarget::Backdrop => true,
            ClickTarget::Content => false,
        }
    }
}

/// How the transaction form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    /// `POST` a new transaction to the URL.
    Create(String),
    /// `PUT` the changes to the URL of an existing transaction.
    Update(String),
}

/// The values of the add/edit transaction form.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFormState {
    /// Set when editing an existing transaction, rendered as a hidden input.
    pub id: Option<TransactionId>,
    pub date: Date,
    pub description: String,
    pub category: String,
    pub transaction_type: TransactionType,
    pub amount: Option<f64>,
    /// Existing categories suggested while typing.
    pub category_suggestions: Vec<String>,
}

impl TransactionFormState {
    /// An empty form dated `today`.
    pub fn new_transaction(today: Date) -> Self {
        Self {
            id: None,
            date: today,
            description: String::new(),
            category: String::new(),
            transaction_type: TransactionType::default(),
            amount: None,
            category_suggestions: Vec::new(),
        }
    }

    /// A form holding the exact values of `transaction`.
    pub fn edit(transaction: &Transaction) -> Self {
        Self {
            id: Some(transaction.id),
            date: transaction.date,
            description: transaction.description.clone(),
            category: transaction.category.clone(),
            transaction_type: transaction.transaction_type,
            amount: Some(transaction.amount),
            category_suggestions: Vec::new(),
        }
    }

    pub fn with_category_suggestions(mut self, categories: Vec<String>) -> Self {
        self.category_suggestions = categories;
        self
    }

    pub fn title(&self) -> &'static str {
        match self.id {
            Some(_) => "Edit Transaction",
            None => "Add New Transaction",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.id {
            Some(_) => "Update Transaction",
            None => "Add Transaction",
        }
    }

    pub fn submit_request(&self) -> SubmitRequest {
        match self.id {
            Some(id) => SubmitRequest::Update(format_endpoint(endpoints::TRANSACTION, id)),
            None => SubmitRequest::Create(endpoints::TRANSACTIONS_API.to_owned()),
        }
    }
}

/// The values and options of the filter form.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterFormState {
    pub params: FilterParams,
    /// Category options in alphabetical order.
    pub categories: Vec<String>,
    /// Year options, latest first.
    pub years: Vec<i32>,
}

impl FilterFormState {
    /// Pre-fill the form with `params`.
    ///
    /// A selected category or year that is not among the options is added to
    /// them, so the current filter always shows as selected.
    pub fn new(params: FilterParams, mut categories: Vec<String>, mut years: Vec<i32>) -> Self {
        if let Some(category) = &params.category
            && !categories.contains(category)
        {
            categories.push(category.clone());
            categories.sort();
        }

        if let Some(year) = params.year
            && !years.contains(&year)
        {
            years.push(year);
            years.sort_unstable_by(|a, b| b.cmp(a));
        }

        Self {
            params,
            categories,
            years,
        }
    }
}
