//! Query string filters for the transactions list.
//!
//! Filters arrive as the optional query parameters `category`, `type`, `year`
//! and `month`. The value "all", an empty value and a missing parameter all
//! mean the filter is unset.

use serde::{Deserialize, Serialize};

use crate::{Error, transaction::TransactionType};

/// The option value that stands for "no filter".
pub const ALL: &str = "all";

/// The names of the months, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The raw filter values from a query string or the filter form.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

/// Parsed filters, `None` means the filter is unset.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FilterParams {
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub year: Option<i32>,
    /// The month of the year, 1 to 12.
    pub month: Option<u8>,
}

fn unset_if_all(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty() && value != ALL)
}

impl TryFrom<FilterQuery> for FilterParams {
    type Error = Error;

    fn try_from(query: FilterQuery) -> Result<Self, Self::Error> {
        let transaction_type = unset_if_all(query.transaction_type)
            .map(|value| {
                value
                    .parse::<TransactionType>()
                    .map_err(|_| Error::InvalidFilter(format!("unknown type \"{value}\"")))
            })
            .transpose()?;

        let year = unset_if_all(query.year)
            .map(|value| {
                value
                    .parse::<i32>()
                    .map_err(|_| Error::InvalidFilter(format!("invalid year \"{value}\"")))
            })
            .transpose()?;

        let month = unset_if_all(query.month)
            .map(|value| match value.parse::<u8>() {
                Ok(month) if (1..=12).contains(&month) => Ok(month),
                _ => Err(Error::InvalidFilter(format!("invalid month \"{value}\""))),
            })
            .transpose()?;

        Ok(Self {
            category: unset_if_all(query.category),
            transaction_type,
            year,
            month,
        })
    }
}

impl FilterParams {
    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// The set filters as query string pairs, in form order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }

        if let Some(transaction_type) = self.transaction_type {
            pairs.push(("type", transaction_type.as_str().to_owned()));
        }

        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }

        if let Some(month) = self.month {
            pairs.push(("month", month.to_string()));
        }

        pairs
    }

    /// The set filters encoded as a query string without the leading '?'.
    pub fn query_string(&self) -> String {
        // Encoding a list of string pairs cannot fail.
        serde_urlencoded::to_string(self.query_pairs()).unwrap_or_default()
    }

    /// Build the URL for `base_url` with only the set filters in its query string.
    ///
    /// Any query string or fragment already on `base_url` is dropped.
    pub fn to_url(&self, base_url: &str) -> String {
        let end = base_url.find(['?', '#']).unwrap_or(base_url.len());
        let base = &base_url[..end];
        let base = if base.is_empty() { "/" } else { base };

        let query = self.query_string();

        if query.is_empty() {
            base.to_owned()
        } else {
            format!("{base}?{query}")
        }
    }

    /// The current value of each filter as a select option value, "all" when unset.
    pub fn selected_category(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL)
    }

    pub fn selected_type(&self) -> &str {
        self.transaction_type
            .map(|transaction_type| transaction_type.as_str())
            .unwrap_or(ALL)
    }

    pub fn selected_year(&self) -> String {
        self.year
            .map(|year| year.to_string())
            .unwrap_or_else(|| ALL.to_owned())
    }

    pub fn selected_month(&self) -> String {
        self.month
            .map(|month| month.to_string())
            .unwrap_or_else(|| ALL.to_owned())
    }

    /// A short human readable description of the set filters, e.g.
    /// "Food, expense, March 2025".
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if let Some(category) = &self.category {
            parts.push(category.clone());
        }

        if let Some(transaction_type) = self.transaction_type {
            parts.push(transaction_type.to_string());
        }

        let month_name = self
            .month
            .map(|month| MONTH_NAMES[usize::from(month) - 1]);

        match (month_name, self.year) {
            (Some(month), Some(year)) => parts.push(format!("{month} {year}")),
            (Some(month), None) => parts.push(month.to_owned()),
            (None, Some(year)) => parts.push(year.to_string()),
            (None, None) => {}
        }

        parts.join(", ")
    }
}
