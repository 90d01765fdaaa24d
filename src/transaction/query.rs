//! Database queries for listing transactions with filters.

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{
    Error,
    filters::FilterParams,
    transaction::{Transaction, map_transaction_row},
};

/// Get the transactions that match `filter`, newest first.
///
/// Transactions on the same date are ordered by ID, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn query_transactions(
    filter: &FilterParams,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut conditions: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(category) = &filter.category {
        values.push(Value::Text(category.clone()));
        conditions.push(format!("category = ?{}", values.len()));
    }

    if let Some(transaction_type) = filter.transaction_type {
        values.push(Value::Text(transaction_type.as_str().to_owned()));
        conditions.push(format!("transaction_type = ?{}", values.len()));
    }

    if let Some(year) = filter.year {
        values.push(Value::Integer(year.into()));
        conditions.push(format!(
            "CAST(strftime('%Y', date) AS INTEGER) = ?{}",
            values.len()
        ));
    }

    if let Some(month) = filter.month {
        values.push(Value::Integer(month.into()));
        conditions.push(format!(
            "CAST(strftime('%m', date) AS INTEGER) = ?{}",
            values.len()
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let query = format!(
        "SELECT id, date, description, category, transaction_type, amount
        FROM \"transaction\"
        {where_clause}
        ORDER BY date DESC, id DESC"
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(values), map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Get the distinct category names in alphabetical order.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_categories(connection: &Connection) -> Result<Vec<String>, Error> {
    connection
        .prepare("SELECT DISTINCT category FROM \"transaction\" ORDER BY category")?
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Get the distinct years that have transactions, latest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_years(connection: &Connection) -> Result<Vec<i32>, Error> {
    connection
        .prepare(
            "SELECT DISTINCT CAST(strftime('%Y', date) AS INTEGER) AS year
            FROM \"transaction\"
            ORDER BY year DESC",
        )?
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}
