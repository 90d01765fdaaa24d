//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    #[default]
    Expense,
}

impl TransactionType {
    /// The lowercase name used in query strings, JSON and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransaction(format!(
                "unknown transaction type \"{other}\", expected \"income\" or \"expense\""
            ))),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category of the transaction, e.g. "Groceries", "Salary".
    pub category: String,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned. Always non-negative, the
    /// direction is given by `transaction_type`.
    pub amount: f64,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: f64,
        date: Date,
        description: &str,
        transaction_type: TransactionType,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description: description.to_owned(),
            category: String::new(),
            transaction_type,
        }
    }
}

/// The fields of a transaction that has not been saved to the database yet.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// use crate::transaction::{Transaction, TransactionType};
///
/// let builder = Transaction::build(
///         45.99,
///         date!(2025-01-15),
///         "Coffee beans",
///         TransactionType::Expense,
///     )
///     .category("Groceries");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The non-negative amount of money.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// A human-readable description of the transaction.
    pub description: String,
    /// A free-form category name, e.g. "Rent".
    pub category: String,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Check that the amount is a finite, non-negative number.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] describing the first invalid field.
    pub fn validate(self) -> Result<Self, Error> {
        if !self.amount.is_finite() {
            return Err(Error::InvalidTransaction(
                "amount must be a finite number".to_owned(),
            ));
        }

        if self.amount < 0.0 {
            return Err(Error::InvalidTransaction(format!(
                "amount must not be negative, got {}",
                self.amount
            )));
        }

        Ok(self)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const SELECT_COLUMNS: &str = "id, date, description, category, transaction_type, amount";

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "INSERT INTO \"transaction\" (date, description, category, transaction_type, amount)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {SELECT_COLUMNS}"
        ))?
        .query_row(
            (
                builder.date,
                builder.description,
                builder.category,
                builder.transaction_type,
                builder.amount,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Overwrite every field of the transaction `id` with the fields in `builder`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "UPDATE \"transaction\"
            SET \
                date = ?1, \
                description = ?2, \
                category = ?3, \
                transaction_type = ?4, \
                amount = ?5 \
            WHERE id = ?6
            RETURNING {SELECT_COLUMNS}"
        ))?
        .query_row(
            (
                builder.date,
                builder.description,
                builder.category,
                builder.transaction_type,
                builder.amount,
                id,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
            error => error.into(),
        })
}

type RowsAffected = usize;

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected: RowsAffected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    match rows_affected {
        0 => Err(Error::DeleteMissingTransaction),
        _ => Ok(()),
    }
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                transaction_type TEXT NOT NULL CHECK (transaction_type IN ('income', 'expense')),
                amount REAL NOT NULL
                )",
        (),
    )?;

    // Index used by the filters and the date ordering on the index page.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_category ON \"transaction\"(date, category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let description = row.get(2)?;
    let category = row.get(3)?;
    let transaction_type = row.get(4)?;
    let amount = row.get(5)?;

    Ok(Transaction {
        id,
        date,
        description,
        category,
        transaction_type,
        amount,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Transaction, TransactionType, count_transactions, create_transaction,
            delete_transaction, get_transaction, update_transaction,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(
                12.3,
                date!(2025 - 10 - 05),
                "Lunch",
                TransactionType::Expense,
            )
            .category("Food"),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.id, 1);
                assert_eq!(transaction.amount, 12.3);
                assert_eq!(transaction.date, date!(2025 - 10 - 05));
                assert_eq!(transaction.description, "Lunch");
                assert_eq!(transaction.category, "Food");
                assert_eq!(transaction.transaction_type, TransactionType::Expense);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn get_returns_created_transaction() {
        let conn = get_test_connection();
        let want = create_transaction(
            Transaction::build(99.0, date!(2025 - 03 - 01), "Pay", TransactionType::Income)
                .category("Salary"),
            &conn,
        )
        .unwrap();

        let got = get_transaction(want.id, &conn);

        assert_eq!(got, Ok(want));
    }

    #[test]
    fn get_missing_returns_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(42, &conn), Err(Error::NotFound));
    }

    #[test]
    fn update_overwrites_all_fields() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(1.23, date!(2025 - 10 - 27), "test", TransactionType::Expense)
                .category("Misc"),
            &conn,
        )
        .unwrap();

        let updated = update_transaction(
            transaction.id,
            Transaction::build(3.21, date!(2025 - 10 - 28), "foo", TransactionType::Income)
                .category("Gifts"),
            &conn,
        )
        .unwrap();

        let want = Transaction {
            id: transaction.id,
            date: date!(2025 - 10 - 28),
            description: "foo".to_owned(),
            category: "Gifts".to_owned(),
            transaction_type: TransactionType::Income,
            amount: 3.21,
        };
        assert_eq!(updated, want);
        assert_eq!(get_transaction(transaction.id, &conn), Ok(want));
    }

    #[test]
    fn update_missing_transaction_fails() {
        let conn = get_test_connection();

        let result = update_transaction(
            1,
            Transaction::build(1.0, date!(2025 - 01 - 01), "", TransactionType::Expense),
            &conn,
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(1.23, date!(2025 - 10 - 26), "Test", TransactionType::Expense),
            &conn,
        )
        .unwrap();

        delete_transaction(transaction.id, &conn).unwrap();

        assert_eq!(get_transaction(transaction.id, &conn), Err(Error::NotFound));
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn delete_missing_transaction_fails() {
        let conn = get_test_connection();

        assert_eq!(
            delete_transaction(1, &conn),
            Err(Error::DeleteMissingTransaction)
        );
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let today = date!(2025 - 10 - 05);
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build(i as f64, today, "", TransactionType::Expense),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
