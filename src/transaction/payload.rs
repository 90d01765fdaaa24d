//! The JSON request body used to create and update transactions.

use axum::{Json, extract::rejection::JsonRejection};
use serde::{Deserialize, Deserializer};
use time::Date;

use crate::{
    Error,
    transaction::{TransactionBuilder, TransactionType},
};

/// The fields of a transaction sent by the client, everything except the ID.
///
/// Unknown fields, such as the hidden `id` input of the transaction form, are
/// ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionData {
    /// When the transaction happened, formatted as `YYYY-MM-DD`.
    pub date: Date,
    /// Text detailing the transaction.
    pub description: String,
    /// The category name.
    pub category: String,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The value of the transaction in dollars.
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub amount: f64,
}

impl TransactionData {
    /// Unwrap the extracted JSON body, mapping rejections to [Error::InvalidTransaction].
    pub fn from_extractor(payload: Result<Json<Self>, JsonRejection>) -> Result<Self, Error> {
        payload
            .map(|Json(data)| data)
            .map_err(|rejection| Error::InvalidTransaction(rejection.body_text()))
    }

    /// Convert the payload into a validated [TransactionBuilder].
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] if the amount is negative or not finite.
    pub fn into_builder(self) -> Result<TransactionBuilder, Error> {
        TransactionBuilder {
            amount: self.amount,
            date: self.date,
            description: self.description,
            category: self.category,
            transaction_type: self.transaction_type,
        }
        .validate()
    }
}

/// HTML forms encoded as JSON send every value as a string, so the amount
/// may arrive as either `12.5` or `"12.5"`.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::String(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("amount \"{text}\" is not a number"))
        }),
    }
}
