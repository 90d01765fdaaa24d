//! Aggregate totals for a list of transactions.

use serde::Serialize;

use crate::transaction::{Transaction, TransactionType};

/// The total income, total expenses and their difference.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl Summary {
    /// Sum the income and expenses in `transactions`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (income, expenses) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expenses), transaction| {
                    match transaction.transaction_type {
                        TransactionType::Income => (income + transaction.amount, expenses),
                        TransactionType::Expense => (income, expenses + transaction.amount),
                    }
                });

        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}
