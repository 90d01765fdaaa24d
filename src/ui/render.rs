//! Renders the transactions table and the summary cards.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    summary::Summary,
    transaction::{Transaction, TransactionType},
};

/// The text shown in place of the rows when there are no transactions.
pub const EMPTY_TABLE_MESSAGE: &str = "No transactions found.";

/// The confirmation prompt shown before a transaction is deleted.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this transaction?";

fn amount_class(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => "income-amount text-green-600 dark:text-green-500",
        TransactionType::Expense => "expense-amount text-red-600 dark:text-red-500",
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_MODAL, transaction.id);
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type) }
            td class={ (TABLE_CELL_STYLE) " text-right " (amount_class(transaction.transaction_type)) }
            {
                (format_currency(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    button
                        type="button"
                        class={ "edit-button " (LINK_STYLE) }
                        data-id=(transaction.id)
                        hx-get=(edit_url)
                        hx-target="#modal-root"
                        hx-target-error="#alert-container"
                    {
                        "Edit"
                    }

                    button
                        type="button"
                        class={ "delete-button " (BUTTON_DELETE_STYLE) }
                        data-id=(transaction.id)
                        hx-delete=(delete_url)
                        hx-confirm=(DELETE_CONFIRMATION)
                        hx-swap="none"
                        hx-target-error="#alert-container"
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

/// Render the table body with one row per transaction, in the order given.
pub fn render_transactions(transactions: &[Transaction]) -> Markup {
    html! {
        tbody id="transactions-table-body"
        {
            @for transaction in transactions {
                (transaction_row(transaction))
            }

            @if transactions.is_empty() {
                tr class=(TABLE_ROW_STYLE)
                {
                    td colspan="6" class={ (TABLE_CELL_STYLE) " text-center" }
                    {
                        (EMPTY_TABLE_MESSAGE)
                    }
                }
            }
        }
    }
}

/// Render the full transactions table including its header.
pub fn transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md rounded w-full"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                (render_transactions(transactions))
            }
        }
    }
}

/// Render the total income, total expenses and net balance cards.
pub fn summary_view(summary: &Summary) -> Markup {
    let card_style = "flex-1 p-4 rounded shadow-md bg-white dark:bg-gray-800";
    let balance_class = if summary.balance < 0.0 {
        "expense-amount text-red-600 dark:text-red-500"
    } else {
        "income-amount text-green-600 dark:text-green-500"
    };

    html! {
        div class="flex flex-col sm:flex-row gap-4 w-full"
        {
            div class=(card_style)
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { "Total Income" }
                p id="totalIncome" class="text-2xl font-bold income-amount text-green-600 dark:text-green-500"
                {
                    (format_currency(summary.income))
                }
            }

            div class=(card_style)
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { "Total Expenses" }
                p id="totalExpenses" class="text-2xl font-bold expense-amount text-red-600 dark:text-red-500"
                {
                    (format_currency(summary.expenses))
                }
            }

            div class=(card_style)
            {
                h3 class="text-sm text-gray-500 dark:text-gray-400" { "Net Balance" }
                p id="netBalance" class={ "text-2xl font-bold " (balance_class) }
                {
                    (format_currency(summary.balance))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{ElementRef, Html, Selector};
    use time::macros::date;

    use crate::{
        summary::Summary,
        test_utils::assert_hx_endpoint,
        transaction::{Transaction, TransactionType},
        ui::render::{
            DELETE_CONFIRMATION, EMPTY_TABLE_MESSAGE, summary_view, transactions_table,
        },
    };

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 3,
                date: date!(2025 - 02 - 03),
                description: "Groceries".to_owned(),
                category: "Food".to_owned(),
                transaction_type: TransactionType::Expense,
                amount: 80.0,
            },
            Transaction {
                id: 2,
                date: date!(2025 - 01 - 20),
                description: "Lunch".to_owned(),
                category: "Food".to_owned(),
                transaction_type: TransactionType::Expense,
                amount: 12.5,
            },
            Transaction {
                id: 1,
                date: date!(2025 - 01 - 15),
                description: "Pay".to_owned(),
                category: "Salary".to_owned(),
                transaction_type: TransactionType::Income,
                amount: 2000.0,
            },
        ]
    }

    fn render_table(transactions: &[Transaction]) -> Html {
        Html::parse_fragment(&transactions_table(transactions).into_string())
    }

    fn rows(html: &Html) -> Vec<ElementRef<'_>> {
        html.select(&Selector::parse("tbody#transactions-table-body tr").unwrap())
            .collect()
    }

    fn cell_texts(row: &ElementRef<'_>) -> Vec<String> {
        row.select(&Selector::parse("td").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[test]
    fn renders_one_row_per_transaction_in_order() {
        let transactions = transactions();

        let html = render_table(&transactions);

        let rows = rows(&html);
        assert_eq!(rows.len(), transactions.len());
        for (row, transaction) in rows.iter().zip(&transactions) {
            assert_eq!(
                row.value().attr("data-id"),
                Some(transaction.id.to_string().as_str())
            );
            let cells = cell_texts(row);
            assert_eq!(cells[0], transaction.date.to_string());
            assert_eq!(cells[1], transaction.description);
            assert_eq!(cells[2], transaction.category);
        }
    }

    #[test]
    fn formats_amounts_with_type_class() {
        let html = render_table(&transactions());

        let rows = rows(&html);
        let amount_selector = Selector::parse("td.expense-amount, td.income-amount").unwrap();

        let groceries = rows[0].select(&amount_selector).next().unwrap();
        assert_eq!(groceries.text().collect::<String>().trim(), "$80.00");
        assert!(groceries.value().has_class(
            "expense-amount",
            scraper::CaseSensitivity::CaseSensitive
        ));

        let lunch = rows[1].select(&amount_selector).next().unwrap();
        assert_eq!(lunch.text().collect::<String>().trim(), "$12.50");

        let pay = rows[2].select(&amount_selector).next().unwrap();
        assert_eq!(pay.text().collect::<String>().trim(), "$2000.00");
        assert!(
            pay.value()
                .has_class("income-amount", scraper::CaseSensitivity::CaseSensitive)
        );
    }

    #[test]
    fn rows_have_edit_and_delete_buttons() {
        let html = render_table(&transactions());

        let row = rows(&html)[0];
        let edit_button = row
            .select(&Selector::parse("button.edit-button").unwrap())
            .next()
            .expect("want edit button");
        assert_eq!(edit_button.value().attr("data-id"), Some("3"));
        assert_hx_endpoint(&edit_button, "/ui/modals/transaction/3", "hx-get");
        assert_eq!(edit_button.value().attr("hx-target"), Some("#modal-root"));

        let delete_button = row
            .select(&Selector::parse("button.delete-button").unwrap())
            .next()
            .expect("want delete button");
        assert_hx_endpoint(&delete_button, "/api/transactions/3", "hx-delete");
        assert_eq!(
            delete_button.value().attr("hx-confirm"),
            Some(DELETE_CONFIRMATION)
        );
        assert_eq!(
            delete_button.value().attr("hx-target-error"),
            Some("#alert-container")
        );
    }

    #[test]
    fn empty_list_shows_message() {
        let html = render_table(&[]);

        let rows = rows(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(cell_texts(&rows[0]), vec![EMPTY_TABLE_MESSAGE.to_owned()]);
        assert!(
            html.select(&Selector::parse("button").unwrap())
                .next()
                .is_none()
        );
    }

    #[test]
    fn summary_shows_two_decimal_totals() {
        let summary = Summary::from_transactions(&transactions());

        let html = Html::parse_fragment(&summary_view(&summary).into_string());

        let text_of = |id: &str| {
            html.select(&Selector::parse(&format!("#{id}")).unwrap())
                .next()
                .unwrap_or_else(|| panic!("want element #{id}"))
                .text()
                .collect::<String>()
                .trim()
                .to_owned()
        };
        assert_eq!(text_of("totalIncome"), "$2000.00");
        assert_eq!(text_of("totalExpenses"), "$92.50");
        assert_eq!(text_of("netBalance"), "$1907.50");
    }

    #[test]
    fn negative_balance_is_shown_as_expense() {
        let summary = Summary {
            income: 0.0,
            expenses: 4.5,
            balance: -4.5,
        };

        let html = Html::parse_fragment(&summary_view(&summary).into_string());

        let balance = html
            .select(&Selector::parse("#netBalance").unwrap())
            .next()
            .unwrap();
        assert_eq!(balance.text().collect::<String>().trim(), "-$4.50");
        assert!(
            balance
                .value()
                .has_class("expense-amount", scraper::CaseSensitivity::CaseSensitive)
        );
    }
}
