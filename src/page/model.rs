//! The data needed to render the expense page.

use std::collections::BTreeMap;

use crate::{
    Error,
    expense::{
        CategoryFilter, Expense, category_totals, filter_by_category, filter_options,
        monthly_totals, total,
    },
};

/// An expense in the full list along with the position to delete it by.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    /// The index of the expense in the list as it was rendered.
    pub position: usize,
    /// The expense.
    pub expense: Expense,
}

/// Everything shown on the expense page, derived from the expenses and filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensePage {
    /// Every expense, unfiltered.
    pub rows: Vec<ExpenseRow>,
    /// The options for the category filter, starting with "All".
    pub filter_options: Vec<String>,
    /// The selected filter option.
    pub selected_filter: String,
    /// The expenses that match the selected filter.
    pub filtered: Vec<Expense>,
    /// The total of the filtered expenses.
    pub total: f64,
    /// The total of all expenses per "YYYY-MM" month, in chronological order.
    pub monthly_totals: BTreeMap<String, f64>,
    /// The total of all expenses per category.
    pub category_totals: Vec<(String, f64)>,
}

impl ExpensePage {
    /// Build the page data for `expenses` with `filter` selected.
    ///
    /// A filter for a category that no expense has, for example after its last
    /// expense was deleted, falls back to [CategoryFilter::All] so that the
    /// selected option always matches the table and total.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the total or category totals hit a
    /// malformed amount.
    pub fn build(expenses: &[Expense], filter: &CategoryFilter) -> Result<Self, Error> {
        let filter_options = filter_options(expenses);
        let filter = match filter {
            CategoryFilter::Category(category) if !filter_options.contains(category) => {
                tracing::debug!("No expenses in the category {category}, showing all expenses");
                &CategoryFilter::All
            }
            filter => filter,
        };

        let filtered = filter_by_category(expenses, filter);
        let total = total(filtered.iter().copied())?;
        let category_totals = category_totals(expenses)?;

        Ok(Self {
            rows: expenses
                .iter()
                .enumerate()
                .map(|(position, expense)| ExpenseRow {
                    position,
                    expense: expense.clone(),
                })
                .collect(),
            filter_options,
            selected_filter: filter.as_option().to_owned(),
            filtered: filtered.into_iter().cloned().collect(),
            total,
            monthly_totals: monthly_totals(expenses),
            category_totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        expense::{CategoryFilter, Expense},
        page::ExpensePage,
    };

    fn create_test_expense(date: &str, category: &str, amount: &str, description: &str) -> Expense {
        Expense {
            date: date.to_owned(),
            category: category.to_owned(),
            amount: amount.to_owned(),
            description: description.to_owned(),
        }
    }

    #[test]
    fn rows_are_numbered_by_position() {
        let expenses = vec![
            create_test_expense("2024-01-01", "Food", "1.00", "a"),
            create_test_expense("2024-01-02", "Food", "2.00", "b"),
        ];

        let page = ExpensePage::build(&expenses, &CategoryFilter::All).unwrap();

        let positions = page.rows.iter().map(|row| row.position).collect::<Vec<_>>();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(page.rows[1].expense, expenses[1]);
    }

    #[test]
    fn filter_applies_to_table_and_total_only() {
        let expenses = vec![
            create_test_expense("2024-01-01", "Food", "10.00", "lunch"),
            create_test_expense("2024-02-01", "Transport", "20.00", "bus"),
        ];

        let page =
            ExpensePage::build(&expenses, &CategoryFilter::Category("Transport".to_owned()))
                .unwrap();

        assert_eq!(page.selected_filter, "Transport");
        assert_eq!(page.filtered, vec![expenses[1].clone()]);
        assert_eq!(page.total, 20.0);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.monthly_totals.len(), 2);
        assert_eq!(page.category_totals.len(), 2);
        assert_eq!(page.filter_options, vec!["All", "Food", "Transport"]);
    }

    #[test]
    fn filter_for_missing_category_shows_all_expenses() {
        let expenses = vec![
            create_test_expense("2024-01-01", "Food", "10.00", "lunch"),
            create_test_expense("2024-02-01", "Transport", "20.00", "bus"),
        ];

        let page =
            ExpensePage::build(&expenses, &CategoryFilter::Category("Utilities".to_owned()))
                .unwrap();

        assert_eq!(page.selected_filter, "All");
        assert_eq!(page.filtered, expenses);
        assert_eq!(page.total, 30.0);
    }

    #[test]
    fn empty_page_has_zero_total_and_no_chart_data() {
        let page = ExpensePage::build(&[], &CategoryFilter::All).unwrap();

        assert!(page.rows.is_empty());
        assert!(page.filtered.is_empty());
        assert_eq!(page.total, 0.0);
        assert!(page.monthly_totals.is_empty());
        assert!(page.category_totals.is_empty());
        assert_eq!(page.selected_filter, "All");
    }

    #[test]
    fn malformed_amount_fails_the_page() {
        let expenses = vec![create_test_expense("2024-01-01", "Food", "1,50", "")];

        let result = ExpensePage::build(&expenses, &CategoryFilter::All);

        assert!(matches!(result, Err(Error::InvalidAmount(_))), "got {result:?}");
    }

    #[test]
    fn invalid_date_is_listed_but_not_in_monthly_totals() {
        let expenses = vec![
            create_test_expense("someday", "Food", "3.00", "mystery"),
            create_test_expense("2024-03-04", "Food", "1.00", ""),
        ];

        let page = ExpensePage::build(&expenses, &CategoryFilter::All).unwrap();

        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.total, 4.0);
        assert_eq!(page.monthly_totals.get("2024-03"), Some(&1.0));
        assert_eq!(page.monthly_totals.len(), 1);
    }
}
