//! Filtering and summing expenses for the totals and charts.
//!
//! All functions are pure and work over whatever expenses they are given.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Error, expense::Expense};

/// The label of the filter option that selects every category.
pub const ALL_CATEGORIES_LABEL: &str = "All";

/// Selects which expenses are shown in the filtered table and total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every expense.
    #[default]
    All,
    /// Only expenses whose category matches exactly.
    Category(String),
}

impl CategoryFilter {
    /// Convert the selected filter option to a filter.
    ///
    /// A missing or empty value, or [ALL_CATEGORIES_LABEL], selects all categories.
    pub fn from_option(option: Option<&str>) -> Self {
        match option {
            None | Some("") | Some(ALL_CATEGORIES_LABEL) => Self::All,
            Some(category) => Self::Category(category.to_owned()),
        }
    }

    /// The value of the filter option for this filter.
    pub fn as_option(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES_LABEL,
            Self::Category(category) => category,
        }
    }

    fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => expense.category == *category,
        }
    }
}

/// Get the expenses that match `filter`, preserving their order.
pub fn filter_by_category<'a>(expenses: &'a [Expense], filter: &CategoryFilter) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|expense| filter.matches(expense))
        .collect()
}

/// The options for the category filter.
///
/// [ALL_CATEGORIES_LABEL] followed by the distinct categories that appear in
/// `expenses`, sorted alphabetically.
pub fn filter_options(expenses: &[Expense]) -> Vec<String> {
    let categories: BTreeSet<&str> = expenses
        .iter()
        .map(|expense| expense.category.as_str())
        .collect();

    std::iter::once(ALL_CATEGORIES_LABEL)
        .chain(categories)
        .map(str::to_owned)
        .collect()
}

/// Sum the amounts of `expenses`, zero if there are none.
///
/// # Errors
/// Returns [Error::InvalidAmount] if any amount is not a number.
pub fn total<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Result<f64, Error> {
    expenses
        .into_iter()
        .try_fold(0.0, |sum, expense| Ok(sum + expense.amount_value()?))
}

/// Sum the amounts of `expenses` for each month.
///
/// Months are keyed as "YYYY-MM" and iterate in chronological order.
/// Expenses whose date or amount cannot be parsed are left out of these
/// totals, but are still shown everywhere else.
pub fn monthly_totals<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();

    for expense in expenses {
        let Some(date) = expense.parsed_date() else {
            tracing::debug!(
                "leaving expense with date {:?} out of the monthly totals",
                expense.date
            );
            continue;
        };

        let Ok(amount) = expense.amount_value() else {
            tracing::debug!(
                "leaving expense with amount {:?} out of the monthly totals",
                expense.amount
            );
            continue;
        };

        let month = format!("{:04}-{:02}", date.year(), u8::from(date.month()));
        *totals.entry(month).or_insert(0.0) += amount;
    }

    totals
}

/// Sum the amounts of `expenses` for each category.
///
/// Categories are grouped by their exact name and listed in the order they
/// first appear.
///
/// # Errors
/// Returns [Error::InvalidAmount] if any amount is not a number.
pub fn category_totals<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> Result<Vec<(String, f64)>, Error> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for expense in expenses {
        let amount = expense.amount_value()?;

        match totals
            .iter_mut()
            .find(|(category, _)| *category == expense.category)
        {
            Some((_, total)) => *total += amount,
            None => totals.push((expense.category.clone(), amount)),
        }
    }

    Ok(totals)
}
