//! The expense record and the fixed set of categories offered by the entry form.

use std::fmt::Display;

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The format dates are stored in, e.g. "2024-01-31".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Format `date` as [DATE_FORMAT].
fn format_date(date: Date) -> String {
    // Only fails for descriptions that need a time or offset, which DATE_FORMAT does not.
    date.format(DATE_FORMAT).unwrap_or_else(|error| {
        tracing::error!("could not format {date} with the stored date format: {error}");
        date.to_string()
    })
}

/// The categories a new expense can be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Category {
    /// Groceries, eating out, snacks.
    Food,
    /// Buses, fuel, taxis.
    Transport,
    /// Power, water, internet.
    Utilities,
    /// Movies, games, concerts.
    Entertainment,
    /// Anything else.
    Other,
}

impl Category {
    /// Every category in the order they are offered to the user.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Entertainment,
        Category::Other,
    ];

    /// The name of the category as it is written to the expense file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single expense as it is stored in the expense file.
///
/// The fields hold the stored text verbatim. Rows read from a hand-edited file
/// are trusted as-is, so the date and amount are only parsed when a view needs
/// them (see [Expense::parsed_date] and [Expense::amount_value]).
///
/// An expense has no ID, it is identified by its position in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expense {
    /// The date of the expense, normally formatted as [DATE_FORMAT].
    pub date: String,
    /// The category name, not necessarily one of [Category::ALL].
    pub category: String,
    /// The amount, normally a decimal number with two fractional digits.
    pub amount: String,
    /// Free text, may be empty.
    pub description: String,
}

impl Expense {
    /// Create an expense from the values entered in the form.
    ///
    /// `amount` is rounded to two decimal places. Negative zero is stored as "0.00".
    pub fn new(date: Date, category: Category, amount: f64, description: &str) -> Self {
        let amount = if amount == 0.0 { 0.0 } else { amount };

        Self {
            date: format_date(date),
            category: category.as_str().to_owned(),
            amount: format!("{amount:.2}"),
            description: description.to_owned(),
        }
    }

    /// Parse the stored date, returning `None` if it is not a valid calendar date.
    pub fn parsed_date(&self) -> Option<Date> {
        Date::parse(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Parse the stored amount.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is not a finite number,
    /// e.g. "twelve", "NaN" or "inf".
    pub fn amount_value(&self) -> Result<f64, Error> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or_else(|| Error::InvalidAmount(self.amount.clone()))
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        expense::{Category, Expense},
    };

    #[test]
    fn new_formats_date_and_amount() {
        let expense = Expense::new(date!(2024 - 01 - 05), Category::Food, 10.0, "lunch");

        assert_eq!(expense.date, "2024-01-05");
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.amount, "10.00");
        assert_eq!(expense.description, "lunch");
    }

    #[test]
    fn new_rounds_amount_to_two_decimal_places() {
        let expense = Expense::new(date!(2024 - 01 - 05), Category::Other, 5.555_1, "");

        assert_eq!(expense.amount, "5.56");
    }

    #[test]
    fn new_stores_negative_zero_as_zero() {
        let expense = Expense::new(date!(2024 - 01 - 05), Category::Other, -0.0, "");

        assert_eq!(expense.amount, "0.00");
    }

    #[test]
    fn new_pads_date_to_stored_format() {
        let expense = Expense::new(date!(0999 - 03 - 04), Category::Other, 1.0, "");

        assert_eq!(expense.date, "0999-03-04");
        assert_eq!(expense.parsed_date(), Some(date!(0999 - 03 - 04)));
    }

    #[test]
    fn parsed_date_rejects_invalid_dates() {
        let mut expense = Expense::new(date!(2024 - 02 - 29), Category::Food, 1.0, "");
        assert_eq!(expense.parsed_date(), Some(date!(2024 - 02 - 29)));

        for invalid in ["not-a-date", "2023-02-29", "2024-13-01", ""] {
            expense.date = invalid.to_owned();
            assert_eq!(expense.parsed_date(), None, "{invalid:?} should not parse");
        }
    }

    #[test]
    fn amount_value_rejects_malformed_amounts() {
        let mut expense = Expense::new(date!(2024 - 02 - 29), Category::Food, 12.5, "");
        assert_eq!(expense.amount_value().unwrap(), 12.5);

        expense.amount = "twelve".to_owned();
        let result = expense.amount_value();

        assert!(
            matches!(result, Err(Error::InvalidAmount(ref amount)) if amount == "twelve"),
            "got {result:?}"
        );
    }

    #[test]
    fn amount_value_rejects_non_finite_amounts() {
        let mut expense = Expense::new(date!(2024 - 02 - 29), Category::Food, 1.0, "");

        for non_finite in ["NaN", "inf", "-inf", "infinity"] {
            expense.amount = non_finite.to_owned();

            assert_eq!(
                expense.amount_value(),
                Err(Error::InvalidAmount(non_finite.to_owned()))
            );
        }
    }

    #[test]
    fn category_names_match_display() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
