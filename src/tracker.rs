//! The user actions on the expense page and the state they are applied to.
//!
//! Each request loads a fresh [Tracker] from the store, applies at most one
//! [Command], then renders the [ExpensePage] that [Tracker::page] builds.

use crate::{
    Error,
    expense::{CategoryFilter, Expense, ExpenseRepository, ExpenseStore},
    page::ExpensePage,
};

/// An action the user can take on the expense page.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a new expense.
    AddExpense(Expense),
    /// Delete the expense at the position it was rendered at.
    DeleteAt(usize),
    /// Change which category the filtered table and total show.
    SetFilter(CategoryFilter),
}

/// What happened when a [Command] was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The expense was appended and saved.
    Added,
    /// The expense was removed and the remaining expenses saved.
    Deleted,
    /// The delete position did not refer to an expense, nothing changed.
    NotFound,
    /// The filter was changed.
    FilterChanged,
}

/// The expenses for the current request and the selected filter.
pub struct Tracker<'a> {
    repository: ExpenseRepository<'a>,
    filter: CategoryFilter,
}

impl<'a> Tracker<'a> {
    /// Load the expenses from `store` with the category `filter` selected.
    pub fn load(store: &'a mut dyn ExpenseStore, filter: CategoryFilter) -> Result<Self, Error> {
        Ok(Self {
            repository: ExpenseRepository::load(store)?,
            filter,
        })
    }

    /// Apply `command`, saving any change to the store.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, Error> {
        match command {
            Command::AddExpense(expense) => {
                tracing::info!(
                    "adding {} expense of {} on {}",
                    expense.category,
                    expense.amount,
                    expense.date
                );
                self.repository.add(expense)?;
                Ok(CommandOutcome::Added)
            }
            Command::DeleteAt(index) => {
                if self.repository.delete_at(index)? {
                    tracing::info!("deleted expense at position {index}");
                    Ok(CommandOutcome::Deleted)
                } else {
                    Ok(CommandOutcome::NotFound)
                }
            }
            Command::SetFilter(filter) => {
                self.filter = filter;
                Ok(CommandOutcome::FilterChanged)
            }
        }
    }

    /// The expenses in the order they were added.
    pub fn expenses(&self) -> &[Expense] {
        self.repository.expenses()
    }

    /// The selected category filter.
    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Build the data for rendering the expense page.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if an expense has a malformed amount.
    pub fn page(&self) -> Result<ExpensePage, Error> {
        ExpensePage::build(self.expenses(), &self.filter)
    }
}
