//! The list of expenses for a single request.

use crate::{
    Error,
    expense::{Expense, ExpenseStore},
};

/// The ordered expenses loaded from an [ExpenseStore].
///
/// A repository is loaded at the start of each request and never outlives it,
/// so the page always reflects what is in the store. Every mutation is saved
/// straight away.
pub struct ExpenseRepository<'a> {
    store: &'a mut dyn ExpenseStore,
    expenses: Vec<Expense>,
}

impl<'a> ExpenseRepository<'a> {
    /// Load the expenses from `store`.
    ///
    /// # Errors
    /// Returns an error if the store could not be read.
    pub fn load(store: &'a mut dyn ExpenseStore) -> Result<Self, Error> {
        let expenses = store.load()?;

        Ok(Self { store, expenses })
    }

    /// The expenses in the order they were added.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Replace the in-memory expenses with the contents of the store.
    pub fn reload(&mut self) -> Result<(), Error> {
        self.expenses = self.store.load()?;
        Ok(())
    }

    /// Append `expense` and save.
    pub fn add(&mut self, expense: Expense) -> Result<(), Error> {
        self.expenses.push(expense);
        self.store.save(&self.expenses)
    }

    /// Remove the expense at `index` and save.
    ///
    /// An out of range `index` is ignored and nothing is saved.
    ///
    /// Returns whether an expense was removed.
    pub fn delete_at(&mut self, index: usize) -> Result<bool, Error> {
        if index >= self.expenses.len() {
            tracing::debug!(
                "ignoring delete of expense {index}, there are only {} expenses",
                self.expenses.len()
            );
            return Ok(false);
        }

        self.expenses.remove(index);
        self.store.save(&self.expenses)?;

        Ok(true)
    }
}
