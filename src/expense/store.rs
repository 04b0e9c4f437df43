//! Loading and saving expenses.
//!
//! [ExpenseStore] is the persistence seam: the server uses [CsvExpenseStore]
//! and tests can swap in [InMemoryExpenseStore].

use std::{
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use csv::{ReaderBuilder, WriterBuilder};

use crate::{Error, expense::Expense};

/// The header row of the expense file.
pub const HEADER: [&str; 4] = ["Date", "Category", "Amount", "Description"];

/// An expense store shared between request handlers.
pub type SharedExpenseStore = Arc<Mutex<dyn ExpenseStore>>;

/// Handles the persistence of the full list of expenses.
pub trait ExpenseStore: Send {
    /// Load all expenses in the order they were saved.
    ///
    /// A store that has never been saved returns an empty list.
    fn load(&self) -> Result<Vec<Expense>, Error>;

    /// Replace the stored expenses with `expenses`.
    fn save(&mut self, expenses: &[Expense]) -> Result<(), Error>;
}

/// Stores expenses in a CSV file with the columns in [HEADER].
///
/// Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct CsvExpenseStore {
    path: PathBuf,
}

impl CsvExpenseStore {
    /// Create a store backed by the CSV file at `path`.
    ///
    /// The file is not created until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path to the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExpenseStore for CsvExpenseStore {
    fn load(&self) -> Result<Vec<Expense>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    "expense file {} does not exist yet, starting with no expenses",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(error) => return Err(error.into()),
        };

        read_expenses(file)
    }

    fn save(&mut self, expenses: &[Expense]) -> Result<(), Error> {
        let file = File::create(&self.path)?;
        write_expenses(file, expenses)?;
        tracing::debug!(
            "saved {} expenses to {}",
            expenses.len(),
            self.path.display()
        );

        Ok(())
    }
}

/// Parse expenses from CSV text that starts with a header row.
///
/// Columns are matched by header name. Short rows leave the missing fields
/// empty and unknown columns are ignored.
pub fn read_expenses(reader: impl Read) -> Result<Vec<Expense>, Error> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers()?;
    let [date, category, amount, description] =
        HEADER.map(|name| headers.iter().position(|header| header.trim() == name));

    let mut expenses = Vec::new();

    for record in reader.records() {
        let record = record?;
        let field = |column: Option<usize>| {
            column
                .and_then(|index| record.get(index))
                .unwrap_or_default()
                .to_owned()
        };

        expenses.push(Expense {
            date: field(date),
            category: field(category),
            amount: field(amount),
            description: field(description),
        });
    }

    Ok(expenses)
}

/// Write `expenses` as CSV, starting with the header row.
pub fn write_expenses(writer: impl Write, expenses: &[Expense]) -> Result<(), Error> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(HEADER)?;

    for expense in expenses {
        writer.write_record([
            &expense.date,
            &expense.category,
            &expense.amount,
            &expense.description,
        ])?;
    }

    writer.flush()?;

    Ok(())
}

/// Keeps expenses in memory, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExpenseStore {
    expenses: Vec<Expense>,
}

impl InMemoryExpenseStore {
    /// Create a store that already holds `expenses`.
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn load(&self) -> Result<Vec<Expense>, Error> {
        Ok(self.expenses.clone())
    }

    fn save(&mut self, expenses: &[Expense]) -> Result<(), Error> {
        self.expenses = expenses.to_vec();
        Ok(())
    }
}
