//! Recurring expense service
//!
//! Owns recurring definitions and the due-date projector that turns them into
//! concrete expenses. The projector itself is a pure function; the service
//! wraps it with the once-per-day gate and persistence.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Expense, Frequency, Money, NewExpense, RecurringExpense, RecurringExpenseId};
use crate::services::{CategoryService, ExpenseService};
use crate::storage::Storage;

/// Upper bound on instances generated for one definition in one run
const MAX_CATCH_UP_OCCURRENCES: usize = 10_000;

/// Result of projecting recurring definitions onto a window
#[derive(Debug, Clone, Default)]
pub struct DueExpenses {
    /// Instances that fell due, in definition order then date order
    pub due: Vec<NewExpense>,

    /// All definitions, with watermarks advanced past what was emitted
    pub updated: Vec<RecurringExpense>,
}

/// Compute the expenses that fell due in `(last_check, today]`
///
/// For each definition the walk starts at its watermark. A watermark before
/// the start date means nothing has been materialized yet, so the first
/// occurrence is the start date itself. From there the cursor advances one
/// period at a time, emitting every date that is on or after the start date,
/// strictly after the original watermark and not after `today`. The
/// watermark moves to the last emitted date.
///
/// When `today` is not after `last_check` the window is empty and nothing is
/// emitted.
pub fn generate_due_expenses(
    recurring: &[RecurringExpense],
    last_check: NaiveDate,
    today: NaiveDate,
) -> DueExpenses {
    if today <= last_check {
        return DueExpenses {
            due: Vec::new(),
            updated: recurring.to_vec(),
        };
    }

    let mut due = Vec::new();
    let mut updated = Vec::with_capacity(recurring.len());

    for definition in recurring {
        let dates = due_dates(definition, today);
        let mut definition = definition.clone();
        if let Some(last) = dates.last() {
            definition.last_added_date = *last;
        }
        due.extend(dates.into_iter().map(|d| definition.instance_on(d)));
        updated.push(definition);
    }

    DueExpenses { due, updated }
}

/// The occurrence dates of one definition up to and including `today`
fn due_dates(definition: &RecurringExpense, today: NaiveDate) -> Vec<NaiveDate> {
    let watermark = definition.last_added_date;
    let start = definition.start_date;

    // None until the first occurrence (the start date) has been visited
    let mut cursor: Option<NaiveDate> = if watermark < start {
        None
    } else {
        Some(watermark)
    };

    let mut dates = Vec::new();
    while dates.len() < MAX_CATCH_UP_OCCURRENCES {
        let next = match cursor {
            None => start,
            Some(current) => match definition.frequency.advance(current) {
                Some(next) => next,
                None => break,
            },
        };

        if next > today {
            break;
        }
        if next >= start && next > watermark {
            dates.push(next);
        }
        cursor = Some(next);
    }

    dates
}

/// Field changes for a recurring definition; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct RecurringUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub frequency: Option<Frequency>,
    pub start_date: Option<NaiveDate>,

    /// Explicit watermark; otherwise the current one is carried over
    pub last_added_date: Option<NaiveDate>,
}

/// Service for recurring expense management
pub struct RecurringService<'a> {
    storage: &'a Storage,
}

impl<'a> RecurringService<'a> {
    /// Create a new recurring service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All definitions in stored order
    pub fn list(&self) -> SpendlogResult<Vec<RecurringExpense>> {
        self.storage.recurring()
    }

    /// Find a definition by id or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> SpendlogResult<RecurringExpense> {
        let all = self.storage.recurring()?;
        all.iter()
            .find(|r| r.id.matches(identifier))
            .or_else(|| all.iter().find(|r| r.name.eq_ignore_ascii_case(identifier.trim())))
            .cloned()
            .ok_or_else(|| SpendlogError::recurring_not_found(identifier))
    }

    /// Create a definition; its first occurrence is `start_date`
    pub fn add(
        &self,
        name: &str,
        category: &str,
        price: Money,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> SpendlogResult<RecurringExpense> {
        let definition =
            RecurringExpense::new(name.trim(), category.trim(), price, frequency, start_date);
        definition
            .validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;
        CategoryService::new(self.storage).ensure_known(&definition.category)?;

        let mut all = self.storage.recurring()?;
        all.push(definition.clone());
        self.storage.save_recurring(&all)?;

        info!(id = %definition.id, name = %definition.name, "Added recurring expense");
        Ok(definition)
    }

    /// Edit a definition
    pub fn update(
        &self,
        id: RecurringExpenseId,
        update: RecurringUpdate,
    ) -> SpendlogResult<RecurringExpense> {
        let mut all = self.storage.recurring()?;
        let definition = all
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| SpendlogError::recurring_not_found(id.to_string()))?;

        let mut edited = definition.clone();
        if let Some(name) = update.name {
            edited.name = name.trim().to_string();
        }
        if let Some(category) = update.category {
            edited.category = category.trim().to_string();
        }
        if let Some(price) = update.price {
            edited.price = price;
        }
        if let Some(frequency) = update.frequency {
            edited.frequency = frequency;
        }
        if let Some(start_date) = update.start_date {
            edited.start_date = start_date;
        }
        if let Some(watermark) = update.last_added_date {
            edited.last_added_date = watermark;
        }

        edited
            .validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;
        CategoryService::new(self.storage).ensure_known(&edited.category)?;

        *definition = edited.clone();
        self.storage.save_recurring(&all)?;

        info!(id = %edited.id, "Updated recurring expense");
        Ok(edited)
    }

    /// Delete a definition; already materialized expenses are kept
    pub fn remove(&self, id: RecurringExpenseId) -> SpendlogResult<RecurringExpense> {
        let mut all = self.storage.recurring()?;
        let index = all
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| SpendlogError::recurring_not_found(id.to_string()))?;
        let removed = all.remove(index);
        self.storage.save_recurring(&all)?;

        info!(id = %removed.id, "Removed recurring expense");
        Ok(removed)
    }

    /// Run the projector once per calendar day
    ///
    /// Does nothing when a check already ran today (by `now`'s date).
    /// Otherwise materializes everything due through today and records the
    /// check time.
    pub fn run_daily_check(&self, now: DateTime<Utc>) -> SpendlogResult<Vec<Expense>> {
        let last_check = self.storage.last_recurring_check()?.date_naive();
        let today = now.date_naive();

        if today <= last_check {
            debug!(%last_check, %today, "Recurring check already ran today");
            return Ok(Vec::new());
        }

        let created = self.materialize(last_check, today)?;
        self.storage.set_last_recurring_check(now)?;
        Ok(created)
    }

    /// Materialize everything due through `today`, ignoring the daily gate
    pub fn materialize_due(&self, today: NaiveDate) -> SpendlogResult<Vec<Expense>> {
        let last_check = today.pred_opt().unwrap_or(today);
        self.materialize(last_check, today)
    }

    fn materialize(&self, last_check: NaiveDate, today: NaiveDate) -> SpendlogResult<Vec<Expense>> {
        let recurring = self.storage.recurring()?;
        let result = generate_due_expenses(&recurring, last_check, today);
        debug!(
            definitions = recurring.len(),
            due = result.due.len(),
            "Projected recurring expenses"
        );

        if result.due.is_empty() {
            return Ok(Vec::new());
        }

        let created = ExpenseService::new(self.storage).add_batch(result.due)?;
        self.storage.save_recurring(&result.updated)?;

        info!(count = created.len(), "Materialized recurring expenses");
        Ok(created)
    }
}
