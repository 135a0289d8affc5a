//! Savings goal service
//!
//! Goals are managed independently of expenses. The coach reads goals,
//! budgets and expenses but never changes any of them.

use chrono::NaiveDate;
use tracing::info;

use crate::ai::{coaching_message, GenerativeModel};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Currency, GoalId, Money, SavingsGoal};
use crate::services::filter::sort_newest_first;
use crate::storage::Storage;

/// Field changes for a goal; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub saved_amount: Option<Money>,
    pub deadline: Option<NaiveDate>,
}

/// Service for savings goals
pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    /// Create a new goal service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self) -> SpendlogResult<Vec<SavingsGoal>> {
        self.storage.goals()
    }

    /// Find a goal by id or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> SpendlogResult<SavingsGoal> {
        let goals = self.storage.goals()?;
        goals
            .iter()
            .find(|g| g.id.matches(identifier))
            .or_else(|| goals.iter().find(|g| g.name.eq_ignore_ascii_case(identifier.trim())))
            .cloned()
            .ok_or_else(|| SpendlogError::goal_not_found(identifier))
    }

    pub fn add(
        &self,
        name: &str,
        target_amount: Money,
        saved_amount: Money,
        deadline: NaiveDate,
    ) -> SpendlogResult<SavingsGoal> {
        let goal = SavingsGoal::new(name.trim(), target_amount, saved_amount, deadline);
        goal.validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        let mut goals = self.storage.goals()?;
        goals.push(goal.clone());
        self.storage.save_goals(&goals)?;

        info!(id = %goal.id, name = %goal.name, "Added savings goal");
        Ok(goal)
    }

    pub fn update(&self, id: GoalId, update: GoalUpdate) -> SpendlogResult<SavingsGoal> {
        let mut goals = self.storage.goals()?;
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| SpendlogError::goal_not_found(id.to_string()))?;

        let mut edited = goal.clone();
        if let Some(name) = update.name {
            edited.name = name.trim().to_string();
        }
        if let Some(target) = update.target_amount {
            edited.target_amount = target;
        }
        if let Some(saved) = update.saved_amount {
            edited.saved_amount = saved;
        }
        if let Some(deadline) = update.deadline {
            edited.deadline = deadline;
        }
        edited
            .validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        *goal = edited.clone();
        self.storage.save_goals(&goals)?;

        info!(id = %edited.id, "Updated savings goal");
        Ok(edited)
    }

    pub fn remove(&self, id: GoalId) -> SpendlogResult<SavingsGoal> {
        let mut goals = self.storage.goals()?;
        let index = goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| SpendlogError::goal_not_found(id.to_string()))?;
        let removed = goals.remove(index);
        self.storage.save_goals(&goals)?;

        info!(id = %removed.id, "Removed savings goal");
        Ok(removed)
    }

    /// Ask the model for a coaching message toward a goal
    pub async fn coach(
        &self,
        model: &dyn GenerativeModel,
        id: GoalId,
        currency: &Currency,
    ) -> SpendlogResult<String> {
        let goal = self
            .storage
            .goals()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| SpendlogError::goal_not_found(id.to_string()))?;

        let mut expenses = self.storage.expenses()?;
        sort_newest_first(&mut expenses);
        let budgets = self.storage.budgets()?;

        coaching_message(model, &goal, &expenses, &budgets, currency).await
    }
}
