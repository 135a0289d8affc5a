//! Expense service
//!
//! Provides business logic for expenses: manual entry, edits, deletion,
//! splitting one expense into several and importing receipt line items.
//! The stored list is kept sorted newest first.

use chrono::NaiveDate;
use tracing::info;

use crate::ai::{extract_receipt_items, ExtractedItem, GenerativeModel, InlineImage};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::expense::validate_fields;
use crate::models::{Expense, ExpenseId, Money, NewExpense, SplitGroupId, SplitPart};
use crate::services::filter::{sort_newest_first, ExpenseFilter};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Field changes for an expense; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub date: Option<NaiveDate>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All expenses, newest first
    pub fn all(&self) -> SpendlogResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses()?;
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Expenses matching a filter, newest first
    pub fn list(&self, filter: &ExpenseFilter, today: NaiveDate) -> SpendlogResult<Vec<Expense>> {
        Ok(filter.apply(&self.storage.expenses()?, today))
    }

    /// Find an expense by id (full, short or prefix form)
    pub fn find(&self, identifier: &str) -> SpendlogResult<Expense> {
        self.storage
            .expenses()?
            .into_iter()
            .find(|e| e.id.matches(identifier))
            .ok_or_else(|| SpendlogError::expense_not_found(identifier))
    }

    /// Record a manually entered expense
    pub fn add(&self, new: NewExpense) -> SpendlogResult<Expense> {
        let new = NewExpense {
            name: new.name.trim().to_string(),
            category: new.category.trim().to_string(),
            ..new
        };
        new.validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;
        CategoryService::new(self.storage).ensure_known(&new.category)?;

        let mut created = self.insert(vec![new])?;
        let expense = created.remove(0);
        info!(id = %expense.id, name = %expense.name, price = %expense.price, "Added expense");
        Ok(expense)
    }

    /// Record an expense under a category that does not exist yet
    ///
    /// The expense is validated first, then the category is created with the
    /// usual empty and duplicate checks. Nothing is written if either fails.
    pub fn add_in_new_category(&self, new: NewExpense) -> SpendlogResult<Expense> {
        let new = NewExpense {
            name: new.name.trim().to_string(),
            category: new.category.trim().to_string(),
            ..new
        };
        if new.category.is_empty() {
            return Err(SpendlogError::Validation(
                "New category name is required".into(),
            ));
        }
        new.validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        CategoryService::new(self.storage).add(&new.category)?;
        self.add(new)
    }

    /// Store several already-validated expenses, giving each a fresh id
    pub fn add_batch(&self, batch: Vec<NewExpense>) -> SpendlogResult<Vec<Expense>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        let created = self.insert(batch)?;
        info!(count = created.len(), "Added expenses");
        Ok(created)
    }

    fn insert(&self, batch: Vec<NewExpense>) -> SpendlogResult<Vec<Expense>> {
        let created: Vec<Expense> = batch.into_iter().map(Expense::from_new).collect();

        let mut expenses = self.storage.expenses()?;
        expenses.extend(created.iter().cloned());
        sort_newest_first(&mut expenses);
        self.storage.save_expenses(&expenses)?;

        Ok(created)
    }

    /// Edit an expense
    pub fn update(&self, id: ExpenseId, update: ExpenseUpdate) -> SpendlogResult<Expense> {
        let mut expenses = self.storage.expenses()?;
        let expense = expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| SpendlogError::expense_not_found(id.to_string()))?;

        let mut edited = expense.clone();
        if let Some(name) = update.name {
            edited.name = name.trim().to_string();
        }
        if let Some(category) = update.category {
            edited.category = category.trim().to_string();
        }
        if let Some(price) = update.price {
            edited.price = price;
        }
        if let Some(date) = update.date {
            edited.date = date;
        }

        validate_fields(&edited.name, &edited.category, edited.price)
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;
        if edited.category != expense.category {
            CategoryService::new(self.storage).ensure_known(&edited.category)?;
        }

        *expense = edited.clone();
        sort_newest_first(&mut expenses);
        self.storage.save_expenses(&expenses)?;

        info!(id = %edited.id, "Updated expense");
        Ok(edited)
    }

    /// Delete an expense
    pub fn remove(&self, id: ExpenseId) -> SpendlogResult<Expense> {
        let mut expenses = self.storage.expenses()?;
        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SpendlogError::expense_not_found(id.to_string()))?;
        let removed = expenses.remove(index);
        self.storage.save_expenses(&expenses)?;

        info!(id = %removed.id, "Removed expense");
        Ok(removed)
    }

    /// Replace one expense with several parts
    ///
    /// Every part needs a name, a known category and a positive price, and the
    /// prices must add up to the original exactly. The parts keep the
    /// original's date and share a new split group id. On any rejection the
    /// stored expenses are left untouched.
    pub fn split(&self, id: ExpenseId, parts: Vec<SplitPart>) -> SpendlogResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses()?;
        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SpendlogError::expense_not_found(id.to_string()))?;
        let original = &expenses[index];

        if parts.is_empty() {
            return Err(SpendlogError::Split(
                "A split needs at least one part".into(),
            ));
        }

        let categories = CategoryService::new(self.storage);
        for part in &parts {
            validate_fields(&part.name, &part.category, part.price)
                .map_err(|e| SpendlogError::Split(e.to_string()))?;
            if !categories.is_known(part.category.trim())? {
                return Err(SpendlogError::Split(format!(
                    "Unknown category '{}'",
                    part.category.trim()
                )));
            }
        }

        let total: Money = parts.iter().map(|p| p.price).sum();
        if total != original.price {
            return Err(SpendlogError::Split(format!(
                "Parts add up to {} but the expense is {}",
                total, original.price
            )));
        }

        let group = SplitGroupId::new();
        let date = original.date;
        let created: Vec<Expense> = parts
            .into_iter()
            .map(|part| {
                let mut expense = Expense::from_new(NewExpense::new(
                    part.name.trim(),
                    part.category.trim(),
                    part.price,
                    date,
                ));
                expense.split_group_id = Some(group);
                expense
            })
            .collect();

        let original = expenses.remove(index);
        expenses.extend(created.iter().cloned());
        sort_newest_first(&mut expenses);
        self.storage.save_expenses(&expenses)?;

        info!(
            original = %original.id,
            parts = created.len(),
            group = %group,
            "Split expense"
        );
        Ok(created)
    }

    /// Read the line items off a receipt without storing anything
    pub async fn extract_receipt(
        &self,
        model: &dyn GenerativeModel,
        image: InlineImage,
    ) -> SpendlogResult<Vec<ExtractedItem>> {
        let categories = self.storage.categories()?;
        let items = extract_receipt_items(model, image, &categories).await?;

        if items.is_empty() {
            return Err(SpendlogError::Ai(
                "No items could be extracted from the receipt. Please try a different image."
                    .into(),
            ));
        }
        Ok(items)
    }

    /// Apply category corrections to extracted items
    ///
    /// Each override is a 1-based item number and a known category.
    pub fn review_receipt_items(
        &self,
        mut items: Vec<ExtractedItem>,
        overrides: &[(usize, String)],
    ) -> SpendlogResult<Vec<ExtractedItem>> {
        let categories = CategoryService::new(self.storage);
        for (number, category) in overrides {
            let count = items.len();
            let item = number
                .checked_sub(1)
                .and_then(|index| items.get_mut(index))
                .ok_or_else(|| {
                    SpendlogError::Validation(format!(
                        "No receipt item {} (the receipt has {} item(s))",
                        number, count
                    ))
                })?;
            let category = category.trim();
            categories.ensure_known(category)?;
            item.category = category.to_string();
        }
        Ok(items)
    }

    /// Store reviewed receipt items as expenses dated `today`
    pub fn add_receipt_items(
        &self,
        items: Vec<ExtractedItem>,
        today: NaiveDate,
    ) -> SpendlogResult<Vec<Expense>> {
        let batch = items
            .into_iter()
            .map(|item| NewExpense::new(item.name, item.category, item.price, today))
            .collect();
        self.add_batch(batch)
    }

    /// Add every line item read off a receipt, dated `today`
    pub async fn process_receipt(
        &self,
        model: &dyn GenerativeModel,
        image: InlineImage,
        today: NaiveDate,
    ) -> SpendlogResult<Vec<Expense>> {
        let items = self.extract_receipt(model, image).await?;
        self.add_receipt_items(items, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedModel;
    use crate::config::paths::SpendlogPaths;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn add(service: &ExpenseService, name: &str, cents: i64, on: NaiveDate) -> Expense {
        service
            .add(NewExpense::new(name, "Food", Money::from_cents(cents), on))
            .unwrap()
    }

    #[test]
    fn test_add_and_list_newest_first() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        add(&service, "Lunch", 1200, date(2024, 3, 1));
        add(&service, "Dinner", 2500, date(2024, 3, 5));
        add(&service, "Breakfast", 800, date(2024, 2, 27));

        let names: Vec<String> = service.all().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Dinner", "Lunch", "Breakfast"]);
    }

    #[test]
    fn test_add_validates_before_writing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let on = date(2024, 3, 1);

        assert!(service
            .add(NewExpense::new(" ", "Food", Money::from_cents(100), on))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add(NewExpense::new("Tea", "Food", Money::zero(), on))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add(NewExpense::new("Tea", "Potions", Money::from_cents(100), on))
            .unwrap_err()
            .is_validation());
        assert!(storage.expenses().unwrap().is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = add(&service, "Taxi", 1800, date(2024, 3, 1));

        let updated = service
            .update(
                expense.id,
                ExpenseUpdate {
                    category: Some("Transport".into()),
                    price: Some(Money::from_cents(2000)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.category, "Transport");
        assert_eq!(service.find(&expense.id.to_string()).unwrap().price.cents(), 2000);

        service.remove(expense.id).unwrap();
        assert!(service.find(&expense.id.to_string()).unwrap_err().is_not_found());
        assert!(service.remove(expense.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_split_exact_total() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let keep = add(&service, "Coffee", 400, date(2024, 3, 2));
        let original = add(&service, "Supermarket", 4200, date(2024, 3, 1));

        let parts = service
            .split(
                original.id,
                vec![
                    SplitPart::new("Vegetables", "Groceries", Money::from_cents(2550)),
                    SplitPart::new("Shampoo", "Health", Money::from_cents(1650)),
                ],
            )
            .unwrap();

        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.date == original.date));
        assert!(parts[0].split_group_id.is_some());
        assert_eq!(parts[0].split_group_id, parts[1].split_group_id);

        let stored = storage.expenses().unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|e| e.id != original.id));
        assert!(stored.iter().any(|e| e.id == keep.id));
    }

    #[test]
    fn test_split_rejects_wrong_totals_without_changes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let original = add(&service, "Supermarket", 4200, date(2024, 3, 1));
        let before = storage.expenses().unwrap();

        for cents in [4199, 4201] {
            let err = service
                .split(
                    original.id,
                    vec![
                        SplitPart::new("A", "Food", Money::from_cents(2000)),
                        SplitPart::new("B", "Food", Money::from_cents(cents - 2000)),
                    ],
                )
                .unwrap_err();
            assert!(matches!(err, SpendlogError::Split(_)));
        }

        let err = service.split(original.id, Vec::new()).unwrap_err();
        assert!(matches!(err, SpendlogError::Split(_)));

        let err = service
            .split(
                original.id,
                vec![
                    SplitPart::new("", "Food", Money::from_cents(2100)),
                    SplitPart::new("B", "Food", Money::from_cents(2100)),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, SpendlogError::Split(_)));

        assert_eq!(storage.expenses().unwrap(), before);
    }

    #[tokio::test]
    async fn test_process_receipt_adds_items_dated_today() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let model = ScriptedModel::replying(
            r#"[{"name": "Milk", "category": "Groceries", "price": 2.49},
                {"name": "Gum", "category": "Snacks", "price": 1}]"#,
        );
        let today = date(2024, 3, 9);

        let created = service
            .process_receipt(&model, InlineImage::new("image/png", vec![1]), today)
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|e| e.date == today));
        assert_eq!(created[1].category, "Other");
        assert_eq!(storage.expenses().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_process_receipt_with_no_items_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let model = ScriptedModel::replying("[]");

        let err = service
            .process_receipt(&model, InlineImage::new("image/png", vec![1]), date(2024, 3, 9))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("No items could be extracted"));
        assert!(storage.expenses().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_receipt_review_corrects_categories_before_saving() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let model = ScriptedModel::replying(
            r#"[{"name": "Milk", "category": "Groceries", "price": 2.49},
                {"name": "Aspirin", "category": "Groceries", "price": 4}]"#,
        );

        let items = service
            .extract_receipt(&model, InlineImage::new("image/png", vec![1]))
            .await
            .unwrap();
        assert!(storage.expenses().unwrap().is_empty());

        let reviewed = service
            .review_receipt_items(items.clone(), &[(2, "Health".to_string())])
            .unwrap();
        assert_eq!(reviewed[0].category, "Groceries");
        assert_eq!(reviewed[1].category, "Health");

        assert!(service
            .review_receipt_items(items.clone(), &[(3, "Health".to_string())])
            .unwrap_err()
            .is_validation());
        assert!(service
            .review_receipt_items(items.clone(), &[(0, "Health".to_string())])
            .unwrap_err()
            .is_validation());
        assert!(service
            .review_receipt_items(items, &[(1, "Pharmacy".to_string())])
            .unwrap_err()
            .is_validation());

        let created = service
            .add_receipt_items(reviewed, date(2024, 3, 9))
            .unwrap();
        assert_eq!(created.len(), 2);
        let stored = storage.expenses().unwrap();
        assert!(stored.iter().any(|e| e.name == "Aspirin" && e.category == "Health"));
    }

    #[test]
    fn test_add_in_new_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let today = date(2024, 3, 9);

        let expense = service
            .add_in_new_category(NewExpense::new(
                "Dog food",
                " Pets ",
                Money::from_cents(1_800),
                today,
            ))
            .unwrap();
        assert_eq!(expense.category, "Pets");
        assert!(CategoryService::new(&storage).is_known("Pets").unwrap());

        let err = service
            .add_in_new_category(NewExpense::new("Treats", "pets", Money::from_cents(300), today))
            .unwrap_err();
        assert!(matches!(err, SpendlogError::Duplicate { .. }));

        let err = service
            .add_in_new_category(NewExpense::new("Leash", "", Money::from_cents(900), today))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add_in_new_category(NewExpense::new("Toy", "Toys", Money::zero(), today))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!CategoryService::new(&storage).is_known("Toys").unwrap());
        assert_eq!(storage.expenses().unwrap().len(), 1);
    }
}
