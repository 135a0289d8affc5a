//! AI-assisted features
//!
//! Receipt extraction, spending insights, budget suggestions and savings
//! coaching. Each builds a prompt, makes a single model call and turns any
//! failure into one user-facing `SpendlogError::Ai` message. The underlying
//! cause is logged.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use super::model::{GenerationRequest, GenerativeModel, InlineImage};
use super::response::{parse_json_array, ResponseError};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{coerce_category, Budgets, Currency, Expense, Money, SavingsGoal};

/// Fewest expenses a budget suggestion is based on
pub const MIN_EXPENSES_FOR_SUGGESTIONS: usize = 5;

/// How many of the most recent expenses the coach sees
const COACH_EXPENSE_LIMIT: usize = 20;

pub(crate) const NO_EXPENSES_TO_ANALYZE: &str = "There are no expenses to analyze.";
pub(crate) const COACH_NEEDS_EXPENSES: &str =
    "Start by adding some expenses so I can help you with your goal!";

const RECEIPT_EMPTY: &str = "The AI returned an empty response. The receipt might be unclear.";
const RECEIPT_INVALID: &str =
    "The AI returned an invalid response. Please try a clearer receipt image.";
const RECEIPT_NOT_ARRAY: &str = "The AI response was not in the expected format (array).";
const RECEIPT_FAILED: &str =
    "Failed to analyze the receipt. The image might be blurry or the format unsupported.";
const INSIGHTS_FAILED: &str = "Failed to generate financial insights at this time.";
const SUGGESTIONS_INVALID: &str = "The AI returned an invalid response. Please try again.";
const SUGGESTIONS_FAILED: &str = "Failed to generate budget suggestions at this time.";
const COACH_FAILED: &str = "Failed to generate a coaching message at this time.";

/// A line item read off a receipt
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedItem {
    pub name: String,
    pub category: String,
    pub price: Money,
}

#[derive(Deserialize)]
struct RawItem {
    name: String,
    category: String,
    price: f64,
}

#[derive(Deserialize)]
struct RawSuggestion {
    category: String,
    budget: Value,
}

fn receipt_schema(categories: &[String]) -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "The name of the purchased item."
                },
                "category": {
                    "type": "STRING",
                    "description": format!("The category of the item. Must be one of: {}", categories.join(", "))
                },
                "price": {
                    "type": "NUMBER",
                    "description": "The price of the item as a number."
                }
            },
            "required": ["name", "category", "price"]
        }
    })
}

fn budget_schema(categories: &[String]) -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "category": {
                    "type": "STRING",
                    "description": format!("One of the provided categories: {}", categories.join(", "))
                },
                "budget": {
                    "type": "NUMBER",
                    "description": "A reasonable monthly budget amount for this category."
                }
            },
            "required": ["category", "budget"]
        }
    })
}

fn receipt_prompt(categories: &[String]) -> String {
    format!(
        "Extract the itemized list of expenses from this receipt. For each item, provide its name, \
         price, and category. Use the following categories: {}. If an item doesn't fit any \
         category, use \"Other\". The price should be a number.\n\n\
         Example response format:\n\
         [\n  {{\"name\": \"Organic Bananas\", \"category\": \"Groceries\", \"price\": 1.29}},\n  \
         {{\"name\": \"Almond Milk\", \"category\": \"Groceries\", \"price\": 3.49}}\n]",
        categories.join(", ")
    )
}

fn insights_prompt(expenses_json: &str, currency: &Currency) -> String {
    format!(
        "You are a financial analyst AI. Here is a list of recent expenses in {} ({}):\n{}\n\n\
         Analyze these spending habits and provide a brief, insightful summary (2-3 sentences).\n\
         - Highlight the category with the highest spending.\n\
         - Mention any potential areas for savings.\n\
         - Keep the tone encouraging and helpful.\n\
         - Use Markdown for formatting, for example, use **bold** for key terms.",
        currency.name, currency.code, expenses_json
    )
}

fn suggestions_prompt(expenses_json: &str, categories: &[String], currency: &Currency) -> String {
    format!(
        "You are an expert financial advisor AI. Based on the following list of recent expenses \
         in {} ({}), please suggest a reasonable monthly budget for each category.\n\
         The goal is to help the user save money while maintaining a realistic lifestyle.\n\
         Only provide suggestions for the following categories: {}.\n\n\
         Expense Data:\n{}\n\n\
         Please provide your response as a JSON array of objects, where each object has a \
         \"category\" and a \"budget\" field. The budget should be a positive number.",
        currency.name,
        currency.code,
        categories.join(", "),
        expenses_json
    )
}

fn coaching_prompt(
    goal: &SavingsGoal,
    budgets_json: &str,
    expenses_json: &str,
    currency: &Currency,
) -> String {
    format!(
        "You are an AI savings coach. Your tone should be encouraging, insightful, and positive.\n\
         The user has the following savings goal:\n\
         - Goal: Save for a \"{}\"\n\
         - Target Amount: {}\n\
         - Amount Saved So Far: {}\n\
         - Deadline: {}\n\n\
         Here is their spending and budget data for the current month in {} ({}):\n\
         - Budgets: {}\n\
         - Recent Expenses: {}\n\n\
         Based on this, provide a short (2-3 sentences) coaching message. Your message should:\n\
         1. Acknowledge their goal in a positive way.\n\
         2. Provide ONE specific, actionable tip based on their recent spending and budgets.\n\
         3. End with an encouraging statement to keep them motivated.\n\
         4. Use Markdown for formatting, like using **bold** for key terms.",
        goal.name,
        currency.format_amount(goal.target_amount),
        currency.format_amount(goal.saved_amount),
        goal.deadline,
        currency.name,
        currency.code,
        budgets_json,
        expenses_json
    )
}

/// Expense fields the model needs, without ids
fn expenses_for_prompt(expenses: &[Expense]) -> Value {
    Value::Array(
        expenses
            .iter()
            .map(|e| {
                json!({
                    "name": e.name,
                    "category": e.category,
                    "price": e.price,
                    "date": e.date,
                })
            })
            .collect(),
    )
}

fn to_pretty(value: &Value) -> SpendlogResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Read line items off a receipt image
///
/// Categories outside `categories` are replaced with the fallback category.
/// Items without a name or with a non-positive price are dropped.
pub async fn extract_receipt_items(
    model: &dyn GenerativeModel,
    image: InlineImage,
    categories: &[String],
) -> SpendlogResult<Vec<ExtractedItem>> {
    let request = GenerationRequest::text(receipt_prompt(categories))
        .with_image(image)
        .with_schema(receipt_schema(categories));

    let text = model.generate(request).await.map_err(|e| {
        warn!(error = %e, "Receipt extraction request failed");
        SpendlogError::Ai(RECEIPT_FAILED.into())
    })?;

    let values = parse_json_array(&text).map_err(|e| {
        warn!(error = ?e, "Receipt extraction returned an unusable response");
        SpendlogError::Ai(
            match e {
                ResponseError::Empty => RECEIPT_EMPTY,
                ResponseError::InvalidJson(_) => RECEIPT_INVALID,
                ResponseError::NotArray => RECEIPT_NOT_ARRAY,
            }
            .into(),
        )
    })?;

    let mut items = Vec::with_capacity(values.len());
    for value in values {
        let raw: RawItem = serde_json::from_value(value).map_err(|e| {
            warn!(error = %e, "Receipt item has the wrong shape");
            SpendlogError::Ai(RECEIPT_INVALID.into())
        })?;

        let price = Money::from_decimal(raw.price);
        let name = raw.name.trim().to_string();
        if name.is_empty() || !price.is_positive() {
            warn!(name = %name, price = raw.price, "Dropping unusable receipt item");
            continue;
        }

        let category = coerce_category(raw.category.trim(), categories);
        if category != raw.category.trim() {
            warn!(returned = %raw.category, "Coerced unknown receipt category");
        }
        items.push(ExtractedItem {
            name,
            category,
            price,
        });
    }

    Ok(items)
}

/// A short Markdown summary of spending habits
pub async fn generate_insights(
    model: &dyn GenerativeModel,
    expenses: &[Expense],
    currency: &Currency,
) -> SpendlogResult<String> {
    if expenses.is_empty() {
        return Ok(NO_EXPENSES_TO_ANALYZE.to_string());
    }

    let prompt = insights_prompt(&to_pretty(&expenses_for_prompt(expenses))?, currency);
    generate_text(model, prompt, INSIGHTS_FAILED).await
}

/// Suggested monthly budgets per known category, rounded to whole units
///
/// Suggestions for unknown categories or with negative or non-numeric
/// amounts are dropped.
pub async fn suggest_budgets(
    model: &dyn GenerativeModel,
    expenses: &[Expense],
    categories: &[String],
    currency: &Currency,
) -> SpendlogResult<Budgets> {
    if expenses.len() < MIN_EXPENSES_FOR_SUGGESTIONS {
        return Err(SpendlogError::InsufficientData(
            "Not enough expense data to generate suggestions. Please add more expenses.".into(),
        ));
    }

    let expenses_json = serde_json::to_string(&expenses_for_prompt(expenses))?;
    let request = GenerationRequest::text(suggestions_prompt(&expenses_json, categories, currency))
        .with_schema(budget_schema(categories));

    let text = model.generate(request).await.map_err(|e| {
        warn!(error = %e, "Budget suggestion request failed");
        SpendlogError::Ai(SUGGESTIONS_FAILED.into())
    })?;

    let values = parse_json_array(&text).map_err(|e| {
        warn!(error = ?e, "Budget suggestions returned an unusable response");
        SpendlogError::Ai(
            match e {
                ResponseError::InvalidJson(_) => SUGGESTIONS_INVALID,
                _ => SUGGESTIONS_FAILED,
            }
            .into(),
        )
    })?;

    let mut budgets = Budgets::new();
    for value in values {
        let Ok(raw) = serde_json::from_value::<RawSuggestion>(value) else {
            warn!("Dropping malformed budget suggestion");
            continue;
        };
        let amount = match raw.budget.as_f64() {
            Some(amount) if amount.is_finite() && amount >= 0.0 => amount,
            _ => {
                warn!(category = %raw.category, "Dropping budget suggestion with invalid amount");
                continue;
            }
        };
        if !categories.contains(&raw.category) {
            warn!(category = %raw.category, "Dropping budget suggestion for unknown category");
            continue;
        }
        budgets.set(raw.category, Money::from_decimal(amount.round()));
    }

    Ok(budgets)
}

/// A short coaching message toward a savings goal
///
/// `expenses` should be newest first; only the most recent are sent.
pub async fn coaching_message(
    model: &dyn GenerativeModel,
    goal: &SavingsGoal,
    expenses: &[Expense],
    budgets: &Budgets,
    currency: &Currency,
) -> SpendlogResult<String> {
    if expenses.is_empty() {
        return Ok(COACH_NEEDS_EXPENSES.to_string());
    }

    let recent = &expenses[..expenses.len().min(COACH_EXPENSE_LIMIT)];
    let prompt = coaching_prompt(
        goal,
        &serde_json::to_string(budgets)?,
        &to_pretty(&expenses_for_prompt(recent))?,
        currency,
    );
    generate_text(model, prompt, COACH_FAILED).await
}

async fn generate_text(
    model: &dyn GenerativeModel,
    prompt: String,
    failure: &str,
) -> SpendlogResult<String> {
    let text = model
        .generate(GenerationRequest::text(prompt))
        .await
        .map_err(|e| {
            warn!(error = %e, "Text generation failed");
            SpendlogError::Ai(failure.into())
        })?;

    let text = text.trim();
    if text.is_empty() {
        warn!("Text generation returned nothing");
        return Err(SpendlogError::Ai(failure.into()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedModel;
    use crate::models::{default_categories, NewExpense};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expenses(n: usize) -> Vec<Expense> {
        (0..n)
            .map(|i| {
                Expense::from_new(NewExpense::new(
                    format!("Item {}", i),
                    "Food",
                    Money::from_cents(1000 + i as i64),
                    date(2024, 3, 1 + i as u32),
                ))
            })
            .collect()
    }

    fn image() -> InlineImage {
        InlineImage::new("image/jpeg", vec![0xff, 0xd8])
    }

    #[tokio::test]
    async fn test_extract_coerces_unknown_categories() {
        let model = ScriptedModel::replying(
            r#"```json
[{"name": "Bananas", "category": "Groceries", "price": 1.29},
 {"name": "Candle", "category": "Decor", "price": 4.5}]
```"#,
        );

        let items = extract_receipt_items(&model, image(), &default_categories())
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, "Groceries");
        assert_eq!(items[0].price, Money::from_cents(129));
        assert_eq!(items[1].category, "Other");

        let request = model.last_request().unwrap();
        assert!(request.image.is_some());
        assert!(request.response_schema.is_some());
        assert!(request.prompt.contains("Food, Groceries, Transport"));
    }

    #[tokio::test]
    async fn test_extract_error_messages() {
        let cats = default_categories();

        let err = extract_receipt_items(&ScriptedModel::replying("  "), image(), &cats)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), RECEIPT_EMPTY);

        let err = extract_receipt_items(&ScriptedModel::replying("not json"), image(), &cats)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), RECEIPT_INVALID);

        let err = extract_receipt_items(&ScriptedModel::replying("{}"), image(), &cats)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), RECEIPT_NOT_ARRAY);

        let err = extract_receipt_items(&ScriptedModel::failing("timeout"), image(), &cats)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), RECEIPT_FAILED);
    }

    #[tokio::test]
    async fn test_extract_drops_unusable_items() {
        let model = ScriptedModel::replying(
            r#"[{"name": "", "category": "Food", "price": 2},
                {"name": "Refund", "category": "Food", "price": -3},
                {"name": "Soup", "category": "Food", "price": 3.2}]"#,
        );
        let items = extract_receipt_items(&model, image(), &default_categories())
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Soup");
    }

    #[tokio::test]
    async fn test_insights() {
        let currency = Currency::default();
        let model = ScriptedModel::replying("You spend most on **Food**.\n");

        assert_eq!(
            generate_insights(&model, &[], &currency).await.unwrap(),
            NO_EXPENSES_TO_ANALYZE
        );
        assert_eq!(model.request_count(), 0);

        let text = generate_insights(&model, &expenses(2), &currency).await.unwrap();
        assert_eq!(text, "You spend most on **Food**.");
        assert!(model.last_request().unwrap().prompt.contains("US Dollar (USD)"));

        let err = generate_insights(&ScriptedModel::failing("boom"), &expenses(1), &currency)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), INSIGHTS_FAILED);
    }

    #[tokio::test]
    async fn test_suggest_budgets_filters_and_rounds() {
        let model = ScriptedModel::replying(
            r#"[{"category": "Food", "budget": 420.6},
                {"category": "Yachts", "budget": 9000},
                {"category": "Health", "budget": -5},
                {"category": "Transport", "budget": "lots"},
                {"category": "Shopping", "budget": 0}]"#,
        );

        let budgets = suggest_budgets(
            &model,
            &expenses(5),
            &default_categories(),
            &Currency::default(),
        )
        .await
        .unwrap();

        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets.iter().next(), Some(("Food", Money::from_cents(42_100))));
        assert_eq!(budgets.limit_for("Shopping"), None);
    }

    #[tokio::test]
    async fn test_suggest_budgets_needs_five_expenses() {
        let model = ScriptedModel::replying("[]");
        let err = suggest_budgets(
            &model,
            &expenses(4),
            &default_categories(),
            &Currency::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SpendlogError::InsufficientData(_)));
        assert_eq!(model.request_count(), 0);
    }

    #[tokio::test]
    async fn test_coaching_message() {
        let goal = SavingsGoal::new(
            "Vacation",
            Money::from_cents(200_000),
            Money::from_cents(50_000),
            date(2024, 12, 1),
        );
        let budgets = Budgets::new();
        let currency = Currency::from_code("EUR").unwrap();

        let model = ScriptedModel::replying("Keep going!");
        assert_eq!(
            coaching_message(&model, &goal, &[], &budgets, &currency)
                .await
                .unwrap(),
            COACH_NEEDS_EXPENSES
        );

        let text = coaching_message(&model, &goal, &expenses(25), &budgets, &currency)
            .await
            .unwrap();
        assert_eq!(text, "Keep going!");

        let prompt = model.last_request().unwrap().prompt;
        assert!(prompt.contains("Save for a \"Vacation\""));
        assert!(prompt.contains("€2000.00"));
        assert!(prompt.contains("Item 19"));
        assert!(!prompt.contains("Item 20"));

        let err = coaching_message(
            &ScriptedModel::replying(""),
            &goal,
            &expenses(1),
            &budgets,
            &currency,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), COACH_FAILED);
    }
}
