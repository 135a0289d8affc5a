//! AI collaborators
//!
//! The [`GenerativeModel`] trait is the seam to the external service;
//! [`GeminiClient`] implements it over HTTP. The [`assistant`] functions build
//! prompts, validate what comes back and phrase failures for the user.

pub mod assistant;
pub mod gemini;
pub mod model;
pub mod response;

pub use assistant::{
    coaching_message, extract_receipt_items, generate_insights, suggest_budgets, ExtractedItem,
    MIN_EXPENSES_FOR_SUGGESTIONS,
};
pub use gemini::GeminiClient;
pub use model::{GenerationRequest, GenerativeModel, InlineImage};
