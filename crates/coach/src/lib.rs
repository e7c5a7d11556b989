pub mod actions;
pub mod context;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod normalizer;
pub mod prompts;
pub mod store;

pub use actions::{ActionParser, AiAction, ParsedResponse};
pub use context::build_athlete_context;
pub use error::{CoachError, Result};
pub use handlers::{ActionHandler, ActionOutcome};
pub use llm::{ChatMessage, ChatRole, DeepSeekClient};
pub use normalizer::normalize_exercise_name;
pub use prompts::PromptBuilder;
pub use store::{CoachStore, PgCoachStore};
