pub mod models;
pub mod parser;

pub use models::{AiAction, ParsedResponse, PrAction, ProfileAction, WorkoutAction};
pub use parser::ActionParser;
