use rust_decimal::Decimal;

use super::models::{AiAction, ParsedResponse, PrAction, WorkoutAction};
use crate::normalizer::normalize_exercise_name;
use storage::models::DEFAULT_RPE;
use storage::services::round_whole;

const MARKER: &str = "action:";

pub const CONFIDENCE_PLAIN_CHAT: f64 = 1.0;
pub const CONFIDENCE_PARSED: f64 = 0.9;
pub const CONFIDENCE_REJECTED: f64 = 0.5;

/// Location of an `ACTION:` line inside a reply.
struct ActionBlock<'a> {
    payload: &'a str,
    start: usize,
    end: usize,
}

/// Finds the first case-insensitive `ACTION:` marker followed by a JSON
/// object. Markers in prose (no `{` after them) are skipped. The payload runs
/// from the `{` to the end of that line.
fn find_block(reply: &str) -> Option<ActionBlock<'_>> {
    let lowered = reply.to_ascii_lowercase();
    let mut search_from = 0;

    while let Some(offset) = lowered[search_from..].find(MARKER) {
        let start = search_from + offset;
        let after_marker = start + MARKER.len();

        let rest = &reply[after_marker..];
        let payload_start = after_marker + (rest.len() - rest.trim_start().len());

        if !reply[payload_start..].starts_with('{') {
            search_from = after_marker;
            continue;
        }

        let (payload_end, end) = match reply[payload_start..].find('\n') {
            Some(offset) => (payload_start + offset, payload_start + offset + 1),
            None => (reply.len(), reply.len()),
        };

        return Some(ActionBlock {
            payload: reply[payload_start..payload_end].trim_end(),
            start,
            end,
        });
    }

    None
}

pub struct ActionParser;

impl ActionParser {
    /// Never fails: replies without a usable action degrade to plain chat.
    pub fn parse(reply: &str) -> ParsedResponse {
        let Some(block) = find_block(reply) else {
            return Self::chat(reply, CONFIDENCE_PLAIN_CHAT);
        };

        let action = match serde_json::from_str::<AiAction>(block.payload) {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!("Discarding malformed action payload: {}", e);
                return Self::chat(reply, CONFIDENCE_REJECTED);
            }
        };

        if let Err(e) = action.validate() {
            tracing::warn!(action = action.kind(), "Discarding invalid action: {}", e);
            return Self::chat(reply, CONFIDENCE_REJECTED);
        }

        let message = format!("{}{}", &reply[..block.start], &reply[block.end..]);
        let message = message.trim();

        tracing::debug!(action = action.kind(), "Parsed coach action");

        ParsedResponse {
            action: normalize(action),
            message: if message.is_empty() {
                reply.to_string()
            } else {
                message.to_string()
            },
            confidence: CONFIDENCE_PARSED,
            raw_response: reply.to_string(),
        }
    }

    fn chat(reply: &str, confidence: f64) -> ParsedResponse {
        ParsedResponse {
            action: AiAction::Chat,
            message: reply.to_string(),
            confidence,
            raw_response: reply.to_string(),
        }
    }
}

pub fn normalize(action: AiAction) -> AiAction {
    match action {
        AiAction::Workout(workout) => AiAction::Workout(normalize_workout(workout)),
        AiAction::Pr(pr) => AiAction::Pr(PrAction {
            exercise: normalize_exercise_name(&pr.exercise),
            ..pr
        }),
        other => other,
    }
}

fn normalize_workout(mut workout: WorkoutAction) -> WorkoutAction {
    for entry in &mut workout.exercises {
        entry.exercise = normalize_exercise_name(&entry.exercise);
        entry.completed = Some(true);
        entry.rpe = Some(entry.effective_rpe());
    }

    workout.session_rpe = match workout.session_rpe {
        Some(rpe) => Some(Decimal::from(round_whole(rpe))),
        None if !workout.exercises.is_empty() => {
            let total: Decimal = workout.exercises.iter().map(|e| e.rpe.unwrap_or(DEFAULT_RPE)).sum();
            let mean = total / Decimal::from(workout.exercises.len());
            Some(Decimal::from(round_whole(mean)))
        }
        None => None,
    };

    workout
}
