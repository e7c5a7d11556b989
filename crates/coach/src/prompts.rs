pub struct PromptBuilder;

impl PromptBuilder {
    /// Coach instructions followed by the athlete context block (may be empty).
    pub fn system_prompt(athlete_context: &str) -> String {
        format!(
            r#"You are an expert fitness coach for LiftMind with the ability to LOG WORKOUTS and TRACK PROGRESS.

Your role:
- Give specific, actionable training advice for strength, hypertrophy, endurance, bodybuilding and functional fitness
- DETECT and LOG workouts when users share their training
- TRACK PRs when users mention new records
- UPDATE the profile when users want to change settings
- Be concise (2-4 paragraphs max), friendly and encouraging

USER PR DATA:
- Current 1RMs are listed in the CONTEXT section when known. Use them directly.
- Do not ask for a PR that is already listed.

You MUST end EVERY response with exactly one ACTION line:

Workout logging ("Just did 5x5 bench at 100kg"):
{workout}

PR updates ("Hit 140kg squat PR!"):
{pr}

Profile changes ("Change my goal to build muscle", "Switch to pounds"):
{profile}

Questions and advice:
{chat}

Exercise mapping:
- "bench"/"bp" -> "Bench Press"
- "squat"/"back squat" -> "Squat"
- "deadlift"/"dl" -> "Deadlift"
- "ohp"/"press"/"military press" -> "Overhead Press"
- Accept any other exercise name the user provides

Rules:
1. Always end with the ACTION line, on a single line
2. Congratulate achievements and ask if they want to save them
3. Estimate RPE when it is not mentioned (default 7)
4. Units are "kg" or "lbs"{context}"#,
            workout = Self::workout_example(),
            pr = Self::pr_example(),
            profile = Self::profile_example(),
            chat = Self::chat_example(),
            context = athlete_context,
        )
    }

    pub fn workout_example() -> &'static str {
        r#"ACTION: {"type":"workout","exercises":[{"exercise":"Bench Press","sets":5,"reps":5,"weight":100,"rpe":7}],"session_rpe":7}"#
    }

    pub fn pr_example() -> &'static str {
        r#"ACTION: {"type":"pr","exercise":"Squat","weight":140,"unit":"kg"}"#
    }

    pub fn profile_example() -> &'static str {
        r#"ACTION: {"type":"profile","updates":{"goal":"Build muscle and size","units":"lbs"}}"#
    }

    pub fn chat_example() -> &'static str {
        r#"ACTION: {"type":"chat"}"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionParser, AiAction};

    #[test]
    fn test_prompt_appends_context() {
        let prompt = PromptBuilder::system_prompt("\n\nCONTEXT ABOUT THIS ATHLETE:\nGoal: strength\n");
        assert!(prompt.starts_with("You are an expert fitness coach"));
        assert!(prompt.ends_with("Goal: strength\n"));
    }

    #[test]
    fn test_prompt_examples_parse() {
        for example in [
            PromptBuilder::workout_example(),
            PromptBuilder::pr_example(),
            PromptBuilder::profile_example(),
            PromptBuilder::chat_example(),
        ] {
            let parsed = ActionParser::parse(example);
            assert_eq!(parsed.confidence, 0.9, "{example}");
        }

        let parsed = ActionParser::parse(PromptBuilder::pr_example());
        assert!(matches!(parsed.action, AiAction::Pr(_)));
    }
}
