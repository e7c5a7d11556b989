use chrono::NaiveDate;
use coach::{
    ActionHandler, ActionOutcome, ActionParser, AiAction, ChatMessage, CoachError, DeepSeekClient,
    ParsedResponse, PgCoachStore, PromptBuilder, Result, build_athlete_context,
};
use sqlx::PgPool;
use storage::repository::{UserRepository, WorkoutRepository};
use uuid::Uuid;

/// Workouts scanned when building the athlete context.
const CONTEXT_WORKOUTS: i64 = 20;

/// Sends one user turn to the coach, grounded in the user's profile and history
pub async fn chat(
    pool: &PgPool,
    llm: Option<&DeepSeekClient>,
    user_id: Uuid,
    message: &str,
    history: &[ChatMessage],
) -> Result<ParsedResponse> {
    let llm = llm.ok_or(CoachError::MissingApiKey)?;

    let profile = UserRepository::new(pool).find_profile(user_id).await?;
    let workouts = WorkoutRepository::new(pool)
        .list_recent(user_id, CONTEXT_WORKOUTS)
        .await?;

    let system_prompt = PromptBuilder::system_prompt(&build_athlete_context(&profile, &workouts));
    let reply = llm.chat(&system_prompt, history, message).await?;

    let parsed = ActionParser::parse(&reply);
    tracing::info!(
        %user_id,
        action = parsed.action.kind(),
        confidence = parsed.confidence,
        "Coach reply parsed"
    );

    Ok(parsed)
}

/// Persists an action the user confirmed
pub async fn confirm_action(
    pool: &PgPool,
    user_id: Uuid,
    action: &AiAction,
    today: NaiveDate,
) -> Result<ActionOutcome> {
    let handler = ActionHandler::new(PgCoachStore::new(pool.clone()));
    handler.handle(user_id, action, today).await
}
