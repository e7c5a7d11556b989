pub mod exercise;
pub mod training_type;
pub mod user;
pub mod workout;

pub use exercise::{DEFAULT_RPE, ExerciseEntry};
pub use training_type::TrainingType;
pub use user::{PreferencesPatch, Units, UserPreferences, UserProfile};
pub use workout::{Lift, NewWorkout, Workout, WorkoutSet};
