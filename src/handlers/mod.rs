pub mod auth;
pub mod completions;
pub mod habits;
pub mod health;
pub mod history;
pub mod moods;
pub mod notes;
pub mod profile;
pub mod workout_logs;
pub mod workouts;
