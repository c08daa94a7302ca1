use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::completion::HabitCompletion;
use crate::models::habit::Habit;
use crate::models::mood::MoodRating;
use crate::models::note::Note;
use crate::models::workout::{CardioEntry, Workout, WorkoutLog};
use crate::services::schedule;

/// One row of the historical month view: everything recorded for a single
/// calendar day, merged across the tracking tables.
#[derive(Debug, Serialize)]
pub struct DayHistory {
    pub date: NaiveDate,
    /// Name of the logged workout; None when nothing was logged or the
    /// referenced workout no longer exists.
    pub workout_name: Option<String>,
    pub cardio: Vec<CardioEntry>,
    pub body_weight: Option<f64>,
    pub workout_note: Option<String>,
    /// Habit counts are None on days with neither applicable habits nor
    /// recorded completion rows.
    pub habits_completed: Option<u32>,
    pub habits_total: Option<u32>,
    pub mood: Option<i16>,
    pub note: Option<String>,
}

/// All calendar days of a month, or None for an out-of-range year/month.
pub fn month_days(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(first.iter_days().take_while(|d| *d < next).collect())
}

/// Merge prefetched rows into one `DayHistory` per day.
///
/// The habit denominator reconciles two sources of truth: the habits'
/// current schedules and the completion rows actually recorded. The larger
/// of the two counts wins, so a habit that was later rescheduled or
/// deleted still shows up on days where a row was written.
pub fn build_history(
    days: &[NaiveDate],
    habits: &[Habit],
    completions: &[HabitCompletion],
    logs: &[WorkoutLog],
    workouts: &[Workout],
    moods: &[MoodRating],
    notes: &[Note],
) -> Vec<DayHistory> {
    let workout_names: HashMap<Uuid, &str> =
        workouts.iter().map(|w| (w.id, w.name.as_str())).collect();
    let logs_by_date: HashMap<NaiveDate, &WorkoutLog> =
        logs.iter().map(|l| (l.log_date, l)).collect();
    let moods_by_date: HashMap<NaiveDate, i16> =
        moods.iter().map(|m| (m.rated_on, m.rating)).collect();
    let notes_by_date: HashMap<NaiveDate, &str> = notes
        .iter()
        .map(|n| (n.note_date, n.content.as_str()))
        .collect();

    let mut completions_by_date: HashMap<NaiveDate, Vec<&HabitCompletion>> = HashMap::new();
    for completion in completions {
        completions_by_date
            .entry(completion.completed_on)
            .or_default()
            .push(completion);
    }

    days.iter()
        .map(|&date| {
            let log = logs_by_date.get(&date);
            let workout_name = log
                .and_then(|l| l.workout_id)
                .and_then(|id| workout_names.get(&id))
                .map(|name| name.to_string());
            let cardio = log.map(|l| l.cardio.0.clone()).unwrap_or_default();
            let body_weight = log.and_then(|l| l.body_weight);
            let workout_note = log.and_then(|l| l.note.clone());

            let applicable = habits
                .iter()
                .filter(|h| {
                    schedule::is_applicable(h.created_at.date_naive(), &h.scheduled_days, date)
                })
                .count();
            let recorded: &[&HabitCompletion] =
                completions_by_date.get(&date).map_or(&[], |v| v.as_slice());
            let completed = recorded.iter().filter(|c| c.completed).count();

            let (habits_completed, habits_total) = if applicable == 0 && recorded.is_empty() {
                (None, None)
            } else {
                (
                    Some(completed as u32),
                    Some(applicable.max(recorded.len()) as u32),
                )
            };

            DayHistory {
                date,
                workout_name,
                cardio,
                body_weight,
                workout_note,
                habits_completed,
                habits_total,
                mood: moods_by_date.get(&date).copied(),
                note: notes_by_date.get(&date).map(|s| s.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sqlx::types::Json;

    use crate::models::workout::{Exercise, ExerciseSet};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(name: &str, scheduled_days: [bool; 7], created: NaiveDate) -> Habit {
        Habit {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.into(),
            scheduled_days: scheduled_days.to_vec(),
            created_at: Utc
                .from_utc_datetime(&created.and_hms_opt(8, 0, 0).unwrap()),
        }
    }

    fn completion(habit_id: Uuid, day: NaiveDate, completed: bool) -> HabitCompletion {
        HabitCompletion {
            id: Uuid::new_v4(),
            habit_id,
            user_id: Uuid::new_v4(),
            completed_on: day,
            completed,
            created_at: Utc::now(),
        }
    }

    fn workout(name: &str) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.into(),
            day_of_week: 1,
            exercises: Json(vec![Exercise {
                name: "Squat".into(),
                sets: vec![ExerciseSet {
                    reps: 8,
                    weight: 120.0,
                }],
            }]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn log(workout_id: Option<Uuid>, day: NaiveDate) -> WorkoutLog {
        WorkoutLog {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            log_date: day,
            workout_id,
            exercises: Json(vec![]),
            cardio: Json(vec![CardioEntry {
                name: "Stair master".into(),
                minutes: 30,
            }]),
            body_weight: Some(81.5),
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn month_days_covers_whole_month() {
        let days = month_days(2024, 2).unwrap();
        assert_eq!(days.len(), 29); // 2024 is a leap year
        assert_eq!(days[0], date(2024, 2, 1));
        assert_eq!(days[28], date(2024, 2, 29));

        let december = month_days(2023, 12).unwrap();
        assert_eq!(december.len(), 31);
        assert!(month_days(2024, 13).is_none());
    }

    #[test]
    fn empty_day_has_no_counts() {
        let days = [date(2024, 3, 4)];
        let history = build_history(&days, &[], &[], &[], &[], &[], &[]);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].habits_completed, None);
        assert_eq!(history[0].habits_total, None);
        assert_eq!(history[0].workout_name, None);
        assert!(history[0].cardio.is_empty());
    }

    #[test]
    fn denominator_is_applicable_count_without_rows() {
        // Two everyday habits, no completions recorded: 0/2.
        let habits = [
            habit("Read", [true; 7], date(2024, 1, 1)),
            habit("Stretch", [true; 7], date(2024, 1, 1)),
        ];
        let days = [date(2024, 3, 4)];
        let history = build_history(&days, &habits, &[], &[], &[], &[], &[]);
        assert_eq!(history[0].habits_completed, Some(0));
        assert_eq!(history[0].habits_total, Some(2));
    }

    #[test]
    fn denominator_uses_recorded_rows_for_rescheduled_habit() {
        // The habit no longer covers Mondays, but a row was recorded on one
        // before the reschedule: the recorded count must win.
        let monday = date(2024, 3, 4);
        let h = habit("Run", [false, false, true, false, false, false, false], date(2024, 1, 1));
        let completions = [completion(h.id, monday, true)];
        let history = build_history(&[monday], &[h], &completions, &[], &[], &[], &[]);
        assert_eq!(history[0].habits_completed, Some(1));
        assert_eq!(history[0].habits_total, Some(1));
    }

    #[test]
    fn denominator_is_max_of_both_sources() {
        let monday = date(2024, 3, 4);
        // Three applicable habits, two recorded rows, one of them completed.
        let habits = [
            habit("A", [true; 7], date(2024, 1, 1)),
            habit("B", [true; 7], date(2024, 1, 1)),
            habit("C", [true; 7], date(2024, 1, 1)),
        ];
        let completions = [
            completion(habits[0].id, monday, true),
            completion(habits[1].id, monday, false),
        ];
        let history = build_history(&[monday], &habits, &completions, &[], &[], &[], &[]);
        assert_eq!(history[0].habits_completed, Some(1));
        assert_eq!(history[0].habits_total, Some(3));
    }

    #[test]
    fn habit_does_not_count_before_creation() {
        let h = habit("New habit", [true; 7], date(2024, 3, 15));
        let before = [date(2024, 3, 4)];
        let after = [date(2024, 3, 18)];
        assert_eq!(
            build_history(&before, &[h.clone()], &[], &[], &[], &[], &[])[0].habits_total,
            None
        );
        assert_eq!(
            build_history(&after, &[h], &[], &[], &[], &[], &[])[0].habits_total,
            Some(1)
        );
    }

    #[test]
    fn workout_name_resolves_through_log() {
        let day = date(2024, 3, 4);
        let w = workout("Legs & Abs");
        let logs = [log(Some(w.id), day)];
        let history = build_history(&[day], &[], &[], &logs, &[w], &[], &[]);
        assert_eq!(history[0].workout_name.as_deref(), Some("Legs & Abs"));
        assert_eq!(history[0].cardio.len(), 1);
        assert_eq!(history[0].body_weight, Some(81.5));
    }

    #[test]
    fn deleted_workout_leaves_log_unnamed() {
        let day = date(2024, 3, 4);
        let logs = [log(None, day)];
        let history = build_history(&[day], &[], &[], &logs, &[], &[], &[]);
        assert_eq!(history[0].workout_name, None);
        // The rest of the log still shows
        assert_eq!(history[0].body_weight, Some(81.5));
    }

    #[test]
    fn mood_and_note_pass_through() {
        let day = date(2024, 3, 4);
        let uid = Uuid::new_v4();
        let moods = [MoodRating {
            id: Uuid::new_v4(),
            user_id: uid,
            rated_on: day,
            rating: 7,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }];
        let notes = [Note {
            id: Uuid::new_v4(),
            user_id: uid,
            note_date: day,
            content: "Good day".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }];
        let history = build_history(&[day], &[], &[], &[], &[], &moods, &notes);
        assert_eq!(history[0].mood, Some(7));
        assert_eq!(history[0].note.as_deref(), Some("Good day"));
    }
}
