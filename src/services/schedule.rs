use chrono::{Datelike, NaiveDate};

/// Index into a weekday schedule: 0 = Sunday through 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// A habit applies on `date` when its schedule includes that weekday and
/// the habit already existed on that day. A habit never applies to days
/// before it was created.
pub fn is_applicable(created_on: NaiveDate, scheduled_days: &[bool], date: NaiveDate) -> bool {
    if date < created_on {
        return false;
    }
    scheduled_days
        .get(weekday_index(date))
        .copied()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Sun, Mon, Tue, Wed, Thu, Fri, Sat
    const MON_WED_FRI: [bool; 7] = [false, true, false, true, false, true, false];

    #[test]
    fn weekday_index_starts_on_sunday() {
        assert_eq!(weekday_index(date(2024, 3, 3)), 0); // Sunday
        assert_eq!(weekday_index(date(2024, 3, 4)), 1); // Monday
        assert_eq!(weekday_index(date(2024, 3, 9)), 6); // Saturday
    }

    #[test]
    fn not_applicable_before_creation() {
        let created = date(2024, 3, 1);
        assert!(!is_applicable(created, &MON_WED_FRI, date(2024, 2, 28)));
    }

    #[test]
    fn applicable_on_scheduled_weekday_after_creation() {
        let created = date(2024, 3, 1);
        // 2024-03-04 is a Monday
        assert!(is_applicable(created, &MON_WED_FRI, date(2024, 3, 4)));
    }

    #[test]
    fn not_applicable_on_unscheduled_weekday() {
        let created = date(2024, 3, 1);
        // 2024-03-05 is a Tuesday
        assert!(!is_applicable(created, &MON_WED_FRI, date(2024, 3, 5)));
    }

    #[test]
    fn applicable_on_creation_day_itself() {
        // 2024-03-01 is a Friday
        let created = date(2024, 3, 1);
        assert!(is_applicable(created, &MON_WED_FRI, created));
    }

    #[test]
    fn short_schedule_never_applies() {
        let created = date(2024, 3, 1);
        assert!(!is_applicable(created, &[true, true], date(2024, 3, 9)));
    }
}
