//! Read views derived from a user's raw meal list.
//!
//! Everything here is a pure function of the stored meals plus a reference
//! date, so the views are trivially testable without a store.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::constants::TREND_WINDOW_DAYS;
use crate::models::Meal;

/// Aggregation of one calendar date's meals
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Meals for the date, ascending by time of day
    pub meals: Vec<Meal>,
    #[serde(rename = "totalCalories")]
    pub total_calories: u32,
}

/// Calorie total for one date in the trend window
#[derive(Debug, Clone, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    /// Short display label, e.g. "Jan 5"
    pub label: String,
    pub calories: u32,
}

/// Calorie totals for the trailing trend window plus the per-day average
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyTrend {
    pub days: Vec<DayTotal>,
    #[serde(rename = "averageCalories")]
    pub average_calories: u32,
}

/// Summarize the meals for one calendar date
///
/// Filters to `date`, sorts ascending by the zero-padded "HH:MM" time string
/// (lexicographic order is chronological order for that format), and sums
/// calories. An empty day totals 0.
pub fn daily_summary(meals: &[Meal], date: NaiveDate) -> DailySummary {
    let mut selected: Vec<Meal> = meals.iter().filter(|m| m.date == date).cloned().collect();
    selected.sort_by(|a, b| a.time.cmp(&b.time));

    let total_calories = selected.iter().map(|m| m.calories).sum();

    DailySummary {
        date,
        meals: selected,
        total_calories,
    }
}

/// Compute calorie totals for the 7 calendar dates ending at `today`
///
/// The average is taken over days whose total is nonzero; days without meals
/// do not drag it down. A day whose meals sum to exactly 0 calories is
/// likewise excluded, so it counts as "no data" rather than a 0-calorie
/// sample. The average is 0 when no day qualifies.
pub fn weekly_trend(meals: &[Meal], today: NaiveDate) -> WeeklyTrend {
    let mut days = Vec::with_capacity(TREND_WINDOW_DAYS as usize);

    for offset in (0..TREND_WINDOW_DAYS).rev() {
        let date = today - Duration::days(offset);
        let calories = meals
            .iter()
            .filter(|m| m.date == date)
            .map(|m| m.calories)
            .sum();

        days.push(DayTotal {
            date,
            label: date.format("%b %-d").to_string(),
            calories,
        });
    }

    let logged: Vec<u64> = days
        .iter()
        .map(|d| d.calories as u64)
        .filter(|&c| c > 0)
        .collect();

    let average_calories = if logged.is_empty() {
        0
    } else {
        (logged.iter().sum::<u64>() as f64 / logged.len() as f64).round() as u32
    };

    WeeklyTrend {
        days,
        average_calories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;
    use chrono::Utc;

    fn meal(date: &str, time: &str, calories: u32) -> Meal {
        Meal {
            date: date.parse().unwrap(),
            time: time.to_string(),
            meal_type: MealType::Lunch,
            food_items: "test food".to_string(),
            calories,
            user_email: "a@x.com".to_string(),
            user_name: "A".to_string(),
            timestamp: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_daily_summary_filters_and_sums() {
        let meals = vec![
            meal("2024-01-01", "08:00", 300),
            meal("2024-01-01", "12:30", 450),
            meal("2024-01-02", "08:00", 999),
        ];

        let summary = daily_summary(&meals, date("2024-01-01"));

        assert_eq!(summary.meals.len(), 2);
        assert_eq!(summary.total_calories, 750);
    }

    #[test]
    fn test_daily_summary_sorts_by_time() {
        let meals = vec![
            meal("2024-01-01", "19:15", 600),
            meal("2024-01-01", "07:45", 300),
            meal("2024-01-01", "12:30", 450),
        ];

        let summary = daily_summary(&meals, date("2024-01-01"));

        let times: Vec<&str> = summary.meals.iter().map(|m| m.time.as_str()).collect();
        assert_eq!(times, vec!["07:45", "12:30", "19:15"]);
    }

    #[test]
    fn test_daily_summary_empty_day_is_zero() {
        let summary = daily_summary(&[], date("2024-01-01"));

        assert!(summary.meals.is_empty());
        assert_eq!(summary.total_calories, 0);
    }

    #[test]
    fn test_weekly_trend_window_and_totals() {
        // Meals on two dates; the rest of the window reports 0
        let meals = vec![
            meal("2024-01-01", "08:00", 300),
            meal("2024-01-01", "12:30", 450),
            meal("2024-01-03", "12:00", 500),
        ];

        let trend = weekly_trend(&meals, date("2024-01-07"));

        assert_eq!(trend.days.len(), 7);
        assert_eq!(trend.days[0].date, date("2024-01-01"));
        assert_eq!(trend.days[6].date, date("2024-01-07"));
        assert_eq!(trend.days[0].calories, 750);
        assert_eq!(trend.days[2].calories, 500);
        assert_eq!(trend.days[1].calories, 0);
        assert_eq!(trend.days[6].calories, 0);
    }

    #[test]
    fn test_weekly_average_excludes_empty_days() {
        // Meals on only 2 of 7 days: average is 600, not 1200/7
        let meals = vec![
            meal("2024-01-02", "12:00", 500),
            meal("2024-01-05", "12:00", 700),
        ];

        let trend = weekly_trend(&meals, date("2024-01-07"));

        assert_eq!(trend.average_calories, 600);
    }

    #[test]
    fn test_weekly_average_zero_when_no_data() {
        let trend = weekly_trend(&[], date("2024-01-07"));

        assert_eq!(trend.average_calories, 0);
        assert!(trend.days.iter().all(|d| d.calories == 0));
    }

    #[test]
    fn test_weekly_average_treats_zero_calorie_day_as_no_data() {
        // A day whose only entry is 0 calories does not enter the denominator
        let meals = vec![
            meal("2024-01-02", "12:00", 0),
            meal("2024-01-05", "12:00", 700),
        ];

        let trend = weekly_trend(&meals, date("2024-01-07"));

        assert_eq!(trend.average_calories, 700);
    }

    #[test]
    fn test_weekly_average_rounds_to_nearest() {
        let meals = vec![
            meal("2024-01-05", "12:00", 500),
            meal("2024-01-06", "12:00", 501),
        ];

        let trend = weekly_trend(&meals, date("2024-01-07"));

        // 1001 / 2 = 500.5 rounds to 501
        assert_eq!(trend.average_calories, 501);
    }

    #[test]
    fn test_meals_outside_window_are_ignored() {
        let meals = vec![
            meal("2023-12-31", "12:00", 900),
            meal("2024-01-08", "12:00", 900),
        ];

        let trend = weekly_trend(&meals, date("2024-01-07"));

        assert!(trend.days.iter().all(|d| d.calories == 0));
        assert_eq!(trend.average_calories, 0);
    }
}
