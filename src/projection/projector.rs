use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::calendar::HolidayLookup;
use super::history::HistorySummary;
use super::ProjectionType;

const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Contiguous range of future days to project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionWindow {
    pub start: NaiveDate,
    pub days: u32,
}

impl ProjectionWindow {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self { start, days }
    }

    /// Last projected day; equals `start` for an empty window.
    pub fn end_date(&self) -> NaiveDate {
        self.start + Duration::days(i64::from(self.days.saturating_sub(1)))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.days).map(move |offset| start + Duration::days(i64::from(offset)))
    }
}

/// Projected demand for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectionDay {
    pub date: NaiveDate,
    pub day_name: String,
    pub projected: f64,
    pub is_holiday: bool,
}

/// Walks the window day by day and picks the applicable historical average.
///
/// Weekly projections use the holiday bucket on holidays even when no holiday
/// was observed in the history, in which case that day projects 0.
pub fn project_days<C: HolidayLookup + ?Sized>(
    window: ProjectionWindow,
    projection_type: ProjectionType,
    history: &HistorySummary,
    calendar: &C,
) -> Vec<ProjectionDay> {
    window
        .dates()
        .map(|date| {
            let day_of_week = date.weekday().num_days_from_sunday() as u8;
            let is_holiday = calendar.is_holiday(date);
            let projected = match projection_type {
                ProjectionType::Linear => history.avg_daily_sales,
                ProjectionType::Weekly if is_holiday => history.averages.holiday,
                ProjectionType::Weekly => history.averages.for_weekday(day_of_week),
            };

            ProjectionDay {
                date,
                day_name: DAY_NAMES[usize::from(day_of_week)].to_string(),
                projected,
                is_holiday,
            }
        })
        .collect()
}

/// In-order sum of the projected days.
pub fn projected_consumption(days: &[ProjectionDay]) -> f64 {
    days.iter().fold(0.0, |acc, day| acc + day.projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::calendar::HolidayCalendar;
    use crate::projection::history::DayAverages;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly_history() -> HistorySummary {
        HistorySummary {
            averages: DayAverages {
                sunday: 1.0,
                monday: 2.0,
                tuesday: 3.0,
                wednesday: 4.0,
                thursday: 5.0,
                friday: 6.0,
                saturday: 7.0,
                holiday: 0.0,
            },
            total_history_sales: 28.0,
            avg_daily_sales: 4.0,
            observations: [1, 1, 1, 1, 1, 1, 1, 0],
        }
    }

    #[test]
    fn linear_projection_is_flat() {
        let history = HistorySummary {
            avg_daily_sales: 5.0,
            ..Default::default()
        };
        let days = project_days(
            ProjectionWindow::new(date(2024, 6, 1), 3),
            ProjectionType::Linear,
            &history,
            &HolidayCalendar::default(),
        );

        let values: Vec<f64> = days.iter().map(|d| d.projected).collect();
        assert_eq!(values, vec![5.0, 5.0, 5.0]);
        assert_eq!(projected_consumption(&days), 15.0);
    }

    #[test]
    fn weekly_projection_follows_weekdays_in_order() {
        // 2024-06-02 is a Sunday
        let days = project_days(
            ProjectionWindow::new(date(2024, 6, 2), 7),
            ProjectionType::Weekly,
            &weekly_history(),
            &HolidayCalendar::default(),
        );

        let values: Vec<f64> = days.iter().map(|d| d.projected).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(days[0].day_name, "sunday");
        assert_eq!(days[6].day_name, "saturday");
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn holiday_without_history_projects_zero() {
        // 2024-06-04 is a Tuesday
        let calendar = HolidayCalendar::new().with_date(date(2024, 6, 4));
        let days = project_days(
            ProjectionWindow::new(date(2024, 6, 3), 2),
            ProjectionType::Weekly,
            &weekly_history(),
            &calendar,
        );

        assert!(!days[0].is_holiday);
        assert_eq!(days[0].projected, 2.0);
        assert!(days[1].is_holiday);
        assert_eq!(days[1].projected, 0.0);
    }

    #[test]
    fn linear_projection_still_flags_holidays() {
        let calendar = HolidayCalendar::new().with_date(date(2024, 6, 4));
        let days = project_days(
            ProjectionWindow::new(date(2024, 6, 4), 1),
            ProjectionType::Linear,
            &weekly_history(),
            &calendar,
        );
        assert!(days[0].is_holiday);
        assert_eq!(days[0].projected, 4.0);
    }

    #[test]
    fn empty_window_projects_nothing() {
        let window = ProjectionWindow::new(date(2024, 6, 4), 0);
        let days = project_days(
            window,
            ProjectionType::Weekly,
            &weekly_history(),
            &HolidayCalendar::default(),
        );
        assert!(days.is_empty());
        assert_eq!(projected_consumption(&days), 0.0);
        assert_eq!(window.end_date(), window.start);
    }
}
