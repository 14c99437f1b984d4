use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Index of the holiday bucket, after the seven weekday buckets.
pub const HOLIDAY_BUCKET: usize = 7;

/// One day of sales history for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoricalSalesPoint {
    pub date: NaiveDate,
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    pub is_holiday: bool,
    pub quantity_sold: f64,
}

impl HistoricalSalesPoint {
    pub fn new(date: NaiveDate, quantity_sold: f64, is_holiday: bool) -> Self {
        Self {
            date,
            day_of_week: date.weekday().num_days_from_sunday() as u8,
            is_holiday,
            quantity_sold,
        }
    }

    fn bucket(&self) -> usize {
        if self.is_holiday {
            HOLIDAY_BUCKET
        } else {
            usize::from(self.day_of_week % 7)
        }
    }
}

/// Average quantity per weekday, plus a separate bucket for holidays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayAverages {
    pub sunday: f64,
    pub monday: f64,
    pub tuesday: f64,
    pub wednesday: f64,
    pub thursday: f64,
    pub friday: f64,
    pub saturday: f64,
    pub holiday: f64,
}

impl DayAverages {
    fn from_buckets(buckets: [f64; 8]) -> Self {
        Self {
            sunday: buckets[0],
            monday: buckets[1],
            tuesday: buckets[2],
            wednesday: buckets[3],
            thursday: buckets[4],
            friday: buckets[5],
            saturday: buckets[6],
            holiday: buckets[HOLIDAY_BUCKET],
        }
    }

    /// Average for a weekday index (0 = Sunday). Out-of-range indexes wrap.
    pub fn for_weekday(&self, day_of_week: u8) -> f64 {
        match day_of_week % 7 {
            0 => self.sunday,
            1 => self.monday,
            2 => self.tuesday,
            3 => self.wednesday,
            4 => self.thursday,
            5 => self.friday,
            _ => self.saturday,
        }
    }
}

/// Output of [`aggregate_history`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistorySummary {
    pub averages: DayAverages,
    pub total_history_sales: f64,
    /// `total_history_sales / history_days`, the linear model's daily rate.
    pub avg_daily_sales: f64,
    /// Number of observations per bucket, weekdays first then holidays.
    pub observations: [u32; 8],
}

#[derive(Debug, Clone, Copy, Default)]
struct BucketTotals {
    sum: f64,
    count: u32,
}

impl BucketTotals {
    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / f64::from(self.count)
        }
    }
}

/// Buckets history points by weekday (or holiday) and averages each bucket.
///
/// Empty buckets average to 0. `history_days` is the length of the window the
/// points were drawn from; it drives the linear average and may be larger than
/// `points.len()`.
pub fn aggregate_history(points: &[HistoricalSalesPoint], history_days: u32) -> HistorySummary {
    let mut buckets = [BucketTotals::default(); 8];
    let mut total = 0.0;

    for point in points {
        let quantity = finite_or_zero(point.quantity_sold);
        let bucket = &mut buckets[point.bucket()];
        bucket.sum += quantity;
        bucket.count += 1;
        total += quantity;
    }

    let avg_daily_sales = if history_days == 0 {
        0.0
    } else {
        total / f64::from(history_days)
    };

    HistorySummary {
        averages: DayAverages::from_buckets(buckets.map(|b| b.average())),
        total_history_sales: total,
        avg_daily_sales,
        observations: buckets.map(|b| b.count),
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
