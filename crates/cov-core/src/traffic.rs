//! Spreading a target event volume over calendar days and dayparts.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};
use rand::Rng;

use crate::error::{SampleError, SampleResult};
use crate::softmax::softmax;

const SECONDS_PER_DAY: u32 = 86_400;

// ---------------------------------------------------------------------------
// TrafficCoefficients
// ---------------------------------------------------------------------------

/// Weekday multipliers (index 0 = Sunday .. 6 = Saturday) and raw daypart
/// scores.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficCoefficients {
    weekday: [f64; 7],
    daypart: Vec<f64>,
}

impl TrafficCoefficients {
    pub fn new(weekday: [f64; 7], daypart: Vec<f64>) -> SampleResult<Self> {
        if let Some(bad) = weekday.iter().find(|c| !c.is_finite() || **c < 0.0) {
            return Err(SampleError::InvalidDistribution(format!(
                "weekday coefficient must be finite and non-negative, got {bad}"
            )));
        }
        if daypart.is_empty() {
            return Err(SampleError::EmptyInput(
                "at least one daypart coefficient is required".into(),
            ));
        }
        if let Some(bad) = daypart.iter().find(|c| !c.is_finite()) {
            return Err(SampleError::InvalidDistribution(format!(
                "daypart coefficient must be finite, got {bad}"
            )));
        }
        Ok(Self { weekday, daypart })
    }

    pub fn weekday(&self, day: Weekday) -> f64 {
        self.weekday[day.num_days_from_sunday() as usize]
    }

    pub fn weekdays(&self) -> &[f64; 7] {
        &self.weekday
    }

    pub fn dayparts(&self) -> &[f64] {
        &self.daypart
    }
}

// ---------------------------------------------------------------------------
// BusinessHours
// ---------------------------------------------------------------------------

/// The slice of a day in which events are timestamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    start: NaiveTime,
    length_secs: u32,
}

impl BusinessHours {
    /// `start` plus `length_secs` must stay within the same day.
    pub fn new(start: NaiveTime, length_secs: u32) -> SampleResult<Self> {
        if length_secs == 0 {
            return Err(SampleError::EmptyInput(
                "business hours window must not be empty".into(),
            ));
        }
        let start_secs = start.num_seconds_from_midnight();
        if start_secs + length_secs > SECONDS_PER_DAY {
            return Err(SampleError::InvalidDistribution(format!(
                "business hours window starting at {start} for {length_secs}s crosses midnight"
            )));
        }
        Ok(Self { start, length_secs })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn length_secs(&self) -> u32 {
        self.length_secs
    }

    /// A uniformly random instant on `date` within the window.
    pub fn timestamp<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> NaiveDateTime {
        let offset = rng.random_range(0..self.length_secs);
        date.and_time(self.start) + TimeDelta::seconds(i64::from(offset))
    }
}

impl Default for BusinessHours {
    /// 07:00 for 15 hours.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            length_secs: 15 * 3600,
        }
    }
}

// ---------------------------------------------------------------------------
// DayPlan
// ---------------------------------------------------------------------------

/// Event volume planned for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    /// Offset from the first planned day.
    pub day_index: u32,
    pub date: NaiveDate,
    pub weekday: Weekday,
    /// Day total after jitter.
    pub total: u64,
    /// Events per daypart, in coefficient order.
    pub dayparts: Vec<u64>,
}

impl DayPlan {
    /// Events actually produced for the day. Rounding each daypart share
    /// independently means this may differ from `total` by a few events.
    pub fn scheduled(&self) -> u64 {
        self.dayparts.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// TrafficModel
// ---------------------------------------------------------------------------

/// Maps calendar days and dayparts to event counts.
///
/// A day's count is `round(daily_baseline * weekday_coefficient + jitter)`
/// with jitter uniform in `[-jitter, +jitter]`. The day is then split across
/// dayparts by the softmax of the daypart coefficients.
#[derive(Debug, Clone)]
pub struct TrafficModel {
    coefficients: TrafficCoefficients,
    daily_baseline: f64,
    jitter: f64,
    daypart_shares: Vec<f64>,
    hours: BusinessHours,
}

impl TrafficModel {
    pub fn new(
        coefficients: TrafficCoefficients,
        daily_baseline: f64,
        jitter: f64,
        hours: BusinessHours,
    ) -> SampleResult<Self> {
        if !daily_baseline.is_finite() || daily_baseline < 0.0 {
            return Err(SampleError::InvalidDistribution(format!(
                "daily baseline must be finite and non-negative, got {daily_baseline}"
            )));
        }
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(SampleError::InvalidDistribution(format!(
                "jitter must be finite and non-negative, got {jitter}"
            )));
        }
        let daypart_shares = softmax(coefficients.dayparts())?;
        Ok(Self {
            coefficients,
            daily_baseline,
            jitter,
            daypart_shares,
            hours,
        })
    }

    /// Baseline for which the weighted sum over `days` consecutive days
    /// starting at `start` equals `annual`.
    pub fn baseline_for_annual(
        annual: f64,
        coefficients: &TrafficCoefficients,
        start: NaiveDate,
        days: u32,
    ) -> SampleResult<f64> {
        if !annual.is_finite() || annual < 0.0 {
            return Err(SampleError::InvalidDistribution(format!(
                "annual volume must be finite and non-negative, got {annual}"
            )));
        }
        let weight: f64 = (0..days)
            .map(|d| coefficients.weekday((start + Days::new(u64::from(d))).weekday()))
            .sum();
        if weight <= 0.0 {
            return Err(SampleError::EmptyInput(format!(
                "no traffic weight across {days} day(s) starting {start}"
            )));
        }
        Ok(annual / weight)
    }

    pub fn coefficients(&self) -> &TrafficCoefficients {
        &self.coefficients
    }

    pub fn daily_baseline(&self) -> f64 {
        self.daily_baseline
    }

    pub fn hours(&self) -> BusinessHours {
        self.hours
    }

    /// Softmax-normalized daypart coefficients.
    pub fn daypart_shares(&self) -> &[f64] {
        &self.daypart_shares
    }

    /// Day total before jitter and rounding.
    pub fn expected_daily_count(&self, weekday: Weekday) -> f64 {
        self.daily_baseline * self.coefficients.weekday(weekday)
    }

    pub fn daily_count<R: Rng + ?Sized>(&self, weekday: Weekday, rng: &mut R) -> u64 {
        let jitter = if self.jitter > 0.0 {
            rng.random_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        (self.expected_daily_count(weekday) + jitter).round().max(0.0) as u64
    }

    pub fn daypart_counts(&self, daily_count: u64) -> Vec<u64> {
        self.daypart_shares
            .iter()
            .map(|share| (share * daily_count as f64).round() as u64)
            .collect()
    }

    pub fn plan_day<R: Rng + ?Sized>(
        &self,
        start: NaiveDate,
        day_index: u32,
        rng: &mut R,
    ) -> DayPlan {
        let date = start + Days::new(u64::from(day_index));
        let weekday = date.weekday();
        let total = self.daily_count(weekday, rng);
        DayPlan {
            day_index,
            date,
            weekday,
            total,
            dayparts: self.daypart_counts(total),
        }
    }

    pub fn plan<R: Rng + ?Sized>(&self, start: NaiveDate, days: u32, rng: &mut R) -> Vec<DayPlan> {
        (0..days).map(|d| self.plan_day(start, d, rng)).collect()
    }

    pub fn timestamp<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> NaiveDateTime {
        self.hours.timestamp(date, rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const WEEKDAY: [f64; 7] = [0.15, 1.71, 1.8, 1.6, 1.3, 1.0, 0.35];
    const DAYPART: [f64; 3] = [0.8, 1.4, 0.45];

    fn model(baseline: f64, jitter: f64) -> TrafficModel {
        let coefficients = TrafficCoefficients::new(WEEKDAY, DAYPART.to_vec()).unwrap();
        TrafficModel::new(coefficients, baseline, jitter, BusinessHours::default()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tuesday_count_before_jitter() {
        let model = model(100.0, 0.0);
        assert!((model.expected_daily_count(Weekday::Tue) - 180.0).abs() < 1e-9);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(model.daily_count(Weekday::Tue, &mut rng), 180);
        assert_eq!(model.daily_count(Weekday::Sun, &mut rng), 15);
        assert_eq!(model.daily_count(Weekday::Sat, &mut rng), 35);
    }

    #[test]
    fn daypart_shares_sum_to_one_and_peak_in_afternoon() {
        let model = model(100.0, 0.0);
        let shares = model.daypart_shares();
        assert!((shares.iter().sum::<f64>() - 1.0).abs() < 1e-9);

        let counts = model.daypart_counts(180);
        assert_eq!(counts.len(), 3);
        assert!(counts[1] > counts[0] && counts[1] > counts[2]);
        let scheduled: u64 = counts.iter().sum();
        assert!(scheduled.abs_diff(180) <= 2);
    }

    #[test]
    fn jitter_stays_within_amplitude() {
        let model = model(100.0, 5.0);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1_000 {
            let n = model.daily_count(Weekday::Wed, &mut rng);
            assert!((155..=165).contains(&n), "count {n}");
        }
    }

    #[test]
    fn negative_jittered_counts_floor_at_zero() {
        let model = model(0.0, 3.0);
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            assert!(model.daily_count(Weekday::Sun, &mut rng) <= 3);
        }
    }

    #[test]
    fn plan_covers_consecutive_days() {
        let model = model(100.0, 0.0);
        let mut rng = StdRng::seed_from_u64(8);
        // 2025-01-05 is a Sunday
        let plan = model.plan(date(2025, 1, 5), 365, &mut rng);
        assert_eq!(plan.len(), 365);
        assert_eq!(plan[0].weekday, Weekday::Sun);
        assert_eq!(plan[0].total, 15);
        assert_eq!(plan[2].weekday, Weekday::Tue);
        assert_eq!(plan[2].total, 180);
        assert_eq!(plan[364].date, date(2026, 1, 4));
        for (i, day) in plan.iter().enumerate() {
            assert_eq!(day.day_index as usize, i);
            assert_eq!(day.dayparts.len(), 3);
        }
    }

    #[test]
    fn annual_baseline_reproduces_volume() {
        let coefficients = TrafficCoefficients::new(WEEKDAY, DAYPART.to_vec()).unwrap();
        let start = date(2025, 1, 1);
        let baseline =
            TrafficModel::baseline_for_annual(52_000.0, &coefficients, start, 365).unwrap();
        let model =
            TrafficModel::new(coefficients, baseline, 0.0, BusinessHours::default()).unwrap();
        let expected: f64 = (0..365)
            .map(|d| model.expected_daily_count((start + Days::new(d)).weekday()))
            .sum();
        assert!((expected - 52_000.0).abs() < 1e-6);
    }

    #[test]
    fn annual_baseline_rejects_zero_weight() {
        let coefficients = TrafficCoefficients::new([0.0; 7], vec![1.0]).unwrap();
        let err = TrafficModel::baseline_for_annual(10.0, &coefficients, date(2025, 1, 1), 7)
            .unwrap_err();
        assert!(matches!(err, SampleError::EmptyInput(_)));
    }

    #[test]
    fn timestamps_stay_in_business_hours() {
        let model = model(100.0, 0.0);
        let mut rng = StdRng::seed_from_u64(12);
        let day = date(2025, 3, 4);
        for _ in 0..2_000 {
            let ts = model.timestamp(day, &mut rng);
            assert_eq!(ts.date(), day);
            assert!(ts.hour() >= 7 && ts.hour() < 22, "ts {ts}");
        }
    }

    #[test]
    fn rejects_invalid_tables() {
        assert!(matches!(
            TrafficCoefficients::new(WEEKDAY, vec![]),
            Err(SampleError::EmptyInput(_))
        ));
        let mut negative = WEEKDAY;
        negative[3] = -1.0;
        assert!(matches!(
            TrafficCoefficients::new(negative, DAYPART.to_vec()),
            Err(SampleError::InvalidDistribution(_))
        ));
        let late = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        assert!(BusinessHours::new(late, 5 * 3600).is_err());
        assert!(BusinessHours::new(late, 0).is_err());
        assert!(BusinessHours::new(late, 4 * 3600).is_ok());
    }
}
