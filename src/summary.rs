//! Daily summaries derived from 3-hour forecast slots.
//!
//! This is the degraded path used when the daily endpoint is unavailable. The
//! output has the same shape as `normalize::daily`, with two losses: `clouds`
//! is unknown and `day`/`night` both carry the midpoint of min and max, since
//! 3-hour slots cannot tell day from night.

use crate::models::{
    Condition, DailyDetails, DailyForecast, DailyTemperature, ForecastEntry,
};
use crate::normalize::round_temp;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One summary per UTC calendar date in `entries`, ascending by date.
pub fn build_daily_summaries(entries: &[ForecastEntry]) -> Vec<DailyForecast> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&ForecastEntry>> = BTreeMap::new();
    for entry in entries {
        by_date
            .entry(entry.datetime.date_naive())
            .or_default()
            .push(entry);
    }

    by_date
        .into_iter()
        .map(|(date, group)| summarize_day(date, &group))
        .collect()
}

fn summarize_day(date: NaiveDate, group: &[&ForecastEntry]) -> DailyForecast {
    let temps = group.iter().flat_map(|e| {
        [
            e.temperature.current,
            e.temperature.min,
            e.temperature.max,
        ]
    });
    let min = temps.clone().min().unwrap_or_default();
    let max = temps.max().unwrap_or_default();
    let midpoint = round_temp(f64::from(min + max) / 2.0);

    let humidity = mean(group.iter().map(|e| f64::from(e.details.humidity)));
    let wind_speed = mean(group.iter().map(|e| e.details.wind_speed));
    let pop = mean(group.iter().map(|e| f64::from(e.details.pop)));

    DailyForecast {
        date,
        temperature: DailyTemperature {
            min,
            max,
            day: midpoint,
            night: midpoint,
        },
        weather: dominant_condition(group),
        details: DailyDetails {
            humidity: humidity.round() as u8,
            wind_speed: (wind_speed * 10.0).round() / 10.0,
            clouds: None,
        },
        pop: pop.round() as u8,
    }
}

/// Arithmetic mean with non-finite samples counted as zero.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| {
        let v = if v.is_finite() { v } else { 0.0 };
        (sum + v, count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Condition of the most frequent description; ties go to whichever appeared first.
fn dominant_condition(group: &[&ForecastEntry]) -> Condition {
    let mut tally: Vec<(&str, usize, &Condition)> = Vec::new();
    for entry in group {
        let description = entry.weather.description.as_str();
        match tally.iter_mut().find(|(d, _, _)| *d == description) {
            Some((_, count, _)) => *count += 1,
            None => tally.push((description, 1, &entry.weather)),
        }
    }

    let mut best: Option<(usize, &Condition)> = None;
    for (_, count, condition) in tally {
        if best.map_or(true, |(top, _)| count > top) {
            best = Some((count, condition));
        }
    }

    best.map(|(_, c)| c.clone()).unwrap_or_else(|| Condition {
        main: "Unknown".to_string(),
        description: "Unknown".to_string(),
        icon: String::new(),
        icon_url: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry;

    #[test]
    fn empty_input_yields_no_days() {
        assert!(build_daily_summaries(&[]).is_empty());
    }

    #[test]
    fn groups_by_utc_date_in_ascending_order() {
        let entries = vec![
            entry("2024-03-02T03:00:00Z", 8, "clear sky"),
            entry("2024-03-01T21:00:00Z", 5, "clear sky"),
            entry("2024-03-02T00:00:00Z", 6, "clear sky"),
            entry("2024-03-03T12:00:00Z", 11, "light rain"),
            entry("2024-03-01T18:00:00Z", 7, "clear sky"),
        ];
        let days = build_daily_summaries(&entries);

        let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-02", "2024-03-03"]);
        for day in &days {
            assert!(day.temperature.min <= day.temperature.max);
        }
    }

    #[test]
    fn extremes_span_current_min_and_max_of_every_slot() {
        let mut cold = entry("2024-03-01T03:00:00Z", 4, "clear sky");
        cold.temperature.min = 1;
        let mut warm = entry("2024-03-01T06:00:00Z", 9, "clear sky");
        warm.temperature.max = 12;

        let days = build_daily_summaries(&[cold, warm]);
        assert_eq!(days[0].temperature.min, 1);
        assert_eq!(days[0].temperature.max, 12);
    }

    #[test]
    fn day_and_night_both_carry_the_midpoint() {
        let days = build_daily_summaries(&[
            entry("2024-03-01T03:00:00Z", 3, "clear sky"),
            entry("2024-03-01T15:00:00Z", 10, "clear sky"),
        ]);

        // (3 + 10) / 2 = 6.5 rounds away from zero
        assert_eq!(days[0].temperature.day, 7);
        assert_eq!(days[0].temperature.night, 7);
        assert_eq!(days[0].details.clouds, None);
    }

    #[test]
    fn averages_details_and_rounds_wind_to_one_decimal() {
        let mut a = entry("2024-03-01T00:00:00Z", 5, "clear sky");
        a.details.humidity = 60;
        a.details.wind_speed = 2.0;
        a.details.pop = 10;
        let mut b = entry("2024-03-01T03:00:00Z", 5, "clear sky");
        b.details.humidity = 71;
        b.details.wind_speed = 3.47;
        b.details.pop = 45;

        let days = build_daily_summaries(&[a, b]);
        assert_eq!(days[0].details.humidity, 66);
        assert_eq!(days[0].details.wind_speed, 2.7);
        assert_eq!(days[0].pop, 28);
    }

    #[test]
    fn non_finite_wind_counts_as_zero() {
        let mut a = entry("2024-03-01T00:00:00Z", 5, "clear sky");
        a.details.wind_speed = f64::NAN;
        let mut b = entry("2024-03-01T03:00:00Z", 5, "clear sky");
        b.details.wind_speed = 4.0;

        let days = build_daily_summaries(&[a, b]);
        assert_eq!(days[0].details.wind_speed, 2.0);
    }

    #[test]
    fn most_frequent_description_wins_with_first_seen_tiebreak() {
        let days = build_daily_summaries(&[
            entry("2024-03-01T00:00:00Z", 5, "overcast clouds"),
            entry("2024-03-01T03:00:00Z", 5, "light rain"),
            entry("2024-03-01T06:00:00Z", 5, "light rain"),
            entry("2024-03-02T00:00:00Z", 5, "few clouds"),
            entry("2024-03-02T03:00:00Z", 5, "light snow"),
        ]);

        assert_eq!(days[0].weather.description, "light rain");
        assert_eq!(days[1].weather.description, "few clouds");
    }
}
