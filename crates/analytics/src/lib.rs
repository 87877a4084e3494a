// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! Usage statistics derived from booking history.
//!
//! Everything here is recomputed from the full record set on each call;
//! nothing is maintained incrementally.

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use parkit_domain::Booking;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use time::{OffsetDateTime, Weekday};

/// Day labels in heatmap and daily-usage order.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Number of zones reported by the summary's top-zone list.
pub const TOP_ZONE_COUNT: usize = 3;

/// Converts a platform day number (1 = Sunday .. 7 = Saturday) into a
/// Monday-based index (0 = Monday .. 6 = Sunday).
#[must_use]
pub const fn day_index(platform_day: u8) -> u8 {
    (platform_day + 5) % 7
}

/// Rounds an hour of the day down to its four-hour bucket.
#[must_use]
pub const fn hour_bucket(hour: u8) -> u8 {
    hour / 4 * 4
}

/// Monday-based day index of a timestamp.
#[must_use]
pub fn weekday_index(timestamp: OffsetDateTime) -> u8 {
    let weekday: Weekday = timestamp.weekday();
    day_index(weekday.number_from_sunday())
}

/// Counts bookings per zone code.
#[must_use]
pub fn zone_usage(bookings: &[Booking]) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for booking in bookings {
        *counts.entry(booking.zone.clone()).or_insert(0) += 1;
    }
    counts
}

/// Counts bookings per `(day_index, hour_bucket)` of their start time.
///
/// Bookings without a start time are skipped.
#[must_use]
pub fn heatmap(bookings: &[Booking]) -> BTreeMap<(u8, u8), u32> {
    let mut cells: BTreeMap<(u8, u8), u32> = BTreeMap::new();
    for start in bookings.iter().filter_map(|b| b.start_time) {
        let key: (u8, u8) = (weekday_index(start), hour_bucket(start.hour()));
        *cells.entry(key).or_insert(0) += 1;
    }
    cells
}

/// Booking counts for each day of the week, Monday first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyUsage {
    counts: [u32; 7],
}

impl DailyUsage {
    /// Returns the count for a day label (`"Mon"` .. `"Sun"`).
    #[must_use]
    pub fn get(&self, label: &str) -> Option<u32> {
        DAY_LABELS
            .iter()
            .position(|l| *l == label)
            .map(|i| self.counts[i])
    }

    /// Iterates over `(label, count)` pairs, Monday first.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        DAY_LABELS.iter().copied().zip(self.counts.iter().copied())
    }

    /// Total across all days.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

impl Serialize for DailyUsage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DAY_LABELS.len()))?;
        for (label, count) in self.entries() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

/// Counts bookings by the weekday they were created on.
///
/// Bookings without a creation time are skipped. Every day is present in
/// the result, defaulting to zero.
#[must_use]
pub fn daily_usage(bookings: &[Booking]) -> DailyUsage {
    let mut usage: DailyUsage = DailyUsage::default();
    for created in bookings.iter().filter_map(|b| b.created_at) {
        usage.counts[usize::from(weekday_index(created))] += 1;
    }
    usage
}

/// Returns the `n` busiest zones, highest count first.
///
/// Ties are ordered by zone code.
#[must_use]
pub fn top_zones<S: BuildHasher>(counts: &HashMap<String, u32, S>, n: usize) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = counts
        .iter()
        .map(|(zone, count)| (zone.clone(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Returns the display name with the most bookings and its count.
///
/// Blank names are ignored. Ties go to the alphabetically first name.
#[must_use]
pub fn top_user(bookings: &[Booking]) -> Option<(String, u32)> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for booking in bookings {
        let name: &str = booking.user_name.trim();
        if !name.is_empty() {
            *counts.entry(name).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(&str, u32)>, (name, count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((name, count)),
        })
        .map(|(name, count)| (name.to_string(), count))
}

/// One populated heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    /// Monday-based day index.
    pub day: u8,
    /// Start hour of the four-hour bucket.
    pub hour_bucket: u8,
    pub count: u32,
}

/// A ranked zone in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneCount {
    pub zone: String,
    pub count: u32,
}

/// The busiest user in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCount {
    pub user_name: String,
    pub count: u32,
}

/// Every statistic the dashboard shows, computed in one pass over history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageSummary {
    pub total_bookings: usize,
    pub zone_usage: BTreeMap<String, u32>,
    pub top_zones: Vec<ZoneCount>,
    pub top_user: Option<UserCount>,
    pub daily_usage: DailyUsage,
    pub heatmap: Vec<HeatmapCell>,
}

impl UsageSummary {
    /// Computes the summary for a set of bookings.
    #[must_use]
    pub fn compute(bookings: &[Booking]) -> Self {
        let zones: HashMap<String, u32> = zone_usage(bookings);
        Self {
            total_bookings: bookings.len(),
            top_zones: top_zones(&zones, TOP_ZONE_COUNT)
                .into_iter()
                .map(|(zone, count)| ZoneCount { zone, count })
                .collect(),
            zone_usage: zones.into_iter().collect(),
            top_user: top_user(bookings)
                .map(|(user_name, count)| UserCount { user_name, count }),
            daily_usage: daily_usage(bookings),
            heatmap: heatmap(bookings)
                .into_iter()
                .map(|((day, hour_bucket), count)| HeatmapCell {
                    day,
                    hour_bucket,
                    count,
                })
                .collect(),
        }
    }
}
