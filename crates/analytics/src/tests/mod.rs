// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::{BTreeMap, HashMap};

use parkit_domain::{Booking, PriorityTag, SlotId, SlotStatus, VehicleType};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    DAY_LABELS, DailyUsage, UsageSummary, daily_usage, day_index, heatmap, hour_bucket,
    top_user, top_zones, zone_usage,
};

fn booking(slot: &str, user_name: &str, start: Option<OffsetDateTime>) -> Booking {
    let slot_id: SlotId = SlotId::parse(slot).unwrap();
    Booking {
        zone: slot_id.zone_code(),
        slot_id,
        vehicle_number: Some(String::from("KA01AB1234")),
        vehicle_type: VehicleType::Car,
        user_id: user_name.to_lowercase(),
        user_name: user_name.to_string(),
        contact_number: String::from("9876543210"),
        priority: PriorityTag::Normal,
        status: SlotStatus::Booked,
        booked_by: String::from("admin01"),
        booking_date: start.map(OffsetDateTime::date),
        start_time: start,
        end_time: None,
        created_at: start,
    }
}

fn counts(entries: &[(&str, u32)]) -> HashMap<String, u32> {
    entries
        .iter()
        .map(|(zone, count)| ((*zone).to_string(), *count))
        .collect()
}

#[test]
fn test_day_index_is_monday_based() {
    // 1 = Sunday, 2 = Monday, 7 = Saturday
    assert_eq!(day_index(1), 6);
    assert_eq!(day_index(2), 0);
    assert_eq!(day_index(7), 5);
}

#[test]
fn test_hour_bucket_rounds_down_to_four_hours() {
    assert_eq!(hour_bucket(13), 12);
    assert_eq!(hour_bucket(3), 0);
    assert_eq!(hour_bucket(23), 20);
    assert_eq!(hour_bucket(4), 4);
}

#[test]
fn test_zone_usage_counts_per_zone() {
    let bookings: Vec<Booking> = vec![
        booking("A1", "Asha", None),
        booking("A2", "Asha", None),
        booking("A3", "Ravi", None),
        booking("B1", "Ravi", None),
    ];

    let usage: HashMap<String, u32> = zone_usage(&bookings);

    assert_eq!(usage, counts(&[("A", 3), ("B", 1)]));
}

#[test]
fn test_top_zones_keeps_highest_counts() {
    let usage: HashMap<String, u32> = counts(&[("A", 5), ("B", 5), ("C", 3), ("D", 1)]);

    let top: Vec<(String, u32)> = top_zones(&usage, 3);

    assert_eq!(top.len(), 3);
    assert!(top.iter().any(|(zone, _)| zone == "A"));
    assert!(top.iter().any(|(zone, _)| zone == "B"));
    assert_eq!(top[2], (String::from("C"), 3));
}

#[test]
fn test_top_zones_with_fewer_zones_than_requested() {
    let usage: HashMap<String, u32> = counts(&[("K", 2)]);

    assert_eq!(top_zones(&usage, 3), vec![(String::from("K"), 2)]);
}

#[test]
fn test_heatmap_buckets_by_weekday_and_hour() {
    let bookings: Vec<Booking> = vec![
        // Monday 13:30 and 14:00 share a bucket
        booking("A1", "Asha", Some(datetime!(2026-03-02 13:30 UTC))),
        booking("A2", "Asha", Some(datetime!(2026-03-02 14:00 UTC))),
        // Sunday 03:00
        booking("B1", "Ravi", Some(datetime!(2026-03-08 03:00 UTC))),
        booking("B2", "Ravi", None),
    ];

    let cells: BTreeMap<(u8, u8), u32> = heatmap(&bookings);

    assert_eq!(cells.len(), 2);
    assert_eq!(cells.get(&(0, 12)), Some(&2));
    assert_eq!(cells.get(&(6, 0)), Some(&1));
}

#[test]
fn test_daily_usage_always_has_seven_days() {
    let empty: DailyUsage = daily_usage(&[]);
    let labels: Vec<&str> = empty.entries().map(|(label, _)| label).collect();

    assert_eq!(labels, DAY_LABELS.to_vec());
    assert_eq!(empty.total(), 0);
}

#[test]
fn test_daily_usage_counts_by_creation_day() {
    let bookings: Vec<Booking> = vec![
        booking("A1", "Asha", Some(datetime!(2026-03-02 08:00 UTC))),
        booking("A2", "Asha", Some(datetime!(2026-03-07 18:00 UTC))),
        booking("A3", "Asha", Some(datetime!(2026-03-07 19:00 UTC))),
        booking("A4", "Asha", None),
    ];

    let usage: DailyUsage = daily_usage(&bookings);

    assert_eq!(usage.get("Mon"), Some(1));
    assert_eq!(usage.get("Sat"), Some(2));
    assert_eq!(usage.get("Sun"), Some(0));
    assert_eq!(usage.get("Funday"), None);
    assert_eq!(usage.total(), 3);
}

#[test]
fn test_daily_usage_serializes_in_week_order() {
    let json: String = serde_json::to_string(&daily_usage(&[])).unwrap();

    assert_eq!(
        json,
        r#"{"Mon":0,"Tue":0,"Wed":0,"Thu":0,"Fri":0,"Sat":0,"Sun":0}"#
    );
}

#[test]
fn test_top_user_picks_most_frequent_name() {
    let bookings: Vec<Booking> = vec![
        booking("A1", "Ravi", None),
        booking("A2", "Asha", None),
        booking("A3", "Ravi", None),
        booking("A4", "  ", None),
    ];

    assert_eq!(top_user(&bookings), Some((String::from("Ravi"), 2)));
    assert_eq!(top_user(&[]), None);
}

#[test]
fn test_top_user_tie_goes_to_first_name() {
    let bookings: Vec<Booking> = vec![booking("A1", "Ravi", None), booking("A2", "Asha", None)];

    assert_eq!(top_user(&bookings), Some((String::from("Asha"), 1)));
}

#[test]
fn test_summary_bundles_all_statistics() {
    let bookings: Vec<Booking> = vec![
        booking("A1", "Asha", Some(datetime!(2026-03-02 09:00 UTC))),
        booking("C1", "Asha", Some(datetime!(2026-03-03 17:00 UTC))),
        booking("C2", "Ravi", Some(datetime!(2026-03-03 17:45 UTC))),
    ];

    let summary: UsageSummary = UsageSummary::compute(&bookings);

    assert_eq!(summary.total_bookings, 3);
    assert_eq!(summary.zone_usage.get("C"), Some(&2));
    assert_eq!(summary.top_zones[0].zone, "C");
    assert_eq!(summary.top_user.unwrap().user_name, "Asha");
    assert_eq!(summary.daily_usage.get("Tue"), Some(2));
    assert_eq!(summary.heatmap.len(), 2);
}
