// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, LOT_LAYOUT, Slot, SlotId, SlotStatus, seed_slots, total_slots};
use std::collections::HashSet;

#[test]
fn test_layout_has_fifteen_zones_and_forty_five_slots() {
    assert_eq!(LOT_LAYOUT.len(), 15);
    assert_eq!(total_slots(), 45);
    assert!(LOT_LAYOUT.iter().all(|(_, count)| (2..=4).contains(count)));
}

#[test]
fn test_seed_produces_exactly_one_available_slot_per_id() {
    let slots: Vec<Slot> = seed_slots();
    assert_eq!(slots.len(), 45);

    let ids: HashSet<String> = slots.iter().map(|s| s.id.to_string()).collect();
    assert_eq!(ids.len(), 45);

    for (zone, count) in LOT_LAYOUT {
        for number in 1..=count {
            let id: String = format!("{zone}{number}");
            assert!(ids.contains(&id), "missing slot {id}");
        }
    }

    assert!(slots.iter().all(|s| s.status == SlotStatus::Available));
}

#[test]
fn test_seed_is_deterministic() {
    assert_eq!(seed_slots(), seed_slots());
}

#[test]
fn test_seeded_slot_carries_zone_fields() {
    let slots: Vec<Slot> = seed_slots();
    let first: &Slot = &slots[0];
    assert_eq!(first.id.to_string(), "A1");
    assert_eq!(first.zone, "A");
    assert_eq!(first.zone_name, "Zone A");
}

#[test]
fn test_slot_id_parse_normalizes_case() {
    let id: SlotId = SlotId::parse("c2").unwrap();
    assert_eq!(id.to_string(), "C2");
    assert_eq!(id.zone(), 'C');
    assert_eq!(id.number(), 2);
}

#[test]
fn test_slot_id_parse_rejects_out_of_layout_ids() {
    // Zone E has two slots.
    assert!(matches!(
        SlotId::parse("E3"),
        Err(DomainError::InvalidSlotId(_))
    ));
    assert!(SlotId::parse("Z1").is_err());
    assert!(SlotId::parse("A0").is_err());
    assert!(SlotId::parse("").is_err());
    assert!(SlotId::parse("AA").is_err());
}

#[test]
fn test_slot_id_serde_uses_display_form() {
    let id: SlotId = SlotId::parse("M4").unwrap();
    let json: String = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"M4\"");
    let back: SlotId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
    assert!(serde_json::from_str::<SlotId>("\"N3\"").is_err());
}
