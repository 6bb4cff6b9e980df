//! Slot kickoff time derivation.
//!
//! Slot `i` kicks off at `date + start_time + i * (match + rest)` minutes.
//! The derivation is deterministic and idempotent; the composer replaces
//! the whole slot list whenever it invokes it, so assignments are never
//! implicitly carried across a regeneration.

use crate::api::{MatchdayConfig, Slot};
use crate::models::time;

/// Materialize the empty, timed slot list for a configuration.
///
/// The caller is responsible for having validated the configuration and
/// clamped the slot count; this function only derives times.
pub fn generate_slots(config: &MatchdayConfig) -> Vec<Slot> {
    let first = time::combine(config.date, config.start_time);
    let interval = i64::from(config.slot_interval_minutes());

    (0..config.slot_count as usize)
        .map(|ordinal| Slot::empty(ordinal, time::add_minutes(first, ordinal as i64 * interval)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Round;
    use crate::models::time::format_kickoff;
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;

    fn config(slot_count: u32, match_minutes: u32, rest_minutes: u32) -> MatchdayConfig {
        MatchdayConfig {
            date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            slot_count,
            match_minutes,
            rest_minutes,
            round: Round(1),
        }
    }

    #[test]
    fn test_slot_times_with_rest_interval() {
        let slots = generate_slots(&config(2, 60, 15));
        assert_eq!(slots.len(), 2);
        assert_eq!(format_kickoff(slots[0].kickoff), "2025-03-08 19:00");
        assert_eq!(format_kickoff(slots[1].kickoff), "2025-03-08 20:15");
        assert!(slots.iter().all(|s| !s.is_filled()));
    }

    #[test]
    fn test_slots_are_ordinal_ordered() {
        let slots = generate_slots(&config(4, 45, 5));
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.ordinal, i);
        }
        assert!(slots.windows(2).all(|w| w[0].kickoff < w[1].kickoff));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let cfg = config(5, 50, 10);
        assert_eq!(generate_slots(&cfg), generate_slots(&cfg));
    }

    #[test]
    fn test_rest_interval_shift_is_cumulative() {
        let without = generate_slots(&config(4, 60, 0));
        let with = generate_slots(&config(4, 60, 15));
        for (i, (a, b)) in without.iter().zip(&with).enumerate() {
            let shift = b.kickoff - a.kickoff;
            assert_eq!(shift.num_minutes(), 15 * i as i64);
        }
    }

    #[test]
    fn test_late_start_crosses_midnight() {
        let cfg = MatchdayConfig {
            start_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
            ..config(2, 60, 30)
        };
        let slots = generate_slots(&cfg);
        assert_eq!(format_kickoff(slots[1].kickoff), "2025-03-09 00:30");
    }

    proptest! {
        #[test]
        fn prop_consecutive_gap_equals_interval(
            slot_count in 1u32..20,
            match_minutes in 1u32..180,
            rest_minutes in 0u32..60,
        ) {
            let cfg = config(slot_count, match_minutes, rest_minutes);
            let slots = generate_slots(&cfg);
            prop_assert_eq!(slots.len(), slot_count as usize);
            for w in slots.windows(2) {
                let gap = (w[1].kickoff - w[0].kickoff).num_minutes();
                prop_assert_eq!(gap, i64::from(cfg.slot_interval_minutes()));
            }
        }
    }
}
