#[cfg(test)]
mod tests {
    use crate::logic::{calculate_available_slots, BlockingBookings, SlotPolicy};
    use proptest::prelude::*;
    use serviceconnect_common::models::{BookedInterval, TimeOfDay, WorkingHours};

    fn time(minutes: u32) -> TimeOfDay {
        TimeOfDay::from_minutes(minutes).expect("minutes within a day")
    }

    // Non-overlapping bookings laid out from `base`, each followed by a gap.
    fn create_bookings(base: u32, spans: &[(u32, u32)]) -> Vec<BookedInterval> {
        let mut bookings = Vec::new();
        let mut cursor = base;
        for &(gap, length) in spans {
            let start = cursor + gap;
            let end = start + length;
            if end > 24 * 60 {
                break;
            }
            bookings.push(BookedInterval::new(time(start), time(end)));
            cursor = end;
        }
        bookings
    }

    prop_compose! {
        fn working_hours()(start in 0u32..=20 * 60, length in 1u32..=8 * 60) -> WorkingHours {
            WorkingHours::new(time(start), time((start + length).min(24 * 60)))
        }
    }

    proptest! {
        // Every slot finishes no later than closing time.
        #[test]
        fn test_slots_within_working_hours(
            hours in working_hours(),
            duration in 1u32..=240,
            step in 5u32..=60,
        ) {
            let slots = calculate_available_slots(
                &hours,
                &BlockingBookings::default(),
                SlotPolicy::new(duration).with_step(step),
            );
            for slot in &slots {
                prop_assert!(*slot >= hours.start);
                prop_assert!(slot.minutes() + duration <= hours.end.minutes(),
                    "Slot {} + {} runs past {}", slot, duration, hours.end);
            }
        }

        // No slot strictly overlaps a blocking booking.
        #[test]
        fn test_slots_dont_overlap_bookings(
            hours in working_hours(),
            duration in 15u32..=120,
            spans in proptest::collection::vec((0u32..=90, 15u32..=120), 0..6),
        ) {
            let intervals = create_bookings(hours.start.minutes(), &spans);
            let blocking = BlockingBookings::from_intervals(intervals.clone());
            let slots = calculate_available_slots(&hours, &blocking, SlotPolicy::new(duration));

            for slot in &slots {
                let start = slot.minutes();
                let end = start + duration;
                for booked in &intervals {
                    prop_assert!(
                        end <= booked.start_time.minutes() || start >= booked.end_time.minutes(),
                        "Slot {}-{} overlaps booking {}-{}",
                        start, end, booked.start_time, booked.end_time
                    );
                }
            }
        }

        // Output is strictly increasing and aligned to the step grid.
        #[test]
        fn test_slots_strictly_increasing_on_grid(
            hours in working_hours(),
            duration in 1u32..=180,
            step in 5u32..=60,
        ) {
            let slots = calculate_available_slots(
                &hours,
                &BlockingBookings::default(),
                SlotPolicy::new(duration).with_step(step),
            );
            for pair in slots.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for slot in &slots {
                prop_assert_eq!((slot.minutes() - hours.start.minutes()) % step, 0);
            }
        }

        // Same input, same output.
        #[test]
        fn test_calculation_is_deterministic(
            hours in working_hours(),
            duration in 1u32..=180,
            spans in proptest::collection::vec((0u32..=90, 15u32..=120), 0..6),
        ) {
            let blocking = BlockingBookings::from_intervals(
                create_bookings(hours.start.minutes(), &spans),
            );
            let policy = SlotPolicy::new(duration);
            prop_assert_eq!(
                calculate_available_slots(&hours, &blocking, policy),
                calculate_available_slots(&hours, &blocking, policy)
            );
        }

        // A duration longer than the window leaves nothing to offer.
        #[test]
        fn test_oversized_duration_is_empty(hours in working_hours(), extra in 1u32..=120) {
            let window = hours.end.minutes() - hours.start.minutes();
            let slots = calculate_available_slots(
                &hours,
                &BlockingBookings::default(),
                SlotPolicy::new(window + extra),
            );
            prop_assert!(slots.is_empty());
        }
    }
}
