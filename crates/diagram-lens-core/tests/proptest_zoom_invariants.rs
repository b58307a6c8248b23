//! Property-based invariant tests for zoom geometry and wheel aggregation.
//!
//! Verifies:
//! 1. Scale always stays within [min_scale, max_scale] for any notch count.
//! 2. The content point under the cursor is preserved by every step.
//! 3. Steps compose multiplicatively away from the bounds.
//! 4. Coalesced accumulation equals one step of the clamped sum.
//! 5. Pending notches never exceed the burst bound.
//! 6. Only Ctrl-chorded wheel events request frames, and at most one per container.
//! 7. Notch normalization is odd in the delta (direction flips sign only).

use diagram_lens_core::geometry::{Point, ZoomState, ZoomTuning};
use diagram_lens_core::input::{
    Accumulated, DeltaMode, InputAggregator, InputTuning, Modifiers, WheelInput,
};
use diagram_lens_core::store::ContainerId;
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_state() -> impl Strategy<Value = ZoomState> {
    (0.5f64..=10.0, -2000.0f64..2000.0, -2000.0f64..2000.0)
        .prop_map(|(s, tx, ty)| ZoomState::new(s, tx, ty))
}

fn arb_cursor() -> impl Strategy<Value = Point> {
    (0.0f64..1600.0, 0.0f64..1200.0).prop_map(|(x, y)| Point::new(x, y))
}

fn arb_mode() -> impl Strategy<Value = DeltaMode> {
    prop_oneof![
        Just(DeltaMode::Pixel),
        Just(DeltaMode::Line),
        Just(DeltaMode::Page),
    ]
}

fn arb_modifiers() -> impl Strategy<Value = Modifiers> {
    (0u8..=15).prop_map(Modifiers::from_bits_truncate)
}

const ID: ContainerId = ContainerId::new(1);

// ═════════════════════════════════════════════════════════════════════
// 1. Clamping law
// ═════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scale_stays_in_bounds(
        state in arb_state(),
        notches in -1.0e6f64..1.0e6,
        cursor in arb_cursor(),
    ) {
        let tuning = ZoomTuning::default();
        let next = tuning.next_state(state, notches, cursor);
        prop_assert!(next.scale >= tuning.min_scale, "scale {} below min", next.scale);
        prop_assert!(next.scale <= tuning.max_scale, "scale {} above max", next.scale);
        prop_assert!(next.translate_x.is_finite() && next.translate_y.is_finite());
    }
}

// ═════════════════════════════════════════════════════════════════════
// 2. Cursor anchoring
// ═════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cursor_point_is_preserved(
        state in arb_state(),
        notches in -3.0f64..=3.0,
        cursor in arb_cursor(),
    ) {
        let tuning = ZoomTuning::default();
        let content = state.unproject(cursor);
        let next = tuning.next_state(state, notches, cursor);
        let back = next.project(content);
        prop_assert!((back.x - cursor.x).abs() < 1e-6, "x drifted: {} vs {}", back.x, cursor.x);
        prop_assert!((back.y - cursor.y).abs() < 1e-6, "y drifted: {} vs {}", back.y, cursor.y);
    }
}

// ═════════════════════════════════════════════════════════════════════
// 3. Multiplicative composition
// ═════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn steps_compose_in_log_space(a in -3.0f64..=3.0, b in -3.0f64..=3.0) {
        let tuning = ZoomTuning::default();
        // Starting at 2.0, six notches either way stay inside [0.5, 10].
        let stepwise = tuning.stepped_scale(tuning.stepped_scale(2.0, a), b);
        let combined = tuning.stepped_scale(2.0, a + b);
        prop_assert!((stepwise - combined).abs() < 1e-9);
    }
}

// ═════════════════════════════════════════════════════════════════════
// 4. Coalescing equals one clamped flush
// ═════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn two_events_coalesce_to_clamped_sum(
        d1 in -5.0f64..5.0,
        d2 in -5.0f64..5.0,
        cursor in arb_cursor(),
    ) {
        let tuning = ZoomTuning::default();
        let mut agg = InputAggregator::new(InputTuning::default());
        agg.accumulate(ID, d1, cursor);
        agg.accumulate(ID, d2, cursor);
        let pending = agg.take(ID).expect("pending input");

        let via_aggregator = tuning.next_state(ZoomState::IDENTITY, pending.delta_notches, cursor);
        let clamped = (d1.clamp(-3.0, 3.0) + d2).clamp(-3.0, 3.0);
        let direct = tuning.next_state(ZoomState::IDENTITY, clamped, cursor);
        prop_assert_eq!(via_aggregator, direct);

        if d1.abs() <= 3.0 {
            let simple = tuning.next_state(
                ZoomState::IDENTITY,
                (d1 + d2).clamp(-3.0, 3.0),
                cursor,
            );
            prop_assert_eq!(via_aggregator, simple);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════
// 5. Burst bound
// ═════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pending_never_exceeds_burst(deltas in proptest::collection::vec(-50.0f64..50.0, 1..40)) {
        let mut agg = InputAggregator::new(InputTuning::default());
        for d in deltas {
            agg.accumulate(ID, d, Point::ORIGIN);
            let pending = agg.pending(ID).expect("pending").delta_notches;
            prop_assert!(pending.abs() <= 3.0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════
// 6. Frame scheduling
// ═════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn at_most_one_frame_per_burst(count in 1usize..64, notches in -2.0f64..2.0) {
        let mut agg = InputAggregator::new(InputTuning::default());
        let mut scheduled = 0;
        for _ in 0..count {
            if agg.accumulate(ID, notches, Point::ORIGIN) == Accumulated::ScheduleFrame {
                scheduled += 1;
            }
        }
        prop_assert_eq!(scheduled, 1);
        prop_assert!(agg.take(ID).is_some());
        prop_assert!(!agg.is_frame_scheduled(ID));
    }

    #[test]
    fn zoom_gesture_requires_ctrl(mods in arb_modifiers(), delta in -500.0f64..500.0) {
        let input = WheelInput::new(delta, DeltaMode::Pixel, Point::ORIGIN).with_modifiers(mods);
        prop_assert_eq!(input.is_zoom_gesture(), mods.contains(Modifiers::CTRL));
    }
}

// ═════════════════════════════════════════════════════════════════════
// 7. Normalization symmetry
// ═════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalization_is_odd(
        delta in 0.0f64..1000.0,
        mode in arb_mode(),
        page in proptest::option::of(1.0f64..2000.0),
    ) {
        let tuning = InputTuning::default();
        let down = tuning.notches(&WheelInput::new(delta, mode, Point::ORIGIN), page);
        let up = tuning.notches(&WheelInput::new(-delta, mode, Point::ORIGIN), page);
        prop_assert_eq!(down, -up);
        prop_assert!(down <= 0.0, "scrolling down must not zoom in");
    }
}
