//! Overtime reconciliation against call logs.
//!
//! The schedule only knows when the last activity ended. Calls still running
//! after that point are unpaid overtime, so each call is compared with the
//! shift's real end once its clock has been corrected to the schedule's
//! timezone.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{CallEntry, ClockTime, DayCallRecord, DayShiftRecord};

/// Overtime seconds contributed by a single call.
///
/// Both call times are shifted by `offset_seconds` first. Times are compared
/// as offsets within one day, so a correction that crosses midnight yields
/// a negative clock value rather than wrapping.
pub fn call_overtime_seconds(call: &CallEntry, shift_end: ClockTime, offset_seconds: i64) -> i64 {
    let shift_end = i64::from(shift_end.seconds_from_midnight());
    let start = i64::from(call.start_time.seconds_from_midnight()) + offset_seconds;
    let end = i64::from(call.end_time.seconds_from_midnight()) + offset_seconds;

    let diff = end - shift_end;
    if diff <= 0 {
        return 0;
    }

    if start > shift_end {
        // Started after the shift: the whole call counts
        call.duration_seconds as i64
    } else {
        diff
    }
}

/// Computes the minutes worked past the shift's real end.
///
/// Each call is evaluated independently and the results are summed;
/// overlapping calls are not merged. Minutes are `seconds / 60` and are not
/// rounded. A shift with no real end recorded yields zero.
///
/// # Examples
///
/// ```
/// use paycheck_engine::calculation::reconcile_overtime;
/// use paycheck_engine::models::{CallEntry, DayCallRecord, DayShiftRecord};
/// use rust_decimal::Decimal;
///
/// let shift = DayShiftRecord::normal(480, 0, 0).with_real_end("17:00:00".parse().unwrap());
///
/// // Logged 19:00-19:20, which is 17:00-17:20 on the schedule clock
/// let calls = DayCallRecord::from_calls([CallEntry::new(
///     "19:00:00".parse().unwrap(),
///     "19:20:00".parse().unwrap(),
///     1200,
/// )]);
///
/// assert_eq!(reconcile_overtime(&shift, &calls, -7200), Decimal::from(20));
/// ```
pub fn reconcile_overtime(
    shift: &DayShiftRecord,
    calls: &DayCallRecord,
    offset_seconds: i64,
) -> Decimal {
    let Some(shift_end) = shift.window.real_end else {
        debug!("No real shift end recorded, skipping overtime");
        return Decimal::ZERO;
    };

    let seconds: i64 = calls
        .calls
        .iter()
        .map(|call| call_overtime_seconds(call, shift_end, offset_seconds))
        .sum();

    Decimal::from(seconds) / Decimal::from(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const OFFSET: i64 = -2 * 3600;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn shift_ending(real_end: &str) -> DayShiftRecord {
        DayShiftRecord::normal(480, 0, 0).with_real_end(time(real_end))
    }

    fn call(start: &str, end: &str, duration: u64) -> CallEntry {
        CallEntry::new(time(start), time(end), duration)
    }

    #[test]
    fn test_call_ending_before_shift_end_is_zero() {
        // 16:30-17:30 logged is 14:30-15:30 on the schedule clock
        let calls = DayCallRecord::from_calls([call("16:30:00", "17:30:00", 3600)]);
        assert_eq!(
            reconcile_overtime(&shift_ending("17:00:00"), &calls, OFFSET),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_call_ending_exactly_at_shift_end_is_zero() {
        // 18:40-19:00 logged is 16:40-17:00
        let calls = DayCallRecord::from_calls([call("18:40:00", "19:00:00", 1200)]);
        assert_eq!(
            reconcile_overtime(&shift_ending("17:00:00"), &calls, OFFSET),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_call_starting_at_shift_end_counts_tail() {
        // 19:00-19:20 logged is 17:00-17:20: starts on the boundary, so
        // only the portion after 17:00 counts
        let calls = DayCallRecord::from_calls([call("19:00:00", "19:20:00", 1200)]);
        assert_eq!(
            reconcile_overtime(&shift_ending("17:00:00"), &calls, OFFSET),
            dec("20")
        );
    }

    #[test]
    fn test_call_straddling_shift_end_counts_tail_only() {
        // 18:50-19:05 logged is 16:50-17:05: 5 minutes past the end
        let calls = DayCallRecord::from_calls([call("18:50:00", "19:05:00", 900)]);
        assert_eq!(
            reconcile_overtime(&shift_ending("17:00:00"), &calls, OFFSET),
            dec("5")
        );
    }

    #[test]
    fn test_call_after_shift_end_counts_full_duration() {
        // 19:10-19:20 logged is 17:10-17:20; the stored duration is used
        let calls = DayCallRecord::from_calls([call("19:10:00", "19:20:00", 610)]);
        let minutes = reconcile_overtime(&shift_ending("17:00:00"), &calls, OFFSET);
        assert_eq!(minutes, Decimal::from(610) / Decimal::from(60));
    }

    #[test]
    fn test_fractional_minutes_are_kept() {
        // 45 seconds past the end
        let calls = DayCallRecord::from_calls([call("18:59:00", "19:00:45", 105)]);
        assert_eq!(
            reconcile_overtime(&shift_ending("17:00:00"), &calls, OFFSET),
            dec("0.75")
        );
    }

    #[test]
    fn test_calls_are_summed_independently() {
        let calls = DayCallRecord::from_calls([
            call("18:00:00", "18:30:00", 1800), // before the end
            call("18:55:00", "19:10:00", 900),  // straddles: 10 min
            call("19:15:00", "19:20:00", 300),  // after: 5 min
        ]);
        assert_eq!(
            reconcile_overtime(&shift_ending("17:00:00"), &calls, OFFSET),
            dec("15")
        );
    }

    #[test]
    fn test_overlapping_calls_are_not_deduplicated() {
        let calls = DayCallRecord::from_calls([
            call("19:05:00", "19:15:00", 600),
            call("19:10:00", "19:20:00", 601),
        ]);
        let minutes = reconcile_overtime(&shift_ending("17:00:00"), &calls, OFFSET);
        assert_eq!(minutes, Decimal::from(1201) / Decimal::from(60));
    }

    #[test]
    fn test_missing_real_end_is_zero() {
        let shift = DayShiftRecord::normal(0, 480, 0);
        let calls = DayCallRecord::from_calls([call("23:00:00", "23:30:00", 1800)]);
        assert_eq!(reconcile_overtime(&shift, &calls, OFFSET), Decimal::ZERO);
    }

    #[test]
    fn test_no_calls_is_zero() {
        assert_eq!(
            reconcile_overtime(&shift_ending("17:00:00"), &DayCallRecord::default(), OFFSET),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_zero_offset_compares_raw_times() {
        let calls = DayCallRecord::from_calls([call("16:55:00", "17:05:00", 600)]);
        assert_eq!(
            reconcile_overtime(&shift_ending("17:00:00"), &calls, 0),
            dec("5")
        );
    }

    #[test]
    fn test_correction_past_midnight_does_not_wrap() {
        // 01:00-01:30 logged becomes 23:00-23:30 of the previous day, which
        // is before any real end on this day
        let late_call = call("01:00:00", "01:30:00", 1800);
        let secs = call_overtime_seconds(&late_call, time("00:30:00"), OFFSET);
        assert_eq!(secs, 0);
    }
}
