use crate::{Plan, SignalError};
use bunch_core::Seconds;

#[test]
fn single_segment_green_at_start_of_cycle() {
    let plan = Plan::parse("/0000/60/0/0,30/").unwrap();
    assert_eq!(plan.signal_status(Seconds(0)).unwrap(), 0);
    assert_eq!(plan.signal_status(Seconds(15)).unwrap(), 0);
    assert_eq!(plan.signal_status(Seconds(29)).unwrap(), 0);
    // green_end is inclusive: the exact boundary second is still green.
    assert_eq!(plan.signal_status(Seconds(30)).unwrap(), 0);
}

#[test]
fn single_segment_red_waits_until_next_green() {
    let plan = Plan::parse("/0000/60/0/0,30/").unwrap();
    assert_eq!(plan.signal_status(Seconds(31)).unwrap(), 29);
    assert_eq!(plan.signal_status(Seconds(59)).unwrap(), 1);
}

#[test]
fn offset_shifts_the_green_window() {
    let plan = Plan::parse("/0000/60/10/0,30/").unwrap();
    // target = (t - 10) mod 60; green for target in [0,30) => t in [10,40)
    assert_eq!(plan.signal_status(Seconds(10)).unwrap(), 0);
    assert_eq!(plan.signal_status(Seconds(5)).unwrap(), 5);
    assert_eq!(plan.signal_status(Seconds(45)).unwrap(), 25);
}

#[test]
fn multiple_green_windows_take_the_nearest() {
    let plan = Plan::parse("/0000/100/0/0,10,50,60/").unwrap();
    assert_eq!(plan.signal_status(Seconds(40)).unwrap(), 10);
    assert_eq!(plan.signal_status(Seconds(65)).unwrap(), 35);
}

#[test]
fn second_segment_offset_accumulates_with_the_first() {
    let plan = Plan::parse("/0000/60/10/0,30//0600/60/5/0,30/").unwrap();
    let segs = plan.segments();
    assert_eq!(segs[0].offset, 10);
    assert_eq!(segs[1].offset, 15);
}

#[test]
fn segment_boundary_hands_off_to_the_next_segment() {
    let plan = Plan::parse("/0000/60/0/0,30//0001/60/0/0,30/").unwrap();
    // second segment starts at second 60; first covers [0,60)
    assert!(plan.signal_status(Seconds(59)).is_ok());
    assert!(plan.signal_status(Seconds(60)).is_ok());
}

#[test]
fn last_segment_wraps_to_first_segments_start_next_day() {
    let plan = Plan::parse("/0000/60/0/0,30//1800/60/0/0,30/").unwrap();
    // last segment valid from 64800 up to 86400 (next day's 0000)
    assert!(plan.signal_status(Seconds(86_399)).is_ok());
}

#[test]
fn rejects_field_count_not_a_multiple_of_four() {
    let err = Plan::parse("/0000/60/0/").unwrap_err();
    assert!(matches!(err, SignalError::BadFormat(_)));
}

#[test]
fn rejects_odd_length_pair_list() {
    let err = Plan::parse("/0000/60/0/0,30,40/").unwrap_err();
    assert!(matches!(err, SignalError::BadFormat(_)));
}

#[test]
fn rejects_green_interval_outside_cycle() {
    let err = Plan::parse("/0000/60/0/0,90/").unwrap_err();
    assert!(matches!(err, SignalError::BadFormat(_)));
}

#[test]
fn rejects_green_end_equal_to_cycle() {
    // green_end must stay strictly inside [0, cycle) — equal to the cycle
    // length would alias to target 0 under the modulus.
    let err = Plan::parse("/0000/60/0/0,60/").unwrap_err();
    assert!(matches!(err, SignalError::BadFormat(_)));
}

#[test]
fn rejects_non_positive_cycle() {
    let err = Plan::parse("/0000/0/0/0,30/").unwrap_err();
    assert!(matches!(err, SignalError::BadFormat(_)));
}

#[test]
fn rejects_bad_hhmm() {
    let err = Plan::parse("/2500/60/0/0,30/").unwrap_err();
    assert!(matches!(err, SignalError::BadFormat(_)));
}
