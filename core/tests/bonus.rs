//! Weekly bonus accrual tests.
//!
//! Closes are scattered over random days and working hours with a fixed
//! seed, so each window sees them out of chronological order.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use dealer_core::bonus::{BonusTracker, CloseOutcome, BONUS_CLOSES};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 4)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid start")
}

/// Record `count` closes on random days in `[start_day, end_day)`.
fn add(tracker: &mut BonusTracker, rng: &mut Pcg64Mcg, start_day: i64, end_day: i64, count: usize) {
    for _ in 0..count {
        let day = rng.gen_range(start_day..end_day);
        let hour = rng.gen_range(0..8);
        tracker.record_close(start() + Duration::days(day) + Duration::hours(hour));
    }
}

fn fresh() -> (BonusTracker, Pcg64Mcg) {
    (BonusTracker::new(start()), Pcg64Mcg::seed_from_u64(1))
}

#[test]
fn nine_closes_in_week_earn_nothing() {
    let (mut tracker, mut rng) = fresh();
    add(&mut tracker, &mut rng, 0, 7, 9);
    assert_eq!(tracker.bonus_count(), 0);
    assert_eq!(tracker.closes_in_window(), 9);
}

#[test]
fn ten_closes_in_week_earn_one_bonus() {
    let (mut tracker, mut rng) = fresh();
    add(&mut tracker, &mut rng, 0, 7, 10);
    assert_eq!(tracker.bonus_count(), 1);
}

#[test]
fn twenty_one_closes_in_week_still_earn_one_bonus() {
    let (mut tracker, mut rng) = fresh();
    add(&mut tracker, &mut rng, 0, 7, 21);
    assert_eq!(tracker.bonus_count(), 1);
}

#[test]
fn quota_in_both_weeks_earns_two() {
    let (mut tracker, mut rng) = fresh();
    add(&mut tracker, &mut rng, 0, 7, 10);
    add(&mut tracker, &mut rng, 7, 14, 30);
    assert_eq!(tracker.bonus_count(), 2);
}

#[test]
fn quota_only_in_first_week_earns_one() {
    let (mut tracker, mut rng) = fresh();
    add(&mut tracker, &mut rng, 0, 7, 10);
    add(&mut tracker, &mut rng, 7, 14, 9);
    assert_eq!(tracker.bonus_count(), 1);
}

#[test]
fn quota_only_in_second_week_earns_one() {
    let (mut tracker, mut rng) = fresh();
    add(&mut tracker, &mut rng, 0, 7, 9);
    add(&mut tracker, &mut rng, 7, 14, 30);
    assert_eq!(tracker.bonus_count(), 1);
}

#[test]
fn multi_week_gap_snaps_to_aligned_week() {
    let mut tracker = BonusTracker::new(start());
    for h in 0..5 {
        tracker.record_close(start() + Duration::hours(h));
    }

    // Three idle weeks, then a close on day 23. No phantom credit.
    let late = start() + Duration::days(23) + Duration::hours(2);
    assert_eq!(tracker.record_close(late), CloseOutcome::WindowRolled);
    assert_eq!(tracker.window_start(), start() + Duration::days(21));
    assert_eq!(tracker.bonus_count(), 0);

    // The rolled close counts as the first of the new window.
    for i in 0..(BONUS_CLOSES - 2) {
        let outcome = tracker.record_close(late + Duration::hours(i as i64 + 1));
        assert_eq!(outcome, CloseOutcome::Counted);
    }
    let outcome = tracker.record_close(late + Duration::days(2));
    assert_eq!(outcome, CloseOutcome::BonusAwarded);
    assert_eq!(tracker.bonus_count(), 1);
    assert_eq!(tracker.window_start(), start() + Duration::days(28));
}

#[test]
fn bonus_count_never_decreases_and_steps_by_one() {
    let mut tracker = BonusTracker::new(start());
    let mut rng = Pcg64Mcg::seed_from_u64(7);
    let mut time = start();
    let mut previous = 0;

    for _ in 0..2_000 {
        time += Duration::minutes(rng.gen_range(0..600));
        tracker.record_close(time);
        let now = tracker.bonus_count();
        assert!(now == previous || now == previous + 1);
        assert!(tracker.closes_in_window() < BONUS_CLOSES);
        previous = now;
    }
    assert!(previous > 0);
}
