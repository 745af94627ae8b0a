// Tense classification against an injected clock.
use chrono::{Duration, NaiveDate, NaiveDateTime};
use daytense::{FixedClock, Tense, classify_date_tense, classify_date_time_tense};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, s).unwrap()
}

#[test]
fn test_date_tense_around_today() {
    let clock = FixedClock::at_midnight(date(2024, 6, 15));

    assert_eq!(classify_date_tense(&date(2024, 6, 14), &clock), Tense::Past);
    assert_eq!(classify_date_tense(&date(2024, 6, 15), &clock), Tense::Present);
    assert_eq!(classify_date_tense(&date(2024, 6, 16), &clock), Tense::Future);
}

#[test]
fn test_date_tense_far_from_today() {
    let clock = FixedClock::at_midnight(date(2024, 6, 15));

    assert_eq!(classify_date_tense(&date(1, 1, 1), &clock), Tense::Past);
    assert_eq!(classify_date_tense(&date(-44, 3, 15), &clock), Tense::Past);
    assert_eq!(classify_date_tense(&date(9999, 12, 31), &clock), Tense::Future);
    // Year, then month, then day.
    assert_eq!(classify_date_tense(&date(2023, 12, 31), &clock), Tense::Past);
    assert_eq!(classify_date_tense(&date(2024, 7, 1), &clock), Tense::Future);
}

#[test]
fn test_date_tense_sweep() {
    let today = date(2024, 2, 29);
    let clock = FixedClock::at_midnight(today);

    for offset in 1..400 {
        let before = today - Duration::days(offset);
        let after = today + Duration::days(offset);
        assert_eq!(classify_date_tense(&before, &clock), Tense::Past, "{}", before);
        assert_eq!(classify_date_tense(&after, &clock), Tense::Future, "{}", after);
    }
}

#[test]
fn test_date_time_tense_around_now() {
    let clock = FixedClock::new(at(2024, 6, 15, 10, 0, 0));

    assert_eq!(
        classify_date_time_tense(&at(2024, 6, 15, 9, 0, 0), &clock),
        Tense::Past
    );
    assert_eq!(
        classify_date_time_tense(&at(2024, 6, 15, 10, 0, 0), &clock),
        Tense::Present
    );
    assert_eq!(
        classify_date_time_tense(&at(2024, 6, 15, 11, 0, 0), &clock),
        Tense::Future
    );
}

#[test]
fn test_later_today_is_future_not_present() {
    let clock = FixedClock::new(at(2024, 6, 15, 10, 0, 0));
    let later_today = at(2024, 6, 15, 10, 0, 1);

    assert_eq!(classify_date_tense(&later_today.date(), &clock), Tense::Present);
    assert_eq!(classify_date_time_tense(&later_today, &clock), Tense::Future);
}

#[test]
fn test_date_time_tense_across_midnight() {
    let clock = FixedClock::new(at(2024, 6, 15, 0, 0, 0));

    assert_eq!(
        classify_date_time_tense(&at(2024, 6, 14, 23, 59, 59), &clock),
        Tense::Past
    );
}

#[test]
fn test_advancing_clock_changes_tense() {
    let target = at(2024, 6, 15, 12, 0, 0);
    let mut clock = FixedClock::new(at(2024, 6, 15, 11, 0, 0));
    assert_eq!(classify_date_time_tense(&target, &clock), Tense::Future);

    clock.advance(Duration::hours(1));
    assert_eq!(classify_date_time_tense(&target, &clock), Tense::Present);

    clock.advance(Duration::nanoseconds(1));
    assert_eq!(classify_date_time_tense(&target, &clock), Tense::Past);
}

#[test]
fn test_clock_usable_behind_arc_across_threads() {
    use daytense::clock::SharedClock;
    use std::sync::Arc;

    let clock: SharedClock = Arc::new(FixedClock::at_midnight(date(2024, 6, 15)));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let clock = Arc::clone(&clock);
            std::thread::spawn(move || {
                classify_date_tense(&date(2024, 6, 14 + i), clock.as_ref())
            })
        })
        .collect();
    let results: Vec<Tense> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(
        results,
        vec![Tense::Past, Tense::Present, Tense::Future, Tense::Future]
    );
}
