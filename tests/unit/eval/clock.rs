use super::*;

#[test]
fn manual_clock_moves_only_when_told() {
    let clock = ManualClock::new(1.5);
    assert_eq!(clock.now_secs(), 1.5);
    clock.advance(0.25);
    assert_eq!(clock.now_secs(), 1.75);
    clock.set(10.0);
    assert_eq!(clock.now_secs(), 10.0);
}

#[test]
fn monotonic_clock_never_goes_backwards() {
    let clock = MonotonicClock::start();
    let a = clock.now_secs();
    let b = clock.now_secs();
    assert!(a >= 0.0);
    assert!(b >= a);
}

#[test]
fn clock_by_reference() {
    fn read(c: impl Clock) -> f64 {
        c.now_secs()
    }
    let clock = ManualClock::new(3.0);
    assert_eq!(read(&clock), 3.0);
}
