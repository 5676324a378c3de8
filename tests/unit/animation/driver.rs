use super::*;

fn line() -> RouteLine {
    RouteLine::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)])
}

#[test]
fn duration_is_floored() {
    assert_eq!(AnimationDriver::new(200.0).duration_ms(), 1000.0);
    assert_eq!(AnimationDriver::new(-5.0).duration_ms(), 1000.0);
    assert_eq!(AnimationDriver::new(f64::NAN).duration_ms(), 1000.0);
    assert_eq!(AnimationDriver::new(6000.0).duration_ms(), 6000.0);
}

#[test]
fn pass_fraction_clamps() {
    assert_eq!(pass_fraction(0.0, 1000.0), 0.0);
    assert_eq!(pass_fraction(250.0, 1000.0), 0.25);
    assert_eq!(pass_fraction(5000.0, 1000.0), 1.0);
    assert_eq!(pass_fraction(-10.0, 1000.0), 0.0);
}

#[test]
fn ticks_advance_marker_along_line() {
    let mut driver = AnimationDriver::new(1000.0);
    let h0 = driver.restart(line(), 0.0).unwrap();

    let out = driver.tick(h0, 250.0).unwrap();
    assert_eq!(out.fraction, 0.25);
    assert_eq!(out.position, Point::new(25.0, 0.0));
    assert!(!out.wrapped);
    assert_ne!(out.next, h0);

    let out = driver.tick(out.next, 500.0).unwrap();
    assert_eq!(out.position, Point::new(50.0, 0.0));
    assert_eq!(driver.fraction(), Some(0.5));
}

#[test]
fn completed_pass_resets_anchor() {
    let mut driver = AnimationDriver::new(1000.0);
    let h = driver.restart(line(), 0.0).unwrap();

    let out = driver.tick(h, 1200.0).unwrap();
    assert!(out.wrapped);
    assert_eq!(out.fraction, 1.0);
    assert_eq!(out.position, Point::new(100.0, 0.0));
    assert_eq!(driver.passes(), 1);

    // anchor moved to 1200
    let out = driver.tick(out.next, 1300.0).unwrap();
    assert!(!out.wrapped);
    assert!((out.fraction - 0.1).abs() < 1e-12);
    assert!((out.position.x - 10.0).abs() < 1e-9);
}

#[test]
fn stale_and_cancelled_handles_are_ignored() {
    let mut driver = AnimationDriver::new(1000.0);
    let h0 = driver.restart(line(), 0.0).unwrap();
    let out = driver.tick(h0, 100.0).unwrap();
    assert!(driver.tick(h0, 200.0).is_none());

    assert_eq!(driver.cancel(), Some(out.next));
    assert!(!driver.is_running());
    assert!(driver.tick(out.next, 300.0).is_none());
}

#[test]
fn restart_invalidates_previous_loop() {
    let mut driver = AnimationDriver::new(1000.0);
    let old = driver.restart(line(), 0.0).unwrap();
    let new = driver.restart(line(), 500.0).unwrap();
    assert_ne!(old, new);
    assert!(driver.tick(old, 600.0).is_none());
    let out = driver.tick(new, 600.0).unwrap();
    assert!((out.fraction - 0.1).abs() < 1e-12);
}

#[test]
fn zero_length_line_stays_idle() {
    let mut driver = AnimationDriver::new(1000.0);
    let point = RouteLine::new(vec![Point::new(3.0, 3.0)]);
    assert!(driver.restart(point, 0.0).is_none());
    assert!(!driver.is_running());
    assert_eq!(driver.pending(), None);
}
