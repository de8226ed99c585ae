//! Breakpoint observer behaviour against a simulated viewport.

use lattice_test::prelude::*;

fn observer_at(width: f64) -> (TestViewport, BreakpointObserver<TestViewport>) {
    let viewport = TestViewport::new(width);
    let observer = BreakpointObserver::new(BreakpointsDefinition::default(), viewport.clone());
    (viewport, observer)
}

// =============================================================================
// Initial resolution
// =============================================================================

#[test]
fn test_initial_breakpoint_per_width() {
    for (width, expected) in [
        (0.0, Breakpoint::Xs),
        (500.0, Breakpoint::Xs),
        (700.0, Breakpoint::Sm),
        (960.0, Breakpoint::Md),
        (1279.95, Breakpoint::Md),
        (1280.0, Breakpoint::Lg),
        (2000.0, Breakpoint::Xl),
    ] {
        let (_viewport, observer) = observer_at(width);
        assert_eq!(observer.current(), Some(expected), "width {width}");
    }
}

#[test]
fn test_registers_every_breakpoint() {
    let (viewport, _observer) = observer_at(800.0);
    assert_eq!(
        viewport.registered_queries(),
        vec![
            "screen and (min-width: 0px) and (max-width: 599.95px)",
            "screen and (min-width: 600px) and (max-width: 959.95px)",
            "screen and (min-width: 960px) and (max-width: 1279.95px)",
            "screen and (min-width: 1280px) and (max-width: 1919.95px)",
            "screen and (min-width: 1920px)",
        ]
    );
}

#[test]
fn test_unresolved_until_first_match() {
    // A width between xs's upper bound and sm's lower bound matches nothing.
    let (viewport, observer) = observer_at(599.97);
    assert_eq!(observer.current(), None);

    let recorder = BreakpointRecorder::new();
    let _subscription = recorder.subscribe(&observer);
    assert_eq!(recorder.count(), 0);

    viewport.resize(650.0);
    assert_eq!(recorder.seen(), vec![Breakpoint::Sm]);
}

// =============================================================================
// Resizing
// =============================================================================

#[test]
fn test_resize_emits_each_change() {
    let (viewport, observer) = observer_at(500.0);
    let recorder = BreakpointRecorder::new();
    let _subscription = recorder.subscribe(&observer);

    viewport.resize(700.0);
    viewport.resize(2000.0);
    viewport.resize(1000.0);

    assert_eq!(
        recorder.seen(),
        vec![
            Breakpoint::Xs,
            Breakpoint::Sm,
            Breakpoint::Xl,
            Breakpoint::Md,
        ]
    );
    assert_eq!(observer.current(), Some(Breakpoint::Md));
}

#[test]
fn test_resize_within_range_is_silent() {
    let (viewport, observer) = observer_at(610.0);
    let recorder = BreakpointRecorder::new();
    let _subscription = recorder.subscribe(&observer);

    viewport.resize(700.0);
    viewport.resize(959.0);
    viewport.resize(600.0);

    assert_eq!(recorder.seen(), vec![Breakpoint::Sm]);
}

#[test]
fn test_no_consecutive_duplicates() {
    let (viewport, observer) = observer_at(100.0);
    let recorder = BreakpointRecorder::new();
    let _subscription = recorder.subscribe(&observer);

    let mut width = 0.0;
    while width <= 2400.0 {
        viewport.resize(width);
        width += 37.5;
    }
    while width >= 0.0 {
        viewport.resize(width);
        width -= 41.0;
    }

    let seen = recorder.seen();
    assert!(seen.windows(2).all(|pair| pair[0] != pair[1]), "{seen:?}");
    assert_eq!(seen.first(), Some(&Breakpoint::Xs));
    assert_eq!(seen.last(), Some(&Breakpoint::Xs));
    assert_eq!(seen.len(), 9);
}

#[test]
fn test_repeated_match_event_is_ignored() {
    let (viewport, observer) = observer_at(700.0);
    let recorder = BreakpointRecorder::new();
    let _subscription = recorder.subscribe(&observer);

    let sm = "screen and (min-width: 600px) and (max-width: 959.95px)";
    assert_eq!(viewport.force(sm, true), 1);
    assert_eq!(viewport.force(sm, false), 1);

    assert_eq!(recorder.seen(), vec![Breakpoint::Sm]);
    assert_eq!(observer.current(), Some(Breakpoint::Sm));
}

#[test]
fn test_last_delivered_match_wins() {
    let (viewport, observer) = observer_at(700.0);
    let recorder = BreakpointRecorder::new();
    let _subscription = recorder.subscribe(&observer);

    viewport.force("screen and (min-width: 1920px)", true);
    let md = "screen and (min-width: 960px) and (max-width: 1279.95px)";
    viewport.force(md, true);

    assert_eq!(observer.current(), Some(Breakpoint::Md));
    assert_eq!(
        recorder.seen(),
        vec![Breakpoint::Sm, Breakpoint::Xl, Breakpoint::Md]
    );
}

// =============================================================================
// Subscriptions
// =============================================================================

#[test]
fn test_late_subscriber_gets_current_immediately() {
    let (viewport, observer) = observer_at(500.0);
    viewport.resize(700.0);

    let late = BreakpointRecorder::new();
    let _subscription = late.subscribe(&observer);
    assert_eq!(late.seen(), vec![Breakpoint::Sm]);
}

#[test]
fn test_subscribers_are_multicast() {
    let (viewport, observer) = observer_at(500.0);
    let first = BreakpointRecorder::new();
    let second = BreakpointRecorder::new();
    let _first = first.subscribe(&observer);
    let _second = second.subscribe(&observer);

    viewport.resize(1300.0);
    assert_eq!(first.seen(), vec![Breakpoint::Xs, Breakpoint::Lg]);
    assert_eq!(second.seen(), first.seen());
    assert_eq!(observer.subscriber_count(), 2);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let (viewport, observer) = observer_at(500.0);
    let recorder = BreakpointRecorder::new();
    let subscription = recorder.subscribe(&observer);

    subscription.unsubscribe();
    viewport.resize(1300.0);

    assert_eq!(recorder.seen(), vec![Breakpoint::Xs]);
    assert_eq!(observer.subscriber_count(), 0);
}

#[test]
fn test_subscriber_can_read_current_and_subscribe() {
    use std::{cell::RefCell, rc::Rc};

    let (viewport, observer) = observer_at(500.0);
    let observer = Rc::new(observer);
    let reads = Rc::new(RefCell::new(Vec::new()));
    let nested = BreakpointRecorder::new();
    let nested_subscriptions = Rc::new(RefCell::new(Vec::new()));

    let _subscription = observer.subscribe({
        let observer = Rc::downgrade(&observer);
        let reads = reads.clone();
        let nested = nested.clone();
        let nested_subscriptions = nested_subscriptions.clone();
        move |breakpoint| {
            let Some(observer) = observer.upgrade() else {
                return;
            };
            reads.borrow_mut().push((breakpoint, observer.current()));
            if breakpoint == Breakpoint::Md {
                nested_subscriptions
                    .borrow_mut()
                    .push(nested.subscribe(&observer));
            }
        }
    });

    viewport.resize(1000.0);
    viewport.resize(1500.0);

    assert_eq!(
        *reads.borrow(),
        vec![
            (Breakpoint::Xs, Some(Breakpoint::Xs)),
            (Breakpoint::Md, Some(Breakpoint::Md)),
            (Breakpoint::Lg, Some(Breakpoint::Lg)),
        ]
    );
    assert_eq!(nested.seen(), vec![Breakpoint::Md, Breakpoint::Lg]);
}

#[test]
fn test_subscriber_resizing_during_delivery() {
    let (viewport, observer) = observer_at(500.0);
    let _resizer = observer.subscribe({
        let viewport = viewport.clone();
        move |breakpoint| {
            if breakpoint == Breakpoint::Sm {
                viewport.resize(1000.0);
            }
        }
    });
    let recorder = BreakpointRecorder::new();
    let _subscription = recorder.subscribe(&observer);

    viewport.resize(700.0);

    assert_eq!(observer.current(), Some(Breakpoint::Md));
    assert_eq!(recorder.seen(), vec![Breakpoint::Xs, Breakpoint::Md]);
    assert_eq!(recorder.last(), observer.current());
}

// =============================================================================
// Disposal
// =============================================================================

#[test]
fn test_dispose_unregisters_every_query() {
    let (viewport, mut observer) = observer_at(700.0);
    assert_eq!(viewport.active_registrations(), 5);

    observer.dispose();
    assert!(observer.is_disposed());
    assert_eq!(viewport.active_registrations(), 0);
}

#[test]
fn test_no_emission_after_dispose() {
    let (viewport, mut observer) = observer_at(700.0);
    let recorder = BreakpointRecorder::new();
    let _subscription = recorder.subscribe(&observer);

    observer.dispose();
    viewport.resize(2000.0);
    assert_eq!(viewport.force("screen and (min-width: 1920px)", true), 0);

    assert_eq!(recorder.seen(), vec![Breakpoint::Sm]);
    assert_eq!(observer.current(), Some(Breakpoint::Sm));
}

#[test]
fn test_drop_disposes() {
    let (viewport, observer) = observer_at(700.0);
    drop(observer);
    assert_eq!(viewport.active_registrations(), 0);
}

#[test]
fn test_two_observers_share_a_viewport() {
    let viewport = TestViewport::new(700.0);
    let first = BreakpointObserver::new(BreakpointsDefinition::default(), viewport.clone());
    let mut second = BreakpointObserver::new(BreakpointsDefinition::default(), viewport.clone());
    assert_eq!(viewport.active_registrations(), 10);

    second.dispose();
    viewport.resize(1000.0);
    assert_eq!(first.current(), Some(Breakpoint::Md));
    assert_eq!(second.current(), Some(Breakpoint::Sm));
    assert_eq!(viewport.active_registrations(), 5);
}

// =============================================================================
// Reactive signal
// =============================================================================

#[test]
fn test_signal_tracks_current() {
    use lattice::reactive::SignalGet;

    let (viewport, observer) = observer_at(500.0);
    let signal = observer.current_signal();
    assert_eq!(signal.get_untracked(), Some(Breakpoint::Xs));

    viewport.resize(1000.0);
    assert_eq!(signal.get_untracked(), Some(Breakpoint::Md));
    let again = observer.current_signal();
    assert_eq!(again.get_untracked(), Some(Breakpoint::Md));
}

#[test]
fn test_signal_before_resolution_is_none() {
    use lattice::reactive::SignalGet;

    let (viewport, observer) = observer_at(599.97);
    let signal = observer.current_signal();
    assert_eq!(signal.get_untracked(), None);

    viewport.resize(100.0);
    assert_eq!(signal.get_untracked(), Some(Breakpoint::Xs));
}
