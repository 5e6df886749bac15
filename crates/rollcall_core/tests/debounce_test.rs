use rollcall_core::{DEFAULT_COOLDOWN, ManualClock, MessageId, TriggerDebouncer};
use std::time::Duration;

#[test]
fn default_cooldown_is_five_seconds() {
    assert_eq!(DEFAULT_COOLDOWN, Duration::from_millis(5000));
    assert_eq!(TriggerDebouncer::new(DEFAULT_COOLDOWN).cooldown(), DEFAULT_COOLDOWN);
}

#[test]
fn second_trigger_inside_window_is_rejected() {
    let clock = ManualClock::new();
    let debouncer = TriggerDebouncer::with_clock(DEFAULT_COOLDOWN, clock.clone());
    let message = MessageId(100);

    assert!(debouncer.should_process(message));
    clock.advance(Duration::from_secs(2));
    assert!(!debouncer.should_process(message));
}

#[test]
fn trigger_at_window_edge_is_accepted() {
    let clock = ManualClock::new();
    let debouncer = TriggerDebouncer::with_clock(DEFAULT_COOLDOWN, clock.clone());
    let message = MessageId(100);

    assert!(debouncer.should_process(message));
    clock.advance(Duration::from_millis(4999));
    assert!(!debouncer.should_process(message));
    clock.advance(Duration::from_millis(1));
    assert!(debouncer.should_process(message));
}

#[test]
fn rejected_trigger_does_not_extend_window() {
    let clock = ManualClock::new();
    let debouncer = TriggerDebouncer::with_clock(DEFAULT_COOLDOWN, clock.clone());
    let message = MessageId(7);

    assert!(debouncer.should_process(message));
    clock.advance(Duration::from_secs(4));
    assert!(!debouncer.should_process(message));
    clock.advance(Duration::from_secs(1));
    assert!(debouncer.should_process(message));
}

#[test]
fn messages_are_debounced_independently() {
    let clock = ManualClock::new();
    let debouncer = TriggerDebouncer::with_clock(DEFAULT_COOLDOWN, clock);

    assert!(debouncer.should_process(MessageId(1)));
    assert!(debouncer.should_process(MessageId(2)));
    assert!(!debouncer.should_process(MessageId(1)));
    assert_eq!(debouncer.tracked(), 2);
}
