//! Tests for LifecycleGate
//!
//! The reader session must be active exactly while the application is in
//! the foreground, across any sequence of transitions.

use pretty_assertions::assert_eq;
use tapbridge_core::{DriverError, HardwareError, LifecycleSignal, SessionState};
use tests::async_helpers::{DEFAULT_TIMEOUT, QUIET_PERIOD};
use tests::events::wait_for;
use tests::fixtures::{SessionFixture, SAMPLE_UID};
use tests::mocks::*;

#[tokio::test]
async fn foreground_activates_and_background_releases() {
    let fixture = SessionFixture::new(MockReaderDriver::new());
    let mut gate = fixture.gate.lock();

    gate.on_foreground().unwrap();
    assert!(gate.is_foreground());
    assert_eq!(gate.state(), SessionState::Active);
    assert!(fixture.driver.is_enabled());

    gate.on_background();
    assert!(!gate.is_foreground());
    assert_eq!(gate.state(), SessionState::Inactive);
    assert!(!fixture.driver.is_enabled());
}

#[tokio::test]
async fn signals_drive_the_same_transitions() {
    let fixture = SessionFixture::new(MockReaderDriver::new());
    let mut gate = fixture.gate.lock();

    gate.apply(LifecycleSignal::Resumed).unwrap();
    assert_eq!(gate.state(), SessionState::Active);

    gate.apply(LifecycleSignal::Paused).unwrap();
    assert_eq!(gate.state(), SessionState::Inactive);
}

#[tokio::test]
async fn rapid_cycles_leave_no_orphan_handler() {
    let fixture = SessionFixture::new(MockReaderDriver::new());
    let subscriber = RecordingSubscriber::new();
    fixture.bridge.subscribe(subscriber.clone());

    {
        let mut gate = fixture.gate.lock();
        gate.on_foreground().unwrap();
        gate.on_background();
        gate.on_foreground().unwrap();
        gate.on_background();

        assert_eq!(gate.state(), SessionState::Inactive);
        assert!(!gate.session().has_handler());
    }
    assert!(!fixture.driver.is_enabled());
    assert_eq!(fixture.driver.enable_calls(), 2);
    assert_eq!(fixture.driver.disable_calls(), 2);

    fixture.driver.fire_all_handlers(&SAMPLE_UID);
    tokio::time::sleep(QUIET_PERIOD).await;
    assert_eq!(subscriber.count(), 0);
    assert_eq!(fixture.bridge.stats().stale, 2);
}

#[tokio::test]
async fn repeated_foreground_keeps_a_single_live_handler() {
    let fixture = SessionFixture::new(MockReaderDriver::new());
    let subscriber = RecordingSubscriber::new();
    fixture.bridge.subscribe(subscriber.clone());

    {
        let mut gate = fixture.gate.lock();
        gate.on_foreground().unwrap();
        gate.on_foreground().unwrap();
        gate.on_foreground().unwrap();
    }

    fixture.driver.fire_all_handlers(&SAMPLE_UID);
    assert!(wait_for(DEFAULT_TIMEOUT, || subscriber.count() == 1).await);
    tokio::time::sleep(QUIET_PERIOD).await;
    assert_eq!(subscriber.count(), 1);
}

#[tokio::test]
async fn failed_foreground_is_retried_on_next_foreground() {
    let fixture = SessionFixture::new(MockReaderDriver::new().with_enable_error(DriverError::Busy));
    let mut gate = fixture.gate.lock();

    let err = gate.on_foreground().unwrap_err();
    assert_eq!(err, HardwareError::ActivationError(DriverError::Busy));
    assert!(gate.is_foreground());
    assert_eq!(gate.state(), SessionState::Inactive);

    gate.on_background();
    fixture.driver.set_enable_error(None);
    gate.on_foreground().unwrap();
    assert_eq!(gate.state(), SessionState::Active);
}

#[tokio::test]
async fn unavailable_hardware_stays_inactive_in_foreground() {
    let fixture = SessionFixture::new(MockReaderDriver::unavailable());
    let mut gate = fixture.gate.lock();

    for _ in 0..2 {
        assert_eq!(gate.on_foreground(), Err(HardwareError::HardwareUnavailable));
        assert_eq!(gate.state(), SessionState::Inactive);
        gate.on_background();
    }
    assert_eq!(fixture.driver.enable_calls(), 0);
}

#[tokio::test]
async fn background_before_any_foreground_is_harmless() {
    let fixture = SessionFixture::new(MockReaderDriver::new());
    let mut gate = fixture.gate.lock();

    gate.on_background();
    assert_eq!(gate.state(), SessionState::Inactive);
    assert!(!gate.is_foreground());
}
