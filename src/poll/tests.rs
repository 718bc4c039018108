//! Unit tests for the deadline-bounded poller.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rstest::rstest;

use super::*;
use crate::error::UpCloudError;

type Step = Result<Option<String>, UpCloudError>;

fn transient() -> Step {
    Err(UpCloudError::Transport {
        message: "connection reset".to_owned(),
    })
}

fn pending() -> Step {
    Ok(Some("maintenance".to_owned()))
}

fn done() -> Step {
    Ok(Some("stopped".to_owned()))
}

fn gone() -> Step {
    Ok(None)
}

/// Runs the poller against a scripted sequence of fetch results; once the
/// script is exhausted every further fetch reports a pending state.
async fn run_script(poller: Poller, steps: Vec<Step>) -> PollOutcome<String> {
    let script = RefCell::new(VecDeque::from(steps));
    poller
        .run(
            || {
                let next = script.borrow_mut().pop_front().unwrap_or_else(pending);
                async move { next }
            },
            |state| state == "stopped",
        )
        .await
}

#[tokio::test]
async fn poller_times_out_within_bound_when_predicate_never_holds() {
    let started = Instant::now();
    let outcome = run_script(
        Poller::new(Duration::from_millis(100), Duration::from_millis(20)),
        Vec::new(),
    )
    .await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, PollOutcome::TimedOut);
    assert!(elapsed >= Duration::from_millis(100), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(400), "overran bound: {elapsed:?}");
}

#[tokio::test]
async fn poller_reports_disappearance_without_sleeping() {
    let started = Instant::now();
    let outcome = run_script(
        Poller::new(Duration::from_secs(5), Duration::from_secs(1)),
        vec![gone()],
    )
    .await;

    assert_eq!(outcome, PollOutcome::Disappeared);
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn poller_returns_immediately_on_first_match() {
    let started = Instant::now();
    let outcome = run_script(
        Poller::new(Duration::from_secs(5), Duration::from_secs(1)),
        vec![done()],
    )
    .await;

    assert_eq!(outcome, PollOutcome::Reached("stopped".to_owned()));
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn transient_fetch_errors_are_retried_until_the_predicate_holds() {
    let outcome = run_script(
        Poller::new(Duration::from_millis(500), Duration::from_millis(10)),
        vec![transient(), transient(), pending(), done()],
    )
    .await;

    assert_eq!(outcome, PollOutcome::Reached("stopped".to_owned()));
}

#[rstest]
#[case::errors_then_timeout(vec![transient(), transient()], PollOutcome::TimedOut)]
#[case::deletion_mid_errors(vec![transient(), pending(), gone()], PollOutcome::Disappeared)]
#[case::success_after_errors(vec![transient(), done()], PollOutcome::Reached("stopped".to_owned()))]
#[case::deletion_first(vec![gone(), done()], PollOutcome::Disappeared)]
#[tokio::test]
async fn every_interleaving_resolves_to_exactly_one_outcome(
    #[case] steps: Vec<Step>,
    #[case] expected: PollOutcome<String>,
) {
    let outcome = run_script(
        Poller::new(Duration::from_millis(80), Duration::from_millis(10)),
        steps,
    )
    .await;
    assert_eq!(outcome, expected);
}

#[test]
fn zero_interval_is_clamped_to_the_floor() {
    let poller = Poller::new(Duration::from_secs(1), Duration::ZERO);
    assert_eq!(poller.interval, MIN_POLL_INTERVAL);
}

#[test]
fn outcome_accessors_distinguish_reached() {
    let reached: PollOutcome<String> = PollOutcome::Reached("online".to_owned());
    assert!(reached.is_reached());
    assert_eq!(reached.reached(), Some("online".to_owned()));

    let timed_out: PollOutcome<String> = PollOutcome::TimedOut;
    assert!(!timed_out.is_reached());
    assert_eq!(timed_out.reached(), None);
}
