//! Inactivity classification against a scripted host.

mod common;

use archiver_core::{ContinuationPolicy, HostError};
use archiver_lifecycle::{InactivityClassifier, LifecycleError};
use chrono::{DateTime, Duration, Utc};
use rstest::rstest;

use common::{host_and_pacer, now, repo, ts};

fn two_years() -> Duration {
    Duration::days(730)
}

#[test]
fn includes_repo_pushed_three_years_ago_with_push_timestamp() {
    let (host, pacer) = host_and_pacer();
    let host = host.with_push("alice/old-proj", ts(2022, 6, 1));

    let classifier =
        InactivityClassifier::new(&host, two_years(), ContinuationPolicy::default(), &pacer);
    let inactive = classifier
        .find_inactive(&[repo("alice", "old-proj", false)], now())
        .expect("classify");

    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].full_name(), "alice/old-proj");
    assert_eq!(inactive[0].last_activity, ts(2022, 6, 1));
}

#[test]
fn archived_repos_are_never_returned_or_queried() {
    let (host, pacer) = host_and_pacer();
    let host = host.with_push("alice/fossil", ts(2001, 1, 1));

    let classifier =
        InactivityClassifier::new(&host, two_years(), ContinuationPolicy::default(), &pacer);
    let inactive = classifier
        .find_inactive(&[repo("alice", "fossil", true)], now())
        .expect("classify");

    assert!(inactive.is_empty());
    assert!(host.calls().is_empty(), "calls: {:?}", host.calls());
}

#[test]
fn recent_issue_activity_keeps_repo_active() {
    let (host, pacer) = host_and_pacer();
    let host = host
        .with_push("alice/discussed", ts(2020, 1, 1))
        .with_issue("alice/discussed", ts(2025, 1, 1));

    let classifier =
        InactivityClassifier::new(&host, two_years(), ContinuationPolicy::default(), &pacer);
    let inactive = classifier
        .find_inactive(&[repo("alice", "discussed", false)], now())
        .expect("classify");

    assert!(inactive.is_empty());
}

#[test]
fn issue_lookup_failure_falls_back_to_push_even_without_force() {
    let (mut host, pacer) = host_and_pacer();
    host.issue_errors.insert("alice/quiet".to_string());
    let host = host.with_push("alice/quiet", ts(2019, 3, 1));

    let classifier =
        InactivityClassifier::new(&host, two_years(), ContinuationPolicy::new(false), &pacer);
    let inactive = classifier
        .find_inactive(&[repo("alice", "quiet", false)], now())
        .expect("classify");

    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].last_activity, ts(2019, 3, 1));
}

#[rstest]
#[case::one_second_before_cutoff(now() - Duration::days(730) - Duration::seconds(1), true)]
#[case::exactly_at_cutoff(now() - Duration::days(730), false)]
#[case::after_cutoff(now() - Duration::days(10), false)]
fn cutoff_is_strict(#[case] pushed: DateTime<Utc>, #[case] expected_inactive: bool) {
    let (host, pacer) = host_and_pacer();
    let host = host.with_push("alice/edge", pushed);

    let classifier =
        InactivityClassifier::new(&host, two_years(), ContinuationPolicy::default(), &pacer);
    let inactive = classifier
        .find_inactive(&[repo("alice", "edge", false)], now())
        .expect("classify");

    assert_eq!(!inactive.is_empty(), expected_inactive);
}

#[test]
fn output_preserves_input_order() {
    let (host, pacer) = host_and_pacer();
    let host = host
        .with_push("alice/zeta", ts(2021, 1, 1))
        .with_push("alice/alpha", ts(2015, 1, 1))
        .with_push("alice/busy", ts(2025, 5, 1))
        .with_push("alice/mid", ts(2018, 1, 1));
    let repos = vec![
        repo("alice", "zeta", false),
        repo("alice", "alpha", false),
        repo("alice", "busy", false),
        repo("alice", "gone", true),
        repo("alice", "mid", false),
    ];

    let classifier =
        InactivityClassifier::new(&host, two_years(), ContinuationPolicy::default(), &pacer);
    let names: Vec<String> = classifier
        .find_inactive(&repos, now())
        .expect("classify")
        .into_iter()
        .map(|r| r.name.0)
        .collect();

    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn throttles_once_per_checked_repo() {
    let (host, pacer) = host_and_pacer();
    let host = host
        .with_push("alice/a", ts(2015, 1, 1))
        .with_push("alice/b", ts(2015, 1, 1));
    let repos = vec![
        repo("alice", "a", false),
        repo("alice", "skipped", true),
        repo("alice", "b", false),
    ];

    InactivityClassifier::new(&host, two_years(), ContinuationPolicy::default(), &pacer)
        .find_inactive(&repos, now())
        .expect("classify");

    let waits = host
        .calls()
        .iter()
        .filter(|c| c.as_str() == "wait throttle")
        .count();
    assert_eq!(waits, 2);
}

#[test]
fn push_lookup_failure_aborts_without_partial_result() {
    let (mut host, pacer) = host_and_pacer();
    host.push_errors.insert("alice/broken".to_string());
    let host = host.with_push("alice/first", ts(2015, 1, 1));
    let repos = vec![repo("alice", "first", false), repo("alice", "broken", false)];

    let err = InactivityClassifier::new(&host, two_years(), ContinuationPolicy::new(false), &pacer)
        .find_inactive(&repos, now())
        .unwrap_err();

    match err {
        LifecycleError::Activity { repo, source } => {
            assert_eq!(repo, "alice/broken");
            assert!(matches!(source, HostError::Status { status: 500, .. }));
        }
        other => panic!("expected activity error, got {other:?}"),
    }
}

#[test]
fn push_lookup_failure_under_force_dates_repo_at_epoch() {
    let (mut host, pacer) = host_and_pacer();
    host.push_errors.insert("alice/broken".to_string());
    let host = host.with_push("alice/fresh", ts(2025, 5, 1));
    let repos = vec![repo("alice", "broken", false), repo("alice", "fresh", false)];

    let inactive = InactivityClassifier::new(&host, two_years(), ContinuationPolicy::new(true), &pacer)
        .find_inactive(&repos, now())
        .expect("force continues");

    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].full_name(), "alice/broken");
    assert_eq!(inactive[0].last_activity, DateTime::<Utc>::UNIX_EPOCH);
}

#[test]
fn threshold_beyond_calendar_range_is_an_error_not_a_panic() {
    let (host, pacer) = host_and_pacer();
    let host = host.with_push("alice/old-proj", ts(2022, 6, 1));

    let classifier = InactivityClassifier::new(
        &host,
        Duration::days(365 * 300_000),
        ContinuationPolicy::new(true),
        &pacer,
    );
    let err = classifier
        .find_inactive(&[repo("alice", "old-proj", false)], now())
        .unwrap_err();

    assert!(
        matches!(err, LifecycleError::ThresholdOutOfRange { threshold_days } if threshold_days == 365 * 300_000),
        "got: {err}"
    );
    assert!(host.calls().is_empty());
}
