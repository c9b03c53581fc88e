use sortbench::application::benchmarking::MeasurementRepo;
use sortbench::application::client::BenchmarkClient;
use sortbench::application::session::ComparisonSession;
use sortbench::domain::chart_bounds::{ChartBounds, ChartScale};
use sortbench::domain::sorting::SortStrategy;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(60);

fn scale() -> ChartScale {
    ChartScale {
        slider_min: 4,
        slider_max: 8,
        lower_step: 2,
        multiplier: 25,
    }
}

fn session(bounds: ChartBounds) -> (ComparisonSession, Arc<MeasurementRepo>) {
    let repo = Arc::new(MeasurementRepo::with_settings(10, Some(99)));
    let client = BenchmarkClient::spawn(repo.clone()).unwrap();
    (ComparisonSession::new(client, scale(), bounds).unwrap(), repo)
}

#[test]
fn test_toggle_off_removes_strategy_from_samples() {
    let (mut session, repo) = session(ChartBounds::new(6));
    let initial = session.wait(WAIT).unwrap().to_vec();
    assert!(initial.iter().any(|m| m.strategy == SortStrategy::Bubble));
    let entries = repo.len();

    assert!(!session.toggle(SortStrategy::Bubble).unwrap());
    let after = session.wait(WAIT).unwrap().to_vec();

    assert!(after.iter().all(|m| m.strategy != SortStrategy::Bubble));
    assert_eq!(after.len(), initial.len() / 4 * 3);
    assert_eq!(repo.len(), entries, "no entries evicted or added");
    assert!(repo.cached(SortStrategy::Bubble, 50).is_some());
}

#[test]
fn test_moving_slider_back_hits_cache() {
    let (mut session, repo) = session(ChartBounds::new(5));
    let at_five = session.wait(WAIT).unwrap().to_vec();

    session.set_n(8).unwrap();
    session.wait(WAIT).unwrap();
    let computed = repo.stats().computed;

    session.set_n(5).unwrap();
    let back_at_five = session.wait(WAIT).unwrap().to_vec();

    assert_eq!(at_five, back_at_five);
    assert_eq!(repo.stats().computed, computed);
}

#[test]
fn test_rapid_changes_settle_on_latest_bounds() {
    let (mut session, _repo) = session(ChartBounds::new(4));
    for n in 5..=8 {
        session.set_n(n).unwrap();
    }
    session.toggle(SortStrategy::Heap).unwrap();

    let samples = session.wait(WAIT).unwrap().to_vec();
    let (lower, upper) = session.x_domain();
    assert_eq!((lower, upper), (50, 200));
    assert!(samples.iter().all(|m| m.elements >= lower && m.elements < upper));
    assert!(samples.iter().all(|m| m.strategy != SortStrategy::Heap));
    assert!(!session.is_calculating());
    assert!(!session.poll());
}

#[test]
fn test_toggle_all_off_yields_no_samples() {
    let (mut session, _repo) = session(ChartBounds::new(4));
    for strategy in SortStrategy::ALL {
        session.toggle(strategy).unwrap();
    }
    assert!(session.bounds().strategies.is_empty());
    assert!(session.wait(WAIT).unwrap().is_empty());
}
