use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use tokio::sync::watch;

use lori_core::clock::Clock;
use lori_domain::report::ReportFrequency;
use lori_reports::domain::types::TickSummary;
use lori_reports::runner::TriggerLoop;
use lori_reports::usecase::tick::RecurringScheduler;
use lori_testing::clock::ManualClock;
use lori_testing::notify::RecordingGateway;

use crate::helpers::MockReportStore;

struct Running {
    status: watch::Receiver<Option<TickSummary>>,
    shutdown: watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

fn start(
    store: &MockReportStore,
    gateway: &RecordingGateway,
    clock: &ManualClock,
    tick_on_start: bool,
) -> Running {
    let (status_tx, status) = watch::channel(None);
    let (shutdown, shutdown_rx) = watch::channel(false);
    let trigger = TriggerLoop {
        scheduler: Arc::new(RecurringScheduler::new(store.clone(), gateway.clone(), 2)),
        clock: clock.clone(),
        period: StdDuration::from_secs(60),
        tick_on_start,
        status: status_tx,
    };
    Running {
        status,
        shutdown,
        task: tokio::spawn(trigger.run(shutdown_rx)),
    }
}

#[tokio::test(start_paused = true)]
async fn should_tick_immediately_and_publish_summary() {
    let clock = ManualClock::at_date(2024, 5, 10);
    let store = MockReportStore::new();
    let gateway = RecordingGateway::new();
    store.add_report(ReportFrequency::Daily, clock.now());
    let orphan = store.add_orphan_report(clock.now());

    let mut running = start(&store, &gateway, &clock, true);
    running.status.changed().await.unwrap();

    let summary = running.status.borrow().clone().unwrap();
    assert_eq!(summary.due, 2);
    assert_eq!(summary.sent, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(store.get(orphan.id).next_report_date, clock.now());

    running.shutdown.send(true).unwrap();
    running.task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn should_wait_a_full_period_when_not_ticking_on_start() {
    let clock = ManualClock::at_date(2024, 5, 10);
    let store = MockReportStore::new();
    let gateway = RecordingGateway::new();
    store.add_report(ReportFrequency::Daily, clock.now());

    let running = start(&store, &gateway, &clock, false);

    tokio::time::sleep(StdDuration::from_secs(59)).await;
    assert_eq!(store.find_due_calls(), 0);

    tokio::time::sleep(StdDuration::from_secs(2)).await;
    assert_eq!(store.find_due_calls(), 1);
    assert_eq!(gateway.sent().len(), 1);

    running.shutdown.send(true).unwrap();
    running.task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn should_pick_up_reports_on_later_ticks() {
    let clock = ManualClock::at_date(2024, 5, 10);
    let store = MockReportStore::new();
    let gateway = RecordingGateway::new();
    let report = store.add_report(ReportFrequency::Daily, clock.now() + Duration::days(1));

    let running = start(&store, &gateway, &clock, true);
    tokio::time::sleep(StdDuration::from_secs(1)).await;
    assert!(gateway.sent().is_empty());

    clock.advance(Duration::days(1));
    tokio::time::sleep(StdDuration::from_secs(61)).await;

    assert_eq!(gateway.sent().len(), 1);
    assert_eq!(
        store.get(report.id).next_report_date,
        clock.now() + Duration::days(1)
    );

    running.shutdown.send(true).unwrap();
    running.task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn should_stop_when_shutdown_sender_dropped() {
    let clock = ManualClock::at_date(2024, 5, 10);
    let store = MockReportStore::new();
    let gateway = RecordingGateway::new();

    let Running { shutdown, task, .. } = start(&store, &gateway, &clock, true);
    drop(shutdown);

    task.await.unwrap();
}
