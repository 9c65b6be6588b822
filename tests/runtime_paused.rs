// tests/runtime_paused.rs
//
// Drives the real async runtime with tokio's clock paused, so the
// 15 second generation period costs no wall time.

use std::time::Duration;

use checkflow::clock::SystemClock;
use checkflow::engine::{SimCore, SimOptions, spawn_simulation};
use checkflow::errors::CheckflowError;
use checkflow_test_utils::builders::ConfigFileBuilder;
use checkflow_test_utils::{init_tracing, with_timeout};

use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn first_tick_creates_a_batch_that_drains_three_seconds_later() {
    init_tracing();
    let cfg = ConfigFileBuilder::new().seed(42).build();
    let core = SimCore::new(&cfg, SimOptions::default());
    let (handle, _join) = spawn_simulation(core, SystemClock::new());

    handle.start().await.unwrap();

    sleep(Duration::from_millis(15_050)).await;
    let snap = handle.snapshot();
    assert!(snap.running);
    assert_eq!(snap.tick_count, 1);
    assert!((2..=4).contains(&snap.live_jobs), "live: {}", snap.live_jobs);
    assert!(snap.graph.node("scheduler").unwrap().ticking);
    let batch = snap.live_jobs as u64;

    sleep(Duration::from_millis(3_150)).await;
    let snap = handle.snapshot();
    assert_eq!(snap.live_jobs, 0);
    assert_eq!(snap.stats.total(), batch);
    assert_eq!(
        snap.stats.total(),
        snap.stats.success() + snap.stats.failed()
    );

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn stopped_simulation_stays_frozen() {
    let cfg = ConfigFileBuilder::new().seed(7).build();
    let core = SimCore::new(&cfg, SimOptions::default());
    let (handle, _join) = spawn_simulation(core, SystemClock::new());

    handle.start().await.unwrap();
    sleep(Duration::from_millis(19_000)).await;
    let counted = handle.snapshot().stats;
    assert!(counted.total() >= 2);

    handle.stop().await.unwrap();
    sleep(Duration::from_millis(10)).await;
    let stopped = handle.snapshot();
    assert!(!stopped.running);
    assert!(stopped.graph.edges.is_empty());
    assert_eq!(stopped.stats, counted);

    sleep(Duration::from_secs(20)).await;
    let later = handle.snapshot();
    assert_eq!(later, stopped);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn tick_limited_run_exits_and_closes_controls() {
    let cfg = ConfigFileBuilder::new()
        .seed(3)
        .generation_period_ms(1_000)
        .build();
    let core = SimCore::new(&cfg, SimOptions { tick_limit: Some(2) });
    let (handle, join) = spawn_simulation(core, SystemClock::new());

    handle.start().await.unwrap();

    let result = with_timeout(Duration::from_secs(60), join)
        .await
        .expect("runtime task panicked");
    assert!(result.is_ok());

    let last = handle.snapshot();
    assert_eq!(last.tick_count, 2);
    assert_eq!(last.live_jobs, 0);
    assert!(last.stats.total() >= 4);

    match handle.start().await {
        Err(CheckflowError::ChannelClosed(which)) => assert_eq!(which, "control"),
        other => panic!("expected ChannelClosed, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_a_clean_stopped_state() {
    let cfg = ConfigFileBuilder::new()
        .seed(19)
        .generation_period_ms(1_000)
        .build();
    let core = SimCore::new(&cfg, SimOptions::default());
    let (handle, _join) = spawn_simulation(core, SystemClock::new());

    handle.start().await.unwrap();
    sleep(Duration::from_millis(4_500)).await;
    assert!(handle.snapshot().stats.total() > 0);

    handle.reset().await.unwrap();
    sleep(Duration::from_millis(10)).await;

    let snap = handle.snapshot();
    assert!(!snap.running);
    assert_eq!(snap.tick_count, 0);
    assert_eq!(snap.live_jobs, 0);
    assert_eq!(snap.stats.as_tuple(), (0, 0, 0));

    handle.shutdown().await.unwrap();
}
