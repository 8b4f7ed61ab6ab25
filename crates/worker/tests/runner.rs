//! Integration tests for the simulation runner against a real database.

use std::time::{Duration, Instant};

use simflow_db::models::machine::CreateMachine;
use simflow_db::models::status::SimulationStatus;
use simflow_db::repositories::{ConvergenceRepo, MachineRepo, SimulationRepo};
use simflow_worker::{run_simulation, task_queue, SimulationRunner};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_simulation(pool: &PgPool, simulation_id: i64) {
    let machine = CreateMachine {
        machine_id: 123,
        name: "Machine Name".to_string(),
    };
    MachineRepo::insert_if_absent(pool, &machine).await.unwrap();
    SimulationRepo::insert_pending(pool, simulation_id, "Test Simulation", 123)
        .await
        .unwrap();
}

async fn status_of(pool: &PgPool, simulation_id: i64) -> SimulationStatus {
    SimulationRepo::find_by_id(pool, simulation_id)
        .await
        .unwrap()
        .unwrap()
        .status
}

// ---------------------------------------------------------------------------
// Test: a run writes ten samples and finishes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_generates_ten_samples_and_finishes(pool: PgPool) {
    seed_simulation(&pool, 456).await;

    let status = run_simulation(&pool, 456, Duration::ZERO).await;
    assert_eq!(status, SimulationStatus::Finished);
    assert_eq!(status_of(&pool, 456).await, SimulationStatus::Finished);

    let series = ConvergenceRepo::list_for_simulation(&pool, 456).await.unwrap();
    let seconds: Vec<i32> = series.iter().map(|p| p.seconds).collect();
    assert_eq!(seconds, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    assert_eq!(series[0].loss, 0.042);
    assert_eq!(series[9].loss, 0.022);
    assert!(series.iter().all(|p| (0.0..=1.0).contains(&p.loss)));
}

// ---------------------------------------------------------------------------
// Test: a run pauses after every iteration, including the last
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_pauses_after_every_iteration(pool: PgPool) {
    seed_simulation(&pool, 1).await;
    let delay = Duration::from_millis(50);

    let started = Instant::now();
    let status = run_simulation(&pool, 1, delay).await;
    let elapsed = started.elapsed();

    assert_eq!(status, SimulationStatus::Finished);
    assert!(
        elapsed >= delay * 10,
        "expected ten pauses of {delay:?}, run took {elapsed:?}",
    );
}

// ---------------------------------------------------------------------------
// Test: a failing append reverts to pending and keeps earlier samples
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_run_reverts_to_pending_and_keeps_partial_rows(pool: PgPool) {
    seed_simulation(&pool, 7).await;

    // Make the fifth append (seconds = 50) violate a constraint.
    sqlx::query("ALTER TABLE convergence_data ADD CONSTRAINT ck_test_cutoff CHECK (seconds < 50)")
        .execute(&pool)
        .await
        .unwrap();

    let status = run_simulation(&pool, 7, Duration::ZERO).await;
    assert_eq!(status, SimulationStatus::Pending);
    assert_eq!(status_of(&pool, 7).await, SimulationStatus::Pending);

    let series = ConvergenceRepo::list_for_simulation(&pool, 7).await.unwrap();
    let seconds: Vec<i32> = series.iter().map(|p| p.seconds).collect();
    assert_eq!(seconds, vec![10, 20, 30, 40]);
}

// ---------------------------------------------------------------------------
// Test: a run for an unknown simulation fails without panicking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_for_missing_simulation_reports_pending(pool: PgPool) {
    let status = run_simulation(&pool, 999, Duration::ZERO).await;
    assert_eq!(status, SimulationStatus::Pending);
    assert!(ConvergenceRepo::list_for_simulation(&pool, 999)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Test: the runner drains the queue and runs tasks concurrently
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn runner_executes_dispatched_tasks(pool: PgPool) {
    seed_simulation(&pool, 1).await;
    seed_simulation(&pool, 2).await;

    let (queue, receiver) = task_queue();
    let runner = SimulationRunner::new(pool.clone()).with_iteration_delay(Duration::from_millis(1));
    let cancel = CancellationToken::new();

    queue.dispatch(1).unwrap();
    queue.dispatch(2).unwrap();
    drop(queue);

    // Returns once the queue is drained and closed.
    runner.run(receiver, cancel).await;
    assert!(runner.shutdown(Duration::from_secs(30)).await);
    assert_eq!(runner.in_flight(), 0);

    for id in [1, 2] {
        assert_eq!(status_of(&pool, id).await, SimulationStatus::Finished);
        let rows = ConvergenceRepo::list_for_simulation(&pool, id).await.unwrap();
        assert_eq!(rows.len(), 10);
    }
}

// ---------------------------------------------------------------------------
// Test: cancellation stops the receive loop
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn runner_stops_on_cancel_and_discards_queued_tasks(pool: PgPool) {
    seed_simulation(&pool, 5).await;

    let (queue, receiver) = task_queue();
    let runner = SimulationRunner::new(pool.clone());
    let cancel = CancellationToken::new();
    queue.dispatch(5).unwrap();
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(5), runner.run(receiver, cancel))
        .await
        .expect("runner should stop promptly once cancelled");

    // The queued task was never started and the receiver is gone.
    assert_eq!(runner.in_flight(), 0);
    assert!(queue.dispatch(6).is_err());
    assert_eq!(status_of(&pool, 5).await, SimulationStatus::Pending);
    assert!(ConvergenceRepo::list_for_simulation(&pool, 5)
        .await
        .unwrap()
        .is_empty());
}
