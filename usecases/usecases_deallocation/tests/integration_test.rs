//! Integration tests for usecases_deallocation crate
//!
//! These tests verify that the four deallocation policies work correctly
//! end-to-end over shared tables: conservation of total size, preservation of
//! address order, termination, and the placeholder lifecycle.

use entities_block_table::{BlockStatus, BlockTable, MemoryBlock};
use usecases_deallocation::{
    Case1Coalescer, Case2Coalescer, Case3Coalescer, ConfigError, DeallocationStrategy,
    FixedDeallocator, LatencyModel, SimulationConfig,
};

fn table(rows: &[(u64, u64, BlockStatus)]) -> BlockTable {
    BlockTable::new(
        rows.iter()
            .map(|&(address, size, status)| MemoryBlock::new(address, size, status))
            .collect(),
    )
}

fn mixed_table() -> BlockTable {
    table(&[
        (1, 10, BlockStatus::Busy),
        (11, 5, BlockStatus::Free),
        (16, 20, BlockStatus::Busy),
        (36, 8, BlockStatus::Free),
        (44, 12, BlockStatus::Free),
        (56, 6, BlockStatus::Busy),
        (62, 9, BlockStatus::Free),
        (71, 14, BlockStatus::Free),
    ])
}

fn strategies() -> Vec<Box<dyn DeallocationStrategy>> {
    vec![
        Box::new(FixedDeallocator::new()),
        Box::new(Case1Coalescer::new(false)),
        Box::new(Case2Coalescer::new(false)),
        Box::new(Case2Coalescer::new(true)),
        Box::new(Case3Coalescer::new(true, 2.0)),
        Box::new(Case3Coalescer::new(false, 2.0)),
    ]
}

#[test]
fn test_every_policy_conserves_total_size() {
    let model = LatencyModel::default();
    for strategy in strategies() {
        let mut t = mixed_table();
        let before = t.total_size();
        strategy.run(&mut t, &model);
        assert_eq!(t.total_size(), before);
    }
}

#[test]
fn test_every_policy_preserves_address_order() {
    let model = LatencyModel::default();
    for strategy in strategies() {
        let mut t = mixed_table();
        strategy.run(&mut t, &model);
        assert!(t.is_address_ordered());
    }
}

#[test]
fn test_fixed_scenario() {
    // Fixed partitions: both busy blocks are freed, nothing merges.
    let mut t = table(&[
        (1, 10, BlockStatus::Busy),
        (11, 5, BlockStatus::Free),
        (16, 20, BlockStatus::Busy),
    ]);
    let outcome = FixedDeallocator::new().run(&mut t, &LatencyModel::default());

    assert_eq!(t.len(), 3);
    assert!(t.iter().all(|b| b.is_free()));
    assert_eq!(outcome.trace.len(), 2);
}

#[test]
fn test_case1_single_pass_scenario() {
    let mut t = table(&[
        (1, 10, BlockStatus::Busy),
        (11, 5, BlockStatus::Free),
        (16, 20, BlockStatus::Busy),
    ]);
    let model = LatencyModel::default();
    let outcome = Case1Coalescer::new(true).run(&mut t, &model);

    assert_eq!(t.len(), 2);
    assert_eq!(t[0].size(), 15);
    assert!(t[0].is_free());
    assert_eq!(outcome.trace.samples(), &[2.0 * model.latency(10)]);
}

#[test]
fn test_case1_terminates_with_uniform_status() {
    let mut t = table(&[
        (1, 4, BlockStatus::Busy),
        (5, 4, BlockStatus::Free),
        (9, 4, BlockStatus::Busy),
        (13, 4, BlockStatus::Free),
    ]);
    Case1Coalescer::new(false).run(&mut t, &LatencyModel::default());
    assert!(t.has_uniform_status());
    assert_eq!(t.len(), 2);
}

#[test]
fn test_case2_placeholder_accounting() {
    // Every triple-merge produces exactly one pending row and removes
    // exactly one row.
    let mut t = table(&[
        (1, 4, BlockStatus::Free),
        (5, 4, BlockStatus::Free),
        (9, 4, BlockStatus::Busy),
        (13, 4, BlockStatus::Free),
        (17, 4, BlockStatus::Free),
    ]);
    let outcome = Case2Coalescer::new(false).run(&mut t, &LatencyModel::default());

    assert_eq!(outcome.trace.len(), 1);
    assert_eq!(t.len(), 4);
    assert_eq!(t.status_counts().pending, 1);
}

#[test]
fn test_case2_cleanup_leaves_no_pending() {
    let mut t = table(&[
        (1, 4, BlockStatus::Free),
        (5, 4, BlockStatus::Free),
        (9, 4, BlockStatus::Busy),
        (13, 4, BlockStatus::Free),
        (17, 4, BlockStatus::Free),
    ]);
    Case2Coalescer::new(true).run(&mut t, &LatencyModel::default());

    assert_eq!(t.len(), 3);
    assert_eq!(t.status_counts().pending, 0);
    assert_eq!(t.total_size(), 20);
}

#[test]
fn test_case3_declined_keeps_one_pending() {
    let mut t = table(&[
        (1, 4, BlockStatus::Busy),
        (5, 4, BlockStatus::Busy),
        (9, 4, BlockStatus::Busy),
        (13, 4, BlockStatus::Free),
    ]);
    let outcome = Case3Coalescer::new(false, 2.0).run(&mut t, &LatencyModel::default());

    assert_eq!(t.status_counts().pending, 1);
    assert_eq!(outcome.blocks_deallocated, 0);
}

#[test]
fn test_case3_confirmed_restores_and_counts() {
    let mut t = table(&[
        (1, 4, BlockStatus::Busy),
        (5, 4, BlockStatus::Busy),
        (9, 4, BlockStatus::Busy),
        (13, 4, BlockStatus::Free),
    ]);
    let outcome = Case3Coalescer::new(true, 2.0).run(&mut t, &LatencyModel::default());

    assert_eq!(outcome.blocks_deallocated, 3);
    assert_eq!(t[1].address(), Some(5));
    assert_eq!(t[1].size(), 4);
    assert!(t[0].is_free() && t[1].is_free() && t[2].is_free());
    assert_eq!(t.status_counts().pending, 0);
}

#[test]
fn test_fixed_never_changes_block_count() {
    let mut t = mixed_table();
    let before = t.len();
    FixedDeallocator::new().run(&mut t, &LatencyModel::default());
    assert_eq!(t.len(), before);
}

#[test]
fn test_trace_is_in_event_order() {
    // Fixed deallocation walks positions in order, so the trace must be
    // priced by the busy sizes in table order.
    let mut t = table(&[
        (1, 1000, BlockStatus::Busy),
        (1001, 10, BlockStatus::Free),
        (1011, 2000, BlockStatus::Busy),
    ]);
    let model = LatencyModel::new(0.1, 1.0).unwrap();
    let outcome = FixedDeallocator::new().run(&mut t, &model);

    assert_eq!(outcome.trace.len(), 2);
    assert!(outcome.trace.samples()[0] < outcome.trace.samples()[1]);
}

#[test]
fn test_invalid_configuration_is_surfaced_before_any_run() {
    let config = SimulationConfig {
        num_jobs: 1,
        ..SimulationConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TooFewJobs { .. })
    ));

    let config = SimulationConfig {
        alpha: -0.1,
        ..SimulationConfig::default()
    };
    assert!(config.latency_model().is_err());
}
