//! Runs the bundled fixture directories against both alt_bn128 backends

use cadence_crypto::bn254::NativeMode;
use cadence_evm_tests::{FixtureKind, TestRunner, TestStats};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn assert_clean(stats: &TestStats) {
    if !stats.all_passed() {
        stats.print_summary();
        panic!("{} failed, {} unreadable", stats.failed, stats.unreadable);
    }
}

#[test]
fn test_vm_fixtures() {
    init_tracing();
    let runner = TestRunner::new(NativeMode::Auto, true);
    let dir = fixtures_dir().join(FixtureKind::Vm.directory());
    let stats = runner.run_dir(FixtureKind::Vm, &dir).unwrap();
    assert_eq!(stats.total, 13);
    assert_clean(&stats);
}

#[test]
fn test_precompile_fixtures_both_backends() {
    init_tracing();
    for native in [NativeMode::Auto, NativeMode::Disabled] {
        let runner = TestRunner::new(native, true);
        let dir = fixtures_dir().join(FixtureKind::Precompile.directory());
        let stats = runner.run_dir(FixtureKind::Precompile, &dir).unwrap();
        assert_eq!(stats.total, 21);
        assert_clean(&stats);
    }
}

#[test]
fn test_run_all() {
    let stats = TestRunner::new(NativeMode::Auto, false)
        .run_all(&fixtures_dir())
        .unwrap();
    assert_eq!(stats.total, 34);
    assert_clean(&stats);
}
