//! Directory runner and statistics

use crate::error::TestResult;
use crate::precompile_test::PrecompileTestRunner;
use crate::vm_test::{FileResults, VmTestRunner};
use cadence_crypto::bn254::NativeMode;
use std::path::Path;
use std::time::{Duration, Instant};

/// Aggregated fixture statistics
#[derive(Debug, Default)]
pub struct TestStats {
    /// Total tests executed
    pub total: usize,
    /// Tests passed
    pub passed: usize,
    /// Tests failed
    pub failed: usize,
    /// Files that could not be loaded
    pub unreadable: usize,
    /// Total execution time
    pub duration: Duration,
    /// Failed test names with reasons
    pub failures: Vec<(String, String)>,
}

impl TestStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file's results
    pub fn add_results(&mut self, results: &FileResults) {
        self.total += results.total();
        self.passed += results.passed.len();
        self.failed += results.failed.len();
        for (name, reason) in &results.failed {
            self.failures.push((name.clone(), reason.clone()));
        }
    }

    /// Fold another set of stats into this one
    pub fn merge(&mut self, other: TestStats) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.unreadable += other.unreadable;
        self.failures.extend(other.failures);
    }

    /// Whether every executed test passed and every file loaded
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.unreadable == 0
    }

    /// Pass rate as percentage
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }

    /// Print summary
    pub fn print_summary(&self) {
        println!("\n========================================");
        println!("Fixture Summary");
        println!("========================================");
        println!("Total:      {}", self.total);
        println!("Passed:     {}", self.passed);
        println!("Failed:     {}", self.failed);
        println!("Unreadable: {}", self.unreadable);
        println!("Pass Rate:  {:.2}%", self.pass_rate());
        println!("Duration:   {:.2}s", self.duration.as_secs_f64());

        if !self.failures.is_empty() {
            println!("\nFailed tests:");
            for (name, reason) in &self.failures {
                println!("  - {}: {}", name, reason);
            }
        }
    }
}

/// Fixture kinds, by the directory they live in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureKind {
    /// Bytecode programs under `VMTests/`
    Vm,
    /// Direct precompile calls under `PrecompileTests/`
    Precompile,
}

impl FixtureKind {
    /// Subdirectory holding fixtures of this kind
    pub fn directory(self) -> &'static str {
        match self {
            FixtureKind::Vm => "VMTests",
            FixtureKind::Precompile => "PrecompileTests",
        }
    }
}

/// Main fixture runner
pub struct TestRunner {
    /// VM fixture runner
    vm_runner: VmTestRunner,
    /// Precompile fixture runner
    precompile_runner: PrecompileTestRunner,
    /// Verbose output
    verbose: bool,
}

impl TestRunner {
    /// Create new runner
    pub fn new(native: NativeMode, verbose: bool) -> Self {
        Self {
            vm_runner: VmTestRunner::new(native, verbose),
            precompile_runner: PrecompileTestRunner::new(native, verbose),
            verbose,
        }
    }

    /// Run fixtures of one kind from `dir`, recursively
    pub fn run_dir(&self, kind: FixtureKind, dir: &Path) -> TestResult<TestStats> {
        let mut stats = TestStats::new();
        let start = Instant::now();

        if self.verbose {
            tracing::info!(kind = ?kind, dir = %dir.display(), "running fixtures");
        }

        self.run_recursive(kind, dir, &mut stats)?;

        stats.duration = start.elapsed();
        Ok(stats)
    }

    fn run_recursive(
        &self,
        kind: FixtureKind,
        dir: &Path,
        stats: &mut TestStats,
    ) -> TestResult<()> {
        if !dir.exists() {
            if self.verbose {
                tracing::info!(dir = %dir.display(), "directory not found");
            }
            return Ok(());
        }

        let mut paths = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.run_recursive(kind, &path, stats)?;
            } else if path.extension().is_some_and(|e| e == "json") {
                let loaded = match kind {
                    FixtureKind::Vm => self.vm_runner.run_file(&path),
                    FixtureKind::Precompile => self.precompile_runner.run_file(&path),
                };
                match loaded {
                    Ok(results) => {
                        stats.add_results(&results);
                        if self.verbose && !results.failed.is_empty() {
                            tracing::warn!(
                                file = %results.file,
                                passed = results.passed.len(),
                                failed = results.failed.len(),
                                "fixture file has failures"
                            );
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            file = %path.display(),
                            error = %e,
                            "could not load fixture file"
                        );
                        stats.unreadable += 1;
                    }
                }
            }
        }

        Ok(())
    }

    /// Run every fixture kind found under `fixtures_dir`
    pub fn run_all(&self, fixtures_dir: &Path) -> TestResult<TestStats> {
        let mut combined = TestStats::new();
        let start = Instant::now();

        for kind in [FixtureKind::Vm, FixtureKind::Precompile] {
            let stats = self.run_dir(kind, &fixtures_dir.join(kind.directory()))?;
            combined.merge(stats);
        }

        combined.duration = start.elapsed();
        Ok(combined)
    }
}
