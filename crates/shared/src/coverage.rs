use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::RunId;

/// Covered/total pair for one kind of coverable element in a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageCounts {
    pub covered: u64,
    pub total: u64,
}

impl CoverageCounts {
    pub fn new(covered: u64, total: u64) -> Self {
        Self { covered, total }
    }

    /// Percent covered in `[0, 100]`. A file with nothing coverable
    /// counts as fully covered.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.covered as f64 / self.total as f64) * 100.0
        }
    }

    pub fn accumulate(&mut self, other: CoverageCounts) {
        self.covered += other.covered;
        self.total += other.total;
    }

    pub fn is_consistent(&self) -> bool {
        self.covered <= self.total
    }
}

/// Per-file slice of a coverage report. Statement counts are always
/// present; branch and function counts depend on what the producing tool
/// emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCoverage {
    pub path: String,
    pub statements: CoverageCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<CoverageCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<CoverageCounts>,
}

/// One complete coverage report, produced by a single test run and owned
/// by the report store. The selection service only ever holds a shared
/// reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSnapshot {
    pub run_id: RunId,
    pub label: String,
    pub generated_at: DateTime<Utc>,
    pub files: Vec<FileCoverage>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageTotals {
    pub statements: CoverageCounts,
    pub branches: CoverageCounts,
    pub functions: CoverageCounts,
}

impl CoverageSnapshot {
    pub fn totals(&self) -> CoverageTotals {
        let mut totals = CoverageTotals::default();
        for file in &self.files {
            totals.statements.accumulate(file.statements);
            if let Some(branches) = file.branches {
                totals.branches.accumulate(branches);
            }
            if let Some(functions) = file.functions {
                totals.functions.accumulate(functions);
            }
        }
        totals
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
#[path = "tests/coverage_tests.rs"]
mod tests;
