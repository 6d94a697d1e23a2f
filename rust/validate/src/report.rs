// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation result types

/// Which input a finding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSource {
    /// The schema itself could not be read or understood.
    Schema,
    /// The document violated well-formedness or the schema.
    Document,
}

/// One positioned validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Human-readable description of the finding.
    pub message: String,
    /// Input the finding refers to.
    pub source: IssueSource,
    /// 1-based line in that input.
    pub line: u64,
    /// 1-based column in that input.
    pub column: u64,
}

/// Ordered collection of findings for one validation run.
///
/// A run is valid exactly when no findings were recorded.
#[derive(Debug, Default)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// True when the run recorded no findings.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Findings in the order they were encountered.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}
