// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural breaks between consecutive rows.
//!
//! Rows carry hierarchical section ids. Moving to a new leaf under the same
//! parent (`1.2.3` → `1.2.4`) is a soft break, rendered as a newline. Any
//! other move (`1.2.3` → `1.3.1`, or `1.2` → `1.2.1`) crosses a structural
//! boundary and is a hard break.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    Soft,
    Hard,
}

/// Why a section id was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionIdProblem {
    Empty,
    Repeated,
}

/// Classify the break between rows with ids `previous` and `current`.
pub fn classify_row_break(
    previous: &[String],
    current: &[String],
) -> Result<BreakKind, SectionIdProblem> {
    validate_section_id(current)?;
    if previous == current {
        return Err(SectionIdProblem::Repeated);
    }
    if previous.len() != current.len() {
        return Ok(BreakKind::Hard);
    }
    let parent = current.len() - 1;
    if previous[..parent] != current[..parent] {
        Ok(BreakKind::Hard)
    } else {
        Ok(BreakKind::Soft)
    }
}

pub fn validate_section_id(id: &[String]) -> Result<(), SectionIdProblem> {
    if id.is_empty() || id.iter().any(String::is_empty) {
        return Err(SectionIdProblem::Empty);
    }
    Ok(())
}

/// Dotted form used in row lookups: `["1", "2"]` → `"1.2"`.
pub fn section_label(id: &[String]) -> String {
    id.join(".")
}
