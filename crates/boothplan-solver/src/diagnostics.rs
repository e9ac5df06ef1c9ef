//! Unplaced-demand reporting
//!
//! Aggregates the scheduler's [`UnplacedDemand`] records into a
//! human-auditable report. The reason attached to each record is the last
//! rejection observed for that (student, subject); no further inference is
//! attempted.

use std::collections::BTreeMap;

use boothplan_core::{RejectReason, UnplacedDemand};

/// Aggregated view over the unplaced-demand list.
#[derive(Clone, Debug, Default)]
pub struct UnplacedReport {
    entries: Vec<UnplacedDemand>,
}

impl UnplacedReport {
    pub fn new(entries: Vec<UnplacedDemand>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[UnplacedDemand] {
        &self.entries
    }

    /// Total lesson units that could not be placed.
    pub fn total_lessons(&self) -> u32 {
        self.entries.iter().map(|e| e.remaining).sum()
    }

    /// Unplaced lesson units grouped per rejection category.
    pub fn by_reason(&self) -> BTreeMap<RejectReason, u32> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.reason).or_insert(0) += entry.remaining;
        }
        counts
    }
}

impl std::fmt::Display for UnplacedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "all demand placed");
        }
        writeln!(
            f,
            "{} lesson(s) unplaced across {} student/subject pair(s)",
            self.total_lessons(),
            self.entries.len()
        )?;
        for entry in &self.entries {
            writeln!(
                f,
                "  {} {} {} x{} - {}",
                entry.grade, entry.student, entry.subject, entry.remaining, entry.reason
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use boothplan_core::{subjects, Grade};
    use pretty_assertions::assert_eq;

    fn entry(student: &str, subject: &str, remaining: u32, reason: RejectReason) -> UnplacedDemand {
        UnplacedDemand {
            grade: Grade::middle(2),
            student: student.to_string(),
            subject: subject.to_string(),
            remaining,
            reason,
        }
    }

    #[test]
    fn empty_report_prints_success() {
        let report = UnplacedReport::default();
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "all demand placed\n");
    }

    #[test]
    fn report_lists_each_entry_with_reason() {
        let report = UnplacedReport::new(vec![
            entry("Aoki", subjects::MATH, 2, RejectReason::NoQualifiedTeacher),
            entry("Baba", subjects::ENGLISH, 1, RejectReason::NoAvailability),
        ]);
        let text = report.to_string();
        assert!(text.contains("3 lesson(s) unplaced across 2 student/subject pair(s)"));
        assert!(text.contains("C2 Aoki math x2 - no qualified teacher"));
        assert!(text.contains("C2 Baba english x1 - no matching availability window"));
    }

    #[test]
    fn by_reason_sums_lesson_units() {
        let report = UnplacedReport::new(vec![
            entry("A", subjects::MATH, 2, RejectReason::BoothFull),
            entry("B", subjects::MATH, 3, RejectReason::BoothFull),
            entry("C", subjects::ENGLISH, 1, RejectReason::NgTeacher),
        ]);
        let by_reason = report.by_reason();
        assert_eq!(by_reason[&RejectReason::BoothFull], 5);
        assert_eq!(by_reason[&RejectReason::NgTeacher], 1);
        assert_eq!(report.total_lessons(), 6);
    }
}
