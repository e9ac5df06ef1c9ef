//! Teacher capability matching
//!
//! Resolves whether a teacher may teach a given (grade, subject) pair.
//! Qualification tags are `level:subject` keys, e.g. `middle:math` or
//! `exam-prep:arithmetic`; a teacher qualifies when they hold any one of
//! the keys derived for the pair.
//!
//! # Key derivation
//!
//! - Elementary grades, and exam-prep grades below year 4, use the
//!   `elementary` level with `math` renamed to `arithmetic`.
//! - Exam-prep grades from year 4 use the `exam-prep` level, same rename.
//! - Middle and high grades rename `arithmetic` back to `math`; the generic
//!   high-school `math` expands to four sub-track keys, any one of which
//!   suffices.
//! - The English-test-prep subject reuses the `english` key of its level.
//!
//! # Example
//!
//! ```rust
//! use boothplan_core::{CapabilityTable, Grade, subjects};
//!
//! let mut table = CapabilityTable::new();
//! table.grant("Tamura", "middle:math");
//!
//! assert!(table.is_qualified("Tamura", Grade::middle(2), subjects::MATH));
//! assert!(!table.is_qualified("Tamura", Grade::high(1), subjects::MATH));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{subjects, Grade, GradeBand, TeacherName};

/// Exam-prep years at or above this threshold use `exam-prep` keys;
/// younger exam-prep students are matched like elementary students.
pub const EXAM_PREP_YEAR_THRESHOLD: u8 = 4;

// ============================================================================
// Policy
// ============================================================================

/// How to treat a teacher who has no entry in a non-empty capability table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapabilityPolicy {
    /// Fail closed: an unlisted teacher is qualified for nothing.
    #[default]
    RequireListed,
    /// Fail open: an unlisted teacher is qualified for everything.
    AssumeQualified,
}

// ============================================================================
// Table
// ============================================================================

/// Per-teacher qualification tags.
///
/// An empty table means no capability data was supplied at all, and every
/// teacher is considered qualified for everything. A non-empty table applies
/// its [`CapabilityPolicy`] to unlisted teachers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CapabilityTable {
    skills: HashMap<TeacherName, HashSet<String>>,
    policy: CapabilityPolicy,
}

impl CapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CapabilityPolicy) -> Self {
        Self {
            skills: HashMap::new(),
            policy,
        }
    }

    /// Grant one qualification tag to a teacher.
    pub fn grant(&mut self, teacher: impl Into<TeacherName>, key: impl Into<String>) {
        self.skills.entry(teacher.into()).or_default().insert(key.into());
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn policy(&self) -> CapabilityPolicy {
        self.policy
    }

    /// Teachers listed in the table, unordered.
    pub fn teachers(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    /// Whether the teacher may teach this (grade, subject) pair.
    ///
    /// Pure predicate; no side effects.
    pub fn is_qualified(&self, teacher: &str, grade: Grade, subject: &str) -> bool {
        if self.skills.is_empty() {
            return true;
        }
        match self.skills.get(teacher) {
            None => self.policy == CapabilityPolicy::AssumeQualified,
            Some(tags) => required_keys(grade, subject).iter().any(|k| tags.contains(k)),
        }
    }
}

// ============================================================================
// Key Derivation
// ============================================================================

/// Capability keys that would qualify a teacher for (grade, subject);
/// holding any one of them suffices.
pub fn required_keys(grade: Grade, subject: &str) -> Vec<String> {
    // English test prep rides on the plain English qualification.
    let subject = if subject == subjects::ENGLISH_EXAM {
        subjects::ENGLISH
    } else {
        subject
    };

    match grade.band {
        GradeBand::Elementary => vec![primary_key("elementary", subject)],
        GradeBand::ExamPrep => {
            if grade.year >= EXAM_PREP_YEAR_THRESHOLD {
                vec![primary_key("exam-prep", subject)]
            } else {
                vec![primary_key("elementary", subject)]
            }
        }
        GradeBand::Middle => vec![secondary_key("middle", secondary_subject(subject))],
        GradeBand::High => {
            let subject = secondary_subject(subject);
            if subject == subjects::MATH {
                subjects::HIGH_MATH_TRACKS
                    .into_iter()
                    .map(|track| secondary_key("high", track))
                    .collect()
            } else {
                vec![secondary_key("high", subject)]
            }
        }
    }
}

/// Elementary/exam-prep levels call math "arithmetic".
fn primary_key(level: &str, subject: &str) -> String {
    let subject = if subject == subjects::MATH {
        subjects::ARITHMETIC
    } else {
        subject
    };
    format!("{level}:{subject}")
}

/// Middle/high levels call arithmetic "math".
fn secondary_subject(subject: &str) -> &str {
    if subject == subjects::ARITHMETIC {
        subjects::MATH
    } else {
        subject
    }
}

fn secondary_key(level: &str, subject: &str) -> String {
    format!("{level}:{subject}")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn elementary_math_becomes_arithmetic() {
        assert_eq!(
            required_keys(Grade::elementary(3), subjects::MATH),
            vec!["elementary:arithmetic"]
        );
        assert_eq!(
            required_keys(Grade::elementary(3), subjects::JAPANESE),
            vec!["elementary:japanese"]
        );
    }

    #[test]
    fn exam_prep_splits_on_year_threshold() {
        assert_eq!(
            required_keys(Grade::exam_prep(3), subjects::MATH),
            vec!["elementary:arithmetic"]
        );
        assert_eq!(
            required_keys(Grade::exam_prep(4), subjects::MATH),
            vec!["exam-prep:arithmetic"]
        );
        assert_eq!(
            required_keys(Grade::exam_prep(6), subjects::ENGLISH),
            vec!["exam-prep:english"]
        );
    }

    #[test]
    fn middle_renames_arithmetic_back_to_math() {
        assert_eq!(
            required_keys(Grade::middle(1), subjects::ARITHMETIC),
            vec!["middle:math"]
        );
        assert_eq!(
            required_keys(Grade::middle(3), subjects::ENGLISH),
            vec!["middle:english"]
        );
    }

    #[test]
    fn high_math_expands_to_sub_tracks() {
        let keys = required_keys(Grade::high(2), subjects::MATH);
        assert_eq!(
            keys,
            vec![
                "high:math-1a",
                "high:math-2b",
                "high:math-3",
                "high:math-c"
            ]
        );
        assert_eq!(
            required_keys(Grade::high(1), subjects::SCIENCE),
            vec!["high:science"]
        );
    }

    #[test]
    fn english_exam_reuses_english_key() {
        assert_eq!(
            required_keys(Grade::middle(2), subjects::ENGLISH_EXAM),
            vec!["middle:english"]
        );
        assert_eq!(
            required_keys(Grade::exam_prep(5), subjects::ENGLISH_EXAM),
            vec!["exam-prep:english"]
        );
    }

    #[test]
    fn empty_table_qualifies_everyone() {
        let table = CapabilityTable::new();
        assert!(table.is_qualified("Anyone", Grade::high(3), subjects::MATH));
    }

    #[test]
    fn unlisted_teacher_fails_closed_by_default() {
        let mut table = CapabilityTable::new();
        table.grant("Tamura", "middle:math");

        assert!(table.is_qualified("Tamura", Grade::middle(1), subjects::MATH));
        assert!(!table.is_qualified("Kogawa", Grade::middle(1), subjects::MATH));
    }

    #[test]
    fn assume_qualified_policy_fails_open() {
        let mut table = CapabilityTable::with_policy(CapabilityPolicy::AssumeQualified);
        table.grant("Tamura", "middle:math");

        assert!(table.is_qualified("Kogawa", Grade::middle(1), subjects::MATH));
        // A listed teacher is still gated by their own tags.
        assert!(!table.is_qualified("Tamura", Grade::middle(1), subjects::ENGLISH));
    }

    #[test]
    fn one_math_track_is_enough_for_high_school() {
        let mut table = CapabilityTable::new();
        table.grant("Ishikawa", "high:math-2b");

        assert!(table.is_qualified("Ishikawa", Grade::high(1), subjects::MATH));
        assert!(!table.is_qualified("Ishikawa", Grade::middle(1), subjects::MATH));
    }

    #[test]
    fn qualification_check_is_idempotent() {
        let mut table = CapabilityTable::new();
        table.grant("Tamura", "middle:english");

        let first = table.is_qualified("Tamura", Grade::middle(2), subjects::ENGLISH);
        let second = table.is_qualified("Tamura", Grade::middle(2), subjects::ENGLISH);
        assert_eq!(first, second);
        assert!(first);
    }
}
