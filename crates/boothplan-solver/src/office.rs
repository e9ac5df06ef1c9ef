//! Office-duty resolution
//!
//! One teacher per day can be pulled off booth duty for administrative
//! work. Candidates are tried in configured priority order; a candidate in
//! the always-available set is taken without an attendance check, anyone
//! else must appear in at least one time slot of that day's raw roster.
//! Closure days short-circuit to a holiday marker and produce no booths.

use std::collections::HashSet;

use boothplan_core::{DayAttendance, OfficeAssignment, TeacherName};

/// Decide the office assignment for one (week, day).
///
/// `attendance` is the day's raw roster for the week, if any was recorded.
/// An empty candidate list yields [`OfficeAssignment::Unassigned`]; booths
/// still run that day.
pub fn resolve_office_duty(
    candidates: &[TeacherName],
    always_available: &HashSet<TeacherName>,
    attendance: Option<&DayAttendance>,
    holiday: bool,
) -> OfficeAssignment {
    if holiday {
        return OfficeAssignment::Holiday;
    }
    for candidate in candidates {
        if always_available.contains(candidate) {
            return OfficeAssignment::Staffed(candidate.clone());
        }
        if attendance.is_some_and(|day| day.attends(candidate)) {
            return OfficeAssignment::Staffed(candidate.clone());
        }
    }
    OfficeAssignment::Unassigned
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use boothplan_core::{TeacherRoster, TimeSlot, Weekday};

    fn roster_with(teacher: &str) -> TeacherRoster {
        let mut roster = TeacherRoster::new(1);
        roster.record(0, Weekday::Monday, TimeSlot::T1600, teacher);
        roster
    }

    #[test]
    fn holiday_wins_over_everything() {
        let roster = roster_with("Ishikawa");
        let result = resolve_office_duty(
            &["Ishikawa".to_string()],
            &HashSet::from(["Ishikawa".to_string()]),
            roster.day(0, Weekday::Monday),
            true,
        );
        assert_eq!(result, OfficeAssignment::Holiday);
    }

    #[test]
    fn always_available_candidate_skips_attendance_check() {
        let result = resolve_office_duty(
            &["Ishikawa".to_string()],
            &HashSet::from(["Ishikawa".to_string()]),
            None,
            false,
        );
        assert_eq!(result, OfficeAssignment::Staffed("Ishikawa".to_string()));
    }

    #[test]
    fn ordinary_candidate_needs_attendance() {
        let roster = roster_with("Nishi");
        let no_show = resolve_office_duty(
            &["Nishi".to_string()],
            &HashSet::new(),
            roster.day(0, Weekday::Tuesday),
            false,
        );
        assert_eq!(no_show, OfficeAssignment::Unassigned);

        let present = resolve_office_duty(
            &["Nishi".to_string()],
            &HashSet::new(),
            roster.day(0, Weekday::Monday),
            false,
        );
        assert_eq!(present, OfficeAssignment::Staffed("Nishi".to_string()));
    }

    #[test]
    fn first_matching_candidate_wins() {
        let roster = roster_with("Ochi");
        let result = resolve_office_duty(
            &["Nishi".to_string(), "Ochi".to_string()],
            &HashSet::new(),
            roster.day(0, Weekday::Monday),
            false,
        );
        assert_eq!(result, OfficeAssignment::Staffed("Ochi".to_string()));
    }

    #[test]
    fn no_candidates_means_unassigned() {
        let result = resolve_office_duty(&[], &HashSet::new(), None, false);
        assert_eq!(result, OfficeAssignment::Unassigned);
    }
}
