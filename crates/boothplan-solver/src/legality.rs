//! Booth admission checks
//!
//! Pure pass/fail predicate deciding whether one student may take one more
//! slot in one booth. All checks are side-effect free; on success the
//! caller appends the lesson itself.
//!
//! NG-student conflicts apply within the same booth only; neighboring
//! booths are not consulted.

use std::collections::HashMap;

use boothplan_core::{
    Booth, CapabilityTable, RejectReason, ScheduleWeek, Student, Weekday, BOOTH_CAPACITY,
};

/// Why a booth refused a student.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoothRejection {
    /// The booth is an unstaffed placeholder this slot
    #[error("booth is unstaffed")]
    Unstaffed,
    /// Both student slots are taken
    #[error("booth is at capacity")]
    Full,
    /// The booth's teacher is on the student's NG list
    #[error("teacher is on the student's NG list")]
    NgTeacher,
    /// The teacher is not qualified for the student's grade and subject
    #[error("teacher is not qualified for this grade and subject")]
    NotQualified,
    /// An occupant conflicts with the student (either direction)
    #[error("booth occupant conflicts with the student")]
    StudentConflict,
    /// The teacher already serves a different booth index today
    #[error("teacher already serves another booth today")]
    TeacherElsewhere,
}

impl BoothRejection {
    /// Collapse into the reporting taxonomy.
    pub fn reason(&self) -> RejectReason {
        match self {
            BoothRejection::Full => RejectReason::BoothFull,
            BoothRejection::NgTeacher => RejectReason::NgTeacher,
            BoothRejection::NotQualified => RejectReason::NoQualifiedTeacher,
            BoothRejection::StudentConflict => RejectReason::StudentConflict,
            BoothRejection::Unstaffed | BoothRejection::TeacherElsewhere => {
                RejectReason::NoOpenSlot
            }
        }
    }
}

/// Check whether `student` may take a `subject` slot in `booth` at
/// `booth_index` on `day`.
///
/// `week` is the schedule-in-progress, consulted for the one-booth-per-day
/// rule; `students` resolves occupants for the symmetric NG check.
pub fn admit(
    booth: &Booth,
    booth_index: usize,
    student: &Student,
    day: Weekday,
    subject: &str,
    week: &ScheduleWeek,
    students: &HashMap<&str, &Student>,
    capabilities: &CapabilityTable,
) -> Result<(), BoothRejection> {
    let Some(teacher) = booth.teacher.as_deref() else {
        return Err(BoothRejection::Unstaffed);
    };
    if booth.lessons.len() >= BOOTH_CAPACITY {
        return Err(BoothRejection::Full);
    }
    if student.ng_teachers.contains(teacher) {
        return Err(BoothRejection::NgTeacher);
    }
    if !capabilities.is_qualified(teacher, student.grade, subject) {
        return Err(BoothRejection::NotQualified);
    }
    for occupant in &booth.lessons {
        if student.ng_students.contains(&occupant.student) {
            return Err(BoothRejection::StudentConflict);
        }
        let mutual = students
            .get(occupant.student.as_str())
            .is_some_and(|other| other.ng_students.contains(&student.name));
        if mutual {
            return Err(BoothRejection::StudentConflict);
        }
    }
    // Once a teacher has a student anywhere today, they are confined to
    // that booth index for the rest of the day.
    if let Some(existing) = week.teacher_booth_index(day, teacher) {
        if existing != booth_index {
            return Err(BoothRejection::TeacherElsewhere);
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
