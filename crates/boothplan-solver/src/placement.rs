//! Three-phase placement scheduling
//!
//! Consumes student demand against the resolved booth lineups and mutates
//! the schedule-in-progress in place:
//!
//! 1. **Fixed lessons** - recurring (day, slot, subject) commitments, placed
//!    in every eligible week, wish-listed booths first, no scoring.
//! 2. **Distributed demand** - remaining demand split evenly across weeks,
//!    each unit placed into the highest-scoring legal (day, slot, booth)
//!    candidate; ties break uniformly at random.
//! 3. **Retry sweep** - demand left over from uneven distribution or
//!    transient contention is re-attempted across all weeks at once.
//!
//! Each phase is a single bounded pass; nothing iterates to convergence.
//! Randomness comes exclusively from the caller-supplied seeded generator.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use boothplan_core::{
    Booth, CapabilityTable, FixedLesson, Lesson, RejectReason, ScheduleWeek, Student, StudentName,
    Subject, TeacherName, TimeSlot, UnplacedDemand, Weekday,
};

use crate::legality::{admit, BoothRejection};

// ============================================================================
// Scoring Weights
// ============================================================================

/// Placing right next to another of the student's lessons that day.
const ADJACENT_SAME_DAY_BONUS: i32 = 150;
/// Same day as another lesson but with a gap in between.
const SAME_DAY_GAP_PENALTY: i32 = -40;
/// A second lesson on a day the student already attends is welcome...
const SECOND_LESSON_BONUS: i32 = 30;
/// ...a third or later one concentrates the day too much.
const OVERLOAD_DAY_PENALTY: i32 = -50;
/// The booth's teacher is on the student's wish list.
const WISH_TEACHER_BONUS: i32 = 100;
/// The booth index matches the teacher's preferred booth number.
const PREFERRED_BOOTH_BONUS: i32 = 10;
/// An entirely empty booth beats a half-occupied one.
const EMPTY_BOOTH_BONUS: i32 = 20;
/// The slot is reachable only through the backup availability window.
const BACKUP_WINDOW_PENALTY: i32 = -200;
/// The (week, day) is on the student's NG-date list. Heavy, but not a
/// hard block.
const NG_DATE_PENALTY: i32 = -1000;

// ============================================================================
// Allocation State
// ============================================================================

/// Mutable remaining-lesson counters plus the last rejection seen per
/// (student, subject). One instance per run; never shared across runs.
#[derive(Debug, Default)]
pub(crate) struct AllocationState {
    remaining: HashMap<StudentName, HashMap<Subject, u32>>,
    last_rejection: HashMap<StudentName, HashMap<Subject, RejectReason>>,
}

impl AllocationState {
    pub(crate) fn new(students: &[Student]) -> Self {
        let mut remaining: HashMap<StudentName, HashMap<Subject, u32>> = HashMap::new();
        for student in students {
            let per_subject = remaining.entry(student.name.clone()).or_default();
            for (subject, &count) in &student.needs {
                per_subject.insert(subject.clone(), count);
            }
        }
        Self {
            remaining,
            last_rejection: HashMap::new(),
        }
    }

    pub(crate) fn remaining(&self, student: &str, subject: &str) -> u32 {
        self.remaining
            .get(student)
            .and_then(|m| m.get(subject))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn total_remaining(&self, student: &str) -> u32 {
        self.remaining
            .get(student)
            .map_or(0, |m| m.values().sum())
    }

    fn decrement(&mut self, student: &str, subject: &str) {
        if let Some(count) = self
            .remaining
            .get_mut(student)
            .and_then(|m| m.get_mut(subject))
        {
            *count = count.saturating_sub(1);
        }
    }

    fn note_rejection(&mut self, student: &str, subject: &str, reason: RejectReason) {
        self.last_rejection
            .entry(student.to_string())
            .or_default()
            .insert(subject.to_string(), reason);
    }

    /// Demand still positive after all phases, in student input order.
    pub(crate) fn unplaced(&self, students: &[Student]) -> Vec<UnplacedDemand> {
        let mut unplaced = Vec::new();
        for student in students {
            for subject in student.needs.keys() {
                let remaining = self.remaining(&student.name, subject);
                if remaining == 0 {
                    continue;
                }
                let reason = self
                    .last_rejection
                    .get(&student.name)
                    .and_then(|m| m.get(subject))
                    .copied()
                    .unwrap_or(RejectReason::NoOpenSlot);
                unplaced.push(UnplacedDemand {
                    grade: student.grade,
                    student: student.name.clone(),
                    subject: subject.clone(),
                    remaining,
                    reason,
                });
            }
        }
        unplaced
    }
}

// ============================================================================
// Placer
// ============================================================================

/// One candidate placement found by the scoring search.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    week: usize,
    day: Weekday,
    slot: TimeSlot,
    booth_index: usize,
}

/// Borrowed context shared by all three phases.
pub(crate) struct Placer<'a> {
    pub(crate) students: &'a [Student],
    pub(crate) students_by_name: HashMap<&'a str, &'a Student>,
    pub(crate) capabilities: &'a CapabilityTable,
    pub(crate) booth_preferences: &'a HashMap<TeacherName, u8>,
    pub(crate) week_count: usize,
}

impl Placer<'_> {
    /// Run all three phases over the schedule-in-progress.
    pub(crate) fn run(
        &self,
        weeks: &mut [ScheduleWeek],
        state: &mut AllocationState,
        rng: &mut StdRng,
    ) {
        self.phase_fixed(weeks, state);
        debug!(
            placed = placed_total(weeks),
            "phase 1 complete: fixed lessons"
        );
        self.phase_distribute(weeks, state, rng);
        debug!(
            placed = placed_total(weeks),
            "phase 2 complete: distributed demand"
        );
        self.phase_retry(weeks, state, rng);
        debug!(
            placed = placed_total(weeks),
            "phase 3 complete: retry sweep"
        );
    }

    // ------------------------------------------------------------------
    // Phase 1: fixed lessons
    // ------------------------------------------------------------------

    fn phase_fixed(&self, weeks: &mut [ScheduleWeek], state: &mut AllocationState) {
        for student in self.students {
            for fixed in &student.fixed {
                if !fixed.slot.is_addressable(fixed.day) {
                    warn!(
                        student = %student.name,
                        day = %fixed.day,
                        slot = %fixed.slot,
                        "fixed lesson outside the addressable grid, skipped"
                    );
                    continue;
                }
                for week_index in 0..self.week_count {
                    if state.remaining(&student.name, &fixed.subject) == 0 {
                        break;
                    }
                    if student.is_ng_date(week_index, fixed.day) {
                        continue;
                    }
                    if self.place_fixed(&mut weeks[week_index], student, fixed) {
                        state.decrement(&student.name, &fixed.subject);
                        trace!(
                            student = %student.name,
                            subject = %fixed.subject,
                            week = week_index,
                            day = %fixed.day,
                            slot = %fixed.slot,
                            "fixed lesson placed"
                        );
                    }
                }
            }
        }
    }

    /// First legal booth wins, wish-listed booths tried first.
    fn place_fixed(&self, week: &mut ScheduleWeek, student: &Student, fixed: &FixedLesson) -> bool {
        let Some(booths) = week.booths(fixed.day, fixed.slot) else {
            return false;
        };
        let mut order: Vec<usize> = (0..booths.len()).collect();
        order.sort_by_key(|&i| !self.is_wish_booth(student, &booths[i]));

        let mut chosen = None;
        for i in order {
            let verdict = admit(
                &booths[i],
                i,
                student,
                fixed.day,
                &fixed.subject,
                week,
                &self.students_by_name,
                self.capabilities,
            );
            if verdict.is_ok() {
                chosen = Some(i);
                break;
            }
        }
        let Some(index) = chosen else {
            return false;
        };
        week.booths_mut(fixed.day, fixed.slot).expect("booths exist")[index]
            .lessons
            .push(Lesson {
                grade: student.grade,
                student: student.name.clone(),
                subject: fixed.subject.clone(),
            });
        true
    }

    // ------------------------------------------------------------------
    // Phase 2: distributed demand
    // ------------------------------------------------------------------

    fn phase_distribute(
        &self,
        weeks: &mut [ScheduleWeek],
        state: &mut AllocationState,
        rng: &mut StdRng,
    ) {
        for student in self.priority_order(state) {
            for subject in student.needs.keys() {
                let still = state.remaining(&student.name, subject);
                if still == 0 {
                    continue;
                }
                let targets = distribute(still, self.week_count, rng);
                for (week_index, &target) in targets.iter().enumerate() {
                    for _ in 0..target {
                        if state.remaining(&student.name, subject) == 0 {
                            break;
                        }
                        match self.place_best(weeks, &[week_index], student, subject, rng) {
                            Ok(()) => state.decrement(&student.name, subject),
                            Err(reason) => {
                                state.note_rejection(&student.name, subject, reason);
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Phase 3: retry sweep
    // ------------------------------------------------------------------

    fn phase_retry(
        &self,
        weeks: &mut [ScheduleWeek],
        state: &mut AllocationState,
        rng: &mut StdRng,
    ) {
        let all_weeks: Vec<usize> = (0..self.week_count).collect();
        for student in self.priority_order(state) {
            for subject in student.needs.keys() {
                while state.remaining(&student.name, subject) > 0 {
                    match self.place_best(weeks, &all_weeks, student, subject, rng) {
                        Ok(()) => state.decrement(&student.name, subject),
                        Err(reason) => {
                            state.note_rejection(&student.name, subject, reason);
                            break;
                        }
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Shared search
    // ------------------------------------------------------------------

    /// Students with a wish teacher first, then the most constrained
    /// availability window, then the largest remaining demand.
    fn priority_order(&self, state: &AllocationState) -> Vec<&Student> {
        let mut order: Vec<&Student> = self.students.iter().collect();
        order.sort_by_key(|s| {
            (
                !s.has_wish(),
                s.availability.window_size(),
                Reverse(state.total_remaining(&s.name)),
            )
        });
        order
    }

    /// Search the given weeks for the highest-scoring legal placement of
    /// one lesson unit and apply it. On failure, returns the categorized
    /// rejection.
    fn place_best(
        &self,
        weeks: &mut [ScheduleWeek],
        week_indices: &[usize],
        student: &Student,
        subject: &str,
        rng: &mut StdRng,
    ) -> Result<(), RejectReason> {
        let mut tally = RejectionTally::default();
        let mut best_score = i32::MIN;
        let mut best: Vec<Candidate> = Vec::new();

        for &week_index in week_indices {
            let week = &weeks[week_index];
            let subject_days = week.days_with_subject(&student.name, subject);
            let occupied = week.occupied_slots(&student.name);

            for day in Weekday::ALL {
                if !week.has_day(day) {
                    continue;
                }
                // One lesson per subject per day within a week.
                if subject_days.contains(&day) {
                    continue;
                }
                let attending = week.slots_attending_on(&student.name, day);
                for &slot in TimeSlot::for_day(day) {
                    let backup_only = if student.availability.covers(day, slot) {
                        false
                    } else if student.backup_availability.contains(&(day, slot)) {
                        true
                    } else {
                        continue;
                    };
                    tally.in_window = true;
                    if occupied.contains(&(day, slot)) {
                        continue;
                    }
                    let Some(booths) = week.booths(day, slot) else {
                        continue;
                    };
                    for (booth_index, booth) in booths.iter().enumerate() {
                        match admit(
                            booth,
                            booth_index,
                            student,
                            day,
                            subject,
                            week,
                            &self.students_by_name,
                            self.capabilities,
                        ) {
                            Err(rejection) => tally.note(rejection),
                            Ok(()) => {
                                let score = self.score(
                                    student,
                                    week_index,
                                    day,
                                    slot,
                                    booth_index,
                                    booth,
                                    &attending,
                                    backup_only,
                                );
                                if score > best_score {
                                    best_score = score;
                                    best.clear();
                                }
                                if score == best_score {
                                    best.push(Candidate {
                                        week: week_index,
                                        day,
                                        slot,
                                        booth_index,
                                    });
                                }
                            }
                        }
                    }
                }
            }
        }

        let Some(&choice) = best.choose(rng) else {
            return Err(tally.categorize());
        };
        weeks[choice.week]
            .booths_mut(choice.day, choice.slot)
            .expect("candidate booths exist")[choice.booth_index]
            .lessons
            .push(Lesson {
                grade: student.grade,
                student: student.name.clone(),
                subject: subject.to_string(),
            });
        trace!(
            student = %student.name,
            subject,
            week = choice.week,
            day = %choice.day,
            slot = %choice.slot,
            booth = choice.booth_index,
            score = best_score,
            "lesson placed"
        );
        Ok(())
    }

    fn score(
        &self,
        student: &Student,
        week_index: usize,
        day: Weekday,
        slot: TimeSlot,
        booth_index: usize,
        booth: &Booth,
        attending: &[TimeSlot],
        backup_only: bool,
    ) -> i32 {
        let mut score = 0;
        if !attending.is_empty() {
            if attending.iter().any(|&s| s.is_adjacent(slot)) {
                score += ADJACENT_SAME_DAY_BONUS;
            } else {
                score += SAME_DAY_GAP_PENALTY;
            }
            if attending.len() == 1 {
                score += SECOND_LESSON_BONUS;
            } else {
                score += OVERLOAD_DAY_PENALTY;
            }
        }
        if self.is_wish_booth(student, booth) {
            score += WISH_TEACHER_BONUS;
        }
        if let Some(teacher) = booth.teacher.as_deref() {
            let preferred = self
                .booth_preferences
                .get(teacher)
                .is_some_and(|&number| usize::from(number) == booth_index + 1);
            if preferred {
                score += PREFERRED_BOOTH_BONUS;
            }
        }
        if booth.lessons.is_empty() {
            score += EMPTY_BOOTH_BONUS;
        }
        if backup_only {
            score += BACKUP_WINDOW_PENALTY;
        }
        if student.is_ng_date(week_index, day) {
            score += NG_DATE_PENALTY;
        }
        score
    }

    fn is_wish_booth(&self, student: &Student, booth: &Booth) -> bool {
        booth
            .teacher
            .as_deref()
            .is_some_and(|t| student.wish_teachers.iter().any(|w| w == t))
    }
}

/// Split `total` units over `weeks` as evenly as possible; the remainder
/// lands on a randomly shuffled subset of weeks.
fn distribute(total: u32, weeks: usize, rng: &mut StdRng) -> Vec<u32> {
    if weeks == 0 {
        return Vec::new();
    }
    let base = total / weeks as u32;
    let remainder = (total % weeks as u32) as usize;
    let mut targets = vec![base; weeks];
    for target in targets.iter_mut().take(remainder) {
        *target += 1;
    }
    targets.shuffle(rng);
    targets
}

fn placed_total(weeks: &[ScheduleWeek]) -> usize {
    weeks.iter().map(ScheduleWeek::placed_count).sum()
}

// ============================================================================
// Rejection Tally
// ============================================================================

/// Failure bookkeeping for one placement search, collapsed into a single
/// reported category afterwards.
#[derive(Debug, Default)]
struct RejectionTally {
    /// At least one addressable slot fell inside the availability window
    in_window: bool,
    ng_teacher: u32,
    not_qualified: u32,
    student_conflict: u32,
    full: u32,
}

impl RejectionTally {
    fn note(&mut self, rejection: BoothRejection) {
        match rejection {
            BoothRejection::NgTeacher => self.ng_teacher += 1,
            BoothRejection::NotQualified => self.not_qualified += 1,
            BoothRejection::StudentConflict => self.student_conflict += 1,
            BoothRejection::Full => self.full += 1,
            // Unstaffed placeholders and pinned-elsewhere teachers say
            // nothing about why the demand itself is hard to serve.
            BoothRejection::Unstaffed | BoothRejection::TeacherElsewhere => {}
        }
    }

    /// A category is specific only when every informative failure agrees
    /// on it; anything mixed reports as generic contention.
    fn categorize(&self) -> RejectReason {
        if !self.in_window {
            return RejectReason::NoAvailability;
        }
        let informative =
            self.ng_teacher + self.not_qualified + self.student_conflict + self.full;
        if informative == 0 {
            return RejectReason::NoOpenSlot;
        }
        if self.not_qualified == informative {
            RejectReason::NoQualifiedTeacher
        } else if self.ng_teacher == informative {
            RejectReason::NgTeacher
        } else if self.student_conflict == informative {
            RejectReason::StudentConflict
        } else if self.full == informative {
            RejectReason::BoothFull
        } else {
            RejectReason::NoOpenSlot
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn distribute_preserves_total() {
        let mut rng = StdRng::seed_from_u64(7);
        for total in 0..12u32 {
            let targets = distribute(total, 4, &mut rng);
            assert_eq!(targets.len(), 4);
            assert_eq!(targets.iter().sum::<u32>(), total);
            let max = targets.iter().max().copied().unwrap_or(0);
            let min = targets.iter().min().copied().unwrap_or(0);
            assert!(max - min <= 1, "uneven split for {total}: {targets:?}");
        }
    }

    #[test]
    fn distribute_handles_zero_weeks() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(distribute(5, 0, &mut rng).is_empty());
    }

    #[test]
    fn tally_outside_window_reports_no_availability() {
        let tally = RejectionTally::default();
        assert_eq!(tally.categorize(), RejectReason::NoAvailability);
    }

    #[test]
    fn tally_pure_class_reports_specifically() {
        let mut tally = RejectionTally {
            in_window: true,
            ..Default::default()
        };
        tally.note(BoothRejection::NotQualified);
        tally.note(BoothRejection::NotQualified);
        tally.note(BoothRejection::Unstaffed);
        assert_eq!(tally.categorize(), RejectReason::NoQualifiedTeacher);
    }

    #[test]
    fn tally_mixed_classes_report_generic() {
        let mut tally = RejectionTally {
            in_window: true,
            ..Default::default()
        };
        tally.note(BoothRejection::NgTeacher);
        tally.note(BoothRejection::Full);
        assert_eq!(tally.categorize(), RejectReason::NoOpenSlot);
    }

    #[test]
    fn tally_only_uninformative_reports_generic() {
        let mut tally = RejectionTally {
            in_window: true,
            ..Default::default()
        };
        tally.note(BoothRejection::Unstaffed);
        assert_eq!(tally.categorize(), RejectReason::NoOpenSlot);
    }

    #[test]
    fn allocation_state_tracks_remaining() {
        use boothplan_core::{subjects, Grade};

        let students = vec![Student::new("A", Grade::middle(1))
            .need(subjects::MATH, 2)
            .need(subjects::ENGLISH, 1)];
        let mut state = AllocationState::new(&students);

        assert_eq!(state.remaining("A", subjects::MATH), 2);
        assert_eq!(state.total_remaining("A"), 3);
        state.decrement("A", subjects::MATH);
        assert_eq!(state.remaining("A", subjects::MATH), 1);
        state.decrement("A", subjects::MATH);
        state.decrement("A", subjects::MATH);
        assert_eq!(state.remaining("A", subjects::MATH), 0);

        let unplaced = state.unplaced(&students);
        assert_eq!(unplaced.len(), 1);
        assert_eq!(unplaced[0].subject, subjects::ENGLISH);
        assert_eq!(unplaced[0].remaining, 1);
        assert_eq!(unplaced[0].reason, RejectReason::NoOpenSlot);
    }

    #[test]
    fn noted_rejection_surfaces_in_unplaced() {
        use boothplan_core::{subjects, Grade};

        let students = vec![Student::new("A", Grade::middle(1)).need(subjects::MATH, 1)];
        let mut state = AllocationState::new(&students);
        state.note_rejection("A", subjects::MATH, RejectReason::NgTeacher);

        let unplaced = state.unplaced(&students);
        assert_eq!(unplaced[0].reason, RejectReason::NgTeacher);
    }
}
