//! Booth lineup resolution
//!
//! Turns one day's raw attendance roster into a fixed six-booth lineup.
//! Booth identity is decided once per day: each selected teacher holds one
//! booth index across every time slot, and a booth whose teacher is absent
//! for a slot stays in the lineup as an unstaffed placeholder.
//!
//! # Algorithm
//!
//! 1. Compute each teacher's earliest attending slot (the office-duty
//!    teacher is excluded up front).
//! 2. Select at most [`MAX_BOOTHS`] teachers, ranked by earliest slot;
//!    teachers wished for by any student are force-included past the cut.
//! 3. Assign booth indices once for the day: booth-number preferences claim
//!    their index first, everyone else fills the gaps in selection order.
//! 4. Fill each teacher's attendance span: the raw roster samples
//!    attendance sparsely, so a teacher counts as present for every slot
//!    between their first and last observed appearance.
//! 5. Emit a six-entry booth list per slot from the day-level assignment
//!    and the spans.

use std::collections::{HashMap, HashSet};

use boothplan_core::{Booth, DayAttendance, TeacherName, TimeSlot, Weekday, MAX_BOOTHS};

/// Booth assignments for one day, stable across all its time slots.
#[derive(Clone, Debug, Default)]
pub struct DayLineup {
    /// Booth index -> teacher holding it for the whole day
    assignments: [Option<TeacherName>; MAX_BOOTHS],
    /// Observed attendance span per teacher, as inclusive global slot
    /// indices
    spans: HashMap<TeacherName, (usize, usize)>,
}

impl DayLineup {
    /// The teacher holding a booth index, if any.
    pub fn teacher_at(&self, index: usize) -> Option<&str> {
        self.assignments.get(index)?.as_deref()
    }

    /// Build the ordered six-entry booth list for one slot. Booth `i` is
    /// staffed when teacher `i`'s span covers the slot, otherwise it is an
    /// unstaffed placeholder.
    pub fn booths_for_slot(&self, slot: TimeSlot) -> Vec<Booth> {
        self.assignments
            .iter()
            .map(|assignment| match assignment {
                Some(teacher) if self.covers(teacher, slot) => Booth::staffed(teacher.clone()),
                _ => Booth::unstaffed(),
            })
            .collect()
    }

    fn covers(&self, teacher: &str, slot: TimeSlot) -> bool {
        self.spans
            .get(teacher)
            .is_some_and(|&(first, last)| (first..=last).contains(&slot.index()))
    }
}

/// Resolve the day's booth lineup from raw attendance.
///
/// `wish_teachers` is the union of every student's wish list; membership
/// overrides the six-teacher cut. `booth_preferences` maps teachers to
/// 1-based booth numbers.
pub fn resolve_day_lineup(
    day: Weekday,
    attendance: Option<&DayAttendance>,
    booth_preferences: &HashMap<TeacherName, u8>,
    wish_teachers: &HashSet<TeacherName>,
    office_teacher: Option<&str>,
) -> DayLineup {
    let Some(attendance) = attendance else {
        return DayLineup::default();
    };

    // Earliest attending slot per teacher, in first-seen order so that the
    // later stable sort keeps a deterministic tie order.
    let mut seen_order: Vec<TeacherName> = Vec::new();
    let mut earliest: HashMap<TeacherName, usize> = HashMap::new();
    let mut spans: HashMap<TeacherName, (usize, usize)> = HashMap::new();
    for slot in TimeSlot::for_day(day) {
        for teacher in attendance.teachers_at(*slot) {
            if office_teacher == Some(teacher.as_str()) {
                continue;
            }
            let index = slot.index();
            earliest.entry(teacher.clone()).or_insert_with(|| {
                seen_order.push(teacher.clone());
                index
            });
            spans
                .entry(teacher.clone())
                .and_modify(|span| span.1 = index)
                .or_insert((index, index));
        }
    }

    // Cut to six, earliest first; wish-listed teachers survive the cut.
    let selected: Vec<TeacherName> = if seen_order.len() <= MAX_BOOTHS {
        seen_order
    } else {
        let mut ranked = seen_order.clone();
        ranked.sort_by_key(|t| earliest[t]);
        let mut keep: Vec<TeacherName> = ranked[..MAX_BOOTHS].to_vec();
        for teacher in &ranked[MAX_BOOTHS..] {
            if wish_teachers.contains(teacher) {
                keep.push(teacher.clone());
            }
        }
        keep
    };

    // Over capacity only happens through forced wish inclusion; in that
    // case wish-listed teachers claim indices ahead of the rest.
    let fill_order: Vec<&TeacherName> = if selected.len() > MAX_BOOTHS {
        let (wished, others): (Vec<&TeacherName>, Vec<&TeacherName>) =
            selected.iter().partition(|t| wish_teachers.contains(*t));
        wished.into_iter().chain(others).collect()
    } else {
        selected.iter().collect()
    };

    // Preference holders claim their booth number first, first-come order;
    // a taken or out-of-range number falls through to gap filling.
    let mut assignments: [Option<TeacherName>; MAX_BOOTHS] = Default::default();
    let mut unplaced: Vec<&TeacherName> = Vec::new();
    for &teacher in &fill_order {
        match booth_preferences.get(teacher) {
            Some(&number) if number >= 1 => {
                let index = usize::from(number) - 1;
                if index < MAX_BOOTHS && assignments[index].is_none() {
                    assignments[index] = Some(teacher.clone());
                } else {
                    unplaced.push(teacher);
                }
            }
            _ => unplaced.push(teacher),
        }
    }
    for teacher in unplaced {
        if let Some(empty) = assignments.iter_mut().find(|slot| slot.is_none()) {
            *empty = Some(teacher.clone());
        }
    }

    spans.retain(|teacher, _| assignments.iter().flatten().any(|t| t == teacher));

    DayLineup { assignments, spans }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use boothplan_core::TeacherRoster;
    use pretty_assertions::assert_eq;

    fn day_of(roster: &TeacherRoster) -> Option<&DayAttendance> {
        roster.day(0, Weekday::Monday)
    }

    fn staffed_names(booths: &[Booth]) -> Vec<Option<String>> {
        booths.iter().map(|b| b.teacher.clone()).collect()
    }

    #[test]
    fn everyone_fits_when_six_or_fewer() {
        let mut roster = TeacherRoster::new(1);
        for (i, name) in ["A", "B", "C"].iter().enumerate() {
            let slot = TimeSlot::for_day(Weekday::Monday)[i];
            roster.record(0, Weekday::Monday, slot, *name);
        }
        let lineup = resolve_day_lineup(
            Weekday::Monday,
            day_of(&roster),
            &HashMap::new(),
            &HashSet::new(),
            None,
        );
        assert_eq!(lineup.teacher_at(0), Some("A"));
        assert_eq!(lineup.teacher_at(1), Some("B"));
        assert_eq!(lineup.teacher_at(2), Some("C"));
        assert_eq!(lineup.teacher_at(3), None);
    }

    #[test]
    fn seven_attendees_rank_by_earliest_slot() {
        let mut roster = TeacherRoster::new(1);
        // Six teachers from 16:00, a seventh only from 17:05.
        for name in ["A", "B", "C", "D", "E", "F"] {
            roster.record(0, Weekday::Monday, TimeSlot::T1600, name);
        }
        roster.record(0, Weekday::Monday, TimeSlot::T1705, "Late");

        let lineup = resolve_day_lineup(
            Weekday::Monday,
            day_of(&roster),
            &HashMap::new(),
            &HashSet::new(),
            None,
        );
        let assigned: Vec<&str> = (0..MAX_BOOTHS).filter_map(|i| lineup.teacher_at(i)).collect();
        assert_eq!(assigned.len(), 6);
        assert!(!assigned.contains(&"Late"));
    }

    #[test]
    fn wish_listed_teacher_survives_the_cut() {
        let mut roster = TeacherRoster::new(1);
        for name in ["A", "B", "C", "D", "E", "F"] {
            roster.record(0, Weekday::Monday, TimeSlot::T1600, name);
        }
        roster.record(0, Weekday::Monday, TimeSlot::T1705, "Wished");

        let lineup = resolve_day_lineup(
            Weekday::Monday,
            day_of(&roster),
            &HashMap::new(),
            &HashSet::from(["Wished".to_string()]),
            None,
        );
        let assigned: Vec<&str> = (0..MAX_BOOTHS).filter_map(|i| lineup.teacher_at(i)).collect();
        assert!(assigned.contains(&"Wished"));
    }

    #[test]
    fn booth_preference_lands_on_its_index() {
        let mut roster = TeacherRoster::new(1);
        for name in ["A", "B", "C"] {
            roster.record(0, Weekday::Monday, TimeSlot::T1600, name);
        }
        let prefs = HashMap::from([("C".to_string(), 3u8)]);
        let lineup = resolve_day_lineup(
            Weekday::Monday,
            day_of(&roster),
            &prefs,
            &HashSet::new(),
            None,
        );
        // 1-based preference 3 is 0-based index 2.
        assert_eq!(lineup.teacher_at(2), Some("C"));
        assert_eq!(lineup.teacher_at(0), Some("A"));
        assert_eq!(lineup.teacher_at(1), Some("B"));
    }

    #[test]
    fn duplicate_preference_falls_through_to_gap_filling() {
        let mut roster = TeacherRoster::new(1);
        roster.record(0, Weekday::Monday, TimeSlot::T1600, "A");
        roster.record(0, Weekday::Monday, TimeSlot::T1600, "B");
        let prefs = HashMap::from([("A".to_string(), 1u8), ("B".to_string(), 1u8)]);
        let lineup = resolve_day_lineup(
            Weekday::Monday,
            day_of(&roster),
            &prefs,
            &HashSet::new(),
            None,
        );
        assert_eq!(lineup.teacher_at(0), Some("A"));
        assert_eq!(lineup.teacher_at(1), Some("B"));
    }

    #[test]
    fn office_teacher_is_excluded_from_booths() {
        let mut roster = TeacherRoster::new(1);
        roster.record(0, Weekday::Monday, TimeSlot::T1600, "A");
        roster.record(0, Weekday::Monday, TimeSlot::T1600, "Office");
        let lineup = resolve_day_lineup(
            Weekday::Monday,
            day_of(&roster),
            &HashMap::new(),
            &HashSet::new(),
            Some("Office"),
        );
        assert_eq!(lineup.teacher_at(0), Some("A"));
        assert_eq!(lineup.teacher_at(1), None);
    }

    #[test]
    fn span_fills_gaps_between_observations() {
        let mut roster = TeacherRoster::new(1);
        // Recorded at 16:00 and 19:15 only; span covers 17:05 and 18:10.
        roster.record(0, Weekday::Monday, TimeSlot::T1600, "A");
        roster.record(0, Weekday::Monday, TimeSlot::T1915, "A");
        let lineup = resolve_day_lineup(
            Weekday::Monday,
            day_of(&roster),
            &HashMap::new(),
            &HashSet::new(),
            None,
        );

        let mid = lineup.booths_for_slot(TimeSlot::T1705);
        assert_eq!(mid[0].teacher.as_deref(), Some("A"));
        // Outside the span the booth is an unstaffed placeholder.
        let late = lineup.booths_for_slot(TimeSlot::T2020);
        assert_eq!(late[0].teacher, None);
        assert_eq!(late.len(), MAX_BOOTHS);
    }

    #[test]
    fn booth_identity_is_stable_across_slots() {
        let mut roster = TeacherRoster::new(1);
        roster.record(0, Weekday::Monday, TimeSlot::T1705, "A");
        roster.record(0, Weekday::Monday, TimeSlot::T1600, "B");
        let lineup = resolve_day_lineup(
            Weekday::Monday,
            day_of(&roster),
            &HashMap::new(),
            &HashSet::new(),
            None,
        );

        let early = staffed_names(&lineup.booths_for_slot(TimeSlot::T1600));
        let later = staffed_names(&lineup.booths_for_slot(TimeSlot::T1705));
        // B was seen first and holds booth 0 for the whole day, A booth 1.
        // Each booth keeps its index even in slots its teacher misses.
        assert_eq!(early[0].as_deref(), Some("B"));
        assert_eq!(early[1], None);
        assert_eq!(later[0], None);
        assert_eq!(later[1].as_deref(), Some("A"));
    }

    #[test]
    fn no_attendance_yields_empty_lineup() {
        let lineup = resolve_day_lineup(
            Weekday::Monday,
            None,
            &HashMap::new(),
            &HashSet::new(),
            None,
        );
        let booths = lineup.booths_for_slot(TimeSlot::T1600);
        assert_eq!(booths.len(), MAX_BOOTHS);
        assert!(booths.iter().all(|b| b.teacher.is_none()));
    }
}
