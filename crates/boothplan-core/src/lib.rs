//! # boothplan-core
//!
//! Core domain model for the boothplan allocation engine.
//!
//! This crate provides:
//! - The addressable time grid: [`Weekday`] and [`TimeSlot`]
//! - Roster-side types: [`Student`], [`TeacherRoster`], [`HolidayCalendar`]
//! - The capability matcher: [`capability::CapabilityTable`]
//! - Schedule output types: [`Booth`], [`ScheduleWeek`], [`OfficeAssignment`],
//!   [`UnplacedDemand`]
//!
//! ## Example
//!
//! ```rust
//! use boothplan_core::{Grade, Student, TimeSlot, Weekday, subjects};
//!
//! let student = Student::new("Aoki", Grade::middle(2))
//!     .need(subjects::ENGLISH, 4)
//!     .need(subjects::MATH, 2)
//!     .wish("Wakabayashi")
//!     .available(Weekday::Tuesday, TimeSlot::T1705)
//!     .available(Weekday::Tuesday, TimeSlot::T1810);
//!
//! assert_eq!(student.total_required(), 6);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use thiserror::Error;

pub mod capability;

pub use capability::{CapabilityPolicy, CapabilityTable};

// ============================================================================
// Type Aliases & Constants
// ============================================================================

/// Display name of a teacher, unique within one run
pub type TeacherName = String;

/// Display name of a student, unique within one run
pub type StudentName = String;

/// Subject code (see [`subjects`] for the well-known codes)
pub type Subject = String;

/// Number of booths per time slot
pub const MAX_BOOTHS: usize = 6;

/// Concurrent students a single booth can hold
pub const BOOTH_CAPACITY: usize = 2;

/// Well-known subject codes.
///
/// Subjects are open-ended strings; the engine only attaches special meaning
/// to the codes below (capability-key renames and the high-school math
/// sub-track expansion).
pub mod subjects {
    pub const ENGLISH: &str = "english";
    /// English test preparation; reuses the `english` capability key
    pub const ENGLISH_EXAM: &str = "english-exam";
    pub const MATH: &str = "math";
    /// Elementary/exam-prep name for math
    pub const ARITHMETIC: &str = "arithmetic";
    pub const JAPANESE: &str = "japanese";
    pub const SCIENCE: &str = "science";
    pub const SOCIAL_STUDIES: &str = "social-studies";

    /// High-school math sub-tracks; any one of them qualifies a teacher
    /// for the generic `math` subject at high-school level.
    pub const HIGH_MATH_TRACKS: [&str; 4] = ["math-1a", "math-2b", "math-3", "math-c"];
}

// ============================================================================
// Time Grid
// ============================================================================

/// Teaching days. Sunday is never addressable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "mon",
            Weekday::Tuesday => "tue",
            Weekday::Wednesday => "wed",
            Weekday::Thursday => "thu",
            Weekday::Friday => "fri",
            Weekday::Saturday => "sat",
        }
    }

    pub fn is_saturday(&self) -> bool {
        matches!(self, Weekday::Saturday)
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Weekday {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Monday),
            "tue" | "tuesday" => Ok(Weekday::Tuesday),
            "wed" | "wednesday" => Ok(Weekday::Wednesday),
            "thu" | "thursday" => Ok(Weekday::Thursday),
            "fri" | "friday" => Ok(Weekday::Friday),
            "sat" | "saturday" => Ok(Weekday::Saturday),
            _ => Err(ParseError::Weekday(s.to_string())),
        }
    }
}

/// One of the six daily lesson slots.
///
/// Weekdays run the last five slots (16:00-20:20); Saturday runs the first
/// four (14:55-18:10). A (day, slot) pair outside [`TimeSlot::for_day`] is
/// not addressable by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    T1455,
    T1600,
    T1705,
    T1810,
    T1915,
    T2020,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 6] = [
        TimeSlot::T1455,
        TimeSlot::T1600,
        TimeSlot::T1705,
        TimeSlot::T1810,
        TimeSlot::T1915,
        TimeSlot::T2020,
    ];

    const WEEKDAY: [TimeSlot; 5] = [
        TimeSlot::T1600,
        TimeSlot::T1705,
        TimeSlot::T1810,
        TimeSlot::T1915,
        TimeSlot::T2020,
    ];

    const SATURDAY: [TimeSlot; 4] = [
        TimeSlot::T1455,
        TimeSlot::T1600,
        TimeSlot::T1705,
        TimeSlot::T1810,
    ];

    /// The addressable slots for a day, in chronological order.
    pub fn for_day(day: Weekday) -> &'static [TimeSlot] {
        if day.is_saturday() {
            &Self::SATURDAY
        } else {
            &Self::WEEKDAY
        }
    }

    /// Position in the global six-slot grid (0 = 14:55 .. 5 = 20:20).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Clock label, e.g. `"16:00"`.
    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::T1455 => "14:55",
            TimeSlot::T1600 => "16:00",
            TimeSlot::T1705 => "17:05",
            TimeSlot::T1810 => "18:10",
            TimeSlot::T1915 => "19:15",
            TimeSlot::T2020 => "20:20",
        }
    }

    /// True when the two slots are consecutive in the daily grid.
    pub fn is_adjacent(self, other: TimeSlot) -> bool {
        self.index().abs_diff(other.index()) == 1
    }

    /// True when this slot exists on the given day.
    pub fn is_addressable(self, day: Weekday) -> bool {
        Self::for_day(day).contains(&self)
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| ParseError::TimeSlot(s.to_string()))
    }
}

// ============================================================================
// Grades
// ============================================================================

/// School band a grade belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeBand {
    Elementary,
    /// Exam-preparation track; maps like elementary below
    /// [`capability::EXAM_PREP_YEAR_THRESHOLD`]
    ExamPrep,
    Middle,
    High,
}

impl GradeBand {
    /// Level tag used in capability keys (`elementary:math` etc.)
    pub fn level_tag(&self) -> &'static str {
        match self {
            GradeBand::Elementary => "elementary",
            GradeBand::ExamPrep => "exam-prep",
            GradeBand::Middle => "middle",
            GradeBand::High => "high",
        }
    }

    fn prefix(&self) -> char {
        match self {
            GradeBand::Elementary => 'E',
            GradeBand::ExamPrep => 'S',
            GradeBand::Middle => 'C',
            GradeBand::High => 'K',
        }
    }
}

/// A student's grade: band plus year within the band (e.g. `C2` = second
/// year of middle school).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Grade {
    pub band: GradeBand,
    pub year: u8,
}

impl Grade {
    pub fn new(band: GradeBand, year: u8) -> Self {
        Self { band, year }
    }

    pub fn elementary(year: u8) -> Self {
        Self::new(GradeBand::Elementary, year)
    }

    pub fn exam_prep(year: u8) -> Self {
        Self::new(GradeBand::ExamPrep, year)
    }

    pub fn middle(year: u8) -> Self {
        Self::new(GradeBand::Middle, year)
    }

    pub fn high(year: u8) -> Self {
        Self::new(GradeBand::High, year)
    }

    /// Compact code, e.g. `"S5"`, `"C2"`, `"K1"`.
    pub fn code(&self) -> String {
        format!("{}{}", self.band.prefix(), self.year)
    }

    /// Parse a grade code. Total by design: a code whose band prefix is not
    /// recognized is treated as middle school, which is also how the
    /// capability matcher resolves unknown grades.
    pub fn parse(code: &str) -> Self {
        let mut chars = code.chars();
        let prefix = chars.next().map(|c| c.to_ascii_uppercase());
        let year = chars.as_str().parse::<u8>().unwrap_or(0);
        let band = match prefix {
            Some('E') => GradeBand::Elementary,
            Some('S') => GradeBand::ExamPrep,
            Some('C') => GradeBand::Middle,
            Some('K') => GradeBand::High,
            _ => GradeBand::Middle,
        };
        Self::new(band, year)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Students
// ============================================================================

/// When a student can attend.
///
/// `Unrestricted` means any addressable (day, slot); `Slots` restricts to an
/// explicit window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    Unrestricted,
    Slots(BTreeSet<(Weekday, TimeSlot)>),
}

impl Availability {
    pub fn covers(&self, day: Weekday, slot: TimeSlot) -> bool {
        match self {
            Availability::Unrestricted => true,
            Availability::Slots(set) => set.contains(&(day, slot)),
        }
    }

    /// Size of the availability window, used to schedule the most
    /// constrained students first. Unrestricted sorts last.
    pub fn window_size(&self) -> usize {
        match self {
            Availability::Unrestricted => usize::MAX,
            Availability::Slots(set) => set.len(),
        }
    }
}

/// A recurring lesson commitment, placed every eligible week.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLesson {
    pub day: Weekday,
    pub slot: TimeSlot,
    pub subject: Subject,
}

/// A student with per-subject lesson demand and placement constraints.
///
/// Constructed once from external input; the engine never mutates a
/// `Student` (remaining-lesson bookkeeping lives in the solver's allocation
/// state).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Student {
    pub name: StudentName,
    pub grade: Grade,
    /// Required lesson count per subject
    pub needs: BTreeMap<Subject, u32>,
    /// Teachers the student asked for; grants lineup inclusion and a
    /// scoring bonus
    pub wish_teachers: Vec<TeacherName>,
    /// Teachers this student must never be assigned to
    pub ng_teachers: HashSet<TeacherName>,
    /// Students this student must never share a booth with
    pub ng_students: HashSet<StudentName>,
    /// Primary availability window
    pub availability: Availability,
    /// Secondary window, consulted with a penalty when the primary window
    /// misses a slot
    pub backup_availability: BTreeSet<(Weekday, TimeSlot)>,
    /// (week index, day) pairs the student cannot attend that specific week
    pub ng_dates: HashSet<(usize, Weekday)>,
    /// Recurring lessons placed in every eligible week
    pub fixed: Vec<FixedLesson>,
    /// Free-form notes, opaque to the engine
    pub notes: String,
}

impl Student {
    pub fn new(name: impl Into<StudentName>, grade: Grade) -> Self {
        Self {
            name: name.into(),
            grade,
            needs: BTreeMap::new(),
            wish_teachers: Vec::new(),
            ng_teachers: HashSet::new(),
            ng_students: HashSet::new(),
            availability: Availability::Unrestricted,
            backup_availability: BTreeSet::new(),
            ng_dates: HashSet::new(),
            fixed: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn need(mut self, subject: impl Into<Subject>, count: u32) -> Self {
        self.needs.insert(subject.into(), count);
        self
    }

    pub fn wish(mut self, teacher: impl Into<TeacherName>) -> Self {
        self.wish_teachers.push(teacher.into());
        self
    }

    pub fn ng_teacher(mut self, teacher: impl Into<TeacherName>) -> Self {
        self.ng_teachers.insert(teacher.into());
        self
    }

    pub fn ng_student(mut self, student: impl Into<StudentName>) -> Self {
        self.ng_students.insert(student.into());
        self
    }

    /// Restrict the primary window to explicit slots, adding this one.
    pub fn available(mut self, day: Weekday, slot: TimeSlot) -> Self {
        match &mut self.availability {
            Availability::Slots(set) => {
                set.insert((day, slot));
            }
            Availability::Unrestricted => {
                self.availability = Availability::Slots(BTreeSet::from([(day, slot)]));
            }
        }
        self
    }

    pub fn backup(mut self, day: Weekday, slot: TimeSlot) -> Self {
        self.backup_availability.insert((day, slot));
        self
    }

    pub fn ng_date(mut self, week: usize, day: Weekday) -> Self {
        self.ng_dates.insert((week, day));
        self
    }

    pub fn fixed_lesson(
        mut self,
        day: Weekday,
        slot: TimeSlot,
        subject: impl Into<Subject>,
    ) -> Self {
        self.fixed.push(FixedLesson {
            day,
            slot,
            subject: subject.into(),
        });
        self
    }

    pub fn note(mut self, text: impl Into<String>) -> Self {
        self.notes = text.into();
        self
    }

    /// Total lessons required across all subjects.
    pub fn total_required(&self) -> u32 {
        self.needs.values().sum()
    }

    pub fn has_wish(&self) -> bool {
        !self.wish_teachers.is_empty()
    }

    pub fn is_ng_date(&self, week: usize, day: Weekday) -> bool {
        self.ng_dates.contains(&(week, day))
    }
}

// ============================================================================
// Teacher Roster & Holidays
// ============================================================================

/// Raw attendance for one day: which teachers were recorded at each slot,
/// before any lineup filtering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAttendance {
    slots: HashMap<TimeSlot, Vec<TeacherName>>,
}

impl DayAttendance {
    pub fn teachers_at(&self, slot: TimeSlot) -> &[TeacherName] {
        self.slots.get(&slot).map_or(&[], Vec::as_slice)
    }

    /// True when the teacher was recorded at any slot this day.
    pub fn attends(&self, teacher: &str) -> bool {
        self.slots.values().any(|ts| ts.iter().any(|t| t == teacher))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }
}

/// Per-week, per-day, per-slot raw teacher attendance. Immutable input to
/// the engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TeacherRoster {
    weeks: Vec<HashMap<Weekday, DayAttendance>>,
}

impl TeacherRoster {
    pub fn new(weeks: usize) -> Self {
        Self {
            weeks: (0..weeks).map(|_| HashMap::new()).collect(),
        }
    }

    /// Record one teacher at (week, day, slot). Out-of-range weeks are
    /// extended; duplicate records are kept as-is.
    pub fn record(
        &mut self,
        week: usize,
        day: Weekday,
        slot: TimeSlot,
        teacher: impl Into<TeacherName>,
    ) {
        if self.weeks.len() <= week {
            self.weeks.resize_with(week + 1, HashMap::new);
        }
        self.weeks[week]
            .entry(day)
            .or_default()
            .slots
            .entry(slot)
            .or_default()
            .push(teacher.into());
    }

    pub fn weeks(&self) -> usize {
        self.weeks.len()
    }

    pub fn day(&self, week: usize, day: Weekday) -> Option<&DayAttendance> {
        self.weeks.get(week)?.get(&day)
    }
}

/// Closure days: (week index, day) pairs on which the school is shut.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HolidayCalendar {
    closed: HashSet<(usize, Weekday)>,
}

impl HolidayCalendar {
    pub fn close(&mut self, week: usize, day: Weekday) {
        self.closed.insert((week, day));
    }

    pub fn is_holiday(&self, week: usize, day: Weekday) -> bool {
        self.closed.contains(&(week, day))
    }
}

// ============================================================================
// Schedule Output
// ============================================================================

/// One placed lesson: a student sitting in a booth for one slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub grade: Grade,
    pub student: StudentName,
    pub subject: Subject,
}

/// A teaching station at one (day, slot). Booth identity (its index) is
/// stable across all slots of a day; a booth whose teacher is absent for a
/// slot is kept as an unstaffed placeholder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booth {
    /// Assigned teacher; `None` marks an unstaffed placeholder
    pub teacher: Option<TeacherName>,
    /// Up to [`BOOTH_CAPACITY`] concurrent lessons
    pub lessons: Vec<Lesson>,
}

impl Booth {
    pub fn staffed(teacher: impl Into<TeacherName>) -> Self {
        Self {
            teacher: Some(teacher.into()),
            lessons: Vec::new(),
        }
    }

    pub fn unstaffed() -> Self {
        Self::default()
    }

    /// Staffed and below capacity.
    pub fn is_open(&self) -> bool {
        self.teacher.is_some() && self.lessons.len() < BOOTH_CAPACITY
    }
}

/// One week of booth assignments: day -> slot -> exactly [`MAX_BOOTHS`]
/// booths. Holiday days carry no entry at all.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScheduleWeek {
    days: HashMap<Weekday, HashMap<TimeSlot, Vec<Booth>>>,
}

impl ScheduleWeek {
    pub fn set_booths(&mut self, day: Weekday, slot: TimeSlot, booths: Vec<Booth>) {
        debug_assert_eq!(booths.len(), MAX_BOOTHS);
        self.days.entry(day).or_default().insert(slot, booths);
    }

    /// True when the day holds any booths (i.e. is not a holiday).
    pub fn has_day(&self, day: Weekday) -> bool {
        self.days.contains_key(&day)
    }

    pub fn booths(&self, day: Weekday, slot: TimeSlot) -> Option<&[Booth]> {
        self.days.get(&day)?.get(&slot).map(Vec::as_slice)
    }

    pub fn booths_mut(&mut self, day: Weekday, slot: TimeSlot) -> Option<&mut Vec<Booth>> {
        self.days.get_mut(&day)?.get_mut(&slot)
    }

    /// Days on which the student already has this subject placed this week.
    pub fn days_with_subject(&self, student: &str, subject: &str) -> HashSet<Weekday> {
        let mut days = HashSet::new();
        self.for_each_lesson(|day, _, _, lesson| {
            if lesson.student == student && lesson.subject == subject {
                days.insert(day);
            }
        });
        days
    }

    /// Every (day, slot) at which the student is already seated this week.
    pub fn occupied_slots(&self, student: &str) -> HashSet<(Weekday, TimeSlot)> {
        let mut slots = HashSet::new();
        self.for_each_lesson(|day, slot, _, lesson| {
            if lesson.student == student {
                slots.insert((day, slot));
            }
        });
        slots
    }

    /// Slots the student attends on one day, sorted chronologically.
    pub fn slots_attending_on(&self, student: &str, day: Weekday) -> Vec<TimeSlot> {
        let mut slots: Vec<TimeSlot> = Vec::new();
        self.for_each_lesson(|d, slot, _, lesson| {
            if d == day && lesson.student == student && !slots.contains(&slot) {
                slots.push(slot);
            }
        });
        slots.sort();
        slots
    }

    /// The booth index at which the teacher already has at least one
    /// occupied slot this day, if any. A teacher is confined to one booth
    /// index per day once they have a student.
    pub fn teacher_booth_index(&self, day: Weekday, teacher: &str) -> Option<usize> {
        let slots = self.days.get(&day)?;
        for slot in TimeSlot::for_day(day) {
            if let Some(booths) = slots.get(slot) {
                for (bi, booth) in booths.iter().enumerate() {
                    if booth.teacher.as_deref() == Some(teacher) && !booth.lessons.is_empty() {
                        return Some(bi);
                    }
                }
            }
        }
        None
    }

    /// Total lessons placed this week.
    pub fn placed_count(&self) -> usize {
        let mut count = 0;
        self.for_each_lesson(|_, _, _, _| count += 1);
        count
    }

    fn for_each_lesson<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(Weekday, TimeSlot, usize, &'a Lesson),
    {
        for day in Weekday::ALL {
            let Some(slots) = self.days.get(&day) else {
                continue;
            };
            for slot in TimeSlot::for_day(day) {
                let Some(booths) = slots.get(slot) else {
                    continue;
                };
                for (bi, booth) in booths.iter().enumerate() {
                    for lesson in &booth.lessons {
                        f(day, *slot, bi, lesson);
                    }
                }
            }
        }
    }
}

/// Who covers administrative work on one day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfficeAssignment {
    /// A teacher pulled off booth duty for the whole day
    Staffed(TeacherName),
    /// Closure day: no booths, no lessons
    Holiday,
    /// No candidate attends; booths run without office cover
    Unassigned,
}

impl std::fmt::Display for OfficeAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfficeAssignment::Staffed(name) => write!(f, "{name}"),
            OfficeAssignment::Holiday => write!(f, "holiday"),
            OfficeAssignment::Unassigned => write!(f, "-"),
        }
    }
}

/// Office assignments for one week
pub type OfficeWeek = HashMap<Weekday, OfficeAssignment>;

// ============================================================================
// Unplaced Demand
// ============================================================================

/// Why a placement attempt found no booth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RejectReason {
    /// No addressable slot fell inside the student's availability window
    NoAvailability,
    /// Every reachable booth failed the capability check
    NoQualifiedTeacher,
    /// Every reachable booth was staffed by an NG teacher
    NgTeacher,
    /// Every reachable booth held a conflicting student
    StudentConflict,
    /// Every reachable booth was at capacity
    BoothFull,
    /// Mixed or unspecific contention
    NoOpenSlot,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::NoAvailability => "no matching availability window",
            RejectReason::NoQualifiedTeacher => "no qualified teacher",
            RejectReason::NgTeacher => "blocked by NG teacher",
            RejectReason::StudentConflict => "blocked by booth-mate constraint",
            RejectReason::BoothFull => "booths full",
            RejectReason::NoOpenSlot => "no open slot",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Demand the engine could not satisfy, with the last rejection observed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnplacedDemand {
    pub grade: Grade,
    pub student: StudentName,
    pub subject: Subject,
    pub remaining: u32,
    pub reason: RejectReason,
}

// ============================================================================
// Errors
// ============================================================================

/// Boundary parse errors. The engine proper never fails on well-formed
/// input; these only arise when collaborators build domain values from text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized weekday: {0}")]
    Weekday(String),

    #[error("unrecognized time slot: {0}")]
    TimeSlot(String),
}

// ============================================================================
// Tests
// ============================================================================
