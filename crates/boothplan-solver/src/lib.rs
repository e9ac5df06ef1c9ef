//! # boothplan-solver
//!
//! The boothplan allocation engine: booth lineup resolution, office-duty
//! assignment, and three-phase placement scheduling over a multi-week
//! calendar.
//!
//! The engine is a single deterministic pass: office duty is resolved per
//! day, the booth lineup is derived from raw attendance, and student demand
//! is placed through fixed-lesson, distributed, and retry phases. Demand
//! with no legal placement comes back as structured unplaced records, never
//! as an error.
//!
//! ## Example
//!
//! ```rust
//! use boothplan_core::{
//!     CapabilityTable, Grade, HolidayCalendar, Student, TeacherRoster,
//!     TimeSlot, Weekday, subjects,
//! };
//! use boothplan_solver::{BoothScheduler, SchedulerConfig, SchedulingInput};
//!
//! let mut roster = TeacherRoster::new(1);
//! roster.record(0, Weekday::Monday, TimeSlot::T1600, "Tamura");
//!
//! let input = SchedulingInput {
//!     students: vec![Student::new("Aoki", Grade::middle(2)).need(subjects::MATH, 1)],
//!     roster,
//!     capabilities: CapabilityTable::new(),
//!     holidays: HolidayCalendar::default(),
//! };
//!
//! let config = SchedulerConfig {
//!     weeks: 1,
//!     ..SchedulerConfig::default()
//! };
//! let outcome = BoothScheduler::new(config).schedule(&input);
//! assert!(outcome.unplaced.is_empty());
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use boothplan_core::{
    CapabilityTable, HolidayCalendar, OfficeAssignment, OfficeWeek, ScheduleWeek, Student,
    TeacherName, TeacherRoster, TimeSlot, UnplacedDemand, Weekday,
};

pub mod diagnostics;
mod legality;
mod lineup;
mod office;
mod placement;

pub use diagnostics::UnplacedReport;
pub use legality::{admit, BoothRejection};
pub use lineup::{resolve_day_lineup, DayLineup};
pub use office::resolve_office_duty;

use placement::{AllocationState, Placer};

// ============================================================================
// Configuration
// ============================================================================

/// Run parameters for one scheduling pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of calendar weeks to schedule (typically 4)
    pub weeks: usize,
    /// Office-duty candidates per weekday, in priority order
    pub office_rules: HashMap<Weekday, Vec<TeacherName>>,
    /// Teachers selected for office duty without an attendance check
    pub always_available: HashSet<TeacherName>,
    /// Teacher -> preferred booth number (1-based)
    pub booth_preferences: HashMap<TeacherName, u8>,
    /// Seed for tie-breaking and remainder shuffling; equal seeds and
    /// inputs give equal schedules
    pub seed: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            weeks: 4,
            office_rules: HashMap::new(),
            always_available: HashSet::new(),
            booth_preferences: HashMap::new(),
            seed: 0,
        }
    }
}

// ============================================================================
// Input / Output
// ============================================================================

/// Everything the engine consumes, built by upstream collaborators.
#[derive(Clone, Debug, Default)]
pub struct SchedulingInput {
    pub students: Vec<Student>,
    pub roster: TeacherRoster,
    pub capabilities: CapabilityTable,
    pub holidays: HolidayCalendar,
}

/// Everything the engine produces, consumed by downstream collaborators.
#[derive(Clone, Debug, Default)]
pub struct ScheduleOutcome {
    /// One [`ScheduleWeek`] per calendar week
    pub weeks: Vec<ScheduleWeek>,
    /// Office assignments, one map per week
    pub office: Vec<OfficeWeek>,
    /// Demand the engine could not place, with reasons
    pub unplaced: Vec<UnplacedDemand>,
}

impl ScheduleOutcome {
    /// Total lessons placed across all weeks.
    pub fn placed_count(&self) -> usize {
        self.weeks.iter().map(ScheduleWeek::placed_count).sum()
    }

    /// Aggregated view over the unplaced records.
    pub fn unplaced_report(&self) -> UnplacedReport {
        UnplacedReport::new(self.unplaced.clone())
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// The allocation engine. One instance may run many times; each run is
/// independent and re-seeds its generator from the config.
#[derive(Clone, Debug, Default)]
pub struct BoothScheduler {
    config: SchedulerConfig,
}

impl BoothScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run one full scheduling pass.
    ///
    /// Infallible for well-formed input: infeasibility surfaces as
    /// [`UnplacedDemand`] entries, and malformed fixed lessons are skipped.
    pub fn schedule(&self, input: &SchedulingInput) -> ScheduleOutcome {
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        // Teachers wished for by any student bypass the lineup cut.
        let wish_teachers: HashSet<TeacherName> = input
            .students
            .iter()
            .flat_map(|s| s.wish_teachers.iter().cloned())
            .collect();

        let mut weeks: Vec<ScheduleWeek> = Vec::with_capacity(self.config.weeks);
        let mut office: Vec<OfficeWeek> = Vec::with_capacity(self.config.weeks);

        for week_index in 0..self.config.weeks {
            let mut office_week = OfficeWeek::new();
            let mut schedule_week = ScheduleWeek::default();

            for day in Weekday::ALL {
                let holiday = input.holidays.is_holiday(week_index, day);
                let attendance = input.roster.day(week_index, day);
                let candidates = self
                    .config
                    .office_rules
                    .get(&day)
                    .map_or(&[][..], Vec::as_slice);
                let assignment = office::resolve_office_duty(
                    candidates,
                    &self.config.always_available,
                    attendance,
                    holiday,
                );
                if assignment == OfficeAssignment::Holiday {
                    office_week.insert(day, assignment);
                    continue;
                }

                let office_teacher = match &assignment {
                    OfficeAssignment::Staffed(name) => Some(name.as_str()),
                    _ => None,
                };
                let lineup = lineup::resolve_day_lineup(
                    day,
                    attendance,
                    &self.config.booth_preferences,
                    &wish_teachers,
                    office_teacher,
                );
                for &slot in TimeSlot::for_day(day) {
                    schedule_week.set_booths(day, slot, lineup.booths_for_slot(slot));
                }
                office_week.insert(day, assignment);
            }

            office.push(office_week);
            weeks.push(schedule_week);
        }
        debug!(weeks = self.config.weeks, "booth lineups resolved");

        let students_by_name: HashMap<&str, &Student> = input
            .students
            .iter()
            .map(|s| (s.name.as_str(), s))
            .collect();
        let placer = Placer {
            students: &input.students,
            students_by_name,
            capabilities: &input.capabilities,
            booth_preferences: &self.config.booth_preferences,
            week_count: self.config.weeks,
        };
        let mut state = AllocationState::new(&input.students);
        placer.run(&mut weeks, &mut state, &mut rng);

        let unplaced = state.unplaced(&input.students);
        debug!(
            placed = weeks.iter().map(ScheduleWeek::placed_count).sum::<usize>(),
            unplaced = unplaced.len(),
            "scheduling pass complete"
        );

        ScheduleOutcome {
            weeks,
            office,
            unplaced,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
