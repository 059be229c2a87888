use std::fmt;

use bevy_ecs::component::Component;

pub const SHIFTS_PER_DAY: u32 = 3;
pub const DAYS_PER_WEEK: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftName {
    Day,
    Swing,
    Graveyard,
}

/// Shift/day/week calendar carried by the single clock entity.
///
/// `advance` moves the clock by one tick. Rollovers cascade strictly:
/// shift overflow bumps the day, day overflow bumps the week.
/// Invariants: `ticks_into_shift < ticks_per_shift`, `1 <= shift <= 3`,
/// `1 <= day <= 7`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Time {
    pub total_ticks: u64,
    pub shift: u32,
    pub day: u32,
    pub week: u32,
    pub year: u32,
    pub ticks_per_shift: u32,
    pub ticks_into_shift: u32,
}

/// Which boundaries the most recent tick crossed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeAdvance {
    pub shift_changed: bool,
    pub day_changed: bool,
    pub week_changed: bool,
}

impl Time {
    pub fn new(year: u32, ticks_per_shift: u32) -> Self {
        debug_assert!(ticks_per_shift > 0, "ticks_per_shift must be positive");
        Self {
            total_ticks: 0,
            shift: 1,
            day: 1,
            week: 1,
            year,
            ticks_per_shift,
            ticks_into_shift: 0,
        }
    }

    /// Advance the clock by one tick.
    pub fn advance(&mut self) -> TimeAdvance {
        let mut result = TimeAdvance::default();
        self.total_ticks += 1;
        self.ticks_into_shift += 1;

        if self.ticks_into_shift < self.ticks_per_shift {
            return result;
        }
        self.ticks_into_shift = 0;
        self.shift += 1;
        result.shift_changed = true;

        if self.shift <= SHIFTS_PER_DAY {
            return result;
        }
        self.shift = 1;
        self.day += 1;
        result.day_changed = true;

        if self.day <= DAYS_PER_WEEK {
            return result;
        }
        self.day = 1;
        self.week += 1;
        result.week_changed = true;
        result
    }

    /// True exactly on the tick that rolled a shift over.
    pub fn is_shift_boundary(&self) -> bool {
        self.total_ticks > 0 && self.ticks_into_shift == 0
    }

    /// True only on the first tick of a new week.
    pub fn is_week_boundary(&self) -> bool {
        self.is_shift_boundary() && self.shift == 1 && self.day == 1
    }

    pub fn shift_name(&self) -> ShiftName {
        match self.shift {
            1 => ShiftName::Day,
            2 => ShiftName::Swing,
            _ => ShiftName::Graveyard,
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} W{} D{} S{} +{}",
            self.year, self.week, self.day, self.shift, self.ticks_into_shift
        )
    }
}
