use crate::calc::calendar::{days_in_month, first_weekday_index, WeekStart};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid month {0}: expected 1..=12")]
    InvalidMonth(u32),

    #[error("invalid month '{0}': expected YYYY-MM")]
    InvalidFormat(String),
}

/// A Gregorian date with no time-of-day component.
///
/// Field order gives the derived `Ord` its year, month, day ordering.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn displayed_month(&self) -> DisplayedMonth {
        DisplayedMonth {
            year: self.year,
            month: self.month,
        }
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// The (year, month) currently shown. Month is always in 1..=12.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayedMonth {
    year: i32,
    month: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl DisplayedMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, GridError> {
        if !(1..=12).contains(&month) {
            return Err(GridError::InvalidMonth(month));
        }
        Ok(DisplayedMonth { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Returns the adjacent month. At the ends of the `i32` year range the
    /// month is returned unchanged.
    pub fn navigate(self, direction: Direction) -> DisplayedMonth {
        match direction {
            Direction::Previous if self.month == 1 => match self.year.checked_sub(1) {
                Some(year) => DisplayedMonth { year, month: 12 },
                None => self,
            },
            Direction::Previous => DisplayedMonth {
                month: self.month - 1,
                ..self
            },
            Direction::Next if self.month == 12 => match self.year.checked_add(1) {
                Some(year) => DisplayedMonth { year, month: 1 },
                None => self,
            },
            Direction::Next => DisplayedMonth {
                month: self.month + 1,
                ..self
            },
        }
    }

    /// Day `day` of this month, if it exists.
    pub fn date(&self, day: u32) -> Option<CalendarDate> {
        (1..=self.days_in_month()).contains(&day).then_some(CalendarDate {
            year: self.year,
            month: self.month,
            day,
        })
    }
}

impl fmt::Display for DisplayedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for DisplayedMonth {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || GridError::InvalidFormat(s.to_string());
        // rsplit so that negative years ("-0044-03") keep their sign
        let (year, month) = s.trim().rsplit_once('-').ok_or_else(bad)?;
        let year: i32 = year.parse().map_err(|_| bad())?;
        let month: u32 = month.parse().map_err(|_| bad())?;
        DisplayedMonth::new(year, month)
    }
}

/// A slot in the month grid.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum GridCell {
    Empty,
    Date(CalendarDate),
}

impl GridCell {
    pub fn date(&self) -> Option<CalendarDate> {
        match self {
            GridCell::Empty => None,
            GridCell::Date(d) => Some(*d),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GridCell::Empty)
    }
}

/// Builds the padded grid for `month`: leading blanks up to the weekday of
/// day 1, every day of the month, then blanks to the end of the last week.
pub fn compute_grid(month: DisplayedMonth, week_start: WeekStart) -> Vec<GridCell> {
    let leading = first_weekday_index(month.year, month.month, week_start) as usize;
    let days = month.days_in_month();

    let mut cells = Vec::with_capacity(42);
    cells.extend(std::iter::repeat_n(GridCell::Empty, leading));
    cells.extend((1..=days).map(|day| {
        GridCell::Date(CalendarDate {
            year: month.year,
            month: month.month,
            day,
        })
    }));
    let remainder = cells.len() % 7;
    if remainder != 0 {
        cells.extend(std::iter::repeat_n(GridCell::Empty, 7 - remainder));
    }
    cells
}
