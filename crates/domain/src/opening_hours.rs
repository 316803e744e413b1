//! Opening hours: the weekly schedule during which a device may be used.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const HOURS_PER_DAY: u8 = 24;

/// Schedule of a single weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayTime {
    Open24h,
    Closed24h,
    /// Open from `open` until `close`, both expressed as hours of the day.
    OpenInterval { open: u8, close: u8 },
}

impl DayTime {
    /// Open from `open` until `close`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidInterval`] unless
    /// `open < close <= 24`.
    pub fn interval(open: u8, close: u8) -> Result<Self, ValidationError> {
        let day = Self::OpenInterval { open, close };
        day.validate()?;
        Ok(day)
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidInterval`] for an interval that
    /// ends before it starts or past midnight.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Self::OpenInterval { open, close } if open >= close || close > HOURS_PER_DAY => {
                Err(ValidationError::InvalidInterval { open, close })
            }
            _ => Ok(()),
        }
    }
}

static WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Seven-day schedule. Compared by full week content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpeningHours {
    pub monday: DayTime,
    pub tuesday: DayTime,
    pub wednesday: DayTime,
    pub thursday: DayTime,
    pub friday: DayTime,
    pub saturday: DayTime,
    pub sunday: DayTime,
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self::always_open()
    }
}

impl OpeningHours {
    /// Every day open around the clock.
    #[must_use]
    pub fn always_open() -> Self {
        Self::uniform(DayTime::Open24h)
    }

    /// Open around the clock on weekdays, closed on Saturday and Sunday.
    #[must_use]
    pub fn closed_on_weekends() -> Self {
        Self::always_open()
            .with_day(Weekday::Sat, DayTime::Closed24h)
            .with_day(Weekday::Sun, DayTime::Closed24h)
    }

    fn uniform(day: DayTime) -> Self {
        Self {
            monday: day,
            tuesday: day,
            wednesday: day,
            thursday: day,
            friday: day,
            saturday: day,
            sunday: day,
        }
    }

    /// Build a schedule from a sparse per-day mapping.
    ///
    /// Days that are not listed are **closed**. Use [`Self::from_stored`]
    /// when an empty mapping should mean "always open".
    #[must_use]
    pub fn from_days(days: impl IntoIterator<Item = (Weekday, DayTime)>) -> Self {
        days.into_iter()
            .fold(Self::uniform(DayTime::Closed24h), |hours, (weekday, day)| {
                hours.with_day(weekday, day)
            })
    }

    /// Build a schedule from persisted per-day rows.
    ///
    /// No rows at all yields [`Self::always_open`], while a partial set of rows
    /// leaves the missing days closed (see [`Self::from_days`]).
    // NOTE: the two defaults differ and stored schedules rely on both.
    #[must_use]
    pub fn from_stored(rows: impl IntoIterator<Item = (Weekday, DayTime)>) -> Self {
        let mut rows = rows.into_iter().peekable();
        if rows.peek().is_none() {
            return Self::always_open();
        }
        Self::from_days(rows)
    }

    /// Schedule of the given weekday.
    #[must_use]
    pub fn day(&self, weekday: Weekday) -> DayTime {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Return a copy with `weekday` replaced by `day`.
    #[must_use]
    pub fn with_day(mut self, weekday: Weekday, day: DayTime) -> Self {
        let slot = match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = day;
        self
    }

    /// Iterate over the week, Monday first.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, DayTime)> + '_ {
        WEEK.iter().map(|weekday| (*weekday, self.day(*weekday)))
    }

    #[must_use]
    pub fn is_always_open(&self) -> bool {
        *self == Self::always_open()
    }

    /// Check every day of the week.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError::InvalidInterval`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.days().try_for_each(|(_, day)| day.validate())
    }
}
