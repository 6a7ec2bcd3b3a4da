use crate::season::ephemeris::{solar_event, SolarEvent};
use crate::season::error::SeasonError;
use crate::types::season::{Season, SeasonBoundaryMode};
use chrono::{NaiveDate, NaiveDateTime};

/// The instants at which spring, summer, fall and winter start in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonBoundaries {
    pub spring: NaiveDateTime,
    pub summer: NaiveDateTime,
    pub fall: NaiveDateTime,
    pub winter: NaiveDateTime,
}

impl SeasonBoundaries {
    /// Computes the boundaries of `year` for the given mode.
    ///
    /// Astronomical boundaries are UTC equinox/solstice instants; meteorological
    /// boundaries are midnight on the first of March, June, September and December.
    pub fn for_year(year: i32, mode: SeasonBoundaryMode) -> Result<Self, SeasonError> {
        let out_of_range = || SeasonError::YearOutOfRange(year);
        match mode {
            SeasonBoundaryMode::Astronomical => {
                let event = |e| solar_event(year, e).ok_or_else(out_of_range);
                Ok(Self {
                    spring: event(SolarEvent::MarchEquinox)?,
                    summer: event(SolarEvent::JuneSolstice)?,
                    fall: event(SolarEvent::SeptemberEquinox)?,
                    winter: event(SolarEvent::DecemberSolstice)?,
                })
            }
            SeasonBoundaryMode::Meteorological => {
                let first_of = |month| {
                    NaiveDate::from_ymd_opt(year, month, 1)
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                        .ok_or_else(out_of_range)
                };
                Ok(Self {
                    spring: first_of(3)?,
                    summer: first_of(6)?,
                    fall: first_of(9)?,
                    winter: first_of(12)?,
                })
            }
        }
    }

    /// Start instant of `season` within this year.
    pub fn start_of(&self, season: Season) -> NaiveDateTime {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
            Season::Winter => self.winter,
        }
    }

    /// Northern-hemisphere season of `timestamp`. Intervals are half-open, so a
    /// timestamp equal to a boundary belongs to the season that boundary starts.
    /// Anything before spring or from winter on is winter.
    pub fn classify(&self, timestamp: NaiveDateTime) -> Season {
        if timestamp >= self.spring && timestamp < self.summer {
            Season::Spring
        } else if timestamp >= self.summer && timestamp < self.fall {
            Season::Summer
        } else if timestamp >= self.fall && timestamp < self.winter {
            Season::Fall
        } else {
            Season::Winter
        }
    }
}
