//! Sensor kinds reported by MeteoSwiss automatic stations.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

/// A measurement a station can be asked to provide.
///
/// Parses from the short request tokens `temp`, `globrad`, `relhum` and `rain`.
///
/// # Examples
///
/// ```
/// use edautils::SensorKind;
///
/// let sensor: SensorKind = "globrad".parse().unwrap();
/// assert_eq!(sensor, SensorKind::GlobalRadiation);
/// assert_eq!(sensor.to_string(), "globrad");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Temperature,
    GlobalRadiation,
    RelativeHumidity,
    Rain,
}

impl SensorKind {
    pub const ALL: [SensorKind; 4] = [
        SensorKind::Temperature,
        SensorKind::GlobalRadiation,
        SensorKind::RelativeHumidity,
        SensorKind::Rain,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "temp",
            SensorKind::GlobalRadiation => "globrad",
            SensorKind::RelativeHumidity => "relhum",
            SensorKind::Rain => "rain",
        }
    }

    /// Keyword identifying this sensor in the feed's German measurement list.
    pub(crate) fn feed_keyword(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "Temperatur",
            SensorKind::GlobalRadiation => "Globalstrahlung",
            SensorKind::RelativeHumidity => "Feuchte",
            SensorKind::Rain => "Niederschlag",
        }
    }

    fn flag(&self) -> SensorSet {
        match self {
            SensorKind::Temperature => SensorSet::TEMPERATURE,
            SensorKind::GlobalRadiation => SensorSet::GLOBAL_RADIATION,
            SensorKind::RelativeHumidity => SensorSet::RELATIVE_HUMIDITY,
            SensorKind::Rain => SensorSet::RAIN,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Returned when a sensor token is not one of `temp`, `globrad`, `relhum`, `rain`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sensor '{0}', expected one of temp, globrad, relhum, rain")]
pub struct UnknownSensor(pub String);

impl FromStr for SensorKind {
    type Err = UnknownSensor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorKind::ALL
            .into_iter()
            .find(|kind| kind.token() == s.trim())
            .ok_or_else(|| UnknownSensor(s.to_string()))
    }
}

bitflags! {
    /// The set of sensors a station supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SensorSet: u8 {
        const TEMPERATURE       = 1 << 0;
        const GLOBAL_RADIATION  = 1 << 1;
        const RELATIVE_HUMIDITY = 1 << 2;
        const RAIN              = 1 << 3;
    }
}

impl SensorSet {
    /// Builds the set from the feed's free-text measurement list,
    /// e.g. `"Temperatur, Niederschlag, Feuchte"`.
    pub fn from_measurements(measurements: &str) -> Self {
        SensorKind::ALL
            .into_iter()
            .filter(|kind| measurements.contains(kind.feed_keyword()))
            .fold(SensorSet::empty(), |set, kind| set | kind.flag())
    }

    pub fn supports(&self, sensor: SensorKind) -> bool {
        self.contains(sensor.flag())
    }
}

impl FromIterator<SensorKind> for SensorSet {
    fn from_iter<I: IntoIterator<Item = SensorKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SensorSet::empty(), |set, kind| set | kind.flag())
    }
}
