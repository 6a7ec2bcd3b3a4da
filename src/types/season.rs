//! Season, hemisphere and boundary-mode types used by the season classifier.

use crate::season::error::SeasonError;
use std::fmt;
use std::str::FromStr;

/// The four seasons in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Spring = 0,
    Summer = 1,
    Fall = 2,
    Winter = 3,
}

/// Season observed on the southern hemisphere for each northern season, indexed by
/// [`Season::index`].
const HEMISPHERE_SWAP: [Season; 4] = [Season::Fall, Season::Winter, Season::Spring, Season::Summer];

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Maps a northern-hemisphere season to its southern counterpart and vice versa.
    pub fn swapped(&self) -> Season {
        HEMISPHERE_SWAP[self.index()]
    }

    pub fn for_hemisphere(&self, hemisphere: Hemisphere) -> Season {
        match hemisphere {
            Hemisphere::North => *self,
            Hemisphere::South => self.swapped(),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SeasonLabels::default().label(*self))
    }
}

/// Hemisphere of the location a timestamp refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hemisphere {
    #[default]
    North,
    South,
}

impl FromStr for Hemisphere {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Ok(Hemisphere::North),
            "south" => Ok(Hemisphere::South),
            _ => Err(SeasonError::InvalidHemisphere(s.to_string())),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::North => write!(f, "north"),
            Hemisphere::South => write!(f, "south"),
        }
    }
}

/// How the four season boundaries of a year are defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeasonBoundaryMode {
    /// Equinox and solstice instants.
    #[default]
    Astronomical,
    /// Fixed cutoffs on March 1, June 1, September 1 and December 1 at midnight.
    Meteorological,
}

impl FromStr for SeasonBoundaryMode {
    type Err = SeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astronomical" => Ok(SeasonBoundaryMode::Astronomical),
            "meteorological" => Ok(SeasonBoundaryMode::Meteorological),
            _ => Err(SeasonError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for SeasonBoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonBoundaryMode::Astronomical => write!(f, "astronomical"),
            SeasonBoundaryMode::Meteorological => write!(f, "meteorological"),
        }
    }
}

/// Output labels in canonical order: spring, summer, fall, winter.
///
/// # Examples
///
/// ```
/// use edautils::{Season, SeasonLabels};
///
/// let german = SeasonLabels::new(["frühling", "sommer", "herbst", "winter"]);
/// assert_eq!(german.label(Season::Fall), "herbst");
/// assert_eq!(SeasonLabels::default().label(Season::Fall), "Fall");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonLabels([String; 4]);

impl SeasonLabels {
    pub fn new<S: Into<String>>(labels: [S; 4]) -> Self {
        Self(labels.map(Into::into))
    }

    pub fn label(&self, season: Season) -> &str {
        &self.0[season.index()]
    }
}

impl Default for SeasonLabels {
    fn default() -> Self {
        Self::new(["Spring", "Summer", "Fall", "Winter"])
    }
}

impl<S: Into<String>> From<[S; 4]> for SeasonLabels {
    fn from(labels: [S; 4]) -> Self {
        Self::new(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_is_involution() {
        for season in Season::ALL {
            assert_ne!(season.swapped(), season);
            assert_eq!(season.swapped().swapped(), season);
        }
        assert_eq!(Season::Spring.swapped(), Season::Fall);
        assert_eq!(Season::Summer.swapped(), Season::Winter);
    }

    #[test]
    fn test_parse_hemisphere_and_mode() {
        assert_eq!("south".parse::<Hemisphere>().unwrap(), Hemisphere::South);
        assert_eq!("North".parse::<Hemisphere>().unwrap(), Hemisphere::North);
        assert!(matches!(
            "east".parse::<Hemisphere>(),
            Err(SeasonError::InvalidHemisphere(_))
        ));
        assert_eq!(
            "meteorological".parse::<SeasonBoundaryMode>().unwrap(),
            SeasonBoundaryMode::Meteorological
        );
        assert!(matches!(
            "lunar".parse::<SeasonBoundaryMode>(),
            Err(SeasonError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_display_uses_default_labels() {
        assert_eq!(Season::Winter.to_string(), "Winter");
        assert_eq!(Hemisphere::South.to_string(), "south");
    }
}
