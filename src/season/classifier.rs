//! Maps timestamps to season labels for a configured hemisphere, label set and
//! boundary mode.

use crate::season::boundaries::SeasonBoundaries;
use crate::season::error::SeasonError;
use crate::types::any_timestamp::AnyTimestamp;
use crate::types::season::{Hemisphere, Season, SeasonBoundaryMode, SeasonLabels};
use bon::bon;
use chrono::{Datelike, NaiveDateTime};
use std::collections::HashMap;
use std::fmt::Debug;

/// Classifies timestamps into seasons.
///
/// Defaults to the northern hemisphere, English labels and astronomical boundaries.
///
/// # Examples
///
/// ```
/// use edautils::{Hemisphere, SeasonBoundaryMode, SeasonClassifier};
///
/// let classifier = SeasonClassifier::default();
/// assert_eq!(classifier.classify("2024-03-20 03:07").unwrap(), "Spring");
///
/// let south = SeasonClassifier::builder()
///     .hemisphere(Hemisphere::South)
///     .mode(SeasonBoundaryMode::Meteorological)
///     .build();
/// assert_eq!(south.classify("2024-07-15").unwrap(), "Winter");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonClassifier {
    hemisphere: Hemisphere,
    labels: SeasonLabels,
    mode: SeasonBoundaryMode,
}

#[bon]
impl SeasonClassifier {
    /// Creates a classifier.
    ///
    /// # Arguments
    ///
    /// * `.hemisphere(Hemisphere)`: Optional. Defaults to [`Hemisphere::North`].
    /// * `.labels(SeasonLabels)`: Optional. Labels for spring, summer, fall and winter, in that order.
    /// * `.mode(SeasonBoundaryMode)`: Optional. Defaults to [`SeasonBoundaryMode::Astronomical`].
    #[builder]
    pub fn new(
        hemisphere: Option<Hemisphere>,
        labels: Option<SeasonLabels>,
        mode: Option<SeasonBoundaryMode>,
    ) -> Self {
        Self {
            hemisphere: hemisphere.unwrap_or_default(),
            labels: labels.unwrap_or_default(),
            mode: mode.unwrap_or_default(),
        }
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn mode(&self) -> SeasonBoundaryMode {
        self.mode
    }

    pub fn labels(&self) -> &SeasonLabels {
        &self.labels
    }

    /// Resolves the season of `timestamp` on the configured hemisphere.
    ///
    /// # Errors
    ///
    /// Returns [`SeasonError::InvalidTimestamp`] if the value cannot be read as a
    /// timestamp, or [`SeasonError::YearOutOfRange`] if its year has no boundaries.
    pub fn season<T: AnyTimestamp + Debug>(&self, timestamp: T) -> Result<Season, SeasonError> {
        let timestamp = resolve(&timestamp)?;
        let boundaries = SeasonBoundaries::for_year(timestamp.year(), self.mode)?;
        Ok(self.adjust(boundaries.classify(timestamp)))
    }

    /// Returns the configured label of the season `timestamp` falls into.
    pub fn classify<T: AnyTimestamp + Debug>(&self, timestamp: T) -> Result<&str, SeasonError> {
        let season = self.season(timestamp)?;
        Ok(self.labels.label(season))
    }

    /// Classifies a sequence of timestamps, keeping input order and length.
    ///
    /// Boundaries are computed once per distinct year. The first invalid
    /// timestamp aborts the whole batch.
    pub fn classify_all<I, T>(&self, timestamps: I) -> Result<Vec<&str>, SeasonError>
    where
        I: IntoIterator<Item = T>,
        T: AnyTimestamp + Debug,
    {
        Ok(self
            .seasons(timestamps)?
            .into_iter()
            .map(|season| self.labels.label(season))
            .collect())
    }

    /// Like [`SeasonClassifier::classify_all`] but returns the resolved seasons
    /// instead of their labels.
    pub fn seasons<I, T>(&self, timestamps: I) -> Result<Vec<Season>, SeasonError>
    where
        I: IntoIterator<Item = T>,
        T: AnyTimestamp + Debug,
    {
        let mut by_year: HashMap<i32, SeasonBoundaries> = HashMap::new();
        timestamps
            .into_iter()
            .map(|timestamp| {
                let timestamp = resolve(&timestamp)?;
                let year = timestamp.year();
                let boundaries = match by_year.get(&year) {
                    Some(boundaries) => *boundaries,
                    None => {
                        let boundaries = SeasonBoundaries::for_year(year, self.mode)?;
                        by_year.insert(year, boundaries);
                        boundaries
                    }
                };
                Ok(self.adjust(boundaries.classify(timestamp)))
            })
            .collect()
    }

    fn adjust(&self, northern: Season) -> Season {
        northern.for_hemisphere(self.hemisphere)
    }
}

impl Default for SeasonClassifier {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn resolve<T: AnyTimestamp + Debug>(timestamp: &T) -> Result<NaiveDateTime, SeasonError> {
    timestamp
        .to_timestamp()
        .ok_or_else(|| SeasonError::InvalidTimestamp(format!("{:?}", timestamp)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_astronomical_around_march_equinox() {
        let classifier = SeasonClassifier::default();
        assert_eq!(classifier.classify(dt(2024, 3, 20, 3, 5)).unwrap(), "Winter");
        assert_eq!(classifier.classify(dt(2024, 3, 20, 3, 7)).unwrap(), "Spring");
        assert_eq!(classifier.classify(dt(2024, 1, 15, 12, 0)).unwrap(), "Winter");
        assert_eq!(classifier.classify(dt(2024, 12, 31, 23, 59)).unwrap(), "Winter");
    }

    /// One minute either side of each 2024 solstice and equinox.
    const BOUNDARY_CASES_2024: [((u32, u32, u32, u32), usize); 8] = [
        ((3, 20, 3, 5), 3),
        ((3, 20, 3, 7), 0),
        ((6, 20, 20, 50), 0),
        ((6, 20, 21, 52), 1),
        ((9, 22, 12, 42), 1),
        ((9, 22, 12, 44), 2),
        ((12, 21, 9, 19), 2),
        ((12, 21, 9, 21), 3),
    ];

    #[test]
    fn test_astronomical_around_all_2024_events() {
        let english = SeasonClassifier::default();
        let german = SeasonClassifier::builder()
            .labels(SeasonLabels::new(["Frühling", "Sommer", "Herbst", "Winter"]))
            .build();
        let english_labels = ["Spring", "Summer", "Fall", "Winter"];
        let german_labels = ["Frühling", "Sommer", "Herbst", "Winter"];

        for ((month, day, hour, minute), expected) in BOUNDARY_CASES_2024 {
            let timestamp = dt(2024, month, day, hour, minute);
            assert_eq!(
                english.classify(timestamp).unwrap(),
                english_labels[expected],
                "{}",
                timestamp
            );
            assert_eq!(
                german.classify(timestamp).unwrap(),
                german_labels[expected],
                "{}",
                timestamp
            );
        }
    }

    #[test]
    fn test_meteorological_cutoffs() {
        let classifier = SeasonClassifier::builder()
            .mode(SeasonBoundaryMode::Meteorological)
            .build();
        assert_eq!(classifier.classify("2024-03-01").unwrap(), "Spring");
        assert_eq!(classifier.classify("2024-02-27").unwrap(), "Winter");
        assert_eq!(classifier.classify("2024-08-31 23:59").unwrap(), "Summer");
        assert_eq!(classifier.classify("2024-09-01").unwrap(), "Fall");
        assert_eq!(classifier.classify("2024-12-01").unwrap(), "Winter");
    }

    #[test]
    fn test_southern_hemisphere_swaps_seasons() {
        let classifier = SeasonClassifier::builder()
            .hemisphere(Hemisphere::South)
            .build();
        assert_eq!(classifier.classify("2024-03-23").unwrap(), "Fall");
        assert_eq!(classifier.classify("2024-06-30").unwrap(), "Winter");
        assert_eq!(classifier.classify("2024-09-24").unwrap(), "Spring");
        assert_eq!(classifier.classify("2024-12-24").unwrap(), "Summer");
    }

    #[test]
    fn test_custom_labels_are_positional() {
        let classifier = SeasonClassifier::builder()
            .labels(SeasonLabels::new(["Frühling", "Sommer", "Herbst", "Winter"]))
            .build();
        assert_eq!(classifier.classify("2024-04-10").unwrap(), "Frühling");
        assert_eq!(classifier.classify("2024-07-10").unwrap(), "Sommer");
        assert_eq!(classifier.classify("2024-10-10").unwrap(), "Herbst");
    }

    #[test]
    fn test_batch_preserves_order() {
        let classifier = SeasonClassifier::default();
        let input = [
            "2024-03-31 03:05",
            "2024-06-22",
            "2024-09-24",
            "2024-12-24",
            "2023-07-01",
        ];
        let labels = classifier.classify_all(input).unwrap();
        assert_eq!(labels, vec!["Spring", "Summer", "Fall", "Winter", "Summer"]);

        let empty: Vec<NaiveDateTime> = Vec::new();
        assert!(classifier.classify_all(empty).unwrap().is_empty());
    }

    #[test]
    fn test_batch_matches_single_classification() {
        let classifier = SeasonClassifier::builder()
            .hemisphere(Hemisphere::South)
            .build();
        let timestamps: Vec<NaiveDateTime> = (1..=12).map(|m| dt(2022, m, 20, 12, 0)).collect();
        let batch = classifier.classify_all(&timestamps).unwrap();
        for (timestamp, label) in timestamps.iter().zip(batch) {
            assert_eq!(classifier.classify(timestamp).unwrap(), label);
        }
    }

    #[test]
    fn test_aware_timestamp_is_converted_to_utc() {
        let classifier = SeasonClassifier::builder()
            .mode(SeasonBoundaryMode::Meteorological)
            .build();
        let local = chrono::FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, 1, 0, 0)
            .unwrap();
        assert_eq!(classifier.classify(local).unwrap(), "Spring");
        let utc = Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap();
        assert_eq!(classifier.classify(utc).unwrap(), "Summer");
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let classifier = SeasonClassifier::default();
        assert!(matches!(
            classifier.classify("yesterday"),
            Err(SeasonError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            classifier.classify_all(["2024-01-01", "nope"]),
            Err(SeasonError::InvalidTimestamp(_))
        ));
    }
}
