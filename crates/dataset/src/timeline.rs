//! Per-region case-count timelines.

use epicurves_calendar::{CalendarError, RefDay};

use crate::error::DatasetError;

/// One observed case count: a calendar day under the reference year,
/// its signed offset from the reference day, and the cumulative count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Calendar month of the observation (1..=12).
    pub month: u8,
    /// Day within the month.
    pub day: u8,
    /// 1-based day-of-year of the observation.
    pub day_of_year: u16,
    /// Signed day offset relative to the reference day.
    pub offset: i32,
    /// Observed cumulative case count.
    pub value: i64,
}

/// An incrementally built collection of observations for one region.
///
/// Observations are appended in file order without duplicate checking;
/// [`Timeline::finalize`] performs the batch uniqueness check and caches
/// the observation count. Ordering by offset happens on demand in
/// [`Timeline::series`].
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    observations: Vec<Observation>,
    n_days: Option<usize>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one observation for the given calendar day.
    ///
    /// Duplicates are deliberately not detected here; the whole batch is
    /// validated once in [`Timeline::finalize`].
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if `(month, day)` is not a valid date
    /// under the reference year.
    pub fn add_observation(
        &mut self,
        ref_day: RefDay,
        month: u8,
        day: u8,
        value: i64,
    ) -> Result<(), CalendarError> {
        let day_of_year = ref_day.doy_of(month, day)?;
        let offset = day_of_year as i32 - ref_day.day_of_year() as i32;
        self.observations.push(Observation {
            month,
            day,
            day_of_year,
            offset,
            value,
        });
        Ok(())
    }

    /// Number of stored observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True when no observations have been stored.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// True once [`Timeline::finalize`] has succeeded.
    pub fn is_finalized(&self) -> bool {
        self.n_days.is_some()
    }

    /// The stored observations, in insertion order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Validates day-of-year uniqueness across all stored observations
    /// and caches the observation count.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DuplicateObservation`] naming the first
    /// duplicated calendar day.
    pub(crate) fn finalize(&mut self, region: &str) -> Result<(), DatasetError> {
        let mut seen = std::collections::BTreeMap::new();
        for obs in &self.observations {
            if seen.insert(obs.day_of_year, obs).is_some() {
                return Err(DatasetError::DuplicateObservation {
                    region: region.to_string(),
                    month: obs.month,
                    day: obs.day,
                });
            }
        }
        self.n_days = Some(self.observations.len());
        Ok(())
    }

    /// Returns the observations as parallel (offset, value) sequences
    /// sorted ascending by offset, optionally restricted to days at or
    /// after `min_doy` (the project-from cutoff).
    ///
    /// Ties cannot occur after a successful finalize: day-of-year values
    /// are unique and offsets are a fixed translation of them.
    pub fn series(&self, min_doy: Option<u16>) -> (Vec<i32>, Vec<f64>) {
        let mut subset: Vec<&Observation> = self
            .observations
            .iter()
            .filter(|obs| min_doy.is_none_or(|cutoff| obs.day_of_year >= cutoff))
            .collect();
        subset.sort_by_key(|obs| obs.offset);
        let offsets = subset.iter().map(|obs| obs.offset).collect();
        let values = subset.iter().map(|obs| obs.value as f64).collect();
        (offsets, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ref_day() -> RefDay {
        RefDay::new(2020, 3, 24).unwrap()
    }

    #[test]
    fn add_observation_computes_offset() {
        let mut t = Timeline::new();
        t.add_observation(ref_day(), 3, 15, 100).unwrap();
        let obs = t.observations()[0];
        assert_eq!(obs.offset, -9);
        assert_eq!(obs.value, 100);
        assert_eq!(obs.day_of_year, 75);
    }

    #[test]
    fn add_observation_invalid_date() {
        let mut t = Timeline::new();
        assert!(matches!(
            t.add_observation(ref_day(), 2, 30, 100).unwrap_err(),
            CalendarError::InvalidDay { .. }
        ));
    }

    #[test]
    fn finalize_accepts_unique_days() {
        let mut t = Timeline::new();
        t.add_observation(ref_day(), 3, 15, 100).unwrap();
        t.add_observation(ref_day(), 3, 16, 120).unwrap();
        assert!(!t.is_finalized());
        t.finalize("Alpha").unwrap();
        assert!(t.is_finalized());
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn finalize_rejects_duplicate_days() {
        let mut t = Timeline::new();
        t.add_observation(ref_day(), 3, 15, 100).unwrap();
        t.add_observation(ref_day(), 3, 16, 120).unwrap();
        t.add_observation(ref_day(), 3, 15, 130).unwrap();
        let err = t.finalize("Alpha").unwrap_err();
        match err {
            DatasetError::DuplicateObservation { region, month, day } => {
                assert_eq!(region, "Alpha");
                assert_eq!((month, day), (3, 15));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn series_sorts_by_offset() {
        let mut t = Timeline::new();
        t.add_observation(ref_day(), 3, 20, 300).unwrap();
        t.add_observation(ref_day(), 3, 10, 50).unwrap();
        t.add_observation(ref_day(), 3, 15, 100).unwrap();
        t.finalize("Alpha").unwrap();
        let (offsets, values) = t.series(None);
        assert_eq!(offsets, vec![-14, -9, -4]);
        assert_eq!(values, vec![50.0, 100.0, 300.0]);
    }

    #[test]
    fn series_applies_min_doy_cutoff() {
        let mut t = Timeline::new();
        t.add_observation(ref_day(), 3, 10, 50).unwrap();
        t.add_observation(ref_day(), 3, 15, 100).unwrap();
        t.add_observation(ref_day(), 3, 20, 300).unwrap();
        t.finalize("Alpha").unwrap();
        let cutoff = ref_day().doy_of(3, 15).unwrap();
        let (offsets, values) = t.series(Some(cutoff));
        assert_eq!(offsets, vec![-9, -4]);
        assert_eq!(values, vec![100.0, 300.0]);
    }

    #[test]
    fn empty_timeline_finalizes() {
        let mut t = Timeline::new();
        t.finalize("Alpha").unwrap();
        assert!(t.is_finalized());
        assert!(t.is_empty());
        let (offsets, values) = t.series(None);
        assert!(offsets.is_empty());
        assert!(values.is_empty());
    }
}
