//! Per-region configuration and timeline records.

use epicurves_calendar::RefDay;

use crate::error::DatasetError;
use crate::field::{FieldType, FieldValue};
use crate::timeline::Timeline;

/// The recognized configuration vocabulary: canonical field name and the
/// suffix-declared type the input must use for it. A known name written
/// with a different suffix is treated as unknown, matching the schema as
/// the input file spells it.
pub const RECOGNIZED_FIELDS: &[(&str, FieldType)] = &[
    ("county_name", FieldType::String),
    ("shortname", FieldType::String),
    ("icu_total", FieldType::Integer),
    ("icu_open", FieldType::Integer),
    ("icu_fraction", FieldType::Float),
    ("hosp_fraction", FieldType::Float),
    ("staffed_beds", FieldType::Integer),
    ("ventilators", FieldType::Integer),
    ("icu_open_hi", FieldType::Float),
    ("icu_open_lo", FieldType::Float),
    ("lockdown", FieldType::DatePair),
    ("project_from", FieldType::DatePair),
    ("project_ndays", FieldType::Integer),
    ("drawplot0", FieldType::Integer),
    ("drawplot1", FieldType::Integer),
    ("drawplot2", FieldType::Integer),
    ("drawplot3", FieldType::Integer),
];

/// One region's capacity configuration plus its case timeline.
///
/// Every configuration field is an explicit `Option` set at most once
/// during the load; nothing is assigned dynamically. Fields a chart
/// needs but a region never supplied surface as missing-configuration
/// errors at render time, not load time.
#[derive(Debug, Clone, Default)]
pub struct RegionRecord {
    /// Header-cell text for this region's column, used for diagnostics
    /// when `county_name` has not been assigned yet.
    label: String,
    /// 1-based sheet column this region occupies.
    column: usize,

    county_name: Option<String>,
    shortname: Option<String>,
    icu_total: Option<i64>,
    icu_open: Option<i64>,
    icu_fraction: Option<f64>,
    hosp_fraction: Option<f64>,
    staffed_beds: Option<i64>,
    ventilators: Option<i64>,
    icu_open_hi: Option<f64>,
    icu_open_lo: Option<f64>,
    lockdown: Option<(u8, u8)>,
    project_from: Option<(u8, u8)>,
    project_ndays: Option<i64>,
    draw_flags: [Option<bool>; 4],

    timeline: Timeline,
}

impl RegionRecord {
    /// Creates an empty record for the region in the given sheet column.
    pub fn new(label: impl Into<String>, column: usize) -> Self {
        Self {
            label: label.into(),
            column,
            ..Self::default()
        }
    }

    /// Routes one non-blank cell into this record.
    ///
    /// `date_row` carries the parsed `(month, day)` when the row label is
    /// a date specifier; the cell is then a case count appended to the
    /// timeline. Otherwise the row label names a configuration field and
    /// the cell is parsed per its suffix-declared type.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::FieldType`] when the cell does not convert,
    /// [`DatasetError::UnknownField`] when the field name is outside the
    /// recognized set, [`DatasetError::DuplicateField`] on a second
    /// assignment, and [`DatasetError::InvalidDate`] when a timeline row's
    /// date does not exist under the reference year.
    pub fn assign(
        &mut self,
        date_row: Option<(u8, u8)>,
        ref_day: RefDay,
        row: usize,
        col: usize,
        field_name: &str,
        raw_value: &str,
    ) -> Result<(), DatasetError> {
        match date_row {
            Some((month, day)) => self.assign_case(ref_day, row, col, month, day, raw_value),
            None => self.assign_config(row, col, field_name, raw_value),
        }
    }

    fn assign_case(
        &mut self,
        ref_day: RefDay,
        row: usize,
        col: usize,
        month: u8,
        day: u8,
        raw_value: &str,
    ) -> Result<(), DatasetError> {
        let value = raw_value
            .parse::<i64>()
            .map_err(|_| DatasetError::FieldType {
                row,
                col,
                expected: FieldType::Integer.type_name(),
                value: raw_value.to_string(),
            })?;
        self.timeline
            .add_observation(ref_day, month, day, value)
            .map_err(|e| DatasetError::InvalidDate {
                row,
                reason: e.to_string(),
            })
    }

    fn assign_config(
        &mut self,
        row: usize,
        col: usize,
        field_name: &str,
        raw_value: &str,
    ) -> Result<(), DatasetError> {
        let (declared, canonical) = FieldType::split_suffix(field_name);
        let expected = RECOGNIZED_FIELDS
            .iter()
            .find(|(name, _)| *name == canonical)
            .map(|(_, ty)| *ty);
        if expected != Some(declared) {
            return Err(DatasetError::UnknownField {
                row,
                field: field_name.to_string(),
            });
        }

        let value = declared
            .parse(raw_value)
            .ok_or_else(|| DatasetError::FieldType {
                row,
                col,
                expected: declared.type_name(),
                value: raw_value.to_string(),
            })?;
        self.store(row, field_name, canonical, value)
    }

    /// Writes a parsed value into its typed slot, rejecting a second
    /// assignment of the same field.
    fn store(
        &mut self,
        row: usize,
        field_name: &str,
        canonical: &str,
        value: FieldValue,
    ) -> Result<(), DatasetError> {
        let duplicate = DatasetError::DuplicateField {
            row,
            field: field_name.to_string(),
        };
        match (canonical, value) {
            ("county_name", FieldValue::String(v)) => {
                if self.county_name.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("shortname", FieldValue::String(v)) => {
                if self.shortname.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("icu_total", FieldValue::Integer(v)) => {
                if self.icu_total.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("icu_open", FieldValue::Integer(v)) => {
                if self.icu_open.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("icu_fraction", FieldValue::Float(v)) => {
                if self.icu_fraction.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("hosp_fraction", FieldValue::Float(v)) => {
                if self.hosp_fraction.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("staffed_beds", FieldValue::Integer(v)) => {
                if self.staffed_beds.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("ventilators", FieldValue::Integer(v)) => {
                if self.ventilators.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("icu_open_hi", FieldValue::Float(v)) => {
                if self.icu_open_hi.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("icu_open_lo", FieldValue::Float(v)) => {
                if self.icu_open_lo.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            ("lockdown", FieldValue::DatePair(m, d)) => {
                if self.lockdown.replace((m, d)).is_some() {
                    return Err(duplicate);
                }
            }
            ("project_from", FieldValue::DatePair(m, d)) => {
                if self.project_from.replace((m, d)).is_some() {
                    return Err(duplicate);
                }
            }
            ("project_ndays", FieldValue::Integer(v)) => {
                if self.project_ndays.replace(v).is_some() {
                    return Err(duplicate);
                }
            }
            (name, FieldValue::Integer(v)) if name.starts_with("drawplot") => {
                // name is one of drawplot0..drawplot3 per the recognized table.
                let idx = (name.as_bytes()[name.len() - 1] - b'0') as usize;
                if self.draw_flags[idx].replace(v != 0).is_some() {
                    return Err(duplicate);
                }
            }
            _ => unreachable!("recognized table and parse agree on types"),
        }
        Ok(())
    }

    /// Finalizes the record: validates timeline uniqueness.
    pub fn finalize(&mut self) -> Result<(), DatasetError> {
        let name = self.display_name().to_string();
        self.timeline.finalize(&name)
    }

    /// The best available human-readable name: `county_name` when
    /// assigned, else the header-cell label, else the sheet column.
    pub fn display_name(&self) -> &str {
        if let Some(name) = &self.county_name {
            name
        } else if !self.label.is_empty() {
            &self.label
        } else {
            "unnamed region"
        }
    }

    /// 1-based sheet column this region occupies.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Whether the drawplot flag for chart `idx` (0..=3) is set and truthy.
    pub fn draws_chart(&self, idx: usize) -> bool {
        self.draw_flags.get(idx).copied().flatten().unwrap_or(false)
    }

    /// The region's case timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Full region name, when configured.
    pub fn county_name(&self) -> Option<&str> {
        self.county_name.as_deref()
    }

    /// Short label used for on-chart annotation, when configured.
    pub fn shortname(&self) -> Option<&str> {
        self.shortname.as_deref()
    }

    /// Total ICU beds, when configured.
    pub fn icu_total(&self) -> Option<i64> {
        self.icu_total
    }

    /// Typically open ICU beds, when configured.
    pub fn icu_open(&self) -> Option<i64> {
        self.icu_open
    }

    /// Fraction of cases expected to need ICU care, when configured.
    pub fn icu_fraction(&self) -> Option<f64> {
        self.icu_fraction
    }

    /// Fraction of cases expected to need hospitalisation, when configured.
    pub fn hosp_fraction(&self) -> Option<f64> {
        self.hosp_fraction
    }

    /// Staffed hospital beds, when configured.
    pub fn staffed_beds(&self) -> Option<i64> {
        self.staffed_beds
    }

    /// Ventilator count, when configured.
    pub fn ventilators(&self) -> Option<i64> {
        self.ventilators
    }

    /// High estimate of the open-ICU share of ventilators, when configured.
    pub fn icu_open_hi(&self) -> Option<f64> {
        self.icu_open_hi
    }

    /// Low estimate of the open-ICU share of ventilators, when configured.
    pub fn icu_open_lo(&self) -> Option<f64> {
        self.icu_open_lo
    }

    /// Lockdown date as a `(month, day)` pair, when configured.
    pub fn lockdown(&self) -> Option<(u8, u8)> {
        self.lockdown
    }

    /// Earliest date included in the extrapolation fit, when configured.
    pub fn project_from(&self) -> Option<(u8, u8)> {
        self.project_from
    }

    /// Projection horizon in days, when configured.
    pub fn project_ndays(&self) -> Option<i64> {
        self.project_ndays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ref_day() -> RefDay {
        RefDay::new(2020, 3, 24).unwrap()
    }

    fn region() -> RegionRecord {
        RegionRecord::new("col B", 2)
    }

    #[test]
    fn assign_recognized_config_fields() {
        let mut r = region();
        r.assign(None, ref_day(), 2, 2, "county_name", "Alpha County")
            .unwrap();
        r.assign(None, ref_day(), 3, 2, "icu_fraction##", "0.25")
            .unwrap();
        r.assign(None, ref_day(), 4, 2, "staffed_beds#", "1500")
            .unwrap();
        r.assign(None, ref_day(), 5, 2, "lockdown^", "3--17").unwrap();
        r.assign(None, ref_day(), 6, 2, "drawplot2#", "1").unwrap();

        assert_eq!(r.county_name(), Some("Alpha County"));
        assert_eq!(r.icu_fraction(), Some(0.25));
        assert_eq!(r.staffed_beds(), Some(1500));
        assert_eq!(r.lockdown(), Some((3, 17)));
        assert!(r.draws_chart(2));
        assert!(!r.draws_chart(0));
    }

    #[test]
    fn assign_unknown_field() {
        let mut r = region();
        let err = r
            .assign(None, ref_day(), 7, 2, "bogus_field#", "3")
            .unwrap_err();
        match err {
            DatasetError::UnknownField { row, field } => {
                assert_eq!(row, 7);
                assert_eq!(field, "bogus_field#");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn assign_known_name_with_wrong_suffix_is_unknown() {
        let mut r = region();
        assert!(matches!(
            r.assign(None, ref_day(), 3, 2, "icu_total##", "5")
                .unwrap_err(),
            DatasetError::UnknownField { .. }
        ));
        assert!(matches!(
            r.assign(None, ref_day(), 3, 2, "icu_fraction", "0.3")
                .unwrap_err(),
            DatasetError::UnknownField { .. }
        ));
    }

    #[test]
    fn assign_duplicate_field() {
        let mut r = region();
        r.assign(None, ref_day(), 2, 2, "shortname", "AL").unwrap();
        let err = r
            .assign(None, ref_day(), 8, 2, "shortname", "AL2")
            .unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateField { row: 8, .. }));
    }

    #[test]
    fn assign_type_mismatch_reports_context() {
        let mut r = region();
        let err = r
            .assign(None, ref_day(), 4, 3, "icu_fraction##", "lots")
            .unwrap_err();
        match err {
            DatasetError::FieldType {
                row,
                col,
                expected,
                value,
            } => {
                assert_eq!((row, col), (4, 3));
                assert_eq!(expected, "a number");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn assign_case_rows() {
        let mut r = region();
        r.assign(Some((3, 15)), ref_day(), 10, 2, "3--15", "100")
            .unwrap();
        r.assign(Some((3, 20)), ref_day(), 11, 2, "3--20", "300")
            .unwrap();
        r.finalize().unwrap();
        assert_eq!(r.timeline().len(), 2);
    }

    #[test]
    fn assign_case_row_non_integer_count() {
        let mut r = region();
        let err = r
            .assign(Some((3, 15)), ref_day(), 10, 4, "3--15", "many")
            .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::FieldType {
                row: 10,
                col: 4,
                expected: "an integer",
                ..
            }
        ));
    }

    #[test]
    fn assign_case_row_invalid_date() {
        let mut r = region();
        let err = r
            .assign(Some((2, 30)), ref_day(), 10, 2, "2--30", "100")
            .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidDate { row: 10, .. }));
    }

    #[test]
    fn drawplot_zero_is_falsy() {
        let mut r = region();
        r.assign(None, ref_day(), 2, 2, "drawplot0#", "0").unwrap();
        r.assign(None, ref_day(), 3, 2, "drawplot1#", "1").unwrap();
        assert!(!r.draws_chart(0));
        assert!(r.draws_chart(1));
    }

    #[test]
    fn display_name_prefers_county_name() {
        let mut r = RegionRecord::new("header text", 2);
        assert_eq!(r.display_name(), "header text");
        r.assign(None, ref_day(), 2, 2, "county_name", "Alpha")
            .unwrap();
        assert_eq!(r.display_name(), "Alpha");
        let unnamed = RegionRecord::new("", 3);
        assert_eq!(unnamed.display_name(), "unnamed region");
    }
}
