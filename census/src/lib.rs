use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a raw metric string such as `"12,345/km²"` could not be read.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MetricParseError {
    #[error("{0:?} has no '/' separating the value from its unit")]
    MissingUnit(String),
    #[error("{0:?} is not a non-negative integer")]
    NotNumeric(String),
    #[error("{0:?} does not fit in 64 bits")]
    Overflow(String),
}

/// Reads the integer before the first `/`, dropping thousands separators.
///
/// `"12,345/km²"` gives `12345`. The unit itself is not inspected.
pub fn parse_metric(raw: &str) -> Result<u64, MetricParseError> {
    let (value, _unit) = raw
        .split_once('/')
        .ok_or_else(|| MetricParseError::MissingUnit(raw.to_string()))?;
    let digits: String = value.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MetricParseError::NotNumeric(value.to_string()));
    }
    digits
        .parse()
        .map_err(|_| MetricParseError::Overflow(value.to_string()))
}

/// One census row attributing a metric to a region by its display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub name: String,
    pub raw_metric: String,
    pub metric: u64,
    // Every other column of the row, untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl MetricRecord {
    pub fn new(
        name: impl Into<String>,
        raw_metric: impl Into<String>,
    ) -> Result<Self, MetricParseError> {
        let raw_metric = raw_metric.into();
        let metric = parse_metric(&raw_metric)?;
        Ok(Self {
            name: name.into(),
            raw_metric,
            metric,
            extra: BTreeMap::new(),
        })
    }

    pub fn with_extra(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(column.into(), value.into());
        self
    }
}

/// A metric record resolved to the code of its boundary region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub region_id: String,
    #[serde(flatten)]
    pub record: MetricRecord,
}

impl JoinedRecord {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn metric(&self) -> u64 {
        self.record.metric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_with_separators() {
        assert_eq!(parse_metric("12,345/km²"), Ok(12345));
        assert_eq!(parse_metric("1,102/km2"), Ok(1102));
        assert_eq!(parse_metric("365/km²"), Ok(365));
        assert_eq!(parse_metric(" 9 /mi²"), Ok(9));
    }

    #[test]
    fn only_first_slash_splits() {
        assert_eq!(parse_metric("1,000/km²/yr"), Ok(1000));
    }

    #[test]
    fn missing_unit() {
        assert_eq!(
            parse_metric("12,345"),
            Err(MetricParseError::MissingUnit("12,345".to_string()))
        );
    }

    #[test]
    fn non_numeric_prefix() {
        assert!(matches!(parse_metric("n/a"), Err(MetricParseError::NotNumeric(_))));
        assert!(matches!(parse_metric("/km²"), Err(MetricParseError::NotNumeric(_))));
        assert!(matches!(parse_metric("-5/km²"), Err(MetricParseError::NotNumeric(_))));
        assert!(matches!(parse_metric("1.5/km²"), Err(MetricParseError::NotNumeric(_))));
    }

    #[test]
    fn overflow() {
        assert!(matches!(
            parse_metric("99,999,999,999,999,999,999/km²"),
            Err(MetricParseError::Overflow(_))
        ));
    }

    #[test]
    fn record_keeps_raw_and_extra_columns() {
        let record = MetricRecord::new("Kerala", "860/km²")
            .unwrap()
            .with_extra("Population", "33,406,061");
        let joined = JoinedRecord {
            region_id: "KL".to_string(),
            record,
        };
        assert_eq!(joined.name(), "Kerala");
        assert_eq!(joined.metric(), 860);
        assert_eq!(joined.record.raw_metric, "860/km²");
        assert_eq!(joined.record.extra["Population"], "33,406,061");
    }
}
