use std::fmt;

use census::MetricParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed geometry: {}", list(.0))]
    MalformedGeometry(Vec<GeometryIssue>),

    #[error("malformed row: {}", list(.0))]
    MalformedRow(Vec<RowIssue>),

    #[error("unresolved region: {}", .0.join(", "))]
    UnresolvedRegion(Vec<String>),

    #[error("census table has no column {0:?}")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("boundary document is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;

fn list<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A boundary feature that cannot become a region. `feature` is its index in
/// the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryIssue {
    pub feature: usize,
    pub problem: GeometryProblem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryProblem {
    MissingProperty(String),
    InvalidProperty(String),
    DuplicateCode(String),
    DuplicateName(String),
}

impl fmt::Display for GeometryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feature {}: ", self.feature)?;
        match &self.problem {
            GeometryProblem::MissingProperty(key) => write!(f, "missing property {key:?}"),
            GeometryProblem::InvalidProperty(key) => {
                write!(f, "property {key:?} is not a string or number")
            }
            GeometryProblem::DuplicateCode(code) => write!(f, "duplicate region code {code:?}"),
            GeometryProblem::DuplicateName(name) => write!(f, "duplicate region name {name:?}"),
        }
    }
}

/// A census row whose name or metric cell is unusable. Rows count from 1,
/// excluding the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub row: usize,
    pub problem: RowProblem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowProblem {
    MissingName,
    MissingMetric,
    Metric(MetricParseError),
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: ", self.row)?;
        match &self.problem {
            RowProblem::MissingName => write!(f, "empty region name"),
            RowProblem::MissingMetric => write!(f, "empty metric"),
            RowProblem::Metric(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregated_messages_list_every_record() {
        let err = Error::UnresolvedRegion(vec!["Atlantis".into(), "Lemuria".into()]);
        assert_eq!(err.to_string(), "unresolved region: Atlantis, Lemuria");

        let err = Error::MalformedRow(vec![
            RowIssue {
                row: 2,
                problem: RowProblem::MissingMetric,
            },
            RowIssue {
                row: 5,
                problem: RowProblem::Metric(MetricParseError::MissingUnit("12".into())),
            },
        ]);
        let message = err.to_string();
        assert!(message.contains("row 2: empty metric"));
        assert!(message.contains("row 5: \"12\" has no '/'"));
    }
}
