use std::collections::BTreeMap;
use std::io::Cursor;

use census::{parse_metric, MetricRecord};
use polars::prelude::*;
use tracing::debug;

use crate::error::{Error, Result, RowIssue, RowProblem};
use crate::schema::Schema;

/// Reads a census CSV with a header row. Every column is read as a string.
pub fn read_census(data: Vec<u8>) -> Result<DataFrame> {
    Ok(CsvReader::new(Cursor::new(data))
        .has_header(true)
        .infer_schema(Some(0))
        .finish()?)
}

fn string_column(df: &DataFrame, name: &str) -> Result<Series> {
    let series = df
        .column(name)
        .map_err(|_| Error::MissingColumn(name.to_string()))?;
    Ok(series.cast(&DataType::String)?)
}

/// Turns census rows into metric records, parsing the schema's metric column.
///
/// Every unusable row is collected into a single `MalformedRow` error.
pub fn load_metrics(df: &DataFrame, schema: &Schema) -> Result<Vec<MetricRecord>> {
    let names = string_column(df, &schema.name_column)?;
    let metrics = string_column(df, &schema.metric_column)?;
    let others = df
        .get_column_names()
        .into_iter()
        .filter(|c| *c != schema.name_column && *c != schema.metric_column)
        .map(|c| -> Result<(String, Series)> { Ok((c.to_string(), string_column(df, c)?)) })
        .collect::<Result<Vec<_>>>()?;

    let names = names.str()?;
    let metrics = metrics.str()?;
    let others = others
        .iter()
        .map(|(column, series)| -> Result<(&String, &StringChunked)> {
            Ok((column, series.str()?))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::with_capacity(df.height());
    let mut issues = Vec::new();
    for (index, (name, raw)) in names.into_iter().zip(metrics.into_iter()).enumerate() {
        let row = index + 1;
        let name = match name {
            Some(name) if !name.trim().is_empty() => Some(name),
            _ => {
                issues.push(RowIssue {
                    row,
                    problem: RowProblem::MissingName,
                });
                None
            }
        };
        let metric = match raw {
            Some(raw) if !raw.trim().is_empty() => parse_metric(raw)
                .map(|metric| (raw, metric))
                .map_err(|e| RowIssue {
                    row,
                    problem: RowProblem::Metric(e),
                }),
            _ => Err(RowIssue {
                row,
                problem: RowProblem::MissingMetric,
            }),
        };
        match (name, metric) {
            (Some(name), Ok((raw, metric))) => {
                let mut extra = BTreeMap::new();
                for (column, values) in &others {
                    if let Some(value) = values.get(index) {
                        extra.insert(column.to_string(), value.to_string());
                    }
                }
                records.push(MetricRecord {
                    name: name.to_string(),
                    raw_metric: raw.to_string(),
                    metric,
                    extra,
                });
            }
            (_, Err(issue)) => issues.push(issue),
            (None, Ok(_)) => {}
        }
    }

    if !issues.is_empty() {
        return Err(Error::MalformedRow(issues));
    }
    debug!("Loaded {} metric records", records.len());
    Ok(records)
}

/// Reads a census CSV document, then loads its metric records.
pub fn parse_metrics(data: Vec<u8>, schema: &Schema) -> Result<Vec<MetricRecord>> {
    load_metrics(&read_census(data)?, schema)
}
