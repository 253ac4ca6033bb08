//! Computing entity field values from dataset rows

use serde_json::{Number, Value};

use crate::catalog::{Catalog, CatalogError};
use crate::filters::Row;

use super::config::{ExtractorAggregation, ValueExtractor, ValuePickerRule};

/// Compute a field value from the dataset rows that belong to one entity.
///
/// Returns `Ok(None)` for manual fields and when no row has a usable value.
/// Fails only when the extractor points at a dataset or column the catalog
/// does not know.
pub fn extract_field_value<R: Row>(
    catalog: &Catalog,
    extractor: &ValueExtractor,
    rows: &[R],
) -> Result<Option<Value>, CatalogError> {
    let Some((dataset_id, column_id)) = extractor.source_column() else {
        return Ok(None);
    };
    let column = catalog.require_column(dataset_id, column_id)?;
    let values = rows
        .iter()
        .filter_map(|row| row.field(&column.name))
        .filter(|v| !v.is_null());

    let value = match extractor {
        ValueExtractor::Manual => None,
        ValueExtractor::DatasetColumnValue { value_picker_rule, .. } => match value_picker_rule {
            ValuePickerRule::First => values.into_iter().next().cloned(),
            ValuePickerRule::MostFrequent => most_frequent(values),
        },
        ValueExtractor::Aggregation { aggregation, .. } => match aggregation {
            ExtractorAggregation::Count => Some(Value::from(values.count())),
            ExtractorAggregation::Sum => {
                let mut numbers = values.filter_map(Value::as_f64).peekable();
                if numbers.peek().is_none() {
                    None
                } else {
                    float_value(numbers.sum())
                }
            }
            ExtractorAggregation::Max => values
                .filter_map(Value::as_f64)
                .fold(None, |max: Option<f64>, n| Some(max.map_or(n, |m| m.max(n))))
                .and_then(float_value),
        },
    };
    Ok(value)
}

fn most_frequent<'a>(values: impl Iterator<Item = &'a Value>) -> Option<Value> {
    let mut counts: Vec<(&Value, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    // max_by_key returns the last maximum; scan manually so the earliest wins
    let mut best: Option<(&Value, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.clone())
}

fn float_value(n: f64) -> Option<Value> {
    Number::from_f64(n).map(Value::Number)
}
