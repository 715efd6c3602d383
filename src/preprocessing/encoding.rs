//! Кодирование категориальных колонок

use std::collections::BTreeSet;

use crate::error::Result;
use crate::types::{ColumnData, Dataset};

/// Текстовые колонки заменяются кодами категорий (0..k) в лексикографическом
/// порядке значений. Числовые колонки не меняются.
pub fn encode_categorical_columns<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> Result<Dataset> {
    let mut encoded = dataset.clone();

    for column in columns {
        let name = column.as_ref();
        let values = match &dataset.column(name)?.data {
            ColumnData::Text(values) => values,
            ColumnData::Numeric(_) => continue,
        };

        let categories: BTreeSet<&str> = values.iter().flatten().map(String::as_str).collect();
        let codes: Vec<Option<f64>> = values
            .iter()
            .map(|v| {
                v.as_deref()
                    .and_then(|s| categories.iter().position(|c| *c == s))
                    .map(|code| code as f64)
            })
            .collect();

        tracing::debug!("Encoded '{}' into {} categories", name, categories.len());
        encoded.replace_column(name, ColumnData::Numeric(codes))?;
    }

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    fn text(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn codes_follow_sorted_categories() {
        let ds = Dataset::new(vec![
            Column::text("A", text(&["cat", "dog", "fish"])),
            Column::text("B", text(&["red", "blue", "green"])),
        ])
        .unwrap();

        let encoded = encode_categorical_columns(&ds, &["A", "B"]).unwrap();
        assert_eq!(encoded.numeric_values("A").unwrap(), vec![0.0, 1.0, 2.0]);
        assert_eq!(encoded.numeric_values("B").unwrap(), vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn numeric_columns_untouched() {
        let ds = Dataset::from_numeric(&[("A", vec![1.0, 2.0, 3.0]), ("B", vec![4.0, 5.0, 6.0])]).unwrap();
        let encoded = encode_categorical_columns(&ds, &["A", "B"]).unwrap();
        assert_eq!(encoded, ds);
    }
}
