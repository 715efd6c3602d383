//! Чтение и запись CSV

use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::types::{Column, ColumnData, Dataset};

const MISSING_TOKENS: [&str; 3] = ["na", "nan", "null"];

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || MISSING_TOKENS.iter().any(|t| cell.eq_ignore_ascii_case(t))
}

/// Загрузка CSV с заголовком.
///
/// Колонка считается числовой, если каждая непустая ячейка парсится как `f64`;
/// иначе колонка текстовая.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(AnalysisError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (idx, cells) in raw.iter_mut().enumerate() {
            let cell = record.get(idx).unwrap_or("");
            cells.push(if is_missing(cell) {
                None
            } else {
                Some(cell.trim().to_string())
            });
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| Column { name, data: infer_column(cells) })
        .collect();

    let dataset = Dataset::new(columns)?;
    tracing::debug!(
        "Loaded {} rows x {} columns from {}",
        dataset.n_rows(),
        dataset.n_cols(),
        path.display()
    );
    Ok(dataset)
}

fn infer_column(cells: Vec<Option<String>>) -> ColumnData {
    let parsed: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(s) => s.parse::<f64>().ok().map(Some),
        })
        .collect();

    match parsed {
        Some(values) => ColumnData::Numeric(values),
        None => ColumnData::Text(cells),
    }
}

/// Запись таблицы в CSV: заголовок есть, индекса нет
pub fn save_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(dataset.column_names())?;

    for row in 0..dataset.n_rows() {
        let record: Vec<String> = dataset
            .columns()
            .iter()
            .map(|c| match &c.data {
                ColumnData::Numeric(values) => values[row].map(format_number).unwrap_or_default(),
                ColumnData::Text(values) => values[row].clone().unwrap_or_default(),
            })
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn infers_numeric_and_text_columns() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "name,MDVP:Fo(Hz),status").unwrap();
        writeln!(tmp, "phon_R01_S01_1,119.992,1").unwrap();
        writeln!(tmp, "phon_R01_S01_2,,0").unwrap();
        writeln!(tmp, "phon_R01_S01_3,NaN,1").unwrap();
        tmp.flush().unwrap();

        let ds = load_csv(tmp.path()).unwrap();
        assert_eq!(ds.n_rows(), 3);
        assert!(matches!(ds.column("name").unwrap().data, ColumnData::Text(_)));
        assert_eq!(ds.numeric("MDVP:Fo(Hz)").unwrap(), &[Some(119.992), None, None]);
        assert_eq!(ds.numeric("status").unwrap(), &[Some(1.0), Some(0.0), Some(1.0)]);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, AnalysisError::NotFound(_)));
    }

    #[test]
    fn writes_headers_without_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let ds = Dataset::new(vec![
            Column::text("name", vec![Some("a".to_string()), None]),
            Column::numeric("x", vec![Some(0.5), Some(2.0)]),
        ])
        .unwrap();

        save_csv(&ds, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "name,x\na,0.5\n,2\n");

        let reloaded = load_csv(&path).unwrap();
        assert_eq!(reloaded.numeric("x").unwrap(), &[Some(0.5), Some(2.0)]);
    }

    #[test]
    fn only_listed_tokens_mark_missing() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "x,label").unwrap();
        writeln!(tmp, "NA,none").unwrap();
        writeln!(tmp, "null,yes").unwrap();
        writeln!(tmp, "1.5,None").unwrap();
        tmp.flush().unwrap();

        let ds = load_csv(tmp.path()).unwrap();
        assert_eq!(ds.numeric("x").unwrap(), &[None, None, Some(1.5)]);
        match &ds.column("label").unwrap().data {
            ColumnData::Text(values) => assert_eq!(
                values,
                &vec![Some("none".to_string()), Some("yes".to_string()), Some("None".to_string())]
            ),
            other => panic!("expected text column, got {:?}", other),
        }
    }
}
