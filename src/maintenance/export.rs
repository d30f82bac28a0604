// src/maintenance/export.rs

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, SecondsFormat, Utc};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde_json::Value;

use crate::{
    common::error::AppError,
    db::{Collection, Record, Store},
};

/// Tabelas exportadas, uma aba por tabela.
pub const EXPORT_TABLES: [Collection; 8] = Collection::ALL;

/// Colunas que nunca saem na planilha.
pub const SENSITIVE_COLUMNS: &[&str] = &["password"];

/// Limite de caracteres por célula do Excel.
pub const MAX_CELL_CHARS: usize = 32_767;

/// `izimo_export_2026-10-18T12-30-00-123Z.xlsx`: ':' e '.' viram '-'.
pub fn export_filename(now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("izimo_export_{}.xlsx", stamp)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn cell(&self, row: usize, header: &str) -> Option<&Cell> {
        let col = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(col)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub path: PathBuf,
    pub exported: Vec<(String, usize)>,
    pub failed: Vec<String>,
}

// Texto que parece JSON ("{..." ou "[...") e que de fato é JSON.
fn parse_json_like(text: &str) -> Option<Value> {
    let trimmed = text.trim_start();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    serde_json::from_str(text).ok()
}

fn scalar_cell(value: &Value) -> Option<Cell> {
    match value {
        Value::Null => Some(Cell::Empty),
        Value::Bool(b) => Some(Cell::Bool(*b)),
        Value::Number(n) => Some(Cell::Number(n.as_f64().unwrap_or_default())),
        Value::String(s) => Some(Cell::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Expande um valor em colunas: objetos viram `pai.filho`, listas de
/// escalares viram texto separado por vírgula.
fn expand(key: &str, value: &Value, out: &mut Vec<(String, Cell)>) {
    match value {
        Value::String(s) => match parse_json_like(s) {
            Some(parsed) => expand(key, &parsed, out),
            None => out.push((key.to_string(), Cell::Text(s.clone()))),
        },
        Value::Object(map) if !map.is_empty() => {
            for (child, v) in map {
                expand(&format!("{}.{}", key, child), v, out);
            }
        }
        Value::Object(_) => out.push((key.to_string(), Cell::Empty)),
        Value::Array(items) => {
            let joined: Option<Vec<String>> = items.iter().map(scalar_text).collect();
            let text = match joined {
                Some(parts) => parts.join(", "),
                None => value.to_string(),
            };
            out.push((key.to_string(), Cell::Text(text)));
        }
        other => {
            if let Some(cell) = scalar_cell(other) {
                out.push((key.to_string(), cell));
            }
        }
    }
}

/// Monta a aba de uma tabela: remove colunas sensíveis e expande JSON.
/// Os cabeçalhos seguem a ordem em que as colunas aparecem.
pub fn prepare_sheet(name: &str, records: &[Record]) -> Sheet {
    let mut headers: Vec<String> = Vec::new();
    let mut expanded_rows: Vec<Vec<(String, Cell)>> = Vec::with_capacity(records.len());

    for record in records {
        let mut cells = Vec::new();
        for (key, value) in record {
            if SENSITIVE_COLUMNS.iter().any(|c| *c == key.as_str()) {
                continue;
            }
            expand(key, value, &mut cells);
        }

        for (header, _) in &cells {
            if !headers.contains(header) {
                headers.push(header.clone());
            }
        }
        expanded_rows.push(cells);
    }

    let rows = expanded_rows
        .into_iter()
        .map(|cells| {
            headers
                .iter()
                .map(|h| {
                    cells
                        .iter()
                        .find(|(k, _)| k == h)
                        .map(|(_, c)| c.clone())
                        .unwrap_or(Cell::Empty)
                })
                .collect()
        })
        .collect();

    Sheet {
        name: name.to_string(),
        headers,
        rows,
    }
}

// Corta no limite do Excel sem partir um caractere ao meio.
fn fit_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn build_worksheet(sheet: &Sheet) -> Result<Worksheet, AppError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(&sheet.name)?;

    let bold = Format::new().set_bold();
    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header.as_str(), &bold)?;
    }

    for (i, row) in sheet.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let c = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    let text = fit_cell(s);
                    if text.len() < s.len() {
                        tracing::warn!(
                            "Célula truncada em {} (linha {}, coluna {}): {} caracteres",
                            sheet.name,
                            r,
                            sheet.headers.get(col).map(String::as_str).unwrap_or_default(),
                            s.chars().count()
                        );
                    }
                    worksheet.write_string(r, c, text)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, c, *n)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
            }
        }
    }

    Ok(worksheet)
}

/// Exporta todas as tabelas para `dir/izimo_export_<stamp>.xlsx`.
/// Uma tabela com erro é registrada no log e pulada; as outras seguem.
pub async fn export_all(
    store: Arc<dyn Store>,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<ExportReport, AppError> {
    let mut workbook = Workbook::new();
    let mut report = ExportReport {
        path: dir.join(export_filename(now)),
        ..Default::default()
    };

    for table in EXPORT_TABLES {
        let name = table.as_str();

        let records = match store.get_all(table).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("❌ Falha ao ler a tabela {}: {}", name, e);
                report.failed.push(name.to_string());
                continue;
            }
        };

        let sheet = prepare_sheet(name, &records);
        match build_worksheet(&sheet) {
            Ok(worksheet) => {
                workbook.push_worksheet(worksheet);
                tracing::info!("✅ {}: {} linha(s) exportada(s)", name, sheet.rows.len());
                report.exported.push((name.to_string(), sheet.rows.len()));
            }
            Err(e) => {
                tracing::error!("❌ Falha ao montar a aba {}: {}", name, e);
                report.failed.push(name.to_string());
            }
        }
    }

    workbook.save(&report.path)?;
    tracing::info!("📦 Exportação gravada em {}", report.path.display());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("esperava um objeto"),
        }
    }

    #[test]
    fn filename_replaces_colons_and_dots() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 30, 5).unwrap();
        assert_eq!(export_filename(now), "izimo_export_2026-10-18T12-30-05-000Z.xlsx");
    }

    #[test]
    fn password_column_is_stripped() {
        let rows = vec![record(json!({
            "id": "u1",
            "email": "marie@example.fr",
            "password": "$2b$12$secret",
        }))];

        let sheet = prepare_sheet("users", &rows);
        assert!(!sheet.headers.iter().any(|h| h == "password"));
        assert_eq!(sheet.cell(0, "email"), Some(&Cell::Text("marie@example.fr".into())));
    }

    #[test]
    fn json_strings_are_expanded() {
        let rows = vec![record(json!({
            "id": "p1",
            "photos": "[\"a.jpg\",\"b.jpg\"]",
            "tenantCriteria": "{\"petsAllowed\":true,\"minIncome\":2400}",
            "furnished": 1,
            "description": "{pas du json",
        }))];

        let sheet = prepare_sheet("properties", &rows);
        assert_eq!(sheet.cell(0, "photos"), Some(&Cell::Text("a.jpg, b.jpg".into())));
        assert_eq!(sheet.cell(0, "tenantCriteria.petsAllowed"), Some(&Cell::Bool(true)));
        assert_eq!(sheet.cell(0, "tenantCriteria.minIncome"), Some(&Cell::Number(2400.0)));
        assert_eq!(sheet.cell(0, "furnished"), Some(&Cell::Number(1.0)));
        assert_eq!(sheet.cell(0, "description"), Some(&Cell::Text("{pas du json".into())));
    }

    #[test]
    fn rows_with_different_columns_share_headers() {
        let rows = vec![
            record(json!({"id": "a", "link": "/x"})),
            record(json!({"id": "b", "title": "t"})),
        ];
        let sheet = prepare_sheet("notifications", &rows);

        assert_eq!(sheet.headers, vec!["id", "link", "title"]);
        assert_eq!(sheet.cell(1, "link"), Some(&Cell::Empty));
        assert_eq!(sheet.cell(1, "title"), Some(&Cell::Text("t".into())));
    }

    #[test]
    fn oversized_text_is_truncated_instead_of_failing_the_sheet() {
        let long = "é".repeat(40_000);
        let rows = vec![
            record(json!({"id": "m1", "content": long.clone()})),
            record(json!({"id": "m2", "content": "Bonjour"})),
        ];
        let sheet = prepare_sheet("messages", &rows);

        assert_eq!(fit_cell(&long).chars().count(), MAX_CELL_CHARS);
        assert_eq!(fit_cell("Bonjour"), "Bonjour");
        assert!(build_worksheet(&sheet).is_ok());
    }
}
