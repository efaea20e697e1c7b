use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::input::{InputError, is_missing, open_maybe_gz};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// First header cell names the row key; remaining cells are columns.
    FirstColumn,
    /// Every header cell is a column; rows carry no separate key.
    Unkeyed,
}

/// Tab-separated table held fully in memory. Cells are kept as raw strings;
/// absent trailing cells are stored as empty strings.
#[derive(Debug, Clone)]
pub struct ClinicalTable {
    pub key_name: Option<String>,
    pub keys: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl ClinicalTable {
    pub fn new(
        key_name: Option<String>,
        keys: Vec<String>,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        let mut index = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            index.entry(name.clone()).or_insert(idx);
        }
        Self {
            key_name,
            keys,
            columns,
            rows,
            index,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).map(String::as_str).unwrap_or("")
    }

    pub fn key(&self, row: usize) -> &str {
        self.keys.get(row).map(String::as_str).unwrap_or("")
    }

    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &str> + '_ {
        (0..self.rows.len()).map(move |row| self.cell(row, col))
    }

    pub fn non_empty_count(&self, name: &str) -> Option<usize> {
        let col = self.column_index(name)?;
        Some(self.column_values(col).filter(|v| !is_missing(v)).count())
    }

    /// Keeps rows whose mask entry is true, preserving order.
    pub fn select_rows(&self, mask: &[bool]) -> ClinicalTable {
        let mut keys = Vec::new();
        let mut rows = Vec::new();
        for (row, keep) in mask.iter().enumerate() {
            if !*keep || row >= self.rows.len() {
                continue;
            }
            if !self.keys.is_empty() {
                keys.push(self.keys[row].clone());
            }
            rows.push(self.rows[row].clone());
        }
        ClinicalTable::new(self.key_name.clone(), keys, self.columns.clone(), rows)
    }
}

pub fn load_table(path: &Path, key_mode: KeyMode) -> Result<ClinicalTable, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();

    let read = reader.read_line(&mut buf)?;
    if read == 0 {
        return Err(InputError::Parse(format!(
            "{} is empty (header row required)",
            path.display()
        )));
    }
    let header: Vec<String> = strip_eol(&buf)
        .split('\t')
        .map(|s| s.trim().to_string())
        .collect();

    let (key_name, columns) = match key_mode {
        KeyMode::FirstColumn => {
            if header.len() < 2 {
                return Err(InputError::Parse(
                    "header must contain a row key and at least one column".to_string(),
                ));
            }
            (Some(header[0].clone()), header[1..].to_vec())
        }
        KeyMode::Unkeyed => (None, header),
    };
    let width = columns.len() + usize::from(key_mode == KeyMode::FirstColumn);

    let mut keys = Vec::new();
    let mut rows = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut line_no = 1usize;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = strip_eol(&buf);
        if line.trim().is_empty() {
            continue;
        }
        let mut fields: Vec<&str> = line.split('\t').collect();
        if fields.len() > width {
            return Err(InputError::Parse(format!(
                "line {} has {} fields, header has {}",
                line_no,
                fields.len(),
                width
            )));
        }
        fields.resize(width, "");

        let cells = match key_mode {
            KeyMode::FirstColumn => {
                let key = fields[0].trim().to_string();
                if !seen.insert(key.clone()) {
                    tracing::warn!(
                        "duplicate row key; keeping first (line {}, key {})",
                        line_no,
                        key
                    );
                    continue;
                }
                keys.push(key);
                &fields[1..]
            }
            KeyMode::Unkeyed => &fields[..],
        };
        rows.push(cells.iter().map(|s| s.to_string()).collect());
    }

    Ok(ClinicalTable::new(key_name, keys, columns, rows))
}

fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
