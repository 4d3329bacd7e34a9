// src/grid/definitions.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Columns `A..=Z`.
pub const COLUMN_COUNT: usize = 26;
pub const ROW_COUNT: usize = 100;

/// A column identifier restricted to the 26 known letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(u8);

impl ColumnId {
    pub fn from_index(index: usize) -> Option<Self> {
        (index < COLUMN_COUNT).then(|| Self(index as u8))
    }

    /// Only uppercase letters are accepted so that persisted ids stay canonical.
    pub fn from_letter(letter: char) -> Option<Self> {
        if letter.is_ascii_uppercase() {
            Some(Self(letter as u8 - b'A'))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    pub fn all() -> impl Iterator<Item = ColumnId> {
        (0..COLUMN_COUNT as u8).map(ColumnId)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Address of a single cell. `row` is 0-indexed; the textual id uses `row + 1`
/// (`CellId { A, 0 }` is `"A1"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    column: ColumnId,
    row: usize,
}

impl CellId {
    pub fn new(column: ColumnId, row: usize) -> Option<Self> {
        (row < ROW_COUNT).then_some(Self { column, row })
    }

    pub fn column(&self) -> ColumnId {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column.letter(), self.row + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell id '{0}'")]
pub struct ParseCellIdError(pub String);

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCellIdError(s.to_string());
        let mut chars = s.chars();
        let column = chars.next().and_then(ColumnId::from_letter).ok_or_else(err)?;
        let digits = chars.as_str();
        // Reject "+1", "01" and friends: one cell, one id.
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }
        let number: usize = digits.parse().map_err(|_| err())?;
        CellId::new(column, number - 1).ok_or_else(err)
    }
}

/// One persisted record: `{ id, value }` with `id` as primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: String,
    pub value: String,
}

impl Cell {
    pub fn new(id: CellId, value: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            value: value.into(),
        }
    }
}

/// A single grid row: a stable 0-indexed id plus one value per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub id: usize,
    values: [String; COLUMN_COUNT],
}

impl GridRow {
    fn empty(id: usize) -> Self {
        Self {
            id,
            values: std::array::from_fn(|_| String::new()),
        }
    }

    pub fn get(&self, column: ColumnId) -> &str {
        &self.values[column.index()]
    }

    pub fn values(&self) -> &[String; COLUMN_COUNT] {
        &self.values
    }
}

/// The fixed `ROW_COUNT x COLUMN_COUNT` grid. Never grows or shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<GridRow>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl Grid {
    pub fn new_empty() -> Self {
        Self {
            rows: (0..ROW_COUNT).map(GridRow::empty).collect(),
        }
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn get(&self, id: CellId) -> &str {
        self.rows[id.row()].get(id.column())
    }

    /// Replaces the value and returns the previous one.
    pub fn set(&mut self, id: CellId, value: String) -> String {
        std::mem::replace(&mut self.rows[id.row()].values[id.column().index()], value)
    }

    /// Non-empty cells in row-major order.
    pub fn non_empty_cells(&self) -> impl Iterator<Item = (CellId, &str)> + '_ {
        self.rows.iter().flat_map(|row| {
            ColumnId::all().filter_map(move |column| {
                let value = row.get(column);
                if value.is_empty() {
                    return None;
                }
                CellId::new(column, row.id).map(|id| (id, value))
            })
        })
    }
}

/// Display labels for the columns. A label defaults to the column letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabels {
    labels: [String; COLUMN_COUNT],
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            labels: std::array::from_fn(|i| ((b'A' + i as u8) as char).to_string()),
        }
    }
}

impl ColumnLabels {
    /// Builds labels from a `letter -> label` map. Unknown keys are returned so
    /// the caller can report them instead of silently dropping a typo.
    pub fn from_map(map: &BTreeMap<String, String>) -> (Self, Vec<String>) {
        let mut labels = Self::default();
        let mut unknown = Vec::new();
        for (key, label) in map {
            let mut chars = key.chars();
            match (chars.next().and_then(ColumnId::from_letter), chars.next()) {
                (Some(column), None) => labels.labels[column.index()] = label.clone(),
                _ => unknown.push(key.clone()),
            }
        }
        (labels, unknown)
    }

    pub fn get(&self, column: ColumnId) -> &str {
        &self.labels[column.index()]
    }

    /// First column whose label matches, falling back to a plain letter match.
    pub fn find(&self, label: &str) -> Option<ColumnId> {
        ColumnId::all()
            .find(|c| self.get(*c) == label)
            .or_else(|| {
                let mut chars = label.chars();
                match (chars.next().and_then(ColumnId::from_letter), chars.next()) {
                    (Some(column), None) => Some(column),
                    _ => None,
                }
            })
    }
}
