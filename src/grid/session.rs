// src/grid/session.rs
//! In-memory grid plus dirty tracking, driven by load/save completions.
//!
//! The session never touches the store itself. Operations hand back a
//! [`SaveRequest`] describing what must be written; the caller performs the
//! write and reports back through [`GridSession::complete_save`]. Completions
//! are tagged with the session id that issued them, so anything arriving after
//! a teardown or restart is dropped.

use bevy::prelude::{debug, info, trace, Resource};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use uuid::Uuid;

use super::database::{DbError, PutManyError};
use super::definitions::{Cell, CellId, ColumnId, ColumnLabels, Grid, ROW_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPhase {
    Loading,
    Ready,
    TornDown,
}

/// Whether committed edits are written right away or only on an explicit save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveMode {
    #[default]
    Immediate,
    Manual,
}

#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid is still loading")]
    NotReady,
    #[error("row {row} of column {column} is outside the grid")]
    OutOfBounds { row: usize, column: ColumnId },
    #[error("failed to load saved cells: {0}")]
    StoreReadFailure(#[source] DbError),
    #[error("failed to save {}: {source}", failed_ids.join(", "))]
    StoreWriteFailure {
        failed_ids: Vec<String>,
        #[source]
        source: DbError,
    },
}

impl From<PutManyError> for GridError {
    fn from(e: PutManyError) -> Self {
        GridError::StoreWriteFailure {
            failed_ids: e.failed_ids,
            source: e.source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row: usize,
    pub column: ColumnId,
    pub value: String,
}

/// Cells the store has to persist on behalf of one session.
///
/// `issued_at` is the session's edit generation when the request was built.
/// Any cell edited after that point has a newer generation and stays dirty
/// when this request completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub session_id: Uuid,
    pub issued_at: u64,
    pub cells: Vec<Cell>,
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// Completion belonged to a session that no longer exists.
    Stale,
    Merged { merged: usize, skipped: Vec<String> },
    /// The grid is usable with defaults; the error is for display only.
    Failed(GridError),
}

#[derive(Debug)]
pub enum SaveOutcome {
    Stale,
    Saved { cleared: usize, still_dirty: usize },
    Failed(GridError),
}

#[derive(Resource, Debug)]
pub struct GridSession {
    session_id: Uuid,
    phase: GridPhase,
    grid: Grid,
    /// Dirty cell -> generation of its latest edit.
    dirty: BTreeMap<CellId, u64>,
    generation: u64,
    save_mode: SaveMode,
    labels: ColumnLabels,
}

impl Default for GridSession {
    fn default() -> Self {
        Self::new(SaveMode::default(), ColumnLabels::default())
    }
}

impl GridSession {
    /// Starts a session in `Loading` with every cell empty.
    pub fn new(save_mode: SaveMode, labels: ColumnLabels) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            phase: GridPhase::Loading,
            grid: Grid::new_empty(),
            dirty: BTreeMap::new(),
            generation: 0,
            save_mode,
            labels,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == GridPhase::Ready
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn labels(&self) -> &ColumnLabels {
        &self.labels
    }

    pub fn save_mode(&self) -> SaveMode {
        self.save_mode
    }

    pub fn is_dirty(&self, id: CellId) -> bool {
        self.dirty.contains_key(&id)
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Drops the current session; late completions for it are ignored.
    pub fn teardown(&mut self) {
        if self.phase != GridPhase::TornDown {
            info!(
                "Grid session {} torn down with {} unsaved cell(s).",
                self.session_id,
                self.dirty.len()
            );
        }
        self.phase = GridPhase::TornDown;
    }

    /// Tears the session down and begins a fresh `Loading` phase.
    pub fn restart(&mut self) -> Uuid {
        self.teardown();
        *self = Self::new(self.save_mode, self.labels.clone());
        debug!("Grid session {} started loading.", self.session_id);
        self.session_id
    }

    pub fn finish_load(&mut self, session_id: Uuid, result: Result<Vec<Cell>, DbError>) -> LoadOutcome {
        if session_id != self.session_id || self.phase != GridPhase::Loading {
            trace!("Ignoring load completion for inactive session {}.", session_id);
            return LoadOutcome::Stale;
        }
        self.phase = GridPhase::Ready;

        let cells = match result {
            Ok(cells) => cells,
            Err(e) => return LoadOutcome::Failed(GridError::StoreReadFailure(e)),
        };

        let mut merged = 0;
        let mut skipped = Vec::new();
        for cell in cells {
            match cell.id.parse::<CellId>() {
                Ok(id) => {
                    self.grid.set(id, cell.value);
                    merged += 1;
                }
                Err(_) => skipped.push(cell.id),
            }
        }
        LoadOutcome::Merged { merged, skipped }
    }

    fn cell_id(row: usize, column: ColumnId) -> Result<CellId, GridError> {
        CellId::new(column, row).ok_or(GridError::OutOfBounds { row, column })
    }

    /// Optimistically writes the value. Returns the write to issue, if any.
    pub fn apply_edit(
        &mut self,
        row: usize,
        column: ColumnId,
        value: String,
    ) -> Result<Option<SaveRequest>, GridError> {
        self.apply_edits(vec![CellEdit { row, column, value }])
    }

    /// Applies a multi-cell change (paste) as one batch. Out-of-range edits
    /// reject the whole batch before anything is written.
    pub fn apply_edits(&mut self, edits: Vec<CellEdit>) -> Result<Option<SaveRequest>, GridError> {
        if !self.is_ready() {
            return Err(GridError::NotReady);
        }
        let resolved = edits
            .into_iter()
            .map(|edit| Ok((Self::cell_id(edit.row, edit.column)?, edit.value)))
            .collect::<Result<Vec<_>, GridError>>()?;

        let mut changed = Vec::new();
        for (id, value) in resolved {
            if self.grid.get(id) == value {
                trace!("Cell {} unchanged; skipping.", id);
                continue;
            }
            self.generation += 1;
            self.grid.set(id, value.clone());
            self.dirty.insert(id, self.generation);
            changed.push(Cell::new(id, value));
        }

        if changed.is_empty() || self.save_mode == SaveMode::Manual {
            return Ok(None);
        }
        Ok(Some(SaveRequest {
            session_id: self.session_id,
            issued_at: self.generation,
            cells: changed,
        }))
    }

    /// Every dirty cell with its current value; clean cells are never included.
    pub fn save_all(&self) -> Result<Option<SaveRequest>, GridError> {
        if !self.is_ready() {
            return Err(GridError::NotReady);
        }
        if self.dirty.is_empty() {
            return Ok(None);
        }
        let cells = self
            .dirty
            .keys()
            .map(|id| Cell::new(*id, self.grid.get(*id)))
            .collect();
        Ok(Some(SaveRequest {
            session_id: self.session_id,
            issued_at: self.generation,
            cells,
        }))
    }

    /// A cell leaves the dirty set only if it was not edited after `request`
    /// was issued, even when its value has since returned to the written one.
    pub fn complete_save(
        &mut self,
        request: &SaveRequest,
        result: Result<(), PutManyError>,
    ) -> SaveOutcome {
        if request.session_id != self.session_id || self.phase == GridPhase::TornDown {
            trace!("Dropping save completion for inactive session {}.", request.session_id);
            return SaveOutcome::Stale;
        }

        let failed: BTreeSet<&str> = match &result {
            Ok(()) => BTreeSet::new(),
            Err(e) => e.failed_ids.iter().map(String::as_str).collect(),
        };

        let mut cleared = 0;
        for cell in &request.cells {
            if failed.contains(cell.id.as_str()) {
                continue;
            }
            let Ok(id) = cell.id.parse::<CellId>() else {
                continue;
            };
            match self.dirty.get(&id) {
                Some(&edited_at) if edited_at <= request.issued_at => {
                    self.dirty.remove(&id);
                    cleared += 1;
                }
                Some(_) => trace!("{} was edited after save {}; still dirty.", id, request.issued_at),
                None => {}
            }
        }

        match result {
            Ok(()) => SaveOutcome::Saved {
                cleared,
                still_dirty: self.dirty.len(),
            },
            Err(e) => SaveOutcome::Failed(e.into()),
        }
    }

    /// Non-empty values of the first column labelled `label`, in row order.
    /// An unknown label yields an empty list.
    pub fn media_references(&self, label: &str) -> Vec<String> {
        let Some(column) = self.labels.find(label) else {
            return Vec::new();
        };
        (0..ROW_COUNT)
            .filter_map(|row| CellId::new(column, row))
            .map(|id| self.grid.get(id))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }
}
