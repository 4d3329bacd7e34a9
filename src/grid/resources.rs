// src/grid/resources.rs
use bevy::prelude::*;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use super::database::CellStore;
use super::session::SaveRequest;

/// Shared handle to the store backing the grid.
#[derive(Resource, Clone)]
pub struct CellStoreHandle(pub Arc<dyn CellStore>);

/// Ordered write queue. A single background task drains it, so writes reach
/// the store in the order they were issued.
#[derive(Resource, Clone)]
pub struct CellWriter {
    pub(crate) tx: UnboundedSender<SaveRequest>,
}

impl CellWriter {
    /// Hands the request back if the writer task is gone.
    pub fn enqueue(&self, request: SaveRequest) -> Result<(), SaveRequest> {
        self.tx.send(request).map_err(|e| e.0)
    }
}

/// Text copied from the grid, waiting to be pasted.
#[derive(Resource, Default, Debug, Clone)]
pub struct ClipboardBuffer {
    pub text: Option<String>,
}
