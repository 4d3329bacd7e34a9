// src/ui/state.rs
use bevy::prelude::Resource;

use crate::grid::CellId;

#[derive(Resource, Default, Debug, Clone)]
pub struct EditorWindowState {
    /// Text of the cell being typed into; committed when the field loses focus.
    pub edit_buffer: Option<(CellId, String)>,
    /// Last cell that took keyboard focus.
    pub selected: Option<CellId>,
    pub image_loaders_installed: bool,
}

impl EditorWindowState {
    pub fn selection_label(&self) -> String {
        match self.selected {
            Some(id) => format!("Selected: {}", id),
            None => "Select a cell".to_string(),
        }
    }

    pub fn buffer_for(&self, id: CellId) -> Option<&str> {
        match &self.edit_buffer {
            Some((editing, text)) if *editing == id => Some(text.as_str()),
            _ => None,
        }
    }

    /// Ends editing of `id`, returning the typed text if it differs from `current`.
    pub fn take_commit(&mut self, id: CellId, current: &str) -> Option<String> {
        match self.edit_buffer.take() {
            Some((editing, text)) if editing == id => (text != current).then_some(text),
            other => {
                self.edit_buffer = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_only_when_text_changed() {
        let a1: CellId = "A1".parse().unwrap();
        let b2: CellId = "B2".parse().unwrap();
        let mut state = EditorWindowState {
            edit_buffer: Some((a1, "new".into())),
            ..Default::default()
        };

        assert_eq!(state.take_commit(b2, "x"), None);
        assert_eq!(state.buffer_for(a1), Some("new"));

        assert_eq!(state.take_commit(a1, "new"), None);
        assert!(state.edit_buffer.is_none());

        state.edit_buffer = Some((a1, "newer".into()));
        assert_eq!(state.take_commit(a1, "new"), Some("newer".to_string()));
    }

    #[test]
    fn selection_label_names_the_cell() {
        let mut state = EditorWindowState::default();
        assert_eq!(state.selection_label(), "Select a cell");

        state.selected = Some("A1".parse().unwrap());
        assert_eq!(state.selection_label(), "Selected: A1");
        state.selected = Some("Z100".parse().unwrap());
        assert_eq!(state.selection_label(), "Selected: Z100");
    }
}
