// src/graph/layout.rs

use crate::config::LayoutSection;
use crate::graph::model::Position;

/// Row-major grid for runner nodes, keyed by index in the live set.
///
/// Positions are not tied to job identity: when an earlier job leaves, the
/// later ones shift up a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    columns: usize,
    column_width: f64,
    row_height: f64,
    origin: Position,
}

impl GridLayout {
    pub fn from_config(cfg: &LayoutSection) -> Self {
        Self {
            columns: cfg.columns.max(1),
            column_width: cfg.column_width,
            row_height: cfg.row_height,
            origin: Position::new(cfg.origin_x, cfg.origin_y),
        }
    }

    pub fn position(&self, index: usize) -> Position {
        let col = index % self.columns;
        let row = index / self.columns;
        Position::new(
            self.origin.x + col as f64 * self.column_width,
            self.origin.y + row as f64 * self.row_height,
        )
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::from_config(&LayoutSection::default())
    }
}
