//! Grid track solving via Taffy.
//!
//! Converts grid track definitions into a Taffy CSS-grid container, places
//! every item on its row/column span, and reads the computed cell rectangles
//! back out.
//!
//! Track sizes follow the container convention:
//! - positive: fixed number of cells
//! - `0`: proportional, weight 1
//! - `-n`: proportional, weight n
//!
//! Rows or columns referenced beyond the declared tracks are proportional
//! with weight 1.

use taffy::geometry::Line;
use taffy::style::{GridPlacement as TaffyGridPlacement, NonRepeatedTrackSizingFunction, TrackSizingFunction};
use taffy::style_helpers::{fr, length, line, span};
use taffy::{AvailableSpace, Dimension, Display, LengthPercentage, NodeId, Size, Style, TaffyTree};

use super::LayoutError;
use crate::types::Rect;

/// Position of one item in the grid (0-based, spans at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridPlacement {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl GridPlacement {
    pub const fn new(row: usize, column: usize, row_span: usize, column_span: usize) -> Self {
        Self {
            row,
            column,
            row_span,
            column_span,
        }
    }
}

/// Track layout of a grid container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridTracks {
    pub rows: Vec<i32>,
    pub columns: Vec<i32>,
    /// Gap between rows, in cells.
    pub row_gap: i32,
    /// Gap between columns, in cells.
    pub column_gap: i32,
}

// =============================================================================
// CONVERSIONS
// =============================================================================

fn to_track(size: i32) -> TrackSizingFunction {
    if size > 0 {
        length(size as f32)
    } else if size == 0 {
        fr(1.0)
    } else {
        fr(size.unsigned_abs() as f32)
    }
}

fn to_line(start: usize, extent: usize) -> Line<TaffyGridPlacement> {
    let start = i16::try_from(start + 1).unwrap_or(i16::MAX);
    let extent = u16::try_from(extent.max(1)).unwrap_or(u16::MAX);
    Line {
        start: line(start),
        end: span(extent),
    }
}

fn container_style(area: Rect, tracks: &GridTracks) -> Style {
    let auto_track: NonRepeatedTrackSizingFunction = fr(1.0);
    Style {
        display: Display::Grid,
        size: Size {
            width: Dimension::Length(area.width as f32),
            height: Dimension::Length(area.height as f32),
        },
        gap: Size {
            width: LengthPercentage::Length(tracks.column_gap.max(0) as f32),
            height: LengthPercentage::Length(tracks.row_gap.max(0) as f32),
        },
        grid_template_rows: tracks.rows.iter().copied().map(to_track).collect(),
        grid_template_columns: tracks.columns.iter().copied().map(to_track).collect(),
        grid_auto_rows: vec![auto_track],
        grid_auto_columns: vec![auto_track],
        ..Default::default()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Solve the grid inside `area`, returning one rect per placement (same order).
pub fn solve_grid(area: Rect, tracks: &GridTracks, placements: &[GridPlacement]) -> Result<Vec<Rect>, LayoutError> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let solver = |err: taffy::TaffyError| LayoutError::Solver(err.to_string());

    let children = placements
        .iter()
        .map(|placement| {
            tree.new_leaf(Style {
                grid_row: to_line(placement.row, placement.row_span),
                grid_column: to_line(placement.column, placement.column_span),
                ..Default::default()
            })
        })
        .collect::<Result<Vec<NodeId>, _>>()
        .map_err(solver)?;

    let root = tree
        .new_with_children(container_style(area, tracks), &children)
        .map_err(solver)?;

    let available = Size {
        width: AvailableSpace::Definite(area.width as f32),
        height: AvailableSpace::Definite(area.height as f32),
    };
    tree.compute_layout(root, available).map_err(solver)?;

    children
        .iter()
        .map(|&node| -> Result<Rect, LayoutError> {
            let layout = tree.layout(node).map_err(solver)?;
            Ok(Rect::new(
                area.x + layout.location.x.round() as i32,
                area.y + layout.location.y.round() as i32,
                layout.size.width.round() as i32,
                layout.size.height.round() as i32,
            ))
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
