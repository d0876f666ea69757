#![forbid(unsafe_code)]

//! Fixed-dimension grid layout with cell spanning.

use std::fmt;

use trellis_core::component::{Component, ComponentId};
use trellis_core::geometry::Rect;
use trellis_core::screen::Screen;

/// Rejected grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Spans must cover at least one cell.
    ZeroSpan,
    /// The assignment's footprint does not fit the grid dimensions.
    OutOfBounds {
        /// Requested starting row.
        row: u16,
        /// Requested starting column.
        col: u16,
        /// Requested row span.
        row_span: u16,
        /// Requested column span.
        col_span: u16,
        /// Grid row count.
        rows: u16,
        /// Grid column count.
        cols: u16,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSpan => write!(f, "grid spans must be at least 1"),
            Self::OutOfBounds {
                row,
                col,
                row_span,
                col_span,
                rows,
                cols,
            } => write!(
                f,
                "assignment at ({row},{col}) spanning {row_span}x{col_span} exceeds {rows}x{cols} grid"
            ),
        }
    }
}

impl std::error::Error for GridError {}

struct GridEntry {
    row: u16,
    col: u16,
    row_span: u16,
    col_span: u16,
    component: Box<dyn Component>,
}

impl GridEntry {
    fn fits(&self, rows: u16, cols: u16) -> bool {
        span_end(self.row, self.row_span).is_some_and(|end| end <= rows)
            && span_end(self.col, self.col_span).is_some_and(|end| end <= cols)
    }
}

fn span_end(start: u16, span: u16) -> Option<u16> {
    start.checked_add(span)
}

/// A container that places children in a fixed row/column grid.
///
/// A child's rectangle is the union of the cells its span covers. Base cell
/// extents are floored; the last row and column absorb the remainder so the
/// cells always tile the container exactly. Overlapping footprints are
/// tolerated: children draw in insertion order, so the last assignment wins
/// on the overlapped cells.
pub struct Grid {
    id: ComponentId,
    rect: Rect,
    rows: u16,
    cols: u16,
    entries: Vec<GridEntry>,
}

impl Grid {
    /// Create a grid with fixed dimensions.
    #[must_use]
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            id: ComponentId::next(),
            rect: Rect::default(),
            rows,
            cols,
            entries: Vec::new(),
        }
    }

    /// Grid dimensions as `(rows, cols)`.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    /// Number of assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the grid has no assignments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builder form of [`add`](Self::add); panics on invalid configuration.
    #[must_use]
    pub fn with(
        mut self,
        component: impl Component + 'static,
        row: u16,
        col: u16,
        row_span: u16,
        col_span: u16,
    ) -> Self {
        if let Err(err) = self.add(component, row, col, row_span, col_span) {
            panic!("invalid grid assignment: {err}");
        }
        self
    }

    /// Assign a component to cover `row_span` x `col_span` cells starting at
    /// `(row, col)`.
    ///
    /// A zero span or a footprint outside the grid is rejected with the
    /// grid unchanged. Overlap with existing assignments is allowed.
    pub fn add(
        &mut self,
        component: impl Component + 'static,
        row: u16,
        col: u16,
        row_span: u16,
        col_span: u16,
    ) -> Result<(), GridError> {
        if row_span == 0 || col_span == 0 {
            return Err(GridError::ZeroSpan);
        }
        let entry = GridEntry {
            row,
            col,
            row_span,
            col_span,
            component: Box::new(component),
        };
        if !entry.fits(self.rows, self.cols) {
            return Err(GridError::OutOfBounds {
                row,
                col,
                row_span,
                col_span,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.entries.push(entry);
        self.layout();
        Ok(())
    }

    /// Remove the assignment holding the given component, returning it.
    pub fn remove(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.component.id() == id)?;
        let removed = self.entries.remove(index).component;
        self.layout();
        Some(removed)
    }

    /// Change the grid dimensions, recomputing every rectangle.
    ///
    /// Assignments whose footprint no longer fits are dropped (not clamped,
    /// which could corrupt unrelated cells) and returned to the caller.
    pub fn set_size(&mut self, rows: u16, cols: u16) -> Vec<Box<dyn Component>> {
        self.rows = rows;
        self.cols = cols;
        let mut dropped = Vec::new();
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].fits(rows, cols) {
                index += 1;
            } else {
                dropped.push(self.entries.remove(index).component);
            }
        }
        self.layout();
        dropped
    }

    /// Cell extents along one axis: floored base size, last cell absorbs
    /// the remainder.
    fn axis_extents(total: u16, count: u16) -> Vec<u16> {
        if count == 0 {
            return Vec::new();
        }
        let base = total / count;
        let mut extents = vec![base; count as usize];
        if let Some(last) = extents.last_mut() {
            *last = total - base * (count - 1);
        }
        extents
    }

    fn layout(&mut self) {
        let widths = Self::axis_extents(self.rect.width, self.cols);
        let heights = Self::axis_extents(self.rect.height, self.rows);

        // Prefix offsets per axis.
        let mut col_offsets = Vec::with_capacity(widths.len() + 1);
        let mut acc: u16 = 0;
        col_offsets.push(0);
        for width in &widths {
            acc = acc.saturating_add(*width);
            col_offsets.push(acc);
        }
        let mut row_offsets = Vec::with_capacity(heights.len() + 1);
        acc = 0;
        row_offsets.push(0);
        for height in &heights {
            acc = acc.saturating_add(*height);
            row_offsets.push(acc);
        }

        for entry in &mut self.entries {
            let col = entry.col as usize;
            let row = entry.row as usize;
            let col_end = col + entry.col_span as usize;
            let row_end = row + entry.row_span as usize;
            let rect = Rect::new(
                self.rect.x.saturating_add(col_offsets[col]),
                self.rect.y.saturating_add(row_offsets[row]),
                col_offsets[col_end] - col_offsets[col],
                row_offsets[row_end] - row_offsets[row],
            );
            entry.component.set_rect(rect);
        }
    }
}

impl Component for Grid {
    fn id(&self) -> ComponentId {
        self.id
    }

    fn draw(&mut self, screen: &mut dyn Screen) {
        // Insertion order: later assignments paint over earlier ones where
        // footprints overlap.
        for entry in &mut self.entries {
            entry.component.draw(screen);
        }
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.layout();
    }

    fn child_count(&self) -> usize {
        self.entries.len()
    }

    fn child_at(&self, index: usize) -> Option<&dyn Component> {
        self.entries.get(index).map(|entry| &*entry.component)
    }

    fn child_at_mut(&mut self, index: usize) -> Option<&mut dyn Component> {
        self.entries
            .get_mut(index)
            .map(|entry| &mut *entry.component as &mut dyn Component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Probe {
        id: ComponentId,
        rect: Rect,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                id: ComponentId::next(),
                rect: Rect::default(),
            }
        }
    }

    impl Component for Probe {
        fn id(&self) -> ComponentId {
            self.id
        }

        fn draw(&mut self, _screen: &mut dyn Screen) {}

        fn rect(&self) -> Rect {
            self.rect
        }

        fn set_rect(&mut self, rect: Rect) {
            self.rect = rect;
        }
    }

    #[test]
    fn spans_cover_cell_unions() {
        let mut grid = Grid::new(3, 3)
            .with(Probe::new(), 0, 0, 1, 2)
            .with(Probe::new(), 0, 2, 2, 1);
        grid.set_rect(Rect::new(0, 0, 90, 90));

        assert_eq!(grid.child_at(0).unwrap().rect(), Rect::new(0, 0, 60, 30));
        assert_eq!(grid.child_at(1).unwrap().rect(), Rect::new(60, 0, 30, 60));
    }

    #[test]
    fn last_row_and_column_absorb_remainder() {
        let mut grid = Grid::new(2, 3)
            .with(Probe::new(), 0, 0, 1, 1)
            .with(Probe::new(), 1, 2, 1, 1);
        grid.set_rect(Rect::new(0, 0, 10, 5));

        // base width 3, last column = 10 - 6 = 4; base height 2, last = 3.
        assert_eq!(grid.child_at(0).unwrap().rect(), Rect::new(0, 0, 3, 2));
        assert_eq!(grid.child_at(1).unwrap().rect(), Rect::new(6, 2, 4, 3));
    }

    #[test]
    fn invalid_assignments_are_rejected_without_state_change() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.add(Probe::new(), 0, 0, 0, 1), Err(GridError::ZeroSpan));
        assert!(matches!(
            grid.add(Probe::new(), 1, 1, 2, 1),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.add(Probe::new(), 0, 2, 1, 1),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(grid.is_empty());

        assert!(grid.add(Probe::new(), 1, 1, 1, 1).is_ok());
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn overlapping_footprints_are_tolerated() {
        let mut grid = Grid::new(2, 2);
        grid.add(Probe::new(), 0, 0, 2, 2).unwrap();
        grid.add(Probe::new(), 0, 0, 1, 1).unwrap();
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn set_size_drops_assignments_that_no_longer_fit() {
        let mut grid = Grid::new(3, 3)
            .with(Probe::new(), 0, 0, 1, 1)
            .with(Probe::new(), 2, 2, 1, 1);
        grid.set_rect(Rect::new(0, 0, 30, 30));
        let survivor = grid.child_at(0).unwrap().id();

        let dropped = grid.set_size(2, 2);
        assert_eq!(dropped.len(), 1);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.child_at(0).unwrap().id(), survivor);
        // Survivor was recomputed for the new dimensions.
        assert_eq!(grid.child_at(0).unwrap().rect(), Rect::new(0, 0, 15, 15));
    }

    #[test]
    fn zero_dimension_grid_accepts_nothing_and_never_faults() {
        let mut grid = Grid::new(0, 0);
        assert!(matches!(
            grid.add(Probe::new(), 0, 0, 1, 1),
            Err(GridError::OutOfBounds { .. })
        ));
        grid.set_rect(Rect::new(0, 0, 50, 50));
    }

    proptest! {
        /// Unit assignments tile the container exactly: widths and heights
        /// sum to the container extents and adjacent cells are contiguous.
        #[test]
        fn uniform_cells_tile_exactly(rows in 1u16..6, cols in 1u16..6,
                                      width in 0u16..120, height in 0u16..120) {
            let mut grid = Grid::new(rows, cols);
            for row in 0..rows {
                for col in 0..cols {
                    grid.add(Probe::new(), row, col, 1, 1).unwrap();
                }
            }
            grid.set_rect(Rect::new(0, 0, width, height));

            let rects: Vec<Rect> = (0..grid.child_count())
                .map(|i| grid.child_at(i).unwrap().rect())
                .collect();

            // Covered area matches the container exactly.
            let covered: u32 = rects.iter().map(Rect::area).sum();
            prop_assert_eq!(covered, width as u32 * height as u32);

            // Row 0's widths sum to the full width, column 0's heights to
            // the full height.
            let row0: u16 = rects.iter().take(cols as usize).map(|r| r.width).sum();
            prop_assert_eq!(row0, width);
            let col0: u16 = rects.iter().step_by(cols as usize).map(|r| r.height).sum();
            prop_assert_eq!(col0, height);

            // No two cells overlap.
            for (i, a) in rects.iter().enumerate() {
                for b in rects.iter().skip(i + 1) {
                    prop_assert!(a.intersection(b).is_empty());
                }
            }
        }
    }
}
