//! Geometry of the reaction bar.
//!
//! The bar is a capsule holding one square cell per reaction, side by side.
//! All measurements are in logical pixels.

use crate::reaction::Reaction;

/// Edge length of a reaction cell
pub const CELL_SIZE: f32 = 64.0;
/// Gap between neighbouring cells
pub const CELL_SPACING: f32 = 8.0;
/// Padding between the capsule edge and the cells, horizontally
pub const PADDING_HORIZONTAL: f32 = 16.0;
/// Padding between the capsule edge and the cells, vertically
pub const PADDING_VERTICAL: f32 = 10.0;
/// Empty space around the capsule so bouncing glyphs stay on canvas
pub const CANVAS_MARGIN: f32 = 96.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Resolved positions of the bar and its cells
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    /// Whole drawing area, margin included
    pub canvas: Rect,
    /// The capsule behind the reactions
    pub capsule: Rect,
    /// One cell per reaction, in [`Reaction::ALL`] order
    pub cells: [Rect; 3],
}

impl BarLayout {
    pub fn new() -> Self {
        let count = Reaction::ALL.len() as f32;
        let capsule_width =
            PADDING_HORIZONTAL * 2.0 + CELL_SIZE * count + CELL_SPACING * (count - 1.0);
        let capsule_height = PADDING_VERTICAL * 2.0 + CELL_SIZE;

        let capsule = Rect::new(CANVAS_MARGIN, CANVAS_MARGIN, capsule_width, capsule_height);
        let canvas = Rect::new(
            0.0,
            0.0,
            capsule_width + CANVAS_MARGIN * 2.0,
            capsule_height + CANVAS_MARGIN * 2.0,
        );

        let cell = |index: usize| {
            Rect::new(
                capsule.x + PADDING_HORIZONTAL + index as f32 * (CELL_SIZE + CELL_SPACING),
                capsule.y + PADDING_VERTICAL,
                CELL_SIZE,
                CELL_SIZE,
            )
        };

        Self {
            canvas,
            capsule,
            cells: [cell(0), cell(1), cell(2)],
        }
    }

    pub fn cell(&self, reaction: Reaction) -> Rect {
        self.cells[reaction.index()]
    }

    /// Reaction whose cell contains the point, if any
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Reaction> {
        Reaction::ALL
            .into_iter()
            .find(|reaction| self.cell(*reaction).contains(x, y))
    }
}

impl Default for BarLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_sit_inside_capsule() {
        let layout = BarLayout::new();
        for cell in layout.cells {
            assert!(layout.capsule.contains(cell.x, cell.y));
            assert!(cell.x + cell.width <= layout.capsule.x + layout.capsule.width);
        }
        assert_eq!(layout.canvas.width, 2.0 * CANVAS_MARGIN + layout.capsule.width);
    }

    #[test]
    fn test_hit_test() {
        let layout = BarLayout::new();
        let (x, y) = layout.cell(Reaction::Heart).center();
        assert_eq!(layout.hit_test(x, y), Some(Reaction::Heart));

        // Gap between the first two cells
        let gap_x = layout.cells[0].x + CELL_SIZE + CELL_SPACING / 2.0;
        assert_eq!(layout.hit_test(gap_x, y), None);
        assert_eq!(layout.hit_test(0.0, 0.0), None);
    }
}
