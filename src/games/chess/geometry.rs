//! Screen geometry: pixels, rectangles, and the mapping between screen
//! positions and board cells.

use super::{Cell, PieceKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A screen position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Pixel {
    /// Horizontal offset from the left edge.
    pub x: i32,
    /// Vertical offset from the top edge.
    pub y: i32,
}

/// Axis-aligned screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Returns true if `p` lies inside (right and bottom edges excluded).
    pub fn contains(&self, p: Pixel) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// Screen layout, expressed in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Edge of one tile in pixels.
    tile_size: i32,
    /// Top-left corner of the board, in tiles.
    board_origin: [i32; 2],
    /// Edge of one board square, in tiles.
    square_tiles: i32,
    /// Top-left corner of the promotion selector, in tiles.
    selector_origin: [i32; 2],
    /// Size of the promotion selector, in tiles.
    selector_size: [i32; 2],
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            tile_size: 32,
            board_origin: [1, 1],
            square_tiles: 2,
            selector_origin: [13, 7],
            selector_size: [5, 6],
        }
    }
}

impl Layout {
    /// Edge of one board square in pixels.
    pub fn square_px(&self) -> i32 {
        self.tile_size * self.square_tiles
    }

    /// Screen region covered by the 8x8 grid.
    pub fn board_rect(&self) -> Rect {
        Rect::new(
            self.board_origin[0] * self.tile_size,
            self.board_origin[1] * self.tile_size,
            8 * self.square_px(),
            8 * self.square_px(),
        )
    }

    /// Maps a pixel to the board cell under it. White is drawn at the
    /// bottom, so the top screen row is rank 8.
    #[instrument(skip(self))]
    pub fn px_to_grid(&self, p: Pixel) -> Option<Cell> {
        let rect = self.board_rect();
        if !rect.contains(p) || self.square_px() <= 0 {
            return None;
        }
        let col = (p.x - rect.x) / self.square_px();
        let row = (p.y - rect.y) / self.square_px();
        Cell::new(u8::try_from(col).ok()?, 7u8.checked_sub(u8::try_from(row).ok()?)?)
    }

    /// Screen region of a single cell.
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let rect = self.board_rect();
        let size = self.square_px();
        Rect::new(
            rect.x + cell.file() as i32 * size,
            rect.y + (7 - cell.rank() as i32) * size,
            size,
            size,
        )
    }

    /// The promotion selector panel.
    pub fn selector(&self) -> PromotionSelector {
        PromotionSelector {
            rect: Rect::new(
                self.selector_origin[0] * self.tile_size,
                self.selector_origin[1] * self.tile_size,
                self.selector_size[0] * self.tile_size,
                self.selector_size[1] * self.tile_size,
            ),
            title_height: self.tile_size,
        }
    }
}

/// Promotion selector panel: a title band followed by one band per
/// promotion target, top to bottom in [`PieceKind::PROMOTION_TARGETS`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct PromotionSelector {
    rect: Rect,
    title_height: i32,
}

impl PromotionSelector {
    /// Creates a selector occupying `rect`.
    pub fn new(rect: Rect, title_height: i32) -> Self {
        Self { rect, title_height }
    }

    /// Screen region of the option for `kind`, if it is a promotion target.
    pub fn option_rect(&self, kind: PieceKind) -> Option<Rect> {
        let index = PieceKind::PROMOTION_TARGETS
            .iter()
            .position(|&k| k == kind)? as i32;
        let band = self.band_height();
        Some(Rect::new(
            self.rect.x,
            self.rect.y + self.title_height + index * band,
            self.rect.width,
            band,
        ))
    }

    /// The promotion target under `p`, if any.
    #[instrument(skip(self))]
    pub fn option_at(&self, p: Pixel) -> Option<PieceKind> {
        PieceKind::PROMOTION_TARGETS
            .into_iter()
            .find(|&kind| self.option_rect(kind).is_some_and(|r| r.contains(p)))
    }

    fn band_height(&self) -> i32 {
        let options = PieceKind::PROMOTION_TARGETS.len() as i32;
        (self.rect.height - self.title_height).max(0) / options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_rect() {
        let layout = Layout::default();
        assert_eq!(layout.board_rect(), Rect::new(32, 32, 512, 512));
    }

    #[test]
    fn test_px_to_grid_corners() {
        let layout = Layout::default();
        assert_eq!(layout.px_to_grid(Pixel::new(32, 32)), Cell::parse("a8"));
        assert_eq!(layout.px_to_grid(Pixel::new(543, 543)), Cell::parse("h1"));
        assert_eq!(layout.px_to_grid(Pixel::new(544, 543)), None);
        assert_eq!(layout.px_to_grid(Pixel::new(10, 100)), None);
    }

    #[test]
    fn test_cell_rect_maps_back() {
        let layout = Layout::default();
        for cell in Cell::all() {
            let r = layout.cell_rect(cell);
            assert_eq!(layout.px_to_grid(Pixel::new(r.x + 1, r.y + 1)), Some(cell));
        }
    }

    #[test]
    fn test_selector_bands() {
        let selector = Layout::default().selector();
        // Selector spans (416, 224) 160x192: title 32, then 40px bands.
        assert_eq!(selector.option_at(Pixel::new(420, 230)), None);
        assert_eq!(selector.option_at(Pixel::new(420, 260)), Some(PieceKind::Queen));
        assert_eq!(selector.option_at(Pixel::new(420, 300)), Some(PieceKind::Rook));
        assert_eq!(selector.option_at(Pixel::new(420, 340)), Some(PieceKind::Bishop));
        assert_eq!(selector.option_at(Pixel::new(420, 380)), Some(PieceKind::Knight));
        assert_eq!(selector.option_at(Pixel::new(10, 10)), None);
    }

    #[test]
    fn test_option_rect_rejects_king() {
        let selector = Layout::default().selector();
        assert!(selector.option_rect(PieceKind::King).is_none());
    }
}
