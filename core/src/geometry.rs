use serde::{Deserialize, Serialize};

use crate::*;

/// Screen-space pixel unit.
pub type Px = i32;

pub const DEFAULT_SCREEN_SIZE: (Px, Px) = (800, 400);
pub const DEFAULT_TILE_SIZE: Px = 50;
pub const DEFAULT_TILE_GAP: Px = 10;

/// Largest accepted tile size and gap.
pub const MAX_TILE_SIZE: Px = 1 << 10;
/// Largest accepted screen width or height.
pub const MAX_SCREEN_SIZE: Px = 1 << 16;

/// Axis-aligned rectangle, `x`/`y` is the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: Px,
    pub y: Px,
    pub width: Px,
    pub height: Px,
}

impl Rect {
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open: the right and bottom edges are outside.
    pub const fn contains(&self, px: Px, py: Px) -> bool {
        let (px, py) = (px as i64, py as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && px < x + self.width as i64 && py >= y && py < y + self.height as i64
    }

    pub const fn center(&self) -> (Px, Px) {
        (
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }
}

/// Maps between board cells and screen pixels.
///
/// A cell's column runs along the screen's x axis and its row along the y axis. Nothing else in the crate deals
/// with screen axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct Layout {
    size: Coord2,
    tile_size: Px,
    gap: Px,
    margin_x: Px,
    margin_y: Px,
}

/// Unchecked wire form of [`Layout`].
#[derive(Deserialize)]
struct RawLayout {
    size: Coord2,
    tile_size: Px,
    gap: Px,
    margin_x: Px,
    margin_y: Px,
}

impl TryFrom<RawLayout> for Layout {
    type Error = GameError;

    fn try_from(raw: RawLayout) -> Result<Self> {
        let in_range = (1..=MAX_TILE_SIZE).contains(&raw.tile_size)
            && (0..=MAX_TILE_SIZE).contains(&raw.gap)
            && (0..=MAX_SCREEN_SIZE).contains(&raw.margin_x)
            && (0..=MAX_SCREEN_SIZE).contains(&raw.margin_y);
        if !in_range {
            return Err(GameError::InvalidLayout);
        }
        Ok(Self {
            size: raw.size,
            tile_size: raw.tile_size,
            gap: raw.gap,
            margin_x: raw.margin_x,
            margin_y: raw.margin_y,
        })
    }
}

impl Layout {
    /// Centers the board on a `screen` of `(width, height)` pixels, margins never go negative.
    ///
    /// # Panics
    ///
    /// If `tile_size` is not in `1..=MAX_TILE_SIZE`, `gap` is not in `0..=MAX_TILE_SIZE`, or a screen dimension is
    /// not in `0..=MAX_SCREEN_SIZE`.
    pub fn centered(size: Coord2, tile_size: Px, gap: Px, (screen_w, screen_h): (Px, Px)) -> Self {
        assert!(
            (1..=MAX_TILE_SIZE).contains(&tile_size),
            "tile size {} out of range",
            tile_size
        );
        assert!((0..=MAX_TILE_SIZE).contains(&gap), "tile gap {} out of range", gap);
        assert!(
            (0..=MAX_SCREEN_SIZE).contains(&screen_w) && (0..=MAX_SCREEN_SIZE).contains(&screen_h),
            "screen size {:?} out of range",
            (screen_w, screen_h)
        );

        let (rows, cols) = size;
        let pitch = tile_size + gap;
        let margin_x = ((screen_w - Px::from(cols) * pitch) / 2).max(0);
        let margin_y = ((screen_h - Px::from(rows) * pitch) / 2).max(0);
        log::debug!("Layout margins for {:?}: ({}, {})", size, margin_x, margin_y);
        Self {
            size,
            tile_size,
            gap,
            margin_x,
            margin_y,
        }
    }

    /// Default tile size and gap on the default screen.
    pub fn with_defaults(size: Coord2) -> Self {
        Self::centered(size, DEFAULT_TILE_SIZE, DEFAULT_TILE_GAP, DEFAULT_SCREEN_SIZE)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn margins(&self) -> (Px, Px) {
        (self.margin_x, self.margin_y)
    }

    const fn pitch(&self) -> Px {
        self.tile_size + self.gap
    }

    /// Board footprint plus margins on both sides.
    pub fn screen_size(&self) -> (Px, Px) {
        let (rows, cols) = self.size;
        (
            2 * self.margin_x + Px::from(cols) * self.pitch(),
            2 * self.margin_y + Px::from(rows) * self.pitch(),
        )
    }

    pub fn cell_to_screen_rect(&self, (row, col): Coord2) -> Rect {
        Rect::new(
            self.margin_x + Px::from(col) * self.pitch(),
            self.margin_y + Px::from(row) * self.pitch(),
            self.tile_size,
            self.tile_size,
        )
    }

    /// Cell under the pixel `(px, py)`, `None` in margins and gaps.
    pub fn screen_to_cell(&self, px: Px, py: Px) -> Option<Coord2> {
        let dx = px - self.margin_x;
        let dy = py - self.margin_y;
        if dx < 0 || dy < 0 {
            return None;
        }

        let pitch = self.pitch();
        if dx % pitch >= self.tile_size || dy % pitch >= self.tile_size {
            return None;
        }

        let col = Coord::try_from(dx / pitch).ok()?;
        let row = Coord::try_from(dy / pitch).ok()?;
        let (rows, cols) = self.size;
        (row < rows && col < cols).then_some((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn classic_margins_match_screen() {
        let layout = Layout::with_defaults((4, 8));
        assert_eq!(layout.margins(), (160, 80));
        assert_eq!(layout.screen_size(), (800, 400));
        assert_eq!(layout.cell_to_screen_rect((0, 0)), Rect::new(160, 80, 50, 50));
        assert_eq!(layout.cell_to_screen_rect((1, 2)), Rect::new(280, 140, 50, 50));
    }

    #[test]
    fn round_trip_every_cell() {
        let layout = Layout::with_defaults((4, 8));
        for coords in iter_coords((4, 8)) {
            let rect = layout.cell_to_screen_rect(coords);
            for (ox, oy) in [(0, 0), (10, 3), (49, 49), (25, 0)] {
                assert_eq!(
                    layout.screen_to_cell(rect.x + ox, rect.y + oy),
                    Some(coords),
                    "offset ({}, {}) into {:?}",
                    ox,
                    oy,
                    coords
                );
            }
            let (cx, cy) = rect.center();
            assert!(rect.contains(cx, cy));
        }
    }

    #[test]
    fn column_is_horizontal() {
        let layout = Layout::with_defaults((4, 8));
        let rect = layout.cell_to_screen_rect((0, 7));
        assert!(rect.x > rect.y);
        assert_eq!(layout.screen_to_cell(rect.x, rect.y), Some((0, 7)));
    }

    #[test]
    fn outside_tiles_is_none() {
        let layout = Layout::with_defaults((4, 8));
        // margins
        assert_eq!(layout.screen_to_cell(0, 0), None);
        assert_eq!(layout.screen_to_cell(159, 100), None);
        assert_eq!(layout.screen_to_cell(200, 79), None);
        // gaps
        assert_eq!(layout.screen_to_cell(210, 100), None);
        assert_eq!(layout.screen_to_cell(170, 135), None);
        // past the last row and column
        assert_eq!(layout.screen_to_cell(640, 100), None);
        assert_eq!(layout.screen_to_cell(170, 320), None);
        assert_eq!(layout.screen_to_cell(-5, -5), None);
    }

    #[test]
    fn oversized_board_has_zero_margins() {
        let layout = Layout::centered((10, 20), 50, 10, (800, 400));
        assert_eq!(layout.margins(), (0, 0));
        assert_eq!(layout.screen_to_cell(0, 0), Some((0, 0)));
        assert_eq!(layout.screen_to_cell(1180, 580), Some((9, 19)));
    }

    #[test]
    #[should_panic(expected = "tile size 0 out of range")]
    fn zero_tile_size_is_rejected() {
        Layout::centered((2, 2), 0, 0, (100, 100));
    }

    #[test]
    #[should_panic(expected = "tile gap -1 out of range")]
    fn negative_gap_is_rejected() {
        Layout::centered((2, 2), 50, -1, (100, 100));
    }

    #[test]
    fn layout_deserialization_checks_ranges() {
        let layout = Layout::with_defaults((4, 8));
        let valid = serde_json::to_value(layout).unwrap();
        assert_eq!(serde_json::from_value::<Layout>(valid.clone()).unwrap(), layout);

        let mut zero_tiles = valid;
        zero_tiles["tile_size"] = serde_json::to_value(0).unwrap();
        zero_tiles["gap"] = serde_json::to_value(0).unwrap();
        let err = serde_json::from_value::<Layout>(zero_tiles).unwrap_err();
        assert!(err.to_string().contains("layout"), "{}", err);
    }

    #[test]
    fn largest_layout_stays_in_range() {
        let layout = Layout::centered((255, 255), MAX_TILE_SIZE, MAX_TILE_SIZE, (MAX_SCREEN_SIZE, 0));
        let (width, height) = layout.screen_size();
        assert_eq!(width, height);
        assert_eq!(width, 255 * 2 * MAX_TILE_SIZE);

        let rect = layout.cell_to_screen_rect((254, 254));
        assert_eq!(layout.screen_to_cell(rect.x, rect.y), Some((254, 254)));
        assert!(!rect.contains(rect.x + rect.width, rect.y));
    }

    #[test]
    fn rect_math_does_not_overflow() {
        let rect = Rect::new(Px::MAX - 1, 0, Px::MAX, Px::MAX);
        assert!(rect.contains(Px::MAX, 0));
        assert!(!rect.contains(Px::MAX - 2, 0));
        assert_eq!(rect.center().0, Px::MAX);
    }
}
