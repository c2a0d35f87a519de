#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use geometry::*;
pub use icon::*;
pub use peek::*;
pub use session::*;
pub use types::*;

mod error;
mod generator;
mod geometry;
mod icon;
mod peek;
mod session;
mod types;

/// Validated board dimensions plus the icon palette to draw pairs from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    shapes: Vec<Shape>,
    colors: Vec<Color>,
}

impl GameConfig {
    pub fn new(size: Coord2, shapes: &[Shape], colors: &[Color]) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        let total_cells = mult(rows, cols);
        if total_cells % 2 != 0 {
            return Err(GameError::OddCellCount);
        }

        let shapes = icon::dedup_ordered(shapes);
        let colors = icon::dedup_ordered(colors);
        let available = shapes
            .len()
            .saturating_mul(colors.len())
            .try_into()
            .unwrap_or(CellCount::MAX);
        let needed = total_cells / 2;
        if available < needed {
            return Err(GameError::NotEnoughIcons { needed, available });
        }

        Ok(Self {
            size,
            shapes,
            colors,
        })
    }

    /// The 4x8 board with every shape and color.
    pub fn classic() -> Self {
        Self {
            size: (4, 8),
            shapes: Shape::ALL.to_vec(),
            colors: Color::ALL.to_vec(),
        }
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Immutable grid of icons where every icon occurs exactly twice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    icons: Array2<IconSpec>,
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    icons: Array2<IconSpec>,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let (rows, cols) = raw.icons.dim();
        let rows = Coord::try_from(rows).map_err(|_| GameError::InvalidBoardShape)?;
        let cols = Coord::try_from(cols).map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_icons((rows, cols), raw.icons.iter().copied().collect())
    }
}

impl Board {
    /// Builds a board from `icons` listed in row-major order.
    pub fn from_icons(size: Coord2, icons: Vec<IconSpec>) -> Result<Self> {
        if icons.len() != usize::from(mult(size.0, size.1)) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut counts: BTreeMap<IconSpec, u8> = BTreeMap::new();
        for &icon in &icons {
            let count = counts.entry(icon).or_default();
            *count = count.saturating_add(1);
        }
        if counts.values().any(|&count| count != 2) {
            return Err(GameError::UnpairedIcon);
        }

        let icons = Array2::from_shape_vec((usize::from(size.0), usize::from(size.1)), icons)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { icons })
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        // dimensions always come from a `Coord2`
        let (rows, cols) = self.icons.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn icon_at(&self, coords: Coord2) -> Option<IconSpec> {
        self.icons.get(coords.to_nd_index()).copied()
    }

    /// Icons in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = IconSpec> + '_ {
        self.icons.iter().copied()
    }
}

impl Index<Coord2> for Board {
    type Output = IconSpec;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.icons[(row as usize, col as usize)]
    }
}

/// Why a selection was refused without touching the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    OutOfBounds,
    AlreadyRevealed,
    MismatchPending,
    AlreadyWon,
}

/// Outcome of selecting a tile
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// First tile of a turn is now face-up
    FirstRevealed(Coord2),
    /// Both tiles stay face-up for good
    Match(Coord2, Coord2),
    /// Both tiles are face-up until `resolve_mismatch` is called
    Mismatch(Coord2, Coord2),
    Rejected(Rejection),
}

impl SelectOutcome {
    /// Whether this outcome changed what the player sees
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            FirstRevealed(_) => true,
            Match(..) => true,
            Mismatch(..) => true,
            Rejected(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    const A: IconSpec = IconSpec::new(Shape::Diamond, Color::Cyan);
    const B: IconSpec = IconSpec::new(Shape::Circle, Color::Gray);

    #[test]
    fn classic_config_is_valid() {
        let classic = GameConfig::classic();
        let checked = GameConfig::new((4, 8), &Shape::ALL, &Color::ALL).unwrap();
        assert_eq!(classic, checked);
        assert_eq!(checked.total_cells(), 32);
        assert_eq!(checked.pair_count(), 16);
    }

    #[test]
    fn odd_board_is_rejected() {
        let err = GameConfig::new((3, 3), &Shape::ALL, &Color::ALL).unwrap_err();
        assert_eq!(err, GameError::OddCellCount);
    }

    #[test]
    fn empty_board_is_rejected() {
        let err = GameConfig::new((0, 4), &Shape::ALL, &Color::ALL).unwrap_err();
        assert_eq!(err, GameError::EmptyBoard);
    }

    #[test]
    fn too_few_icons_is_rejected() {
        let err = GameConfig::new((4, 10), &Shape::ALL, &Color::ALL).unwrap_err();
        assert_eq!(
            err,
            GameError::NotEnoughIcons {
                needed: 20,
                available: 16
            }
        );
    }

    #[test]
    fn repeated_palette_entries_do_not_count_twice() {
        let shapes = [Shape::Circle, Shape::Circle];
        let err = GameConfig::new((2, 2), &shapes, &[Color::Cyan]).unwrap_err();
        assert_eq!(
            err,
            GameError::NotEnoughIcons {
                needed: 2,
                available: 1
            }
        );
    }

    #[test]
    fn board_from_icons_checks_pairs() {
        let board = Board::from_icons((1, 4), vec![A, B, B, A]).unwrap();
        assert_eq!(board.size(), (1, 4));
        assert_eq!(board[(0, 1)], B);
        assert_eq!(board.icon_at((0, 3)), Some(A));
        assert_eq!(board.icon_at((1, 0)), None);

        assert_eq!(
            Board::from_icons((1, 4), vec![A, A, A, A]),
            Err(GameError::UnpairedIcon)
        );
        assert_eq!(
            Board::from_icons((1, 4), vec![A, B, B]),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn validate_coords_checks_bounds() {
        let board = Board::from_icons((2, 1), vec![A, A]).unwrap();
        assert_eq!(board.validate_coords((1, 0)), Ok((1, 0)));
        assert_eq!(board.validate_coords((0, 1)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn board_deserialization_checks_pairs() {
        let board = Board::from_icons((1, 2), vec![A, A]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let unpaired = Board {
            icons: Array2::from_shape_vec((1, 2), vec![A, B]).unwrap(),
        };
        let json = serde_json::to_string(&unpaired).unwrap();
        let err = serde_json::from_str::<Board>(&json).unwrap_err();
        assert!(err.to_string().contains("exactly twice"), "{}", err);
    }

    #[test]
    fn rejected_outcome_has_no_update() {
        assert!(!SelectOutcome::Rejected(Rejection::AlreadyRevealed).has_update());
        assert!(SelectOutcome::FirstRevealed((0, 0)).has_update());
    }
}
