use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// View of the turn protocol derived from the session's fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No turn in progress, any hidden tile may be selected
    Idle,
    /// First tile of a turn is face-up
    OneRevealed(Coord2),
    /// Two different icons are face-up waiting for `resolve_mismatch`
    AwaitingResolution(Coord2, Coord2),
    /// Every tile is face-up
    Won,
}

/// Board plus reveal state for one game, driven one tile at a time.
///
/// Valid transitions:
/// - Idle -> OneRevealed
/// - OneRevealed -> Idle (match)
/// - OneRevealed -> Won (match on the last pair)
/// - OneRevealed -> AwaitingResolution (mismatch)
/// - AwaitingResolution -> Idle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSession")]
pub struct GameSession {
    board: Board,
    revealed: Array2<bool>,
    pending: Option<Coord2>,
    mismatch: Option<(Coord2, Coord2)>,
    matched_pairs: CellCount,
    turns: u32,
}

/// Unchecked wire form of [`GameSession`].
#[derive(Deserialize)]
struct RawSession {
    board: Board,
    revealed: Array2<bool>,
    pending: Option<Coord2>,
    mismatch: Option<(Coord2, Coord2)>,
    matched_pairs: CellCount,
    turns: u32,
}

impl TryFrom<RawSession> for GameSession {
    type Error = GameError;

    fn try_from(raw: RawSession) -> Result<Self> {
        let session = Self {
            board: raw.board,
            revealed: raw.revealed,
            pending: raw.pending,
            mismatch: raw.mismatch,
            matched_pairs: raw.matched_pairs,
            turns: raw.turns,
        };
        session.validate()?;
        Ok(session)
    }
}

impl GameSession {
    pub fn new(board: Board) -> Self {
        let size = board.size();
        Self {
            board,
            revealed: Array2::default(size.to_nd_index()),
            pending: None,
            mismatch: None,
            matched_pairs: 0,
            turns: 0,
        }
    }

    /// Starts over on `board`, every tile face-down.
    pub fn reset(&mut self, board: Board) {
        log::debug!("Reset session with {:?} board", board.size());
        *self = Self::new(board);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn revealed(&self) -> &Array2<bool> {
        &self.revealed
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// First tile of the current turn, kept until the turn resolves.
    pub fn pending(&self) -> Option<Coord2> {
        self.pending
    }

    pub fn matched_pairs(&self) -> CellCount {
        self.matched_pairs
    }

    /// Completed two-tile turns, matches and mismatches alike.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn state(&self) -> SessionState {
        if let Some((first, second)) = self.mismatch {
            SessionState::AwaitingResolution(first, second)
        } else if let Some(first) = self.pending {
            SessionState::OneRevealed(first)
        } else if self.is_won() {
            SessionState::Won
        } else {
            SessionState::Idle
        }
    }

    /// True once every tile is face-up.
    pub fn is_won(&self) -> bool {
        self.revealed.iter().all(|&revealed| revealed)
    }

    /// Flips the tile at `coords` and evaluates the turn when it is the second one.
    ///
    /// Must not be called while a mismatch awaits `resolve_mismatch`, such calls are rejected.
    pub fn select_tile(&mut self, coords: Coord2) -> SelectOutcome {
        use SelectOutcome::*;

        let Ok(coords) = self.board.validate_coords(coords) else {
            return Rejected(Rejection::OutOfBounds);
        };
        if let Err(rejection) = self.check_selectable(coords) {
            log::trace!("Rejected selection at {:?}: {:?}", coords, rejection);
            return Rejected(rejection);
        }

        self.revealed[coords.to_nd_index()] = true;

        let Some(first) = self.pending else {
            self.pending = Some(coords);
            log::debug!("First tile revealed at {:?}", coords);
            return FirstRevealed(coords);
        };

        self.turns = self.turns.saturating_add(1);
        if self.board[first] == self.board[coords] {
            self.pending = None;
            self.matched_pairs += 1;
            log::debug!("Matched {:?} and {:?}", first, coords);
            if self.is_won() {
                log::debug!("Board cleared after {} turns", self.turns);
            }
            Match(first, coords)
        } else {
            self.mismatch = Some((first, coords));
            log::debug!("Mismatch between {:?} and {:?}", first, coords);
            Mismatch(first, coords)
        }
    }

    /// Flips back both tiles of the last mismatch.
    ///
    /// Calling this for any pair other than the one reported by `Mismatch` is a bug in the caller: it panics in
    /// debug builds and is ignored otherwise.
    pub fn resolve_mismatch(&mut self, first: Coord2, second: Coord2) {
        let expected = self.mismatch;
        let is_expected = match expected {
            Some((p, q)) => (p, q) == (first, second) || (q, p) == (first, second),
            None => false,
        };
        debug_assert!(
            is_expected,
            "resolve_mismatch({:?}, {:?}) does not match pending mismatch {:?}",
            first,
            second,
            expected
        );
        if !is_expected {
            log::warn!(
                "Ignoring resolve_mismatch({:?}, {:?}), pending mismatch is {:?}",
                first,
                second,
                expected
            );
            return;
        }

        self.revealed[first.to_nd_index()] = false;
        self.revealed[second.to_nd_index()] = false;
        self.pending = None;
        self.mismatch = None;
        log::debug!("Hid {:?} and {:?} again", first, second);
    }

    /// Checks that the reveal grid agrees with the open turn and the match count.
    fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size();
        if self.revealed.dim() != (usize::from(rows), usize::from(cols)) {
            return Err(GameError::InvalidBoardShape);
        }

        let face_up = |coords: Coord2| {
            self.board.validate_coords(coords).is_ok() && self.revealed[coords.to_nd_index()]
        };
        let open_tiles: usize = match (self.pending, self.mismatch) {
            (None, None) => 0,
            (Some(first), None) if face_up(first) => 1,
            (Some(first), Some((p, q)))
                if first == p && p != q && face_up(p) && face_up(q) && self.board[p] != self.board[q] =>
            {
                2
            }
            _ => return Err(GameError::InconsistentSession),
        };

        let face_up_count = self.revealed.iter().filter(|&&revealed| revealed).count();
        if face_up_count != usize::from(self.matched_pairs) * 2 + open_tiles {
            return Err(GameError::InconsistentSession);
        }
        Ok(())
    }

    fn check_selectable(&self, coords: Coord2) -> core::result::Result<(), Rejection> {
        if self.mismatch.is_some() {
            Err(Rejection::MismatchPending)
        } else if self.is_won() {
            Err(Rejection::AlreadyWon)
        } else if self.revealed[coords.to_nd_index()] {
            Err(Rejection::AlreadyRevealed)
        } else {
            Ok(())
        }
    }
}
