use pairmatch_core::*;
use serde::{Deserialize, Serialize};

/// Blank board shown before the first peek batch.
pub(crate) const PEEK_LEAD_IN_MS: u32 = 500;
/// How long each peek batch stays face-up.
pub(crate) const PEEK_HOLD_MS: u32 = 500;
/// How long a mismatched pair stays face-up.
pub(crate) const MISMATCH_DWELL_MS: u32 = 1000;
pub(crate) const WIN_FLASHES: u8 = 10;
pub(crate) const WIN_FLASH_MS: u32 = 300;

/// What the shell has to do once the current step is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Next {
    /// Call `tick` after this many milliseconds, ignoring input until then
    Hold(u32),
    /// Waiting for input
    Ready,
    /// Celebration is over, start a new game
    NewGame,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Phase {
    Peeking(PeekSequence),
    Playing,
    Dwelling(Coord2, Coord2),
    Celebrating { flashes_left: u8 },
}

/// Tile appearance for one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Face {
    Down,
    Up(IconSpec),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Backdrop {
    Normal,
    Flash,
}

/// Sequences the session, the opening peek, and the timed holds without knowing about timers.
///
/// Holds never overlap: while one is running `click` and `new_game_allowed` refuse input.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Flow {
    session: GameSession,
    layout: Layout,
    phase: Phase,
    hover: Option<Coord2>,
}

impl Flow {
    pub(crate) fn new(board: Board, peek: PeekSequence) -> (Self, Next) {
        let layout = Layout::with_defaults(board.size());
        let flow = Self {
            session: GameSession::new(board),
            layout,
            phase: Phase::Peeking(peek),
            hover: None,
        };
        (flow, Next::Hold(PEEK_LEAD_IN_MS))
    }

    /// Replaces the board and starts over with a peek.
    pub(crate) fn restart(&mut self, board: Board, peek: PeekSequence) -> Next {
        if board.size() != self.layout.size() {
            self.layout = Layout::with_defaults(board.size());
        }
        self.session.reset(board);
        self.phase = Phase::Peeking(peek);
        self.hover = None;
        Next::Hold(PEEK_LEAD_IN_MS)
    }

    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    pub(crate) fn phase(&self) -> &Phase {
        &self.phase
    }

    pub(crate) fn new_game_allowed(&self) -> bool {
        matches!(self.phase, Phase::Playing)
    }

    /// Advances the running hold.
    pub(crate) fn tick(&mut self) -> Next {
        match &mut self.phase {
            Phase::Peeking(peek) => {
                if peek.show_next().is_some() {
                    Next::Hold(PEEK_HOLD_MS)
                } else {
                    log::debug!("Peek finished");
                    self.phase = Phase::Playing;
                    Next::Ready
                }
            }
            Phase::Dwelling(first, second) => {
                let (first, second) = (*first, *second);
                self.session.resolve_mismatch(first, second);
                self.phase = Phase::Playing;
                Next::Ready
            }
            Phase::Celebrating { flashes_left } => {
                *flashes_left = flashes_left.saturating_sub(1);
                if *flashes_left == 0 {
                    Next::NewGame
                } else {
                    Next::Hold(WIN_FLASH_MS)
                }
            }
            Phase::Playing => {
                log::warn!("tick without a running hold");
                Next::Ready
            }
        }
    }

    /// Handles a click at board-relative pixel `(px, py)`, also returns whether the board needs a redraw.
    pub(crate) fn click(&mut self, px: Px, py: Px) -> (Next, bool) {
        if !matches!(self.phase, Phase::Playing) {
            log::trace!("click ignored during {:?}", self.phase);
            return (Next::Ready, false);
        }
        let Some(coords) = self.layout.screen_to_cell(px, py) else {
            return (Next::Ready, false);
        };

        let outcome = self.session.select_tile(coords);
        let next = match outcome {
            SelectOutcome::Mismatch(first, second) => {
                self.phase = Phase::Dwelling(first, second);
                Next::Hold(MISMATCH_DWELL_MS)
            }
            SelectOutcome::Match(..) if self.session.is_won() => {
                log::info!("Won after {} turns", self.session.turns());
                self.phase = Phase::Celebrating {
                    flashes_left: WIN_FLASHES,
                };
                self.hover = None;
                Next::Hold(WIN_FLASH_MS)
            }
            _ => {
                log::trace!("select {:?}: {:?}", coords, outcome);
                Next::Ready
            }
        };
        (next, outcome.has_update())
    }

    /// Tracks the pointer, returns whether the highlight moved.
    pub(crate) fn pointer_moved(&mut self, pos: Option<(Px, Px)>) -> bool {
        let hover = pos.and_then(|(px, py)| self.layout.screen_to_cell(px, py));
        let changed = self.hover != hover;
        self.hover = hover;
        changed
    }

    /// Hovered cell that should get a highlight box.
    pub(crate) fn highlight(&self) -> Option<Coord2> {
        self.hover
            .filter(|_| matches!(self.phase, Phase::Playing))
            .filter(|&coords| !self.session.is_revealed(coords))
    }

    pub(crate) fn face_at(&self, coords: Coord2) -> Face {
        let peeking = match &self.phase {
            Phase::Peeking(peek) => peek.is_visible(coords),
            _ => false,
        };
        if peeking || self.session.is_revealed(coords) {
            Face::Up(self.session.board()[coords])
        } else {
            Face::Down
        }
    }

    pub(crate) fn backdrop(&self) -> Backdrop {
        match self.phase {
            Phase::Celebrating { flashes_left } if flashes_left % 2 == 1 => Backdrop::Flash,
            _ => Backdrop::Normal,
        }
    }
}
