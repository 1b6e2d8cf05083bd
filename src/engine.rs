//! The game session: board, turn and selection state.
//!
//! An [`Engine`] is the single owner of all mutable game state. Every user
//! action goes through one of its commands and is processed to completion:
//!
//! - [`Engine::select`] picks a piece of the player on move
//! - [`Engine::apply_move`] moves the selected piece to one of its destinations
//! - [`Engine::click`] routes a raw cell click to one of the two above
//!
//! A refused command returns a [`Rejection`] and changes nothing.
//!
//! Turn flow is `AwaitingSelection -> PieceSelected -> AwaitingSelection`,
//! except that a capture which leaves the same piece another capture keeps it
//! selected, and the turn continues until the chain is exhausted.

use std::fmt;

use tracing::{debug, info};

use crate::board::{Board, Color, Square};
use crate::error::Rejection;
use crate::rules::{self, Destination, MoveKind};

/// Whether the mover keeps the turn after a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnStatus {
    /// The same piece must capture again
    Continues,
    /// The turn passed to the opponent
    Ended,
}

/// Result of an applied move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Square,
    pub to: Square,
    /// Square of the removed opponent piece
    pub captured: Option<Square>,
    /// The moving man was crowned by this move
    pub promoted: bool,
    pub status: TurnStatus,
}

/// Result of an accepted click.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected(Square),
    Moved(MoveOutcome),
}

/// What a presentation layer needs to redraw after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub to_move: Color,
    pub selected: Option<Square>,
    pub destinations: Vec<Destination>,
}

#[derive(Clone, Debug)]
struct Selection {
    square: Square,
    /// Destinations offered to this piece, already filtered for forced captures
    destinations: Vec<Destination>,
    /// Set while a chained capture is in progress
    locked: bool,
}

/// Rules engine state for one game.
#[derive(Clone, Debug)]
pub struct Engine {
    board: Board,
    to_move: Color,
    selection: Option<Selection>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// A new game: starting layout, red to move, nothing selected.
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Color::Red)
    }

    /// Start from an arbitrary position.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Self {
            board,
            to_move,
            selection: None,
        }
    }

    /// Reset to the starting position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.to_move
    }

    pub fn selected(&self) -> Option<Square> {
        self.selection.as_ref().map(|s| s.square)
    }

    /// Destinations offered to the selected piece (empty if none is selected).
    pub fn destinations(&self) -> &[Destination] {
        self.selection
            .as_ref()
            .map(|s| s.destinations.as_slice())
            .unwrap_or_default()
    }

    /// True while a chained capture keeps the selected piece locked.
    pub fn is_chaining(&self) -> bool {
        self.selection.as_ref().is_some_and(|s| s.locked)
    }

    /// Pieces of the player on move that are forced to capture.
    ///
    /// During a chained capture this is just the capturing piece.
    pub fn mandatory_captures(&self) -> Vec<Square> {
        match &self.selection {
            Some(sel) if sel.locked => vec![sel.square],
            _ => rules::mandatory_captures(&self.board, self.to_move),
        }
    }

    /// Pieces of the player on move that `select` would accept and that have
    /// at least one destination.
    pub fn movable_pieces(&self) -> Vec<Square> {
        if let Some(sel) = self.selection.as_ref().filter(|s| s.locked) {
            return vec![sel.square];
        }
        let forced = rules::mandatory_captures(&self.board, self.to_move);
        if !forced.is_empty() {
            return forced;
        }
        self.board
            .pieces()
            .filter(|&(sq, piece)| {
                piece.color == self.to_move
                    && !rules::destinations_for(&self.board, piece, sq).is_empty()
            })
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Select the piece on `sq` for the player on move.
    ///
    /// Accepted iff the piece belongs to the player on move and either no
    /// capture is available or this piece is one of the capturing pieces.
    /// Returns the destinations offered to the piece.
    pub fn select(&mut self, sq: Square) -> Result<&[Destination], Rejection> {
        let selection = self.check_selection(sq).inspect_err(|reason| {
            debug!(%sq, %reason, "selection rejected");
        })?;
        debug!(%sq, destinations = selection.destinations.len(), "piece selected");
        let selection = self.selection.insert(selection);
        Ok(selection.destinations.as_slice())
    }

    fn check_selection(&self, sq: Square) -> Result<Selection, Rejection> {
        if let Some(sel) = self.selection.as_ref().filter(|s| s.locked) {
            return if sel.square == sq {
                Ok(sel.clone())
            } else {
                Err(Rejection::MustContinueCapture(sel.square))
            };
        }
        if !sq.is_dark() {
            return Err(Rejection::LightSquare(sq));
        }
        let piece = self.board.get(sq).ok_or(Rejection::NoPiece(sq))?;
        if piece.color != self.to_move {
            return Err(Rejection::NotYourPiece(sq, piece.color));
        }
        let forced = rules::mandatory_captures(&self.board, self.to_move);
        let destinations = if forced.is_empty() {
            rules::destinations_for(&self.board, piece, sq)
        } else if forced.contains(&sq) {
            rules::captures_for(&self.board, piece, sq)
        } else {
            return Err(Rejection::CaptureRequired(sq));
        };
        Ok(Selection {
            square: sq,
            destinations,
            locked: false,
        })
    }

    /// Move the selected piece to `to`.
    ///
    /// `to` must be one of the destinations offered at selection. A capture
    /// removes exactly the jumped piece. A man reaching its far row is
    /// crowned, which ends the turn. After any other capture the turn
    /// continues while the same piece can capture again.
    pub fn apply_move(&mut self, to: Square) -> Result<MoveOutcome, Rejection> {
        let dest = self.check_move(to).inspect_err(|reason| {
            debug!(%to, %reason, "move rejected");
        })?;
        // check_move guarantees a selection with a piece on it
        let Some(from) = self.selected() else {
            return Err(Rejection::NothingSelected);
        };

        self.board.relocate(from, to);
        let captured = match dest.kind {
            MoveKind::Capture { jumped } => {
                self.board.take(jumped);
                Some(jumped)
            }
            MoveKind::Simple => None,
        };

        let mut promoted = false;
        if let Some(piece) = self.board.get_mut(to) {
            if to.row() == piece.color.crowning_row() {
                promoted = piece.crown();
            }
        }
        info!(
            player = %self.to_move,
            %from,
            %to,
            captured = ?captured,
            promoted,
            "move applied"
        );

        let chain = match (captured, promoted, self.board.get(to)) {
            (Some(_), false, Some(piece)) => rules::captures_for(&self.board, piece, to),
            _ => Vec::new(),
        };

        let status = if chain.is_empty() {
            self.selection = None;
            self.to_move = self.to_move.opponent();
            info!(player = %self.to_move, "turn passes");
            TurnStatus::Ended
        } else {
            debug!(%to, captures = chain.len(), "capture must continue");
            self.selection = Some(Selection {
                square: to,
                destinations: chain,
                locked: true,
            });
            TurnStatus::Continues
        };

        Ok(MoveOutcome {
            from,
            to,
            captured,
            promoted,
            status,
        })
    }

    fn check_move(&self, to: Square) -> Result<Destination, Rejection> {
        let sel = self.selection.as_ref().ok_or(Rejection::NothingSelected)?;
        // Re-derive the piece from the board rather than trusting the selection
        match self.board.get(sel.square) {
            Some(piece) if piece.color == self.to_move => {}
            _ => return Err(Rejection::NoPiece(sel.square)),
        }
        if !to.is_dark() {
            return Err(Rejection::LightSquare(to));
        }
        sel.destinations
            .iter()
            .find(|d| d.to == to)
            .copied()
            .ok_or(Rejection::IllegalDestination(to))
    }

    /// Handle a click on `sq`: a piece click selects, an empty-cell click
    /// moves the selected piece there.
    pub fn click(&mut self, sq: Square) -> Result<ClickOutcome, Rejection> {
        if !self.board.is_empty(sq) {
            self.select(sq).map(|_| ClickOutcome::Selected(sq))
        } else if self.selection.is_some() {
            self.apply_move(sq).map(ClickOutcome::Moved)
        } else if !sq.is_dark() {
            Err(Rejection::LightSquare(sq))
        } else {
            Err(Rejection::NothingSelected)
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            to_move: self.to_move,
            selected: self.selected(),
            destinations: self.destinations().to_vec(),
        }
    }
}

impl fmt::Display for Snapshot {
    /// Board with `*` on simple destinations and `x` on capture landings,
    /// followed by the player on move and the selection.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board.render_with(|sq| {
            self.destinations
                .iter()
                .find(|d| d.to == sq)
                .map(|d| if d.is_capture() { 'x' } else { '*' })
        });
        write!(f, "{board}")?;
        write!(f, "to move: {}", self.to_move)?;
        if let Some(sq) = self.selected {
            write!(f, "\nselected: {sq}")?;
        }
        Ok(())
    }
}
