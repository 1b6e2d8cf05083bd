//! Move legality for English draughts.
//!
//! These are pure queries over a [`Board`]; they never change it. The
//! [`Engine`](crate::engine::Engine) layers turn order, selection and
//! the mandatory-capture filter on top of them.
//!
//! - Men step one cell diagonally forward and jump two cells diagonally in
//!   any of the four directions.
//! - Kings fly: they slide any distance along an empty diagonal, and capture
//!   by jumping the first piece met on a diagonal when it is an opponent's
//!   and the cell right behind it is empty.

use crate::board::{Board, Color, Piece, Square};
use crate::constants::DIAGONALS;

/// How a destination is reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// A plain step or slide
    Simple,
    /// A jump removing the opponent piece on `jumped`
    Capture { jumped: Square },
}

/// A cell the piece may move to, and how.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub to: Square,
    pub kind: MoveKind,
}

impl Destination {
    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture { .. })
    }

    /// The square of the piece this move removes, if any.
    pub fn jumped(&self) -> Option<Square> {
        match self.kind {
            MoveKind::Capture { jumped } => Some(jumped),
            MoveKind::Simple => None,
        }
    }
}

/// Check whether the piece on `sq` can capture anything right now.
///
/// Kings use the same long-range ray walk as [`legal_destinations`], so a
/// king facing a distant opponent piece with an empty cell behind it counts.
pub fn has_capture(board: &Board, piece: Piece, sq: Square) -> bool {
    if piece.king {
        king_destinations(board, piece, sq)
            .iter()
            .any(Destination::is_capture)
    } else {
        man_jumps(board, piece, sq).next().is_some()
    }
}

/// All squares holding a piece of `player` that can capture.
///
/// Empty when no piece of that player has a capture.
pub fn mandatory_captures(board: &Board, player: Color) -> Vec<Square> {
    board
        .pieces()
        .filter(|&(sq, piece)| piece.color == player && has_capture(board, piece, sq))
        .map(|(sq, _)| sq)
        .collect()
}

/// Every destination of the piece on `sq`, simple moves and captures alike.
///
/// This ignores turn order and the mandatory-capture rule.
///
/// # Panics
/// If `sq` is empty.
pub fn legal_destinations(board: &Board, sq: Square) -> Vec<Destination> {
    let Some(piece) = board.get(sq) else {
        panic!("legal_destinations called on empty square {sq}");
    };
    destinations_for(board, piece, sq)
}

pub(crate) fn destinations_for(board: &Board, piece: Piece, sq: Square) -> Vec<Destination> {
    if piece.king {
        return king_destinations(board, piece, sq);
    }
    let forward = piece.color.forward();
    let mut out: Vec<Destination> = [-1, 1]
        .into_iter()
        .filter_map(|dc| sq.offset(forward, dc))
        .filter(|to| to.is_dark() && board.is_empty(*to))
        .map(|to| Destination {
            to,
            kind: MoveKind::Simple,
        })
        .collect();
    out.extend(man_jumps(board, piece, sq));
    out
}

/// The capture destinations of the piece on `sq`.
pub(crate) fn captures_for(board: &Board, piece: Piece, sq: Square) -> Vec<Destination> {
    if piece.king {
        let mut out = king_destinations(board, piece, sq);
        out.retain(Destination::is_capture);
        out
    } else {
        man_jumps(board, piece, sq).collect()
    }
}

/// Two-cell jumps in all four diagonal directions.
fn man_jumps(board: &Board, piece: Piece, sq: Square) -> impl Iterator<Item = Destination> + '_ {
    DIAGONALS.into_iter().filter_map(move |(dr, dc)| {
        let jumped = sq.offset(dr, dc)?;
        let to = sq.offset(2 * dr, 2 * dc)?;
        let victim = board.get(jumped)?;
        (victim.color != piece.color && to.is_dark() && board.is_empty(to)).then_some(Destination {
            to,
            kind: MoveKind::Capture { jumped },
        })
    })
}

/// Walk each diagonal outward. Empty cells before the first piece are simple
/// destinations; an opponent piece followed by an empty cell gives one
/// capture landing and ends the ray, as does any own piece.
fn king_destinations(board: &Board, piece: Piece, sq: Square) -> Vec<Destination> {
    let mut out = Vec::new();
    for (dr, dc) in DIAGONALS {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, dc) {
            match board.get(next) {
                None => {
                    out.push(Destination {
                        to: next,
                        kind: MoveKind::Simple,
                    });
                    cur = next;
                }
                Some(other) => {
                    if other.color != piece.color {
                        if let Some(to) = next.offset(dr, dc).filter(|to| board.is_empty(*to)) {
                            out.push(Destination {
                                to,
                                kind: MoveKind::Capture { jumped: next },
                            });
                        }
                    }
                    break;
                }
            }
        }
    }
    out
}
