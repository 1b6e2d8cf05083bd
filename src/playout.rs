//! Random play through the public engine commands.
//!
//! A playout picks a random movable piece and a random offered destination
//! each ply, exactly as a user clicking at random would. It drives the
//! `demo` command and the invariant tests; it is not an opponent.

use tracing::warn;

use crate::engine::{Engine, TurnStatus};

/// Summary of a random game.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlayoutReport {
    /// Moves applied (each step of a chained capture counts as one)
    pub plies: usize,
    /// Turns completed
    pub turns: usize,
    pub captures: usize,
    pub promotions: usize,
    /// The side to move had no movable piece
    pub stalled: bool,
}

/// Play up to `max_plies` random legal moves on `engine`.
///
/// Stops early when the side to move has nothing to move.
pub fn random_game(engine: &mut Engine, max_plies: usize, rng: &mut fastrand::Rng) -> PlayoutReport {
    let mut report = PlayoutReport::default();

    while report.plies < max_plies {
        let Some(from) = choose(&engine.movable_pieces(), rng) else {
            report.stalled = true;
            break;
        };
        let to = match engine.select(from) {
            Ok(destinations) => match choose(destinations, rng) {
                Some(dest) => dest.to,
                None => {
                    warn!(%from, "movable piece offered no destination");
                    break;
                }
            },
            Err(reason) => {
                warn!(%from, %reason, "movable piece refused");
                break;
            }
        };
        let outcome = match engine.apply_move(to) {
            Ok(outcome) => outcome,
            Err(reason) => {
                warn!(%from, %to, %reason, "offered destination refused");
                break;
            }
        };

        report.plies += 1;
        if outcome.captured.is_some() {
            report.captures += 1;
        }
        if outcome.promoted {
            report.promotions += 1;
        }
        if outcome.status == TurnStatus::Ended {
            report.turns += 1;
        }
    }

    report
}

/// Pick a uniformly random element.
fn choose<T: Copy>(items: &[T], rng: &mut fastrand::Rng) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.usize(..items.len())])
}
