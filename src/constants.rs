//! Constants for board geometry and command-line defaults.
//!
//! The board is a plain 8x8 array indexed `row * N + col`, with row 0 at the
//! top. Black starts on the top rows and moves down; red starts on the bottom
//! rows and moves up.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Total number of cells on the board.
pub const BOARDSIZE: usize = N * N;

/// Rows filled with pieces for each side in the starting layout.
pub const HOME_ROWS: usize = 3;

/// Pieces per side in the starting layout (half the cells of the home rows are dark).
pub const PIECES_PER_SIDE: usize = HOME_ROWS * N / 2;

/// Diagonal directions as (row delta, col delta).
/// Order: up-right, down-right, down-left, up-left
pub const DIAGONALS: [(isize, isize); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];

// =============================================================================
// Demo Defaults
// =============================================================================

/// Default number of plies played by the `demo` command.
pub const DEMO_PLIES: usize = 40;

/// Default seed for the `demo` command.
pub const DEMO_SEED: u64 = 1;
