//! Integration tests for draughts-rust
//!
//! Scenario tests driven through the public engine commands, from the
//! starting layout and from hand-built positions.

use draughts_rust::board::{Board, Color, Piece, Square};
use draughts_rust::engine::{ClickOutcome, Engine, TurnStatus};
use draughts_rust::error::Rejection;
use draughts_rust::rules::{has_capture, legal_destinations, mandatory_captures};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Parse a `row,col` square.
fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

/// Build a position from lists of squares. A leading `K` marks a king,
/// e.g. `setpos(&["5,2", "K7,0"], &["4,3"], Color::Red)`.
fn setpos(red: &[&str], black: &[&str], to_move: Color) -> Engine {
    let mut board = Board::empty();
    for (color, squares) in [(Color::Red, red), (Color::Black, black)] {
        for s in squares {
            match s.strip_prefix('K') {
                Some(rest) => board.put(sq(rest), Piece::king(color)),
                None => board.put(sq(s), Piece::man(color)),
            }
        }
    }
    Engine::from_board(board, to_move)
}

/// Select `from` and move to `to`, panicking on rejection.
fn play(engine: &mut Engine, from: &str, to: &str) -> draughts_rust::engine::MoveOutcome {
    engine
        .select(sq(from))
        .unwrap_or_else(|e| panic!("select {from}: {e}"));
    engine
        .apply_move(sq(to))
        .unwrap_or_else(|e| panic!("move {from} -> {to}: {e}"))
}

// =============================================================================
// Starting position
// =============================================================================

#[test]
fn test_starting_board() {
    let engine = Engine::new();
    let board = engine.board();
    assert_eq!(board.count(Color::Red), 12);
    assert_eq!(board.count(Color::Black), 12);
    for (square, piece) in board.pieces() {
        assert!(square.is_dark(), "piece on light square {square}");
        assert!(!piece.king);
        match piece.color {
            Color::Black => assert!(square.row() < 3),
            Color::Red => assert!(square.row() > 4),
        }
    }
    assert_eq!(engine.current_player(), Color::Red);
    assert_eq!(engine.selected(), None);
}

#[test]
fn test_destinations_stay_on_dark_squares() {
    let engine = setpos(
        &["K4,3", "1,0", "7,6", "3,2"],
        &["K0,7", "2,1", "5,4", "6,7"],
        Color::Red,
    );
    for (square, _) in engine.board().pieces() {
        for dest in legal_destinations(engine.board(), square) {
            assert!(dest.to.is_dark(), "{square} -> {} is light", dest.to);
        }
    }
}

// =============================================================================
// Capture scenarios
// =============================================================================

/// Red 5,2 jumps black 4,3 and lands on 3,4.
#[test]
fn test_opening_capture() {
    let mut engine = Engine::new();
    play(&mut engine, "5,0", "4,1");
    play(&mut engine, "2,3", "3,4");
    play(&mut engine, "4,1", "3,0");
    play(&mut engine, "3,4", "4,3");

    assert_eq!(engine.current_player(), Color::Red);
    assert_eq!(engine.mandatory_captures(), vec![sq("5,2"), sq("5,4")]);

    // Pieces outside the forced set are refused, and nothing changes
    let before = engine.snapshot();
    assert_eq!(
        engine.select(sq("6,1")),
        Err(Rejection::CaptureRequired(sq("6,1")))
    );
    assert_eq!(
        engine.select(sq("3,0")),
        Err(Rejection::CaptureRequired(sq("3,0")))
    );
    assert_eq!(engine.snapshot(), before);

    let outcome = play(&mut engine, "5,2", "3,4");
    assert_eq!(outcome.captured, Some(sq("4,3")));
    assert_eq!(outcome.status, TurnStatus::Ended);
    assert_eq!(engine.board().count(Color::Black), 11);
    assert_eq!(engine.board().count(Color::Red), 12);
    assert_eq!(engine.board().get(sq("3,4")), Some(Piece::man(Color::Red)));
    assert!(engine.board().is_empty(sq("4,3")));
    assert_eq!(engine.current_player(), Color::Black);
    assert_eq!(engine.selected(), None);

    // Black must now take back
    assert_eq!(engine.mandatory_captures(), vec![sq("2,5")]);
    assert_eq!(
        engine.select(sq("2,7")),
        Err(Rejection::CaptureRequired(sq("2,7")))
    );
}

#[test]
fn test_chained_capture_keeps_turn() {
    let mut engine = setpos(&["5,0", "7,6"], &["4,1", "2,3", "0,7"], Color::Red);
    assert_eq!(engine.mandatory_captures(), vec![sq("5,0")]);

    let outcome = play(&mut engine, "5,0", "3,2");
    assert_eq!(outcome.captured, Some(sq("4,1")));
    assert_eq!(outcome.status, TurnStatus::Continues);
    assert_eq!(engine.current_player(), Color::Red);
    assert_eq!(engine.selected(), Some(sq("3,2")));
    assert!(engine.is_chaining());
    assert_eq!(engine.mandatory_captures(), vec![sq("3,2")]);
    assert!(engine.destinations().iter().all(|d| d.is_capture()));

    // The chaining piece is locked in
    assert_eq!(
        engine.select(sq("7,6")),
        Err(Rejection::MustContinueCapture(sq("3,2")))
    );
    assert_eq!(
        engine.apply_move(sq("2,1")),
        Err(Rejection::IllegalDestination(sq("2,1")))
    );
    assert_eq!(engine.selected(), Some(sq("3,2")));

    let outcome = engine.apply_move(sq("1,4")).unwrap();
    assert_eq!(outcome.captured, Some(sq("2,3")));
    assert_eq!(outcome.status, TurnStatus::Ended);
    assert_eq!(engine.current_player(), Color::Black);
    assert_eq!(engine.selected(), None);
    assert_eq!(engine.board().count(Color::Black), 1);
}

#[test]
fn test_crowning_capture_ends_turn() {
    let mut engine = setpos(&["2,1"], &["1,2", "1,4"], Color::Red);
    let outcome = play(&mut engine, "2,1", "0,3");
    assert!(outcome.promoted);
    assert_eq!(outcome.captured, Some(sq("1,2")));
    assert_eq!(outcome.status, TurnStatus::Ended);
    assert_eq!(engine.current_player(), Color::Black);

    // The new king could take 1,4, but the turn is over
    let king = engine.board().get(sq("0,3")).unwrap();
    assert!(king.king);
    assert!(has_capture(engine.board(), king, sq("0,3")));
}

#[test]
fn test_king_long_range_chain() {
    let mut engine = setpos(&["K7,0"], &["5,2", "2,5", "0,1"], Color::Red);
    assert_eq!(engine.mandatory_captures(), vec![sq("7,0")]);

    let outcome = play(&mut engine, "7,0", "4,3");
    assert_eq!(outcome.captured, Some(sq("5,2")));
    assert_eq!(outcome.status, TurnStatus::Continues);
    assert!(!outcome.promoted);

    let outcome = engine.apply_move(sq("1,6")).unwrap();
    assert_eq!(outcome.captured, Some(sq("2,5")));
    assert_eq!(outcome.status, TurnStatus::Ended);
    assert!(engine.board().is_empty(sq("2,5")));
    assert_eq!(engine.board().count(Color::Black), 1);
    assert_eq!(engine.board().get(sq("1,6")), Some(Piece::king(Color::Red)));
}

#[test]
fn test_king_capture_is_mandatory_at_range() {
    let engine = setpos(&["K7,0", "6,5"], &["3,4"], Color::Red);
    assert_eq!(mandatory_captures(engine.board(), Color::Red), vec![sq("7,0")]);
}

#[test]
fn test_black_captures_backward() {
    let mut engine = setpos(&["6,1", "3,4"], &["4,3"], Color::Black);
    // 4,3 can jump 3,4 backward onto 2,5
    let dests = engine.select(sq("4,3")).unwrap().to_vec();
    assert_eq!(dests.len(), 1);
    assert_eq!(dests[0].to, sq("2,5"));
    let outcome = engine.apply_move(sq("2,5")).unwrap();
    assert_eq!(outcome.captured, Some(sq("3,4")));
    assert_eq!(engine.board().count(Color::Red), 1);
}

// =============================================================================
// Crowning
// =============================================================================

#[test]
fn test_red_reaches_far_row() {
    let mut engine = setpos(&["1,2"], &["3,6"], Color::Red);
    let outcome = play(&mut engine, "1,2", "0,1");
    assert!(outcome.promoted);
    assert_eq!(engine.board().get(sq("0,1")), Some(Piece::king(Color::Red)));

    play(&mut engine, "3,6", "4,7");

    let dests = legal_destinations(engine.board(), sq("0,1"));
    let targets: Vec<Square> = dests.iter().map(|d| d.to).collect();
    assert!(targets.contains(&sq("1,0")));
    assert!(targets.contains(&sq("1,2")));
    assert!(targets.contains(&sq("6,7")));

    let outcome = play(&mut engine, "0,1", "5,6");
    assert!(!outcome.promoted);
    assert_eq!(engine.current_player(), Color::Black);
}

#[test]
fn test_black_crowned_on_row_seven() {
    let mut engine = setpos(&["0,1"], &["6,3"], Color::Black);
    let outcome = play(&mut engine, "6,3", "7,4");
    assert!(outcome.promoted);
    assert_eq!(engine.board().get(sq("7,4")), Some(Piece::king(Color::Black)));
}

#[test]
fn test_king_returning_to_far_row_is_not_recrowned() {
    let mut engine = setpos(&["K2,1"], &["6,7"], Color::Red);
    let outcome = play(&mut engine, "2,1", "0,3");
    assert!(!outcome.promoted);
    assert_eq!(engine.board().get(sq("0,3")), Some(Piece::king(Color::Red)));
}

// =============================================================================
// Clicks and rejected input
// =============================================================================

#[test]
fn test_click_light_cell_is_harmless() {
    let mut engine = Engine::new();
    let before = engine.snapshot();
    for row in 0..8 {
        for col in 0..8 {
            let square = Square::new(row, col).unwrap();
            if !square.is_dark() {
                assert_eq!(engine.click(square), Err(Rejection::LightSquare(square)));
            }
        }
    }
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_click_drives_a_full_turn() {
    let mut engine = Engine::new();
    assert_eq!(engine.click(sq("5,6")), Ok(ClickOutcome::Selected(sq("5,6"))));
    assert_eq!(engine.snapshot().destinations.len(), 2);

    // Opponent piece click does not steal the selection
    assert!(engine.click(sq("2,5")).is_err());
    assert_eq!(engine.selected(), Some(sq("5,6")));

    let Ok(ClickOutcome::Moved(outcome)) = engine.click(sq("4,7")) else {
        panic!("expected a move");
    };
    assert_eq!(outcome.status, TurnStatus::Ended);
    assert_eq!(engine.current_player(), Color::Black);
    assert!(engine.snapshot().destinations.is_empty());
}

#[test]
fn test_rejected_move_changes_nothing() {
    let mut engine = Engine::new();
    engine.select(sq("5,2")).unwrap();
    let before = engine.snapshot();
    assert!(engine.apply_move(sq("3,4")).is_err());
    assert!(engine.apply_move(sq("5,2")).is_err());
    assert!(engine.apply_move(sq("7,7")).is_err());
    assert_eq!(engine.snapshot(), before);
}
