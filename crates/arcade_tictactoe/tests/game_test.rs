//! Tests for board evaluation and turn-enforced play.

use arcade_tictactoe::{
    Board, Game, InvalidMove, Mark, Move, Outcome, Position, Square, apply_move,
    check_invariants, evaluate, legal_moves,
};

/// Walks every game reachable from empty, calling `visit` on each snapshot.
fn walk(game: Game, visit: &mut impl FnMut(&Game)) {
    visit(&game);
    for pos in game.valid_moves() {
        walk(game.play(pos).expect("valid move"), visit);
    }
}

#[test]
fn test_reachable_boards_respect_invariants() {
    let mut visited = 0usize;
    walk(Game::new(), &mut |game| {
        visited += 1;
        let board = game.board();
        assert!(check_invariants(board).is_ok(), "{}", board.notation());

        // Legal moves and occupied squares partition the nine indices.
        let legal = legal_moves(board);
        let occupied = board
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();
        assert_eq!(legal.len() + occupied, 9);
        assert_eq!(legal.len() + game.history().len(), 9);
    });
    // Number of distinct move sequences, every prefix included.
    assert_eq!(visited, 549_946);
}

#[test]
fn test_outcome_in_progress_until_line_or_full() {
    walk(Game::new(), &mut |game| {
        let board = game.board();
        let full = legal_moves(board).is_empty();
        let outcome = evaluate(board);
        match outcome {
            Outcome::InProgress => assert!(!full),
            Outcome::Draw => assert!(full),
            Outcome::PlayerWin | Outcome::OpponentWin => {
                // The last mover completed the line.
                let last = game.history().last().expect("a win needs moves");
                assert_eq!(outcome.winner(), Some(last.mark));
            }
        }
    });
}

#[test]
fn test_occupied_square_rejected_and_board_unchanged() {
    let board: Board = "X...O....".parse().unwrap();
    let before = board;
    assert_eq!(
        apply_move(&board, 4, Mark::X),
        Err(InvalidMove::SquareOccupied(Position::Center))
    );
    assert_eq!(board, before);
}

#[test]
fn test_replay_from_history() {
    use Position::*;
    let game = Game::replay(&[Center, TopLeft, BottomRight, TopRight, BottomLeft]).unwrap();
    assert_eq!(game.history().len(), 5);
    assert_eq!(game.to_move(), Some(Mark::O));
    assert_eq!(game.outcome(), Outcome::InProgress);
}

#[test]
fn test_win_detection() {
    use Position::*;
    let game = Game::replay(&[TopLeft, Center, TopCenter, BottomLeft, TopRight]).unwrap();
    assert_eq!(game.outcome(), Outcome::PlayerWin);
}

#[test]
fn test_draw_detection() {
    use Position::*;
    let game = Game::replay(&[
        TopLeft,
        Center,
        TopRight,
        TopCenter,
        MiddleLeft,
        MiddleRight,
        BottomCenter,
        BottomLeft,
        BottomRight,
    ])
    .unwrap();
    assert_eq!(game.outcome(), Outcome::Draw);
}

#[test]
fn test_restart_gives_empty_game() {
    use Position::*;
    let game = Game::replay(&[TopLeft, Center, TopCenter, BottomLeft, TopRight]).unwrap();
    let fresh = game.restart();
    assert!(fresh.board().is_blank());
    assert!(fresh.history().is_empty());
    assert_eq!(fresh.to_move(), Some(Mark::X));
}

#[test]
fn test_explicit_moves_check_turn() {
    let game = Game::new();
    let game = game
        .make_move(Move::new(Mark::X, Position::Center))
        .expect("X moves first");
    assert_eq!(
        game.make_move(Move::new(Mark::X, Position::TopLeft)),
        Err(InvalidMove::WrongTurn(Mark::X))
    );
}

#[test]
fn test_game_serializes() {
    let game = Game::new().play(Position::Center).unwrap();
    let json = serde_json::to_string(&game).unwrap();
    let back: Game = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game);
}
