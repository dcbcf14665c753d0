use gambit::{
    Blocked, Capture, Color, Condition, Config, Game, Offset, PlayError, Position, Rejection,
    Setup, Square, Status,
};

fn game(layout: &str) -> Game {
    let setup: Setup = layout.parse().expect("valid layout");
    Game::from_setup(&setup, Config::default()).expect("legal layout")
}

fn play_all(game: &mut Game, moves: &[(Square, Square)]) {
    for &(from, to) in moves {
        if let Err(err) = game.play(from, to) {
            panic!("{from}{to}: {err}");
        }
    }
}

#[test]
fn test_pawn_double_step() {
    let pos = Position::default();
    let pawn = pos.piece_at(Square::A2).unwrap();
    let attempt = pos.evaluate(pawn, Offset::new(2, 0)).unwrap();
    assert!(attempt.is_legal());
    assert_eq!(attempt.to, Some(Square::A4));
    assert_eq!(attempt.capture, None);
}

#[test]
fn test_pawn_double_step_after_moving() {
    let mut game = Game::default();
    play_all(&mut game, &[(Square::A2, Square::A3), (Square::H7, Square::H6)]);
    let pawn = game.position().piece_at(Square::A3).unwrap();
    assert_eq!(
        game.play_offset(pawn, Offset::new(2, 0)),
        Err(PlayError::Rejected(Rejection::Condition(Condition::OnFirst)))
    );
}

#[test]
fn test_queen_check_answered_by_capture() {
    let mut game = Game::default();
    play_all(
        &mut game,
        &[
            (Square::A2, Square::A4),
            (Square::E7, Square::E5),
            (Square::F2, Square::F4),
            (Square::E5, Square::F4),
            (Square::A4, Square::A5),
        ],
    );

    let played = game.play(Square::D8, Square::H4).unwrap();
    assert!(played.check);
    assert!(!played.checkmate);

    game.play(Square::G2, Square::G3).unwrap();
    let played = game.play(Square::H4, Square::G3).unwrap();
    assert!(played.check);
    assert_eq!(played.attempt.capture.map(|c| c.square), Some(Square::G3));
    assert!(!played.checkmate);
    assert_eq!(game.status(), Status::Ongoing);

    // h2xg3 resolves the check.
    let played = game.play(Square::H2, Square::G3).unwrap();
    assert!(played.attempt.is_capture());
    assert!(!game.position().is_check(Color::White).unwrap());
}

#[test]
fn test_fools_mate() {
    let mut game = Game::default();
    play_all(
        &mut game,
        &[
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
        ],
    );
    let played = game.play(Square::D8, Square::H4).unwrap();
    assert!(played.check);
    assert!(played.checkmate);
    assert_eq!(game.status(), Status::Checkmate { winner: Color::Black });
    assert!(game.legal_moves().unwrap().is_empty());
    assert!(game.position().is_checkmate(Color::White).unwrap());

    assert_eq!(
        game.play(Square::E1, Square::F2),
        Err(PlayError::GameOver(Status::Checkmate { winner: Color::Black }))
    );
}

#[test]
fn test_knight_jumps_over_pieces() {
    let game = game("4k3/8/8/8/8/1P6/PPPP4/RN2K3 w");
    let pos = game.position();
    let knight = pos.piece_at(Square::B1).unwrap();
    let attempt = pos.evaluate(knight, Offset::new(2, 1)).unwrap();
    assert!(attempt.is_legal());
    assert_eq!(attempt.to, Some(Square::C3));

    assert!(pos.evaluate(knight, Offset::new(2, -1)).unwrap().is_legal());
    let attempt = pos.evaluate(knight, Offset::new(1, 2)).unwrap();
    assert_eq!(
        attempt.rejection,
        Some(Rejection::PathBlocked(Blocked::Knight { square: Square::D2 }))
    );
}

#[test]
fn test_slide_through_occupied_square() {
    let game = game("4k3/8/8/8/8/P7/8/R3K3 w");
    let pos = game.position();
    let rook = pos.piece_at(Square::A1).unwrap();
    let attempt = pos.evaluate(rook, Offset::new(4, 0)).unwrap();
    assert_eq!(
        attempt.rejection,
        Some(Rejection::PathBlocked(Blocked::General { square: Square::A3 }))
    );
    assert!(pos.evaluate(rook, Offset::new(1, 0)).unwrap().is_legal());
    assert_eq!(
        pos.evaluate(rook, Offset::new(2, 0)).unwrap().rejection,
        Some(Rejection::PathBlocked(Blocked::General { square: Square::A3 }))
    );
}

#[test]
fn test_en_passant() {
    let mut game = Game::default();
    play_all(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
        ],
    );
    let victim = game.position().piece_at(Square::D5).unwrap();

    let played = game.play(Square::E5, Square::D6).unwrap();
    assert_eq!(
        played.attempt.capture,
        Some(Capture {
            piece: victim,
            square: Square::D5
        })
    );
    assert_eq!(game.position().piece_at(Square::D5), None);
    assert!(game.position().piece(victim).unwrap().captured);
    assert_eq!(game.position().active(Color::Black).count(), 15);
}

#[test]
fn test_en_passant_expires() {
    let mut game = Game::default();
    play_all(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
            (Square::H2, Square::H3),
            (Square::A6, Square::A5),
        ],
    );
    assert_eq!(
        game.play(Square::E5, Square::D6),
        Err(PlayError::Rejected(Rejection::Condition(Condition::EnPassant)))
    );
}

#[test]
fn test_en_passant_needs_double_step() {
    let mut game = Game::default();
    play_all(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::D7, Square::D6),
            (Square::E4, Square::E5),
            (Square::D6, Square::D5),
        ],
    );
    assert_eq!(
        game.play(Square::E5, Square::D6),
        Err(PlayError::Rejected(Rejection::Condition(Condition::EnPassant)))
    );
}

#[test]
fn test_turn_limit() {
    let mut game = Game::new(Config {
        turn_limit: 4,
        ..Config::default()
    });
    play_all(
        &mut game,
        &[
            (Square::G1, Square::F3),
            (Square::G8, Square::F6),
            (Square::F3, Square::G1),
        ],
    );
    assert_eq!(game.status(), Status::Ongoing);
    game.play(Square::F6, Square::G8).unwrap();
    assert_eq!(game.status(), Status::DrawByTurnLimit);
    assert_eq!(
        game.play(Square::G1, Square::F3),
        Err(PlayError::GameOver(Status::DrawByTurnLimit))
    );
}

#[test]
fn test_checkmate_beats_turn_limit() {
    let mut game = Game::new(Config {
        turn_limit: 4,
        ..Config::default()
    });
    play_all(
        &mut game,
        &[
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
            (Square::D8, Square::H4),
        ],
    );
    assert_eq!(game.status(), Status::Checkmate { winner: Color::Black });
}

#[test]
fn test_rejection_leaves_game_unchanged() {
    let mut game = Game::default();
    game.play(Square::E2, Square::E4).unwrap();
    let before = game.clone();

    assert!(matches!(
        game.play(Square::D8, Square::D5),
        Err(PlayError::Rejected(Rejection::PathBlocked(_)))
    ));
    assert!(matches!(
        game.play(Square::B8, Square::B6),
        Err(PlayError::Rejected(Rejection::Shape))
    ));
    assert_eq!(game.position(), before.position());
    assert_eq!(game.turn(), before.turn());
    assert_eq!(game.turns(), before.turns());
    assert_eq!(game.status(), before.status());
}

#[test]
fn test_king_may_not_walk_into_check() {
    let mut game = game("4k3/8/8/8/8/8/3r4/4K3 w");
    let king = game.position().piece_at(Square::E1).unwrap();
    let rook = game.position().piece_at(Square::D2).unwrap();
    assert_eq!(
        game.play(Square::E1, Square::E2),
        Err(PlayError::Rejected(Rejection::KingExposed {
            attacker: rook,
            role: gambit::Role::Rook,
            square: Square::D2,
        }))
    );
    let played = game.play(Square::E1, Square::D2).unwrap();
    assert_eq!(played.attempt.piece, king);
    assert!(played.attempt.is_capture());
}

#[test]
fn test_discovered_check_not_reported() {
    let mut game = game("4k3/8/8/8/8/8/4N3/4R1K1 w");
    let played = game.play(Square::E2, Square::C3).unwrap();
    assert!(!played.check);
    assert!(game.position().is_check(Color::Black).unwrap());

    // Black still has to answer it.
    assert!(matches!(
        game.play(Square::E8, Square::E7),
        Err(PlayError::Rejected(Rejection::KingExposed { .. }))
    ));
    game.play(Square::E8, Square::D7).unwrap();
}

#[test]
fn test_evaluation_is_idempotent() {
    let mut game = Game::default();
    play_all(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::D7, Square::D5),
            (Square::F1, Square::B5),
        ],
    );
    let pos = game.position().clone();
    let pawn = pos.piece_at(Square::A7).unwrap();

    let first = pos.evaluate(pawn, Offset::new(-1, 0)).unwrap();
    let second = pos.evaluate(pawn, Offset::new(-1, 0)).unwrap();
    assert_eq!(first, second);
    assert!(matches!(
        first.rejection,
        Some(Rejection::KingExposed { .. })
    ));
    assert_eq!(&pos, game.position());

    let moves = pos.legal_moves(Color::Black).unwrap();
    assert_eq!(moves, pos.legal_moves(Color::Black).unwrap());
    assert_eq!(&pos, game.position());
}

#[test]
fn test_shapes_and_bounds() {
    let pos = Position::default();
    for color in Color::ALL {
        for id in pos.active(color) {
            let piece = pos.piece(id).unwrap();
            let template = piece.template();
            for up in -8..=8 {
                for right in -8..=8 {
                    let offset = Offset::new(up, right);
                    let attempt = pos.evaluate(id, offset).unwrap();
                    if !template.has_shape(offset) {
                        assert_eq!(attempt.rejection, Some(Rejection::Shape));
                    } else if piece.square.offset(offset).is_none() {
                        assert!(matches!(
                            attempt.rejection,
                            Some(Rejection::OutOfBounds { .. })
                        ));
                        assert_eq!(attempt.to, None);
                    } else {
                        assert_eq!(attempt.to, piece.square.offset(offset));
                    }
                }
            }
        }
    }
}

#[test]
fn test_pawns_never_take_straight_ahead() {
    let game = game("4k3/8/8/8/3p4/3P4/8/4K3 w");
    let pos = game.position();
    let white = pos.piece_at(Square::D3).unwrap();
    let black = pos.piece_at(Square::D4).unwrap();
    assert_eq!(
        pos.evaluate(white, Offset::new(1, 0)).unwrap().rejection,
        Some(Rejection::PathBlocked(Blocked::PawnForward { square: Square::D4 }))
    );
    assert_eq!(
        pos.evaluate(black, Offset::new(-1, 0)).unwrap().rejection,
        Some(Rejection::PathBlocked(Blocked::PawnForward { square: Square::D3 }))
    );
    assert_eq!(
        pos.evaluate(white, Offset::new(1, 1)).unwrap().rejection,
        Some(Rejection::Condition(Condition::EnPassant))
    );
}

#[test]
fn test_far_displacement_is_not_a_shape() {
    let mut game = Game::default();
    let pawn = game.position().piece_at(Square::A2).unwrap();
    let before = game.clone();
    assert_eq!(
        game.play_offset(pawn, Offset::new(i8::MAX, i8::MAX)),
        Err(PlayError::Rejected(Rejection::Shape))
    );
    assert_eq!(game.position(), before.position());
    assert_eq!(game.turn(), Color::White);

    let rook = game.position().piece_at(Square::H1).unwrap();
    let attempt = game.position().reaches(rook, Offset::new(i8::MIN, 0)).unwrap();
    assert_eq!(attempt.rejection, Some(Rejection::Shape));
}
