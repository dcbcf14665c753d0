// This file is part of the gambit library.
// Copyright (C) 2024 The gambit developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use arrayvec::ArrayVec;

use crate::{
    attempt::{EngineError, MoveAttempt},
    board::Board,
    color::{ByColor, Color},
    evaluate::{self, Scene},
    movegen::{self, LegalMoves},
    piece::{Label, Piece, PieceId},
    role::Role,
    setup::{is_home_square, Setup, MAX_PIECES_PER_TEAM},
    square::{Offset, Square},
};

/// Maximum number of pieces in the registry.
pub const MAX_PIECES: usize = 2 * MAX_PIECES_PER_TEAM;

/// The most recently applied move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LastMove {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
}

/// A position: the piece registry, the board, and the last move.
///
/// The side to move is not part of the position. It is tracked by
/// [`Game`](crate::Game), or passed explicitly.
///
/// # Examples
///
/// ```
/// use gambit::{Color, Offset, Position, Square};
///
/// let pos = Position::default();
/// let pawn = pos.piece_at(Square::A2).unwrap();
///
/// let attempt = pos.evaluate(pawn, Offset::new(2, 0))?;
/// assert!(attempt.is_legal());
/// assert_eq!(attempt.to, Some(Square::A4));
///
/// assert_eq!(pos.legal_moves(Color::White)?.len(), 20);
/// # Ok::<_, gambit::EngineError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    pieces: ArrayVec<Piece, MAX_PIECES>,
    board: Board,
    last_move: Option<LastMove>,
}

impl Default for Position {
    /// The standard starting position.
    fn default() -> Position {
        Position::from_setup_unchecked(&Setup::default())
    }
}

impl Position {
    /// Registers the pieces of `setup` in square order. The setup must have
    /// been checked to hold at most [`MAX_PIECES`] pieces.
    pub(crate) fn from_setup_unchecked(setup: &Setup) -> Position {
        let mut totals = ByColor::<[u8; 6]>::default();
        for (_, color, role) in setup.pieces() {
            totals.get_mut(color)[role as usize - 1] += 1;
        }

        let mut ordinals = ByColor::<[u8; 6]>::default();
        let mut pos = Position {
            pieces: ArrayVec::new(),
            board: Board::empty(),
            last_move: None,
        };

        for (square, color, role) in setup.pieces().take(MAX_PIECES) {
            let ordinal = &mut ordinals.get_mut(color)[role as usize - 1];
            *ordinal += 1;
            let id = PieceId(pos.pieces.len() as u8);
            pos.pieces.push(Piece {
                color,
                role,
                square,
                moves: u32::from(!is_home_square(square, color, role)),
                captured: false,
                label: Label {
                    color,
                    role,
                    ordinal: (totals.get(color)[role as usize - 1] > 1).then_some(*ordinal),
                },
            });
            pos.board.set_piece_at(square, id, color);
        }

        pos
    }

    /// Every registered piece, captured ones included, indexed by
    /// [`PieceId`].
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<PieceId> {
        self.board.piece_at(sq)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Pieces of `color` still in play, in registry order.
    pub fn active(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.color == color && p.is_active())
            .map(|(i, _)| PieceId(i as u8))
    }

    pub fn king_of(&self, color: Color) -> Option<PieceId> {
        self.active(color)
            .find(|&id| self.pieces[id.index()].role == Role::King)
    }

    /// Fully evaluates displacing `piece` by `offset`, including whether the
    /// move would leave its own king attacked.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if `piece` is not in play, or if an internal
    /// invariant is violated. Illegal moves are not errors: they are
    /// reported in [`MoveAttempt::rejection`].
    pub fn evaluate(&self, piece: PieceId, offset: Offset) -> Result<MoveAttempt, EngineError> {
        evaluate::evaluate(self, piece, offset)
    }

    /// Whether `piece` could be displaced by `offset` according to its
    /// template, path and conditions, ignoring the safety of its own king.
    ///
    /// # Errors
    ///
    /// See [`Position::evaluate()`].
    pub fn reaches(&self, piece: PieceId, offset: Offset) -> Result<MoveAttempt, EngineError> {
        evaluate::candidate(&Scene::new(self), piece, offset)
    }

    /// Legal moves of the given pieces. Every requested piece is listed,
    /// possibly with no moves.
    ///
    /// # Errors
    ///
    /// See [`Position::evaluate()`].
    pub fn legal_moves_of<I>(&self, pieces: I) -> Result<LegalMoves, EngineError>
    where
        I: IntoIterator<Item = PieceId>,
    {
        let mut legals = LegalMoves::default();
        for id in pieces {
            legals.push(id, movegen::piece_moves(self, id)?);
        }
        Ok(legals)
    }

    /// Legal moves of every piece of `color` still in play.
    ///
    /// # Errors
    ///
    /// See [`Position::evaluate()`].
    pub fn legal_moves(&self, color: Color) -> Result<LegalMoves, EngineError> {
        self.legal_moves_of(self.active(color))
    }

    /// Whether `moved` attacks the enemy king from where it stands.
    ///
    /// Only the given piece is tested, so checks discovered by moving
    /// another piece out of the way are not reported.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotInPlay`] if `moved` is not in play.
    pub fn gives_check(&self, moved: PieceId) -> Result<bool, EngineError> {
        let piece = self
            .piece(moved)
            .filter(|p| p.is_active())
            .ok_or(EngineError::NotInPlay { piece: moved })?;
        let Some(king) = self.king_of(piece.color.other()) else {
            return Ok(false);
        };
        let target = self.pieces[king.index()].square;
        Ok(self.reaches(moved, piece.square.offset_to(target))?.is_legal())
    }

    /// Whether any enemy piece attacks the king of `color`.
    ///
    /// # Errors
    ///
    /// See [`Position::evaluate()`].
    pub fn is_check(&self, color: Color) -> Result<bool, EngineError> {
        Ok(evaluate::king_exposure(&Scene::new(self), color)?.is_some())
    }

    /// Whether `color` has at least one legal move. Stops at the first piece
    /// that can move.
    ///
    /// # Errors
    ///
    /// See [`Position::evaluate()`].
    pub fn has_legal_moves(&self, color: Color) -> Result<bool, EngineError> {
        for id in self.active(color) {
            if !movegen::piece_moves(self, id)?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `color` is in check and has no legal move.
    ///
    /// # Errors
    ///
    /// See [`Position::evaluate()`].
    pub fn is_checkmate(&self, color: Color) -> Result<bool, EngineError> {
        Ok(self.is_check(color)? && !self.has_legal_moves(color)?)
    }

    /// Applies a move without validating it.
    ///
    /// The mover's move count increments. A captured piece is flagged and
    /// leaves the board. Attempts without a destination are ignored.
    pub fn play_unchecked(&mut self, attempt: &MoveAttempt) {
        let Some(to) = attempt.to else {
            return;
        };

        if let Some(capture) = attempt.capture {
            self.board.discard_piece_at(capture.square);
            if let Some(victim) = self.pieces.get_mut(capture.piece.index()) {
                victim.captured = true;
            }
        }

        let Some(piece) = self.pieces.get_mut(attempt.piece.index()) else {
            return;
        };
        self.board.discard_piece_at(attempt.from);
        self.board.set_piece_at(to, attempt.piece, piece.color);
        piece.square = to;
        piece.moves += 1;

        self.last_move = Some(LastMove {
            piece: attempt.piece,
            from: attempt.from,
            to,
        });
    }
}
