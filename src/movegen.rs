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
    piece::PieceId,
    position::Position,
};

/// Legal moves of a single piece, stored inline. The largest template has 64
/// distinct shapes.
pub type MoveList = ArrayVec<MoveAttempt, 64>;

/// Legal moves grouped by piece.
///
/// # Examples
///
/// ```
/// use gambit::{Position, Square};
///
/// let pos = Position::default();
/// let knight = pos.piece_at(Square::G1).unwrap();
/// let king = pos.piece_at(Square::E1).unwrap();
///
/// let legals = pos.legal_moves_of([knight, king])?;
/// assert_eq!(legals.len(), 2);
/// assert_eq!(legals.get(knight).map(|moves| moves.len()), Some(2));
/// assert_eq!(legals.get(king).map(|moves| moves.len()), Some(0));
/// # Ok::<_, gambit::EngineError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LegalMoves {
    by_piece: Vec<(PieceId, MoveList)>,
    total: usize,
}

impl LegalMoves {
    pub(crate) fn push(&mut self, piece: PieceId, moves: MoveList) {
        self.total += moves.len();
        self.by_piece.push((piece, moves));
    }

    /// Total number of legal moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Moves of `piece`, or `None` if it was not requested.
    pub fn get(&self, piece: PieceId) -> Option<&MoveList> {
        self.by_piece
            .iter()
            .find(|(id, _)| *id == piece)
            .map(|(_, moves)| moves)
    }

    /// Requested pieces and their moves, in request order.
    pub fn by_piece(&self) -> impl Iterator<Item = (PieceId, &MoveList)> + '_ {
        self.by_piece.iter().map(|(id, moves)| (*id, moves))
    }

    /// All moves, grouped by piece in request order.
    pub fn iter(&self) -> impl Iterator<Item = &MoveAttempt> + '_ {
        self.by_piece.iter().flat_map(|(_, moves)| moves.iter())
    }
}

/// Evaluates every distinct shape of the piece's template and keeps the legal
/// attempts.
pub(crate) fn piece_moves(pos: &Position, id: PieceId) -> Result<MoveList, EngineError> {
    let piece = pos
        .piece(id)
        .filter(|p| p.is_active())
        .ok_or(EngineError::NotInPlay { piece: id })?;

    let mut moves = MoveList::new();
    for shape in piece.template().shapes() {
        let attempt = pos.evaluate(id, shape)?;
        if attempt.is_legal() {
            moves.push(attempt);
        }
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, setup::Setup, square::Square};

    #[test]
    fn test_start_position() {
        let pos = Position::default();
        let legals = pos.legal_moves(Color::White).unwrap();
        assert_eq!(legals.len(), 20);
        assert_eq!(legals.by_piece().count(), 16);
        assert_eq!(legals.iter().count(), 20);
        assert!(legals.iter().all(|m| m.is_legal() && m.capture.is_none()));
    }

    #[test]
    fn test_pawn_diagonals_counted_once() {
        let pos: Position = "4k3/8/8/8/8/3p1p2/4P3/4K3 w"
            .parse::<Setup>()
            .unwrap()
            .position()
            .unwrap();
        let pawn = pos.piece_at(Square::E2).unwrap();
        let legals = pos.legal_moves_of([pawn]).unwrap();
        assert_eq!(legals.len(), 4);
    }

    #[test]
    fn test_lone_kings() {
        let pos: Position = "8/8/8/8/8/8/8/K6k w".parse::<Setup>().unwrap().position().unwrap();
        assert_eq!(pos.legal_moves(Color::White).unwrap().len(), 3);
        assert_eq!(pos.legal_moves(Color::Black).unwrap().len(), 3);
    }
}
