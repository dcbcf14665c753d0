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

//! Square to piece mapping.

use std::fmt;

use crate::{
    bitboard::Bitboard,
    color::{ByColor, Color},
    piece::PieceId,
    square::Square,
};

/// Occupancy of the 64 squares: which [`PieceId`] stands where, plus
/// occupancy bitboards for each team.
///
/// Only [`Position`](crate::Position) mutates a board, keeping it consistent
/// with the squares recorded in its piece registry.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<PieceId>; 64],
    by_color: ByColor<Bitboard>,
}

impl Board {
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
            by_color: ByColor {
                white: Bitboard::EMPTY,
                black: Bitboard::EMPTY,
            },
        }
    }

    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<PieceId> {
        self.squares[sq.index()]
    }

    #[inline]
    pub const fn by_color(&self, color: Color) -> Bitboard {
        *self.by_color.get(color)
    }

    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        Bitboard(self.by_color.white.0 | self.by_color.black.0)
    }

    #[inline]
    pub const fn color_at(&self, sq: Square) -> Option<Color> {
        if self.by_color.white.contains(sq) {
            Some(Color::White)
        } else if self.by_color.black.contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub(crate) fn set_piece_at(&mut self, sq: Square, id: PieceId, color: Color) {
        self.discard_piece_at(sq);
        self.squares[sq.index()] = Some(id);
        self.by_color.get_mut(color).add(sq);
    }

    pub(crate) fn discard_piece_at(&mut self, sq: Square) -> Option<PieceId> {
        self.by_color.white.discard(sq);
        self.by_color.black.discard(sq);
        self.squares[sq.index()].take()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("white", &self.by_color.white)
            .field("black", &self.by_color.black)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_discard() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, PieceId(4), Color::White);
        board.set_piece_at(Square::E8, PieceId(28), Color::Black);
        assert_eq!(board.piece_at(Square::E1), Some(PieceId(4)));
        assert_eq!(board.color_at(Square::E8), Some(Color::Black));
        assert_eq!(board.occupied().count(), 2);

        board.set_piece_at(Square::E8, PieceId(4), Color::White);
        assert_eq!(board.color_at(Square::E8), Some(Color::White));
        assert!(board.by_color(Color::Black).is_empty());

        assert_eq!(board.discard_piece_at(Square::E1), Some(PieceId(4)));
        assert_eq!(board.piece_at(Square::E1), None);
        assert_eq!(board.occupied(), Bitboard::from_square(Square::E8));
    }
}
