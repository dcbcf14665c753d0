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

use crate::{attempt::EngineError, color::Color, position::Position};

/// Counts legal move paths of a given length, starting with `turn` to move.
///
/// Every distinct legal displacement of every active piece is one node, as
/// listed by [`Position::legal_moves()`]. A side without legal moves ends its
/// paths early and contributes no nodes below it. Useful for comparing,
/// testing and debugging move generation correctness.
///
/// # Errors
///
/// See [`Position::evaluate()`].
///
/// # Examples
///
/// ```
/// use gambit::{perft, Color, Position};
///
/// let pos = Position::default();
/// assert_eq!(perft(&pos, Color::White, 1)?, 20);
/// assert_eq!(perft(&pos, Color::White, 2)?, 400);
/// # Ok::<_, gambit::EngineError>(())
/// ```
pub fn perft(pos: &Position, turn: Color, depth: u32) -> Result<u64, EngineError> {
    if depth < 1 {
        return Ok(1);
    }

    let legals = pos.legal_moves(turn)?;
    if depth == 1 {
        return Ok(legals.len() as u64);
    }

    legals
        .iter()
        .map(|m| {
            let mut child = pos.clone();
            child.play_unchecked(m);
            perft(&child, turn.other(), depth - 1)
        })
        .sum()
}
