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

use std::{error::Error, fmt, str::FromStr};

/// A column of the board, displayed as a letter `A` to `H`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// Gets the file from its 1-based number.
    #[inline]
    pub const fn from_number(number: i8) -> Option<File> {
        Some(match number {
            1 => File::A,
            2 => File::B,
            3 => File::C,
            4 => File::D,
            5 => File::E,
            6 => File::F,
            7 => File::G,
            8 => File::H,
            _ => return None,
        })
    }

    /// 1-based number of the file, `A` being 1.
    #[inline]
    pub const fn number(self) -> i8 {
        self as i8 + 1
    }

    pub fn from_char(ch: char) -> Option<File> {
        match ch.to_ascii_uppercase() {
            c @ 'A'..='H' => File::from_number((c as u8 - b'A') as i8 + 1),
            _ => None,
        }
    }

    pub const fn char(self) -> char {
        (b'A' + self as u8) as char
    }

    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A row of the board, counted from white's side.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    First = 0,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    /// Gets the rank from its 1-based number.
    #[inline]
    pub const fn from_number(number: i8) -> Option<Rank> {
        Some(match number {
            1 => Rank::First,
            2 => Rank::Second,
            3 => Rank::Third,
            4 => Rank::Fourth,
            5 => Rank::Fifth,
            6 => Rank::Sixth,
            7 => Rank::Seventh,
            8 => Rank::Eighth,
            _ => return None,
        })
    }

    /// 1-based number of the rank.
    #[inline]
    pub const fn number(self) -> i8 {
        self as i8 + 1
    }

    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A displacement in ranks (`up`) and files (`right`), as seen from white's
/// side of the board.
///
/// # Examples
///
/// ```
/// use gambit::{Offset, Square};
///
/// let offset = Offset::new(2, 0);
/// assert_eq!(Square::A2.offset(offset), Some(Square::A4));
/// assert_eq!(Square::A2.offset_to(Square::C3), Offset::new(1, 2));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub up: i8,
    pub right: i8,
}

impl Offset {
    #[inline]
    pub const fn new(up: i8, right: i8) -> Offset {
        Offset { up, right }
    }

    /// The same displacement seen from the other side of the board.
    #[must_use]
    #[inline]
    pub const fn flip_vertical(self) -> Offset {
        Offset {
            up: self.up.saturating_neg(),
            right: self.right,
        }
    }

    /// Whether both components are within one square.
    #[inline]
    pub const fn is_unit(self) -> bool {
        -1 <= self.up && self.up <= 1 && -1 <= self.right && self.right <= 1
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(up {}, right {})", self.up, self.right)
    }
}

/// Error when parsing an invalid cell reference.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid cell reference")
    }
}

impl Error for ParseSquareError {}

/// A square of the board.
///
/// Displayed and parsed as a cell reference: file letter followed by rank
/// number, e.g. `A2`.
///
/// # Examples
///
/// ```
/// use gambit::{File, Rank, Square};
///
/// let sq: Square = "e2".parse()?;
/// assert_eq!(sq, Square::E2);
/// assert_eq!(sq.file(), File::E);
/// assert_eq!(sq.rank(), Rank::Second);
/// assert_eq!(sq.to_string(), "E2");
/// # Ok::<_, gambit::ParseSquareError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square(file as u8 | (rank as u8) << 3)
    }

    /// Gets the square from 1-based rank and file numbers, or `None` if
    /// either lies outside of the board.
    #[inline]
    pub const fn from_numbers(rank: i8, file: i8) -> Option<Square> {
        match (Rank::from_number(rank), File::from_number(file)) {
            (Some(rank), Some(file)) => Some(Square::from_coords(file, rank)),
            _ => None,
        }
    }

    /// Gets the square from its index `0..64`, `A1` being 0 and `H8` 63.
    #[inline]
    pub const fn new(index: u32) -> Square {
        assert!(index < 64, "square index out of range");
        Square(index as u8)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 & 7) as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 >> 3) as usize]
    }

    /// Displaces the square, returning `None` if the result would leave the
    /// board.
    #[inline]
    pub const fn offset(self, offset: Offset) -> Option<Square> {
        match (
            self.rank().number().checked_add(offset.up),
            self.file().number().checked_add(offset.right),
        ) {
            (Some(rank), Some(file)) => Square::from_numbers(rank, file),
            _ => None,
        }
    }

    /// The displacement leading from this square to `other`.
    #[inline]
    pub const fn offset_to(self, other: Square) -> Offset {
        Offset {
            up: other.rank().number() - self.rank().number(),
            right: other.file().number() - self.file().number(),
        }
    }

    /// Sum of rank and file distances.
    #[inline]
    pub const fn manhattan(self, other: Square) -> u8 {
        let d = self.offset_to(other);
        d.up.unsigned_abs() + d.right.unsigned_abs()
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }

    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        let (&file, rank) = s.split_first().ok_or(ParseSquareError)?;
        let file = File::from_char(char::from(file)).ok_or(ParseSquareError)?;
        let rank: i8 = btoi::btou(rank).map_err(|_| ParseSquareError)?;
        let rank = Rank::from_number(rank).ok_or(ParseSquareError)?;
        Ok(Square::from_coords(file, rank))
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.trim().as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[allow(missing_docs)]
impl Square {
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);
    pub const B2: Square = Square(9);
    pub const C2: Square = Square(10);
    pub const D2: Square = Square(11);
    pub const E2: Square = Square(12);
    pub const F2: Square = Square(13);
    pub const G2: Square = Square(14);
    pub const H2: Square = Square(15);
    pub const A3: Square = Square(16);
    pub const B3: Square = Square(17);
    pub const C3: Square = Square(18);
    pub const D3: Square = Square(19);
    pub const E3: Square = Square(20);
    pub const F3: Square = Square(21);
    pub const G3: Square = Square(22);
    pub const H3: Square = Square(23);
    pub const A4: Square = Square(24);
    pub const B4: Square = Square(25);
    pub const C4: Square = Square(26);
    pub const D4: Square = Square(27);
    pub const E4: Square = Square(28);
    pub const F4: Square = Square(29);
    pub const G4: Square = Square(30);
    pub const H4: Square = Square(31);
    pub const A5: Square = Square(32);
    pub const B5: Square = Square(33);
    pub const C5: Square = Square(34);
    pub const D5: Square = Square(35);
    pub const E5: Square = Square(36);
    pub const F5: Square = Square(37);
    pub const G5: Square = Square(38);
    pub const H5: Square = Square(39);
    pub const A6: Square = Square(40);
    pub const B6: Square = Square(41);
    pub const C6: Square = Square(42);
    pub const D6: Square = Square(43);
    pub const E6: Square = Square(44);
    pub const F6: Square = Square(45);
    pub const G6: Square = Square(46);
    pub const H6: Square = Square(47);
    pub const A7: Square = Square(48);
    pub const B7: Square = Square(49);
    pub const C7: Square = Square(50);
    pub const D7: Square = Square(51);
    pub const E7: Square = Square(52);
    pub const F7: Square = Square(53);
    pub const G7: Square = Square(54);
    pub const H7: Square = Square(55);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}
