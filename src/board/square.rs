//! Square definitions for the 8x8 board.
//!
//! All 64 squares are enumerated from rank 8 down to rank 1, and from file
//! a to file h within each rank. The discriminant is the square's index in
//! the fingerprint lane layout: a8 = 0, h8 = 7, a7 = 8, ..., h1 = 63.

/// The number of squares on the board.
pub const SQUARE_COUNT: usize = 64;

/// A square on the board.
///
/// The `#[repr(u8)]` attribute enables use as an array index and fixes the
/// lane offset used by the fingerprint encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Square {
    A8 = 0,
    B8 = 1,
    C8 = 2,
    D8 = 3,
    E8 = 4,
    F8 = 5,
    G8 = 6,
    H8 = 7,
    A7 = 8,
    B7 = 9,
    C7 = 10,
    D7 = 11,
    E7 = 12,
    F7 = 13,
    G7 = 14,
    H7 = 15,
    A6 = 16,
    B6 = 17,
    C6 = 18,
    D6 = 19,
    E6 = 20,
    F6 = 21,
    G6 = 22,
    H6 = 23,
    A5 = 24,
    B5 = 25,
    C5 = 26,
    D5 = 27,
    E5 = 28,
    F5 = 29,
    G5 = 30,
    H5 = 31,
    A4 = 32,
    B4 = 33,
    C4 = 34,
    D4 = 35,
    E4 = 36,
    F4 = 37,
    G4 = 38,
    H4 = 39,
    A3 = 40,
    B3 = 41,
    C3 = 42,
    D3 = 43,
    E3 = 44,
    F3 = 45,
    G3 = 46,
    H3 = 47,
    A2 = 48,
    B2 = 49,
    C2 = 50,
    D2 = 51,
    E2 = 52,
    F2 = 53,
    G2 = 54,
    H2 = 55,
    A1 = 56,
    B1 = 57,
    C1 = 58,
    D1 = 59,
    E1 = 60,
    F1 = 61,
    G1 = 62,
    H1 = 63,
}

/// All squares in index order.
pub const ALL_SQUARES: [Square; SQUARE_COUNT] = [
    Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
    Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
    Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
    Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
    Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
    Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
    Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
    Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
];

const FILE_CHARS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

impl Square {
    /// Returns the lane index (0..64) of this square.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a square by lane index.
    pub fn from_index(index: usize) -> Option<Square> {
        ALL_SQUARES.get(index).copied()
    }

    /// Builds a square from zero-based file (a = 0) and rank (rank 1 = 0).
    pub fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file >= 8 || rank >= 8 {
            return None;
        }
        let row = 7 - rank as usize;
        Some(ALL_SQUARES[row * 8 + file as usize])
    }

    /// Zero-based file, a = 0 ... h = 7.
    pub const fn file(self) -> u8 {
        (self as u8) % 8
    }

    /// Zero-based rank, rank 1 = 0 ... rank 8 = 7.
    pub const fn rank(self) -> u8 {
        7 - (self as u8) / 8
    }

    /// Returns the algebraic coordinate, e.g. `"e4"`.
    pub fn algebraic(self) -> String {
        format!("{}{}", FILE_CHARS[self.file() as usize], self.rank() + 1)
    }

    /// Parses an algebraic coordinate such as `"a1"` or `"h8"`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'a')?;
        let rank = bytes[1].checked_sub(b'1')?;
        Square::from_coords(file, rank)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.algebraic())
    }
}
