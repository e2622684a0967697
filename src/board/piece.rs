//! Piece colors, roles, and their nibble codes.
//!
//! Each piece packs into a 4-bit lane value: the role occupies the low three
//! bits (1..=6) and black sets the high bit. Zero is reserved for an empty
//! square, so 7, 8 and 15 never name a piece.

/// The side a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the prefix used by board-widget piece codes (`w` / `b`).
    pub const fn code_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Parses a color from its board-widget prefix.
    pub fn from_code_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

/// The kind of a chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// All roles in nibble order.
pub const ALL_ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

impl Role {
    /// Low three bits of the lane value.
    pub const fn nibble(self) -> u8 {
        match self {
            Role::Pawn => 0x1,
            Role::Knight => 0x2,
            Role::Bishop => 0x3,
            Role::Rook => 0x4,
            Role::Queen => 0x5,
            Role::King => 0x6,
        }
    }

    /// Returns the uppercase letter used in FEN and piece codes.
    pub const fn letter(self) -> char {
        match self {
            Role::Pawn => 'P',
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
            Role::King => 'K',
        }
    }

    /// Parses a role from its uppercase letter.
    pub fn from_letter(c: char) -> Option<Role> {
        match c {
            'P' => Some(Role::Pawn),
            'N' => Some(Role::Knight),
            'B' => Some(Role::Bishop),
            'R' => Some(Role::Rook),
            'Q' => Some(Role::Queen),
            'K' => Some(Role::King),
            _ => None,
        }
    }
}

const BLACK_BIT: u8 = 0x8;

/// A colored piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

/// All twelve pieces, white first.
pub const ALL_PIECES: [Piece; 12] = [
    Piece::new(Color::White, Role::Pawn),
    Piece::new(Color::White, Role::Knight),
    Piece::new(Color::White, Role::Bishop),
    Piece::new(Color::White, Role::Rook),
    Piece::new(Color::White, Role::Queen),
    Piece::new(Color::White, Role::King),
    Piece::new(Color::Black, Role::Pawn),
    Piece::new(Color::Black, Role::Knight),
    Piece::new(Color::Black, Role::Bishop),
    Piece::new(Color::Black, Role::Rook),
    Piece::new(Color::Black, Role::Queen),
    Piece::new(Color::Black, Role::King),
];

impl Piece {
    pub const fn new(color: Color, role: Role) -> Self {
        Piece { color, role }
    }

    /// Returns the 4-bit lane value: white 1..=6, black 9..=14.
    pub const fn nibble(self) -> u8 {
        match self.color {
            Color::White => self.role.nibble(),
            Color::Black => self.role.nibble() | BLACK_BIT,
        }
    }

    /// Decodes a lane value. Returns None for empty (0) and the unused
    /// values 7, 8 and 15.
    pub fn from_nibble(n: u8) -> Option<Piece> {
        if n > 0xf {
            return None;
        }
        let color = if n & BLACK_BIT == 0 { Color::White } else { Color::Black };
        let role = ALL_ROLES.iter().find(|r| r.nibble() == n & !BLACK_BIT)?;
        Some(Piece::new(color, *role))
    }

    /// Returns the FEN letter: uppercase for white, lowercase for black.
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.role.letter(),
            Color::Black => self.role.letter().to_ascii_lowercase(),
        }
    }

    /// Parses a FEN letter.
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let role = Role::from_letter(c.to_ascii_uppercase())?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(color, role))
    }

    /// Returns the board-widget code, e.g. `"wP"` or `"bK"`.
    pub fn code(self) -> String {
        format!("{}{}", self.color.code_char(), self.role.letter())
    }

    /// Parses a board-widget code such as `"wN"`.
    pub fn from_code(s: &str) -> Option<Piece> {
        let mut chars = s.chars();
        let color = Color::from_code_char(chars.next()?)?;
        let role = Role::from_letter(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Piece::new(color, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nibble_values() {
        assert_eq!(Piece::new(Color::White, Role::Pawn).nibble(), 0x1);
        assert_eq!(Piece::new(Color::White, Role::King).nibble(), 0x6);
        assert_eq!(Piece::new(Color::Black, Role::Pawn).nibble(), 0x9);
        assert_eq!(Piece::new(Color::Black, Role::Rook).nibble(), 0xc);
        assert_eq!(Piece::new(Color::Black, Role::King).nibble(), 0xe);
    }

    #[test]
    fn nibbles_are_nonzero_and_distinct() {
        let mut seen = [false; 16];
        for p in ALL_PIECES {
            let n = p.nibble() as usize;
            assert_ne!(n, 0);
            assert!(!seen[n], "duplicate nibble {}", n);
            seen[n] = true;
            assert_eq!(Piece::from_nibble(p.nibble()), Some(p));
        }
    }

    #[test]
    fn unused_nibbles_decode_to_none() {
        for n in [0u8, 7, 8, 15, 16, 0xff] {
            assert_eq!(Piece::from_nibble(n), None, "nibble {}", n);
        }
    }

    #[test]
    fn fen_chars() {
        assert_eq!(Piece::from_fen_char('Q'), Some(Piece::new(Color::White, Role::Queen)));
        assert_eq!(Piece::from_fen_char('n'), Some(Piece::new(Color::Black, Role::Knight)));
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('1'), None);
        for p in ALL_PIECES {
            assert_eq!(Piece::from_fen_char(p.fen_char()), Some(p));
        }
    }

    #[test]
    fn widget_codes() {
        assert_eq!(Piece::from_code("wR"), Some(Piece::new(Color::White, Role::Rook)));
        assert_eq!(Piece::from_code("bK"), Some(Piece::new(Color::Black, Role::King)));
        assert_eq!(Piece::new(Color::Black, Role::Bishop).code(), "bB");
        assert_eq!(Piece::from_code("wr"), None);
        assert_eq!(Piece::from_code("xK"), None);
        assert_eq!(Piece::from_code("wKK"), None);
        assert_eq!(Piece::from_code("w"), None);
    }
}
