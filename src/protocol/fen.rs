//! FEN piece-placement encoding and decoding.
//!
//! Only the placement field is meaningful for a fingerprint: eight ranks
//! from rank 8 to rank 1 separated by '/', each a run of piece letters and
//! empty-square digits. Anything after the first whitespace (side to move,
//! castling, clocks) is accepted and ignored.
//!
//! The empty board is `8/8/8/8/8/8/8/8`.

use crate::board::piece::Piece;
use crate::board::position::Position;
use crate::board::square::Square;

/// FEN placement of the empty board.
pub const EMPTY_BOARD: &str = "8/8/8/8/8/8/8/8";

/// Errors that can occur during FEN parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 8 ranks separated by '/', got {0}")]
    WrongRankCount(usize),

    #[error("invalid piece character: '{0}'")]
    InvalidPiece(char),

    #[error("rank {rank} describes {files} files, expected 8")]
    BadRankWidth { rank: u8, files: usize },

    #[error("empty FEN string")]
    Empty,
}

/// Parses the placement field of a FEN string into a position.
pub fn parse_fen(s: &str) -> Result<Position, FenError> {
    let placement = s.split_whitespace().next().ok_or(FenError::Empty)?;
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount(ranks.len()));
    }

    let mut position = Position::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file: usize = 0;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if skip == 0 || skip > 8 {
                    return Err(FenError::InvalidPiece(c));
                }
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece(c))?;
            if file < 8 {
                if let Some(sq) = Square::from_coords(file as u8, rank) {
                    position.place(sq, piece);
                }
            }
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankWidth {
                rank: rank + 1,
                files: file,
            });
        }
    }

    Ok(position)
}

/// Encodes a position as a FEN placement field.
pub fn encode_fen(position: &Position) -> String {
    let mut result = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            let piece = Square::from_coords(file, rank).and_then(|sq| position.get(sq));
            match piece {
                Some(p) => {
                    if empty > 0 {
                        result.push_str(&empty.to_string());
                        empty = 0;
                    }
                    result.push(p.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            result.push_str(&empty.to_string());
        }
        if rank > 0 {
            result.push('/');
        }
    }

    result
}
