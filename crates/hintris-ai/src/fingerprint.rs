use std::fmt;

use arrayvec::ArrayString;
use hintris_engine::{Grid, Piece};

/// Cache key summarizing a piece and the full grid contents.
///
/// Format: `"{kind}:{x}:{y}:{rotation}:{hash}"`, where `hash` is a 32-bit
/// rolling `h = h × 31 + byte` over the row-major decimal serialization of
/// the grid, written in base 36. Distinct grids may share a hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    #[must_use]
    pub fn new(piece: Piece, grid: &Grid) -> Self {
        Self(format!(
            "{}:{}:{}:{}:{}",
            piece.kind(),
            piece.x(),
            piece.y(),
            piece.rotation(),
            to_base36(grid_hash(grid))
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn grid_hash(grid: &Grid) -> u32 {
    grid.rows()
        .iter()
        .flatten()
        .fold(0u32, |hash, &cell| feed_decimal(hash, cell))
}

fn feed_decimal(hash: u32, value: u8) -> u32 {
    let digits = [value / 100, value / 10 % 10, value % 10];
    let skip = match value {
        100.. => 0,
        10.. => 1,
        _ => 2,
    };
    digits[skip..].iter().fold(hash, |h, &d| {
        h.wrapping_mul(31).wrapping_add(u32::from(b'0' + d))
    })
}

fn to_base36(mut n: u32) -> ArrayString<7> {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut reversed = [b'0'; 7];
    let mut len = 0;
    loop {
        reversed[len] = DIGITS[(n % 36) as usize];
        len += 1;
        n /= 36;
        if n == 0 {
            break;
        }
    }
    let mut out = ArrayString::new();
    for &b in reversed[..len].iter().rev() {
        out.push(char::from(b));
    }
    out
}

#[cfg(test)]
mod tests {
    use hintris_engine::{PieceKind, Rotation};

    use super::*;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0).as_str(), "0");
        assert_eq!(to_base36(35).as_str(), "z");
        assert_eq!(to_base36(36).as_str(), "10");
        assert_eq!(to_base36(u32::MAX).as_str(), "1z141z3");
    }

    #[test]
    fn test_decimal_feed() {
        // "7" then "12" then "255"
        let h = feed_decimal(0, 7);
        assert_eq!(h, u32::from(b'7'));
        let h2 = feed_decimal(h, 12);
        assert_eq!(h2, (h * 31 + u32::from(b'1')) * 31 + u32::from(b'2'));
        let h3 = feed_decimal(0, 255);
        assert_eq!(h3, (u32::from(b'2') * 31 + u32::from(b'5')) * 31 + u32::from(b'5'));
    }

    #[test]
    fn test_fingerprint_format() {
        let piece = Piece::with_placement(PieceKind::T, 3, 0, Rotation::new(2));
        let fp = Fingerprint::new(piece, &Grid::EMPTY);
        let expected_hash = (0..200).fold(0u32, |h, _| h.wrapping_mul(31).wrapping_add(48));
        assert_eq!(fp.as_str(), format!("T:3:0:2:{}", to_base36(expected_hash)));
    }

    #[test]
    fn test_fingerprint_distinguishes_inputs() {
        let piece = Piece::new(PieceKind::T);
        let grid = Grid::from_ascii("#.........");
        let base = Fingerprint::new(piece, &grid);
        assert_eq!(base, Fingerprint::new(piece, &grid.clone()));
        assert_ne!(base, Fingerprint::new(piece, &Grid::EMPTY));
        assert_ne!(base, Fingerprint::new(piece.rotated_right(), &grid));
        assert_ne!(base, Fingerprint::new(Piece::new(PieceKind::S), &grid));
    }
}
