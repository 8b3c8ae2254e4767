use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::UnknownPieceKindError;

use super::grid::GRID_WIDTH;

/// Column at which a piece's 4×4 bounding box spawns.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const PIECE_SPAWN_X: i32 = (GRID_WIDTH as i32 - 4) / 2;
/// Row at which a piece's 4×4 bounding box spawns.
pub const PIECE_SPAWN_Y: i32 = 0;

/// A Tetris piece (tetromino) with position, rotation, and type.
///
/// The position is the top-left corner of the piece's 4×4 bounding box. Both
/// coordinates are signed: a box may hang off the left edge or above the
/// top of the grid as long as none of its occupied cells do.
///
/// # Example
///
/// ```
/// use hintris_engine::{Piece, PieceKind, Rotation};
///
/// let piece = Piece::new(PieceKind::T);
/// let moved = piece.with_position(0, 5).rotated_right();
/// assert_eq!(moved.rotation(), Rotation::new(1));
/// assert_eq!(moved.x(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    x: i32,
    y: i32,
    #[serde(default)]
    rotation: Rotation,
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "kind#rotation@x,y" (e.g., "S#1@4,18")
        write!(
            f,
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.x,
            self.y
        )
    }
}

impl Piece {
    /// Creates a piece in spawn orientation at the spawn position.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            x: PIECE_SPAWN_X,
            y: PIECE_SPAWN_Y,
            rotation: Rotation::SPAWN,
        }
    }

    #[must_use]
    pub const fn with_placement(kind: PieceKind, x: i32, y: i32, rotation: Rotation) -> Self {
        Self {
            kind,
            x,
            y,
            rotation,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn with_position(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    #[must_use]
    pub const fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self {
            y: self.y + 1,
            ..self
        }
    }

    #[must_use]
    pub const fn up(self) -> Self {
        Self {
            y: self.y - 1,
            ..self
        }
    }

    #[must_use]
    pub fn rotated_right(self) -> Self {
        self.with_rotation(self.rotation.rotated_right())
    }

    #[must_use]
    pub fn shape(&self) -> &'static PieceShape {
        self.kind.shape(self.rotation)
    }

    /// Absolute `(column, row)` coordinates of the four occupied cells.
    ///
    /// Coordinates are not clipped to the grid.
    #[must_use]
    pub fn cells(&self) -> ArrayVec<(i32, i32), 4> {
        self.kind
            .occupied_offsets(self.rotation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Any integer is accepted on construction and reduced modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rotation(u8);

impl Rotation {
    pub const SPAWN: Self = Self(0);
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn new(index: i32) -> Self {
        Self(index.rem_euclid(4) as u8)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Rotation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let index = i32::deserialize(deserializer)?;
        Ok(Self::new(index))
    }
}

/// Enum representing the type of piece.
///
/// The discriminant doubles as the non-zero cell tag written into a
/// [`Grid`](super::grid::Grid) when the piece is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// O-piece.
    O = 2,
    /// T-piece.
    T = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// J-piece.
    J = 6,
    /// L-piece.
    L = 7,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    const fn table_index(self) -> usize {
        self as usize - 1
    }

    /// Cell value written into the grid for this piece.
    #[must_use]
    pub const fn cell_tag(self) -> u8 {
        self as u8
    }

    /// Returns the 4×4 occupancy matrix for the given rotation.
    #[must_use]
    pub fn shape(self, rotation: Rotation) -> &'static PieceShape {
        &PIECE_SHAPES[self.table_index()][rotation.as_usize()]
    }

    /// Returns an iterator of occupied `(dx, dy)` offsets within the bounding box.
    pub fn occupied_offsets(self, rotation: Rotation) -> impl Iterator<Item = (i32, i32)> {
        const OFFSETS: [i32; 4] = [0, 1, 2, 3];
        let shape = self.shape(rotation);
        shape.iter().zip(OFFSETS).flat_map(|(row, dy)| {
            row.iter()
                .zip(OFFSETS)
                .filter_map(move |(&cell, dx)| cell.then_some((dx, dy)))
        })
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use hintris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use hintris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for PieceKind {
    type Err = UnknownPieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| UnknownPieceKindError::new(s.to_owned()))
            }
            _ => Err(UnknownPieceKindError::new(s.to_owned())),
        }
    }
}

impl Serialize for PieceKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_char(self.as_char())
    }
}

impl<'de> Deserialize<'de> for PieceKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Piece occupancy within its 4×4 bounding box, indexed `[row][column]`.
pub type PieceShape = [[bool; 4]; 4];

/// Generates all 4 rotation states of a piece shape by rotating 90° clockwise.
///
/// # Arguments
///
/// * `size` - Effective size of the piece (3 for most pieces, 4 for I, 2 for O)
/// * `shape` - Initial piece shape at 0° rotation
const fn shape_rotations(size: usize, shape: PieceShape) -> [PieceShape; 4] {
    let mut rotates = [shape; 4];
    let mut i = 1;
    while i < 4 {
        let mut new_shape = [[false; 4]; 4];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                new_shape[y][x] = rotates[i - 1][size - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        rotates[i] = new_shape;
        i += 1;
    }
    rotates
}

const PIECE_SHAPES: [[PieceShape; 4]; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        shape_rotations(4, [EEEE, [C, C, C, C], EEEE, EEEE]),
        // O-piece
        shape_rotations(2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // T-piece
        shape_rotations(3, [[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        // S-piece
        shape_rotations(3, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // Z-piece
        shape_rotations(3, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // J-piece
        shape_rotations(3, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        shape_rotations(3, [[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
    ]
};
