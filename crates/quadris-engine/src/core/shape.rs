use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// 24-bit RGB color attached to a shape kind and to every cell it locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const PURPLE: Self = Self::rgb(128, 0, 128);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Side length of every rotation mask.
pub const MASK_SIZE: usize = 5;

/// Occupancy of one rotation state within its 5×5 bounding box.
///
/// Each element is one row; bit `c` set means column `c` is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RotationMask([u8; MASK_SIZE]);

impl RotationMask {
    #[must_use]
    pub const fn is_occupied(self, column: usize, row: usize) -> bool {
        column < MASK_SIZE && row < MASK_SIZE && (self.0[row] & (1 << column)) != 0
    }

    /// Returns the occupied `(column, row)` pairs in row-major order.
    pub fn occupied_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..MASK_SIZE).flat_map(move |row| {
            (0..MASK_SIZE)
                .filter(move |&column| self.is_occupied(column, row))
                .map(move |column| (column, row))
        })
    }

    #[must_use]
    pub fn cell_count(self) -> usize {
        self.0.iter().map(|row| row.count_ones() as usize).sum()
    }
}

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// S-piece.
    S = 0,
    /// Z-piece.
    Z = 1,
    /// I-piece.
    I = 2,
    /// O-piece.
    O = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::T,
    ];

    /// Number of distinct rotation states (1, 2 or 4).
    #[must_use]
    pub const fn rotation_count(self) -> usize {
        SHAPE_ROTATIONS[self as usize].len()
    }

    /// Returns the mask for `rotation`, taken modulo [`Self::rotation_count`].
    ///
    /// # Example
    ///
    /// ```
    /// use quadris_engine::ShapeKind;
    ///
    /// let kind = ShapeKind::T;
    /// assert_eq!(kind.rotation_mask(kind.rotation_count()), kind.rotation_mask(0));
    /// ```
    #[must_use]
    pub const fn rotation_mask(self, rotation: usize) -> RotationMask {
        let rotations = SHAPE_ROTATIONS[self as usize];
        rotations[rotation % rotations.len()]
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            ShapeKind::S => Color::GREEN,
            ShapeKind::Z => Color::RED,
            ShapeKind::I => Color::CYAN,
            ShapeKind::O => Color::YELLOW,
            ShapeKind::J => Color::BLUE,
            ShapeKind::L => Color::MAGENTA,
            ShapeKind::T => Color::PURPLE,
        }
    }
}

const SHAPE_ROTATIONS: [&[RotationMask]; ShapeKind::LEN] = {
    const fn m(bits: [bool; MASK_SIZE]) -> u8 {
        let mut mask = 0;
        let mut i = 0;
        while i < MASK_SIZE {
            if bits[i] {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    const C: bool = true;
    const E: bool = false;
    const EEEEE: u8 = m([E; MASK_SIZE]);
    const fn r(rows: [u8; MASK_SIZE]) -> RotationMask {
        RotationMask(rows)
    }

    [
        // S-piece
        &[
            r([EEEEE, EEEEE, m([E, E, C, C, E]), m([E, C, C, E, E]), EEEEE]),
            r([EEEEE, m([E, E, C, E, E]), m([E, E, C, C, E]), m([E, E, E, C, E]), EEEEE]),
        ],
        // Z-piece
        &[
            r([EEEEE, EEEEE, m([E, C, C, E, E]), m([E, E, C, C, E]), EEEEE]),
            r([EEEEE, m([E, E, C, E, E]), m([E, C, C, E, E]), m([E, C, E, E, E]), EEEEE]),
        ],
        // I-piece
        &[
            r([
                m([E, E, C, E, E]),
                m([E, E, C, E, E]),
                m([E, E, C, E, E]),
                m([E, E, C, E, E]),
                EEEEE,
            ]),
            r([EEEEE, m([C, C, C, C, E]), EEEEE, EEEEE, EEEEE]),
        ],
        // O-piece
        &[r([EEEEE, EEEEE, m([E, C, C, E, E]), m([E, C, C, E, E]), EEEEE])],
        // J-piece
        &[
            r([EEEEE, m([E, C, E, E, E]), m([E, C, C, C, E]), EEEEE, EEEEE]),
            r([EEEEE, m([E, E, C, C, E]), m([E, E, C, E, E]), m([E, E, C, E, E]), EEEEE]),
            r([EEEEE, EEEEE, m([E, C, C, C, E]), m([E, E, E, C, E]), EEEEE]),
            r([EEEEE, m([E, E, C, E, E]), m([E, E, C, E, E]), m([E, C, C, E, E]), EEEEE]),
        ],
        // L-piece
        &[
            r([EEEEE, m([E, E, E, C, E]), m([E, C, C, C, E]), EEEEE, EEEEE]),
            r([EEEEE, m([E, E, C, E, E]), m([E, E, C, E, E]), m([E, E, C, C, E]), EEEEE]),
            r([EEEEE, EEEEE, m([E, C, C, C, E]), m([E, C, E, E, E]), EEEEE]),
            r([EEEEE, m([E, C, C, E, E]), m([E, E, C, E, E]), m([E, E, C, E, E]), EEEEE]),
        ],
        // T-piece
        &[
            r([EEEEE, m([E, E, C, E, E]), m([E, C, C, C, E]), EEEEE, EEEEE]),
            r([EEEEE, m([E, E, C, E, E]), m([E, E, C, C, E]), m([E, E, C, E, E]), EEEEE]),
            r([EEEEE, EEEEE, m([E, C, C, C, E]), m([E, E, C, E, E]), EEEEE]),
            r([EEEEE, m([E, E, C, E, E]), m([E, C, C, E, E]), m([E, E, C, E, E]), EEEEE]),
        ],
    ]
};
