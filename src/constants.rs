//! Constants shared across the solver.

use crate::facelet::Color;
use crate::moves::Move;

/// Number of cube colors / faces.
pub const N_COLORS: usize = 6;
/// Number of facelets (stickers).
pub const N_PLATES: usize = 54;
/// Number of corner cubies.
pub const N_CORNERS: usize = 8;
/// Number of edge cubies.
pub const N_EDGES: usize = 12;

/// Number of face turn moves.
pub const N_MOVES: usize = 18;
/// Number of phase 2 moves (U*, D*, R2, F2, L2, B2).
pub const N_MOVES2: usize = 10;

/// Number of edge orientation (flip) coordinates.
pub const N_FLIP: usize = 2048;
/// Number of flip equivalence classes under the 8 phase 1 symmetries.
pub const N_FLIP_SYM: usize = 336;
/// Number of corner orientation (twist) coordinates.
pub const N_TWIST: usize = 2187;
/// Number of twist equivalence classes under the 8 phase 1 symmetries.
pub const N_TWIST_SYM: usize = 324;
/// Number of UD slice edge location coordinates, C(12, 4).
pub const N_SLICE: usize = 495;
/// Number of corner (or phase 2 edge) permutations.
pub const N_PERM: usize = 40320;
/// Number of permutation equivalence classes under the 16 D4h symmetries.
pub const N_PERM_SYM: usize = 2768;
/// Number of permutations of the 4 middle slice edges.
pub const N_MPERM: usize = 24;
/// Number of corner combination coordinates with parity, 70 * 2.
pub const N_COMB: usize = 140;

/// Symmetries preserving the UD axis.
pub const SYM: usize = 16;
/// Classes of the sym coordinate encodings, sym / 2.
pub const SYM_CLASSES: usize = 8;
/// Full symmetry group size including URF rotations.
pub const FULL_SYM: usize = 48;

/// Hard cap on the total solution length.
pub const MAX_LENGTH: usize = 31;
/// Phase 1 depth cap.
pub const P1_LENGTH: i8 = 12;
/// Phase 2 depth cap.
pub const P2_LENGTH: i8 = 18;
/// Maximum number of pre-moves tried before phase 1.
pub const MAX_PRE_MOVES: i8 = 20;
/// Minimum phase 1 length at which pre-moves may shorten the search.
pub const MIN_P1LENGTH_PRE: i8 = 7;

/// Bit i set when phase 2 move i is a quarter turn, flipping permutation parity.
pub const P2_PARITY_MOVE: u16 = 0xA5;
/// Per-symmetry raw conjugation adjustment for the edge to corner mapping.
pub const SYM_E2C_MAGIC: u32 = 0x00DD_DD00;
/// Bit i set when move i is skipped as the deepest pre-move; only the clear
/// bits, the R, F, L and B quarter turns, may end a pre-move sequence.
pub const PRE_MOVE_ALLOW: u32 = 0x36FB7;

/// Map from the 10 phase 2 move indices to the 18 move indices.
pub const UD2STD: [u8; N_MOVES] = [0, 1, 2, 4, 7, 9, 10, 11, 13, 16, 3, 5, 6, 8, 12, 14, 15, 17];

/// Inverse of [`UD2STD`].
pub const STD2UD: [u8; N_MOVES] = [0, 1, 2, 10, 3, 11, 12, 4, 13, 5, 6, 7, 14, 8, 15, 16, 9, 17];

/// Bit j set when phase 2 move j must be skipped after phase 2 move i.
/// Index 10 is the virtual "no previous move" entry.
pub const CKMV2BIT: [u16; N_MOVES2 + 1] = [
    0x7, 0x7, 0x7, 0x8, 0x10, 0xE7, 0xE7, 0xE7, 0x108, 0x210, 0x0,
];

/// Move relabeling under the six URF rotation / inversion frames.
pub const URF_MOVE: [[u8; N_MOVES]; 6] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17],
    [6, 7, 8, 0, 1, 2, 3, 4, 5, 15, 16, 17, 9, 10, 11, 12, 13, 14],
    [3, 4, 5, 6, 7, 8, 0, 1, 2, 12, 13, 14, 15, 16, 17, 9, 10, 11],
    [2, 1, 0, 5, 4, 3, 8, 7, 6, 11, 10, 9, 14, 13, 12, 17, 16, 15],
    [8, 7, 6, 2, 1, 0, 5, 4, 3, 17, 16, 15, 11, 10, 9, 14, 13, 12],
    [5, 4, 3, 8, 7, 6, 2, 1, 0, 14, 13, 12, 17, 16, 15, 11, 10, 9],
];

/// Binomial coefficients C(n, k) for n, k <= 12.
pub const CNK: [[u16; 13]; 13] = cnk();

const fn cnk() -> [[u16; 13]; 13] {
    let mut c = [[0u16; 13]; 13];
    let mut n = 0;
    while n < 13 {
        c[n][0] = 1;
        c[n][n] = 1;
        let mut k = 1;
        while k < n {
            c[n][k] = c[n - 1][k - 1] + c[n - 1][k];
            k += 1;
        }
        n += 1;
    }
    c
}

/// All colors in face order.
pub const ALL_COLORS: [Color; N_COLORS] = [
    Color::U,
    Color::R,
    Color::F,
    Color::D,
    Color::L,
    Color::B,
];

/// All moves in solver index order.
pub const ALL_MOVES: [Move; N_MOVES] = [
    Move::U,
    Move::U2,
    Move::U3,
    Move::R,
    Move::R2,
    Move::R3,
    Move::F,
    Move::F2,
    Move::F3,
    Move::D,
    Move::D2,
    Move::D3,
    Move::L,
    Move::L2,
    Move::L3,
    Move::B,
    Move::B2,
    Move::B3,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn std2ud_inverts_ud2std() {
        for i in 0..N_MOVES {
            assert_eq!(STD2UD[UD2STD[i] as usize] as usize, i);
        }
    }

    #[test]
    fn binomials() {
        assert_eq!(CNK[12][4], 495);
        assert_eq!(CNK[11][4], 330);
        assert_eq!(CNK[8][1], 8);
        assert_eq!(CNK[4][4], 1);
        assert_eq!(CNK[3][4], 0);
    }

    #[test]
    fn urf_rotation_has_order_three() {
        for m in 0..N_MOVES {
            let r = URF_MOVE[2][m] as usize;
            let r = URF_MOVE[2][r] as usize;
            assert_eq!(URF_MOVE[2][r] as usize, m);
        }
    }
}
