//! Face turn moves and the coordinate move tables.

use std::{fmt, str::FromStr};

use bincode::{Decode, Encode};

use self::Move::*;
use crate::constants::*;
use crate::cubie::{basic_move_cubes, CubieCube};
use crate::error::Error;
use crate::symmetries::SymmetriesTables;

/// Layer moves, Up, Right, Front, Down, Left, Back.
///
/// $ clockwise, $2 double, $3 counter-clockwise.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(R),
            "R'" => Ok(R3),
            "R2" => Ok(R2),
            "L" => Ok(L),
            "L'" => Ok(L3),
            "L2" => Ok(L2),
            "U" => Ok(U),
            "U'" => Ok(U3),
            "U2" => Ok(U2),
            "D" => Ok(D),
            "D'" => Ok(D3),
            "D2" => Ok(D2),
            "F" => Ok(F),
            "F'" => Ok(F3),
            "F2" => Ok(F2),
            "B" => Ok(B),
            "B'" => Ok(B3),
            "B2" => Ok(B2),
            _ => Err(Error::InvalidScramble),
        }
    }
}

impl Move {
    /// The move undoing this one.
    pub fn inverse(&self) -> Move {
        ALL_MOVES[*self as usize / 3 * 3 + (2 - *self as usize % 3)]
    }
}

/// All 18 move cubes, the powers composed from the six quarter turns.
pub fn move_cubes() -> [CubieCube; N_MOVES] {
    let basics = basic_move_cubes();
    let mut mc = [CubieCube::SOLVED; N_MOVES];
    for i in 0..6 {
        mc[3 * i] = basics[i];
        for j in 0..2 {
            let mut d = mc[3 * i + j];
            d.multiply(basics[i]);
            mc[3 * i + j + 1] = d;
        }
    }
    mc
}

/// Transition tables of every coordinate under moves, together with the
/// conjugation tables by symmetry needed to work on sym-coordinates.
#[derive(Encode, Decode)]
pub struct MoveTables {
    /// `cperm_move[c * 10 + m]`: corner permutation sym-coordinate after a
    /// phase 2 move, from class representative `c`.
    pub cperm_move: Vec<u16>,
    pub eperm_move: Vec<u16>,
    /// `mperm_move[i * 10 + m]`.
    pub mperm_move: Vec<u8>,
    /// `mperm_conj[i * 16 + s]`.
    pub mperm_conj: Vec<u8>,
    /// `ccombp_move[i * 10 + m]`, corner combination with phase 2 parity.
    pub ccombp_move: Vec<u8>,
    pub ccombp_conj: Vec<u8>,
    /// `udslice_move[i * 18 + m]`.
    pub udslice_move: Vec<u16>,
    /// `udslice_conj[i * 8 + s]`, conjugation by the even symmetries.
    pub udslice_conj: Vec<u16>,
    /// `twist_move[c * 18 + m]`, sym-coordinate after a move from
    /// representative `c`.
    pub twist_move: Vec<u16>,
    pub flip_move: Vec<u16>,
}

impl MoveTables {
    pub fn new(sy: &SymmetriesTables) -> Self {
        MoveTables {
            cperm_move: perm_move_table(sy, true),
            eperm_move: perm_move_table(sy, false),
            mperm_move: mperm_move_table(sy),
            mperm_conj: mperm_conj_table(sy),
            ccombp_move: ccombp_move_table(sy),
            ccombp_conj: ccombp_conj_table(sy),
            udslice_move: udslice_move_table(sy),
            udslice_conj: udslice_conj_table(sy),
            twist_move: twist_move_table(sy),
            flip_move: flip_move_table(sy),
        }
    }
}

fn perm_move_table(sy: &SymmetriesTables, corner: bool) -> Vec<u16> {
    let mut table = vec![0u16; N_PERM_SYM * N_MOVES2];
    for i in 0..N_PERM_SYM {
        let mut c = CubieCube::SOLVED;
        if corner {
            c.set_cperm(sy.eperm_s2r[i] as u32);
        } else {
            c.set_eperm(sy.eperm_s2r[i] as u32);
        }
        for j in 0..N_MOVES2 {
            let mut d = c;
            d.multiply(sy.move_cube[UD2STD[j] as usize]);
            table[i * N_MOVES2 + j] = if corner {
                d.get_cperm_sym(sy)
            } else {
                d.get_eperm_sym(sy)
            };
        }
    }
    table
}

fn mperm_move_table(sy: &SymmetriesTables) -> Vec<u8> {
    let mut table = vec![0u8; N_MPERM * N_MOVES2];
    for i in 0..N_MPERM {
        let mut c = CubieCube::SOLVED;
        c.set_mperm(i as u8);
        for j in 0..N_MOVES2 {
            let mut d = c;
            d.edge_multiply(sy.move_cube[UD2STD[j] as usize]);
            table[i * N_MOVES2 + j] = d.get_mperm();
        }
    }
    table
}

fn mperm_conj_table(sy: &SymmetriesTables) -> Vec<u8> {
    let mut table = vec![0u8; N_MPERM * SYM];
    for i in 0..N_MPERM {
        let mut c = CubieCube::SOLVED;
        c.set_mperm(i as u8);
        for j in 0..SYM {
            let d = sy.edge_conjugate(&c, sy.sym_mult_inv[0][j] as usize);
            table[i * SYM + j] = d.get_mperm();
        }
    }
    table
}

fn ccombp_move_table(sy: &SymmetriesTables) -> Vec<u8> {
    let mut table = vec![0u8; N_COMB * N_MOVES2];
    for i in 0..N_COMB {
        let mut c = CubieCube::SOLVED;
        c.set_ccomb((i % 70) as u8);
        for j in 0..N_MOVES2 {
            let mut d = c;
            d.corner_multiply(sy.move_cube[UD2STD[j] as usize]);
            let parity = (P2_PARITY_MOVE >> j & 1) as usize ^ i / 70;
            table[i * N_MOVES2 + j] = d.get_ccomb() + 70 * parity as u8;
        }
    }
    table
}

fn ccombp_conj_table(sy: &SymmetriesTables) -> Vec<u8> {
    let mut table = vec![0u8; N_COMB * SYM];
    for i in 0..N_COMB {
        let mut c = CubieCube::SOLVED;
        c.set_ccomb((i % 70) as u8);
        for j in 0..SYM {
            let d = sy.corner_conjugate(&c, sy.sym_mult_inv[0][j] as usize);
            table[i * SYM + j] = d.get_ccomb() + 70 * (i / 70) as u8;
        }
    }
    table
}

fn udslice_move_table(sy: &SymmetriesTables) -> Vec<u16> {
    let mut table = vec![0u16; N_SLICE * N_MOVES];
    for i in 0..N_SLICE {
        let mut c = CubieCube::SOLVED;
        c.set_udslice(i as u16);
        for j in (0..N_MOVES).step_by(3) {
            let mut d = c;
            d.edge_multiply(sy.move_cube[j]);
            table[i * N_MOVES + j] = d.get_udslice();
        }
    }
    // compose the half and counterclockwise turns from the quarter turn column
    for i in 0..N_SLICE {
        for j in (0..N_MOVES).step_by(3) {
            let mut udslice = table[i * N_MOVES + j];
            for k in 1..3 {
                udslice = table[udslice as usize * N_MOVES + j];
                table[i * N_MOVES + j + k] = udslice;
            }
        }
    }
    table
}

fn udslice_conj_table(sy: &SymmetriesTables) -> Vec<u16> {
    let mut table = vec![0u16; N_SLICE * SYM_CLASSES];
    for i in 0..N_SLICE {
        let mut c = CubieCube::SOLVED;
        c.set_udslice(i as u16);
        for j in (0..SYM).step_by(2) {
            let d = sy.edge_conjugate(&c, sy.sym_mult_inv[0][j] as usize);
            table[i * SYM_CLASSES + j / 2] = d.get_udslice();
        }
    }
    table
}

fn twist_move_table(sy: &SymmetriesTables) -> Vec<u16> {
    let mut table = vec![0u16; N_TWIST_SYM * N_MOVES];
    for i in 0..N_TWIST_SYM {
        let mut c = CubieCube::SOLVED;
        c.set_twist(sy.twist_s2r[i]);
        for j in 0..N_MOVES {
            let mut d = c;
            d.corner_multiply(sy.move_cube[j]);
            table[i * N_MOVES + j] = d.get_twist_sym(sy);
        }
    }
    table
}

fn flip_move_table(sy: &SymmetriesTables) -> Vec<u16> {
    let mut table = vec![0u16; N_FLIP_SYM * N_MOVES];
    for i in 0..N_FLIP_SYM {
        let mut c = CubieCube::SOLVED;
        c.set_flip(sy.flip_s2r[i]);
        for j in 0..N_MOVES {
            let mut d = c;
            d.edge_multiply(sy.move_cube[j]);
            table[i * N_MOVES + j] = d.get_flip_sym(sy);
        }
    }
    table
}

#[cfg(test)]
mod test {
    use super::*;

    lazy_static! {
        static ref SY: SymmetriesTables = SymmetriesTables::new();
        static ref MV: MoveTables = MoveTables::new(&SY);
    }

    #[test]
    fn move_parsing_and_display() {
        assert_eq!("U".parse::<Move>().unwrap(), U);
        assert_eq!("R2".parse::<Move>().unwrap(), R2);
        assert_eq!("B'".parse::<Move>().unwrap(), B3);
        assert_eq!(U3.to_string(), "U'");
        assert_eq!(F2.to_string(), "F2");
        assert!("X".parse::<Move>().is_err());
        assert!("U4".parse::<Move>().is_err());
    }

    #[test]
    fn move_inverse() {
        assert_eq!(U.inverse(), U3);
        assert_eq!(R2.inverse(), R2);
        assert_eq!(B3.inverse(), B);
    }

    #[test]
    fn powers_compose() {
        let mc = move_cubes();
        for axis in 0..6 {
            let mut c = mc[3 * axis];
            c.multiply(mc[3 * axis]);
            assert_eq!(c, mc[3 * axis + 1]);
            let mut d = mc[3 * axis + 1];
            d.multiply(mc[3 * axis + 2]);
            assert_eq!(d, CubieCube::SOLVED);
        }
    }

    #[test]
    fn udslice_moves_from_the_solved_slice() {
        // U, D and any half turn keep the four slice edges in place
        for m in [0usize, 1, 2, 4, 7, 9, 10, 11, 13, 16] {
            assert_eq!(MV.udslice_move[m], 0);
        }
        // quarter turns of R, F, L and B move slice edges out
        for m in [3usize, 5, 6, 8, 12, 14, 15, 17] {
            assert_ne!(MV.udslice_move[m], 0);
        }
    }

    #[test]
    fn mperm_move_row_zero_matches_cube_moves() {
        let mc = move_cubes();
        for j in 0..N_MOVES2 {
            let mut d = CubieCube::SOLVED;
            d.edge_multiply(mc[UD2STD[j] as usize]);
            assert_eq!(MV.mperm_move[j], d.get_mperm());
        }
    }

    #[test]
    fn conjugation_by_identity_fixes_coordinates() {
        for i in 0..N_MPERM {
            assert_eq!(MV.mperm_conj[i * SYM] as usize, i);
        }
        for i in 0..N_COMB {
            assert_eq!(MV.ccombp_conj[i * SYM] as usize, i);
        }
        for i in 0..N_SLICE {
            assert_eq!(MV.udslice_conj[i * SYM_CLASSES] as usize, i);
        }
    }

    #[test]
    fn eperm_sym_coordinate_tracks_the_cube() {
        // walk a phase 2 alg keeping (class, sym) updated through the move
        // and multiplication tables, checking against the cube after every
        // move: conjugating the representative by the tracked symmetry must
        // reproduce the cube's raw coordinate
        let alg = [U, R2, U, R2, U, D3, B2, D2];
        let mut cc = CubieCube::SOLVED;
        let (mut cls, mut sym) = (0usize, 0usize);
        for m in alg {
            let ud = STD2UD[m as usize] as usize;
            let moved =
                MV.eperm_move[cls * N_MOVES2 + SY.sym_move_ud[sym][ud] as usize];
            sym = SY.sym_mult[(moved & 0xf) as usize][sym] as usize;
            cls = (moved >> 4) as usize;
            cc.edge_multiply(SY.move_cube[m as usize]);
            let mut rep = CubieCube::SOLVED;
            rep.set_eperm(SY.eperm_s2r[cls] as u32);
            assert_eq!(SY.edge_conjugate(&rep, sym).get_eperm(), cc.get_eperm());
        }
    }

    #[test]
    fn table_sizes() {
        assert_eq!(MV.cperm_move.len(), N_PERM_SYM * N_MOVES2);
        assert_eq!(MV.eperm_move.len(), N_PERM_SYM * N_MOVES2);
        assert_eq!(MV.twist_move.len(), N_TWIST_SYM * N_MOVES);
        assert_eq!(MV.flip_move.len(), N_FLIP_SYM * N_MOVES);
    }
}
