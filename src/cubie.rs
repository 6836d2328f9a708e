//! Cube representation on the cubie level, together with the permutation and
//! orientation coordinates the solver is built on.

use std::cmp::min;
use std::fmt;

use bincode::{Decode, Encode};
use rand::Rng;

use crate::constants::*;
use crate::error::Error;
use crate::facelet::{FaceCube, CORNER_FACELET, EDGE_FACELET};
use crate::moves::Move;
use crate::symmetries::SymmetriesTables;

/// The 8 corner cubies.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Encode, Decode)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

/// The 12 edge cubies.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Encode, Decode)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

use Corner::*;
use Edge::*;

pub const ALL_CORNERS: [Corner; N_CORNERS] = [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB];
pub const ALL_EDGES: [Edge; N_EDGES] = [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR];

/// Cube on the cubie level: corner and edge permutations and orientations.
///
/// Corner orientations are 0 to 2 for regular cubes. Values 3 to 5 only occur
/// in the mirrored symmetry cubes and mark a reflected corner.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Encode, Decode)]
pub struct CubieCube {
    pub cp: [Corner; N_CORNERS],
    pub co: [u8; N_CORNERS],
    pub ep: [Edge; N_EDGES],
    pub eo: [u8; N_EDGES],
}

impl CubieCube {
    pub const SOLVED: CubieCube = CubieCube {
        cp: ALL_CORNERS,
        co: [0; N_CORNERS],
        ep: ALL_EDGES,
        eo: [0; N_EDGES],
    };
}

impl Default for CubieCube {
    fn default() -> Self {
        CubieCube::SOLVED
    }
}

/// 120 degree rotation around the URF-DBL axis.
pub const URF_CUBE: CubieCube = CubieCube {
    cp: [URF, DFR, DLF, UFL, UBR, DRB, DBL, ULB],
    co: [1, 2, 1, 2, 2, 1, 2, 1],
    ep: [UF, FR, DF, FL, UB, BR, DB, BL, UR, DR, DL, UL],
    eo: [1, 0, 1, 0, 1, 0, 1, 0, 1, 1, 1, 1],
};

/// Inverse of [`URF_CUBE`].
pub const URF_INV_CUBE: CubieCube = CubieCube {
    cp: [URF, UBR, DRB, DFR, UFL, ULB, DBL, DLF],
    co: [2, 1, 2, 1, 1, 2, 1, 2],
    ep: [FR, UR, BR, DR, FL, UL, BL, DL, UF, UB, DB, DF],
    eo: [1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
};

const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
    co: [0; 8],
    ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0; 12],
};

const R_MOVE: CubieCube = CubieCube {
    cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
    co: [2, 0, 0, 1, 1, 0, 0, 2],
    ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR],
    eo: [0; 12],
};

const F_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

const D_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
    co: [0; 8],
    ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
    eo: [0; 12],
};

const L_MOVE: CubieCube = CubieCube {
    cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
    eo: [0; 12],
};

const B_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

/// The six clockwise quarter turn cubes in face order.
pub fn basic_move_cubes() -> [CubieCube; 6] {
    [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE]
}

impl CubieCube {
    /// Corner part of `self * b`, orientations taken modulo 3.
    pub fn corner_multiply(&mut self, b: CubieCube) {
        let mut cp = [URF; N_CORNERS];
        let mut co = [0u8; N_CORNERS];
        for i in 0..N_CORNERS {
            let p = b.cp[i] as usize;
            cp[i] = self.cp[p];
            co[i] = (self.co[p] + b.co[i]) % 3;
        }
        self.cp = cp;
        self.co = co;
    }

    /// Corner part of `self * b`, carrying the mirror marker in orientations
    /// 3 to 5. Needed when multiplying with reflected symmetry cubes.
    pub fn corner_multiply_full(&mut self, b: CubieCube) {
        let mut cp = [URF; N_CORNERS];
        let mut co = [0u8; N_CORNERS];
        for i in 0..N_CORNERS {
            let p = b.cp[i] as usize;
            let ori_a = self.co[p];
            let ori_b = b.co[i];
            let mut ori = ori_a + if ori_a < 3 { ori_b } else { 6 - ori_b };
            ori = ori % 3 + if (ori_a < 3) == (ori_b < 3) { 0 } else { 3 };
            cp[i] = self.cp[p];
            co[i] = ori;
        }
        self.cp = cp;
        self.co = co;
    }

    /// Edge part of `self * b`.
    pub fn edge_multiply(&mut self, b: CubieCube) {
        let mut ep = [UR; N_EDGES];
        let mut eo = [0u8; N_EDGES];
        for i in 0..N_EDGES {
            let p = b.ep[i] as usize;
            ep[i] = self.ep[p];
            eo[i] = self.eo[p] ^ b.eo[i];
        }
        self.ep = ep;
        self.eo = eo;
    }

    /// `self = self * b` on corners and edges.
    pub fn multiply(&mut self, b: CubieCube) {
        self.corner_multiply(b);
        self.edge_multiply(b);
    }

    /// The inverse cube. Only valid for cubes without mirror markers.
    pub fn inverse_cubie_cube(&self) -> CubieCube {
        let mut c = CubieCube::SOLVED;
        for i in 0..N_EDGES {
            c.ep[self.ep[i] as usize] = ALL_EDGES[i];
            c.eo[self.ep[i] as usize] = self.eo[i];
        }
        for i in 0..N_CORNERS {
            c.cp[self.cp[i] as usize] = ALL_CORNERS[i];
            c.co[self.cp[i] as usize] = (3 - self.co[i]) % 3;
        }
        c
    }

    /// Rotates the whole cube 120 degrees around the URF-DBL axis,
    /// `self = urf^-1 * self * urf`.
    pub fn urf_conjugate(&mut self) {
        let mut c = URF_INV_CUBE;
        c.multiply(*self);
        c.multiply(URF_CUBE);
        *self = c;
    }

    /// Applies a sequence of face turns to this cube.
    pub fn apply_moves(&self, moves: &[Move]) -> CubieCube {
        let basics = basic_move_cubes();
        let mut c = *self;
        for &m in moves {
            let m = m as usize;
            for _ in 0..(m % 3) + 1 {
                c.multiply(basics[m / 3]);
            }
        }
        c
    }

    /// Replaces this cube with a uniformly random solvable state.
    pub fn randomize(&mut self) {
        let mut rng = rand::thread_rng();
        let eperm: u32 = rng.gen_range(0..479_001_600);
        let parity = get_n_parity(eperm, 12);
        let cperm: u32 = loop {
            let c = rng.gen_range(0..N_PERM as u32);
            if get_n_parity(c, 8) == parity {
                break c;
            }
        };
        let mut edges = [0u8; N_EDGES];
        set_n_perm(&mut edges, eperm);
        for i in 0..N_EDGES {
            self.ep[i] = ALL_EDGES[edges[i] as usize];
        }
        self.set_cperm(cperm);
        self.set_twist(rng.gen_range(0..N_TWIST as u16));
        self.set_flip(rng.gen_range(0..N_FLIP as u16));
    }

    /// Validates that this cube is reachable from the solved state.
    pub fn check(&self) -> Result<(), Error> {
        let mut edge_mask = 0u16;
        for e in self.ep {
            edge_mask |= 1 << e as u16;
        }
        if edge_mask != 0xfff {
            return Err(Error::MissingEdge);
        }
        if self.eo.iter().fold(0u8, |acc, &o| acc ^ o) != 0 {
            return Err(Error::FlippedEdge);
        }
        let mut corner_mask = 0u8;
        for c in self.cp {
            corner_mask |= 1 << c as u8;
        }
        if corner_mask != 0xff {
            return Err(Error::MissingCorner);
        }
        if self.co.iter().map(|&o| o as u32).sum::<u32>() % 3 != 0 {
            return Err(Error::TwistedCorner);
        }
        let edges: Vec<u8> = self.ep.iter().map(|&e| e as u8).collect();
        let corners: Vec<u8> = self.cp.iter().map(|&c| c as u8).collect();
        if get_n_parity(get_n_perm(&edges), 12) != get_n_parity(get_n_perm(&corners), 8) {
            return Err(Error::ParityError);
        }
        Ok(())
    }

    /// Symmetries this cube has, one bit per element of the full 48 element
    /// group. Bit 48 collects everything beyond the first 48 indices.
    pub fn self_symmetry(&self, sy: &SymmetriesTables) -> u64 {
        let mut c = *self;
        let mut sym = 0u64;
        let cperm = c.get_cperm_sym(sy) >> 4;
        for urf_inv in 0..6 {
            if c.get_cperm_sym(sy) >> 4 == cperm {
                for i in 0..SYM {
                    let inv = sy.sym_mult_inv[0][i] as usize;
                    let d = sy.corner_conjugate(&c, inv);
                    if d.cp == self.cp && d.co == self.co {
                        let e = sy.edge_conjugate(&c, inv);
                        if e.ep == self.ep && e.eo == self.eo {
                            sym |= 1u64 << min(urf_inv * 16 + i, FULL_SYM);
                        }
                    }
                }
            }
            c.urf_conjugate();
            if urf_inv % 3 == 2 {
                c = c.inverse_cubie_cube();
            }
        }
        sym
    }
}

/// Coordinate accessors.
impl CubieCube {
    /// Edge orientation coordinate, 0..2048.
    pub fn get_flip(&self) -> u16 {
        let mut flip = 0u16;
        for i in 0..N_EDGES - 1 {
            flip = flip << 1 | self.eo[i] as u16;
        }
        flip
    }

    pub fn set_flip(&mut self, mut flip: u16) {
        let mut parity = 0u8;
        for i in (0..N_EDGES - 1).rev() {
            let o = (flip & 1) as u8;
            self.eo[i] = o;
            parity ^= o;
            flip >>= 1;
        }
        self.eo[N_EDGES - 1] = parity;
    }

    /// Corner orientation coordinate, 0..2187.
    pub fn get_twist(&self) -> u16 {
        let mut twist = 0u16;
        for i in 0..N_CORNERS - 1 {
            twist = twist * 3 + self.co[i] as u16;
        }
        twist
    }

    pub fn set_twist(&mut self, mut twist: u16) {
        let mut sum = 0u16;
        for i in (0..N_CORNERS - 1).rev() {
            let o = twist % 3;
            self.co[i] = o as u8;
            sum += o;
            twist /= 3;
        }
        self.co[N_CORNERS - 1] = ((15 - sum) % 3) as u8;
    }

    /// Location coordinate of the four FR/FL/BL/BR slice edges, 0..495,
    /// 0 in the solved state.
    pub fn get_udslice(&self) -> u16 {
        let edges: Vec<u8> = self.ep.iter().map(|&e| e as u8).collect();
        494 - get_comb(&edges, 8)
    }

    pub fn set_udslice(&mut self, udslice: u16) {
        let mut edges = [0u8; N_EDGES];
        set_comb(&mut edges, 494 - udslice, 8);
        for i in 0..N_EDGES {
            self.ep[i] = ALL_EDGES[edges[i] as usize];
        }
    }

    /// Corner permutation coordinate, 0..40320.
    pub fn get_cperm(&self) -> u32 {
        let corners: Vec<u8> = self.cp.iter().map(|&c| c as u8).collect();
        get_n_perm(&corners)
    }

    pub fn set_cperm(&mut self, idx: u32) {
        let mut corners = [0u8; N_CORNERS];
        set_n_perm(&mut corners, idx);
        for i in 0..N_CORNERS {
            self.cp[i] = ALL_CORNERS[corners[i] as usize];
        }
    }

    /// Permutation coordinate of the eight U and D layer edges, 0..40320.
    /// Only meaningful in phase 2 positions.
    pub fn get_eperm(&self) -> u32 {
        let edges: Vec<u8> = self.ep[..8].iter().map(|&e| e as u8).collect();
        get_n_perm(&edges)
    }

    pub fn set_eperm(&mut self, idx: u32) {
        let mut edges = [0u8; 8];
        set_n_perm(&mut edges, idx);
        for i in 0..8 {
            self.ep[i] = ALL_EDGES[edges[i] as usize];
        }
    }

    /// Permutation of the four slice edges within the slice, 0..24.
    /// Only meaningful in phase 2 positions.
    pub fn get_mperm(&self) -> u8 {
        let edges: Vec<u8> = self.ep.iter().map(|&e| e as u8).collect();
        (get_n_perm(&edges) % N_MPERM as u32) as u8
    }

    pub fn set_mperm(&mut self, idx: u8) {
        let mut edges = [0u8; N_EDGES];
        set_n_perm(&mut edges, idx as u32);
        for i in 0..N_EDGES {
            self.ep[i] = ALL_EDGES[edges[i] as usize];
        }
    }

    /// Combination coordinate of the four URF/UFL/ULB/UBR corners, 0..70.
    pub fn get_ccomb(&self) -> u8 {
        let corners: Vec<u8> = self.cp.iter().map(|&c| c as u8).collect();
        get_comb(&corners, 0) as u8
    }

    pub fn set_ccomb(&mut self, idx: u8) {
        let mut corners = [0u8; N_CORNERS];
        set_comb(&mut corners, idx as u16, 0);
        for i in 0..N_CORNERS {
            self.cp[i] = ALL_CORNERS[corners[i] as usize];
        }
    }

    /// Flip sym-coordinate, `class << 3 | sym`.
    pub fn get_flip_sym(&self, sy: &SymmetriesTables) -> u16 {
        sy.flip_r2s[self.get_flip() as usize]
    }

    /// Twist sym-coordinate, `class << 3 | sym`.
    pub fn get_twist_sym(&self, sy: &SymmetriesTables) -> u16 {
        sy.twist_r2s[self.get_twist() as usize]
    }

    /// Edge permutation sym-coordinate, `class << 4 | sym`.
    pub fn get_eperm_sym(&self, sy: &SymmetriesTables) -> u16 {
        sy.eperm_r2s[self.get_eperm() as usize]
    }

    /// Corner permutation sym-coordinate, `class << 4 | sym`, expressed in
    /// the edge permutation class numbering.
    pub fn get_cperm_sym(&self, sy: &SymmetriesTables) -> u16 {
        crate::symmetries::esym2csym(sy.eperm_r2s[self.get_cperm() as usize])
    }
}

/// Lehmer rank of a permutation given as distinct values.
pub fn get_n_perm(arr: &[u8]) -> u32 {
    let n = arr.len();
    let mut idx = 0u32;
    for i in 0..n - 1 {
        let smaller = arr[..i].iter().filter(|&&v| v < arr[i]).count() as u32;
        idx = idx * (n - i) as u32 + (arr[i] as u32 - smaller);
    }
    idx
}

/// Writes the permutation with Lehmer rank `idx` over values `0..arr.len()`.
pub fn set_n_perm(arr: &mut [u8], mut idx: u32) {
    let n = arr.len();
    let mut ranks = vec![0usize; n];
    for i in (0..n - 1).rev() {
        ranks[i] = (idx % (n - i) as u32) as usize;
        idx /= (n - i) as u32;
    }
    let mut rest: Vec<u8> = (0..n as u8).collect();
    for i in 0..n {
        arr[i] = rest.remove(ranks[i]);
    }
}

/// Parity of the permutation with Lehmer rank `idx` over `n` values.
pub fn get_n_parity(mut idx: u32, n: u8) -> u8 {
    let mut p = 0u32;
    for i in (0..n as u32 - 1).rev() {
        p ^= idx % (n as u32 - i);
        idx /= n as u32 - i;
    }
    (p & 1) as u8
}

/// Rank of the positions holding the four values in the class selected by
/// `mask` (0 for values 0..4, 8 for values 8..12).
fn get_comb(arr: &[u8], mask: u8) -> u16 {
    let mut idx = 0u16;
    let mut r = 4i32;
    for i in (0..arr.len()).rev() {
        if arr[i] & 0xc == mask {
            idx += CNK[i][r as usize];
            r -= 1;
        }
    }
    idx
}

/// Inverse of [`get_comb`], filling the remaining positions with the other
/// values in decreasing order.
fn set_comb(arr: &mut [u8], mut idx: u16, mask: u8) {
    let n = arr.len();
    let mut fill = (n - 1) as i32;
    let mut r = 4i32;
    for i in (0..n).rev() {
        if idx >= CNK[i][r as usize] {
            idx -= CNK[i][r as usize];
            r -= 1;
            arr[i] = r as u8 | mask;
        } else {
            if fill as u8 & 0xc == mask {
                fill -= 4;
            }
            arr[i] = fill as u8;
            fill -= 1;
        }
    }
}

impl TryFrom<&FaceCube> for CubieCube {
    type Error = Error;

    /// Maps stickers to cubies. Sticker sets that match no cubie leave the
    /// default in place, which [`CubieCube::check`] reports as a missing
    /// corner or edge.
    fn try_from(fc: &FaceCube) -> Result<Self, Self::Error> {
        let mut cc = CubieCube::SOLVED;
        for i in 0..N_CORNERS {
            let mut ori = 0;
            while ori < 3 {
                let col = fc.f[CORNER_FACELET[i][ori]] as usize;
                if col == 0 || col == 3 {
                    break;
                }
                ori += 1;
            }
            if ori == 3 {
                continue;
            }
            let col1 = fc.f[CORNER_FACELET[i][(ori + 1) % 3]] as usize;
            let col2 = fc.f[CORNER_FACELET[i][(ori + 2) % 3]] as usize;
            for j in 0..N_CORNERS {
                if col1 == CORNER_FACELET[j][1] / 9 && col2 == CORNER_FACELET[j][2] / 9 {
                    cc.cp[i] = ALL_CORNERS[j];
                    cc.co[i] = ori as u8;
                    break;
                }
            }
        }
        for i in 0..N_EDGES {
            for j in 0..N_EDGES {
                let col0 = fc.f[EDGE_FACELET[i][0]] as usize;
                let col1 = fc.f[EDGE_FACELET[i][1]] as usize;
                if col0 == EDGE_FACELET[j][0] / 9 && col1 == EDGE_FACELET[j][1] / 9 {
                    cc.ep[i] = ALL_EDGES[j];
                    cc.eo[i] = 0;
                    break;
                }
                if col0 == EDGE_FACELET[j][1] / 9 && col1 == EDGE_FACELET[j][0] / 9 {
                    cc.ep[i] = ALL_EDGES[j];
                    cc.eo[i] = 1;
                    break;
                }
            }
        }
        Ok(cc)
    }
}

impl TryFrom<&Vec<Move>> for CubieCube {
    type Error = Error;

    fn try_from(moves: &Vec<Move>) -> Result<Self, Self::Error> {
        Ok(CubieCube::SOLVED.apply_moves(moves))
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fc = FaceCube::try_from(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", fc)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::moves::move_cubes;

    #[test]
    fn quarter_turn_has_order_four() {
        for basic in basic_move_cubes() {
            let mut c = CubieCube::SOLVED;
            for _ in 0..4 {
                c.multiply(basic);
            }
            assert_eq!(c, CubieCube::SOLVED);
        }
    }

    #[test]
    fn inverse_cancels() {
        let mut c = CubieCube::SOLVED;
        c.multiply(R_MOVE);
        c.multiply(U_MOVE);
        c.multiply(F_MOVE);
        let mut d = c;
        d.multiply(c.inverse_cubie_cube());
        assert_eq!(d, CubieCube::SOLVED);
    }

    #[test]
    fn urf_conjugation_has_order_three() {
        let mut c = CubieCube::SOLVED;
        c.multiply(R_MOVE);
        c.multiply(F_MOVE);
        let orig = c;
        c.urf_conjugate();
        c.urf_conjugate();
        c.urf_conjugate();
        assert_eq!(c, orig);
    }

    #[test]
    fn urf_cube_is_invertible() {
        let mut c = URF_CUBE;
        c.multiply(URF_INV_CUBE);
        assert_eq!(c, CubieCube::SOLVED);
    }

    #[test]
    fn solved_coordinates_are_zero() {
        let c = CubieCube::SOLVED;
        assert_eq!(c.get_flip(), 0);
        assert_eq!(c.get_twist(), 0);
        assert_eq!(c.get_udslice(), 0);
        assert_eq!(c.get_cperm(), 0);
        assert_eq!(c.get_eperm(), 0);
        assert_eq!(c.get_mperm(), 0);
        assert_eq!(c.get_ccomb(), 0);
    }

    #[test]
    fn coordinate_roundtrips() {
        let mut c = CubieCube::SOLVED;
        for idx in [1u16, 77, 1355, 2046] {
            c.set_flip(idx);
            assert_eq!(c.get_flip(), idx);
            assert_eq!(c.eo.iter().fold(0, |a, &o| a ^ o), 0);
        }
        for idx in [1u16, 500, 2186] {
            c.set_twist(idx);
            assert_eq!(c.get_twist(), idx);
            assert_eq!(c.co.iter().map(|&o| o as u32).sum::<u32>() % 3, 0);
        }
        for idx in [1u16, 247, 494] {
            c.set_udslice(idx);
            assert_eq!(c.get_udslice(), idx);
        }
        let mut c = CubieCube::SOLVED;
        for idx in [1u32, 5040, 40319] {
            c.set_cperm(idx);
            assert_eq!(c.get_cperm(), idx);
            c.set_eperm(idx);
            assert_eq!(c.get_eperm(), idx);
        }
        for idx in [0u8, 11, 23] {
            c.set_mperm(idx);
            assert_eq!(c.get_mperm(), idx);
        }
        for idx in [0u8, 34, 69] {
            c.set_ccomb(idx);
            assert_eq!(c.get_ccomb(), idx);
        }
    }

    #[test]
    fn permutation_codec() {
        let mut arr = [0u8; 8];
        set_n_perm(&mut arr, 0);
        assert_eq!(arr, [0, 1, 2, 3, 4, 5, 6, 7]);
        set_n_perm(&mut arr, 40319);
        assert_eq!(arr, [7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(get_n_perm(&arr), 40319);
        assert_eq!(get_n_parity(0, 8), 0);
        // a single transposition of the last two values
        set_n_perm(&mut arr, 1);
        assert_eq!(arr, [0, 1, 2, 3, 4, 5, 7, 6]);
        assert_eq!(get_n_parity(1, 8), 1);
    }

    #[test]
    fn check_rejects_broken_cubes() {
        let mut c = CubieCube::SOLVED;
        c.eo[0] = 1;
        assert!(matches!(c.check(), Err(Error::FlippedEdge)));

        let mut c = CubieCube::SOLVED;
        c.co[0] = 1;
        assert!(matches!(c.check(), Err(Error::TwistedCorner)));

        let mut c = CubieCube::SOLVED;
        c.ep[0] = UF;
        assert!(matches!(c.check(), Err(Error::MissingEdge)));

        let mut c = CubieCube::SOLVED;
        c.cp.swap(0, 1);
        assert!(matches!(c.check(), Err(Error::ParityError)));
    }

    #[test]
    fn random_cubes_are_solvable() {
        let mut c = CubieCube::SOLVED;
        for _ in 0..20 {
            c.randomize();
            assert!(c.check().is_ok());
        }
    }

    #[test]
    fn move_cubes_match_facelet_turns() {
        // applying U four times through apply_moves is the identity
        let c = CubieCube::SOLVED.apply_moves(&[Move::U, Move::U, Move::U2]);
        assert_eq!(c, CubieCube::SOLVED);
        let mc = move_cubes();
        let mut d = CubieCube::SOLVED;
        d.multiply(mc[Move::R2 as usize]);
        d.multiply(mc[Move::R2 as usize]);
        assert_eq!(d, CubieCube::SOLVED);
    }
}
