//! The 16 element symmetry group fixing the UD axis, and the reduction of raw
//! coordinates to symmetry classes.
//!
//! The group is generated by a 90 degree U axis rotation, a reflection through
//! the RL plane and a 180 degree F axis rotation. Flip, twist and permutation
//! coordinates are reduced to class representatives, stored as sym-coordinates
//! `class << shift | sym` where `sym` names the conjugating symmetry.

use bincode::{Decode, Encode};

use crate::constants::*;
use crate::cubie::{CubieCube, ALL_CORNERS, ALL_EDGES};
use crate::cubie::{Corner::*, Edge::*};
use crate::moves::move_cubes;

/// 180 degree rotation around the F axis.
const S_F2: CubieCube = CubieCube {
    cp: [DLF, DFR, DRB, DBL, UFL, URF, UBR, ULB],
    co: [0; 8],
    ep: [DL, DF, DR, DB, UL, UF, UR, UB, FL, FR, BR, BL],
    eo: [0; 12],
};

/// 90 degree rotation around the U axis.
const S_U4: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DRB, DFR, DLF, DBL],
    co: [0; 8],
    ep: [UB, UR, UF, UL, DB, DR, DF, DL, BR, FR, FL, BL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
};

/// Reflection through the RL plane. Corner orientations carry the mirror
/// marker 3.
const S_LR2: CubieCube = CubieCube {
    cp: [UFL, URF, UBR, ULB, DLF, DFR, DRB, DBL],
    co: [3; 8],
    ep: [UL, UF, UR, UB, DL, DF, DR, DB, FL, FR, BR, BL],
    eo: [0; 12],
};

/// Precomputed symmetry data: the group itself, its action on moves, and the
/// sym-coordinate reductions of the flip, twist and permutation coordinates.
#[derive(Encode, Decode)]
pub struct SymmetriesTables {
    /// The 16 symmetry cubes.
    pub cube_sym: [CubieCube; SYM],
    /// Group multiplication, `cube_sym[i] * cube_sym[j] == cube_sym[sym_mult[i][j]]`.
    pub sym_mult: [[u8; SYM]; SYM],
    /// `sym_mult_inv[k][j] == i` iff `sym_mult[i][j] == k`.
    pub sym_mult_inv: [[u8; SYM]; SYM],
    /// Move conjugation, `s^-1 * move[i] * s == move[sym_move[s][i]]`.
    pub sym_move: [[u8; N_MOVES]; SYM],
    /// [`Self::sym_move`] restricted to even symmetries, indexed `m << 3 | s >> 1`.
    pub sym8_move: [u8; N_MOVES * SYM_CLASSES],
    /// Move conjugation in phase 2 move numbering.
    pub sym_move_ud: [[u8; N_MOVES]; SYM],
    /// The 18 move cubes.
    pub move_cube: [CubieCube; N_MOVES],
    /// Self-symmetry masks of the move cubes.
    pub move_cube_sym: [u64; N_MOVES],

    /// Flip class representative to raw coordinate.
    pub flip_s2r: Vec<u16>,
    /// Raw flip to sym-coordinate `class << 3 | sym >> 1`.
    pub flip_r2s: Vec<u16>,
    /// Raw flip of every class member, indexed `class << 3 | sym >> 1`.
    pub flip_s2rf: Vec<u16>,
    pub twist_s2r: Vec<u16>,
    pub twist_r2s: Vec<u16>,
    pub eperm_s2r: Vec<u16>,
    /// Raw edge permutation to sym-coordinate `class << 4 | sym`.
    pub eperm_r2s: Vec<u16>,

    /// Bit j set when symmetry j fixes the class representative.
    pub sym_state_flip: Vec<u16>,
    pub sym_state_twist: Vec<u16>,
    pub sym_state_perm: Vec<u16>,

    /// Corner combination with parity of each permutation class.
    pub perm2comb_p: Vec<u8>,
    /// Edge permutation sym-coordinate of the inverse of each class representative.
    pub perm_inv_edge_sym: Vec<u16>,
    /// Inverse of each middle slice permutation.
    pub mperm_inv: [u8; N_MPERM],
}

/// Translates an edge permutation sym-coordinate into the corner permutation
/// numbering of the same class.
pub fn esym2csym(idx: u16) -> u16 {
    idx ^ ((SYM_E2C_MAGIC >> ((idx & 0xf) << 1)) as u16 & 3)
}

impl SymmetriesTables {
    pub fn new() -> Self {
        let mut sy = SymmetriesTables {
            cube_sym: [CubieCube::SOLVED; SYM],
            sym_mult: [[0; SYM]; SYM],
            sym_mult_inv: [[0; SYM]; SYM],
            sym_move: [[0; N_MOVES]; SYM],
            sym8_move: [0; N_MOVES * SYM_CLASSES],
            sym_move_ud: [[0; N_MOVES]; SYM],
            move_cube: move_cubes(),
            move_cube_sym: [0; N_MOVES],
            flip_s2r: vec![0; N_FLIP_SYM],
            flip_r2s: vec![0; N_FLIP],
            flip_s2rf: vec![0; N_FLIP_SYM * SYM_CLASSES],
            twist_s2r: vec![0; N_TWIST_SYM],
            twist_r2s: vec![0; N_TWIST],
            eperm_s2r: vec![0; N_PERM_SYM],
            eperm_r2s: vec![0; N_PERM],
            sym_state_flip: vec![0; N_FLIP_SYM],
            sym_state_twist: vec![0; N_TWIST_SYM],
            sym_state_perm: vec![0; N_PERM_SYM],
            perm2comb_p: vec![0; N_PERM_SYM],
            perm_inv_edge_sym: vec![0; N_PERM_SYM],
            mperm_inv: [0; N_MPERM],
        };
        sy.init_group();
        sy.init_perm_sym2raw();
        sy.init_flip_sym2raw();
        sy.init_twist_sym2raw();
        sy.init_sym_move();
        for i in 0..N_MOVES {
            sy.move_cube_sym[i] = sy.move_cube[i].self_symmetry(&sy);
        }
        sy
    }

    fn init_group(&mut self) {
        let mut c = CubieCube::SOLVED;
        for i in 0..SYM {
            self.cube_sym[i] = c;
            c.corner_multiply_full(S_U4);
            c.edge_multiply(S_U4);
            if i % 4 == 3 {
                c.corner_multiply_full(S_LR2);
                c.edge_multiply(S_LR2);
            }
            if i % 8 == 7 {
                c.corner_multiply_full(S_F2);
                c.edge_multiply(S_F2);
            }
        }
        for i in 0..SYM {
            for j in 0..SYM {
                let mut d = self.cube_sym[i];
                d.corner_multiply_full(self.cube_sym[j]);
                for k in 0..SYM {
                    if d.cp == self.cube_sym[k].cp && d.co == self.cube_sym[k].co {
                        self.sym_mult[i][j] = k as u8;
                        self.sym_mult_inv[k][j] = i as u8;
                        break;
                    }
                }
            }
        }
    }

    fn init_sym_move(&mut self) {
        for j in 0..SYM {
            for i in 0..N_MOVES {
                let c = self.corner_conjugate(&self.move_cube[i], self.sym_mult_inv[0][j] as usize);
                for k in 0..N_MOVES {
                    if self.move_cube[k].cp == c.cp && self.move_cube[k].co == c.co {
                        self.sym_move[j][i] = k as u8;
                        self.sym_move_ud[j][STD2UD[i] as usize] = STD2UD[k];
                        break;
                    }
                }
                if j % 2 == 0 {
                    self.sym8_move[i << 3 | j >> 1] = self.sym_move[j][i];
                }
            }
        }
    }

    /// `s^-1 * a * s` on corners.
    pub fn corner_conjugate(&self, a: &CubieCube, idx: usize) -> CubieCube {
        let sinv = &self.cube_sym[self.sym_mult_inv[0][idx] as usize];
        let s = &self.cube_sym[idx];
        let mut b = CubieCube::SOLVED;
        for c in 0..N_CORNERS {
            let p = a.cp[s.cp[c] as usize] as usize;
            let ori_a = sinv.co[p];
            let ori_b = a.co[s.cp[c] as usize];
            b.cp[c] = sinv.cp[p];
            b.co[c] = if ori_a < 3 { ori_b } else { (3 - ori_b) % 3 };
        }
        b
    }

    /// `s^-1 * a * s` on edges.
    pub fn edge_conjugate(&self, a: &CubieCube, idx: usize) -> CubieCube {
        let sinv = &self.cube_sym[self.sym_mult_inv[0][idx] as usize];
        let s = &self.cube_sym[idx];
        let mut b = CubieCube::SOLVED;
        for e in 0..N_EDGES {
            let p = a.ep[s.ep[e] as usize] as usize;
            b.ep[e] = sinv.ep[p];
            b.eo[e] = sinv.eo[p] ^ a.eo[s.ep[e] as usize] ^ s.eo[e];
        }
        b
    }

    /// Sym-coordinate of the inverse of the permutation class member
    /// `(idx, sym)`, for edges or corners.
    pub fn get_perm_sym_inv(&self, idx: u16, sym: u8, is_corner: bool) -> u16 {
        let mut idxi = self.perm_inv_edge_sym[idx as usize];
        if is_corner {
            idxi = esym2csym(idxi);
        }
        (idxi & !0xf) | self.sym_mult[(idxi & 0xf) as usize][sym as usize] as u16
    }

    fn init_flip_sym2raw(&mut self) {
        let mut raw2sym = vec![0u16; N_FLIP];
        let mut count = 0usize;
        for i in 0..N_FLIP {
            if raw2sym[i] != 0 {
                continue;
            }
            let mut c = CubieCube::SOLVED;
            c.set_flip(i as u16);
            for j in (0..SYM).step_by(2) {
                let d = self.edge_conjugate(&c, j);
                let idx = d.get_flip() as usize;
                self.flip_s2rf[count << 3 | j >> 1] = idx as u16;
                if idx == i {
                    self.sym_state_flip[count] |= 1 << (j / 2);
                }
                raw2sym[idx] = ((count << 4 | j) / 2) as u16;
            }
            self.flip_s2r[count] = i as u16;
            count += 1;
        }
        debug_assert_eq!(count, N_FLIP_SYM);
        self.flip_r2s = raw2sym;
    }

    fn init_twist_sym2raw(&mut self) {
        let mut raw2sym = vec![0u16; N_TWIST];
        let mut count = 0usize;
        for i in 0..N_TWIST {
            if raw2sym[i] != 0 {
                continue;
            }
            let mut c = CubieCube::SOLVED;
            c.set_twist(i as u16);
            for j in (0..SYM).step_by(2) {
                let d = self.corner_conjugate(&c, j);
                let idx = d.get_twist() as usize;
                if idx == i {
                    self.sym_state_twist[count] |= 1 << (j / 2);
                }
                raw2sym[idx] = ((count << 4 | j) / 2) as u16;
            }
            self.twist_s2r[count] = i as u16;
            count += 1;
        }
        debug_assert_eq!(count, N_TWIST_SYM);
        self.twist_r2s = raw2sym;
    }

    fn init_perm_sym2raw(&mut self) {
        let mut raw2sym = vec![0u16; N_PERM];
        let mut count = 0usize;
        for i in 0..N_PERM {
            if raw2sym[i] != 0 {
                continue;
            }
            let mut c = CubieCube::SOLVED;
            c.set_eperm(i as u32);
            for j in 0..SYM {
                let d = self.edge_conjugate(&c, j);
                let idx = d.get_eperm() as usize;
                if idx == i {
                    self.sym_state_perm[count] |= 1 << j;
                }
                raw2sym[idx] = (count << 4 | j) as u16;
            }
            self.eperm_s2r[count] = i as u16;
            let edges: Vec<u8> = c.ep[..8].iter().map(|&e| e as u8).collect();
            self.perm2comb_p[count] = combp_of(&edges, i as u32);
            count += 1;
        }
        debug_assert_eq!(count, N_PERM_SYM);
        self.eperm_r2s = raw2sym;
        for i in 0..N_PERM_SYM {
            let mut c = CubieCube::SOLVED;
            c.set_eperm(self.eperm_s2r[i] as u32);
            self.perm_inv_edge_sym[i] =
                self.eperm_r2s[c.inverse_cubie_cube().get_eperm() as usize];
        }
        for i in 0..N_MPERM {
            let mut c = CubieCube::SOLVED;
            c.set_mperm(i as u8);
            self.mperm_inv[i] = c.inverse_cubie_cube().get_mperm();
        }
    }
}

/// Corner combination with permutation parity in the high half, 0..140.
fn combp_of(perm8: &[u8], rank: u32) -> u8 {
    let mut comb = 0u16;
    let mut r = 4i32;
    for i in (0..8).rev() {
        if perm8[i] < 4 {
            comb += CNK[i][r as usize];
            r -= 1;
        }
    }
    (comb as u8) + crate::cubie::get_n_parity(rank, 8) * 70
}

impl Default for SymmetriesTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    lazy_static! {
        static ref SY: SymmetriesTables = SymmetriesTables::new();
    }

    #[test]
    fn identity_is_symmetry_zero() {
        assert_eq!(SY.cube_sym[0], CubieCube::SOLVED);
        for i in 0..SYM {
            assert_eq!(SY.sym_mult[i][0] as usize, i);
            assert_eq!(SY.sym_mult[0][i] as usize, i);
        }
    }

    #[test]
    fn group_inverses() {
        for i in 0..SYM {
            let inv = SY.sym_mult_inv[0][i] as usize;
            assert_eq!(SY.sym_mult[i][inv], 0);
        }
    }

    #[test]
    fn class_counts() {
        assert_eq!(SY.flip_s2r.len(), N_FLIP_SYM);
        assert_eq!(SY.twist_s2r.len(), N_TWIST_SYM);
        assert_eq!(SY.eperm_s2r.len(), N_PERM_SYM);
        // solved state is the representative of class 0
        assert_eq!(SY.flip_s2r[0], 0);
        assert_eq!(SY.twist_s2r[0], 0);
        assert_eq!(SY.eperm_s2r[0], 0);
    }

    #[test]
    fn raw2sym_records_the_conjugating_symmetry() {
        // conjugating the class representative by the stored symmetry must
        // reproduce the raw coordinate
        for raw in (0..N_FLIP as u16).step_by(97) {
            let s = SY.flip_r2s[raw as usize];
            let mut c = CubieCube::SOLVED;
            c.set_flip(SY.flip_s2r[(s >> 3) as usize]);
            let j = ((s & 7) << 1) as usize;
            assert_eq!(SY.edge_conjugate(&c, j).get_flip(), raw);
        }
        for raw in (0..N_TWIST as u16).step_by(97) {
            let s = SY.twist_r2s[raw as usize];
            let mut c = CubieCube::SOLVED;
            c.set_twist(SY.twist_s2r[(s >> 3) as usize]);
            let j = ((s & 7) << 1) as usize;
            assert_eq!(SY.corner_conjugate(&c, j).get_twist(), raw);
        }
        for raw in (0..N_PERM).step_by(997) {
            let s = SY.eperm_r2s[raw];
            let mut c = CubieCube::SOLVED;
            c.set_eperm(SY.eperm_s2r[(s >> 4) as usize] as u32);
            let conj = SY.edge_conjugate(&c, (s & 0xf) as usize);
            assert_eq!(conj.get_eperm() as usize, raw);
        }
    }

    #[test]
    fn conjugation_by_identity_is_identity() {
        let mut c = CubieCube::SOLVED;
        c.multiply(SY.move_cube[4]);
        c.multiply(SY.move_cube[8]);
        assert_eq!(SY.corner_conjugate(&c, 0).cp, c.cp);
        assert_eq!(SY.edge_conjugate(&c, 0).ep, c.ep);
    }

    #[test]
    fn sym_move_identity_row() {
        for m in 0..N_MOVES {
            assert_eq!(SY.sym_move[0][m] as usize, m);
        }
    }

    #[test]
    fn move_cube_self_symmetry_includes_identity() {
        for m in 0..N_MOVES {
            assert_eq!(SY.move_cube_sym[m] & 1, 1);
        }
        // half turns are self-inverse, so they carry symmetries beyond bit 0
        assert_ne!(SY.move_cube_sym[1] & !1, 0);
    }

    #[test]
    fn mperm_inverse_is_an_involution() {
        for i in 0..N_MPERM {
            assert_eq!(SY.mperm_inv[SY.mperm_inv[i] as usize] as usize, i);
        }
    }
}
