//! Cube representation on the coordinate level, as used by the phase 1 search.

use std::cmp::max;
use std::fmt;

use crate::constants::*;
use crate::cubie::CubieCube;
use crate::moves::MoveTables;
use crate::pruning::{get_pruning, PrunningTables};
use crate::symmetries::SymmetriesTables;

/// A phase 1 node: twist, flip and slice coordinates of a cube together with
/// the same coordinates of the cube conjugated by symmetry 1, which feeds the
/// pruning table of the inverse direction.
///
/// `twist` and `flip` hold the class index, `tsym` and `fsym` the symmetry
/// that maps the cube onto the representative.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CoordCube {
    pub twist: u16,
    pub tsym: u8,
    pub flip: u16,
    pub fsym: u8,
    pub slice: u16,
    pub prun: i8,
    pub twistc: u16,
    pub flipc: u16,
}

impl CoordCube {
    pub const fn new() -> Self {
        CoordCube {
            twist: 0,
            tsym: 0,
            flip: 0,
            fsym: 0,
            slice: 0,
            prun: 0,
            twistc: 0,
            flipc: 0,
        }
    }
}

impl Default for CoordCube {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CoordCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(twist: {}/{}, flip: {}/{}, slice: {}, prun: {})",
            self.twist, self.tsym, self.flip, self.fsym, self.slice, self.prun
        )
    }
}

impl CoordCube {
    /// Fills this node from a cubie cube and computes its pruning bound,
    /// giving up early once the bound exceeds `depth`.
    pub fn set_with_prun(
        &mut self,
        cc: &CubieCube,
        depth: i8,
        sy: &SymmetriesTables,
        mv: &MoveTables,
        pr: &PrunningTables,
    ) -> bool {
        self.twist = cc.get_twist_sym(sy);
        self.flip = cc.get_flip_sym(sy);
        self.tsym = (self.twist & 7) as u8;
        self.twist >>= 3;

        self.prun = get_pruning(
            &pr.twist_flip_prun,
            (self.twist as usize) << 11
                | sy.flip_s2rf[(self.flip ^ self.tsym as u16) as usize] as usize,
        ) as i8;
        if self.prun > depth {
            return false;
        }

        self.fsym = (self.flip & 7) as u8;
        self.flip >>= 3;
        self.slice = cc.get_udslice();
        self.prun = max(
            self.prun,
            max(
                get_pruning(
                    &pr.udslice_twist_prun,
                    self.twist as usize * N_SLICE
                        + mv.udslice_conj[self.slice as usize * SYM_CLASSES + self.tsym as usize]
                            as usize,
                ) as i8,
                get_pruning(
                    &pr.udslice_flip_prun,
                    self.flip as usize * N_SLICE
                        + mv.udslice_conj[self.slice as usize * SYM_CLASSES + self.fsym as usize]
                            as usize,
                ) as i8,
            ),
        );
        if self.prun > depth {
            return false;
        }

        let mut pc = sy.corner_conjugate(cc, 1);
        let ec = sy.edge_conjugate(cc, 1);
        pc.ep = ec.ep;
        pc.eo = ec.eo;
        self.twistc = pc.get_twist_sym(sy);
        self.flipc = pc.get_flip_sym(sy);
        self.prun = max(
            self.prun,
            get_pruning(
                &pr.twist_flip_prun,
                ((self.twistc >> 3) as usize) << 11
                    | sy.flip_s2rf[(self.flipc ^ (self.twistc & 7)) as usize] as usize,
            ) as i8,
        );
        self.prun <= depth
    }

    /// Recomputes the pruning bound of an already filled node, taking the
    /// maximum over both search directions.
    pub fn calc_prun(
        &mut self,
        sy: &SymmetriesTables,
        mv: &MoveTables,
        pr: &PrunningTables,
    ) -> i8 {
        self.prun = max(
            max(
                get_pruning(
                    &pr.udslice_twist_prun,
                    self.twist as usize * N_SLICE
                        + mv.udslice_conj[self.slice as usize * SYM_CLASSES + self.tsym as usize]
                            as usize,
                ) as i8,
                get_pruning(
                    &pr.udslice_flip_prun,
                    self.flip as usize * N_SLICE
                        + mv.udslice_conj[self.slice as usize * SYM_CLASSES + self.fsym as usize]
                            as usize,
                ) as i8,
            ),
            max(
                get_pruning(
                    &pr.twist_flip_prun,
                    ((self.twistc >> 3) as usize) << 11
                        | sy.flip_s2rf[(self.flipc ^ (self.twistc & 7)) as usize] as usize,
                ) as i8,
                get_pruning(
                    &pr.twist_flip_prun,
                    (self.twist as usize) << 11
                        | sy.flip_s2rf
                            [(self.flip << 3 | (self.fsym ^ self.tsym) as u16) as usize]
                            as usize,
                ) as i8,
            ),
        );
        self.prun
    }

    /// Fills this node with `cc` moved by `m` and returns the pruning bound
    /// of the forward direction. The conjugate pair is left untouched.
    pub fn do_move_prun(
        &mut self,
        cc: &CoordCube,
        m: usize,
        sy: &SymmetriesTables,
        mv: &MoveTables,
        pr: &PrunningTables,
    ) -> i8 {
        self.slice = mv.udslice_move[cc.slice as usize * N_MOVES + m];

        self.flip =
            mv.flip_move[cc.flip as usize * N_MOVES + sy.sym8_move[m << 3 | cc.fsym as usize] as usize];
        self.fsym = (self.flip & 7) as u8 ^ cc.fsym;
        self.flip >>= 3;

        self.twist = mv.twist_move
            [cc.twist as usize * N_MOVES + sy.sym8_move[m << 3 | cc.tsym as usize] as usize];
        self.tsym = (self.twist & 7) as u8 ^ cc.tsym;
        self.twist >>= 3;

        self.prun = max(
            max(
                get_pruning(
                    &pr.udslice_twist_prun,
                    self.twist as usize * N_SLICE
                        + mv.udslice_conj[self.slice as usize * SYM_CLASSES + self.tsym as usize]
                            as usize,
                ) as i8,
                get_pruning(
                    &pr.udslice_flip_prun,
                    self.flip as usize * N_SLICE
                        + mv.udslice_conj[self.slice as usize * SYM_CLASSES + self.fsym as usize]
                            as usize,
                ) as i8,
            ),
            get_pruning(
                &pr.twist_flip_prun,
                (self.twist as usize) << 11
                    | sy.flip_s2rf[(self.flip << 3 | (self.fsym ^ self.tsym) as u16) as usize]
                        as usize,
            ) as i8,
        );
        self.prun
    }

    /// Moves only the conjugate pair of coordinates and returns the pruning
    /// bound of the inverse direction.
    pub fn do_move_prun_conj(
        &mut self,
        cc: &CoordCube,
        m: usize,
        sy: &SymmetriesTables,
        mv: &MoveTables,
        pr: &PrunningTables,
    ) -> i8 {
        let m = sy.sym_move[3][m] as usize;
        self.flipc = mv.flip_move[(cc.flipc >> 3) as usize * N_MOVES
            + sy.sym8_move[m << 3 | (cc.flipc & 7) as usize] as usize]
            ^ (cc.flipc & 7);
        self.twistc = mv.twist_move[(cc.twistc >> 3) as usize * N_MOVES
            + sy.sym8_move[m << 3 | (cc.twistc & 7) as usize] as usize]
            ^ (cc.twistc & 7);
        get_pruning(
            &pr.twist_flip_prun,
            ((self.twistc >> 3) as usize) << 11
                | sy.flip_s2rf[(self.flipc ^ (self.twistc & 7)) as usize] as usize,
        ) as i8
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::moves::Move;

    lazy_static! {
        static ref SY: SymmetriesTables = SymmetriesTables::new();
        static ref MV: MoveTables = MoveTables::new(&SY);
        static ref PR: PrunningTables = PrunningTables::new(&SY, &MV);
    }

    #[test]
    fn solved_node_has_zero_bound() {
        let mut node = CoordCube::new();
        assert!(node.set_with_prun(&CubieCube::SOLVED, 0, &SY, &MV, &PR));
        assert_eq!(node.prun, 0);
    }

    #[test]
    fn single_move_has_bound_one() {
        let cc = CubieCube::SOLVED.apply_moves(&[Move::R]);
        let mut node = CoordCube::new();
        assert!(node.set_with_prun(&cc, 1, &SY, &MV, &PR));
        assert_eq!(node.prun, 1);
        assert!(!node.set_with_prun(&cc, 0, &SY, &MV, &PR));
    }

    #[test]
    fn moving_back_to_solved_gives_zero() {
        let cc = CubieCube::SOLVED.apply_moves(&[Move::F]);
        let mut node = CoordCube::new();
        assert!(node.set_with_prun(&cc, 2, &SY, &MV, &PR));
        let mut next = CoordCube::new();
        // F' brings the cube back to phase 1 solved
        let prun = next.do_move_prun(&node, Move::F3 as usize, &SY, &MV, &PR);
        assert_eq!(prun, 0);
    }

    #[test]
    fn phase2_states_have_zero_phase1_bound() {
        let cc = CubieCube::SOLVED.apply_moves(&[Move::U, Move::R2, Move::D3, Move::L2]);
        let mut node = CoordCube::new();
        assert!(node.set_with_prun(&cc, 0, &SY, &MV, &PR));
        assert_eq!(node.prun, 0);
    }
}
