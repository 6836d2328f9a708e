//! Pruning tables over pairs of sym and raw coordinates.
//!
//! Entries are lower bounds on the remaining moves, packed 8 per u32 in 4 bit
//! nibbles. Entries past each table's fill depth hold `max_depth + 1`, which
//! keeps the bound admissible.

use bincode::{Decode, Encode};

use crate::constants::*;
use crate::moves::MoveTables;
use crate::symmetries::SymmetriesTables;

/// Fill depth of the slice/twist and slice/flip tables.
pub const PRUN1_MAX_DEPTH: u8 = 9;
/// Fill depth of the twist/flip table.
pub const TWIST_FLIP_MAX_DEPTH: u8 = 9;
/// Fill depth of the mperm/cperm table.
pub const MCPERM_MAX_DEPTH: u8 = 14;
/// Fill depth of the eperm/ccomb table.
pub const EPERM_CCOMBP_MAX_DEPTH: u8 = 13;

/// The pruning tables cut the search tree during the search.
#[derive(Encode, Decode, Default)]
pub struct PrunningTables {
    /// Phase 2 bound over corner permutation class and slice permutation.
    pub mcperm_prun: Vec<u32>,
    /// Phase 2 bound over edge permutation class and corner combination.
    pub eperm_ccombp_prun: Vec<u32>,
    /// Phase 1 bound over twist class and slice location.
    pub udslice_twist_prun: Vec<u32>,
    /// Phase 1 bound over flip class and slice location.
    pub udslice_flip_prun: Vec<u32>,
    /// Phase 1 bound over twist class and raw flip.
    pub twist_flip_prun: Vec<u32>,
}

/// Reads the 4 bit entry at `index`.
pub fn get_pruning(table: &[u32], index: usize) -> u8 {
    (table[index >> 3] >> ((index & 7) << 2) & 0xf) as u8
}

/// Writes the 4 bit entry at `index`.
pub fn set_pruning(table: &mut [u32], index: usize, value: u8) {
    let shift = (index & 7) << 2;
    table[index >> 3] &= !(0xf << shift);
    table[index >> 3] |= (value as u32) << shift;
}

impl PrunningTables {
    pub fn new(sy: &SymmetriesTables, mv: &MoveTables) -> Self {
        let mut pr = PrunningTables::default();
        pr.create_phase1_prun_tables(sy, mv);
        pr.create_phase2_prun_tables(sy, mv);
        pr
    }

    /// Builds the three phase 1 tables.
    pub fn create_phase1_prun_tables(&mut self, sy: &SymmetriesTables, mv: &MoveTables) {
        println!("Creating phase 1 pruning tables...");
        self.udslice_twist_prun = phase1_prun_table(
            &mv.twist_move,
            &mv.udslice_move,
            &mv.udslice_conj,
            &sy.sym_state_twist,
            N_TWIST_SYM,
            PRUN1_MAX_DEPTH,
        );
        self.udslice_flip_prun = phase1_prun_table(
            &mv.flip_move,
            &mv.udslice_move,
            &mv.udslice_conj,
            &sy.sym_state_flip,
            N_FLIP_SYM,
            PRUN1_MAX_DEPTH,
        );
        self.twist_flip_prun = twist_flip_prun_table(sy, mv);
    }

    /// Builds the two phase 2 tables.
    pub fn create_phase2_prun_tables(&mut self, sy: &SymmetriesTables, mv: &MoveTables) {
        println!("Creating phase 2 pruning tables...");
        self.mcperm_prun = phase2_prun_table(
            sy,
            &mv.cperm_move,
            &mv.mperm_move,
            &mv.mperm_conj,
            N_MPERM,
            MCPERM_MAX_DEPTH,
            true,
        );
        self.eperm_ccombp_prun = phase2_prun_table(
            sy,
            &mv.eperm_move,
            &mv.ccombp_move,
            &mv.ccombp_conj,
            N_COMB,
            EPERM_CCOMBP_MAX_DEPTH,
            false,
        );
    }
}

fn new_table(entries: usize, max_depth: u8) -> Vec<u32> {
    let marker = (max_depth + 1) as u32;
    vec![marker * 0x1111_1111; (entries + 7) / 8]
}

/// Breadth first fill of a phase 2 table indexed `sym * n_raw + raw`.
///
/// The sym coordinate is a corner or edge permutation class moved by
/// `sym_move`, the raw coordinate follows with `raw_move` and is pulled back
/// to the representative frame with `raw_conj`. When a state is reached, the
/// whole symmetry orbit of its class is filled in the same pass.
fn phase2_prun_table(
    sy: &SymmetriesTables,
    sym_move: &[u16],
    raw_move: &[u8],
    raw_conj: &[u8],
    n_raw: usize,
    max_depth: u8,
    e2c: bool,
) -> Vec<u32> {
    let entries = N_PERM_SYM * n_raw;
    let marker = max_depth + 1;
    let mut table = new_table(entries, max_depth);
    set_pruning(&mut table, 0, 0);
    for depth in 0..max_depth {
        print!(".");
        for i in 0..entries {
            if i & 7 == 0 && table[i >> 3] == marker as u32 * 0x1111_1111 && i + 8 <= entries {
                continue;
            }
            if get_pruning(&table, i) != depth {
                continue;
            }
            let raw = i % n_raw;
            let sym = i / n_raw;
            for m in 0..N_MOVES2 {
                let symx = sym_move[sym * N_MOVES2 + m];
                let rawx = raw_conj
                    [raw_move[raw * N_MOVES2 + m] as usize * SYM + (symx & 0xf) as usize]
                    as usize;
                let symx = (symx >> 4) as usize;
                let idx = symx * n_raw + rawx;
                if get_pruning(&table, idx) != marker {
                    continue;
                }
                set_pruning(&mut table, idx, depth + 1);
                // fill the whole symmetry orbit of the new class
                let mut state = sy.sym_state_perm[symx] >> 1;
                let mut j = 1usize;
                while state != 0 {
                    if state & 1 != 0 {
                        let jj = if e2c {
                            j ^ (SYM_E2C_MAGIC >> (j << 1) & 3) as usize
                        } else {
                            j
                        };
                        let idxx = symx * n_raw + raw_conj[rawx * SYM + jj] as usize;
                        if get_pruning(&table, idxx) == marker {
                            set_pruning(&mut table, idxx, depth + 1);
                        }
                    }
                    state >>= 1;
                    j += 1;
                }
            }
        }
    }
    println!();
    table
}

/// Breadth first fill of a phase 1 table indexed `sym * 495 + udslice`.
fn phase1_prun_table(
    sym_move: &[u16],
    udslice_move: &[u16],
    udslice_conj: &[u16],
    sym_state: &[u16],
    n_sym: usize,
    max_depth: u8,
) -> Vec<u32> {
    let entries = n_sym * N_SLICE;
    let marker = max_depth + 1;
    let mut table = new_table(entries, max_depth);
    set_pruning(&mut table, 0, 0);
    for depth in 0..max_depth {
        print!(".");
        for i in 0..entries {
            if i & 7 == 0 && table[i >> 3] == marker as u32 * 0x1111_1111 && i + 8 <= entries {
                continue;
            }
            if get_pruning(&table, i) != depth {
                continue;
            }
            let raw = i % N_SLICE;
            let sym = i / N_SLICE;
            for m in 0..N_MOVES {
                let symx = sym_move[sym * N_MOVES + m];
                let rawx = udslice_conj
                    [udslice_move[raw * N_MOVES + m] as usize * SYM_CLASSES + (symx & 7) as usize];
                let symx = (symx >> 3) as usize;
                let idx = symx * N_SLICE + rawx as usize;
                if get_pruning(&table, idx) != marker {
                    continue;
                }
                set_pruning(&mut table, idx, depth + 1);
                let mut state = sym_state[symx] >> 1;
                let mut j = 1usize;
                while state != 0 {
                    if state & 1 != 0 {
                        let idxx =
                            symx * N_SLICE + udslice_conj[rawx as usize * SYM_CLASSES + j] as usize;
                        if get_pruning(&table, idxx) == marker {
                            set_pruning(&mut table, idxx, depth + 1);
                        }
                    }
                    state >>= 1;
                    j += 1;
                }
            }
        }
    }
    println!();
    table
}

/// Breadth first fill of the twist/flip table indexed `twist_class << 11 | flip`.
fn twist_flip_prun_table(sy: &SymmetriesTables, mv: &MoveTables) -> Vec<u32> {
    let entries = N_TWIST_SYM * N_FLIP;
    let max_depth = TWIST_FLIP_MAX_DEPTH;
    let marker = max_depth + 1;
    let mut table = new_table(entries, max_depth);
    set_pruning(&mut table, 0, 0);
    for depth in 0..max_depth {
        print!(".");
        for i in 0..entries {
            if i & 7 == 0 && table[i >> 3] == marker as u32 * 0x1111_1111 && i + 8 <= entries {
                continue;
            }
            if get_pruning(&table, i) != depth {
                continue;
            }
            let raw = i % N_FLIP;
            let sym = i / N_FLIP;
            let flip_sym = sy.flip_r2s[raw];
            let fsym = (flip_sym & 7) as usize;
            let flip = (flip_sym >> 3) as usize;
            for m in 0..N_MOVES {
                let symx = mv.twist_move[sym * N_MOVES + m];
                let flipx =
                    mv.flip_move[flip * N_MOVES + sy.sym8_move[m << 3 | fsym] as usize];
                let rawx =
                    sy.flip_s2rf[(flipx ^ fsym as u16 ^ (symx & 7)) as usize] as usize;
                let symx = (symx >> 3) as usize;
                let idx = symx << 11 | rawx;
                if get_pruning(&table, idx) != marker {
                    continue;
                }
                set_pruning(&mut table, idx, depth + 1);
                let mut state = sy.sym_state_twist[symx] >> 1;
                let mut j = 1usize;
                while state != 0 {
                    if state & 1 != 0 {
                        let idxx = symx << 11
                            | sy.flip_s2rf[(sy.flip_r2s[rawx] ^ j as u16) as usize] as usize;
                        if get_pruning(&table, idxx) == marker {
                            set_pruning(&mut table, idxx, depth + 1);
                        }
                    }
                    state >>= 1;
                    j += 1;
                }
            }
        }
    }
    println!();
    table
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nibble_packing() {
        let mut table = vec![0u32; 2];
        set_pruning(&mut table, 0, 0xa);
        set_pruning(&mut table, 7, 0x5);
        set_pruning(&mut table, 8, 0x3);
        assert_eq!(get_pruning(&table, 0), 0xa);
        assert_eq!(get_pruning(&table, 7), 0x5);
        assert_eq!(get_pruning(&table, 8), 0x3);
        set_pruning(&mut table, 0, 0x1);
        assert_eq!(get_pruning(&table, 0), 0x1);
        assert_eq!(get_pruning(&table, 7), 0x5);
    }
}
