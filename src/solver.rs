//! The two phase search.
//!
//! Phase 1 brings the cube into the group generated by U, D, R2, F2, L2, B2,
//! phase 2 finishes it inside that group. The search runs over all six URF
//! rotation / inversion frames of the cube at once and extends phase 1 with
//! pre-moves, which lets short overall solutions appear at small phase 1
//! depths.

use std::cmp::{max, min};
use std::fs;
use std::path::Path;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::coord::CoordCube;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::facelet::FaceCube;
use crate::moves::MoveTables;
use crate::pruning::{get_pruning, PrunningTables};
use crate::symmetries::SymmetriesTables;
use crate::{decode_table, write_table};

/// Separate the phase 1 and phase 2 parts of the solution with ". ".
pub const USE_SEPARATOR: u8 = 0x1;
/// Return the inverse maneuver, turning the solved cube into the input state.
pub const INVERSE_SOLUTION: u8 = 0x2;
/// Append the move count as "(Nf)".
pub const APPEND_LENGTH: u8 = 0x4;
/// Search for an optimal solution instead of stopping at the first one.
pub const OPTIMAL_SOLUTION: u8 = 0x8;

/// Location of the table snapshot.
pub const TABLE_PATH: &str = "tables/min2phase_tables";

/// All data tables.
///
/// * `sy`: [SymmetriesTables]
/// * `mv`: [MoveTables]
/// * `pr`: [PrunningTables]
#[derive(Encode, Decode)]
pub struct SolverTables {
    pub sy: SymmetriesTables,
    pub mv: MoveTables,
    pub pr: PrunningTables,
}

impl SolverTables {
    /// Builds all tables from scratch. Takes a few seconds.
    pub fn new() -> Self {
        println!("Creating symmetry tables...");
        let sy = SymmetriesTables::new();
        println!("Creating move tables...");
        let mv = MoveTables::new(&sy);
        let pr = PrunningTables::new(&sy, &mv);
        SolverTables { sy, mv, pr }
    }

    /// Loads the snapshot at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let bytes = fs::read(path).map_err(|_| Error::MissingTables)?;
        decode_table(&bytes).map_err(|_| Error::MissingTables)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        write_table(path, self)
    }

    /// Loads the snapshot at `path`, or builds the tables and tries to cache
    /// them there.
    pub fn load_or_new<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(tables) => tables,
            Err(_) => {
                let tables = Self::new();
                if let Err(e) = tables.save(&path) {
                    println!("Could not cache tables: {}", e);
                }
                tables
            }
        }
    }
}

impl Default for SolverTables {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    /// The shared tables, loaded from [`TABLE_PATH`] or built on first use.
    pub static ref SOLVERTABLES: SolverTables = SolverTables::load_or_new(TABLE_PATH);
}

/// Solution result for serialization on API surfaces.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SolveResult {
    pub solution: String,
    pub length: usize,
}

/// Solves a cube given as a 54 character facelet string.
///
/// # Parameters
/// * `facelets`: sticker colors in URFDLB face order, matched against the centers.
/// * `max_depth`: the longest acceptable solution, at most 31.
/// * `probe_max`: give up after this many phase 2 probes without a solution.
/// * `probe_min`: keep improving the solution until this many probes ran.
/// * `verbose`: bitmask of [`USE_SEPARATOR`], [`INVERSE_SOLUTION`],
///   [`APPEND_LENGTH`] and [`OPTIMAL_SOLUTION`].
///
/// # Examples
/// ```no_run
/// use min2phase::solver::solve;
///
/// let s = solve(
///     "DUUBULDBFRBFRRULLLBRDFFFBLURDBFDFDRFRULBLUFDURRBLBDUDL",
///     21,
///     100_000_000,
///     0,
///     0,
/// ).unwrap();
/// println!("{}", s);
/// ```
pub fn solve(
    facelets: &str,
    max_depth: i8,
    probe_max: i32,
    probe_min: i32,
    verbose: u8,
) -> Result<String, Error> {
    Search::new(&SOLVERTABLES).solve(facelets, max_depth, probe_max, probe_min, verbose)
}

#[derive(PartialEq, Eq, Clone, Copy)]
enum SearchStep {
    /// Unwind the whole search, a result (or the probe limit) was reached.
    Done,
    /// Keep searching siblings.
    Continue,
    /// Give up on this axis.
    Break,
}

enum InitPhase2Result {
    Done,
    /// The phase 2 estimate exceeds the current depth cap by this much,
    /// 1 when nothing better than the known solution was found.
    Exceed(i8),
}

enum Phase2Result {
    /// Solved with this many moves of the budget left.
    Found(i8),
    NotFound,
    /// The pruning bound exceeds the budget by this much.
    Prune(i8),
}

/// Assembles the solution move sequence, canceling and merging moves that
/// meet across the phase boundary or around pre-moves.
#[derive(Clone, Copy)]
struct OutputFormat {
    moves: [u8; MAX_LENGTH],
    length: usize,
    format: u8,
    urf_idx: u8,
    depth1: i8,
    is_found: bool,
}

impl OutputFormat {
    const fn new() -> Self {
        OutputFormat {
            moves: [0; MAX_LENGTH],
            length: 0,
            format: 0,
            urf_idx: 0,
            depth1: 0,
            is_found: false,
        }
    }

    fn reset(&mut self) {
        self.format = 0;
        self.urf_idx = 0;
        self.depth1 = 0;
        self.length = 0;
    }

    fn set_args(&mut self, format: u8, urf_idx: u8, depth1: i8) {
        self.format = format;
        self.urf_idx = urf_idx;
        self.depth1 = depth1;
    }

    fn append_sol_move(&mut self, cur_move: u8) {
        if self.length == 0 {
            self.moves[0] = cur_move;
            self.length = 1;
            return;
        }
        let axis_cur = cur_move / 3;
        let axis_last = self.moves[self.length - 1] / 3;
        if axis_cur == axis_last {
            let pow = (cur_move % 3 + self.moves[self.length - 1] % 3 + 1) % 4;
            if pow == 3 {
                self.length -= 1;
            } else {
                self.moves[self.length - 1] = axis_cur * 3 + pow;
            }
            return;
        }
        // opposite faces commute, a move may merge through the one between
        if self.length > 1
            && axis_cur % 3 == axis_last % 3
            && axis_cur == self.moves[self.length - 2] / 3
        {
            let pow = (cur_move % 3 + self.moves[self.length - 2] % 3 + 1) % 4;
            if pow == 3 {
                self.moves[self.length - 2] = self.moves[self.length - 1];
                self.length -= 1;
            } else {
                self.moves[self.length - 2] = axis_cur * 3 + pow;
            }
            return;
        }
        self.moves[self.length] = cur_move;
        self.length += 1;
    }

    fn to_string(&self) -> String {
        let urf = if self.format & INVERSE_SOLUTION != 0 {
            (self.urf_idx + 3) % 6
        } else {
            self.urf_idx
        } as usize;
        let mut tokens: Vec<String> = Vec::with_capacity(self.length + 2);
        if urf < 3 {
            for s in 0..self.length {
                if self.format & USE_SEPARATOR != 0 && s == self.depth1 as usize {
                    tokens.push(".".to_string());
                }
                tokens.push(ALL_MOVES[URF_MOVE[urf][self.moves[s] as usize] as usize].to_string());
            }
        } else {
            for s in (0..self.length).rev() {
                tokens.push(ALL_MOVES[URF_MOVE[urf][self.moves[s] as usize] as usize].to_string());
                if self.format & USE_SEPARATOR != 0 && s == self.depth1 as usize {
                    tokens.push(".".to_string());
                }
            }
        }
        let mut out = tokens.join(" ");
        if self.format & APPEND_LENGTH != 0 {
            out.push_str(&format!(" ({}f)", self.length));
        }
        out
    }
}

/// A single search, reusable across solves. Holds the move buffers and the
/// coordinate cubes of the six URF frames.
pub struct Search<'a> {
    tables: &'a SolverTables,

    moves: [u8; MAX_LENGTH + 1],
    pre_moves: [u8; MAX_PRE_MOVES as usize],
    phase1_cubie: [CubieCube; MAX_LENGTH + 1],

    solve_cube: CubieCube,
    urf_cubie: [CubieCube; 6],
    urf_coord: [CoordCube; 6],

    self_sym: u64,
    conj_mask: u8,
    urf_idx: u8,
    length1: i8,
    depth1: i8,
    max_dep2: i8,
    sol_len: i8,
    valid1: i8,
    pre_move_len: i8,
    max_pre_moves: i8,
    allow_shorter: bool,

    probe: i64,
    probe_max: i64,
    probe_min: i64,
    verbose: u8,

    solution: OutputFormat,
}

impl<'a> Search<'a> {
    pub fn new(tables: &'a SolverTables) -> Self {
        Search {
            tables,
            moves: [0; MAX_LENGTH + 1],
            pre_moves: [0; MAX_PRE_MOVES as usize],
            phase1_cubie: [CubieCube::SOLVED; MAX_LENGTH + 1],
            solve_cube: CubieCube::SOLVED,
            urf_cubie: [CubieCube::SOLVED; 6],
            urf_coord: [CoordCube::new(); 6],
            self_sym: 0,
            conj_mask: 0,
            urf_idx: 0,
            length1: 0,
            depth1: 0,
            max_dep2: 0,
            sol_len: 0,
            valid1: 0,
            pre_move_len: 0,
            max_pre_moves: 0,
            allow_shorter: false,
            probe: 0,
            probe_max: 0,
            probe_min: 0,
            verbose: 0,
            solution: OutputFormat::new(),
        }
    }

    /// Solves a facelet string, see [`solve`] for the parameters.
    pub fn solve(
        &mut self,
        facelets: &str,
        max_depth: i8,
        probe_max: i32,
        probe_min: i32,
        verbose: u8,
    ) -> Result<String, Error> {
        let fc = FaceCube::try_from(facelets)?;
        let cc = CubieCube::try_from(&fc)?;
        cc.check()?;

        self.solve_cube = cc;
        self.sol_len = min(max_depth, MAX_LENGTH as i8) + 1;
        self.probe = 0;
        self.probe_max = probe_max as i64;
        self.probe_min = min(probe_min, probe_max) as i64;
        self.verbose = verbose;
        self.valid1 = 0;
        self.pre_move_len = 0;
        self.allow_shorter = false;
        self.conj_mask = 0;
        self.solution = OutputFormat::new();

        self.init_search();

        if verbose & OPTIMAL_SOLUTION == 0 {
            self.search()
        } else {
            self.search_opt()
        }
    }

    fn init_search(&mut self) {
        let tables = self.tables;
        self.self_sym = self.solve_cube.self_symmetry(&tables.sy);
        if self.self_sym >> 16 & 0xffff != 0 {
            self.conj_mask |= 0x12;
        }
        if self.self_sym >> 32 & 0xffff != 0 {
            self.conj_mask |= 0x24;
        }
        if self.self_sym >> 48 != 0 {
            self.conj_mask |= 0x38;
        }
        self.self_sym &= 0xffff_ffff_ffff;
        self.max_pre_moves = if self.conj_mask > 7 { 0 } else { MAX_PRE_MOVES };

        let mut cc = self.solve_cube;
        for i in 0..6 {
            self.urf_cubie[i] = cc;
            self.urf_coord[i].set_with_prun(&cc, 20, &tables.sy, &tables.mv, &tables.pr);
            cc.urf_conjugate();
            if i % 3 == 2 {
                cc = cc.inverse_cubie_cube();
            }
        }
    }

    fn search(&mut self) -> Result<String, Error> {
        self.length1 = 0;
        while self.length1 < self.sol_len {
            self.max_dep2 = min(P1_LENGTH, self.sol_len - self.length1 - 1);
            for urf in 0..6u8 {
                if self.conj_mask & 1 << urf != 0 {
                    continue;
                }
                self.urf_idx = urf;
                let cc = self.urf_cubie[urf as usize];
                let ssym = (self.self_sym & 0xffff) as u16;
                if self.phase1_pre_moves(self.max_pre_moves, -30, cc, ssym) {
                    return if !self.solution.is_found {
                        Err(Error::ProbeLimit)
                    } else {
                        Ok(self.solution.to_string())
                    };
                }
            }
            self.length1 += 1;
        }
        if !self.solution.is_found {
            Err(Error::ShortDepth)
        } else {
            Ok(self.solution.to_string())
        }
    }

    /// Tries every pre-move sequence up to `maxl` more moves, running the
    /// phase 1 search from each resulting cube. Returns true when the search
    /// finished.
    fn phase1_pre_moves(&mut self, maxl: i8, lm: i8, cc: CubieCube, ssym: u16) -> bool {
        self.pre_move_len = self.max_pre_moves - maxl;

        if self.pre_move_len == 0 || PRE_MOVE_ALLOW >> lm as u32 & 1 == 0 {
            self.depth1 = self.length1 - self.pre_move_len;
            self.phase1_cubie[0] = cc;
            self.allow_shorter = self.depth1 == MIN_P1LENGTH_PRE && self.pre_move_len != 0;

            let mut node = CoordCube::new();
            let tables = self.tables;
            if node.set_with_prun(&cc, self.depth1, &tables.sy, &tables.mv, &tables.pr)
                && self.phase1(node, ssym, self.depth1, -1) == SearchStep::Done
            {
                return true;
            }
        }

        if maxl == 0 || self.pre_move_len + MIN_P1LENGTH_PRE >= self.length1 {
            return false;
        }

        // the deepest pre-move must be a quarter turn of R, F, L or B
        let skip_moves = if maxl == 1 || self.pre_move_len + 1 + MIN_P1LENGTH_PRE >= self.length1 {
            PRE_MOVE_ALLOW
        } else {
            0
        };

        let lm = lm / 3 * 3;
        let mut m = 0i8;
        while m < 18 {
            if m == lm || m == lm - 9 || m == lm + 9 {
                m += 3;
                continue;
            }
            if skip_moves != 0 && skip_moves >> m & 1 != 0 {
                m += 1;
                continue;
            }
            let mut d = self.tables.sy.move_cube[m as usize];
            d.multiply(cc);
            self.pre_moves[(self.max_pre_moves - maxl) as usize] = m as u8;
            let ssym_next = ssym & (self.tables.sy.move_cube_sym[m as usize] & 0xffff) as u16;
            if self.phase1_pre_moves(maxl - 1, m, d, ssym_next) {
                return true;
            }
            m += 1;
        }
        false
    }

    fn phase1(&mut self, node: CoordCube, ssym: u16, maxl: i8, lm: i8) -> SearchStep {
        if node.prun == 0 && maxl < 5 {
            if self.allow_shorter || maxl == 0 {
                self.depth1 -= maxl;
                let ret = self.init_phase2_pre();
                self.depth1 += maxl;
                return ret;
            } else {
                return SearchStep::Continue;
            }
        }

        let tables = self.tables;
        let mut axis = 0i8;
        while axis < 18 {
            if axis == lm || axis == lm - 9 {
                axis += 3;
                continue;
            }
            for power in 0..3i8 {
                let m = (axis + power) as usize;

                let mut next = node;
                let prun = next.do_move_prun(&node, m, &tables.sy, &tables.mv, &tables.pr);
                if prun > maxl {
                    break;
                } else if prun == maxl {
                    continue;
                }

                let prun = next.do_move_prun_conj(&node, m, &tables.sy, &tables.mv, &tables.pr);
                if prun > maxl {
                    break;
                } else if prun == maxl {
                    continue;
                }

                self.moves[(self.depth1 - maxl) as usize] = m as u8;
                self.valid1 = min(self.valid1, self.depth1 - maxl);
                let ssym_next = ssym & (tables.sy.move_cube_sym[m] & 0xffff) as u16;
                match self.phase1(next, ssym_next, maxl - 1, axis) {
                    SearchStep::Done => return SearchStep::Done,
                    SearchStep::Break => break,
                    SearchStep::Continue => {}
                }
            }
            axis += 3;
        }
        SearchStep::Continue
    }

    /// Prepares phase 2 from the current phase 1 node, also trying the
    /// variants where the last phase 1 move or the last pre-move is replaced
    /// by its inverse.
    fn init_phase2_pre(&mut self) -> SearchStep {
        let probe_limit = if !self.solution.is_found {
            self.probe_max
        } else {
            self.probe_min
        };
        if self.probe >= probe_limit {
            return SearchStep::Done;
        }
        self.probe += 1;

        for i in self.valid1..self.depth1 {
            let mut d = self.phase1_cubie[i as usize];
            d.multiply(self.tables.sy.move_cube[self.moves[i as usize] as usize]);
            self.phase1_cubie[(i + 1) as usize] = d;
        }
        self.valid1 = self.depth1;

        let tables = self.tables;
        let sy = &tables.sy;
        let mv = &tables.mv;
        let cube = self.phase1_cubie[self.depth1 as usize];

        let mut p2corn = cube.get_cperm_sym(sy);
        let mut p2csym = (p2corn & 0xf) as u8;
        p2corn >>= 4;
        let mut p2edge = cube.get_eperm_sym(sy);
        let mut p2esym = (p2edge & 0xf) as u8;
        p2edge >>= 4;
        let mut p2mid = cube.get_mperm();
        let mut edgei = sy.get_perm_sym_inv(p2edge, p2esym, false);
        let mut corni = sy.get_perm_sym_inv(p2corn, p2csym, true);

        let last_move = if self.depth1 == 0 {
            -1i8
        } else {
            self.moves[(self.depth1 - 1) as usize] as i8
        };
        let last_pre = if self.pre_move_len == 0 {
            -1i8
        } else {
            self.pre_moves[(self.pre_move_len - 1) as usize] as i8
        };

        let mut done = false;
        let p2switch_max =
            (if self.pre_move_len == 0 { 1 } else { 2 }) * (if self.depth1 == 0 { 1 } else { 2 });
        let mut p2switch_mask = (1u8 << p2switch_max) - 1;

        for p2switch in 0..p2switch_max {
            if p2switch_mask >> p2switch & 1 != 0 {
                p2switch_mask &= !(1 << p2switch);
                match self.init_phase2(p2corn, p2csym, p2edge, p2esym, p2mid, edgei, corni) {
                    InitPhase2Result::Done => {
                        done = true;
                        break;
                    }
                    InitPhase2Result::Exceed(n) if n > 2 => break,
                    InitPhase2Result::Exceed(2) => {
                        p2switch_mask &= 0x4 << p2switch;
                    }
                    InitPhase2Result::Exceed(_) => {}
                }
            }

            if p2switch_mask == 0 {
                break;
            }

            if p2switch & 1 == 0 && self.depth1 > 0 {
                let m = STD2UD[(last_move / 3 * 3 + 1) as usize] as usize;
                self.moves[(self.depth1 - 1) as usize] =
                    (UD2STD[m] as i8 * 2 - self.moves[(self.depth1 - 1) as usize] as i8) as u8;

                p2mid = mv.mperm_move[p2mid as usize * N_MOVES2 + m];
                let corn =
                    mv.cperm_move[p2corn as usize * N_MOVES2 + sy.sym_move_ud[p2csym as usize][m] as usize];
                p2csym = sy.sym_mult[(corn & 0xf) as usize][p2csym as usize];
                p2corn = corn >> 4;
                let edge =
                    mv.eperm_move[p2edge as usize * N_MOVES2 + sy.sym_move_ud[p2esym as usize][m] as usize];
                p2esym = sy.sym_mult[(edge & 0xf) as usize][p2esym as usize];
                p2edge = edge >> 4;
                corni = sy.get_perm_sym_inv(p2corn, p2csym, true);
                edgei = sy.get_perm_sym_inv(p2edge, p2esym, false);
            } else if self.pre_move_len > 0 {
                let m = STD2UD[(last_pre / 3 * 3 + 1) as usize] as usize;
                self.pre_moves[(self.pre_move_len - 1) as usize] = (UD2STD[m] as i8 * 2
                    - self.pre_moves[(self.pre_move_len - 1) as usize] as i8)
                    as u8;

                p2mid = sy.mperm_inv[mv.mperm_move
                    [sy.mperm_inv[p2mid as usize] as usize * N_MOVES2 + m]
                    as usize];
                let corn = mv.cperm_move
                    [(corni >> 4) as usize * N_MOVES2 + sy.sym_move_ud[(corni & 0xf) as usize][m] as usize];
                corni = (corn & !0xf) | sy.sym_mult[(corn & 0xf) as usize][(corni & 0xf) as usize] as u16;
                let csp = sy.get_perm_sym_inv(corni >> 4, (corni & 0xf) as u8, true);
                p2csym = (csp & 0xf) as u8;
                p2corn = csp >> 4;
                let edge = mv.eperm_move
                    [(edgei >> 4) as usize * N_MOVES2 + sy.sym_move_ud[(edgei & 0xf) as usize][m] as usize];
                edgei = (edge & !0xf) | sy.sym_mult[(edge & 0xf) as usize][(edgei & 0xf) as usize] as u16;
                let esp = sy.get_perm_sym_inv(edgei >> 4, (edgei & 0xf) as u8, false);
                p2esym = (esp & 0xf) as u8;
                p2edge = esp >> 4;
            }
        }

        if self.depth1 > 0 {
            self.moves[(self.depth1 - 1) as usize] = last_move as u8;
        }
        if self.pre_move_len > 0 {
            self.pre_moves[(self.pre_move_len - 1) as usize] = last_pre as u8;
        }

        if done {
            SearchStep::Done
        } else {
            SearchStep::Break
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn init_phase2(
        &mut self,
        p2corn: u16,
        p2csym: u8,
        p2edge: u16,
        p2esym: u8,
        p2mid: u8,
        edgei: u16,
        corni: u16,
    ) -> InitPhase2Result {
        let tables = self.tables;
        let sy = &tables.sy;
        let mv = &tables.mv;
        let pr = &tables.pr;

        let prun = max(
            get_pruning(
                &pr.eperm_ccombp_prun,
                (edgei >> 4) as usize * N_COMB
                    + mv.ccombp_conj[sy.perm2comb_p[(corni >> 4) as usize] as usize * SYM
                        + sy.sym_mult_inv[(edgei & 0xf) as usize][(corni & 0xf) as usize] as usize]
                        as usize,
            ),
            max(
                get_pruning(
                    &pr.eperm_ccombp_prun,
                    p2edge as usize * N_COMB
                        + mv.ccombp_conj[sy.perm2comb_p[p2corn as usize] as usize * SYM
                            + sy.sym_mult_inv[p2esym as usize][p2csym as usize] as usize]
                            as usize,
                ),
                get_pruning(
                    &pr.mcperm_prun,
                    p2corn as usize * N_MPERM
                        + mv.mperm_conj[p2mid as usize * SYM + p2csym as usize] as usize,
                ),
            ),
        ) as i8;

        if prun > self.max_dep2 {
            return InitPhase2Result::Exceed(prun - self.max_dep2);
        }

        let mut depth2 = self.max_dep2;
        while depth2 >= prun {
            match self.phase2(p2edge, p2esym, p2corn, p2csym, p2mid, depth2, self.depth1, 10) {
                Phase2Result::Found(left) => {
                    depth2 -= left;
                    self.sol_len = 0;

                    self.solution.is_found = true;
                    self.solution.reset();
                    self.solution.set_args(self.verbose, self.urf_idx, self.depth1);
                    for i in 0..(self.depth1 + depth2) as usize {
                        let m = self.moves[i];
                        self.solution.append_sol_move(m);
                    }
                    for i in (0..self.pre_move_len as usize).rev() {
                        let m = self.pre_moves[i];
                        self.solution.append_sol_move(m);
                    }
                    self.sol_len = self.solution.length as i8;
                }
                _ => break,
            }
            depth2 -= 1;
        }

        if depth2 != self.max_dep2 {
            self.max_dep2 = min(P2_LENGTH, self.sol_len - self.length1 - 1);
            return if self.probe >= self.probe_min {
                InitPhase2Result::Done
            } else {
                InitPhase2Result::Exceed(1)
            };
        }
        InitPhase2Result::Exceed(1)
    }

    /// Depth first phase 2 search over the edge permutation, corner
    /// permutation and slice permutation sym-coordinates.
    #[allow(clippy::too_many_arguments)]
    fn phase2(
        &mut self,
        edge: u16,
        esym: u8,
        corn: u16,
        csym: u8,
        mid: u8,
        maxl: i8,
        depth: i8,
        lm: u8,
    ) -> Phase2Result {
        if edge == 0 && corn == 0 && mid == 0 {
            return Phase2Result::Found(maxl);
        }

        let tables = self.tables;
        let sy = &tables.sy;
        let mv = &tables.mv;
        let pr = &tables.pr;

        let move_mask = CKMV2BIT[lm as usize];
        let mut m = 0i8;
        while m < N_MOVES2 as i8 {
            if move_mask >> m & 1 != 0 {
                m += ((0x42i32 >> m) as i8 & 3) + 1;
                continue;
            }

            let midx = mv.mperm_move[mid as usize * N_MOVES2 + m as usize];
            let cornx_full =
                mv.cperm_move[corn as usize * N_MOVES2 + sy.sym_move_ud[csym as usize][m as usize] as usize];
            let csymx = sy.sym_mult[(cornx_full & 0xf) as usize][csym as usize];
            let cornx = cornx_full >> 4;
            let edgex_full =
                mv.eperm_move[edge as usize * N_MOVES2 + sy.sym_move_ud[esym as usize][m as usize] as usize];
            let esymx = sy.sym_mult[(edgex_full & 0xf) as usize][esym as usize];
            let edgex = edgex_full >> 4;
            let edgei = sy.get_perm_sym_inv(edgex, esymx, false);
            let corni = sy.get_perm_sym_inv(cornx, csymx, true);

            let prun = get_pruning(
                &pr.eperm_ccombp_prun,
                (edgei >> 4) as usize * N_COMB
                    + mv.ccombp_conj[sy.perm2comb_p[(corni >> 4) as usize] as usize * SYM
                        + sy.sym_mult_inv[(edgei & 0xf) as usize][(corni & 0xf) as usize] as usize]
                        as usize,
            ) as i8;
            if prun > maxl + 1 {
                return Phase2Result::Prune(prun - maxl - 1);
            } else if prun >= maxl {
                m += (((0x42i32 >> m) as i8 & 3) & (maxl - prun)) + 1;
                continue;
            }

            let prun = max(
                get_pruning(
                    &pr.mcperm_prun,
                    cornx as usize * N_MPERM
                        + mv.mperm_conj[midx as usize * SYM + csymx as usize] as usize,
                ),
                get_pruning(
                    &pr.eperm_ccombp_prun,
                    edgex as usize * N_COMB
                        + mv.ccombp_conj[sy.perm2comb_p[cornx as usize] as usize * SYM
                            + sy.sym_mult_inv[esymx as usize][csymx as usize] as usize]
                            as usize,
                ),
            ) as i8;
            if prun >= maxl {
                m += (((0x42i32 >> m) as i8 & 3) & (maxl - prun)) + 1;
                continue;
            }

            match self.phase2(edgex, esymx, cornx, csymx, midx, maxl - 1, depth + 1, m as u8) {
                Phase2Result::Found(left) => {
                    self.moves[depth as usize] = UD2STD[m as usize];
                    return Phase2Result::Found(left);
                }
                Phase2Result::Prune(n) if n >= 3 => break,
                Phase2Result::Prune(n) if n >= 2 => {
                    m += ((0x42i32 >> m) as i8 & 3) + 1;
                    continue;
                }
                _ => {}
            }
            m += 1;
        }
        Phase2Result::NotFound
    }

    fn search_opt(&mut self) -> Result<String, Error> {
        let tables = self.tables;
        let mut maxprun1 = 0i8;
        let mut maxprun2 = 0i8;
        for i in 0..6 {
            let prun = self.urf_coord[i].calc_prun(&tables.sy, &tables.mv, &tables.pr);
            if i < 3 {
                maxprun1 = max(maxprun1, prun);
            } else {
                maxprun2 = max(maxprun2, prun);
            }
        }

        self.urf_idx = if maxprun2 > maxprun1 { 3 } else { 0 };
        self.phase1_cubie[0] = self.urf_cubie[self.urf_idx as usize];

        self.length1 = 0;
        while self.length1 < self.sol_len {
            let ud = self.urf_coord[self.urf_idx as usize];
            let rl = self.urf_coord[self.urf_idx as usize + 1];
            let fb = self.urf_coord[self.urf_idx as usize + 2];

            if ud.prun <= self.length1
                && rl.prun <= self.length1
                && fb.prun <= self.length1
                && self.phase1_opt(ud, rl, fb, self.self_sym, self.length1, -1) == SearchStep::Done
            {
                return if !self.solution.is_found {
                    Err(Error::ProbeLimit)
                } else {
                    Ok(self.solution.to_string())
                };
            }
            self.length1 += 1;
        }
        if !self.solution.is_found {
            Err(Error::ShortDepth)
        } else {
            Ok(self.solution.to_string())
        }
    }

    /// Phase 1 of the optimal search, advancing the UD, RL and FB frames of
    /// the cube in lockstep so the deepest of the three bounds prunes.
    fn phase1_opt(
        &mut self,
        ud: CoordCube,
        rl: CoordCube,
        fb: CoordCube,
        ssym: u64,
        maxl: i8,
        lm: i8,
    ) -> SearchStep {
        if ud.prun == 0 && rl.prun == 0 && fb.prun == 0 && maxl < 5 {
            self.max_dep2 = maxl;
            self.depth1 = self.length1 - maxl;
            return if self.init_phase2_pre() == SearchStep::Done {
                SearchStep::Done
            } else {
                SearchStep::Continue
            };
        }

        let tables = self.tables;
        let sy = &tables.sy;
        let mv = &tables.mv;
        let pr = &tables.pr;

        let mut axis = 0i8;
        while axis < 18 {
            if axis == lm || axis == lm - 9 {
                axis += 3;
                continue;
            }
            for power in 0..3i8 {
                let mut m = (axis + power) as usize;

                let mut udx = ud;
                let prun_ud = max(
                    udx.do_move_prun(&ud, m, sy, mv, pr),
                    udx.do_move_prun_conj(&ud, m, sy, mv, pr),
                );
                if prun_ud > maxl {
                    break;
                } else if prun_ud == maxl {
                    continue;
                }

                m = URF_MOVE[2][m] as usize;
                let mut rlx = rl;
                let prun_rl = max(
                    rlx.do_move_prun(&rl, m, sy, mv, pr),
                    rlx.do_move_prun_conj(&rl, m, sy, mv, pr),
                );
                if prun_rl > maxl {
                    break;
                } else if prun_rl == maxl {
                    continue;
                }

                m = URF_MOVE[2][m] as usize;
                let mut fbx = fb;
                let mut prun_fb = max(
                    fbx.do_move_prun(&fb, m, sy, mv, pr),
                    fbx.do_move_prun_conj(&fb, m, sy, mv, pr),
                );
                if prun_ud == prun_rl && prun_rl == prun_fb && prun_fb != 0 {
                    prun_fb += 1;
                }
                if prun_fb > maxl {
                    break;
                } else if prun_fb == maxl {
                    continue;
                }

                m = URF_MOVE[2][m] as usize;
                self.moves[(self.length1 - maxl) as usize] = m as u8;
                self.valid1 = min(self.valid1, self.length1 - maxl);
                let ssym_next = ssym & tables.sy.move_cube_sym[m];
                if self.phase1_opt(udx, rlx, fbx, ssym_next, maxl - 1, axis as i8)
                    == SearchStep::Done
                {
                    return SearchStep::Done;
                }
            }
            axis += 3;
        }
        SearchStep::Continue
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scramble;

    // facelet strings from real scrambles
    const CUBE1: &str = "DUUBULDBFRBFRRULLLBRDFFFBLURDBFDFDRFRULBLUFDURRBLBDUDL";
    const CUBE2: &str = "RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF";

    fn verify_solution(facelets: &str, solution: &str) {
        let moves = scramble::scramble_from_str(solution).unwrap();
        let fc = FaceCube::try_from(facelets).unwrap();
        let cc = CubieCube::try_from(&fc).unwrap();
        assert_eq!(cc.apply_moves(&moves), CubieCube::SOLVED, "{}", solution);
    }

    #[test]
    fn solution_moves_merge_and_cancel() {
        // U then U2 merge into U'
        let mut out = OutputFormat::new();
        out.append_sol_move(0);
        out.append_sol_move(1);
        assert_eq!(&out.moves[..out.length], &[2]);

        // U and U' cancel through the commuting D between them
        let mut out = OutputFormat::new();
        out.append_sol_move(0);
        out.append_sol_move(9);
        out.append_sol_move(2);
        assert_eq!(&out.moves[..out.length], &[9]);

        // R then R' vanish entirely
        let mut out = OutputFormat::new();
        out.append_sol_move(3);
        out.append_sol_move(5);
        assert_eq!(out.length, 0);
    }

    #[test]
    fn solves_fixed_cubes() {
        for facelets in [CUBE1, CUBE2] {
            let s = solve(facelets, 21, 100_000_000, 0, 0).unwrap();
            verify_solution(facelets, &s);
            assert!(scramble::scramble_from_str(&s).unwrap().len() <= 21);
        }
    }

    #[test]
    fn solves_a_fixed_scramble() {
        let cc = scramble::from_scramble("R U F L D B2 U'").unwrap();
        let facelets = cc.to_string();
        let s = solve(&facelets, 21, 100_000_000, 0, 0).unwrap();
        verify_solution(&facelets, &s);
    }

    #[test]
    fn solves_solved_cube_with_empty_solution() {
        let s = solve(
            "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB",
            21,
            100_000_000,
            0,
            0,
        )
        .unwrap();
        assert_eq!(s, "");
    }

    #[test]
    fn solves_random_cubes() {
        let mut cc = CubieCube::SOLVED;
        for _ in 0..5 {
            cc.randomize();
            let facelets = cc.to_string();
            let s = solve(&facelets, 21, 100_000_000, 0, 0).unwrap();
            verify_solution(&facelets, &s);
        }
    }

    #[test]
    fn inverse_solution_is_a_scramble() {
        let s = solve(CUBE1, 21, 100_000_000, 0, INVERSE_SOLUTION).unwrap();
        let moves = scramble::scramble_from_str(&s).unwrap();
        let cc = CubieCube::SOLVED.apply_moves(&moves);
        assert_eq!(cc.to_string(), CUBE1);

        // inverting a plain solution by hand reaches the same state
        let plain = solve(CUBE1, 21, 100_000_000, 0, 0).unwrap();
        let inverted: Vec<_> = scramble::scramble_from_str(&plain)
            .unwrap()
            .iter()
            .rev()
            .map(|m| m.inverse())
            .collect();
        assert_eq!(CubieCube::SOLVED.apply_moves(&inverted).to_string(), CUBE1);
    }

    #[test]
    fn append_length_flag() {
        let s = solve(CUBE1, 21, 100_000_000, 0, APPEND_LENGTH).unwrap();
        let n = scramble::scramble_from_str(s.split(" (").next().unwrap())
            .unwrap()
            .len();
        assert!(s.ends_with(&format!("({}f)", n)), "{}", s);
    }

    #[test]
    fn error_cases() {
        // 53 stickers
        assert!(matches!(
            solve(&CUBE2[..53], 21, 100_000_000, 0, 0),
            Err(Error::MalformedString)
        ));
        // one edge flipped in place
        let mut flipped: Vec<char> = CUBE2.chars().collect();
        flipped.swap(7, 19);
        let flipped: String = flipped.into_iter().collect();
        assert!(matches!(
            solve(&flipped, 21, 100_000_000, 0, 0),
            Err(Error::FlippedEdge)
        ));
        // no probes allowed
        assert!(matches!(
            solve(CUBE2, 21, 0, 0, 0),
            Err(Error::ProbeLimit)
        ));
        // unreachable depth
        assert!(matches!(
            solve(CUBE2, 1, 100_000_000, 0, 0),
            Err(Error::ShortDepth)
        ));
    }

    #[test]
    fn optimal_mode_is_never_longer() {
        // shallow position, so the optimal proof stays cheap
        let cc = scramble::from_scramble("R U F L D").unwrap();
        let facelets = cc.to_string();
        let plain = solve(&facelets, 21, 100_000_000, 0, 0).unwrap();
        let optimal = solve(&facelets, 21, 100_000_000, 0, OPTIMAL_SOLUTION).unwrap();
        verify_solution(&facelets, &optimal);
        assert!(
            scramble::scramble_from_str(&optimal).unwrap().len()
                <= scramble::scramble_from_str(&plain).unwrap().len()
        );
    }

    #[test]
    fn more_probes_never_worsen_the_solution() {
        let first = solve(CUBE1, 21, 100_000_000, 0, 0).unwrap();
        let refined = solve(CUBE1, 21, 100_000_000, 5_000, 0).unwrap();
        verify_solution(CUBE1, &refined);
        assert!(
            scramble::scramble_from_str(&refined).unwrap().len()
                <= scramble::scramble_from_str(&first).unwrap().len()
        );
    }

    #[test]
    #[ignore = "optimal search on a hard position, takes minutes"]
    fn superflip_optimal_is_twenty() {
        let cc = crate::scramble::superflip();
        let s = solve(&cc.to_string(), 20, 1_000_000_000, 0, OPTIMAL_SOLUTION).unwrap();
        assert_eq!(scramble::scramble_from_str(&s).unwrap().len(), 20);
        verify_solution(&cc.to_string(), &s);
    }
}
