use std::str::FromStr;

use crate::cubie::CubieCube;
use crate::moves::Move;
use crate::solver::{self, INVERSE_SOLUTION};
use crate::error::Error;

pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace()
        .map(|word| Move::from_str(word.trim()))
        .collect()
}

pub fn scramble_to_str(s: &[Move]) -> String {
    let result: String = s
        .iter()
        .map(|m| Move::to_string(m))
        .fold("".to_string(), |acc, x| format!("{} {}", acc, x));
    result.trim_start().to_string()
}

/// The cube state a scramble string produces when applied to a solved cube.
pub fn from_scramble(s: &str) -> Result<CubieCube, Error> {
    let moves = scramble_from_str(s)?;
    Ok(CubieCube::SOLVED.apply_moves(&moves))
}

/// Generates a uniformly random scramble.
///
/// Draws a random cube state and returns the inverse of a solution, so every
/// reachable state is equally likely regardless of the scramble length.
pub fn gen_scramble() -> Result<Vec<Move>, Error> {
    let mut cc = CubieCube::SOLVED;
    cc.randomize();
    let s = solver::solve(&cc.to_string(), 21, 100_000_000, 0, INVERSE_SOLUTION)?;
    scramble_from_str(&s)
}

/// The superflip, every piece in place and every edge flipped.
pub fn superflip() -> CubieCube {
    let mut cc = CubieCube::SOLVED;
    cc.eo = [1; 12];
    cc
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::moves::Move::*;

    #[test]
    fn test_scramble_from_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap(), m);
    }

    #[test]
    fn test_scramble_from_str_rejects_garbage() {
        assert!(scramble_from_str("R U X'").is_err());
    }

    #[test]
    fn test_scramble_to_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_to_str(&m), "R U R' U' F L' D' B2 R' U'");
    }

    #[test]
    fn test_from_scramble_roundtrip() {
        let cc = from_scramble("R U R' U'").unwrap();
        // (R U R' U') has order 6
        let mut acc = CubieCube::SOLVED;
        for _ in 0..6 {
            acc = acc.apply_moves(&scramble_from_str("R U R' U'").unwrap());
        }
        assert_ne!(cc, CubieCube::SOLVED);
        assert_eq!(acc, CubieCube::SOLVED);
    }

    #[test]
    fn test_gen_scramble() {
        let scramble = gen_scramble().unwrap();
        let cc = CubieCube::SOLVED.apply_moves(&scramble);
        assert!(cc.check().is_ok());
        assert_ne!(cc, CubieCube::SOLVED);
    }

    #[test]
    fn test_superflip_is_solvable() {
        assert!(superflip().check().is_ok());
    }
}
