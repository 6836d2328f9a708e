//! Cube representation on the facelet (sticker) level.

use std::fmt;

use crate::constants::*;
use crate::cubie::CubieCube;
use crate::error::Error;

/// The six face colors, named after the face they belong to in the solved state.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<char> for Color {
    type Error = Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'U' => Ok(Color::U),
            'R' => Ok(Color::R),
            'F' => Ok(Color::F),
            'D' => Ok(Color::D),
            'L' => Ok(Color::L),
            'B' => Ok(Color::B),
            _ => Err(Error::MalformedString),
        }
    }
}

/// Facelet positions of the 8 corners, clockwise starting from the U or D sticker.
pub const CORNER_FACELET: [[usize; 3]; N_CORNERS] = [
    [8, 9, 20],   // URF
    [6, 18, 38],  // UFL
    [0, 36, 47],  // ULB
    [2, 45, 11],  // UBR
    [29, 26, 15], // DFR
    [27, 44, 24], // DLF
    [33, 53, 42], // DBL
    [35, 17, 51], // DRB
];

/// Facelet positions of the 12 edges, the U/D/F/B sticker first.
pub const EDGE_FACELET: [[usize; 2]; N_EDGES] = [
    [5, 10],  // UR
    [7, 19],  // UF
    [3, 37],  // UL
    [1, 46],  // UB
    [32, 16], // DR
    [28, 25], // DF
    [30, 43], // DL
    [34, 52], // DB
    [23, 12], // FR
    [21, 41], // FL
    [50, 39], // BL
    [48, 14], // BR
];

/// Cube on the facelet level, 54 stickers in URFDLB face order.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FaceCube {
    pub f: [Color; N_PLATES],
}

impl Default for FaceCube {
    fn default() -> Self {
        let mut f = [Color::U; N_PLATES];
        for (i, c) in f.iter_mut().enumerate() {
            *c = ALL_COLORS[i / 9];
        }
        FaceCube { f }
    }
}

impl TryFrom<&str> for FaceCube {
    type Error = Error;

    /// Parses a 54 character facelet string. Sticker characters are matched
    /// against the six center characters, so any consistent color lettering
    /// is accepted, not just URFDLB.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != N_PLATES {
            return Err(Error::MalformedString);
        }
        let centers: Vec<char> = (0..N_COLORS).map(|i| chars[9 * i + 4]).collect();
        let mut f = [Color::U; N_PLATES];
        let mut count = [0usize; N_COLORS];
        for (i, &c) in chars.iter().enumerate() {
            let face = centers
                .iter()
                .position(|&ctr| ctr == c)
                .ok_or(Error::MalformedString)?;
            f[i] = ALL_COLORS[face];
            count[face] += 1;
        }
        if count.iter().any(|&n| n != 9) {
            return Err(Error::MalformedString);
        }
        Ok(FaceCube { f })
    }
}

impl TryFrom<&CubieCube> for FaceCube {
    type Error = Error;

    fn try_from(cc: &CubieCube) -> Result<Self, Self::Error> {
        let mut fc = FaceCube::default();
        for i in 0..N_CORNERS {
            let j = cc.cp[i] as usize;
            let ori = cc.co[i] as usize;
            if ori > 2 {
                return Err(Error::TwistedCorner);
            }
            for k in 0..3 {
                fc.f[CORNER_FACELET[i][(k + ori) % 3]] = ALL_COLORS[CORNER_FACELET[j][k] / 9];
            }
        }
        for i in 0..N_EDGES {
            let j = cc.ep[i] as usize;
            let ori = cc.eo[i] as usize;
            for k in 0..2 {
                fc.f[EDGE_FACELET[i][(k + ori) % 2]] = ALL_COLORS[EDGE_FACELET[j][k] / 9];
            }
        }
        Ok(fc)
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.f.iter() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SOLVED: &str =
        "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn parse_solved() {
        let fc = FaceCube::try_from(SOLVED).unwrap();
        assert_eq!(fc, FaceCube::default());
        assert_eq!(fc.to_string(), SOLVED);
    }

    #[test]
    fn parse_accepts_color_lettering() {
        // white on top, green in front, stickers named by color not by face
        let s = "WWWWWWWWWRRRRRRRRRGGGGGGGGGYYYYYYYYYOOOOOOOOOBBBBBBBBB";
        let fc = FaceCube::try_from(s).unwrap();
        assert_eq!(fc, FaceCube::default());
    }

    #[test]
    fn parse_rejects_short_string() {
        let s = &SOLVED[..53];
        assert!(matches!(
            FaceCube::try_from(s),
            Err(Error::MalformedString)
        ));
    }

    #[test]
    fn parse_rejects_bad_color_count() {
        let mut s = String::from(SOLVED);
        s.replace_range(0..1, "R");
        assert!(matches!(
            FaceCube::try_from(s.as_str()),
            Err(Error::MalformedString)
        ));
    }

    #[test]
    fn roundtrip_through_cubie_level() {
        let fc = FaceCube::try_from(SOLVED).unwrap();
        let cc = CubieCube::try_from(&fc).unwrap();
        let back = FaceCube::try_from(&cc).unwrap();
        assert_eq!(back.to_string(), SOLVED);
    }
}
