use thiserror::Error;

/// Everything that can go wrong while parsing, validating or solving a cube.
#[derive(Error, Debug)]
pub enum Error {
    /// The facelet string is not 54 stickers drawn from the six center colors.
    #[error("facelet string is malformed")]
    MalformedString,
    /// Not all 12 edges exist exactly once.
    #[error("cube has missing or duplicated edges")]
    MissingEdge,
    /// One edge has to be flipped.
    #[error("one edge is flipped")]
    FlippedEdge,
    /// Not all 8 corners exist exactly once.
    #[error("cube has missing or duplicated corners")]
    MissingCorner,
    /// One corner has to be twisted.
    #[error("one corner is twisted")]
    TwistedCorner,
    /// Two corners or two edges have to be exchanged.
    #[error("corner and edge permutation parities disagree")]
    ParityError,
    /// No solution exists within the requested maximum depth.
    #[error("no solution within the requested depth")]
    ShortDepth,
    /// The probe limit was exhausted before a solution was accepted.
    #[error("probe limit exceeded before finding a solution")]
    ProbeLimit,
    /// The solver table snapshot could not be read or decoded.
    #[error("solver tables are missing or unreadable")]
    MissingTables,
    /// A scramble string contains a token that is not a face turn.
    #[error("invalid move in scramble")]
    InvalidScramble,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] bincode::error::EncodeError),
    #[error(transparent)]
    Decode(#[from] bincode::error::DecodeError),
}

impl Error {
    /// Stable numeric code for each failure, 0 is reserved for success.
    pub fn code(&self) -> u8 {
        match self {
            Error::MalformedString => 1,
            Error::MissingEdge => 2,
            Error::FlippedEdge => 3,
            Error::MissingCorner => 4,
            Error::TwistedCorner => 5,
            Error::ParityError => 6,
            Error::ShortDepth => 7,
            Error::ProbeLimit => 8,
            Error::MissingTables => 9,
            Error::InvalidScramble => 1,
            Error::Io(_) | Error::Encode(_) | Error::Decode(_) => 9,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Error::MalformedString.code(), 1);
        assert_eq!(Error::ParityError.code(), 6);
        assert_eq!(Error::ShortDepth.code(), 7);
        assert_eq!(Error::ProbeLimit.code(), 8);
        assert_eq!(Error::MissingTables.code(), 9);
    }
}
