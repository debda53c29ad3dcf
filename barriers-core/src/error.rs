//! Error types for the barriers core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::Landscape`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LandscapeError {
    /// A configuration contained a symbol the landscape does not recognise.
    #[error("symbol `{symbol}` at position {position} is not valid for this landscape")]
    InvalidSymbol {
        /// Zero-based position of the offending symbol.
        position: usize,
        /// The symbol that was rejected.
        symbol: char,
    },
    /// A configuration had a different length from the landscape's reference.
    #[error("configuration has length {actual} but the landscape expects {expected}")]
    LengthMismatch {
        /// Length fixed by the landscape.
        expected: usize,
        /// Length of the configuration supplied by the caller.
        actual: usize,
    },
    /// A bracket structure did not balance.
    #[error("unbalanced structure at position {position}")]
    Unbalanced {
        /// Zero-based position where the imbalance was detected.
        position: usize,
    },
    /// A packed key could not be decoded.
    #[error("packed key of {length} bytes cannot be decoded by this landscape")]
    InvalidKey {
        /// Length of the rejected key in bytes.
        length: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`LandscapeError`] variants.
    enum LandscapeErrorCode for LandscapeError {
        /// A configuration contained an unrecognised symbol.
        InvalidSymbol => InvalidSymbol { .. } => "LANDSCAPE_INVALID_SYMBOL",
        /// A configuration had the wrong length.
        LengthMismatch => LengthMismatch { .. } => "LANDSCAPE_LENGTH_MISMATCH",
        /// A bracket structure did not balance.
        Unbalanced => Unbalanced { .. } => "LANDSCAPE_UNBALANCED",
        /// A packed key could not be decoded.
        InvalidKey => InvalidKey { .. } => "LANDSCAPE_INVALID_KEY",
    }
}

/// Error type produced when configuring or running a barrier analysis.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BarrierError {
    /// `kT` must be finite and strictly positive.
    #[error("kT must be finite and positive (got {kt})")]
    InvalidTemperature {
        /// The rejected thermal energy.
        kt: f64,
    },
    /// The significance threshold must be finite and non-negative.
    #[error("minh must be finite and non-negative (got {minh})")]
    InvalidThreshold {
        /// The rejected threshold.
        minh: f64,
    },
    /// The record stream contained no records.
    #[error("record stream contains no records")]
    EmptyInput,
    /// Energies decreased between two consecutive records.
    #[error("unsorted input: record {record} has energy {current} below {previous}")]
    InputOrderViolation {
        /// One-based sequence number of the offending record.
        record: u64,
        /// Energy of the preceding record.
        previous: f64,
        /// Energy of the offending record.
        current: f64,
    },
    /// A configuration was inserted into the structure index twice.
    #[error("duplicate structure `{structure}`")]
    DuplicateStructure {
        /// The configuration that was already indexed.
        structure: Arc<str>,
    },
    /// A record line could not be parsed.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// One-based line number in the input.
        line: usize,
        /// Description of the parse failure.
        reason: Arc<str>,
    },
    /// A record configuration had a different length from the header.
    #[error("record on line {line} has length {actual} but the header fixes {expected}")]
    LengthMismatch {
        /// One-based line number in the input.
        line: usize,
        /// Length fixed by the header.
        expected: usize,
        /// Length of the offending configuration.
        actual: usize,
    },
    /// Two basins are not connected by any saddle in the forest.
    #[error("no saddle between basin {left} and basin {right}")]
    NoSaddle {
        /// Forest id of the deeper basin.
        left: usize,
        /// Forest id of the shallower basin.
        right: usize,
    },
    /// A basin id fell outside the valid range.
    #[error("basin {basin} is outside the valid range 1..={bound}")]
    UnknownBasin {
        /// The rejected basin id.
        basin: usize,
        /// Largest valid id.
        bound: usize,
    },
    /// Internal forest or index links were inconsistent.
    #[error("inconsistent forest: {invariant}")]
    InconsistentForest {
        /// Name of the violated invariant.
        invariant: &'static str,
    },
    /// A landscape operation failed while flooding.
    #[error("landscape `{landscape}` failed: {error}")]
    Landscape {
        /// Name of the landscape that produced the error.
        landscape: Arc<str>,
        #[source]
        /// Underlying landscape error.
        error: LandscapeError,
    },
    /// Reading records or writing the saddle log failed.
    #[error("i/o failure while {context}: {reason}")]
    Io {
        /// Operation that was in progress.
        context: &'static str,
        /// Rendered operating system error.
        reason: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`BarrierError`] variants.
    enum BarrierErrorCode for BarrierError {
        /// `kT` must be finite and strictly positive.
        InvalidTemperature => InvalidTemperature { .. } => "BARRIERS_INVALID_TEMPERATURE",
        /// The significance threshold must be finite and non-negative.
        InvalidThreshold => InvalidThreshold { .. } => "BARRIERS_INVALID_THRESHOLD",
        /// The record stream contained no records.
        EmptyInput => EmptyInput => "BARRIERS_EMPTY_INPUT",
        /// Energies decreased between two consecutive records.
        InputOrderViolation => InputOrderViolation { .. } => "BARRIERS_INPUT_ORDER_VIOLATION",
        /// A configuration was inserted into the structure index twice.
        DuplicateStructure => DuplicateStructure { .. } => "BARRIERS_DUPLICATE_STRUCTURE",
        /// A record line could not be parsed.
        MalformedRecord => MalformedRecord { .. } => "BARRIERS_MALFORMED_RECORD",
        /// A record configuration had the wrong length.
        LengthMismatch => LengthMismatch { .. } => "BARRIERS_LENGTH_MISMATCH",
        /// Two basins are not connected by any saddle.
        NoSaddle => NoSaddle { .. } => "BARRIERS_NO_SADDLE",
        /// A basin id fell outside the valid range.
        UnknownBasin => UnknownBasin { .. } => "BARRIERS_UNKNOWN_BASIN",
        /// Internal forest or index links were inconsistent.
        InconsistentForest => InconsistentForest { .. } => "BARRIERS_INCONSISTENT_FOREST",
        /// A landscape operation failed.
        LandscapeFailure => Landscape { .. } => "BARRIERS_LANDSCAPE_FAILURE",
        /// Reading records or writing the saddle log failed.
        Io => Io { .. } => "BARRIERS_IO",
    }
}

impl BarrierError {
    /// Retrieve the inner [`LandscapeErrorCode`] when the error originated in a [`crate::Landscape`].
    pub const fn landscape_code(&self) -> Option<LandscapeErrorCode> {
        match self {
            Self::Landscape { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    pub(crate) fn io(context: &'static str, error: &std::io::Error) -> Self {
        Self::Io {
            context,
            reason: Arc::from(error.to_string()),
        }
    }

    /// Returns `true` for the errors that signal an inconsistent forest.
    #[must_use]
    pub const fn is_inconsistent_forest(&self) -> bool {
        matches!(
            self,
            Self::NoSaddle { .. } | Self::UnknownBasin { .. } | Self::InconsistentForest { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, BarrierError>;
