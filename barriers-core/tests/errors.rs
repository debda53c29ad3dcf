//! Stable error codes exposed by the core API.

use std::sync::Arc;

use barriers_core::{BarrierError, BarrierErrorCode, LandscapeError, LandscapeErrorCode};
use rstest::rstest;

#[rstest]
#[case(BarrierError::InvalidTemperature { kt: 0.0 }, BarrierErrorCode::InvalidTemperature, "BARRIERS_INVALID_TEMPERATURE")]
#[case(BarrierError::InvalidThreshold { minh: -1.0 }, BarrierErrorCode::InvalidThreshold, "BARRIERS_INVALID_THRESHOLD")]
#[case(BarrierError::EmptyInput, BarrierErrorCode::EmptyInput, "BARRIERS_EMPTY_INPUT")]
#[case(
    BarrierError::InputOrderViolation { record: 2, previous: 1.0, current: 0.0 },
    BarrierErrorCode::InputOrderViolation,
    "BARRIERS_INPUT_ORDER_VIOLATION"
)]
#[case(
    BarrierError::DuplicateStructure { structure: Arc::from("((..))") },
    BarrierErrorCode::DuplicateStructure,
    "BARRIERS_DUPLICATE_STRUCTURE"
)]
#[case(
    BarrierError::MalformedRecord { line: 3, reason: Arc::from("missing energy column") },
    BarrierErrorCode::MalformedRecord,
    "BARRIERS_MALFORMED_RECORD"
)]
#[case(
    BarrierError::LengthMismatch { line: 2, expected: 4, actual: 3 },
    BarrierErrorCode::LengthMismatch,
    "BARRIERS_LENGTH_MISMATCH"
)]
#[case(BarrierError::NoSaddle { left: 2, right: 1 }, BarrierErrorCode::NoSaddle, "BARRIERS_NO_SADDLE")]
#[case(BarrierError::UnknownBasin { basin: 7, bound: 3 }, BarrierErrorCode::UnknownBasin, "BARRIERS_UNKNOWN_BASIN")]
#[case(
    BarrierError::InconsistentForest { invariant: "fathers precede children" },
    BarrierErrorCode::InconsistentForest,
    "BARRIERS_INCONSISTENT_FOREST"
)]
#[case(
    BarrierError::Io { context: "reading records", reason: Arc::from("broken pipe") },
    BarrierErrorCode::Io,
    "BARRIERS_IO"
)]
fn barrier_errors_expose_stable_codes(
    #[case] error: BarrierError,
    #[case] code: BarrierErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), code);
    assert_eq!(code.as_str(), text);
    assert_eq!(code.to_string(), text);
    assert_eq!(error.landscape_code(), None);
}

#[rstest]
#[case(LandscapeError::InvalidSymbol { position: 2, symbol: 'x' }, LandscapeErrorCode::InvalidSymbol, "LANDSCAPE_INVALID_SYMBOL")]
#[case(LandscapeError::LengthMismatch { expected: 4, actual: 5 }, LandscapeErrorCode::LengthMismatch, "LANDSCAPE_LENGTH_MISMATCH")]
#[case(LandscapeError::Unbalanced { position: 0 }, LandscapeErrorCode::Unbalanced, "LANDSCAPE_UNBALANCED")]
#[case(LandscapeError::InvalidKey { length: 3 }, LandscapeErrorCode::InvalidKey, "LANDSCAPE_INVALID_KEY")]
fn landscape_errors_surface_through_barrier_errors(
    #[case] error: LandscapeError,
    #[case] code: LandscapeErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), code);
    assert_eq!(code.as_str(), text);

    let wrapped = BarrierError::Landscape {
        landscape: Arc::from("hypercube"),
        error,
    };
    assert_eq!(wrapped.code(), BarrierErrorCode::LandscapeFailure);
    assert_eq!(wrapped.code().as_str(), "BARRIERS_LANDSCAPE_FAILURE");
    assert_eq!(wrapped.landscape_code(), Some(code));
}

#[rstest]
#[case(BarrierError::NoSaddle { left: 2, right: 1 }, true)]
#[case(BarrierError::UnknownBasin { basin: 4, bound: 2 }, true)]
#[case(BarrierError::InconsistentForest { invariant: "saddles are indexed" }, true)]
#[case(BarrierError::EmptyInput, false)]
fn forest_errors_are_classified(#[case] error: BarrierError, #[case] expected: bool) {
    assert_eq!(error.is_inconsistent_forest(), expected);
}

#[test]
fn order_violation_message_names_both_energies() {
    let error = BarrierError::InputOrderViolation {
        record: 5,
        previous: -3.5,
        current: -4.0,
    };
    assert_eq!(
        error.to_string(),
        "unsorted input: record 5 has energy -4 below -3.5"
    );
}
