use barriers_core::{Landscape, LandscapeError};
use rstest::rstest;

use super::{PermutationLandscape, PermutationMoves};

#[rstest]
#[case("", PermutationMoves::Transposition)]
#[case("T", PermutationMoves::Transposition)]
#[case("C", PermutationMoves::Canonical)]
#[case("Reversal", PermutationMoves::Reversal)]
fn move_sets_select_by_first_letter(#[case] moveset: &str, #[case] expected: PermutationMoves) {
    assert_eq!(PermutationMoves::from_moveset(moveset), expected);
}

#[rstest]
#[case(PermutationMoves::Transposition, &["BACD", "CBAD", "DBCA", "ACBD", "ADCB", "ABDC"])]
#[case(PermutationMoves::Canonical, &["BACD", "ACBD", "ABDC"])]
#[case(PermutationMoves::Reversal, &["BACD", "CBAD", "DCBA", "ACBD", "ADCB", "ABDC"])]
fn moves_enumerate_in_position_order(#[case] moves: PermutationMoves, #[case] expected: &[&str]) {
    let neighbors = PermutationLandscape::new(moves, 4)
        .neighbors("ABCD")
        .expect("permutation is valid");
    assert_eq!(neighbors, expected);
}

#[test]
fn repeated_symbols_are_rejected() {
    let err = PermutationLandscape::new(PermutationMoves::default(), 3)
        .neighbors("ABA")
        .expect_err("A repeats");
    assert_eq!(
        err,
        LandscapeError::InvalidSymbol {
            position: 2,
            symbol: 'A'
        }
    );
}
