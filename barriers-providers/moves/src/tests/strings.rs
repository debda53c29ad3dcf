use barriers_core::{Landscape, LandscapeError};

use super::StringLandscape;

#[test]
fn substitutions_follow_alphabet_order() {
    let landscape = StringLandscape::with_alphabet(3, "xyz", 2).expect("alphabet is valid");
    assert_eq!(
        landscape.neighbors("zx").expect("letters are valid"),
        ["xx", "yx", "zy", "zz"]
    );
}

#[test]
fn lettered_alphabets_start_at_a() {
    let landscape = StringLandscape::lettered(4, 1).expect("size is valid");
    assert_eq!(landscape.alphabet(), ['A', 'B', 'C', 'D']);
    assert_eq!(landscape.name(), "Q4");
}

#[test]
fn letters_outside_the_alphabet_are_rejected() {
    let err = StringLandscape::lettered(2, 3)
        .expect("size is valid")
        .neighbors("ABC")
        .expect_err("C is not in Q2");
    assert_eq!(
        err,
        LandscapeError::InvalidSymbol {
            position: 2,
            symbol: 'C'
        }
    );
}

#[test]
fn identity_packing_round_trips() {
    let landscape = StringLandscape::lettered(3, 3).expect("size is valid");
    let key = landscape.pack("CAB").expect("identity packing");
    assert_eq!(key.as_bytes(), *b"CAB");
    assert_eq!(landscape.unpack(&key).expect("key decodes"), "CAB");
}
