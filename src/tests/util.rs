use num_bigint::ToBigInt;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::classic::clvm::casts::canonicalize;
use crate::util::{number_from_u8, u8_from_number, Number};

#[test]
fn test_zero_is_empty_atom() {
    assert_eq!(u8_from_number(&Number::from(0)), Vec::<u8>::new());
    assert_eq!(number_from_u8(&[]), Number::from(0));
}

#[test]
fn test_number_encoding_sign_bytes() {
    assert_eq!(u8_from_number(&Number::from(127)), vec![0x7f]);
    assert_eq!(u8_from_number(&Number::from(128)), vec![0x00, 0x80]);
    assert_eq!(u8_from_number(&Number::from(-1)), vec![0xff]);
    assert_eq!(u8_from_number(&Number::from(-128)), vec![0x80]);
    assert_eq!(u8_from_number(&Number::from(-129)), vec![0xff, 0x7f]);
    assert_eq!(u8_from_number(&Number::from(256)), vec![0x01, 0x00]);
}

#[test]
fn test_number_decoding_non_canonical() {
    assert_eq!(number_from_u8(&[0x00, 0x00, 0x01]), Number::from(1));
    assert_eq!(number_from_u8(&[0xff, 0xff]), Number::from(-1));
    assert_eq!(number_from_u8(&[0x00]), Number::from(0));
}

// Decoding then encoding any byte string lands on its canonical form.
#[test]
fn test_decode_encode_is_canonicalize() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let len = rng.gen_range(0..12);
        let mut b: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        // Bias toward the interesting sign prefixes.
        if len > 1 && rng.gen_bool(0.5) {
            b[0] = if rng.gen() { 0x00 } else { 0xff };
        }
        assert_eq!(u8_from_number(&number_from_u8(&b)), canonicalize(&b));
    }
}

#[test]
fn test_large_number_encoding() {
    let big = 1_u128 << 100;
    let n = big.to_bigint().unwrap();
    let mut expected = vec![0x10];
    expected.extend_from_slice(&[0; 12]);
    assert_eq!(u8_from_number(&n), expected);
    assert_eq!(number_from_u8(&expected), n);
}
