use num_bigint::{BigUint, Sign};

use crate::util::{number_from_u8, u8_from_number, Number};

pub struct TConvertOption {
    pub signed: bool,
}

/// Decode an atom as an integer.  Signed decoding (the default) reads two's
/// complement; unsigned decoding reads the literal bytes as a magnitude.
pub fn bigint_from_bytes(b: &[u8], option: Option<TConvertOption>) -> Number {
    let signed = option.map(|cvt| cvt.signed).unwrap_or(true);
    if b.is_empty() {
        return Number::from(0);
    }

    if signed {
        number_from_u8(b)
    } else {
        Number::from_biguint(Sign::Plus, BigUint::from_bytes_be(b))
    }
}

// This is the only encoding an operator is allowed to emit for an integer
// result.
pub fn bigint_to_bytes_clvm(v: &Number) -> Vec<u8> {
    u8_from_number(v)
}

/// Strip redundant sign bytes: a leading 0x00 is kept only when the next byte
/// has its high bit set, and a leading 0xff only when the next byte doesn't.
pub fn canonicalize(b: &[u8]) -> Vec<u8> {
    let mut slice = b;

    while !slice.is_empty() {
        let redundant = match slice {
            [0x00] => true,
            [0x00, next, ..] => next & 0x80 == 0,
            [0xff, next, ..] => next & 0x80 != 0,
            _ => false,
        };
        if !redundant {
            break;
        }
        slice = &slice[1..];
    }

    slice.to_vec()
}

/// Number of bytes the canonical encoding of v occupies.
pub fn limbs_for_int(v: &Number) -> usize {
    bigint_to_bytes_clvm(v).len()
}
