use num_bigint::BigInt;

pub mod log;

pub type Number = BigInt;

/// Read an atom as a big-endian two's complement signed integer.  The empty
/// atom is zero.
pub fn number_from_u8(v: &[u8]) -> Number {
    let len = v.len();
    if len == 0 {
        0.into()
    } else {
        Number::from_signed_bytes_be(v)
    }
}

/// Produce the canonical atom for a number: the shortest two's complement
/// big-endian encoding, with zero as the empty atom.
pub fn u8_from_number(v: &Number) -> Vec<u8> {
    let bytes = v.to_signed_bytes_be();
    if bytes == [0] {
        vec![]
    } else {
        bytes
    }
}
