use crate::classic::clvm::casts::{
    bigint_from_bytes, bigint_to_bytes_clvm, canonicalize, limbs_for_int, TConvertOption,
};
use crate::util::Number;

#[test]
fn test_bigint_from_bytes_signed_by_default() {
    assert_eq!(bigint_from_bytes(&[0xff], None), Number::from(-1));
    assert_eq!(
        bigint_from_bytes(&[0xff], Some(TConvertOption { signed: true })),
        Number::from(-1)
    );
}

#[test]
fn test_bigint_from_bytes_unsigned() {
    assert_eq!(
        bigint_from_bytes(&[0xff], Some(TConvertOption { signed: false })),
        Number::from(255)
    );
    assert_eq!(
        bigint_from_bytes(&[0x80, 0x00], Some(TConvertOption { signed: false })),
        Number::from(0x8000)
    );
    assert_eq!(
        bigint_from_bytes(&[], Some(TConvertOption { signed: false })),
        Number::from(0)
    );
}

#[test]
fn test_canonicalize() {
    assert_eq!(canonicalize(&[]), Vec::<u8>::new());
    assert_eq!(canonicalize(&[0x00]), Vec::<u8>::new());
    assert_eq!(canonicalize(&[0x00, 0x00, 0x80]), vec![0x00, 0x80]);
    assert_eq!(canonicalize(&[0x00, 0x00, 0x7f]), vec![0x7f]);
    assert_eq!(canonicalize(&[0xff, 0xff]), vec![0xff]);
    assert_eq!(canonicalize(&[0xff, 0xff, 0x7f]), vec![0xff, 0x7f]);
    assert_eq!(canonicalize(&[0x01, 0x00]), vec![0x01, 0x00]);
}

#[test]
fn test_limbs_for_int() {
    assert_eq!(limbs_for_int(&Number::from(0)), 0);
    assert_eq!(limbs_for_int(&Number::from(1)), 1);
    assert_eq!(limbs_for_int(&Number::from(128)), 2);
    assert_eq!(limbs_for_int(&Number::from(-128)), 1);
    assert_eq!(bigint_to_bytes_clvm(&Number::from(65535)), vec![0x00, 0xff, 0xff]);
}
