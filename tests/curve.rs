//! SM2 curve adapter tests.

use hex_literal::hex;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};
use proptest::prelude::*;
use sm2p256::{sm2p256, CombinedMult, Curve};

/// Uncompressed SEC1 encoding of the sm2p256v1 base point.
const GENERATOR_UNCOMPRESSED: [u8; 65] = hex!(
    "04"
    "32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7"
    "BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0"
);

fn infinity() -> (BigInt, BigInt) {
    (BigInt::zero(), BigInt::zero())
}

fn generator() -> (BigInt, BigInt) {
    let params = sm2p256().params();
    (params.gx().clone(), params.gy().clone())
}

/// Canonical-length scalar with the given small value.
fn scalar(k: u8) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[31] = k;
    out
}

#[test]
fn generator_encoding_matches_params() {
    let curve = sm2p256();
    let (gx, gy) = generator();

    let (x, y) = curve
        .unmarshal(&GENERATOR_UNCOMPRESSED)
        .expect("generator encoding decodes");
    assert_eq!((x, y), (gx.clone(), gy.clone()));
    assert_eq!(curve.marshal(&gx, &gy), GENERATOR_UNCOMPRESSED.to_vec());
}

#[test]
fn scalar_base_mult_one_is_generator() {
    let curve = sm2p256();
    assert_eq!(curve.scalar_base_mult(&scalar(1)), generator());
}

#[test]
fn scalar_base_mult_zero_is_infinity() {
    let curve = sm2p256();
    assert_eq!(curve.scalar_base_mult(&scalar(0)), infinity());
}

#[test]
fn scalar_mult_by_group_order_is_infinity() {
    let curve = sm2p256();
    let (gx, gy) = generator();
    let (_, order) = curve.params().n().to_bytes_be();
    assert_eq!(curve.scalar_mult(&gx, &gy, &order), infinity());
    assert_eq!(curve.scalar_base_mult(&order), infinity());
}

#[test]
fn scalar_length_does_not_change_the_result() {
    let curve = sm2p256();
    let (gx, gy) = generator();

    // 0x0701 as a two-byte scalar and left-padded to canonical width.
    let mut padded = [0u8; 32];
    padded[30] = 0x07;
    padded[31] = 0x01;
    assert_eq!(
        curve.scalar_mult(&gx, &gy, &[0x07, 0x01]),
        curve.scalar_mult(&gx, &gy, &padded)
    );

    // n + 2 as a 33-byte scalar reduces to 2.
    let sum = curve.params().n() + BigInt::from(2u8);
    let (_, sum_bytes) = sum.to_bytes_be();
    let mut wide = vec![0u8; 33 - sum_bytes.len()];
    wide.extend_from_slice(&sum_bytes);
    assert_eq!(
        curve.scalar_mult(&gx, &gy, &wide),
        curve.scalar_mult(&gx, &gy, &scalar(2))
    );
}

#[test]
fn is_on_curve_accepts_the_generator_only_in_range() {
    let curve = sm2p256();
    let (gx, gy) = generator();

    assert!(curve.is_on_curve(&gx, &gy));
    assert!(!curve.is_on_curve(&gx, &(&gy + BigInt::one())));

    // The conventional point at infinity is documented as not on the curve.
    assert!(!curve.is_on_curve(&BigInt::zero(), &BigInt::zero()));

    // Negative and overflowing coordinates are rejected, not reduced.
    assert!(!curve.is_on_curve(&-&gx, &gy));
    assert!(!curve.is_on_curve(&(&gx + curve.params().p()), &gy));
}

#[test]
fn add_and_double_are_consistent() {
    let curve = sm2p256();
    let (gx, gy) = generator();

    let two_g = curve.double(&gx, &gy);
    assert_eq!(two_g, curve.add(&gx, &gy, &gx, &gy));
    assert_eq!(two_g, curve.scalar_base_mult(&scalar(2)));

    let three_g = curve.add(&two_g.0, &two_g.1, &gx, &gy);
    assert_eq!(three_g, curve.add(&gx, &gy, &two_g.0, &two_g.1));
    assert_eq!(three_g, curve.scalar_base_mult(&scalar(3)));

    // The point at infinity is the additive identity.
    assert_eq!(curve.add(&gx, &gy, &BigInt::zero(), &BigInt::zero()), (gx, gy));
}

#[test]
fn combined_mult_matches_separate_operations() {
    let curve = sm2p256();
    let (px, py) = curve.scalar_base_mult(&scalar(5));

    let (ax, ay) = curve.scalar_base_mult(&scalar(2));
    let (bx, by) = curve.scalar_mult(&px, &py, &scalar(3));
    let expected = curve.add(&ax, &ay, &bx, &by);

    assert_eq!(
        curve.combined_mult(&px, &py, &scalar(2), &scalar(3)),
        expected
    );
}

#[test]
fn marshal_encodes_infinity_as_a_single_zero_byte() {
    let curve = sm2p256();
    let zero = BigInt::zero();
    assert_eq!(curve.marshal(&zero, &zero), vec![0]);
    assert_eq!(curve.marshal_compressed(&zero, &zero), vec![0]);
}

#[test]
fn compressed_round_trip_of_the_generator() {
    let curve = sm2p256();
    let (gx, gy) = generator();

    let compressed = curve.marshal_compressed(&gx, &gy);
    assert_eq!(compressed.len(), 33);
    let expected_tag = if gy.bit(0) { 0x03 } else { 0x02 };
    assert_eq!(compressed[0], expected_tag);

    assert_eq!(curve.unmarshal_compressed(&compressed), Some((gx, gy)));
}

#[test]
fn unmarshal_rejects_invalid_input() {
    let curve = sm2p256();
    let (gx, gy) = generator();
    let encoded = curve.marshal(&gx, &gy);

    assert_eq!(curve.unmarshal(&[]), None);

    // Only the uncompressed tag is admitted, so neither the infinity
    // encoding nor a compressed point parses here.
    assert_eq!(curve.unmarshal(&[0x00]), None);
    assert_eq!(curve.unmarshal(&curve.marshal_compressed(&gx, &gy)), None);

    let mut wrong_tag = encoded.clone();
    wrong_tag[0] = 0x05;
    assert_eq!(curve.unmarshal(&wrong_tag), None);

    // Truncated payload.
    assert_eq!(curve.unmarshal(&encoded[..33]), None);

    // Well-formed but off-curve: perturb the y-coordinate.
    let mut off_curve = encoded;
    off_curve[64] ^= 0x01;
    assert_eq!(curve.unmarshal(&off_curve), None);
}

#[test]
fn unmarshal_compressed_rejects_invalid_input() {
    let curve = sm2p256();
    let (gx, gy) = generator();
    let compressed = curve.marshal_compressed(&gx, &gy);

    assert_eq!(curve.unmarshal_compressed(&[]), None);
    assert_eq!(curve.unmarshal_compressed(&[0x00]), None);

    let mut wrong_tag = compressed.clone();
    wrong_tag[0] = 0x04;
    assert_eq!(curve.unmarshal_compressed(&wrong_tag), None);

    // Truncated payload.
    assert_eq!(curve.unmarshal_compressed(&compressed[..32]), None);

    // x not a reduced field element.
    let (_, p_bytes) = curve.params().p().to_bytes_be();
    let mut non_canonical = vec![0x02];
    non_canonical.extend_from_slice(&p_bytes);
    assert_eq!(curve.unmarshal_compressed(&non_canonical), None);
}

#[test]
#[should_panic(expected = "Add was called on an invalid point")]
fn add_panics_on_an_invalid_point() {
    let curve = sm2p256();
    let one = BigInt::one();
    curve.add(&one, &one, &one, &one);
}

#[test]
#[should_panic(expected = "ScalarMult was called on an invalid point")]
fn scalar_mult_panics_on_an_invalid_point() {
    let curve = sm2p256();
    let one = BigInt::one();
    curve.scalar_mult(&one, &one, &scalar(1));
}

#[test]
#[should_panic(expected = "Marshal was called on an invalid point")]
fn marshal_panics_on_an_invalid_point() {
    let curve = sm2p256();
    let one = BigInt::one();
    curve.marshal(&one, &one);
}

prop_compose! {
    // A pseudorandom point on the curve, never the point at infinity.
    fn curve_point()(bytes in any::<[u8; 32]>()) -> (BigInt, BigInt) {
        let point = sm2p256().scalar_base_mult(&bytes);
        if point.0.is_zero() && point.1.is_zero() {
            generator()
        } else {
            point
        }
    }
}

proptest! {
    #[test]
    fn encoding_round_trips(point in curve_point()) {
        let curve = sm2p256();
        let (x, y) = point;

        prop_assert!(curve.is_on_curve(&x, &y));

        let encoded = curve.marshal(&x, &y);
        prop_assert_eq!(encoded.len(), 65);
        prop_assert_eq!(curve.unmarshal(&encoded), Some((x.clone(), y.clone())));

        let compressed = curve.marshal_compressed(&x, &y);
        prop_assert_eq!(compressed.len(), 33);
        prop_assert_eq!(curve.unmarshal_compressed(&compressed), Some((x, y)));
    }

    #[test]
    fn group_law_consistency(p in curve_point(), q in curve_point()) {
        let curve = sm2p256();

        // Addition commutes.
        prop_assert_eq!(
            curve.add(&p.0, &p.1, &q.0, &q.1),
            curve.add(&q.0, &q.1, &p.0, &p.1)
        );

        // The point at infinity is the identity.
        let zero = BigInt::zero();
        prop_assert_eq!(curve.add(&p.0, &p.1, &zero, &zero), p.clone());

        // Doubling agrees with self-addition.
        prop_assert_eq!(
            curve.double(&p.0, &p.1),
            curve.add(&p.0, &p.1, &p.0, &p.1)
        );
    }

    #[test]
    fn combined_mult_consistency(
        point in curve_point(),
        s1 in any::<[u8; 32]>(),
        s2 in any::<[u8; 32]>(),
    ) {
        let curve = sm2p256();
        let (px, py) = point;

        let (ax, ay) = curve.scalar_base_mult(&s1);
        let (bx, by) = curve.scalar_mult(&px, &py, &s2);
        let expected = curve.add(&ax, &ay, &bx, &by);

        prop_assert_eq!(curve.combined_mult(&px, &py, &s1, &s2), expected);
    }

    #[test]
    fn scalar_mult_reduces_arbitrary_length_scalars(
        point in curve_point(),
        raw in proptest::collection::vec(any::<u8>(), 0..48),
    ) {
        let curve = sm2p256();
        let (px, py) = point;

        // Reference: reduce modulo the order and re-encode canonically.
        let k = BigInt::from_bytes_be(Sign::Plus, &raw) % curve.params().n();
        let (_, k_bytes) = k.to_bytes_be();
        let mut canonical = vec![0u8; 32 - k_bytes.len()];
        canonical.extend_from_slice(&k_bytes);

        prop_assert_eq!(
            curve.scalar_mult(&px, &py, &raw),
            curve.scalar_mult(&px, &py, &canonical)
        );
    }
}
