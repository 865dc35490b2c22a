//! Seam between the curve adapter and the constant-time point engine.

use elliptic_curve::{
    group::Group,
    ops::{MulByGenerator, Reduce},
    sec1::{FromEncodedPoint, ToEncodedPoint},
};
use sm2::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, U256};

/// Capability contract for the group-arithmetic backend.
///
/// An engine owns the curve's field arithmetic and group-law formulas and is
/// assumed to execute them in constant time with respect to secret scalars.
/// The adapter talks to it exclusively through byte encodings: SEC1 point
/// encodings on the point side (a single zero byte for the point at infinity,
/// `0x04 ‖ x ‖ y` uncompressed, `0x02`/`0x03 ‖ x` compressed), and
/// canonical-length big-endian byte strings on the scalar side.
///
/// Scalar-accepting operations reject any scalar that is not exactly the
/// canonical width of the curve order and accept every canonical-width value.
pub trait PointEngine {
    /// Opaque point representation. Produced and consumed only by this
    /// engine; each operation yields a fresh value, so points are never
    /// shared as mutable state across calls.
    type Point: Clone;

    /// Returns the point at infinity, the group's identity element.
    fn identity(&self) -> Self::Point;

    /// Decodes a SEC1-encoded point, validating curve membership.
    ///
    /// Compressed encodings are decompressed here (square root plus parity
    /// selection). Returns `None` for anything that is not the valid
    /// encoding of a point on the curve.
    fn decode(&self, bytes: &[u8]) -> Option<Self::Point>;

    /// Encodes a point in canonical form: uncompressed SEC1, or the single
    /// zero byte for the point at infinity.
    fn encode(&self, point: &Self::Point) -> Vec<u8>;

    /// Returns `lhs + rhs`.
    fn add(&self, lhs: &Self::Point, rhs: &Self::Point) -> Self::Point;

    /// Returns `point + point`.
    fn double(&self, point: &Self::Point) -> Self::Point;

    /// Returns `[scalar] point`, or `None` if the scalar is not of
    /// canonical length.
    fn mul(&self, point: &Self::Point, scalar: &[u8]) -> Option<Self::Point>;

    /// Returns `[scalar] G` for the fixed generator, or `None` if the
    /// scalar is not of canonical length.
    ///
    /// Backends should route this through their base-point-specialized
    /// multiplication (e.g. precomputed tables) when they have one.
    fn mul_base(&self, scalar: &[u8]) -> Option<Self::Point>;
}

/// Default engine backed by the `sm2` crate's projective arithmetic.
///
/// Group operations use complete addition formulas, so `add` is valid for
/// any pair of inputs, including doubling and the identity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sm2Engine;

/// Canonical scalar width for sm2p256v1.
const SCALAR_LEN: usize = 32;

impl Sm2Engine {
    fn scalar_from_bytes(scalar: &[u8]) -> Option<Scalar> {
        if scalar.len() != SCALAR_LEN {
            return None;
        }
        let bytes = FieldBytes::clone_from_slice(scalar);
        Some(<Scalar as Reduce<U256>>::reduce_bytes(&bytes))
    }
}

impl PointEngine for Sm2Engine {
    type Point = ProjectivePoint;

    fn identity(&self) -> ProjectivePoint {
        ProjectivePoint::IDENTITY
    }

    fn decode(&self, bytes: &[u8]) -> Option<ProjectivePoint> {
        let encoded = EncodedPoint::from_bytes(bytes).ok()?;
        Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .map(ProjectivePoint::from)
    }

    fn encode(&self, point: &ProjectivePoint) -> Vec<u8> {
        point.to_affine().to_encoded_point(false).as_bytes().to_vec()
    }

    fn add(&self, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> ProjectivePoint {
        lhs + rhs
    }

    fn double(&self, point: &ProjectivePoint) -> ProjectivePoint {
        point.double()
    }

    fn mul(&self, point: &ProjectivePoint, scalar: &[u8]) -> Option<ProjectivePoint> {
        Self::scalar_from_bytes(scalar).map(|scalar| point * &scalar)
    }

    fn mul_base(&self, scalar: &[u8]) -> Option<ProjectivePoint> {
        Self::scalar_from_bytes(scalar).map(|scalar| ProjectivePoint::mul_by_generator(&scalar))
    }
}
