//! Affine coordinate codec and group-operation facade.

use core::fmt;

use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use once_cell::sync::Lazy;

use crate::encoding::TAG_UNCOMPRESSED;
use crate::engine::{PointEngine, Sm2Engine};
use crate::params::CurveParams;

/// Process-wide curve singleton.
static SM2P256: Lazy<Sm2Curve> = Lazy::new(|| Sm2Curve {
    params: CurveParams::sm2p256(),
    engine: Sm2Engine,
});

/// Returns the SM2 curve, initializing it on first call.
///
/// Initialization is idempotent and safe under concurrent first-time
/// callers; the returned value is immutable, and every operation on it is a
/// pure synchronous computation, so it can be shared freely across threads.
pub fn sm2p256() -> &'static Sm2Curve {
    &SM2P256
}

/// A prime-field Weierstrass curve over big-integer affine coordinates.
///
/// This is the abstraction consumed by higher-level signature and
/// key-agreement code. Affine points are pairs of non-negative integers,
/// with `(0, 0)` reserved as the conventional encoding of the point at
/// infinity (which has no true affine representation).
///
/// The arithmetic operations (`add`, `double`, `scalar_mult`,
/// `scalar_base_mult`) assume previously-validated inputs and panic on a
/// point that fails validation; callers holding untrusted input must go
/// through [`is_on_curve`][Curve::is_on_curve] or the `unmarshal` parsers
/// first.
pub trait Curve {
    /// Returns the curve's domain parameters.
    fn params(&self) -> &CurveParams;

    /// Reports whether `(x, y)` is a point on the curve.
    ///
    /// Returns `false` for `(0, 0)`, the conventional point at infinity,
    /// even though the internal codec accepts it.
    fn is_on_curve(&self, x: &BigInt, y: &BigInt) -> bool;

    /// Returns `(x1, y1) + (x2, y2)`.
    ///
    /// # Panics
    ///
    /// If either input is not a valid point on the curve.
    fn add(&self, x1: &BigInt, y1: &BigInt, x2: &BigInt, y2: &BigInt) -> (BigInt, BigInt);

    /// Returns `2 * (x, y)`.
    ///
    /// # Panics
    ///
    /// If the input is not a valid point on the curve.
    fn double(&self, x: &BigInt, y: &BigInt) -> (BigInt, BigInt);

    /// Returns `[scalar] (x, y)` where the scalar is a big-endian integer
    /// of arbitrary length.
    ///
    /// # Panics
    ///
    /// If the input is not a valid point on the curve.
    fn scalar_mult(&self, x: &BigInt, y: &BigInt, scalar: &[u8]) -> (BigInt, BigInt);

    /// Returns `[scalar] G` where `G` is the base point and the scalar is a
    /// big-endian integer of arbitrary length.
    fn scalar_base_mult(&self, scalar: &[u8]) -> (BigInt, BigInt);
}

/// Combined double-scalar multiplication, `[s1] G + [s2] P`.
///
/// Signature verification fuses its generator term and public-key term into
/// this single operation; implementations convert back to affine
/// coordinates once at the end rather than after each sub-step.
pub trait CombinedMult: Curve {
    /// Returns `[s1] G + [s2] (px, py)`.
    ///
    /// # Panics
    ///
    /// If `(px, py)` is not a valid point on the curve.
    fn combined_mult(
        &self,
        px: &BigInt,
        py: &BigInt,
        s1: &[u8],
        s2: &[u8],
    ) -> (BigInt, BigInt);
}

/// Reasons the codec rejects an affine pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PointError {
    NegativeCoordinate,
    OverflowingCoordinate,
    NotOnCurve,
}

impl fmt::Display for PointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeCoordinate => f.write_str("negative coordinate"),
            Self::OverflowingCoordinate => f.write_str("overflowing coordinate"),
            Self::NotOnCurve => f.write_str("point not on curve"),
        }
    }
}

impl std::error::Error for PointError {}

/// The SM2 curve, generic over the group-arithmetic backend.
///
/// Use [`sm2p256`] for the default engine; [`Sm2Curve::with_engine`] allows
/// substituting an alternative [`PointEngine`] implementation.
#[derive(Clone, Copy, Debug)]
pub struct Sm2Curve<E: PointEngine = Sm2Engine> {
    pub(crate) params: &'static CurveParams,
    pub(crate) engine: E,
}

impl<E: PointEngine> Sm2Curve<E> {
    /// Creates a curve backed by the given engine.
    pub fn with_engine(engine: E) -> Self {
        Self {
            params: CurveParams::sm2p256(),
            engine,
        }
    }

    /// Converts an affine pair into the engine's point representation.
    ///
    /// `(0, 0)` is by convention the point at infinity, which cannot be
    /// represented in affine coordinates; it maps to the engine's identity
    /// without any encoding step. Everything else is serialized
    /// uncompressed and handed to the engine's decoder, which performs the
    /// final on-curve check.
    pub(crate) fn point_from_affine(&self, x: &BigInt, y: &BigInt) -> Result<E::Point, PointError> {
        if x.is_zero() && y.is_zero() {
            return Ok(self.engine.identity());
        }

        // Reject values that would not encode correctly.
        if x.sign() == Sign::Minus || y.sign() == Sign::Minus {
            return Err(PointError::NegativeCoordinate);
        }
        let bit_size = self.params.bit_size() as u64;
        if x.bits() > bit_size || y.bits() > bit_size {
            return Err(PointError::OverflowingCoordinate);
        }

        let byte_len = self.params.byte_len();
        let mut buf = vec![0u8; 1 + 2 * byte_len];
        buf[0] = TAG_UNCOMPRESSED;
        fill_bytes(x, &mut buf[1..1 + byte_len]);
        fill_bytes(y, &mut buf[1 + byte_len..]);
        self.engine.decode(&buf).ok_or(PointError::NotOnCurve)
    }

    /// Converts an engine point back to affine coordinates via its
    /// canonical encoding, with the point at infinity mapping to `(0, 0)`.
    pub(crate) fn point_to_affine(&self, point: &E::Point) -> (BigInt, BigInt) {
        let out = self.engine.encode(point);
        if out.len() == 1 && out[0] == 0 {
            return (BigInt::zero(), BigInt::zero());
        }
        let byte_len = self.params.byte_len();
        let x = BigInt::from_bytes_be(Sign::Plus, &out[1..1 + byte_len]);
        let y = BigInt::from_bytes_be(Sign::Plus, &out[1 + byte_len..]);
        (x, y)
    }

    /// Brings a scalar to the canonical byte width of the curve order, as
    /// required by the engine's multiplication routines.
    ///
    /// Longer inputs are reduced modulo the order; shorter inputs are
    /// left-zero-padded. Inputs already of canonical width pass through
    /// unchanged.
    pub(crate) fn normalize_scalar(&self, scalar: &[u8]) -> Vec<u8> {
        let scalar_len = self.params.scalar_len();
        if scalar.len() == scalar_len {
            return scalar.to_vec();
        }
        let mut s = BigInt::from_bytes_be(Sign::Plus, scalar);
        if scalar.len() > scalar_len {
            s %= self.params.n();
        }
        let mut out = vec![0u8; scalar_len];
        fill_bytes(&s, &mut out);
        out
    }
}

impl<E: PointEngine> Curve for Sm2Curve<E> {
    fn params(&self) -> &CurveParams {
        self.params
    }

    fn is_on_curve(&self, x: &BigInt, y: &BigInt) -> bool {
        // (0, 0) is rejected here even though point_from_affine accepts it
        // as the point at infinity.
        if x.is_zero() && y.is_zero() {
            return false;
        }
        self.point_from_affine(x, y).is_ok()
    }

    fn add(&self, x1: &BigInt, y1: &BigInt, x2: &BigInt, y2: &BigInt) -> (BigInt, BigInt) {
        let p1 = self
            .point_from_affine(x1, y1)
            .expect("sm2p256: Add was called on an invalid point");
        let p2 = self
            .point_from_affine(x2, y2)
            .expect("sm2p256: Add was called on an invalid point");
        self.point_to_affine(&self.engine.add(&p1, &p2))
    }

    fn double(&self, x: &BigInt, y: &BigInt) -> (BigInt, BigInt) {
        let point = self
            .point_from_affine(x, y)
            .expect("sm2p256: Double was called on an invalid point");
        self.point_to_affine(&self.engine.double(&point))
    }

    fn scalar_mult(&self, x: &BigInt, y: &BigInt, scalar: &[u8]) -> (BigInt, BigInt) {
        let point = self
            .point_from_affine(x, y)
            .expect("sm2p256: ScalarMult was called on an invalid point");
        let scalar = self.normalize_scalar(scalar);
        let product = self
            .engine
            .mul(&point, &scalar)
            .expect("sm2p256: engine rejected a normalized scalar");
        self.point_to_affine(&product)
    }

    fn scalar_base_mult(&self, scalar: &[u8]) -> (BigInt, BigInt) {
        let scalar = self.normalize_scalar(scalar);
        let product = self
            .engine
            .mul_base(&scalar)
            .expect("sm2p256: engine rejected a normalized scalar");
        self.point_to_affine(&product)
    }
}

impl<E: PointEngine> CombinedMult for Sm2Curve<E> {
    fn combined_mult(
        &self,
        px: &BigInt,
        py: &BigInt,
        s1: &[u8],
        s2: &[u8],
    ) -> (BigInt, BigInt) {
        let s1 = self.normalize_scalar(s1);
        let base_term = self
            .engine
            .mul_base(&s1)
            .expect("sm2p256: engine rejected a normalized scalar");

        let point = self
            .point_from_affine(px, py)
            .expect("sm2p256: CombinedMult was called on an invalid point");
        let s2 = self.normalize_scalar(s2);
        let point_term = self
            .engine
            .mul(&point, &s2)
            .expect("sm2p256: engine rejected a normalized scalar");

        // A single conversion back to affine at the end; the affine
        // round-trip costs a field inversion and must not be paid per term.
        self.point_to_affine(&self.engine.add(&point_term, &base_term))
    }
}

/// Writes `value` big-endian into `out`, left-padded with zeroes.
///
/// The caller guarantees that the value fits.
pub(crate) fn fill_bytes(value: &BigInt, out: &mut [u8]) {
    let (_, bytes) = value.to_bytes_be();
    let pad = out.len() - bytes.len();
    out[pad..].copy_from_slice(&bytes);
}
