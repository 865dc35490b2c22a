//! SEC1-style point encodings: producers and the untrusted parsing surface.
//!
//! Three wire shapes exist: a single zero byte for the point at infinity,
//! `0x04 ‖ x ‖ y` uncompressed, and `0x02`/`0x03 ‖ x` compressed, where the
//! tag carries the parity of `y` and each coordinate occupies the curve's
//! full byte width, big-endian.
//!
//! `unmarshal` and `unmarshal_compressed` are the only operations that treat
//! their input as untrusted: they return `None` on any malformed or
//! off-curve input and never panic.

use num_bigint::{BigInt, Sign};
use num_traits::Zero;

use crate::curve::{fill_bytes, Sm2Curve};
use crate::engine::PointEngine;

/// Tag byte of an uncompressed point encoding.
pub(crate) const TAG_UNCOMPRESSED: u8 = 0x04;

/// Tag byte of a compressed point encoding with even `y`.
pub(crate) const TAG_COMPRESSED_EVEN: u8 = 0x02;

/// Tag byte of a compressed point encoding with odd `y`.
pub(crate) const TAG_COMPRESSED_ODD: u8 = 0x03;

impl<E: PointEngine> Sm2Curve<E> {
    /// Encodes a point in uncompressed form, or as the single zero byte for
    /// `(0, 0)`, the conventional point at infinity.
    ///
    /// # Panics
    ///
    /// If the input is not a valid point on the curve.
    pub fn marshal(&self, x: &BigInt, y: &BigInt) -> Vec<u8> {
        let point = self
            .point_from_affine(x, y)
            .expect("sm2p256: Marshal was called on an invalid point");
        self.engine.encode(&point)
    }

    /// Encodes a point in compressed form, or as the single zero byte for
    /// `(0, 0)`, the conventional point at infinity.
    ///
    /// # Panics
    ///
    /// If the input is not a valid point on the curve.
    pub fn marshal_compressed(&self, x: &BigInt, y: &BigInt) -> Vec<u8> {
        if self.point_from_affine(x, y).is_err() {
            panic!("sm2p256: MarshalCompressed was called on an invalid point");
        }
        if x.is_zero() && y.is_zero() {
            return vec![0];
        }

        let byte_len = self.params.byte_len();
        let mut out = vec![0u8; 1 + byte_len];
        out[0] = if y.bit(0) {
            TAG_COMPRESSED_ODD
        } else {
            TAG_COMPRESSED_EVEN
        };
        fill_bytes(x, &mut out[1..]);
        out
    }

    /// Decodes an uncompressed point encoding.
    ///
    /// Returns `None` if the input is empty, is not tagged uncompressed, or
    /// does not encode a valid point on the curve.
    pub fn unmarshal(&self, data: &[u8]) -> Option<(BigInt, BigInt)> {
        if data.is_empty() || data[0] != TAG_UNCOMPRESSED {
            return None;
        }
        // The engine's decoder checks the length and curve membership.
        self.engine.decode(data)?;

        // Both coordinates are already present in the validated input, so
        // skip point_to_affine: the conversion out of the engine's internal
        // coordinates costs a field inversion we have no need to pay.
        let byte_len = self.params.byte_len();
        let x = BigInt::from_bytes_be(Sign::Plus, &data[1..1 + byte_len]);
        let y = BigInt::from_bytes_be(Sign::Plus, &data[1 + byte_len..]);
        Some((x, y))
    }

    /// Decodes a compressed point encoding, recovering `y` from the tag's
    /// parity bit.
    ///
    /// Returns `None` if the input is empty, is not tagged compressed, or
    /// does not encode a valid point on the curve.
    pub fn unmarshal_compressed(&self, data: &[u8]) -> Option<(BigInt, BigInt)> {
        if data.is_empty() || (data[0] != TAG_COMPRESSED_EVEN && data[0] != TAG_COMPRESSED_ODD) {
            return None;
        }
        let point = self.engine.decode(data)?;
        // Unlike unmarshal, the affine conversion is unavoidable here: the
        // input only carries x, and the recovered point lives in the
        // engine's internal coordinates.
        Some(self.point_to_affine(&point))
    }
}
