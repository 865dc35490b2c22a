//! Adapter exposing the SM2 (sm2p256v1) elliptic curve through a generic
//! big-integer curve abstraction.
//!
//! Group arithmetic itself — field operations, point addition and doubling
//! formulas, scalar multiplication — is delegated to an opaque,
//! constant-time point engine behind the [`PointEngine`] capability trait.
//! The default [`Sm2Engine`] backend is the `sm2` crate's complete-formula
//! projective arithmetic; any backend implementing the trait (software,
//! hardware-accelerated, formally verified) can be substituted via
//! [`Sm2Curve::with_engine`] without touching this layer.
//!
//! What this crate owns is the boundary:
//!
//! - the `(0, 0)` sentinel for the point at infinity, which has no true
//!   affine representation;
//! - SEC1 tag-prefixed point encodings (infinity, uncompressed,
//!   compressed);
//! - canonicalization of arbitrary-length scalars to the byte width of the
//!   curve order;
//! - the split between trusted operations (arithmetic on
//!   previously-validated points, which panics on a contract violation) and
//!   untrusted parsers (`unmarshal`, `unmarshal_compressed`,
//!   `is_on_curve`, which report invalid input as `None`/`false`).
//!
//! Curve parameters are fixed, publicly known constants held in a
//! process-wide registry that is lazily initialized exactly once; see
//! [`CurveParams::sm2p256`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

mod curve;
mod encoding;
mod engine;
mod params;

pub use crate::{
    curve::{sm2p256, CombinedMult, Curve, Sm2Curve},
    engine::{PointEngine, Sm2Engine},
    params::CurveParams,
};
