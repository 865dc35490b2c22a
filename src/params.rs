//! Domain parameters of the sm2p256v1 curve.
//!
//! Parameter values can be found in [draft-shen-sm2-ecdsa Appendix D]:
//! Recommended Parameters.
//!
//! [draft-shen-sm2-ecdsa Appendix D]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#appendix-D

use num_bigint::BigInt;
use once_cell::sync::Lazy;

/// Prime modulus of the base field, serialized as hexadecimal.
const P_HEX: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF";

/// Order of the elliptic curve group (i.e. scalar modulus), serialized as
/// hexadecimal.
const N_HEX: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123";

/// Coefficient `b` in the curve equation `y² = x³ - 3x + b`, serialized as
/// hexadecimal.
const B_HEX: &str = "28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93";

/// Base point x-coordinate, serialized as hexadecimal.
const GX_HEX: &str = "32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7";

/// Base point y-coordinate, serialized as hexadecimal.
const GY_HEX: &str = "BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0";

/// Process-wide parameter singleton, built exactly once on first access and
/// immutable afterwards.
static SM2P256_PARAMS: Lazy<CurveParams> = Lazy::new(|| CurveParams {
    name: "sm2p256v1",
    bit_size: 256,
    p: bigint_from_hex(P_HEX),
    n: bigint_from_hex(N_HEX),
    b: bigint_from_hex(B_HEX),
    gx: bigint_from_hex(GX_HEX),
    gy: bigint_from_hex(GY_HEX),
});

/// Domain parameters of a short Weierstrass curve over a prime field.
///
/// All values are fixed, publicly known constants for a given curve
/// identity; none of them is a secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParams {
    name: &'static str,
    bit_size: usize,
    p: BigInt,
    n: BigInt,
    b: BigInt,
    gx: BigInt,
    gy: BigInt,
}

impl CurveParams {
    /// Returns the sm2p256v1 parameter set, initializing it on first call.
    ///
    /// Initialization runs exactly once even under concurrent first-time
    /// callers; every caller observes the fully constructed value.
    pub fn sm2p256() -> &'static Self {
        &SM2P256_PARAMS
    }

    /// Canonical name of the curve.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Size of the base field in bits.
    pub fn bit_size(&self) -> usize {
        self.bit_size
    }

    /// Prime modulus of the base field.
    pub fn p(&self) -> &BigInt {
        &self.p
    }

    /// Order of the elliptic curve group.
    pub fn n(&self) -> &BigInt {
        &self.n
    }

    /// Coefficient `b` in the curve equation `y² = x³ - 3x + b`.
    pub fn b(&self) -> &BigInt {
        &self.b
    }

    /// Base point x-coordinate.
    pub fn gx(&self) -> &BigInt {
        &self.gx
    }

    /// Base point y-coordinate.
    pub fn gy(&self) -> &BigInt {
        &self.gy
    }

    /// Width in bytes of a serialized field element.
    pub fn byte_len(&self) -> usize {
        (self.bit_size + 7) / 8
    }

    /// Width in bytes of a canonical scalar, i.e. `ceil(bitlen(n) / 8)`.
    pub fn scalar_len(&self) -> usize {
        (self.n.bits() as usize + 7) / 8
    }
}

/// Parses a fixed hexadecimal literal.
///
/// Parameter literals are compiled-in constants; a parse failure is an
/// unrecoverable internal error, not a runtime condition.
fn bigint_from_hex(hex: &str) -> BigInt {
    BigInt::parse_bytes(hex.as_bytes(), 16)
        .expect("sm2p256: internal error: invalid parameter encoding")
}
