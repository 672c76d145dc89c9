//! G1 points on y^2 = x^3 + 3 over Fq

use super::field::Fq;
use primitive_types::U256;

/// Curve constant b
const CURVE_B: u64 = 3;

/// Affine G1 point. `(0, 0)` is not on the curve and encodes the point at
/// infinity, matching the precompile wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct G1Point {
    x: Fq,
    y: Fq,
}

impl G1Point {
    /// Point at infinity (group identity)
    pub const INFINITY: G1Point = G1Point {
        x: Fq::ZERO,
        y: Fq::ZERO,
    };

    /// Standard generator (1, 2)
    pub fn generator() -> Self {
        G1Point {
            x: Fq::ONE,
            y: Fq::from_u64(2),
        }
    }

    /// Candidate point from coordinates; not checked against the curve
    pub fn new(x: Fq, y: Fq) -> Self {
        G1Point { x, y }
    }

    /// Parse the 64-byte `x || y` big-endian encoding.
    ///
    /// Returns `None` when a coordinate is not a canonical field element or
    /// the point does not satisfy the curve equation.
    pub fn from_bytes(bytes: &[u8; 64]) -> Option<Self> {
        let mut x = [0u8; 32];
        let mut y = [0u8; 32];
        x.copy_from_slice(&bytes[..32]);
        y.copy_from_slice(&bytes[32..]);
        let point = G1Point::new(Fq::from_be_bytes(&x)?, Fq::from_be_bytes(&y)?);
        point.is_on_curve().then_some(point)
    }

    /// 64-byte `x || y` encoding, each coordinate right-aligned in its half
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.x.to_be_bytes());
        out[32..].copy_from_slice(&self.y.to_be_bytes());
        out
    }

    /// x coordinate
    pub fn x(&self) -> Fq {
        self.x
    }

    /// y coordinate
    pub fn y(&self) -> Fq {
        self.y
    }

    /// Whether this is the point at infinity
    pub fn is_infinity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    /// Curve equation check; the point at infinity is on the curve
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity() {
            return true;
        }
        self.y.square() == self.x.square() * self.x + Fq::from_u64(CURVE_B)
    }

    /// Inverse element (x, -y)
    pub fn negate(&self) -> Self {
        if self.is_infinity() {
            return *self;
        }
        G1Point::new(self.x, -self.y)
    }

    /// Group addition
    pub fn add(&self, other: &G1Point) -> G1Point {
        Jacobian::from_affine(self)
            .add(&Jacobian::from_affine(other))
            .to_affine()
    }

    /// Point doubling
    pub fn double(&self) -> G1Point {
        Jacobian::from_affine(self).double().to_affine()
    }

    /// Scalar multiplication by double-and-add over the full 256-bit scalar
    pub fn multiply(&self, scalar: &U256) -> G1Point {
        let base = Jacobian::from_affine(self);
        let mut acc = Jacobian::INFINITY;
        for i in (0..scalar.bits()).rev() {
            acc = acc.double();
            if scalar.bit(i) {
                acc = acc.add(&base);
            }
        }
        acc.to_affine()
    }
}

/// Jacobian coordinates (X, Y, Z) representing (X/Z^2, Y/Z^3); Z = 0 is infinity
#[derive(Clone, Copy, Debug)]
struct Jacobian {
    x: Fq,
    y: Fq,
    z: Fq,
}

impl Jacobian {
    const INFINITY: Jacobian = Jacobian {
        x: Fq::ONE,
        y: Fq::ONE,
        z: Fq::ZERO,
    };

    fn from_affine(p: &G1Point) -> Self {
        if p.is_infinity() {
            return Self::INFINITY;
        }
        Jacobian {
            x: p.x,
            y: p.y,
            z: Fq::ONE,
        }
    }

    fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    fn to_affine(&self) -> G1Point {
        let z_inv = match self.z.inverse() {
            Some(inv) => inv,
            None => return G1Point::INFINITY,
        };
        let z_inv2 = z_inv.square();
        G1Point::new(self.x * z_inv2, self.y * z_inv2 * z_inv)
    }

    // dbl-2009-l (a = 0)
    fn double(&self) -> Jacobian {
        if self.is_infinity() || self.y.is_zero() {
            return Self::INFINITY;
        }
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let e = a.double() + a;
        let f = e.square();
        let x3 = f - d.double();
        let eight_c = c.double().double().double();
        let y3 = e * (d - x3) - eight_c;
        let z3 = (self.y * self.z).double();
        Jacobian { x: x3, y: y3, z: z3 }
    }

    // add-2007-bl
    fn add(&self, other: &Jacobian) -> Jacobian {
        if self.is_infinity() {
            return *other;
        }
        if other.is_infinity() {
            return *self;
        }
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;

        if u1 == u2 {
            return if s1 == s2 {
                self.double()
            } else {
                Self::INFINITY
            };
        }

        let h = u2 - u1;
        let i = h.double().square();
        let j = h * i;
        let r = (s2 - s1).double();
        let v = u1 * i;
        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + other.z).square() - z1z1 - z2z2) * h;
        Jacobian { x: x3, y: y3, z: z3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bn254::field::GROUP_ORDER;

    fn point_from_hex(x: &str, y: &str) -> G1Point {
        let x = U256::from_str_radix(x, 16).unwrap();
        let y = U256::from_str_radix(y, 16).unwrap();
        G1Point::new(Fq::new(x).unwrap(), Fq::new(y).unwrap())
    }

    fn two_g() -> G1Point {
        point_from_hex(
            "030644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd3",
            "15ed738c0e0a7c92e7845f96b2ae9c0a68a6a449e3538fc7ff3ebf7a5a18a2c4",
        )
    }

    #[test]
    fn test_generator_on_curve() {
        assert!(G1Point::generator().is_on_curve());
        assert!(G1Point::INFINITY.is_on_curve());
    }

    #[test]
    fn test_one_one_not_on_curve() {
        let p = G1Point::new(Fq::ONE, Fq::ONE);
        assert!(!p.is_on_curve());
    }

    #[test]
    fn test_double_generator() {
        let g = G1Point::generator();
        assert_eq!(g.double(), two_g());
        assert_eq!(g.add(&g), two_g());
        assert_eq!(g.multiply(&U256::from(2u8)), two_g());
    }

    #[test]
    fn test_add_inverse_is_infinity() {
        let g = G1Point::generator();
        assert_eq!(g.add(&g.negate()), G1Point::INFINITY);
    }

    #[test]
    fn test_add_identity() {
        let g = G1Point::generator();
        assert_eq!(g.add(&G1Point::INFINITY), g);
        assert_eq!(G1Point::INFINITY.add(&g), g);
    }

    #[test]
    fn test_multiply_by_zero_and_one() {
        let g = G1Point::generator();
        assert_eq!(g.multiply(&U256::zero()), G1Point::INFINITY);
        assert_eq!(g.multiply(&U256::one()), g);
    }

    #[test]
    fn test_multiply_by_group_order() {
        let g = G1Point::generator();
        assert_eq!(g.multiply(&GROUP_ORDER), G1Point::INFINITY);
        assert_eq!(g.multiply(&(GROUP_ORDER + U256::one())), g);
    }

    #[test]
    fn test_multiply_by_nine() {
        let expected = point_from_hex(
            "039730ea8dff1254c0fee9c0ea777d29a9c710b7e616683f194f18c43b43b869",
            "073a5ffcc6fc7a28c30723d6e58ce577356982d65b833a5a5c15bf9024b43d98",
        );
        let product = G1Point::generator().multiply(&U256::from(9u8));
        assert_eq!(product, expected);
        assert!(product.is_on_curve());
    }

    #[test]
    fn test_bytes_roundtrip() {
        let bytes = two_g().to_bytes();
        assert_eq!(G1Point::from_bytes(&bytes), Some(two_g()));
        assert_eq!(G1Point::from_bytes(&[0u8; 64]), Some(G1Point::INFINITY));
    }

    #[test]
    fn test_from_bytes_rejects_off_curve() {
        let mut bytes = [0u8; 64];
        bytes[31] = 1;
        bytes[63] = 1;
        assert_eq!(G1Point::from_bytes(&bytes), None);
    }
}
