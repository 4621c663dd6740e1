use alloc::format;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use octalg_core::{
    algebra::{
        Additive, Algebra, Conjugate, HighPrecision, Invertible, Multiplicative, Normed, Random,
        Scalable, Tolerance,
    },
    error::{AlgebraError, Result},
    primitive::Primitive,
};
use octalg_decimal::MathContext;
use rand::Rng;
use tracing::trace;

use crate::{
    table,
    value::{COMPONENTS, OctonionValue},
};

/// Operations on [`OctonionValue`] under a [`MathContext`].
///
/// Addition, subtraction, negation and conjugation are exact; every other
/// result is rounded to the context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OctonionAlgebra {
    mc: MathContext,
}

impl OctonionAlgebra {
    /// Octonions under the default decimal context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Octonions rounded under `mc`.
    pub fn with_context(mc: MathContext) -> Self {
        OctonionAlgebra { mc }
    }

    pub(crate) fn round(&self, c: [BigDecimal; COMPONENTS]) -> OctonionValue {
        OctonionValue::from_components(c.map(|x| self.mc.round(x)))
    }

    /// Sum of the squared components.
    pub fn norm_squared(&self, a: &OctonionValue) -> BigDecimal {
        a.iter().map(BigDecimal::square).sum()
    }

    /// The real octonion one.
    pub fn unity_value(&self) -> OctonionValue {
        OctonionValue::real(BigDecimal::one())
    }

    /// `out = π` rounded to the context.
    pub fn pi(&self, out: &mut OctonionValue) {
        *out = OctonionValue::real(self.mc.pi());
    }

    /// `out = e` rounded to the context.
    pub fn e(&self, out: &mut OctonionValue) {
        *out = OctonionValue::real(self.mc.e());
    }

    /// `b = re(a)`.
    pub fn real_part(&self, a: &OctonionValue, b: &mut BigDecimal) {
        b.clone_from(a.r());
    }

    /// `b = a - re(a)`.
    pub fn unreal_part(&self, a: &OctonionValue, b: &mut OctonionValue) {
        *b = a.unreal();
    }

    fn from_decimals(values: &[BigDecimal]) -> Result<OctonionValue> {
        if values.len() > COMPONENTS {
            return Err(AlgebraError::SizeMismatch {
                expected: COMPONENTS,
                actual: values.len(),
            });
        }
        let mut v = OctonionValue::default();
        for (slot, x) in v.components_mut().iter_mut().zip(values) {
            slot.clone_from(x);
        }
        Ok(v)
    }

    /// Octonion from up to eight components, rounded to the context.
    pub fn construct_from_decimals(&self, values: &[BigDecimal]) -> Result<OctonionValue> {
        let v = Self::from_decimals(values)?;
        Ok(self.round(v.components().clone()))
    }

    /// Octonion holding `values` unchanged.
    pub fn construct_exactly_from_decimals(&self, values: &[BigDecimal]) -> Result<OctonionValue> {
        Self::from_decimals(values)
    }

    /// Octonion from the shortest decimal form of each double, rounded to the
    /// context.
    pub fn construct_from_doubles(&self, values: &[f64]) -> Result<OctonionValue> {
        let decimals = values
            .iter()
            .map(Primitive::to_decimal)
            .collect::<Result<alloc::vec::Vec<_>>>()?;
        self.construct_from_decimals(&decimals)
    }

    /// Octonion from the exact binary value of each double.
    pub fn construct_exactly_from_doubles(&self, values: &[f64]) -> Result<OctonionValue> {
        let decimals = values
            .iter()
            .map(Primitive::to_decimal_exact)
            .collect::<Result<alloc::vec::Vec<_>>>()?;
        Self::from_decimals(&decimals)
    }

    /// Octonion from up to eight rational components, each rounded to the context.
    pub fn construct_from_rationals(&self, values: &[BigRational]) -> Result<OctonionValue> {
        let decimals = values
            .iter()
            .map(|q| self.rational_to_decimal(q))
            .collect::<Result<alloc::vec::Vec<_>>>()?;
        Self::from_decimals(&decimals)
    }

    /// Fails with [`AlgebraError::Inexact`] unless every ratio has a
    /// terminating decimal expansion.
    pub fn construct_exactly_from_rationals(&self, values: &[BigRational]) -> Result<OctonionValue> {
        let decimals = values
            .iter()
            .map(exact_rational)
            .collect::<Result<alloc::vec::Vec<_>>>()?;
        Self::from_decimals(&decimals)
    }

    fn rational_to_decimal(&self, q: &BigRational) -> Result<BigDecimal> {
        let n = BigDecimal::from(q.numer().clone());
        let d = BigDecimal::from(q.denom().clone());
        Ok(self.mc.divide(&n, &d)?)
    }

    fn check_tolerance(tol: &BigDecimal) -> Result<()> {
        if tol.is_negative() {
            return Err(AlgebraError::invalid(format!("negative tolerance {tol}")));
        }
        Ok(())
    }
}

/// The terminating decimal equal to `q`, if there is one.
fn exact_rational(q: &BigRational) -> Result<BigDecimal> {
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let mut rest = q.denom().clone();
    let (mut twos, mut fives) = (0u32, 0u32);
    while (&rest % &two).is_zero() {
        rest /= &two;
        twos += 1;
    }
    while (&rest % &five).is_zero() {
        rest /= &five;
        fives += 1;
    }
    if !rest.is_one() {
        return Err(AlgebraError::Inexact(format!("{q}")));
    }
    let scale = twos.max(fives);
    let factor = num_traits::pow(two, (scale - twos) as usize)
        * num_traits::pow(five, (scale - fives) as usize);
    Ok(BigDecimal::new(q.numer() * factor, scale as i64))
}

impl Algebra for OctonionAlgebra {
    type Value = OctonionValue;

    fn type_name(&self) -> &'static str {
        "octonion"
    }

    fn construct(&self) -> OctonionValue {
        OctonionValue::default()
    }

    fn construct_from_str(&self, s: &str) -> Result<OctonionValue> {
        s.parse()
    }

    fn is_equal(&self, a: &OctonionValue, b: &OctonionValue) -> bool {
        a == b
    }

    fn zero(&self, a: &mut OctonionValue) {
        *a = OctonionValue::default();
    }

    fn is_zero(&self, a: &OctonionValue) -> bool {
        a.iter().all(Zero::is_zero)
    }
}

impl Additive for OctonionAlgebra {
    fn add(&self, a: &OctonionValue, b: &OctonionValue, c: &mut OctonionValue) -> Result<()> {
        let sum = core::array::from_fn(|n| &a.components()[n] + &b.components()[n]);
        *c = OctonionValue::from_components(sum);
        Ok(())
    }

    fn subtract(&self, a: &OctonionValue, b: &OctonionValue, c: &mut OctonionValue) -> Result<()> {
        let diff = core::array::from_fn(|n| &a.components()[n] - &b.components()[n]);
        *c = OctonionValue::from_components(diff);
        Ok(())
    }

    fn negate(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        *b = OctonionValue::from_components(a.components().clone().map(|x| -x));
        Ok(())
    }
}

impl Multiplicative for OctonionAlgebra {
    fn multiply(&self, a: &OctonionValue, b: &OctonionValue, c: &mut OctonionValue) -> Result<()> {
        *c = self.round(table::multiply(a, b));
        Ok(())
    }

    fn unity(&self, a: &mut OctonionValue) -> Result<()> {
        *a = self.unity_value();
        Ok(())
    }

    fn is_unity(&self, a: &OctonionValue) -> bool {
        a.r().is_one() && a.is_real()
    }

    /// Integer power; negative exponents go through the inverse. `0^0` is one.
    fn power(&self, n: i32, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let base = if n < 0 {
            let mut inv = OctonionValue::default();
            self.invert(a, &mut inv)?;
            inv
        } else {
            a.clone()
        };
        let mut acc = self.unity_value();
        for _ in 0..n.unsigned_abs() {
            let prev = acc;
            acc = OctonionValue::default();
            self.multiply(&prev, &base, &mut acc)?;
        }
        *b = acc;
        Ok(())
    }
}

impl Invertible for OctonionAlgebra {
    fn invert(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let n2 = self.norm_squared(a);
        if n2.is_zero() {
            return Err(AlgebraError::DegenerateOperand("inverse of zero octonion"));
        }
        let mut conj = OctonionValue::default();
        self.conjugate(a, &mut conj)?;
        let mut inv = OctonionValue::default();
        for (slot, x) in inv.components_mut().iter_mut().zip(conj.iter()) {
            *slot = self.mc.divide(x, &n2)?;
        }
        trace!(%a, %inv, "invert");
        *b = inv;
        Ok(())
    }
}

impl Conjugate for OctonionAlgebra {
    fn conjugate(&self, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        let mut c = a.components().clone().map(|x| -x);
        c[0] = a.r().clone();
        *b = OctonionValue::from_components(c);
        Ok(())
    }
}

impl HighPrecision for OctonionAlgebra {
    fn math_context(&self) -> &MathContext {
        &self.mc
    }
}

impl Normed for OctonionAlgebra {
    fn norm(&self, a: &OctonionValue, out: &mut BigDecimal) -> Result<()> {
        *out = self.mc.sqrt(&self.norm_squared(a))?;
        Ok(())
    }
}

impl Tolerance for OctonionAlgebra {
    fn within(&self, tol: &BigDecimal, a: &OctonionValue, b: &OctonionValue) -> Result<bool> {
        Self::check_tolerance(tol)?;
        Ok(a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= *tol))
    }
}

impl Scalable for OctonionAlgebra {
    type Scalar = OctonionValue;

    /// `b = factor * a`.
    fn scale(&self, factor: &OctonionValue, a: &OctonionValue, b: &mut OctonionValue) -> Result<()> {
        self.multiply(factor, a, b)
    }

    fn scale_by_high_prec(
        &self,
        factor: &BigDecimal,
        a: &OctonionValue,
        b: &mut OctonionValue,
    ) -> Result<()> {
        *b = OctonionValue::from_components(a.components().clone().map(|x| self.mc.round(x * factor)));
        Ok(())
    }

    fn scale_by_rational(
        &self,
        factor: &BigRational,
        a: &OctonionValue,
        b: &mut OctonionValue,
    ) -> Result<()> {
        let n = BigDecimal::from(factor.numer().clone());
        let d = BigDecimal::from(factor.denom().clone());
        let mut out = OctonionValue::default();
        for (slot, x) in out.components_mut().iter_mut().zip(a.iter()) {
            *slot = self.mc.divide(&(x * &n), &d)?;
        }
        *b = out;
        Ok(())
    }
}

impl Random for OctonionAlgebra {
    fn random_using<R: Rng + ?Sized>(&self, rng: &mut R, a: &mut OctonionValue) {
        for slot in a.components_mut().iter_mut() {
            let x: f64 = rng.random();
            *slot = self.mc.round(BigDecimal::try_from(x).unwrap_or_default());
        }
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn oct(c: [i64; 8]) -> OctonionValue {
        OctonionValue::from(c)
    }

    fn random_octonion(alg: &OctonionAlgebra, rng: &mut StdRng) -> OctonionValue {
        let mut v = alg.construct();
        alg.random_using(rng, &mut v);
        v
    }

    #[test]
    fn one_plus_i_times_j() -> anyhow::Result<()> {
        let alg = OctonionAlgebra::new();
        let mut c = alg.construct();
        alg.multiply(&oct([1, 1, 0, 0, 0, 0, 0, 0]), &oct([0, 0, 1, 0, 0, 0, 0, 0]), &mut c)?;
        assert_eq!(c, oct([0, 0, 1, 1, 0, 0, 0, 0]));
        Ok(())
    }

    #[test]
    fn multiplication_is_not_associative() -> anyhow::Result<()> {
        let alg = OctonionAlgebra::new();
        let (i, j, l) = (OctonionValue::basis(1)?, OctonionValue::basis(2)?, OctonionValue::basis(4)?);
        let (mut ij, mut jl, mut left, mut right) =
            (alg.construct(), alg.construct(), alg.construct(), alg.construct());
        alg.multiply(&i, &j, &mut ij)?;
        alg.multiply(&ij, &l, &mut left)?;
        alg.multiply(&j, &l, &mut jl)?;
        alg.multiply(&i, &jl, &mut right)?;
        assert!(alg.is_not_equal(&left, &right));
        assert_eq!(left, OctonionValue::basis(7)?);
        let mut neg = alg.construct();
        alg.negate(&left, &mut neg)?;
        assert_eq!(right, neg);
        Ok(())
    }

    #[test]
    fn group_laws_on_random_values() -> anyhow::Result<()> {
        let alg = OctonionAlgebra::new();
        let mut rng = StdRng::seed_from_u64(7);
        let zero = alg.construct();
        let one = alg.unity_value();
        for _ in 0..20 {
            let a = random_octonion(&alg, &mut rng);
            let mut out = alg.construct();
            alg.add(&a, &zero, &mut out)?;
            assert!(alg.is_equal(&out, &a));
            let mut neg = alg.construct();
            alg.negate(&a, &mut neg)?;
            alg.add(&a, &neg, &mut out)?;
            assert!(alg.is_zero(&out));
            alg.multiply(&a, &one, &mut out)?;
            assert!(alg.is_equal(&out, &a));
            alg.multiply(&one, &a, &mut out)?;
            assert!(alg.is_equal(&out, &a));
        }
        Ok(())
    }

    #[test]
    fn conjugate_and_norm() -> anyhow::Result<()> {
        let alg = OctonionAlgebra::new();
        let mc = *alg.math_context();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let a = random_octonion(&alg, &mut rng);
            let mut conj = alg.construct();
            alg.conjugate(&a, &mut conj)?;
            let mut prod = alg.construct();
            alg.multiply(&a, &conj, &mut prod)?;
            assert!(prod.unreal().iter().all(Zero::is_zero), "{prod}");
            let mut norm = BigDecimal::zero();
            alg.norm(&a, &mut norm)?;
            assert!(mc.approx_eq(&norm.square(), prod.r()));
        }
        Ok(())
    }

    #[test]
    fn inverse_and_division() -> anyhow::Result<()> {
        let alg = OctonionAlgebra::new();
        let a = oct([1, 2, -3, 4, 0, 5, -6, 7]);
        let mut inv = alg.construct();
        alg.invert(&a, &mut inv)?;
        let mut prod = alg.construct();
        alg.multiply(&a, &inv, &mut prod)?;
        let tol = BigDecimal::from_str("1e-45").unwrap();
        assert!(alg.within(&tol, &prod, &alg.unity_value())?);

        let b = oct([2, 0, 0, 0, 0, 0, 0, 0]);
        let mut q = alg.construct();
        alg.divide(&a, &b, &mut q)?;
        assert_eq!(q, alg.construct_from_str("{0.5,1,-1.5,2,0,2.5,-3,3.5}")?);

        assert_eq!(
            alg.invert(&alg.construct(), &mut inv),
            Err(AlgebraError::DegenerateOperand("inverse of zero octonion"))
        );
        Ok(())
    }

    #[test]
    fn powers() -> anyhow::Result<()> {
        let alg = OctonionAlgebra::new();
        let i = OctonionValue::basis(1)?;
        let mut out = alg.construct();
        alg.power(4, &i, &mut out)?;
        assert!(alg.is_unity(&out));
        alg.power(-1, &i, &mut out)?;
        assert_eq!(out, oct([0, -1, 0, 0, 0, 0, 0, 0]));
        alg.power(0, &alg.construct(), &mut out)?;
        assert!(alg.is_unity(&out));
        assert!(alg.power(-2, &alg.construct(), &mut out).is_err());
        Ok(())
    }

    #[test]
    fn scaling() -> anyhow::Result<()> {
        let alg = OctonionAlgebra::new();
        let a = oct([1, 2, 3, 4, 5, 6, 7, 8]);
        let mut out = alg.construct();
        alg.scale_by_two(3, &a, &mut out)?;
        assert_eq!(out, oct([8, 16, 24, 32, 40, 48, 56, 64]));
        alg.scale_by_one_half(1, &a, &mut out)?;
        assert_eq!(out, alg.construct_from_str("{0.5,1,1.5,2,2.5,3,3.5,4}")?);
        let third = BigRational::new(1.into(), 3.into());
        alg.scale_by_rational(&third, &oct([3, 0, 0, 0, 0, 0, 0, 0]), &mut out)?;
        assert!(alg.is_unity(&out));
        alg.scale_by_double(-1.0, &a, &mut out)?;
        let mut neg = alg.construct();
        alg.negate(&a, &mut neg)?;
        assert_eq!(out, neg);
        assert!(alg.scale_by_double(f64::NAN, &a, &mut out).is_err());
        Ok(())
    }

    #[test]
    fn exact_and_lossy_construction() -> anyhow::Result<()> {
        let alg = OctonionAlgebra::new();
        let quarter = BigRational::new(1.into(), 4.into());
        let third = BigRational::new(1.into(), 3.into());
        let exact = alg.construct_exactly_from_rationals(&[quarter.clone()])?;
        assert_eq!(exact.r(), &BigDecimal::from_str("0.25").unwrap());
        assert!(matches!(
            alg.construct_exactly_from_rationals(&[quarter, third.clone()]),
            Err(AlgebraError::Inexact(_))
        ));
        let lossy = alg.construct_from_rationals(&[third])?;
        assert_eq!(lossy.r().digits(), alg.math_context().precision());

        let exact = alg.construct_exactly_from_doubles(&[0.1])?;
        let lossy = alg.construct_from_doubles(&[0.1])?;
        assert_ne!(exact, lossy);
        assert_eq!(lossy.r(), &BigDecimal::from_str("0.1").unwrap());
        assert!(alg.construct_from_doubles(&[0.0; 9]).is_err());
        Ok(())
    }
}
