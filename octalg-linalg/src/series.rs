//! Matrix transcendentals by truncated Taylor series.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use octalg_core::{
    algebra::{
        Additive, Algebra, Exponential, Hyperbolic, Invertible, Multiplicative, Scalable,
        Trigonometric,
    },
    error::Result,
};
use tracing::debug;

use crate::matrix::{MatrixAlgebra, MatrixMember};

fn factorial(n: usize) -> BigInt {
    (1..=n).fold(BigInt::one(), |acc, k| acc * BigInt::from(k))
}

fn inverse_factorial(n: usize, negative: bool) -> BigRational {
    let q = BigRational::new(BigInt::one(), factorial(n));
    if negative { -q } else { q }
}

impl<S: Additive + Multiplicative + Scalable> MatrixAlgebra<S> {
    /// `Σ coefficient(n) * a^n` over the first `terms` powers with a
    /// coefficient; powers are built by right multiplication.
    fn power_series<F>(
        &self,
        a: &MatrixMember<S::Value>,
        terms: usize,
        mut coefficient: F,
    ) -> Result<MatrixMember<S::Value>>
    where
        F: FnMut(usize) -> Option<BigRational>,
    {
        self.require_square(a, "power series")?;
        debug!(terms, dim = a.rows(), "taylor series");
        let mut sum = self.like(a, a.rows(), a.cols());
        let mut power = a.clone();
        self.unity(&mut power)?;
        let mut term = self.construct();
        let (mut taken, mut n) = (0, 0);
        while taken < terms {
            if let Some(c) = coefficient(n) {
                self.scale_by_rational(&c, &power, &mut term)?;
                self.add_assign(&mut sum, &term)?;
                taken += 1;
            }
            n += 1;
            if taken < terms {
                self.multiply_assign(&mut power, a)?;
            }
        }
        Ok(sum)
    }
}

impl<S: Additive + Multiplicative + Scalable> Exponential for MatrixAlgebra<S> {
    fn exp(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        *b = self.power_series(a, self.taylor_terms().exp, |n| {
            Some(inverse_factorial(n, false))
        })?;
        Ok(())
    }

    /// `log(a) = log(I + X)` with `X = a - I`; accurate only for `a` near `I`.
    fn log(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        let mut x = a.clone();
        self.unity(&mut x)?;
        let identity = x.clone();
        self.subtract(a, &identity, &mut x)?;
        *b = self.power_series(&x, self.taylor_terms().log, |n| {
            (n > 0).then(|| {
                let q = BigRational::new(BigInt::one(), BigInt::from(n));
                if n % 2 == 0 { -q } else { q }
            })
        })?;
        Ok(())
    }
}

impl<S: Additive + Invertible + Scalable> Trigonometric for MatrixAlgebra<S> {
    fn sin(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        *b = self.power_series(a, self.taylor_terms().sin, |n| {
            (n % 2 == 1).then(|| inverse_factorial(n, n % 4 == 3))
        })?;
        Ok(())
    }

    fn cos(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        *b = self.power_series(a, self.taylor_terms().cos, |n| {
            (n % 2 == 0).then(|| inverse_factorial(n, n % 4 == 2))
        })?;
        Ok(())
    }

    /// `sin(a) * cos(a)^-1`.
    fn tan(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        let (mut s, mut c) = (self.construct(), self.construct());
        self.sin(a, &mut s)?;
        self.cos(a, &mut c)?;
        self.divide(&s, &c, b)
    }
}

impl<S: Additive + Invertible + Scalable> Hyperbolic for MatrixAlgebra<S> {
    fn sinh(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        *b = self.power_series(a, self.taylor_terms().sinh, |n| {
            (n % 2 == 1).then(|| inverse_factorial(n, false))
        })?;
        Ok(())
    }

    fn cosh(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        *b = self.power_series(a, self.taylor_terms().cosh, |n| {
            (n % 2 == 0).then(|| inverse_factorial(n, false))
        })?;
        Ok(())
    }

    fn tanh(&self, a: &Self::Value, b: &mut Self::Value) -> Result<()> {
        let (mut s, mut c) = (self.construct(), self.construct());
        self.sinh(a, &mut s)?;
        self.cosh(a, &mut c)?;
        self.divide(&s, &c, b)
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use bigdecimal::BigDecimal;
    use octalg_core::algebra::Tolerance;
    use octalg_octonion::{OctonionAlgebra, OctonionValue};

    use super::*;
    use crate::config::TaylorTerms;

    type Matrix = MatrixMember<OctonionValue>;

    fn alg() -> MatrixAlgebra<OctonionAlgebra> {
        MatrixAlgebra::new(OctonionAlgebra::new())
    }

    fn matrix(s: &str) -> Matrix {
        alg().construct_from_str(s).unwrap()
    }

    fn tol(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn exp_of_zero_and_diagonal() -> anyhow::Result<()> {
        let alg = alg();
        let mut out = alg.construct();
        alg.exp(&matrix("[[0,0][0,0]]"), &mut out)?;
        assert!(alg.is_unity(&out));

        alg.exp(&matrix("[[1,0][0,0]]"), &mut out)?;
        let mut e = OctonionValue::default();
        alg.scalar().e(&mut e);
        let expected = alg.construct_from_rows(alloc::vec![
            alloc::vec![e, OctonionValue::default()],
            alloc::vec![OctonionValue::default(), "1".parse()?],
        ])?;
        assert!(alg.within(&tol("1e-35"), &out, &expected)?);
        assert!(alg.exp(&matrix("[[1,2]]"), &mut out).is_err());
        Ok(())
    }

    #[test]
    fn log_inverts_exp_near_identity() -> anyhow::Result<()> {
        let alg = alg();
        let x = matrix("[[0.001,0.002][-0.001,0.003]]");
        let (mut e, mut back) = (alg.construct(), alg.construct());
        alg.exp(&x, &mut e)?;
        alg.log(&e, &mut back)?;
        assert!(alg.within(&tol("1e-20"), &x, &back)?);

        let mut zero = alg.construct();
        alg.log(&matrix("[[1,0][0,1]]"), &mut zero)?;
        assert!(alg.is_zero(&zero));
        Ok(())
    }

    #[test]
    fn trigonometric_and_hyperbolic_identities() -> anyhow::Result<()> {
        let alg = alg();
        let a = matrix("[[0.3,{0,0.2}][0.1,-0.4]]");
        let (mut s, mut c, mut s2, mut c2, mut sum) = (
            alg.construct(),
            alg.construct(),
            alg.construct(),
            alg.construct(),
            alg.construct(),
        );
        alg.sin(&a, &mut s)?;
        alg.cos(&a, &mut c)?;
        alg.multiply(&s, &s, &mut s2)?;
        alg.multiply(&c, &c, &mut c2)?;
        alg.add(&s2, &c2, &mut sum)?;
        let mut id = sum.clone();
        alg.unity(&mut id)?;
        assert!(alg.within(&tol("1e-30"), &sum, &id)?);

        alg.sinh(&a, &mut s)?;
        alg.cosh(&a, &mut c)?;
        alg.multiply(&s, &s, &mut s2)?;
        alg.multiply(&c, &c, &mut c2)?;
        alg.subtract(&c2, &s2, &mut sum)?;
        assert!(alg.within(&tol("1e-30"), &sum, &id)?);

        let mut t = alg.construct();
        alg.tan(&a, &mut t)?;
        let mut tc = alg.construct();
        alg.sin(&a, &mut s)?;
        alg.cos(&a, &mut c)?;
        alg.multiply(&t, &c, &mut tc)?;
        assert!(alg.within(&tol("1e-30"), &tc, &s)?);
        Ok(())
    }

    #[test]
    fn term_counts_are_configurable() -> anyhow::Result<()> {
        let short = alg().with_taylor_terms(TaylorTerms {
            exp: 2,
            ..TaylorTerms::default()
        });
        let mut out = short.construct();
        short.exp(&matrix("[[1]]"), &mut out)?;
        // 1 + x
        assert_eq!(out, matrix("[[2]]"));
        assert_eq!(alg().taylor_terms().exp, 35);
        Ok(())
    }
}
