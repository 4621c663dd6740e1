use alloc::{format, string::ToString, vec::Vec};
use core::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use crate::{
    error::{AlgebraError, Result},
    storage::IndexedStorage,
};

/// A primitive number type values can be flattened into.
pub trait Primitive: Sized {
    /// Best-effort conversion: integers truncate toward zero and saturate.
    fn from_decimal(value: &BigDecimal) -> Self;

    /// Shortest decimal that converts back to `self`.
    fn to_decimal(&self) -> Result<BigDecimal>;

    /// The exact value of `self`.
    fn to_decimal_exact(&self) -> Result<BigDecimal> {
        self.to_decimal()
    }
}

fn truncate(value: &BigDecimal) -> BigInt {
    value
        .with_scale_round(0, RoundingMode::Down)
        .into_bigint_and_exponent()
        .0
}

macro_rules! impl_primitive_int {
    ($($t:ty => $conv:ident),*) => {
        $(
            impl Primitive for $t {
                fn from_decimal(value: &BigDecimal) -> Self {
                    let int = truncate(value);
                    int.$conv().unwrap_or(if int.is_negative() { <$t>::MIN } else { <$t>::MAX })
                }

                fn to_decimal(&self) -> Result<BigDecimal> {
                    Ok(BigDecimal::from(*self))
                }
            }
        )*
    };
}

impl_primitive_int!(i8 => to_i8, i16 => to_i16, i32 => to_i32, i64 => to_i64);

macro_rules! impl_primitive_float {
    ($($t:ty),*) => {
        $(
            impl Primitive for $t {
                fn from_decimal(value: &BigDecimal) -> Self {
                    value.to_string().parse::<$t>().unwrap_or(if value.is_negative() {
                        <$t>::NEG_INFINITY
                    } else {
                        <$t>::INFINITY
                    })
                }

                fn to_decimal(&self) -> Result<BigDecimal> {
                    if !self.is_finite() {
                        return Err(AlgebraError::invalid(format!("{} is not finite", self)));
                    }
                    BigDecimal::from_str(&self.to_string())
                        .map_err(|e| AlgebraError::parse(&self.to_string(), e.to_string()))
                }

                fn to_decimal_exact(&self) -> Result<BigDecimal> {
                    BigDecimal::try_from(*self)
                        .map_err(|_| AlgebraError::invalid(format!("{} is not finite", self)))
                }
            }
        )*
    };
}

impl_primitive_float!(f32, f64);

impl Primitive for BigInt {
    fn from_decimal(value: &BigDecimal) -> Self {
        truncate(value)
    }

    fn to_decimal(&self) -> Result<BigDecimal> {
        Ok(BigDecimal::from(self.clone()))
    }
}

impl Primitive for BigDecimal {
    fn from_decimal(value: &BigDecimal) -> Self {
        value.clone()
    }

    fn to_decimal(&self) -> Result<BigDecimal> {
        Ok(self.clone())
    }
}

/// Values made of a fixed number of decimal components.
pub trait DecimalComponents {
    /// Number of components of every value.
    const COMPONENTS: usize;

    /// Component `index`, which must be below [`Self::COMPONENTS`].
    fn decimal_component(&self, index: usize) -> &BigDecimal;

    /// Overwrites component `index`.
    fn set_decimal_component(&mut self, index: usize, value: BigDecimal);
}

/// Bulk conversion between values and flat primitive arrays, component by
/// component.
pub trait PrimitiveArrays {
    /// Number of primitives a full conversion produces or consumes.
    fn primitive_len(&self) -> usize;

    /// Every component converted to `P`, in storage order.
    fn get_as<P: Primitive>(&self) -> Vec<P>;

    /// Fails with [`AlgebraError::SizeMismatch`] before any write when
    /// `values.len() != self.primitive_len()`.
    fn set_from<P: Primitive>(&mut self, values: &[P]) -> Result<()>;

    /// Every component as `i8`.
    fn get_as_byte_array(&self) -> Vec<i8> {
        self.get_as()
    }
    /// Every component as `i16`.
    fn get_as_short_array(&self) -> Vec<i16> {
        self.get_as()
    }
    /// Every component as `i32`.
    fn get_as_int_array(&self) -> Vec<i32> {
        self.get_as()
    }
    /// Every component as `i64`.
    fn get_as_long_array(&self) -> Vec<i64> {
        self.get_as()
    }
    /// Every component as `f32`.
    fn get_as_float_array(&self) -> Vec<f32> {
        self.get_as()
    }
    /// Every component as `f64`.
    fn get_as_double_array(&self) -> Vec<f64> {
        self.get_as()
    }
    /// Every component as `BigInt`.
    fn get_as_big_integer_array(&self) -> Vec<BigInt> {
        self.get_as()
    }
    /// Every component as `BigDecimal`.
    fn get_as_big_decimal_array(&self) -> Vec<BigDecimal> {
        self.get_as()
    }

    /// Sets every component from `i8` values.
    fn set_from_bytes(&mut self, values: &[i8]) -> Result<()> {
        self.set_from(values)
    }
    /// Sets every component from `i16` values.
    fn set_from_shorts(&mut self, values: &[i16]) -> Result<()> {
        self.set_from(values)
    }
    /// Sets every component from `i32` values.
    fn set_from_ints(&mut self, values: &[i32]) -> Result<()> {
        self.set_from(values)
    }
    /// Sets every component from `i64` values.
    fn set_from_longs(&mut self, values: &[i64]) -> Result<()> {
        self.set_from(values)
    }
    /// Sets every component from `f32` values.
    fn set_from_floats(&mut self, values: &[f32]) -> Result<()> {
        self.set_from(values)
    }
    /// Sets every component from `f64` values.
    fn set_from_doubles(&mut self, values: &[f64]) -> Result<()> {
        self.set_from(values)
    }
    /// Sets every component from `BigInt` values.
    fn set_from_big_integers(&mut self, values: &[BigInt]) -> Result<()> {
        self.set_from(values)
    }
    /// Sets every component from `BigDecimal` values.
    fn set_from_big_decimals(&mut self, values: &[BigDecimal]) -> Result<()> {
        self.set_from(values)
    }
}

/// [`AlgebraError::SizeMismatch`] unless the lengths agree.
pub fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(AlgebraError::SizeMismatch { expected, actual });
    }
    Ok(())
}

/// Flattens every element of `storage`.
pub fn flatten<V, S, P>(storage: &S) -> Vec<P>
where
    V: DecimalComponents,
    S: IndexedStorage<V>,
    P: Primitive,
{
    let mut out = Vec::with_capacity(storage.size() * V::COMPONENTS);
    for i in 0..storage.size() {
        if let Ok(v) = storage.get(i) {
            out.extend((0..V::COMPONENTS).map(|c| P::from_decimal(v.decimal_component(c))));
        }
    }
    out
}

/// Overwrites every element of `storage` from `values`.
pub fn fill<V, S, P>(storage: &mut S, values: &[P]) -> Result<()>
where
    V: DecimalComponents + Clone,
    S: IndexedStorage<V>,
    P: Primitive,
{
    check_len(storage.size() * V::COMPONENTS, values.len())?;
    let decimals = values
        .iter()
        .map(Primitive::to_decimal)
        .collect::<Result<Vec<_>>>()?;
    let mut decimals = decimals.into_iter();
    for i in 0..storage.size() {
        let mut v = storage.get(i)?.clone();
        for c in 0..V::COMPONENTS {
            if let Some(d) = decimals.next() {
                v.set_decimal_component(c, d);
            }
        }
        storage.set(i, &v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn integers_truncate_and_saturate() {
        assert_eq!(i8::from_decimal(&dec("-3.9")), -3);
        assert_eq!(i8::from_decimal(&dec("1000")), i8::MAX);
        assert_eq!(i16::from_decimal(&dec("-99999")), i16::MIN);
        assert_eq!(BigInt::from_decimal(&dec("12.5")), BigInt::from(12));
    }

    #[test]
    fn floats_round_trip_shortest() -> anyhow::Result<()> {
        assert_eq!(0.1f64.to_decimal()?, dec("0.1"));
        assert_eq!(f64::from_decimal(&dec("0.1")), 0.1);
        assert!(f64::NAN.to_decimal().is_err());
        assert!(0.1f64.to_decimal_exact()? != dec("0.1"));
        Ok(())
    }
}
