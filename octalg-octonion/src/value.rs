use alloc::{string::ToString, vec::Vec};
use core::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use num_traits::Zero;
use octalg_core::{
    error::{AlgebraError, Result},
    primitive::{DecimalComponents, Primitive, PrimitiveArrays, check_len},
};

/// Number of components of an octonion.
pub const COMPONENTS: usize = 8;

/// Basis names in component order.
pub const BASIS: [&str; COMPONENTS] = ["1", "i", "j", "k", "l", "i0", "j0", "k0"];

/// An octonion `r + i·i + j·j + k·k + l·l + i0·i0 + j0·j0 + k0·k0` with
/// arbitrary-precision decimal components.
///
/// Equality and hashing compare component values, so `1.0` equals `1.00`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OctonionValue {
    c: [BigDecimal; COMPONENTS],
}

macro_rules! component_accessors {
    ($($idx:literal => $get:ident, $set:ident);* $(;)?) => {
        $(
            #[doc = concat!("Component ", stringify!($idx), ".")]
            pub fn $get(&self) -> &BigDecimal {
                &self.c[$idx]
            }

            #[doc = concat!("Overwrites component ", stringify!($idx), ".")]
            pub fn $set(&mut self, value: BigDecimal) {
                self.c[$idx] = value;
            }
        )*
    };
}

impl OctonionValue {
    /// Octonion with components in basis order.
    pub fn from_components(c: [BigDecimal; COMPONENTS]) -> Self {
        OctonionValue { c }
    }

    /// The real octonion `r`.
    pub fn real(r: BigDecimal) -> Self {
        let mut v = Self::default();
        v.c[0] = r;
        v
    }

    /// The basis element with index `n`, e.g. `basis(1)` is `i`.
    pub fn basis(n: usize) -> Result<Self> {
        let mut v = Self::default();
        v.set_component(n, BigDecimal::from(1))?;
        Ok(v)
    }

    component_accessors! {
        0 => r, set_r;
        1 => i, set_i;
        2 => j, set_j;
        3 => k, set_k;
        4 => l, set_l;
        5 => i0, set_i0;
        6 => j0, set_j0;
        7 => k0, set_k0;
    }

    /// All components in basis order.
    pub fn components(&self) -> &[BigDecimal; COMPONENTS] {
        &self.c
    }

    pub(crate) fn components_mut(&mut self) -> &mut [BigDecimal; COMPONENTS] {
        &mut self.c
    }

    /// Component `n`.
    pub fn component(&self, n: usize) -> Result<&BigDecimal> {
        self.c
            .get(n)
            .ok_or_else(|| AlgebraError::out_of_bounds(n, COMPONENTS))
    }

    /// Overwrites component `n`.
    pub fn set_component(&mut self, n: usize, value: BigDecimal) -> Result<()> {
        let slot = self
            .c
            .get_mut(n)
            .ok_or_else(|| AlgebraError::out_of_bounds(n, COMPONENTS))?;
        *slot = value;
        Ok(())
    }

    /// Component `n`, or zero past the last component. Negative indices are
    /// rejected.
    pub fn component_or_zero(&self, n: isize) -> Result<BigDecimal> {
        if n < 0 {
            return Err(AlgebraError::IndexOutOfBounds {
                index: n,
                bound: COMPONENTS,
            });
        }
        Ok(self.c.get(n as usize).cloned().unwrap_or_else(BigDecimal::zero))
    }

    /// Components in basis order.
    pub fn iter(&self) -> core::slice::Iter<'_, BigDecimal> {
        self.c.iter()
    }

    /// The octonion with its real component cleared.
    pub fn unreal(&self) -> Self {
        let mut v = self.clone();
        v.c[0] = BigDecimal::zero();
        v
    }

    /// Whether every imaginary component is zero.
    pub fn is_real(&self) -> bool {
        self.c[1..].iter().all(Zero::is_zero)
    }
}

impl From<[i64; COMPONENTS]> for OctonionValue {
    fn from(values: [i64; COMPONENTS]) -> Self {
        OctonionValue {
            c: values.map(BigDecimal::from),
        }
    }
}

impl From<BigDecimal> for OctonionValue {
    fn from(r: BigDecimal) -> Self {
        Self::real(r)
    }
}

impl fmt::Display for OctonionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (n, c) in self.c.iter().enumerate() {
            if n > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", c)?;
        }
        f.write_str("}")
    }
}

/// Parses `{r,i,j,k,l,i0,j0,k0}`.
///
/// Fewer than eight components leave the rest zero; a bare decimal is a real
/// octonion.
impl FromStr for OctonionValue {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = match trimmed.strip_prefix('{') {
            Some(rest) => rest
                .strip_suffix('}')
                .ok_or_else(|| AlgebraError::parse(s, "missing '}'"))?,
            None => trimmed,
        };
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() > COMPONENTS {
            return Err(AlgebraError::parse(s, "more than eight components"));
        }
        let mut v = OctonionValue::default();
        for (n, part) in parts.iter().enumerate() {
            v.c[n] = BigDecimal::from_str(part)
                .map_err(|e| AlgebraError::parse(s, e.to_string()))?;
        }
        Ok(v)
    }
}

impl DecimalComponents for OctonionValue {
    const COMPONENTS: usize = COMPONENTS;

    fn decimal_component(&self, index: usize) -> &BigDecimal {
        &self.c[index % COMPONENTS]
    }

    fn set_decimal_component(&mut self, index: usize, value: BigDecimal) {
        self.c[index % COMPONENTS] = value;
    }
}

impl PrimitiveArrays for OctonionValue {
    fn primitive_len(&self) -> usize {
        COMPONENTS
    }

    fn get_as<P: Primitive>(&self) -> Vec<P> {
        self.c.iter().map(P::from_decimal).collect()
    }

    fn set_from<P: Primitive>(&mut self, values: &[P]) -> Result<()> {
        check_len(COMPONENTS, values.len())?;
        let decimals = values
            .iter()
            .map(Primitive::to_decimal)
            .collect::<Result<Vec<_>>>()?;
        for (slot, d) in self.c.iter_mut().zip(decimals) {
            *slot = d;
        }
        Ok(())
    }
}
