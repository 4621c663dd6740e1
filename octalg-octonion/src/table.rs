//! Structure constants of the octonion product.

use bigdecimal::BigDecimal;

use crate::value::{COMPONENTS, OctonionValue};

/// `PRODUCT[row][col] = (sign, basis)`: `e_row * e_col = sign * e_basis`, with
/// basis order `1, i, j, k, l, i0, j0, k0`.
pub const PRODUCT: [[(i8, usize); COMPONENTS]; COMPONENTS] = [
    [(1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (1, 6), (1, 7)],
    [(1, 1), (-1, 0), (1, 3), (-1, 2), (1, 5), (-1, 4), (-1, 7), (1, 6)],
    [(1, 2), (-1, 3), (-1, 0), (1, 1), (1, 6), (1, 7), (-1, 4), (-1, 5)],
    [(1, 3), (1, 2), (-1, 1), (-1, 0), (1, 7), (-1, 6), (1, 5), (-1, 4)],
    [(1, 4), (-1, 5), (-1, 6), (-1, 7), (-1, 0), (1, 1), (1, 2), (1, 3)],
    [(1, 5), (1, 4), (-1, 7), (1, 6), (-1, 1), (-1, 0), (-1, 3), (1, 2)],
    [(1, 6), (1, 7), (1, 4), (-1, 5), (-1, 2), (1, 3), (-1, 0), (-1, 1)],
    [(1, 7), (-1, 6), (1, 5), (1, 4), (-1, 3), (-1, 2), (1, 1), (-1, 0)],
];

/// Unrounded product `a * b`.
pub fn multiply(a: &OctonionValue, b: &OctonionValue) -> [BigDecimal; COMPONENTS] {
    let mut acc: [BigDecimal; COMPONENTS] = Default::default();
    for (row, x) in a.components().iter().enumerate() {
        if num_traits::Zero::is_zero(x) {
            continue;
        }
        for (col, y) in b.components().iter().enumerate() {
            let (sign, basis) = PRODUCT[row][col];
            let term = x * y;
            if sign > 0 {
                acc[basis] += term;
            } else {
                acc[basis] -= term;
            }
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(n: usize) -> OctonionValue {
        OctonionValue::basis(n).unwrap()
    }

    fn product(a: &OctonionValue, b: &OctonionValue) -> OctonionValue {
        OctonionValue::from_components(multiply(a, b))
    }

    #[test]
    fn imaginary_units_square_to_minus_one() {
        let minus_one = OctonionValue::from([-1, 0, 0, 0, 0, 0, 0, 0]);
        for n in 1..COMPONENTS {
            assert_eq!(product(&e(n), &e(n)), minus_one, "e{n}");
        }
    }

    #[test]
    fn units_anticommute() {
        for a in 1..COMPONENTS {
            for b in 1..COMPONENTS {
                if a == b {
                    continue;
                }
                let (s1, b1) = PRODUCT[a][b];
                let (s2, b2) = PRODUCT[b][a];
                assert_eq!(b1, b2);
                assert_eq!(s1, -s2, "e{a} e{b}");
            }
        }
    }

    #[test]
    fn every_row_is_a_signed_permutation() {
        for row in PRODUCT {
            let mut seen = [false; COMPONENTS];
            for (_, basis) in row {
                assert!(!seen[basis]);
                seen[basis] = true;
            }
        }
    }
}
