//! Affine atoms and operator overloading.
//!
//! Addition and subtraction of two linear expressions is always linear, and so
//! is multiplication by a literal; those operators return [`Expr`] directly.
//! Multiplying two expressions may raise the degree, so `*` between
//! expressions (and the free function [`mul`]) return a [`Result`].
//!
//! Operand order is kept as written: `5.0 - &x` is the node `5 - x`.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::Result;
use crate::expr::{zero, BinaryExpr, BinaryOp, Expr, Variable};

// ============================================================================
// Free functions
// ============================================================================

/// `a + b`. Literals are wrapped as constants.
pub fn add(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::Binary(BinaryExpr::sum(BinaryOp::Add, a.into(), b.into()))
}

/// `a - b`. Literals are wrapped as constants.
pub fn sub(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::Binary(BinaryExpr::sum(BinaryOp::Sub, a.into(), b.into()))
}

/// `a * b`, failing when both sides are non-constant.
pub fn mul(a: impl Into<Expr>, b: impl Into<Expr>) -> Result<Expr> {
    Expr::binary(BinaryOp::Mul, a.into(), b.into())
}

/// `c * e`.
pub fn scale(c: f64, e: impl Into<Expr>) -> Expr {
    Expr::Binary(BinaryExpr::scaled(Expr::Constant(c), e.into()))
}

/// `-1 * e`.
pub fn neg(e: impl Into<Expr>) -> Expr {
    scale(-1.0, e)
}

/// Sum of any number of terms; the empty sum is the constant `0`.
pub fn sum<I, T>(terms: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    let mut iter = terms.into_iter();
    let Some(first) = iter.next() else {
        return zero();
    };
    iter.fold(first.into(), |acc, term| add(acc, term))
}

/// Linear combination `sum_i coeffs[i] * vars[i]`.
///
/// Pairs are taken up to the shorter of the two slices.
pub fn dot(coeffs: &[f64], vars: &[Variable]) -> Expr {
    sum(coeffs.iter().zip(vars).map(|(&c, v)| scale(c, v)))
}

// ============================================================================
// Operator overloading
// ============================================================================

macro_rules! impl_linear_ops {
    ($lhs:ty => $($rhs:ty),+) => {$(
        impl Add<$rhs> for $lhs {
            type Output = Expr;

            fn add(self, rhs: $rhs) -> Expr {
                add(self, rhs)
            }
        }

        impl Sub<$rhs> for $lhs {
            type Output = Expr;

            fn sub(self, rhs: $rhs) -> Expr {
                sub(self, rhs)
            }
        }
    )+};
}

impl_linear_ops!(Expr => Expr, &Expr, Variable, &Variable, f64);
impl_linear_ops!(&Expr => Expr, &Expr, Variable, &Variable, f64);
impl_linear_ops!(Variable => Expr, &Expr, Variable, &Variable, f64);
impl_linear_ops!(&Variable => Expr, &Expr, Variable, &Variable, f64);
impl_linear_ops!(f64 => Expr, &Expr, Variable, &Variable);

macro_rules! impl_product_ops {
    ($lhs:ty => $($rhs:ty),+) => {$(
        impl Mul<$rhs> for $lhs {
            type Output = Result<Expr>;

            fn mul(self, rhs: $rhs) -> Result<Expr> {
                mul(self, rhs)
            }
        }
    )+};
}

impl_product_ops!(Expr => Expr, &Expr, Variable, &Variable);
impl_product_ops!(&Expr => Expr, &Expr, Variable, &Variable);
impl_product_ops!(Variable => Expr, &Expr, Variable, &Variable);
impl_product_ops!(&Variable => Expr, &Expr, Variable, &Variable);

macro_rules! impl_scalar_ops {
    ($($operand:ty),+) => {$(
        impl Mul<f64> for $operand {
            type Output = Expr;

            fn mul(self, rhs: f64) -> Expr {
                Expr::Binary(BinaryExpr::scaled(self.into(), Expr::Constant(rhs)))
            }
        }

        impl Mul<$operand> for f64 {
            type Output = Expr;

            fn mul(self, rhs: $operand) -> Expr {
                scale(self, rhs)
            }
        }

        impl Neg for $operand {
            type Output = Expr;

            fn neg(self) -> Expr {
                neg(self)
            }
        }
    )+};
}

impl_scalar_ops!(Expr, &Expr, Variable, &Variable);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LpError;
    use crate::expr::variable;

    #[test]
    fn test_add_keeps_degree() {
        let x = variable("x");
        let y = variable("y");
        let z = &x + &y;
        assert_eq!(z.degree(), 1);
        assert_eq!(z.to_string(), "x + y");
    }

    #[test]
    fn test_reversed_sub_keeps_order() {
        let x = variable("x");
        let z = 5.0 - &x;
        assert_eq!(z.to_string(), "5 - x");
    }

    #[test]
    fn test_scalar_mul_order() {
        let x = variable("x");
        assert_eq!((2.0 * &x).to_string(), "2 * x");
        assert_eq!((&x * 2.0).to_string(), "x * 2");
    }

    #[test]
    fn test_neg() {
        let x = variable("x");
        assert_eq!((-&x).to_string(), "-1 * x");
    }

    #[test]
    fn test_mul_by_constant_expr_is_ok() {
        let x = variable("x");
        let two = Expr::from(2.0);
        let z = (&two * &x).expect("constant times variable is linear");
        assert_eq!(z.degree(), 1);
    }

    #[test]
    fn test_mul_nonlinear_rejected() {
        let x = variable("x");
        let y = variable("y");
        assert!(matches!(
            &x * &x,
            Err(LpError::NonLinearExpression { .. })
        ));

        let err = ((&x + 1.0) * (&y + 1.0)).unwrap_err();
        match err {
            LpError::NonLinearExpression { expr } => assert_eq!(expr, "(x + 1) * (y + 1)"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sum_and_dot() {
        let x = variable("x");
        let y = variable("y");
        assert_eq!(sum(Vec::<Expr>::new()).constant_value(), Some(0.0));
        assert_eq!(dot(&[], &[x.clone()]).constant_value(), Some(0.0));
        let e = dot(&[1.0, 2.0], &[x, y]);
        assert_eq!(e.to_string(), "1 * x + 2 * y");
    }
}
