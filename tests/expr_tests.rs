//! Expression construction, rendering and linearization properties.

use lpcanon::prelude::*;

const TOL: f64 = 1e-12;

// ============================================================================
// Degree
// ============================================================================

#[test]
fn test_product_of_variables_rejected() {
    let x = variable("x");
    let y = variable("y");
    let err = mul(&x, &y).unwrap_err();
    assert!(matches!(err, LpError::NonLinearExpression { .. }));
    assert_eq!(err.code(), "EXPR_NON_LINEAR");
    // the message carries the would-be subtree
    assert!(err.to_string().contains("x * y"), "{}", err);
}

#[test]
fn test_product_of_composites_rejected() {
    let x = variable("x");
    let y = variable("y");
    let err = ((&x + 1.0) * (&y - 1.0)).unwrap_err();
    assert!(err.to_string().contains("(x + 1) * (y - 1)"), "{}", err);
}

#[test]
fn test_scaling_stays_linear() {
    let x = variable("x");
    let e = mul(3.0, &x + 1.0).unwrap();
    assert_eq!(e.degree(), 1);
    let e = mul(&x - 2.0, constant(4.0) - 1.0).unwrap();
    assert_eq!(e.degree(), 1);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_rendering() {
    let x = variable("x");
    let y = variable("y");
    assert_eq!((5.0 - &x).to_string(), "5 - x");
    assert_eq!((&x - (&y - 2.0)).to_string(), "x - (y - 2)");
    assert_eq!((3.0 * &x + &y).to_string(), "3 * x + y");
    assert_eq!(mul(&x + 1.0, 2.0).unwrap().to_string(), "(x + 1) * 2");
    assert_eq!(Expr::from(0.5).to_string(), "0.5");
}

// ============================================================================
// Linearization
// ============================================================================

#[test]
fn test_linearize_example() {
    let x = variable("x");
    let y = variable("y");
    let mut pool = VariablePool::new();
    let lin = linearize(&(3.0 * &x - (&y - 2.0)), &mut pool).unwrap();
    assert_eq!(lin.coefficients, vec![3.0, -1.0]);
    assert_eq!(lin.constant, 2.0);
}

#[test]
fn test_pool_order_is_first_encounter() {
    let a = variable("a");
    let b = variable("b");
    let c = variable("c");
    let mut pool = VariablePool::new();
    linearize(&(&c + &a), &mut pool).unwrap();
    linearize(&(&b - &c), &mut pool).unwrap();
    assert_eq!(pool.variables(), &[c, a, b]);
}

#[test]
fn test_length_matches_pool() {
    let vars: Vec<Variable> = (0..6).map(|i| variable(format!("v{i}"))).collect();
    let mut pool = VariablePool::new();
    for v in &vars {
        let lin = linearize(&(v + 1.0), &mut pool).unwrap();
        assert_eq!(lin.len(), pool.len());
    }
    assert_eq!(pool.len(), 6);
}

#[test]
fn test_evaluation_agrees_with_linear_form() {
    let x = variable("x");
    let y = variable("y");
    let z = variable("z");
    let exprs = vec![
        2.0 * &x - 3.0 * (&y + &z) + 1.5,
        sum([&x, &y, &z]) - (&x - 4.0),
        dot(&[1.0, -2.0, 0.5], &[x.clone(), y.clone(), z.clone()]),
        neg(&x - &y) * 2.0 + mul(constant(2.0) - 5.0, &z).unwrap(),
        -(&z) - (-(&x)),
    ];
    let points = [[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [-4.5, 0.25, 10.0]];

    for e in &exprs {
        let mut pool = VariablePool::from_variables([&x, &y, &z]);
        let lin = linearize(e, &mut pool).unwrap();
        for p in &points {
            let direct = e.evaluate(|v| {
                let idx = pool.index_of(v).unwrap();
                p[idx]
            });
            assert!(
                (direct - lin.evaluate(p)).abs() < TOL,
                "{e}: {direct} != {}",
                lin.evaluate(p)
            );
        }
    }
}

#[test]
fn test_same_name_is_not_same_variable() {
    let a = variable("x");
    let b = variable("x");
    let mut pool = VariablePool::new();
    let lin = linearize(&(&a + &b), &mut pool).unwrap();
    assert_eq!(lin.coefficients, vec![1.0, 1.0]);
}
