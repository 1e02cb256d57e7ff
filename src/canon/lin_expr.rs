//! Dense linear form of an expression.
//!
//! After linearization, an expression is represented as `c' x + k` where the
//! positions of `c` follow a [`VariablePool`](super::VariablePool).

/// A linear expression in dense form: `coefficients . x + constant`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinExpr {
    /// One coefficient per pool variable.
    pub coefficients: Vec<f64>,
    /// Constant term (offset).
    pub constant: f64,
}

impl LinExpr {
    /// All-zero expression over `n` variables.
    pub fn zeros(n: usize) -> Self {
        LinExpr {
            coefficients: vec![0.0; n],
            constant: 0.0,
        }
    }

    /// Constant expression over `n` variables.
    pub fn constant(n: usize, value: f64) -> Self {
        LinExpr {
            coefficients: vec![0.0; n],
            constant: value,
        }
    }

    /// `coeff * x[index] + constant` over `n` variables.
    pub fn term(n: usize, index: usize, coeff: f64, constant: f64) -> Self {
        let mut lin = LinExpr::constant(n.max(index + 1), constant);
        lin.coefficients[index] = coeff;
        lin
    }

    /// Number of coefficient slots.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Check if this is a constant (every coefficient is zero).
    pub fn is_constant(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0.0)
    }

    /// Back-fill with zero coefficients up to `n` slots.
    pub fn pad_to(&mut self, n: usize) {
        if self.coefficients.len() < n {
            self.coefficients.resize(n, 0.0);
        }
    }

    /// Add `coeff` to the coefficient at `index`, growing if needed.
    pub fn add_term(mut self, index: usize, coeff: f64) -> LinExpr {
        self.pad_to(index + 1);
        self.coefficients[index] += coeff;
        self
    }

    /// Add a constant.
    pub fn offset(mut self, value: f64) -> LinExpr {
        self.constant += value;
        self
    }

    /// Elementwise sum; the shorter side is treated as zero-padded.
    pub fn add(mut self, other: &LinExpr) -> LinExpr {
        self.pad_to(other.len());
        for (c, o) in self.coefficients.iter_mut().zip(&other.coefficients) {
            *c += o;
        }
        self.constant += other.constant;
        self
    }

    /// Elementwise difference; the shorter side is treated as zero-padded.
    pub fn sub(mut self, other: &LinExpr) -> LinExpr {
        self.pad_to(other.len());
        for (c, o) in self.coefficients.iter_mut().zip(&other.coefficients) {
            *c -= o;
        }
        self.constant -= other.constant;
        self
    }

    /// Negate a linear expression.
    pub fn neg(self) -> LinExpr {
        self.scale(-1.0)
    }

    /// Scale by a scalar.
    pub fn scale(mut self, scalar: f64) -> LinExpr {
        for c in &mut self.coefficients {
            *c *= scalar;
        }
        self.constant *= scalar;
        self
    }

    /// Value at `x`; missing entries of `x` count as zero.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(x)
            .map(|(c, v)| c * v)
            .sum::<f64>()
            + self.constant
    }
}
