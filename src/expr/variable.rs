//! Variable creation with builder pattern.
//!
//! A [`Variable`] is a cheap handle (`Arc`) to an immutable record. Two
//! handles denote the same unknown only if they share a [`VarId`]; names are
//! for display and never take part in equality.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unique identifier for variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(u64);

impl VarId {
    /// Generate a new unique ID.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        VarId(NEXT_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for VarId {
    fn default() -> Self {
        Self::new()
    }
}

/// Domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VarKind {
    #[default]
    Real,
    Integer,
    Binary,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Real => "real",
            VarKind::Integer => "integer",
            VarKind::Binary => "binary",
        }
    }

    pub fn is_discrete(self) -> bool {
        !matches!(self, VarKind::Real)
    }

    /// Default `(lower, upper)` bounds for a variable of this kind.
    pub fn default_bounds(self) -> (f64, f64) {
        match self {
            VarKind::Real | VarKind::Integer => (0.0, f64::INFINITY),
            VarKind::Binary => (0.0, 1.0),
        }
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct VariableData {
    id: VarId,
    name: String,
    kind: VarKind,
    lower: f64,
    upper: f64,
    value: f64,
}

/// A scalar decision variable.
#[derive(Clone)]
pub struct Variable(Arc<VariableData>);

impl Variable {
    /// Create a real variable with default bounds `[0, +inf)`.
    pub fn new(name: impl Into<String>) -> Self {
        VariableBuilder::new().name(name).build()
    }

    pub fn id(&self) -> VarId {
        self.0.id
    }

    /// Name given at creation; may be empty.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> VarKind {
        self.0.kind
    }

    pub fn lower(&self) -> f64 {
        self.0.lower
    }

    pub fn upper(&self) -> f64 {
        self.0.upper
    }

    /// `(lower, upper)` pair.
    pub fn bounds(&self) -> (f64, f64) {
        (self.0.lower, self.0.upper)
    }

    /// Default value, used by [`Expr::value`](crate::expr::Expr::value).
    pub fn value(&self) -> f64 {
        self.0.value
    }

    /// True when the bounds are the canonical `[0, +inf)`.
    pub fn has_default_bounds(&self) -> bool {
        self.0.lower == 0.0 && self.0.upper == f64::INFINITY
    }

    /// Check whether two handles refer to the same variable.
    pub fn same_as(&self, other: &Variable) -> bool {
        self.id() == other.id()
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("id", &self.0.id.raw())
            .field("name", &self.0.name)
            .field("kind", &self.0.kind)
            .field("lower", &self.0.lower)
            .field("upper", &self.0.upper)
            .finish()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.name.is_empty() {
            f.write_str("var")
        } else {
            f.write_str(&self.0.name)
        }
    }
}

/// Builder for creating variables with various attributes.
#[derive(Debug, Default)]
pub struct VariableBuilder {
    name: String,
    kind: VarKind,
    lower: Option<f64>,
    upper: Option<f64>,
    value: f64,
}

impl VariableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name of the variable.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(mut self, kind: VarKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn integer(self) -> Self {
        self.kind(VarKind::Integer)
    }

    pub fn binary(self) -> Self {
        self.kind(VarKind::Binary)
    }

    pub fn lower(mut self, lower: f64) -> Self {
        self.lower = Some(lower);
        self
    }

    pub fn upper(mut self, upper: f64) -> Self {
        self.upper = Some(upper);
        self
    }

    pub fn bounds(self, lower: f64, upper: f64) -> Self {
        self.lower(lower).upper(upper)
    }

    /// Remove both bounds: `(-inf, +inf)`.
    pub fn free(self) -> Self {
        self.bounds(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Default value used when evaluating expressions.
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Build the variable. Unset bounds fall back to the kind's defaults.
    pub fn build(self) -> Variable {
        let (lower, upper) = self.kind.default_bounds();
        Variable(Arc::new(VariableData {
            id: VarId::new(),
            name: self.name,
            kind: self.kind,
            lower: self.lower.unwrap_or(lower),
            upper: self.upper.unwrap_or(upper),
            value: self.value,
        }))
    }
}

/// Create a real variable with bounds `[0, +inf)`.
pub fn variable(name: impl Into<String>) -> Variable {
    VariableBuilder::new().name(name).build()
}

/// Create an unbounded real variable.
pub fn free_variable(name: impl Into<String>) -> Variable {
    VariableBuilder::new().name(name).free().build()
}

/// Create an integer variable with bounds `[0, +inf)`.
pub fn integer_variable(name: impl Into<String>) -> Variable {
    VariableBuilder::new().name(name).integer().build()
}

/// Create a binary variable with bounds `[0, 1]`.
pub fn binary_variable(name: impl Into<String>) -> Variable {
    VariableBuilder::new().name(name).binary().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_builder() {
        let x = VariableBuilder::new()
            .name("x")
            .integer()
            .bounds(-1.0, 4.0)
            .value(2.0)
            .build();

        assert_eq!(x.name(), "x");
        assert_eq!(x.kind(), VarKind::Integer);
        assert_eq!(x.bounds(), (-1.0, 4.0));
        assert_eq!(x.value(), 2.0);
        assert!(!x.has_default_bounds());
    }

    #[test]
    fn test_kind_defaults() {
        assert_eq!(variable("x").bounds(), (0.0, f64::INFINITY));
        assert_eq!(binary_variable("b").bounds(), (0.0, 1.0));
        assert_eq!(
            free_variable("f").bounds(),
            (f64::NEG_INFINITY, f64::INFINITY)
        );
    }

    #[test]
    fn test_identity_not_name() {
        let a = variable("x");
        let b = variable("x");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_display_unnamed() {
        assert_eq!(VariableBuilder::new().build().to_string(), "var");
        assert_eq!(variable("y").to_string(), "y");
    }
}
