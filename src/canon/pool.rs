//! Ordered registry of distinct variables.
//!
//! The pool is an arena of [`Variable`] handles indexed by first encounter.
//! Membership is decided by [`VarId`], so two variables that happen to share
//! a name occupy two columns.

use std::collections::HashMap;

use crate::expr::{VarId, VarKind, Variable};

/// Column order of a canonical model.
#[derive(Debug, Clone, Default)]
pub struct VariablePool {
    vars: Vec<Variable>,
    index: HashMap<VarId, usize>,
}

impl VariablePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool pre-seeded with `vars` in order; repeated handles are skipped.
    pub fn from_variables<'a>(vars: impl IntoIterator<Item = &'a Variable>) -> Self {
        let mut pool = Self::new();
        for v in vars {
            pool.insert(v);
        }
        pool
    }

    /// Index of `var`, appending it on first sight.
    pub fn insert(&mut self, var: &Variable) -> usize {
        if let Some(&idx) = self.index.get(&var.id()) {
            return idx;
        }
        let idx = self.vars.len();
        self.vars.push(var.clone());
        self.index.insert(var.id(), idx);
        idx
    }

    /// Index of `var` if already registered.
    pub fn index_of(&self, var: &Variable) -> Option<usize> {
        self.index.get(&var.id()).copied()
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.index.contains_key(&var.id())
    }

    pub fn get(&self, idx: usize) -> Option<&Variable> {
        self.vars.get(idx)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    /// Display names, using `x{i}` for unnamed variables.
    pub fn names(&self) -> Vec<String> {
        self.vars
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if v.name().is_empty() {
                    format!("x{i}")
                } else {
                    v.name().to_string()
                }
            })
            .collect()
    }

    pub fn kinds(&self) -> Vec<VarKind> {
        self.vars.iter().map(Variable::kind).collect()
    }

    pub fn bounds(&self) -> Vec<(f64, f64)> {
        self.vars.iter().map(Variable::bounds).collect()
    }

    /// True when every variable sits on `[0, +inf)`.
    pub fn has_default_bounds(&self) -> bool {
        self.vars.iter().all(Variable::has_default_bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{variable, VariableBuilder};

    #[test]
    fn test_insert_is_idempotent() {
        let x = variable("x");
        let y = variable("y");
        let mut pool = VariablePool::new();
        assert_eq!(pool.insert(&x), 0);
        assert_eq!(pool.insert(&y), 1);
        assert_eq!(pool.insert(&x), 0);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_same_name_distinct_columns() {
        let a = variable("x");
        let b = variable("x");
        let pool = VariablePool::from_variables([&a, &b, &a]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.index_of(&b), Some(1));
    }

    #[test]
    fn test_names_fill_unnamed() {
        let a = variable("a");
        let anon = VariableBuilder::new().build();
        let pool = VariablePool::from_variables([&a, &anon]);
        assert_eq!(pool.names(), vec!["a".to_string(), "x1".to_string()]);
    }
}
