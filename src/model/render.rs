//! Text form of models.
//!
//! ```text
//! minimize [1, 2]
//! subject to
//!     [1, 1] <= 10
//! all variables >= 0
//! ```
//!
//! [`Objective`] and [`Constraint`] parse back from their own lines.

use std::fmt;
use std::str::FromStr;

use super::program::LinearProgram;
use super::rows::{Constraint, Objective, Relation, Sense};
use crate::error::{LpError, Result};

const INDENT: &str = "    ";

struct Coefficients<'a>(&'a [f64]);

impl fmt::Display for Coefficients<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sense, Coefficients(&self.coefficients))?;
        if self.constant != 0.0 {
            write!(f, " + {}", self.constant)?;
        }
        Ok(())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            Coefficients(&self.coefficients),
            self.relation,
            self.rhs
        )
    }
}

impl fmt::Display for LinearProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            writeln!(f, "name {name}")?;
        }
        writeln!(f, "{}", self.objective())?;
        writeln!(f, "subject to")?;
        for row in self.constraints() {
            writeln!(f, "{INDENT}{row}")?;
        }
        match self.bounds() {
            None => write!(f, "all variables >= 0"),
            Some(bounds) => {
                write!(f, "bounds")?;
                for (b, name) in bounds.iter().zip(self.variable_names()) {
                    write!(f, "\n{INDENT}{} <= {name} <= {}", b.lower, b.upper)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Objective {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (sense, rest) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| LpError::InvalidSense(s.to_string()))?;
        let sense: Sense = sense.parse()?;
        let (list, tail) = split_list(rest)?;
        let constant = match tail.trim() {
            "" => 0.0,
            t => match t.strip_prefix('+') {
                Some(v) => parse_number(v)?,
                None => return Err(LpError::InvalidNumber(t.to_string())),
            },
        };
        Ok(Objective::new(list, sense).with_constant(constant))
    }
}

impl FromStr for Constraint {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self> {
        let (coefficients, tail) = split_list(s.trim())?;
        let tail = tail.trim();
        let (relation, rhs) = tail
            .split_once(char::is_whitespace)
            .ok_or_else(|| LpError::InvalidRelation(tail.to_string()))?;
        let relation: Relation = relation.parse()?;
        Ok(Constraint::new(coefficients, relation, parse_number(rhs)?))
    }
}

/// Split `"[a, b, c] rest"` into the parsed list and `rest`.
fn split_list(s: &str) -> Result<(Vec<f64>, &str)> {
    let s = s.trim_start();
    let inner = s
        .strip_prefix('[')
        .ok_or_else(|| LpError::InvalidNumber(s.to_string()))?;
    let (list, rest) = inner
        .split_once(']')
        .ok_or_else(|| LpError::InvalidNumber(s.to_string()))?;
    let values = if list.trim().is_empty() {
        Vec::new()
    } else {
        list.split(',').map(parse_number).collect::<Result<_>>()?
    };
    Ok((values, rest))
}

fn parse_number(s: &str) -> Result<f64> {
    let s = s.trim();
    s.parse::<f64>()
        .map_err(|_| LpError::InvalidNumber(s.to_string()))
}
