//! BOUNDS section entries.

use std::fmt;

use crate::expr::VarKind;

/// Bound type of a BOUNDS line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundType {
    /// Lower bound.
    Lo,
    /// Upper bound.
    Up,
    /// Fixed value.
    Fx,
    /// Free variable.
    Fr,
    /// Lower bound `-inf`.
    Mi,
    /// Upper bound `+inf`.
    Pl,
    /// Binary variable.
    Bv,
    /// Integer lower bound.
    Li,
    /// Integer upper bound.
    Ui,
    /// Semi-continuous upper bound.
    Sc,
}

impl BoundType {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "LO" => BoundType::Lo,
            "UP" => BoundType::Up,
            "FX" => BoundType::Fx,
            "FR" => BoundType::Fr,
            "MI" => BoundType::Mi,
            "PL" => BoundType::Pl,
            "BV" => BoundType::Bv,
            "LI" => BoundType::Li,
            "UI" => BoundType::Ui,
            "SC" => BoundType::Sc,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoundType::Lo => "LO",
            BoundType::Up => "UP",
            BoundType::Fx => "FX",
            BoundType::Fr => "FR",
            BoundType::Mi => "MI",
            BoundType::Pl => "PL",
            BoundType::Bv => "BV",
            BoundType::Li => "LI",
            BoundType::Ui => "UI",
            BoundType::Sc => "SC",
        }
    }

    /// Whether the line must carry a value field.
    pub fn needs_value(self) -> bool {
        matches!(
            self,
            BoundType::Lo | BoundType::Up | BoundType::Fx | BoundType::Li | BoundType::Ui
        )
    }

    /// Apply this bound to `(lower, upper)` and `kind`.
    ///
    /// `value` is `None` only for types that do not need one.
    pub fn apply(self, value: Option<f64>, bound: &mut (f64, f64), kind: &mut VarKind) {
        let v = value.unwrap_or(0.0);
        match self {
            BoundType::Lo => bound.0 = v,
            BoundType::Up => {
                if v < 0.0 && bound.0 == 0.0 {
                    bound.0 = f64::NEG_INFINITY;
                }
                bound.1 = v;
            }
            BoundType::Fx => *bound = (v, v),
            BoundType::Fr => *bound = (f64::NEG_INFINITY, f64::INFINITY),
            BoundType::Mi => bound.0 = f64::NEG_INFINITY,
            BoundType::Pl => bound.1 = f64::INFINITY,
            BoundType::Bv => {
                *bound = (0.0, 1.0);
                *kind = VarKind::Binary;
            }
            BoundType::Li => {
                bound.0 = v;
                *kind = VarKind::Integer;
            }
            BoundType::Ui => {
                bound.1 = v;
                *kind = VarKind::Integer;
            }
            BoundType::Sc => bound.1 = value.unwrap_or(f64::INFINITY),
        }
    }
}

impl fmt::Display for BoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(ty: BoundType, value: Option<f64>) -> ((f64, f64), VarKind) {
        let mut bound = (0.0, f64::INFINITY);
        let mut kind = VarKind::Real;
        ty.apply(value, &mut bound, &mut kind);
        (bound, kind)
    }

    #[test]
    fn test_bound_table() {
        let inf = f64::INFINITY;
        assert_eq!(applied(BoundType::Lo, Some(2.0)).0, (2.0, inf));
        assert_eq!(applied(BoundType::Up, Some(4.0)).0, (0.0, 4.0));
        assert_eq!(applied(BoundType::Up, Some(-4.0)).0, (-inf, -4.0));
        assert_eq!(applied(BoundType::Fx, Some(3.0)).0, (3.0, 3.0));
        assert_eq!(applied(BoundType::Fr, None).0, (-inf, inf));
        assert_eq!(applied(BoundType::Mi, None).0, (-inf, inf));
        assert_eq!(applied(BoundType::Pl, None).0, (0.0, inf));
        assert_eq!(applied(BoundType::Bv, None), ((0.0, 1.0), VarKind::Binary));
        assert_eq!(applied(BoundType::Li, Some(1.0)), ((1.0, inf), VarKind::Integer));
        assert_eq!(applied(BoundType::Ui, Some(9.0)), ((0.0, 9.0), VarKind::Integer));
        assert_eq!(applied(BoundType::Sc, Some(5.0)).0, (0.0, 5.0));
        assert_eq!(applied(BoundType::Sc, None).0, (0.0, inf));
    }

    #[test]
    fn test_parse_names() {
        for name in ["LO", "UP", "FX", "FR", "MI", "PL", "BV", "LI", "UI", "SC"] {
            assert_eq!(BoundType::parse(name).map(BoundType::as_str), Some(name));
        }
        assert_eq!(BoundType::parse("XX"), None);
    }
}
