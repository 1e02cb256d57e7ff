//! Solver exit status.

use std::fmt;

/// Exit status of a solver run, with stable integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Optimal solution found.
    Success,
    MemoryAllocError,
    /// Input preconditions not met.
    CondUnsatisfied,
    ExceedIterLimit,
    /// Singular basis or factorization.
    Singularity,
    OverDetermination,
    Unboundedness,
    Infeasibility,
    Degeneracy,
    /// Numerical precision lost.
    PrecisionError,
}

impl SolveStatus {
    pub const ALL: [SolveStatus; 10] = [
        SolveStatus::Success,
        SolveStatus::MemoryAllocError,
        SolveStatus::CondUnsatisfied,
        SolveStatus::ExceedIterLimit,
        SolveStatus::Singularity,
        SolveStatus::OverDetermination,
        SolveStatus::Unboundedness,
        SolveStatus::Infeasibility,
        SolveStatus::Degeneracy,
        SolveStatus::PrecisionError,
    ];

    pub fn code(self) -> i32 {
        match self {
            SolveStatus::Success => 0,
            SolveStatus::MemoryAllocError => 1,
            SolveStatus::CondUnsatisfied => 2,
            SolveStatus::ExceedIterLimit => 3,
            SolveStatus::Singularity => 4,
            SolveStatus::OverDetermination => 5,
            SolveStatus::Unboundedness => 6,
            SolveStatus::Infeasibility => 7,
            SolveStatus::Degeneracy => 8,
            SolveStatus::PrecisionError => 9,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Success => "Success",
            SolveStatus::MemoryAllocError => "MemoryAllocError",
            SolveStatus::CondUnsatisfied => "CondUnsatisfied",
            SolveStatus::ExceedIterLimit => "ExceedIterLimit",
            SolveStatus::Singularity => "Singularity",
            SolveStatus::OverDetermination => "OverDetermination",
            SolveStatus::Unboundedness => "Unboundedness",
            SolveStatus::Infeasibility => "Infeasibility",
            SolveStatus::Degeneracy => "Degeneracy",
            SolveStatus::PrecisionError => "PrecisionError",
        }
    }

    pub fn is_success(self) -> bool {
        self == SolveStatus::Success
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for (i, status) in SolveStatus::ALL.iter().enumerate() {
            assert_eq!(status.code(), i as i32);
            assert_eq!(SolveStatus::from_code(i as i32), Some(*status));
        }
        assert_eq!(SolveStatus::from_code(10), None);
        assert_eq!(SolveStatus::from_code(-1), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(SolveStatus::ExceedIterLimit.to_string(), "ExceedIterLimit");
        assert!(SolveStatus::Success.is_success());
    }
}
