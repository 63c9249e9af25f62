use std::{error::Error, fmt};

use crate::initialization::RandErr;

/// The kernel's result type.
pub type Result<T> = std::result::Result<T, KernelErr>;

/// Kernel failures.
///
/// Every variant except `WorkerPanicked` is detected before any worker starts.
#[derive(Debug)]
pub enum KernelErr {
    UnsupportedThreadCount(usize),
    EmptyVector,
    NoIterations,
    Allocation {
        what: &'static str,
        len: usize,
    },
    LengthMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidDistribution(RandErr),
    WorkerPanicked {
        worker: usize,
    },
}

impl fmt::Display for KernelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelErr::UnsupportedThreadCount(n) => {
                write!(f, "unsupported thread count {n}, expected one of 1, 2, 4 or 8")
            }
            KernelErr::EmptyVector => f.write_str("vector size must be greater than zero"),
            KernelErr::NoIterations => f.write_str("max iterations must be greater than zero"),
            KernelErr::Allocation { what, len } => {
                write!(f, "failed to allocate {len} elements for {what}")
            }
            KernelErr::LengthMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "length mismatch for {what}: got {got}, expected {expected}"
            ),
            KernelErr::InvalidDistribution(e) => write!(f, "invalid distribution: {e}"),
            KernelErr::WorkerPanicked { worker } => write!(f, "worker {worker} panicked"),
        }
    }
}

impl Error for KernelErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KernelErr::InvalidDistribution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RandErr> for KernelErr {
    fn from(value: RandErr) -> Self {
        Self::InvalidDistribution(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_thread_count_message() {
        let err = KernelErr::UnsupportedThreadCount(3);
        assert_eq!(
            err.to_string(),
            "unsupported thread count 3, expected one of 1, 2, 4 or 8"
        );
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = KernelErr::LengthMismatch {
            what: "Y",
            got: 2,
            expected: 3,
        };
        assert_eq!(err.to_string(), "length mismatch for Y: got 2, expected 3");
        assert!(err.source().is_none());
    }
}
