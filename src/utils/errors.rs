#[macro_export]
macro_rules! log_or_err {
    ($state:expr, $level:expr, $err:expr $(,)?) => {{
        if $level <= $state.fail_level {
            return Err($err);
        } else {
            match $level {
                ::log::Level::Error => ::log::error!("{}", $err),
                ::log::Level::Warn => ::log::warn!("{}", $err),
                ::log::Level::Info => ::log::info!("{}", $err),
                ::log::Level::Debug => ::log::debug!("{}", $err),
                ::log::Level::Trace => ::log::trace!("{}", $err),
            }
        }
    }};
}

#[derive(thiserror::Error, Debug)]
pub enum ShapeError {
    #[error("code array must have at least one dimension")]
    ZeroDimensional,

    #[error("axis {axis} of shape {shape:?} has zero length")]
    EmptyAxis { axis: usize, shape: Vec<usize> },

    #[error("linear index {index} out of bounds for shape {shape:?} ({size} elements)")]
    IndexOutOfBounds {
        index: usize,
        size: usize,
        shape: Vec<usize>,
    },

    #[error("coordinate rank {got} does not match shape rank {expected}")]
    RankMismatch { got: usize, expected: usize },

    #[error("coordinate {coord:?} out of bounds on axis {axis} for shape {shape:?}")]
    CoordinateOutOfBounds {
        coord: Vec<usize>,
        axis: usize,
        shape: Vec<usize>,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum DefinitionError {
    #[error("duplicate flag name {0:?}")]
    DuplicateName(String),

    #[error("flag {0:?} has bit value 0 and can never match")]
    ZeroBit(String),

    #[error("flag {name:?} value {value:#X} sets {bits} bits, matching is ambiguous")]
    NotSingleBit { name: String, value: u64, bits: u32 },

    #[error("flags {first:?} and {second:?} share bits {overlap:#X}")]
    SharedBits {
        first: String,
        second: String,
        overlap: u64,
    },
}
