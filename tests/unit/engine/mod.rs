//! Engine boundary tests

mod mode;
