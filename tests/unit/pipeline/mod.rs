//! Pipeline tests

mod mask;
