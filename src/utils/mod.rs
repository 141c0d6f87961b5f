//! Shared numeric helpers.

mod matrix;

pub use matrix::{
    add_constant, append_columns, center_columns, center_vector, col_mean, col_variance,
    detect_constant_columns,
};
