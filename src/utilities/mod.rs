pub mod matrix;
pub mod numpy_utils;
pub mod statistical;
pub mod validation;
