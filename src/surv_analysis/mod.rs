pub mod km;
pub mod logrank;
