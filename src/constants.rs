pub const GAMMA_EPSILON: f64 = 1e-12;
pub const CF_FLOOR: f64 = 1e-30;
pub const MAX_GAMMA_ITER: usize = 200;
pub const PIVOT_TOLERANCE: f64 = 1e-12;
pub const STAT_ROUNDOFF_TOL: f64 = 1e-9;

#[cfg(test)]
pub const TEST_STRICT_TOL: f64 = 1e-6;

#[cfg(test)]
pub const TEST_PVALUE_TOL: f64 = 1e-5;
