pub mod constants;
pub mod surv_analysis;
pub mod utilities;


pub use surv_analysis::km::{
    build_time_table, compute_survival_curve, km_curve, SurvivalCurveOutput, SurvivalPoint,
    TimeTableRow,
};
pub use surv_analysis::logrank::{
    compute_expected_observed, compute_logrank_test, covariance_matrix, ExpectedObserved,
    GroupData, LogRankError, LogRankResult,
};
pub use utilities::validation::ValidationError;

use pyo3::prelude::*;

#[pymodule]
fn kmlogrank(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(surv_analysis::km::survival_curve, m)?)?;
    m.add_function(wrap_pyfunction!(
        surv_analysis::logrank::expected_observed_events,
        m
    )?)?;
    m.add_function(wrap_pyfunction!(surv_analysis::logrank::logrank_test, m)?)?;
    m.add_class::<surv_analysis::km::SurvivalCurveOutput>()?;
    m.add_class::<surv_analysis::logrank::ExpectedObservedOutput>()?;
    m.add_class::<surv_analysis::logrank::LogRankOutput>()?;
    Ok(())
}
