use crate::surv_analysis::km::{
    build_time_table, km_curve, SurvivalCurveOutput, SurvivalPoint, TimeTableRow,
};
use crate::utilities::matrix;
use crate::utilities::numpy_utils::{extract_vec_f64, extract_vec_i32};
use crate::utilities::statistical::chi2_sf;
use crate::utilities::validation::{
    validate_length, validate_no_nan, validate_non_empty, validate_non_negative, ValidationError,
};
use crate::constants::STAT_ROUNDOFF_TOL;
use ndarray::{s, Array1, Array2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct GroupData {
    pub time: Vec<f64>,
    pub status: Vec<i32>,
}

impl GroupData {
    pub fn new(time: Vec<f64>, status: Vec<i32>) -> Self {
        GroupData { time, status }
    }
}

// One group's event counts relative to a reference curve. `aligned_rows`
// holds, per reference event point, the first own-table row at or after that
// time; reference points past the group's follow-up are skipped, so the rows
// form a prefix aligned with the reference sequence.
#[derive(Debug, Clone)]
pub struct ExpectedObserved {
    pub expected: f64,
    pub observed: usize,
    pub aligned_rows: Vec<TimeTableRow>,
}

impl ExpectedObserved {
    pub fn aligned_len(&self) -> usize {
        self.aligned_rows.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRankResult {
    pub dof: usize,
    pub statistic: Option<f64>,
    pub p_value: f64,
    pub observed: Vec<usize>,
    pub expected: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogRankError {
    Invalid(ValidationError),
    SingularCovariance { dof: usize },
}

impl fmt::Display for LogRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogRankError::Invalid(err) => err.fmt(f),
            LogRankError::SingularCovariance { dof } => write!(
                f,
                "log-rank covariance matrix is singular ({} degrees of freedom); \
                 the data carry no usable variance",
                dof
            ),
        }
    }
}

impl std::error::Error for LogRankError {}

impl From<ValidationError> for LogRankError {
    fn from(err: ValidationError) -> Self {
        LogRankError::Invalid(err)
    }
}

impl From<LogRankError> for PyErr {
    fn from(err: LogRankError) -> PyErr {
        match err {
            LogRankError::Invalid(err) => err.into(),
            singular => PyValueError::new_err(singular.to_string()),
        }
    }
}

pub fn compute_expected_observed(
    reference: &[SurvivalPoint],
    time: &[f64],
    status: &[i32],
) -> Result<ExpectedObserved, ValidationError> {
    validate_length(time.len(), status.len(), "status")?;
    validate_no_nan(time, "time")?;
    validate_non_negative(time, "time")?;
    let table = build_time_table(time, status);
    let mut expected = 0.0;
    let mut aligned_rows = Vec::new();
    for point in reference.iter().filter(|p| p.is_event) {
        let Some(rate) = point.rate else { continue };
        let idx = table.partition_point(|row| row.time < point.time);
        if let Some(row) = table.get(idx) {
            expected += row.n_risk as f64 * rate;
            aligned_rows.push(*row);
        }
    }
    let observed = status.iter().filter(|&&s| s > 0).count();
    Ok(ExpectedObserved {
        expected,
        observed,
        aligned_rows,
    })
}

// Multivariate hypergeometric covariance of per-group event counts, summed
// over the reference event points both groups still have data for.
pub fn covariance_matrix(reference: &[SurvivalPoint], tables: &[ExpectedObserved]) -> Array2<f64> {
    let k = tables.len();
    let mut vv = Array2::<f64>::zeros((k, k));
    for i in 0..k {
        for j in i..k {
            let shared = tables[i]
                .aligned_len()
                .min(tables[j].aligned_len())
                .min(reference.len());
            let mut sum = 0.0;
            for t in 0..shared {
                let pooled_risk = reference[t].n_risk;
                if pooled_risk == 1 {
                    // a single pooled subject at risk carries no variance
                    continue;
                }
                let big_n = pooled_risk as f64;
                let deaths = reference[t].n_event as f64;
                let ki = tables[i].aligned_rows[t].n_risk as f64;
                let denom = big_n * big_n * (big_n - 1.0);
                if i == j {
                    sum += deaths * ki * (big_n - ki) * (big_n - deaths) / denom;
                } else {
                    let kj = tables[j].aligned_rows[t].n_risk as f64;
                    sum -= deaths * ki * kj * (big_n - deaths) / denom;
                }
            }
            vv[[i, j]] = sum;
            vv[[j, i]] = sum;
        }
    }
    vv
}

pub fn compute_logrank_test(groups: &[GroupData]) -> Result<LogRankResult, LogRankError> {
    validate_non_empty(groups, "groups")?;
    for group in groups {
        validate_length(group.time.len(), group.status.len(), "status")?;
        validate_no_nan(&group.time, "time")?;
        validate_non_negative(&group.time, "time")?;
    }
    let pooled_time: Vec<f64> = groups.iter().flat_map(|g| g.time.iter().copied()).collect();
    let pooled_status: Vec<i32> = groups
        .iter()
        .flat_map(|g| g.status.iter().copied())
        .collect();
    // null-hypothesis curve: pooled Kaplan-Meier restricted to event points
    let reference: Vec<SurvivalPoint> = km_curve(&build_time_table(&pooled_time, &pooled_status))
        .into_iter()
        .filter(|p| p.is_event)
        .collect();
    let mut tables = Vec::new();
    for group in groups {
        let result = compute_expected_observed(&reference, &group.time, &group.status)?;
        // a group with zero expected events contributes no information
        if result.expected > 0.0 {
            tables.push(result);
        }
    }
    let observed: Vec<usize> = tables.iter().map(|r| r.observed).collect();
    let expected: Vec<f64> = tables.iter().map(|r| r.expected).collect();
    if tables.len() < 2 {
        return Ok(LogRankResult {
            dof: 0,
            statistic: None,
            p_value: 1.0,
            observed,
            expected,
        });
    }
    let dof = tables.len() - 1;
    let vv = covariance_matrix(&reference, &tables);
    // the O-E vector sums to zero across groups, so one group is redundant;
    // drop the first (the p-value is invariant to which index goes)
    let diff: Array1<f64> = tables
        .iter()
        .skip(1)
        .map(|r| r.observed as f64 - r.expected)
        .collect();
    let reduced = vv.slice(s![1.., 1..]).to_owned();
    let inverse =
        matrix::invert(&reduced).ok_or(LogRankError::SingularCovariance { dof })?;
    let statistic = matrix::quadratic_form(&diff, &inverse);
    if !statistic.is_finite() || statistic < -STAT_ROUNDOFF_TOL {
        return Err(LogRankError::SingularCovariance { dof });
    }
    let statistic = statistic.max(0.0);
    Ok(LogRankResult {
        dof,
        statistic: Some(statistic),
        p_value: chi2_sf(statistic, dof),
        observed,
        expected,
    })
}

#[derive(Debug, Clone)]
#[pyclass]
pub struct ExpectedObservedOutput {
    #[pyo3(get)]
    pub expected: f64,
    #[pyo3(get)]
    pub observed: usize,
    #[pyo3(get)]
    pub aligned_times: Vec<f64>,
    #[pyo3(get)]
    pub aligned_n_risk: Vec<usize>,
    #[pyo3(get)]
    pub aligned_count: usize,
}

#[derive(Debug, Clone)]
#[pyclass]
pub struct LogRankOutput {
    #[pyo3(get)]
    pub dof: usize,
    #[pyo3(get)]
    pub statistic: Option<f64>,
    #[pyo3(get)]
    pub p_value: f64,
    #[pyo3(get)]
    pub observed: Vec<usize>,
    #[pyo3(get)]
    pub expected: Vec<f64>,
}

#[pyfunction]
pub fn expected_observed_events(
    reference: PyRef<'_, SurvivalCurveOutput>,
    time: &Bound<'_, PyAny>,
    status: &Bound<'_, PyAny>,
) -> PyResult<ExpectedObservedOutput> {
    let time = extract_vec_f64(time)?;
    let status = extract_vec_i32(status)?;
    let points = reference.to_points();
    let result = compute_expected_observed(&points, &time, &status)?;
    Ok(ExpectedObservedOutput {
        expected: result.expected,
        observed: result.observed,
        aligned_times: result.aligned_rows.iter().map(|r| r.time).collect(),
        aligned_n_risk: result.aligned_rows.iter().map(|r| r.n_risk).collect(),
        aligned_count: result.aligned_len(),
    })
}

#[pyfunction]
pub fn logrank_test(
    time: &Bound<'_, PyAny>,
    status: &Bound<'_, PyAny>,
    group: &Bound<'_, PyAny>,
) -> PyResult<LogRankOutput> {
    let time = extract_vec_f64(time)?;
    let status = extract_vec_i32(status)?;
    let group = extract_vec_i32(group)?;
    validate_length(time.len(), status.len(), "status")?;
    validate_length(time.len(), group.len(), "group")?;
    // partition by cohort label, first-appearance order
    let mut labels: Vec<i32> = Vec::new();
    let mut groups: Vec<GroupData> = Vec::new();
    for i in 0..time.len() {
        let idx = match labels.iter().position(|&l| l == group[i]) {
            Some(idx) => idx,
            None => {
                labels.push(group[i]);
                groups.push(GroupData::default());
                labels.len() - 1
            }
        };
        groups[idx].time.push(time[i]);
        groups[idx].status.push(status[i]);
    }
    let result = compute_logrank_test(&groups)?;
    Ok(LogRankOutput {
        dof: result.dof,
        statistic: result.statistic,
        p_value: result.p_value,
        observed: result.observed,
        expected: result.expected,
    })
}
