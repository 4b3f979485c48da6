use crate::utilities::numpy_utils::{extract_vec_f64, extract_vec_i32};
use crate::utilities::validation::{
    validate_length, validate_no_nan, validate_non_negative, ValidationError,
};
use itertools::Itertools;
use pyo3::prelude::*;

// One row per distinct exit time, sorted ascending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeTableRow {
    pub time: f64,
    pub n_risk: usize,
    pub n_exit: usize,
    pub n_event: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivalPoint {
    pub time: f64,
    pub is_event: bool,
    pub survival: f64,
    pub n_risk: usize,
    pub n_event: usize,
    pub rate: Option<f64>,
}

// Collate (time, status) pairs, sort by time and fold runs of equal times
// into at-risk / exiting / event counts. Empty input yields an empty table.
pub fn build_time_table(time: &[f64], status: &[i32]) -> Vec<TimeTableRow> {
    let mut exits: Vec<(f64, bool)> = time
        .iter()
        .zip(status)
        .map(|(&t, &s)| (t, s > 0))
        .collect();
    exits.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut rows = Vec::new();
    let mut n_risk = exits.len();
    let chunks = exits.iter().chunk_by(|&&(t, _)| t);
    for (t, chunk) in &chunks {
        let (n_exit, n_event) = chunk.fold((0usize, 0usize), |(exiting, events), &(_, ev)| {
            (exiting + 1, events + ev as usize)
        });
        rows.push(TimeTableRow {
            time: t,
            n_risk,
            n_exit,
            n_event,
        });
        n_risk -= n_exit;
    }
    rows
}

// Product-limit estimator over a time table. Censor-only rows leave the
// running estimate unchanged but stay in the output so at-risk accounting
// holds downstream.
pub fn km_curve(table: &[TimeTableRow]) -> Vec<SurvivalPoint> {
    let mut survival = 1.0;
    table
        .iter()
        .map(|row| {
            if row.n_event > 0 {
                let rate = row.n_event as f64 / row.n_risk as f64;
                survival *= 1.0 - rate;
                SurvivalPoint {
                    time: row.time,
                    is_event: true,
                    survival,
                    n_risk: row.n_risk,
                    n_event: row.n_event,
                    rate: Some(rate),
                }
            } else {
                SurvivalPoint {
                    time: row.time,
                    is_event: false,
                    survival,
                    n_risk: row.n_risk,
                    n_event: 0,
                    rate: None,
                }
            }
        })
        .collect()
}

pub fn compute_survival_curve(
    time: &[f64],
    status: &[i32],
) -> Result<Vec<SurvivalPoint>, ValidationError> {
    validate_length(time.len(), status.len(), "status")?;
    validate_no_nan(time, "time")?;
    validate_non_negative(time, "time")?;
    Ok(km_curve(&build_time_table(time, status)))
}

#[derive(Debug, Clone)]
#[pyclass]
pub struct SurvivalCurveOutput {
    #[pyo3(get)]
    pub time: Vec<f64>,
    #[pyo3(get)]
    pub n_risk: Vec<usize>,
    #[pyo3(get)]
    pub n_event: Vec<usize>,
    #[pyo3(get)]
    pub n_censor: Vec<usize>,
    #[pyo3(get)]
    pub estimate: Vec<f64>,
    #[pyo3(get)]
    pub rate: Vec<Option<f64>>,
}

impl SurvivalCurveOutput {
    pub fn from_points(points: &[SurvivalPoint], table: &[TimeTableRow]) -> Self {
        SurvivalCurveOutput {
            time: points.iter().map(|p| p.time).collect(),
            n_risk: points.iter().map(|p| p.n_risk).collect(),
            n_event: points.iter().map(|p| p.n_event).collect(),
            n_censor: table.iter().map(|r| r.n_exit - r.n_event).collect(),
            estimate: points.iter().map(|p| p.survival).collect(),
            rate: points.iter().map(|p| p.rate).collect(),
        }
    }

    pub fn to_points(&self) -> Vec<SurvivalPoint> {
        (0..self.time.len())
            .map(|i| SurvivalPoint {
                time: self.time[i],
                is_event: self.n_event[i] > 0,
                survival: self.estimate[i],
                n_risk: self.n_risk[i],
                n_event: self.n_event[i],
                rate: self.rate[i],
            })
            .collect()
    }
}

#[pyfunction]
pub fn survival_curve(
    time: &Bound<'_, PyAny>,
    status: &Bound<'_, PyAny>,
) -> PyResult<SurvivalCurveOutput> {
    let time = extract_vec_f64(time)?;
    let status = extract_vec_i32(status)?;
    validate_length(time.len(), status.len(), "status")?;
    validate_no_nan(&time, "time")?;
    validate_non_negative(&time, "time")?;
    let table = build_time_table(&time, &status);
    let points = km_curve(&table);
    Ok(SurvivalCurveOutput::from_points(&points, &table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TEST_STRICT_TOL;

    #[test]
    fn test_time_table_counts_and_ties() {
        // tie at t=13: one event, one censor
        let time = [9.0, 13.0, 13.0, 18.0];
        let status = [1, 1, 0, 1];
        let table = build_time_table(&time, &status);
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].n_risk, 4);
        assert_eq!(table[1].time, 13.0);
        assert_eq!(table[1].n_risk, 3);
        assert_eq!(table[1].n_exit, 2);
        assert_eq!(table[1].n_event, 1);
        assert_eq!(table[2].n_risk, 1);
        let total_exiting: usize = table.iter().map(|r| r.n_exit).sum();
        assert_eq!(total_exiting, time.len());
    }

    #[test]
    fn test_time_table_empty() {
        assert!(build_time_table(&[], &[]).is_empty());
    }

    #[test]
    fn test_all_events_curve() {
        // one death at each of 5 times: survival steps 0.8, 0.6, 0.4, 0.2, 0.0
        let time = [1.0, 2.0, 3.0, 4.0, 5.0];
        let status = [1, 1, 1, 1, 1];
        let points = compute_survival_curve(&time, &status).unwrap();
        let expected = [0.8, 0.6, 0.4, 0.2, 0.0];
        assert_eq!(points.len(), 5);
        for (point, &s) in points.iter().zip(&expected) {
            assert!(point.is_event);
            assert!((point.survival - s).abs() < TEST_STRICT_TOL);
        }
        assert_eq!(points[0].n_risk, 5);
        assert_eq!(points[4].n_risk, 1);
    }

    #[test]
    fn test_censor_only_point_keeps_estimate() {
        let time = [1.0, 2.0, 3.0];
        let status = [1, 0, 1];
        let points = compute_survival_curve(&time, &status).unwrap();
        assert!(!points[1].is_event);
        assert_eq!(points[1].rate, None);
        assert!((points[1].survival - points[0].survival).abs() < TEST_STRICT_TOL);
        // after the censor only 1 subject remains at risk
        assert_eq!(points[2].n_risk, 1);
        assert!(points[2].survival.abs() < TEST_STRICT_TOL);
    }

    #[test]
    fn test_curve_monotonic_and_bounded() {
        let time = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let status = [1, 0, 1, 1, 0, 1, 1, 0];
        let points = compute_survival_curve(&time, &status).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].survival <= pair[0].survival);
            assert!(pair[1].n_risk <= pair[0].n_risk);
        }
        for p in &points {
            assert!((0.0..=1.0).contains(&p.survival));
        }
        assert_eq!(points[0].n_risk, time.len());
    }

    #[test]
    fn test_input_order_irrelevant() {
        let time = [5.0, 1.0, 3.0, 2.0, 4.0];
        let status = [0, 1, 1, 0, 1];
        let sorted_time = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sorted_status = [1, 0, 1, 1, 0];
        let a = compute_survival_curve(&time, &status).unwrap();
        let b = compute_survival_curve(&sorted_time, &sorted_status).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_survival_curve(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(compute_survival_curve(&[1.0, 2.0], &[1]).is_err());
        assert!(compute_survival_curve(&[-1.0], &[1]).is_err());
        assert!(compute_survival_curve(&[f64::NAN], &[1]).is_err());
    }
}
