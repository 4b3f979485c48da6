#![no_main]
use kmlogrank::{compute_logrank_test, GroupData, LogRankError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 10 {
        return;
    }
    let n_groups = 2 + (data[0] % 3) as usize;
    let body = &data[1..];
    let n = (body.len() / 10).min(600);
    if n == 0 {
        return;
    }
    let mut groups = vec![GroupData::default(); n_groups];

    for i in 0..n {
        let offset = i * 10;
        let t = f64::from_le_bytes(body[offset..offset + 8].try_into().unwrap());
        if t.is_nan() || t.is_infinite() || t < 0.0 {
            return;
        }
        let g = (body[offset + 8] as usize) % n_groups;
        groups[g].time.push(t);
        groups[g].status.push((body[offset + 9] & 1) as i32);
    }

    match compute_logrank_test(&groups) {
        Ok(result) => {
            assert!((0.0..=1.0).contains(&result.p_value));
            match result.statistic {
                Some(statistic) => {
                    assert!(statistic.is_finite());
                    assert!(statistic >= 0.0);
                    assert!(result.dof >= 1);
                }
                None => assert_eq!(result.dof, 0),
            }
        }
        Err(LogRankError::SingularCovariance { dof }) => assert!(dof >= 1),
        Err(LogRankError::Invalid(_)) => unreachable!("inputs were pre-screened"),
    }
});
