#![no_main]
use kmlogrank::compute_survival_curve;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }
    let n = (data.len() / 9).min(1000);
    let mut time = Vec::with_capacity(n);
    let mut status = Vec::with_capacity(n);

    for i in 0..n {
        let offset = i * 9;
        let t = f64::from_le_bytes(data[offset..offset + 8].try_into().unwrap());
        if t.is_nan() || t.is_infinite() || t < 0.0 {
            return;
        }
        time.push(t);
        status.push((data[offset + 8] & 1) as i32);
    }

    let points = compute_survival_curve(&time, &status).unwrap();
    assert_eq!(points.first().map(|p| p.n_risk), Some(n));
    let mut prev_survival = 1.0;
    let mut prev_risk = n;
    for p in &points {
        assert!((0.0..=1.0).contains(&p.survival));
        assert!(p.survival <= prev_survival);
        assert!(p.n_risk <= prev_risk);
        prev_survival = p.survival;
        prev_risk = p.n_risk;
    }
});
