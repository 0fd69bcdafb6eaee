use cubefield_core::{DeformationParams, Evaluate};

#[test]
fn pulse_starts_at_base_offset() {
    let d = DeformationParams::PULSE;
    assert!((d.expansion(0.0) - 0.3).abs() < 1e-6);
    assert_eq!(d.evaluate_on, Evaluate::Host);
}

#[test]
fn wave_starts_at_zero_and_runs_on_gpu() {
    let d = DeformationParams::WAVE;
    assert_eq!(d.expansion(0.0), 0.0);
    assert_eq!(d.evaluate_on, Evaluate::Gpu);
}

#[test]
fn expansion_is_periodic() {
    for d in [DeformationParams::PULSE, DeformationParams::WAVE] {
        let p = d.period_seconds();
        let tol = 1e-3 * d.amplitude.max(1.0);
        for i in 0..40 {
            let t = i as f64 * 0.73;
            let a = d.expansion(t);
            let b = d.expansion(t + p);
            assert!((a - b).abs() < tol, "t={t}: {a} vs {b}");
        }
    }
}

#[test]
fn rectified_period_is_half_the_raw_period() {
    let d = DeformationParams::PULSE;
    assert!((d.period_seconds() - std::f64::consts::PI * 10.0).abs() < 1e-9);
    assert!((DeformationParams::WAVE.period_seconds() - std::f64::consts::TAU * 15.0).abs() < 1e-9);
}

#[test]
fn samples_stay_within_bounds() {
    for d in [DeformationParams::PULSE, DeformationParams::WAVE] {
        let (lo, hi) = d.bounds();
        for i in 0..2000 {
            let t = i as f64 * 0.05;
            let e = d.expansion(t);
            assert!(e >= lo - 1e-4 && e <= hi + 1e-4, "t={t}: {e} not in [{lo}, {hi}]");
        }
    }
}

#[test]
fn pulse_stays_inside_base_and_base_plus_amplitude() {
    let d = DeformationParams::PULSE;
    for i in 0..5000 {
        let e = d.expansion(i as f64 * 0.01);
        assert!((0.3..=150.3).contains(&e));
    }
}

#[test]
fn pulse_reaches_its_peak_at_a_quarter_turn() {
    let d = DeformationParams::PULSE;
    // sin(t / 10) = 1 at t = 5π
    let peak = d.expansion(5.0 * std::f64::consts::PI);
    let (_, hi) = d.bounds();
    assert!((peak - hi).abs() < 1e-3);
    assert!((d.scale(peak) - (1.0 + hi / 40.0)).abs() < 1e-4);
}
