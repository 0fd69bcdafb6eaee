//! Time-periodic radial expansion of the cube lattice.
//!
//! `expansion(t) = base + R(sin(sin(t / period)^n)) * amplitude` with `n` odd
//! and `R` either `abs` or identity. The odd power flattens the motion near
//! zero and sharpens it at the extremes, giving the pulse its snap.

use std::f64::consts::PI;

/// Where the expansion is evaluated each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluate {
    /// Host computes `expand`/`scale` and uploads them as uniforms.
    Host,
    /// Host uploads `time` and the parameters; the vertex shader evaluates.
    Gpu,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformationParams {
    pub base_offset: f32,
    pub period: f32,
    pub odd_power: u32,
    pub amplitude: f32,
    pub rectify: bool,
    /// `scale = 1 + expansion / divisor`; `None` keeps instances at unit size.
    pub scale_divisor: Option<f32>,
    pub evaluate_on: Evaluate,
}

impl DeformationParams {
    /// Sharp breathing pulse of the large cubefield.
    pub const PULSE: Self = Self {
        base_offset: 0.3,
        period: 10.0,
        odd_power: 3,
        amplitude: 150.0,
        rectify: true,
        scale_divisor: Some(40.0),
        evaluate_on: Evaluate::Host,
    };

    /// Signed wave that folds the lattice through the origin, evaluated per vertex.
    pub const WAVE: Self = Self {
        base_offset: 0.0,
        period: 15.0,
        odd_power: 5,
        amplitude: 1.0,
        rectify: false,
        scale_divisor: None,
        evaluate_on: Evaluate::Gpu,
    };

    /// Constant unit expansion: cubes sit on their lattice points.
    pub const STATIC: Self = Self {
        base_offset: 1.0,
        period: 1.0,
        odd_power: 1,
        amplitude: 0.0,
        rectify: false,
        scale_divisor: None,
        evaluate_on: Evaluate::Host,
    };

    pub fn expansion(&self, t: f64) -> f32 {
        let inner = (t / self.period as f64).sin().powi(self.odd_power as i32);
        let pulse = inner.sin();
        let pulse = if self.rectify { pulse.abs() } else { pulse };
        (self.base_offset as f64 + pulse * self.amplitude as f64) as f32
    }

    pub fn scale(&self, expansion: f32) -> f32 {
        match self.scale_divisor {
            Some(divisor) => 1.0 + expansion / divisor,
            None => 1.0,
        }
    }

    /// Exact period of `expansion` in seconds. With an odd power,
    /// `sin(u + π)^n = -sin(u)^n`, so rectifying halves the period.
    pub fn period_seconds(&self) -> f64 {
        let cycles = if self.rectify { PI } else { 2.0 * PI };
        cycles * self.period as f64
    }

    /// Tight `(min, max)` of `expansion` over all `t`.
    pub fn bounds(&self) -> (f32, f32) {
        let peak = (1.0f64.sin() * self.amplitude.abs() as f64) as f32;
        if self.rectify {
            (self.base_offset, self.base_offset + peak)
        } else {
            (self.base_offset - peak, self.base_offset + peak)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_expansion_is_constant_one() {
        let d = DeformationParams::STATIC;
        for t in [0.0, 1.5, 1000.0] {
            assert_eq!(d.expansion(t), 1.0);
            assert_eq!(d.scale(d.expansion(t)), 1.0);
        }
    }

    #[test]
    fn pulse_scale_grows_with_expansion() {
        let d = DeformationParams::PULSE;
        assert!((d.scale(0.3) - (1.0 + 0.3 / 40.0)).abs() < 1e-6);
        assert!((d.scale(40.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn wave_is_signed() {
        let d = DeformationParams::WAVE;
        // sin(t/15) = 1 at t = 7.5π; sin(-1) on the opposite crest
        let crest = d.expansion(7.5 * PI);
        let trough = d.expansion(22.5 * PI);
        assert!((crest - 1.0f32.sin()).abs() < 1e-5);
        assert!((trough + 1.0f32.sin()).abs() < 1e-5);
    }
}
