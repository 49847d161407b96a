use crate::color::color::{Color, Rgb};
use crate::foundation::error::{TermfxError, TermfxResult};

/// Precomputed piecewise-linear color ramp through a list of stops.
///
/// Each segment between consecutive stops contributes `steps` colors including both ends; the
/// shared color at each join appears once. A single stop yields a one-color spectrum, and
/// `steps == 1` degenerates to the stops themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<Color>,
    steps: usize,
    spectrum: Vec<Color>,
}

impl Gradient {
    /// Largest accepted `steps` per segment.
    pub const MAX_STEPS: usize = 1024;

    /// Build the spectrum for `stops`. Fails on an empty stop list or `steps == 0`.
    pub fn new(stops: &[Color], steps: usize) -> TermfxResult<Self> {
        if stops.is_empty() {
            return Err(TermfxError::config("gradient requires at least one stop"));
        }
        if steps == 0 || steps > Self::MAX_STEPS {
            return Err(TermfxError::config(format!(
                "gradient steps must be in 1..={}, got {steps}",
                Self::MAX_STEPS
            )));
        }

        let spectrum = if stops.len() == 1 {
            vec![stops[0]]
        } else {
            let n = steps.max(2);
            let mut out = Vec::with_capacity((n - 1) * (stops.len() - 1) + 1);
            out.push(stops[0]);
            for pair in stops.windows(2) {
                let (a, b) = (pair[0].to_rgb(), pair[1].to_rgb());
                for i in 1..n - 1 {
                    let t = i as f64 / (n - 1) as f64;
                    out.push(Color::Rgb(Rgb::lerp(a, b, t)));
                }
                out.push(pair[1]);
            }
            out
        };

        Ok(Self {
            stops: stops.to_vec(),
            steps,
            spectrum,
        })
    }

    /// Stop colors as given.
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Colors per segment as configured.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// All generated colors in order. Never empty.
    pub fn spectrum(&self) -> &[Color] {
        &self.spectrum
    }

    /// Map `fraction` onto the spectrum by rounding to the nearest index.
    ///
    /// `fraction` is clamped into `[0, 1]`; NaN maps to the first color.
    pub fn color_at_fraction(&self, fraction: f64) -> Color {
        let f = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let last = self.spectrum.len() - 1;
        let idx = (f * last as f64).round() as usize;
        self.spectrum[idx.min(last)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/gradient.rs"]
mod tests;
