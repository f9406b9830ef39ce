// Converts an analyser's byte spectrum into a target box scale.

use super::constants::{SCALE_BASE, SCALE_FLOOR, SPECTRUM_MAX};

/// Arithmetic mean of the frequency bins. An empty spectrum reads as silence.
#[inline]
pub fn mean_energy(spectrum: &[u8]) -> f32 {
    if spectrum.is_empty() {
        return 0.0;
    }
    let total: u64 = spectrum.iter().map(|&b| b as u64).sum();
    (total as f64 / spectrum.len() as f64) as f32
}

#[derive(Clone, Copy, Debug)]
pub struct VolumeSampler {
    pub base_scale: f32,
}

impl Default for VolumeSampler {
    fn default() -> Self {
        Self {
            base_scale: SCALE_BASE,
        }
    }
}

impl VolumeSampler {
    pub fn new(base_scale: f32) -> Self {
        Self { base_scale }
    }

    /// Normalized loudness in \[0, 1\].
    pub fn loudness(&self, spectrum: &[u8]) -> f32 {
        (mean_energy(spectrum) / SPECTRUM_MAX).clamp(0.0, 1.0)
    }

    /// Uniform box scale for this spectrum, within
    /// `[SCALE_FLOOR * base, (1 + SCALE_FLOOR) * base]`.
    pub fn target_scale(&self, spectrum: &[u8]) -> f32 {
        (self.loudness(spectrum) + SCALE_FLOOR) * self.base_scale
    }

    pub fn min_scale(&self) -> f32 {
        SCALE_FLOOR * self.base_scale
    }

    pub fn max_scale(&self) -> f32 {
        (1.0 + SCALE_FLOOR) * self.base_scale
    }
}
