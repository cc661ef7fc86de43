//! Spectral Band Power

use rustfft::{num_complex::Complex, FftPlanner};

/// Frequency band boundaries (Hz)
#[derive(Debug, Clone, Copy)]
pub struct FrequencyBands {
    /// Low band, covering posture and gravity components
    pub low: (f64, f64),
    /// Mid band, covering gait frequencies
    pub mid: (f64, f64),
    /// High band, covering impacts and tremor
    pub high: (f64, f64),
}

impl Default for FrequencyBands {
    fn default() -> Self {
        Self {
            low: (0.0, 2.0),
            mid: (2.0, 6.0),
            high: (6.0, 15.0),
        }
    }
}

/// Power summed over each frequency band
#[derive(Debug, Clone, Copy, Default)]
pub struct BandPower {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

/// FFT-backed band power analyzer
pub struct SpectralAnalyzer {
    planner: FftPlanner<f64>,
    bands: FrequencyBands,
    sample_rate: f64,
}

impl SpectralAnalyzer {
    /// Create an analyzer for the given sampling rate (Hz)
    pub fn new(sample_rate: f64) -> Self {
        Self {
            planner: FftPlanner::new(),
            bands: FrequencyBands::default(),
            sample_rate,
        }
    }

    /// Create an analyzer with explicit band boundaries
    pub fn with_bands(sample_rate: f64, bands: FrequencyBands) -> Self {
        Self {
            planner: FftPlanner::new(),
            bands,
            sample_rate,
        }
    }

    // Hamming window against spectral leakage
    fn window(signal: &mut [f64]) {
        let n = signal.len();
        if n < 2 {
            return;
        }
        for (i, v) in signal.iter_mut().enumerate() {
            let w = 0.54 - 0.46 * (2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64).cos();
            *v *= w;
        }
    }

    /// Compute band powers for a signal
    pub fn analyze(&mut self, signal: &[f64]) -> BandPower {
        if signal.is_empty() {
            return BandPower::default();
        }

        let n = signal.len();
        let mut windowed = signal.to_vec();
        Self::window(&mut windowed);

        let mut buffer: Vec<Complex<f64>> =
            windowed.iter().map(|&v| Complex::new(v, 0.0)).collect();
        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let freq_resolution = self.sample_rate / n as f64;
        let mut power = BandPower::default();

        // Positive frequencies only, magnitude squared normalized by n
        for (i, c) in buffer.iter().take(n / 2).enumerate() {
            let freq = i as f64 * freq_resolution;
            let p = c.norm_sqr() / n as f64;

            if freq >= self.bands.low.0 && freq < self.bands.low.1 {
                power.low += p;
            } else if freq >= self.bands.mid.0 && freq < self.bands.mid.1 {
                power.mid += p;
            } else if freq >= self.bands.high.0 && freq < self.bands.high.1 {
                power.high += p;
            }
        }

        power
    }
}
