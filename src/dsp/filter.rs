use std::f32::consts::PI;

/*
Formants
--------
A vowel is recognisable by a few resonant peaks in its spectrum (the
formants). A band-pass filter at each formant frequency, fed with a
harmonically rich source, carves the vowel out of the buzz:

    saw ──┬──► [BP F1] ──(× a1)──┐
          ├──► [BP F2] ──(× a2)──┼──► (+) ──► vowel
          └──► [BP F3] ──(× a3)──┘

Bandwidth → resonance
---------------------
The SVF damping is k = 1/Q and Q = centre / bandwidth. The `resonance`
knob maps onto k as k = 2 - 2·resonance, so

    resonance = 1 - bandwidth / (2 · centre)
*/

/// Topology-preserving-transform state-variable filter, band-pass output.
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    resonance: f32,
    sample_rate: f32,
    g: f32,
    k: f32,
}

impl SVFilter {
    pub fn new(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: 0.0,
            sample_rate: sample_rate.max(1.0),
            g: 0.0,
            k: 2.0,
        };
        filter.update_coefficients();
        filter
    }

    /// Band-pass tuned to a formant: centre frequency plus bandwidth in Hz.
    pub fn formant(center_hz: f32, bandwidth_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self::new(center_hz, sample_rate);
        filter.set_bandwidth(bandwidth_hz);
        filter
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    /// Damping k = 1/Q. Scaling the band-pass output by k gives unity gain at the cutoff.
    pub fn damping(&self) -> f32 {
        self.k
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
        self.update_coefficients();
    }

    /// 0.0 = no emphasis, →1.0 = self-oscillation
    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, 0.99);
        self.update_coefficients();
    }

    /// Set the band-pass width in Hz around the current cutoff.
    pub fn set_bandwidth(&mut self, bandwidth_hz: f32) {
        let bandwidth_hz = bandwidth_hz.max(1.0);
        self.set_resonance(1.0 - bandwidth_hz / (2.0 * self.cutoff_hz.max(1.0)));
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.update_coefficients();
    }

    fn update_coefficients(&mut self) {
        // Keep the cutoff below nyquist, tan() blows up at fs/2
        let cutoff = self.cutoff_hz.clamp(1.0, self.sample_rate * 0.49);
        self.g = (PI * cutoff / self.sample_rate).tan();
        self.k = 2.0 - (2.0 * self.resonance);
    }

    /// One sample through the filter, band-pass output.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let (g, k) = (self.g, self.k);
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        v1
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(freq: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(256);
        buffer
            .get(skip..)
            .unwrap_or(buffer)
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn test_bandpass_rejects_dc() {
        let mut filter = SVFilter::formant(500.0, 80.0, SAMPLE_RATE);
        let mut buffer = vec![1.0; 48_000];

        filter.render(&mut buffer);

        assert!(buffer[47_999].abs() < 1e-3, "dc leaked: {}", buffer[47_999]);
    }

    #[test]
    fn test_bandpass_emphasizes_cutoff_frequency() {
        let mut filter = SVFilter::formant(1_000.0, 100.0, SAMPLE_RATE);

        let mut pass = sine(1_000.0, 2048);
        filter.render(&mut pass);
        let pass_peak = peak_after_transient(&pass);

        filter.reset();
        let mut off = sine(200.0, 2048);
        filter.render(&mut off);
        let off_peak = peak_after_transient(&off);

        assert!(
            pass_peak > off_peak * 2.0,
            "expected bandpass to emphasize cutoff freq, got pass_peak={}, off_peak={}",
            pass_peak,
            off_peak
        );
    }

    #[test]
    fn test_bandwidth_maps_to_resonance() {
        let narrow = SVFilter::formant(1_000.0, 50.0, SAMPLE_RATE);
        let wide = SVFilter::formant(1_000.0, 400.0, SAMPLE_RATE);

        assert!((narrow.resonance() - 0.975).abs() < 1e-6);
        assert!((wide.resonance() - 0.8).abs() < 1e-6);
        assert!(narrow.resonance() > wide.resonance());
    }

    #[test]
    fn test_cutoff_above_nyquist_stays_stable() {
        let mut filter = SVFilter::formant(40_000.0, 100.0, SAMPLE_RATE);
        let mut buffer = sine(440.0, 1024);

        filter.render(&mut buffer);

        assert!(buffer.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_set_cutoff_updates_frequency() {
        let mut filter = SVFilter::new(1000.0, SAMPLE_RATE);
        filter.set_cutoff(2000.0);
        assert!((filter.cutoff() - 2000.0).abs() < 0.1);
    }
}
