//! Sample-rate conversion and channel downmixing for transcription input.

use crate::audio::frame::Utterance;

/// Linearly resamples `samples` from `from_rate` to `to_rate`.
///
/// Returns the input unchanged when the rates already match. Output length
/// is `len * to_rate / from_rate`, rounded down, matching the original
/// signal's duration.
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let out_len = (samples.len() as u64 * to_rate as u64 / from_rate as u64) as usize;
    if out_len == 0 {
        return Vec::new();
    }

    let step = samples.len() as f64 / out_len as f64;
    (0..out_len)
        .map(|i| {
            let pos = i as f64 * step;
            let idx = pos as usize;
            let frac = (pos - idx as f64) as f32;
            let a = samples[idx];
            let b = samples[(idx + 1).min(samples.len() - 1)];
            a + (b - a) * frac
        })
        .collect()
}

/// Downmixes interleaved multi-channel audio to mono by channel-wise
/// averaging. Mono input passes through unchanged.
pub fn downmix_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 || samples.is_empty() {
        return samples.to_vec();
    }

    let channels = channels as usize;
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Prepares an utterance for the transcription engine: mono downmix first
/// (resampling interleaved data would smear channels), then linear
/// resampling to the target rate.
pub fn prepare(utterance: &Utterance, target_rate: u32) -> Vec<f32> {
    let mono = downmix_mono(&utterance.samples, utterance.channels);
    resample_linear(&mono, utterance.sample_rate, target_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_identity_at_equal_rates() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(resample_linear(&samples, 16000, 16000), samples);
    }

    #[test]
    fn test_resample_empty() {
        assert!(resample_linear(&[], 48000, 16000).is_empty());
    }

    #[test]
    fn test_resample_halves_length() {
        let samples = vec![0.0; 32000];
        let out = resample_linear(&samples, 32000, 16000);
        assert_eq!(out.len(), 16000);
    }

    #[test]
    fn test_resample_doubles_length() {
        let samples = vec![0.0; 8000];
        let out = resample_linear(&samples, 8000, 16000);
        assert_eq!(out.len(), 16000);
    }

    #[test]
    fn test_resample_preserves_constant_signal() {
        let samples = vec![0.7; 4410];
        let out = resample_linear(&samples, 44100, 16000);
        assert!(!out.is_empty());
        for s in out {
            assert!((s - 0.7).abs() < 1e-6);
        }
    }

    #[test]
    fn test_resample_interpolates_ramp() {
        // A linear ramp stays a linear ramp through linear interpolation.
        let samples: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let out = resample_linear(&samples, 20000, 10000);
        assert_eq!(out.len(), 50);
        for pair in out.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(downmix_mono(&samples, 1), samples);
    }

    #[test]
    fn test_downmix_stereo_averages_pairs() {
        let samples = vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix_mono(&samples, 2), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_prepare_mono_same_rate_is_identity() {
        let utterance = Utterance::new(vec![0.1, 0.2], 16000);
        assert_eq!(prepare(&utterance, 16000), vec![0.1, 0.2]);
    }

    #[test]
    fn test_prepare_resamples_to_target() {
        let utterance = Utterance::new(vec![0.5; 48000], 48000);
        let out = prepare(&utterance, 16000);
        assert_eq!(out.len(), 16000);
    }

    #[test]
    fn test_prepare_empty_utterance() {
        let utterance = Utterance::new(vec![], 48000);
        assert!(prepare(&utterance, 16000).is_empty());
    }
}
