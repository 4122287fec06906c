//! [`ResampleMode::Lanczos`](crate::ResampleMode::Lanczos).

//----------------------------------------------------------------------------------------------- use
use std::{
	f64::consts::PI,
	num::{NonZeroU32, NonZeroUsize},
};
use crate::{
	constants::LANCZOS_KERNEL_A,
	error::WaveformError,
	resample::Resampler,
};

//----------------------------------------------------------------------------------------------- Lanczos
/// Direct convolution with a Lanczos kernel.
///
/// Output frame `j` sits at input position `j * source_hz / target_hz`.
/// When downsampling, the kernel is stretched by `target_hz / source_hz`
/// so it also acts as the anti-aliasing filter.
pub(crate) struct Lanczos {
	source_hz: u64,
	target_hz: u64,
	num_channels: usize,
	/// `min(target_hz / source_hz, 1)`
	scale: f64,
}

/// `sinc(x) * sinc(x / a)` for `|x| < a`, else `0`.
fn kernel(x: f64) -> f64 {
	let a = LANCZOS_KERNEL_A as f64;

	if x == 0.0 {
		return 1.0;
	}
	if x.abs() >= a {
		return 0.0;
	}

	let pi_x = PI * x;
	(a * pi_x.sin() * (pi_x / a).sin()) / (pi_x * pi_x)
}

impl Resampler for Lanczos {
	fn new(
		source_hz: NonZeroU32,
		target_hz: NonZeroU32,
		num_channels: NonZeroUsize,
	) -> Result<Self, WaveformError> {
		let scale = (f64::from(target_hz.get()) / f64::from(source_hz.get())).min(1.0);

		Ok(Self {
			source_hz: u64::from(source_hz.get()),
			target_hz: u64::from(target_hz.get()),
			num_channels: num_channels.get(),
			scale,
		})
	}

	fn resample(&mut self, input: &[f32], num_output_frames: usize) -> Result<Vec<f32>, WaveformError> {
		let channels = self.num_channels;
		let num_input_frames = input.len() / channels;
		let mut output = vec![0.0_f32; num_output_frames * channels];

		if num_input_frames == 0 {
			return Ok(output);
		}

		// How far the kernel reaches, in input frames.
		let reach = LANCZOS_KERNEL_A as f64 / self.scale;
		let mut acc = vec![0.0_f64; channels];

		for (out_idx, out_frame) in output.chunks_exact_mut(channels).enumerate() {
			// Exact integer position, then the fraction.
			let numerator = out_idx as u128 * u128::from(self.source_hz);
			let whole = (numerator / u128::from(self.target_hz)) as f64;
			let frac = (numerator % u128::from(self.target_hz)) as f64 / self.target_hz as f64;
			let pos = whole + frac;

			let first = (pos - reach).floor() as i64 + 1;
			let last = (pos + reach).floor() as i64;

			acc.iter_mut().for_each(|a| *a = 0.0);

			let first = first.max(0) as usize;
			let last = last.min(num_input_frames as i64 - 1);
			if last < first as i64 {
				continue;
			}

			for in_idx in first..=last as usize {
				let weight = self.scale * kernel((pos - in_idx as f64) * self.scale);
				if weight == 0.0 {
					continue;
				}

				let in_frame = &input[in_idx * channels..(in_idx + 1) * channels];
				for (a, s) in acc.iter_mut().zip(in_frame) {
					*a += weight * f64::from(*s);
				}
			}

			for (o, a) in out_frame.iter_mut().zip(&acc) {
				*o = *a as f32;
			}
		}

		Ok(output)
	}
}

//----------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::sine;
	use pretty_assertions::assert_eq;

	fn lanczos(source: u32, target: u32, channels: usize) -> Lanczos {
		Lanczos::new(
			NonZeroU32::new(source).unwrap(),
			NonZeroU32::new(target).unwrap(),
			NonZeroUsize::new(channels).unwrap(),
		).unwrap()
	}

	#[test]
	fn kernel_shape() {
		assert_eq!(kernel(0.0), 1.0);
		assert_eq!(kernel(5.0), 0.0);
		assert_eq!(kernel(-7.5), 0.0);
		for x in 1..5 {
			assert!(kernel(x as f64).abs() < 1e-12);
			assert!((kernel(x as f64 + 0.5) - kernel(-(x as f64) - 0.5)).abs() < 1e-12);
		}
	}

	#[test]
	fn upsample_keeps_original_frames() {
		// At 2x, every even output frame sits exactly on an input frame.
		let input = sine(2, 8000, 440.0, 400);
		let out = lanczos(8000, 16000, 2).resample(&input, 800).unwrap();
		assert_eq!(out.len(), 1600);

		for (frame, original) in out.chunks_exact(4).zip(input.chunks_exact(2)) {
			assert!((frame[0] - original[0]).abs() < 1e-5);
			assert!((frame[1] - original[1]).abs() < 1e-5);
		}
	}

	#[test]
	fn downsample_removes_high_frequency() {
		// 3500hz is above the 2000hz Nyquist of the output.
		let input = sine(1, 8000, 3500.0, 8000);
		let out = lanczos(8000, 4000, 1).resample(&input, 4000).unwrap();

		let peak = out[500..3500].iter().fold(0.0_f32, |m, s| m.max(s.abs()));
		assert!(peak < 0.1, "{peak}");
	}

	#[test]
	fn past_the_input() {
		let out = lanczos(100, 200, 1).resample(&[], 5).unwrap();
		assert_eq!(out, [0.0; 5]);
	}
}
