//! [`ResampleMode::Rubato`](crate::ResampleMode::Rubato).

//----------------------------------------------------------------------------------------------- use
use std::num::{NonZeroU32, NonZeroUsize};
use rubato::{
	Resampler as _, SincFixedIn, SincInterpolationParameters,
	SincInterpolationType, WindowFunction,
};
use crate::{
	constants::{
		RUBATO_CHUNK_SIZE, RUBATO_F_CUTOFF,
		RUBATO_OVERSAMPLING_FACTOR, RUBATO_SINC_LEN,
	},
	error::WaveformError,
	resample::{deinterleave, interleave, Resampler},
	macros::trace2,
};

//----------------------------------------------------------------------------------------------- Rubato
/// A [`SincFixedIn`] fed in fixed chunks.
///
/// `SincFixedIn` output already lines up with its input,
/// frame `0` out is frame `0` in. Only the tail needs
/// flushing with silence to reach the wanted length.
pub(crate) struct Rubato {
	resampler: SincFixedIn<f32>,
	num_channels: usize,
}

impl Resampler for Rubato {
	fn new(
		source_hz: NonZeroU32,
		target_hz: NonZeroU32,
		num_channels: NonZeroUsize,
	) -> Result<Self, WaveformError> {
		let params = SincInterpolationParameters {
			sinc_len: RUBATO_SINC_LEN,
			f_cutoff: RUBATO_F_CUTOFF,
			interpolation: SincInterpolationType::Linear,
			oversampling_factor: RUBATO_OVERSAMPLING_FACTOR,
			window: WindowFunction::BlackmanHarris2,
		};

		let resampler = SincFixedIn::<f32>::new(
			f64::from(target_hz.get()) / f64::from(source_hz.get()),
			1.0,
			params,
			RUBATO_CHUNK_SIZE,
			num_channels.get(),
		)
		.map_err(|e| WaveformError::Resample(e.to_string()))?;

		Ok(Self {
			resampler,
			num_channels: num_channels.get(),
		})
	}

	fn resample(&mut self, input: &[f32], num_output_frames: usize) -> Result<Vec<f32>, WaveformError> {
		let planar = deinterleave(input, self.num_channels);
		let num_input_frames = input.len() / self.num_channels;

		let mut output: Vec<Vec<f32>> = vec![Vec::with_capacity(num_output_frames); self.num_channels];

		// Full chunks.
		let mut start = 0;
		loop {
			let needed = self.resampler.input_frames_next();
			if start + needed > num_input_frames {
				break;
			}

			let chunk: Vec<&[f32]> = planar.iter().map(|c| &c[start..start + needed]).collect();
			let resampled = self.resampler.process(&chunk, None).map_err(|e| WaveformError::Resample(e.to_string()))?;
			append(&mut output, resampled);
			start += needed;
		}

		// The rest, zero-padded by `rubato`.
		if start < num_input_frames {
			let rest: Vec<&[f32]> = planar.iter().map(|c| &c[start..]).collect();
			let resampled = self
				.resampler
				.process_partial(Some(rest.as_slice()), None)
				.map_err(|e| WaveformError::Resample(e.to_string()))?;
			append(&mut output, resampled);
		}

		// Flush the filter until all wanted frames are out.
		while output[0].len() < num_output_frames {
			let resampled = self
				.resampler
				.process_partial::<Vec<f32>>(None, None)
				.map_err(|e| WaveformError::Resample(e.to_string()))?;

			if resampled[0].is_empty() {
				return Err(WaveformError::Resample("rubato stopped producing frames".into()));
			}

			append(&mut output, resampled);
		}

		trace2!("rubato - {num_input_frames} -> {} frames", output[0].len());

		Ok(interleave(&output, 0, num_output_frames))
	}
}

/// Append each channel of `chunk` to `output`.
fn append(output: &mut [Vec<f32>], chunk: Vec<Vec<f32>>) {
	for (out, chunk) in output.iter_mut().zip(chunk) {
		out.extend(chunk);
	}
}

//----------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::sine;
	use pretty_assertions::assert_eq;

	fn rubato(source: u32, target: u32, channels: usize) -> Rubato {
		Rubato::new(
			NonZeroU32::new(source).unwrap(),
			NonZeroU32::new(target).unwrap(),
			NonZeroUsize::new(channels).unwrap(),
		).unwrap()
	}

	fn rms(samples: &[f32]) -> f32 {
		(samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
	}

	#[test]
	fn exact_length() {
		// Less than a chunk, exactly a chunk, more than a chunk.
		for frames in [10, RUBATO_CHUNK_SIZE, RUBATO_CHUNK_SIZE * 3 + 7] {
			let input = sine(2, 44100, 440.0, frames);
			for (target, out_frames) in [(48000, frames * 48000 / 44100), (22050, frames / 2)] {
				let out = rubato(44100, target, 2).resample(&input, out_frames).unwrap();
				assert_eq!(out.len(), out_frames * 2);
			}
		}
	}

	#[test]
	fn energy_is_kept() {
		let input = sine(1, 44100, 200.0, 44100);
		let out = rubato(44100, 48000, 1).resample(&input, 48000).unwrap();

		let expected = rms(&input[4410..39690]);
		let actual = rms(&out[4800..43200]);
		assert!((expected - actual).abs() / expected < 0.02, "{expected} {actual}");
	}

	#[test]
	fn matches_lanczos() {
		use crate::resample::lanczos::Lanczos;

		// A 50hz sine is far below every cutoff,
		// so both converters should draw the same curve.
		let input = sine(1, 44100, 50.0, 44100);

		for target in [48000, 22050, 8000] {
			let frames = target as usize;
			let out = rubato(44100, target, 1).resample(&input, frames).unwrap();
			let reference = Lanczos::new(
				NonZeroU32::new(44100).unwrap(),
				NonZeroU32::new(target).unwrap(),
				NonZeroUsize::new(1).unwrap(),
			)
			.unwrap()
			.resample(&input, frames)
			.unwrap();

			assert_eq!(out.len(), reference.len());
			for (i, (a, b)) in out.iter().zip(&reference).enumerate().take(frames * 3 / 4).skip(frames / 4) {
				assert!((a - b).abs() < 1e-2, "{target}hz, frame {i}: {a} != {b}");
			}

			// sin(0) == 0, nothing is cut off the front.
			assert!(out[0].abs() < 0.05, "{target}hz: first frame {}", out[0]);
		}
	}

	#[test]
	fn channels_stay_separate() {
		// Left is a sine, right is silent.
		let input: Vec<f32> = sine(1, 8000, 100.0, 4000)
			.into_iter()
			.flat_map(|s| [s, 0.0])
			.collect();

		let out = rubato(8000, 16000, 2).resample(&input, 8000).unwrap();
		assert!(out.iter().skip(1).step_by(2).all(|s| *s == 0.0));
		assert!(out.iter().step_by(2).any(|s| s.abs() > 0.1));
	}
}
