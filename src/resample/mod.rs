//! Frame rate conversion.
//!
//! There are 3 converters, picked with [`ResampleMode`]:
//!
//! | Mode                      | Implementation                         |
//! |---------------------------|----------------------------------------|
//! | [`ResampleMode::Rubato`]  | `rubato::SincFixedIn`                  |
//! | [`ResampleMode::Lanczos`] | Lanczos kernel, `a = 5`                |
//! | [`ResampleMode::Sinc`]    | Blackman-Harris windowed sinc table    |
//!
//! The output length is computed here, once, and handed to
//! the converter so all modes agree on it:
//!
//! `round_half_even(num_frames * target_hz / source_hz)`

//---------------------------------------------------------------------------------------------------- Use
use std::num::{NonZeroU32, NonZeroUsize};
use crate::{
	args::ResampleMode,
	constants::MAX_FRAME_RATE_RATIO,
	error::WaveformError,
	waveform::Waveform,
	macros::{debug2, trace2},
};

mod resampler;
mod rubato;
mod lanczos;
mod sinc;

pub(crate) use resampler::Resampler;

//---------------------------------------------------------------------------------------------------- Checks
/// Check that converting `source_hz` to `target_hz` is allowed.
///
/// # Errors
/// - [`WaveformError::WrongFrameRate`] if either is `0`
/// - [`WaveformError::WrongFrameRateRatio`] if the ratio
///   is more than [`MAX_FRAME_RATE_RATIO`] either way
pub(crate) fn check_frame_rate_ratio(source_hz: u32, target_hz: u32) -> Result<(), WaveformError> {
	if source_hz == 0 || target_hz == 0 {
		return Err(WaveformError::WrongFrameRate { source_hz, target_hz });
	}

	let source = u64::from(source_hz);
	let target = u64::from(target_hz);

	if target * MAX_FRAME_RATE_RATIO < source || target > source * MAX_FRAME_RATE_RATIO {
		return Err(WaveformError::WrongFrameRateRatio { source_hz, target_hz });
	}

	Ok(())
}

/// `round_half_even(num_frames * target_hz / source_hz)`, in exact integers.
///
/// `source_hz` must not be `0`.
pub(crate) fn num_output_frames(num_frames: u64, source_hz: u32, target_hz: u32) -> u64 {
	let numerator = u128::from(num_frames) * u128::from(target_hz);
	let denominator = u128::from(source_hz);

	let quotient = numerator / denominator;
	let twice_remainder = 2 * (numerator % denominator);

	let rounded = match twice_remainder.cmp(&denominator) {
		std::cmp::Ordering::Less => quotient,
		std::cmp::Ordering::Greater => quotient + 1,
		std::cmp::Ordering::Equal => quotient + (quotient & 1),
	};

	u64::try_from(rounded).unwrap_or(u64::MAX)
}

//---------------------------------------------------------------------------------------------------- Resample
/// Resample `waveform` to `target_hz` with `mode`.
///
/// A `target_hz` of `0` or a `waveform` already
/// at `target_hz` is returned as a copy.
pub(crate) fn resample(waveform: &Waveform, target_hz: u32, mode: ResampleMode) -> Result<Waveform, WaveformError> {
	let source_hz = waveform.frame_rate_hz();

	if target_hz == 0 || source_hz == target_hz {
		trace2!("resample - keeping {source_hz}hz");
		return Ok(waveform.clone());
	}

	check_frame_rate_ratio(source_hz, target_hz)?;

	let num_channels = waveform.num_channels();
	let num_frames = num_output_frames(waveform.num_frames(), source_hz, target_hz);

	debug2!(
		"resample - {mode}, {source_hz}hz -> {target_hz}hz, {} -> {num_frames} frames, {num_channels} channels",
		waveform.num_frames(),
	);

	if num_frames == 0 {
		return Ok(Waveform::from_parts(Vec::new(), target_hz, num_channels));
	}

	let Some((num_frames, num_samples)) = usize::try_from(num_frames)
		.ok()
		.and_then(|f| Some((f, f.checked_mul(num_channels as usize)?)))
	else {
		return Err(WaveformError::TooManyFrames { num_frames, num_channels });
	};

	let input = waveform.interleaved_samples();
	let samples = match mode {
		ResampleMode::Rubato => run::<rubato::Rubato>(input, source_hz, target_hz, num_channels, num_frames)?,
		ResampleMode::Lanczos => run::<lanczos::Lanczos>(input, source_hz, target_hz, num_channels, num_frames)?,
		ResampleMode::Sinc => run::<sinc::Sinc>(input, source_hz, target_hz, num_channels, num_frames)?,
	};

	if samples.len() != num_samples {
		return Err(WaveformError::Resample(format!(
			"{mode} returned {} samples, expected {num_samples}",
			samples.len(),
		)));
	}

	Ok(Waveform::from_parts(samples, target_hz, num_channels))
}

/// Same as [`resample`] but takes ownership, so no copy is made at the same frame rate.
pub(crate) fn resample_owned(waveform: Waveform, target_hz: u32, mode: ResampleMode) -> Result<Waveform, WaveformError> {
	if target_hz == 0 || waveform.frame_rate_hz() == target_hz {
		return Ok(waveform);
	}
	resample(&waveform, target_hz, mode)
}

/// Create `R` and run it once.
fn run<R: Resampler>(
	input: &[f32],
	source_hz: u32,
	target_hz: u32,
	num_channels: u32,
	num_output_frames: usize,
) -> Result<Vec<f32>, WaveformError> {
	let (Some(source_hz), Some(target_hz)) = (NonZeroU32::new(source_hz), NonZeroU32::new(target_hz)) else {
		return Err(WaveformError::WrongFrameRate { source_hz, target_hz });
	};
	let Some(num_channels) = NonZeroUsize::new(num_channels as usize) else {
		return Err(WaveformError::WrongSampleCount { num_samples: input.len(), num_channels: 0 });
	};

	R::new(source_hz, target_hz, num_channels)?.resample(input, num_output_frames)
}

//---------------------------------------------------------------------------------------------------- Free functions
/// Convert interleaved samples to planar.
///
/// Input:  [L, R, L, R, L, R, ...]
/// Output: [[L, L, L, ...], [R, R, R, ...]]
pub(super) fn deinterleave(samples: &[f32], num_channels: usize) -> Vec<Vec<f32>> {
	let num_frames = samples.len() / num_channels;
	let mut planar = vec![Vec::with_capacity(num_frames); num_channels];

	for frame in samples.chunks_exact(num_channels) {
		for (channel, sample) in planar.iter_mut().zip(frame) {
			channel.push(*sample);
		}
	}

	planar
}

/// Convert planar samples to interleaved, taking `num_frames` frames starting at `offset`.
///
/// Input:  [[L, L, L, ...], [R, R, R, ...]]
/// Output: [L, R, L, R, L, R, ...]
pub(super) fn interleave(planar: &[Vec<f32>], offset: usize, num_frames: usize) -> Vec<f32> {
	let mut interleaved = Vec::with_capacity(num_frames * planar.len());

	for frame in offset..offset + num_frames {
		for channel in planar {
			interleaved.push(channel[frame]);
		}
	}

	interleaved
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::sine;
	use pretty_assertions::assert_eq;
	use strum::IntoEnumIterator;

	#[test]
	fn ratio() {
		assert!(check_frame_rate_ratio(44100, 173).is_ok());
		assert!(check_frame_rate_ratio(44100, 172).is_err());
		assert!(check_frame_rate_ratio(44100, 44100 * 256).is_ok());
		assert!(check_frame_rate_ratio(44100, 44100 * 256 + 1).is_err());
		// Exactly 1/256 is allowed.
		assert!(check_frame_rate_ratio(256 * 100, 100).is_ok());
		assert!(check_frame_rate_ratio(256 * 100 + 1, 100).is_err());
		// No overflow at the top.
		assert!(check_frame_rate_ratio(u32::MAX, u32::MAX).is_ok());
		assert!(check_frame_rate_ratio(1, u32::MAX).is_err());

		assert!(matches!(
			check_frame_rate_ratio(0, 44100),
			Err(WaveformError::WrongFrameRate { source_hz: 0, target_hz: 44100 }),
		));
		assert!(matches!(
			check_frame_rate_ratio(44100, 0),
			Err(WaveformError::WrongFrameRate { source_hz: 44100, target_hz: 0 }),
		));
	}

	#[test]
	fn output_frames() {
		assert_eq!(num_output_frames(2_492_928, 44100, 22050), 1_246_464);
		assert_eq!(num_output_frames(2_492_928, 44100, 11025), 623_232);
		assert_eq!(num_output_frames(2_492_928, 44100, 44099), 2_492_871);
		assert_eq!(num_output_frames(2_492_928, 44100, 48000), 2_713_391);
		assert_eq!(num_output_frames(2_492_928, 44100, 173), 9780);
		assert_eq!(num_output_frames(0, 44100, 48000), 0);

		// Ties go to the even neighbour.
		assert_eq!(num_output_frames(1, 2, 1), 0); // 0.5
		assert_eq!(num_output_frames(3, 2, 1), 2); // 1.5
		assert_eq!(num_output_frames(5, 2, 1), 2); // 2.5
		assert_eq!(num_output_frames(7, 2, 1), 4); // 3.5
	}

	#[test]
	fn planar() {
		let interleaved = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
		let planar = deinterleave(&interleaved, 2);
		assert_eq!(planar, [vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]);
		assert_eq!(interleave(&planar, 0, 3), interleaved);
		assert_eq!(interleave(&planar, 1, 2), [3.0, 4.0, 5.0, 6.0]);
	}

	#[test]
	fn same_rate() {
		let w = Waveform::new(8000, 2, sine(2, 8000, 440.0, 100)).unwrap();
		for mode in ResampleMode::iter() {
			assert_eq!(resample(&w, 8000, mode).unwrap(), w);
			assert_eq!(resample_owned(w.clone(), 8000, mode).unwrap(), w);
		}
	}

	#[test]
	fn zero_rate() {
		// A target of 0 keeps the source rate.
		let w = Waveform::new(8000, 1, sine(1, 8000, 440.0, 10)).unwrap();
		for mode in ResampleMode::iter() {
			assert_eq!(resample(&w, 0, mode).unwrap(), w);
			assert_eq!(resample_owned(w.clone(), 0, mode).unwrap(), w);
		}

		// A source of 0 has nothing to convert from.
		let w = Waveform::new(0, 1, vec![0.0; 10]).unwrap();
		for mode in ResampleMode::iter() {
			assert!(matches!(
				resample(&w, 8000, mode),
				Err(WaveformError::WrongFrameRate { source_hz: 0, target_hz: 8000 }),
			));
			assert_eq!(resample_owned(w.clone(), 8000, mode).unwrap_err().kind(), "WrongFrameRate");
			assert_eq!(resample(&w, 0, mode).unwrap(), w);
		}
	}

	#[test]
	fn empty() {
		let w = Waveform::new(8000, 2, Vec::new()).unwrap();
		for mode in ResampleMode::iter() {
			let out = resample(&w, 16000, mode).unwrap();
			assert_eq!(out.num_frames(), 0);
			assert_eq!(out.num_channels(), 2);
			assert_eq!(out.frame_rate_hz(), 16000);
		}
	}

	#[test]
	fn every_mode_same_length() {
		let w = Waveform::new(11025, 2, sine(2, 11025, 300.0, 3001)).unwrap();

		for target in [8000, 11024, 22050, 44100, 96000] {
			let expected = num_output_frames(3001, 11025, target);
			for mode in ResampleMode::iter() {
				let out = resample(&w, target, mode).unwrap();
				assert_eq!(out.num_frames(), expected, "{mode} {target}hz");
				assert_eq!(out.num_channels(), 2);
				assert_eq!(out.frame_rate_hz(), target);
			}
		}
	}

	#[test]
	fn dc_is_kept() {
		// A constant signal stays (roughly) constant away from the edges.
		let w = Waveform::new(8000, 1, vec![0.5; 8000]).unwrap();

		for target in [4000, 16000] {
			for mode in ResampleMode::iter() {
				let out = resample(&w, target, mode).unwrap();
				let n = out.num_samples();
				for s in &out.interleaved_samples()[n / 4..n * 3 / 4] {
					assert!((s - 0.5).abs() < 2e-2, "{mode} {target}hz: {s}");
				}
			}
		}
	}
}
