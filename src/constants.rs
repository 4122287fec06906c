//! Crate-wide constants.
//!
//! These are the default values of [`WaveformArgs`] and the
//! fixed parameters of the resampling kernels.

//---------------------------------------------------------------------------------------------------- Use
#[allow(unused_imports)] // docs
use crate::{WaveformArgs, ResampleMode};

//---------------------------------------------------------------------------------------------------- WaveformArgs defaults
/// Start decoding from the beginning.
pub const DEFAULT_START_TIME_MILLISECONDS: u64 = 0;
/// Decode until the end of the source.
pub const DEFAULT_END_TIME_MILLISECONDS: u64 = 0;
/// Keep the source's frame rate.
pub const DEFAULT_FRAME_RATE_HZ: u32 = 0;
/// Keep all of the source's channels.
pub const DEFAULT_NUM_CHANNELS: u32 = 0;
/// Do not average channels into mono.
pub const DEFAULT_CONVERT_TO_MONO: bool = false;
/// Do not zero-pad the ending.
pub const DEFAULT_ZERO_PAD_ENDING: bool = false;
/// Do not repeat-pad the ending.
pub const DEFAULT_REPEAT_PAD_ENDING: bool = false;
/// The [`ResampleMode`] used when none is specified.
pub const DEFAULT_RESAMPLE_MODE: ResampleMode = ResampleMode::Rubato;

//---------------------------------------------------------------------------------------------------- Resampling
/// The maximum factor between the source and target frame
/// rate, whether upsampling or downsampling.
pub const MAX_FRAME_RATE_RATIO: u64 = 256;

/// Half-width (in input frames) of the Lanczos kernel.
pub(crate) const LANCZOS_KERNEL_A: usize = 5;

/// Zero-crossings per wing of the windowed-sinc table.
pub(crate) const SINC_NUM_ZEROS: usize = 64;
/// Table entries per zero-crossing (`2^9`).
pub(crate) const SINC_PRECISION: usize = 512;
/// Fraction of the Nyquist frequency kept by the sinc filter.
pub(crate) const SINC_ROLLOFF: f64 = 0.945;

/// Input frames fed to `rubato` per call.
pub(crate) const RUBATO_CHUNK_SIZE: usize = 1024;
/// Length of `rubato`'s sinc interpolation filter.
pub(crate) const RUBATO_SINC_LEN: usize = 256;
/// Cutoff of `rubato`'s sinc filter, relative to Nyquist.
pub(crate) const RUBATO_F_CUTOFF: f32 = 0.95;
/// `rubato`'s filter table oversampling.
pub(crate) const RUBATO_OVERSAMPLING_FACTOR: usize = 256;

//---------------------------------------------------------------------------------------------------- Decoding
/// Buffer size of the `symphonia` media source stream.
pub(crate) const MEDIA_SOURCE_STREAM_BUFFER_LEN: usize = 64 * 1024;

/// Most samples reserved up front from a container's stated length,
/// about 3 minutes of 44.1khz stereo.
///
/// Longer audio grows the buffer while decoding.
pub(crate) const MAX_PREALLOCATED_SAMPLES: usize = 1 << 24;

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sinc_table_fits_lowest_ratio() {
		// At the lowest ratio the table is strided
		// by `SINC_PRECISION / 256`, which must be >= 1.
		assert!(SINC_PRECISION as u64 / MAX_FRAME_RATE_RATIO >= 1);
	}

	#[test]
	fn rubato_chunk_outputs_at_lowest_ratio() {
		// A chunk must always produce at least one output frame.
		assert!(RUBATO_CHUNK_SIZE as u64 / MAX_FRAME_RATE_RATIO >= 1);
	}
}
