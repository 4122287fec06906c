// Frame rate conversion
//
// This file defines the `Resampler` trait.
//
// An implementor takes interleaved [f32] samples at one
// frame rate and returns interleaved samples at another.
//
// How many frames come out is NOT up to the implementor,
// it is computed once by the caller and passed in, so that
// every implementor returns exactly the same length for the
// same input.
//
// Creating a `Resampler` may be heavy (tables, buffers),
// `Resampler::resample()` reuses whatever was created.

//----------------------------------------------------------------------------------------------- use
use std::num::{NonZeroU32, NonZeroUsize};
use crate::error::WaveformError;

//----------------------------------------------------------------------------------------------- Resampler
pub(crate) trait Resampler
where
	Self: Sized,
{
	/// Create a new [`Resampler`] for the provided shape.
	///
	/// The ratio between the 2 frame rates is already checked.
	fn new(
		source_hz: NonZeroU32,       // What is the original audio's frame rate?
		target_hz: NonZeroU32,       // What is the desired frame rate?
		num_channels: NonZeroUsize,  // How many audio channels are there?
	) -> Result<Self, WaveformError>;

	/// Resample interleaved `input` into exactly `num_output_frames` frames.
	///
	/// Input and output are both interleaved.
	///
	/// | L   | R   | Interleaved |
	/// |-----|-----|-------------|
	/// | [0] | [0] | L[0]        |
	/// | [1] | [1] | R[0]        |
	/// | [2] | [2] | L[1]        |
	/// | [3] | [3] | R[1]        |
	/// | ... | ... | ...         |
	fn resample(&mut self, input: &[f32], num_output_frames: usize) -> Result<Vec<f32>, WaveformError>;
}
