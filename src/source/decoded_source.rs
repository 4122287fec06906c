//---------------------------------------------------------------------------------------------------- Use
use crate::error::WaveformError;

//---------------------------------------------------------------------------------------------------- DecodedSource
/// The raw output of the decoder.
///
/// Interleaved `f32` samples plus the shape of the audio,
/// before any [`WaveformArgs`](crate::WaveformArgs) are applied.
///
/// INVARIANT: `samples.len() % num_channels == 0` and `num_channels > 0`.
#[derive(Clone,Debug,PartialEq)]
pub struct DecodedSource {
	samples: Vec<f32>,
	num_channels: u32,
	frame_rate_hz: u32,
}

impl DecodedSource {
	/// Wrap samples produced by some decoder.
	///
	/// # Errors
	/// [`WaveformError::WrongSampleCount`] if `samples` does not
	/// divide into whole frames of `num_channels`.
	pub fn new(samples: Vec<f32>, num_channels: u32, frame_rate_hz: u32) -> Result<Self, WaveformError> {
		if num_channels == 0 || samples.len() % num_channels as usize != 0 {
			return Err(WaveformError::WrongSampleCount {
				num_samples: samples.len(),
				num_channels,
			});
		}

		Ok(Self { samples, num_channels, frame_rate_hz })
	}

	#[must_use]
	/// Interleaved samples.
	pub fn samples(&self) -> &[f32] {
		&self.samples
	}

	#[must_use]
	/// Channel count of the audio.
	pub const fn num_channels(&self) -> u32 {
		self.num_channels
	}

	#[must_use]
	/// Frame rate of the audio.
	pub const fn frame_rate_hz(&self) -> u32 {
		self.frame_rate_hz
	}

	#[must_use]
	/// `samples.len() / num_channels`.
	pub fn num_frames(&self) -> u64 {
		(self.samples.len() / self.num_channels as usize) as u64
	}

	#[must_use]
	/// Take the parts out.
	pub fn into_parts(self) -> (Vec<f32>, u32, u32) {
		(self.samples, self.num_channels, self.frame_rate_hz)
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new() {
		let d = DecodedSource::new(vec![0.0; 6], 2, 8000).unwrap();
		assert_eq!(d.num_frames(), 3);
		assert_eq!(d.num_channels(), 2);
		assert_eq!(d.frame_rate_hz(), 8000);

		assert_eq!(DecodedSource::new(vec![0.0; 5], 2, 8000).unwrap_err().kind(), "WrongSampleCount");
		assert_eq!(DecodedSource::new(vec![], 0, 8000).unwrap_err().kind(), "WrongSampleCount");
	}
}
