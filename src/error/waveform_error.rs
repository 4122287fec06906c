//---------------------------------------------------------------------------------------------------- use
use crate::error::DecodeError;
use strum::IntoStaticStr;

#[allow(unused_imports)] // docs
use crate::{WaveformArgs, Waveform};

//---------------------------------------------------------------------------------------------------- WaveformError
#[derive(thiserror::Error, IntoStaticStr, Debug)]
/// All errors that can occur while creating or transforming a [`Waveform`].
///
/// Every error is terminal; nothing is retried and no partial [`Waveform`] is returned.
///
/// The variants before [`WaveformError::DecodeFailed`] are validation errors
/// that indicate the [`WaveformArgs`] contradict themselves or the source audio.
///
/// [`IntoStaticStr`] gives the variant name, e.g. `"WrongTimeOffset"`.
pub enum WaveformError {
	//------------------------------------------ Validation
	#[error("both `zero_pad_ending` and `repeat_pad_ending` were set, pick one")]
	/// [`WaveformArgs::zero_pad_ending`] and [`WaveformArgs::repeat_pad_ending`] were both `true`.
	CannotZeroPadAndRepeatPad,

	#[error("`start_time_milliseconds` ({start}ms) must be smaller than `end_time_milliseconds` ({end}ms)")]
	/// The start offset was not before the explicit end offset.
	WrongTimeOffset {
		/// [`WaveformArgs::start_time_milliseconds`]
		start: u64,
		/// [`WaveformArgs::end_time_milliseconds`]
		end: u64,
	},

	#[error("cannot zero-pad without `end_time_milliseconds` specifying where the ending is")]
	/// [`WaveformArgs::zero_pad_ending`] was set without an end offset.
	CannotZeroPad,

	#[error("cannot repeat-pad without `end_time_milliseconds` specifying where the ending is")]
	/// [`WaveformArgs::repeat_pad_ending`] was set without an end offset.
	CannotRepeatPad,

	#[error("asked for the first {requested} channels, but the audio only has {actual} channels")]
	/// More channels were requested than the source has.
	WrongNumChannels {
		/// [`WaveformArgs::num_channels`]
		requested: u32,
		/// The source's channel count.
		actual: u32,
	},

	#[error("cannot set both `convert_to_mono` and `num_channels = 1`")]
	/// [`WaveformArgs::convert_to_mono`] was set together with `num_channels = 1`.
	WrongNumChannelsAndMono,

	#[error("cannot resample from {source_hz}hz to {target_hz}hz, the ratio must be within 1/256 and 256")]
	/// The target/source frame rate ratio was outside of `[1/256, 256]`.
	WrongFrameRateRatio {
		/// The source frame rate.
		source_hz: u32,
		/// The requested frame rate.
		target_hz: u32,
	},

	#[error("cannot resample from {source_hz}hz to {target_hz}hz")]
	/// A source frame rate of `0` reached the resampler directly.
	WrongFrameRate {
		/// The source frame rate.
		source_hz: u32,
		/// The requested frame rate.
		target_hz: u32,
	},

	#[error("interleaved buffer of {num_samples} samples does not divide into {num_channels} channels")]
	/// Caller-provided samples could not form whole frames.
	WrongSampleCount {
		/// Length of the interleaved buffer.
		num_samples: usize,
		/// Requested channel count.
		num_channels: u32,
	},

	//------------------------------------------ Decoding
	#[error("failed to decode audio: {0}")]
	/// The decoder could not turn the source into samples.
	DecodeFailed(#[from] DecodeError),

	//------------------------------------------ Resampling
	#[error("resampler failure: {0}")]
	/// A resampler failed, e.g. `rubato` rejected its parameters.
	Resample(String),

	//------------------------------------------ Memory
	#[error("{num_frames} frames of {num_channels} channels do not fit in memory")]
	/// The output buffer would be too large to allocate, e.g.
	/// a padded window ending at `u64::MAX` milliseconds.
	TooManyFrames {
		/// Frames the output would need.
		num_frames: u64,
		/// Channels per frame.
		num_channels: u32,
	},

	//------------------------------------------ I/O
	#[error("file not found: {0}")]
	/// The path to decode does not exist.
	FileNotFound(String),

	#[error("path is a directory, not an audio file: {0}")]
	/// The path to decode is a directory.
	FilenameIsADirectory(String),

	#[error("io error: {0}")]
	/// Any other I/O error.
	Io(#[from] std::io::Error),

	#[error("failed to encode WAV: {0}")]
	/// WAV export failed.
	Encode(#[from] hound::Error),
}

impl WaveformError {
	#[must_use]
	/// Returns `true` for errors raised by argument validation,
	/// i.e. caller programming errors.
	pub const fn is_validation(&self) -> bool {
		matches!(
			self,
			Self::CannotZeroPadAndRepeatPad |
			Self::WrongTimeOffset { .. } |
			Self::CannotZeroPad |
			Self::CannotRepeatPad |
			Self::WrongNumChannels { .. } |
			Self::WrongNumChannelsAndMono |
			Self::WrongFrameRateRatio { .. } |
			Self::WrongFrameRate { .. } |
			Self::WrongSampleCount { .. }
		)
	}

	#[must_use]
	/// The variant's name, e.g. `"WrongTimeOffset"`.
	pub fn kind(&self) -> &'static str {
		self.into()
	}
}
