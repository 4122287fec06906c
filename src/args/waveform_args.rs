//---------------------------------------------------------------------------------------------------- use
use crate::{
	args::ResampleMode,
	constants::{
		DEFAULT_CONVERT_TO_MONO,
		DEFAULT_END_TIME_MILLISECONDS,
		DEFAULT_FRAME_RATE_HZ,
		DEFAULT_NUM_CHANNELS,
		DEFAULT_REPEAT_PAD_ENDING,
		DEFAULT_RESAMPLE_MODE,
		DEFAULT_START_TIME_MILLISECONDS,
		DEFAULT_ZERO_PAD_ENDING,
	},
};

#[allow(unused_imports)] // docs
use crate::{Waveform, WaveformError};

//---------------------------------------------------------------------------------------------------- WaveformArgs
/// What transformations to apply to decoded audio.
///
/// [`WaveformArgs::DEFAULT`] decodes the audio as-is and changes nothing.
///
/// The `0` values of [`Self::end_time_milliseconds`], [`Self::num_channels`]
/// and [`Self::frame_rate_hz`] mean "use whatever the source has".
///
/// The options are checked against each other and against the
/// source audio before anything else happens, a contradictory
/// set of options returns a [`WaveformError`] instead of a guess.
///
/// ```rust
/// # use waveslice::*;
/// let args = WaveformArgs::DEFAULT
///     .set_end_time_milliseconds(30_000)
///     .set_zero_pad_ending(true)
///     .set_convert_to_mono(true)
///     .set_frame_rate_hz(16_000);
///
/// assert_eq!(args.end_time_milliseconds, 30_000);
/// assert_eq!(args.resample_mode, ResampleMode::Rubato);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Copy,Clone,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct WaveformArgs {
	/// Audio before this millisecond offset is discarded.
	///
	/// `0` starts at the beginning.
	pub start_time_milliseconds: u64,

	/// Audio after this millisecond offset is discarded.
	///
	/// `0` continues until the end of the audio. If set,
	/// it must be greater than [`Self::start_time_milliseconds`].
	pub end_time_milliseconds: u64,

	/// Frame rate to resample to.
	///
	/// `0` keeps the original frame rate.
	/// The ratio to the original rate must be within `[1/256, 256]`.
	pub frame_rate_hz: u32,

	/// Keep only the first `n` channels.
	///
	/// `0` keeps all channels. Must not exceed the source's channel count.
	pub num_channels: u32,

	/// Average the (selected) channels into one channel.
	///
	/// Cannot be combined with `num_channels = 1`, use `num_channels = n > 1`
	/// to average only the first `n` channels.
	pub convert_to_mono: bool,

	/// Pad the ending with silence so the output is exactly
	/// `end_time_milliseconds - start_time_milliseconds` long.
	///
	/// Requires [`Self::end_time_milliseconds`], excludes [`Self::repeat_pad_ending`].
	pub zero_pad_ending: bool,

	/// Pad the ending by looping the audio (from the start offset)
	/// so the output is exactly `end_time_milliseconds - start_time_milliseconds` long.
	///
	/// Requires [`Self::end_time_milliseconds`], excludes [`Self::zero_pad_ending`].
	pub repeat_pad_ending: bool,

	/// The algorithm used if [`Self::frame_rate_hz`] changes the frame rate.
	pub resample_mode: ResampleMode,
}

//---------------------------------------------------------------------------------------------------- WaveformArgs Impl
impl WaveformArgs {
	/// Change nothing.
	///
	/// ```rust
	/// # use waveslice::*;
	/// assert_eq!(WaveformArgs::DEFAULT, WaveformArgs {
	///     start_time_milliseconds: 0,
	///     end_time_milliseconds:   0,
	///     frame_rate_hz:           0,
	///     num_channels:            0,
	///     convert_to_mono:         false,
	///     zero_pad_ending:         false,
	///     repeat_pad_ending:       false,
	///     resample_mode:           ResampleMode::Rubato,
	/// });
	/// ```
	pub const DEFAULT: Self = Self {
		start_time_milliseconds: DEFAULT_START_TIME_MILLISECONDS,
		end_time_milliseconds:   DEFAULT_END_TIME_MILLISECONDS,
		frame_rate_hz:           DEFAULT_FRAME_RATE_HZ,
		num_channels:            DEFAULT_NUM_CHANNELS,
		convert_to_mono:         DEFAULT_CONVERT_TO_MONO,
		zero_pad_ending:         DEFAULT_ZERO_PAD_ENDING,
		repeat_pad_ending:       DEFAULT_REPEAT_PAD_ENDING,
		resample_mode:           DEFAULT_RESAMPLE_MODE,
	};

	#[must_use]
	/// Set [`Self::start_time_milliseconds`].
	pub const fn set_start_time_milliseconds(mut self, start_time_milliseconds: u64) -> Self {
		self.start_time_milliseconds = start_time_milliseconds;
		self
	}

	#[must_use]
	/// Set [`Self::end_time_milliseconds`].
	pub const fn set_end_time_milliseconds(mut self, end_time_milliseconds: u64) -> Self {
		self.end_time_milliseconds = end_time_milliseconds;
		self
	}

	#[must_use]
	/// Set [`Self::frame_rate_hz`].
	pub const fn set_frame_rate_hz(mut self, frame_rate_hz: u32) -> Self {
		self.frame_rate_hz = frame_rate_hz;
		self
	}

	#[must_use]
	/// Set [`Self::num_channels`].
	pub const fn set_num_channels(mut self, num_channels: u32) -> Self {
		self.num_channels = num_channels;
		self
	}

	#[must_use]
	/// Set [`Self::convert_to_mono`].
	pub const fn set_convert_to_mono(mut self, convert_to_mono: bool) -> Self {
		self.convert_to_mono = convert_to_mono;
		self
	}

	#[must_use]
	/// Set [`Self::zero_pad_ending`].
	pub const fn set_zero_pad_ending(mut self, zero_pad_ending: bool) -> Self {
		self.zero_pad_ending = zero_pad_ending;
		self
	}

	#[must_use]
	/// Set [`Self::repeat_pad_ending`].
	pub const fn set_repeat_pad_ending(mut self, repeat_pad_ending: bool) -> Self {
		self.repeat_pad_ending = repeat_pad_ending;
		self
	}

	#[must_use]
	/// Set [`Self::resample_mode`].
	pub const fn set_resample_mode(mut self, resample_mode: ResampleMode) -> Self {
		self.resample_mode = resample_mode;
		self
	}
}

impl Default for WaveformArgs {
	fn default() -> Self {
		Self::DEFAULT
	}
}
