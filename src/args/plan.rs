//! Validation of [`WaveformArgs`].
//!
//! [`WaveformArgs`] uses `0` as "unspecified" for a few fields.
//! Once validated, the arguments are turned into a [`TransformPlan`]
//! where those are explicit [`Option`]'s, so no pipeline stage ever
//! has to guess whether `0` means "nothing" or "zero".
//!
//! Checks happen in a fixed order and the first failure wins:
//!
//! 1. both padding modes                 -> [`WaveformError::CannotZeroPadAndRepeatPad`]
//! 2. `start >= end` (explicit end)      -> [`WaveformError::WrongTimeOffset`]
//! 3. padding without an explicit end    -> [`WaveformError::CannotZeroPad`] / [`WaveformError::CannotRepeatPad`]
//! 4. more channels than the source      -> [`WaveformError::WrongNumChannels`]
//! 5. `num_channels == 1` + mono         -> [`WaveformError::WrongNumChannelsAndMono`]
//! 6. frame rate ratio outside 1/256-256 -> [`WaveformError::WrongFrameRateRatio`]
//!
//! 1, 2, 3 and 5 do not depend on the source and are checked
//! before decoding. 4 and 6 are checked once the source is known.
//! 4 can only fail with `num_channels > 1` so it can never
//! shadow 5, which keeps the order above intact.

//---------------------------------------------------------------------------------------------------- Use
use std::num::{NonZeroU32, NonZeroU64};
use crate::{
	args::{WaveformArgs, ResampleMode},
	error::WaveformError,
	resample::check_frame_rate_ratio,
	macros::debug2,
};

//---------------------------------------------------------------------------------------------------- Padding
/// How to extend audio that ends before the requested end offset.
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub(crate) enum Padding {
	/// Return less audio than requested.
	None,
	/// Append silence.
	Zero,
	/// Loop the audio from the start offset.
	Repeat,
}

//---------------------------------------------------------------------------------------------------- TransformPlan
/// Validated [`WaveformArgs`].
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub(crate) struct TransformPlan {
	pub(crate) start_time_milliseconds: u64,
	/// [`None`] means until the end of the source.
	pub(crate) end_time_milliseconds: Option<NonZeroU64>,
	/// Always [`Padding::None`] if `end_time_milliseconds` is [`None`].
	pub(crate) padding: Padding,
	/// [`None`] keeps all channels.
	pub(crate) num_channels: Option<NonZeroU32>,
	pub(crate) convert_to_mono: bool,
	/// [`None`] keeps the source frame rate.
	pub(crate) frame_rate_hz: Option<NonZeroU32>,
	pub(crate) resample_mode: ResampleMode,
}

impl TransformPlan {
	/// Check everything that does not depend on the source audio.
	pub(crate) fn try_from_args(args: &WaveformArgs) -> Result<Self, WaveformError> {
		let result = Self::try_from_args_inner(args);
		if let Err(e) = &result {
			debug2!("TransformPlan - invalid args: {e}");
		}
		result
	}

	fn try_from_args_inner(args: &WaveformArgs) -> Result<Self, WaveformError> {
		// 1.
		if args.zero_pad_ending && args.repeat_pad_ending {
			return Err(WaveformError::CannotZeroPadAndRepeatPad);
		}

		let end_time_milliseconds = NonZeroU64::new(args.end_time_milliseconds);

		// 2.
		if let Some(end) = end_time_milliseconds {
			if args.start_time_milliseconds >= end.get() {
				return Err(WaveformError::WrongTimeOffset {
					start: args.start_time_milliseconds,
					end: end.get(),
				});
			}
		}

		// 3.
		let padding = match (args.zero_pad_ending, args.repeat_pad_ending) {
			(true, _) if end_time_milliseconds.is_none() => return Err(WaveformError::CannotZeroPad),
			(_, true) if end_time_milliseconds.is_none() => return Err(WaveformError::CannotRepeatPad),
			(true, _) => Padding::Zero,
			(_, true) => Padding::Repeat,
			_ => Padding::None,
		};

		// 5.
		if args.num_channels == 1 && args.convert_to_mono {
			return Err(WaveformError::WrongNumChannelsAndMono);
		}

		Ok(Self {
			start_time_milliseconds: args.start_time_milliseconds,
			end_time_milliseconds,
			padding,
			num_channels: NonZeroU32::new(args.num_channels),
			convert_to_mono: args.convert_to_mono,
			frame_rate_hz: NonZeroU32::new(args.frame_rate_hz),
			resample_mode: args.resample_mode,
		})
	}

	/// Check the plan against the source's shape.
	pub(crate) fn check_source(&self, num_channels: u32, frame_rate_hz: u32) -> Result<(), WaveformError> {
		// 4.
		if let Some(requested) = self.num_channels {
			if requested.get() > num_channels {
				debug2!("TransformPlan - {requested} channels requested, source has {num_channels}");
				return Err(WaveformError::WrongNumChannels {
					requested: requested.get(),
					actual: num_channels,
				});
			}
		}

		// 6.
		if let Some(target) = self.frame_rate_hz {
			check_frame_rate_ratio(frame_rate_hz, target.get())?;
		}

		Ok(())
	}

	/// Whether the channel stage has nothing to do.
	pub(crate) const fn keeps_channels(&self) -> bool {
		self.num_channels.is_none() && !self.convert_to_mono
	}
}

//---------------------------------------------------------------------------------------------------- WaveformArgs validation
impl WaveformArgs {
	/// Check the arguments that do not depend on the source audio.
	///
	/// This runs before any decoding work.
	///
	/// # Errors
	/// The first failing check, see [`WaveformArgs::validate`].
	pub fn validate_request(&self) -> Result<(), WaveformError> {
		TransformPlan::try_from_args(self).map(|_| ())
	}

	/// Check the arguments against a source with
	/// `num_channels` channels at `frame_rate_hz`.
	///
	/// This is a pure check, nothing is decoded or allocated.
	///
	/// # Errors
	/// Checked in this order, the first failure is returned:
	///
	/// 1. [`WaveformError::CannotZeroPadAndRepeatPad`]
	/// 2. [`WaveformError::WrongTimeOffset`]
	/// 3. [`WaveformError::CannotZeroPad`] / [`WaveformError::CannotRepeatPad`]
	/// 4. [`WaveformError::WrongNumChannels`]
	/// 5. [`WaveformError::WrongNumChannelsAndMono`]
	/// 6. [`WaveformError::WrongFrameRateRatio`]
	///
	/// ```rust
	/// # use waveslice::*;
	/// let args = WaveformArgs::DEFAULT.set_frame_rate_hz(172);
	/// assert!(matches!(args.validate(2, 44100), Err(WaveformError::WrongFrameRateRatio { .. })));
	///
	/// let args = WaveformArgs::DEFAULT.set_frame_rate_hz(173);
	/// assert!(args.validate(2, 44100).is_ok());
	/// ```
	pub fn validate(&self, num_channels: u32, frame_rate_hz: u32) -> Result<(), WaveformError> {
		TransformPlan::try_from_args(self)?.check_source(num_channels, frame_rate_hz)
	}
}
