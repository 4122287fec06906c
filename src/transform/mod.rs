//! The transformation pipeline.
//!
//! ```text
//! DecodedSource -> time window -> channels -> resample -> Waveform
//! ```
//!
//! Each stage consumes a [`Waveform`] and returns a new one.
//! A stage whose option is at its default returns its input untouched.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	args::TransformPlan,
	error::WaveformError,
	resample,
	waveform::Waveform,
	macros::{debug2, trace2},
};

mod time_window;
mod channels;

//---------------------------------------------------------------------------------------------------- Free functions
/// `floor(milliseconds * frame_rate_hz / 1000)`.
///
/// Saturates at [`u64::MAX`] instead of overflowing.
pub(crate) fn milliseconds_to_frames(milliseconds: u64, frame_rate_hz: u32) -> u64 {
	let frames = u128::from(milliseconds) * u128::from(frame_rate_hz) / 1000;
	u64::try_from(frames).unwrap_or(u64::MAX)
}

/// Run every stage of `plan` over `waveform`.
pub(crate) fn apply(waveform: Waveform, plan: &TransformPlan) -> Result<Waveform, WaveformError> {
	plan.check_source(waveform.num_channels(), waveform.frame_rate_hz())?;

	debug2!("transform - input {waveform}");

	let waveform = time_window::extract(waveform, plan)?;
	trace2!("transform - after time window {waveform}");

	let waveform = channels::remix(waveform, plan);
	trace2!("transform - after channels {waveform}");

	let waveform = match plan.frame_rate_hz {
		Some(target) => resample::resample_owned(waveform, target.get(), plan.resample_mode)?,
		None => waveform,
	};

	debug2!("transform - output {waveform}");
	Ok(waveform)
}
