//! Time-window extraction with zero/repeat padding.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	args::{Padding, TransformPlan},
	error::WaveformError,
	transform::milliseconds_to_frames,
	waveform::Waveform,
};

//---------------------------------------------------------------------------------------------------- Extract
/// Cut `waveform` down to the plan's millisecond window.
///
/// - `start_frame = floor(start_ms * rate / 1000)`
/// - `end_frame   = floor(end_ms * rate / 1000)`, or the source's end if unspecified
///
/// If the window goes past the end of the source, the result is
/// either shorter ([`Padding::None`]), padded with silence
/// ([`Padding::Zero`]) or padded by looping `[start_frame, end)`
/// of the source ([`Padding::Repeat`]). Padded results are always
/// exactly `end_frame - start_frame` frames.
///
/// # Errors
/// [`WaveformError::TooManyFrames`] if the padded window cannot be allocated.
pub(super) fn extract(waveform: Waveform, plan: &TransformPlan) -> Result<Waveform, WaveformError> {
	let num_frames = waveform.num_frames();
	let rate = waveform.frame_rate_hz();

	let start_frame = milliseconds_to_frames(plan.start_time_milliseconds, rate);
	let end_frame = match plan.end_time_milliseconds {
		Some(end) => milliseconds_to_frames(end.get(), rate),
		None => num_frames,
	};

	if start_frame == 0 && end_frame == num_frames {
		return Ok(waveform);
	}

	// A coarse frame rate can floor both bounds to the same frame.
	let start_frame = start_frame.min(end_frame);

	// The part of the window that exists in the source.
	let content_start = start_frame.min(num_frames);
	let content_end = end_frame.min(num_frames);

	let out_frames = if end_frame > num_frames && plan.padding != Padding::None {
		end_frame - start_frame
	} else {
		content_end - content_start
	};

	let num_channels = waveform.num_channels();
	let channels = num_channels as usize;

	let too_many = WaveformError::TooManyFrames { num_frames: out_frames, num_channels };
	let Some(out_samples) = usize::try_from(out_frames).ok().and_then(|f| f.checked_mul(channels)) else {
		return Err(too_many);
	};

	let samples = waveform.interleaved_samples();
	let content = &samples[content_start as usize * channels..content_end as usize * channels];

	let mut out = Vec::new();
	if out.try_reserve_exact(out_samples).is_err() {
		return Err(too_many);
	}
	out.extend_from_slice(content);

	let missing = out_samples - out.len();
	match plan.padding {
		// Nothing to loop, so silence is all we can repeat.
		Padding::Repeat if !content.is_empty() => {
			out.extend(content.iter().cycle().take(missing));
		},
		Padding::Zero | Padding::Repeat => out.resize(out_samples, 0.0),
		Padding::None => debug_assert_eq!(missing, 0),
	}

	Ok(Waveform::from_parts(out, rate, num_channels))
}
