//! Channel selection and mono downmix.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	args::TransformPlan,
	waveform::Waveform,
};

//---------------------------------------------------------------------------------------------------- Remix
/// Keep the first `plan.num_channels` channels, then
/// average them into 1 channel if `plan.convert_to_mono`.
///
/// The requested channel count must already be checked
/// against the source, see [`TransformPlan::check_source`].
pub(super) fn remix(waveform: Waveform, plan: &TransformPlan) -> Waveform {
	if plan.keeps_channels() {
		return waveform;
	}

	let source_channels = waveform.num_channels();
	let keep = plan
		.num_channels
		.map_or(source_channels, |n| n.get().min(source_channels));

	if keep == source_channels && !plan.convert_to_mono {
		return waveform;
	}

	let rate = waveform.frame_rate_hz();
	let frames = waveform
		.interleaved_samples()
		.chunks_exact(source_channels as usize)
		.map(|frame| &frame[..keep as usize]);

	if plan.convert_to_mono {
		let divisor = keep as f32;
		let samples = frames.map(|frame| frame.iter().sum::<f32>() / divisor).collect();
		Waveform::from_parts(samples, rate, 1)
	} else {
		let samples = frames.flatten().copied().collect();
		Waveform::from_parts(samples, rate, keep)
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::WaveformArgs;
	use pretty_assertions::assert_eq;

	/// 2 frames, 3 channels.
	fn three() -> Waveform {
		Waveform::new(100, 3, vec![1.0, 2.0, 6.0, -1.0, -3.0, 1.0]).unwrap()
	}

	fn run(w: Waveform, args: WaveformArgs) -> Waveform {
		remix(w, &TransformPlan::try_from_args(&args).unwrap())
	}

	#[test]
	fn keep_all() {
		assert_eq!(run(three(), WaveformArgs::DEFAULT), three());
		assert_eq!(run(three(), WaveformArgs::DEFAULT.set_num_channels(3)), three());
	}

	#[test]
	fn first_channels() {
		let w = run(three(), WaveformArgs::DEFAULT.set_num_channels(2));
		assert_eq!(w.num_channels(), 2);
		assert_eq!(w.num_frames(), 2);
		assert_eq!(w.interleaved_samples(), [1.0, 2.0, -1.0, -3.0]);

		let w = run(three(), WaveformArgs::DEFAULT.set_num_channels(1));
		assert_eq!(w.interleaved_samples(), [1.0, -1.0]);
	}

	#[test]
	fn mono() {
		let w = run(three(), WaveformArgs::DEFAULT.set_convert_to_mono(true));
		assert_eq!(w.num_channels(), 1);
		assert_eq!(w.interleaved_samples(), [3.0, -1.0]);

		let w = run(three(), WaveformArgs::DEFAULT.set_num_channels(2).set_convert_to_mono(true));
		assert_eq!(w.interleaved_samples(), [1.5, -2.0]);
	}

	#[test]
	fn mono_of_mono() {
		let w = Waveform::new(100, 1, vec![0.25, 0.5]).unwrap();
		let args = WaveformArgs::DEFAULT.set_convert_to_mono(true);
		assert_eq!(run(w.clone(), args), w);
	}

	#[test]
	fn idempotent() {
		for args in [
			WaveformArgs::DEFAULT.set_num_channels(2),
			WaveformArgs::DEFAULT.set_convert_to_mono(true),
			WaveformArgs::DEFAULT.set_num_channels(2).set_convert_to_mono(true),
		] {
			let once = run(three(), args);
			let twice = run(once.clone(), args);
			assert_eq!(once, twice);
		}
	}
}
