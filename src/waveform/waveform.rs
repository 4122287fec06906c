//---------------------------------------------------------------------------------------------------- Use
use std::{
	fmt,
	io::Read,
	path::Path,
	time::Duration,
};
use crate::{
	args::{DecodeHint, ResampleMode, TransformPlan, WaveformArgs},
	error::WaveformError,
	source::{source_decode, DecodedSource, Source},
	transform,
	resample,
	macros::debug2,
};

//---------------------------------------------------------------------------------------------------- Waveform
/// Decoded, transformed audio.
///
/// A [`Waveform`] owns a buffer of interleaved `f32` samples
/// along with its frame rate and channel count.
///
/// It cannot be mutated, every transformation returns a new
/// [`Waveform`], so sharing one across threads is free of locks.
///
/// INVARIANT: `interleaved_samples().len() == num_frames() * num_channels()`.
///
/// ```rust
/// # use waveslice::*;
/// let silence = Waveform::from_frames_of_silence(44100, 2, 1000);
/// assert_eq!(silence.num_frames(), 1000);
/// assert_eq!(silence.num_channels(), 2);
/// assert_eq!(silence.num_samples(), 2000);
/// assert!(silence.interleaved_samples().iter().all(|s| *s == 0.0));
/// ```
#[derive(Clone,PartialEq)]
pub struct Waveform {
	samples: Vec<f32>,
	frame_rate_hz: u32,
	num_channels: u32,
	num_frames: u64,
}

//---------------------------------------------------------------------------------------------------- Construction
impl Waveform {
	/// Internal constructor, the caller guarantees whole frames.
	pub(crate) fn from_parts(samples: Vec<f32>, frame_rate_hz: u32, num_channels: u32) -> Self {
		debug_assert!(num_channels > 0);
		debug_assert_eq!(samples.len() % num_channels as usize, 0);
		let num_frames = (samples.len() / num_channels as usize) as u64;
		Self { samples, frame_rate_hz, num_channels, num_frames }
	}

	/// Create a [`Waveform`] from interleaved samples.
	///
	/// # Errors
	/// [`WaveformError::WrongSampleCount`] if `num_channels` is `0`
	/// or `interleaved_samples` does not divide into whole frames.
	///
	/// ```rust
	/// # use waveslice::*;
	/// let w = Waveform::new(8000, 2, vec![0.1, -0.1, 0.2, -0.2]).unwrap();
	/// assert_eq!(w.num_frames(), 2);
	/// assert_eq!(w.get_sample(1, 1), Some(-0.2));
	///
	/// assert!(Waveform::new(8000, 2, vec![0.0; 3]).is_err());
	/// ```
	pub fn new(frame_rate_hz: u32, num_channels: u32, interleaved_samples: Vec<f32>) -> Result<Self, WaveformError> {
		let decoded = DecodedSource::new(interleaved_samples, num_channels, frame_rate_hz)?;
		Ok(Self::from(decoded))
	}

	#[must_use]
	/// `num_frames` frames of silence.
	///
	/// A `num_channels` of `0` is treated as `1`,
	/// a [`Waveform`] always has at least 1 channel.
	///
	/// # Panics
	/// Like [`vec!`], if `num_frames * num_channels`
	/// samples cannot be allocated.
	pub fn from_frames_of_silence(frame_rate_hz: u32, num_channels: u32, num_frames: u64) -> Self {
		let num_channels = num_channels.max(1);
		let len = usize::try_from(num_frames)
			.unwrap_or(usize::MAX)
			.saturating_mul(num_channels as usize);

		Self {
			samples: vec![0.0; len],
			frame_rate_hz,
			num_channels,
			num_frames,
		}
	}

	#[must_use]
	/// `duration_milliseconds` of silence, rounded down to whole frames.
	///
	/// ```rust
	/// # use waveslice::*;
	/// let w = Waveform::from_milliseconds_of_silence(44100, 1, 1);
	/// assert_eq!(w.num_frames(), 44);
	/// ```
	pub fn from_milliseconds_of_silence(frame_rate_hz: u32, num_channels: u32, duration_milliseconds: u64) -> Self {
		let num_frames = transform::milliseconds_to_frames(duration_milliseconds, frame_rate_hz);
		Self::from_frames_of_silence(frame_rate_hz, num_channels, num_frames)
	}

	/// Apply `args` to already decoded audio.
	///
	/// # Errors
	/// Any validation error of [`WaveformArgs::validate`].
	///
	/// ```rust
	/// # use waveslice::*;
	/// let decoded = DecodedSource::new(vec![0.5; 44100 * 2], 2, 44100).unwrap();
	/// let args = WaveformArgs::DEFAULT.set_end_time_milliseconds(1);
	///
	/// let w = Waveform::from_decoded(decoded, &args).unwrap();
	/// assert_eq!(w.num_frames(), 44);
	/// assert_eq!(w.num_channels(), 2);
	/// assert_eq!(w.frame_rate_hz(), 44100);
	/// ```
	pub fn from_decoded(decoded: DecodedSource, args: &WaveformArgs) -> Result<Self, WaveformError> {
		let plan = TransformPlan::try_from_args(args)?;
		transform::apply(Self::from(decoded), &plan)
	}

	/// Decode a [`Source`] and apply `args`.
	///
	/// `args` are checked before decoding starts, so
	/// contradictory arguments fail without any decoding work.
	///
	/// # Errors
	/// Validation, I/O and decoding errors.
	pub fn from_source(source: &Source, args: &WaveformArgs) -> Result<Self, WaveformError> {
		Self::from_source_with_hint(source, args, &source.hint())
	}

	/// [`Self::from_source`] with an explicit [`DecodeHint`].
	///
	/// # Errors
	/// Validation, I/O and decoding errors.
	pub fn from_source_with_hint(source: &Source, args: &WaveformArgs, hint: &DecodeHint) -> Result<Self, WaveformError> {
		let plan = TransformPlan::try_from_args(args)?;
		debug2!("Waveform - decoding {source:?}");
		let decoded = source.decode_with_hint(hint)?;
		transform::apply(Self::from(decoded), &plan)
	}

	/// Decode the file at `path` and apply `args`.
	///
	/// The file extension is given to the decoder as a hint.
	///
	/// # Errors
	/// Validation, I/O and decoding errors.
	pub fn from_file(path: impl AsRef<Path>, args: &WaveformArgs) -> Result<Self, WaveformError> {
		Self::from_source(&Source::from(path.as_ref()), args)
	}

	/// Decode encoded bytes (e.g. the contents of an MP3 file) and apply `args`.
	///
	/// # Errors
	/// Validation and decoding errors.
	pub fn from_encoded_bytes(bytes: &[u8], args: &WaveformArgs) -> Result<Self, WaveformError> {
		Self::from_encoded_bytes_with_hint(bytes, args, &DecodeHint::NONE)
	}

	/// [`Self::from_encoded_bytes`] with a [`DecodeHint`].
	///
	/// # Errors
	/// Validation and decoding errors.
	pub fn from_encoded_bytes_with_hint(bytes: &[u8], args: &WaveformArgs, hint: &DecodeHint) -> Result<Self, WaveformError> {
		Self::from_source_with_hint(&Source::from(bytes), args, hint)
	}

	/// Decode a non-seekable stream and apply `args`.
	///
	/// # Errors
	/// Validation, I/O and decoding errors.
	pub fn from_encoded_stream<R>(reader: R, args: &WaveformArgs) -> Result<Self, WaveformError>
	where
		R: Read + Send + Sync + 'static,
	{
		Self::from_encoded_stream_with_hint(reader, args, &DecodeHint::NONE)
	}

	/// [`Self::from_encoded_stream`] with a [`DecodeHint`].
	///
	/// # Errors
	/// Validation, I/O and decoding errors.
	pub fn from_encoded_stream_with_hint<R>(reader: R, args: &WaveformArgs, hint: &DecodeHint) -> Result<Self, WaveformError>
	where
		R: Read + Send + Sync + 'static,
	{
		let plan = TransformPlan::try_from_args(args)?;
		let decoded = source_decode::decode(source_decode::read_only(reader), hint)?;
		transform::apply(Self::from(decoded), &plan)
	}
}

impl From<DecodedSource> for Waveform {
	fn from(decoded: DecodedSource) -> Self {
		let (samples, num_channels, frame_rate_hz) = decoded.into_parts();
		Self::from_parts(samples, frame_rate_hz, num_channels)
	}
}

//---------------------------------------------------------------------------------------------------- Resampling
impl Waveform {
	/// Resample to `frame_rate_hz` with the default [`ResampleMode`].
	///
	/// # Errors
	/// See [`Self::resample_by_mode`].
	pub fn resample(&self, frame_rate_hz: u32) -> Result<Self, WaveformError> {
		self.resample_by_mode(frame_rate_hz, ResampleMode::default())
	}

	/// Resample to `frame_rate_hz` with a specific [`ResampleMode`].
	///
	/// The output has `round(num_frames * frame_rate_hz / self.frame_rate_hz)`
	/// frames (ties to even) regardless of `mode`.
	///
	/// Resampling to the current frame rate, or to `0`,
	/// returns an identical copy.
	///
	/// # Errors
	/// - [`WaveformError::WrongFrameRate`] if [`Self::frame_rate_hz`] is `0`
	/// - [`WaveformError::WrongFrameRateRatio`] if the ratio is outside `[1/256, 256]`
	/// - [`WaveformError::TooManyFrames`] if the output cannot be allocated
	///
	/// ```rust
	/// # use waveslice::*;
	/// let w = Waveform::from_frames_of_silence(44100, 2, 44100);
	/// for mode in [ResampleMode::Rubato, ResampleMode::Lanczos, ResampleMode::Sinc] {
	///     let r = w.resample_by_mode(22050, mode).unwrap();
	///     assert_eq!(r.num_frames(), 22050);
	///     assert_eq!(r.frame_rate_hz(), 22050);
	/// }
	/// ```
	pub fn resample_by_mode(&self, frame_rate_hz: u32, mode: ResampleMode) -> Result<Self, WaveformError> {
		resample::resample(self, frame_rate_hz, mode)
	}
}

//---------------------------------------------------------------------------------------------------- Accessors
impl Waveform {
	#[must_use]
	#[inline]
	/// Frames per second.
	pub const fn frame_rate_hz(&self) -> u32 {
		self.frame_rate_hz
	}

	#[must_use]
	#[inline]
	/// Channels per frame.
	pub const fn num_channels(&self) -> u32 {
		self.num_channels
	}

	#[must_use]
	#[inline]
	/// Length of the audio in frames.
	pub const fn num_frames(&self) -> u64 {
		self.num_frames
	}

	#[must_use]
	#[inline]
	/// Total sample count, `num_frames * num_channels`.
	pub fn num_samples(&self) -> usize {
		self.samples.len()
	}

	#[must_use]
	#[inline]
	/// The interleaved sample buffer.
	pub fn interleaved_samples(&self) -> &[f32] {
		&self.samples
	}

	#[must_use]
	/// Take the interleaved sample buffer.
	pub fn into_interleaved_samples(self) -> Vec<f32> {
		self.samples
	}

	#[must_use]
	/// The sample of `channel_idx` in frame `frame_idx`.
	///
	/// Returns [`None`] if either index is out of bounds.
	pub fn get_sample(&self, frame_idx: u64, channel_idx: u32) -> Option<f32> {
		if frame_idx >= self.num_frames || channel_idx >= self.num_channels {
			return None;
		}
		let idx = frame_idx as usize * self.num_channels as usize + channel_idx as usize;
		self.samples.get(idx).copied()
	}

	#[must_use]
	/// Playback length of the audio.
	///
	/// A frame rate of `0` has no duration.
	pub fn duration(&self) -> Duration {
		if self.frame_rate_hz == 0 {
			return Duration::ZERO;
		}
		let rate = u64::from(self.frame_rate_hz);
		let secs = self.num_frames / rate;
		let nanos = (u128::from(self.num_frames % rate) * 1_000_000_000 / u128::from(rate)) as u32;
		Duration::new(secs, nanos)
	}
}

//---------------------------------------------------------------------------------------------------- Fmt
impl fmt::Debug for Waveform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Don't print all the samples.
		f.debug_struct("Waveform")
			.field("frame_rate_hz", &self.frame_rate_hz)
			.field("num_channels", &self.num_channels)
			.field("num_frames", &self.num_frames)
			.finish()
	}
}

impl fmt::Display for Waveform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Waveform {{ {} frames, {} channels, {} hz, {} ms }}",
			self.num_frames,
			self.num_channels,
			self.frame_rate_hz,
			self.duration().as_millis(),
		)
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::{sine, wav_bytes};
	use pretty_assertions::assert_eq;

	#[test]
	fn accessors() {
		let w = Waveform::new(4, 3, (0..12).map(|i| i as f32).collect()).unwrap();
		assert_eq!(w.frame_rate_hz(), 4);
		assert_eq!(w.num_channels(), 3);
		assert_eq!(w.num_frames(), 4);
		assert_eq!(w.num_samples(), 12);
		assert_eq!(w.get_sample(0, 0), Some(0.0));
		assert_eq!(w.get_sample(2, 1), Some(7.0));
		assert_eq!(w.get_sample(3, 2), Some(11.0));
		assert_eq!(w.get_sample(4, 0), None);
		assert_eq!(w.get_sample(0, 3), None);
		assert_eq!(w.duration(), Duration::from_secs(1));
	}

	#[test]
	fn silence() {
		let w = Waveform::from_milliseconds_of_silence(44100, 2, 1500);
		assert_eq!(w.num_frames(), 66150);
		assert_eq!(w.num_samples(), 132_300);
		assert_eq!(w.duration(), Duration::from_millis(1500));

		let empty = Waveform::from_frames_of_silence(8000, 1, 0);
		assert_eq!(empty.num_samples(), 0);
		assert_eq!(empty.duration(), Duration::ZERO);
	}

	#[test]
	fn silence_without_channels() {
		let w = Waveform::from_frames_of_silence(8000, 0, 10);
		assert_eq!(w.num_channels(), 1);
		assert_eq!(w.num_frames(), 10);
		assert_eq!(w.num_samples(), 10);

		// Every stage still works on it.
		let args = WaveformArgs::DEFAULT
			.set_end_time_milliseconds(2)
			.set_zero_pad_ending(true)
			.set_convert_to_mono(true)
			.set_frame_rate_hz(16000);
		let bytes = w.to_wav_buffer().unwrap();
		let w = Waveform::from_encoded_bytes(&bytes, &args).unwrap();
		assert_eq!(w.num_channels(), 1);
		assert_eq!(w.num_frames(), 32);
	}

	#[test]
	fn resample_to_zero_keeps_rate() {
		let w = Waveform::from_frames_of_silence(8000, 1, 10);
		assert_eq!(w.resample(0).unwrap(), w);
		assert_eq!(w.resample_by_mode(0, ResampleMode::Sinc).unwrap(), w);

		let err = Waveform::from_frames_of_silence(0, 1, 10).resample(8000).unwrap_err();
		assert!(matches!(err, WaveformError::WrongFrameRate { source_hz: 0, target_hz: 8000 }));
	}

	#[test]
	fn display() {
		let w = Waveform::from_frames_of_silence(1000, 2, 2500);
		assert_eq!(w.to_string(), "Waveform { 2500 frames, 2 channels, 1000 hz, 2500 ms }");
		assert_eq!(format!("{w:?}"), "Waveform { frame_rate_hz: 1000, num_channels: 2, num_frames: 2500 }");
	}

	#[test]
	fn from_encoded_bytes() {
		let bytes = wav_bytes(&sine(2, 8000, 440.0, 8000), 2, 8000);

		let w = Waveform::from_encoded_bytes(&bytes, &WaveformArgs::DEFAULT).unwrap();
		assert_eq!(w.num_frames(), 8000);
		assert_eq!(w.num_channels(), 2);

		let args = WaveformArgs::DEFAULT
			.set_start_time_milliseconds(250)
			.set_end_time_milliseconds(500)
			.set_convert_to_mono(true);
		let w = Waveform::from_encoded_bytes(&bytes, &args).unwrap();
		assert_eq!(w.num_frames(), 2000);
		assert_eq!(w.num_channels(), 1);
	}

	#[test]
	fn from_encoded_stream() {
		let bytes = wav_bytes(&sine(1, 16000, 440.0, 1600), 1, 16000);
		let args = WaveformArgs::DEFAULT.set_frame_rate_hz(8000).set_resample_mode(ResampleMode::Lanczos);

		let w = Waveform::from_encoded_stream(std::io::Cursor::new(bytes), &args).unwrap();
		assert_eq!(w.num_frames(), 800);
		assert_eq!(w.frame_rate_hz(), 8000);
	}

	#[test]
	fn args_checked_before_decoding() {
		// Garbage bytes, but the args are wrong first.
		let args = WaveformArgs::DEFAULT.set_zero_pad_ending(true);
		let err = Waveform::from_encoded_bytes(&[1, 2, 3], &args).unwrap_err();
		assert_eq!(err.kind(), "CannotZeroPad");

		let err = Waveform::from_encoded_bytes(&[1, 2, 3], &WaveformArgs::DEFAULT).unwrap_err();
		assert_eq!(err.kind(), "DecodeFailed");
	}

	#[test]
	fn source_checks_after_decoding() {
		let bytes = wav_bytes(&sine(2, 8000, 440.0, 80), 2, 8000);

		let err = Waveform::from_encoded_bytes(&bytes, &WaveformArgs::DEFAULT.set_num_channels(3)).unwrap_err();
		assert!(matches!(err, WaveformError::WrongNumChannels { requested: 3, actual: 2 }));

		let err = Waveform::from_encoded_bytes(&bytes, &WaveformArgs::DEFAULT.set_frame_rate_hz(31)).unwrap_err();
		assert!(matches!(err, WaveformError::WrongFrameRateRatio { source_hz: 8000, target_hz: 31 }));
	}
}
