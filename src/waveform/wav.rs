//! WAV export.

//---------------------------------------------------------------------------------------------------- Use
use std::{
	io::{Cursor, Seek, Write},
	path::Path,
};
use hound::{SampleFormat, WavSpec, WavWriter};
use crate::{
	error::WaveformError,
	waveform::Waveform,
};

//---------------------------------------------------------------------------------------------------- WAV
impl Waveform {
	/// The `hound` spec for 32-bit float WAV.
	fn wav_spec(&self) -> Result<WavSpec, WaveformError> {
		// WAV stores channels as a `u16`.
		let channels = u16::try_from(self.num_channels())
			.map_err(|_| WaveformError::Encode(hound::Error::Unsupported))?;

		Ok(WavSpec {
			channels,
			sample_rate: self.frame_rate_hz(),
			bits_per_sample: 32,
			sample_format: SampleFormat::Float,
		})
	}

	fn write_wav<W: Write + Seek>(&self, writer: W) -> Result<(), WaveformError> {
		let mut wav = WavWriter::new(writer, self.wav_spec()?)?;
		for sample in self.interleaved_samples() {
			wav.write_sample(*sample)?;
		}
		wav.finalize()?;
		Ok(())
	}

	/// Encode as a 32-bit float WAV in memory.
	///
	/// # Errors
	/// [`WaveformError::Encode`] if the waveform has more than
	/// `u16::MAX` channels or the encoder fails.
	///
	/// ```rust
	/// # use waveslice::*;
	/// let w = Waveform::new(8000, 1, vec![0.25, -0.25, 0.5]).unwrap();
	/// let wav = w.to_wav_buffer().unwrap();
	///
	/// let decoded = Waveform::from_encoded_bytes(&wav, &WaveformArgs::DEFAULT).unwrap();
	/// assert_eq!(decoded, w);
	/// ```
	pub fn to_wav_buffer(&self) -> Result<Vec<u8>, WaveformError> {
		let mut cursor = Cursor::new(Vec::with_capacity(self.num_samples() * 4 + 64));
		self.write_wav(&mut cursor)?;
		Ok(cursor.into_inner())
	}

	/// Encode as a 32-bit float WAV file at `path`.
	///
	/// # Errors
	/// I/O and encoding errors.
	pub fn to_wav_file(&self, path: impl AsRef<Path>) -> Result<(), WaveformError> {
		let file = std::io::BufWriter::new(std::fs::File::create(path)?);
		self.write_wav(file)
	}
}
