//! The `symphonia` decoder adapter.
//!
//! Everything `symphonia` related stays in here, the rest of
//! the crate only sees [`DecodedSource`].

//---------------------------------------------------------------------------------------------------- Use
use std::{
	fs::File,
	io::{ErrorKind, Read},
	path::Path,
};
use symphonia::core::{
	audio::Signal,
	codecs::{DecoderOptions, CODEC_TYPE_NULL},
	errors::Error,
	formats::FormatOptions,
	io::{MediaSource, MediaSourceStream, MediaSourceStreamOptions, ReadOnlySource},
	meta::{Limit, MetadataOptions},
};
use symphonia::default::{get_codecs, get_probe};
use crate::{
	args::DecodeHint,
	constants::{MAX_PREALLOCATED_SAMPLES, MEDIA_SOURCE_STREAM_BUFFER_LEN},
	error::{DecodeError, WaveformError},
	macros::{debug2, trace2, warn2},
	source::DecodedSource,
};

//---------------------------------------------------------------------------------------------------- Constants
// `symphonia` format options.
//
// These are some misc options `Symphonia` needs.
// Most of these are the default values, but as `const`.

/// Gapless is on so the decoded frame count matches the audio's real length.
pub(crate) const FORMAT_OPTIONS: FormatOptions = FormatOptions {
	enable_gapless: true,
	prebuild_seek_index: false,
	seek_index_fill_rate: 20,
};

/// Metadata is never read, only skipped.
pub(crate) const METADATA_OPTIONS: MetadataOptions = MetadataOptions {
	limit_metadata_bytes: Limit::Default,
	limit_visual_bytes: Limit::Default,
};

pub(crate) const DECODER_OPTIONS: DecoderOptions = DecoderOptions {
	verify: false,
};

pub(crate) const MEDIA_SOURCE_STREAM_OPTIONS: MediaSourceStreamOptions = MediaSourceStreamOptions {
	buffer_len: MEDIA_SOURCE_STREAM_BUFFER_LEN,
};

//---------------------------------------------------------------------------------------------------- Open
/// Open a file for decoding, mapping the common failures to specific errors.
pub(crate) fn open_file(path: &Path) -> Result<File, WaveformError> {
	let file = match File::open(path) {
		Ok(f) => f,
		Err(e) if e.kind() == ErrorKind::NotFound => {
			return Err(WaveformError::FileNotFound(path.display().to_string()));
		},
		Err(e) => return Err(WaveformError::Io(e)),
	};

	if file.metadata()?.is_dir() {
		return Err(WaveformError::FilenameIsADirectory(path.display().to_string()));
	}

	Ok(file)
}

/// Wrap a non-seekable reader.
pub(crate) fn read_only<R>(reader: R) -> Box<dyn MediaSource>
where
	R: Read + Send + Sync + 'static,
{
	Box::new(ReadOnlySource::new(reader))
}

//---------------------------------------------------------------------------------------------------- Decode
/// Decode all of `media_source` into interleaved `f32` samples.
///
/// The first track with a known codec is decoded.
/// Malformed packets are skipped, any other error aborts.
pub(crate) fn decode(media_source: Box<dyn MediaSource>, hint: &DecodeHint) -> Result<DecodedSource, DecodeError> {
	let mss = MediaSourceStream::new(media_source, MEDIA_SOURCE_STREAM_OPTIONS);

	let probed = get_probe().format(
		&hint.to_symphonia(),
		mss,
		&FORMAT_OPTIONS,
		&METADATA_OPTIONS,
	)?;
	let mut reader = probed.format;

	let codecs = get_codecs();

	// Select the first track with a known codec.
	let Some(track) = reader
		.tracks()
		.iter()
		.find(|t| {
			// Make sure it is not null.
			t.codec_params.codec != CODEC_TYPE_NULL &&
			// And it exists in our codec registry.
			codecs.get_codec(t.codec_params.codec).is_some()
		})
	else {
		return Err(DecodeError::NoTrack);
	};

	let track_id = track.id;
	let mut frame_rate_hz = track.codec_params.sample_rate;
	let mut num_channels = track.codec_params.channels.map(|c| c.count());

	let mut samples = preallocate(track.codec_params.n_frames, num_channels);

	let mut decoder = codecs.make(&track.codec_params, &DECODER_OPTIONS)?;

	debug2!(
		"decode - track {track_id}, codec {:?}, {frame_rate_hz:?}hz, {num_channels:?} channels",
		track.codec_params.codec,
	);

	loop {
		let packet = match reader.next_packet() {
			Ok(p) => p,

			// This "end of stream" error is currently the only way
			// a [FormatReader] can indicate the media is complete.
			Err(Error::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,

			// The track list changed, the track we were decoding is over.
			Err(Error::ResetRequired) => break,

			Err(e) => return Err(e.into()),
		};

		if packet.track_id() != track_id {
			continue;
		}

		let decoded = match decoder.decode(&packet) {
			Ok(d) => d,
			Err(Error::DecodeError(e)) => {
				warn2!("decode - skipping malformed packet: {e}");
				continue;
			},
			Err(e) => return Err(e.into()),
		};

		let spec = *decoded.spec();
		let channels = *num_channels.get_or_insert(spec.channels.count());
		frame_rate_hz.get_or_insert(spec.rate);
		if spec.channels.count() != channels {
			return Err(DecodeError::Channels);
		}

		let mut audio = decoded.make_equivalent::<f32>();
		decoded.convert(&mut audio);

		// Planar -> interleaved.
		let frames = audio.frames();
		samples.reserve(frames * channels);
		for frame in 0..frames {
			for channel in 0..channels {
				samples.push(audio.chan(channel)[frame]);
			}
		}

		trace2!("decode - packet {} frames", frames);
	}

	let frame_rate_hz = frame_rate_hz.ok_or(DecodeError::FrameRate)?;
	let num_channels = match num_channels {
		Some(c) if c > 0 => c,
		_ => return Err(DecodeError::Channels),
	};

	debug2!("decode - done, {} frames", samples.len() / num_channels);

	// Decoded buffers are always whole frames.
	DecodedSource::new(samples, num_channels as u32, frame_rate_hz)
		.map_err(|_| DecodeError::Channels)
}

/// An empty buffer with room for `n_frames` frames, if the
/// container states its length.
///
/// The header is not trusted past [`MAX_PREALLOCATED_SAMPLES`].
fn preallocate(n_frames: Option<u64>, num_channels: Option<usize>) -> Vec<f32> {
	let mut samples = Vec::new();

	let (Some(n_frames), Some(channels)) = (n_frames, num_channels) else {
		return samples;
	};

	let len = usize::try_from(n_frames)
		.unwrap_or(usize::MAX)
		.saturating_mul(channels)
		.min(MAX_PREALLOCATED_SAMPLES);

	if samples.try_reserve_exact(len).is_err() {
		warn2!("decode - could not pre-allocate {len} samples");
	}

	samples
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::{sine, wav_bytes};
	use std::io::Cursor;

	#[test]
	fn decode_wav() {
		let samples = sine(2, 8000, 440.0, 800);
		let bytes = wav_bytes(&samples, 2, 8000);

		let decoded = decode(Box::new(Cursor::new(bytes)), &DecodeHint::NONE).unwrap();
		assert_eq!(decoded.num_channels(), 2);
		assert_eq!(decoded.frame_rate_hz(), 8000);
		assert_eq!(decoded.num_frames(), 800);

		for (a, b) in decoded.samples().iter().zip(&samples) {
			assert!((a - b).abs() < 1e-6);
		}
	}

	#[test]
	fn decode_read_only() {
		let bytes = wav_bytes(&sine(1, 16000, 100.0, 160), 1, 16000);
		let hint = DecodeHint { file_extension: Some("wav".into()), mime_type: None };

		let decoded = decode(read_only(Cursor::new(bytes)), &hint).unwrap();
		assert_eq!(decoded.num_frames(), 160);
		assert_eq!(decoded.num_channels(), 1);
	}

	#[test]
	fn decode_garbage() {
		let garbage = vec![7_u8; 4096];
		let err = decode(Box::new(Cursor::new(garbage)), &DecodeHint::NONE).unwrap_err();
		// Format detection gives up at the end of the stream.
		assert!(matches!(err, DecodeError::Unsupported(_) | DecodeError::Io(_)));
	}

	#[test]
	fn open_directory() {
		let err = open_file(&std::env::temp_dir()).unwrap_err();
		assert_eq!(err.kind(), "FilenameIsADirectory");
	}

	#[test]
	fn preallocate_is_capped() {
		assert_eq!(preallocate(None, Some(2)).capacity(), 0);
		assert_eq!(preallocate(Some(100), None).capacity(), 0);
		assert_eq!(preallocate(Some(100), Some(2)).capacity(), 200);

		// A FLAC header can claim 2^36 frames of 8 channels.
		for (n_frames, channels) in [(1 << 36, 8), (u64::MAX, 8), (u64::MAX, usize::MAX)] {
			let samples = preallocate(Some(n_frames), Some(channels));
			assert_eq!(samples.capacity(), MAX_PREALLOCATED_SAMPLES);
			assert!(samples.is_empty());
		}
	}
}
