//---------------------------------------------------------------------------------------------------- Decode Errors
#[derive(thiserror::Error, Debug)]
/// Errors when decoding encoded audio
///
/// This `enum` represents all the potential errors that can
/// occur while the decoder turns encoded bytes into samples.
///
/// It is always wrapped in [`WaveformError::DecodeFailed`](crate::WaveformError::DecodeFailed).
pub enum DecodeError {
	#[error("the audio data contained malformed data: {0}")]
	/// The audio data contained malformed data
	Decode(&'static str),

	#[error("codec/container is not supported: {0}")]
	/// Codec/container is not supported
	Unsupported(&'static str),

	#[error("a limit was reached while decoding: {0}")]
	/// A limit was reached while decoding
	Limit(&'static str),

	#[error("decoding io error: {0}")]
	/// I/O error while reading the encoded stream
	Io(#[from] std::io::Error),

	#[error("failed to find a decodable track")]
	/// The container did not have a track with a known codec
	NoTrack,

	#[error("failed to find the codec's frame rate")]
	/// The codec did not specify a frame rate
	FrameRate,

	#[error("failed to find the codec's channel layout")]
	/// The codec did not specify its channels
	Channels,

	#[error("unknown decoding error")]
	/// Unknown decoding error
	Unknown,
}

impl From<symphonia::core::errors::Error> for DecodeError {
	fn from(value: symphonia::core::errors::Error) -> Self {
		use symphonia::core::errors::Error as E;
		match value {
			E::DecodeError(s) => Self::Decode(s),
			E::Unsupported(s) => Self::Unsupported(s),
			E::LimitError(s)  => Self::Limit(s),
			E::IoError(s)     => Self::Io(s),
			E::SeekError(_) | E::ResetRequired => Self::Unknown,
		}
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use symphonia::core::errors::Error as E;

	#[test]
	fn from_symphonia() {
		assert!(matches!(DecodeError::from(E::Unsupported("mp9")), DecodeError::Unsupported("mp9")));
		assert!(matches!(DecodeError::from(E::DecodeError("bad")), DecodeError::Decode("bad")));
		assert!(matches!(DecodeError::from(E::LimitError("big")), DecodeError::Limit("big")));
		assert!(matches!(DecodeError::from(E::ResetRequired), DecodeError::Unknown));

		let io = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
		assert!(matches!(DecodeError::from(E::IoError(io)), DecodeError::Io(_)));
	}
}
