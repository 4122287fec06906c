//---------------------------------------------------------------------------------------------------- Use
use std::{
	path::{Path,PathBuf},
	sync::Arc,
	ffi::{OsStr,OsString},
	fmt::Debug,
};
use crate::{
	args::DecodeHint,
	error::WaveformError,
	source::{DecodedSource, source_decode},
};

//---------------------------------------------------------------------------------------------------- Source
/// Encoded audio, either on disk or in memory.
///
/// This is the input of the decoder, it can be
/// created with [`From`] from most path and byte types.
///
/// ```rust
/// # use waveslice::Source;
/// # use std::{sync::Arc, path::Path};
/// let path = Source::from("/music/song.flac");
/// assert!(path.is_path());
///
/// let bytes = Source::from(vec![0_u8; 8]);
/// assert!(bytes.is_byte());
/// ```
#[derive(Clone,PartialEq,PartialOrd,Eq,Ord,Hash)]
pub enum Source {
	/// A file to open.
	Path(Arc<Path>),
	/// Encoded bytes already in memory.
	Byte(Arc<[u8]>),
}

//---------------------------------------------------------------------------------------------------- Source Impl
impl Source {
	#[must_use]
	#[inline]
	/// If `self` is a [`Self::Path`] variant.
	pub const fn is_path(&self) -> bool {
		matches!(self, Self::Path(_))
	}

	#[must_use]
	#[inline]
	/// If `self` is a [`Self::Byte`] variant.
	pub const fn is_byte(&self) -> bool {
		matches!(self, Self::Byte(_))
	}

	#[must_use]
	/// The hint the decoder gets for this source.
	///
	/// Paths hint with their extension, bytes give no hint.
	pub fn hint(&self) -> DecodeHint {
		match self {
			Self::Path(path) => DecodeHint::from_path(path),
			Self::Byte(_) => DecodeHint::NONE,
		}
	}

	/// Decode into interleaved samples with [`Self::hint`].
	///
	/// # Errors
	/// - [`WaveformError::FileNotFound`] / [`WaveformError::FilenameIsADirectory`] / [`WaveformError::Io`] for paths
	/// - [`WaveformError::DecodeFailed`] if the audio could not be decoded
	pub fn decode(&self) -> Result<DecodedSource, WaveformError> {
		self.decode_with_hint(&self.hint())
	}

	/// Decode into interleaved samples, with an explicit hint.
	///
	/// # Errors
	/// Same as [`Self::decode`].
	pub fn decode_with_hint(&self, hint: &DecodeHint) -> Result<DecodedSource, WaveformError> {
		match self {
			Self::Path(path) => {
				let file = source_decode::open_file(path)?;
				Ok(source_decode::decode(Box::new(file), hint)?)
			},
			Self::Byte(bytes) => {
				let cursor = std::io::Cursor::new(Arc::clone(bytes));
				Ok(source_decode::decode(Box::new(cursor), hint)?)
			},
		}
	}
}

//---------------------------------------------------------------------------------------------------- Source::from
/// Implement `From<$input> for Source`.
macro_rules! impl_from {
	(
			// Boilerplate to capture the input
			// variable from the macro itself
			// (syntax looks like a closure)
			|$source:ident|
		$(
			$($input:ty)+ => // What type are we converting From?
			$enum:ident   => // What `Source` enum will be used?
			$map:expr,       // What function to apply to the input to get it "correct"
		)*
	) => {
		$(
			impl From<$($input)+> for Source {
				fn from($source: $($input)+) -> Self {
					Self::$enum($map)
				}
			}
		)*
	};
}

// These mappings exist instead of a generic
// <T: AsRef<Path>> since that covers too much,
// and we cannot specify the way we construct.
impl_from! { |source|
	// Input         Enum    Map
	Arc<Path>     => Path => source,
	&Arc<Path>    => Path => Arc::clone(source),
	&Path         => Path => Arc::from(source),
	PathBuf       => Path => Arc::from(source),
	&str          => Path => Arc::<Path>::from(Path::new(source)),
	&OsStr        => Path => Arc::<Path>::from(Path::new(source)),
	String        => Path => Arc::<Path>::from(PathBuf::from(source).as_path()),
	OsString      => Path => Arc::<Path>::from(PathBuf::from(source).as_path()),
	Arc<[u8]>     => Byte => source,
	&Arc<[u8]>    => Byte => Arc::clone(source),
	&[u8]         => Byte => Arc::from(source),
	Vec<u8>       => Byte => Arc::<[u8]>::from(source),
	Box<[u8]>     => Byte => Arc::<[u8]>::from(source),
}

//---------------------------------------------------------------------------------------------------- Debug
impl Debug for Source {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Path(path) => f.debug_tuple("Source::Path").field(path).finish(),
			// Don't print all the bytes.
			Self::Byte(bytes) => f.debug_tuple("Source::Byte").field(&bytes.len()).finish(),
		}
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn from() {
		let a = Source::from("a.wav");
		let b = Source::from(PathBuf::from("a.wav"));
		let c = Source::from(String::from("a.wav"));
		assert_eq!(a, b);
		assert_eq!(b, c);

		let bytes: &[u8] = &[1, 2, 3];
		assert_eq!(Source::from(bytes), Source::from(vec![1_u8, 2, 3]));
	}

	#[test]
	fn debug() {
		assert_eq!(format!("{:?}", Source::from(vec![0_u8; 100])), "Source::Byte(100)");
	}

	#[test]
	fn hint() {
		assert_eq!(Source::from("a/b.ogg").hint().file_extension.as_deref(), Some("ogg"));
		assert_eq!(Source::from(vec![0_u8]).hint(), DecodeHint::NONE);
	}

	#[test]
	fn missing_file() {
		let err = Source::from("/this/path/does/not/exist.wav").decode().unwrap_err();
		assert_eq!(err.kind(), "FileNotFound");
	}
}
