//---------------------------------------------------------------------------------------------------- use
use std::path::Path;
use symphonia::core::probe::Hint;

//---------------------------------------------------------------------------------------------------- DecodeHint
/// Hints given to the decoder's format probe.
///
/// A correct hint speeds up format detection,
/// an incorrect one does not prevent decoding.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone,Debug,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct DecodeHint {
	/// File extension without the dot, e.g. `"mp3"`.
	pub file_extension: Option<String>,
	/// MIME type, e.g. `"audio/flac"`.
	pub mime_type: Option<String>,
}

impl DecodeHint {
	/// No hints.
	pub const NONE: Self = Self {
		file_extension: None,
		mime_type: None,
	};

	#[must_use]
	/// Hint with the extension of `path`, if it has a UTF-8 one.
	pub fn from_path(path: &Path) -> Self {
		Self {
			file_extension: path.extension().and_then(|e| e.to_str()).map(str::to_owned),
			mime_type: None,
		}
	}

	/// Convert into the `symphonia` probe hint.
	pub(crate) fn to_symphonia(&self) -> Hint {
		let mut hint = Hint::new();
		if let Some(ext) = self.file_extension.as_deref() {
			hint.with_extension(ext);
		}
		if let Some(mime) = self.mime_type.as_deref() {
			hint.mime_type(mime);
		}
		hint
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn from_path() {
		let hint = DecodeHint::from_path(Path::new("/music/song.flac"));
		assert_eq!(hint.file_extension.as_deref(), Some("flac"));
		assert_eq!(hint.mime_type, None);

		assert_eq!(DecodeHint::from_path(Path::new("no_extension")), DecodeHint::NONE);
	}
}
