//! Errors that can occur while building a [`Waveform`](crate::Waveform).

mod decode;
pub use decode::DecodeError;

mod waveform_error;
pub use waveform_error::WaveformError;
