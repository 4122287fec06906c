//! The [`Waveform`] container.

mod waveform;
pub use waveform::Waveform;

mod wav;

#[cfg(feature = "bulk")]
mod bulk;
#[cfg(feature = "bulk")]
pub use bulk::NamedResult;
