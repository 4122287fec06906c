//! Caller-facing options and their validated internal form.

mod waveform_args;
pub use waveform_args::WaveformArgs;

mod resample_mode;
pub use resample_mode::ResampleMode;

mod decode_hint;
pub use decode_hint::DecodeHint;

mod batch_args;
pub use batch_args::BatchArgs;

mod plan;
pub(crate) use plan::{TransformPlan, Padding};
