//! Decode audio into exact, reproducible waveform slices.
//!
//! `waveslice` decodes an audio file (anything [`symphonia`] can read)
//! into a [`Waveform`], then cuts, remixes and resamples it so the
//! result has exactly the shape asked for:
//!
//! ```text
//! decode -> time window (+ padding) -> channels -> resample -> Waveform
//! ```
//!
//! Every option lives in [`WaveformArgs`]. Contradicting options are
//! rejected with a [`WaveformError`] before any decoding happens
//! (where possible), nothing is silently adjusted.
//!
//! ```rust
//! # use waveslice::*;
//! // 2 seconds of stereo silence at 44.1khz.
//! let waveform = Waveform::from_milliseconds_of_silence(44100, 2, 2000);
//!
//! // Resampling always produces `round(frames * target / source)` frames,
//! // whichever algorithm is used.
//! for mode in [ResampleMode::Rubato, ResampleMode::Lanczos, ResampleMode::Sinc] {
//!     let resampled = waveform.resample_by_mode(8000, mode).unwrap();
//!     assert_eq!(resampled.num_frames(), 16000);
//!     assert_eq!(resampled.num_channels(), 2);
//! }
//! ```
//!
//! ## Features
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `log`   | yes     | Logging with [`log`](https://docs.rs/log) |
//! | `bulk`  | yes     | [`Waveform::from_many_files`] on a [`rayon`](https://docs.rs/rayon) thread pool |
//! | `serde` | no      | `serde` derives for [`WaveformArgs`] and friends |

#![cfg_attr(docsrs, feature(doc_cfg))]

//---------------------------------------------------------------------------------------------------- Lints
#![allow(
    clippy::len_zero,
    clippy::type_complexity,
    clippy::module_inception,
)]

#![deny(
    nonstandard_style,
    deprecated,
)]

#![warn(
    missing_docs,
    unreachable_pub,
)]

#![forbid(
    unused_mut,
    unused_unsafe,
    future_incompatible,
    break_with_label_and_loop,
    coherence_leak_check,
    duplicate_macro_attributes,
    exported_private_dependencies,
    for_loops_over_fallibles,
    large_assignments,
    overlapping_range_endpoints,
    semicolon_in_expressions_from_macros,
    redundant_semicolons,
    unconditional_recursion,
    unreachable_patterns,
    unused_allocation,
    unused_braces,
    unused_comparisons,
    unused_doc_comments,
    unused_parens,
    unused_labels,
    while_true,
    keyword_idents,
    non_ascii_idents,
    noop_method_call,
    single_use_lifetimes,
)]

//---------------------------------------------------------------------------------------------------- Public API
mod args;
pub use args::{WaveformArgs, ResampleMode, DecodeHint, BatchArgs};

mod waveform;
pub use waveform::Waveform;
#[cfg(feature = "bulk")]
pub use waveform::NamedResult;

mod source;
pub use source::{Source, DecodedSource};

pub mod error;
pub use error::{WaveformError, DecodeError};

pub mod constants;

//---------------------------------------------------------------------------------------------------- Private Usage
mod transform;
mod resample;
mod macros;
