//! Audio sources and the decoder that turns them into samples.

mod source;
pub use source::Source;

mod decoded_source;
pub use decoded_source::DecodedSource;

pub(crate) mod source_decode;
