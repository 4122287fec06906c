//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- ResampleMode
/// Which algorithm converts the frame rate.
///
/// All modes produce the exact same number of output frames for a given
/// `(num_frames, source_hz, target_hz)`, the sample values differ.
///
/// ```rust
/// # use waveslice::ResampleMode;
/// assert_eq!(ResampleMode::default(), ResampleMode::Rubato);
/// assert_eq!("lanczos".parse::<ResampleMode>().unwrap(), ResampleMode::Lanczos);
/// assert_eq!(ResampleMode::Sinc.to_string(), "sinc");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ResampleMode {
	#[default]
	/// General-purpose bandlimited sinc converter from [`rubato`].
	Rubato,
	/// Lanczos kernel (`a = 5`), widened when downsampling.
	Lanczos,
	/// Table-driven windowed-sinc interpolation
	/// (Blackman-Harris taper, 64 zero-crossings).
	Sinc,
}
