//---------------------------------------------------------------------------------------------------- BatchArgs
/// Options for decoding many files at once.
///
/// See `Waveform::from_many_files` (requires the `bulk` feature).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct BatchArgs {
	/// Worker threads to decode with.
	///
	/// `0` uses as many threads as there are logical CPUs.
	#[cfg_attr(feature = "serde", serde(default))]
	pub num_workers: usize,
}

impl BatchArgs {
	/// One worker per logical CPU.
	pub const DEFAULT: Self = Self { num_workers: 0 };

	#[must_use]
	/// Set [`Self::num_workers`].
	pub const fn set_num_workers(mut self, num_workers: usize) -> Self {
		self.num_workers = num_workers;
		self
	}
}
