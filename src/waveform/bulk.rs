//! Decoding many files in parallel.

//---------------------------------------------------------------------------------------------------- Use
use std::path::Path;
use rayon::prelude::*;
use crate::{
	args::{BatchArgs, WaveformArgs},
	error::WaveformError,
	waveform::Waveform,
	macros::{error2, info2},
};

//---------------------------------------------------------------------------------------------------- NamedResult
/// The result of decoding one file of a batch.
#[derive(Debug)]
pub struct NamedResult<T, E> {
	/// The path this result is for.
	pub name: String,
	/// The decoded value or the error.
	pub result: Result<T, E>,
}

//---------------------------------------------------------------------------------------------------- Bulk
impl Waveform {
	#[cfg_attr(docsrs, doc(cfg(feature = "bulk")))]
	/// Decode every file in `paths` with the same `args`.
	///
	/// Each file is decoded independently on a thread pool of
	/// [`BatchArgs::num_workers`] threads, the output is in the same
	/// order as `paths`. A failing file does not affect the others.
	///
	/// If the thread pool cannot be created, every
	/// result is the [`WaveformError::Io`] that caused it.
	pub fn from_many_files<P>(
		paths: &[P],
		args: &WaveformArgs,
		batch_args: BatchArgs,
	) -> Vec<NamedResult<Self, WaveformError>>
	where
		P: AsRef<Path> + Sync,
	{
		let decode = |path: &P| NamedResult {
			name: path.as_ref().display().to_string(),
			result: Self::from_file(path, args),
		};

		let pool = match rayon::ThreadPoolBuilder::new()
			.num_threads(batch_args.num_workers)
			.thread_name(|i| format!("waveslice-bulk-{i}"))
			.build()
		{
			Ok(pool) => pool,
			Err(e) => {
				error2!("Waveform - failed to create thread pool: {e}");
				let msg = e.to_string();
				return paths.iter().map(|path| NamedResult {
					name: path.as_ref().display().to_string(),
					result: Err(WaveformError::Io(std::io::Error::new(std::io::ErrorKind::Other, msg.clone()))),
				}).collect();
			},
		};

		info2!("Waveform - decoding {} files on {} threads", paths.len(), pool.current_num_threads());

		pool.install(|| paths.par_iter().map(decode).collect())
	}
}
