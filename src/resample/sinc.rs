//! [`ResampleMode::Sinc`](crate::ResampleMode::Sinc).
//!
//! A band-limited interpolator over a precomputed, Blackman-Harris
//! tapered sinc table. Only the right half of the (symmetric)
//! filter is stored, both wings of the convolution walk it.
//!
//! ```text
//! table[k] = rolloff * sinc(rolloff * k / PRECISION) * taper[k]
//!
//!             k = 0 ..= NUM_ZEROS * PRECISION
//! ```
//!
//! When downsampling, the table is read with a stride of
//! `scale * PRECISION` and scaled by `scale`, which lowers
//! the cutoff to the output's Nyquist frequency.

//----------------------------------------------------------------------------------------------- use
use std::{
	f64::consts::PI,
	num::{NonZeroU32, NonZeroUsize},
};
use crate::{
	constants::{SINC_NUM_ZEROS, SINC_PRECISION, SINC_ROLLOFF},
	error::WaveformError,
	resample::Resampler,
};

//----------------------------------------------------------------------------------------------- Table
/// `sin(pi * x) / (pi * x)`
fn sinc(x: f64) -> f64 {
	if x == 0.0 {
		1.0
	} else {
		let k = x * PI;
		k.sin() / k
	}
}

/// The `n` point Blackman-Harris window.
fn blackman_harris(n: usize) -> impl Iterator<Item = f64> {
	const C1: f64 = 0.35875;
	const C2: f64 = 0.48829;
	const C3: f64 = 0.14128;
	const C4: f64 = 0.01168;

	let width = n.saturating_sub(1).max(1) as f64;

	(0..n).map(move |k| {
		let x = 2.0 * PI * k as f64 / width;
		C1 - C2 * x.cos() + C3 * (2.0 * x).cos() - C4 * (3.0 * x).cos()
	})
}

/// The right wing of the filter, and the difference
/// between neighbouring entries for linear interpolation.
fn table() -> (Vec<f64>, Vec<f64>) {
	let n = SINC_NUM_ZEROS * SINC_PRECISION;

	let window = blackman_harris(2 * n + 1)
		.skip(n)
		.zip(0..=n)
		.map(|(taper, k)| {
			let x = k as f64 / SINC_PRECISION as f64;
			taper * SINC_ROLLOFF * sinc(SINC_ROLLOFF * x)
		})
		.collect::<Vec<f64>>();

	let delta = window
		.windows(2)
		.map(|w| w[1] - w[0])
		.chain(Some(0.0))
		.collect();

	(window, delta)
}

//----------------------------------------------------------------------------------------------- Sinc
pub(crate) struct Sinc {
	source_hz: u64,
	target_hz: u64,
	num_channels: usize,
	/// `min(target_hz / source_hz, 1)`
	scale: f64,
	/// Table stride per input frame.
	index_step: usize,
	window: Vec<f64>,
	delta: Vec<f64>,
}

impl Sinc {
	/// Weight of tap `i` of a wing starting at table `offset`.
	#[inline]
	fn weight(&self, offset: usize, eta: f64, i: usize) -> f64 {
		let idx = offset + i * self.index_step;
		self.scale * (self.window[idx] + eta * self.delta[idx])
	}

	/// Table offset and interpolation fraction for a scaled distance.
	#[inline]
	fn locate(frac: f64) -> (usize, f64) {
		let index_frac = frac * SINC_PRECISION as f64;
		(index_frac as usize, index_frac.fract())
	}
}

impl Resampler for Sinc {
	fn new(
		source_hz: NonZeroU32,
		target_hz: NonZeroU32,
		num_channels: NonZeroUsize,
	) -> Result<Self, WaveformError> {
		let scale = (f64::from(target_hz.get()) / f64::from(source_hz.get())).min(1.0);
		let index_step = ((scale * SINC_PRECISION as f64) as usize).max(1);
		let (window, delta) = table();

		Ok(Self {
			source_hz: u64::from(source_hz.get()),
			target_hz: u64::from(target_hz.get()),
			num_channels: num_channels.get(),
			scale,
			index_step,
			window,
			delta,
		})
	}

	fn resample(&mut self, input: &[f32], num_output_frames: usize) -> Result<Vec<f32>, WaveformError> {
		let channels = self.num_channels;
		let num_input_frames = input.len() / channels;
		let n_win = self.window.len();

		let mut output = vec![0.0_f32; num_output_frames * channels];
		if num_input_frames == 0 {
			return Ok(output);
		}

		let mut acc = vec![0.0_f64; channels];

		for (out_idx, out_frame) in output.chunks_exact_mut(channels).enumerate() {
			let numerator = out_idx as u128 * u128::from(self.source_hz);
			let Ok(in_idx) = usize::try_from(numerator / u128::from(self.target_hz)) else {
				break;
			};
			let fract = (numerator % u128::from(self.target_hz)) as f64 / self.target_hz as f64;

			acc.iter_mut().for_each(|a| *a = 0.0);

			// Left wing, `in_idx` and the frames before it.
			let (offset, eta) = Self::locate(self.scale * fract);
			let taps = (in_idx + 1).min(n_win.saturating_sub(offset) / self.index_step);
			for i in 0..taps {
				let src = (in_idx - i) * channels;
				let Some(frame) = input.get(src..src + channels) else { continue };
				let weight = self.weight(offset, eta, i);
				for (a, s) in acc.iter_mut().zip(frame) {
					*a += weight * f64::from(*s);
				}
			}

			// Right wing, the frames after `in_idx`.
			let (offset, eta) = Self::locate(self.scale * (1.0 - fract));
			let taps = num_input_frames
				.saturating_sub(in_idx + 1)
				.min(n_win.saturating_sub(offset) / self.index_step);
			for k in 0..taps {
				let src = (in_idx + k + 1) * channels;
				let weight = self.weight(offset, eta, k);
				for (a, s) in acc.iter_mut().zip(&input[src..src + channels]) {
					*a += weight * f64::from(*s);
				}
			}

			for (o, a) in out_frame.iter_mut().zip(&acc) {
				*o = *a as f32;
			}
		}

		Ok(output)
	}
}
