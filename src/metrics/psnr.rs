// Copyright (c) 2018-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use crate::error::{Error, Result};
use crate::frame::{Frame, Plane};
use crate::metrics::{FrameMetrics, FramePsnr, PsnrSummary};

/// Weight of the luma plane relative to each chroma plane. With 4:2:0
/// subsampling the Y plane holds four times as many samples as U or V.
const LUMA_WEIGHT: f64 = 4.0;

/// Calculates the MSE and PSNR of every plane of a frame by comparing the
/// original (uncompressed) to the compressed version.
///
/// # Errors
///
/// - Returns [`Error::ShapeMismatch`] if any pair of planes differs in size.
pub fn calculate_frame_psnr(
  frame1: &Frame, frame2: &Frame, peak: f64,
) -> Result<FramePsnr> {
  let y = calculate_plane_mse(&frame1.planes[0], &frame2.planes[0])?;
  let u = calculate_plane_mse(&frame1.planes[1], &frame2.planes[1])?;
  let v = calculate_plane_mse(&frame1.planes[2], &frame2.planes[2])?;
  let weighted = weighted_mse(y, u, v);

  Ok(FramePsnr {
    mse: FrameMetrics { y, u, v, weighted_avg: weighted },
    psnr: FrameMetrics {
      y: psnr_from_mse(y, peak),
      u: psnr_from_mse(u, peak),
      v: psnr_from_mse(v, peak),
      weighted_avg: psnr_from_mse(weighted, peak),
    },
  })
}

/// Calculate the mean squared error for a `Plane` by comparing the original
/// (uncompressed) to the compressed version.
///
/// An empty plane has an error of 0.
///
/// # Errors
///
/// - Returns [`Error::ShapeMismatch`] if the planes differ in size.
pub fn calculate_plane_mse(plane1: &Plane, plane2: &Plane) -> Result<f64> {
  if plane1.dimensions() != plane2.dimensions() {
    return Err(Error::ShapeMismatch {
      left: plane1.dimensions(),
      right: plane2.dimensions(),
    });
  }
  if plane1.is_empty() {
    return Ok(0.0);
  }

  let sse = plane1
    .iter()
    .zip(plane2.iter())
    .map(|(a, b)| u64::from(a.abs_diff(b)))
    .map(|err| err * err)
    .sum::<u64>();
  Ok(sse as f64 / plane1.len() as f64)
}

/// Converts a mean squared error to decibels. Identical inputs (an error of
/// exactly 0) yield `f64::INFINITY`.
pub fn psnr_from_mse(mse: f64, peak: f64) -> f64 {
  if mse == 0.0 {
    return f64::INFINITY;
  }
  10.0 * (peak * peak / mse).log10()
}

/// Combines per-plane errors with a 4:1:1 luma/chroma weighting.
pub fn weighted_mse(y: f64, u: f64, v: f64) -> f64 {
  (LUMA_WEIGHT * y + u + v) / (LUMA_WEIGHT + 2.0)
}

/// Running per-frame results of one comparison.
///
/// Y, U and V are reported as the mean of their per-frame PSNR values. The
/// combined YUV score is the PSNR of the mean weighted MSE, so errors are
/// averaged before the logarithm is taken.
#[derive(Debug, Clone)]
pub struct PsnrAccumulator {
  peak: f64,
  psnr_y: Vec<f64>,
  psnr_u: Vec<f64>,
  psnr_v: Vec<f64>,
  weighted_mse: Vec<f64>,
}

impl PsnrAccumulator {
  /// # Errors
  ///
  /// - Returns [`Error::InvalidPeak`] unless `peak` is finite and positive.
  pub fn new(peak: f64) -> Result<Self> {
    if !peak.is_finite() || peak <= 0.0 {
      return Err(Error::InvalidPeak(peak));
    }
    Ok(PsnrAccumulator {
      peak,
      psnr_y: Vec::new(),
      psnr_u: Vec::new(),
      psnr_v: Vec::new(),
      weighted_mse: Vec::new(),
    })
  }

  pub const fn peak(&self) -> f64 {
    self.peak
  }

  /// Number of frames accumulated so far.
  pub fn frames(&self) -> usize {
    self.weighted_mse.len()
  }

  /// Compares one frame pair and records the result.
  ///
  /// # Errors
  ///
  /// - Returns [`Error::ShapeMismatch`] if the frames differ in size. Nothing
  ///   is recorded in that case.
  pub fn add_frame(
    &mut self, original: &Frame, encoded: &Frame,
  ) -> Result<FramePsnr> {
    let metrics = calculate_frame_psnr(original, encoded, self.peak)?;
    self.push(metrics);
    Ok(metrics)
  }

  /// Records metrics computed elsewhere.
  pub fn push(&mut self, metrics: FramePsnr) {
    self.psnr_y.push(metrics.psnr.y);
    self.psnr_u.push(metrics.psnr.u);
    self.psnr_v.push(metrics.psnr.v);
    self.weighted_mse.push(metrics.mse.weighted_avg);
  }

  /// Averages everything accumulated so far.
  ///
  /// # Errors
  ///
  /// - Returns [`Error::NoFrames`] if no frame was added.
  pub fn summary(&self) -> Result<PsnrSummary> {
    let frames = self.frames();
    if frames == 0 {
      return Err(Error::NoFrames);
    }
    let mean = |values: &[f64]| values.iter().sum::<f64>() / frames as f64;

    Ok(PsnrSummary {
      psnr: FrameMetrics {
        y: mean(&self.psnr_y),
        u: mean(&self.psnr_u),
        v: mean(&self.psnr_v),
        weighted_avg: psnr_from_mse(mean(&self.weighted_mse), self.peak),
      },
      frames,
    })
  }
}
