// Copyright (c) 2018-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use std::fmt;

mod psnr;

pub use psnr::{
  calculate_frame_psnr, calculate_plane_mse, psnr_from_mse, weighted_mse,
  PsnrAccumulator,
};

/// One value per plane plus a luma-weighted combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
  pub y: f64,
  pub u: f64,
  pub v: f64,
  pub weighted_avg: f64,
}

/// Distortion of one frame pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePsnr {
  /// Mean squared error of each plane; `weighted_avg` is the 4:1:1
  /// weighted error of the frame.
  pub mse: FrameMetrics,
  /// PSNR of each plane in dB; `weighted_avg` is the PSNR of the weighted
  /// error.
  pub psnr: FrameMetrics,
}

/// Final scores of a comparison run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsnrSummary {
  /// Mean Y, U and V PSNR over all frames, and in `weighted_avg` the
  /// PSNR of the mean weighted MSE.
  pub psnr: FrameMetrics,
  /// Number of frame pairs compared.
  pub frames: usize,
}

impl PsnrSummary {
  pub const fn y(&self) -> f64 {
    self.psnr.y
  }

  pub const fn u(&self) -> f64 {
    self.psnr.u
  }

  pub const fn v(&self) -> f64 {
    self.psnr.v
  }

  pub const fn yuv(&self) -> f64 {
    self.psnr.weighted_avg
  }
}

impl fmt::Display for FrameMetrics {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Y: {:.4}  U: {:.4}  V: {:.4}  YUV: {:.4}",
      self.y, self.u, self.v, self.weighted_avg
    )
  }
}

impl fmt::Display for PsnrSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "PSNR: {}", self.psnr)
  }
}
