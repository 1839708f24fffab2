// Copyright (c) 2019-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use std::fmt;
use std::time::Instant;
use yuvpsnr::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct FrameSummary {
  pub number: usize,
  pub metrics: FramePsnr,
}

impl fmt::Display for FrameSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mse = self.metrics.mse;
    write!(
      f,
      "Frame {} - PSNR: {} - MSE: Y: {:.4}  U: {:.4}  V: {:.4}",
      self.number, self.metrics.psnr, mse.y, mse.u, mse.v
    )
  }
}

#[derive(Debug, Clone)]
pub struct ProgressInfo {
  // The number of frames to compare, if known
  total_frames: Option<usize>,
  // The time the comparison was started
  time_started: Instant,
  // Frames compared so far
  frames_compared: usize,
  // Lowest luma PSNR seen so far, with its frame number
  worst_frame: Option<(usize, f64)>,
}

impl ProgressInfo {
  pub fn new(total_frames: Option<usize>) -> Self {
    Self {
      total_frames,
      time_started: Instant::now(),
      frames_compared: 0,
      worst_frame: None,
    }
  }

  pub fn add_frame(&mut self, frame: &FrameSummary) {
    self.frames_compared += 1;
    let y = frame.metrics.psnr.y;
    if self.worst_frame.map_or(true, |(_, worst)| y < worst) {
      self.worst_frame = Some((frame.number, y));
    }
  }

  pub const fn frames_compared(&self) -> usize {
    self.frames_compared
  }

  pub fn comparison_fps(&self) -> f64 {
    let duration = Instant::now().duration_since(self.time_started);
    self.frames_compared as f64 / duration.as_secs_f64()
  }

  pub fn print_summary(&self, summary: &PsnrSummary) {
    info!("{}", self);
    info!("----------");
    if let Some((number, psnr)) = self.worst_frame {
      info!("Lowest luma PSNR: {:.4} (frame {})", psnr, number);
    }
    info!("Mean {}", summary);
  }
}

impl fmt::Display for ProgressInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(total_frames) = self.total_frames {
      write!(
        f,
        "compared {}/{} frames, {:.3} fps",
        self.frames_compared(),
        total_frames,
        self.comparison_fps()
      )
    } else {
      write!(
        f,
        "compared {} frames, {:.3} fps",
        self.frames_compared(),
        self.comparison_fps()
      )
    }
  }
}
