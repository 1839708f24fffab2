// Copyright (c) 2017-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

//! PSNR between two raw planar 4:2:0 videos.
//!
//! Both inputs are headerless sequences of frames, each frame being a Y
//! plane followed by a U and a V plane at half resolution. Samples are
//! either 8-bit (one byte) or 10-bit (two little-endian bytes).
//!
//! The Y, U and V scores are the mean of the per-frame PSNR of each plane.
//! The combined YUV score weighs luma against chroma 4:1:1 in the MSE
//! domain, averages that error over all frames and only then converts it
//! to decibels.
//!
//! ```no_run
//! use yuvpsnr::prelude::*;
//!
//! # fn main() -> Result<(), yuvpsnr::Error> {
//! let geometry = FrameGeometry::new(1920, 1080)?;
//! let mut cfg = CompareConfig::new("original.yuv", "decoded.yuv", geometry);
//! cfg.frames = Some(60);
//! cfg.encoded_depth = BitDepth::Ten;
//!
//! let summary = calculate_psnr(&cfg)?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

// Safety lints
#![deny(bare_trait_objects)]
#![deny(clippy::large_stack_arrays)]
// Performance lints
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::trivially_copy_pass_by_ref)]
// Correctness lints
#![deny(clippy::copy_iterator)]
#![deny(clippy::expl_impl_clone_on_copy)]
#![warn(clippy::imprecise_flops)]
#![deny(clippy::mem_forget)]
// Clarity/formatting lints
#![warn(clippy::checked_conversions)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::unused_self)]
// Documentation lints
#![warn(clippy::doc_markdown)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]

#[macro_use]
extern crate log;

mod compare;
mod decoder;
mod error;
mod frame;
mod metrics;
mod pixel;

pub use crate::compare::{
  calculate_psnr, calculate_psnr_with, compare, CompareConfig,
};
pub use crate::decoder::YuvReader;
pub use crate::error::{Error, Result};
pub use crate::frame::{Frame, FrameGeometry, Plane};
pub use crate::metrics::*;
pub use crate::pixel::{BitDepth, SampleScale};

/// Commonly used types and functions.
pub mod prelude {
  pub use crate::compare::{calculate_psnr, CompareConfig};
  pub use crate::decoder::YuvReader;
  pub use crate::frame::{Frame, FrameGeometry};
  pub use crate::metrics::{FramePsnr, PsnrSummary};
  pub use crate::pixel::{BitDepth, SampleScale};
}

