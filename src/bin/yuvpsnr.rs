// Copyright (c) 2017-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

// Safety lints
#![deny(bare_trait_objects)]
// Correctness lints
#![deny(clippy::float_cmp)]
#![deny(clippy::mem_forget)]
// Clarity/formatting lints
#![warn(clippy::implicit_clone)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]
// Documentation lints
#![warn(clippy::doc_markdown)]
#![warn(clippy::missing_errors_doc)]

#[macro_use]
extern crate log;

mod common;
mod error;
mod stats;

use crate::common::*;
use crate::error::*;
use crate::stats::*;
use std::process::exit;
use yuvpsnr::prelude::*;
use yuvpsnr::{compare, Error};

fn main() {
  init_logger();

  run().unwrap_or_else(|e| {
    error::print_error(&e);
    exit(1);
  });
}

fn init_logger() {
  use std::str::FromStr;
  fn level_colored(l: log::Level) -> console::StyledObject<&'static str> {
    use console::style;
    use log::Level;
    match l {
      Level::Trace => style("??").dim(),
      Level::Debug => style("? ").dim(),
      Level::Info => style("> ").green(),
      Level::Warn => style("! ").yellow(),
      Level::Error => style("!!").red(),
    }
  }

  let level = std::env::var("YUVPSNR_LOG")
    .ok()
    .and_then(|l| log::LevelFilter::from_str(&l).ok())
    .unwrap_or(log::LevelFilter::Info);

  fern::Dispatch::new()
    .format(move |out, message, record| {
      out.finish(format_args!(
        "{level} {message}",
        level = level_colored(record.level()),
        message = message,
      ));
    })
    // set the default log level. to filter out verbose log messages from
    // dependencies, set this to Warn and overwrite the log level for the
    // library and the binary.
    .level(log::LevelFilter::Warn)
    .level_for("yuvpsnr", level)
    .chain(std::io::stderr())
    .apply()
    .unwrap();
}

fn run() -> Result<(), CliError> {
  let cli = parse_cli()?;
  let cfg = cli.cfg;
  let scale = cfg.scale();

  let mut original = YuvReader::from_reader(
    input_name(&cfg.original),
    cli.io.original,
    cfg.geometry,
    cfg.original_depth,
  )
  .normalized_to(scale);
  let mut encoded = YuvReader::from_reader(
    input_name(&cfg.encoded),
    cli.io.encoded,
    cfg.geometry,
    cfg.encoded_depth,
  )
  .normalized_to(scale);

  if cli.verbose != Verboseness::Quiet {
    info!(
      "Comparing {} ({}-bit) against {} ({}-bit), {}, {} frames",
      original.name(),
      cfg.original_depth,
      encoded.name(),
      cfg.encoded_depth,
      cfg.geometry,
      cfg.frames.map_or_else(|| "all".to_owned(), |n| n.to_string())
    );
    info!("Sample scale: {}, peak: {}", scale, cfg.peak());
  }

  let mut progress = ProgressInfo::new(cfg.frames);
  let summary = compare(
    &mut original,
    &mut encoded,
    cfg.frames,
    cfg.peak(),
    |number, metrics| {
      let frame = FrameSummary { number, metrics: *metrics };
      progress.add_frame(&frame);
      match cli.verbose {
        Verboseness::Verbose => info!("{} - {}", frame, progress),
        // Print a one-line progress indicator that overrides itself with
        // every update
        Verboseness::Normal => eprint!("\r{progress}                    "),
        Verboseness::Quiet => {}
      }
    },
  )
  .map_err(|e| {
    if cli.verbose == Verboseness::Normal && progress.frames_compared() > 0 {
      eprintln!();
    }
    let msg = match e {
      Error::EndOfStream { .. } => "Not enough frames in input",
      Error::ShapeMismatch { .. } => "Inputs do not have the same frame size",
      Error::Io { .. } => "Could not read input",
      _ => "Comparison failed",
    };
    e.context(msg)
  })?;

  if cli.verbose != Verboseness::Quiet {
    if cli.verbose == Verboseness::Normal {
      // Clear out the temporary progress indicator
      eprintln!();
    }
    progress.print_summary(&summary);
  }
  println!("{summary}");

  Ok(())
}
