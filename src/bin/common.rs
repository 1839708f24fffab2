// Copyright (c) 2017-2026, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use crate::error::*;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use yuvpsnr::prelude::*;

#[derive(Parser, Debug)]
#[clap(
  name = "yuvpsnr",
  version,
  about = "PSNR between two raw planar YUV 4:2:0 videos",
  long_about = None
)]
pub struct CliOptions {
  /// Original (reference) raw YUV file. Use - for stdin
  #[clap(value_parser, help_heading = "INPUT")]
  pub original: PathBuf,
  /// Encoded raw YUV file to score. Use - for stdin
  #[clap(value_parser, help_heading = "INPUT")]
  pub encoded: PathBuf,
  /// Luma resolution of both videos, as WIDTHxHEIGHT
  #[clap(long, short, help_heading = "INPUT")]
  pub size: FrameGeometry,
  /// Number of frames to compare. 0 compares until one of the inputs ends
  #[clap(long, short, default_value_t = 0, help_heading = "INPUT")]
  pub frames: usize,
  /// Bit depth of the original video (8 or 10)
  #[clap(long, default_value_t = BitDepth::Eight, help_heading = "INPUT")]
  pub original_depth: BitDepth,
  /// Bit depth of the encoded video (8 or 10)
  #[clap(long, default_value_t = BitDepth::Eight, help_heading = "INPUT")]
  pub encoded_depth: BitDepth,

  /// Peak sample value used in the PSNR formula.
  /// Defaults to 255 for two 8-bit inputs and 1020 otherwise
  #[clap(long, help_heading = "METRICS")]
  pub peak: Option<f64>,

  /// Log the metrics of every frame
  #[clap(long, short, help_heading = "DEBUGGING")]
  pub verbose: bool,
  /// Only print the final scores
  #[clap(long, short, conflicts_with = "verbose", help_heading = "DEBUGGING")]
  pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verboseness {
  Quiet,
  Normal,
  Verbose,
}

pub struct ComparisonIO {
  pub original: Box<dyn Read + Send>,
  pub encoded: Box<dyn Read + Send>,
}

pub struct ParsedCliOptions {
  pub io: ComparisonIO,
  pub cfg: CompareConfig,
  pub verbose: Verboseness,
}

fn is_stdin(path: &Path) -> bool {
  path.as_os_str() == "-"
}

fn open_input(
  path: &Path, msg: &str,
) -> Result<Box<dyn Read + Send>, CliError> {
  Ok(if is_stdin(path) {
    Box::new(io::stdin()) as Box<dyn Read + Send>
  } else {
    let f = File::open(path).map_err(|e| e.context(msg))?;
    Box::new(BufReader::new(f)) as Box<dyn Read + Send>
  })
}

pub fn parse_cli() -> Result<ParsedCliOptions, CliError> {
  let matches = CliOptions::parse();

  if is_stdin(&matches.original) && is_stdin(&matches.encoded) {
    return Err(CliError::new("Only one of the inputs can be read from stdin"));
  }

  let io = ComparisonIO {
    original: open_input(&matches.original, "Cannot open original file")?,
    encoded: open_input(&matches.encoded, "Cannot open encoded file")?,
  };

  let verbose = if matches.quiet {
    Verboseness::Quiet
  } else if matches.verbose {
    Verboseness::Verbose
  } else {
    Verboseness::Normal
  };

  Ok(ParsedCliOptions { io, cfg: parse_config(&matches), verbose })
}

fn parse_config(matches: &CliOptions) -> CompareConfig {
  let mut cfg = CompareConfig::new(
    matches.original.clone(),
    matches.encoded.clone(),
    matches.size,
  );
  cfg.frames = if matches.frames == 0 { None } else { Some(matches.frames) };
  cfg.original_depth = matches.original_depth;
  cfg.encoded_depth = matches.encoded_depth;
  cfg.peak = matches.peak;
  cfg
}

/// Name of an input as shown in messages.
pub fn input_name(path: &Path) -> String {
  if is_stdin(path) {
    "<stdin>".to_owned()
  } else {
    path.display().to_string()
  }
}
