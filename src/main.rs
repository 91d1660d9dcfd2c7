// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/main.rs - 项目主程序
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

mod args;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use shanan_ncs::{
  Error,
  model::{GraphBlob, open_device},
  output::{JsonOutput, Render, TextOutput},
  task::{OneShotTask, Task},
};

fn run(args: &args::Args) -> Result<()> {
  info!("图像文件: {}", args.image.display());
  info!("图模型文件: {}", args.graph.display());
  info!("标签文件: {}", args.labels.display());

  let graph = GraphBlob::load(&args.graph).map_err(Error::from)?;
  let model = open_device(args.device, graph).map_err(Error::from)?;

  let result = OneShotTask::new(&args.image, &args.labels)
    .with_profile(args.profile())
    .with_top(args.top)
    .run_task(&model)?;

  let mut stdout = std::io::stdout().lock();
  if args.json {
    JsonOutput.render_result(&mut stdout, &result).map_err(Error::from)?;
  } else {
    TextOutput.render_result(&mut stdout, &result).map_err(Error::from)?;
  }

  Ok(())
}

fn main() -> ExitCode {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{:#}", e);
      ExitCode::FAILURE
    }
  }
}
