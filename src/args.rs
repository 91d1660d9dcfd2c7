// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/args.rs - 项目参数配置
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

use std::path::PathBuf;

use clap::Parser;
use shanan_ncs::{
  model::DEFAULT_GRAPH_FILE,
  output::DEFAULT_LABEL_FILE,
  profile::PreprocessProfile,
};

/// Shanan NCS 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 待分类的图像文件路径
  #[arg(value_name = "IMAGE")]
  pub image: PathBuf,

  /// 编译后的图模型文件路径
  #[arg(long, default_value = DEFAULT_GRAPH_FILE, value_name = "FILE")]
  pub graph: PathBuf,

  /// 类别标签文件路径，每行一个类别
  #[arg(long, default_value = DEFAULT_LABEL_FILE, value_name = "FILE")]
  pub labels: PathBuf,

  /// 使用第几个 NCS 设备
  #[arg(long, default_value = "0", value_name = "INDEX")]
  pub device: usize,

  /// 网络输入宽度
  #[arg(long, default_value = "224", value_name = "PIXELS")]
  pub width: u32,

  /// 网络输入高度
  #[arg(long, default_value = "224", value_name = "PIXELS")]
  pub height: u32,

  /// 每通道均值，按 B,G,R 顺序，缺省为 GoogLeNet 均值
  #[arg(long, value_delimiter = ',', num_args = 3, value_name = "B,G,R")]
  pub mean: Option<Vec<f32>>,

  /// 输出分数最高的类别数
  #[arg(long, default_value = "1", value_name = "K")]
  pub top: usize,

  /// 以 JSON 格式输出结果
  #[arg(long)]
  pub json: bool,
}

impl Args {
  pub fn profile(&self) -> PreprocessProfile {
    let profile = PreprocessProfile::default().with_size(self.width, self.height);
    match self.mean.as_deref() {
      Some(&[b, g, r]) => profile.with_mean([b, g, r]),
      _ => profile,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let args = Args::try_parse_from(["shanan-ncs", "cat.jpg"]).unwrap();
    assert_eq!(args.graph, PathBuf::from("myGoogleNetGraph"));
    assert_eq!(args.labels, PathBuf::from("categories.txt"));
    assert_eq!(args.profile(), PreprocessProfile::GOOGLENET);
    assert_eq!(args.top, 1);
    assert!(!args.json);
  }

  #[test]
  fn overrides() {
    let args = Args::try_parse_from([
      "shanan-ncs",
      "cat.jpg",
      "--width",
      "227",
      "--height",
      "227",
      "--mean",
      "104,117,123",
      "--top",
      "5",
    ])
    .unwrap();
    let profile = args.profile();
    assert_eq!((profile.width, profile.height), (227, 227));
    assert_eq!(profile.mean, [104.0, 117.0, 123.0]);
    assert_eq!(args.top, 5);
  }

  #[test]
  fn image_is_required() {
    assert!(Args::try_parse_from(["shanan-ncs"]).is_err());
  }
}
