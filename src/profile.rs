// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/profile.rs - 模型预处理参数
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

/// 网络输入通道数，固定为 BGR 三通道
pub const BGR_CHANNELS: usize = 3;

/// 单个 half 值占用的字节数
pub const F16_BYTES: usize = 2;

const GOOGLENET_INPUT_W: u32 = 224;
const GOOGLENET_INPUT_H: u32 = 224;
// 训练时使用的均值，按 B, G, R 顺序
const GOOGLENET_MEAN: [f32; BGR_CHANNELS] = [
  (0.40787054_f64 * 255.0) as f32,
  (0.45752458_f64 * 255.0) as f32,
  (0.48109378_f64 * 255.0) as f32,
];

/// 模型预处理参数
///
/// 输入尺寸与均值必须与训练时一致，否则网络不会报错，只会给出错误的分类结果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessProfile {
  pub width: u32,
  pub height: u32,
  /// 每通道均值，按 B, G, R 顺序
  pub mean: [f32; BGR_CHANNELS],
}

impl PreprocessProfile {
  /// GoogLeNet (Caffe) 的预处理参数
  pub const GOOGLENET: PreprocessProfile = PreprocessProfile {
    width: GOOGLENET_INPUT_W,
    height: GOOGLENET_INPUT_H,
    mean: GOOGLENET_MEAN,
  };

  pub fn with_size(mut self, width: u32, height: u32) -> Self {
    self.width = width;
    self.height = height;
    self
  }

  pub fn with_mean(mut self, mean: [f32; BGR_CHANNELS]) -> Self {
    self.mean = mean;
    self
  }

  /// 每帧像素数
  pub fn pixels(&self) -> usize {
    self.width as usize * self.height as usize
  }

  /// 输入张量的字节长度
  pub fn tensor_bytes(&self) -> usize {
    F16_BYTES * self.pixels() * BGR_CHANNELS
  }
}

impl Default for PreprocessProfile {
  fn default() -> Self {
    Self::GOOGLENET
  }
}
