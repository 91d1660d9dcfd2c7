// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/frame.rs - 归一化帧与张量定义
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

use crate::{
  fp16::{decode_f16, f32_to_f16},
  profile::{BGR_CHANNELS, F16_BYTES},
};

/// 以字节形式交给加速器的张量
pub trait AsTensorBytes {
  fn as_bytes(&self) -> &[u8];
}

/// 均值归一化后的 BGR 帧，NHWC 交错排列
#[derive(Debug, Clone)]
pub struct NormalizedFrame {
  width: u32,
  height: u32,
  data: Box<[f32]>,
}

impl NormalizedFrame {
  pub fn with_shape(width: u32, height: u32) -> Self {
    let size = BGR_CHANNELS * (width as usize) * (height as usize);
    Self {
      width,
      height,
      data: vec![0f32; size].into_boxed_slice(),
    }
  }

  pub fn height(&self) -> usize {
    self.height as usize
  }

  pub fn width(&self) -> usize {
    self.width as usize
  }

  /// 读取 (x, y) 处第 c 个通道的值
  pub fn get(&self, x: u32, y: u32, c: usize) -> f32 {
    let index = ((y as usize) * self.width() + (x as usize)) * BGR_CHANNELS + c;
    self.data[index]
  }

  /// 按通道拆分为 NCHW 平面排列
  pub fn to_planar(&self) -> Vec<f32> {
    let spatial = self.width() * self.height();
    let mut planar = vec![0f32; self.data.len()];
    for (idx, pixel) in self.data.chunks_exact(BGR_CHANNELS).enumerate() {
      for (c, &value) in pixel.iter().enumerate() {
        planar[c * spatial + idx] = value;
      }
    }
    planar
  }

  /// 拆分通道并打包为半精度输入张量
  pub fn to_tensor(&self) -> InputTensor {
    let planar = self.to_planar();
    let mut data = vec![0u8; planar.len() * F16_BYTES];
    f32_to_f16(&mut data, &planar);
    InputTensor::from(data)
  }
}

impl AsMut<[f32]> for NormalizedFrame {
  fn as_mut(&mut self) -> &mut [f32] {
    &mut self.data
  }
}

/// 半精度 NCHW 输入张量
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
  data: Box<[u8]>,
}

impl From<Vec<u8>> for InputTensor {
  fn from(data: Vec<u8>) -> Self {
    Self {
      data: data.into_boxed_slice(),
    }
  }
}

impl InputTensor {
  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// 解包为单精度值，主要用于调试与测试
  pub fn to_f32(&self) -> Vec<f32> {
    decode_f16(&self.data)
  }
}

impl AsTensorBytes for InputTensor {
  fn as_bytes(&self) -> &[u8] {
    &self.data
  }
}

/// 加速器返回的半精度输出张量，每个类别一个值
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTensor {
  data: Box<[u8]>,
}

impl From<Vec<u8>> for OutputTensor {
  fn from(data: Vec<u8>) -> Self {
    Self {
      data: data.into_boxed_slice(),
    }
  }
}

impl OutputTensor {
  /// 由单精度分数构造，分数会被舍入到半精度
  pub fn from_scores(scores: &[f32]) -> Self {
    Self::from(crate::fp16::encode_f16(scores))
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn num_classes(&self) -> usize {
    self.data.len() / F16_BYTES
  }

  pub fn scores(&self) -> Vec<f32> {
    decode_f16(&self.data)
  }
}

impl AsTensorBytes for OutputTensor {
  fn as_bytes(&self) -> &[u8] {
    &self.data
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn planar_split_orders_channels() {
    let mut frame = NormalizedFrame::with_shape(2, 1);
    frame
      .as_mut()
      .copy_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(frame.to_planar(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(frame.get(1, 0, 2), 6.0);
  }

  #[test]
  fn tensor_packs_planar_halves() {
    let mut frame = NormalizedFrame::with_shape(1, 2);
    frame
      .as_mut()
      .copy_from_slice(&[0.5, -1.0, 2.0, 0.25, 8.0, -0.5]);
    let tensor = frame.to_tensor();
    assert_eq!(tensor.len(), 12);
    assert_eq!(tensor.to_f32(), vec![0.5, 0.25, -1.0, 8.0, 2.0, -0.5]);
  }

  #[test]
  fn output_class_count() {
    let output = OutputTensor::from(vec![0u8; 7]);
    assert_eq!(output.num_classes(), 3);
    assert_eq!(output.scores().len(), 3);

    let output = OutputTensor::from_scores(&[0.25, 1.0]);
    assert_eq!(output.as_bytes(), &[0x00, 0x34, 0x00, 0x3C]);
  }
}
