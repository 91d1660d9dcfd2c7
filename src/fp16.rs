// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/fp16.rs - 单精度与半精度浮点互转
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

//! IEEE 754 binary32 与 binary16 之间的转换。
//!
//! 半精度值以小端字节序存放，每个值 2 字节。舍入方式为就近舍入到偶数，
//! 支持次正规数，超出范围的值饱和为 ±∞，NaN 保持为 NaN。

use half::{f16, slice::HalfFloatSliceExt};

use crate::profile::F16_BYTES;

/// 将 `src` 中的单精度值打包为半精度字节写入 `dst`
///
/// `dst` 的长度必须恰好为 `2 * src.len()`。
pub fn f32_to_f16(dst: &mut [u8], src: &[f32]) {
  if dst.len() != src.len() * F16_BYTES {
    panic!(
      "半精度缓冲区长度不匹配: 期望长度 {}, 实际长度 {}",
      src.len() * F16_BYTES,
      dst.len()
    );
  }

  let mut halves = vec![f16::from_bits(0); src.len()];
  halves.convert_from_f32_slice(src);
  for (bytes, value) in dst.chunks_exact_mut(F16_BYTES).zip(halves) {
    bytes.copy_from_slice(&value.to_le_bytes());
  }
}

/// 将 `src` 中的半精度字节解包为单精度值写入 `dst`
///
/// `dst` 的长度必须为 `src.len() / 2`，多余的单个尾字节被忽略。
pub fn f16_to_f32(dst: &mut [f32], src: &[u8]) {
  if dst.len() != src.len() / F16_BYTES {
    panic!(
      "单精度缓冲区长度不匹配: 期望长度 {}, 实际长度 {}",
      src.len() / F16_BYTES,
      dst.len()
    );
  }

  let halves: Vec<f16> = src
    .chunks_exact(F16_BYTES)
    .map(|bytes| f16::from_le_bytes([bytes[0], bytes[1]]))
    .collect();
  halves.convert_to_f32_slice(dst);
}

pub fn encode_f16(src: &[f32]) -> Vec<u8> {
  let mut dst = vec![0u8; src.len() * F16_BYTES];
  f32_to_f16(&mut dst, src);
  dst
}

pub fn decode_f16(src: &[u8]) -> Vec<f32> {
  let mut dst = vec![0f32; src.len() / F16_BYTES];
  f16_to_f32(&mut dst, src);
  dst
}
