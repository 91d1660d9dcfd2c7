// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/input.rs - 图像输入与张量准备
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

use std::path::Path;

use tracing::{debug, info};

use crate::{frame::InputTensor, profile::PreprocessProfile};

mod read_image_file;
pub use self::read_image_file::{
  ImageFileInput, ImageLoadError, normalize_channels, resize_to, subtract_mean,
};

/// 读取图像文件并生成加速器所需的半精度 NCHW 输入张量
pub fn prepare<P: AsRef<Path>>(
  path: P,
  profile: &PreprocessProfile,
) -> Result<InputTensor, ImageLoadError> {
  info!("准备输入张量: {}", path.as_ref().display());
  let input = ImageFileInput::open(path)?;
  let frame = input.into_frame(profile)?;
  let tensor = frame.to_tensor();
  debug!("输入张量大小: {} 字节", tensor.len());
  Ok(tensor)
}
