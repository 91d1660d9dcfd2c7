// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/input/read_image_file.rs - 图像文件输入与预处理
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

use std::path::{Path, PathBuf};

use image::{
  DynamicImage, ImageReader, RgbImage,
  imageops::{self, FilterType},
};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
  frame::NormalizedFrame,
  profile::{BGR_CHANNELS, PreprocessProfile},
};

#[derive(Error, Debug)]
pub enum ImageLoadError {
  #[error("无法读取图像 {path}: {source}")]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("无法解码图像 {path}: {source}")]
  Decode {
    path: PathBuf,
    source: image::ImageError,
  },
  #[error("不支持的通道数: {0}，仅支持 1、3、4 通道")]
  UnsupportedChannels(u8),
}

/// 从文件读取的原始图像，保留文件本身的通道数
pub struct ImageFileInput {
  image: DynamicImage,
}

impl ImageFileInput {
  pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ImageLoadError> {
    let path = path.as_ref().to_path_buf();
    let io_error = |source| ImageLoadError::Io {
      path: path.clone(),
      source,
    };

    let image = ImageReader::open(&path)
      .map_err(io_error)?
      .with_guessed_format()
      .map_err(io_error)?
      .decode()
      .map_err(|source| {
        error!("图像解码失败: {}", path.display());
        ImageLoadError::Decode {
          path: path.clone(),
          source,
        }
      })?;

    debug!(
      "读取图像 {}: {}x{}, {} 通道",
      path.display(),
      image.width(),
      image.height(),
      image.color().channel_count()
    );

    Ok(ImageFileInput { image })
  }

  /// 通道归一化、缩放、转为浮点并减去均值
  pub fn into_frame(self, profile: &PreprocessProfile) -> Result<NormalizedFrame, ImageLoadError> {
    let rgb = normalize_channels(self.image)?;
    let resized = resize_to(rgb, profile.width, profile.height);
    Ok(subtract_mean(&resized, &profile.mean))
  }
}

/// 将图像统一为三通道
///
/// 四通道丢弃 alpha，单通道复制为三个相同通道，三通道原样返回。
/// 高位深图像按 8 位范围转换。
pub fn normalize_channels(image: DynamicImage) -> Result<RgbImage, ImageLoadError> {
  match image.color().channel_count() {
    3 => match image {
      DynamicImage::ImageRgb8(rgb) => Ok(rgb),
      other => Ok(other.to_rgb8()),
    },
    1 | 4 => Ok(image.to_rgb8()),
    n => {
      error!("不支持的通道数: {}", n);
      Err(ImageLoadError::UnsupportedChannels(n))
    }
  }
}

/// 双线性缩放到指定尺寸，尺寸一致时直接返回
pub fn resize_to(image: RgbImage, width: u32, height: u32) -> RgbImage {
  if image.dimensions() == (width, height) {
    return image;
  }
  debug!(
    "缩放图像: {}x{} -> {}x{}",
    image.width(),
    image.height(),
    width,
    height
  );
  imageops::resize(&image, width, height, FilterType::Triangle)
}

/// 转为 BGR 顺序的浮点帧，保持 0-255 的数值范围并减去均值
pub fn subtract_mean(image: &RgbImage, mean: &[f32; BGR_CHANNELS]) -> NormalizedFrame {
  let (width, height) = image.dimensions();
  let mut frame = NormalizedFrame::with_shape(width, height);

  for (dst, pixel) in frame
    .as_mut()
    .chunks_exact_mut(BGR_CHANNELS)
    .zip(image.pixels())
  {
    let [r, g, b] = pixel.0;
    dst[0] = b as f32 - mean[0];
    dst[1] = g as f32 - mean[1];
    dst[2] = r as f32 - mean[2];
  }
  frame
}
