// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/error.rs - 错误分类
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

use thiserror::Error;

use crate::{
  input::ImageLoadError,
  model::{DeviceError, GraphFileError},
  output::{DecodeError, OutputError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  ImageLoad,
  GraphFile,
  Device,
  LabelFile,
  LabelIndexOutOfRange,
  Output,
}

#[derive(Error, Debug)]
pub enum Error {
  #[error("图像加载错误: {0}")]
  ImageLoad(#[from] ImageLoadError),
  #[error("图模型文件错误: {0}")]
  GraphFile(#[from] GraphFileError),
  #[error("设备错误: {0}")]
  Device(#[from] DeviceError),
  #[error("结果解码错误: {0}")]
  Decode(#[from] DecodeError),
  #[error("结果输出错误: {0}")]
  Output(#[from] OutputError),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::ImageLoad(_) => ErrorKind::ImageLoad,
      Error::GraphFile(_) => ErrorKind::GraphFile,
      Error::Device(_) => ErrorKind::Device,
      Error::Decode(DecodeError::EmptyOutput) => ErrorKind::Device,
      Error::Decode(DecodeError::LabelFile { .. }) => ErrorKind::LabelFile,
      Error::Decode(DecodeError::LabelIndexOutOfRange { .. }) => ErrorKind::LabelIndexOutOfRange,
      Error::Output(_) => ErrorKind::Output,
    }
  }
}
