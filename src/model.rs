// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/model.rs - 模型与加速器
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
use tracing::{error, info};

use crate::frame::{InputTensor, OutputTensor};

/// 在加速器上执行一次推理
pub trait Model {
  type Error;

  fn infer(&self, input: &InputTensor) -> Result<OutputTensor, Self::Error>;
}

#[derive(Error, Debug)]
pub enum DeviceError {
  #[error("系统中未找到 Movidius NCS 设备")]
  NotFound,
  #[error("设备索引 {index} 超出范围，共找到 {count} 个设备")]
  IndexOutOfRange { index: usize, count: usize },
  #[error("未启用 ncsdk 特性，无法访问加速器")]
  BackendDisabled,
  #[error("NCS {action}失败: {message}")]
  Call {
    action: &'static str,
    message: String,
  },
}

impl DeviceError {
  pub fn call<E: std::fmt::Debug>(action: &'static str, e: E) -> Self {
    error!("NCS {}失败: {:?}", action, e);
    DeviceError::Call {
      action,
      message: format!("{:?}", e),
    }
  }
}

mod graph;
pub use self::graph::{DEFAULT_GRAPH_FILE, GraphBlob, GraphFileError};

#[cfg(feature = "ncsdk")]
mod ncs;
#[cfg(feature = "ncsdk")]
pub use self::ncs::{NcsModel, device_names};

/// 未启用 ncsdk 时的占位类型，无法构造
#[cfg(not(feature = "ncsdk"))]
pub enum NcsModel {}

#[cfg(not(feature = "ncsdk"))]
impl Model for NcsModel {
  type Error = DeviceError;

  fn infer(&self, _input: &InputTensor) -> Result<OutputTensor, Self::Error> {
    match *self {}
  }
}

#[cfg(not(feature = "ncsdk"))]
pub fn device_names() -> Vec<String> {
  Vec::new()
}

/// 打开第 `device_index` 个设备并绑定图模型
#[cfg(feature = "ncsdk")]
pub fn open_device(device_index: usize, graph: GraphBlob) -> Result<NcsModel, DeviceError> {
  let name = select_device(device_names(), device_index)?;
  info!("使用 NCS 设备: {}", name);
  Ok(NcsModel::new(name, graph))
}

#[cfg(not(feature = "ncsdk"))]
pub fn open_device(device_index: usize, _graph: GraphBlob) -> Result<NcsModel, DeviceError> {
  info!("请求设备索引 {}", device_index);
  error!("未启用 ncsdk 特性，无法访问加速器");
  Err(DeviceError::BackendDisabled)
}

/// 从枚举结果中选出指定索引的设备名
pub fn select_device(names: Vec<String>, device_index: usize) -> Result<String, DeviceError> {
  if names.is_empty() {
    error!("系统中未找到 Movidius NCS 设备");
    return Err(DeviceError::NotFound);
  }
  let count = names.len();
  names
    .into_iter()
    .nth(device_index)
    .ok_or(DeviceError::IndexOutOfRange {
      index: device_index,
      count,
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn select_first_device() {
    let names = vec!["1.1".to_string(), "1.2".to_string()];
    assert_eq!(select_device(names, 0).unwrap(), "1.1");
  }

  #[test]
  fn no_devices_is_not_found() {
    assert!(matches!(select_device(Vec::new(), 0), Err(DeviceError::NotFound)));
  }

  #[test]
  fn index_out_of_range() {
    let names = vec!["1.1".to_string()];
    assert!(matches!(
      select_device(names, 3),
      Err(DeviceError::IndexOutOfRange { index: 3, count: 1 })
    ));
  }

  #[cfg(not(feature = "ncsdk"))]
  #[test]
  fn disabled_backend_reports_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_GRAPH_FILE);
    std::fs::write(&path, [1u8, 2, 3]).unwrap();
    let graph = GraphBlob::load(&path).unwrap();
    assert!(matches!(
      open_device(0, graph),
      Err(DeviceError::BackendDisabled)
    ));
    assert!(device_names().is_empty());
  }
}
