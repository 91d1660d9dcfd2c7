// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/model/ncs.rs - Movidius 神经计算棒后端
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

use half::f16;
use mvnc::{Device, Graph};
use tracing::{debug, info};

use crate::{
  frame::{AsTensorBytes, InputTensor, OutputTensor},
  model::{DeviceError, GraphBlob, Model},
  profile::F16_BYTES,
};

/// 按索引顺序枚举已连接的 NCS 设备名
pub fn device_names() -> Vec<String> {
  let names: Vec<String> = (0..).map_while(|index| Device::get_name(index)).collect();
  for name in &names {
    info!("Found NCS: {}", name);
  }
  names
}

pub struct NcsModel {
  device_name: String,
  graph: GraphBlob,
}

impl NcsModel {
  pub fn new(device_name: String, graph: GraphBlob) -> Self {
    NcsModel { device_name, graph }
  }
}

impl Model for NcsModel {
  type Error = DeviceError;

  fn infer(&self, input: &InputTensor) -> Result<OutputTensor, Self::Error> {
    debug!("打开 NCS 设备: {}", self.device_name);
    let device =
      Device::open(&self.device_name).map_err(|e| DeviceError::call("打开设备", e))?;

    debug!("分配图模型: {} 字节", self.graph.len());
    let mut graph =
      Graph::allocate(&device, self.graph.as_ref()).map_err(|e| DeviceError::call("分配图模型", e))?;

    let halves: Vec<f16> = input
      .as_bytes()
      .chunks_exact(F16_BYTES)
      .map(|bytes| f16::from_bits(u16::from_le_bytes([bytes[0], bytes[1]])))
      .collect();

    debug!("加载输入张量");
    graph
      .load_tensor(&halves)
      .map_err(|e| DeviceError::call("加载输入张量", e))?;

    debug!("等待推理结果");
    let (_, output) = graph
      .get_result::<f16>()
      .map_err(|e| DeviceError::call("获取推理结果", e))?;

    let bytes: Vec<u8> = output
      .iter()
      .flat_map(|value| value.to_bits().to_le_bytes())
      .collect();
    Ok(OutputTensor::from(bytes))
  }
}
