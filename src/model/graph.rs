// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/model/graph.rs - 编译后的图模型文件
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

use thiserror::Error;
use tracing::{debug, info};

/// 约定的图模型文件名
pub const DEFAULT_GRAPH_FILE: &str = "myGoogleNetGraph";

#[derive(Error, Debug)]
pub enum GraphFileError {
  #[error("无法打开图模型文件 {path}: {source}")]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("图模型文件为空: {0}")]
  Empty(PathBuf),
}

/// 原样读入的图模型数据
#[derive(Debug, Clone)]
pub struct GraphBlob {
  data: Box<[u8]>,
}

impl GraphBlob {
  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GraphFileError> {
    let path = path.as_ref();
    info!("加载图模型文件: {}", path.display());
    let data = std::fs::read(path).map_err(|source| GraphFileError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    if data.is_empty() {
      return Err(GraphFileError::Empty(path.to_path_buf()));
    }
    debug!(
      "图模型文件大小: {:.2} MB",
      data.len() as f64 / (1024.0 * 1024.0)
    );

    Ok(GraphBlob {
      data: data.into_boxed_slice(),
    })
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }
}

impl AsRef<[u8]> for GraphBlob {
  fn as_ref(&self) -> &[u8] {
    &self.data
  }
}
