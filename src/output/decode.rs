// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/output/decode.rs - 推理结果解码
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

use std::{
  fs::File,
  io::{BufRead, BufReader},
  path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, error};

use crate::frame::OutputTensor;

/// 约定的类别标签文件名
pub const DEFAULT_LABEL_FILE: &str = "categories.txt";

#[derive(Error, Debug)]
pub enum DecodeError {
  #[error("推理输出为空")]
  EmptyOutput,
  #[error("无法读取标签文件 {path}: {source}")]
  LabelFile {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("类别索引 {index} 超出标签文件范围，标签文件仅有 {lines} 行")]
  LabelIndexOutOfRange { index: usize, lines: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
  pub index: usize,
  pub label: String,
  pub score: f32,
}

#[derive(Debug, Clone)]
pub struct Classification {
  /// 按分数降序排列，第一个为 top-1
  pub items: Box<[Prediction]>,
}

impl Classification {
  pub fn top1(&self) -> Option<&Prediction> {
    self.items.first()
  }
}

/// 线性扫描取最大值，仅当严格大于当前最大值时替换，平局取较小索引
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
  let (&first, rest) = scores.split_first()?;
  let mut best = (0usize, first);
  for (idx, &score) in rest.iter().enumerate() {
    if score > best.1 {
      best = (idx + 1, score);
    }
  }
  Some(best)
}

/// 取分数最高的 k 个类别，分数相同时较小索引在前
///
/// 第一个结果总是 [`argmax`] 的结果，其余按分数降序排列，NaN 排在最后。
pub fn top_k(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
  let Some(best) = argmax(scores) else {
    return Vec::new();
  };

  let mut rest: Vec<(usize, f32)> = scores
    .iter()
    .copied()
    .enumerate()
    .filter(|&(idx, _)| idx != best.0)
    .collect();
  rest.sort_by(|a, b| rank_key(b.1).total_cmp(&rank_key(a.1)));

  std::iter::once(best).chain(rest).take(k).collect()
}

fn rank_key(score: f32) -> f32 {
  if score.is_nan() { f32::NEG_INFINITY } else { score }
}

/// 逐行读取标签文件，返回第 `index` 行（从 0 开始）
pub fn read_label<P: AsRef<Path>>(path: P, index: usize) -> Result<String, DecodeError> {
  let path = path.as_ref();
  let label_error = |source| DecodeError::LabelFile {
    path: path.to_path_buf(),
    source,
  };

  let reader = BufReader::new(File::open(path).map_err(label_error)?);
  let mut lines = 0usize;
  for line in reader.lines() {
    let line = line.map_err(label_error)?;
    if lines == index {
      return Ok(line);
    }
    lines += 1;
  }

  error!("类别索引 {} 超出标签文件范围 ({} 行)", index, lines);
  Err(DecodeError::LabelIndexOutOfRange { index, lines })
}

/// 解码输出张量，返回 top-1 类别
pub fn decode<P: AsRef<Path>>(output: &OutputTensor, label_path: P) -> Result<Prediction, DecodeError> {
  let scores = output.scores();
  debug!("输出类别数: {}", scores.len());

  let (index, score) = argmax(&scores).ok_or(DecodeError::EmptyOutput)?;
  debug!("最高分类别: {}，分数: {}", index, score);

  let label = read_label(label_path, index)?;
  Ok(Prediction {
    index,
    label,
    score,
  })
}

/// 解码输出张量，返回分数最高的 k 个类别
///
/// k 会被截断到类别数，k 为 0 时按 1 处理；第一个结果与 [`decode`] 一致。
pub fn decode_top_k<P: AsRef<Path>>(
  output: &OutputTensor,
  label_path: P,
  k: usize,
) -> Result<Classification, DecodeError> {
  let scores = output.scores();
  if scores.is_empty() {
    return Err(DecodeError::EmptyOutput);
  }

  let label_path = label_path.as_ref();
  let items = top_k(&scores, k.max(1))
    .into_iter()
    .map(|(index, score)| {
      read_label(label_path, index).map(|label| Prediction {
        index,
        label,
        score,
      })
    })
    .collect::<Result<Vec<_>, _>>()?;

  Ok(Classification {
    items: items.into_boxed_slice(),
  })
}
