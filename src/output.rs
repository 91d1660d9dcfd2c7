// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/output.rs - 分类结果输出
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

use std::io::Write;

use serde_json::json;
use thiserror::Error;

mod decode;
pub use self::decode::{
  Classification, DEFAULT_LABEL_FILE, DecodeError, Prediction, argmax, decode, decode_top_k,
  read_label, top_k,
};

pub trait Render {
  type Error;
  fn render_result<W: Write>(&self, writer: &mut W, result: &Classification)
  -> Result<(), Self::Error>;
}

#[derive(Error, Debug)]
pub enum OutputError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("JSON 序列化错误: {0}")]
  JsonError(#[from] serde_json::Error),
}

/// 纯文本输出，每行一个类别
#[derive(Debug, Default)]
pub struct TextOutput;

impl Render for TextOutput {
  type Error = OutputError;

  fn render_result<W: Write>(
    &self,
    writer: &mut W,
    result: &Classification,
  ) -> Result<(), Self::Error> {
    for item in result.items.iter() {
      writeln!(writer, "{} ({}): {:.6}", item.label, item.index, item.score)?;
    }
    Ok(())
  }
}

/// JSON 输出
#[derive(Debug, Default)]
pub struct JsonOutput;

impl Render for JsonOutput {
  type Error = OutputError;

  fn render_result<W: Write>(
    &self,
    writer: &mut W,
    result: &Classification,
  ) -> Result<(), Self::Error> {
    let items: Vec<_> = result
      .items
      .iter()
      .map(|item| {
        json!({
          "index": item.index,
          "label": item.label,
          "score": item.score,
        })
      })
      .collect();
    let value = json!({
      "top1": items.first(),
      "predictions": items,
    });
    serde_json::to_writer(&mut *writer, &value)?;
    writeln!(writer)?;
    Ok(())
  }
}
