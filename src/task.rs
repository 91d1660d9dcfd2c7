// 该文件是 Shanan NCS （山南西风 · 神经计算棒） 项目的一部分。
// src/task.rs - 单次推理任务
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

use tracing::info;

use crate::{
  error::Error,
  input::prepare,
  model::{DeviceError, Model},
  output::{Classification, decode_top_k},
  profile::PreprocessProfile,
};

pub trait Task<M> {
  type Output;
  type Error;
  fn run_task(self, model: &M) -> Result<Self::Output, Self::Error>;
}

/// 一张图像、一次推理
///
/// 任何一步出错都会中止整个任务。
pub struct OneShotTask<'a> {
  pub image: &'a Path,
  pub labels: &'a Path,
  pub profile: PreprocessProfile,
  pub top: usize,
}

impl<'a> OneShotTask<'a> {
  pub fn new(image: &'a Path, labels: &'a Path) -> Self {
    OneShotTask {
      image,
      labels,
      profile: PreprocessProfile::default(),
      top: 1,
    }
  }

  pub fn with_profile(mut self, profile: PreprocessProfile) -> Self {
    self.profile = profile;
    self
  }

  pub fn with_top(mut self, top: usize) -> Self {
    self.top = top;
    self
  }
}

impl<'a, M: Model<Error = DeviceError>> Task<M> for OneShotTask<'a> {
  type Output = Classification;
  type Error = Error;

  fn run_task(self, model: &M) -> Result<Self::Output, Self::Error> {
    info!("开始任务...");
    let tensor = prepare(self.image, &self.profile)?;
    info!("输入张量准备完成，开始推理...");

    let now = std::time::Instant::now();
    let output = model.infer(&tensor)?;
    let elapsed = now.elapsed();
    info!("推理完成，耗时: {:.2?}", elapsed);

    let result = decode_top_k(&output, self.labels, self.top)?;
    if let Some(top1) = result.top1() {
      info!("分类结果: {} ({}), 分数: {}", top1.label, top1.index, top1.score);
    }
    Ok(result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::Cell;

  use image::{Rgb, RgbImage};
  use tempfile::TempDir;

  use crate::{
    error::ErrorKind,
    frame::{InputTensor, OutputTensor},
  };

  struct FixedModel {
    scores: Vec<f32>,
    seen_len: Cell<usize>,
  }

  impl Model for FixedModel {
    type Error = DeviceError;

    fn infer(&self, input: &InputTensor) -> Result<OutputTensor, Self::Error> {
      self.seen_len.set(input.len());
      Ok(OutputTensor::from_scores(&self.scores))
    }
  }

  struct FailingModel;

  impl Model for FailingModel {
    type Error = DeviceError;

    fn infer(&self, _input: &InputTensor) -> Result<OutputTensor, Self::Error> {
      Err(DeviceError::call("获取推理结果", "timeout"))
    }
  }

  fn fixture() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("input.png");
    RgbImage::from_pixel(64, 48, Rgb([200, 100, 50]))
      .save(&image)
      .unwrap();
    let labels = dir.path().join("categories.txt");
    std::fs::write(&labels, "cat\ndog\nbird\nfish\n").unwrap();
    (dir, image, labels)
  }

  #[test]
  fn one_shot_classifies() {
    let (_dir, image, labels) = fixture();
    let model = FixedModel {
      scores: vec![0.1, 0.9, 0.05, 0.2],
      seen_len: Cell::new(0),
    };

    let result = OneShotTask::new(&image, &labels).run_task(&model).unwrap();
    assert_eq!(model.seen_len.get(), 301056);
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.top1().unwrap().label, "dog");
  }

  #[test]
  fn one_shot_top_k() {
    let (_dir, image, labels) = fixture();
    let model = FixedModel {
      scores: vec![0.1, 0.9, 0.05, 0.2],
      seen_len: Cell::new(0),
    };

    let result = OneShotTask::new(&image, &labels)
      .with_top(3)
      .run_task(&model)
      .unwrap();
    let names: Vec<&str> = result.items.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(names, vec!["dog", "fish", "cat"]);
  }

  #[test]
  fn missing_image_aborts_before_inference() {
    let (dir, _image, labels) = fixture();
    let model = FixedModel {
      scores: vec![1.0],
      seen_len: Cell::new(0),
    };

    let missing = dir.path().join("missing.png");
    let err = OneShotTask::new(&missing, &labels)
      .run_task(&model)
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ImageLoad);
    assert_eq!(model.seen_len.get(), 0);
  }

  #[test]
  fn inference_failure_is_device_error() {
    let (_dir, image, labels) = fixture();
    let err = OneShotTask::new(&image, &labels)
      .run_task(&FailingModel)
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Device);
  }

  #[test]
  fn empty_output_is_device_error() {
    let (_dir, image, labels) = fixture();
    let model = FixedModel {
      scores: Vec::new(),
      seen_len: Cell::new(0),
    };

    let err = OneShotTask::new(&image, &labels)
      .run_task(&model)
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Device);
  }

  #[test]
  fn label_overflow_is_reported() {
    let (_dir, image, labels) = fixture();
    let model = FixedModel {
      scores: vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
      seen_len: Cell::new(0),
    };

    let err = OneShotTask::new(&image, &labels)
      .run_task(&model)
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LabelIndexOutOfRange);
  }
}
