//! 卡片流配置
//!
//! 可从 JSON 加载（camelCase 键，所有字段都有默认值），例如：
//!
//! ```json
//! { "cardSize": { "width": 120, "height": 180 }, "cardSpacing": 90, "sideCards": 2 }
//! ```

use crate::error::{CardFlowError, Result};
use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 卡片流布局配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// 每张卡片的尺寸
    #[serde(default = "default_card_size")]
    pub card_size: Size,
    /// 相邻两张卡片中心的间距
    #[serde(default = "default_card_spacing")]
    pub card_spacing: f32,
    /// 中心卡片两侧各显示的卡片数，例如 2 表示同时显示 5 张
    #[serde(default = "default_side_cards")]
    pub side_cards: usize,
    /// 视口尺寸，居中卡片位于视口中心
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    /// 淘汰时在可见窗口两侧额外保留的卡片数
    #[serde(default)]
    pub cache_margin: usize,
    /// 吸附动画时长（秒）
    #[serde(default = "default_snap_duration")]
    pub snap_duration: f32,
    /// 快速甩动阈值（点/秒），未设置时松手只按四舍五入吸附
    #[serde(default)]
    pub flick_velocity: Option<f32>,
}

fn default_card_size() -> Size { Size::new(200.0, 300.0) }
fn default_card_spacing() -> f32 { 100.0 }
fn default_side_cards() -> usize { 2 }
fn default_viewport() -> Size { Size::new(320.0, 480.0) }
fn default_snap_duration() -> f32 { 0.3 }

impl Default for Configuration {
    fn default() -> Self {
        Self {
            card_size: default_card_size(),
            card_spacing: default_card_spacing(),
            side_cards: default_side_cards(),
            viewport: default_viewport(),
            cache_margin: 0,
            snap_duration: default_snap_duration(),
            flick_velocity: None,
        }
    }
}

impl Configuration {
    pub fn new(card_size: Size, card_spacing: f32, side_cards: usize) -> Result<Self> {
        let config = Self {
            card_size,
            card_spacing,
            side_cards,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// 解析并校验 JSON 配置
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Configuration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// 检查所有字段的取值范围
    pub fn validate(&self) -> Result<()> {
        check_size("cardSize", self.card_size)?;
        check_positive("cardSpacing", self.card_spacing)?;
        check_size("viewport", self.viewport)?;
        check_positive("snapDuration", self.snap_duration)?;
        if let Some(v) = self.flick_velocity {
            check_positive("flickVelocity", v)?;
        }
        Ok(())
    }

    /// 保留窗口半径（可见卡片 + 淘汰余量）
    pub fn retained_radius(&self) -> usize {
        self.side_cards + self.cache_margin
    }
}

pub(crate) fn check_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CardFlowError::configuration(field, format!("must be a positive number, got {}", value)))
    }
}

pub(crate) fn check_size(field: &'static str, size: Size) -> Result<()> {
    if size.is_positive() {
        Ok(())
    } else {
        Err(CardFlowError::configuration(
            field,
            format!("must have positive width and height, got {}x{}", size.width, size.height),
        ))
    }
}
