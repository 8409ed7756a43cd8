//! 默认的"卡组"布局：卡片沿水平轴排开，越靠边越小越透明

use super::{split_displacement, LayoutFunction, LayoutMap, Transform};
use crate::config::Configuration;
use crate::geometry::{Point, Rect};

/// 最外侧卡片相对中心卡片缩小的比例
const SCALE_FALLOFF: f32 = 0.2;

/// 卡组布局
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckLayout;

impl DeckLayout {
    /// 距中心 `distance` 个间距处的卡片变换
    pub fn transform_at(distance: f32, config: &Configuration) -> Transform {
        let reach = (config.side_cards + 1) as f32;
        let scale = 1.0 - SCALE_FALLOFF * (distance.abs() / reach).min(1.0);
        // 窗口边缘在 side + 0.5 处，卡片进出窗口时完全透明
        let fade = config.side_cards as f32 + 0.5;
        let opacity = (1.0 - distance.abs() / fade).max(0.0);

        let center = Point::new(
            config.viewport.width / 2.0 + distance * config.card_spacing,
            config.viewport.height / 2.0,
        );

        Transform {
            frame: Rect::centered_at(center, config.card_size.scaled(scale)),
            opacity,
            scale,
            z_order: reach - distance.abs(),
        }
    }
}

impl LayoutFunction for DeckLayout {
    fn layout(&self, displacement: f32, config: &Configuration) -> LayoutMap {
        let (_, fraction) = split_displacement(displacement);
        let side = config.side_cards as isize;

        (-side..=side)
            .map(|offset| (offset, Self::transform_at(offset as f32 - fraction, config)))
            .collect()
    }
}
