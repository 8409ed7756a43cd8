//! 布局函数：位移 -> 每张卡片的变换
//!
//! 布局函数是纯函数，每个动画帧和每次拖动都会调用。返回值以相对于
//! `round(displacement)` 的偏移为键，范围是 `[-side_cards, side_cards]`。

mod deck;

pub use deck::DeckLayout;

use crate::config::Configuration;
use crate::geometry::Rect;
use serde::Serialize;
use std::collections::BTreeMap;

/// 单张卡片的渲染变换
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// 视口坐标系下的卡片区域
    pub frame: Rect,
    pub opacity: f32,
    pub scale: f32,
    /// 叠放顺序，越大越靠上
    pub z_order: f32,
}

/// 偏移 -> 变换
pub type LayoutMap = BTreeMap<isize, Transform>;

/// 可替换的布局策略
pub trait LayoutFunction {
    fn layout(&self, displacement: f32, config: &Configuration) -> LayoutMap;
}

impl<F> LayoutFunction for F
where
    F: Fn(f32, &Configuration) -> LayoutMap,
{
    fn layout(&self, displacement: f32, config: &Configuration) -> LayoutMap {
        self(displacement, config)
    }
}

/// 把位移拆成最近的整数位置和小数部分，小数部分落在 [-0.5, 0.5]
///
/// 半整数按远离零的方向取整（`f32::round`）。
pub fn split_displacement(displacement: f32) -> (isize, f32) {
    let whole = displacement.round();
    (whole as isize, displacement - whole)
}
