//! 事件系统 - 外部手势识别器产出的输入事件，以及卡片流发给代理的事件

use crate::geometry::Point;
use serde::Serialize;

/// 输入事件（已由外部识别器解析为平移/点击）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// 开始拖动
    PanBegin(Point),
    /// 拖动中，携带本次的水平位移增量（视口坐标）
    PanMove(f32),
    /// 松手，可选携带水平速度（点/秒）
    PanEnd(Option<f32>),
    /// 点击
    Tap(Point),
}

/// 卡片流对外发出的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "index", rename_all = "camelCase")]
pub enum CardFlowEvent {
    /// 某张卡片停在中心
    Centered(usize),
    /// 某张卡片被点击
    Tapped(usize),
}
