//! Card Flow - 横向卡片流引擎
//! 位移到卡片变换的布局、按窗口淘汰的卡片缓存、拖动手势状态机和吸附动画

mod config;
mod error;
mod geometry;

pub use config::Configuration;
pub use error::{CardFlowError, Result};
pub use geometry::{Point, Rect, Size};

// 事件
pub mod event;

// 布局函数
pub mod layout;

// 卡片流组件
pub mod ui;

pub use event::{CardFlowEvent, InputEvent};
pub use layout::{DeckLayout, LayoutFunction, LayoutMap, Transform};
pub use ui::{CardFlow, CarouselState, DataSource, Delegate, EventLog, GesturePhase, PositionedCard, RenderSurface};

// 单元测试
#[cfg(test)]
mod tests;
