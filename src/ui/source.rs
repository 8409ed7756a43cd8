//! 卡片流与外部协作者之间的约定：数据源、代理、渲染面

use crate::event::CardFlowEvent;
use crate::layout::Transform;
use std::cell::RefCell;
use std::rc::Rc;

/// 卡片数据源
///
/// `card_at_index` 只会以 `[0, number_of_cards())` 内的索引调用，并应返回已准备好的内容。
/// 对范围内的索引返回 `None` 视为违反约定。
pub trait DataSource {
    type Card;

    fn number_of_cards(&self) -> usize;

    fn card_at_index(&mut self, index: usize) -> Option<Self::Card>;

    /// 卡片被淘汰时交还给数据源，可用于复用
    fn card_evicted(&mut self, _index: usize, _card: Self::Card) {}
}

/// 卡片流代理，所有回调均可选
pub trait Delegate {
    /// 某张卡片停在中心
    fn on_centered(&mut self, _index: usize) {}

    /// 某张卡片被点击
    fn on_tap(&mut self, _index: usize) {}
}

/// 一次布局后处于可见位置的卡片
#[derive(Debug)]
pub struct PositionedCard<'a, C> {
    pub index: usize,
    pub transform: Transform,
    pub card: &'a C,
}

/// 渲染面：接收按叠放顺序排好的卡片（最上层在最后）
pub trait RenderSurface<C> {
    fn present(&mut self, cards: &[PositionedCard<'_, C>]);
}

/// 记录代理事件的共享日志
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<CardFlowEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CardFlowEvent> {
        self.events.borrow().clone()
    }

    /// 取出并清空已记录的事件
    pub fn drain(&self) -> Vec<CardFlowEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl Delegate for EventLog {
    fn on_centered(&mut self, index: usize) {
        self.events.borrow_mut().push(CardFlowEvent::Centered(index));
    }

    fn on_tap(&mut self, index: usize) {
        self.events.borrow_mut().push(CardFlowEvent::Tapped(index));
    }
}
