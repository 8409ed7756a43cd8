//! 单元测试模块
//! 覆盖布局函数、卡片缓存、手势状态机、动画驱动器和卡片流控制器

pub mod layout_tests;
pub mod gesture_tests;

use crate::{CardFlow, Configuration, DataSource, EventLog, PositionedCard, RenderSurface, Size};
use std::cell::RefCell;
use std::rc::Rc;

/// 测试用数据源：卡片内容为 "card-{index}"，记录每次取卡和归还
#[derive(Debug, Default)]
pub struct StubSource {
    pub count: usize,
    pub fetches: Vec<usize>,
    pub evicted: Vec<usize>,
    /// 对该索引返回 None，模拟违反约定
    pub missing: Option<usize>,
}

impl StubSource {
    pub fn new(count: usize) -> Self {
        Self { count, ..Default::default() }
    }

    pub fn fetch_count(&self, index: usize) -> usize {
        self.fetches.iter().filter(|&&i| i == index).count()
    }
}

impl DataSource for StubSource {
    type Card = String;

    fn number_of_cards(&self) -> usize {
        self.count
    }

    fn card_at_index(&mut self, index: usize) -> Option<String> {
        self.fetches.push(index);
        if self.missing == Some(index) {
            return None;
        }
        Some(format!("card-{}", index))
    }

    fn card_evicted(&mut self, index: usize, _card: String) {
        self.evicted.push(index);
    }
}

/// 记录每次输出的 (索引, 内容)
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub frames: Rc<RefCell<Vec<Vec<(usize, String)>>>>,
}

impl RenderSurface<String> for RecordingSurface {
    fn present(&mut self, cards: &[PositionedCard<'_, String>]) {
        let frame = cards.iter().map(|c| (c.index, c.card.clone())).collect();
        self.frames.borrow_mut().push(frame);
    }
}

/// 视口 320x480，卡片 80x120
pub fn test_config(side_cards: usize, card_spacing: f32) -> Configuration {
    let mut config = Configuration::new(Size::new(80.0, 120.0), card_spacing, side_cards).unwrap();
    config.viewport = Size::new(320.0, 480.0);
    config
}

/// 已完成首次加载的卡片流和它的事件日志
pub fn loaded_flow(count: usize, side_cards: usize, card_spacing: f32) -> (CardFlow<StubSource>, EventLog) {
    let log = EventLog::new();
    let mut flow = CardFlow::new(StubSource::new(count), test_config(side_cards, card_spacing))
        .unwrap()
        .with_delegate(log.clone());
    flow.reload_data().unwrap();
    (flow, log)
}

/// 推进动画直到结束
pub fn run_animation(flow: &mut CardFlow<StubSource>) {
    for _ in 0..200 {
        if !flow.tick(1.0 / 60.0).unwrap() {
            return;
        }
    }
    panic!("animation did not finish");
}
