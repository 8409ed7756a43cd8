//! CardFlow - 横向卡片流控制器
//!
//! 持有配置与状态，协调手势状态机、动画驱动器、布局函数和卡片缓存：
//!
//! 输入事件 -> 手势状态机 -> 位移 -> 布局函数 -> 缓存取卡/淘汰 -> 渲染面 -> 代理事件

use super::animation::AnimationDriver;
use super::card_cache::CardCache;
use super::gesture::{placement_for, GesturePhase, GestureStateMachine};
use super::source::{DataSource, Delegate, PositionedCard, RenderSurface};
use crate::config::{check_positive, check_size, Configuration};
use crate::error::{CardFlowError, Result};
use crate::event::InputEvent;
use crate::geometry::{Point, Size};
use crate::layout::{split_displacement, DeckLayout, LayoutFunction, Transform};
use serde::Serialize;

/// 位移与目标的差小于该值即视为已到位
const SETTLE_EPSILON: f32 = 1e-4;

/// 卡片流状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselState {
    /// 卡片总数（数据源的缓存值）
    pub card_count: usize,
    /// 离中心最近的卡片
    pub current_placement: usize,
    /// 正在动画前往的卡片，空闲时等于 current_placement
    pub target_placement: usize,
    /// 连续位移，单位是卡片间距，整数值表示某张卡片正好居中
    pub displacement: f32,
    /// 下一次布局前需要重新加载全部数据
    pub needs_reload: bool,
}

/// 横向卡片流
pub struct CardFlow<S: DataSource> {
    config: Configuration,
    state: CarouselState,
    /// 最近一次通知代理的居中卡片
    centered: usize,
    source: S,
    delegate: Option<Box<dyn Delegate>>,
    layout: Box<dyn LayoutFunction>,
    surface: Option<Box<dyn RenderSurface<S::Card>>>,
    cache: CardCache<S::Card>,
    gesture: GestureStateMachine,
    animation: AnimationDriver,
    /// 最近一次布局的输出，按叠放顺序排列（最上层在最后）
    frame: Vec<(usize, Transform)>,
}

impl<S: DataSource> CardFlow<S> {
    /// 创建卡片流；卡片总数在首次布局（或 reload_data）时获取
    pub fn new(source: S, config: Configuration) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: CarouselState {
                card_count: 0,
                current_placement: 0,
                target_placement: 0,
                displacement: 0.0,
                needs_reload: true,
            },
            centered: 0,
            source,
            delegate: None,
            layout: Box::new(DeckLayout),
            surface: None,
            cache: CardCache::new(),
            gesture: GestureStateMachine::new(),
            animation: AnimationDriver::new(),
            frame: Vec::new(),
        })
    }

    pub fn with_delegate(mut self, delegate: impl Delegate + 'static) -> Self {
        self.delegate = Some(Box::new(delegate));
        self
    }

    pub fn with_layout_function(mut self, layout: impl LayoutFunction + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn with_render_surface(mut self, surface: impl RenderSurface<S::Card> + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    // ---- 命令 ----

    /// 重新加载全部卡片：重新获取总数、清空缓存、把位移限制到新范围内，然后重新布局
    pub fn reload_data(&mut self) -> Result<()> {
        self.state.needs_reload = true;
        self.layout_pass()
    }

    /// 只重新加载一张卡片，不影响位移和居中位置
    pub fn reload_card_at_index(&mut self, index: usize) -> Result<()> {
        if self.state.needs_reload {
            return self.layout_pass();
        }
        let count = self.state.card_count;
        if index >= count {
            log::warn!("reload of card {} outside of {} cards", index, count);
            return Err(CardFlowError::ProviderContractViolation { index, count });
        }
        self.cache.evict(index, &mut self.source);
        self.layout_pass()
    }

    /// 居中到当前卡片右侧（正数）或左侧（负数）第 `interval` 张卡片
    ///
    /// 动画进行中时以动画目标为基准，连续调用会累加。
    pub fn center_on_card_at_interval(&mut self, interval: isize, animated: bool) -> Result<()> {
        if self.state.needs_reload {
            self.layout_pass()?;
        }
        let count = self.state.card_count;
        if count == 0 {
            return Ok(());
        }

        let base = if self.animation.is_running() {
            self.state.target_placement
        } else {
            self.state.current_placement
        };
        let target = (base as isize).saturating_add(interval).clamp(0, count as isize - 1) as usize;
        log::debug!("center on card {} (from {}, animated: {})", target, base, animated);

        if animated && (target as f32 - self.state.displacement).abs() > SETTLE_EPSILON {
            self.state.target_placement = target;
            self.gesture.animate();
            self.animation
                .start(self.state.displacement, target as f32, self.config.snap_duration);
            Ok(())
        } else {
            self.settle_at(target)
        }
    }

    // ---- 输入 ----

    pub fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::PanBegin(point) => self.pan_begin(point),
            InputEvent::PanMove(delta) => self.pan_move(delta),
            InputEvent::PanEnd(velocity) => self.pan_end(velocity),
            InputEvent::Tap(point) => {
                self.tap(point);
                Ok(())
            }
        }
    }

    /// 开始拖动；进行中的动画被打断，从当前插值继续
    pub fn pan_begin(&mut self, point: Point) -> Result<()> {
        if self.state.needs_reload {
            self.layout_pass()?;
        }
        if let Some(value) = self.animation.cancel() {
            self.state.displacement = value;
            self.reconcile();
        }
        let interrupted = self.gesture.begin(self.state.displacement, self.state.current_placement);
        self.state.target_placement = self.state.current_placement;
        log::trace!(
            "pan begin at ({}, {}), displacement {} (interrupted animation: {})",
            point.x, point.y, self.state.displacement, interrupted
        );
        Ok(())
    }

    /// 拖动中：delta 为本次水平位移增量
    pub fn pan_move(&mut self, delta: f32) -> Result<()> {
        let max = max_displacement(self.state.card_count);
        let Some(displacement) = self.gesture.drag(delta, self.config.card_spacing, max) else {
            return Ok(());
        };
        self.state.displacement = displacement;
        self.reconcile();
        self.state.target_placement = self.state.current_placement;
        self.layout_pass()
    }

    /// 松手：吸附到最近的卡片（半整数远离零取整）
    pub fn pan_end(&mut self, velocity: Option<f32>) -> Result<()> {
        let Some((from, target)) =
            self.gesture
                .end(velocity, self.config.flick_velocity, self.state.card_count)
        else {
            return Ok(());
        };
        log::debug!("pan end at displacement {}, snapping to card {}", from, target);

        self.state.target_placement = target;
        if (target as f32 - from).abs() <= SETTLE_EPSILON {
            return self.settle_at(target);
        }
        self.animation.start(from, target as f32, self.config.snap_duration);
        Ok(())
    }

    /// 点击：按最近一次布局的结果反查卡片，最上层优先
    pub fn tap(&mut self, point: Point) -> Option<usize> {
        let index = self
            .frame
            .iter()
            .rev()
            .find(|(_, transform)| transform.frame.contains(&point))
            .map(|&(index, _)| index)?;
        log::debug!("tap on card {}", index);
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_tap(index);
        }
        Some(index)
    }

    /// 动画帧：推进 dt 秒，返回动画是否仍在进行
    pub fn tick(&mut self, dt: f32) -> Result<bool> {
        let Some(step) = self.animation.tick(dt) else {
            return Ok(false);
        };
        if step.finished {
            self.settle_at(self.state.target_placement)?;
            return Ok(false);
        }
        self.state.displacement = step.value;
        self.reconcile();
        self.layout_pass()?;
        Ok(true)
    }

    // ---- 配置 ----

    pub fn set_card_size(&mut self, size: Size) -> Result<()> {
        check_size("cardSize", size)?;
        self.config.card_size = size;
        self.layout_pass()
    }

    pub fn set_card_spacing(&mut self, spacing: f32) -> Result<()> {
        check_positive("cardSpacing", spacing)?;
        self.config.card_spacing = spacing;
        self.layout_pass()
    }

    pub fn set_side_cards(&mut self, side_cards: usize) -> Result<()> {
        self.config.side_cards = side_cards;
        self.layout_pass()
    }

    pub fn set_viewport_size(&mut self, viewport: Size) -> Result<()> {
        check_size("viewport", viewport)?;
        self.config.viewport = viewport;
        self.layout_pass()
    }

    pub fn set_cache_margin(&mut self, margin: usize) -> Result<()> {
        self.config.cache_margin = margin;
        self.layout_pass()
    }

    /// 整体替换配置，校验失败时保留原配置
    pub fn set_configuration(&mut self, config: Configuration) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.layout_pass()
    }

    pub fn set_layout_function(&mut self, layout: impl LayoutFunction + 'static) -> Result<()> {
        self.layout = Box::new(layout);
        self.layout_pass()
    }

    pub fn set_delegate(&mut self, delegate: impl Delegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn set_render_surface(&mut self, surface: impl RenderSurface<S::Card> + 'static) {
        self.surface = Some(Box::new(surface));
        self.present();
    }

    // ---- 查询 ----

    pub fn configuration(&self) -> &Configuration { &self.config }
    pub fn card_size(&self) -> Size { self.config.card_size }
    pub fn card_spacing(&self) -> f32 { self.config.card_spacing }
    pub fn side_cards(&self) -> usize { self.config.side_cards }
    pub fn state(&self) -> CarouselState { self.state }
    pub fn number_of_cards(&self) -> usize { self.state.card_count }
    pub fn current_placement(&self) -> usize { self.state.current_placement }
    pub fn target_placement(&self) -> usize { self.state.target_placement }
    pub fn displacement(&self) -> f32 { self.state.displacement }
    pub fn needs_reload(&self) -> bool { self.state.needs_reload }
    pub fn phase(&self) -> GesturePhase { self.gesture.phase() }
    pub fn is_animating(&self) -> bool { self.animation.is_running() }

    /// 最近一次布局输出的 (索引, 变换)，最上层在最后
    pub fn frame(&self) -> &[(usize, Transform)] {
        &self.frame
    }

    pub fn cached_indices(&self) -> Vec<usize> {
        self.cache.indices()
    }

    pub fn cache(&self) -> &CardCache<S::Card> {
        &self.cache
    }

    pub fn data_source(&self) -> &S {
        &self.source
    }

    /// 修改数据源后需调用 reload_data 或 reload_card_at_index
    pub fn data_source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    // ---- 布局 ----

    /// 一次布局：处理待重新加载、淘汰窗口外的卡片、计算变换、取卡、输出到渲染面
    ///
    /// 取卡失败时返回错误，上一帧被丢弃，待重新加载的标记保留到下一次成功的布局。
    pub fn layout_pass(&mut self) -> Result<()> {
        let reloading = self.state.needs_reload;
        if reloading {
            self.apply_reload();
        }
        self.frame.clear();

        let count = self.state.card_count;
        let placement = self.state.current_placement;
        self.cache
            .evict_outside_window(placement, self.config.retained_radius(), &mut self.source);
        self.cache.clear_nodes();

        let mut frame = Vec::new();
        if count > 0 {
            let (base, _) = split_displacement(self.state.displacement);
            let transforms = self.layout.layout(self.state.displacement, &self.config);
            for (offset, transform) in transforms {
                let Some(index) = window_index(base, offset, count) else {
                    continue;
                };
                self.cache.ensure(index, count, &mut self.source)?;
                self.cache.set_node(index, transform);
                frame.push((index, transform));
            }
        }
        frame.sort_by(|a, b| a.1.z_order.total_cmp(&b.1.z_order));
        log::trace!(
            "layout pass: displacement {}, placement {}, {} cards visible, {} cached",
            self.state.displacement,
            placement,
            frame.len(),
            self.cache.len()
        );
        if reloading {
            self.state.needs_reload = false;
        }
        self.frame = frame;
        self.present();
        Ok(())
    }

    // ---- 内部 ----

    fn apply_reload(&mut self) {
        self.cache.clear(&mut self.source);
        self.animation.cancel();
        self.gesture.settle();

        let count = self.source.number_of_cards();
        self.state.card_count = count;
        let displacement = if self.state.displacement.is_finite() { self.state.displacement } else { 0.0 };
        self.state.displacement = displacement.clamp(0.0, max_displacement(count));
        self.reconcile();
        self.state.target_placement = self.state.current_placement;
        log::debug!("reloaded {} cards, placement {}", count, self.state.current_placement);

        if count == 0 {
            self.centered = 0;
        } else {
            self.notify_centered();
        }
    }

    /// 停到目标卡片：结束动画和手势、布局，然后通知代理
    fn settle_at(&mut self, target: usize) -> Result<()> {
        self.animation.cancel();
        self.gesture.settle();
        self.state.displacement = target as f32;
        self.state.target_placement = target;
        self.reconcile();
        self.layout_pass()?;
        self.notify_centered();
        Ok(())
    }

    fn reconcile(&mut self) {
        self.state.current_placement = placement_for(self.state.displacement, self.state.card_count);
    }

    fn notify_centered(&mut self) {
        let placement = self.state.current_placement;
        if self.state.card_count == 0 || placement == self.centered {
            return;
        }
        self.centered = placement;
        log::debug!("centered on card {}", placement);
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_centered(placement);
        }
    }

    fn present(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let cache = &self.cache;
        let cards: Vec<PositionedCard<'_, S::Card>> = self
            .frame
            .iter()
            .filter_map(|&(index, transform)| {
                cache.get(index).map(|entry| PositionedCard {
                    index,
                    transform,
                    card: &entry.card,
                })
            })
            .collect();
        surface.present(&cards);
    }
}

/// 静止时允许的最大位移
fn max_displacement(card_count: usize) -> f32 {
    card_count.saturating_sub(1) as f32
}

fn window_index(base: isize, offset: isize, count: usize) -> Option<usize> {
    let index = base.checked_add(offset)?;
    if index < 0 || index as usize >= count {
        None
    } else {
        Some(index as usize)
    }
}
