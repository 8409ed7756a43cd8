//! 手势状态机：把平移增量转成位移，松手时给出吸附目标
//!
//! 状态转移：
//!
//! | 当前      | 事件       | 下一个    |
//! |-----------|------------|-----------|
//! | Idle      | pan-begin  | Dragging  |
//! | Dragging  | pan-move   | Dragging  |
//! | Dragging  | pan-end    | Animating |
//! | Animating | 动画结束   | Idle      |
//! | Animating | pan-begin  | Dragging  |

/// 越界拖动的阻尼范围（以卡片间距为单位）
const RUBBER_BAND_EXTENT: f32 = 1.0;

/// 手势阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Animating,
}

/// 一次触摸交互的临时状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// 开始拖动时的位移
    pub start_displacement: f32,
    /// 开始拖动时居中的卡片
    pub start_placement: usize,
    /// 累计的平移量（视口坐标）
    pub accumulated: f32,
    /// 最近一次计算出的位移
    pub displacement: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Dragging(GestureSession),
    Animating,
}

/// 手势状态机
#[derive(Debug)]
pub struct GestureStateMachine {
    state: State,
}

impl GestureStateMachine {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    pub fn phase(&self) -> GesturePhase {
        match self.state {
            State::Idle => GesturePhase::Idle,
            State::Dragging(_) => GesturePhase::Dragging,
            State::Animating => GesturePhase::Animating,
        }
    }

    pub fn session(&self) -> Option<&GestureSession> {
        match &self.state {
            State::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// pan-begin：记录起始位移，返回是否打断了进行中的动画
    pub fn begin(&mut self, displacement: f32, placement: usize) -> bool {
        let interrupted = self.state == State::Animating;
        self.state = State::Dragging(GestureSession {
            start_displacement: displacement,
            start_placement: placement,
            accumulated: 0.0,
            displacement,
        });
        interrupted
    }

    /// pan-move：累加平移并返回新的位移；不在拖动中时返回 None
    ///
    /// 向左拖（delta 为负）位移增大。超出 `[0, max_displacement]` 的部分做阻尼，方向不变。
    pub fn drag(&mut self, delta: f32, card_spacing: f32, max_displacement: f32) -> Option<f32> {
        let State::Dragging(session) = &mut self.state else {
            return None;
        };
        session.accumulated += delta;
        let raw = session.start_displacement - session.accumulated / card_spacing;

        let displacement = if raw < 0.0 {
            -rubber_band(-raw, RUBBER_BAND_EXTENT)
        } else if raw > max_displacement {
            max_displacement + rubber_band(raw - max_displacement, RUBBER_BAND_EXTENT)
        } else {
            raw
        };
        session.displacement = displacement;
        Some(displacement)
    }

    /// pan-end：结束会话并进入 Animating，返回 (松手时的位移, 吸附目标)
    ///
    /// `velocity` 为水平速度（点/秒），超过 `flick_velocity` 且四舍五入会回到起始卡片时，
    /// 目标沿甩动方向前进一张。
    pub fn end(&mut self, velocity: Option<f32>, flick_velocity: Option<f32>, card_count: usize) -> Option<(f32, usize)> {
        let State::Dragging(session) = self.state else {
            return None;
        };
        let mut target = placement_for(session.displacement, card_count);

        if let (Some(velocity), Some(threshold)) = (velocity, flick_velocity) {
            if velocity.abs() > threshold && target == session.start_placement && card_count > 0 {
                target = if velocity < 0.0 {
                    (target + 1).min(card_count - 1)
                } else {
                    target.saturating_sub(1)
                };
            }
        }

        self.state = State::Animating;
        Some((session.displacement, target))
    }

    /// 程序化动画开始（放弃当前拖动会话）
    pub fn animate(&mut self) {
        self.state = State::Animating;
    }

    /// 回到 Idle（动画结束、立即居中或重新加载）
    pub fn settle(&mut self) {
        self.state = State::Idle;
    }
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// 位移对应的居中卡片：四舍五入（半整数远离零）后限制在 `[0, card_count - 1]`
pub fn placement_for(displacement: f32, card_count: usize) -> usize {
    if card_count == 0 || !displacement.is_finite() {
        return 0;
    }
    let max = (card_count - 1) as f32;
    displacement.round().clamp(0.0, max) as usize
}

/// 橡皮筋阻尼：越拉越难，结果始终小于 dimension 且与 offset 同号
fn rubber_band(offset: f32, dimension: f32) -> f32 {
    let c = 0.55;
    let x = offset.abs() / dimension;
    let result = (1.0 - (1.0 / (x * c + 1.0))) * dimension;
    if offset < 0.0 { -result } else { result }
}
