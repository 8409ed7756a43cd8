//! 位移补间动画，用于松手吸附和程序化居中

/// 单帧推进结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTick {
    pub value: f32,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Tween {
    fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    fn value(&self) -> f32 {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }
}

/// 缓出三次曲线，在 [0, 1] 上单调
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// 动画驱动器，同一时刻最多一个动画
#[derive(Debug, Default)]
pub struct AnimationDriver {
    tween: Option<Tween>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self { tween: None }
    }

    /// 开始新动画；已有动画会被取消，并从它当前的插值继续
    ///
    /// 返回实际使用的起点。
    pub fn start(&mut self, from: f32, to: f32, duration: f32) -> f32 {
        let from = self.cancel().unwrap_or(from);
        self.tween = Some(Tween {
            from,
            to,
            duration: duration.max(f32::EPSILON),
            elapsed: 0.0,
        });
        from
    }

    /// 推进 dt 秒；没有进行中的动画时返回 None
    pub fn tick(&mut self, dt: f32) -> Option<AnimationTick> {
        let tween = self.tween.as_mut()?;
        tween.elapsed += dt.max(0.0);
        let value = tween.value();
        let finished = tween.progress() >= 1.0;
        if finished {
            self.tween = None;
        }
        Some(AnimationTick { value, finished })
    }

    /// 取消动画，返回取消时的插值
    pub fn cancel(&mut self) -> Option<f32> {
        self.tween.take().map(|tween| tween.value())
    }

    pub fn is_running(&self) -> bool {
        self.tween.is_some()
    }

    /// 当前插值
    pub fn value(&self) -> Option<f32> {
        self.tween.as_ref().map(Tween::value)
    }
}
