//! 卡片流组件：缓存、手势、动画与控制器

mod animation;
mod card_cache;
mod card_flow;
mod gesture;
mod source;

pub use animation::{ease_out_cubic, AnimationDriver, AnimationTick};
pub use card_cache::{CardCache, CardCacheEntry};
pub use card_flow::{CardFlow, CarouselState};
pub use gesture::{placement_for, GesturePhase, GestureSession, GestureStateMachine};
pub use source::{DataSource, Delegate, EventLog, PositionedCard, RenderSurface};
