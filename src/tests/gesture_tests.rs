//! 手势状态机测试

use crate::ui::{GesturePhase, GestureStateMachine};

/// 向左拖 250 点、间距 100：位移从 3.0 到 5.5
#[test]
fn test_drag_left_advances_displacement() {
    let mut gesture = GestureStateMachine::new();
    assert_eq!(gesture.phase(), GesturePhase::Idle);

    assert!(!gesture.begin(3.0, 3));
    assert_eq!(gesture.phase(), GesturePhase::Dragging);
    assert_eq!(gesture.drag(-250.0, 100.0, 9.0), Some(5.5));

    let session = gesture.session().unwrap();
    assert_eq!(session.start_displacement, 3.0);
    assert_eq!(session.accumulated, -250.0);
}

/// 增量会累加
#[test]
fn test_drag_accumulates_deltas() {
    let mut gesture = GestureStateMachine::new();
    gesture.begin(2.0, 2);
    gesture.drag(-50.0, 100.0, 9.0);
    assert_eq!(gesture.drag(-50.0, 100.0, 9.0), Some(3.0));
    assert_eq!(gesture.drag(150.0, 100.0, 9.0), Some(1.5));
}

/// 非拖动状态下的 pan-move / pan-end 被忽略
#[test]
fn test_moves_ignored_when_idle() {
    let mut gesture = GestureStateMachine::new();
    assert_eq!(gesture.drag(-100.0, 100.0, 9.0), None);
    assert_eq!(gesture.end(None, None, 10), None);
    assert_eq!(gesture.phase(), GesturePhase::Idle);
}

/// 越界部分被阻尼，但方向不反转
#[test]
fn test_overscroll_rubber_bands() {
    let mut gesture = GestureStateMachine::new();
    gesture.begin(0.0, 0);
    let d = gesture.drag(150.0, 100.0, 9.0).unwrap();
    assert!(d < 0.0 && d > -1.0, "damped overscroll {}", d);

    let mut gesture = GestureStateMachine::new();
    gesture.begin(9.0, 9);
    let d = gesture.drag(-300.0, 100.0, 9.0).unwrap();
    assert!(d > 9.0 && d < 10.0, "damped overscroll {}", d);

    // 越拉越远但永远不超过一张卡片
    let further = gesture.drag(-10_000.0, 100.0, 9.0).unwrap();
    assert!(further > d && further < 10.0);
}

/// 松手时四舍五入（半整数远离零）并限制在范围内
#[test]
fn test_end_snaps_to_rounded_target() {
    let mut gesture = GestureStateMachine::new();
    gesture.begin(3.0, 3);
    gesture.drag(-250.0, 100.0, 9.0);
    assert_eq!(gesture.end(None, None, 10), Some((5.5, 6)));
    assert_eq!(gesture.phase(), GesturePhase::Animating);
    assert!(gesture.session().is_none());

    let mut gesture = GestureStateMachine::new();
    gesture.begin(9.0, 9);
    gesture.drag(-300.0, 100.0, 9.0);
    let (_, target) = gesture.end(None, None, 10).unwrap();
    assert_eq!(target, 9);
}

/// 快速甩动时即使没拖过半张也前进一张
#[test]
fn test_flick_advances_one_card() {
    let mut gesture = GestureStateMachine::new();
    gesture.begin(3.0, 3);
    gesture.drag(-20.0, 100.0, 9.0);
    assert_eq!(gesture.end(Some(-800.0), Some(500.0), 10).map(|(_, t)| t), Some(4));

    gesture.begin(3.0, 3);
    gesture.drag(20.0, 100.0, 9.0);
    assert_eq!(gesture.end(Some(800.0), Some(500.0), 10).map(|(_, t)| t), Some(2));

    // 低于阈值或未配置阈值时只按取整
    gesture.begin(3.0, 3);
    gesture.drag(-20.0, 100.0, 9.0);
    assert_eq!(gesture.end(Some(-200.0), Some(500.0), 10).map(|(_, t)| t), Some(3));

    gesture.begin(3.0, 3);
    gesture.drag(-20.0, 100.0, 9.0);
    assert_eq!(gesture.end(Some(-800.0), None, 10).map(|(_, t)| t), Some(3));
}

/// 动画中再次按下会打断动画
#[test]
fn test_begin_interrupts_animation() {
    let mut gesture = GestureStateMachine::new();
    gesture.animate();
    assert_eq!(gesture.phase(), GesturePhase::Animating);
    assert!(gesture.begin(4.2, 4));
    assert_eq!(gesture.phase(), GesturePhase::Dragging);

    gesture.settle();
    assert_eq!(gesture.phase(), GesturePhase::Idle);
}
