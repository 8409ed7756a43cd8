//! 布局函数测试

use super::test_config;
use crate::layout::{split_displacement, DeckLayout, LayoutFunction, LayoutMap, Transform};
use crate::{Configuration, Rect};

/// 取某张卡片在位移 d 下的变换
fn card_transform(d: f32, index: isize, config: &Configuration) -> Transform {
    let (base, _) = split_displacement(d);
    let map = DeckLayout.layout(d, config);
    map[&(index - base)]
}

/// 整数位移时偏移 0 为标准居中变换
#[test]
fn test_integer_displacement_centers_card() {
    let config = test_config(2, 100.0);
    let map = DeckLayout.layout(3.0, &config);
    let center = map[&0];

    assert_eq!(center.frame, Rect::new(120.0, 180.0, 80.0, 120.0));
    assert_eq!(center.opacity, 1.0);
    assert_eq!(center.scale, 1.0);
    assert!(map.values().all(|t| t.z_order <= center.z_order));
}

/// 只输出 [-side, side] 内的偏移
#[test]
fn test_offsets_limited_to_side_cards() {
    let config = test_config(2, 100.0);
    let offsets: Vec<isize> = DeckLayout.layout(4.3, &config).keys().copied().collect();
    assert_eq!(offsets, vec![-2, -1, 0, 1, 2]);

    let config = test_config(0, 100.0);
    assert_eq!(DeckLayout.layout(1.0, &config).len(), 1);
}

/// 跨过整数边界时位置连续
#[test]
fn test_layout_continuous_across_integer_boundary() {
    let config = test_config(2, 100.0);
    for k in 0..5 {
        let before = k as f32 + 0.999;
        let after = (k + 1) as f32;
        for index in [k, k + 1, k + 2] {
            let a = card_transform(before, index as isize, &config);
            let b = card_transform(after, index as isize, &config);
            assert!((a.frame.x - b.frame.x).abs() <= 0.001 * 100.0 + 1e-2, "card {} jumped", index);
            assert!((a.frame.width - b.frame.width).abs() <= 1e-2);
            assert!((a.opacity - b.opacity).abs() <= 1e-3);
        }
    }
}

/// 跨过半整数（居中卡片切换）时同一张卡片不跳变
#[test]
fn test_layout_continuous_across_half_boundary() {
    let config = test_config(2, 100.0);
    let a = card_transform(2.4999, 3, &config);
    let b = card_transform(2.5001, 3, &config);
    assert!((a.frame.x - b.frame.x).abs() < 0.05);
    assert!((a.z_order - b.z_order).abs() < 1e-3);
}

/// 居中卡片切换时，进出窗口的卡片完全透明
#[test]
fn test_edge_cards_fade_out_at_window_boundary() {
    use std::collections::BTreeMap;

    for side in [0usize, 1, 2, 3] {
        let config = test_config(side, 100.0);
        for k in 0..4 {
            let by_index = |d: f32| -> BTreeMap<isize, Transform> {
                let (base, _) = split_displacement(d);
                DeckLayout
                    .layout(d, &config)
                    .into_iter()
                    .map(|(offset, transform)| (base + offset, transform))
                    .collect()
            };
            let before = by_index(k as f32 + 0.4999);
            let after = by_index(k as f32 + 0.5001);

            for (index, a) in &before {
                match after.get(index) {
                    Some(b) => assert!((a.opacity - b.opacity).abs() < 1e-3, "card {} flickers", index),
                    None => assert!(a.opacity < 1e-3, "card {} leaves with opacity {}", index, a.opacity),
                }
            }
            for (index, b) in &after {
                if !before.contains_key(index) {
                    assert!(b.opacity < 1e-3, "card {} appears with opacity {}", index, b.opacity);
                }
            }
        }
    }
}

/// 离中心越远越小、越透明、越靠下
#[test]
fn test_falloff_monotonic_with_distance() {
    let config = test_config(3, 100.0);
    let samples: Vec<Transform> = (0..=7)
        .map(|step| DeckLayout::transform_at(step as f32 * 0.5, &config))
        .collect();
    for pair in samples.windows(2) {
        assert!(pair[1].opacity < pair[0].opacity);
        assert!(pair[1].scale < pair[0].scale);
        assert!(pair[1].z_order < pair[0].z_order);
    }
    assert!(samples.iter().all(|t| t.opacity >= 0.0));
}

/// 左右对称
#[test]
fn test_layout_symmetric() {
    let config = test_config(2, 100.0);
    let map = DeckLayout.layout(5.0, &config);
    let left = map[&-1];
    let right = map[&1];
    assert_eq!(left.frame.width, right.frame.width);
    let left_gap = 160.0 - left.frame.center().x;
    let right_gap = right.frame.center().x - 160.0;
    assert!((left_gap - right_gap).abs() < 1e-3);
    assert!((right_gap - 100.0).abs() < 1e-3);
}

/// 闭包也可以作为布局函数
#[test]
fn test_closure_layout_function() {
    let flat = |_d: f32, config: &Configuration| -> LayoutMap {
        let mut map = LayoutMap::new();
        map.insert(
            0,
            Transform {
                frame: Rect::new(0.0, 0.0, config.card_size.width, config.card_size.height),
                opacity: 1.0,
                scale: 1.0,
                z_order: 0.0,
            },
        );
        map
    };
    let config = test_config(2, 100.0);
    let map = flat.layout(1.5, &config);
    assert_eq!(map.len(), 1);
    assert_eq!(map[&0].frame.width, 80.0);
}

#[test]
fn test_split_displacement() {
    assert_eq!(split_displacement(3.0), (3, 0.0));
    assert_eq!(split_displacement(2.5), (3, -0.5));
    let (base, fraction) = split_displacement(-0.25);
    assert_eq!(base, 0);
    assert_eq!(fraction, -0.25);
}
