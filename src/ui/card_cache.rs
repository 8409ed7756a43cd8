//! 卡片内容缓存
//!
//! 以卡片索引为键的稀疏缓存，只保留可见窗口（加少量余量）内的卡片：
//! - 首次可见时向数据源取卡片
//! - 离开窗口的卡片交还给数据源
//! - 重新加载时整体清空，代数加一

use super::source::DataSource;
use crate::error::{CardFlowError, Result};
use crate::layout::Transform;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// 单张卡片的缓存条目
#[derive(Debug)]
pub struct CardCacheEntry<C> {
    pub index: usize,
    pub card: C,
    /// 最近一次布局得到的变换，每次布局重新计算
    node: Option<Transform>,
    /// 创建时的缓存代数
    generation: u64,
}

impl<C> CardCacheEntry<C> {
    pub fn node(&self) -> Option<&Transform> {
        self.node.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 卡片缓存
#[derive(Debug)]
pub struct CardCache<C> {
    entries: BTreeMap<usize, CardCacheEntry<C>>,
    /// 每次 clear 递增
    generation: u64,
}

impl<C> CardCache<C> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            generation: 0,
        }
    }

    /// 取缓存的卡片，未命中时向数据源获取并存入
    ///
    /// `count` 是控制器缓存的卡片总数，越界访问视为违反约定。
    pub fn ensure<S>(&mut self, index: usize, count: usize, source: &mut S) -> Result<&mut CardCacheEntry<C>>
    where
        S: DataSource<Card = C> + ?Sized,
    {
        let generation = self.generation;
        match self.entries.entry(index) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => {
                if index >= count {
                    log::warn!("card {} requested outside of {} cards", index, count);
                    return Err(CardFlowError::ProviderContractViolation { index, count });
                }
                let Some(card) = source.card_at_index(index) else {
                    log::warn!("data source returned no card for index {} of {}", index, count);
                    return Err(CardFlowError::ProviderContractViolation { index, count });
                };
                log::trace!("card {} realized (generation {})", index, generation);
                Ok(slot.insert(CardCacheEntry {
                    index,
                    card,
                    node: None,
                    generation,
                }))
            }
        }
    }

    /// 移除指定卡片并交还给数据源，返回是否存在
    pub fn evict<S>(&mut self, index: usize, source: &mut S) -> bool
    where
        S: DataSource<Card = C> + ?Sized,
    {
        match self.entries.remove(&index) {
            Some(entry) => {
                log::trace!("card {} evicted", index);
                source.card_evicted(index, entry.card);
                true
            }
            None => false,
        }
    }

    /// 淘汰 `[center - radius, center + radius]` 之外的所有卡片
    pub fn evict_outside_window<S>(&mut self, center: usize, radius: usize, source: &mut S) -> usize
    where
        S: DataSource<Card = C> + ?Sized,
    {
        let low = center.saturating_sub(radius);
        let high = center.saturating_add(radius);

        let stale: Vec<usize> = self
            .entries
            .keys()
            .copied()
            .filter(|&index| index < low || index > high)
            .collect();

        for &index in &stale {
            self.evict(index, source);
        }
        stale.len()
    }

    /// 清空缓存（重新加载数据时调用）
    pub fn clear<S>(&mut self, source: &mut S)
    where
        S: DataSource<Card = C> + ?Sized,
    {
        let entries = std::mem::take(&mut self.entries);
        for (index, entry) in entries {
            source.card_evicted(index, entry.card);
        }
        self.generation += 1;
    }

    /// 清除所有条目的变换，布局前调用
    pub fn clear_nodes(&mut self) {
        for entry in self.entries.values_mut() {
            entry.node = None;
        }
    }

    pub fn set_node(&mut self, index: usize, transform: Transform) {
        if let Some(entry) = self.entries.get_mut(&index) {
            entry.node = Some(transform);
        }
    }

    pub fn node(&self, index: usize) -> Option<&Transform> {
        self.entries.get(&index).and_then(|entry| entry.node.as_ref())
    }

    pub fn get(&self, index: usize) -> Option<&CardCacheEntry<C>> {
        self.entries.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// 已缓存的索引（升序）
    pub fn indices(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<C> Default for CardCache<C> {
    fn default() -> Self {
        Self::new()
    }
}
