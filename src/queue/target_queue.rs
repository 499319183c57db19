// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::target::TargetRecord;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;

/// 目标队列特质
///
/// 线程安全的先进先出队列。出队是原子的：同一条目标只会交给一个工作器。
pub trait TargetQueue: Send + Sync {
    /// 入队目标
    fn enqueue(&self, target: TargetRecord);

    /// 出队目标，队列为空时立即返回 `None`
    fn dequeue(&self) -> Option<TargetRecord>;

    /// 当前长度
    ///
    /// 工作器运行期间读取到的值可能已经过时，只用于估算与展示
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 内存目标队列实现
#[derive(Debug, Default)]
pub struct InMemoryTargetQueue {
    items: Mutex<VecDeque<TargetRecord>>,
}

impl InMemoryTargetQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 随机打乱队列
    ///
    /// 先取出全部目标，打乱后再按新顺序放回
    pub fn shuffle<R: Rng + ?Sized>(&self, rng: &mut R) {
        let mut drained = Vec::with_capacity(self.len());
        while let Some(target) = self.dequeue() {
            drained.push(target);
        }

        drained.shuffle(rng);

        for target in drained {
            self.enqueue(target);
        }
    }
}

impl TargetQueue for InMemoryTargetQueue {
    fn enqueue(&self, target: TargetRecord) {
        self.items.lock().push_back(target);
    }

    fn dequeue(&self) -> Option<TargetRecord> {
        self.items.lock().pop_front()
    }

    fn len(&self) -> usize {
        self.items.lock().len()
    }
}

impl<T: TargetQueue + ?Sized> TargetQueue for Arc<T> {
    fn enqueue(&self, target: TargetRecord) {
        (**self).enqueue(target)
    }

    fn dequeue(&self) -> Option<TargetRecord> {
        (**self).dequeue()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
