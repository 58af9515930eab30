// Clock Module - 时钟抽象
//
// 定时器队列通过 Clock trait 读取当前时间：
// - SystemClock: 基于单调时钟 Instant，GUI运行时使用
// - ManualClock: 手动推进的模拟时钟，测试和基准中使用
//
// 时间统一表示为自时钟起点以来经过的 Duration。

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// 时钟trait
pub trait Clock {
    /// 自时钟起点以来经过的时间
    fn now(&self) -> Duration;
}

/// 系统单调时钟
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// 手动推进的模拟时钟
///
/// 克隆出的句柄共享同一个时间，便于测试代码和定时器队列同时持有。
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从指定时间开始的时钟
    pub fn starting_at(start: Duration) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// 向前推进时间
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get().saturating_add(delta));
    }

    /// 设置到指定时间，时间不会倒退
    pub fn set(&self, at: Duration) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
