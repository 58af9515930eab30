// Scheduler Module - 延迟调用调度器
//
// DeferredScheduler 是观察器依赖的第二个注入能力：在一段时间后执行回调，
// 并且可以取消尚未执行的回调。
//
// TimerQueue 是单线程实现：
// - 定时器按截止时间排序，截止时间相同的按调度顺序执行
// - run_due() 在释放内部借用后才调用回调，回调中可以再次调度或取消
// - 被取消的定时器立即从队列中移除

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::clock::{Clock, ManualClock};

/// 定时器句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// 定时器回调
pub type TimerCallback = Box<dyn FnOnce()>;

/// 延迟调用调度器
pub trait DeferredScheduler {
    /// 在 delay 之后执行回调
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId;

    /// 取消尚未执行的回调，返回是否确实取消了一个待执行的定时器
    fn cancel(&self, id: TimerId) -> bool;
}

struct TimerQueueInner {
    next_id: u64,
    /// (截止时间, 序号) -> 回调
    timers: BTreeMap<(Duration, u64), TimerCallback>,
    /// 序号 -> 截止时间，用于取消
    deadlines: HashMap<u64, Duration>,
    fired: u64,
    cancelled: u64,
}

/// 单线程定时器队列
///
/// 克隆得到的是共享同一队列的句柄。
pub struct TimerQueue<C: Clock> {
    clock: C,
    inner: Rc<RefCell<TimerQueueInner>>,
}

impl<C: Clock + Clone> Clone for TimerQueue<C> {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
            inner: Rc::clone(&self.inner),
        }
    }
}

/// 定时器队列统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerQueueStats {
    pub pending: usize,
    pub fired: u64,
    pub cancelled: u64,
}

impl<C: Clock> TimerQueue<C> {
    /// 创建新的定时器队列
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            inner: Rc::new(RefCell::new(TimerQueueInner {
                next_id: 0,
                timers: BTreeMap::new(),
                deadlines: HashMap::new(),
                fired: 0,
                cancelled: 0,
            })),
        }
    }

    /// 队列使用的时钟
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// 当前时间
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// 待执行的定时器数量
    pub fn pending(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// 最早的截止时间
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .timers
            .keys()
            .next()
            .map(|(deadline, _)| *deadline)
    }

    /// 距离最早的截止时间还有多久，已到期时返回零
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(self.clock.now()))
    }

    /// 执行所有已到期的定时器，返回执行数量
    pub fn run_due(&self) -> usize {
        let mut count = 0;
        while let Some(callback) = self.pop_due(self.clock.now()) {
            callback();
            count += 1;
        }
        count
    }

    /// 获取统计信息
    pub fn stats(&self) -> TimerQueueStats {
        let inner = self.inner.borrow();
        TimerQueueStats {
            pending: inner.timers.len(),
            fired: inner.fired,
            cancelled: inner.cancelled,
        }
    }

    /// 取出一个到期的回调（借用在返回前释放）
    fn pop_due(&self, now: Duration) -> Option<TimerCallback> {
        let mut inner = self.inner.borrow_mut();
        let key = *inner.timers.keys().next()?;
        if key.0 > now {
            return None;
        }
        inner.deadlines.remove(&key.1);
        inner.fired += 1;
        inner.timers.remove(&key)
    }
}

impl TimerQueue<ManualClock> {
    /// 推进模拟时钟，定时器在各自的截止时间被执行
    ///
    /// 时钟会依次停在每个截止时间上，回调中读取到的时间就是它的截止时间。
    pub fn advance(&self, delta: Duration) -> usize {
        let target = self.clock.now().saturating_add(delta);
        self.advance_to(target)
    }

    /// 推进模拟时钟到指定时间
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut count = self.run_due();
        while let Some(deadline) = self.next_deadline() {
            if deadline > target {
                break;
            }
            self.clock.set(deadline);
            count += self.run_due();
        }
        self.clock.set(target);
        count + self.run_due()
    }
}

impl<C: Clock> DeferredScheduler for TimerQueue<C> {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        let deadline = self.clock.now().saturating_add(delay);
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.timers.insert((deadline, id), callback);
        inner.deadlines.insert(id, deadline);
        log::trace!("scheduled timer#{} at {:?}", id, deadline);
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.deadlines.remove(&id.0) {
            Some(deadline) => {
                inner.timers.remove(&(deadline, id.0));
                inner.cancelled += 1;
                log::trace!("cancelled {}", id);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let queue = TimerQueue::new(ManualClock::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(50, "b"), (10, "a"), (50, "c")] {
            let log = Rc::clone(&log);
            queue.schedule(ms(delay), Box::new(move || log.borrow_mut().push(name)));
        }

        assert_eq!(queue.next_deadline(), Some(ms(10)));
        assert_eq!(queue.advance(ms(100)), 3);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let queue = TimerQueue::new(ManualClock::new());
        let fired = Rc::new(RefCell::new(false));

        let flag = Rc::clone(&fired);
        let id = queue.schedule(ms(100), Box::new(move || *flag.borrow_mut() = true));

        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        queue.advance(ms(500));

        assert!(!*fired.borrow());
        assert_eq!(queue.stats().cancelled, 1);
        assert_eq!(queue.stats().fired, 0);
    }

    #[test]
    fn test_callback_observes_its_deadline() {
        let queue = TimerQueue::new(ManualClock::new());
        let seen = Rc::new(RefCell::new(None));

        let clock = queue.clock().clone();
        let slot = Rc::clone(&seen);
        queue.schedule(ms(100), Box::new(move || *slot.borrow_mut() = Some(clock.now())));

        queue.advance(ms(1000));
        assert_eq!(*seen.borrow(), Some(ms(100)));
        assert_eq!(queue.now(), ms(1000));
    }

    #[test]
    fn test_callback_can_reschedule() {
        let queue = TimerQueue::new(ManualClock::new());
        let count = Rc::new(RefCell::new(0));

        let inner_queue = queue.clone();
        let counter = Rc::clone(&count);
        queue.schedule(
            ms(10),
            Box::new(move || {
                *counter.borrow_mut() += 1;
                let counter = Rc::clone(&counter);
                inner_queue.schedule(ms(10), Box::new(move || *counter.borrow_mut() += 1));
            }),
        );

        assert_eq!(queue.advance(ms(15)), 1);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.advance(ms(5)), 1);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_time_until_next() {
        let queue = TimerQueue::new(ManualClock::new());
        assert_eq!(queue.time_until_next(), None);

        queue.schedule(ms(100), Box::new(|| {}));
        queue.clock().advance(ms(40));
        assert_eq!(queue.time_until_next(), Some(ms(60)));

        queue.clock().advance(ms(80));
        assert_eq!(queue.time_until_next(), Some(Duration::ZERO));
    }
}
