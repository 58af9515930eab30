// Stable-Dimension Observer - 稳定尺寸观察器
//
// 把高频的容器尺寸变化通知转换为稀疏的"尺寸已稳定"通知（尾沿防抖）：
// 1. 每次收到通知：取消待执行的稳定定时器，标记为不稳定，记录最新尺寸
// 2. 重新启动一个静默窗口定时器
// 3. 定时器未被打断地到期：发布最新尺寸，标记为稳定，调用监听器
//
// 资源约束：
// - 每个观察器实例最多持有一个待执行定时器，替换前总是先取消
// - disconnect() 和 Drop 同步取消定时器和监视注册
// - 定时器回调只持有弱引用并校验代次，拆除后绝不会再发出通知

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::box_watcher::{BoxNotification, BoxWatcher, ContainerId, WatchError, WatchId};
use super::scheduler::{DeferredScheduler, TimerId};
use crate::geometry::{ContentRect, Dimensions};

/// 默认静默窗口（毫秒）
pub const DEFAULT_QUIET_WINDOW_MS: u64 = 100;

/// 观察器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// 发布稳定尺寸前需要的无通知时长
    pub quiet_window: Duration,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            quiet_window: Duration::from_millis(DEFAULT_QUIET_WINDOW_MS),
        }
    }
}

impl ObserverConfig {
    pub fn with_quiet_window(quiet_window: Duration) -> Self {
        Self { quiet_window }
    }
}

/// 稳定性状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityState {
    /// 初始状态，收到任何通知后重新进入
    Unstable,
    /// 静默窗口完整结束后进入
    Stable,
}

/// 观察器统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObserverStats {
    /// 收到的尺寸变化通知数
    pub notifications: u64,
    /// 发出的稳定通知数
    pub emissions: u64,
    /// 被新通知或拆除取消的定时器数
    pub cancelled_timers: u64,
}

/// 稳定尺寸监听器
pub type StableListener = Box<dyn FnMut(Dimensions)>;

struct ObserverState {
    config: ObserverConfig,
    dimensions: Dimensions,
    stability: StabilityState,
    /// 等待静默窗口结束的最新尺寸
    pending: Option<ContentRect>,
    timer: Option<TimerId>,
    watch: Option<(ContainerId, WatchId)>,
    /// 每次重新调度或拆除时递增，过期的定时器回调据此失效
    generation: u64,
    stats: ObserverStats,
}

struct Shared<W, S> {
    watcher: W,
    scheduler: S,
    state: RefCell<ObserverState>,
    listener: RefCell<Option<StableListener>>,
}

/// 稳定尺寸观察器
///
/// 一个实例只观察一个容器；重新调用 `observe` 会先拆除之前的监视。
pub struct StableDimensionObserver<W, S>
where
    W: BoxWatcher + 'static,
    S: DeferredScheduler + 'static,
{
    shared: Rc<Shared<W, S>>,
}

impl<W, S> StableDimensionObserver<W, S>
where
    W: BoxWatcher + 'static,
    S: DeferredScheduler + 'static,
{
    /// 创建观察器，此时尚未监视任何容器
    pub fn new(config: ObserverConfig, watcher: W, scheduler: S) -> Self {
        Self {
            shared: Rc::new(Shared {
                watcher,
                scheduler,
                state: RefCell::new(ObserverState {
                    config,
                    dimensions: Dimensions::default(),
                    stability: StabilityState::Unstable,
                    pending: None,
                    timer: None,
                    watch: None,
                    generation: 0,
                    stats: ObserverStats::default(),
                }),
                listener: RefCell::new(None),
            }),
        }
    }

    /// 设置稳定尺寸监听器
    pub fn set_listener<F>(&self, listener: F)
    where
        F: FnMut(Dimensions) + 'static,
    {
        *self.shared.listener.borrow_mut() = Some(Box::new(listener));
    }

    /// 移除监听器
    pub fn clear_listener(&self) {
        self.shared.listener.borrow_mut().take();
    }

    /// 开始观察容器
    ///
    /// 已在观察其他容器时先拆除旧的监视和定时器。容器已有测量尺寸时，
    /// 该尺寸作为第一条通知进入防抖流程。
    pub fn observe(&self, container: ContainerId) -> Result<(), WatchError> {
        if self.observed_container() == Some(container) {
            return Ok(());
        }
        Shared::teardown(&self.shared);

        let weak: Weak<Shared<W, S>> = Rc::downgrade(&self.shared);
        let watch_id = self.shared.watcher.watch(
            container,
            Box::new(move |notification| {
                if let Some(shared) = weak.upgrade() {
                    Shared::handle_notification(&shared, notification);
                }
            }),
        )?;
        self.shared.state.borrow_mut().watch = Some((container, watch_id));
        log::info!("observing {}", container);

        if let Some(rect) = self.shared.watcher.content_box(container) {
            Shared::handle_notification(&self.shared, BoxNotification::Resized(rect));
        }
        Ok(())
    }

    /// 停止观察，同步释放定时器和监视注册；重复调用无副作用
    pub fn disconnect(&self) {
        Shared::teardown(&self.shared);
    }

    /// 最近一次稳定的尺寸
    pub fn dimensions(&self) -> Dimensions {
        self.shared.state.borrow().dimensions
    }

    /// 是否处于稳定状态
    pub fn is_stable(&self) -> bool {
        self.state() == StabilityState::Stable
    }

    pub fn state(&self) -> StabilityState {
        self.shared.state.borrow().stability
    }

    /// 正在观察的容器
    pub fn observed_container(&self) -> Option<ContainerId> {
        self.shared.state.borrow().watch.map(|(container, _)| container)
    }

    /// 是否有待执行的稳定定时器
    pub fn has_pending_timer(&self) -> bool {
        self.shared.state.borrow().timer.is_some()
    }

    pub fn config(&self) -> ObserverConfig {
        self.shared.state.borrow().config
    }

    pub fn stats(&self) -> ObserverStats {
        self.shared.state.borrow().stats
    }
}

impl<W, S> Drop for StableDimensionObserver<W, S>
where
    W: BoxWatcher + 'static,
    S: DeferredScheduler + 'static,
{
    fn drop(&mut self) {
        Shared::teardown(&self.shared);
    }
}

impl<W, S> Shared<W, S>
where
    W: BoxWatcher + 'static,
    S: DeferredScheduler + 'static,
{
    fn handle_notification(shared: &Rc<Self>, notification: BoxNotification) {
        let rect = match notification {
            BoxNotification::Resized(rect) => rect,
            BoxNotification::Removed => {
                log::info!("observed container removed, tearing down");
                Self::teardown(shared);
                return;
            }
        };

        let (previous, generation, quiet_window) = {
            let mut state = shared.state.borrow_mut();
            if state.watch.is_none() {
                return;
            }
            state.stats.notifications += 1;
            state.pending = Some(rect);
            state.stability = StabilityState::Unstable;
            state.generation += 1;
            (state.timer.take(), state.generation, state.config.quiet_window)
        };

        if let Some(timer) = previous {
            if shared.scheduler.cancel(timer) {
                shared.state.borrow_mut().stats.cancelled_timers += 1;
            }
        }

        let weak = Rc::downgrade(shared);
        let timer = shared.scheduler.schedule(
            quiet_window,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    Self::settle(&shared, generation);
                }
            }),
        );
        shared.state.borrow_mut().timer = Some(timer);
        log::debug!(
            "resize {}x{}, stabilizing in {:?}",
            rect.width,
            rect.height,
            quiet_window
        );
    }

    /// 静默窗口到期
    fn settle(shared: &Rc<Self>, generation: u64) {
        let dimensions = {
            let mut state = shared.state.borrow_mut();
            if state.generation != generation || state.watch.is_none() {
                return;
            }
            state.timer = None;
            let Some(rect) = state.pending.take() else {
                return;
            };
            state.dimensions = Dimensions::from(rect);
            state.stability = StabilityState::Stable;
            state.stats.emissions += 1;
            state.dimensions
        };
        log::debug!("stable at {}x{}", dimensions.width, dimensions.height);

        // 调用期间把监听器取出，监听器内部可以安全地访问观察器
        let taken = shared.listener.borrow_mut().take();
        if let Some(mut listener) = taken {
            listener(dimensions);
            let mut slot = shared.listener.borrow_mut();
            if slot.is_none() {
                *slot = Some(listener);
            }
        }
    }

    fn teardown(shared: &Rc<Self>) {
        let (timer, watch) = {
            let mut state = shared.state.borrow_mut();
            state.generation += 1;
            state.pending = None;
            (state.timer.take(), state.watch.take())
        };

        if let Some(timer) = timer {
            if shared.scheduler.cancel(timer) {
                shared.state.borrow_mut().stats.cancelled_timers += 1;
            }
        }
        if let Some((container, watch_id)) = watch {
            shared.watcher.unwatch(watch_id);
            log::info!("stopped observing {}", container);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::box_watcher::BoxRegistry;
    use crate::core::clock::ManualClock;
    use crate::core::scheduler::TimerQueue;

    type TestObserver = StableDimensionObserver<BoxRegistry, TimerQueue<ManualClock>>;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn setup() -> (BoxRegistry, TimerQueue<ManualClock>, TestObserver) {
        let registry = BoxRegistry::new();
        let timers = TimerQueue::new(ManualClock::new());
        let observer =
            StableDimensionObserver::new(ObserverConfig::default(), registry.clone(), timers.clone());
        (registry, timers, observer)
    }

    #[test]
    fn test_initial_state() {
        let (_, _, observer) = setup();
        assert_eq!(observer.state(), StabilityState::Unstable);
        assert_eq!(observer.dimensions(), Dimensions::default());
        assert_eq!(observer.observed_container(), None);
        assert_eq!(observer.config().quiet_window, ms(DEFAULT_QUIET_WINDOW_MS));
    }

    #[test]
    fn test_flag_drops_immediately_on_notification() {
        let (registry, timers, observer) = setup();
        let container = registry.mount();
        observer.observe(container).unwrap();

        registry.set_content_box(container, ContentRect::new(800.0, 600.0));
        timers.advance(ms(100));
        assert!(observer.is_stable());

        registry.set_content_box(container, ContentRect::new(640.0, 600.0));
        assert!(!observer.is_stable());
        assert!(observer.has_pending_timer());
        // 稳定前仍然显示旧尺寸
        assert_eq!(observer.dimensions(), Dimensions::new(800.0, 600.0));
    }

    #[test]
    fn test_timer_is_replaced_not_stacked() {
        let (registry, timers, observer) = setup();
        let container = registry.mount();
        observer.observe(container).unwrap();

        for width in [100.0, 120.0, 140.0, 160.0] {
            registry.set_content_box(container, ContentRect::new(width, 50.0));
            timers.advance(ms(10));
            assert_eq!(timers.pending(), 1);
        }
        assert_eq!(observer.stats().cancelled_timers, 3);
    }

    #[test]
    fn test_observe_measured_container_starts_debounce() {
        let (registry, timers, observer) = setup();
        let container = registry.mount_with(ContentRect::new(1024.0, 700.0));

        observer.observe(container).unwrap();
        assert!(!observer.is_stable());

        timers.advance(ms(100));
        assert!(observer.is_stable());
        assert_eq!(observer.dimensions(), Dimensions::new(1024.0, 700.0));
    }

    #[test]
    fn test_observe_same_container_is_noop() {
        let (registry, _, observer) = setup();
        let container = registry.mount();
        observer.observe(container).unwrap();
        observer.observe(container).unwrap();
        assert_eq!(registry.watchers_of(container), 1);
    }

    #[test]
    fn test_observe_unmounted_container_fails() {
        let (registry, _, observer) = setup();
        let container = registry.mount();
        registry.unmount(container);

        assert_eq!(
            observer.observe(container),
            Err(WatchError::ContainerNotMounted(container))
        );
        assert_eq!(observer.observed_container(), None);
    }

    #[test]
    fn test_listener_may_read_observer_state() {
        let (registry, timers, observer) = setup();
        let observer = Rc::new(observer);
        let container = registry.mount();
        observer.observe(container).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let weak = Rc::downgrade(&observer);
        observer.set_listener(move |dims| {
            if let Some(observer) = weak.upgrade() {
                sink.borrow_mut().push((dims, observer.is_stable()));
            }
        });

        registry.set_content_box(container, ContentRect::new(300.0, 200.0));
        timers.advance(ms(150));

        assert_eq!(*seen.borrow(), vec![(Dimensions::new(300.0, 200.0), true)]);
    }

    #[test]
    fn test_drop_releases_timer_and_watch() {
        let (registry, timers, observer) = setup();
        let container = registry.mount();
        observer.observe(container).unwrap();
        registry.set_content_box(container, ContentRect::new(10.0, 10.0));
        assert_eq!(timers.pending(), 1);

        drop(observer);
        assert_eq!(timers.pending(), 0);
        assert_eq!(registry.watch_count(), 0);
    }
}
