pub mod box_watcher;
pub mod clock;
pub mod observer;
pub mod scheduler;

pub use box_watcher::{BoxCallback, BoxNotification, BoxRegistry, BoxWatcher, ContainerId, WatchError, WatchId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use observer::{
    ObserverConfig, ObserverStats, StabilityState, StableDimensionObserver, StableListener,
    DEFAULT_QUIET_WINDOW_MS,
};
pub use scheduler::{DeferredScheduler, TimerCallback, TimerId, TimerQueue, TimerQueueStats};
