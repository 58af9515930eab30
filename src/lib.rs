// 核心模块
pub mod config;
pub mod core;
pub mod geometry;
pub mod shell;

#[cfg(feature = "gui")]
pub mod gui;

// 重新导出主要类型
pub use config::{ConfigError, ConfigManager, ShellConfig};
pub use core::{
    BoxRegistry, BoxWatcher, DeferredScheduler, ManualClock, ObserverConfig, StabilityState,
    StableDimensionObserver, SystemClock, TimerQueue,
};
pub use geometry::{ContentRect, Dimensions, Extent, Rect};
pub use shell::{PlaceholderView, ShellLayout, ShellModel};

/// 库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 初始化日志系统
///
/// `RUST_LOG` 环境变量优先于配置文件中的级别；重复初始化会被忽略。
pub fn init_logging(level: &str) {
    let filter = level.parse::<log::LevelFilter>().unwrap_or(log::LevelFilter::Info);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(filter);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    if builder.try_init().is_err() {
        log::debug!("logger already initialized");
    }
}
