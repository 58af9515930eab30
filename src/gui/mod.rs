/// GUI模块 - eframe/egui 桌面窗口
pub mod app;
pub mod panels;
pub mod theme;

pub use app::ChartShellApp;
pub use theme::Palette;
