use chart_shell::gui::ChartShellApp;
use chart_shell::{init_logging, ConfigManager, ShellConfig, ShellModel, SystemClock};
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = ConfigManager::from_env();
    let load_result = manager.load();
    let config = match load_result {
        Ok(()) => manager.config().clone(),
        Err(_) => ShellConfig::default(),
    };

    // 日志级别来自配置文件，所以加载结果在日志初始化之后才记录
    init_logging(&config.logging.level);
    if let Err(e) = load_result {
        log::warn!("Failed to load {}, using defaults: {}", manager.path().display(), e);
    }
    log::info!("chart_shell {} starting", chart_shell::VERSION);

    let model = ShellModel::new(&config, SystemClock::new())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([config.layout.toolbar_width + config.layout.watchlist_width, 200.0])
            .with_title(config.window.title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |cc| Box::new(ChartShellApp::new(cc, model))),
    )?;
    Ok(())
}
