use eframe::egui::{self, Color32};

/// 深色配色
pub struct Palette;

impl Palette {
    /// 深背景
    pub const BG_950: Color32 = Color32::from_rgb(0x02, 0x06, 0x17);
    /// 面板背景
    pub const PANEL_900: Color32 = Color32::from_rgb(0x0f, 0x17, 0x2a);
    /// 边框/悬停
    pub const BORDER_800: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
    /// 次级边框
    pub const BORDER_700: Color32 = Color32::from_rgb(0x33, 0x41, 0x55);
    pub const ACCENT: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
    pub const TEXT: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0);
    pub const MUTED: Color32 = Color32::from_rgb(0x64, 0x74, 0x8b);
    pub const SYMBOL: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb);
    pub const UP: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
    pub const DOWN: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
    pub const LOGO: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
}

/// 应用深色主题
pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = Palette::PANEL_900;
    visuals.window_fill = Palette::PANEL_900;
    visuals.extreme_bg_color = Palette::BG_950;
    visuals.override_text_color = Some(Palette::TEXT);
    visuals.selection.bg_fill = Palette::BORDER_800;
    visuals.selection.stroke = egui::Stroke::new(1.0, Palette::ACCENT);
    visuals.widgets.hovered.weak_bg_fill = Palette::BORDER_800;
    ctx.set_visuals(visuals);
}

/// 面板背景框
pub fn panel_frame() -> egui::Frame {
    egui::Frame::none().fill(Palette::PANEL_900)
}

/// 一像素边框
pub fn border() -> egui::Stroke {
    egui::Stroke::new(1.0, Palette::BORDER_800)
}
