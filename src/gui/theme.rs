use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Fixed palette of the screen. The toggle endpoint colors are the contract
/// the color tweens interpolate between.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub toggle_open_bg: Srgba<f64>,
    pub toggle_closed_bg: Srgba<f64>,
    pub icon_open: Srgba<f64>,
    pub icon_closed: Srgba<f64>,
    pub bar: Srgba<f64>,
    pub bar_icon: Srgba<f64>,
    pub card_label: Srgba<f64>,
    pub action_disc: Srgba<f64>,
    pub action_icon: Srgba<f64>,
    pub action_label: Srgba<f64>,
    pub sheet: Srgba<f64>,
    pub background: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            // #EAEAEA
            toggle_open_bg: Srgba::new(0.918, 0.918, 0.918, 1.0),
            // #FF3841
            toggle_closed_bg: Srgba::new(1.0, 0.22, 0.255, 1.0),
            icon_open: Srgba::new(0.0, 0.0, 0.0, 1.0),
            icon_closed: Srgba::new(1.0, 1.0, 1.0, 1.0),
            bar: Srgba::new(0.125, 0.125, 0.14, 1.0),
            bar_icon: Srgba::new(1.0, 1.0, 1.0, 1.0),
            card_label: Srgba::new(1.0, 1.0, 1.0, 1.0),
            action_disc: Srgba::new(0.0, 0.0, 0.0, 1.0),
            action_icon: Srgba::new(1.0, 1.0, 1.0, 1.0),
            action_label: Srgba::new(0.1, 0.1, 0.1, 1.0),
            sheet: Srgba::new(1.0, 1.0, 1.0, 1.0),
            background: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.fabmenu-window, .fabmenu-drawing-area {
    background: none;
    background-color: white;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
