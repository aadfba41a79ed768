use fabmenu::config;
use fabmenu::gui::app::AppModel;
use fabmenu::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.fabmenu.fabmenu");
    app.run::<AppModel>((config, rx));
}
