mod api;
mod app;
mod application;
mod domain;
mod ui;
mod utils;

use iced::window;

fn main() -> iced::Result {
    env_logger::init();
    log::info!("starting Instagram profile downloader");

    iced::application(app::App::default, app::update, app::view)
        .title("Instagram Profile Downloader")
        .window(window::Settings {
            size: iced::Size::new(460.0, 640.0),
            resizable: false,
            ..Default::default()
        })
        .run()
}
