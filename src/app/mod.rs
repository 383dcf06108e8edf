// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gallery, the viewer
//! and the caption screen.
//!
//! `App` owns the loaded configuration, the HTTP client and one state value
//! per screen. Components report events; `update.rs` turns them into screen
//! switches and network tasks.

pub mod config;
mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::api::{ApiClient, ApiSettings};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::{gallery, text_entry, viewer};
use config::Config;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    screen: Screen,
    theme: Theme,
    api: Result<ApiClient, Error>,
    gallery: gallery::State,
    viewer: Option<viewer::State>,
    text_entry: text_entry::State,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("photos", &self.gallery.len())
            .field("viewer_open", &self.viewer.is_some())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    let (width, height) = config::WINDOW_DEFAULT_SIZE;
    let (min_width, min_height) = config::WINDOW_MIN_SIZE;

    window::Settings {
        size: Size::new(width, height),
        min_size: Some(Size::new(min_width, min_height)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 wants an `Fn` boot closure; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads configuration, applies command line overrides and starts
    /// fetching the image list.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.as_deref().map(PathBuf::from);
        let (mut config, warning) = config::load_with_override(config_dir.clone());

        match config::save_if_missing_with_override(&config, config_dir) {
            Ok(true) => tracing::info!("Wrote default settings file"),
            Ok(false) => {}
            Err(error) => tracing::warn!(%error, "Could not write default settings file"),
        }

        if let Some(url) = flags.images_url {
            config.api.images_url = url;
        }
        if let Some(url) = flags.upload_url {
            config.upload.target_url = Some(url);
        }

        let i18n = I18n::new(flags.lang, &config);
        let theme = config.general.theme_mode.theme();
        let api = ApiClient::new(ApiSettings::from(&config));
        if let Err(error) = &api {
            tracing::error!(%error, "Failed to build HTTP client");
        }

        let mut gallery = gallery::State::new(config.display.grid_columns());
        if let Some(key) = warning {
            gallery.set_notice(key);
        }

        let app = App {
            i18n,
            screen: Screen::Gallery,
            theme,
            gallery,
            viewer: None,
            text_entry: text_entry::State::default(),
            api,
            config,
        };
        let task = update::fetch_list(&app.api);

        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription(self.screen)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            config: &self.config,
            api: &self.api,
            screen: &mut self.screen,
            gallery: &mut self.gallery,
            viewer: &mut self.viewer,
            text_entry: &mut self.text_entry,
        };

        match message {
            Message::Gallery(message) => update::handle_gallery_message(&mut ctx, message),
            Message::Viewer(message) => update::handle_viewer_message(&mut ctx, message),
            Message::TextEntry(message) => update::handle_text_entry_message(&mut ctx, message),
            Message::UploadFinished { original, result } => {
                update::handle_upload_finished(&mut ctx, original, result)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            gallery: &self.gallery,
            viewer: self.viewer.as_ref(),
            text_entry: &self.text_entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ImageRecord;
    use crate::media::TextColor;
    use image_rs::{DynamicImage, ImageFormat, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            image_rs::Rgba([90, 120, 200, 255]),
        ));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    fn record(url: &str) -> ImageRecord {
        ImageRecord {
            url: url.to_string(),
            created: "2024-03-01T10:00:00Z".to_string(),
            updated: "2024-03-01T10:00:00Z".to_string(),
        }
    }

    fn app_in(dir: &std::path::Path) -> App {
        let flags = Flags {
            lang: Some("en-US".into()),
            config_dir: Some(dir.to_string_lossy().into_owned()),
            images_url: Some("http://127.0.0.1:9/images".into()),
            upload_url: None,
        };
        App::new(flags).0
    }

    /// Gallery with two records whose bytes have arrived.
    fn loaded_app(dir: &std::path::Path) -> App {
        let mut app = app_in(dir);
        let urls = ["http://127.0.0.1:9/a.png", "http://127.0.0.1:9/b.png"];
        let _ = app.update(Message::Gallery(gallery::Message::ListLoaded(Ok(
            urls.iter().map(|url| record(url)).collect(),
        ))));
        for (index, url) in urls.iter().enumerate() {
            let _ = app.update(Message::Gallery(gallery::Message::CellLoaded {
                index,
                url: (*url).to_string(),
                result: Ok(png_bytes(8, 6)),
            }));
        }
        app
    }

    #[test]
    fn new_app_starts_on_gallery_and_writes_settings() {
        let dir = tempdir().expect("temp dir");
        let app = app_in(dir.path());

        assert_eq!(app.screen, Screen::Gallery);
        assert!(app.viewer.is_none());
        assert!(dir.path().join("settings.toml").exists());
        assert_eq!(app.config.api.images_url, "http://127.0.0.1:9/images");
        assert_eq!(app.title(), app.i18n.tr("app-title"));
    }

    #[test]
    fn unreadable_settings_are_reported_in_gallery() {
        let dir = tempdir().expect("temp dir");
        let settings = dir.path().join("settings.toml");
        std::fs::write(&settings, "[display\ngrid_columns = ").expect("write settings");

        let app = app_in(dir.path());

        assert_eq!(app.gallery.notice(), Some("notification-config-load-error"));
        assert_eq!(
            std::fs::read_to_string(&settings).expect("read settings"),
            "[display\ngrid_columns = "
        );
    }

    #[test]
    fn readable_settings_leave_no_notice() {
        let dir = tempdir().expect("temp dir");
        let app = app_in(dir.path());
        assert_eq!(app.gallery.notice(), None);
    }

    #[test]
    fn cli_upload_url_overrides_config() {
        let dir = tempdir().expect("temp dir");
        let flags = Flags {
            config_dir: Some(dir.path().to_string_lossy().into_owned()),
            upload_url: Some("http://127.0.0.1:9/post".into()),
            ..Flags::default()
        };
        let (app, _) = App::new(flags);
        assert_eq!(
            app.config.upload.target_url.as_deref(),
            Some("http://127.0.0.1:9/post")
        );
    }

    #[test]
    fn pressing_a_loaded_cell_opens_viewer() {
        let dir = tempdir().expect("temp dir");
        let mut app = loaded_app(dir.path());

        let _ = app.update(Message::Gallery(gallery::Message::CellPressed(1)));

        assert_eq!(app.screen, Screen::Viewer);
        let viewer = app.viewer.as_ref().expect("viewer state");
        assert_eq!(viewer.current_index(), Some(1));
        assert!(viewer.display().is_some());
    }

    #[test]
    fn viewer_navigation_wraps_and_back_returns_to_gallery() {
        let dir = tempdir().expect("temp dir");
        let mut app = loaded_app(dir.path());
        let _ = app.update(Message::Gallery(gallery::Message::CellPressed(1)));

        let _ = app.update(Message::Viewer(viewer::Message::NavigateNext));
        assert_eq!(
            app.viewer.as_ref().and_then(viewer::State::current_index),
            Some(0)
        );

        let _ = app.update(Message::Viewer(viewer::Message::Back));
        assert_eq!(app.screen, Screen::Gallery);
        assert!(app.viewer.is_none());
    }

    #[test]
    fn caption_flow_returns_to_viewer_with_edit() {
        let dir = tempdir().expect("temp dir");
        let mut app = loaded_app(dir.path());
        let _ = app.update(Message::Gallery(gallery::Message::CellPressed(0)));

        let _ = app.update(Message::Viewer(viewer::Message::Action(viewer::Action::AddText)));
        assert_eq!(app.screen, Screen::TextEntry);

        let _ = app.update(Message::TextEntry(text_entry::Message::TextChanged(
            "Hi".into(),
        )));
        let _ = app.update(Message::TextEntry(text_entry::Message::SwatchSelected(
            TextColor::BLUE,
        )));
        let _ = app.update(Message::TextEntry(text_entry::Message::Save));

        assert_eq!(app.screen, Screen::Viewer);
        assert!(app.text_entry.text().is_empty());
        assert!(app.viewer.as_ref().and_then(viewer::State::session).is_some());
    }

    #[test]
    fn cancelled_caption_leaves_photo_untouched() {
        let dir = tempdir().expect("temp dir");
        let mut app = loaded_app(dir.path());
        let _ = app.update(Message::Gallery(gallery::Message::CellPressed(0)));
        let _ = app.update(Message::Viewer(viewer::Message::Action(viewer::Action::AddText)));

        let _ = app.update(Message::TextEntry(text_entry::Message::Cancel));

        assert_eq!(app.screen, Screen::Viewer);
        let session = app
            .viewer
            .as_ref()
            .and_then(viewer::State::session)
            .expect("edit session");
        assert!(!session.is_modified());
    }

    #[test]
    fn late_bytes_fill_waiting_viewer() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path());
        let url = "http://127.0.0.1:9/late.png";
        let _ = app.update(Message::Gallery(gallery::Message::ListLoaded(Ok(vec![
            record(url),
        ]))));

        let _ = app.update(Message::Gallery(gallery::Message::CellPressed(0)));
        assert!(app.viewer.as_ref().and_then(viewer::State::display).is_none());

        let _ = app.update(Message::Gallery(gallery::Message::CellLoaded {
            index: 0,
            url: url.to_string(),
            result: Ok(png_bytes(4, 4)),
        }));
        assert!(app.viewer.as_ref().and_then(viewer::State::display).is_some());
    }

    #[test]
    fn paging_to_a_late_photo_shows_it_once_loaded() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path());
        let urls = ["http://127.0.0.1:9/a.png", "http://127.0.0.1:9/b.png"];
        let _ = app.update(Message::Gallery(gallery::Message::ListLoaded(Ok(
            urls.iter().map(|url| record(url)).collect(),
        ))));
        let _ = app.update(Message::Gallery(gallery::Message::CellLoaded {
            index: 0,
            url: urls[0].to_string(),
            result: Ok(png_bytes(4, 4)),
        }));
        let _ = app.update(Message::Gallery(gallery::Message::CellPressed(0)));
        let _ = app.update(Message::Viewer(viewer::Message::NavigateNext));

        let _ = app.update(Message::Gallery(gallery::Message::CellLoaded {
            index: 1,
            url: urls[1].to_string(),
            result: Ok(png_bytes(9, 7)),
        }));

        let viewer = app.viewer.as_ref().expect("viewer state");
        let display = viewer.display().expect("displayed photo");
        assert_eq!((display.width, display.height), (9, 7));
        assert_eq!(viewer.shown_index(), Some(1));
        assert_eq!(
            viewer.session().and_then(|session| session.original_url()),
            Some(urls[1])
        );
    }

    #[test]
    fn upload_result_from_a_closed_viewer_does_not_reach_the_next_one() {
        let dir = tempdir().expect("temp dir");
        let mut app = loaded_app(dir.path());
        let _ = app.update(Message::Gallery(gallery::Message::CellPressed(0)));
        let _ = app.update(Message::Viewer(viewer::Message::Action(viewer::Action::Save)));
        assert_eq!(
            app.viewer.as_ref().and_then(viewer::State::upload_status),
            Some(viewer::UploadStatus::InProgress)
        );

        let _ = app.update(Message::Viewer(viewer::Message::Back));
        let _ = app.update(Message::Gallery(gallery::Message::CellPressed(1)));
        let _ = app.update(Message::UploadFinished {
            original: "http://127.0.0.1:9/a.png".into(),
            result: Ok(crate::api::UploadOutcome {
                status: 201,
                body: None,
            }),
        });

        assert_eq!(app.screen, Screen::Viewer);
        assert_eq!(app.viewer.as_ref().and_then(viewer::State::upload_status), None);
    }

    #[test]
    fn upload_result_without_viewer_is_dropped() {
        let dir = tempdir().expect("temp dir");
        let mut app = loaded_app(dir.path());
        let _ = app.update(Message::UploadFinished {
            original: "http://127.0.0.1:9/a.png".into(),
            result: Err(Error::Http("HTTP status: 500".into())),
        });
        assert_eq!(app.screen, Screen::Gallery);
        assert!(app.viewer.is_none());
    }

    #[test]
    fn viewer_messages_without_viewer_are_ignored() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_in(dir.path());
        let _ = app.update(Message::Viewer(viewer::Message::NavigateNext));
        assert_eq!(app.screen, Screen::Gallery);
    }
}
