// SPDX-License-Identifier: MPL-2.0
//! Viewer state and message handling.

use crate::api::UploadOutcome;
use crate::app::config::WHEEL_ZOOM_FACTOR;
use crate::error::Error;
use crate::media::{decode_image, EditSession, FilterPreset, GalleryNavigator, ImageData, MediaPayload, TextColor};
use crate::ui::state::{DragState, ZoomState};
use iced::widget::scrollable::{AbsoluteOffset, RelativeOffset};
use iced::widget::{operation, Id};
use iced::{event, keyboard, mouse, Point, Size, Task};
use std::time::Duration;

pub const SCROLLABLE_ID: &str = "viewer-scrollable";

/// Horizontal drag distance that counts as a swipe.
const SWIPE_DISTANCE: f32 = 80.0;
/// Accumulated horizontal wheel travel that counts as a swipe.
const WHEEL_SWIPE_DISTANCE: f32 = 120.0;
const PIXELS_PER_LINE: f32 = 40.0;
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// How the edited image is encoded for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub filename: String,
    pub quality: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    InProgress,
    Succeeded,
    Failed,
}

/// Entries of the edit menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Filter(FilterPreset),
    AddText,
    ClearFilters,
    Save,
    Cancel,
}

#[derive(Debug, Clone)]
pub enum Message {
    NavigateNext,
    NavigatePrevious,
    Back,
    ToggleActions,
    Action(Action),
    Scrolled {
        offset: AbsoluteOffset,
        viewport: Size,
    },
    Pressed,
    Released,
    CursorMoved {
        position: Point,
        viewport: Size,
    },
    DoubleClicked {
        viewport: Size,
    },
    RawEvent(event::Event),
    /// Result of the upload started for the photo at `original`.
    UploadFinished {
        original: String,
        result: Result<UploadOutcome, Error>,
    },
    StatusExpired,
}

/// Requests for the parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Display the gallery entry at this index.
    Show(usize),
    Exit,
    OpenTextEntry,
    UploadRequested {
        original: String,
        payload: MediaPayload,
    },
}

#[derive(Debug, Clone)]
pub struct State {
    navigator: GalleryNavigator,
    session: Option<EditSession>,
    /// Gallery index the session was decoded from.
    shown: Option<usize>,
    display: Option<ImageData>,
    zoom: ZoomState,
    drag: DragState,
    viewport: Size,
    cursor: Option<Point>,
    modifiers: keyboard::Modifiers,
    wheel_swipe: f32,
    actions_open: bool,
    upload_status: Option<UploadStatus>,
    upload: UploadOptions,
}

impl State {
    #[must_use]
    pub fn new(len: usize, index: usize, upload: UploadOptions) -> Self {
        Self {
            navigator: GalleryNavigator::new(len, index),
            session: None,
            shown: None,
            display: None,
            zoom: ZoomState::default(),
            drag: DragState::default(),
            viewport: Size::ZERO,
            cursor: None,
            modifiers: keyboard::Modifiers::default(),
            wheel_swipe: 0.0,
            actions_open: false,
            upload_status: None,
            upload,
        }
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.navigator.current()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.navigator.len()
    }

    /// Index of the photo on screen, which lags behind
    /// [`current_index`](Self::current_index) until its bytes arrive.
    #[must_use]
    pub fn shown_index(&self) -> Option<usize> {
        self.shown
    }

    #[must_use]
    pub fn display(&self) -> Option<&ImageData> {
        self.display.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub fn actions_open(&self) -> bool {
        self.actions_open
    }

    #[must_use]
    pub fn upload_status(&self) -> Option<UploadStatus> {
        self.upload_status
    }

    /// Replaces the displayed photo with the decoded `bytes`.
    ///
    /// Missing or undecodable bytes leave the current photo on screen.
    pub fn show(&mut self, bytes: Option<&[u8]>, url: Option<&str>) {
        let Some(bytes) = bytes else {
            tracing::debug!(index = ?self.current_index(), "No bytes for photo yet");
            return;
        };
        match decode_image(bytes) {
            Ok(image) => {
                self.display = Some(ImageData::from_dynamic(&image));
                self.session = Some(EditSession::new(image, url.map(str::to_string)));
                self.shown = self.current_index();
                self.upload_status = None;
                self.zoom.reset();
                self.drag.end();
                self.actions_open = false;
            }
            Err(error) => {
                tracing::warn!(%error, index = ?self.current_index(), "Failed to decode photo");
            }
        }
    }

    /// Burns the caption into the current photo.
    pub fn apply_caption(&mut self, text: &str, color: TextColor) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Err(error) = session.add_text(text, color) {
            tracing::warn!(%error, "Failed to draw caption");
            return;
        }
        self.refresh_display();
    }

    pub fn update(&mut self, message: Message) -> (Event, Task<Message>) {
        match message {
            Message::NavigateNext => (self.step(true), Task::none()),
            Message::NavigatePrevious => (self.step(false), Task::none()),
            Message::Back => (Event::Exit, Task::none()),
            Message::ToggleActions => {
                self.actions_open = self.session.is_some() && !self.actions_open;
                (Event::None, Task::none())
            }
            Message::Action(action) => {
                self.actions_open = false;
                (self.handle_action(action), Task::none())
            }
            Message::Scrolled { offset, viewport } => {
                self.viewport = viewport;
                self.zoom.sync_offset(offset);
                (Event::None, Task::none())
            }
            Message::Pressed => {
                if let Some(cursor) = self.cursor {
                    self.drag.begin(cursor, self.zoom.offset());
                }
                (Event::None, Task::none())
            }
            Message::Released => (self.finish_drag(), Task::none()),
            Message::CursorMoved { position, viewport } => {
                self.cursor = Some(position);
                self.viewport = viewport;
                if !self.zoom.is_zoomed() {
                    return (Event::None, Task::none());
                }
                match self.drag.offset_for(position) {
                    Some(target) => {
                        let offset = self.zoom.pan_to(target, viewport);
                        (Event::None, self.scroll_to(offset))
                    }
                    None => (Event::None, Task::none()),
                }
            }
            Message::DoubleClicked { viewport } => {
                if self.display.is_none() {
                    return (Event::None, Task::none());
                }
                self.viewport = viewport;
                self.drag.end();
                let cursor = self
                    .cursor
                    .unwrap_or(Point::new(viewport.width / 2.0, viewport.height / 2.0));
                let offset = self.zoom.toggle_at(cursor, viewport);
                (Event::None, self.scroll_to(offset))
            }
            Message::RawEvent(event) => self.handle_raw_event(event),
            Message::UploadFinished { original, result } => {
                let pending = self.upload_status == Some(UploadStatus::InProgress)
                    && self.session.as_ref().and_then(EditSession::original_url)
                        == Some(original.as_str());
                if !pending {
                    return (Event::None, Task::none());
                }
                self.upload_status = match result {
                    Ok(_) => Some(UploadStatus::Succeeded),
                    Err(Error::InvalidUrl(_)) => {
                        self.upload_status = None;
                        return (Event::None, Task::none());
                    }
                    Err(_) => Some(UploadStatus::Failed),
                };
                let expire = Task::perform(async { tokio::time::sleep(STATUS_DURATION).await }, |()| {
                    Message::StatusExpired
                });
                (Event::None, expire)
            }
            Message::StatusExpired => {
                if self.upload_status != Some(UploadStatus::InProgress) {
                    self.upload_status = None;
                }
                (Event::None, Task::none())
            }
        }
    }

    fn step(&mut self, forward: bool) -> Event {
        let index = if forward {
            self.navigator.next()
        } else {
            self.navigator.previous()
        };
        index.map_or(Event::None, Event::Show)
    }

    fn handle_action(&mut self, action: Action) -> Event {
        match action {
            Action::Filter(preset) => {
                if let Some(session) = self.session.as_mut() {
                    match session.apply_preset(preset) {
                        Ok(()) => self.refresh_display(),
                        Err(error) => tracing::warn!(%error, %preset, "Filter failed"),
                    }
                }
                Event::None
            }
            Action::AddText if self.session.is_some() => Event::OpenTextEntry,
            Action::AddText | Action::Cancel => Event::None,
            Action::ClearFilters => {
                if let Some(session) = self.session.as_mut() {
                    session.clear_filters();
                    self.refresh_display();
                }
                Event::None
            }
            Action::Save => self.prepare_upload(),
        }
    }

    fn prepare_upload(&mut self) -> Event {
        if self.upload_status == Some(UploadStatus::InProgress) {
            return Event::None;
        }
        let Some(session) = self.session.as_ref() else {
            return Event::None;
        };
        let Some(original) = session.original_url() else {
            tracing::debug!("Skipping upload, photo has no source URL");
            return Event::None;
        };
        let payload = match session.upload_payload(&self.upload.filename, self.upload.quality) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::debug!(%error, "Skipping upload, encoding failed");
                return Event::None;
            }
        };
        let original = original.to_string();
        self.upload_status = Some(UploadStatus::InProgress);
        Event::UploadRequested { original, payload }
    }

    fn finish_drag(&mut self) -> Event {
        let travel = self
            .cursor
            .and_then(|cursor| self.drag.displacement(cursor));
        self.drag.end();

        match travel {
            Some(travel) if !self.zoom.is_zoomed() && travel.x.abs() > travel.y.abs() => {
                if travel.x <= -SWIPE_DISTANCE {
                    self.step(true)
                } else if travel.x >= SWIPE_DISTANCE {
                    self.step(false)
                } else {
                    Event::None
                }
            }
            _ => Event::None,
        }
    }

    fn handle_raw_event(&mut self, event: event::Event) -> (Event, Task<Message>) {
        match event {
            event::Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                self.modifiers = modifiers;
                (Event::None, Task::none())
            }
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                ..
            }) => match named {
                keyboard::key::Named::ArrowRight => (self.step(true), Task::none()),
                keyboard::key::Named::ArrowLeft => (self.step(false), Task::none()),
                keyboard::key::Named::Escape if self.actions_open => {
                    self.actions_open = false;
                    (Event::None, Task::none())
                }
                keyboard::key::Named::Escape => (Event::Exit, Task::none()),
                _ => (Event::None, Task::none()),
            },
            event::Event::Mouse(mouse::Event::WheelScrolled { delta }) => self.handle_wheel(delta),
            event::Event::Mouse(mouse::Event::CursorLeft) => {
                self.cursor = None;
                self.drag.end();
                (Event::None, Task::none())
            }
            _ => (Event::None, Task::none()),
        }
    }

    /// Ctrl/Cmd + wheel zooms around the cursor; horizontal travel swipes.
    fn handle_wheel(&mut self, delta: mouse::ScrollDelta) -> (Event, Task<Message>) {
        let (x, y) = match delta {
            mouse::ScrollDelta::Lines { x, y } => (x * PIXELS_PER_LINE, y * PIXELS_PER_LINE),
            mouse::ScrollDelta::Pixels { x, y } => (x, y),
        };

        if self.modifiers.command() {
            let (Some(cursor), true) = (self.cursor, self.display.is_some()) else {
                return (Event::None, Task::none());
            };
            let factor = WHEEL_ZOOM_FACTOR.powf(y / PIXELS_PER_LINE);
            let offset = self.zoom.zoom_by(factor, cursor, self.viewport);
            return (Event::None, self.scroll_to(offset));
        }

        if self.zoom.is_zoomed() || x.abs() <= y.abs() {
            self.wheel_swipe = 0.0;
            return (Event::None, Task::none());
        }

        self.wheel_swipe += x;
        if self.wheel_swipe <= -WHEEL_SWIPE_DISTANCE {
            self.wheel_swipe = 0.0;
            (self.step(true), Task::none())
        } else if self.wheel_swipe >= WHEEL_SWIPE_DISTANCE {
            self.wheel_swipe = 0.0;
            (self.step(false), Task::none())
        } else {
            (Event::None, Task::none())
        }
    }

    fn refresh_display(&mut self) {
        if let Some(session) = &self.session {
            self.display = Some(ImageData::from_dynamic(session.current()));
        }
    }

    fn scroll_to(&self, offset: AbsoluteOffset) -> Task<Message> {
        let content = self.zoom.content_size(self.viewport);
        let max_x = content.width - self.viewport.width;
        let max_y = content.height - self.viewport.height;
        let relative = |value: f32, max: f32| if max > 0.0 { value / max } else { 0.0 };

        operation::snap_to(
            Id::new(SCROLLABLE_ID),
            RelativeOffset {
                x: relative(offset.x, max_x),
                y: relative(offset.y, max_y),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    const URL: &str = "https://example.com/photo.png";

    fn png() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([90, 120, 150, 255])))
            .write_to(&mut buffer, ImageFormat::Png)
            .expect("encode png");
        buffer.into_inner()
    }

    fn viewer(len: usize, index: usize) -> State {
        State::new(
            len,
            index,
            UploadOptions {
                filename: "me_test.jpg".into(),
                quality: 70,
            },
        )
    }

    fn loaded() -> State {
        let mut state = viewer(3, 0);
        state.show(Some(&png()), Some(URL));
        state
    }

    fn event(state: &mut State, message: Message) -> Event {
        state.update(message).0
    }

    fn finished(original: &str, result: Result<UploadOutcome, Error>) -> Message {
        Message::UploadFinished {
            original: original.to_string(),
            result,
        }
    }

    fn created() -> UploadOutcome {
        UploadOutcome {
            status: 201,
            body: None,
        }
    }

    #[test]
    fn navigation_wraps_and_requests_photo() {
        let mut state = viewer(3, 2);
        assert_eq!(event(&mut state, Message::NavigateNext), Event::Show(0));
        assert_eq!(event(&mut state, Message::NavigatePrevious), Event::Show(2));
    }

    #[test]
    fn empty_gallery_navigation_is_a_no_op() {
        let mut state = viewer(0, 0);
        assert_eq!(event(&mut state, Message::NavigateNext), Event::None);
    }

    #[test]
    fn missing_bytes_keep_current_photo() {
        let mut state = loaded();
        let before = state.display().map(|d| (d.width, d.height));
        state.show(None, Some("https://example.com/other.png"));
        assert_eq!(state.display().map(|d| (d.width, d.height)), before);
        assert_eq!(state.session().and_then(EditSession::original_url), Some(URL));
    }

    #[test]
    fn undecodable_bytes_keep_current_photo() {
        let mut state = loaded();
        state.show(Some(b"garbage"), Some("https://example.com/other.png"));
        assert_eq!(state.session().and_then(EditSession::original_url), Some(URL));
    }

    #[test]
    fn filter_action_closes_menu_and_updates_session() {
        let mut state = loaded();
        event(&mut state, Message::ToggleActions);
        assert!(state.actions_open());
        event(&mut state, Message::Action(Action::Filter(FilterPreset::Noir)));
        assert!(!state.actions_open());
        assert!(state.session().is_some_and(EditSession::is_modified));

        event(&mut state, Message::Action(Action::ClearFilters));
        assert!(!state.session().is_some_and(EditSession::is_modified));
    }

    #[test]
    fn actions_menu_needs_a_photo() {
        let mut state = viewer(1, 0);
        event(&mut state, Message::ToggleActions);
        assert!(!state.actions_open());
    }

    #[test]
    fn add_text_opens_text_entry() {
        let mut state = loaded();
        assert_eq!(
            event(&mut state, Message::Action(Action::AddText)),
            Event::OpenTextEntry
        );
    }

    #[test]
    fn save_requests_upload_with_jpeg_payload() {
        let mut state = loaded();
        match event(&mut state, Message::Action(Action::Save)) {
            Event::UploadRequested { original, payload } => {
                assert_eq!(original, URL);
                assert_eq!(payload.key, "image");
                assert_eq!(payload.filename, "me_test.jpg");
                assert_eq!(&payload.data[..2], &[0xFF, 0xD8]);
            }
            other => panic!("expected upload request, got {other:?}"),
        }
        assert_eq!(state.upload_status(), Some(UploadStatus::InProgress));
        assert_eq!(event(&mut state, Message::Action(Action::Save)), Event::None);
    }

    #[test]
    fn save_without_source_url_is_skipped() {
        let mut state = viewer(1, 0);
        state.show(Some(&png()), None);
        assert_eq!(event(&mut state, Message::Action(Action::Save)), Event::None);
        assert_eq!(state.upload_status(), None);
    }

    #[test]
    fn upload_result_sets_status_then_expires() {
        let mut state = loaded();
        event(&mut state, Message::Action(Action::Save));
        event(&mut state, finished(URL, Err(Error::Http("HTTP status: 500".into()))));
        assert_eq!(state.upload_status(), Some(UploadStatus::Failed));
        event(&mut state, Message::StatusExpired);
        assert_eq!(state.upload_status(), None);
    }

    #[test]
    fn malformed_target_clears_status_silently() {
        let mut state = loaded();
        event(&mut state, Message::Action(Action::Save));
        event(&mut state, finished(URL, Err(Error::InvalidUrl("nope".into()))));
        assert_eq!(state.upload_status(), None);
    }

    #[test]
    fn upload_result_for_another_photo_is_ignored() {
        let mut state = loaded();
        event(&mut state, Message::Action(Action::Save));
        event(&mut state, finished("https://example.com/other.png", Ok(created())));
        assert_eq!(state.upload_status(), Some(UploadStatus::InProgress));

        event(&mut state, finished(URL, Ok(created())));
        assert_eq!(state.upload_status(), Some(UploadStatus::Succeeded));
    }

    #[test]
    fn upload_result_without_pending_upload_is_ignored() {
        let mut state = loaded();
        event(&mut state, finished(URL, Ok(created())));
        assert_eq!(state.upload_status(), None);
    }

    #[test]
    fn showing_another_photo_drops_pending_status() {
        let mut state = loaded();
        event(&mut state, Message::Action(Action::Save));
        event(&mut state, Message::NavigateNext);
        state.show(Some(&png()), Some("https://example.com/next.png"));
        assert_eq!(state.upload_status(), None);
        assert_eq!(state.shown_index(), Some(1));

        event(&mut state, finished(URL, Ok(created())));
        assert_eq!(state.upload_status(), None);
    }

    #[test]
    fn navigating_to_missing_bytes_keeps_shown_index() {
        let mut state = loaded();
        event(&mut state, Message::NavigateNext);
        state.show(None, Some("https://example.com/next.png"));
        assert_eq!(state.current_index(), Some(1));
        assert_eq!(state.shown_index(), Some(0));
    }

    #[test]
    fn double_click_toggles_zoom() {
        let mut state = loaded();
        let viewport = Size::new(400.0, 300.0);
        event(
            &mut state,
            Message::CursorMoved { position: Point::new(200.0, 150.0), viewport },
        );
        event(&mut state, Message::DoubleClicked { viewport });
        assert!(state.zoom().is_zoomed());
        event(&mut state, Message::DoubleClicked { viewport });
        assert!(!state.zoom().is_zoomed());
    }

    #[test]
    fn horizontal_drag_swipes_when_not_zoomed() {
        let mut state = loaded();
        let viewport = Size::new(400.0, 300.0);
        event(&mut state, Message::CursorMoved { position: Point::new(300.0, 150.0), viewport });
        event(&mut state, Message::Pressed);
        event(&mut state, Message::CursorMoved { position: Point::new(100.0, 160.0), viewport });
        assert_eq!(event(&mut state, Message::Released), Event::Show(1));
    }

    #[test]
    fn short_drag_does_not_navigate() {
        let mut state = loaded();
        let viewport = Size::new(400.0, 300.0);
        event(&mut state, Message::CursorMoved { position: Point::new(200.0, 150.0), viewport });
        event(&mut state, Message::Pressed);
        event(&mut state, Message::CursorMoved { position: Point::new(180.0, 150.0), viewport });
        assert_eq!(event(&mut state, Message::Released), Event::None);
    }

    #[test]
    fn arrow_keys_navigate_and_escape_exits() {
        let mut state = loaded();
        let key = |named| {
            Message::RawEvent(event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                modified_key: keyboard::Key::Named(named),
                physical_key: keyboard::key::Physical::Unidentified(
                    keyboard::key::NativeCode::Unidentified,
                ),
                location: keyboard::Location::Standard,
                modifiers: keyboard::Modifiers::default(),
                text: None,
                repeat: false,
            }))
        };
        assert_eq!(event(&mut state, key(keyboard::key::Named::ArrowRight)), Event::Show(1));
        assert_eq!(event(&mut state, key(keyboard::key::Named::ArrowLeft)), Event::Show(0));
        assert_eq!(event(&mut state, key(keyboard::key::Named::Escape)), Event::Exit);
    }
}
