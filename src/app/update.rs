// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Components report [`gallery::Event`], [`viewer::Event`] and
//! [`text_entry::Event`]; the handlers here turn them into screen changes and
//! network tasks.

use super::{Message, Screen};
use crate::api::{ApiClient, UploadOutcome, UploadRequest};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::media::MediaPayload;
use crate::ui::viewer::UploadOptions;
use crate::ui::{gallery, text_entry, viewer};
use iced::Task;

/// Mutable view of the `App` fields the handlers touch.
pub struct UpdateContext<'a> {
    pub config: &'a Config,
    pub api: &'a std::result::Result<ApiClient, Error>,
    pub screen: &'a mut Screen,
    pub gallery: &'a mut gallery::State,
    pub viewer: &'a mut Option<viewer::State>,
    pub text_entry: &'a mut text_entry::State,
}

pub fn handle_gallery_message(ctx: &mut UpdateContext<'_>, message: gallery::Message) -> Task<Message> {
    let loaded_index = match &message {
        gallery::Message::CellLoaded { index, .. } => Some(*index),
        _ => None,
    };

    let task = match gallery::update(ctx.gallery, message) {
        gallery::Event::None => Task::none(),
        gallery::Event::FetchList => fetch_list(ctx.api),
        gallery::Event::FetchCells(cells) => fetch_cells(ctx.api, cells),
        gallery::Event::OpenViewer(index) => {
            open_viewer(ctx, index);
            Task::none()
        }
    };

    if let Some(index) = loaded_index {
        refresh_viewer(ctx, index);
    }

    task
}

pub fn handle_viewer_message(ctx: &mut UpdateContext<'_>, message: viewer::Message) -> Task<Message> {
    let Some(state) = ctx.viewer.as_mut() else {
        return Task::none();
    };
    let (event, task) = state.update(message);
    let task = task.map(Message::Viewer);

    let follow_up = match event {
        viewer::Event::None => Task::none(),
        viewer::Event::Show(index) => {
            if let (Some(state), Some(cell)) = (ctx.viewer.as_mut(), ctx.gallery.cell(index)) {
                state.show(cell.bytes(), cell.url());
            }
            Task::none()
        }
        viewer::Event::Exit => {
            *ctx.viewer = None;
            *ctx.screen = Screen::Gallery;
            Task::none()
        }
        viewer::Event::OpenTextEntry => {
            *ctx.text_entry = text_entry::State::default();
            *ctx.screen = Screen::TextEntry;
            Task::none()
        }
        viewer::Event::UploadRequested { original, payload } => {
            upload(ctx.api, ctx.config, original, payload)
        }
    };

    Task::batch([task, follow_up])
}

/// Logs an upload result and hands it to the viewer, which only keeps it
/// when it still shows the photo that was uploaded.
pub fn handle_upload_finished(
    ctx: &mut UpdateContext<'_>,
    original: String,
    result: Result<UploadOutcome>,
) -> Task<Message> {
    match &result {
        Ok(outcome) => {
            tracing::info!(%original, status = outcome.status, body = ?outcome.body, "Upload finished");
        }
        Err(Error::InvalidUrl(reason)) => {
            tracing::debug!(%original, %reason, "Skipped upload, target URL is malformed");
        }
        Err(error) => tracing::error!(%original, %error, "Upload failed"),
    }

    let Some(state) = ctx.viewer.as_mut() else {
        return Task::none();
    };
    let (_, task) = state.update(viewer::Message::UploadFinished { original, result });
    task.map(Message::Viewer)
}

pub fn handle_text_entry_message(
    ctx: &mut UpdateContext<'_>,
    message: text_entry::Message,
) -> Task<Message> {
    match text_entry::update(ctx.text_entry, message) {
        text_entry::Event::None => {}
        text_entry::Event::Completed { text, color } => {
            if let Some(state) = ctx.viewer.as_mut() {
                state.apply_caption(&text, color);
            }
            *ctx.screen = Screen::Viewer;
        }
        text_entry::Event::Cancelled => *ctx.screen = Screen::Viewer,
    }
    Task::none()
}

/// Requests the image list, or reports why the client is unusable.
pub fn fetch_list(api: &std::result::Result<ApiClient, Error>) -> Task<Message> {
    match api {
        Ok(api) => {
            let api = api.clone();
            Task::perform(async move { api.fetch_images().await }, |result| {
                Message::Gallery(gallery::Message::ListLoaded(result))
            })
        }
        Err(error) => Task::done(Message::Gallery(gallery::Message::ListLoaded(Err(
            error.clone(),
        )))),
    }
}

fn fetch_cells(
    api: &std::result::Result<ApiClient, Error>,
    cells: Vec<(usize, String)>,
) -> Task<Message> {
    let Ok(api) = api else {
        return Task::none();
    };

    Task::batch(cells.into_iter().map(|(index, url)| {
        let api = api.clone();
        Task::perform(
            async move {
                let result = api.fetch_image_bytes(&url).await;
                (index, url, result)
            },
            |(index, url, result)| Message::Gallery(gallery::Message::CellLoaded { index, url, result }),
        )
    }))
}

fn open_viewer(ctx: &mut UpdateContext<'_>, index: usize) {
    let options = UploadOptions {
        filename: ctx.config.upload.filename(),
        quality: ctx.config.upload.jpeg_quality(),
    };
    let mut state = viewer::State::new(ctx.gallery.len(), index, options);
    if let Some(cell) = ctx.gallery.cell(index) {
        state.show(cell.bytes(), cell.url());
    }
    *ctx.viewer = Some(state);
    *ctx.screen = Screen::Viewer;
}

/// Shows a cell that finished downloading while the viewer was waiting on it,
/// including after paging away from a photo that was already on screen.
fn refresh_viewer(ctx: &mut UpdateContext<'_>, index: usize) {
    let Some(state) = ctx.viewer.as_mut() else {
        return;
    };
    if state.current_index() != Some(index) || state.shown_index() == Some(index) {
        return;
    }
    if let Some(cell) = ctx.gallery.cell(index) {
        state.show(cell.bytes(), cell.url());
    }
}

fn upload(
    api: &std::result::Result<ApiClient, Error>,
    config: &Config,
    original: String,
    payload: MediaPayload,
) -> Task<Message> {
    let tag = original.clone();
    let finished = move |result| Message::UploadFinished {
        original: tag,
        result,
    };

    let api = match api {
        Ok(api) => api.clone(),
        Err(error) => return Task::done(finished(Err(error.clone()))),
    };
    let request = UploadRequest::new(config.upload.app_id.clone(), original, payload);

    Task::perform(send_upload(api, upload_target(config), request), finished)
}

/// Configured upload target, ignoring a blank entry.
fn upload_target(config: &Config) -> Option<String> {
    config
        .upload
        .target_url
        .clone()
        .filter(|url| !url.trim().is_empty())
}

/// Resolves the upload target when none is configured, then posts the form.
async fn send_upload(
    api: ApiClient,
    target: Option<String>,
    request: UploadRequest,
) -> Result<UploadOutcome> {
    let target = match target {
        Some(target) => target,
        None => api.fetch_upload_url().await?,
    };
    tracing::debug!(%target, filename = %request.payload.filename, "Uploading edited photo");
    api.upload(&target, &request).await
}
