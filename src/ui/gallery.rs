// SPDX-License-Identifier: MPL-2.0
//! Grid of remote photos.
//!
//! The list is fetched once at startup (or on an explicit reload). Each cell
//! then downloads its own bytes; the first successful download is kept for
//! the lifetime of the list and reused by the viewer.

use crate::api::ImageRecord;
use crate::app::config::{GRID_CELL_SIZE, MAX_GRID_COLUMNS};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, radius, spacing, typography};
use iced::widget::{
    button, container, image, responsive, scrollable, text, Column, Container, Row, Text,
};
use iced::{
    alignment::{Horizontal, Vertical},
    Background, Border, ContentFit, Element, Length, Size, Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fetch {
    Idle,
    InFlight,
    Done,
    Failed,
}

/// One grid entry.
#[derive(Debug, Clone)]
pub struct PhotoCell {
    record: ImageRecord,
    url: Option<String>,
    bytes: Option<Vec<u8>>,
    handle: Option<image::Handle>,
    fetch: Fetch,
}

impl PhotoCell {
    #[must_use]
    pub fn new(record: ImageRecord) -> Self {
        let url = record.parsed_url().map(|url| url.to_string());
        Self {
            record,
            url,
            bytes: None,
            handle: None,
            fetch: Fetch::Idle,
        }
    }

    #[must_use]
    pub fn record(&self) -> &ImageRecord {
        &self.record
    }

    /// Normalized URL, `None` when the record URL is malformed.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Marks the cell as downloading and returns the URL to fetch.
    ///
    /// Returns `None` when a download already ran or the URL is unusable.
    pub fn begin_fetch(&mut self) -> Option<String> {
        if self.fetch != Fetch::Idle || self.bytes.is_some() {
            return None;
        }
        let url = self.url.clone()?;
        self.fetch = Fetch::InFlight;
        Some(url)
    }

    /// Stores downloaded bytes once. Results for another URL are dropped.
    pub fn store_bytes(&mut self, url: &str, bytes: Vec<u8>) -> bool {
        if self.url.as_deref() != Some(url) || self.bytes.is_some() {
            return false;
        }
        self.handle = Some(image::Handle::from_bytes(bytes.clone()));
        self.bytes = Some(bytes);
        self.fetch = Fetch::Done;
        true
    }

    fn mark_failed(&mut self, url: &str) {
        if self.url.as_deref() == Some(url) && self.bytes.is_none() {
            self.fetch = Fetch::Failed;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Loading,
    Ready,
    Failed(Error),
}

#[derive(Debug, Clone)]
pub struct State {
    status: Status,
    cells: Vec<PhotoCell>,
    columns: u16,
    /// i18n key of a startup problem shown under the title.
    notice: Option<String>,
}

impl State {
    #[must_use]
    pub fn new(columns: u16) -> Self {
        Self {
            status: Status::Loading,
            cells: Vec::new(),
            columns: columns.max(1),
            notice: None,
        }
    }

    pub fn set_notice(&mut self, key: impl Into<String>) {
        self.notice = Some(key.into());
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Columns for a grid of `size`: landscape doubles the configured count.
    #[must_use]
    pub fn columns_for(&self, size: Size) -> u16 {
        if size.width > size.height {
            self.columns.saturating_mul(2).min(MAX_GRID_COLUMNS)
        } else {
            self.columns
        }
    }

    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[must_use]
    pub fn cells(&self) -> &[PhotoCell] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&PhotoCell> {
        self.cells.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn start_fetches(&mut self) -> Vec<(usize, String)> {
        self.cells
            .iter_mut()
            .enumerate()
            .filter_map(|(index, cell)| cell.begin_fetch().map(|url| (index, url)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    ListLoaded(Result<Vec<ImageRecord>, Error>),
    CellLoaded {
        index: usize,
        url: String,
        result: Result<Vec<u8>, Error>,
    },
    CellPressed(usize),
    ReloadPressed,
}

/// Requests for the parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    FetchList,
    /// Download bytes for each `(index, url)`.
    FetchCells(Vec<(usize, String)>),
    OpenViewer(usize),
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::ListLoaded(Ok(records)) => {
            let skipped = records
                .iter()
                .filter(|record| record.parsed_url().is_none())
                .count();
            if skipped > 0 {
                tracing::debug!(skipped, "Image records with malformed URLs");
            }
            state.cells = records.into_iter().map(PhotoCell::new).collect();
            state.status = Status::Ready;
            Event::FetchCells(state.start_fetches())
        }
        Message::ListLoaded(Err(error)) => {
            tracing::error!(%error, "Failed to fetch image list");
            state.status = Status::Failed(error);
            Event::None
        }
        Message::CellLoaded { index, url, result } => {
            let Some(cell) = state.cells.get_mut(index) else {
                return Event::None;
            };
            match result {
                Ok(bytes) => {
                    if !cell.store_bytes(&url, bytes) {
                        tracing::debug!(index, %url, "Dropping stale image bytes");
                    }
                }
                Err(error) => {
                    tracing::warn!(index, %url, %error, "Failed to download image");
                    cell.mark_failed(&url);
                }
            }
            Event::None
        }
        Message::CellPressed(index) if index < state.cells.len() => Event::OpenViewer(index),
        Message::CellPressed(_) => Event::None,
        Message::ReloadPressed => {
            state.status = Status::Loading;
            state.cells.clear();
            Event::FetchList
        }
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let title = Text::new(ctx.i18n.tr("gallery-title")).size(typography::TITLE_LG);

    let body: Element<'_, Message> = match ctx.state.status() {
        Status::Loading => centered(Text::new(ctx.i18n.tr("gallery-loading")).into()),
        Status::Failed(error) => {
            let reason = ctx.i18n.tr(error.i18n_key());
            let message = ctx
                .i18n
                .tr_with_args("gallery-load-error", &[("reason", reason.as_str())]);
            let content = Column::new()
                .spacing(spacing::SM)
                .align_x(Horizontal::Center)
                .push(Text::new(message).color(palette::ERROR_500))
                .push(button(text(ctx.i18n.tr("gallery-reload"))).on_press(Message::ReloadPressed));
            centered(content.into())
        }
        Status::Ready if ctx.state.is_empty() => {
            let content = Column::new()
                .spacing(spacing::SM)
                .align_x(Horizontal::Center)
                .push(Text::new(ctx.i18n.tr("gallery-empty")))
                .push(button(text(ctx.i18n.tr("gallery-reload"))).on_press(Message::ReloadPressed));
            centered(content.into())
        }
        Status::Ready => {
            let ViewContext { i18n, state } = ctx;
            responsive(move |size| grid(i18n, state, state.columns_for(size))).into()
        }
    };

    let mut column = Column::new().spacing(spacing::MD).padding(spacing::MD).push(title);
    if let Some(key) = ctx.state.notice() {
        column = column.push(
            Text::new(ctx.i18n.tr(key))
                .size(typography::CAPTION)
                .color(palette::ERROR_500),
        );
    }
    column.push(body).into()
}

fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn grid<'a>(i18n: &I18n, state: &'a State, columns: u16) -> Element<'a, Message> {
    let columns = usize::from(columns.max(1));
    let mut rows = Column::new().spacing(spacing::XS);

    for (row_index, chunk) in state.cells().chunks(columns).enumerate() {
        let mut row = Row::new().spacing(spacing::XS);
        for (offset, cell) in chunk.iter().enumerate() {
            row = row.push(cell_view(i18n, row_index * columns + offset, cell));
        }
        for _ in chunk.len()..columns {
            row = row.push(Container::new(Text::new("")).width(Length::Fill));
        }
        rows = rows.push(row);
    }

    scrollable(rows).height(Length::Fill).into()
}

fn cell_view<'a>(i18n: &I18n, index: usize, cell: &'a PhotoCell) -> Element<'a, Message> {
    let preview: Element<'a, Message> = if let Some(handle) = &cell.handle {
        image(handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fixed(GRID_CELL_SIZE))
            .into()
    } else if cell.url.is_none() || cell.fetch == Fetch::Failed {
        placeholder(i18n.tr("gallery-cell-unavailable"))
    } else {
        placeholder(i18n.tr("gallery-cell-loading"))
    };

    let caption = Text::new(i18n.tr_with_args(
        "gallery-cell-created",
        &[("date", cell.record().created_label().as_str())],
    ))
    .size(typography::CAPTION);

    let content = Column::new().spacing(spacing::XXS).push(preview).push(caption);

    let tile = button(content)
        .padding(0)
        .width(Length::Fill)
        .style(button::text);
    let tile = if cell.bytes.is_some() {
        tile.on_press(Message::CellPressed(index))
    } else {
        tile
    };
    tile.into()
}

fn placeholder<'a>(label: String) -> Element<'a, Message> {
    container(Text::new(label).size(typography::CAPTION).color(palette::GRAY_200))
        .width(Length::Fill)
        .height(Length::Fixed(GRID_CELL_SIZE))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(palette::GRAY_700)),
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}
