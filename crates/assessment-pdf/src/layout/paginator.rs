//! Single-column key/value paginator
//!
//! A pass moves through three states. While writing a page the cursor
//! advances one block at a time. When the next block does not fit above the
//! bottom margin the page is closed and a new one opened with the cursor
//! reset (page break). [`Paginator::finish`] consumes the paginator once the
//! last block is written, so nothing can be placed after that.
//!
//! A block is never split across pages and nothing is moved once placed.

use super::metrics::Font;
use super::wrap::wrap_text;
use super::LayoutConfig;
use crate::format::FormattedPair;
use tracing::debug;

/// Current write position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    pub page_index: usize,
    pub y: f32,
}

/// A run of text at a baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: Font,
    pub font_size: f32,
}

/// Text placed on one page, in writing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedText>,
}

/// Where a pair ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairPlacement {
    pub page_index: usize,
    pub y: f32,
    pub line_count: usize,
}

pub struct Paginator<'a> {
    config: &'a LayoutConfig,
    cursor: PageCursor,
    pages: Vec<PageLayout>,
    /// True right after a break, before anything is written
    fresh_page: bool,
}

impl<'a> Paginator<'a> {
    /// Start on the first page, below the title block.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            cursor: PageCursor {
                page_index: 0,
                y: config.first_page_top,
            },
            pages: vec![PageLayout::default()],
            fresh_page: false,
        }
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Write one label/value block.
    ///
    /// The first line carries `"<label>:  "` followed by the value, starting
    /// at the left margin. Continuation lines start at the end of the label
    /// prefix and are wrapped to the same width as the first line.
    pub fn place(&mut self, pair: &FormattedPair) -> PairPlacement {
        let font = Font::Helvetica;
        let size = self.config.body_font_size;

        let prefix = format!("{}:  ", pair.label);
        let prefix_width = font.text_width(&prefix, size);
        let remaining = self.config.content_width() - prefix_width;
        let lines = wrap_text(&pair.value, font, size, remaining);
        let height = lines.len() as f32 * self.config.line_height;

        if self.cursor.y + height > self.config.bottom_limit() && !self.fresh_page {
            self.break_page();
        }

        let placement = PairPlacement {
            page_index: self.cursor.page_index,
            y: self.cursor.y,
            line_count: lines.len(),
        };

        let margin = self.config.margin_x;
        let page = &mut self.pages[self.cursor.page_index];
        for (i, line) in lines.into_iter().enumerate() {
            let (x, text) = if i == 0 {
                (margin, format!("{}{}", prefix, line))
            } else {
                (margin + prefix_width, line)
            };
            page.lines.push(PlacedText {
                x,
                y: self.cursor.y + i as f32 * self.config.line_height,
                text,
                font,
                font_size: size,
            });
        }

        self.cursor.y += height + self.config.line_height;
        self.fresh_page = false;
        placement
    }

    fn break_page(&mut self) {
        debug!(
            page = self.cursor.page_index + 1,
            y = self.cursor.y,
            "page full, starting a new page"
        );
        self.pages.push(PageLayout::default());
        self.cursor = PageCursor {
            page_index: self.cursor.page_index + 1,
            y: self.config.page_top,
        };
        self.fresh_page = true;
    }

    /// Close the pass and hand back every page in writing order.
    pub fn finish(self) -> Vec<PageLayout> {
        self.pages
    }
}

/// Lay out a full sequence of pairs.
pub fn layout_pairs(pairs: &[FormattedPair], config: &LayoutConfig) -> Vec<PageLayout> {
    let mut paginator = Paginator::new(config);
    for pair in pairs {
        paginator.place(pair);
    }
    paginator.finish()
}
