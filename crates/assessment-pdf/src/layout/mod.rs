//! Page geometry, text measurement and pagination
//!
//! All positions are millimetres from the top-left corner of the page. The
//! assembler converts them to PDF user space when it writes content streams.

pub mod metrics;
pub mod paginator;
pub mod wrap;

pub use metrics::{winansi_byte, Font, MM_PER_PT};
pub use paginator::{layout_pairs, PageCursor, PageLayout, Paginator, PairPlacement, PlacedText};
pub use wrap::wrap_text;

/// Fixed page geometry for one rendering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Left and right margin
    pub margin_x: f32,
    pub bottom_margin: f32,
    /// Cursor start on the first page, below the title block
    pub first_page_top: f32,
    /// Cursor start on every following page
    pub page_top: f32,
    pub line_height: f32,
    /// Body text size in points
    pub body_font_size: f32,
}

impl Default for LayoutConfig {
    /// A4 portrait
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_x: 10.0,
            bottom_margin: 10.0,
            first_page_top: 37.0,
            page_top: 20.0,
            line_height: 7.0,
            body_font_size: 16.0,
        }
    }
}

impl LayoutConfig {
    /// Width between the left and right margins
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin_x
    }

    /// Lowest y a block may reach
    pub fn bottom_limit(&self) -> f32 {
        self.page_height - self.bottom_margin
    }
}
