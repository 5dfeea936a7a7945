//! Guarantor assessment form rendering
//!
//! Turns submitted form data into a paginated A4 PDF:
//!
//! 1. [`ordering`] flattens the form into label/value pairs in a fixed order
//! 2. [`format`] applies the date/currency format each field is annotated with
//! 3. [`layout`] wraps values and breaks pages
//! 4. [`document`] adds the title block and logo and writes the PDF
//!
//! ```text
//! FormRecord -> OrderedPair* -> FormattedPair* -> PageLayout* -> PDF bytes
//! ```

pub mod document;
pub mod error;
pub mod fields;
pub mod format;
pub mod layout;
pub mod logo;
pub mod ordering;
pub mod record;

pub use document::{DocumentAssembler, RenderedDocument, DEFAULT_TITLE};
pub use error::{LogoError, RenderError};
pub use fields::{FieldFormat, FieldSpec, GroupKind, TopLevelField, FIELD_ORDER};
pub use format::{format_currency, format_date, format_pairs, FormattedPair};
pub use layout::{LayoutConfig, PageCursor, PageLayout, Paginator, PlacedText};
pub use logo::{load_logo, LogoImage};
pub use ordering::{order_fields, OrderedPair};
pub use record::{FieldValue, FormRecord, GroupRecord};

/// File name given to the rendered form when it is attached to an email
pub const DOCUMENT_FILE_NAME: &str = "Guarantor-Assessment-Form.pdf";

/// Render a form on A4 with the default title.
pub fn render_form(
    form: &FormRecord,
    logo: Option<LogoImage>,
) -> Result<RenderedDocument, RenderError> {
    let pairs = format_pairs(&order_fields(form));
    DocumentAssembler::new(LayoutConfig::default())
        .with_logo(logo)
        .render(&pairs)
}
