//! PDF assembly for the guarantor assessment form
//!
//! Drives the paginator over the formatted pairs, adds the first-page title
//! block and logo, and serializes every page with lopdf.

use crate::error::RenderError;
use crate::format::FormattedPair;
use crate::layout::{
    layout_pairs, winansi_byte, Font, LayoutConfig, PageLayout, PlacedText, MM_PER_PT,
};
use crate::logo::LogoImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::{debug, info};

pub const DEFAULT_TITLE: &str = "Guarantor Assessment Form";

const TITLE_FONT_SIZE: f32 = 24.0;
const TITLE_BASELINE: f32 = 20.0;
const RULE_OFFSET: f32 = 2.0;
const RULE_WIDTH: f32 = 0.5;
const LOGO_SIZE: f32 = 20.0;
const LOGO_TOP: f32 = 5.0;
/// Logo left edge sits this far left of the right end of the content area
const LOGO_INSET: f32 = 16.0;

const LOGO_RESOURCE: &str = "Im1";

/// A rendered PDF and its page count.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub struct DocumentAssembler {
    config: LayoutConfig,
    title: String,
    logo: Option<LogoImage>,
}

impl DocumentAssembler {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            title: DEFAULT_TITLE.to_string(),
            logo: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Attach the header logo; `None` renders without one.
    pub fn with_logo(mut self, logo: Option<LogoImage>) -> Self {
        self.logo = logo;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Title position as (x, baseline y, width) in millimetres
    pub fn title_geometry(&self) -> (f32, f32, f32) {
        let width = Font::HelveticaBold.text_width(&self.title, TITLE_FONT_SIZE);
        let x = (self.config.page_width - width) / 2.0;
        (x, TITLE_BASELINE, width)
    }

    /// Logo box as (x, top y, width, height) in millimetres
    pub fn logo_geometry(&self) -> (f32, f32, f32, f32) {
        (
            self.config.content_width() - LOGO_INSET,
            LOGO_TOP,
            LOGO_SIZE,
            LOGO_SIZE,
        )
    }

    /// Lay out `pairs` and produce the PDF.
    pub fn render(&self, pairs: &[FormattedPair]) -> Result<RenderedDocument, RenderError> {
        let pages = layout_pairs(pairs, &self.config);
        let bytes = self.write_pdf(&pages)?;
        info!(
            pairs = pairs.len(),
            pages = pages.len(),
            bytes = bytes.len(),
            "assessment document rendered"
        );
        Ok(RenderedDocument {
            bytes,
            page_count: pages.len(),
        })
    }

    fn write_pdf(&self, pages: &[PageLayout]) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let logo_id = self.logo.as_ref().map(|logo| add_logo_xobject(&mut doc, logo));
        let resources_id = doc.add_object(self.resources(logo_id));

        let (width_pt, height_pt) = (
            to_pt(self.config.page_width),
            to_pt(self.config.page_height),
        );

        let mut page_ids = Vec::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            let mut operations = Vec::new();
            if index == 0 {
                operations.extend(self.furniture(logo_id.is_some()));
            }
            for placed in &page.lines {
                operations.extend(self.text_operations(placed));
            }

            let content = Content { operations }
                .encode()
                .map_err(|e| RenderError::ContentError(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

            let page = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(width_pt),
                        Object::Real(height_pt),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
                ("Resources", Object::Reference(resources_id)),
            ]);
            page_ids.push(doc.add_object(page));
        }

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(page_ids.len() as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let info_id = doc.add_object(Dictionary::from_iter(vec![
            ("Title", Object::String(encode_text(&self.title), StringFormat::Literal)),
            (
                "Producer",
                Object::String(b"assessment-pdf".to_vec(), StringFormat::Literal),
            ),
        ]));
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    fn resources(&self, logo_id: Option<ObjectId>) -> Dictionary {
        let mut fonts = Dictionary::new();
        for font in [Font::Helvetica, Font::HelveticaBold] {
            let font_dict = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Font".to_vec())),
                ("Subtype", Object::Name(b"Type1".to_vec())),
                ("BaseFont", Object::Name(font.base_font().as_bytes().to_vec())),
                ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
            ]);
            fonts.set(font.resource_name(), Object::Dictionary(font_dict));
        }

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        if let Some(id) = logo_id {
            let mut xobjects = Dictionary::new();
            xobjects.set(LOGO_RESOURCE, Object::Reference(id));
            resources.set("XObject", Object::Dictionary(xobjects));
        }
        resources
    }

    /// Title, rule and logo for the first page.
    fn furniture(&self, with_logo: bool) -> Vec<Operation> {
        let (title_x, title_y, title_width) = self.title_geometry();
        let mut ops = self.text_operations(&PlacedText {
            x: title_x,
            y: title_y,
            text: self.title.clone(),
            font: Font::HelveticaBold,
            font_size: TITLE_FONT_SIZE,
        });

        let rule_y = self.to_pdf_y(title_y + RULE_OFFSET);
        ops.extend([
            Operation::new("w", vec![Object::Real(to_pt(RULE_WIDTH))]),
            Operation::new("m", vec![Object::Real(to_pt(title_x)), Object::Real(rule_y)]),
            Operation::new(
                "l",
                vec![Object::Real(to_pt(title_x + title_width)), Object::Real(rule_y)],
            ),
            Operation::new("S", vec![]),
        ]);

        if with_logo {
            let (x, top, width, height) = self.logo_geometry();
            debug!(x, top, "placing logo");
            ops.extend([
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(to_pt(width)),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(to_pt(height)),
                        Object::Real(to_pt(x)),
                        Object::Real(self.to_pdf_y(top + height)),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(LOGO_RESOURCE.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ]);
        }

        ops
    }

    fn text_operations(&self, placed: &PlacedText) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(placed.font.resource_name().as_bytes().to_vec()),
                    Object::Real(placed.font_size),
                ],
            ),
            Operation::new(
                "Td",
                vec![
                    Object::Real(to_pt(placed.x)),
                    Object::Real(self.to_pdf_y(placed.y)),
                ],
            ),
            Operation::new(
                "Tj",
                vec![Object::String(encode_text(&placed.text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]
    }

    /// Millimetres from the top edge to points from the bottom edge
    fn to_pdf_y(&self, y: f32) -> f32 {
        to_pt(self.config.page_height - y)
    }
}

fn to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Encode for WinAnsi fonts; characters the encoding lacks become `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| winansi_byte(ch).unwrap_or(b'?'))
        .collect()
}

fn add_logo_xobject(doc: &mut Document, logo: &LogoImage) -> ObjectId {
    let mut dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(logo.width as i64)),
        ("Height", Object::Integer(logo.height as i64)),
        ("ColorSpace", Object::Name(logo.color_space.as_bytes().to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(logo.filter.pdf_name().as_bytes().to_vec())),
    ]);

    if let Some(mask) = &logo.soft_mask {
        let mask_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Image".to_vec())),
            ("Width", Object::Integer(logo.width as i64)),
            ("Height", Object::Integer(logo.height as i64)),
            ("ColorSpace", Object::Name(b"DeviceGray".to_vec())),
            ("BitsPerComponent", Object::Integer(8)),
            ("Filter", Object::Name(b"FlateDecode".to_vec())),
        ]);
        let mask_id = doc.add_object(Stream::new(mask_dict, mask.clone()));
        dict.set("SMask", Object::Reference(mask_id));
    }

    doc.add_object(Stream::new(dict, logo.data.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(label: &str, value: &str) -> FormattedPair {
        FormattedPair {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_encode_text_replaces_unencodable() {
        assert_eq!(encode_text("Café ₦5"), b"Caf\xe9 ?5".to_vec());
    }

    #[test]
    fn test_encode_text_maps_typographic_punctuation() {
        assert_eq!(
            encode_text("\u{2018}Ada\u{2019}s \u{201C}car\u{201D} \u{2013} \u{20AC}5"),
            b"\x91Ada\x92s \x93car\x94 \x96 \x805".to_vec()
        );
    }

    #[test]
    fn test_encode_text_never_emits_c1_controls_raw() {
        assert_eq!(encode_text("a\u{85}b\u{9f}"), b"a?b?".to_vec());
    }

    #[test]
    fn test_title_is_centred() {
        let assembler = DocumentAssembler::new(LayoutConfig::default());
        let (x, y, width) = assembler.title_geometry();
        assert!((x + width / 2.0 - 105.0).abs() < 1e-3);
        assert_eq!(y, 20.0);
    }

    #[test]
    fn test_logo_sits_top_right() {
        let assembler = DocumentAssembler::new(LayoutConfig::default());
        assert_eq!(assembler.logo_geometry(), (174.0, 5.0, 20.0, 20.0));
    }

    #[test]
    fn test_render_produces_loadable_pdf() {
        let assembler = DocumentAssembler::new(LayoutConfig::default());
        let rendered = assembler
            .render(&[pair("Witness Name", "Bola (junior)")])
            .unwrap();
        assert!(rendered.bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(rendered.page_count, 1);

        let doc = Document::load_mem(&rendered.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_empty_pair_list_still_has_title_page() {
        let assembler = DocumentAssembler::new(LayoutConfig::default());
        let rendered = assembler.render(&[]).unwrap();
        assert_eq!(rendered.page_count, 1);
    }
}
