//! Standard Type1 Helvetica metrics
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em for the printable
//! ASCII range. Anything outside that range is measured as a digit.

/// Millimetres per PostScript point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// WinAnsi code points 0x80-0x9F: character, byte, Helvetica and
/// Helvetica-Bold widths
#[rustfmt::skip]
const WINANSI_HIGH: [(char, u8, u16, u16); 27] = [
    ('\u{20AC}', 0x80, 556, 556),  // Euro
    ('\u{201A}', 0x82, 222, 278),  // quotesinglbase
    ('\u{0192}', 0x83, 556, 556),  // florin
    ('\u{201E}', 0x84, 333, 500),  // quotedblbase
    ('\u{2026}', 0x85, 1000, 1000), // ellipsis
    ('\u{2020}', 0x86, 556, 556),  // dagger
    ('\u{2021}', 0x87, 556, 556),  // daggerdbl
    ('\u{02C6}', 0x88, 333, 333),  // circumflex
    ('\u{2030}', 0x89, 1000, 1000), // perthousand
    ('\u{0160}', 0x8A, 667, 667),  // Scaron
    ('\u{2039}', 0x8B, 333, 333),  // guilsinglleft
    ('\u{0152}', 0x8C, 1000, 1000), // OE
    ('\u{017D}', 0x8E, 611, 611),  // Zcaron
    ('\u{2018}', 0x91, 222, 278),  // quoteleft
    ('\u{2019}', 0x92, 222, 278),  // quoteright
    ('\u{201C}', 0x93, 333, 500),  // quotedblleft
    ('\u{201D}', 0x94, 333, 500),  // quotedblright
    ('\u{2022}', 0x95, 350, 350),  // bullet
    ('\u{2013}', 0x96, 556, 556),  // endash
    ('\u{2014}', 0x97, 1000, 1000), // emdash
    ('\u{02DC}', 0x98, 333, 333),  // tilde
    ('\u{2122}', 0x99, 1000, 1000), // trademark
    ('\u{0161}', 0x9A, 500, 556),  // scaron
    ('\u{203A}', 0x9B, 333, 333),  // guilsinglright
    ('\u{0153}', 0x9C, 944, 944),  // oe
    ('\u{017E}', 0x9E, 500, 500),  // zcaron
    ('\u{0178}', 0x9F, 667, 667),  // Ydieresis
];

/// WinAnsiEncoding byte for `ch`, if the encoding has one.
///
/// ASCII and U+00A0-U+00FF map to themselves. The C1 range U+0080-U+009F
/// has no WinAnsi glyph; those byte values hold the punctuation in the
/// table above instead.
pub fn winansi_byte(ch: char) -> Option<u8> {
    match ch as u32 {
        code @ (0x00..=0x7F | 0xA0..=0xFF) => Some(code as u8),
        _ => WINANSI_HIGH
            .iter()
            .find(|(c, ..)| *c == ch)
            .map(|(_, byte, ..)| *byte),
    }
}

/// The one font family used in the document, in its two weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name of the standard font
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name of the font in the page resource dictionary
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Font::Helvetica => &HELVETICA_WIDTHS,
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of a character in 1/1000 em
    pub fn char_units(&self, ch: char) -> u16 {
        let code = ch as u32;
        if (32..=126).contains(&code) {
            return self.widths()[(code - 32) as usize];
        }
        WINANSI_HIGH
            .iter()
            .find(|(c, ..)| *c == ch)
            .map(|&(_, _, regular, bold)| match self {
                Font::Helvetica => regular,
                Font::HelveticaBold => bold,
            })
            .unwrap_or(FALLBACK_WIDTH)
    }

    /// Width of a single character in millimetres at `font_size` points
    pub fn char_width(&self, ch: char, font_size: f32) -> f32 {
        self.char_units(ch) as f32 / 1000.0 * font_size * MM_PER_PT
    }

    /// Width of `text` in millimetres at `font_size` points
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| self.char_units(ch) as u32).sum();
        units as f32 / 1000.0 * font_size * MM_PER_PT
    }
}
