//! End-to-end rendering tests: form data in, parsed PDF out.

use assessment_pdf::{
    order_fields, render_form, DocumentAssembler, FieldValue, FormRecord, FormattedPair,
    GroupRecord, LayoutConfig, LogoImage,
};
use lopdf::content::Content;
use lopdf::{Document, Object};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

struct TextRun {
    x: f32,
    text: String,
}

/// Every Tj string per page, with the x of the preceding Td.
fn page_runs(bytes: &[u8]) -> Vec<Vec<TextRun>> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|page_id| {
            let content = Content::decode(&doc.get_page_content(*page_id).unwrap()).unwrap();
            let mut x = 0.0;
            let mut runs = Vec::new();
            for op in &content.operations {
                match op.operator.as_str() {
                    "Td" => x = op.operands[0].as_float().unwrap(),
                    "Tj" => {
                        if let Object::String(bytes, _) = &op.operands[0] {
                            runs.push(TextRun {
                                x,
                                text: String::from_utf8_lossy(bytes).into_owned(),
                            });
                        }
                    }
                    _ => {}
                }
            }
            runs
        })
        .collect()
}

fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    page_runs(bytes)
        .into_iter()
        .map(|runs| runs.into_iter().map(|r| r.text).collect())
        .collect()
}

fn collateral(kind: &str, value: &str) -> GroupRecord {
    let mut item = GroupRecord::new();
    item.insert("Collateral Type".into(), kind.into());
    item.insert("Collateral Desc of item".into(), "Silver, 2015 model".into());
    item.insert("Collateral Year of Purchase".into(), "2015".into());
    item.insert("Collateral Purchase Value".into(), value.into());
    item.insert("Collateral Market Value".into(), value.into());
    item.insert("Collateral Liquidation Value".into(), "250000".into());
    item
}

fn sample_form() -> FormRecord {
    let mut form = FormRecord::new();
    form.insert_text("Collateral Owner", "Adaeze Okafor");
    form.insert_groups("Collateral", vec![collateral("Car", "1500000")]);
    form.insert_text("Inventory Market Value", "320000");
    form.insert_text("Collateral Owner Signature Date", "2024-01-05");
    form.insert_text("Witness Name", "Tunde Bakare");
    form.insert_text("Foo", "bar");
    form
}

#[test]
fn test_first_page_starts_with_title_then_fields_in_order() {
    let rendered = render_form(&sample_form(), None).unwrap();
    let pages = page_texts(&rendered.bytes);

    assert_eq!(pages[0][0], "Guarantor Assessment Form");
    assert_eq!(pages[0][1], "Collateral Owner:  Adaeze Okafor");
    assert_eq!(pages[0][2], "Collateral Type:  Car");
}

#[test]
fn test_values_are_formatted_by_field() {
    let rendered = render_form(&sample_form(), None).unwrap();
    let all: Vec<String> = page_texts(&rendered.bytes).concat();

    assert!(all.contains(&"Collateral Purchase Value:  1,500,000".to_string()));
    assert!(all.contains(&"Inventory Market Value:  320,000".to_string()));
    assert!(all.contains(&"Collateral Owner Signature Date:  05/01/2024".to_string()));
    assert!(all.contains(&"Witness Name:  Tunde Bakare".to_string()));
}

#[test]
fn test_unknown_fields_never_reach_the_document() {
    let rendered = render_form(&sample_form(), None).unwrap();
    let all = page_texts(&rendered.bytes).concat();
    assert!(all.iter().all(|line| !line.contains("Foo") && !line.contains("bar")));
}

#[test]
fn test_many_groups_spill_onto_more_pages_without_splitting() {
    let mut form = sample_form();
    let items = (0..8).map(|i| collateral(&format!("Item {}", i), "1000")).collect();
    form.insert_groups("Collateral", items);

    let rendered = render_form(&form, None).unwrap();
    assert!(rendered.page_count >= 2);

    let pages = page_texts(&rendered.bytes);
    assert_eq!(pages.len(), rendered.page_count);
    // continuation pages start with a labelled line, never a wrapped tail
    for page in &pages[1..] {
        assert!(page[0].contains(":  "), "page starts mid-block: {:?}", page[0]);
    }
}

#[test]
fn test_wrapped_value_continues_at_label_indent() {
    let mut form = FormRecord::new();
    form.insert_text(
        "Others",
        "The guarantor also pledges household furniture, two deep freezers, a \
         standing generator and stock held at the Yaba warehouse as further security.",
    );
    let rendered = render_form(&form, None).unwrap();
    let runs = page_runs(&rendered.bytes).remove(0);

    let start = runs
        .iter()
        .position(|r| r.text.starts_with("Others:  "))
        .unwrap();
    let first = &runs[start];
    let second = &runs[start + 1];
    assert!(!second.text.contains(':'));
    assert!(second.x > first.x);

    let indent_pt = assessment_pdf::layout::Font::Helvetica.text_width("Others:  ", 16.0)
        / assessment_pdf::layout::MM_PER_PT;
    assert!((second.x - first.x - indent_pt).abs() < 0.05);
}

#[test]
fn test_logo_is_drawn_on_first_page_only() {
    let mut png_bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_bytes, 2, 2);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0u8; 12]).unwrap();
    }
    let logo = LogoImage::from_bytes(&png_bytes).unwrap();

    let pairs: Vec<FormattedPair> = (0..60)
        .map(|i| FormattedPair {
            label: format!("Line {}", i),
            value: "x".to_string(),
        })
        .collect();
    let rendered = DocumentAssembler::new(LayoutConfig::default())
        .with_logo(Some(logo))
        .render(&pairs)
        .unwrap();
    assert!(rendered.page_count > 1);

    let doc = Document::load_mem(&rendered.bytes).unwrap();
    let do_counts: Vec<usize> = doc
        .get_pages()
        .values()
        .map(|id| {
            Content::decode(&doc.get_page_content(*id).unwrap())
                .unwrap()
                .operations
                .iter()
                .filter(|op| op.operator == "Do")
                .count()
        })
        .collect();
    assert_eq!(do_counts[0], 1);
    assert!(do_counts[1..].iter().all(|&n| n == 0));
}

#[test]
fn test_title_only_on_first_page() {
    let pairs: Vec<FormattedPair> = (0..60)
        .map(|i| FormattedPair {
            label: format!("Line {}", i),
            value: "x".to_string(),
        })
        .collect();
    let rendered = DocumentAssembler::new(LayoutConfig::default())
        .render(&pairs)
        .unwrap();
    let pages = page_texts(&rendered.bytes);
    assert_eq!(pages[0][0], "Guarantor Assessment Form");
    assert_eq!(pages[1][0], format!("Line {}:  x", pages[0].len() - 1));
}

fn scalar_entries() -> Vec<(String, FieldValue)> {
    [
        ("Collateral Owner", "Ada"),
        ("HG", "hg"),
        ("BA", "ba"),
        ("INV", "inv"),
        ("Witness Name", "Bola"),
        ("Witness Signature Date", "2023-11-30"),
        ("Sales", "ignored"),
        ("Unknown", "ignored"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), FieldValue::Text(v.to_string())))
    .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ordering_ignores_input_key_order(
        entries in Just(scalar_entries()).prop_shuffle()
    ) {
        let shuffled: FormRecord = entries.into_iter().collect();
        let reference: FormRecord = scalar_entries().into_iter().collect();
        prop_assert_eq!(order_fields(&shuffled), order_fields(&reference));
    }

    #[test]
    fn pair_count_depends_only_on_group_sizes(groups in 0usize..5) {
        let mut form = FormRecord::new();
        form.insert_groups("Collateral", vec![GroupRecord::new(); groups]);
        form.insert_groups("Vehicle Mortgage", vec![]);
        form.insert_groups("Land & Building Mortgage", vec![]);
        // 13 scalars plus six lines per collateral item
        prop_assert_eq!(order_fields(&form).len(), 13 + 6 * groups);
    }

    #[test]
    fn currency_grouping_preserves_digits(n in any::<u64>()) {
        let formatted = assessment_pdf::format_currency(&n.to_string());
        prop_assert_eq!(formatted.replace(',', ""), n.to_string());
        for (i, group) in formatted.split(',').enumerate() {
            if i == 0 {
                prop_assert!(!group.is_empty() && group.len() <= 3);
            } else {
                prop_assert_eq!(group.len(), 3);
            }
        }
    }

    #[test]
    fn iso_dates_become_day_month_year(days in 0i64..60_000) {
        let date = chrono::NaiveDate::from_ymd_opt(1950, 1, 1).unwrap()
            + chrono::Duration::days(days);
        let formatted = assessment_pdf::format_date(&date.format("%Y-%m-%d").to_string());
        prop_assert_eq!(formatted, date.format("%d/%m/%Y").to_string());
    }
}
