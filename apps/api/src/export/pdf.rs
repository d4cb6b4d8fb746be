//! Text-only PDF backend built on `pdf-writer`.
//!
//! Uses the four base-14 Helvetica faces with WinAnsi encoding, so no font files are
//! embedded. Content streams are left uncompressed.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{Datelike, Timelike, Utc};
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::{debug, info};

use crate::export::compose::{compose, Composition, Op, Rgb};
use crate::export::font_metrics::Face;
use crate::export::{
    export_filename, DocumentExporter, ExportArtifact, ExportError, ExportOptions,
    PDF_CONTENT_TYPE,
};
use crate::layout::tree::VisualTree;

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

pub struct PdfExporter;

#[async_trait]
impl DocumentExporter for PdfExporter {
    async fn export(
        &self,
        tree: &VisualTree,
        full_name: &str,
        options: &ExportOptions,
    ) -> Result<ExportArtifact, ExportError> {
        // Composition is CPU-bound; keep it off the async workers.
        let tree = tree.clone();
        let options = *options;
        let title = full_name.trim().to_string();
        let bytes = tokio::task::spawn_blocking(move || render_pdf(&tree, &title, &options))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))??;

        let filename = export_filename(full_name);
        info!(filename = %filename, size = bytes.len(), "PDF exported");
        Ok(ExportArtifact {
            filename,
            content_type: PDF_CONTENT_TYPE,
            bytes: Bytes::from(bytes),
        })
    }
}

/// Composes `tree` and serializes it as a complete PDF file.
pub fn render_pdf(
    tree: &VisualTree,
    title: &str,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let composition = compose(tree, options)?;
    debug!(
        template = tree.template.as_str(),
        pages = composition.pages.len(),
        "Composed document"
    );
    Ok(write_pdf(&composition, title, options.raster_scale))
}

fn write_pdf(composition: &Composition, title: &str, raster_scale: f32) -> Vec<u8> {
    let page_h = composition.page_height_pt;
    let grid = Grid {
        scale: raster_scale,
        page_h,
    };

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let info_id = alloc.bump();
    let font_ids: Vec<(Face, Ref)> = Face::ALL.iter().map(|face| (*face, alloc.bump())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);

    let mut page_ids = Vec::with_capacity(composition.pages.len());
    for ops in &composition.pages {
        let page_id = alloc.bump();
        let content_id = alloc.bump();
        page_ids.push(page_id);

        let links: Vec<(Ref, &Op)> = ops
            .iter()
            .filter(|op| matches!(op, Op::Link { .. }))
            .map(|op| (alloc.bump(), op))
            .collect();

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, composition.page_width_pt, page_h));
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (face, id) in &font_ids {
                fonts.pair(Name(face.resource_name()), *id);
            }
        }
        if !links.is_empty() {
            page.annotations(links.iter().map(|(id, _)| *id));
        }
        page.finish();

        for (id, op) in &links {
            if let Op::Link { x, y, w, h, href } = op {
                let mut annotation = pdf.annotation(*id);
                annotation.subtype(AnnotationType::Link);
                annotation.rect(Rect::new(
                    grid.x(*x),
                    grid.y(*y + *h),
                    grid.x(*x + *w),
                    grid.y(*y),
                ));
                annotation
                    .action()
                    .action_type(ActionType::Uri)
                    .uri(Str(href.as_bytes()));
            }
        }

        pdf.stream(content_id, &page_content(ops, &grid));
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    for (face, id) in &font_ids {
        pdf.type1_font(*id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let title = if title.is_empty() { "Resume" } else { title };
    let mut document_info = pdf.document_info(info_id);
    document_info.title(TextStr(title));
    document_info.producer(TextStr(concat!("resume-api ", env!("CARGO_PKG_VERSION"))));
    document_info.creation_date(pdf_date());
    document_info.finish();

    pdf.finish()
}

/// Converts top-down points to PDF user space, snapped to the raster grid.
struct Grid {
    scale: f32,
    page_h: f32,
}

impl Grid {
    fn snap(&self, v: f32) -> f32 {
        (v * self.scale).round() / self.scale
    }

    fn x(&self, x: f32) -> f32 {
        self.snap(x)
    }

    fn y(&self, y: f32) -> f32 {
        self.snap(self.page_h - y)
    }
}

fn page_content(ops: &[Op], grid: &Grid) -> Vec<u8> {
    let mut content = Content::new();
    for op in ops {
        match op {
            Op::Text {
                x,
                baseline,
                face,
                size,
                color,
                text,
            } => {
                set_fill(&mut content, *color);
                content.begin_text();
                content.set_font(Name(face.resource_name()), *size);
                content.set_text_matrix([1.0, 0.0, 0.0, 1.0, grid.x(*x), grid.y(*baseline)]);
                content.show(Str(&encode_win_ansi(text)));
                content.end_text();
            }
            Op::Rect {
                x,
                y,
                w,
                h,
                fill,
                stroke,
            } => {
                if let Some(color) = fill {
                    set_fill(&mut content, *color);
                }
                if let Some(color) = stroke {
                    set_stroke(&mut content, *color, 0.75);
                }
                content.rect(grid.x(*x), grid.y(*y + *h), grid.snap(*w), grid.snap(*h));
                match (fill, stroke) {
                    (Some(_), Some(_)) => content.fill_nonzero_and_stroke(),
                    (Some(_), None) => content.fill_nonzero(),
                    (None, Some(_)) => content.stroke(),
                    (None, None) => content.end_path(),
                };
            }
            Op::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                set_stroke(&mut content, *color, *width);
                content.move_to(grid.x(*x1), grid.y(*y1));
                content.line_to(grid.x(*x2), grid.y(*y2));
                content.stroke();
            }
            Op::Dot {
                cx,
                cy,
                r,
                color,
                filled,
            } => {
                if *filled {
                    set_fill(&mut content, *color);
                } else {
                    set_stroke(&mut content, *color, 1.5);
                }
                circle(&mut content, grid.x(*cx), grid.y(*cy), *r);
                if *filled {
                    content.fill_nonzero();
                } else {
                    content.stroke();
                }
            }
            // Written as page annotations.
            Op::Link { .. } => {}
        }
    }
    content.finish()
}

fn set_fill(content: &mut Content, color: Rgb) {
    content.set_fill_rgb(color.r, color.g, color.b);
}

fn set_stroke(content: &mut Content, color: Rgb, width: f32) {
    content.set_stroke_rgb(color.r, color.g, color.b);
    content.set_line_width(width);
}

/// Closed circle path from four cubic segments.
fn circle(content: &mut Content, cx: f32, cy: f32, r: f32) {
    let k = r * KAPPA;
    content.move_to(cx + r, cy);
    content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    content.close_path();
}

/// Encodes text for the WinAnsi base fonts. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\u{a0}'..='\u{ff}' => c as u8,
            _ => b'?',
        })
        .collect()
}

fn pdf_date() -> Date {
    let now = Utc::now();
    Date::new(u16::try_from(now.year()).unwrap_or(1970))
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(0)
}
