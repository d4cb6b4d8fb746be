//! Page composition: places a `VisualTree` onto fixed-size pages.
//!
//! Regions sharing an x position form one lane (a page-height column). Every node in a
//! lane becomes a run of blocks, each one unbreakable line or strip, and lanes are
//! paginated independently. The document has as many pages as its longest lane.
//! Coordinates here are points measured from the page's top-left corner; the PDF writer
//! flips them.

use crate::export::font_metrics::{get_metrics, Face};
use crate::export::wrap::wrap_lines;
use crate::export::{ExportError, ExportOptions};
use crate::layout::tree::{
    ContactItem, Entry, Heading, Node, Region, TextStyle, VisualTree, FAINT, INK, MUTED, WHITE,
};

pub const MM_TO_PT: f32 = 72.0 / 25.4;

const LINE_SPACING: f32 = 1.3;
/// Baseline position inside a line box, as a fraction of the font size.
const BASELINE: f32 = 0.95;
const LINK_BLUE: &str = "#1d4ed8";
const CARD_FILL: &str = "#f9fafb";
const CHIP_FILL: &str = "#f3f4f6";
const REGION_GAP_PT: f32 = 14.0;
const GRID_GUTTER_PT: f32 = 24.0;
const META_SIZE_PT: f32 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`. Alpha is ignored.
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits[..6].to_string(),
            _ => return None,
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .ok()
                .map(|v| f32::from(v) / 255.0)
        };
        Some(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    fn or_ink(hex: &str) -> Self {
        Rgb::parse(hex)
            .or_else(|| Rgb::parse(INK))
            .unwrap_or(Rgb { r: 0.0, g: 0.0, b: 0.0 })
    }
}

/// One drawing instruction in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Text {
        x: f32,
        baseline: f32,
        face: Face,
        size: f32,
        color: Rgb,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    Dot {
        cx: f32,
        cy: f32,
        r: f32,
        color: Rgb,
        filled: bool,
    },
    /// Clickable area pointing at `href`.
    Link {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        href: String,
    },
}

impl Op {
    fn shifted(mut self, dy: f32) -> Op {
        match &mut self {
            Op::Text { baseline, .. } => *baseline += dy,
            Op::Rect { y, .. } | Op::Link { y, .. } => *y += dy,
            Op::Line { y1, y2, .. } => {
                *y1 += dy;
                *y2 += dy;
            }
            Op::Dot { cy, .. } => *cy += dy,
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub pages: Vec<Vec<Op>>,
}

/// Lays `tree` out on pages described by `options`.
pub fn compose(tree: &VisualTree, options: &ExportOptions) -> Result<Composition, ExportError> {
    options.validate()?;
    if tree.is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let page_w = options.page_width_mm * MM_TO_PT;
    let page_h = options.page_height_mm * MM_TO_PT;
    let margin = options.margin_mm * MM_TO_PT;
    let scale = (page_w - 2.0 * margin) / (tree.page_width_mm * MM_TO_PT);
    let composer = Composer {
        accent: Rgb::or_ink(&tree.accent),
    };

    let mut backgrounds = Vec::new();
    let mut lane_pages = Vec::new();
    for lane in lanes(tree) {
        let first = lane[0];
        let x = margin + first.x_mm * MM_TO_PT * scale;
        let width = first.width_mm * MM_TO_PT * scale;
        let pad = first.padding_mm * MM_TO_PT;

        if let Some(fill) = first.background.as_deref().and_then(Rgb::parse) {
            backgrounds.push(Op::Rect {
                x,
                y: margin,
                w: width,
                h: page_h - 2.0 * margin,
                fill: Some(fill),
                stroke: None,
            });
        }

        let mut blocks = Vec::new();
        for (i, region) in lane.iter().enumerate() {
            if i > 0 {
                blocks.push(Block::gap(REGION_GAP_PT));
            }
            let inset = region.padding_mm * MM_TO_PT;
            let pen = Pen {
                x: x + inset,
                width: (width - 2.0 * inset).max(1.0),
            };
            blocks.extend(composer.region(region, pen));
        }
        lane_pages.push(paginate(blocks, margin + pad, page_h - margin - pad));
    }

    let count = lane_pages.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let mut pages: Vec<Vec<Op>> = (0..count).map(|_| backgrounds.clone()).collect();
    for lane in lane_pages {
        for (page, ops) in pages.iter_mut().zip(lane) {
            page.extend(ops);
        }
    }

    Ok(Composition {
        page_width_pt: page_w,
        page_height_pt: page_h,
        pages,
    })
}

/// Groups regions by x position, keeping first-appearance order.
fn lanes(tree: &VisualTree) -> Vec<Vec<&Region>> {
    let mut lanes: Vec<Vec<&Region>> = Vec::new();
    for region in &tree.regions {
        match lanes
            .iter_mut()
            .find(|lane| (lane[0].x_mm - region.x_mm).abs() < 0.01)
        {
            Some(lane) => lane.push(region),
            None => lanes.push(vec![region]),
        }
    }
    lanes
}

/// Stacks blocks top to bottom, starting a new page when the next block does not fit.
/// Gaps are dropped at the top of a page.
fn paginate(blocks: Vec<Block>, top: f32, bottom: f32) -> Vec<Vec<Op>> {
    let mut pages = vec![Vec::new()];
    let mut cursor = top;

    for block in blocks {
        let at_top = cursor <= top;
        if block.gap && at_top {
            continue;
        }
        if !block.gap && !at_top && cursor + block.height > bottom {
            pages.push(Vec::new());
            cursor = top;
        }
        if let Some(page) = pages.last_mut() {
            page.extend(block.ops.into_iter().map(|op| op.shifted(cursor)));
        }
        cursor += block.height;
    }
    pages
}

/// An unbreakable strip. Ops are relative to the strip's top edge.
#[derive(Debug, Clone, Default)]
struct Block {
    height: f32,
    ops: Vec<Op>,
    /// Pure spacing, dropped at the top of a page.
    gap: bool,
}

impl Block {
    fn new(height: f32, ops: Vec<Op>) -> Self {
        Self {
            height,
            ops,
            gap: false,
        }
    }

    fn gap(height: f32) -> Self {
        Self {
            height,
            ops: Vec::new(),
            gap: true,
        }
    }

    fn glue(mut self, next: Block) -> Block {
        let dy = self.height;
        self.ops.extend(next.ops.into_iter().map(|op| op.shifted(dy)));
        self.height += next.height;
        self.gap = false;
        self
    }
}

/// Glues `head` to the first non-gap block of `rest` so a heading never ends a page.
fn keep_together(head: Vec<Block>, rest: Vec<Block>) -> Vec<Block> {
    if head.is_empty() {
        return rest;
    }
    let mut rest = rest.into_iter();
    let mut merged = head.into_iter().fold(Block::new(0.0, Vec::new()), Block::glue);
    for next in rest.by_ref() {
        let was_gap = next.gap;
        merged = merged.glue(next);
        if !was_gap {
            break;
        }
    }
    let mut out = vec![merged];
    out.extend(rest);
    out
}

/// Merges per-column block runs row by row.
fn zip_columns(columns: Vec<Vec<Block>>) -> Vec<Block> {
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    let mut columns: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
    (0..rows)
        .map(|_| {
            let mut merged = Block::gap(0.0);
            for column in columns.iter_mut() {
                if let Some(block) = column.next() {
                    merged.height = merged.height.max(block.height);
                    merged.gap &= block.gap;
                    merged.ops.extend(block.ops);
                }
            }
            merged
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Pen {
    x: f32,
    width: f32,
}

impl Pen {
    fn indent(self, dx: f32) -> Pen {
        Pen {
            x: self.x + dx,
            width: (self.width - dx).max(1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// A resolved text style.
#[derive(Debug, Clone, Copy)]
struct Ink {
    face: Face,
    size: f32,
    color: Rgb,
    uppercase: bool,
}

impl Ink {
    fn from_style(style: &TextStyle) -> Self {
        Ink {
            face: Face::new(style.bold, style.italic),
            size: style.size_pt,
            color: Rgb::or_ink(&style.color),
            uppercase: style.uppercase,
        }
    }

    fn plain(size: f32, color: &str) -> Self {
        Ink {
            face: Face::Regular,
            size,
            color: Rgb::or_ink(color),
            uppercase: false,
        }
    }

    fn prepare(&self, text: &str) -> String {
        if self.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }

    fn measure(&self, text: &str) -> f32 {
        get_metrics(self.face).measure(text, self.size)
    }

    fn line_height(&self) -> f32 {
        self.size * LINE_SPACING
    }

    fn wrap(&self, text: &str, width: f32) -> Vec<String> {
        wrap_lines(&self.prepare(text), self.face, self.size, width)
    }

    /// Text whose line box starts at `top`.
    fn text(&self, x: f32, top: f32, text: String) -> Op {
        self.text_at(x, top + self.size * BASELINE, text)
    }

    fn text_at(&self, x: f32, baseline: f32, text: String) -> Op {
        Op::Text {
            x,
            baseline,
            face: self.face,
            size: self.size,
            color: self.color,
            text,
        }
    }
}

struct Composer {
    accent: Rgb,
}

impl Composer {
    fn region(&self, region: &Region, pen: Pen) -> Vec<Block> {
        if region.columns <= 1 {
            return region.nodes.iter().flat_map(|n| self.node(n, pen)).collect();
        }
        let cols = usize::from(region.columns);
        let col_width = (pen.width - GRID_GUTTER_PT * (cols - 1) as f32) / cols as f32;
        region
            .nodes
            .chunks(cols)
            .flat_map(|row| {
                let columns = row
                    .iter()
                    .enumerate()
                    .map(|(i, node)| {
                        let column = Pen {
                            x: pen.x + i as f32 * (col_width + GRID_GUTTER_PT),
                            width: col_width,
                        };
                        self.node(node, column)
                    })
                    .collect();
                zip_columns(columns)
            })
            .collect()
    }

    fn node(&self, node: &Node, pen: Pen) -> Vec<Block> {
        match node {
            Node::Name {
                text,
                style,
                centered,
            } => {
                let align = if *centered { Align::Center } else { Align::Left };
                let mut blocks = lines(&Ink::from_style(style), text, pen, align);
                blocks.push(Block::gap(6.0));
                blocks
            }
            Node::Avatar { initial } => self.avatar(initial, pen),
            Node::Contact {
                items,
                style,
                separator,
            } => {
                let ink = Ink::from_style(style);
                let mut blocks = match separator {
                    Some(sep) => inline_contacts(&ink, items, sep, pen),
                    None => stacked_contacts(&ink, items, pen),
                };
                blocks.push(Block::gap(8.0));
                blocks
            }
            Node::Rule { color, weight_pt } => {
                let y = 4.0 + weight_pt / 2.0;
                vec![
                    Block::new(
                        weight_pt + 8.0,
                        vec![Op::Line {
                            x1: pen.x,
                            y1: y,
                            x2: pen.x + pen.width,
                            y2: y,
                            width: *weight_pt,
                            color: Rgb::or_ink(color),
                        }],
                    ),
                    Block::gap(6.0),
                ]
            }
            Node::Section {
                heading, children, ..
            } => {
                let head = heading_blocks(heading, pen);
                let mut body = Vec::new();
                for (i, child) in children.iter().enumerate() {
                    if i > 0 && matches!(child, Node::Entry(_)) {
                        body.push(Block::gap(8.0));
                    }
                    body.extend(self.node(child, pen));
                }
                let mut blocks = keep_together(head, body);
                blocks.push(Block::gap(12.0));
                blocks
            }
            Node::Entry(entry) => self.entry(entry, pen),
            Node::Track { color, entries } => self.track(color, entries, pen),
            Node::Paragraph { text, style } => {
                let mut blocks = lines(&Ink::from_style(style), text, pen, Align::Left);
                blocks.push(Block::gap(3.0));
                blocks
            }
            Node::BulletList { items, style } => bullet_list(&Ink::from_style(style), items, pen),
            Node::Chips { items, style } => chips(style, items, pen),
        }
    }

    fn avatar(&self, initial: &str, pen: Pen) -> Vec<Block> {
        let radius = 22.0;
        let cx = pen.x + pen.width / 2.0;
        let cy = radius + 2.0;
        let ink = Ink {
            face: Face::Bold,
            size: 20.0,
            color: Rgb::or_ink(WHITE),
            uppercase: false,
        };
        let mut ops = vec![Op::Dot {
            cx,
            cy,
            r: radius,
            color: ink.color,
            filled: false,
        }];
        if !initial.is_empty() {
            let w = ink.measure(initial);
            ops.push(ink.text_at(cx - w / 2.0, cy + ink.size * 0.35, initial.to_string()));
        }
        vec![Block::new(2.0 * radius + 8.0, ops), Block::gap(6.0)]
    }

    fn entry(&self, entry: &Entry, pen: Pen) -> Vec<Block> {
        let inner = if entry.card {
            Pen {
                x: pen.x + 8.0,
                width: (pen.width - 16.0).max(1.0),
            }
        } else {
            pen
        };

        let title_ink = Ink::from_style(&entry.title_style);
        let date_ink = Ink::plain(META_SIZE_PT, MUTED);
        let dates_w = entry
            .dates
            .as_deref()
            .map(|d| date_ink.measure(d) + 8.0)
            .unwrap_or(0.0);

        let title_lines = title_ink.wrap(&entry.title, (inner.width - dates_w).max(40.0));
        let mut head: Vec<Block> = title_lines
            .iter()
            .map(|line| {
                Block::new(
                    title_ink.line_height(),
                    vec![title_ink.text(inner.x, 0.0, line.clone())],
                )
            })
            .collect();
        if head.is_empty() && (entry.dates.is_some() || entry.link.is_some()) {
            head.push(Block::new(title_ink.line_height(), Vec::new()));
        }

        if let (Some(dates), Some(first)) = (entry.dates.as_deref(), head.first_mut()) {
            let baseline = title_ink.size * BASELINE;
            first.ops.push(date_ink.text_at(
                inner.x + inner.width - date_ink.measure(dates),
                baseline,
                dates.to_string(),
            ));
        }

        if let Some(link) = &entry.link {
            let link_ink = Ink::plain(META_SIZE_PT, LINK_BLUE);
            let label_w = link_ink.measure(&link.label);
            let last_w = title_lines
                .last()
                .map(|l| title_ink.measure(l) + 6.0)
                .unwrap_or(0.0);
            let limit = if title_lines.len() <= 1 {
                inner.width - dates_w
            } else {
                inner.width
            };
            let (x, target) = if last_w + label_w <= limit {
                (inner.x + last_w, head.len() - 1)
            } else {
                head.push(Block::new(link_ink.line_height(), Vec::new()));
                (inner.x, head.len() - 1)
            };
            let height = head[target].height;
            let baseline = height.min(title_ink.size) * BASELINE;
            head[target].ops.push(link_ink.text_at(x, baseline, link.label.clone()));
            head[target].ops.push(Op::Link {
                x,
                y: 0.0,
                w: label_w,
                h: height,
                href: link.href.clone(),
            });
        }

        let mut rest = Vec::new();
        if let Some(subtitle) = &entry.subtitle {
            rest.extend(lines(&Ink::from_style(&entry.subtitle_style), subtitle, inner, Align::Left));
        }
        if let Some(meta) = &entry.meta {
            rest.extend(lines(&Ink::plain(META_SIZE_PT, FAINT), meta, inner, Align::Left));
        }
        if !entry.body.is_empty() {
            rest.push(Block::gap(2.0));
            for node in &entry.body {
                rest.extend(self.node(node, inner));
            }
        }

        let mut blocks = keep_together(head, rest);
        if entry.card {
            let fill = Rgb::or_ink(CARD_FILL);
            blocks.insert(0, Block::new(6.0, Vec::new()));
            blocks.push(Block::new(6.0, Vec::new()));
            for block in &mut blocks {
                block.ops.insert(
                    0,
                    Op::Rect {
                        x: pen.x,
                        y: 0.0,
                        w: pen.width,
                        h: block.height,
                        fill: Some(fill),
                        stroke: None,
                    },
                );
            }
        }
        blocks
    }

    fn track(&self, color: &str, entries: &[Entry], pen: Pen) -> Vec<Block> {
        let line_x = pen.x + 5.0;
        let line_color = Rgb::or_ink(color);
        let inner = pen.indent(18.0);

        let mut blocks = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                blocks.push(Block::new(10.0, Vec::new()));
            }
            let mut entry_blocks = self.entry(entry, inner);
            if let Some(first) = entry_blocks.first_mut() {
                first.ops.push(Op::Dot {
                    cx: line_x,
                    cy: entry.title_style.size_pt * 0.6,
                    r: 3.5,
                    color: self.accent,
                    filled: true,
                });
            }
            blocks.extend(entry_blocks);
        }
        for block in &mut blocks {
            block.ops.insert(
                0,
                Op::Line {
                    x1: line_x,
                    y1: 0.0,
                    x2: line_x,
                    y2: block.height,
                    width: 1.5,
                    color: line_color,
                },
            );
        }
        blocks.push(Block::gap(4.0));
        blocks
    }
}

fn lines(ink: &Ink, text: &str, pen: Pen, align: Align) -> Vec<Block> {
    ink.wrap(text, pen.width)
        .into_iter()
        .map(|line| {
            let x = match align {
                Align::Left => pen.x,
                Align::Center => pen.x + (pen.width - ink.measure(&line)).max(0.0) / 2.0,
            };
            Block::new(ink.line_height(), vec![ink.text(x, 0.0, line)])
        })
        .collect()
}

fn heading_blocks(heading: &Heading, pen: Pen) -> Vec<Block> {
    let ink = Ink::from_style(&heading.style);
    let mut blocks = lines(&ink, &heading.text, pen, Align::Left);
    if let Some(rule) = &heading.rule {
        blocks.push(Block::new(
            5.0,
            vec![Op::Line {
                x1: pen.x,
                y1: 2.0,
                x2: pen.x + pen.width,
                y2: 2.0,
                width: 0.75,
                color: Rgb::or_ink(rule),
            }],
        ));
    }
    blocks.push(Block::gap(5.0));
    blocks
}

/// Items on shared lines, centred, with `sep` between neighbours.
fn inline_contacts(ink: &Ink, items: &[ContactItem], sep: &str, pen: Pen) -> Vec<Block> {
    let sep_text = format!(" {sep} ");
    let sep_w = ink.measure(&sep_text);

    let mut rows: Vec<Vec<(&ContactItem, String, f32)>> = Vec::new();
    let mut row_w = 0.0;
    for item in items {
        let text = ink.prepare(&item.text);
        let w = ink.measure(&text).min(pen.width);
        match rows.last_mut() {
            Some(row) if row_w + sep_w + w <= pen.width => {
                row.push((item, text, w));
                row_w += sep_w + w;
            }
            _ => {
                rows.push(vec![(item, text, w)]);
                row_w = w;
            }
        }
    }

    rows.into_iter()
        .map(|row| {
            let total: f32 =
                row.iter().map(|(_, _, w)| w).sum::<f32>() + sep_w * (row.len() - 1) as f32;
            let mut x = pen.x + (pen.width - total).max(0.0) / 2.0;
            let mut ops = Vec::new();
            for (i, (item, text, w)) in row.into_iter().enumerate() {
                if i > 0 {
                    ops.push(ink.text(x, 0.0, sep_text.clone()));
                    x += sep_w;
                }
                ops.push(ink.text(x, 0.0, text));
                if let Some(href) = &item.href {
                    ops.push(Op::Link {
                        x,
                        y: 0.0,
                        w,
                        h: ink.line_height(),
                        href: href.clone(),
                    });
                }
                x += w;
            }
            Block::new(ink.line_height(), ops)
        })
        .collect()
}

/// One item per line.
fn stacked_contacts(ink: &Ink, items: &[ContactItem], pen: Pen) -> Vec<Block> {
    items
        .iter()
        .flat_map(|item| {
            ink.wrap(&item.text, pen.width).into_iter().map(move |line| {
                let w = ink.measure(&line);
                let mut ops = vec![ink.text(pen.x, 0.0, line)];
                if let Some(href) = &item.href {
                    ops.push(Op::Link {
                        x: pen.x,
                        y: 0.0,
                        w,
                        h: ink.line_height(),
                        href: href.clone(),
                    });
                }
                Block::new(ink.line_height() + 2.0, ops)
            })
        })
        .collect()
}

fn bullet_list(ink: &Ink, items: &[String], pen: Pen) -> Vec<Block> {
    let item_pen = pen.indent(12.0);
    let mut blocks = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            blocks.push(Block::gap(2.0));
        }
        let mut item_blocks = lines(ink, item, item_pen, Align::Left);
        if let Some(first) = item_blocks.first_mut() {
            first.ops.push(ink.text(pen.x + 3.0, 0.0, "•".to_string()));
        }
        blocks.extend(item_blocks);
    }
    blocks.push(Block::gap(3.0));
    blocks
}

/// Tag-style boxes packed into rows. Light text gets outlined boxes, dark text filled ones.
fn chips(style: &TextStyle, items: &[String], pen: Pen) -> Vec<Block> {
    let ink = Ink::from_style(style);
    let pad_x = 5.0;
    let spacing = 4.0;
    let chip_h = ink.size + 6.0;
    let outlined = style.color.eq_ignore_ascii_case(WHITE);

    let mut rows: Vec<Vec<(f32, &str, f32)>> = Vec::new();
    let mut cursor = 0.0;
    for item in items {
        let w = (ink.measure(item) + 2.0 * pad_x).min(pen.width);
        match rows.last_mut() {
            Some(row) if cursor + w <= pen.width => {
                row.push((cursor, item.as_str(), w));
                cursor += w + spacing;
            }
            _ => {
                rows.push(vec![(0.0, item.as_str(), w)]);
                cursor = w + spacing;
            }
        }
    }

    let box_color = if outlined { ink.color } else { Rgb::or_ink(CHIP_FILL) };
    let baseline = (chip_h + ink.size * 0.7) / 2.0;
    let mut blocks: Vec<Block> = rows
        .into_iter()
        .map(|row| {
            let ops = row
                .into_iter()
                .flat_map(|(offset, text, w)| {
                    let x = pen.x + offset;
                    [
                        Op::Rect {
                            x,
                            y: 0.0,
                            w,
                            h: chip_h,
                            fill: (!outlined).then_some(box_color),
                            stroke: outlined.then_some(box_color),
                        },
                        ink.text_at(x + pad_x, baseline, text.to_string()),
                    ]
                })
                .collect();
            Block::new(chip_h + spacing, ops)
        })
        .collect();
    blocks.push(Block::gap(3.0));
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::demo::demo_document;
    use crate::layout::projector::project;
    use crate::models::resume::{Experience, ResumeData, TemplateKind};

    fn texts(page: &[Op]) -> Vec<&str> {
        page.iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn make_long_doc() -> ResumeData {
        let mut doc = ResumeData::default();
        doc.personal_info.full_name = "Ada Lovelace".to_string();
        doc.experience = (0..30)
            .map(|i| Experience {
                role: format!("Role {i}"),
                company: "Analytical Engines".to_string(),
                start_date: "1840".to_string(),
                end_date: "1842".to_string(),
                description: "• Translated and annotated the memoir on the engine\n\
                              • Wrote the first published algorithm for the machine\n\
                              • Corresponded with collaborators about its design"
                    .to_string(),
                ..Experience::new(format!("e{i}"))
            })
            .collect();
        doc
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(Rgb::parse("#ffffff"), Some(Rgb { r: 1.0, g: 1.0, b: 1.0 }));
        assert_eq!(Rgb::parse("#000"), Some(Rgb { r: 0.0, g: 0.0, b: 0.0 }));
        assert_eq!(Rgb::parse("#ffffff4d"), Rgb::parse("#fff"));
        assert_eq!(Rgb::parse("red"), None);
        assert_eq!(Rgb::parse("#gg0000"), None);
        assert_eq!(Rgb::parse("#ééé"), None);
    }

    fn empty_tree() -> VisualTree {
        VisualTree {
            regions: Vec::new(),
            ..project(&ResumeData::default(), TemplateKind::Classic)
        }
    }

    #[test]
    fn test_empty_tree_is_rejected() {
        assert!(matches!(
            compose(&empty_tree(), &ExportOptions::default()),
            Err(ExportError::EmptyDocument)
        ));
    }

    #[test]
    fn test_blank_modern_document_composes_sidebar_page() {
        let tree = project(&ResumeData::default(), TemplateKind::Modern);
        let composition = compose(&tree, &ExportOptions::default()).unwrap();
        assert_eq!(composition.pages.len(), 1);
        assert!(composition.pages[0]
            .iter()
            .any(|op| matches!(op, Op::Rect { fill: Some(_), .. })));
        assert!(composition.pages[0].iter().any(|op| matches!(op, Op::Dot { .. })));
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let tree = project(&demo_document(), TemplateKind::Classic);
        assert!(matches!(
            compose(&tree, &ExportOptions::a4(-1.0)),
            Err(ExportError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_demo_fits_text_on_page() {
        let tree = project(&demo_document(), TemplateKind::Classic);
        let composition = compose(&tree, &ExportOptions::default()).unwrap();
        assert!(!composition.pages.is_empty());
        let first = texts(&composition.pages[0]);
        assert!(first.contains(&"MORGAN ELLERY"));
    }

    #[test]
    fn test_long_document_paginates() {
        let tree = project(&make_long_doc(), TemplateKind::Classic);
        let composition = compose(&tree, &ExportOptions::default()).unwrap();
        assert!(composition.pages.len() > 1);

        for page in &composition.pages {
            for op in page {
                if let Op::Text { baseline, .. } = op {
                    assert!(*baseline > 0.0 && *baseline < composition.page_height_pt);
                }
            }
        }
        let all: Vec<&str> = composition.pages.iter().flat_map(|p| texts(p)).collect();
        assert!(all.contains(&"Role 0"));
        assert!(all.contains(&"Role 29"));
    }

    #[test]
    fn test_sidebar_background_on_every_page() {
        let mut doc = make_long_doc();
        doc.theme.template = TemplateKind::Modern;
        doc.theme.primary_color = "#0f766e".to_string();
        let tree = project(&doc, TemplateKind::Modern);
        let composition = compose(&tree, &ExportOptions::default()).unwrap();
        let accent = Rgb::parse("#0f766e");

        assert!(composition.pages.len() > 1);
        for page in &composition.pages {
            assert!(matches!(
                page.first(),
                Some(Op::Rect { x, fill, .. }) if *x == 0.0 && *fill == accent
            ));
        }
    }

    #[test]
    fn test_heading_never_ends_a_page() {
        let tree = project(&make_long_doc(), TemplateKind::Classic);
        let composition = compose(&tree, &ExportOptions::default()).unwrap();
        for page in &composition.pages {
            let last_text = texts(page).last().copied();
            assert_ne!(last_text, Some("PROFESSIONAL EXPERIENCE"));
        }
    }

    #[test]
    fn test_keep_together_skips_leading_gaps() {
        let head = vec![Block::new(10.0, Vec::new())];
        let rest = vec![
            Block::gap(2.0),
            Block::new(5.0, Vec::new()),
            Block::new(5.0, Vec::new()),
        ];
        let blocks = keep_together(head, rest);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].height, 17.0);
    }
}
