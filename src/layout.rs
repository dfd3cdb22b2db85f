//! Preview layout: turns a record and a theme into a display list.
//!
//! The preview is laid out on a surface of fixed width (in CSS pixels) whose
//! height follows the content.  Sections appear in a fixed order and only when
//! they have content.  Multi-line text wraps greedily at word boundaries;
//! single-line fields such as titles are truncated with an ellipsis.

use chrono::NaiveDate;

use crate::fonts::Typeface;
use crate::model::{ContactInfo, ResumeRecord};
use crate::theme::{Color, PaletteColors, Theme, GRAY_500, GRAY_600, GRAY_700, GRAY_800, GRAY_900, WHITE};

/// Surface width in CSS pixels (A4 width at 96 dpi).
pub const SURFACE_WIDTH: u32 = 794;
/// Padding around the preview content in CSS pixels.
pub const SURFACE_PADDING: f32 = 40.0;

const LINE_HEIGHT: f32 = 1.6;
const SECTION_GAP: f32 = 32.0;
const HEADING_GAP: f32 = 16.0;
const ENTRY_GAP: f32 = 28.0;
const HEADER_PADDING: f32 = 32.0;
const HEADER_RADIUS: f32 = 12.0;
const COLUMN_GAP: f32 = 16.0;
const SECTION_BAR_WIDTH: f32 = 4.0;
const BADGE_PAD_X: f32 = 12.0;
const BADGE_PAD_Y: f32 = 4.0;
const BADGE_GAP: f32 = 8.0;
const ELLIPSIS: char = '\u{2026}';

/// Axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }
}

/// Fill style of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Diagonal gradient from the top-left corner to the bottom-right corner.
    Gradient { from: Color, to: Color },
}

/// One drawing instruction of the preview.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fill {
        rect: Rect,
        paint: Paint,
        /// Corner radius; zero for square corners.
        radius: f32,
    },
    Text {
        x: f32,
        baseline: f32,
        text: String,
        px: f32,
        bold: bool,
        color: Color,
    },
}

/// The laid-out preview surface.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewLayout {
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
}

impl PreviewLayout {
    /// Surface width in CSS pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Natural content height in CSS pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Drawing instructions in painting order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Iterates over the text runs of the preview.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Fill { .. } => None,
        })
    }
}

/// Formats a `YYYY-MM` (or `YYYY-MM-DD`) date as `Jun 2024`.
///
/// Anything else is returned unchanged.
pub fn format_month(date: &str) -> String {
    let date = date.trim();
    NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .map(|parsed| parsed.format("%b %Y").to_string())
        .unwrap_or_else(|_| date.to_owned())
}

/// Formats the badge text of a dated entry.
pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let start = if start.is_empty() {
        String::new()
    } else {
        format_month(start)
    };
    let end = if current {
        "Present".to_owned()
    } else if end.is_empty() {
        String::new()
    } else {
        format_month(end)
    };
    format!("{start} - {end}").trim().to_owned()
}

#[derive(Clone, Copy, Debug)]
struct TextStyle {
    px: f32,
    bold: bool,
    color: Color,
}

impl TextStyle {
    fn new(px: f32, bold: bool, color: Color) -> Self {
        Self { px, bold, color }
    }

    fn line_height(&self) -> f32 {
        self.px * LINE_HEIGHT
    }
}

struct Styles {
    name: TextStyle,
    contact: TextStyle,
    heading: TextStyle,
    title: TextStyle,
    subtitle: TextStyle,
    body: TextStyle,
    label: TextStyle,
    meta: TextStyle,
    note: TextStyle,
    badge: TextStyle,
    link: TextStyle,
}

impl Styles {
    fn new(base: f32, colors: &PaletteColors) -> Self {
        Self {
            name: TextStyle::new(base * 2.25, true, WHITE),
            contact: TextStyle::new(base * 0.875, false, WHITE),
            heading: TextStyle::new(base * 1.5, true, colors.primary),
            title: TextStyle::new(base * 1.125, true, GRAY_900),
            subtitle: TextStyle::new(base, true, colors.secondary),
            body: TextStyle::new(base, false, GRAY_700),
            label: TextStyle::new(base, true, GRAY_800),
            meta: TextStyle::new(base, false, GRAY_600),
            note: TextStyle::new(base * 0.875, false, GRAY_500),
            badge: TextStyle::new(base * 0.875, true, colors.badge_text),
            link: TextStyle::new(base * 0.875, true, colors.secondary),
        }
    }
}

/// A line in the left column of an entry header.
struct Line {
    text: String,
    style: TextStyle,
}

impl Line {
    fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

struct Flow<'a> {
    face: &'a dyn Typeface,
    colors: PaletteColors,
    styles: Styles,
    left: f32,
    width: f32,
    y: f32,
    ops: Vec<DrawOp>,
}

impl<'a> Flow<'a> {
    fn text_width(&self, text: &str, style: TextStyle) -> f32 {
        self.face.text_width(text, style.px, style.bold)
    }

    fn text_at(&mut self, x: f32, top: f32, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let glyph_height = self.face.line_height(style.px);
        let baseline = top + (style.line_height() - glyph_height) / 2.0 + self.face.ascent(style.px);
        self.ops.push(DrawOp::Text {
            x,
            baseline,
            text: text.to_owned(),
            px: style.px,
            bold: style.bold,
            color: style.color,
        });
    }

    fn fill(&mut self, rect: Rect, paint: Paint, radius: f32) {
        self.ops.push(DrawOp::Fill {
            rect,
            paint,
            radius,
        });
    }

    fn truncate(&self, text: &str, width: f32, style: TextStyle) -> String {
        if self.text_width(text, style) <= width {
            return text.to_owned();
        }
        // Longest prefix that fits once the ellipsis is appended.
        let chars: Vec<char> = text.chars().collect();
        let (mut low, mut high) = (0, chars.len());
        let mut best = String::new();
        while low < high {
            let mid = low + (high - low) / 2;
            let candidate: String = chars[..mid].iter().chain([ELLIPSIS].iter()).collect();
            if self.text_width(&candidate, style) <= width {
                best = candidate;
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        best
    }

    /// Greedy word wrap; the first line is `first_offset` narrower.
    fn wrap(&self, text: &str, width: f32, style: TextStyle, first_offset: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut available = width - first_offset;

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() && lines.is_empty() && first_offset > 0.0 {
                if self.text_width(&candidate, style) <= available {
                    current = candidate;
                } else {
                    lines.push(String::new());
                    available = width;
                    current = word.to_owned();
                }
            } else if current.is_empty() || self.text_width(&candidate, style) <= available {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
                available = width;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Lays out a wrapped paragraph at the cursor and advances past it.
    fn paragraph(&mut self, text: &str, style: TextStyle) {
        for line in self.wrap(text, self.width, style, 0.0) {
            let y = self.y;
            self.text_at(self.left, y, &line, style);
            self.y += style.line_height();
        }
    }

    /// A bold label followed by wrapped text on the same line.
    fn labeled_paragraph(&mut self, label: &str, text: &str, label_style: TextStyle, style: TextStyle) {
        let y = self.y;
        self.text_at(self.left, y, label, label_style);
        let offset = self.text_width(label, label_style) + self.text_width(" ", style);
        let line_height = label_style.line_height().max(style.line_height());

        for (index, line) in self.wrap(text, self.width, style, offset).into_iter().enumerate() {
            let x = if index == 0 { self.left + offset } else { self.left };
            let y = self.y;
            self.text_at(x, y, &line, style);
            self.y += line_height;
        }
        if text.split_whitespace().next().is_none() {
            self.y += line_height;
        }
    }

    fn badge_size(&self, text: &str) -> (f32, f32) {
        let style = self.styles.badge;
        (
            self.text_width(text, style) + 2.0 * BADGE_PAD_X,
            style.line_height() + 2.0 * BADGE_PAD_Y,
        )
    }

    fn badge_at(&mut self, x: f32, top: f32, text: &str) -> Rect {
        let (width, height) = self.badge_size(text);
        let rect = Rect::new(x, top, width, height);
        let radius = height / 2.0;
        self.fill(rect, Paint::Solid(self.colors.badge_border), radius);
        self.fill(rect.inset(1.0), Paint::Solid(self.colors.badge_fill), radius - 1.0);
        let style = self.styles.badge;
        self.text_at(x + BADGE_PAD_X, top + BADGE_PAD_Y, text, style);
        rect
    }

    /// Entry header: stacked lines on the left, an optional badge and notes on the right.
    fn entry_header(&mut self, left: &[Line], badge: Option<&str>, notes: &[Line]) {
        let top = self.y;
        let right_edge = self.left + self.width;

        let badge_size = badge.map(|text| self.badge_size(text));
        let right_width = notes
            .iter()
            .map(|line| self.text_width(&line.text, line.style))
            .chain(badge_size.map(|(width, _)| width))
            .fold(0.0_f32, f32::max);
        let left_width = if right_width > 0.0 {
            (self.width - right_width - BADGE_GAP).max(self.width / 3.0)
        } else {
            self.width
        };

        let mut right_y = top;
        if let Some(text) = badge {
            let (width, _) = badge_size.unwrap_or_default();
            let rect = self.badge_at(right_edge - width, right_y, text);
            right_y = rect.bottom() + 4.0;
        }
        for line in notes {
            let width = self.text_width(&line.text, line.style);
            self.text_at(right_edge - width, right_y, &line.text, line.style);
            right_y += line.style.line_height();
        }

        let mut left_y = top;
        for line in left {
            let text = self.truncate(&line.text, left_width, line.style);
            self.text_at(self.left, left_y, &text, line.style);
            left_y += line.style.line_height();
        }

        self.y = left_y.max(right_y) + 8.0;
    }

    fn section<F>(&mut self, title: &str, body: F)
    where
        F: FnOnce(&mut Self),
    {
        let style = self.styles.heading;
        let top = self.y;
        let bar = Rect::new(self.left, top, SECTION_BAR_WIDTH, style.line_height());
        self.fill(bar, Paint::Solid(self.colors.section_bar), 0.0);
        self.text_at(self.left + HEADING_GAP, top, title, style);
        self.y = bar.bottom() + HEADING_GAP;

        body(self);

        self.y += SECTION_GAP;
    }

    fn header(&mut self, contact: &ContactInfo) {
        let top = self.y;
        let index = self.ops.len();
        self.fill(Rect::new(self.left, top, self.width, 0.0), Paint::Solid(WHITE), 0.0);

        let inner_left = self.left + HEADER_PADDING;
        let inner_width = (self.width - 2.0 * HEADER_PADDING).max(1.0);
        let mut y = top + HEADER_PADDING;

        let name_style = self.styles.name;
        let name = if contact.full_name.is_empty() {
            "Your Name"
        } else {
            contact.full_name.as_str()
        };
        let name = self.truncate(name, inner_width, name_style);
        self.text_at(inner_left, y, &name, name_style);
        y += name_style.line_height();

        let left_items: Vec<&str> = [&contact.email, &contact.phone, &contact.location]
            .into_iter()
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .collect();
        let right_items: Vec<&str> = [&contact.website, &contact.linkedin, &contact.github]
            .into_iter()
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .collect();

        let rows = left_items.len().max(right_items.len());
        if rows > 0 {
            y += 12.0;
            let style = self.styles.contact;
            let column_width = (inner_width - COLUMN_GAP) / 2.0;
            for (column, items) in [left_items, right_items].into_iter().enumerate() {
                let x = inner_left + column as f32 * (column_width + COLUMN_GAP);
                for (row, item) in items.into_iter().enumerate() {
                    let text = self.truncate(item, column_width, style);
                    self.text_at(x, y + row as f32 * style.line_height(), &text, style);
                }
            }
            y += rows as f32 * style.line_height();
        }

        let bottom = y + HEADER_PADDING;
        self.ops[index] = DrawOp::Fill {
            rect: Rect::new(self.left, top, self.width, bottom - top),
            paint: Paint::Gradient {
                from: self.colors.header_from,
                to: self.colors.header_to,
            },
            radius: HEADER_RADIUS,
        };
        self.y = bottom + SECTION_GAP;
    }

    fn entries<T, F>(&mut self, items: &[T], mut each: F)
    where
        F: FnMut(&mut Self, &T),
    {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.y += ENTRY_GAP;
            }
            each(self, item);
        }
    }

    fn skills(&mut self, skills: &[String]) {
        let right_edge = self.left + self.width;
        let mut x = self.left;
        let mut row_bottom = self.y;
        for skill in skills {
            let (width, height) = self.badge_size(skill);
            if x > self.left && x + width > right_edge {
                x = self.left;
                self.y = row_bottom + BADGE_GAP;
            }
            let top = self.y;
            let rect = self.badge_at(x, top, skill);
            x += width + BADGE_GAP;
            row_bottom = row_bottom.max(top + height).max(rect.bottom());
        }
        self.y = row_bottom;
    }
}

/// Lays out `record` styled with `theme` on a surface `width` CSS pixels wide.
pub fn layout_preview(
    record: &ResumeRecord,
    theme: &Theme,
    face: &dyn Typeface,
    width: f32,
) -> PreviewLayout {
    let colors = theme.palette.colors();
    let mut flow = Flow {
        face,
        colors,
        styles: Styles::new(theme.size.base_px(), &colors),
        left: SURFACE_PADDING,
        width: (width - 2.0 * SURFACE_PADDING).max(1.0),
        y: SURFACE_PADDING,
        ops: Vec::new(),
    };

    flow.header(record.contact());

    if !record.summary().is_empty() {
        flow.section("Professional Summary", |flow| {
            let style = flow.styles.body;
            flow.paragraph(record.summary(), style);
        });
    }

    if !record.experience().is_empty() {
        flow.section("Professional Experience", |flow| {
            flow.entries(record.experience(), |flow, exp| {
                let range = format_date_range(&exp.start_date, &exp.end_date, exp.current);
                let left = [
                    Line::new(exp.position.as_str(), flow.styles.title),
                    Line::new(exp.company.as_str(), flow.styles.subtitle),
                ];
                flow.entry_header(&left, Some(range.as_str()), &[]);
                if !exp.description.is_empty() {
                    let style = flow.styles.body;
                    flow.paragraph(&exp.description, style);
                }
            });
        });
    }

    if !record.education().is_empty() {
        flow.section("Education", |flow| {
            flow.entries(record.education(), |flow, edu| {
                let title = if edu.field.is_empty() {
                    edu.degree.clone()
                } else {
                    format!("{} in {}", edu.degree, edu.field)
                };
                let range = format_date_range(&edu.start_date, &edu.end_date, false);
                let left = [
                    Line::new(title, flow.styles.title),
                    Line::new(edu.institution.as_str(), flow.styles.subtitle),
                ];
                flow.entry_header(&left, Some(range.as_str()), &[]);
                if !edu.gpa.is_empty() {
                    let (label, body) = (flow.styles.meta, flow.styles.label);
                    flow.labeled_paragraph("GPA:", &edu.gpa, label, body);
                }
            });
        });
    }

    if !record.skills().is_empty() {
        flow.section("Technical Skills", |flow| flow.skills(record.skills()));
    }

    if !record.projects().is_empty() {
        flow.section("Projects", |flow| {
            flow.entries(record.projects(), |flow, project| {
                let links: Vec<&str> = [("Demo", &project.link), ("Code", &project.github)]
                    .into_iter()
                    .filter(|(_, target)| !target.is_empty())
                    .map(|(label, _)| label)
                    .collect();
                let notes: Vec<Line> = if links.is_empty() {
                    Vec::new()
                } else {
                    vec![Line::new(links.join("   "), flow.styles.link)]
                };
                let left = [Line::new(project.name.as_str(), flow.styles.title)];
                flow.entry_header(&left, None, &notes);
                if !project.description.is_empty() {
                    let style = flow.styles.body;
                    flow.paragraph(&project.description, style);
                    flow.y += 8.0;
                }
                if !project.technologies.is_empty() {
                    let (label, body) = (flow.styles.label, flow.styles.meta);
                    flow.labeled_paragraph("Technologies:", &project.technologies, label, body);
                }
            });
        });
    }

    if !record.achievements().is_empty() {
        flow.section("Achievements & Awards", |flow| {
            flow.entries(record.achievements(), |flow, achievement| {
                let mut left = vec![Line::new(achievement.title.as_str(), flow.styles.title)];
                if !achievement.organization.is_empty() {
                    left.push(Line::new(achievement.organization.as_str(), flow.styles.subtitle));
                }
                let date = (!achievement.date.is_empty()).then(|| format_month(&achievement.date));
                flow.entry_header(&left, date.as_deref(), &[]);
                if !achievement.description.is_empty() {
                    let style = flow.styles.body;
                    flow.paragraph(&achievement.description, style);
                }
            });
        });
    }

    if !record.certifications().is_empty() {
        flow.section("Certifications", |flow| {
            flow.entries(record.certifications(), |flow, cert| {
                let mut left = vec![
                    Line::new(cert.name.as_str(), flow.styles.title),
                    Line::new(cert.issuer.as_str(), flow.styles.subtitle),
                ];
                if !cert.credential_id.is_empty() {
                    left.push(Line::new(format!("ID: {}", cert.credential_id), flow.styles.meta));
                }
                let mut notes = Vec::new();
                if !cert.expiry_date.is_empty() {
                    notes.push(Line::new(
                        format!("Expires: {}", format_month(&cert.expiry_date)),
                        flow.styles.note,
                    ));
                }
                let date = (!cert.date.is_empty()).then(|| format_month(&cert.date));
                flow.entry_header(&left, date.as_deref(), &notes);
                if !cert.link.is_empty() {
                    let (x, y, style) = (flow.left, flow.y, flow.styles.link);
                    flow.text_at(x, y, "Verify Certification", style);
                    flow.y += style.line_height();
                }
            });
        });
    }

    let height = (flow.y - SECTION_GAP + SURFACE_PADDING).max(2.0 * SURFACE_PADDING);
    PreviewLayout {
        width,
        height,
        ops: flow.ops,
    }
}
