//! Minimal markdown rendering for metric feedback and recommendations.
//!
//! Markdown is flattened into blocks of styled spans, then laid out with
//! egui text formats. Tables, images and links render as plain text.

use eframe::egui::{self, FontId, TextFormat, Ui, text::LayoutJob};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
    pub strikethrough: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    /// List item at `depth` (0 = top level); `number` is set for ordered lists.
    ListItem { depth: usize, number: Option<u64> },
    Code,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    current: Option<Block>,
    style: SpanStyle,
    /// Next number for each open list; `None` for bullet lists.
    lists: Vec<Option<u64>>,
}

impl BlockBuilder {
    fn open(&mut self, kind: BlockKind) {
        self.close();
        self.current = Some(Block {
            kind,
            spans: Vec::new(),
        });
    }

    fn close(&mut self) {
        if let Some(block) = self.current.take() {
            if block.spans.iter().any(|span| !span.text.trim().is_empty()) {
                self.blocks.push(block);
            }
        }
    }

    fn push_text(&mut self, text: &str, code: bool) {
        if self.current.is_none() {
            self.open(BlockKind::Paragraph);
        }
        let style = SpanStyle {
            code: code || self.style.code,
            ..self.style
        };
        if let Some(block) = self.current.as_mut() {
            match block.spans.last_mut() {
                Some(last) if last.style == style => last.text.push_str(text),
                _ => block.spans.push(Span {
                    text: text.to_string(),
                    style,
                }),
            }
        }
    }

    fn start_item(&mut self) {
        let depth = self.lists.len().saturating_sub(1);
        let number = match self.lists.last_mut() {
            Some(Some(next)) => {
                let number = *next;
                *next += 1;
                Some(number)
            }
            _ => None,
        };
        self.open(BlockKind::ListItem { depth, number });
    }
}

/// Flatten markdown into renderable blocks.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let mut builder = BlockBuilder::default();
    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(Tag::Paragraph) => {
                if !matches!(
                    builder.current.as_ref().map(|block| block.kind),
                    Some(BlockKind::ListItem { .. })
                ) {
                    builder.open(BlockKind::Paragraph);
                }
            }
            Event::Start(Tag::Heading { level, .. }) => {
                builder.open(BlockKind::Heading(heading_depth(level)))
            }
            Event::Start(Tag::CodeBlock(_)) => builder.open(BlockKind::Code),
            Event::Start(Tag::List(start)) => {
                builder.close();
                builder.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                builder.close();
                builder.lists.pop();
            }
            Event::Start(Tag::Item) => builder.start_item(),
            Event::Start(Tag::Strong) => builder.style.strong = true,
            Event::End(TagEnd::Strong) => builder.style.strong = false,
            Event::Start(Tag::Emphasis) => builder.style.emphasis = true,
            Event::End(TagEnd::Emphasis) => builder.style.emphasis = false,
            Event::Start(Tag::Strikethrough) => builder.style.strikethrough = true,
            Event::End(TagEnd::Strikethrough) => builder.style.strikethrough = false,
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock | TagEnd::Item,
            ) => {
                let in_item = matches!(
                    builder.current.as_ref().map(|block| block.kind),
                    Some(BlockKind::ListItem { .. })
                );
                if !in_item || !matches!(event, Event::End(TagEnd::Paragraph)) {
                    builder.close();
                }
            }
            Event::Text(text) => {
                let code = matches!(
                    builder.current.as_ref().map(|block| block.kind),
                    Some(BlockKind::Code)
                );
                builder.push_text(&text, code);
            }
            Event::Code(text) => builder.push_text(&text, true),
            Event::SoftBreak => builder.push_text(" ", false),
            Event::HardBreak => builder.push_text("\n", false),
            _ => {}
        }
    }
    builder.close();
    builder.blocks
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Render markdown into `ui`.
pub fn render(ui: &mut Ui, text: &str) {
    for block in parse_blocks(text) {
        render_block(ui, &block);
    }
}

fn render_block(ui: &mut Ui, block: &Block) {
    let body_size = egui::TextStyle::Body.resolve(ui.style()).size;
    let color = ui.visuals().text_color();
    let mut job = LayoutJob::default();
    job.wrap.max_width = ui.available_width();
    let size = match block.kind {
        BlockKind::Heading(1) => body_size * 1.4,
        BlockKind::Heading(2) => body_size * 1.25,
        BlockKind::Heading(_) => body_size * 1.1,
        _ => body_size,
    };
    if let BlockKind::ListItem { depth, number } = block.kind {
        let indent = "    ".repeat(depth);
        let marker = match number {
            Some(number) => format!("{indent}{number}. "),
            None => format!("{indent}\u{2022} "),
        };
        job.append(&marker, 0.0, plain_format(size, color));
    }
    let heading = matches!(block.kind, BlockKind::Heading(_));
    for span in &block.spans {
        let mut format = plain_format(size, color);
        if span.style.code || block.kind == BlockKind::Code {
            format.font_id = FontId::monospace(size * 0.95);
            format.background = ui.visuals().code_bg_color;
        }
        if span.style.strong || heading {
            format.color = ui.visuals().strong_text_color();
        }
        format.italics = span.style.emphasis;
        if span.style.strikethrough {
            format.strikethrough = egui::Stroke::new(1.0, color);
        }
        job.append(&span.text, 0.0, format);
    }
    ui.label(job);
    ui.add_space(2.0);
}

fn plain_format(size: f32, color: egui::Color32) -> TextFormat {
    TextFormat {
        font_id: FontId::proportional(size),
        color,
        ..Default::default()
    }
}
