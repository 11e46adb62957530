use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::application::ports::{OutlineRenderer, RenderError};
use crate::domain::{MindMap, OutlineNode};

use super::front_matter::split_front_matter;

/// Deepest outline the renderer accepts. Tree walks recurse per level.
pub const MAX_OUTLINE_DEPTH: usize = 100;

/// Builds the mind-map tree from markmap-flavoured markdown.
///
/// Headings set the hierarchy, list items nest under the heading or item that
/// contains them, and stand-alone blocks (paragraphs, code, tables) become leaves.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkmapRenderer;

impl MarkmapRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl OutlineRenderer for MarkmapRenderer {
    fn render(&self, markdown: &str) -> Result<MindMap, RenderError> {
        let (front_matter, body) = split_front_matter(markdown);

        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let mut builder = OutlineBuilder::new();
        for event in Parser::new_ext(body, options) {
            builder.handle(event);
            if builder.depth() > MAX_OUTLINE_DEPTH {
                return Err(RenderError::TooDeep {
                    depth: builder.depth(),
                    limit: MAX_OUTLINE_DEPTH,
                });
            }
        }

        Ok(MindMap {
            title: front_matter.title,
            root: builder.finish(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Heading(usize),
    Item,
}

struct Frame {
    kind: FrameKind,
    node: OutlineNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Text becomes the content of the frame on top of the stack.
    Top,
    /// Text becomes a new leaf under the frame on top of the stack.
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Inline,
    Verbatim,
}

struct Capture {
    target: Target,
    mode: Mode,
    buffer: String,
}

struct OutlineBuilder {
    stack: Vec<Frame>,
    capture: Option<Capture>,
    list_depth: usize,
}

impl OutlineBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame {
                kind: FrameKind::Root,
                node: OutlineNode::default(),
            }],
            capture: None,
            list_depth: 0,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) if self.list_depth == 0 => {
                self.flush();
                self.close_headings(level as usize);
                self.stack.push(Frame {
                    kind: FrameKind::Heading(level as usize),
                    node: OutlineNode::default(),
                });
                self.begin(Target::Top, Mode::Inline);
            }
            Event::Start(Tag::Heading { .. }) | Event::Start(Tag::Paragraph) => {
                if self.capture.is_none() {
                    let target = if self.top_is_empty_item() {
                        Target::Top
                    } else {
                        Target::Leaf
                    };
                    self.begin(target, Mode::Inline);
                }
            }
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Paragraph) => self.flush(),
            Event::Start(Tag::List(_)) => {
                self.flush();
                self.list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                self.list_depth = self.list_depth.saturating_sub(1);
            }
            Event::Start(Tag::Item) => {
                self.flush();
                self.stack.push(Frame {
                    kind: FrameKind::Item,
                    node: OutlineNode::default(),
                });
                self.begin(Target::Top, Mode::Inline);
            }
            Event::End(TagEnd::Item) => {
                self.flush();
                self.close_item();
            }
            Event::Start(Tag::CodeBlock(_)) | Event::Start(Tag::Table(_)) => {
                self.flush();
                self.begin(Target::Leaf, Mode::Verbatim);
            }
            Event::End(TagEnd::CodeBlock) | Event::End(TagEnd::Table) => self.flush(),
            Event::Start(Tag::TableCell) => {
                if let Some(capture) = self.capture.as_mut() {
                    if !capture.buffer.is_empty() && !capture.buffer.ends_with('\n') {
                        capture.buffer.push_str(" | ");
                    }
                }
            }
            Event::End(TagEnd::TableHead) | Event::End(TagEnd::TableRow) => self.push_text("\n"),
            Event::Text(text) | Event::Code(text) => self.push_text(&text),
            Event::SoftBreak | Event::HardBreak => {
                let is_verbatim = matches!(
                    self.capture,
                    Some(Capture {
                        mode: Mode::Verbatim,
                        ..
                    })
                );
                self.push_text(if is_verbatim { "\n" } else { " " });
            }
            Event::TaskListMarker(checked) => {
                self.push_text(if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }

    /// Open levels below the root.
    fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    fn begin(&mut self, target: Target, mode: Mode) {
        self.capture = Some(Capture {
            target,
            mode,
            buffer: String::new(),
        });
    }

    fn push_text(&mut self, text: &str) {
        if let Some(capture) = self.capture.as_mut() {
            capture.buffer.push_str(text);
        }
    }

    fn flush(&mut self) {
        let Some(capture) = self.capture.take() else {
            return;
        };

        let content = match capture.mode {
            Mode::Inline => collapse_inline(&capture.buffer),
            Mode::Verbatim => capture.buffer.trim_end().to_string(),
        };
        if content.is_empty() {
            return;
        }

        let Some(top) = self.stack.last_mut() else {
            return;
        };
        match capture.target {
            Target::Top if top.node.content.is_empty() => top.node.content = content,
            Target::Top | Target::Leaf => top.node.children.push(OutlineNode::new(content)),
        }
    }

    fn top_is_empty_item(&self) -> bool {
        self.stack
            .last()
            .is_some_and(|f| f.kind == FrameKind::Item && f.node.content.is_empty())
    }

    /// Pops open items and every heading at `level` or deeper.
    fn close_headings(&mut self, level: usize) {
        while let Some(top) = self.stack.last() {
            let closes = match top.kind {
                FrameKind::Root => false,
                FrameKind::Item => true,
                FrameKind::Heading(open) => open >= level,
            };
            if !closes {
                break;
            }
            self.pop_into_parent();
        }
    }

    fn close_item(&mut self) {
        while let Some(top) = self.stack.last() {
            match top.kind {
                FrameKind::Root => break,
                FrameKind::Item => {
                    self.pop_into_parent();
                    break;
                }
                FrameKind::Heading(_) => self.pop_into_parent(),
            }
        }
    }

    fn pop_into_parent(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let Some(frame) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.node.children.push(frame.node);
            }
        }
    }

    fn finish(mut self) -> OutlineNode {
        self.flush();
        while self.stack.len() > 1 {
            self.pop_into_parent();
        }

        let mut root = self
            .stack
            .pop()
            .map(|frame| frame.node)
            .unwrap_or_default();

        if root.content.is_empty() && root.children.len() == 1 {
            root = root.children.remove(0);
        }
        root
    }
}

fn collapse_inline(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
