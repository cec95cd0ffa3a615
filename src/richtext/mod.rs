//! Block-content model and HTML serializer for rich-text post bodies.
//!
//! The content store delivers post bodies as a flat array of typed blocks:
//! text blocks carry a style (`normal`, `h1`..`h4`, `blockquote`), optional
//! list membership, and a list of spans whose marks either name a decorator
//! (`strong`, `em`, ...) or reference a mark definition such as a hyperlink.
//!
//! Rendering rules are dispatched over the closed [`BlockStyle`] enum.
//! Unknown styles fall back to paragraph rendering, unknown marks render
//! their children unwrapped, and unknown block types are skipped entirely.

use maud::{html, Markup};
use serde::Deserialize;

/// One node of a rich-text body.
///
/// Only text blocks are rendered; anything else the store might embed
/// deserializes to [`Block::Unknown`] and is skipped by the serializer.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "_type")]
pub enum Block {
    #[serde(rename = "block")]
    Text(TextBlock),
    #[serde(other)]
    Unknown,
}

/// A text block: style, optional list membership, and child spans.
#[derive(Debug, Clone, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub style: BlockStyle,
    #[serde(default, rename = "listItem")]
    pub list_item: Option<ListKind>,
    #[serde(default)]
    pub children: Vec<Span>,
    #[serde(default, rename = "markDefs")]
    pub mark_defs: Vec<MarkDef>,
}

/// The closed set of block styles this renderer knows.
///
/// `Other` absorbs any style the store introduces later; it renders as a
/// plain paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockStyle {
    #[default]
    Normal,
    H1,
    H2,
    H3,
    H4,
    Blockquote,
    Other,
}

impl<'de> Deserialize<'de> for BlockStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = BlockStyle;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("block style")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(match v {
                    "normal" => BlockStyle::Normal,
                    "h1" => BlockStyle::H1,
                    "h2" => BlockStyle::H2,
                    "h3" => BlockStyle::H3,
                    "h4" => BlockStyle::H4,
                    "blockquote" => BlockStyle::Blockquote,
                    _ => BlockStyle::Other,
                })
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

/// List flavor of a list-item block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
    Other,
}

impl<'de> Deserialize<'de> for ListKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = ListKind;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("list kind")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(match v {
                    "bullet" => ListKind::Bullet,
                    "number" => ListKind::Number,
                    _ => ListKind::Other,
                })
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

/// An inline child of a text block.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "_type")]
pub enum Span {
    #[serde(rename = "span")]
    Text(TextSpan),
    #[serde(other)]
    Unknown,
}

/// A run of text with zero or more marks applied.
#[derive(Debug, Clone, Deserialize)]
pub struct TextSpan {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

/// A mark definition referenced by key from span marks (e.g. hyperlinks).
#[derive(Debug, Clone, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Serialize a rich-text body into markup.
///
/// Adjacent list items of the same kind are grouped into a single `<ul>`
/// or `<ol>`; any other block breaks the run. The output is a pure
/// function of the input.
#[must_use]
pub fn render_blocks(blocks: &[Block]) -> Markup {
    let mut pieces: Vec<Markup> = Vec::new();
    let mut i = 0;

    while i < blocks.len() {
        let Block::Text(block) = &blocks[i] else {
            i += 1;
            continue;
        };

        if let Some(kind) = block.list_item {
            let mut items: Vec<&TextBlock> = Vec::new();
            while i < blocks.len() {
                match &blocks[i] {
                    Block::Text(b) if b.list_item == Some(kind) => {
                        items.push(b);
                        i += 1;
                    }
                    _ => break,
                }
            }
            pieces.push(render_list(kind, &items));
        } else {
            pieces.push(render_text_block(block));
            i += 1;
        }
    }

    html! {
        @for piece in &pieces {
            (piece)
        }
    }
}

/// Render one non-list text block according to its style.
fn render_text_block(block: &TextBlock) -> Markup {
    let spans = render_spans(&block.children, &block.mark_defs);

    match block.style {
        BlockStyle::H1 => html! { h1 { (spans) } },
        BlockStyle::H2 => html! { h2 { (spans) } },
        BlockStyle::H3 => html! { h3 { (spans) } },
        BlockStyle::H4 => html! { h4 { (spans) } },
        BlockStyle::Blockquote => html! { blockquote { (spans) } },
        BlockStyle::Normal | BlockStyle::Other => html! { p { (spans) } },
    }
}

/// Render a run of same-kind list items as one list element.
fn render_list(kind: ListKind, items: &[&TextBlock]) -> Markup {
    let rendered = html! {
        @for item in items {
            li { (render_spans(&item.children, &item.mark_defs)) }
        }
    };

    match kind {
        ListKind::Number => html! { ol { (rendered) } },
        ListKind::Bullet | ListKind::Other => html! { ul { (rendered) } },
    }
}

/// Render the spans of a block, applying marks from the outside in.
fn render_spans(children: &[Span], defs: &[MarkDef]) -> Markup {
    html! {
        @for child in children {
            @if let Span::Text(span) = child {
                (render_marked(&span.text, &span.marks, defs))
            }
        }
    }
}

/// Wrap `text` in the elements its marks call for.
///
/// Decorator marks map to fixed elements; any other mark names a mark
/// definition, of which only `link` produces an element. Marks that
/// resolve to nothing render their content unwrapped.
fn render_marked(text: &str, marks: &[String], defs: &[MarkDef]) -> Markup {
    let Some((mark, rest)) = marks.split_first() else {
        return html! { (text) };
    };

    let inner = render_marked(text, rest, defs);
    match mark.as_str() {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "underline" => html! { u { (inner) } },
        "code" => html! { code { (inner) } },
        "strike-through" => html! { s { (inner) } },
        key => match defs.iter().find(|d| d.key == key) {
            Some(def) if def.kind == "link" => match def.href.as_deref() {
                Some(href) => html! { a href=(href) { (inner) } },
                None => inner,
            },
            _ => inner,
        },
    }
}
