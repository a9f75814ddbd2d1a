//! Markdown to HTML conversion for the dictionary document.
//!
//! Tables get a wrapper element and alignment classes instead of the inline
//! `style` attributes pulldown-cmark emits by default.

use pulldown_cmark::{Alignment, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::app::error::DictionaryError;

/// How rendered tables are decorated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    /// Element and class wrapped around every table; `None` disables wrapping.
    pub wrap: Option<(String, String)>,
    pub left_class: String,
    pub center_class: String,
    pub right_class: String,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            wrap: Some(("div".to_string(), "table-responsive".to_string())),
            left_class: "text-start".to_string(),
            center_class: "text-center".to_string(),
            right_class: "text-end".to_string(),
        }
    }
}

impl TableStyle {
    fn class_for(&self, alignment: Alignment) -> Option<&str> {
        match alignment {
            Alignment::None => None,
            Alignment::Left => Some(self.left_class.as_str()),
            Alignment::Center => Some(self.center_class.as_str()),
            Alignment::Right => Some(self.right_class.as_str()),
        }
    }
}

pub struct HtmlExporter {
    database: String,
    style: TableStyle,
}

impl HtmlExporter {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            style: TableStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn title(&self) -> String {
        format!("Data Dictionary {}", title_case(&self.database))
    }

    /// Converts `markdown` and wraps it in a standalone document.
    pub fn to_html(&self, markdown: &str) -> Result<String, DictionaryError> {
        let fragment = self.to_fragment(markdown)?;

        Ok(format!(
            "<!DOCTYPE html><html><head><title>{}</title></head><body>{}</body></html>",
            escape_text(&self.title()),
            fragment
        ))
    }

    /// Converts `markdown` to an HTML fragment with the table style applied.
    pub fn to_fragment(&self, markdown: &str) -> Result<String, DictionaryError> {
        let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
        let mut state = TableState::default();
        let events = parser.flat_map(|event| self.rewrite(event, &mut state));

        let mut fragment = String::with_capacity(markdown.len() * 2);
        html::write_html_fmt(&mut fragment, events)
            .map_err(|e| DictionaryError::Conversion(e.to_string()))?;

        Ok(fragment)
    }

    fn rewrite<'a>(&self, event: Event<'a>, state: &mut TableState) -> Vec<Event<'a>> {
        match event {
            Event::Start(Tag::Table(alignments)) => {
                let mut events = Vec::with_capacity(2);
                if let Some((tag, class)) = &self.style.wrap {
                    events.push(raw(format!(
                        "<{} class=\"{}\">",
                        tag,
                        escape_text(class)
                    )));
                }
                state.alignments = alignments.clone();
                events.push(Event::Start(Tag::Table(alignments)));
                events
            }
            Event::End(TagEnd::Table) => {
                let mut events = vec![Event::End(TagEnd::Table)];
                if let Some((tag, _)) = &self.style.wrap {
                    events.push(raw(format!("</{tag}>")));
                }
                state.alignments.clear();
                events
            }
            Event::Start(Tag::TableHead) => {
                state.in_head = true;
                state.cell = 0;
                vec![Event::Start(Tag::TableHead)]
            }
            Event::End(TagEnd::TableHead) => {
                state.in_head = false;
                vec![Event::End(TagEnd::TableHead)]
            }
            Event::Start(Tag::TableRow) => {
                state.cell = 0;
                vec![Event::Start(Tag::TableRow)]
            }
            Event::Start(Tag::TableCell) => {
                let element = state.element();
                let alignment = state
                    .alignments
                    .get(state.cell)
                    .copied()
                    .unwrap_or(Alignment::None);
                let open = match self.style.class_for(alignment) {
                    Some(class) => format!("<{element} class=\"{}\">", escape_text(class)),
                    None => format!("<{element}>"),
                };
                vec![raw(open)]
            }
            Event::End(TagEnd::TableCell) => {
                let element = state.element();
                state.cell += 1;
                vec![raw(format!("</{element}>"))]
            }
            other => vec![other],
        }
    }
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

impl TableState {
    fn element(&self) -> &'static str {
        if self.in_head { "th" } else { "td" }
    }
}

fn raw<'a>(html: String) -> Event<'a> {
    Event::InlineHtml(CowStr::from(html))
}

/// `breeze_marketplace-db` becomes `Breeze Marketplace Db`.
pub fn title_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
