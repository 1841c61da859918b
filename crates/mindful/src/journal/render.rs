//! Pure rendering of the entry list into a markup tree.
//!
//! [`render_entries`] builds a [`Node`] tree from the collection; turning the
//! tree into bytes on a screen is an [`EntryView`](super::EntryView)'s job.
//! Entry content and formatted insights are inserted as raw markup, the same
//! way the browser page injected them.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use super::entry::Entry;
use crate::format::format_response;

/// Markup tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element {
        tag: &'static str,
        class: Option<&'static str>,
        children: Vec<Node>,
    },
    /// Escaped on output.
    Text(String),
    /// Emitted verbatim.
    Raw(String),
    /// Children without a wrapping element.
    Fragment(Vec<Node>),
}

impl Node {
    pub fn element(tag: &'static str, children: Vec<Node>) -> Self {
        Node::Element {
            tag,
            class: None,
            children,
        }
    }

    pub fn with_class(tag: &'static str, class: &'static str, children: Vec<Node>) -> Self {
        Node::Element {
            tag,
            class: Some(class),
            children,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Node::Raw(s.into())
    }

    /// Serialize the tree to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element {
                tag,
                class,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                if let Some(class) = class {
                    out.push_str(" class=\"");
                    out.push_str(class);
                    out.push('"');
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            Node::Text(s) => escape_into(s, out),
            Node::Raw(s) => out.push_str(s),
            Node::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
        }
    }
}

fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Format a timestamp the way `Date.toLocaleString()` does for `en-US`,
/// e.g. `3/9/2024, 12:00:00 PM`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    date.with_timezone(tz)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Build the contents of the entry list region.
///
/// An empty journal renders a single "No entries yet" paragraph; otherwise
/// one card per entry, in collection order.
pub fn render_entries(entries: &[Entry]) -> Node {
    if entries.is_empty() {
        return Node::Fragment(vec![Node::element("p", vec![Node::text("No entries yet")])]);
    }
    Node::Fragment(entries.iter().map(render_entry).collect())
}

fn render_entry(entry: &Entry) -> Node {
    Node::with_class(
        "div",
        "entry-card",
        vec![
            Node::element("h3", vec![Node::text(entry.kind.label())]),
            Node::with_class(
                "div",
                "date",
                vec![Node::text(format_date(&entry.date, &Local))],
            ),
            Node::with_class("div", "content", vec![Node::raw(&entry.content)]),
            Node::with_class(
                "div",
                "insights",
                vec![Node::raw(format_response(&entry.insights))],
            ),
        ],
    )
}

/// Wrap rendered entries in a standalone HTML page.
pub fn render_page(entries_markup: &Node) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Mindful Moments</title>\n\
         <style>{PAGE_STYLE}</style>\n\
         </head>\n\
         <body>\n\
         <h1>Your Journal</h1>\n\
         <div id=\"entries-container\">{}</div>\n\
         </body>\n\
         </html>\n",
        entries_markup.to_html()
    )
}

const PAGE_STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem;color:#2d3436}\
.entry-card{border:1px solid #dfe6e9;border-radius:8px;padding:1rem;margin-bottom:1rem}\
.entry-card h3{margin:0 0 .25rem}.date{color:#636e72;font-size:.85rem;margin-bottom:.5rem}\
.content{font-style:italic;margin-bottom:.5rem}";
