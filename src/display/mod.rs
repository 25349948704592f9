//! Side-by-side display of several objects.
//!
//! Objects are looked up by name in an explicit [`Context`] or passed in
//! directly, then combined into a [`Composite`] that has both a rich (HTML)
//! and a plain-text rendering. Picking one is up to the presentation layer.
//!
//! ```
//! use std::sync::Arc;
//! use rusty_eda::data::model::{Column, Table};
//! use rusty_eda::display::{Composite, Context, DisplayItem};
//!
//! let df = Table::new(vec![Column::integer("x", [Some(1), Some(2)])]).unwrap();
//! let context = Context::new().with("df", Arc::new(df));
//!
//! let composite = Composite::resolve(["df".into()], &context).unwrap();
//! assert!(composite.to_plain().starts_with("df\n"));
//! assert!(composite.to_html().contains("<th>x</th>"));
//!
//! let missing = Composite::resolve([DisplayItem::from("nope")], &context);
//! assert!(missing.is_err());
//! ```

pub mod html;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::data::model::Table;
use crate::error::{EdaError, Result};
use crate::summary::{Summary, SummaryRow};

// ---------------------------------------------------------------------------
// Renderable – what an object can show
// ---------------------------------------------------------------------------

/// Something that can be displayed. Every object has a plain-text form; a
/// rich (HTML) form is optional.
pub trait Renderable {
    fn render_plain(&self) -> String;

    fn render_html(&self) -> Option<String> {
        None
    }
}

impl Renderable for String {
    fn render_plain(&self) -> String {
        self.clone()
    }
}

impl Renderable for &str {
    fn render_plain(&self) -> String {
        (*self).to_string()
    }
}

impl Renderable for Table {
    fn render_plain(&self) -> String {
        self.to_pretty_string().unwrap_or_else(|e| {
            log::error!("failed to render table as text: {e}");
            format!("<table: {e}>")
        })
    }

    fn render_html(&self) -> Option<String> {
        let rendered = self
            .to_record_batch()
            .and_then(|batch| html::record_batch_to_html(&batch));
        match rendered {
            Ok(markup) => Some(markup),
            Err(e) => {
                log::error!("failed to render table as HTML: {e}");
                None
            }
        }
    }
}

impl<R: SummaryRow> Renderable for Summary<R> {
    fn render_plain(&self) -> String {
        self.to_pretty_string().unwrap_or_else(|e| {
            log::error!("failed to render summary as text: {e}");
            format!("<summary: {e}>")
        })
    }

    fn render_html(&self) -> Option<String> {
        let rendered = self
            .to_record_batch()
            .and_then(|batch| html::record_batch_to_html(&batch));
        match rendered {
            Ok(markup) => Some(markup),
            Err(e) => {
                log::error!("failed to render summary as HTML: {e}");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Context – explicit name → object mapping
// ---------------------------------------------------------------------------

/// Objects available to [`DisplayItem::Name`] lookups.
#[derive(Clone, Default)]
pub struct Context {
    objects: BTreeMap<String, Arc<dyn Renderable>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, object: Arc<dyn Renderable>) {
        self.objects.insert(name.into(), object);
    }

    /// Builder-style [`Context::insert`].
    pub fn with(mut self, name: impl Into<String>, object: Arc<dyn Renderable>) -> Self {
        self.insert(name, object);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Renderable>> {
        self.objects.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("names", &self.objects.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DisplayItem / Composite
// ---------------------------------------------------------------------------

/// One argument to [`Composite::resolve`].
pub enum DisplayItem {
    /// Looked up in the context; the name becomes the label.
    Name(String),
    /// Used as-is; its plain text becomes the label.
    Object(Arc<dyn Renderable>),
}

impl From<&str> for DisplayItem {
    fn from(name: &str) -> Self {
        DisplayItem::Name(name.to_string())
    }
}

impl From<String> for DisplayItem {
    fn from(name: String) -> Self {
        DisplayItem::Name(name)
    }
}

impl From<Arc<dyn Renderable>> for DisplayItem {
    fn from(object: Arc<dyn Renderable>) -> Self {
        DisplayItem::Object(object)
    }
}

/// Resolved objects with their labels, in argument order.
#[derive(Clone)]
pub struct Composite {
    entries: Vec<(String, Arc<dyn Renderable>)>,
}

impl Composite {
    /// Resolve every item; fails on the first name missing from `context`.
    pub fn resolve<I>(items: I, context: &Context) -> Result<Self>
    where
        I: IntoIterator<Item = DisplayItem>,
    {
        let entries = items
            .into_iter()
            .map(|item| match item {
                DisplayItem::Name(name) => match context.get(&name) {
                    Some(object) => Ok((name, Arc::clone(object))),
                    None => Err(EdaError::NameResolution { name }),
                },
                DisplayItem::Object(object) => Ok((object.render_plain(), object)),
            })
            .collect::<Result<Vec<_>>>()?;
        log::debug!("resolved {} display items", entries.len());
        Ok(Composite { entries })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// Labelled blocks floated side by side, one per object.
    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .map(|(label, object)| {
                let content = object
                    .render_html()
                    .unwrap_or_else(|| html::preformatted(&object.render_plain()));
                html::labelled_block(label, &content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Each label on its own line followed by the object's text, blocks
    /// separated by a blank line.
    pub fn to_plain(&self) -> String {
        self.entries
            .iter()
            .map(|(label, object)| format!("{label}\n{}", object.render_plain()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain())
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("labels", &self.labels())
            .finish()
    }
}

impl Renderable for Composite {
    fn render_plain(&self) -> String {
        self.to_plain()
    }

    fn render_html(&self) -> Option<String> {
        Some(self.to_html())
    }
}
