use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{SelectorError, SelectorResult};
use crate::record::Record;

static FIELD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"%:([[:word:]]+)%").expect("valid regex"));
static HIGHLIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(\S*?)\]\]").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Text(String),
    Field(String),
    Highlight(Vec<TemplatePart>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Highlight(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Highlight(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<TemplatePart>,
}

impl Template {
    pub fn parse(source: &str) -> SelectorResult<Self> {
        if source.is_empty() {
            return Err(SelectorError::configuration("template is required"));
        }
        Ok(Self {
            parts: parse_parts(source),
        })
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        collect_fields(&self.parts, &mut fields);
        fields
    }

    /// Highlight regions mark the first occurrence of `input` only when the
    /// interpolated region contains it.
    pub fn render(&self, record: &Record, input: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        for part in &self.parts {
            match part {
                TemplatePart::Text(_) | TemplatePart::Field(_) => {
                    push_plain(&mut segments, &interpolate(part, record));
                }
                TemplatePart::Highlight(inner) => {
                    let region: String = inner.iter().map(|p| interpolate(p, record)).collect();
                    match find_highlight(&region, input) {
                        Some(pos) => {
                            push_plain(&mut segments, &region[..pos]);
                            segments.push(Segment::Highlight(input.to_string()));
                            push_plain(&mut segments, &region[pos + input.len()..]);
                        }
                        None => push_plain(&mut segments, &region),
                    }
                }
            }
        }
        segments
    }

    pub fn render_text(&self, record: &Record) -> String {
        self.render(record, "")
            .iter()
            .map(Segment::text)
            .collect()
    }
}

fn find_highlight(region: &str, input: &str) -> Option<usize> {
    if input.is_empty() {
        return None;
    }
    region.find(input)
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Plain(last)) = segments.last_mut() {
        last.push_str(text);
        return;
    }
    segments.push(Segment::Plain(text.to_string()));
}

fn interpolate(part: &TemplatePart, record: &Record) -> String {
    match part {
        TemplatePart::Text(text) => text.clone(),
        TemplatePart::Field(name) => record.field_or_empty(name).into_owned(),
        TemplatePart::Highlight(inner) => inner.iter().map(|p| interpolate(p, record)).collect(),
    }
}

fn collect_fields(parts: &[TemplatePart], fields: &mut Vec<String>) {
    for part in parts {
        match part {
            TemplatePart::Text(_) => {}
            TemplatePart::Field(name) => {
                if !fields.contains(name) {
                    fields.push(name.clone());
                }
            }
            TemplatePart::Highlight(inner) => collect_fields(inner, fields),
        }
    }
}

fn parse_parts(source: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut last = 0;
    for caps in HIGHLIGHT_RE.captures_iter(source) {
        let (Some(region), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        parts.extend(parse_fields(&source[last..region.start()]));
        parts.push(TemplatePart::Highlight(parse_fields(inner.as_str())));
        last = region.end();
    }
    parts.extend(parse_fields(&source[last..]));
    parts
}

fn parse_fields(text: &str) -> Vec<TemplatePart> {
    let mut parts = Vec::new();
    let mut last = 0;
    for caps in FIELD_RE.captures_iter(text) {
        let (Some(placeholder), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if placeholder.start() > last {
            parts.push(TemplatePart::Text(text[last..placeholder.start()].to_string()));
        }
        parts.push(TemplatePart::Field(name.as_str().to_string()));
        last = placeholder.end();
    }
    if last < text.len() {
        parts.push(TemplatePart::Text(text[last..].to_string()));
    }
    parts
}
