//! The small CSS selector subset understood by [`super::MemoryDom`].
//!
//! Supported: type (`div`, `*`), `#id`, `.class`, `[attr]`, `[attr=value]`
//! (value optionally quoted), compounds of those (`button.btn.active`) and
//! the descendant combinator (whitespace). Anything else fails to parse.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, Option<String>)>,
}

/// Descendant chain, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(raw: &str) -> Option<Self> {
        let parts = raw
            .split_whitespace()
            .map(parse_compound)
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() {
            None
        } else {
            Some(Self { parts })
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Part {
    Tag,
    Class,
    Id,
}

fn parse_compound(raw: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut kind = Part::Tag;
    let mut buf = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' | '#' | '[' => {
                flush(&mut compound, kind, &mut buf)?;
                match c {
                    '.' => kind = Part::Class,
                    '#' => kind = Part::Id,
                    _ => {
                        let body: String = chars.by_ref().take_while(|&c| c != ']').collect();
                        compound.attributes.push(parse_attribute(&body)?);
                        // Only another simple selector may follow `]`.
                        kind = Part::Tag;
                    }
                }
            }
            ']' => return None,
            _ => buf.push(c),
        }
    }
    flush(&mut compound, kind, &mut buf)?;
    Some(compound)
}

fn flush(compound: &mut Compound, kind: Part, buf: &mut String) -> Option<()> {
    let name = std::mem::take(buf);
    match kind {
        Part::Tag => {
            if !name.is_empty() {
                // Type selectors only make sense at the start of a compound.
                if compound.tag.is_some()
                    || compound.id.is_some()
                    || !compound.classes.is_empty()
                    || !compound.attributes.is_empty()
                {
                    return None;
                }
                if name != "*" {
                    compound.tag = Some(name.to_ascii_lowercase());
                }
            }
        }
        Part::Class => {
            if name.is_empty() {
                return None;
            }
            compound.classes.push(name);
        }
        Part::Id => {
            if name.is_empty() {
                return None;
            }
            compound.id = Some(name);
        }
    }
    Some(())
}

fn parse_attribute(body: &str) -> Option<(String, Option<String>)> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (name.trim(), Some(value.to_string()))
        }
        None => (body.trim(), None),
    };
    if name.is_empty() {
        None
    } else {
        Some((name.to_string(), value))
    }
}
