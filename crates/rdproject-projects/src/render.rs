//! Property file rendering
//!
//! Templates are looked up by namespace (the project's cookbook) and name:
//! first under the configured templates directory as
//! `<templates_dir>/<namespace>/<template>`, then among the templates
//! embedded in the binary.

use crate::error::{Error, Result};
use crate::fs::{apply_attrs, FileAttrs};
use crate::value::PropertyMap;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use tera::{Context, Tera, Value};
use tracing::{debug, info};

/// Built-in template namespaces
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates/"]
struct EmbeddedTemplates;

/// One property file to render
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Template name within the namespace
    pub template: &'a str,
    /// Template namespace
    pub namespace: &'a str,
    /// Mode and ownership of the written file
    pub attrs: &'a FileAttrs,
    /// Exposed to the template as `properties`
    pub properties: &'a PropertyMap,
}

/// Renders a property map into a file
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, dest: &Utf8Path, request: &RenderRequest<'_>) -> Result<()>;
}

/// Tera-backed renderer
#[derive(Debug, Clone, Default)]
pub struct TeraRenderer {
    templates_dir: Option<Utf8PathBuf>,
}

impl TeraRenderer {
    /// Renderer using only the embedded templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer preferring templates found under `dir`
    pub fn with_templates_dir(dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            templates_dir: Some(dir.into()),
        }
    }

    /// Source of `<namespace>/<template>`
    pub fn load_template(&self, namespace: &str, template: &str) -> Result<String> {
        if let Some(dir) = &self.templates_dir {
            let path = dir.join(namespace).join(template);
            if path.is_file() {
                debug!("Using template {}", path);
                return fs::read_to_string(&path).map_err(|e| Error::io(path, e));
            }
        }

        let key = format!("{}/{}", namespace, template);
        let file = EmbeddedTemplates::get(&key)
            .ok_or_else(|| Error::template_not_found(namespace, template))?;
        debug!("Using embedded template {}", key);

        String::from_utf8(file.data.into_owned()).map_err(|e| {
            Error::io(key, io::Error::new(io::ErrorKind::InvalidData, e))
        })
    }

    /// Render without writing anything
    pub fn render_to_string(
        &self,
        namespace: &str,
        template: &str,
        properties: &PropertyMap,
    ) -> Result<String> {
        let source = self.load_template(namespace, template)?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("escape_key", escape_key_filter);
        tera.register_filter("escape_value", escape_value_filter);
        tera.add_raw_template(template, &source)?;

        let mut context = Context::new();
        context.insert("properties", &properties.to_string_map());

        Ok(tera.render(template, &context)?)
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, dest: &Utf8Path, request: &RenderRequest<'_>) -> Result<()> {
        let content =
            self.render_to_string(request.namespace, request.template, request.properties)?;

        let current = match fs::read_to_string(dest) {
            Ok(current) => Some(current),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(Error::io(dest, e)),
        };

        if current.as_deref() == Some(content.as_str()) {
            debug!("{} is up to date", dest);
        } else {
            fs::write(dest, &content).map_err(|e| Error::io(dest, e))?;
            info!(
                "Wrote {} ({} properties)",
                dest,
                request.properties.len()
            );
        }

        apply_attrs(dest, request.attrs)
    }
}

fn escape_key_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let key = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("escape_key expects a string"))?;
    Ok(Value::String(escape_key(key)))
}

fn escape_value_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("escape_value expects a string"))?;
    Ok(Value::String(escape_value(text)))
}

/// Escape a property key so it is read back whole
///
/// Separators, whitespace and comment markers are backslash-escaped along
/// with backslashes and line terminators.
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            ' ' | '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            _ => push_escaped(&mut out, c),
        }
    }
    out
}

/// Escape a property value so it stays on one line
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        // Leading whitespace of a value is dropped by readers
        if i == 0 && c == ' ' {
            out.push_str("\\ ");
        } else {
            push_escaped(&mut out, c);
        }
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\x0c' => out.push_str("\\f"),
        _ => out.push(c),
    }
}

/// Read a property file back into a map
///
/// Follows the Java properties format: blank lines and `#`/`!` comments are
/// skipped, a trailing odd backslash continues the line, the key ends at the
/// first unescaped `=`, `:` or whitespace, and escapes are decoded.
pub fn parse_properties(text: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let line = line.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        properties.insert(unescape(key), unescape(value));
    }

    properties
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into its raw key and value
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], line[i + 1..].trim_start_matches(is_blank)),
            c if is_blank(c) => {
                let rest = line[i..].trim_start_matches(is_blank);
                let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
                return (&line[..i], rest.trim_start_matches(is_blank));
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}
