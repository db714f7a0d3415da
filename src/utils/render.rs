use thiserror::Error;

use crate::models::PageModel;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const PLACEHOLDERS: [&str; 4] = ["{{title}}", "{{subtitle}}", "{{input}}", "{{results}}"];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template is missing placeholder {0}")]
    MissingPlaceholder(&'static str),
}

pub trait PageRenderer: Send + Sync {
    fn render(&self, model: &PageModel) -> String;
}

/// Renders the search page from an HTML template with `{{name}}` placeholders.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    template: String,
}

impl HtmlRenderer {
    pub fn from_template(template: impl Into<String>) -> Result<Self, RenderError> {
        let template = template.into();
        for placeholder in PLACEHOLDERS {
            if !template.contains(placeholder) {
                return Err(RenderError::MissingPlaceholder(placeholder));
            }
        }
        Ok(Self { template })
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            template: INDEX_TEMPLATE.to_string(),
        }
    }
}

impl PageRenderer for HtmlRenderer {
    /// Single pass over the template, so substituted text is never rescanned.
    fn render(&self, model: &PageModel) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match PLACEHOLDERS.iter().find(|p| tail.starts_with(**p)) {
                Some(placeholder) => {
                    out.push_str(&placeholder_value(placeholder, model));
                    rest = &tail[placeholder.len()..];
                }
                None => {
                    out.push_str("{{");
                    rest = &tail[2..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

fn placeholder_value(placeholder: &str, model: &PageModel) -> String {
    match placeholder {
        "{{title}}" => escape_html(&model.title),
        "{{subtitle}}" => escape_html(&model.subtitle),
        "{{input}}" => escape_html(&model.input),
        "{{results}}" => render_results(model),
        _ => String::new(),
    }
}

fn render_results(model: &PageModel) -> String {
    if model.responses.is_empty() {
        return String::new();
    }

    let mut html = String::from("    <ol class=\"results\">\n");
    for result in &model.responses {
        // htmlTitle and htmlSnippet are provider markup (<b> highlighting) over
        // documents from the configured data store; they are not user input.
        html.push_str(&format!(
            "        <li>\n            <a href=\"{href}\">{title}</a>\n            <div class=\"url\">{url}</div>\n            <p>{snippet}</p>\n        </li>\n",
            href = escape_html(safe_href(&result.url)),
            url = escape_html(&result.url),
            title = result.title,
            snippet = result.snippet,
        ));
    }
    html.push_str("    </ol>\n");
    html
}

/// Only http(s) links and fragments are clickable; anything else points at `#`.
fn safe_href(url: &str) -> &str {
    let lower = url.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with('#') {
        url
    } else {
        "#"
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
