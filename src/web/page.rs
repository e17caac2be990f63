//! HTML rendering for the conversion form.

use crate::core::conversion::Severity;
use crate::core::currency::SUPPORTED_CURRENCIES;
use std::fmt::Write;

/// Everything the page echoes back to the user.
#[derive(Debug, Default)]
pub struct PageView {
    pub amount: String,
    pub from_currency: String,
    pub to_currency: String,
    pub message: Option<(Severity, String)>,
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #f5f6f8; margin: 0; }
main { max-width: 28rem; margin: 4rem auto; background: #fff; padding: 2rem; border-radius: .5rem; box-shadow: 0 1px 4px rgba(0,0,0,.1); }
label { display: block; margin-top: 1rem; font-weight: 600; }
input, select, button { width: 100%; padding: .5rem; margin-top: .25rem; box-sizing: border-box; }
button { margin-top: 1.5rem; background: #0d6efd; color: #fff; border: 0; border-radius: .25rem; cursor: pointer; }
.alert { margin-top: 1.5rem; padding: .75rem 1rem; border-radius: .25rem; }
.alert-success { background: #d1e7dd; color: #0f5132; }
.alert-warning { background: #fff3cd; color: #664d03; }
.alert-danger { background: #f8d7da; color: #842029; }
"#;

pub fn render_page(view: &PageView) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Currency Converter</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<main>\n<h1>Currency Converter</h1>\n");
    html.push_str("<form method=\"post\" action=\"/\">\n");

    let _ = writeln!(
        html,
        "<label for=\"amount\">Amount</label>\n\
         <input id=\"amount\" name=\"amount\" type=\"text\" inputmode=\"decimal\" placeholder=\"100,00\" value=\"{}\">",
        escape(&view.amount)
    );
    push_select(&mut html, "fromCurrency", "From", &view.from_currency);
    push_select(&mut html, "toCurrency", "To", &view.to_currency);
    html.push_str("<button type=\"submit\">Convert</button>\n</form>\n");

    if let Some((severity, text)) = &view.message {
        let _ = writeln!(
            html,
            "<div class=\"alert alert-{severity}\" role=\"alert\">{}</div>",
            escape(text)
        );
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn push_select(html: &mut String, name: &str, label: &str, selected: &str) {
    let _ = writeln!(html, "<label for=\"{name}\">{label}</label>");
    let _ = writeln!(html, "<select id=\"{name}\" name=\"{name}\">");
    for (code, description) in SUPPORTED_CURRENCIES {
        let marker = if *code == selected { " selected" } else { "" };
        let _ = writeln!(html, "<option value=\"{code}\"{marker}>{description}</option>");
    }
    html.push_str("</select>\n");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
