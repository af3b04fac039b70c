//! Home page rendering.

const HOME_TEMPLATE: &str = include_str!("../../templates/home.html");
const PREDICTION_SLOT: &str = "{{ prediction_text }}";

/// Human-readable prediction line embedded in the page.
///
/// Integral values keep their decimal point (`3.0`), matching the
/// shortest round-trip float form.
pub fn prediction_text(price: f64) -> String {
    format!("Predicted House Price: {:?}", price)
}

/// Render the input form, optionally with a prediction line.
pub fn render_home(prediction_text: Option<&str>) -> String {
    HOME_TEMPLATE.replace(PREDICTION_SLOT, &escape_html(prediction_text.unwrap_or("")))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
