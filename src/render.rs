//! HTML for the widget, and the explicit mount into a host page.

use std::collections::VecDeque;

use scraper::Html;

use crate::data_models::{FormInput, RelativeResult};
use crate::error::MountError;
use crate::widget::WidgetState;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders the form (keeping the typed values) followed by either the error
/// line or the result card.
pub fn render_widget(state: &WidgetState, input: &FormInput) -> String {
    let (disabled, label) = if state.submit_enabled() {
        ("", "Find Famous Relatives")
    } else {
        (" disabled", "Searching...")
    };

    let error_html = state
        .error
        .as_deref()
        .map(|e| format!(r#"<p class="relfinder-error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    let result_html = state.result.as_ref().map(render_result).unwrap_or_default();

    format!(
        r#"<div class="relfinder">
  <h1>Famous Relative Finder</h1>
  <form method="post" action="/" class="relfinder-form" onsubmit="var b=this.querySelector('button');b.disabled=true;b.textContent='Searching...';">
    <input type="text" name="fullName" placeholder="Full Name (First and Last)" value="{full_name}" required>
    <input type="text" name="birthYear" placeholder="Birth Year (e.g., 1990)" value="{birth_year}" required>
    <input type="text" name="birthPlace" placeholder="Birthplace (City, State, Country)" value="{birth_place}" required>
    <button type="submit"{disabled}>{label}</button>
  </form>
  {error_html}{result_html}
</div>"#,
        full_name = escape_html(&input.full_name),
        birth_year = escape_html(&input.birth_year),
        birth_place = escape_html(&input.birth_place),
    )
}

fn render_result(result: &RelativeResult) -> String {
    let steps: String = result
        .path
        .iter()
        .map(|step| format!("<li>{}</li>", escape_html(step)))
        .collect();

    format!(
        r#"<div class="relfinder-result">
    <h2>🎉 Match Found!</h2>
    <p>You are a <strong>{}</strong> of <strong>{}</strong>!</p>
    <h3>Family Tree Path:</h3>
    <ul>{}</ul>
    <p class="relfinder-confidence">Confidence Level: {}</p>
  </div>"#,
        escape_html(&result.relation),
        escape_html(&result.famous_person),
        steps,
        escape_html(&result.confidence),
    )
}

/// Plain-text rendering of a terminal state, for the command line.
pub fn render_text(state: &WidgetState) -> String {
    if let Some(error) = &state.error {
        return error.clone();
    }
    match &state.result {
        Some(result) => {
            let mut out = format!(
                "Match Found! You are a {} of {}!\nFamily Tree Path:\n",
                result.relation, result.famous_person
            );
            for step in &result.path {
                out.push_str(&format!("  - {step}\n"));
            }
            out.push_str(&format!("Confidence Level: {}", result.confidence));
            out
        }
        None if state.loading => "Searching...".to_string(),
        None => String::new(),
    }
}

/// Mounts `widget_html` as the content of the element with id `container_id`
/// and returns the re-serialized host page.
///
/// The host page must contain that element; otherwise nothing is mounted and
/// `MountError::ContainerMissing` is returned.
pub fn mount(host_page: &str, container_id: &str, widget_html: &str) -> Result<String, MountError> {
    let mut document = Html::parse_document(host_page);
    let container = document
        .root_element()
        .descendants()
        .find(|node| {
            node.value()
                .as_element()
                .is_some_and(|el| el.id() == Some(container_id))
        })
        .map(|node| node.id())
        .ok_or_else(|| MountError::ContainerMissing(container_id.to_string()))?;

    // parse_fragment wraps the nodes in an <html> element
    let fragment = Html::parse_fragment(widget_html);
    let mut pending: VecDeque<_> = fragment
        .root_element()
        .children()
        .map(|child| (container, child))
        .collect();
    while let Some((parent, node)) = pending.pop_front() {
        let Some(mut parent) = document.tree.get_mut(parent) else {
            continue;
        };
        let copied = parent.append(node.value().clone()).id();
        pending.extend(node.children().map(|child| (copied, child)));
    }

    Ok(document.html())
}
