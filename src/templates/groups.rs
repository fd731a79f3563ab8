//! Rendering of group search results.
//!
//! This is the server-side twin of `loadGroups()` in the landing page script:
//! same markup, same fallbacks, same three outcomes (blocks, empty state,
//! inline error). The fragment route uses it directly.

use serde_json::Value;

use super::components::html_escape;
use crate::models::{GroupRecord, SearchResult};

pub const LOADING_HTML: &str = r#"<p class="text-gray-500">Loading groups...</p>"#;
pub const EMPTY_HTML: &str = r#"<p class="text-gray-500">No groups found</p>"#;

pub fn render_group(group: &GroupRecord) -> String {
    format!(
        r#"<div class="border border-gray-200 rounded-lg p-4 hover:border-indigo-300 transition group-block">
  <div class="flex justify-between items-center">
    <div>
      <h3 class="font-semibold text-gray-900">{name}</h3>
      <p class="text-sm text-gray-500">Members: {members}</p>
      <p class="text-xs text-gray-400 font-mono">Model: {model}</p>
    </div>
    <span class="tag badge-ok">{members} members</span>
  </div>
</div>"#,
        name = html_escape(group.display_name()),
        members = group.members(),
        model = html_escape(group.model_label()),
    )
}

/// One block per record, or the empty state.
pub fn render_groups(result: &SearchResult) -> String {
    if result.is_empty() {
        return EMPTY_HTML.to_string();
    }
    result
        .groups()
        .iter()
        .map(render_group)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<p class="text-red-500">Error loading groups: {}</p>"#,
        html_escape(message)
    )
}

/// Render whatever `/api/groups` answered.
///
/// A non-2xx status or an `error` field is a failure; its message wins over
/// the bare status line.
pub fn render_groups_payload(status: u16, body: &Value) -> String {
    let error = body.get("error").and_then(|e| e.as_str());
    if let Some(message) = error {
        return render_error(message);
    }
    if !(200..300).contains(&status) {
        return render_error(&format!("HTTP {}", status));
    }

    match serde_json::from_value::<SearchResult>(body.clone()) {
        Ok(result) => render_groups(&result),
        Err(e) => render_error(&e.to_string()),
    }
}
