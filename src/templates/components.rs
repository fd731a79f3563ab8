//! Shared HTML pieces: escaping, the page shell and the error page.

use super::styles::STYLE;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Page Shell
// ============================================================================

/// Wrap `body` in the document shell with the widget and Tailwind scripts.
pub fn base_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>
  <script src="https://cdn.jsdelivr.net/npm/iconify-icon@2.1.0/dist/iconify-icon.min.js"></script>
  <script src="https://esm.sh/@gigya/wc" type="module"></script>
  <style>{STYLE}</style>
  <title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = html_escape(title),
        body = body,
    )
}

// ============================================================================
// Registration Error
// ============================================================================

/// Shown instead of the app when the interceptor is not controlling requests.
/// Retrying is a full reload.
pub fn registration_error_page(message: &str) -> String {
    let body = format!(
        r#"<div class="min-h-screen bg-gray-50 flex items-center justify-center">
    <div class="bg-white rounded-lg shadow-lg p-8 max-w-md" id="registration-error">
      <div class="text-red-500 text-4xl mb-4">&#9888;</div>
      <h1 class="text-2xl font-bold text-gray-900 mb-2">Interceptor Error</h1>
      <p class="text-gray-600 mb-4">{message}</p>
      <button onclick="window.location.reload()" class="btn btn-primary">Retry</button>
    </div>
  </div>"#,
        message = html_escape(message),
    );
    base_html("Engagement Layer", &body)
}
