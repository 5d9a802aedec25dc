//! Browser surface for the delete-user endpoint.
//!
//! The script only defines `mountDeleteUserForm`; the page produced by
//! [`delete_user_page`] is the host that decides when to mount it.

/// Origin the form posts to when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4001";

pub const DELETE_USER_SCRIPT: &str = include_str!("../../static/delete_user.js");

/// Renders a standalone page that mounts the form once the DOM is ready.
///
/// An empty `base_url` makes the form post to the origin that served the page.
pub fn delete_user_page(base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Delete User</title>
</head>
<body>
  <main id="delete-user-root"></main>
  <script>
{script}
  </script>
  <script>
    document.addEventListener("DOMContentLoaded", () => {{
      const params = new URLSearchParams(window.location.search);
      mountDeleteUserForm(document.getElementById("delete-user-root"), {{
        baseUrl: {base_url},
        token: params.get("token") || undefined,
      }});
    }});
  </script>
</body>
</html>
"#,
        script = DELETE_USER_SCRIPT,
        base_url = js_string(base_url),
    )
}

/// Encodes `value` as a JavaScript string literal safe to embed in a
/// `<script>` element.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}
