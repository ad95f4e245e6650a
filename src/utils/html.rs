// src/utils/html.rs

/// Builds the page served at the end of the OAuth callback.
///
/// Opened as a popup, it hands the profile to the opener via postMessage and
/// closes itself; opened as a full page, it redirects home. The profile JSON
/// is embedded in an inline script, so `<` is escaped to keep a hostile
/// profile field from terminating the script element early.
pub fn auth_success_page(user_json: &str) -> String {
    let safe_json = escape_for_inline_script(user_json);
    format!(
        r#"<html>
  <body>
    <script>
      if (window.opener) {{
        window.opener.postMessage({{ type: 'AUTH_SUCCESS', user: {safe_json} }}, '*');
        window.close();
      }} else {{
        window.location.href = '/';
      }}
    </script>
    <p>Authentication successful. This window should close automatically.</p>
  </body>
</html>"#
    )
}

/// JSON stays valid JavaScript after this; it only becomes inert as markup.
fn escape_for_inline_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}
