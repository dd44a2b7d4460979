// ============================
// crates/backend-lib/src/views.rs
// ============================
//! Server-rendered HTML pages.
use std::fmt::Write as _;

use authgate_common::PROTECTED_PATH;

use crate::auth::SessionClaims;

/// Escape text for safe inclusion in HTML bodies and attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

const LOGOUT_SCRIPT: &str = r#"<script>
document.getElementById('logout').addEventListener('click', async () => {
  await fetch('/logout', { method: 'POST' });
  window.location.href = '/';
});
</script>"#;

const FORMS_SCRIPT: &str = r#"<script>
async function submitForm(form, url) {
  const data = Object.fromEntries(new FormData(form));
  const res = await fetch(url, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(data),
  });
  const body = await res.json();
  const target = form.querySelector('.message');
  if (res.ok) {
    window.location.href = body.redirect || '/';
  } else {
    target.textContent = body.error;
  }
}
document.getElementById('login-form').addEventListener('submit', (e) => {
  e.preventDefault();
  submitForm(e.target, '/login');
});
document.getElementById('register-form').addEventListener('submit', (e) => {
  e.preventDefault();
  submitForm(e.target, '/register');
});
</script>"#;

/// Root page: a welcome panel when signed in, otherwise the login and register forms
pub fn render_index(username: Option<&str>) -> String {
    let mut body = String::new();
    match username {
        Some(name) => {
            let _ = write!(
                body,
                "<main>\n<h1>Hello {}</h1>\n<p>You are signed in.</p>\n\
                 <p><a href=\"{PROTECTED_PATH}\">Go to the protected area</a></p>\n\
                 <button id=\"logout\">Sign out</button>\n</main>\n{LOGOUT_SCRIPT}",
                escape_html(name)
            );
        },
        None => {
            body.push_str("<main>\n");
            for (id, title) in [("login-form", "Sign in"), ("register-form", "Create account")] {
                let _ = write!(
                    body,
                    "<form id=\"{id}\">\n<h2>{title}</h2>\n\
                     <label>Username <input name=\"username\" type=\"text\" minlength=\"3\" required></label>\n\
                     <label>Password <input name=\"password\" type=\"password\" minlength=\"6\" required></label>\n\
                     <button type=\"submit\">{title}</button>\n<p class=\"message\"></p>\n</form>\n"
                );
            }
            body.push_str("</main>\n");
            body.push_str(FORMS_SCRIPT);
        },
    }
    page("AuthGate", &body)
}

/// Protected page showing the session identity
pub fn render_protected(claims: &SessionClaims) -> String {
    let body = format!(
        "<main>\n<h1>Protected area</h1>\n<p>Signed in as <strong>{}</strong></p>\n\
         <p>User id: <code>{}</code></p>\n<button id=\"logout\">Sign out</button>\n</main>\n{LOGOUT_SCRIPT}",
        escape_html(&claims.username),
        escape_html(&claims.sub),
    );
    page("AuthGate - protected", &body)
}
