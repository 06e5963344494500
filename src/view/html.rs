//! Escaped HTML fragments.
//!
//! Every piece of dynamic text (document names, articles, excerpts, queries,
//! notices) goes through [`html_escape`]; there is no unescaped path for
//! backend-provided text.

use super::render::{AnswerCard, DocumentRow, EntryBody, TranscriptEntry};
use super::{Notice, NoticeKind};

/// Escape text for element content and quoted attribute values.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Route of a document-keyed browser host action, name encoded as one segment.
pub fn action_path(action: &str, name: &str) -> String {
    format!("/ui/admin/{action}/{}", urlencoding::encode(name))
}

/// One `<tr>` of the document table.
pub fn row_html(row: &DocumentRow) -> String {
    let name = html_escape(&row.name);
    let open = html_escape(&action_path("open", &row.name));
    let replace = html_escape(&action_path("replace-target", &row.name));
    let delete = html_escape(&action_path("delete", &row.name));
    format!(
        r#"<tr>
    <td>{name}</td>
    <td>{size}</td>
    <td>{modified}</td>
    <td class="acciones">
        <a class="btn ver" href="{open}" target="_blank" rel="noopener">View</a>
        <button class="btn reemplazar" hx-post="{replace}">Replace</button>
        <button class="btn eliminar" hx-post="{delete}" hx-confirm="Delete {name}?" hx-disabled-elt="this">Delete</button>
    </td>
</tr>"#,
        size = html_escape(&row.size_label),
        modified = html_escape(&row.modified_label),
    )
}

/// The structured answer card.
pub fn answer_html(card: &AnswerCard) -> String {
    let mut html = format!(
        r#"<div class="respuesta-enriquecida">
    <div class="card-header"><strong>{article}</strong></div>
    <div class="card-meta">{meta}</div>"#,
        article = html_escape(&card.article),
        meta = html_escape(&card.metadata_line()),
    );
    if let Some(summary) = &card.summary {
        html.push_str(&format!(
            r#"
    <div class="card-summary">{}</div>"#,
            html_escape(summary)
        ));
    }
    html.push_str(&format!(
        r#"
    <div class="fragmento">{}</div>"#,
        html_escape(&card.excerpt)
    ));
    if let Some(score) = &card.score {
        html.push_str(&format!(
            r#"
    <small class="score">Score: {}</small>"#,
            html_escape(score)
        ));
    }
    html.push_str("\n</div>");
    html
}

/// One transcript message.
pub fn entry_html(entry: &TranscriptEntry) -> String {
    let body = match &entry.body {
        EntryBody::Text(text) => html_escape(text),
        EntryBody::Answer(card) => answer_html(card),
    };
    format!(
        r#"<div class="msg {}">{body}</div>"#,
        entry.role.css_class()
    )
}

/// Notices as a list of flash messages.
pub fn notices_html(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| {
            let class = match notice.kind {
                NoticeKind::Success => "notice success",
                NoticeKind::Validation => "notice validation",
                NoticeKind::Failure => "notice failure",
            };
            format!(
                r#"<div class="{class}" role="alert">{}</div>"#,
                html_escape(&notice.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate the HTML shell for a page.
pub fn html_shell(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - docdesk</title>
    <script src="https://unpkg.com/htmx.org@2.0.8"></script>
    <style>{STYLE}</style>
</head>
<body>
    <header>
        <nav>
            <a href="/">Assistant</a>
            <a href="/admin">Documents</a>
        </nav>
    </header>
    <main id="app">
        {content}
    </main>
</body>
</html>"#,
        title = html_escape(title),
    )
}

const STYLE: &str = r"
body { font-family: system-ui, sans-serif; margin: 0; background: #f6f7f9; color: #1d2129; }
header { background: #1d2939; padding: 0.75rem 1.5rem; }
header a { color: #fff; margin-right: 1rem; text-decoration: none; }
main { max-width: 960px; margin: 1.5rem auto; padding: 0 1rem; }
table { width: 100%; border-collapse: collapse; background: #fff; }
th, td { padding: 0.5rem; border-bottom: 1px solid #e4e7ec; text-align: left; }
.btn { margin-right: 0.25rem; }
.notice { padding: 0.5rem 0.75rem; margin-bottom: 0.5rem; border-radius: 4px; }
.notice.success { background: #ecfdf3; }
.notice.validation { background: #fffaeb; }
.notice.failure { background: #fef3f2; }
#chat-window { height: 60vh; overflow-y: auto; background: #fff; padding: 1rem; }
.msg { margin-bottom: 0.75rem; padding: 0.5rem 0.75rem; border-radius: 6px; }
.msg.usuario { background: #e0eaff; margin-left: 20%; }
.msg.bot { background: #f2f4f7; margin-right: 20%; }
.fragmento { white-space: pre-wrap; border-left: 3px solid #98a2b3; padding-left: 0.5rem; margin: 0.5rem 0; }
";
