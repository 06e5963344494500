//! Request handlers for the admin and chat pages.

use axum::{
    Form,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tokio::sync::TryLockError;
use tracing::{debug, warn};

use super::WebState;
use crate::gateway::BackendGateway;
use crate::model::FileUpload;
use crate::view::Notice;
use crate::view::html::{html_shell, notices_html};

const BUSY: &str = "Another operation is still in progress";

/// Form body of `POST /ui/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    query: String,
}

/// Notice for an action that arrived while another is in flight. htmx does
/// not swap error responses, so this is a 200 retargeted at the panel's
/// notice area instead of the panel itself.
fn busy(_: TryLockError) -> Response {
    debug!(name: "web.busy", "Rejected action while another is in flight");
    (
        [("HX-Retarget", "#notices"), ("HX-Reswap", "innerHTML")],
        Html(notices_html(&[Notice::validation(BUSY)])),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Pages
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - chat page.
pub async fn chat_page<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
) -> Html<String> {
    let mut chat = state.chat.lock().await;
    let panel = chat.panel_html();
    Html(html_shell("Assistant", &panel))
}

/// GET /admin - admin page, listing loaded on arrival.
pub async fn admin_page<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
) -> Html<String> {
    let mut admin = state.admin.lock().await;
    // A failed listing leaves a notice on the panel.
    let _ = admin.refresh_list().await;
    let panel = admin.view_mut().admin_panel_html();
    Html(html_shell("Documents", &panel))
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat widget
// ─────────────────────────────────────────────────────────────────────────────

/// POST /ui/chat - send the query, answer with the re-rendered chat panel.
pub async fn chat_send<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
    Form(form): Form<ChatForm>,
) -> Response {
    let mut chat = match state.chat.try_lock() {
        Ok(chat) => chat,
        Err(err) => return busy(err),
    };
    chat.view_mut().set_chat_input(form.query);
    let _ = chat.send_message().await;
    Html(chat.panel_html()).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin panel
// ─────────────────────────────────────────────────────────────────────────────

/// GET /ui/admin/list
pub async fn admin_list<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
) -> Response {
    let mut admin = match state.admin.try_lock() {
        Ok(admin) => admin,
        Err(err) => return busy(err),
    };
    let _ = admin.refresh_list().await;
    Html(admin.view_mut().admin_panel_html()).into_response()
}

/// POST /ui/admin/upload - multipart field `file`.
pub async fn admin_upload<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
    multipart: Multipart,
) -> Response {
    let file = match read_file_field(multipart).await {
        Ok(file) => file,
        Err(rejection) => return rejection,
    };
    let mut admin = match state.admin.try_lock() {
        Ok(admin) => admin,
        Err(err) => return busy(err),
    };
    let _ = admin.upload_document(file).await;
    Html(admin.view_mut().admin_panel_html()).into_response()
}

/// POST /ui/admin/delete/{name}
///
/// The browser already asked the operator (`hx-confirm`), so the
/// confirmation is answered up front.
pub async fn admin_delete<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
    Path(name): Path<String>,
) -> Response {
    let mut admin = match state.admin.try_lock() {
        Ok(admin) => admin,
        Err(err) => return busy(err),
    };
    admin.view_mut().queue_confirmation(true);
    let _ = admin.delete_document(&name).await;
    Html(admin.view_mut().admin_panel_html()).into_response()
}

/// POST /ui/admin/replace-target/{name}
pub async fn admin_replace_target<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
    Path(name): Path<String>,
) -> Response {
    let mut admin = match state.admin.try_lock() {
        Ok(admin) => admin,
        Err(err) => return busy(err),
    };
    admin.begin_replace(&name);
    Html(admin.view_mut().admin_panel_html()).into_response()
}

/// POST /ui/admin/replace-confirm - multipart field `file`.
pub async fn admin_replace_confirm<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
    multipart: Multipart,
) -> Response {
    let file = match read_file_field(multipart).await {
        Ok(file) => file,
        Err(rejection) => return rejection,
    };
    let mut admin = match state.admin.try_lock() {
        Ok(admin) => admin,
        Err(err) => return busy(err),
    };
    let _ = admin.confirm_replace(file).await;
    Html(admin.view_mut().admin_panel_html()).into_response()
}

/// POST /ui/admin/replace-cancel
pub async fn admin_replace_cancel<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
) -> Response {
    let mut admin = match state.admin.try_lock() {
        Ok(admin) => admin,
        Err(err) => return busy(err),
    };
    admin.cancel_replace();
    Html(admin.view_mut().admin_panel_html()).into_response()
}

/// GET /ui/admin/open/{name} - redirect to the backend's stored PDF.
pub async fn admin_open<G: BackendGateway + 'static>(
    State(state): State<WebState<G>>,
    Path(name): Path<String>,
) -> Response {
    let mut admin = state.admin.lock().await;
    match admin.open_document(&name) {
        Ok(url) => Redirect::to(url.as_str()).into_response(),
        Err(err) => {
            warn!(name: "web.open.failed", document = %name, error = %err, "Cannot build document URL");
            (StatusCode::BAD_GATEWAY, err.to_string()).into_response()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Read the `file` field. An empty file input (no name, no bytes) means
/// no file was chosen.
async fn read_file_field(mut multipart: Multipart) -> Result<Option<FileUpload>, Response> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| (StatusCode::BAD_REQUEST, err.body_text()).into_response())?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|err| (StatusCode::BAD_REQUEST, err.body_text()).into_response())?;

        if file_name.is_empty() && bytes.is_empty() {
            return Ok(None);
        }

        let mut upload = FileUpload::new(file_name, bytes.to_vec());
        if let Some(content_type) = content_type.filter(|ct| ct != "application/octet-stream") {
            upload.content_type = content_type;
        }
        return Ok(Some(upload));
    }
    Ok(None)
}
