//! Browser front-end.
//!
//! Serves the admin page (`/admin`) and the chat page (`/`) as HTML-first
//! pages driven by htmx. Every operator action is a small request that runs
//! the matching controller operation against a [`PageView`] and answers with
//! the re-rendered panel.
//!
//! One operator, one session: each controller sits behind a mutex and an
//! action that arrives while another is in flight is refused with a "busy"
//! notice instead of being queued.
//!
//! [`PageView`]: crate::view::PageView

mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::admin::DocumentManager;
use crate::chat::ChatWidget;
use crate::config::AppConfig;
use crate::error::Result;
use crate::gateway::{BackendGateway, HttpGateway};
use crate::view::PageView;

/// Controllers shared by the handlers.
#[derive(Debug)]
pub struct WebState<G> {
    admin: Arc<Mutex<DocumentManager<G, PageView>>>,
    chat: Arc<Mutex<ChatWidget<G, PageView>>>,
}

impl<G> Clone for WebState<G> {
    fn clone(&self) -> Self {
        Self {
            admin: Arc::clone(&self.admin),
            chat: Arc::clone(&self.chat),
        }
    }
}

impl<G: BackendGateway + Clone> WebState<G> {
    pub fn new(gateway: G, datetime_format: &str) -> Self {
        let admin = DocumentManager::new(gateway.clone(), PageView::new())
            .with_datetime_format(datetime_format);
        let chat = ChatWidget::new(gateway, PageView::new());
        Self {
            admin: Arc::new(Mutex::new(admin)),
            chat: Arc::new(Mutex::new(chat)),
        }
    }
}

/// Build the router for the admin and chat pages.
pub fn router<G: BackendGateway + 'static>(state: WebState<G>) -> Router {
    Router::new()
        // HTML pages
        .route("/", get(handlers::chat_page::<G>))
        .route("/admin", get(handlers::admin_page::<G>))
        // Chat widget
        .route("/ui/chat", post(handlers::chat_send::<G>))
        // Admin panel
        .route("/ui/admin/list", get(handlers::admin_list::<G>))
        .route("/ui/admin/upload", post(handlers::admin_upload::<G>))
        .route("/ui/admin/delete/{name}", post(handlers::admin_delete::<G>))
        .route(
            "/ui/admin/replace-target/{name}",
            post(handlers::admin_replace_target::<G>),
        )
        .route(
            "/ui/admin/replace-confirm",
            post(handlers::admin_replace_confirm::<G>),
        )
        .route(
            "/ui/admin/replace-cancel",
            post(handlers::admin_replace_cancel::<G>),
        )
        .route("/ui/admin/open/{name}", get(handlers::admin_open::<G>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the pages until Ctrl-C.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let gateway = HttpGateway::from_config(&config.backend)?;
    let state = WebState::new(gateway, &config.ui.datetime_format);
    let app = router(state);

    let addr = format!("{}:{}", config.web.host, config.web.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %format!("http://{addr}"),
        backend = %config.backend.base_url,
        "Server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!(name: "server.shutdown", "Shutdown signal received");
        })
        .await?;

    Ok(())
}
