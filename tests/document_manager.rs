mod common;

use chrono::{Local, TimeZone};

use common::{Call, FakeGateway, MTIME, pdf};
use docdesk::DocumentManager;
use docdesk::config::DEFAULT_DATETIME_FORMAT;
use docdesk::error::Error;
use docdesk::view::{NoticeKind, PageView};

fn manager(gateway: &FakeGateway) -> DocumentManager<FakeGateway, PageView> {
    DocumentManager::new(gateway.clone(), PageView::new())
}

fn notice_kinds(admin: &DocumentManager<FakeGateway, PageView>) -> Vec<NoticeKind> {
    admin.view().notices().iter().map(|n| n.kind).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Listing
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_renders_listing() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048)]);
    let mut admin = manager(&gateway);

    let count = admin.refresh_list().await.unwrap();

    assert_eq!(count, 1);
    let rows = admin.view().rows();
    assert_eq!(rows[0].name, "a.pdf");
    assert_eq!(rows[0].size_label, "2.0 KB");
    let expected = Local
        .timestamp_opt(MTIME, 0)
        .unwrap()
        .format(DEFAULT_DATETIME_FORMAT)
        .to_string();
    assert_eq!(rows[0].modified_label, expected);
    assert!(admin.view().pending().is_none());
}

#[tokio::test]
async fn test_refresh_rebuilds_rows_in_listing_order() {
    let gateway = FakeGateway::with_documents(&[("b.pdf", 10), ("a.pdf", 1536)]);
    let mut admin = manager(&gateway);

    admin.refresh_list().await.unwrap();
    let names: Vec<_> = admin.view().rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["b.pdf", "a.pdf"]);
    assert_eq!(admin.view().rows()[1].size_label, "1.5 KB");

    gateway.set_documents(&[("c.pdf", 2048), ("a.pdf", 4096)]);
    admin.refresh_list().await.unwrap();

    let names: Vec<_> = admin.view().rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["c.pdf", "a.pdf"]);
    assert_eq!(admin.view().rows()[1].size_label, "4.0 KB");
    assert_eq!(admin.view().row_renders(), 2);
}

#[tokio::test]
async fn test_refresh_failure_keeps_rows() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048)]);
    let mut admin = manager(&gateway);
    admin.refresh_list().await.unwrap();

    gateway.fail_list(true);
    let result = admin.refresh_list().await;

    assert!(matches!(result, Err(Error::Api { status: 500, .. })));
    assert_eq!(admin.view().rows().len(), 1);
    assert_eq!(admin.view().row_renders(), 1);
    assert_eq!(notice_kinds(&admin), [NoticeKind::Failure]);
}

#[tokio::test]
async fn test_custom_datetime_format() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048)]);
    let mut admin = manager(&gateway).with_datetime_format("%Y");

    admin.refresh_list().await.unwrap();

    let year = Local.timestamp_opt(MTIME, 0).unwrap().format("%Y").to_string();
    assert_eq!(admin.view().rows()[0].modified_label, year);
}

// ─────────────────────────────────────────────────────────────────────────────
// Open
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_open_document_makes_no_request() {
    let gateway = FakeGateway::new();
    let mut admin = manager(&gateway);

    let url = admin.open_document("informe final.pdf").unwrap();

    assert_eq!(url.as_str(), "http://backend.test/docs/informe%20final.pdf");
    assert_eq!(admin.view().opened(), [url]);
    assert!(gateway.calls().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Upload
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_without_file_makes_no_request() {
    let gateway = FakeGateway::new();
    let mut admin = manager(&gateway);

    let result = admin.upload_document(None).await;

    assert!(result.unwrap_err().is_validation());
    assert!(gateway.calls().is_empty());
    assert_eq!(notice_kinds(&admin), [NoticeKind::Validation]);
    assert_eq!(admin.view().upload_input_resets(), 0);
}

#[tokio::test]
async fn test_upload_resets_input_and_refreshes() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048)]);
    let mut admin = manager(&gateway);

    admin.upload_document(Some(pdf("new.pdf"))).await.unwrap();

    assert_eq!(
        gateway.calls(),
        [Call::Upload("new.pdf".into()), Call::List]
    );
    assert_eq!(admin.view().upload_input_resets(), 1);
    assert!(admin.view().rows().iter().any(|r| r.name == "new.pdf"));
    let notice = &admin.view().notices()[0];
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "Documento agregado");
}

#[tokio::test]
async fn test_upload_failure_keeps_input() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048)]);
    let mut admin = manager(&gateway);
    gateway.fail_mutations(true);

    let result = admin.upload_document(Some(pdf("new.pdf"))).await;

    assert!(matches!(result, Err(Error::Api { .. })));
    assert_eq!(gateway.calls(), [Call::Upload("new.pdf".into())]);
    assert_eq!(admin.view().upload_input_resets(), 0);
    assert_eq!(admin.view().row_renders(), 0);
    let notice = &admin.view().notices()[0];
    assert_eq!(notice.kind, NoticeKind::Failure);
    assert!(notice.text.starts_with("Upload failed"));
    assert!(admin.view().pending().is_none());
}

#[tokio::test]
async fn test_refresh_failure_after_upload_is_not_an_upload_failure() {
    let gateway = FakeGateway::new();
    let mut admin = manager(&gateway);
    gateway.fail_list(true);

    admin.upload_document(Some(pdf("new.pdf"))).await.unwrap();

    assert_eq!(
        notice_kinds(&admin),
        [NoticeKind::Success, NoticeKind::Failure]
    );
    assert_eq!(admin.view().upload_input_resets(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_declined_delete_makes_no_request() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048)]);
    let mut admin = manager(&gateway);

    let deleted = admin.delete_document("a.pdf").await.unwrap();

    assert!(!deleted);
    assert!(gateway.calls().is_empty());
    assert_eq!(admin.view().confirm_prompts(), ["Delete a.pdf?"]);
    assert!(admin.view().notices().is_empty());
}

#[tokio::test]
async fn test_confirmed_delete_refreshes() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048), ("b.pdf", 10)]);
    let mut admin = manager(&gateway);
    admin.view_mut().queue_confirmation(true);

    let deleted = admin.delete_document("a.pdf").await.unwrap();

    assert!(deleted);
    assert_eq!(gateway.calls(), [Call::Delete("a.pdf".into()), Call::List]);
    let names: Vec<_> = admin.view().rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["b.pdf"]);
}

#[tokio::test]
async fn test_delete_missing_reports_backend_message() {
    let gateway = FakeGateway::new();
    let mut admin = manager(&gateway);
    admin.view_mut().queue_confirmation(true);

    let result = admin.delete_document("ghost.pdf").await;

    assert!(matches!(result, Err(Error::Api { status: 404, .. })));
    assert!(admin.view().notices()[0].text.contains("No existe"));
    assert_eq!(gateway.calls(), [Call::Delete("ghost.pdf".into())]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Replace
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_and_delete_leave_replace_session_alone() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048), ("b.pdf", 10)]);
    let mut admin = manager(&gateway);
    admin.begin_replace("a.pdf");

    admin.upload_document(Some(pdf("new.pdf"))).await.unwrap();
    admin.view_mut().queue_confirmation(true);
    assert!(admin.delete_document("b.pdf").await.unwrap());

    assert_eq!(admin.replace_session().target(), Some("a.pdf"));
    assert!(admin.view().replace_panel_visible());
    assert_eq!(
        admin.view().replace_status(),
        Some("Document to replace: a.pdf")
    );
    assert_eq!(admin.view().replace_input_resets(), 0);
}

#[tokio::test]
async fn test_full_replace_flow() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048)]);
    let mut admin = manager(&gateway);

    admin.begin_replace("a.pdf");
    assert!(admin.view().replace_panel_visible());
    assert_eq!(
        admin.view().replace_status(),
        Some("Document to replace: a.pdf")
    );

    admin.confirm_replace(Some(pdf("v2.pdf"))).await.unwrap();

    assert_eq!(
        gateway.calls(),
        [
            Call::Replace("a.pdf".into(), "v2.pdf".into()),
            Call::List
        ]
    );
    assert!(!admin.view().replace_panel_visible());
    assert_eq!(admin.view().replace_input_resets(), 1);
    assert!(!admin.replace_session().is_pending());
    assert_eq!(gateway.document_names(), ["a.pdf"]);
}

#[tokio::test]
async fn test_begin_replace_retargets() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 1), ("b.pdf", 2)]);
    let mut admin = manager(&gateway);

    admin.begin_replace("a.pdf");
    admin.begin_replace("b.pdf");
    admin.confirm_replace(Some(pdf("new.pdf"))).await.unwrap();

    assert_eq!(
        gateway.calls()[0],
        Call::Replace("b.pdf".into(), "new.pdf".into())
    );
}

#[tokio::test]
async fn test_confirm_replace_without_session_makes_no_request() {
    let gateway = FakeGateway::new();
    let mut admin = manager(&gateway);

    let result = admin.confirm_replace(Some(pdf("v2.pdf"))).await;

    assert!(matches!(result, Err(Error::NoReplaceTarget)));
    assert!(gateway.calls().is_empty());
    assert_eq!(notice_kinds(&admin), [NoticeKind::Validation]);
}

#[tokio::test]
async fn test_confirm_replace_without_file_keeps_session() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048)]);
    let mut admin = manager(&gateway);
    admin.begin_replace("a.pdf");

    let result = admin.confirm_replace(None).await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(gateway.calls().is_empty());
    assert_eq!(admin.replace_session().target(), Some("a.pdf"));
    assert!(admin.view().replace_panel_visible());
}

#[tokio::test]
async fn test_replace_failure_keeps_session() {
    let gateway = FakeGateway::with_documents(&[("a.pdf", 2048)]);
    let mut admin = manager(&gateway);
    gateway.fail_mutations(true);
    admin.begin_replace("a.pdf");

    let result = admin.confirm_replace(Some(pdf("v2.pdf"))).await;

    assert!(result.is_err());
    assert_eq!(admin.replace_session().target(), Some("a.pdf"));
    assert!(admin.view().replace_panel_visible());
    assert_eq!(admin.view().replace_input_resets(), 0);
    assert_eq!(notice_kinds(&admin), [NoticeKind::Failure]);
}

#[tokio::test]
async fn test_cancel_replace_is_idempotent() {
    let gateway = FakeGateway::new();
    let mut admin = manager(&gateway);
    admin.begin_replace("a.pdf");

    admin.cancel_replace();
    admin.cancel_replace();

    assert!(!admin.replace_session().is_pending());
    assert!(!admin.view().replace_panel_visible());
    assert!(gateway.calls().is_empty());
}
