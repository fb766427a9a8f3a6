//! Interaction logging, reports, analysis and exports end to end.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use visitdesk::app::AppState;
use visitdesk::config::Config;
use visitdesk::db::MemoryStore;
use visitdesk::domain::InteractionId;
use visitdesk::export::{ExportError, FileExporter};
use visitdesk::reports::{
    AnalysisFilters, CollaboratorFilter, ReportPeriod, ReportRequest, Sort, SortDirection, SortKey,
};
use visitdesk::services::{
    ExportFormat, InteractionError, InteractionUpdate, NewCollaborator, NewInteraction,
    ReportError,
};
use visitdesk::session::Session;

async fn spawn_desk() -> (AppState, PathBuf) {
    let export_dir =
        std::env::temp_dir().join(format!("visitdesk-report-test-{}", uuid::Uuid::new_v4()));

    let app = AppState::with_store(
        Config::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(FileExporter::new(export_dir.clone())),
    )
    .await
    .expect("failed to create app state");
    (app, export_dir)
}

async fn member(app: &AppState, name: &str) -> Session {
    let created = app
        .collaborators
        .register(NewCollaborator {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password: "secret".to_string(),
            password_confirmation: None,
        })
        .await
        .expect("registration failed");
    app.collaborators.approve(&created.id).await.unwrap();
    app.sign_in(name, "secret").await.expect("login failed")
}

fn today() -> ReportRequest {
    let day = Local::now().date_naive();
    ReportRequest {
        period: ReportPeriod::Custom {
            start: Some(day),
            end: Some(day),
        },
        ..ReportRequest::default()
    }
}

#[tokio::test]
async fn logging_requires_a_signed_in_collaborator() {
    let (app, _) = spawn_desk().await;

    let err = app
        .interactions
        .add(&Session::new(), NewInteraction::new("França", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, InteractionError::NotLoggedIn));
}

#[tokio::test]
async fn non_positive_counts_are_stored_as_one() {
    let (app, _) = spawn_desk().await;
    let session = member(&app, "carlos").await;

    let zero = app
        .interactions
        .add(&session, NewInteraction::new("Brasil", 0))
        .await
        .unwrap();
    let negative = app
        .interactions
        .add(&session, NewInteraction::new("Brasil", -3))
        .await
        .unwrap();

    assert_eq!(zero.count, 1);
    assert_eq!(negative.count, 1);
}

#[tokio::test]
async fn newest_interaction_is_listed_first() {
    let (app, _) = spawn_desk().await;
    let session = member(&app, "carlos").await;

    app.interactions
        .add(&session, NewInteraction::new("França", 1))
        .await
        .unwrap();
    let latest = app
        .interactions
        .add(&session, NewInteraction::new("Espanha", 1))
        .await
        .unwrap();

    assert_eq!(app.interactions.list().await[0].id, latest.id);
}

#[tokio::test]
async fn update_round_trips_and_keeps_identity() {
    let (app, _) = spawn_desk().await;
    let session = member(&app, "carlos").await;

    let created = app
        .interactions
        .add(&session, NewInteraction::new("França", 2))
        .await
        .unwrap();

    let mut update = InteractionUpdate::from(&created);
    update.nationality = " Itália ".to_string();
    update.count = 4;
    update.visit_reason = Some("Gastronomia".to_string());
    update.length_of_stay = Some("  ".to_string());

    let updated = app.interactions.update(&created.id, update).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.collaborator_id, created.collaborator_id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.nationality, "Itália");
    assert_eq!(updated.count, 4);
    assert_eq!(updated.visit_reason.as_deref(), Some("Gastronomia"));
    assert_eq!(updated.length_of_stay, None);

    assert_eq!(app.interactions.get(&created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn undo_deletes_the_fresh_interaction() {
    let (app, _) = spawn_desk().await;
    let session = member(&app, "carlos").await;

    let created = app
        .interactions
        .add(&session, NewInteraction::new("França", 1))
        .await
        .unwrap();
    app.interactions.delete(&created.id).await.unwrap();
    assert!(app.interactions.list().await.is_empty());

    let again = app.interactions.delete(&created.id).await.unwrap_err();
    assert!(matches!(again, InteractionError::NotFound(_)));
    let unknown = app
        .interactions
        .delete(&InteractionId::new("int_missing"))
        .await
        .unwrap_err();
    assert!(matches!(unknown, InteractionError::NotFound(_)));
}

#[tokio::test]
async fn reset_and_clear_remove_interactions() {
    let (app, _) = spawn_desk().await;
    let carlos = member(&app, "carlos").await;
    let maria = member(&app, "maria").await;

    for session in [&carlos, &maria, &maria] {
        app.interactions
            .add(session, NewInteraction::new("Portugal", 1))
            .await
            .unwrap();
    }

    let maria_id = maria.current().unwrap().id.clone();
    assert_eq!(
        app.interactions.reset_for_collaborator(&maria_id).await.unwrap(),
        2
    );
    assert_eq!(app.interactions.list().await.len(), 1);
    assert_eq!(app.interactions.clear_all().await.unwrap(), 1);
    assert!(app.interactions.list().await.is_empty());
}

#[tokio::test]
async fn same_day_report_aggregates_every_collaborator() {
    let (app, _) = spawn_desk().await;
    let carlos = member(&app, "carlos").await;
    let maria = member(&app, "maria").await;

    app.interactions
        .add(&carlos, NewInteraction::new("França", 3))
        .await
        .unwrap();
    app.interactions
        .add(&maria, NewInteraction::new("Espanha", 2))
        .await
        .unwrap();

    let admin = app.sign_in("admin", "admin").await.unwrap();
    let report = app.reports.report(&admin, &today()).await.unwrap();

    assert_eq!(report.kpis.total_visitors, 5);
    assert_eq!(report.kpis.total_interactions, 2);
    assert_eq!(report.kpis.average_display(), "2.50");
    assert_eq!(report.kpis.top_nationality, "França");
    assert_eq!(report.collaborator_label, "Todos");
    assert_eq!(report.records.total_items, 2);
}

#[tokio::test]
async fn non_admin_report_only_sees_own_records() {
    let (app, _) = spawn_desk().await;
    let carlos = member(&app, "carlos").await;
    let maria = member(&app, "maria").await;

    app.interactions
        .add(&carlos, NewInteraction::new("França", 3))
        .await
        .unwrap();
    app.interactions
        .add(&maria, NewInteraction::new("Espanha", 2))
        .await
        .unwrap();

    let report = app.reports.report(&maria, &today()).await.unwrap();
    assert_eq!(report.kpis.total_visitors, 2);
    assert_eq!(report.collaborator_label, "maria");
    assert!(matches!(report.collaborator, CollaboratorFilter::Only(_)));
}

#[tokio::test]
async fn primary_admin_activity_is_left_out_of_reports() {
    let (app, _) = spawn_desk().await;
    let admin = app.sign_in("admin", "admin").await.unwrap();

    app.interactions
        .add(&admin, NewInteraction::new("Alemanha", 4))
        .await
        .unwrap();

    let report = app.reports.report(&admin, &today()).await.unwrap();
    assert!(report.is_empty());
    assert_eq!(report.kpis.top_nationality, "N/A");
}

#[tokio::test]
async fn anonymous_sessions_get_no_report() {
    let (app, _) = spawn_desk().await;
    let err = app
        .reports
        .report(&Session::new(), &ReportRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::NotLoggedIn));
}

#[tokio::test]
async fn analysis_filters_and_sorts() {
    let (app, _) = spawn_desk().await;
    let carlos = member(&app, "carlos").await;

    for (nationality, count) in [("França", 3), ("Espanha", 1), ("França", 2)] {
        app.interactions
            .add(&carlos, NewInteraction::new(nationality, count))
            .await
            .unwrap();
    }

    let filters = AnalysisFilters {
        nationality: "fran".to_string(),
        ..AnalysisFilters::default()
    };
    let sort = Sort {
        key: SortKey::Count,
        direction: SortDirection::Asc,
    };
    let rows = app.reports.analysis(&carlos, &filters, sort).await.unwrap();

    let counts: Vec<u32> = rows.iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![2, 3]);
    assert!(rows.iter().all(|r| r.collaborator_name == "carlos"));
}

#[tokio::test]
async fn report_export_writes_named_workbook() {
    let (app, export_dir) = spawn_desk().await;
    let carlos = member(&app, "carlos").await;
    app.interactions
        .add(&carlos, NewInteraction::new("França", 3))
        .await
        .unwrap();

    let admin = app.sign_in("admin", "admin").await.unwrap();
    let path = app
        .reports
        .export_report(&admin, &today(), ExportFormat::Workbook)
        .await
        .unwrap();

    assert_eq!(path, export_dir.join("relatorio_custom_todos"));
    let summary = tokio::fs::read_to_string(path.join("Resumo.csv"))
        .await
        .unwrap();
    assert!(summary.contains("\"Total de Visitantes\",3"));
    assert!(path.join("Nacionalidades.csv").exists());

    let _ = tokio::fs::remove_dir_all(&export_dir).await;
}

#[tokio::test]
async fn empty_report_export_is_refused() {
    let (app, _) = spawn_desk().await;
    let admin = app.sign_in("admin", "admin").await.unwrap();

    let err = app
        .reports
        .export_report(&admin, &today(), ExportFormat::Document)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReportError::Export(ExportError::NothingToExport)
    ));
}

#[tokio::test]
async fn collaborator_totals_are_admin_only() {
    let (app, export_dir) = spawn_desk().await;
    let carlos = member(&app, "carlos").await;
    app.interactions
        .add(&carlos, NewInteraction::new("França", 3))
        .await
        .unwrap();

    let err = app
        .reports
        .export_collaborator_totals(&carlos)
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::AdminRequired));

    let admin = app.sign_in("admin", "admin").await.unwrap();
    let path = app
        .reports
        .export_collaborator_totals(&admin)
        .await
        .unwrap();
    let sheet = tokio::fs::read_to_string(path.join("carlos.csv"))
        .await
        .unwrap();
    assert!(sheet.starts_with("\"Nacionalidade\""));

    let _ = tokio::fs::remove_dir_all(&export_dir).await;
}
