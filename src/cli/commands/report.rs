//! Report, analysis and export command handlers

use crate::app::AppState;
use crate::reports::{AnalysisFilters, GroupRow, ReportRequest, Sort};
use crate::services::ExportFormat;
use crate::session::Session;

use super::local_time;

pub async fn cmd_report(
    app: &AppState,
    session: &Session,
    request: &ReportRequest,
) -> anyhow::Result<()> {
    let report = app.reports.report(session, request).await?;

    println!(
        "{} | {}",
        report.period_label, report.collaborator_label
    );
    println!("{:=<70}", "");
    println!("Visitors:            {}", report.kpis.total_visitors);
    println!("Interactions:        {}", report.kpis.total_interactions);
    println!("Average group size:  {}", report.kpis.average_display());
    println!("Top nationality:     {}", report.kpis.top_nationality);

    if report.is_empty() {
        println!();
        println!("No interactions in this period.");
        return Ok(());
    }

    print_groups("Nationalities", &report.nationalities);
    print_groups("Visit reasons", &report.visit_reasons);
    print_groups("Length of stay", &report.lengths_of_stay);

    println!();
    println!("Trend");
    println!("{:-<70}", "");
    for point in &report.trend {
        println!("{:<12} {:>6}", point.label, point.visitors);
    }

    let records = &report.records;
    println!();
    println!(
        "Records (page {}/{}, {} total)",
        records.number, records.total_pages, records.total_items
    );
    println!("{:-<70}", "");
    for interaction in &records.items {
        println!(
            "{}  {:<24} {:>4}  {}",
            local_time(&interaction.timestamp),
            interaction.nationality,
            interaction.count,
            interaction.length_of_stay.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

fn print_groups(title: &str, rows: &[GroupRow]) {
    if rows.is_empty() {
        return;
    }

    println!();
    println!("{title}");
    println!("{:-<70}", "");
    for row in rows {
        println!("{:<40} {:>6}", row.label, row.visitors);
    }
}

pub async fn cmd_analysis(
    app: &AppState,
    session: &Session,
    filters: &AnalysisFilters,
    sort: Sort,
) -> anyhow::Result<()> {
    let rows = app.reports.analysis(session, filters, sort).await?;

    if rows.is_empty() {
        println!("No interactions match these filters.");
        return Ok(());
    }

    println!("Analysis ({} records)", rows.len());
    println!("{:-<70}", "");

    for row in &rows {
        println!(
            "{}  {:<16} {:<24} {:>4}",
            local_time(&row.timestamp),
            row.collaborator_name,
            row.nationality,
            row.count
        );
        if row.visit_reason.is_some() || row.length_of_stay.is_some() {
            println!(
                "  {} | {}",
                row.visit_reason.as_deref().unwrap_or("-"),
                row.length_of_stay.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}

pub async fn cmd_export_report(
    app: &AppState,
    session: &Session,
    request: &ReportRequest,
    format: ExportFormat,
) -> anyhow::Result<()> {
    let path = app.reports.export_report(session, request, format).await?;
    println!("✓ Report written to {}", path.display());
    Ok(())
}

pub async fn cmd_export_analysis(
    app: &AppState,
    session: &Session,
    filters: &AnalysisFilters,
    sort: Sort,
    format: ExportFormat,
) -> anyhow::Result<()> {
    let path = app
        .reports
        .export_analysis(session, filters, sort, format)
        .await?;
    println!("✓ Analysis written to {}", path.display());
    Ok(())
}

pub async fn cmd_export_collaborators(app: &AppState, session: &Session) -> anyhow::Result<()> {
    let path = app.reports.export_collaborator_totals(session).await?;
    println!("✓ Per-collaborator totals written to {}", path.display());
    Ok(())
}
