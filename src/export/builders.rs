//! Builds the workbooks and documents offered for download.

use chrono::{DateTime, TimeZone};

use super::{Cell, Document, ExportError, Section, Sheet, Workbook};
use crate::constants::labels::REPORT_TITLE;
use crate::models::{Collaborator, CollaboratorStatus, Interaction};
use crate::reports::{AnalysisRow, CollaboratorFilter, GroupRow, NationalityMatrix, Report};

pub const ANALYSIS_FILENAME: &str = "analise_atendimentos";
pub const ANALYSIS_TITLE: &str = "Análise de Atendimentos";
pub const COLLABORATOR_TOTALS_FILENAME: &str = "relatorio_por_colaborador";

const DATE_TIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// `relatorio_<period>_<collaborator name or "todos">`.
#[must_use]
pub fn report_filename(report: &Report) -> String {
    let who = match &report.collaborator {
        CollaboratorFilter::All => "todos".to_string(),
        CollaboratorFilter::Only(_) => report
            .collaborator_label
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_"),
    };
    format!("relatorio_{}_{who}", report.period.slug())
}

fn kpi_rows(report: &Report) -> Vec<(&'static str, Cell)> {
    vec![
        ("Total de Visitantes", Cell::from(report.kpis.total_visitors)),
        ("Total de Atendimentos", Cell::from(report.kpis.total_interactions)),
        ("Média por Grupo", Cell::from(report.kpis.average_display())),
        ("Nacionalidade Top", Cell::from(report.kpis.top_nationality.clone())),
    ]
}

fn group_sheet(name: &str, column: &str, rows: &[GroupRow]) -> Option<Sheet> {
    if rows.is_empty() {
        return None;
    }
    let mut sheet = Sheet::new(name);
    sheet.push([column, "Visitantes"]);
    for row in rows {
        sheet.push(vec![Cell::from(row.label.clone()), Cell::from(row.visitors)]);
    }
    Some(sheet)
}

fn group_section(heading: &str, column: &str, rows: &[GroupRow]) -> Option<Section> {
    if rows.is_empty() {
        return None;
    }
    Some(Section {
        heading: heading.to_string(),
        header: vec![column.to_string(), "Visitantes".to_string()],
        rows: rows
            .iter()
            .map(|r| vec![Cell::from(r.label.clone()), Cell::from(r.visitors)])
            .collect(),
    })
}

/// Summary sheet plus one sheet per non-empty grouping.
pub fn report_workbook<Tz: TimeZone>(
    report: &Report,
    exported_at: &DateTime<Tz>,
) -> Result<Workbook, ExportError>
where
    Tz::Offset: std::fmt::Display,
{
    if report.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut summary = Sheet::new("Resumo");
    summary.push([REPORT_TITLE]);
    summary.blank_line();
    summary.push(["Período", report.period_label.as_str()]);
    summary.push(["Colaborador", report.collaborator_label.as_str()]);
    summary.push(vec![
        Cell::from("Data de Exportação"),
        Cell::from(exported_at.format(DATE_TIME_FORMAT).to_string()),
    ]);
    summary.blank_line();
    summary.push(["Indicadores Chave de Desempenho (KPIs)"]);
    summary.push(["Métrica", "Valor"]);
    for (label, value) in kpi_rows(report) {
        summary.push(vec![Cell::from(label), value]);
    }

    let mut workbook = Workbook::new();
    workbook.add(summary);
    let tables = [
        group_sheet("Nacionalidades", "Nacionalidade", &report.nationalities),
        group_sheet("Motivos de Visita", "Motivo", &report.visit_reasons),
        group_sheet("Duração da Estadia", "Duração", &report.lengths_of_stay),
    ];
    for sheet in tables.into_iter().flatten() {
        workbook.add(sheet);
    }
    Ok(workbook)
}

/// KPI header followed by the trend and grouping tables.
pub fn report_document(report: &Report) -> Result<Document, ExportError> {
    if report.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let kpis = Section {
        heading: "KPIs".to_string(),
        header: vec!["Métrica".to_string(), "Valor".to_string()],
        rows: kpi_rows(report)
            .into_iter()
            .map(|(label, value)| vec![Cell::from(label), value])
            .collect(),
    };

    let trend = Section {
        heading: "Tendência de Visitantes".to_string(),
        header: vec!["Data".to_string(), "Visitantes".to_string()],
        rows: report
            .trend
            .iter()
            .map(|p| vec![Cell::from(p.label.clone()), Cell::from(p.visitors)])
            .collect(),
    };

    let mut sections = vec![kpis, trend];
    sections.extend(
        [
            group_section("Distribuição de Nacionalidades", "Nacionalidade", &report.pie),
            group_section("Visitantes por Nacionalidade", "Nacionalidade", &report.nationalities),
            group_section("Top Motivos de Visita", "Motivo", &report.visit_reasons),
            group_section("Top Duração da Estadia", "Duração", &report.lengths_of_stay),
        ]
        .into_iter()
        .flatten(),
    );

    Ok(Document {
        title: REPORT_TITLE.to_string(),
        subtitle: vec![
            format!("Período: {}", report.period_label),
            format!("Colaborador: {}", report.collaborator_label),
        ],
        sections,
    })
}

fn analysis_header() -> Vec<&'static str> {
    vec![
        "Colaborador",
        "Nacionalidade",
        "Nº Pessoas",
        "Motivo da Visita",
        "Tempo de Estadia",
        "Data e Hora",
    ]
}

fn analysis_cells<Tz: TimeZone>(row: &AnalysisRow, tz: &Tz) -> Vec<Cell>
where
    Tz::Offset: std::fmt::Display,
{
    vec![
        Cell::from(row.collaborator_name.clone()),
        Cell::from(row.nationality.clone()),
        Cell::from(row.count),
        Cell::from(row.visit_reason.clone().unwrap_or_default()),
        Cell::from(row.length_of_stay.clone().unwrap_or_default()),
        Cell::from(
            row.timestamp
                .with_timezone(tz)
                .format(DATE_TIME_FORMAT)
                .to_string(),
        ),
    ]
}

pub fn analysis_workbook<Tz: TimeZone>(
    rows: &[AnalysisRow],
    tz: &Tz,
) -> Result<Workbook, ExportError>
where
    Tz::Offset: std::fmt::Display,
{
    if rows.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut sheet = Sheet::new(ANALYSIS_TITLE);
    sheet.push(analysis_header());
    for row in rows {
        sheet.push(analysis_cells(row, tz));
    }

    let mut workbook = Workbook::new();
    workbook.add(sheet);
    Ok(workbook)
}

pub fn analysis_document<Tz: TimeZone>(
    rows: &[AnalysisRow],
    tz: &Tz,
) -> Result<Document, ExportError>
where
    Tz::Offset: std::fmt::Display,
{
    if rows.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    Ok(Document {
        title: ANALYSIS_TITLE.to_string(),
        subtitle: Vec::new(),
        sections: vec![Section {
            heading: ANALYSIS_TITLE.to_string(),
            header: analysis_header().into_iter().map(str::to_string).collect(),
            rows: rows.iter().map(|row| analysis_cells(row, tz)).collect(),
        }],
    })
}

/// One nationality × month sheet per approved collaborator other than the
/// primary admin.
pub fn collaborator_totals_workbook<Tz: TimeZone>(
    collaborators: &[Collaborator],
    interactions: &[Interaction],
    tz: &Tz,
) -> Result<Workbook, ExportError> {
    let reported: Vec<&Collaborator> = collaborators
        .iter()
        .filter(|c| c.status == CollaboratorStatus::Aprovado && !c.is_primary_admin())
        .collect();
    if reported.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut workbook = Workbook::new();
    for collaborator in reported {
        let mut sheet = Sheet::new(&collaborator.name);
        let own: Vec<&Interaction> = interactions
            .iter()
            .filter(|i| i.collaborator_id == collaborator.id)
            .collect();

        if own.is_empty() {
            sheet.push([format!("Utilizador {} não tem registos.", collaborator.name)]);
            workbook.add(sheet);
            continue;
        }

        let matrix = NationalityMatrix::build(&own, tz);
        sheet.push(matrix.header());
        for row in matrix.rows.iter().chain(std::iter::once(&matrix.footer)) {
            let mut cells = vec![Cell::from(row.label.clone())];
            cells.extend(row.cells.iter().copied().map(Cell::from));
            cells.push(Cell::from(row.total));
            sheet.push(cells);
        }
        workbook.add(sheet);
    }
    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CollaboratorId, InteractionId};
    use chrono::Utc;

    fn person(id: &str, name: &str, status: CollaboratorStatus) -> Collaborator {
        Collaborator {
            id: CollaboratorId::new(id),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            password: "pw".to_string(),
            is_admin: false,
            status,
            must_change_password: false,
        }
    }

    fn visit(by: &str, nationality: &str, count: u32) -> Interaction {
        Interaction {
            id: InteractionId::generate(),
            collaborator_id: CollaboratorId::new(by),
            nationality: nationality.to_string(),
            count,
            visit_reason: None,
            length_of_stay: None,
            timestamp: "2024-05-10T10:00:00Z".parse().unwrap(),
            created_at: None,
        }
    }

    #[test]
    fn totals_workbook_has_one_sheet_per_approved_collaborator() {
        let collaborators = vec![
            person("primary_admin_account", "admin", CollaboratorStatus::Aprovado),
            person("colab_1", "carlos", CollaboratorStatus::Aprovado),
            person("colab_2", "ana", CollaboratorStatus::Aprovado),
            person("colab_3", "rui", CollaboratorStatus::Pendente),
        ];
        let interactions = vec![visit("colab_1", "França", 3), visit("colab_1", "Nárnia", 1)];

        let workbook = collaborator_totals_workbook(&collaborators, &interactions, &Utc).unwrap();

        let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["carlos", "ana"]);

        let carlos = workbook.sheet("carlos").unwrap();
        assert_eq!(carlos.rows[0][0], Cell::from("Nacionalidade"));
        assert_eq!(carlos.rows[1], vec![Cell::from("França"), Cell::from(3u64), Cell::from(3u64)]);
        assert_eq!(carlos.rows[2][0], Cell::from("Outros"));
        assert_eq!(
            carlos.rows[3],
            vec![Cell::from("Total"), Cell::from(4u64), Cell::from(4u64)]
        );

        let ana = workbook.sheet("ana").unwrap();
        assert_eq!(ana.rows, vec![vec![Cell::from("Utilizador ana não tem registos.")]]);
    }

    #[test]
    fn totals_workbook_needs_someone_to_report() {
        let collaborators = vec![person(
            "primary_admin_account",
            "admin",
            CollaboratorStatus::Aprovado,
        )];
        assert!(matches!(
            collaborator_totals_workbook(&collaborators, &[], &Utc),
            Err(ExportError::NothingToExport)
        ));
    }

    #[test]
    fn empty_analysis_is_not_exported() {
        assert!(matches!(
            analysis_workbook(&[], &Utc),
            Err(ExportError::NothingToExport)
        ));
    }
}
