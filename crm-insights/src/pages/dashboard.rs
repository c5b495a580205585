use crate::app::App;
use crate::error::InsightsResult;
use crate::filter::{created_at, filter_by_date, DateRange};
use crate::notes::NoteRow;
use crate::resolver::{CompanyNames, CompanyResolver};
use crate::session::SessionContext;
use serde::Serialize;
use tracing::info;

pub const NO_NOTES: &str = "No notes found in the selected date range.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardRow {
    pub title: Option<String>,
    pub created_at: String,
    pub company: Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub range: DateRange,
    pub total_notes: usize,
    pub companies: Vec<String>,
    pub rows: Vec<DashboardRow>
}

impl DashboardView {
    pub fn summary(&self) -> String {
        let mut line = format!("Showing notes created between {}", self.range);
        if !self.companies.is_empty() {
            line.push_str(&format!(" for companies: {}", self.companies.join(", ")));
        }
        line
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DashboardRow {
    pub fn from_note(note: &NoteRow, companies: &CompanyNames) -> Self {
        Self {
            title: note.title.clone(),
            created_at: created_at(note)
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            company: note
                .company_id()
                .and_then(|id| companies.get(id))
                .map(str::to_string)
        }
    }
}

/// Notes created within `range`, with their companies resolved once for
/// both the summary line and the detail rows.
pub async fn render(
    app: &App,
    ctx: &mut SessionContext,
    range: DateRange
) -> InsightsResult<DashboardView> {
    let crm = app.crm()?;
    let notes = app.notes(ctx, app.config().dashboard_page_size).await?;
    let filtered = filter_by_date(&notes, &range);

    let mut resolver = CompanyResolver::new(crm);
    let companies = resolver.resolve(&filtered).await;

    info!(
        total = notes.len(),
        in_range = filtered.len(),
        companies = companies.len(),
        "Rendered notes dashboard"
    );

    Ok(DashboardView {
        range,
        total_notes: filtered.len(),
        companies: companies.names().into_iter().map(str::to_string).collect(),
        rows: filtered
            .iter()
            .map(|note| DashboardRow::from_note(note, &companies))
            .collect()
    })
}
