use colored::Colorize;
use crm_insights::View;
use crm_insights::pages::dashboard::{DashboardRow, DashboardView, NO_NOTES};

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn subheader(title: &str) {
    println!("{}", title.bold());
}

pub fn hint(msg: &str) {
    println!("{} {}", "hint:".cyan().bold(), msg.dimmed());
}

pub fn info(msg: &str) {
    eprintln!("{} {}", "info:".blue().bold(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn assistant(msg: &str) {
    println!();
    println!("{}", "Assistant".green().bold());
    println!("{}", msg);
    println!();
}

pub fn dashboard(view: &DashboardView) {
    header("Notes Dashboard");
    println!();
    subheader("Notes Summary");
    println!("  {} {}", "Total Notes:".dimmed(), view.total_notes.to_string().cyan());
    println!("  {}", view.summary());
    println!();

    if view.is_empty() {
        println!("  {}", NO_NOTES.dimmed());
        return;
    }

    subheader("Notes Details");
    notes_table(&view.rows);
}

pub fn notes_table(rows: &[DashboardRow]) {
    for row in rows {
        let title = row.title.as_deref().unwrap_or("(untitled)");
        match &row.company {
            Some(company) => println!(
                "  {}  {}  {}",
                row.created_at.dimmed(),
                title,
                format!("[{}]", company).cyan()
            ),
            None => println!("  {}  {}", row.created_at.dimmed(), title)
        }
    }
}

/// Notes the sales coach reads as meeting logs.
pub fn data_connections(rows: &[DashboardRow]) {
    subheader("Retrieve Notes from Attio");
    if rows.is_empty() {
        println!("  {}", "No notes retrieved from the CRM.".dimmed());
        return;
    }
    println!("  {} {}", "Notes:".dimmed(), rows.len().to_string().cyan());
    notes_table(rows);
}

pub fn view(view: &View) {
    match view {
        View::Dashboard(dashboard_view) => dashboard(dashboard_view),
        View::Notes(rows) => data_connections(rows),
        View::Reply(reply) => assistant(reply),
        View::Report(report) => {
            subheader("Research Report");
            println!("{}", report);
        }
        View::Notice(notice) => info(notice),
        View::SessionEnded => {}
    }
}
