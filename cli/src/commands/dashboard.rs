//! Dashboard command - notes created within a date range.

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate};
use clap::Args;
use crm_insights::{Action, App, DateRange, SessionContext};

use super::{finish, step};

/// Days covered when no start date is given.
const DEFAULT_WINDOW_DAYS: u64 = 30;

#[derive(Args)]
pub struct DashboardArgs {
    /// First day to include (YYYY-MM-DD, default: 30 days before the end date)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool
}

pub fn resolve_range(args: &DashboardArgs, today: NaiveDate) -> Result<DateRange> {
    let end = args.end.unwrap_or(today);
    let start = args
        .start
        .unwrap_or_else(|| DateRange::trailing_days(end, DEFAULT_WINDOW_DAYS).start());
    DateRange::new(start, end).map_err(|_| anyhow!("Start date must be before end date"))
}

pub async fn run(app: &App, args: DashboardArgs) -> Result<()> {
    let range = resolve_range(&args, Local::now().date_naive())?;

    if args.json {
        let transition = app
            .dispatch(SessionContext::new(), Action::ShowDashboard(range))
            .await;
        match transition.outcome? {
            crm_insights::View::Dashboard(view) => {
                println!("{}", serde_json::to_string_pretty(&view)?)
            }
            other => crate::output::view(&other)
        }
        return Ok(());
    }

    let ctx = step(app, SessionContext::new(), Action::ShowDashboard(range)).await;
    finish(app, ctx).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn args(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DashboardArgs {
        DashboardArgs {
            start,
            end,
            json: false
        }
    }

    #[test]
    fn test_default_range_is_last_thirty_days() {
        let range = resolve_range(&args(None, None), date(2024, 3, 31)).unwrap();
        assert_eq!(range.start(), date(2024, 3, 1));
        assert_eq!(range.end(), date(2024, 3, 31));
    }

    #[test]
    fn test_explicit_range() {
        let range =
            resolve_range(&args(Some(date(2024, 1, 1)), Some(date(2024, 1, 31))), date(2024, 6, 1))
                .unwrap();
        assert_eq!(range.start(), date(2024, 1, 1));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = resolve_range(&args(Some(date(2024, 2, 1)), Some(date(2024, 1, 1))), date(2024, 6, 1))
            .unwrap_err();
        assert_eq!(err.to_string(), "Start date must be before end date");
    }
}
