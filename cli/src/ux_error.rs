use colored::Colorize;
use crm_insights::InsightsError;

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new()
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!("       {}", why.dimmed());
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".yellow().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }
        eprintln!();
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

pub fn from_insights(err: &InsightsError) -> UxError {
    match err {
        InsightsError::RemoteApi { status: 401 | 403, .. } => UxError::new(err.to_string())
            .why("The CRM rejected the access token")
            .fix("Check ATTIO_ACCESS_TOKEN and the scopes granted to it"),
        InsightsError::RemoteApi { status: 429, .. } => UxError::new(err.to_string())
            .why("The CRM is rate limiting requests")
            .fix("Wait a moment and run the command again"),
        InsightsError::RemoteApi { .. } | InsightsError::HttpError(_) => {
            UxError::new(err.to_string())
                .why("Fetching data from the CRM failed; nothing was kept from this attempt")
                .fix("Run the command again")
                .fix("Check ATTIO_API_BASE if you point at a non-default endpoint")
        }
        InsightsError::Chat(_) => UxError::new(err.to_string())
            .fix("Check OPENAI_API_KEY and the configured model names"),
        InsightsError::InvalidDateRange { .. } => UxError::new("Start date must be before end date")
            .fix("Pass --start on or before --end"),
        InsightsError::Knowledge(_) => UxError::new(err.to_string())
            .fix("Check that the files under KNOWLEDGE_DIR are readable UTF-8 text"),
        _ => UxError::new(err.to_string())
    }
}
