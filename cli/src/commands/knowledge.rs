use anyhow::Result;
use clap::Args;
use crm_insights::{AppConfig, KnowledgeBase};

use crate::output;

#[derive(Args)]
pub struct KnowledgeArgs {
    /// Only list the files that make up the knowledge base
    #[arg(long)]
    pub list: bool
}

pub fn run(args: &KnowledgeArgs, config: &AppConfig) -> Result<()> {
    let knowledge = KnowledgeBase::load(&config.knowledge_dir)?;

    if knowledge.is_empty() {
        output::warn(&format!(
            "No markdown files found under {}",
            config.knowledge_dir.display()
        ));
    }

    if args.list {
        for path in knowledge.documents() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    println!("{}", knowledge.as_str());
    Ok(())
}
