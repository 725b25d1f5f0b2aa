use clap::Subcommand;
use forestfocus_core::{BrowserShare, ShareDraft, ShareTemplate, SocialShare};
use serde_json::json;

use crate::context::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum ShareAction {
    /// Render a post without sending it
    Preview {
        /// session, tree, milestone or streak; recommended one if omitted
        #[arg(long)]
        template: Option<ShareTemplate>,
    },
    /// Open the compose window with the post
    Post {
        #[arg(long)]
        template: Option<ShareTemplate>,
        /// Custom text instead of a template
        #[arg(long)]
        text: Option<String>,
    },
}

pub fn run(action: ShareAction) -> CliResult {
    let ctx = Context::open()?;
    let orchestrator = ctx.orchestrator();
    let stats = orchestrator.stats();
    let forest = orchestrator.forest();
    let recommended = ShareTemplate::recommend(stats, forest);

    match action {
        ShareAction::Preview { template } => {
            let template = template.unwrap_or(recommended);
            let draft = ShareDraft::from_template(template, stats, forest)?;
            print_json(&json!({
                "template": template,
                "recommended": recommended,
                "text": draft.text(),
                "chars": draft.char_count(),
                "url": draft.compose_url(),
            }))?;
        }
        ShareAction::Post { template, text } => {
            let draft = match text {
                Some(text) => ShareDraft::new(text)?,
                None => ShareDraft::from_template(template.unwrap_or(recommended), stats, forest)?,
            };
            let target = BrowserShare;
            target.share(&draft)?;
            print_json(&json!({
                "target": target.name(),
                "url": draft.compose_url(),
            }))?;
        }
    }
    Ok(())
}
