use tracing::info;

use super::ShareDraft;
use crate::error::CoreError;

/// Somewhere a draft can be posted. No response is expected back.
pub trait SocialShare {
    fn name(&self) -> &str;

    /// Hand the draft over.
    ///
    /// # Errors
    /// Returns [`CoreError::Share`] when the target could not be reached.
    fn share(&self, draft: &ShareDraft) -> Result<(), CoreError>;
}

/// Opens the compose URL in the default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserShare;

impl SocialShare for BrowserShare {
    fn name(&self) -> &str {
        "browser"
    }

    fn share(&self, draft: &ShareDraft) -> Result<(), CoreError> {
        let url = draft.compose_url();
        open::that(&url).map_err(|e| CoreError::Share(format!("could not open {url}: {e}")))?;
        info!(chars = draft.char_count(), "opened compose window");
        Ok(())
    }
}
