use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use yt_history_config::{CredentialStore, PathManager};

pub fn run_clear(credentials: bool, output: &Output) -> Result<()> {
    if !credentials {
        output.warn("No clear option specified. Use --credentials");
        output.println("\nExample: tuberecall clear --credentials");
        return Ok(());
    }

    let path_manager = PathManager::default();
    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {:#}", cred_store.path().display(), e))?;

    if cred_store.get_youtube_access_token().is_none() && cred_store.get_youtube_refresh_token().is_none() {
        output.info("No stored YouTube credentials found");
        return Ok(());
    }

    cred_store.clear_youtube();
    cred_store
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {:#}", cred_store.path().display(), e))?;
    output.success(format!("Cleared YouTube credentials from {}", cred_store.path().display()));
    Ok(())
}
