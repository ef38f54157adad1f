//! Admin Config

use std::path::PathBuf;

use clap::Args;

/// Admin gate settings.
#[derive(Debug, Clone, Args)]
pub struct AdminConfig {
    /// Password unlocking catalog edits
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// File holding the persisted admin flag
    #[arg(long, env = "JOBSTACK_SESSION_FILE", default_value = ".jobstack-session.json")]
    pub session_file: PathBuf,
}
