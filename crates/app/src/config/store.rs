//! Store Config

use clap::Args;

/// Hosted store settings.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// Store project URL, e.g. `https://abc.supabase.co`
    #[arg(long, env = "SUPABASE_URL")]
    pub store_url: String,

    /// Store anonymous API key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub store_key: String,
}
