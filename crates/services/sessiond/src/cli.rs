//! Command-line interface for sessiond.

use clap::Parser;
use std::path::PathBuf;

/// Command-line interface for sessiond.
#[derive(Parser, Debug)]
#[command(name = "sessiond")]
#[command(about = "Cookie-carried JWT session service")]
pub struct Cli {
    /// Path to the configuration file; built-in defaults apply when omitted
    #[arg(short, long, env = "SESSIOND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,
}
