//! Command-line interface definition

use clap::{Parser, Subcommand};
use localstore_domain::{ApplicationStatus, GeoPoint, Id};

/// LocalStore job marketplace client
#[derive(Debug, Parser)]
#[command(name = "localstore", version, about)]
pub struct Cli {
    /// Config file (JSON or TOML). Defaults to environment, then probing.
    #[arg(long, global = true, env = "LOCALSTORE_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session tokens
    Login {
        username: String,
        #[arg(long, env = "LOCALSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// List jobs
    Jobs {
        /// Filter by job title or shop name
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rank shops by distance from `lat,lng`
        #[arg(long, allow_hyphen_values = true)]
        near: Option<GeoPoint>,
    },
    /// Show one job
    Job { id: Id },
    /// List your applications (or received applications for shop owners)
    Applications,
    /// Accept, shortlist or reject an application
    Decide {
        job_id: Id,
        application_id: Id,
        /// PENDING, SHORTLISTED, ACCEPTED or REJECTED
        status: ApplicationStatus,
        #[arg(long)]
        note: Option<String>,
        /// When accepting, reject all other open applications with this note
        #[arg(long)]
        reject_others: Option<String>,
    },
    /// Shop owner dashboard figures
    Analytics,
}
