use clap::Parser;
use std::path::PathBuf;

use crate::timeline::{GroupBy, SortOrder};

#[derive(Parser)]
#[command(name = "argocd-timeline")]
#[command(about = "Timeline view for a deployed application: sync, pod and pressure summaries plus a filtered event stream")]
pub struct Cli {
    /// Application tree snapshot file (JSON or YAML)
    #[arg(short = 't', long)]
    pub tree: Option<PathBuf>,

    /// Resource status list, or a full application object (JSON or YAML)
    #[arg(short = 'r', long)]
    pub resources: Option<PathBuf>,

    /// Event collection: bare array or a List object (JSON or YAML)
    #[arg(short = 'e', long)]
    pub events: Option<PathBuf>,

    /// Event sort order
    #[arg(short = 's', long, value_enum, default_value_t = SortOrder::New)]
    pub sort: SortOrder,

    /// Show warning events only
    #[arg(short = 'w', long)]
    pub warnings_only: bool,

    /// Group interval (reserved for future time bucketing)
    #[arg(short = 'g', long, value_enum, default_value_t = GroupBy::OneMin)]
    pub group_by: GroupBy,

    /// Only show events whose message matches this regex
    #[arg(long)]
    pub grep: Option<String>,

    /// Disable TUI mode and print to stdout
    #[arg(long)]
    pub no_tui: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
