use std::io::Read;

use anyhow::Result;
use clap::Parser;

use git_tag_resource::commands;
use git_tag_resource::protocol::{CheckRequest, InRequest, OutRequest};
use git_tag_resource::ui::{self, StderrSink};

#[derive(clap::Parser)]
#[command(
    name = "git-tag-resource",
    about = "CI resource reporting new git tags in chronological order"
)]
struct Args {
    #[command(subcommand)]
    operation: Operation,
}

#[derive(clap::Subcommand)]
enum Operation {
    /// Report tags created since the previously-seen version
    Check,

    /// Fetch a previously reported version (pass-through)
    In {
        #[arg(help = "Working directory provided by the CI harness (unused)")]
        destination: Option<String>,
    },

    /// Publish step (no-op pass-through)
    Out {
        #[arg(help = "Working directory provided by the CI harness (unused)")]
        sources: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log = StderrSink;

    // The whole request arrives on stdin; stdout carries only response JSON.
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let output = match args.operation {
        Operation::Check => {
            let request: CheckRequest = serde_json::from_str(&input)?;
            match commands::run_check(&request, &log) {
                Ok(versions) => serde_json::to_string(&versions)?,
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            }
        }
        Operation::In { .. } => {
            let request: InRequest = serde_json::from_str(&input)?;
            serde_json::to_string(&commands::run_in(request, &log))?
        }
        Operation::Out { .. } => {
            let request: OutRequest = serde_json::from_str(&input)?;
            serde_json::to_string(&commands::run_out(request, &log))?
        }
    };

    println!("{}", output);
    Ok(())
}
