use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::error::{ErrorKind, RepositoryError};
use gitlet::artifacts::core::{NO_PAGER_ENV, PagerWriter};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A small single-user version-control system",
    long_about = "Gitlet keeps snapshots of a directory as commits in a content-addressed \
    store under .gitlet, with branches, a staging area and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a repository in the current directory",
        long_about = "This command creates .gitlet with a root commit on the master branch."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal and delete it"
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the IDs of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged and unstaged changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch.\n\
        checkout -- <file> restores a file from HEAD.\n\
        checkout <commit> -- <file> restores a file from a commit."
    )]
    Checkout {
        #[arg(
            index = 1,
            required_unless_present = "file",
            help = "The branch to switch to, or the commit to restore from"
        )]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at HEAD")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to a commit and check it out"
    )]
    Reset {
        #[arg(index = 1, help = "The commit ID or a unique prefix of it")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(error),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn use_pager(command: &Commands) -> bool {
    command.is_paged() && std::env::var(NO_PAGER_ENV).is_err() && std::io::stdout().is_terminal()
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let pager = use_pager(&command).then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let pwd = std::env::current_dir()?;
    let repository = Repository::new(&pwd.to_string_lossy(), writer)?;

    match command {
        Commands::Init => repository.init().await?,
        Commands::Add { file } => repository.add(&file).await?,
        Commands::Commit { message } => {
            repository.commit(&message).await?;
        }
        Commands::Rm { file } => repository.rm(&file).await?,
        Commands::Log => {
            repository.log().await?;
        }
        Commands::GlobalLog => {
            repository.global_log().await?;
        }
        Commands::Find { message } => {
            repository.find(&message).await?;
        }
        Commands::Status => {
            repository.status().await?;
        }
        Commands::Checkout { target, file } => match (target, file) {
            (revision, Some(file)) => repository.checkout_file(revision.as_deref(), &file).await?,
            (Some(branch), None) => repository.checkout_branch(&branch).await?,
            (None, None) => anyhow::bail!("checkout needs a branch or a file"),
        },
        Commands::Branch { name } => repository.branch(&name).await?,
        Commands::RmBranch { name } => repository.rm_branch(&name).await?,
        Commands::Reset { commit } => {
            repository.reset(&commit).await?;
        }
        Commands::Merge { branch } => {
            repository.merge(&branch).await?;
        }
    }

    repository.writer().flush()?;
    drop(repository);

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}

fn report(error: anyhow::Error) -> ExitCode {
    match error.downcast_ref::<RepositoryError>() {
        Some(repository_error) => match repository_error.kind() {
            ErrorKind::Notice => {
                println!("{repository_error}");
                ExitCode::SUCCESS
            }
            ErrorKind::UserInput | ErrorKind::StateConflict => {
                eprintln!("{repository_error}");
                ExitCode::from(1)
            }
        },
        None => {
            eprintln!("fatal: {error:#}");
            ExitCode::from(128)
        }
    }
}
