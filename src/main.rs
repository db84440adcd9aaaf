use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::errors::TwigError;

const LOG_ENV: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local-first version control system",
    long_about = "twig records snapshots of a working directory as content-addressed commits, \
    moves between them through branches, merges branches with a three-way merge \
    and synchronizes with other repositories on the local filesystem.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .twig directory and the initial commit \
        in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the working tree")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes",
        long_about = "This command snapshots HEAD's files overlaid with the staging area."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "rm", about = "Unstage a file or stage its removal")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the first-parent history of HEAD")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the IDs of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from HEAD, \
        checkout <commit> -- <file> restores it from a commit, \
        checkout <branch> switches to a branch."
    )]
    Checkout {
        #[arg(help = "A branch name, or a commit ID when a file follows")]
        target: Option<String>,
        #[arg(last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at HEAD")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to a commit")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register a remote repository")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2, help = "Path to the remote's .twig directory or working tree")]
        path: String,
    },
    #[command(name = "rm-remote", about = "Unregister a remote repository")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "push", about = "Fast-forward a remote branch to HEAD")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "fetch", about = "Copy a remote branch into <remote>/<branch>")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "pull", about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let result = match Cli::try_parse() {
        Ok(cli) => run(cli).await,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            ErrorKind::InvalidSubcommand => Err(TwigError::UnknownCommand.into()),
            _ => {
                tracing::debug!(%error, "rejected command line");
                Err(TwigError::BadArgs.into())
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match TwigError::find(&error) {
            Some(twig_error) => {
                tracing::debug!("{:#}", error);
                println!("{}", twig_error);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("fatal: {:#}", error);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.ok_or(TwigError::NoCommand)?;
    let pwd = std::env::current_dir()?;

    let mut repository = match &command {
        Commands::Init { path: Some(path) } => {
            std::fs::create_dir_all(path)?;
            Repository::new(path, Box::new(std::io::stdout()))?
        }
        _ => Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?,
    };

    if !matches!(command, Commands::Init { .. }) {
        repository.require_initialized()?;
    }

    match command {
        Commands::Init { .. } => repository.init().await?,
        Commands::Add { file } => repository.add(&file).await?,
        Commands::Commit { message } => repository.commit(&message.unwrap_or_default()).await?,
        Commands::Rm { file } => repository.rm(&file).await?,
        Commands::Log => repository.log().await?,
        Commands::GlobalLog => repository.global_log().await?,
        Commands::Find { message } => repository.find(&message).await?,
        Commands::Status => repository.status().await?,
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file(&file).await?,
            (Some(commit), Some(file)) => repository.checkout_file_at(&commit, &file).await?,
            (Some(branch), None) => repository.checkout_branch(&branch).await?,
            (None, None) => return Err(TwigError::BadArgs.into()),
        },
        Commands::Branch { name } => repository.branch(&name).await?,
        Commands::RmBranch { name } => repository.rm_branch(&name).await?,
        Commands::Reset { commit } => repository.reset(&commit).await?,
        Commands::Merge { branch } => repository.merge(&branch).await?,
        Commands::AddRemote { name, path } => repository.add_remote(&name, &path).await?,
        Commands::RmRemote { name } => repository.rm_remote(&name).await?,
        Commands::Push { remote, branch } => repository.push(&remote, &branch).await?,
        Commands::Fetch { remote, branch } => repository.fetch(&remote, &branch).await?,
        Commands::Pull { remote, branch } => repository.pull(&remote, &branch).await?,
    }

    repository.writer().flush()?;

    Ok(())
}
