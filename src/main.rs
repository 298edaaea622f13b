use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::core::Output;
use twig::config::Config;
use twig::errors::twig_error;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small single-user version-control system",
    long_about = "twig tracks the plain files of one directory: it snapshots them into \
    content-addressed commits, keeps branches, and merges them with a three-way merge.",
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
        about = "Initialize a new repository",
        long_about = "This command creates a repository with its initial commit \
        in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal and delete it if it is tracked"
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current head")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the head commit, \
        checkout <commit> -- <file> restores it from the given commit, \
        checkout <branch> switches to a branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when a file follows `--`")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current head")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register another repository's .twig directory")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        location: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "push", about = "Fast-forward a remote branch to the current head")]
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

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match twig_error(&error) {
                Some(error) => println!("{error}"),
                None => println!("{error:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let output = Output::select(&config, cli.command.is_paged());

    let path = match &cli.command {
        Commands::Init { path: Some(path) } => {
            std::fs::create_dir_all(path)?;
            path.clone()
        }
        _ => std::env::current_dir()?.to_string_lossy().to_string(),
    };
    let repository = Repository::new(&path, output.writer(), config)?;

    match &cli.command {
        Commands::Init { .. } => repository.init()?,
        Commands::Add { file } => repository.add(file)?,
        Commands::Commit { message } => {
            repository.commit(message)?;
        }
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Checkout { target, file } => match (target, file) {
            (commit, Some(file)) => repository.checkout_file(commit.as_deref(), file)?,
            (Some(branch), None) => repository.checkout_branch(branch)?,
            (None, None) => anyhow::bail!("Incorrect operands."),
        },
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Reset { commit } => repository.reset(commit)?,
        Commands::Merge { branch } => {
            repository.merge(branch)?;
        }
        Commands::AddRemote { name, location } => repository.add_remote(name, location)?,
        Commands::RmRemote { name } => repository.rm_remote(name)?,
        Commands::Push { remote, branch } => repository.push(remote, branch)?,
        Commands::Fetch { remote, branch } => repository.fetch(remote, branch)?,
        Commands::Pull { remote, branch } => {
            repository.pull(remote, branch)?;
        }
    }

    // release the pager writer before paging
    drop(repository);
    output.finish()
}
