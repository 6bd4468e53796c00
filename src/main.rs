mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use repocard::{
    ClientConfig, GithubClient, RenderConfig, RepositoryInput, RepositoryLookup, Session,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, Target};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // 0 = ok, 1 = the lookup or export failed, 2 = unexpected error
    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,repocard=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let client = GithubClient::new(ClientConfig {
        api_base: cli.api_base.clone(),
        token: cli.token.clone().filter(|t| !t.is_empty()),
        timeout_ms: cli.timeout_ms,
        ..Default::default()
    })
    .context("failed to set up the API client")?;

    match cli.command {
        Commands::Show { target, json } => {
            let render = RenderConfig {
                locale: cli.locale,
                ..Default::default()
            };
            let mut session = Session::new(client, render);
            if !search(&mut session, &target).await {
                return Ok(1);
            }

            let state = session.state();
            if json {
                let out = serde_json::json!({
                    "repository": state.result,
                    "card": state.card,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if let Some(card) = &state.card {
                print!("{}", card.to_text());
            }
            Ok(0)
        }
        Commands::Export {
            target,
            modes,
            out,
            data_url,
            scale,
        } => {
            let render = RenderConfig {
                locale: cli.locale,
                scale,
                ..Default::default()
            };
            render.validate()?;
            let mut session = Session::new(client, render);
            if !search(&mut session, &target).await {
                return Ok(1);
            }

            if !data_url {
                std::fs::create_dir_all(&out)
                    .with_context(|| format!("cannot create {}", out.display()))?;
            }

            let mut code = 0;
            for mode in modes {
                match session.export(mode) {
                    Some(image) if data_url => println!("{}", image.to_data_url()),
                    Some(image) => {
                        let path = image.write_to(&out)?;
                        println!("{}", path.display());
                    }
                    None => {
                        if let Some(message) = &session.state().export_error {
                            eprintln!("{}", message);
                        }
                        code = 1;
                    }
                }
            }
            Ok(code)
        }
    }
}

/// Fill the form from the command line and submit it. Prints the inline
/// error and returns false when the search did not produce a card.
async fn search<L: RepositoryLookup>(session: &mut Session<L>, target: &Target) -> bool {
    let state = session.state_mut();
    match target.input() {
        RepositoryInput::Manual { owner, repo } => state.set_manual(owner, repo),
        RepositoryInput::Reference { reference } => state.set_reference(reference),
    }

    if session.search().await.is_some() {
        return true;
    }
    if let Some(error) = &session.state().error {
        eprintln!("{}", error);
    }
    false
}
