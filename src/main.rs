use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use ghrepos::{Config, RepoQuery, SettingsOverrides, build_widget, save_settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ghrepos", version, about = "Render a GitHub user's repositories as HTML")]
struct Cli {
    /// Config file (defaults to ./ghrepos.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the widget HTML to stdout
    Render(SettingsArgs),
    /// Store new widget settings and drop the cached list for the old ones
    Save(SettingsArgs),
    /// Drop the cached list for a username
    Invalidate {
        username: String,
        #[arg(long, default_value = "full_name")]
        sort: String,
        #[arg(long)]
        count: Option<i64>,
    },
}

#[derive(Args)]
struct SettingsArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long, short)]
    username: Option<String>,
    /// created, updated, pushed or full_name
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    count: Option<i64>,
    /// Show the follow button (`--badge` or `--badge=false`)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    badge: Option<bool>,
}

impl From<SettingsArgs> for SettingsOverrides {
    fn from(args: SettingsArgs) -> Self {
        Self {
            title: args.title,
            username: args.username,
            sort: args.sort,
            count: args.count,
            badge: args.badge,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::find_path);
    let config = match &config_path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => Config::default(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match &config_path {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let widget = build_widget(&config).context("Failed to initialize widget")?;

    match cli.command {
        Command::Render(args) => {
            let settings = SettingsOverrides::from(args).apply(&config.widget);
            println!("{}", widget.render(&settings).await);
        }
        Command::Save(args) => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            save_settings(&widget, &config, &path, args.into())
                .with_context(|| format!("Failed to save config file: {}", path.display()))?;
        }
        Command::Invalidate {
            username,
            sort,
            count,
        } => {
            widget.fetcher().invalidate(&RepoQuery::new(&username, &sort, count));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_args(argv: &[&str]) -> SettingsOverrides {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Render(args) | Command::Save(args) => args.into(),
            Command::Invalidate { .. } => panic!("expected a settings command"),
        }
    }

    #[test]
    fn test_bare_badge_flag_is_true() {
        let overrides = settings_args(&["ghrepos", "render", "--badge"]);
        assert_eq!(overrides.badge, Some(true));
    }

    #[test]
    fn test_badge_flag_accepts_false() {
        let overrides = settings_args(&["ghrepos", "save", "--badge=false"]);
        assert_eq!(overrides.badge, Some(false));
    }

    #[test]
    fn test_unset_flags_are_none() {
        let overrides = settings_args(&["ghrepos", "render", "-u", "hubot"]);
        assert_eq!(
            overrides,
            SettingsOverrides {
                username: Some("hubot".to_string()),
                ..SettingsOverrides::default()
            }
        );
    }
}
