use crate::recommend::{run_recommend, run_strength, RecommendArgs, StrengthArgs};
use crate::server;
use admit_compass::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "admit-compass",
    about = "Score study-abroad profiles against a university catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print ranked university recommendations for a profile JSON file
    Recommend(RecommendArgs),
    /// Print the profile-strength summary for a profile JSON file
    Strength(StrengthArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Strength(args) => run_strength(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["admit-compass"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn recommend_accepts_limit_and_catalog() {
        let cli = Cli::try_parse_from([
            "admit-compass",
            "recommend",
            "--profile",
            "profile.json",
            "--catalog-csv",
            "universities.csv",
            "--limit",
            "3",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Recommend(args)) => {
                assert_eq!(args.profile.to_str(), Some("profile.json"));
                assert_eq!(
                    args.catalog_csv.as_deref().and_then(|path| path.to_str()),
                    Some("universities.csv")
                );
                assert_eq!(args.limit, Some(3));
            }
            other => panic!("expected recommend command, got {other:?}"),
        }
    }

    #[test]
    fn serve_overrides_parse() {
        let cli = Cli::try_parse_from(["admit-compass", "serve", "--port", "8080"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
