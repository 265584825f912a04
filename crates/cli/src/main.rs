use std::error::Error;

use api_types::transaction::SortOrder;
use clap::{Args, Parser, Subcommand};
use client::{ApiClient, ApiConfig, ListQuery, SessionManager, TokenStore, TransactionList, TypeFilter};

mod output;
mod prompt;

const DEFAULT_CONFIG_PATH: &str = "config/fintrack.toml";

#[derive(Parser, Debug)]
#[command(name = "fintrack")]
#[command(about = "Terminal client for the FinTrack personal-finance API")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the main API base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// Override the auth URL.
    #[arg(long)]
    auth_url: Option<String>,
    /// Override the session file path.
    #[arg(long)]
    session_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session (password is prompted, never a flag).
    Login(LoginArgs),
    /// Clear the persisted session.
    Logout,
    /// Show the logged-in profile.
    Whoami,
    /// List transactions.
    Transactions(TransactionsArgs),
    /// Current-month dashboard stats.
    Dashboard,
    /// Income/expense analytics.
    Analytics(AnalyticsArgs),
    /// Budget overview.
    Budgets,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
}

#[derive(Args, Debug)]
struct TransactionsArgs {
    /// Server-side sort: -date, date, -amount, amount.
    #[arg(long, default_value = "-date", value_parser = parse_sort, allow_hyphen_values = true)]
    sort: SortOrder,
    /// Server-side search query.
    #[arg(long, default_value = "")]
    search: String,
    /// Client-side filter: all, income, expense.
    #[arg(long, default_value = "all")]
    filter: TypeFilter,
    /// Pages to fetch (0 = follow `next` to the end).
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[derive(Args, Debug)]
struct AnalyticsArgs {
    #[arg(long, default_value_t = 6)]
    months: u32,
}

fn parse_sort(raw: &str) -> Result<SortOrder, String> {
    match raw {
        "-date" => Ok(SortOrder::DateDesc),
        "date" => Ok(SortOrder::DateAsc),
        "-amount" => Ok(SortOrder::AmountDesc),
        "amount" => Ok(SortOrder::AmountAsc),
        other => Err(format!("unknown sort: {other}")),
    }
}

fn load_config(cli: &Cli) -> Result<ApiConfig, Box<dyn Error + Send + Sync>> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINTRACK"));
    let mut settings: ApiConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(auth_url) = &cli.auth_url {
        settings.auth_url = auth_url.clone();
    }
    if let Some(session_path) = &cli.session_path {
        settings.session_path = session_path.clone();
    }

    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("FINTRACK_LOG").unwrap_or_else(|_| "fintrack=info,client=warn".to_string()),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!("using API at {}", config.base_url);

    let store = TokenStore::load_or_empty(&config.session_path);
    let api = ApiClient::new(&config, store.clone())?;
    let mut session = SessionManager::new(api.clone(), store);
    session.bootstrap().await;

    match cli.command {
        Command::Login(args) => {
            let password = prompt::password("Password: ")?;
            let user = session.login(&args.email, &password).await?;
            println!(
                "logged in as {} {} <{}>",
                user.first_name, user.last_name, user.email
            );
        }
        Command::Logout => {
            session.logout().await;
            println!("session cleared ({})", api.store().path().display());
        }
        Command::Whoami => match session.user() {
            Some(user) => {
                println!("{} {} <{}>", user.first_name, user.last_name, user.email);
                println!("member since {}", user.date_joined.format("%Y-%m-%d"));
            }
            None => {
                eprintln!("not logged in");
                std::process::exit(1);
            }
        },
        Command::Transactions(args) => {
            require_auth(&session);

            let mut list = TransactionList::new(ListQuery {
                search: args.search,
                sort: args.sort,
            });
            list.set_filter(args.filter);

            list.load_first_page(&api).await?;
            let mut fetched = 1;
            while list.has_next() && (args.pages == 0 || fetched < args.pages) {
                if !list.load_next_page(&api).await? {
                    break;
                }
                fetched += 1;
            }

            output::transactions(&list);
        }
        Command::Dashboard => {
            require_auth(&session);
            let stats = api.dashboard_stats().await?;
            output::dashboard(&stats);
        }
        Command::Analytics(args) => {
            require_auth(&session);
            let analytics = api.analytics(args.months).await?;
            output::analytics(&analytics);
        }
        Command::Budgets => {
            require_auth(&session);
            let overview = api.budget_overview().await?;
            output::budgets(&overview);
        }
    }

    Ok(())
}

fn require_auth(session: &SessionManager) {
    if !session.is_authenticated() {
        eprintln!("not logged in, run `fintrack login` first");
        std::process::exit(1);
    }
}
