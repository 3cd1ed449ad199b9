use clap::{Args, Parser, Subcommand};
use jobboard_backend::{
    config::{get_config, init_config, Config, LogFormat},
    database::{pool::create_pool, MemoryStore, PgStore, Store},
    routes,
    services::seed_service::{SeedPlan, SeedService},
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "jobboard-backend",
    about = "Job board admin API and test-data generators",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP admin API (default command)
    Serve(ServeArgs),
    /// Fill the database with 10 countries of 10 towns, companies and specialists
    GenerateTestData,
    /// Fill the database with 100 single-town countries, companies and specialists
    GenerateTestDataFactory,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Keep all data in process memory instead of Postgres
    #[arg(long)]
    in_memory: bool,
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_format);

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) if args.in_memory => {
            info!("Using in-memory store, data is lost on exit");
            serve(config, MemoryStore::new()).await
        }
        Command::Serve(_) => serve(config, connect(config).await?).await,
        Command::GenerateTestData => generate(config, SeedPlan::bulk()).await,
        Command::GenerateTestDataFactory => generate(config, SeedPlan::factory()).await,
    }
}

async fn connect(config: &Config) -> anyhow::Result<PgStore> {
    let pool = create_pool(config).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");
    Ok(PgStore::new(pool))
}

async fn serve<S: Store>(config: &Config, store: S) -> anyhow::Result<()> {
    let app = routes::router(AppState::new(store))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn generate(config: &Config, plan: SeedPlan) -> anyhow::Result<()> {
    let store = connect(config).await?;
    let mut seeder = SeedService::new(store, config.test_data_seed);
    let report = seeder.run(plan).await?;
    info!(
        countries = report.countries,
        towns = report.towns,
        companies = report.companies,
        specialists = report.specialists,
        vacancies = report.vacancies,
        resumes = report.resumes,
        "Test data generation finished"
    );
    Ok(())
}
