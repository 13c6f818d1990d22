use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use osechi_gacha::adapters::{
    AnonymousIdentity, DishEntriesRepositoryImpl, FileLocalStorage, FileStore, MemoryStore,
    ShareSnapshotsRepositoryImpl,
};
use osechi_gacha::app_config::{AppConfig, AuthConfig, StoreConfig};
use osechi_gacha::app_ctx::{AppCtx, SessionCtx};
use osechi_gacha::commands::Confirmation;
use osechi_gacha::dispatcher::{Command, Dispatcher, Outcome};
use osechi_gacha::ownership_ledger::OwnershipLedger;
use osechi_gacha::ports::{self, IdentityProvider};
use osechi_gacha::{entities, render};

#[derive(Parser, Debug)]
#[command(name = "osechi-gacha", author, version, about = "おせちガチャ")]
struct Cli {
    /// Print HTML fragments instead of plain text
    #[arg(long, global = true, default_value_t = false)]
    html: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a dish to the pool
    Add { name: String, origin: String },
    /// Draw a random set of dishes
    Draw {
        count: i64,
        /// Also create a share link for the result
        #[arg(long, default_value_t = false)]
        share: bool,
    },
    /// Show every dish in the pool
    List,
    /// Show the dishes added from this machine
    Mine,
    /// Delete one of your dishes
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Show the dishes of a share link
    Open { url: String },
}

fn ask_confirmation() -> Confirmation {
    print!("{} [y/N] ", render::MSG_DELETE_PROMPT);
    let _ = io::stdout().flush();
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(0) | Err(_) => Confirmation::Dismissed,
        Ok(_) => Confirmation::from_answer(Some(answer.as_str())),
    }
}

fn command_for(cli: &Cli) -> Command {
    match &cli.command {
        Commands::Add { name, origin } => Command::SubmitDish {
            name: name.clone(),
            origin: origin.clone(),
        },
        Commands::Draw { count, .. } => Command::Draw { count: *count },
        Commands::List => Command::ListAll,
        Commands::Mine => Command::ListMine,
        Commands::Delete { id, yes } => {
            let confirmation = if *yes {
                Confirmation::Yes
            } else {
                ask_confirmation()
            };
            Command::DeleteDish {
                id: entities::DishEntryId::from(id.clone()),
                confirmation,
            }
        }
        Commands::Open { url } => Command::OpenLink { url: url.clone() },
    }
}

async fn dispatch_and_print<D, S>(
    cli: &Cli,
    app: &mut Dispatcher<D, S, FileLocalStorage, rand::rngs::ThreadRng>,
    command: Command,
) -> Option<Outcome>
where
    D: ports::DishEntriesRepository<Error = anyhow::Error>,
    S: ports::ShareSnapshotsRepository<Error = anyhow::Error>,
{
    let kind = command.kind();
    match app.dispatch(command).await {
        Ok(outcome) => {
            if cli.html {
                println!("{}", render::render_html(&outcome, &app.ctx.app_name, Utc::now()));
            } else {
                print!("{}", render::render_text(&outcome));
            }
            Some(outcome)
        }
        Err(e) => {
            eprintln!("{}", render::failure_message(kind, &e));
            None
        }
    }
}

async fn run<D, S>(cli: &Cli, app: &mut Dispatcher<D, S, FileLocalStorage, rand::rngs::ThreadRng>) -> bool
where
    D: ports::DishEntriesRepository<Error = anyhow::Error>,
    S: ports::ShareSnapshotsRepository<Error = anyhow::Error>,
{
    let Some(outcome) = dispatch_and_print(cli, app, command_for(cli)).await else {
        return false;
    };

    let share = matches!(cli.command, Commands::Draw { share: true, .. });
    if let (true, Outcome::Drawn(draw)) = (share, outcome) {
        return dispatch_and_print(cli, app, Command::ShareDraw(draw))
            .await
            .is_some();
    }
    true
}

async fn establish_session(config: &AppConfig, storage: &FileLocalStorage) -> SessionCtx {
    match config.auth {
        AuthConfig::Disable => SessionCtx::unauthenticated(),
        AuthConfig::Anonymous => {
            match AnonymousIdentity::new(storage.clone()).ensure_session().await {
                Ok(user_id) => SessionCtx::signed_in(user_id),
                Err(e) => {
                    log::warn!("anonymous sign-in failed: {:#}", e);
                    SessionCtx::unauthenticated()
                }
            }
        }
    }
}

async fn try_main(cli: Cli) -> anyhow::Result<bool> {
    let config = AppConfig::from_env()?;
    let storage = FileLocalStorage::new(config.local_storage_dir.clone());
    let ctx = AppCtx {
        session: establish_session(&config, &storage).await,
        share_base_url: config.share_base_url.clone(),
        app_name: config.app_name.clone(),
    };
    let ledger = OwnershipLedger::new(storage);

    log::info!("🎍 おせちガチャアプリが起動しました！");
    match &config.store {
        StoreConfig::File { dir } => {
            log::info!("dish pool kept in {}", dir.display());
            let store = FileStore::new(dir.clone());
            let mut app = Dispatcher::new(ctx, store.clone(), store, ledger, rand::rng());
            Ok(run(&cli, &mut app).await)
        }
        StoreConfig::Memory => {
            log::warn!("STORE_KIND=MEMORY keeps nothing once this run ends");
            let store = MemoryStore::new();
            let mut app = Dispatcher::new(ctx, store.clone(), store, ledger, rand::rng());
            Ok(run(&cli, &mut app).await)
        }
        StoreConfig::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .connect(database_url)
                .await
                .context("connect DATABASE_URL")?;
            sqlx::migrate!().run(&pool).await.context("migrate")?;
            let mut app = Dispatcher::new(
                ctx,
                DishEntriesRepositoryImpl::new(pool.clone()),
                ShareSnapshotsRepositoryImpl::new(pool),
                ledger,
                rand::rng(),
            );
            Ok(run(&cli, &mut app).await)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match try_main(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("❌ 起動に失敗しました: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
