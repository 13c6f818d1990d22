//! One entry point per user action.
//!
//! Each [`Command`] maps to a single command or query function and produces
//! an [`Outcome`] or an [`AppError`]. Rendering is left to [`crate::render`].

use chrono::Utc;
use rand::Rng;

use crate::app_ctx::AppCtx;
use crate::commands::{self, Confirmation, DeleteOutcome};
use crate::ownership_ledger::OwnershipLedger;
use crate::share_link::ShareLink;
use crate::{entities, ports, queries, AppError};

#[derive(Debug, Clone)]
pub enum Command {
    SubmitDish {
        name: String,
        origin: String,
    },
    Draw {
        count: i64,
    },
    ShareDraw(entities::DrawResult),
    ListAll,
    ListMine,
    DeleteDish {
        id: entities::DishEntryId,
        confirmation: Confirmation,
    },
    OpenLink {
        url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    SubmitDish,
    Draw,
    ShareDraw,
    ListAll,
    ListMine,
    DeleteDish,
    OpenLink,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SubmitDish { .. } => CommandKind::SubmitDish,
            Command::Draw { .. } => CommandKind::Draw,
            Command::ShareDraw(_) => CommandKind::ShareDraw,
            Command::ListAll => CommandKind::ListAll,
            Command::ListMine => CommandKind::ListMine,
            Command::DeleteDish { .. } => CommandKind::DeleteDish,
            Command::OpenLink { .. } => CommandKind::OpenLink,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    DishAdded(entities::DishEntry),
    Drawn(entities::DrawResult),
    Shared(ShareLink),
    AllDishes(Vec<entities::DishEntry>),
    MyDishes(Vec<entities::DishEntry>),
    Deleted(entities::DishEntryId),
    DeletionCancelled,
    SharedView(entities::SharedView),
    /// The opened URL carried no share parameters.
    NoSharedView,
}

pub struct Dispatcher<D, S, L, G> {
    pub ctx: AppCtx,
    dishes: D,
    snapshots: S,
    ledger: OwnershipLedger<L>,
    rng: G,
}

impl<D, S, L, G> Dispatcher<D, S, L, G>
where
    D: ports::DishEntriesRepository<Error = anyhow::Error>,
    S: ports::ShareSnapshotsRepository<Error = anyhow::Error>,
    L: ports::LocalStorage,
    L::Error: Into<anyhow::Error>,
    G: Rng,
{
    pub fn new(ctx: AppCtx, dishes: D, snapshots: S, ledger: OwnershipLedger<L>, rng: G) -> Self {
        Self {
            ctx,
            dishes,
            snapshots,
            ledger,
            rng,
        }
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome, AppError> {
        let kind = command.kind();
        let result = self.run(command).await;
        match &result {
            Ok(_) => {}
            Err(e) if e.is_validation() => log::info!("{:?} rejected: {}", kind, e),
            Err(e @ AppError::Collaborator(_)) => log::error!("{:?} failed: {}", kind, e),
            Err(e) => log::warn!("{:?} failed: {}", kind, e),
        }
        result
    }

    async fn run(&mut self, command: Command) -> Result<Outcome, AppError> {
        let now = Utc::now();
        match command {
            Command::SubmitDish { name, origin } => commands::submit_dish(
                &mut self.dishes,
                &mut self.ledger,
                &self.ctx.session,
                now,
                &name,
                &origin,
            )
            .await
            .map(Outcome::DishAdded),
            Command::Draw { count } => commands::draw_dishes(&mut self.dishes, &mut self.rng, count)
                .await
                .map(Outcome::Drawn),
            Command::ShareDraw(draw) => commands::create_share_link(
                &mut self.snapshots,
                &self.ctx.session,
                now,
                &self.ctx.share_base_url,
                &draw,
            )
            .await
            .map(Outcome::Shared),
            Command::ListAll => queries::load_all_dishes(&mut self.dishes)
                .await
                .map(Outcome::AllDishes),
            Command::ListMine => queries::load_my_dishes(&mut self.dishes, &mut self.ledger)
                .await
                .map(Outcome::MyDishes),
            Command::DeleteDish { id, confirmation } => {
                let outcome = commands::delete_dish(
                    &mut self.dishes,
                    &mut self.ledger,
                    &self.ctx.session,
                    &id,
                    confirmation,
                )
                .await?;
                Ok(match outcome {
                    DeleteOutcome::Deleted(id) => Outcome::Deleted(id),
                    DeleteOutcome::Cancelled => Outcome::DeletionCancelled,
                })
            }
            Command::OpenLink { url } => queries::resolve_shared_view(&mut self.snapshots, &url)
                .await
                .map(|view| view.map_or(Outcome::NoSharedView, Outcome::SharedView)),
        }
    }
}
