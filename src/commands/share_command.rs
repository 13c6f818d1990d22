use chrono::{DateTime, Utc};

use crate::app_ctx::SessionCtx;
use crate::share_link::{self, ShareLink, ShareLinkKind};
use crate::{entities, ports, AppError};

/// Builds a share link for a draw.
///
/// A stored snapshot gives the short `?s=` link. Without a session, or when
/// the snapshot cannot be written, the dishes are embedded in the link
/// instead and the failure is only logged.
pub async fn create_share_link<R>(
    repo: &mut R,
    session: &SessionCtx,
    now: DateTime<Utc>,
    base_url: &str,
    draw: &entities::DrawResult,
) -> Result<ShareLink, AppError>
where
    R: ports::ShareSnapshotsRepository<Error = anyhow::Error>,
{
    let dishes = draw
        .dishes
        .iter()
        .map(entities::SharedDish::from)
        .collect::<Vec<_>>();

    if let Some(user_id) = session.user_id.clone() {
        match repo.create(user_id, now, dishes.clone()).await {
            Ok(snapshot) => {
                log::info!("share snapshot created: {}", snapshot.id);
                return Ok(ShareLink {
                    url: share_link::snapshot_url(base_url, &snapshot.id),
                    kind: ShareLinkKind::Snapshot(snapshot.id),
                });
            }
            Err(e) => {
                log::warn!("share snapshot failed, embedding the draw in the link: {:#}", e);
            }
        }
    } else {
        log::info!("no session, embedding the draw in the share link");
    }

    let url = share_link::inline_url(base_url, &dishes)
        .map_err(|e| AppError::from(anyhow::Error::from(e)))?;
    Ok(ShareLink {
        url,
        kind: ShareLinkKind::Inline,
    })
}
