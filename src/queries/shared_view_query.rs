use crate::share_link::{self, ShareQuery};
use crate::{entities, ports, AppError};

/// Resolves the share parameters of a page URL.
///
/// Returns `Ok(None)` for a URL without share parameters.
pub async fn resolve_shared_view<R>(
    repo: &mut R,
    url: &str,
) -> Result<Option<entities::SharedView>, AppError>
where
    R: ports::ShareSnapshotsRepository<Error = anyhow::Error>,
{
    match share_link::parse_share_query(url) {
        None => Ok(None),
        Some(ShareQuery::Snapshot(id)) => {
            let snapshot = repo.get_by_id(&id).await?.ok_or(AppError::NotFound)?;
            Ok(Some(entities::SharedView {
                source: entities::SharedViewSource::Snapshot(snapshot.id),
                dishes: snapshot.dishes,
            }))
        }
        Some(ShareQuery::Inline(payload)) => {
            let dishes = share_link::decode_inline_payload(&payload).map_err(|e| {
                log::warn!("malformed shared payload: {}", e);
                AppError::DecodeFailure(e.to_string())
            })?;
            Ok(Some(entities::SharedView {
                source: entities::SharedViewSource::Inline,
                dishes,
            }))
        }
    }
}
