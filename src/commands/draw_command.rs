use rand::Rng;

use crate::{draw_engine, entities, ports, AppError};

/// Validates `count`, reads every dish and draws a set from them.
pub async fn draw_dishes<R, G>(
    repo: &mut R,
    rng: &mut G,
    count: i64,
) -> Result<entities::DrawResult, AppError>
where
    R: ports::DishEntriesRepository<Error = anyhow::Error>,
    G: Rng + ?Sized,
{
    let count = entities::DrawCount::try_from(count)?;
    let population = repo.list_all().await?;
    let dishes = draw_engine::draw(&population, count, rng)?;
    log::info!(
        "drew {} of {} dishes (requested {})",
        dishes.len(),
        population.len(),
        count.value()
    );
    Ok(entities::DrawResult { dishes })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::adapters::MemoryStore;
    use crate::ports::DishEntriesRepository;

    async fn seed(store: &mut MemoryStore, dishes: &[(&str, &str)]) -> Vec<entities::DishEntry> {
        let mut created = Vec::new();
        for (name, origin) in dishes {
            created.push(
                store
                    .create(
                        entities::UserId::from("seeder".to_string()),
                        Utc::now(),
                        entities::DishName::try_from(*name).unwrap(),
                        entities::DishOrigin::try_from(*origin).unwrap(),
                    )
                    .await
                    .unwrap(),
            );
        }
        created
    }

    #[tokio::test]
    async fn test_draw_two_of_three() {
        let mut store = MemoryStore::new();
        let population = seed(
            &mut store,
            &[("煮物", "伝統"), ("黒豆", "豆"), ("田作り", "小魚")],
        )
        .await;
        let mut rng = StdRng::seed_from_u64(2024);

        let result = draw_dishes(&mut store, &mut rng, 2).await.unwrap();
        assert_eq!(result.len(), 2);

        let ids = result.dishes.iter().map(|d| &d.id).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|id| population.iter().any(|p| &p.id == *id)));
    }

    #[tokio::test]
    async fn test_draw_from_empty_pool() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(0);
        let err = draw_dishes(&mut store, &mut rng, 5).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyPopulation));
    }

    #[tokio::test]
    async fn test_count_out_of_range() {
        let mut store = MemoryStore::new();
        seed(&mut store, &[("昆布巻き", "よろこぶ")]).await;
        let mut rng = StdRng::seed_from_u64(0);

        for count in [0, -1, 21] {
            let err = draw_dishes(&mut store, &mut rng, count).await.unwrap_err();
            assert!(err.is_validation(), "{:?}", err);
        }
    }
}
