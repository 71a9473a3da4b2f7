use sea_orm::{ConnectionTrait, DbErr, EntityTrait, ItemsAndPagesNumber, PaginatorTrait, Select};
use serde::Serialize;

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
}

impl<T> Paged<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

/// Clamps a requested page into `1..=num_pages`. A missing or zero page
/// is the first page, anything past the end is the last one.
pub fn clamp_page(requested: Option<u64>, num_pages: u64) -> u64 {
    requested.unwrap_or(1).clamp(1, num_pages.max(1))
}

pub async fn paginate<C, E>(
    db: &C,
    select: Select<E>,
    per_page: u64,
    requested: Option<u64>,
) -> Result<Paged<E::Model>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: Sync,
{
    let paginator = select.paginate(db, per_page);
    let ItemsAndPagesNumber {
        number_of_items,
        number_of_pages,
    } = paginator.num_items_and_pages().await?;

    let number = clamp_page(requested, number_of_pages);
    let items = paginator.fetch_page(number - 1).await?;

    Ok(Paged {
        items,
        number,
        num_pages: number_of_pages.max(1),
        total: number_of_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(None, 4), 1);
        assert_eq!(clamp_page(Some(0), 4), 1);
        assert_eq!(clamp_page(Some(3), 4), 3);
        assert_eq!(clamp_page(Some(99), 4), 4);
        assert_eq!(clamp_page(Some(2), 0), 1);
    }
}
