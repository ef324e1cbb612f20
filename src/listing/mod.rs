pub mod filter;
pub mod page;

use chrono::NaiveDate;

use crate::catalog::{CatalogError, Room, RoomCatalog};

pub use filter::{filter_rooms, ListingFilter};
pub use page::{paginate, Page};

pub async fn search_rooms(
    catalog: &dyn RoomCatalog,
    filter: &ListingFilter,
    today: NaiveDate,
    page: usize,
    per_page: usize,
) -> Result<Page<Room>, CatalogError> {
    let rooms = catalog.fetch_rooms().await?;
    let matching: Vec<Room> = filter_rooms(&rooms, filter, today)
        .into_iter()
        .cloned()
        .collect();

    tracing::info!("{} of {} rooms match {:?}", matching.len(), rooms.len(), filter);
    Ok(paginate(&matching, page, per_page))
}
