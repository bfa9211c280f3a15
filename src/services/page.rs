use crate::domain::client::Client;
use crate::domain::types::TypeConstraintError;
use crate::pagination::Page;
use crate::repository::{ClientPageQuery, ClientReader, ClientSortField, SortDirection};
use crate::services::{ServiceError, ServiceResult};

pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Requested window of the client listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub lines_per_page: usize,
    pub order_by: ClientSortField,
    pub direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            lines_per_page: DEFAULT_PAGE_SIZE,
            order_by: ClientSortField::Name,
            direction: SortDirection::Asc,
        }
    }
}

/// Returns one ordered page of clients.
///
/// The page size must be positive and is capped at `max_page_size`. Rows with
/// equal sort keys are ordered by id.
pub fn find_page<R>(
    repo: &R,
    request: &PageRequest,
    max_page_size: usize,
) -> ServiceResult<Page<Client>>
where
    R: ClientReader + ?Sized,
{
    if request.lines_per_page == 0 {
        return Err(TypeConstraintError::InvalidValue(
            "linesPerPage must be greater than zero".to_string(),
        )
        .into());
    }

    let size = request.lines_per_page.min(max_page_size.max(1));
    let query = ClientPageQuery::new(request.page, size).order_by(request.order_by, request.direction);

    let (total, clients) = repo.list_clients_page(&query).map_err(|e| {
        log::error!("Failed to list client page: {e}");
        ServiceError::from(e)
    })?;

    Ok(Page::new(clients, total, request.page, size))
}
