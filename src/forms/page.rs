use serde::Deserialize;

use crate::forms::FormError;
use crate::repository::{ClientSortField, SortDirection};
use crate::services::page::PageRequest;

/// Query string of `GET /clientes/page`. Missing values take the defaults
/// of [`PageRequest`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub lines_per_page: Option<i64>,
    pub order_by: Option<String>,
    pub direction: Option<String>,
}

fn non_negative(value: i64, field: &'static str) -> Result<usize, FormError> {
    usize::try_from(value).map_err(|_| FormError::Negative(field))
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = FormError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        let mut request = PageRequest::default();

        if let Some(page) = query.page {
            request.page = non_negative(page, "page")?;
        }
        if let Some(size) = query.lines_per_page {
            request.lines_per_page = non_negative(size, "linesPerPage")?;
        }
        if let Some(order_by) = query.order_by {
            request.order_by = order_by
                .parse::<ClientSortField>()
                .map_err(FormError::field("orderBy"))?;
        }
        if let Some(direction) = query.direction {
            request.direction = direction
                .parse::<SortDirection>()
                .map_err(FormError::field("direction"))?;
        }

        Ok(request)
    }
}
