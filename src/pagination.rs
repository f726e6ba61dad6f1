//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of records to return per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a client may ask for.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// A validated request for one page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The 1-based page number.
    pub page: u64,
    /// The maximum number of records on a page.
    pub per_page: u64,
}

impl PageRequest {
    /// Build a page request from the raw `page` and `perPage` query parameters,
    /// falling back to the defaults in `config` for missing values.
    ///
    /// # Errors
    /// Returns [Error::InvalidParameter] if either value is not a positive
    /// integer, or if `perPage` exceeds [PaginationConfig::max_page_size].
    pub fn parse(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let page = parse_positive("page", page)?.unwrap_or(config.default_page);
        let per_page = parse_positive("perPage", per_page)?.unwrap_or(config.default_page_size);

        if per_page > config.max_page_size {
            return Err(Error::InvalidParameter {
                name: "perPage",
                reason: format!(
                    "{per_page} is larger than the maximum page size of {}",
                    config.max_page_size
                ),
            });
        }

        Ok(Self { page, per_page })
    }

    /// The number of records to return.
    pub fn limit(&self) -> u64 {
        self.per_page
    }

    /// The number of records to skip before the start of the page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

fn parse_positive(name: &'static str, raw: Option<&str>) -> Result<Option<u64>, Error> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::InvalidParameter {
            name,
            reason: format!("\"{raw}\" is not a positive integer"),
        }),
        Ok(value) => Ok(Some(value)),
    }
}
