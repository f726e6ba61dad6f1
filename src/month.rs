//! The month of the year that every query is scoped to.

use std::fmt::Display;

use crate::Error;

/// A month of the year, 1 (January) through 12 (December).
///
/// Queries filtered by a [SaleMonth] match sales made in that month of *any*
/// year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SaleMonth(u8);

impl SaleMonth {
    /// Create a month from its number, 1 through 12.
    ///
    /// # Errors
    /// Returns [Error::InvalidParameter] if `month` is outside 1-12.
    pub fn new(month: u8) -> Result<Self, Error> {
        if (1..=12).contains(&month) {
            Ok(Self(month))
        } else {
            Err(Error::InvalidParameter {
                name: "month",
                reason: format!("{month} is not a month, expected a number from 1 to 12"),
            })
        }
    }

    /// Parse the `month` query parameter.
    ///
    /// # Errors
    /// Returns [Error::InvalidParameter] if the parameter is missing, not a
    /// number or outside 1-12.
    pub fn parse(raw: Option<&str>) -> Result<Self, Error> {
        let raw = raw.map(str::trim).filter(|raw| !raw.is_empty()).ok_or_else(|| {
            Error::InvalidParameter {
                name: "month",
                reason: "a month from 1 to 12 is required".to_owned(),
            }
        })?;

        let month = raw.parse::<u8>().map_err(|_| Error::InvalidParameter {
            name: "month",
            reason: format!("\"{raw}\" is not a month, expected a number from 1 to 12"),
        })?;

        Self::new(month)
    }

    /// The month number, 1 through 12.
    pub fn number(self) -> u8 {
        self.0
    }
}

impl Display for SaleMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
