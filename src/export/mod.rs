//! # Skyline Export Normalizer
//!
//! Reads the `;`-separated, `,`-decimal transition report exported by Skyline and
//! turns every row into a typed [`SkylineRecord`].
//!
//! Normalization rules:
//!
//! 1. Rows without a `File Name` are dropped.
//! 2. Absent values in the five [`ZERO_FILLED`](crate::columns::ZERO_FILLED)
//!    columns become `0.0`; an absent value in any other column is fatal.
//! 3. `Swab` and `Fragment Ion Type` are mapped to integer codes through fixed
//!    [`CategoryMap`]s. Unknown labels are fatal.
//! 4. `Fragment Ion` yields a fragment number, `Area Normalized` is parsed from a
//!    percentage string, and the retention time deviation is derived.

mod error;
mod mapping;
mod parse;
mod reader;
mod record;


pub use error::ExportError;
pub use mapping::{fragment_number, CategoryMap, ION_TYPES, SWAB_TYPES};
pub use parse::{is_absent, parse_decimal, parse_integer, parse_percentage};
pub use reader::{NormalizeStats, SkylineExport, EXPORT_DELIMITER};
pub use record::{retention_time_deviation, SkylineRecord};
