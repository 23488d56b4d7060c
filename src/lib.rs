//! Country lookup over the REST Countries API.
//!
//! [`api::Client`] runs name and region queries, [`presenter::present`] turns a
//! record into display text plus a flag image, and [`session::Session`] holds
//! the state of one explorer window. The eframe shell in `main.rs` only wires
//! widgets to the session.

pub mod api;
pub mod country;
pub mod error;
pub mod flag;
pub mod presenter;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::{ApiConfig, Client, HttpGet, SearchKind};
pub use country::CountryRecord;
pub use error::{FetchError, FlagError, QueryError, TransportError};
pub use flag::{FlagImage, FlagRef};
pub use presenter::{present, DisplayBundle};
pub use session::Session;
