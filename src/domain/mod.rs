//! Domain error and result types for SniffNMask.
//!
//! All fallible library operations return [`Result<T, SniffError>`]:
//!
//! ```rust
//! use sniffnmask::domain::{SniffError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = sniffnmask::config::load_config("sniffnmask.toml")?;
//!     println!("model = {}", config.llm.model);
//!     Ok(())
//! }
//! ```
//!
//! Detector backends report their own [`DetectorError`], which is carried
//! inside a failed detection rather than propagated.

pub mod errors;
pub mod result;

pub use errors::{DetectorError, SniffError};
pub use result::Result;
