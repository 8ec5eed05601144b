//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! run catalog statements on a borrowed connection. Callers own the
//! transaction; repositories never begin, commit or roll back.

pub mod category_repo;
pub mod quote_repo;

pub use category_repo::CategoryRepo;
pub use quote_repo::QuoteRepo;
