pub mod cases;

pub use cases::{CaseCatalog, CaseQuery};
