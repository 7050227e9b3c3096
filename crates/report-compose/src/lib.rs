pub mod canvas;
pub mod collab;
pub mod compose;
pub mod constants;
pub mod layout;
pub mod markup;
mod options;
pub mod paginate;
mod spec;
mod types;

pub use compose::{
    Collaborators, PageSequence, build_document, company_map, compose_report, export_map,
    generate_report, total_steps,
};
pub use options::*;
pub use paginate::{Chunk, PaginationBudget, paginate, paginate_with};
pub use spec::*;
pub use types::*;
