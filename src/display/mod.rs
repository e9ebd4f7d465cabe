pub mod summary;

pub use summary::print_summary;
