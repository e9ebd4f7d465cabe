pub mod file;
pub mod template;

pub use template::MessageTemplate;
