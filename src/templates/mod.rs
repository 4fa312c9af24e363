// Page and fragment templates
pub mod data_table_template;
pub mod index_template;

pub use data_table_template::DataTableTemplate;
pub use index_template::{IndexTemplate, LogLine};
