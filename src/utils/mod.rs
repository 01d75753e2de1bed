pub mod csv_handler;
pub mod date_parser;

pub use date_parser::parse_date;
