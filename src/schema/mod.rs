mod table;
pub mod tables;

pub use table::{Column, Dialect, DistStyle, SqlType, Table};
pub use tables::ALL_TABLES;
