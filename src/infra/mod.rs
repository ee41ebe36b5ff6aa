pub mod csv_table;
pub mod file_output_adapter;

pub use csv_table::CsvTableSource;
pub use file_output_adapter::FileOutputAdapter;
