pub mod events;
pub mod rows;
pub mod stations;

pub use events::{list_catalog_files, load_catalog, read_catalog_file};
pub use rows::{read_indexed_rows, read_rows, write_indexed_rows, write_rows, CsvRowSink};
pub use stations::{load_station_table, read_station_file};
