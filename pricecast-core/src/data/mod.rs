//! Price series ingestion: providers, CSV import, cadence control and the
//! synthetic fallback.

pub mod csv_source;
pub mod provider;
pub mod resample;
pub mod synthetic;

pub use csv_source::{read_prices, write_prices, CsvPriceProvider};
pub use provider::{trailing_window, DataError, DataSource, FetchResult, PriceProvider};
pub use resample::{append_resampled, minimum_interval, resample, should_append, Candle};
pub use synthetic::{synthetic_history, DEFAULT_START_PRICE};
