pub mod filter;
pub mod loader;
pub mod normalize;
pub mod record;
pub mod schema;
pub mod store;

pub use loader::{clean, DataStore};
pub use record::{category_index, FeeRecord, LoadedDataset, RawTable};
pub use schema::DatasetKind;
