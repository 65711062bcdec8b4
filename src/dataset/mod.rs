mod load;
mod model;
mod parse;

pub use load::load_dataset;
pub use model::{BubbleRecord, Dataset, DatasetError};
