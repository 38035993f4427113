pub mod dashboard;
pub mod entity;
pub mod envelope;
pub mod market;
pub mod page;
pub mod record;
pub mod risk;

pub use dashboard::*;
pub use entity::*;
pub use envelope::*;
pub use market::*;
pub use page::*;
pub use record::*;
pub use risk::*;
