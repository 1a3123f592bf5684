pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod freshness;
pub mod reader;
pub mod sample;
pub mod select;
pub mod storage;
pub mod synthesize;
pub mod types;

pub use config::DashboardConfig;
pub use dashboard::DashboardView;
pub use error::Error;
pub use freshness::{Freshness, StatusReport};
pub use reader::{DataStoreReader, Loaded, Origin};
pub use storage::{DocumentSource, JsonDirectory};
pub use synthesize::ArticleParams;
pub use types::{Article, ArticleCollection, Comments, SimilarArticle, UpdateStatus};

pub type Result<T> = std::result::Result<T, Error>;
