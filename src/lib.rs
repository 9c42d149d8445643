pub mod config;
pub mod excerpt;
pub mod highlight;
pub mod registry;
pub mod resolver;
pub mod store;

pub use config::{HighlightConfig, HighlightTag, StoredSettings};
pub use excerpt::{ExcerptMode, ExcerptRewriter};
pub use registry::Registry;
pub use resolver::{HighlightFieldResolver, HighlightSpec, MatchClause, QueryContext};
pub use store::{load_config, FileStore, MemoryStore, SettingsStore};
