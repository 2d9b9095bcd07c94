pub mod types;
pub mod config;
pub mod naming;
pub mod traits;
pub mod fetcher;
pub mod resolver;
pub mod parser;
pub mod launcher;
pub mod presenter;
pub mod cleanup;
pub mod lookup;

pub use types::*;
pub use config::{Config, ConfigFile, ConfigOverrides, Endpoints};
pub use traits::{MediaLauncher, RemoteResponse, RemoteSource};
pub use fetcher::{FetchConfig, HttpSource, MockSource};
pub use resolver::Resolver;
pub use parser::parse_entries;
pub use launcher::CommandLauncher;
pub use presenter::{PresentOptions, PresentSummary, Presenter};
pub use cleanup::{ArtifactLedger, CleanupReport};
pub use lookup::{LookupSummary, WordLookup};
