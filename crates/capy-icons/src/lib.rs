//! capy-icons: Tray icon resolution for CapyShell.
//!
//! Turns whatever a tray item calls its icon (theme name, path, URI, or the
//! `name?path=<dir>` encoding) into something the UI can load, falling back
//! through a prioritized list so a tray slot is never left empty.
//!
//! - `normalize` - canonical identifier forms
//! - `fallbacks` - substitute tables keyed by icon name and app id
//! - `resolver` - candidate ordering and the two-pass lookup
//! - `single` - one-name lookup with blocklist
//! - `oracle` - the theme lookup capability and its process-wide default

pub mod assets;
pub mod candidates;
pub mod config;
pub mod error;
pub mod fallbacks;
pub mod normalize;
pub mod oracle;
pub mod resolver;
pub mod single;
pub mod types;

pub use assets::{BuiltinAssets, builtin_assets};
pub use candidates::build_candidates;
pub use config::TrayIconConfig;
pub use error::IconError;
pub use fallbacks::{FallbackTable, compute_fallbacks};
pub use normalize::{is_direct_resource, normalize};
pub use oracle::{
    IconOracle, SharedOracle, clear_default_oracle, default_oracle, set_default_oracle,
};
pub use resolver::{
    TrayIconResolver, resolve_candidate_icon, resolve_icon, resolve_icon_default,
};
pub use single::{Blocklist, resolve_single_icon, resolve_single_icon_default};
pub use types::{Candidate, CandidateOrigin, ResolutionOptions, ResolutionResult};
