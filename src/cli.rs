//! Command line arguments.

use capy_icons::ResolutionOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "capy-tray")]
#[command(about = "Resolve a tray icon name to a loadable icon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Icon name, absolute path, URI, or `name?path=<dir>` value
    pub icon: Option<String>,

    /// Application id of the tray item (selects app fallbacks, and supplies
    /// the icon from its desktop entry when ICON is missing)
    #[arg(long)]
    pub app_id: Option<String>,

    /// Identifier tried before ICON
    #[arg(long = "override", value_name = "IDENT")]
    pub override_icon: Option<String>,

    /// Fallback identifier; repeat to build the sequence (replaces the built-in tables)
    #[arg(long = "fallback", value_name = "IDENT")]
    pub fallbacks: Vec<String>,

    /// Prefer symbolic icon variants
    #[arg(long, conflicts_with = "no_symbolic")]
    pub symbolic: bool,

    /// Do not prefer symbolic icon variants
    #[arg(long)]
    pub no_symbolic: bool,

    /// Resolve ICON with a single fallback name instead of the full candidate list
    #[arg(long, value_name = "FALLBACK_NAME")]
    pub single: Option<String>,

    /// Print the candidate list instead of resolving
    #[arg(long)]
    pub candidates: bool,

    /// Path to config file (default: ~/.config/CapyShell/tray-icons.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Flags win over the configured default.
    pub fn prefer_symbolic(&self, configured: bool) -> bool {
        if self.symbolic {
            true
        } else if self.no_symbolic {
            false
        } else {
            configured
        }
    }

    pub fn resolution_options(&self, configured_symbolic: bool) -> ResolutionOptions {
        ResolutionOptions {
            prefer_symbolic: self.prefer_symbolic(configured_symbolic),
            override_icon: self.override_icon.clone(),
            fallbacks: (!self.fallbacks.is_empty()).then(|| self.fallbacks.clone()),
        }
    }
}
