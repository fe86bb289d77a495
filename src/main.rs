//! capy-tray - Tray icon resolver for CapyShell
//!
//! Resolves what a tray item calls its icon against the user's icon theme
//! and prints the result as JSON.

mod cli;

use capy_apps::AppCatalog;
use capy_icons::{IconOracle, TrayIconConfig, TrayIconResolver, set_default_oracle};
use clap::Parser;
use cli::Args;
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::sync::Arc;

/// Output of `--single`.
#[derive(Serialize)]
struct SingleResult<'a> {
    name: &'a str,
    fallback: &'a str,
    path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &args.config {
        Some(path) => TrayIconConfig::load(path)?,
        None => TrayIconConfig::discover()?,
    };
    let resolver = config.to_resolver();
    let options = args.resolution_options(config.prefer_symbolic);

    // Scanning themes is slow, only pay for it when a lookup will happen
    let needs_catalog = !args.candidates || (args.icon.is_none() && args.app_id.is_some());
    let catalog = needs_catalog.then(capy_apps::get_catalog);
    if let Some(catalog) = &catalog {
        register_catalog_oracle(catalog.clone());
    }

    let primary_icon = primary_icon(&args, catalog.as_deref());
    debug!("Primary icon: {primary_icon:?}");

    if args.candidates {
        let candidates =
            resolver.candidates(primary_icon.as_deref(), args.app_id.as_deref(), &options);
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if let Some(fallback) = &args.single {
        let name = primary_icon.as_deref().unwrap_or("");
        let path = resolve_single(&resolver, name, fallback, options.prefer_symbolic);
        let output = SingleResult {
            name,
            fallback,
            path: path.unwrap_or_default(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let result = resolver.resolve_with_default_oracle(
        primary_icon.as_deref(),
        args.app_id.as_deref(),
        &options,
    );
    info!("Resolved {:?} via {:?}", result.name, result.origin);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// ICON if given, else the `Icon=` of the app's desktop entry.
fn primary_icon(args: &Args, catalog: Option<&AppCatalog>) -> Option<String> {
    if let Some(icon) = args.icon.as_ref().filter(|i| !i.is_empty()) {
        return Some(icon.clone());
    }
    let app_id = args.app_id.as_deref()?;
    catalog?.app_icon_name(app_id)
}

fn register_catalog_oracle(catalog: Arc<AppCatalog>) {
    set_default_oracle(Arc::new(move |name: &str, prefer_symbolic: bool| {
        catalog
            .lookup_icon(name, prefer_symbolic)
            .map(|path| path.to_string_lossy().into_owned())
    }));
}

fn resolve_single(
    resolver: &TrayIconResolver,
    name: &str,
    fallback: &str,
    prefer_symbolic: bool,
) -> Option<String> {
    let oracle = capy_icons::default_oracle()?;
    let oracle: &dyn IconOracle = &*oracle;
    resolver
        .blocklist()
        .resolve_single(Some(oracle), Some(name), Some(fallback), prefer_symbolic)
}
