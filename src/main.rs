use crate::config::Config;
use crate::db::{init_db, Database, SqliteStorage};
use crate::domain::{FilterOptions, FilterSelection, Property, PropertyPatch};
use crate::remote::{find_listing, load_listings, PropertySource, RemoteCatalog, Source, Sourced};
use crate::store::{ChangeOrigin, Durability, PropertyStore, Subscription};
use serde::Serialize;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod errors;
mod remote;
mod store;

#[cfg(test)]
mod tests;

/// Output of `report`: where the listings came from and what can be filtered
/// on, for both the hosted catalog and the local collection.
#[derive(Serialize)]
struct Report {
    catalog_source: Source,
    catalog_count: usize,
    catalog_filters: FilterOptions,
    local_count: usize,
    local_filters: FilterOptions,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1️⃣ Configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // 2️⃣ Local storage medium
    let db = Database::new(&config.db_path);
    if let Err(e) = init_db(&db) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let store = PropertyStore::new(SqliteStorage::new(db), config.storage_key.clone());
    let changes: Subscription = store.subscribe(|properties, origin| match origin {
        ChangeOrigin::Local => {
            tracing::info!(count = properties.len(), "local properties changed");
        }
        ChangeOrigin::External => {
            tracing::info!(count = properties.len(), "local properties changed in another context");
        }
    });

    // 3️⃣ Hosted catalog, with provenance
    let catalog = config
        .remote
        .as_ref()
        .and_then(|remote| match RemoteCatalog::new(remote) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(error = %e, "remote catalog unavailable");
                None
            }
        });

    let source = catalog.as_ref().map(|c| c as &dyn PropertySource);
    store.poll_external_changes();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match run(&args, &store, source) {
        Ok(value) => value,
        Err(msg) => {
            tracing::error!("{msg}");
            eprintln!("usage: brokerage_listings [report | show <id> | filter <facet>=<value>... | upsert <json> [id] | delete <id> | reset]");
            std::process::exit(2);
        }
    };

    changes.unsubscribe();

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "could not render output");
            std::process::exit(1);
        }
    }
}

fn run(
    args: &[String],
    store: &PropertyStore<SqliteStorage>,
    source: Option<&dyn PropertySource>,
) -> Result<Value, String> {
    let command = args.first().map(String::as_str).unwrap_or("report");
    let rest = args.get(1..).unwrap_or_default();

    match (command, rest) {
        ("report", []) => {
            let listings = load_listings(source);
            if listings.is_fallback() {
                tracing::warn!(count = listings.data.len(), "report uses built-in listings");
            } else {
                tracing::info!(count = listings.data.len(), "listings loaded from remote catalog");
            }
            let local = store.load();

            to_json(&Report {
                catalog_source: listings.source,
                catalog_count: listings.data.len(),
                catalog_filters: FilterOptions::derive(&listings.data),
                local_count: local.len(),
                local_filters: FilterOptions::derive(&local),
            })
        }
        ("show", [id]) => to_json(&find_listing(source, id)),
        ("filter", pairs) => {
            let selection = parse_selection(pairs)?;
            let listings = load_listings(source);
            let matches: Vec<&Property> = selection.apply(&listings.data);
            to_json(&Sourced {
                source: listings.source,
                data: matches,
            })
        }
        ("upsert", [patch]) | ("upsert", [patch, _]) => {
            let patch: PropertyPatch =
                serde_json::from_str(patch).map_err(|e| format!("invalid property JSON: {e}"))?;
            let id = store.upsert(patch, rest.get(1).map(String::as_str));
            Ok(json!({ "id": id }))
        }
        ("delete", [id]) => Ok(json!({ "deleted": store.delete(id) })),
        ("reset", []) => {
            let durability = store.reset_to_defaults();
            Ok(json!({ "persisted": durability == Durability::Persisted }))
        }
        _ => Err(format!("unrecognized command: {}", args.join(" "))),
    }
}

/// `status=For Sale location=Baner, Pune` style pairs into a selection.
fn parse_selection(pairs: &[String]) -> Result<FilterSelection, String> {
    let mut selection = FilterSelection::default();
    for pair in pairs {
        let (facet, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected <facet>=<value>, got '{pair}'"))?;
        let slot = match facet.trim() {
            "status" => &mut selection.status,
            "location" => &mut selection.location,
            "bhk_type" => &mut selection.bhk_type,
            "property_type" => &mut selection.property_type,
            other => return Err(format!("unknown facet '{other}'")),
        };
        *slot = Some(value.to_string());
    }
    Ok(selection)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}
