use crate::domain::{default_properties, Property};
use crate::remote::PropertySource;
use serde::Serialize;

/// Where a piece of listing data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Fallback,
}

/// Data tagged with its provenance, so callers never have to guess by
/// comparing against the built-in set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub source: Source,
    pub data: T,
}

impl<T> Sourced<T> {
    pub fn remote(data: T) -> Self {
        Self {
            source: Source::Remote,
            data,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            source: Source::Fallback,
            data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }
}

/// All listings from `source`, or the built-in set when the source is absent,
/// fails, or returns nothing.
pub fn load_listings(source: Option<&dyn PropertySource>) -> Sourced<Vec<Property>> {
    let Some(source) = source else {
        tracing::info!("remote catalog not configured; serving built-in listings");
        return Sourced::fallback(default_properties());
    };

    match source.fetch_all() {
        Ok(rows) if !rows.is_empty() => Sourced::remote(rows),
        Ok(_) => {
            tracing::warn!("remote catalog returned no listings; serving built-in listings");
            Sourced::fallback(default_properties())
        }
        Err(e) => {
            tracing::warn!(error = %e, "remote catalog fetch failed; serving built-in listings");
            Sourced::fallback(default_properties())
        }
    }
}

/// One listing by id. A failed or unconfigured remote lookup falls back to the
/// built-in set; a remote "not found" is trusted as is.
pub fn find_listing(source: Option<&dyn PropertySource>, id: &str) -> Sourced<Option<Property>> {
    let from_defaults = || {
        Sourced::fallback(default_properties().into_iter().find(|p| p.id == id))
    };

    let Some(source) = source else {
        return from_defaults();
    };

    match source.fetch_by_id(id) {
        Ok(found) => Sourced::remote(found),
        Err(e) => {
            tracing::warn!(id, error = %e, "remote listing lookup failed; checking built-in listings");
            from_defaults()
        }
    }
}
