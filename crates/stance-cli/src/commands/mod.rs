//! CLI command implementations

pub mod clips;
pub mod export;
pub mod pose;
pub mod simulate;
pub mod validate;

use anyhow::{Context, Result};
use clap::Args;
use stance_animation::{load_catalog_from_file, AnimationCatalog, Archetype};
use std::path::Path;
use std::sync::Arc;

/// Where a command takes its clip table from.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogSource {
    /// Built-in archetype (knight or robot); defaults to knight
    #[arg(long, conflicts_with = "catalog")]
    pub archetype: Option<String>,

    /// Path to a catalog file (.anim.toml)
    #[arg(long)]
    pub catalog: Option<String>,
}

impl CatalogSource {
    pub fn load(&self) -> Result<Arc<AnimationCatalog>> {
        if let Some(path) = &self.catalog {
            let catalog = load_catalog_from_file(Path::new(path))
                .with_context(|| format!("Failed to load catalog {}", path))?;
            return Ok(Arc::new(catalog));
        }

        let archetype: Archetype = self.archetype.as_deref().unwrap_or("knight").parse()?;
        Ok(archetype.shared_catalog()?)
    }
}
