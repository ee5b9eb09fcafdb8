//! Clip listing command

use super::CatalogSource;
use anyhow::Result;

pub fn run(source: &CatalogSource) -> Result<()> {
    let catalog = source.load()?;

    println!("Catalog: {} ({} clips)", catalog.archetype(), catalog.len());
    println!();
    println!(
        "  {:<12} {:>8} {:>6} {:>8} {:>9}",
        "name", "frames", "loop", "priority", "keyframes"
    );
    for clip in catalog.clips() {
        println!(
            "  {:<12} {:>8} {:>6} {:>8} {:>9}",
            clip.name,
            clip.duration,
            if clip.looping { "yes" } else { "no" },
            clip.priority,
            clip.keyframes.len()
        );
    }

    Ok(())
}
