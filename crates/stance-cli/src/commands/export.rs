//! Built-in catalog export command

use anyhow::{Context, Result};
use stance_animation::{catalog_to_toml, Archetype};

pub fn run(archetype: &str) -> Result<()> {
    let archetype: Archetype = archetype.parse()?;
    let catalog = archetype
        .catalog()
        .with_context(|| format!("Built-in catalog '{}' failed to load", archetype))?;
    print!("{}", catalog_to_toml(&catalog)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_archetype_is_an_error() {
        assert!(run("wizard").is_err());
    }
}
