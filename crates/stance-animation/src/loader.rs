//! TOML-based catalog loading

use crate::catalog::AnimationCatalog;
use crate::clip::AnimationClip;
use serde::{Deserialize, Serialize};
use stance_core::{Result, StanceError};
use std::path::Path;

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub archetype: String,
    #[serde(default)]
    pub clips: Vec<AnimationClip>,
}

/// Load a catalog from a `.anim.toml` file.
///
/// The file format mirrors `CatalogFile`:
/// ```toml
/// archetype = "knight"
///
/// [[clips]]
/// name = "idle"
/// duration = 60.0
/// loop = true
/// priority = 0
///
/// [[clips.keyframes]]
/// time = 0.0
/// body = { y = 0.0, scale_y = 1.0 }
///
/// [[clips.keyframes]]
/// time = 0.5
/// easing = "easeInOut"
/// body = { y = -2.0, scale_y = 1.02 }
/// # ...more keyframes
/// ```
pub fn load_catalog_from_file(path: &Path) -> Result<AnimationCatalog> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        StanceError::CatalogError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    load_catalog_from_str(&content, &path.display().to_string())
}

/// Parse and validate a catalog from a TOML string. `origin` names the source in errors.
pub fn load_catalog_from_str(content: &str, origin: &str) -> Result<AnimationCatalog> {
    let file: CatalogFile = toml::from_str(content)
        .map_err(|e| StanceError::TomlParseError(format!("{}: {}", origin, e)))?;

    AnimationCatalog::new(file.archetype, file.clips).map_err(|e| match e {
        StanceError::InvalidClip { clip, reason } => StanceError::InvalidClip {
            clip,
            reason: format!("{} (in {})", reason, origin),
        },
        other => other,
    })
}

/// Serialize a catalog back to its TOML document form.
pub fn catalog_to_toml(catalog: &AnimationCatalog) -> Result<String> {
    let file = CatalogFile {
        archetype: catalog.archetype().to_string(),
        clips: catalog.clips().to_vec(),
    };
    Ok(toml::to_string(&file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    const MINIMAL: &str = r#"
archetype = "test"

[[clips]]
name = "idle"
duration = 60.0
loop = true

[[clips.keyframes]]
time = 0.0

[[clips.keyframes]]
time = 1.0

[[clips]]
name = "attack"
duration = 25
loop = false
priority = 4

[[clips.keyframes]]
time = 0.0

[[clips.keyframes]]
time = 1.0
easing = "linear"
weapon = { rotation = 2.0 }
"#;

    #[test]
    fn parse_minimal_catalog() {
        let catalog = load_catalog_from_str(MINIMAL, "minimal.anim.toml").unwrap();
        assert_eq!(catalog.archetype(), "test");
        assert_eq!(catalog.len(), 2);

        let idle = catalog.get("idle").unwrap();
        assert!(idle.looping);
        assert_eq!(idle.priority, 0);

        let attack = catalog.get("attack").unwrap();
        assert_eq!(attack.duration, 25.0);
        assert_eq!(attack.priority, 4);
        assert_eq!(attack.keyframes[1].easing, Some(Easing::Linear));
        assert_eq!(attack.keyframes[1].weapon.unwrap().rotation, Some(2.0));
    }

    #[test]
    fn unknown_easing_loads_as_linear() {
        let toml_str = r#"
archetype = "test"

[[clips]]
name = "idle"
duration = 10.0
loop = true

[[clips.keyframes]]
time = 0.0

[[clips.keyframes]]
time = 1.0
easing = "wobble"
"#;
        let catalog = load_catalog_from_str(toml_str, "wobble.anim.toml").unwrap();
        assert_eq!(
            catalog.get("idle").unwrap().keyframes[1].easing,
            Some(Easing::Linear)
        );
    }

    #[test]
    fn reject_zero_duration() {
        let toml_str = r#"
archetype = "bad"

[[clips]]
name = "idle"
duration = 0.0
loop = true

[[clips.keyframes]]
time = 0.0
"#;
        let err = load_catalog_from_str(toml_str, "bad.anim.toml").unwrap_err();
        assert!(err.to_string().contains("bad.anim.toml"));
    }

    #[test]
    fn reject_malformed_toml() {
        let result = load_catalog_from_str("archetype = ", "broken.anim.toml");
        assert!(matches!(result, Err(StanceError::TomlParseError(_))));
    }

    #[test]
    fn missing_file_is_catalog_error() {
        let result = load_catalog_from_file(Path::new("does/not/exist.anim.toml"));
        assert!(matches!(
            result,
            Err(StanceError::CatalogError(ref msg)) if msg.contains("does/not/exist.anim.toml")
        ));
    }

    #[test]
    fn export_reloads_identically() {
        let catalog = load_catalog_from_str(MINIMAL, "minimal.anim.toml").unwrap();
        let text = catalog_to_toml(&catalog).unwrap();
        let reloaded = load_catalog_from_str(&text, "export").unwrap();
        assert_eq!(reloaded.len(), catalog.len());
        assert_eq!(
            reloaded.get("attack").unwrap().keyframes,
            catalog.get("attack").unwrap().keyframes
        );
    }
}
