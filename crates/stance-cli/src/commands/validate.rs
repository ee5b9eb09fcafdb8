//! Catalog validation command

use anyhow::Result;
use serde::Serialize;
use stance_animation::load_catalog_from_file;
use std::path::Path;

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    archetype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clips: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn check(file: &str) -> FileReport {
    match load_catalog_from_file(Path::new(file)) {
        Ok(catalog) => FileReport {
            file: file.to_string(),
            valid: true,
            archetype: Some(catalog.archetype().to_string()),
            clips: Some(catalog.len()),
            error: None,
        },
        Err(e) => FileReport {
            file: file.to_string(),
            valid: false,
            archetype: None,
            clips: None,
            error: Some(e.to_string()),
        },
    }
}

pub fn run(files: &[String], format: &str) -> Result<()> {
    let reports: Vec<FileReport> = files.iter().map(|f| check(f)).collect();
    let failures = reports.iter().filter(|r| !r.valid).count();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            match &report.error {
                None => println!(
                    "  ok    {} ({}, {} clip(s))",
                    report.file,
                    report.archetype.as_deref().unwrap_or("?"),
                    report.clips.unwrap_or(0)
                ),
                Some(error) => println!("  FAIL  {}: {}", report.file, error),
            }
        }
        println!();
        println!("{} file(s), {} failed", reports.len(), failures);
    }

    if failures > 0 {
        anyhow::bail!("{} catalog(s) failed validation", failures);
    }
    Ok(())
}
