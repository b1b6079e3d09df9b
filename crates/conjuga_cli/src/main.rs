//! Catalog lint tool.
//!
//! # Responsibility
//! - Load catalog files (primary first, then supplementary) the same way
//!   the app does and print what was kept, dropped and rejected.
//! - Exit non-zero when any record fails decoding or integrity checks.

use clap::Parser;
use conjuga_core::{
    core_version, parse_catalog, ConjugationService, EngineConfig, ParsedCatalog, ValidationPolicy,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "conjuga")]
#[command(about = "Lint verb catalogs: primary first, then supplementary in precedence order")]
#[command(version)]
struct Args {
    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level used when --log-dir is set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Catalog JSON files
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            log_level: Some(self.log_level.clone()),
            log_dir: self.log_dir.clone(),
            validation: ValidationPolicy::strict(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = args.engine_config().init_logging() {
        eprintln!("logging disabled: {err}");
    }

    println!("conjuga_core version={}", core_version());
    match lint(&args.paths) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` when any record failed decoding or integrity checks.
fn lint(paths: &[PathBuf]) -> Result<bool, String> {
    let mut sources = Vec::with_capacity(paths.len());
    let mut clean = true;
    for path in paths {
        let parsed = read_catalog(path)?;
        for issue in &parsed.issues {
            println!("decode {} {issue}", path.display());
            clean = false;
        }
        sources.push(parsed.records);
    }

    let (primary, supplementary) = sources.split_first().ok_or("no catalog given")?;
    let build = ConjugationService::from_catalogs(primary, supplementary, ValidationPolicy::strict());
    for dropped in &build.dropped {
        println!(
            "shadowed lemma={} id={} source={} kept_from={}",
            dropped.lemma, dropped.id, dropped.source, dropped.kept_from
        );
    }
    for issue in &build.issues {
        println!("integrity {issue}");
    }

    let index = build.service.index();
    for lemma in index.rejected_lemmas() {
        println!("rejected lemma={lemma}");
    }
    let stats = index.stats();
    println!(
        "verbs={} stubs={} forms={} rejected={} shadowed={}",
        stats.verbs,
        stats.stubs,
        stats.forms,
        stats.rejected,
        build.dropped.len()
    );
    Ok(clean && build.issues.is_empty())
}

fn read_catalog(path: &Path) -> Result<ParsedCatalog, String> {
    let json = std::fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    parse_catalog(&json).map_err(|err| format!("{}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{lint, Args};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    const SACAR: &str = r#"[{"id": "es-sacar", "lemma": "sacar", "paradigms": [{
        "regionTags": ["la_general"],
        "forms": [{"mood": "indicative", "tense": "pretIndef", "person": "1s", "value": "saqué"}]
    }]}]"#;

    fn write(dir: &tempfile::TempDir, name: &str, json: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, json).expect("write catalog");
        path
    }

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_log_flags_and_ordered_paths() {
        let args = Args::try_parse_from(["conjuga", "--log-dir", "/tmp/logs", "a.json", "b.json"])
            .expect("args parse");
        assert_eq!(args.log_dir.as_deref(), Some("/tmp/logs"));
        assert_eq!(args.paths, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(args.engine_config().log_level.as_deref(), Some("info"));
    }

    #[test]
    fn requires_a_catalog_and_a_log_dir_value() {
        assert!(Args::try_parse_from(["conjuga"]).is_err());
        assert!(Args::try_parse_from(["conjuga", "a.json", "--log-dir"]).is_err());
    }

    #[test]
    fn whitespace_variant_lemma_is_shadowed_not_flagged() {
        let dir = tempfile::tempdir().expect("temp dir");
        let primary = write(&dir, "primary.json", SACAR);
        let supplementary = write(
            &dir,
            "auto.json",
            r#"[{"id": "auto-sacar", "lemma": "sacar ", "irregularityMatrix": {"pretIndef": true}}]"#,
        );

        assert_eq!(lint(&[primary, supplementary]), Ok(true));
    }

    #[test]
    fn integrity_issues_fail_the_lint() {
        let dir = tempfile::tempdir().expect("temp dir");
        let primary = write(&dir, "primary.json", SACAR);
        let broken = write(
            &dir,
            "broken.json",
            r#"[{"id": "es-oir", "lemma": "oír", "paradigms": []}]"#,
        );

        assert_eq!(lint(&[primary.clone()]), Ok(true));
        assert_eq!(lint(&[primary, broken]), Ok(false));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.json");
        assert!(lint(&[missing]).is_err());
    }
}
