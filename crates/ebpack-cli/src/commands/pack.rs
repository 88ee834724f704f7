//! Default command: package the source directory.

use crate::cli::PackArgs;
use crate::error::add_pack_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use ebpack_core::PackConfig;
use ebpack_core::Packager;
use tracing::info;

/// Builds the core configuration from CLI arguments.
fn build_config(args: &PackArgs) -> PackConfig {
    let config = PackConfig::default()
        .with_source_root(&args.source)
        .with_output_path(&args.output)
        .with_preserve_permissions(!args.no_permissions);

    match args.compression_level {
        Some(level) => config.with_compression_level(level),
        None => config,
    }
}

pub fn execute(args: &PackArgs, formatter: &dyn OutputFormatter, interactive: bool) -> Result<()> {
    let config = build_config(args);
    info!(
        source = %args.source.display(),
        output = %args.output.display(),
        "packaging"
    );

    let packager = Packager::new().config(config);
    let result = if interactive && CliProgress::should_show() {
        let mut progress = CliProgress::new("Packing");
        packager.create_with_progress(&mut progress)
    } else {
        packager.create()
    };

    let report = add_pack_context(result, &args.output)?;
    formatter.format_pack_result(&args.output, &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(level: Option<u8>, no_permissions: bool) -> PackArgs {
        PackArgs {
            output: PathBuf::from("out.zip"),
            source: PathBuf::from("api"),
            compression_level: level,
            no_permissions,
        }
    }

    #[test]
    fn test_build_config_defaults_level() {
        let config = build_config(&args(None, false));
        assert_eq!(config.source_root, PathBuf::from("api"));
        assert_eq!(config.output_path, PathBuf::from("out.zip"));
        assert_eq!(config.compression_level, Some(6));
        assert!(config.preserve_permissions);
    }

    #[test]
    fn test_build_config_overrides() {
        let config = build_config(&args(Some(9), true));
        assert_eq!(config.compression_level, Some(9));
        assert!(!config.preserve_permissions);
    }
}
