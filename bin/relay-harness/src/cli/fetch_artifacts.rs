use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
pub struct FetchArtifactsConfig {
    /// Directory the extracted binaries are written to
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,
}
