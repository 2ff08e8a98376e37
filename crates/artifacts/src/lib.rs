use std::{
    fs,
    io::{Cursor, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow, bail};
use flate2::read::GzDecoder;
use tar::{Archive, EntryType};
use tracing::info;

/// Release tarballs fetched by default during provisioning.
pub const DEFAULT_ARTIFACT_URLS: [&str; 2] = [
    "https://github.com/paradigmxyz/reth/releases/download/v1.0.0/reth-v1.0.0-x86_64-unknown-linux-gnu.tar.gz",
    "https://github.com/sigp/lighthouse/releases/download/v5.2.1/lighthouse-v5.2.1-x86_64-unknown-linux-gnu.tar.gz",
];

/// Fetch the default artifact set into `output_dir`, creating it first.
///
/// Stops at the first artifact that fails; partially written bytes of that
/// artifact are not rolled back.
pub async fn download_artifacts(output_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;

    for url in DEFAULT_ARTIFACT_URLS {
        info!("Downloading artifact from {url}");
        let binary_path = download_artifact(url, output_dir).await?;
        info!("Extracted {}", binary_path.display());
    }

    Ok(())
}

/// Fetch a gzipped tar archive from `url` and extract the first regular file
/// into `output_dir` under its original name, marked executable.
///
/// Archives carrying more than one payload file are not fully supported: only
/// the first regular file is extracted. Failure at any stage (network, gzip,
/// tar, filesystem) aborts this artifact with an error; there is no retry.
pub async fn download_artifact(url: &str, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to download {url}"))?
        .error_for_status()
        .with_context(|| format!("Server rejected download of {url}"))?;

    let archive_bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read archive body from {url}"))?;

    unpack_first_regular_file(Cursor::new(archive_bytes), output_dir)
}

/// Decompress a gzipped tar stream and write its first regular file to
/// `output_dir`, returning the written path.
pub fn unpack_first_regular_file(
    archive: impl Read,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let mut entries = Archive::new(GzDecoder::new(archive));

    for entry in entries.entries().context("Failed to read tar archive")? {
        let mut entry = entry.context("Failed to read tar entry")?;
        if entry.header().entry_type() != EntryType::Regular {
            continue;
        }

        let entry_path = entry.path().context("Tar entry has an invalid path")?;
        let file_name = entry_path
            .file_name()
            .map(ToOwned::to_owned)
            .ok_or_else(|| anyhow!("Tar entry has no file name"))?;
        let output_path = output_dir.join(file_name);

        let mut output_file = fs::File::create(&output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        std::io::copy(&mut entry, &mut output_file)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&output_path, fs::Permissions::from_mode(0o755))
                .with_context(|| format!("Failed to chmod {}", output_path.display()))?;
        }

        return Ok(output_path);
    }

    bail!("Archive contains no regular file")
}

#[cfg(test)]
mod tests {
    use flate2::{Compression, write::GzEncoder};
    use tar::{Builder, Header};

    use super::*;

    fn targz(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        for (name, contents) in entries {
            let mut header = Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, *contents).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn extracts_only_the_first_regular_file() {
        let archive = targz(&[("reth", b"#!binary-one"), ("extra", b"#!binary-two")]);
        let output_dir = tempfile::tempdir().unwrap();

        let path = unpack_first_regular_file(Cursor::new(archive), output_dir.path()).unwrap();

        assert_eq!(path, output_dir.path().join("reth"));
        assert_eq!(fs::read(&path).unwrap(), b"#!binary-one");
        assert!(!output_dir.path().join("extra").exists());
    }

    #[test]
    fn extracted_file_is_executable() {
        let archive = targz(&[("lighthouse", b"#!binary")]);
        let output_dir = tempfile::tempdir().unwrap();

        let path = unpack_first_regular_file(Cursor::new(archive), output_dir.path()).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o755, 0o755);
        }
        let _ = path;
    }

    #[test]
    fn nested_entry_lands_under_its_file_name() {
        let archive = targz(&[("reth-v1.0.0-x86_64/reth", b"#!binary")]);
        let output_dir = tempfile::tempdir().unwrap();

        let path = unpack_first_regular_file(Cursor::new(archive), output_dir.path()).unwrap();

        assert_eq!(path, output_dir.path().join("reth"));
    }

    #[test]
    fn empty_archive_is_an_error() {
        let archive = targz(&[]);
        let output_dir = tempfile::tempdir().unwrap();

        assert!(unpack_first_regular_file(Cursor::new(archive), output_dir.path()).is_err());
    }

    #[test]
    fn corrupt_stream_is_an_error() {
        let output_dir = tempfile::tempdir().unwrap();

        let result =
            unpack_first_regular_file(Cursor::new(b"not a gzip stream".to_vec()), output_dir.path());

        assert!(result.is_err());
    }
}
