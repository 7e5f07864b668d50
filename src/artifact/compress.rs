// ABOUTME: Tar and gzip packing of a source directory.
// ABOUTME: Runs on a blocking thread; entries are rooted at "." like `tar -C dir -c .`.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;
use tracing::debug;

/// Pack `src` into `<uuid>.tar.gz` inside `dest_dir`, returning the archive path.
pub async fn compress_directory(src: &Path, dest_dir: &Path) -> std::io::Result<PathBuf> {
    let src = src.to_owned();
    let archive = dest_dir.join(format!("{}.tar.gz", uuid::Uuid::new_v4()));
    let target = archive.clone();

    spawn_blocking(move || compress_directory_sync(&src, &target)).await??;

    Ok(archive)
}

fn compress_directory_sync(src: &Path, archive: &Path) -> std::io::Result<()> {
    debug!(source = %src.display(), archive = %archive.display(), "compressing source directory");

    let file = File::create(archive)?;
    let encoder = GzEncoder::new(file, Compression::default());

    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);
    builder.append_dir_all(".", src)?;

    let encoder = builder.into_inner()?;
    let file = encoder.finish()?;
    let size = file.metadata()?.len();

    debug!(compressed_size = size, "compressed source directory");
    Ok(())
}
