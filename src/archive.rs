use crate::error::Result;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

/// Unpack `archive` into `destination`, then delete the archive.
///
/// The archive is left in place if it cannot be read.
pub fn extract_archive(archive: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file)?;
    tracing::debug!(
        archive = %archive.display(),
        entries = zip.len(),
        "extracting archive"
    );
    zip.extract(destination)?;
    std::fs::remove_file(archive)?;
    Ok(())
}
