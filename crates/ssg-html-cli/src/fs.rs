use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Write `contents` to `path` through a temporary sibling file and a rename,
/// so a reader never sees a half-written page.
///
/// Concurrent writers to the same `path` each reserve their own temporary
/// file; the last rename wins.
pub async fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let (tmp_path, mut file) = create_tmp_file(path).await?;
    let written = async {
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await
    }
    .await;
    drop(file);

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(err);
    }

    if let Err(err) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(err);
    }

    Ok(())
}

async fn create_tmp_file(path: &Path) -> io::Result<(PathBuf, File)> {
    let mut counter = 0u32;
    loop {
        let candidate = if counter == 0 {
            path.with_extension("html.tmp")
        } else {
            path.with_extension(format!("html.tmp{counter}"))
        };

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(file) => return Ok((candidate, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => counter += 1,
            Err(err) => return Err(err),
        }
    }
}
