use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Bundles the deck directory into `<deck_dir>.zip` next to it.
pub fn write_zip(deck_dir: &Path) -> Result<PathBuf> {
    // `.` and `..` have no final component until resolved.
    let deck_dir = deck_dir
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", deck_dir.display()))?;
    let root = deck_dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("deck")
        .to_string();
    let parent = deck_dir.parent().unwrap_or_else(|| Path::new("."));
    let zip_path = parent.join(format!("{}.zip", root));
    let tmp_path = parent.join(format!("{}.zip.tmp", root));

    let file = File::create(&tmp_path)
        .with_context(|| format!("failed to create {}", tmp_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let result = write_zip_entries(&mut zip, &deck_dir, &root);

    match result.and_then(|_| zip.finish().with_context(|| "failed to finalize zip")) {
        Ok(_) => {
            fs::rename(&tmp_path, &zip_path)
                .with_context(|| format!("failed to move zip to {}", zip_path.display()))?;
            Ok(zip_path)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

fn write_zip_entries(zip: &mut ZipWriter<File>, dir: &Path, prefix: &str) -> Result<()> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(
            zip::DateTime::from_date_and_time(1980, 1, 1, 0, 0, 0)
                .map_err(|e| anyhow::anyhow!("invalid zip timestamp: {e}"))?,
        );

    zip.add_directory(format!("{}/", prefix), options)
        .with_context(|| "failed to add directory entry to zip")?;

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    // Stable archive order regardless of directory iteration order.
    entries.sort();

    for path in entries {
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let zip_path = format!("{}/{}", prefix, name);
        if path.is_dir() {
            write_zip_entries(zip, &path, &zip_path)?;
        } else {
            add_file(zip, &path, &zip_path, options)
                .with_context(|| format!("failed to add {} to zip", name))?;
        }
    }
    Ok(())
}

fn add_file(
    zip: &mut ZipWriter<File>,
    src_path: &Path,
    zip_path: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    let mut file =
        File::open(src_path).with_context(|| format!("failed to open {}", src_path.display()))?;
    zip.start_file(zip_path, options)?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        zip.write_all(&buf[..n])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundles_nested_deck_files() {
        let dir = tempfile::tempdir().unwrap();
        let deck = dir.path().join("deck");
        fs::create_dir_all(deck.join("figures")).unwrap();
        fs::write(deck.join("index.html"), "<html></html>").unwrap();
        fs::write(deck.join("figures").join("scene1.svg"), "<svg/>").unwrap();

        let zip_path = write_zip(&deck).unwrap();
        assert_eq!(zip_path, dir.path().canonicalize().unwrap().join("deck.zip"));
        assert!(!dir.path().join("deck.zip.tmp").exists());

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["deck/", "deck/figures/", "deck/figures/scene1.svg", "deck/index.html"]
        );
    }

    #[test]
    fn dotted_paths_are_named_after_the_resolved_dir() {
        let dir = tempfile::tempdir().unwrap();
        let deck = dir.path().join("deck");
        fs::create_dir_all(deck.join("figures")).unwrap();
        fs::write(deck.join("index.html"), "<html></html>").unwrap();

        let zip_path = write_zip(&deck.join("figures").join("..")).unwrap();
        assert_eq!(zip_path.file_name().unwrap(), "deck.zip");
        assert!(dir.path().join("deck.zip").is_file());
    }
}
