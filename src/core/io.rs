use crate::core::dataset::{Dataset, parse_listings};
use crate::core::error::{DeckError, Result};
use flate2::read::MultiGzDecoder;
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Plain,
    Gzip,
}

pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        if ext.eq_ignore_ascii_case("gz") {
            return Ok(InputKind::Gzip);
        }
    }
    let mut file = File::open(path).map_err(|e| DeckError::data_load(path, e))?;
    let mut magic = [0u8; 2];
    let n = file
        .read(&mut magic)
        .map_err(|e| DeckError::data_load(path, e))?;
    if n == 2 && magic == [0x1f, 0x8b] {
        Ok(InputKind::Gzip)
    } else {
        Ok(InputKind::Plain)
    }
}

pub fn open_reader(path: &Path) -> Result<Box<dyn Read>> {
    let kind = detect_input_kind(path)?;
    let file = File::open(path).map_err(|e| DeckError::data_load(path, e))?;
    let reader = BufReader::new(file);
    let reader: Box<dyn Read> = match kind {
        InputKind::Plain => Box::new(reader),
        InputKind::Gzip => Box::new(MultiGzDecoder::new(reader)),
    };
    Ok(reader)
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let t = Instant::now();
    let reader = open_reader(path)?;
    let dataset = parse_listings(reader, path)?;
    log::info!(
        "loaded {} listings from {} in {}ms",
        dataset.len(),
        path.display(),
        t.elapsed().as_millis()
    );
    Ok(dataset)
}

/// Parsed dataset, loaded on first use and kept for the rest of the process.
///
/// The source file is static, so the cache is never invalidated. A failed load
/// is not cached; the next caller retries.
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<Arc<Dataset>> {
        self.cell
            .get_or_try_init(|| load_dataset(&self.path).map(Arc::new))
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const CSV: &str = "price,beds,bath,propertysqft,sublocality,street_name,type\n\
                       100,1,1,50,A,First Ave,Condo for sale\n";

    #[test]
    fn loads_plain_and_gzip_input() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("listings.csv");
        std::fs::write(&plain, CSV).unwrap();
        assert_eq!(detect_input_kind(&plain).unwrap(), InputKind::Plain);
        assert_eq!(load_dataset(&plain).unwrap().len(), 1);

        let gz = dir.path().join("listings.dat");
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(CSV.as_bytes()).unwrap();
        std::fs::write(&gz, enc.finish().unwrap()).unwrap();
        assert_eq!(detect_input_kind(&gz).unwrap(), InputKind::Gzip);
        assert_eq!(load_dataset(&gz).unwrap().len(), 1);
    }

    #[test]
    fn cache_loads_once_and_shares() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        std::fs::write(&path, CSV).unwrap();
        let cache = DatasetCache::new(&path);
        assert!(!cache.is_loaded());
        let a = cache.get().unwrap();
        std::fs::remove_file(&path).unwrap();
        let b = cache.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let cache = DatasetCache::new("/definitely/not/here.csv");
        assert!(matches!(cache.get(), Err(DeckError::DataLoad { .. })));
        assert!(!cache.is_loaded());
    }
}
