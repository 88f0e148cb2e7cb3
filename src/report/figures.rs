use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};

/// A rendered chart, kept for export alongside the deck.
pub struct Figure {
    pub name: String,
    pub caption: String,
    pub svg: String,
}

/// Writes `<name>.svg` and `<name>.pdf` for every figure, plus an index listing captions.
pub fn write(dir: &Path, figures: &[Figure]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mut index = String::new();
    for f in figures {
        let svg_path = dir.join(format!("{}.svg", f.name));
        fs::write(&svg_path, &f.svg)
            .with_context(|| format!("failed to write {}", svg_path.display()))?;
        let pdf =
            svg_to_pdf(&f.svg).with_context(|| format!("failed to convert {} to PDF", f.name))?;
        let pdf_path = dir.join(format!("{}.pdf", f.name));
        fs::write(&pdf_path, pdf)
            .with_context(|| format!("failed to write {}", pdf_path.display()))?;
        index.push_str(&format!("{}\t{}\n", f.name, f.caption));
    }
    let index_path = dir.join("figures.txt");
    fs::write(&index_path, index)
        .with_context(|| format!("failed to write {}", index_path.display()))?;
    Ok(())
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree =
        usvg::Tree::from_str(svg, &opt).map_err(|e| anyhow::anyhow!("usvg parse failed: {e}"))?;
    let pdf = svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| anyhow::anyhow!("svg2pdf conversion failed: {e}"))?;
    Ok(pdf)
}
