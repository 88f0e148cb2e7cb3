use crate::core::aggregate::aggregate;
use crate::core::dataset::Dataset;
use crate::core::model::{AggregateRow, BoroughFilter, GroupKey};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Tab-separated aggregate tables, one section per grouping.
pub fn write(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut w = BufWriter::new(File::create(path).with_context(|| "create summary.txt failed")?);
    write_to(&mut w, dataset)?;
    w.flush()?;
    Ok(())
}

pub fn write_to<W: Write>(w: &mut W, dataset: &Dataset) -> Result<()> {
    let all = dataset.filtered(&BoroughFilter::All);
    writeln!(w, "##Listings\t{}", dataset.len())?;
    for key in [GroupKey::Borough, GroupKey::PropertyType] {
        let rows = aggregate(&all, key)?;
        writeln!(w, ">>{}", key.label())?;
        writeln!(
            w,
            "#{}\tCount\tAvg Price\tAvg Sqft\tAvg Price/Sqft\tAvg Beds\tAvg Baths",
            key.label()
        )?;
        for r in &rows {
            row(w, r)?;
        }
        writeln!(w, ">>END_MODULE")?;
    }
    Ok(())
}

fn row<W: Write>(w: &mut W, r: &AggregateRow) -> Result<()> {
    let ppsf = r
        .mean_price_per_sqft
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "NA".to_string());
    writeln!(
        w,
        "{}\t{}\t{:.2}\t{:.2}\t{}\t{}\t{}",
        r.key, r.count, r.mean_price, r.mean_sqft, ppsf, r.mean_beds, r.mean_baths
    )?;
    Ok(())
}
