use crate::core::error::{DeckError, Result};
use crate::core::model::{AggregateRow, GroupKey, Listing};
use std::collections::HashMap;

pub fn mean<I>(values: I, what: &'static str) -> Result<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        sum += v;
        n += 1;
    }
    if n == 0 {
        return Err(DeckError::EmptyGroup { what });
    }
    Ok(sum / n as f64)
}

/// Groups in order of first appearance, like the band domain they feed.
pub fn group_by<'a>(listings: &[&'a Listing], key: GroupKey) -> Vec<(String, Vec<&'a Listing>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a Listing>)> = Vec::new();
    for &l in listings {
        let k = key.of(l);
        match index.get(k) {
            Some(&i) => groups[i].1.push(l),
            None => {
                index.insert(k, groups.len());
                groups.push((k.to_string(), vec![l]));
            }
        }
    }
    groups
}

pub fn summarize(key: &str, rows: &[&Listing]) -> Result<AggregateRow> {
    let mean_price = mean(rows.iter().map(|l| l.price), "price")?;
    let mean_sqft = mean(rows.iter().map(|l| l.property_sqft), "square footage")?;
    // Rows with no defined price per sqft are left out rather than poisoning the mean.
    let mean_price_per_sqft =
        mean(rows.iter().filter_map(|l| l.price_per_sqft()), "price per sqft").ok();
    let mean_beds = mean(rows.iter().map(|l| l.beds), "beds")?;
    let mean_baths = mean(rows.iter().map(|l| l.baths), "baths")?;
    Ok(AggregateRow {
        key: key.to_string(),
        count: rows.len(),
        mean_price,
        mean_sqft,
        mean_price_per_sqft,
        mean_beds: round_count(mean_beds),
        mean_baths: round_count(mean_baths),
    })
}

pub fn aggregate(listings: &[&Listing], key: GroupKey) -> Result<Vec<AggregateRow>> {
    group_by(listings, key)
        .iter()
        .map(|(k, rows)| summarize(k, rows))
        .collect()
}

fn round_count(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round() as u32
    } else {
        0
    }
}

/// Most frequent positive square footage; ties go to the value seen first.
/// `None` for an empty selection.
pub fn most_common_sqft(listings: &[&Listing]) -> Option<(f64, usize)> {
    let mut counts: HashMap<u64, (usize, usize)> = HashMap::new();
    for (i, l) in listings.iter().enumerate() {
        let v = l.property_sqft;
        if !v.is_finite() || v <= 0.0 {
            continue;
        }
        counts.entry(v.to_bits()).or_insert((0, i)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then(b.1.1.cmp(&a.1.1)))
        .map(|(bits, (count, _))| (f64::from_bits(bits), count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(borough: &str, price: f64, sqft: f64) -> Listing {
        Listing {
            price,
            beds: 3.0,
            baths: 2.0,
            property_sqft: sqft,
            borough: borough.to_string(),
            street_name: String::new(),
            property_type: "House".to_string(),
        }
    }

    #[test]
    fn groups_and_averages_exactly() {
        let data = vec![
            listing("A", 100.0, 50.0),
            listing("A", 300.0, 50.0),
            listing("B", 200.0, 100.0),
        ];
        let refs: Vec<&Listing> = data.iter().collect();
        let rows = aggregate(&refs, GroupKey::Borough).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "A");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].mean_price, 200.0);
        assert_eq!(rows[0].mean_price_per_sqft, Some(4.0));
        assert_eq!(rows[1].key, "B");
        assert_eq!(rows[1].count, 1);
        assert_eq!(rows[1].mean_price, 200.0);
        assert_eq!(rows[1].mean_beds, 3);
        assert_eq!(rows[1].mean_baths, 2);
    }

    #[test]
    fn empty_mean_is_an_error() {
        let empty: Vec<f64> = Vec::new();
        assert!(matches!(
            mean(empty, "price"),
            Err(DeckError::EmptyGroup { what: "price" })
        ));
        assert!(summarize("nobody", &[]).is_err());
    }

    #[test]
    fn zero_footage_rows_are_left_out_of_price_per_sqft() {
        let data = vec![listing("A", 100.0, 0.0), listing("A", 300.0, 100.0)];
        let refs: Vec<&Listing> = data.iter().collect();
        let row = summarize("A", &refs).unwrap();
        assert_eq!(row.mean_price_per_sqft, Some(3.0));

        let only_zero = vec![listing("A", 100.0, 0.0)];
        let refs: Vec<&Listing> = only_zero.iter().collect();
        assert_eq!(summarize("A", &refs).unwrap().mean_price_per_sqft, None);
    }

    #[test]
    fn most_common_sqft_handles_empty_and_ties() {
        assert_eq!(most_common_sqft(&[]), None);
        let data = vec![
            listing("A", 1.0, 700.0),
            listing("A", 1.0, 900.0),
            listing("A", 1.0, 900.0),
            listing("A", 1.0, 700.0),
            listing("A", 1.0, 0.0),
        ];
        let refs: Vec<&Listing> = data.iter().collect();
        assert_eq!(most_common_sqft(&refs), Some((700.0, 2)));
        assert_eq!(most_common_sqft(&refs[1..3]), Some((900.0, 2)));
    }
}
