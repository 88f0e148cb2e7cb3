//! Narrative facts derived from live data.
//!
//! An insight names the record it points at and carries the numbers its
//! narrative needs; charts place it and template the text. Nothing here is
//! tied to one known dataset, so filtered views never show stale claims.

use crate::core::aggregate::most_common_sqft;
use crate::core::model::{AggregateRow, Listing};
use crate::report::fmt::{fmt_money, fmt_num};

#[derive(Clone, Debug, PartialEq)]
pub struct Insight {
    /// Key of the bar, or index of the point, the callout targets.
    pub target: Target,
    pub title: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Group(String),
    Listing(usize),
}

fn by<'a, F>(rows: &'a [AggregateRow], f: F, highest: bool) -> Option<&'a AggregateRow>
where
    F: Fn(&AggregateRow) -> Option<f64>,
{
    let mut best: Option<(&AggregateRow, f64)> = None;
    for r in rows {
        let Some(v) = f(r) else { continue };
        let better = match best {
            None => true,
            Some((_, b)) => {
                if highest {
                    v > b
                } else {
                    v < b
                }
            }
        };
        if better {
            best = Some((r, v));
        }
    }
    best.map(|(r, _)| r)
}

pub fn highest_mean_price(rows: &[AggregateRow], noun: &str) -> Option<Insight> {
    let r = by(rows, |r| Some(r.mean_price), true)?;
    Some(Insight {
        target: Target::Group(r.key.clone()),
        title: r.key.clone(),
        label: format!(
            "{} has the highest average price of {} across {} listings",
            describe(&r.key, noun),
            fmt_money(r.mean_price),
            r.count
        ),
    })
}

pub fn lowest_mean_price(rows: &[AggregateRow], noun: &str) -> Option<Insight> {
    let r = by(rows, |r| Some(r.mean_price), false)?;
    Some(Insight {
        target: Target::Group(r.key.clone()),
        title: r.key.clone(),
        label: format!(
            "{} has the lowest average price of {}, with an average of {} sqft and {} bedrooms",
            describe(&r.key, noun),
            fmt_money(r.mean_price),
            fmt_num(r.mean_sqft, 0),
            r.mean_beds
        ),
    })
}

pub fn highest_price_per_sqft(rows: &[AggregateRow], noun: &str) -> Option<Insight> {
    let r = by(rows, |r| r.mean_price_per_sqft, true)?;
    let ppsf = r.mean_price_per_sqft?;
    Some(Insight {
        target: Target::Group(r.key.clone()),
        title: r.key.clone(),
        label: format!(
            "{} has the highest average price per square foot at {}",
            describe(&r.key, noun),
            fmt_money(ppsf)
        ),
    })
}

pub fn most_listed(rows: &[AggregateRow], noun: &str) -> Option<Insight> {
    let r = by(rows, |r| Some(r.count as f64), true)?;
    Some(Insight {
        target: Target::Group(r.key.clone()),
        title: r.key.clone(),
        label: format!(
            "{} is the most listed {} with {} listings",
            r.key, noun, r.count
        ),
    })
}

pub fn most_expensive_listing(listings: &[&Listing], scope: &str) -> Option<Insight> {
    let (i, l) = listings
        .iter()
        .enumerate()
        .filter(|(_, l)| l.price.is_finite())
        // max_by keeps the last of equal maxima; reversed, that is the first listed.
        .rev()
        .max_by(|a, b| a.1.price.total_cmp(&b.1.price))?;
    let street = if l.street_name.is_empty() {
        l.borough.as_str()
    } else {
        l.street_name.as_str()
    };
    Some(Insight {
        target: Target::Listing(i),
        title: format!("Top listing in {scope}"),
        label: format!(
            "A {} on {} asks {} for {} sqft",
            l.property_type.to_lowercase(),
            street,
            fmt_money(l.price),
            fmt_num(l.property_sqft, 0)
        ),
    })
}

/// Points at the first listing of the modal size. `None` for an empty selection.
pub fn most_common_size(listings: &[&Listing], scope: &str) -> Option<Insight> {
    let (sqft, count) = most_common_sqft(listings)?;
    let i = listings.iter().position(|l| l.property_sqft == sqft)?;
    Some(Insight {
        target: Target::Listing(i),
        title: format!("Typical size in {scope}"),
        label: format!(
            "The most common size is {} sqft, shared by {} of {} listings",
            fmt_num(sqft, 0),
            count,
            listings.len()
        ),
    })
}

fn describe(key: &str, noun: &str) -> String {
    if noun.is_empty() {
        key.to_string()
    } else {
        format!("{key} ({noun})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, price: f64, ppsf: Option<f64>, count: usize) -> AggregateRow {
        AggregateRow {
            key: key.to_string(),
            count,
            mean_price: price,
            mean_sqft: 1000.0,
            mean_price_per_sqft: ppsf,
            mean_beds: 2,
            mean_baths: 1,
        }
    }

    fn listing(price: f64, sqft: f64) -> Listing {
        Listing {
            price,
            beds: 1.0,
            baths: 1.0,
            property_sqft: sqft,
            borough: "Queens".to_string(),
            street_name: "Main Street".to_string(),
            property_type: "Condo".to_string(),
        }
    }

    #[test]
    fn picks_extremes_from_live_rows() {
        let rows = vec![
            row("Manhattan", 10_000_000.0, Some(1500.0), 10),
            row("East Bronx", 265_000.0, None, 3),
            row("Dumbo", 400_000.0, Some(2322.0), 40),
        ];
        let hi = highest_mean_price(&rows, "").unwrap();
        assert_eq!(hi.target, Target::Group("Manhattan".to_string()));
        assert!(hi.label.contains("$10,000,000"));

        let lo = lowest_mean_price(&rows, "").unwrap();
        assert_eq!(lo.target, Target::Group("East Bronx".to_string()));

        let ppsf = highest_price_per_sqft(&rows, "").unwrap();
        assert_eq!(ppsf.target, Target::Group("Dumbo".to_string()));

        let most = most_listed(&rows, "borough").unwrap();
        assert_eq!(most.title, "Dumbo");
    }

    #[test]
    fn empty_inputs_yield_no_insight() {
        assert!(highest_mean_price(&[], "").is_none());
        assert!(highest_price_per_sqft(&[row("A", 1.0, None, 1)], "").is_none());
        assert!(most_expensive_listing(&[], "All").is_none());
        assert!(most_common_size(&[], "All").is_none());
    }

    #[test]
    fn listing_insights_point_at_indices() {
        let data = vec![listing(500.0, 800.0), listing(900.0, 600.0), listing(100.0, 800.0)];
        let refs: Vec<&Listing> = data.iter().collect();
        let top = most_expensive_listing(&refs, "Queens").unwrap();
        assert_eq!(top.target, Target::Listing(1));
        let size = most_common_size(&refs, "Queens").unwrap();
        assert_eq!(size.target, Target::Listing(0));
        assert!(size.label.contains("800 sqft"));
    }

    #[test]
    fn equal_top_prices_pick_the_first_listing() {
        let data = vec![listing(100.0, 500.0), listing(900.0, 600.0), listing(900.0, 700.0)];
        let refs: Vec<&Listing> = data.iter().collect();
        let top = most_expensive_listing(&refs, "Queens").unwrap();
        assert_eq!(top.target, Target::Listing(1));
        assert!(top.label.contains("600 sqft"));
    }
}
