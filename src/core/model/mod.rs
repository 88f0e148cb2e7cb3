use std::collections::HashSet;

pub const FOR_SALE_SUFFIX: &str = " for sale";

/// One CSV row after numeric coercion.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub price: f64,
    pub beds: f64,
    pub baths: f64,
    pub property_sqft: f64,
    pub borough: String,
    pub street_name: String,
    pub property_type: String,
}

impl Listing {
    /// `None` when square footage is zero, negative or not finite.
    pub fn price_per_sqft(&self) -> Option<f64> {
        if self.property_sqft.is_finite() && self.property_sqft > 0.0 && self.price.is_finite() {
            Some(self.price / self.property_sqft)
        } else {
            None
        }
    }
}

pub fn strip_for_sale(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix(FOR_SALE_SUFFIX)
        .unwrap_or(trimmed)
        .to_string()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupKey {
    Borough,
    PropertyType,
}

impl GroupKey {
    pub fn of<'a>(self, listing: &'a Listing) -> &'a str {
        match self {
            GroupKey::Borough => &listing.borough,
            GroupKey::PropertyType => &listing.property_type,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupKey::Borough => "Borough",
            GroupKey::PropertyType => "Property Type",
        }
    }
}

/// Per-group summary, recomputed on every render.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateRow {
    pub key: String,
    pub count: usize,
    pub mean_price: f64,
    pub mean_sqft: f64,
    pub mean_price_per_sqft: Option<f64>,
    pub mean_beds: u32,
    pub mean_baths: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum BoroughFilter {
    #[default]
    All,
    Only(String),
}

impl BoroughFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            BoroughFilter::All => true,
            BoroughFilter::Only(b) => listing.borough == *b,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BoroughFilter::All => Self::ALL_LABEL,
            BoroughFilter::Only(b) => b,
        }
    }
}

pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut dash = false;
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            dash = false;
        } else if !dash && !out.is_empty() {
            out.push('-');
            dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// One distinct, non-empty slug per name, in input order.
///
/// Names that slugify to nothing fall back to `fallback`; a slug already taken
/// gets the name's 1-based position appended.
pub fn unique_slugs(names: &[String], fallback: &str) -> Vec<String> {
    let mut used = HashSet::new();
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut base = slugify(name);
            if base.is_empty() {
                base = fallback.to_string();
            }
            let mut slug = base.clone();
            let mut n = i + 1;
            while !used.insert(slug.clone()) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            slug
        })
        .collect()
}
