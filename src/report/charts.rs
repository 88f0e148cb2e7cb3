use crate::core::aggregate::aggregate;
use crate::core::dataset::Dataset;
use crate::core::insight::{self, Insight, Target};
use crate::core::model::{AggregateRow, BoroughFilter, GroupKey, Listing};
use crate::report::fmt::{fmt_money, fmt_num};
use crate::report::frame::{Annotation, BAR_MARGIN, ChartFrame, SCATTER_MARGIN};
use crate::report::scale::{BandScale, LogScale};
use anyhow::Result;

/// Fixed price axis for the bar charts; bars beyond it are clamped.
pub const BAR_PRICE_DOMAIN: (f64, f64) = (100_000.0, 11_000_000.0);
pub const SCATTER_PRICE_DOMAIN: (f64, f64) = (10_000.0, 100_000_000.0);
pub const SQFT_DOMAIN: (f64, f64) = (100.0, 100_000.0);
const NOTE_WRAP: f64 = 190.0;
const POINT_RADIUS: f64 = 3.5;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChartKind {
    BoroughPrice,
    PropertyTypePrice,
    PriceVsSqft,
    BoroughPropertyTypes,
}

impl ChartKind {
    /// Whether the slide carries a borough dropdown.
    pub fn filterable(self) -> bool {
        matches!(self, ChartKind::PriceVsSqft | ChartKind::BoroughPropertyTypes)
    }
}

pub struct RenderContext<'a> {
    pub container: (f64, f64),
    pub dataset: &'a Dataset,
    pub filter: &'a BoroughFilter,
}

#[derive(Debug)]
pub struct Chart {
    pub svg: String,
    pub marks: usize,
    pub clamped: usize,
}

pub fn render(kind: ChartKind, ctx: &RenderContext<'_>) -> Result<Chart> {
    let chart = match kind {
        ChartKind::BoroughPrice => borough_price(ctx)?,
        ChartKind::PropertyTypePrice => property_type_price(ctx)?,
        ChartKind::PriceVsSqft => price_vs_sqft(ctx)?,
        ChartKind::BoroughPropertyTypes => borough_property_types(ctx)?,
    };
    if chart.clamped > 0 {
        log::warn!(
            "{:?} [{}]: {} value(s) fell outside the fixed axis domain and were clamped",
            kind,
            ctx.filter.label(),
            chart.clamped
        );
    }
    Ok(chart)
}

fn borough_price(ctx: &RenderContext<'_>) -> Result<Chart> {
    let all = ctx.dataset.filtered(&BoroughFilter::All);
    let rows = aggregate(&all, GroupKey::Borough)?;
    let insights: Vec<Insight> = [
        insight::highest_mean_price(&rows, ""),
        insight::lowest_mean_price(&rows, ""),
        insight::highest_price_per_sqft(&rows, ""),
    ]
    .into_iter()
    .flatten()
    .collect();
    bar_chart(ctx, &rows, GroupKey::Borough, &insights, "No listings to summarize")
}

fn property_type_price(ctx: &RenderContext<'_>) -> Result<Chart> {
    let all = ctx.dataset.filtered(&BoroughFilter::All);
    let rows = aggregate(&all, GroupKey::PropertyType)?;
    let insights: Vec<Insight> = [
        insight::highest_mean_price(&rows, ""),
        insight::most_listed(&rows, "property type"),
    ]
    .into_iter()
    .flatten()
    .collect();
    bar_chart(
        ctx,
        &rows,
        GroupKey::PropertyType,
        &insights,
        "No listings to summarize",
    )
}

fn borough_property_types(ctx: &RenderContext<'_>) -> Result<Chart> {
    let selected = ctx.dataset.filtered(ctx.filter);
    let rows = aggregate(&selected, GroupKey::PropertyType)?;
    let scope = ctx.filter.label();
    let insights: Vec<Insight> = [
        insight::highest_mean_price(&rows, scope),
        insight::most_listed(&rows, &format!("property type in {scope}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    bar_chart(
        ctx,
        &rows,
        GroupKey::PropertyType,
        &insights,
        &format!("No listings in {scope}"),
    )
}

fn bar_chart(
    ctx: &RenderContext<'_>,
    rows: &[AggregateRow],
    key: GroupKey,
    insights: &[Insight],
    empty_text: &str,
) -> Result<Chart> {
    let mut frame = ChartFrame::new(ctx.container, BAR_MARGIN)?;
    let (w, h) = (frame.plot_width(), frame.plot_height());
    let x = BandScale::new(rows.iter().map(|r| r.key.clone()).collect(), (0.0, w), 0.1);
    let y = LogScale::new(BAR_PRICE_DOMAIN, (h, 0.0));

    frame.band_axis_bottom(&x)?;
    frame.log_axis_left(&y)?;
    frame.axis_titles(key.label(), "Average Price")?;

    if rows.is_empty() {
        frame.empty_note(empty_text)?;
    }
    for r in rows {
        let Some(bx) = x.position(&r.key) else { continue };
        let by = y.map(r.mean_price);
        frame.bar(bx, by, x.bandwidth(), h - by, &aggregate_tip(key, r))?;
    }
    // Callout targets map the same values again; count marks only.
    let clamped = y.clamped();

    let notes: Vec<Annotation> = insights
        .iter()
        .enumerate()
        .filter_map(|(i, ins)| {
            let Target::Group(k) = &ins.target else {
                return None;
            };
            let r = rows.iter().find(|r| &r.key == k)?;
            let cx = x.center(k)?;
            let step = (x.bandwidth() * 1.75).max(30.0);
            Some(Annotation {
                title: ins.title.clone(),
                label: ins.label.clone(),
                x: cx,
                y: y.map(r.mean_price),
                dx: if cx < w / 2.0 { step } else { -step },
                dy: -(100.0 - 20.0 * i as f64),
                wrap: NOTE_WRAP,
            })
        })
        .collect();
    frame.annotations(&notes)?;

    Ok(Chart {
        svg: frame.finish()?,
        marks: rows.len(),
        clamped,
    })
}

fn price_vs_sqft(ctx: &RenderContext<'_>) -> Result<Chart> {
    let selected = ctx.dataset.filtered(ctx.filter);
    let scope = ctx.filter.label();
    let mut frame = ChartFrame::new(ctx.container, SCATTER_MARGIN)?;
    let (w, h) = (frame.plot_width(), frame.plot_height());
    let x = LogScale::new(SQFT_DOMAIN, (0.0, w));
    let y = LogScale::new(SCATTER_PRICE_DOMAIN, (h, 0.0));

    frame.log_axis_bottom(&x)?;
    frame.log_axis_left(&y)?;
    frame.axis_titles("Square Footage", "Price")?;

    if selected.is_empty() {
        frame.empty_note(&format!("No listings in {scope}"))?;
    }
    for l in &selected {
        frame.point(x.map(l.property_sqft), y.map(l.price), POINT_RADIUS, &listing_tip(l))?;
    }
    let clamped = x.clamped() + y.clamped();

    let insights: Vec<Insight> = [
        insight::most_expensive_listing(&selected, scope),
        insight::most_common_size(&selected, scope),
    ]
    .into_iter()
    .flatten()
    .collect();
    let notes: Vec<Annotation> = insights
        .iter()
        .enumerate()
        .filter_map(|(i, ins)| {
            let Target::Listing(idx) = ins.target else {
                return None;
            };
            let l = selected.get(idx)?;
            let px = x.map(l.property_sqft);
            Some(Annotation {
                title: ins.title.clone(),
                label: ins.label.clone(),
                x: px,
                y: y.map(l.price),
                dx: if px < w / 2.0 { 60.0 } else { -60.0 },
                dy: if i == 0 { 40.0 } else { -60.0 },
                wrap: NOTE_WRAP,
            })
        })
        .collect();
    frame.annotations(&notes)?;

    Ok(Chart {
        svg: frame.finish()?,
        marks: selected.len(),
        clamped,
    })
}

pub fn aggregate_tip(key: GroupKey, r: &AggregateRow) -> Vec<String> {
    vec![
        format!("{}: {}", key.label(), r.key),
        format!("Listings: {}", r.count),
        format!("Avg Price: {}", fmt_money(r.mean_price)),
        format!("Avg Sqft: {}", fmt_num(r.mean_sqft, 2)),
        format!(
            "Avg Price/Sqft: {}",
            r.mean_price_per_sqft
                .map(fmt_money)
                .unwrap_or_else(|| "n/a".to_string())
        ),
        format!("Avg Beds: {}", r.mean_beds),
        format!("Avg Baths: {}", r.mean_baths),
    ]
}

pub fn listing_tip(l: &Listing) -> Vec<String> {
    vec![
        format!("Borough: {}", l.borough),
        format!("Street: {}", l.street_name),
        format!("Type: {}", l.property_type),
        format!("Price: {}", fmt_money(l.price)),
        format!("Sqft: {}", fmt_num(l.property_sqft, 0)),
        format!(
            "Price/Sqft: {}",
            l.price_per_sqft()
                .map(fmt_money)
                .unwrap_or_else(|| "n/a".to_string())
        ),
        format!("Beds: {}", fmt_num(l.beds, 0)),
        format!("Baths: {}", fmt_num(l.baths, 0)),
    ]
}
