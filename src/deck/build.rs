use crate::core::io::DatasetCache;
use crate::core::model::{BoroughFilter, unique_slugs};
use crate::deck::controller::SlideController;
use crate::deck::slides::{Slide, housing_story};
use crate::report::charts::{self, RenderContext};
use crate::report::figures::Figure;
use crate::report::html::{self, Content, FilterOption, Page};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

pub struct BuildConfig {
    pub out_dir: PathBuf,
    pub title: String,
    pub container: (f64, f64),
}

#[derive(Default)]
pub struct BuildOutput {
    pub pages: Vec<PathBuf>,
    pub figures: Vec<Figure>,
    pub failed_charts: usize,
}

/// One rendering of a slide: the unfiltered view or a single borough.
struct Variant {
    filter: BoroughFilter,
    page: String,
}

pub fn page_name(slide: &Slide, slug: Option<&str>) -> String {
    match slug {
        Some(slug) => format!("{}--{}.html", slide.id, slug),
        None => format!("{}.html", slide.id),
    }
}

/// Walks the deck front to back and writes one page per slide and filter.
pub fn run(cfg: &BuildConfig, cache: &DatasetCache) -> Result<BuildOutput> {
    let mut controller = SlideController::new(housing_story())?;
    fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("failed to create output dir {}", cfg.out_dir.display()))?;

    let mut out = BuildOutput::default();
    controller.initialize();
    loop {
        let index = controller.index();
        let t = Instant::now();
        build_slide(cfg, cache, &controller, index, &mut out)?;
        log::debug!(
            "slide {} built in {}ms",
            controller.slides()[index].id,
            t.elapsed().as_millis()
        );
        if index == controller.last_index() {
            break;
        }
        controller.advance(1)?;
    }
    Ok(out)
}

fn build_slide(
    cfg: &BuildConfig,
    cache: &DatasetCache,
    controller: &SlideController,
    index: usize,
    out: &mut BuildOutput,
) -> Result<()> {
    let view = controller.render(index)?;
    let slide = view.slide;
    let slides = controller.slides();
    let prev_href = view
        .nav
        .prev
        .map(|i| page_name(&slides[i], None));
    let next_href = view
        .nav
        .next
        .map(|i| page_name(&slides[i], None));

    let variants = variants_for(slide, cache);
    for variant in &variants {
        let filter = &variant.filter;
        let options: Vec<FilterOption> = if variants.len() > 1 {
            variants
                .iter()
                .map(|v| FilterOption {
                    label: v.filter.label().to_string(),
                    href: v.page.clone(),
                    selected: v.page == variant.page,
                })
                .collect()
        } else {
            Vec::new()
        };

        let content = match render_chart(cfg, cache, slide, filter) {
            Ok(svg) => {
                if *filter == BoroughFilter::All {
                    out.figures.push(Figure {
                        name: slide.id.clone(),
                        caption: slide.title.clone(),
                        svg: svg.clone(),
                    });
                }
                Content::Chart(svg)
            }
            Err(e) => {
                log::warn!("{} [{}]: {:#}", slide.id, filter.label(), e);
                out.failed_charts += 1;
                Content::from_error(&e)
            }
        };

        let page = Page {
            deck_title: &cfg.title,
            view: &view,
            count: controller.len(),
            prev_href: prev_href.clone(),
            next_href: next_href.clone(),
            filter: &options,
            content,
        };
        let html_text = html::render_page(&page)?;
        let path = cfg.out_dir.join(&variant.page);
        html::write(&path, &html_text)?;
        out.pages.push(path);
        if index == 0 && *filter == BoroughFilter::All {
            let index_path = cfg.out_dir.join("index.html");
            html::write(&index_path, &html_text)?;
            out.pages.push(index_path);
        }
    }
    Ok(())
}

/// `All` first, then one entry per borough for slides with a dropdown.
/// Without data there is only `All`, which then renders the load error.
fn variants_for(slide: &Slide, cache: &DatasetCache) -> Vec<Variant> {
    let mut variants = vec![Variant {
        filter: BoroughFilter::All,
        page: page_name(slide, None),
    }];
    if slide.chart.filterable() {
        if let Ok(ds) = cache.get() {
            let boroughs = ds.boroughs();
            let slugs = unique_slugs(&boroughs, "borough");
            variants.extend(boroughs.into_iter().zip(slugs).map(|(b, slug)| Variant {
                page: page_name(slide, Some(&slug)),
                filter: BoroughFilter::Only(b),
            }));
        }
    }
    variants
}

fn render_chart(
    cfg: &BuildConfig,
    cache: &DatasetCache,
    slide: &Slide,
    filter: &BoroughFilter,
) -> Result<String> {
    let dataset = cache.get()?;
    let ctx = RenderContext {
        container: cfg.container,
        dataset: &dataset,
        filter,
    };
    let chart = charts::render(slide.chart, &ctx)?;
    Ok(chart.svg)
}
