use crate::core::error::DeckError;
use crate::deck::controller::RenderedSlide;
use crate::report::fmt::escape_html;
use anyhow::{Context, Result};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// What goes in a slide's content area.
pub enum Content {
    Chart(String),
    Failed { headline: String, detail: String },
}

impl Content {
    /// Inline replacement for a chart that could not be drawn.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let headline = err
            .downcast_ref::<DeckError>()
            .map(|e| e.kind_label())
            .unwrap_or("Chart could not be drawn");
        Content::Failed {
            headline: headline.to_string(),
            detail: format!("{err:#}"),
        }
    }
}

pub struct FilterOption {
    pub label: String,
    pub href: String,
    pub selected: bool,
}

pub struct Page<'a> {
    pub deck_title: &'a str,
    pub view: &'a RenderedSlide<'a>,
    pub count: usize,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub filter: &'a [FilterOption],
    pub content: Content,
}

pub fn render_page(page: &Page<'_>) -> Result<String> {
    let slide = page.view.slide;
    let mut html = String::with_capacity(64 * 1024);

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\"/>")?;
    writeln!(
        html,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>"
    )?;
    writeln!(
        html,
        "<title>{}: {}</title>",
        escape_html(page.deck_title),
        escape_html(&slide.title)
    )?;
    writeln!(html, "<style>")?;
    writeln!(
        html,
        "body{{font-family:Arial,Helvetica,sans-serif;margin:0;background:#eee;color:#222;}}"
    )?;
    writeln!(
        html,
        "#scene-container{{max-width:1000px;margin:16px auto;background:#fff;border:1px solid #ddd;border-radius:4px;box-shadow:0 1px 3px rgba(0,0,0,0.08);padding:16px 20px;}}"
    )?;
    writeln!(html, ".scene h2{{margin:0 0 6px 0;font-size:22px;}}")?;
    writeln!(html, ".scene p{{color:#444;font-size:14px;margin:4px 0 10px 0;}}")?;
    writeln!(html, ".scene-content{{margin:8px 0;}}")?;
    writeln!(html, ".filter{{font-size:13px;margin:6px 0;}}")?;
    writeln!(
        html,
        ".chart-error{{border:1px solid #e0b4b4;background:#fff6f6;color:#9f3a38;padding:12px 16px;border-radius:4px;}}"
    )?;
    writeln!(
        html,
        ".nav{{display:flex;justify-content:space-between;align-items:center;max-width:1000px;margin:0 auto 24px auto;}}"
    )?;
    writeln!(html, ".nav button{{font-size:14px;padding:6px 16px;}}")?;
    writeln!(html, ".counter{{color:#555;font-size:12px;}}")?;
    writeln!(
        html,
        "#tooltip{{position:absolute;background:white;padding:5px;border:1px solid black;border-radius:5px;opacity:0;pointer-events:none;white-space:pre-line;font-size:12px;transition:opacity 0.2s;}}"
    )?;
    writeln!(html, "svg.chart{{background:#fff;}}")?;
    writeln!(html, "</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;

    writeln!(html, "<div id=\"scene-container\">")?;
    writeln!(
        html,
        "<div class=\"scene\" id=\"{}\">",
        escape_html(&slide.id)
    )?;
    writeln!(html, "<h2>{}</h2>", escape_html(&slide.title))?;
    writeln!(html, "<p>{}</p>", escape_html(&slide.caption))?;
    if !page.filter.is_empty() {
        filter_menu(&mut html, page.filter)?;
    }
    writeln!(html, "<div class=\"scene-content\">")?;
    match &page.content {
        Content::Chart(svg) => html.push_str(svg),
        Content::Failed { headline, detail } => {
            writeln!(
                html,
                "<div class=\"chart-error\"><b>{}</b><br/>{}</div>",
                escape_html(headline),
                escape_html(detail)
            )?;
        }
    }
    writeln!(html, "</div>")?;
    writeln!(html, "</div>")?;
    writeln!(html, "</div>")?;

    writeln!(html, "<div class=\"nav\">")?;
    nav_button(&mut html, "prevButton", "Previous", page.prev_href.as_deref())?;
    writeln!(
        html,
        "<span class=\"counter\">{} / {}</span>",
        page.view.index + 1,
        page.count
    )?;
    nav_button(&mut html, "nextButton", "Next", page.next_href.as_deref())?;
    writeln!(html, "</div>")?;
    writeln!(html, "<div id=\"tooltip\"></div>")?;

    html.push_str("<script>");
    html.push_str(r#"(function(){var t=document.getElementById('tooltip');document.querySelectorAll('.mark').forEach(function(m){m.addEventListener('mouseover',function(e){m.setAttribute('fill',m.getAttribute('data-hover'));t.textContent=m.getAttribute('data-tip');t.style.left=(e.pageX+10)+'px';t.style.top=(e.pageY+10)+'px';t.style.opacity=1;});m.addEventListener('mouseout',function(){m.setAttribute('fill',m.getAttribute('data-fill'));t.style.opacity=0;});});document.querySelectorAll('button[data-href]').forEach(function(b){b.addEventListener('click',function(){window.location.href=b.getAttribute('data-href');});});var s=document.getElementById('borough-filter');if(s){s.addEventListener('change',function(){window.location.href=s.value;});}})();"#);
    html.push_str("</script>\n");
    writeln!(html, "</body></html>")?;
    Ok(html)
}

fn nav_button(out: &mut String, id: &str, label: &str, href: Option<&str>) -> Result<()> {
    match href {
        Some(h) => writeln!(
            out,
            "<button id=\"{}\" data-href=\"{}\">{}</button>",
            id,
            escape_html(h),
            label
        )?,
        None => writeln!(out, "<button id=\"{}\" disabled>{}</button>", id, label)?,
    }
    Ok(())
}

fn filter_menu(out: &mut String, options: &[FilterOption]) -> Result<()> {
    writeln!(
        out,
        "<div class=\"filter\"><label for=\"borough-filter\">Borough: </label><select id=\"borough-filter\">"
    )?;
    for o in options {
        writeln!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            escape_html(&o.href),
            if o.selected { " selected" } else { "" },
            escape_html(&o.label)
        )?;
    }
    writeln!(out, "</select></div>")?;
    Ok(())
}

pub fn write(path: &Path, html: &str) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    w.write_all(html.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::controller::SlideController;
    use crate::deck::slides::housing_story;

    fn page_for(index: usize, content: Content) -> String {
        let c = SlideController::new(housing_story()).unwrap();
        let view = c.render(index).unwrap();
        let page = Page {
            deck_title: "NY Housing",
            view: &view,
            count: c.len(),
            prev_href: view.nav.prev.map(|i| format!("scene{}.html", i + 1)),
            next_href: view.nav.next.map(|i| format!("scene{}.html", i + 1)),
            filter: &[],
            content,
        };
        render_page(&page).unwrap()
    }

    #[test]
    fn first_page_disables_previous_only() {
        let html = page_for(0, Content::Chart("<svg></svg>".to_string()));
        assert!(html.contains("<button id=\"prevButton\" disabled>"));
        assert!(html.contains("<button id=\"nextButton\" data-href=\"scene2.html\">"));
        assert!(html.contains("<h2>Boroughs of New York Metropolitan Area</h2>"));
    }

    #[test]
    fn last_page_disables_next_only() {
        let html = page_for(3, Content::Chart("<svg></svg>".to_string()));
        assert!(html.contains("<button id=\"prevButton\" data-href=\"scene3.html\">"));
        assert!(html.contains("<button id=\"nextButton\" disabled>"));
    }

    #[test]
    fn failed_chart_shows_inline_message() {
        let err = anyhow::Error::new(DeckError::data_load("missing.csv", "not found"));
        let html = page_for(1, Content::from_error(&err));
        assert!(html.contains("class=\"chart-error\""));
        assert!(html.contains("Data could not be loaded"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn filter_menu_marks_the_selection() {
        let mut out = String::new();
        filter_menu(
            &mut out,
            &[
                FilterOption {
                    label: "All".to_string(),
                    href: "scene3.html".to_string(),
                    selected: false,
                },
                FilterOption {
                    label: "Queens".to_string(),
                    href: "scene3--queens.html".to_string(),
                    selected: true,
                },
            ],
        )
        .unwrap();
        assert!(out.contains("<option value=\"scene3--queens.html\" selected>Queens</option>"));
        assert!(out.contains("<option value=\"scene3.html\">All</option>"));
    }
}
