//! Shared chart scaffolding: SVG root, margins, axes, marks and callouts.
//!
//! Each slide supplies its own scales, marks and annotations; everything a
//! chart draws goes through a `ChartFrame`.

use crate::report::fmt::{escape_html, fmt_compact};
use crate::report::scale::{BandScale, LogScale};
use anyhow::Result;
use std::fmt::Write as FmtWrite;

pub const MARK_FILL: &str = "darkslategray";
pub const MARK_HOVER: &str = "steelblue";
const CHAR_WIDTH: f64 = 6.0;
const LINE_HEIGHT: f64 = 13.0;

#[derive(Clone, Copy, Debug)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const BAR_MARGIN: Margin = Margin {
    top: 50.0,
    right: 50.0,
    bottom: 100.0,
    left: 60.0,
};

pub const SCATTER_MARGIN: Margin = Margin {
    top: 40.0,
    right: 40.0,
    bottom: 70.0,
    left: 70.0,
};

/// Callout in plot coordinates. The note sits at `(x + dx, y + dy)`.
#[derive(Clone, Debug)]
pub struct Annotation {
    pub title: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub wrap: f64,
}

pub struct ChartFrame {
    width: f64,
    height: f64,
    margin: Margin,
    out: String,
}

impl ChartFrame {
    pub fn new(container: (f64, f64), margin: Margin) -> Result<Self> {
        let (w, h) = container;
        let mut out = String::with_capacity(32 * 1024);
        writeln!(
            out,
            "<svg class=\"chart\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\">",
            w, h, w, h
        )?;
        writeln!(
            out,
            "<g transform=\"translate({}, {})\">",
            margin.left, margin.top
        )?;
        Ok(Self {
            width: (w - margin.left - margin.right).max(1.0),
            height: (h - margin.top - margin.bottom).max(1.0),
            margin,
            out,
        })
    }

    pub fn plot_width(&self) -> f64 {
        self.width
    }

    pub fn plot_height(&self) -> f64 {
        self.height
    }

    pub fn band_axis_bottom(&mut self, x: &BandScale) -> Result<()> {
        let h = self.height;
        writeln!(self.out, "<g class=\"axis x\" transform=\"translate(0, {})\">", h)?;
        writeln!(
            self.out,
            "<line x1=\"0\" y1=\"0\" x2=\"{}\" y2=\"0\" stroke=\"#000\"/>",
            self.width
        )?;
        for key in x.domain() {
            let Some(cx) = x.center(key) else { continue };
            writeln!(
                self.out,
                "<line x1=\"{cx}\" y1=\"0\" x2=\"{cx}\" y2=\"6\" stroke=\"#000\"/>"
            )?;
            writeln!(
                self.out,
                "<text x=\"{cx}\" y=\"9\" font-size=\"10\" text-anchor=\"end\" transform=\"rotate(-45 {cx} 9)\">{}</text>",
                escape_html(key)
            )?;
        }
        writeln!(self.out, "</g>")?;
        Ok(())
    }

    pub fn log_axis_left(&mut self, y: &LogScale) -> Result<()> {
        writeln!(self.out, "<g class=\"axis y\">")?;
        writeln!(
            self.out,
            "<line x1=\"0\" y1=\"0\" x2=\"0\" y2=\"{}\" stroke=\"#000\"/>",
            self.height
        )?;
        for v in y.ticks() {
            let py = y.map(v);
            writeln!(
                self.out,
                "<line x1=\"-6\" y1=\"{py}\" x2=\"0\" y2=\"{py}\" stroke=\"#000\"/>"
            )?;
            writeln!(
                self.out,
                "<line x1=\"0\" y1=\"{py}\" x2=\"{}\" y2=\"{py}\" stroke=\"#eee\"/>",
                self.width
            )?;
            writeln!(
                self.out,
                "<text x=\"-9\" y=\"{py}\" font-size=\"10\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>",
                fmt_compact(v)
            )?;
        }
        writeln!(self.out, "</g>")?;
        Ok(())
    }

    pub fn log_axis_bottom(&mut self, x: &LogScale) -> Result<()> {
        let h = self.height;
        writeln!(self.out, "<g class=\"axis x\" transform=\"translate(0, {})\">", h)?;
        writeln!(
            self.out,
            "<line x1=\"0\" y1=\"0\" x2=\"{}\" y2=\"0\" stroke=\"#000\"/>",
            self.width
        )?;
        for v in x.ticks() {
            let px = x.map(v);
            writeln!(
                self.out,
                "<line x1=\"{px}\" y1=\"0\" x2=\"{px}\" y2=\"6\" stroke=\"#000\"/>"
            )?;
            writeln!(
                self.out,
                "<line x1=\"{px}\" y1=\"0\" x2=\"{px}\" y2=\"{}\" stroke=\"#eee\"/>",
                -h
            )?;
            writeln!(
                self.out,
                "<text x=\"{px}\" y=\"9\" font-size=\"10\" text-anchor=\"middle\" dominant-baseline=\"hanging\">{}</text>",
                fmt_compact(v)
            )?;
        }
        writeln!(self.out, "</g>")?;
        Ok(())
    }

    pub fn axis_titles(&mut self, x_label: &str, y_label: &str) -> Result<()> {
        let x = self.width / 2.0;
        let y = self.height + self.margin.bottom - 10.0;
        writeln!(
            self.out,
            "<text x=\"{}\" y=\"{}\" font-size=\"12\" text-anchor=\"middle\">{}</text>",
            x,
            y,
            escape_html(x_label)
        )?;
        let yx = -self.margin.left + 14.0;
        let yy = self.height / 2.0;
        writeln!(
            self.out,
            "<text x=\"{}\" y=\"{}\" font-size=\"12\" text-anchor=\"middle\" transform=\"rotate(-90 {} {})\">{}</text>",
            yx,
            yy,
            yx,
            yy,
            escape_html(y_label)
        )?;
        Ok(())
    }

    pub fn bar(&mut self, x: f64, y: f64, width: f64, height: f64, tip: &[String]) -> Result<()> {
        writeln!(
            self.out,
            "<rect class=\"mark\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{MARK_FILL}\" data-fill=\"{MARK_FILL}\" data-hover=\"{MARK_HOVER}\" data-tip=\"{}\"/>",
            x,
            y,
            width.max(0.0),
            height.max(0.0),
            tip_attr(tip)
        )?;
        Ok(())
    }

    pub fn point(&mut self, cx: f64, cy: f64, r: f64, tip: &[String]) -> Result<()> {
        writeln!(
            self.out,
            "<circle class=\"mark\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{MARK_FILL}\" fill-opacity=\"0.6\" data-fill=\"{MARK_FILL}\" data-hover=\"{MARK_HOVER}\" data-tip=\"{}\"/>",
            cx,
            cy,
            r,
            tip_attr(tip)
        )?;
        Ok(())
    }

    /// Placeholder text centred in the plot area, for selections with no marks.
    pub fn empty_note(&mut self, text: &str) -> Result<()> {
        writeln!(
            self.out,
            "<text x=\"{}\" y=\"{}\" font-size=\"13\" fill=\"#666\" text-anchor=\"middle\">{}</text>",
            self.width / 2.0,
            self.height / 2.0,
            escape_html(text)
        )?;
        Ok(())
    }

    pub fn annotations(&mut self, notes: &[Annotation]) -> Result<()> {
        if notes.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "<g class=\"annotation-group\">")?;
        for a in notes {
            self.callout(a)?;
        }
        writeln!(self.out, "</g>")?;
        Ok(())
    }

    fn callout(&mut self, a: &Annotation) -> Result<()> {
        let nx = (a.x + a.dx).clamp(0.0, self.width);
        let ny = (a.y + a.dy).clamp(0.0, self.height);
        let leftward = a.dx < 0.0;
        let wrap = a.wrap.min(self.width);
        let (x0, x1, anchor) = if leftward {
            (nx - wrap, nx, "end")
        } else {
            (nx, nx + wrap, "start")
        };
        let tx = if leftward { x1 } else { x0 };
        writeln!(self.out, "<g class=\"annotation callout\">")?;
        writeln!(
            self.out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"none\" stroke=\"#333\"/>",
            a.x, a.y
        )?;
        writeln!(
            self.out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#333\"/>",
            a.x, a.y, nx, ny
        )?;
        writeln!(
            self.out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#333\"/>",
            x0, ny, x1, ny
        )?;
        let mut ty = ny - 4.0 - LINE_HEIGHT * wrap_text(&a.label, wrap).len() as f64;
        writeln!(
            self.out,
            "<text x=\"{}\" y=\"{}\" font-size=\"12\" font-weight=\"bold\" text-anchor=\"{}\">{}</text>",
            tx,
            ty,
            anchor,
            escape_html(&a.title)
        )?;
        for line in wrap_text(&a.label, wrap) {
            ty += LINE_HEIGHT;
            writeln!(
                self.out,
                "<text x=\"{}\" y=\"{}\" font-size=\"11\" text-anchor=\"{}\">{}</text>",
                tx,
                ty,
                anchor,
                escape_html(&line)
            )?;
        }
        writeln!(self.out, "</g>")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<String> {
        writeln!(self.out, "</g>")?;
        writeln!(self.out, "</svg>")?;
        Ok(self.out)
    }
}

fn tip_attr(lines: &[String]) -> String {
    escape_html(&lines.join("\n")).replace('\n', "&#10;")
}

/// Greedy word wrap to roughly `width` pixels of 11px text.
pub fn wrap_text(text: &str, width: f64) -> Vec<String> {
    let max_chars = ((width / CHAR_WIDTH).floor() as usize).max(8);
    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        if !cur.is_empty() && cur.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}
