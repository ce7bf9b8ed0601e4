use crate::ascii::ASCII;
use crate::config::START_CAPTION;
use crate::snapshot::{LOVE_NOTE, LOVE_SIGNOFF, Snapshot, TITLE};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const GAP_BETWEEN_COLUMNS: f32 = 10.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_RIGHT_COL_CHARS: usize = 44;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
    pub heart: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#1f1526",
                text: "#f5e6f0",
                key: "#ff8fb8",
                value: "#d8b4fe",
                cc: "#7d6b86",
                heart: "#f43f5e",
            },
            Theme::Light => ThemeColors {
                bg: "#fdf2f8",
                text: "#374151",
                key: "#db2777",
                value: "#7c3aed",
                cc: "#9ca3af",
                heart: "#e11d48",
            },
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode.svg",
            Theme::Light => "light_mode.svg",
        }
    }
}

// Utilities for building SVG content

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}

fn width(s: &str) -> usize {
    s.chars().count()
}

pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = width(&key_part) + width(value);
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(width(&base)) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

fn build_ascii_tspans() -> (String, usize) {
    let mut out = String::new();
    let mut max_width = 0;

    for (i, line) in ASCII.lines().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;
        max_width = max_width.max(width(line));
        out.push_str(&format!(
            "<tspan x=\"{LEFT_PADDING}\" y=\"{y}\">{}</tspan>\n",
            escape_xml(line)
        ));
    }

    (out, max_width)
}

enum Line {
    Header(String),
    Blank,
    Stat { k: String, d: String, v: String },
    Text(String),
}

// Builds the right column content and returns (tspans, width, height)

fn build_right_column(
    snapshot: &Snapshot,
    ascii_width_px: f32,
    ascii_height_px: f32,
) -> (String, f32, f32) {
    let units = snapshot.time_units();
    let since = START_CAPTION.trim_start_matches("Since ");
    let (together, totals) = units.split_at(6);
    let banner = snapshot.occasion.map(|o| o.banner());

    let mut rows_for_width: Vec<(&str, String)> = units
        .iter()
        .map(|u| (u.label, u.value.to_string()))
        .collect();
    rows_for_width.push(("Since", since.to_string()));

    let align_width = rows_for_width
        .iter()
        .map(|(k, v)| width(k) + 2 + width(v))
        .chain([width(LOVE_NOTE), width(LOVE_SIGNOFF)])
        .chain(banner.as_deref().map(width))
        .max()
        .unwrap_or(0)
        .max(MIN_RIGHT_COL_CHARS);

    let stat = |k: &str, v: &str| {
        let (k, d, v) = build_stat_row(k, v, align_width);
        Line::Stat { k, d, v }
    };

    let mut lines = vec![Line::Header(build_header_line(TITLE, align_width))];
    lines.push(stat("Since", since));
    if !snapshot.started {
        lines.push(Line::Text("Not yet started".to_string()));
    }
    if let Some(banner) = &banner {
        lines.push(Line::Blank);
        lines.push(Line::Text(banner.clone()));
    }

    lines.push(Line::Blank);
    lines.push(Line::Header(build_header_line("- Together", align_width)));
    lines.extend(together.iter().map(|u| stat(u.label, &u.value.to_string())));

    lines.push(Line::Blank);
    lines.push(Line::Header(build_header_line("- Totals", align_width)));
    lines.extend(totals.iter().map(|u| stat(u.label, &u.value.to_string())));

    lines.push(Line::Blank);
    lines.push(Line::Text(LOVE_NOTE.to_string()));
    lines.push(Line::Text(LOVE_SIGNOFF.to_string()));

    // Render
    let right_height_px = lines.len() as f32 * LINE_HEIGHT as f32 + START_Y as f32;
    let right_x = ascii_width_px + GAP_BETWEEN_COLUMNS;

    let mut right_tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;

        match line {
            Line::Blank => {}
            Line::Header(text) => {
                right_tspans.push_str(&format!(
                    r#"<tspan x="{right_x}" y="{y}">{}</tspan>
"#,
                    escape_xml(text)
                ));
            }
            Line::Text(text) => {
                right_tspans.push_str(&format!(
                    r#"<tspan x="{right_x}" y="{y}" class="value">{}</tspan>
"#,
                    escape_xml(text)
                ));
            }
            Line::Stat { k, d, v } => {
                right_tspans.push_str(&format!(
                    r#"<tspan x="{right_x}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(k),
                    escape_xml(d),
                    escape_xml(v)
                ));
            }
        }
    }

    let content_width = right_x + (align_width as f32) * CHAR_WIDTH + RIGHT_PADDING;
    let content_height = ascii_height_px.max(right_height_px) + 30.0;

    (right_tspans, content_width, content_height)
}

/// Renders the counter card for one snapshot.
pub fn generate_svg(snapshot: &Snapshot, theme: Theme) -> String {
    let colors = theme.colors();

    let (ascii_tspans, ascii_chars_wide) = build_ascii_tspans();
    let ascii_lines = ASCII.lines().count();
    let ascii_width_px = ascii_chars_wide as f32 * CHAR_WIDTH + LEFT_PADDING;
    let ascii_height_px = ascii_lines as f32 * LINE_HEIGHT as f32 + START_Y as f32;

    let (right_tspans, w, h) = build_right_column(snapshot, ascii_width_px, ascii_height_px);

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<!-- LEFT HEART -->
<text fill="{heart}" xml:space="preserve">
{ascii}
</text>

<!-- RIGHT COLUMN -->
<text fill="{text}">
{right}
</text>

</svg>
"#,
        w = w,
        h = h,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        heart = colors.heart,
        ascii = ascii_tspans,
        right = right_tspans
    )
}

/// Writes one card per theme into `out_dir` and returns the written paths.
pub fn write_cards(snapshot: &Snapshot, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut written = Vec::new();
    for theme in [Theme::Dark, Theme::Light] {
        let path = out_dir.join(theme.file_name());
        fs::write(&path, generate_svg(snapshot, theme))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
