//! HTML patching utilities linking the manifest and icons from `index.html`.

use std::sync::OnceLock;

use anyhow::{Result, anyhow};
use regex::Regex;

use crate::icons::APPLE_TOUCH_ICON_SIZE;
use crate::project::PwaLayout;

struct HeadPatterns {
  head_close: Regex,
  manifest_link: Regex,
  theme_color: Regex,
  apple_touch_icon: Regex,
}

fn head_patterns() -> &'static HeadPatterns {
  static PATTERNS: OnceLock<HeadPatterns> = OnceLock::new();
  PATTERNS.get_or_init(|| HeadPatterns {
    head_close: Regex::new(r"(?i)</head\s*>").expect("invalid head regex"),
    manifest_link: Regex::new(r#"(?i)<link[^>]*rel=["']manifest["']"#)
      .expect("invalid manifest link regex"),
    theme_color: Regex::new(r#"(?i)<meta[^>]*name=["']theme-color["']"#)
      .expect("invalid theme-color regex"),
    apple_touch_icon: Regex::new(r#"(?i)<link[^>]*rel=["']apple-touch-icon["']"#)
      .expect("invalid apple-touch-icon regex"),
  })
}

/// `<link>` tag pointing iOS home screens at the bundled icon.
pub fn apple_touch_icon_tag(layout: &PwaLayout) -> String {
  format!(
    r#"<link rel="apple-touch-icon" href="{}">"#,
    layout.icon_href(&APPLE_TOUCH_ICON_SIZE.file_name())
  )
}

/// Insert the manifest link, theme colour and touch icon into the `<head>` of `html`.
///
/// Tags that are already present are left alone, so patching twice is a no-op. Returns
/// `None` when nothing had to change.
pub fn patch_head(html: &str, layout: &PwaLayout, theme_color: &str) -> Result<Option<String>> {
  let patterns = head_patterns();
  let head_close = patterns
    .head_close
    .find(html)
    .ok_or_else(|| anyhow!("failed to locate </head> in index.html"))?;

  let mut tags = Vec::new();
  if !patterns.manifest_link.is_match(html) {
    tags.push(format!(r#"<link rel="manifest" href="{}">"#, layout.manifest_file));
  }
  if !patterns.theme_color.is_match(html) {
    tags.push(format!(r#"<meta name="theme-color" content="{theme_color}">"#));
  }
  if !patterns.apple_touch_icon.is_match(html) {
    tags.push(apple_touch_icon_tag(layout));
  }

  if tags.is_empty() {
    return Ok(None);
  }

  let line_start = html[..head_close.start()].rfind('\n').map_or(0, |pos| pos + 1);
  let prefix = &html[line_start..head_close.start()];

  let mut patched = String::with_capacity(html.len() + 256);
  if prefix.chars().all(|c| c == ' ' || c == '\t') {
    patched.push_str(&html[..line_start]);
    for tag in tags {
      patched.push_str(prefix);
      patched.push_str("  ");
      patched.push_str(&tag);
      patched.push('\n');
    }
    patched.push_str(&html[line_start..]);
  } else {
    patched.push_str(&html[..head_close.start()]);
    for tag in tags {
      patched.push_str(&tag);
    }
    patched.push_str(&html[head_close.start()..]);
  }
  Ok(Some(patched))
}
