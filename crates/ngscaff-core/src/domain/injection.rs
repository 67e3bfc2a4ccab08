//! Reference injection into the main document.
//!
//! The entry HTML carries marker comment pairs:
//!
//! ```html
//!     <!-- bower:js -->
//!     <!-- endbower -->
//! ```
//!
//! Everything between a `bower:<block>` marker and the next `endbower`
//! marker is replaced by one tag per asset, indented like the opening marker.
//! Injecting twice yields the same document.

use crate::domain::error::DomainError;

const END_MARKER: &str = "<!-- endbower -->";

/// Kind of reference block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceBlock {
    Css,
    Js,
}

impl ReferenceBlock {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
        }
    }

    fn start_marker(&self) -> String {
        format!("<!-- bower:{} -->", self.name())
    }

    /// Tag for a single asset path.
    pub fn tag(&self, path: &str) -> String {
        match self {
            Self::Css => format!(r#"<link rel="stylesheet" href="{path}">"#),
            Self::Js => format!(r#"<script src="{path}"></script>"#),
        }
    }
}

/// Replace the contents of a marker block with tags for `paths`.
pub fn inject_references(
    document: &str,
    block: ReferenceBlock,
    paths: &[String],
) -> Result<String, DomainError> {
    let start_marker = block.start_marker();

    let start = document
        .find(&start_marker)
        .ok_or_else(|| DomainError::MarkerNotFound {
            marker: format!("bower:{}", block.name()),
        })?;
    let body_start = start + start_marker.len();

    let end = document[body_start..]
        .find(END_MARKER)
        .map(|offset| body_start + offset)
        .ok_or_else(|| DomainError::MarkerNotFound {
            marker: "endbower".into(),
        })?;

    let line_start = document[..start].rfind('\n').map_or(0, |i| i + 1);
    let indent: String = document[line_start..start]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    let mut body = String::from("\n");
    for path in paths {
        body.push_str(&indent);
        body.push_str(&block.tag(path));
        body.push('\n');
    }
    body.push_str(&indent);

    let mut out = String::with_capacity(document.len() + body.len());
    out.push_str(&document[..body_start]);
    out.push_str(&body);
    out.push_str(&document[end..]);
    Ok(out)
}
