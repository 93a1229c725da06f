//! Tag icons.
//!
//! Lookup is case-insensitive; tags without an icon map to [`TagIcon::None`]
//! and render nothing.

/// Icon shown next to a tag chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagIcon {
    Javascript,
    CircleCi,
    React,
    Css,
    Aws,
    Docker,
    Github,
    Html,
    Linux,
    Jest,
    Golang,
    Kubernetes,
    None,
}

impl TagIcon {
    pub fn for_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "javascript" => Self::Javascript,
            "circleci" => Self::CircleCi,
            "react" => Self::React,
            "css" => Self::Css,
            "aws" => Self::Aws,
            "docker" => Self::Docker,
            "github" => Self::Github,
            "html" => Self::Html,
            "linux" => Self::Linux,
            "jest" => Self::Jest,
            "golang" => Self::Golang,
            "kubernetes" => Self::Kubernetes,
            _ => Self::None,
        }
    }

    /// Short badge text and brand color.
    const fn badge(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Javascript => Some(("JS", "#f7df1e")),
            Self::CircleCi => Some(("CI", "#343434")),
            Self::React => Some(("Re", "#61dafb")),
            Self::Css => Some(("CSS", "#264de4")),
            Self::Aws => Some(("AWS", "#ff9900")),
            Self::Docker => Some(("Dk", "#2496ed")),
            Self::Github => Some(("GH", "#181717")),
            Self::Html => Some(("HTML", "#e34f26")),
            Self::Linux => Some(("Lx", "#fcc624")),
            Self::Jest => Some(("Jt", "#c21325")),
            Self::Golang => Some(("Go", "#00add8")),
            Self::Kubernetes => Some(("K8s", "#326ce5")),
            Self::None => None,
        }
    }

    /// Inline SVG badge, or an empty string for [`TagIcon::None`].
    pub fn svg(self) -> String {
        let Some((text, color)) = self.badge() else {
            return String::new();
        };
        format!(
            concat!(
                r#"<svg class="tag-icon" viewBox="0 0 32 20" width="32" height="20" aria-hidden="true">"#,
                r#"<rect width="32" height="20" rx="4" fill="{color}"/>"#,
                r#"<text x="16" y="14" text-anchor="middle" font-size="9" font-family="sans-serif" fill="currentColor">{text}</text>"#,
                "</svg>"
            ),
            color = color,
            text = text,
        )
    }
}
