use crate::catalog::StarData;
use crate::solar::{BodyKind, BodyLayout};

pub const VIEW_PROJECT_LABEL: &str = "View Project";

/// Overlay content for a selected project star.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
    pub title: String,
    pub skills_line: String,
    pub link_label: &'static str,
    pub url: String,
}

impl ProjectDetails {
    pub fn from_star(star: &StarData) -> Self {
        let skills_line = if star.skills.is_empty() {
            "Skills Used: -".to_string()
        } else {
            format!("Skills Used: {}", star.skills.join(", "))
        };
        Self {
            title: star.name.clone(),
            skills_line,
            link_label: VIEW_PROJECT_LABEL,
            url: star.url.clone(),
        }
    }
}

/// Overlay content for a selected solar-system body.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetDetails {
    pub title: String,
    pub lines: Vec<String>,
}

impl PlanetDetails {
    pub fn from_body(body: &BodyLayout, host_name: Option<&str>) -> Self {
        let mut lines = Vec::new();
        match body.kind {
            BodyKind::Star => lines.push("Star at the centre of the system".to_string()),
            BodyKind::Planet => {
                lines.push(format!("Orbit radius: {:.0}", body.orbit_radius));
            }
            BodyKind::Moon => {
                let host = host_name.unwrap_or("its planet");
                lines.push(format!("Orbits {host} at {:.0}", body.orbit_radius));
            }
        }
        lines.push(format!("Radius: {:.1}", body.scale));
        Self {
            title: body.name.clone(),
            lines,
        }
    }
}

/// Overlay payload, one variant per scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    Project(ProjectDetails),
    Planet(PlanetDetails),
}

impl Details {
    pub fn title(&self) -> &str {
        match self {
            Details::Project(p) => &p.title,
            Details::Planet(p) => &p.title,
        }
    }

    /// Body text below the title, one entry per line.
    pub fn body(&self) -> String {
        match self {
            Details::Project(p) => p.skills_line.clone(),
            Details::Planet(p) => p.lines.join("\n"),
        }
    }

    pub fn link(&self) -> Option<(&'static str, &str)> {
        match self {
            Details::Project(p) => Some((p.link_label, p.url.as_str())),
            Details::Planet(_) => None,
        }
    }
}

pub fn tooltip_text(name: &str) -> String {
    name.trim().to_string()
}
