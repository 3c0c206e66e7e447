//! Portfolio content: who the page is about and the projects it shows.
//!
//! Content is plain data.  The built-in default is what the page shows when
//! no `--content` file is given; a TOML file with the same shape replaces it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid content file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("content file {0} lists no projects")]
    NoProjects(PathBuf),
}

/// One titled block of a project case study.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DetailSection {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub sections: Vec<DetailSection>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Portfolio {
    pub owner: String,
    pub role: String,
    pub headline: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub socials: Vec<String>,
    pub projects: Vec<Project>,
}

impl Portfolio {
    /// Load and validate a TOML content file.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let portfolio: Portfolio = toml::from_str(&text).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if portfolio.projects.is_empty() {
            return Err(ContentError::NoProjects(path.to_path_buf()));
        }
        Ok(portfolio)
    }

    pub fn project(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        let section = |heading: &str, body: &str| DetailSection {
            heading: heading.into(),
            body: body.into(),
        };
        Self {
            owner: "AURIA ZHANG".into(),
            role: "Product Designer / UX Designer".into(),
            headline: "Making complex products feel simple.".into(),
            location: "Product Designer based in San Francisco.".into(),
            email: "hello@auria.design".into(),
            socials: vec!["LinkedIn".into(), "Twitter".into(), "Instagram".into()],
            projects: vec![
                Project {
                    id: 3,
                    title: "Lumina".into(),
                    category: "Health / Wearable".into(),
                    summary: "A recovery companion that turns raw biometric streams into one calm daily signal.".into(),
                    year: Some(2024),
                    role: Some("Lead Product Designer".into()),
                    sections: vec![
                        section("Challenge", "Wearable data was accurate but unreadable. People checked five charts to answer one question: am I ready today?"),
                        section("Approach", "We collapsed sleep, strain and heart-rate variability into a single readiness arc, with detail one tap away."),
                        section("Outcome", "Daily opens rose while time-in-app fell. The product got quieter and more useful at once."),
                    ],
                },
                Project {
                    id: 1,
                    title: "Prelo".into(),
                    category: "Fintech / Data".into(),
                    summary: "Cash-flow forecasting for small teams, built around the questions finance leads actually ask.".into(),
                    year: Some(2023),
                    role: Some("Product Designer".into()),
                    sections: vec![
                        section("Challenge", "Forecasts lived in spreadsheets that only their author could trust."),
                        section("Approach", "Scenario cards replaced formula grids; every number links back to the transactions behind it."),
                        section("Outcome", "Month-end close shortened and forecast reviews moved from hours to minutes."),
                    ],
                },
                Project {
                    id: 4,
                    title: "Chronos".into(),
                    category: "Productivity".into(),
                    summary: "A calendar that plans focus time around meetings instead of the other way round.".into(),
                    year: Some(2023),
                    role: Some("UX Designer".into()),
                    sections: vec![
                        section("Challenge", "Deep work was always the first thing sacrificed when a calendar filled up."),
                        section("Approach", "Focus blocks became first-class events that negotiate with meetings before they are booked."),
                    ],
                },
                Project {
                    id: 2,
                    title: "Aether".into(),
                    category: "AI / Voice".into(),
                    summary: "A voice interface exploration for hands-busy environments.".into(),
                    year: None,
                    role: None,
                    sections: Vec::new(),
                },
            ],
        }
    }
}
