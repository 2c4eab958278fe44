//! Section routing.
//!
//! The dashboard has four top-level sections. Exactly one is visible at a
//! time and the matching navigation entry is highlighted. Routing never
//! touches application state: handlers that need a conversation call
//! `ConversationStore::ensure_current` before activating the chat section.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Papers,
    Chat,
    Upload,
}

impl Section {
    /// Navigation order.
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Papers,
        Section::Chat,
        Section::Upload,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Papers => "papers",
            Section::Chat => "chat",
            Section::Upload => "upload",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Papers => "Papers",
            Section::Chat => "Chat",
            Section::Upload => "Upload Paper",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Section::Upload => "Upload",
            other => other.title(),
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Section::Dashboard => "/",
            Section::Papers => "/papers",
            Section::Chat => "/chat",
            Section::Upload => "/upload",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown section: {}", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// What the page chrome shows after a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub active: Section,
    pub title: &'static str,
}

impl View {
    pub fn is_visible(&self, section: Section) -> bool {
        self.active == section
    }
}

/// Show `section`, hide every other one, and label the page.
pub fn activate(section: Section) -> View {
    View {
        active: section,
        title: section.title(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_shows_exactly_one_section() {
        let view = activate(Section::Papers);
        let visible: Vec<_> = Section::ALL
            .into_iter()
            .filter(|s| view.is_visible(*s))
            .collect();
        assert_eq!(visible, vec![Section::Papers]);
        assert_eq!(view.title, "Papers");
    }

    #[test]
    fn test_upload_title_differs_from_nav_label() {
        let view = activate(Section::Upload);
        assert_eq!(view.title, "Upload Paper");
        assert_eq!(Section::Upload.nav_label(), "Upload");
    }

    #[test]
    fn test_parse_section() {
        assert_eq!("chat".parse::<Section>().unwrap(), Section::Chat);
        assert_eq!(" Dashboard ".parse::<Section>().unwrap(), Section::Dashboard);
        assert!("settings".parse::<Section>().is_err());
    }
}
