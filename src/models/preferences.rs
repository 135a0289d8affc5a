//! Display preferences kept in the key-value store

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("Unknown theme '{}', expected light or dark", other)),
        }
    }
}

/// Accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Cyan,
    Indigo,
    Pink,
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cyan => write!(f, "cyan"),
            Self::Indigo => write!(f, "indigo"),
            Self::Pink => write!(f, "pink"),
        }
    }
}

impl FromStr for Accent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cyan" => Ok(Self::Cyan),
            "indigo" => Ok(Self::Indigo),
            "pink" => Ok(Self::Pink),
            other => Err(format!(
                "Unknown accent '{}', expected cyan, indigo or pink",
                other
            )),
        }
    }
}

/// Dashboard widgets that can be shown or hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    AiSummary,
    SpendingTrends,
    ExpenseList,
    Summary,
    ExportData,
    AiCoach,
}

impl Widget {
    pub fn all() -> &'static [Widget] {
        &[
            Self::AiSummary,
            Self::SpendingTrends,
            Self::ExpenseList,
            Self::Summary,
            Self::ExportData,
            Self::AiCoach,
        ]
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AiSummary => "ai-summary",
            Self::SpendingTrends => "spending-trends",
            Self::ExpenseList => "expense-list",
            Self::Summary => "summary",
            Self::ExportData => "export-data",
            Self::AiCoach => "ai-coach",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Widget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .find(|w| w.to_string() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown widget '{}'", s))
    }
}

/// Which dashboard widgets are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetVisibility {
    pub ai_summary: bool,
    pub spending_trends: bool,
    pub expense_list: bool,
    pub summary: bool,
    pub export_data: bool,
    pub ai_coach: bool,
}

impl Default for WidgetVisibility {
    fn default() -> Self {
        Self {
            ai_summary: true,
            spending_trends: true,
            expense_list: true,
            summary: true,
            export_data: true,
            ai_coach: true,
        }
    }
}

impl WidgetVisibility {
    fn slot(&mut self, widget: Widget) -> &mut bool {
        match widget {
            Widget::AiSummary => &mut self.ai_summary,
            Widget::SpendingTrends => &mut self.spending_trends,
            Widget::ExpenseList => &mut self.expense_list,
            Widget::Summary => &mut self.summary,
            Widget::ExportData => &mut self.export_data,
            Widget::AiCoach => &mut self.ai_coach,
        }
    }

    pub fn is_visible(&self, widget: Widget) -> bool {
        match widget {
            Widget::AiSummary => self.ai_summary,
            Widget::SpendingTrends => self.spending_trends,
            Widget::ExpenseList => self.expense_list,
            Widget::Summary => self.summary,
            Widget::ExportData => self.export_data,
            Widget::AiCoach => self.ai_coach,
        }
    }

    pub fn set(&mut self, widget: Widget, visible: bool) {
        *self.slot(widget) = visible;
    }

    /// Flip a widget and return its new visibility
    pub fn toggle(&mut self, widget: Widget) -> bool {
        let slot = self.slot(widget);
        *slot = !*slot;
        *slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Accent::default(), Accent::Cyan);
        assert!(Widget::all()
            .iter()
            .all(|w| WidgetVisibility::default().is_visible(*w)));
    }

    #[test]
    fn test_toggle_widget() {
        let mut vis = WidgetVisibility::default();
        assert!(!vis.toggle(Widget::AiCoach));
        assert!(!vis.is_visible(Widget::AiCoach));
        assert!(vis.is_visible(Widget::Summary));
    }

    #[test]
    fn test_widget_names() {
        assert_eq!("spending_trends".parse::<Widget>().unwrap(), Widget::SpendingTrends);
        assert_eq!(Widget::AiSummary.to_string(), "ai-summary");
        assert!("sidebar".parse::<Widget>().is_err());
    }

    #[test]
    fn test_widget_visibility_serde() {
        let json = serde_json::to_value(WidgetVisibility::default()).unwrap();
        assert_eq!(json["aiSummary"], true);
        let partial: WidgetVisibility = serde_json::from_str(r#"{"aiCoach":false}"#).unwrap();
        assert!(!partial.ai_coach);
        assert!(partial.summary);
    }

    #[test]
    fn test_theme_serde() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!("PINK".parse::<Accent>().unwrap(), Accent::Pink);
    }
}
