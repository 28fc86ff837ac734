use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart rendering mode enabled for a dataset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Line,
    Bar,
    Area,
    Pie,
    Scatter,
}

impl ViewType {
    pub const ALL: [ViewType; 5] = [
        ViewType::Line,
        ViewType::Bar,
        ViewType::Area,
        ViewType::Pie,
        ViewType::Scatter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Line => "line",
            ViewType::Bar => "bar",
            ViewType::Area => "area",
            ViewType::Pie => "pie",
            ViewType::Scatter => "scatter",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        Self::ALL
            .iter()
            .copied()
            .find(|view| view.as_str() == value)
            .ok_or_else(|| format!("Unknown view type: {value}"))
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_view_type() {
        for view in ViewType::ALL {
            assert_eq!(ViewType::parse(view.as_str()).unwrap(), view);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(ViewType::parse("heatmap").is_err());
    }
}
