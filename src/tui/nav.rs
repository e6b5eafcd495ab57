//! Navigation shell: the static route list and the tab bar.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// A dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    HypothesisOne,
    HypothesisTwo,
    HypothesisThree,
    Clustering,
    RiskScore,
}

impl Route {
    /// Nav bar order. Digit keys index into this list.
    pub const ALL: [Route; 6] = [
        Self::Home,
        Self::HypothesisOne,
        Self::HypothesisTwo,
        Self::HypothesisThree,
        Self::Clustering,
        Self::RiskScore,
    ];

    /// Canonical path.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::HypothesisOne => "/hypothesis1",
            Self::HypothesisTwo => "/hypothesis2",
            Self::HypothesisThree => "/hypothesis3",
            Self::Clustering => "/clustering",
            Self::RiskScore => "/risk-score",
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::HypothesisOne => "Hypothesis 1",
            Self::HypothesisTwo => "Hypothesis 2",
            Self::HypothesisThree => "Hypothesis 3",
            Self::Clustering => "Clustering",
            Self::RiskScore => "Risk Score",
        }
    }

    /// One-line summary shown on the home page.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Home => "Overview of the available analyses",
            Self::HypothesisOne => "Systolic BP in patients with and without CVD (Welch's t-test)",
            Self::HypothesisTwo => "Logistic regression against a majority-class baseline",
            Self::HypothesisThree => "Multivariate linear regression predicting systolic BP",
            Self::Clustering => "K-means patient profiles ranked by disease prevalence",
            Self::RiskScore => "Personal risk score from age, weight, BP and cholesterol",
        }
    }

    /// Parse a route path. Accepts the canonical paths plus the
    /// `/hypotheses/{n}` aliases; a trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "" | "/" => Some(Self::Home),
            "/hypothesis1" | "/hypotheses/1" => Some(Self::HypothesisOne),
            "/hypothesis2" | "/hypotheses/2" => Some(Self::HypothesisTwo),
            "/hypothesis3" | "/hypotheses/3" => Some(Self::HypothesisThree),
            "/clustering" => Some(Self::Clustering),
            "/risk-score" => Some(Self::RiskScore),
            _ => None,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).unwrap_or(0)
    }

    /// Route bound to a digit key, if any.
    #[must_use]
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10)
            .and_then(|d| Self::ALL.get(d as usize))
            .copied()
    }

    #[must_use]
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Render the nav bar with `current` highlighted.
pub fn render_nav(f: &mut Frame, area: Rect, current: Route) {
    let titles: Vec<Line> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, route)| {
            Line::from(vec![
                Span::styled(format!("{i} "), MedicalTheme::key_hint()),
                Span::styled(route.title(), MedicalTheme::text_secondary()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(Span::styled(" CardioAnalytics ", MedicalTheme::title()))
                .borders(Borders::BOTTOM)
                .border_style(MedicalTheme::border()),
        )
        .select(current.index())
        .highlight_style(MedicalTheme::selected())
        .divider(Span::styled("│", MedicalTheme::text_muted()));

    f.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_aliases_and_unknown_paths() {
        assert_eq!(Route::from_path("/hypotheses/1"), Some(Route::HypothesisOne));
        assert_eq!(Route::from_path("/hypotheses/3/"), Some(Route::HypothesisThree));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/about"), None);
        assert_eq!(Route::from_path("/hypotheses/4"), None);
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(Route::Home.prev(), Route::RiskScore);
        assert_eq!(Route::RiskScore.next(), Route::Home);
        assert_eq!(Route::HypothesisTwo.next(), Route::HypothesisThree);
    }

    #[test]
    fn test_digit_keys() {
        assert_eq!(Route::from_digit('0'), Some(Route::Home));
        assert_eq!(Route::from_digit('5'), Some(Route::RiskScore));
        assert_eq!(Route::from_digit('6'), None);
        assert_eq!(Route::from_digit('x'), None);
    }
}
