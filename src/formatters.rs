use crate::advisory::Advisory;
use crate::models::CurrentWeatherResponse;

/// Escapes text for safe interpolation into HTML.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders rich advisories as tip rows with icon, title, severity pill and body
pub fn render_tips_html(advisories: &[Advisory]) -> String {
    advisories
        .iter()
        .map(|tip| {
            format!(
                concat!(
                    r#"<div class="tip-row" role="listitem">"#,
                    r#"<div class="tip-icon {}" aria-hidden="true">{}</div>"#,
                    r#"<div class="tip-text">"#,
                    r#"<div class="tip-title">{}<span class="tip-pill">{}</span></div>"#,
                    r#"<div class="tip-desc">{}</div>"#,
                    "</div></div>"
                ),
                escape_html(tip.style.class_name()),
                tip.icon.svg(),
                escape_html(tip.title),
                escape_html(&tip.severity.as_str().to_uppercase()),
                escape_html(tip.body),
            )
        })
        .collect()
}

/// Renders the plain-text tips as a minimal list
pub fn render_plain_tips_html(tips: &[&str]) -> String {
    let items: String = tips
        .iter()
        .map(|tip| format!("<li>{}</li>", escape_html(tip)))
        .collect();
    format!(r#"<h4>Quick tips</h4><ul class="tips-list">{}</ul>"#, items)
}

/// Formats advisories into a human-readable string
pub fn format_tips_text(city: &str, advisories: &[Advisory]) -> String {
    let mut output = format!("Weather tips for {}:\n\n", city);
    for (i, tip) in advisories.iter().enumerate() {
        output.push_str(&format!(
            "{}. [{}] {}\n   {}\n",
            i + 1,
            tip.severity.as_str().to_uppercase(),
            tip.title,
            tip.body
        ));
    }
    output
}

/// Formats the current-conditions summary into a human-readable string
pub fn format_current_weather(response: &CurrentWeatherResponse) -> String {
    let mut output = String::new();
    if let Some(location) = &response.location {
        output.push_str(&format!("{}, {}\n", location.name, location.country));
    }

    let Some(current) = &response.current else {
        output.push_str("No current conditions available.\n");
        return output;
    };

    if let Some(condition) = &current.condition {
        output.push_str(&format!("Conditions: {}\n", condition.text));
        if let Some(icon) = &condition.icon {
            output.push_str(&format!("Icon: https:{}\n", icon));
        }
    }
    output.push_str(&format!("Temperature: {}\n", reading(current.temp_c, "\u{00b0}C")));
    output.push_str(&format!("Humidity: {}\n", reading(current.humidity, "%")));
    output.push_str(&format!("Wind Speed: {}\n", reading(current.wind_kph, " km/h")));
    output
}

fn reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{}", v, unit),
        None => "n/a".to_string(),
    }
}

// ============================================================================
// Tips Panel
// ============================================================================

/// Which anchors exist on the host page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub has_advice_panel: bool,
    pub has_forecast_area: bool,
}

/// Where the tips container is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    AfterAdvicePanel,
    InForecastArea,
    Body,
}

impl Placement {
    pub fn choose(layout: PageLayout) -> Self {
        if layout.has_advice_panel {
            Placement::AfterAdvicePanel
        } else if layout.has_forecast_area {
            Placement::InForecastArea
        } else {
            Placement::Body
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Mounted {
    placement: Placement,
    html: String,
}

/// Container for rendered tips. Created on the first non-empty render and
/// reused afterwards; its placement is fixed at creation.
#[derive(Debug, Default)]
pub struct TipsPanel {
    mounted: Option<Mounted>,
}

impl TipsPanel {
    pub const ID: &'static str = "weatherTipsPanel";
    pub const CLASS: &'static str = "tips-panel";

    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `advisories` into the panel. An empty slice leaves it untouched.
    pub fn render(&mut self, layout: PageLayout, advisories: &[Advisory]) -> Option<&str> {
        if advisories.is_empty() {
            return self.html();
        }

        let html = render_tips_html(advisories);
        match &mut self.mounted {
            Some(mounted) => mounted.html = html,
            None => {
                let placement = Placement::choose(layout);
                tracing::debug!(?placement, "Creating tips panel");
                self.mounted = Some(Mounted { placement, html });
            }
        }
        self.html()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.mounted.as_ref().map(|m| m.placement)
    }

    pub fn html(&self) -> Option<&str> {
        self.mounted.as_ref().map(|m| m.html.as_str())
    }

    /// The container element with its current contents
    pub fn outer_html(&self) -> Option<String> {
        self.html().map(|inner| {
            format!(
                r#"<div id="{}" class="{}" role="list">{}</div>"#,
                Self::ID,
                Self::CLASS,
                inner
            )
        })
    }
}
