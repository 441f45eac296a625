//! Weather advisory rules.
//!
//! A single pass over a [`WeatherObservation`] produces the rich advisories;
//! the plain-text list is a projection of that result, never a second set of
//! rules.

use serde::Serialize;

use crate::constants::{
    COLD_MAX_C, HEAT_ALERT_MIN_C, HIGH_WIND_MIN_KPH, HOT_MIN_C, PM25_HIGH_ABOVE,
    PRECIPITATION_KEYWORDS,
};
use crate::models::WeatherObservation;

/// Category an advisory belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Umbrella,
    Snow,
    Sun,
    Heat,
    Wind,
    Uv,
    Aqi,
    Ok,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Umbrella => "umbrella",
            Severity::Snow => "snow",
            Severity::Sun => "sun",
            Severity::Heat => "heat",
            Severity::Wind => "wind",
            Severity::Uv => "uv",
            Severity::Aqi => "aqi",
            Severity::Ok => "ok",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline icon shown beside a tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Umbrella,
    Sun,
    Mask,
    Snow,
    Wind,
    Uv,
}

impl Icon {
    /// Small 20x20 SVG that inherits `currentColor`
    pub fn svg(self) -> &'static str {
        match self {
            Icon::Umbrella => concat!(
                r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" aria-hidden="true">"#,
                r#"<path d="M12 2a10 10 0 00-9.95 8.78" stroke="currentColor" stroke-width="1.6" stroke-linecap="round" stroke-linejoin="round"/>"#,
                r#"<path d="M21.95 10.78A10 10 0 0012 2c-4.41 0-8.16 2.85-9.49 6.78 1.5-.9 3.4-1.28 5.39-1.28 2.15 0 4.17.5 5.6 1.38 1.43-.88 3.46-1.38 5.45-1.38.96 0 1.88.08 2.99.28z" stroke="currentColor" stroke-width="1.4" stroke-linecap="round" stroke-linejoin="round"/>"#,
                r#"<path d="M12 14v6" stroke="currentColor" stroke-width="1.6" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
            ),
            Icon::Sun => concat!(
                r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" aria-hidden="true">"#,
                r#"<circle cx="12" cy="12" r="4" stroke="currentColor" stroke-width="1.6"/>"#,
                r#"<path d="M12 2v2M12 20v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42M2 12h2M20 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42" stroke="currentColor" stroke-width="1.4" stroke-linecap="round"/></svg>"#,
            ),
            Icon::Mask => concat!(
                r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" aria-hidden="true">"#,
                r#"<path d="M20 8c0 4-4 8-8 8s-8-4-8-8" stroke="currentColor" stroke-width="1.6" stroke-linecap="round"/>"#,
                r#"<path d="M4 8v4a4 4 0 004 4h8a4 4 0 004-4V8" stroke="currentColor" stroke-width="1.6" stroke-linecap="round"/></svg>"#,
            ),
            Icon::Snow => concat!(
                r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" aria-hidden="true">"#,
                r#"<path d="M12 2v6M12 16v6M4.5 7.5l5 5M14.5 16.5l5 5M19.5 7.5l-5 5M9.5 16.5l-5 5" stroke="currentColor" stroke-width="1.4" stroke-linecap="round"/></svg>"#,
            ),
            Icon::Wind => concat!(
                r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" aria-hidden="true">"#,
                r#"<path d="M3 10h13a3 3 0 100-6M3 14h11a2 2 0 110 4" stroke="currentColor" stroke-width="1.6" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
            ),
            Icon::Uv => concat!(
                r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg" aria-hidden="true">"#,
                r#"<path d="M12 2v4M12 18v4M4.9 4.9l2.8 2.8M16.3 16.3l2.8 2.8M2 12h4M18 12h4M4.9 19.1l2.8-2.8M16.3 7.7l2.8-2.8" stroke="currentColor" stroke-width="1.4" stroke-linecap="round"/></svg>"#,
            ),
        }
    }
}

/// CSS class that colours a tip's icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleClass {
    TipUmbrella,
    TipSnow,
    TipSun,
    TipUv,
    TipWind,
    TipMask,
}

impl StyleClass {
    pub fn class_name(self) -> &'static str {
        match self {
            StyleClass::TipUmbrella => "tip-umbrella",
            StyleClass::TipSnow => "tip-snow",
            StyleClass::TipSun => "tip-sun",
            StyleClass::TipUv => "tip-uv",
            StyleClass::TipWind => "tip-wind",
            StyleClass::TipMask => "tip-mask",
        }
    }
}

/// One piece of weather-driven guidance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub severity: Severity,
    pub title: &'static str,
    pub body: &'static str,
    pub icon: Icon,
    pub style: StyleClass,
}

impl Advisory {
    const fn new(
        severity: Severity,
        icon: Icon,
        style: StyleClass,
        title: &'static str,
        body: &'static str,
    ) -> Self {
        Self { severity, title, body, icon, style }
    }
}

const UMBRELLA: Advisory = Advisory::new(
    Severity::Umbrella,
    Icon::Umbrella,
    StyleClass::TipUmbrella,
    "Carry an umbrella",
    "Showers expected. Bring an umbrella or a waterproof jacket.",
);
const DRESS_WARMLY: Advisory = Advisory::new(
    Severity::Snow,
    Icon::Snow,
    StyleClass::TipSnow,
    "Dress warmly",
    "It's cold. Layer up and wear warm footwear.",
);
const STAY_HYDRATED: Advisory = Advisory::new(
    Severity::Sun,
    Icon::Sun,
    StyleClass::TipSun,
    "Stay hydrated",
    "Hot day. Drink water frequently and wear breathable clothing.",
);
const HEAT_ALERT: Advisory = Advisory::new(
    Severity::Heat,
    Icon::Sun,
    StyleClass::TipUv,
    "Heat alert",
    "Very hot. Avoid heavy exertion around midday.",
);
const HIGH_WINDS: Advisory = Advisory::new(
    Severity::Wind,
    Icon::Wind,
    StyleClass::TipWind,
    "High winds",
    "Strong winds. Secure loose items and avoid open areas.",
);
const UV_EXTREME: Advisory = Advisory::new(
    Severity::Uv,
    Icon::Uv,
    StyleClass::TipUv,
    "Extreme UV",
    "Extreme UV. Stay indoors during midday and use SPF50+.",
);
const UV_VERY_HIGH: Advisory = Advisory::new(
    Severity::Uv,
    Icon::Uv,
    StyleClass::TipUv,
    "Very high UV",
    "Very high UV. Wear SPF30+, hat and sunglasses.",
);
const UV_HIGH: Advisory = Advisory::new(
    Severity::Uv,
    Icon::Uv,
    StyleClass::TipUv,
    "High UV",
    "High UV. Apply sunscreen and protective clothing.",
);
const AIR_VERY_UNHEALTHY: Advisory = Advisory::new(
    Severity::Aqi,
    Icon::Mask,
    StyleClass::TipMask,
    "Very unhealthy air",
    "Avoid outdoor activities and consider using an air purifier.",
);
const AIR_UNHEALTHY: Advisory = Advisory::new(
    Severity::Aqi,
    Icon::Mask,
    StyleClass::TipMask,
    "Unhealthy air",
    "Limit prolonged or heavy outdoor exertion.",
);
const AIR_SENSITIVE: Advisory = Advisory::new(
    Severity::Aqi,
    Icon::Mask,
    StyleClass::TipMask,
    "Sensitive groups caution",
    "Sensitive people should reduce heavy outdoor exertion.",
);
const PM25_HIGH: Advisory = Advisory::new(
    Severity::Aqi,
    Icon::Mask,
    StyleClass::TipMask,
    "High PM2.5",
    "PM2.5 levels elevated. Consider limiting outdoor time.",
);
const ALL_CLEAR: Advisory = Advisory::new(
    Severity::Ok,
    Icon::Sun,
    StyleClass::TipSun,
    "All clear",
    "Conditions look normal. Check hourly updates if you plan to be outdoors.",
);

/// Observation with the condition text lower-cased once up front.
struct Conditions<'a> {
    text: String,
    obs: &'a WeatherObservation,
}

impl Conditions<'_> {
    fn mentions(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    fn temperature_at_least(&self, threshold: f64) -> bool {
        self.obs.temperature_c.is_some_and(|t| t >= threshold)
    }
}

type Rule = fn(&Conditions<'_>) -> Option<Advisory>;

/// Evaluation order is display order.
const RULES: [Rule; 7] = [
    precipitation,
    cold,
    heat,
    heat_alert,
    wind,
    uv_ladder,
    air_quality_ladder,
];

fn precipitation(c: &Conditions<'_>) -> Option<Advisory> {
    PRECIPITATION_KEYWORDS
        .iter()
        .any(|keyword| c.mentions(keyword))
        .then_some(UMBRELLA)
}

fn cold(c: &Conditions<'_>) -> Option<Advisory> {
    let freezing = c.obs.temperature_c.is_some_and(|t| t <= COLD_MAX_C);
    (c.mentions("snow") || freezing).then_some(DRESS_WARMLY)
}

fn heat(c: &Conditions<'_>) -> Option<Advisory> {
    c.temperature_at_least(HOT_MIN_C).then_some(STAY_HYDRATED)
}

fn heat_alert(c: &Conditions<'_>) -> Option<Advisory> {
    c.temperature_at_least(HEAT_ALERT_MIN_C).then_some(HEAT_ALERT)
}

fn wind(c: &Conditions<'_>) -> Option<Advisory> {
    c.obs
        .wind_kph
        .is_some_and(|w| w >= HIGH_WIND_MIN_KPH)
        .then_some(HIGH_WINDS)
}

fn uv_ladder(c: &Conditions<'_>) -> Option<Advisory> {
    match c.obs.uv_index? {
        uv if uv >= 11.0 => Some(UV_EXTREME),
        uv if uv >= 8.0 => Some(UV_VERY_HIGH),
        uv if uv >= 6.0 => Some(UV_HIGH),
        _ => None,
    }
}

fn air_quality_ladder(c: &Conditions<'_>) -> Option<Advisory> {
    let aq = c.obs.air_quality?;
    match aq.us_epa_index {
        Some(epa) if epa >= 5.0 => Some(AIR_VERY_UNHEALTHY),
        Some(epa) if epa == 4.0 => Some(AIR_UNHEALTHY),
        Some(epa) if epa == 3.0 => Some(AIR_SENSITIVE),
        // A present EPA index suppresses the PM2.5 fallback even when it is low.
        Some(_) => None,
        None => aq
            .pm2_5
            .is_some_and(|pm| pm > PM25_HIGH_ABOVE)
            .then_some(PM25_HIGH),
    }
}

/// Classifies one observation into display-ordered advisories.
///
/// Never empty: when no rule fires the result is a single [`Severity::Ok`]
/// advisory.
pub fn evaluate(obs: &WeatherObservation) -> Vec<Advisory> {
    let conditions = Conditions {
        text: obs.condition_text.to_lowercase(),
        obs,
    };

    let mut advisories: Vec<Advisory> = RULES
        .iter()
        .filter_map(|rule| rule(&conditions))
        .collect();
    if advisories.is_empty() {
        advisories.push(ALL_CLEAR);
    }
    advisories
}

/// Like [`evaluate`], but a missing observation yields nothing to show.
pub fn evaluate_current(obs: Option<&WeatherObservation>) -> Vec<Advisory> {
    obs.map(evaluate).unwrap_or_default()
}

/// Plain-text view of an advisory list, same order.
pub fn plain_tips(advisories: &[Advisory]) -> Vec<&'static str> {
    advisories.iter().map(|a| a.body).collect()
}
