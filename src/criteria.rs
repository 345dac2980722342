//! Search criteria: component categories, extra constraints, and the
//! per-site search URL templates the parsers depend on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reloading/ammunition component categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Component {
    #[default]
    Bullets,
    Brass,
    Primers,
    Powder,
    LoadedAmmo,
}

impl Component {
    /// Returns all component categories.
    pub fn all() -> &'static [Component] {
        &[
            Component::Bullets,
            Component::Brass,
            Component::Primers,
            Component::Powder,
            Component::LoadedAmmo,
        ]
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Bullets => "bullets",
            Component::Brass => "brass",
            Component::Primers => "primers",
            Component::Powder => "powder",
            Component::LoadedAmmo => "loaded-ammo",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Component {
    type Err = ComponentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bullets" | "bullet" => Ok(Component::Bullets),
            "brass" => Ok(Component::Brass),
            "primers" | "primer" => Ok(Component::Primers),
            "powder" => Ok(Component::Powder),
            "loaded-ammo" | "ammo" | "loaded" => Ok(Component::LoadedAmmo),
            _ => Err(ComponentParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComponentParseError(String);

impl fmt::Display for ComponentParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown component '{}'. Valid components: bullets, brass, primers, powder, loaded-ammo",
            self.0
        )
    }
}

impl std::error::Error for ComponentParseError {}

/// Brass condition constraint, mapped to an AmmoSeek query flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BrassCondition {
    #[default]
    Unprocessed,
    New,
    OnceFired,
}

impl BrassCondition {
    /// Query-string fragment appended to the brass search URL.
    /// Unprocessed adds no constraint.
    pub fn query_fragment(&self) -> &'static str {
        match self {
            BrassCondition::Unprocessed => "",
            BrassCondition::New => "&condition=new",
            BrassCondition::OnceFired => "&condition=oncefired",
        }
    }
}

impl fmt::Display for BrassCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BrassCondition::Unprocessed => "unprocessed",
            BrassCondition::New => "new",
            BrassCondition::OnceFired => "once-fired",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for BrassCondition {
    type Err = ComponentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unprocessed" => Ok(BrassCondition::Unprocessed),
            "new" => Ok(BrassCondition::New),
            "once-fired" | "oncefired" | "once_fired" => Ok(BrassCondition::OnceFired),
            _ => Err(ComponentParseError(s.to_string())),
        }
    }
}

/// Immutable search criteria for one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Component category being shopped for.
    pub component: Component,
    /// Free text or enumerated token ("9mm", "Small Pistol", "Varget").
    pub search_value: String,
    /// Minimum bullet grain (Bullets only).
    pub min_grain: Option<u32>,
    /// Brass condition (Brass only).
    pub condition: Option<BrassCondition>,
}

impl SearchCriteria {
    /// Creates criteria with no extra constraints.
    pub fn new(component: Component, search_value: impl Into<String>) -> Self {
        Self { component, search_value: search_value.into(), min_grain: None, condition: None }
    }

    /// Builds the AmmoSeek search URL for these criteria.
    pub fn ammoseek_url(&self) -> String {
        let q = urlencoding::encode(&self.search_value);
        match self.component {
            Component::Powder => format!("https://ammoseek.com/reloading/powder?k={}", q),
            Component::Primers => {
                let slug = self.search_value.to_lowercase().replace(' ', "-");
                format!(
                    "https://ammoseek.com/reloading/primers?type={}",
                    urlencoding::encode(&slug)
                )
            }
            Component::Bullets => {
                format!("https://ammoseek.com/reloading/bullets?caliber={}{}", q, self.grain_fragment())
            }
            Component::Brass => {
                format!("https://ammoseek.com/reloading/brass?caliber={}{}", q, self.condition_fragment())
            }
            Component::LoadedAmmo => format!("https://ammoseek.com/ammo/{}", q),
        }
    }

    /// Builds the Gun.Deals search URL for these criteria.
    pub fn gundeals_url(&self) -> String {
        format!(
            "https://gun.deals/search/apachesolr_search/{}",
            urlencoding::encode(&self.search_value)
        )
    }

    fn grain_fragment(&self) -> String {
        match self.min_grain {
            Some(grain) => format!("&grains={}-1000", grain),
            None => String::new(),
        }
    }

    fn condition_fragment(&self) -> &'static str {
        self.condition.map(|c| c.query_fragment()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_parsing() {
        assert_eq!(Component::from_str("bullets").unwrap(), Component::Bullets);
        assert_eq!(Component::from_str("Bullet").unwrap(), Component::Bullets);
        assert_eq!(Component::from_str("brass").unwrap(), Component::Brass);
        assert_eq!(Component::from_str("primers").unwrap(), Component::Primers);
        assert_eq!(Component::from_str("PRIMER").unwrap(), Component::Primers);
        assert_eq!(Component::from_str("powder").unwrap(), Component::Powder);
        assert_eq!(Component::from_str("loaded-ammo").unwrap(), Component::LoadedAmmo);
        assert_eq!(Component::from_str("ammo").unwrap(), Component::LoadedAmmo);

        assert!(Component::from_str("shells").is_err());
        assert!(Component::from_str("").is_err());
    }

    #[test]
    fn test_component_display() {
        assert_eq!(Component::Bullets.to_string(), "bullets");
        assert_eq!(Component::LoadedAmmo.to_string(), "loaded-ammo");
    }

    #[test]
    fn test_component_parse_error_display() {
        let err = Component::from_str("shells").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("shells"));
        assert!(msg.contains("Valid components"));
    }

    #[test]
    fn test_component_all() {
        assert_eq!(Component::all().len(), 5);
    }

    #[test]
    fn test_component_serde() {
        let json = serde_json::to_string(&Component::LoadedAmmo).unwrap();
        assert_eq!(json, "\"loaded-ammo\"");

        let parsed: Component = serde_json::from_str("\"primers\"").unwrap();
        assert_eq!(parsed, Component::Primers);
    }

    #[test]
    fn test_brass_condition_parsing() {
        assert_eq!(BrassCondition::from_str("new").unwrap(), BrassCondition::New);
        assert_eq!(BrassCondition::from_str("once-fired").unwrap(), BrassCondition::OnceFired);
        assert_eq!(BrassCondition::from_str("oncefired").unwrap(), BrassCondition::OnceFired);
        assert_eq!(BrassCondition::from_str("unprocessed").unwrap(), BrassCondition::Unprocessed);
        assert!(BrassCondition::from_str("mint").is_err());
    }

    #[test]
    fn test_brass_condition_query_fragment() {
        assert_eq!(BrassCondition::New.query_fragment(), "&condition=new");
        assert_eq!(BrassCondition::OnceFired.query_fragment(), "&condition=oncefired");
        assert_eq!(BrassCondition::Unprocessed.query_fragment(), "");
    }

    #[test]
    fn test_ammoseek_url_powder() {
        let criteria = SearchCriteria::new(Component::Powder, "Varget");
        assert_eq!(criteria.ammoseek_url(), "https://ammoseek.com/reloading/powder?k=Varget");
    }

    #[test]
    fn test_ammoseek_url_primers_slug() {
        let criteria = SearchCriteria::new(Component::Primers, "Small Pistol");
        assert_eq!(
            criteria.ammoseek_url(),
            "https://ammoseek.com/reloading/primers?type=small-pistol"
        );
    }

    #[test]
    fn test_ammoseek_url_bullets_with_grain() {
        let mut criteria = SearchCriteria::new(Component::Bullets, "9mm");
        criteria.min_grain = Some(115);
        assert_eq!(
            criteria.ammoseek_url(),
            "https://ammoseek.com/reloading/bullets?caliber=9mm&grains=115-1000"
        );
    }

    #[test]
    fn test_ammoseek_url_bullets_no_grain() {
        let criteria = SearchCriteria::new(Component::Bullets, "9mm");
        assert_eq!(criteria.ammoseek_url(), "https://ammoseek.com/reloading/bullets?caliber=9mm");
    }

    #[test]
    fn test_ammoseek_url_brass_condition() {
        let mut criteria = SearchCriteria::new(Component::Brass, ".308-win");
        criteria.condition = Some(BrassCondition::OnceFired);
        assert_eq!(
            criteria.ammoseek_url(),
            "https://ammoseek.com/reloading/brass?caliber=.308-win&condition=oncefired"
        );

        criteria.condition = Some(BrassCondition::Unprocessed);
        assert_eq!(
            criteria.ammoseek_url(),
            "https://ammoseek.com/reloading/brass?caliber=.308-win"
        );
    }

    #[test]
    fn test_ammoseek_url_loaded_ammo() {
        let criteria = SearchCriteria::new(Component::LoadedAmmo, "5.56x45mm-nato");
        assert_eq!(criteria.ammoseek_url(), "https://ammoseek.com/ammo/5.56x45mm-nato");
    }

    #[test]
    fn test_gundeals_url_encoding() {
        let criteria = SearchCriteria::new(Component::LoadedAmmo, "9mm luger");
        assert_eq!(
            criteria.gundeals_url(),
            "https://gun.deals/search/apachesolr_search/9mm%20luger"
        );
    }
}
