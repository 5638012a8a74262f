use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConvertError;
use super::types::Anchor;

/// Placeholder replaced by the icon name in [`ConvertOptions::icon_template`]
pub const ICON_PLACEHOLDER: &str = "%icon%";

/// Anchor table key matching every icon without its own entry
pub const WILDCARD_ICON: &str = "*";

/// Raw anchor offset as written by the user, before rounding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorOffset {
    pub x: f64,
    pub y: f64,
}

/// Per-icon anchor overrides with a `*` fallback entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconAnchors(IndexMap<String, AnchorOffset>);

impl IconAnchors {
    /// Parse a JSON object like `{"*": {"x": 8, "y": 8}, "house": {"x": 16, "y": 32}}`
    pub fn from_json(text: &str) -> Result<Self, ConvertError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let anchors: IconAnchors =
            serde_json::from_str(text).map_err(|e| ConvertError::IconAnchors(e.to_string()))?;
        anchors.validate()?;
        Ok(anchors)
    }

    pub fn insert(&mut self, icon: impl Into<String>, x: f64, y: f64) {
        self.0.insert(icon.into(), AnchorOffset { x, y });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every offset must be a finite number
    pub fn validate(&self) -> Result<(), ConvertError> {
        for (icon, offset) in &self.0 {
            if !offset.x.is_finite() || !offset.y.is_finite() {
                return Err(ConvertError::IconAnchors(format!(
                    "anchor for '{}' is not a finite offset",
                    icon
                )));
            }
        }
        Ok(())
    }

    /// Exact icon entry, else the wildcard entry, rounded to whole pixels
    pub fn lookup(&self, icon: &str) -> Option<Anchor> {
        self.0
            .get(icon)
            .or_else(|| self.0.get(WILDCARD_ICON))
            .map(|offset| Anchor {
                x: offset.x.round() as i64,
                y: offset.y.round() as i64,
            })
    }
}

/// Options for a conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConvertOptions {
    /// Only keep markers of this world; empty or unset keeps all
    pub world: Option<String>,
    /// Set names dropped from the output
    pub excluded_sets: Vec<String>,
    /// Icon path template containing `%icon%`
    pub icon_template: String,
    pub icon_anchors: IconAnchors,
    /// Append " (<marker name>)" to every label
    pub append_marker_name: bool,
    /// Warn about points farther than this from the origin on any axis
    pub warn_distance: Option<f64>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            world: None,
            excluded_sets: Vec::new(),
            icon_template: ICON_PLACEHOLDER.to_string(),
            icon_anchors: IconAnchors::default(),
            append_marker_name: false,
            warn_distance: None,
        }
    }
}

impl ConvertOptions {
    /// Load options from a TOML file
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let options: ConvertOptions = toml::from_str(&content)?;
        log::info!("Options loaded from: {}", path.display());
        Ok(options)
    }

    /// Checks run before any input is touched
    pub fn validate(&self) -> Result<(), ConvertError> {
        self.icon_anchors.validate()
    }

    pub fn is_matching_world(&self, world: Option<&str>) -> bool {
        match self.world.as_deref() {
            Some(filter) if !filter.is_empty() => world == Some(filter),
            _ => true,
        }
    }

    pub fn is_set_included(&self, set_name: &str) -> bool {
        !self.excluded_sets.iter().any(|name| name == set_name)
    }

    /// Map an icon name through the icon template
    pub fn convert_icon(&self, icon: &str) -> String {
        self.icon_template.replacen(ICON_PLACEHOLDER, icon, 1)
    }

    pub fn icon_anchor(&self, icon: &str) -> Option<Anchor> {
        self.icon_anchors.lookup(icon)
    }

    /// Distance warning threshold, only when it is a finite number
    pub fn distance_threshold(&self) -> Option<f64> {
        self.warn_distance.filter(|d| d.is_finite())
    }
}

/// Split newline-separated set names, trimming and dropping blank lines
pub fn parse_excluded_sets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.icon_template, "%icon%");
        assert!(opts.world.is_none());
        assert!(opts.is_matching_world(Some("world_nether")));
        assert!(opts.is_matching_world(None));
        assert_eq!(opts.distance_threshold(), None);
    }

    #[test]
    fn test_world_filter() {
        let opts = ConvertOptions {
            world: Some("world".to_string()),
            ..Default::default()
        };
        assert!(opts.is_matching_world(Some("world")));
        assert!(!opts.is_matching_world(Some("world_nether")));
        assert!(!opts.is_matching_world(None));
    }

    #[test]
    fn test_empty_world_filter_passes_all() {
        let opts = ConvertOptions {
            world: Some(String::new()),
            ..Default::default()
        };
        assert!(opts.is_matching_world(Some("anything")));
    }

    #[test]
    fn test_excluded_sets_exact_match() {
        let opts = ConvertOptions {
            excluded_sets: vec!["markers".to_string()],
            ..Default::default()
        };
        assert!(!opts.is_set_included("markers"));
        assert!(opts.is_set_included("Markers"));
        assert!(opts.is_set_included("markers2"));
    }

    #[test]
    fn test_parse_excluded_sets() {
        assert_eq!(
            parse_excluded_sets("  markers \n\n   \nshops\r\n"),
            vec!["markers".to_string(), "shops".to_string()]
        );
        assert!(parse_excluded_sets("").is_empty());
    }

    #[test]
    fn test_convert_icon_template() {
        let opts = ConvertOptions {
            icon_template: "icons/%icon%.png".to_string(),
            ..Default::default()
        };
        assert_eq!(opts.convert_icon("house"), "icons/house.png");
    }

    #[test]
    fn test_convert_icon_replaces_first_placeholder_only() {
        let opts = ConvertOptions {
            icon_template: "%icon%/%icon%.png".to_string(),
            ..Default::default()
        };
        assert_eq!(opts.convert_icon("x"), "x/%icon%.png");
    }

    #[test]
    fn test_anchor_lookup_exact_then_wildcard() {
        let mut anchors = IconAnchors::default();
        anchors.insert("house", 16.4, 31.6);
        anchors.insert("*", 8.0, 8.0);

        assert_eq!(anchors.lookup("house"), Some(Anchor { x: 16, y: 32 }));
        assert_eq!(anchors.lookup("tree"), Some(Anchor { x: 8, y: 8 }));
    }

    #[test]
    fn test_anchor_lookup_without_wildcard() {
        let mut anchors = IconAnchors::default();
        anchors.insert("house", 1.0, 2.0);
        assert_eq!(anchors.lookup("tree"), None);
    }

    #[test]
    fn test_anchors_from_json() {
        let anchors = IconAnchors::from_json(r#"{"*": {"x": 8, "y": 8.5}}"#).unwrap();
        assert_eq!(anchors.lookup("any"), Some(Anchor { x: 8, y: 9 }));
        assert!(IconAnchors::from_json("   ").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_anchors_rejected() {
        assert!(matches!(
            IconAnchors::from_json(r#"{"*": {"x": "left"}}"#),
            Err(ConvertError::IconAnchors(_))
        ));
        assert!(matches!(
            IconAnchors::from_json("[1, 2]"),
            Err(ConvertError::IconAnchors(_))
        ));
    }

    #[test]
    fn test_non_finite_anchor_fails_validation() {
        let mut anchors = IconAnchors::default();
        anchors.insert("house", f64::NAN, 0.0);
        let opts = ConvertOptions {
            icon_anchors: anchors,
            ..Default::default()
        };
        assert!(matches!(opts.validate(), Err(ConvertError::IconAnchors(_))));
    }

    #[test]
    fn test_distance_threshold_requires_finite() {
        let mut opts = ConvertOptions {
            warn_distance: Some(f64::INFINITY),
            ..Default::default()
        };
        assert_eq!(opts.distance_threshold(), None);
        opts.warn_distance = Some(10_000.0);
        assert_eq!(opts.distance_threshold(), Some(10_000.0));
    }

    #[test]
    fn test_options_from_toml() {
        let opts: ConvertOptions = toml::from_str(
            r#"
world = "world"
excluded-sets = ["markers"]
icon-template = "assets/%icon%.png"
append-marker-name = true
warn-distance = 30000

[icon-anchors]
"*" = { x = 8, y = 8 }
"#,
        )
        .unwrap();

        assert_eq!(opts.world.as_deref(), Some("world"));
        assert_eq!(opts.excluded_sets, vec!["markers".to_string()]);
        assert!(opts.append_marker_name);
        assert_eq!(opts.distance_threshold(), Some(30000.0));
        assert_eq!(opts.icon_anchor("house"), Some(Anchor { x: 8, y: 8 }));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let opts: ConvertOptions = toml::from_str("world = \"survival\"\n").unwrap();
        assert_eq!(opts.icon_template, "%icon%");
        assert!(opts.icon_anchors.is_empty());
        assert!(!opts.append_marker_name);
    }
}
