use serde::{Deserialize, Serialize};

/// One color in a theme's palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    /// Common name, e.g. "Dusty Rose"
    pub name: String,
    /// Hex code, e.g. "#D8A7B1"
    pub hex: String,
}

/// A generated wedding theme idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeIdea {
    /// Assigned by the collection on save; generator responses omit it.
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "themeName")]
    pub theme_name: String,
    pub description: String,
    #[serde(rename = "colorPalette", default)]
    pub color_palette: Vec<PaletteColor>,
}

impl ThemeIdea {
    pub fn is_valid(&self) -> bool {
        !self.theme_name.trim().is_empty()
    }
}

impl crate::sync::Record for ThemeIdea {
    fn id(&self) -> u64 {
        self.id
    }
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// The vision board starts empty until a generation run fills it.
pub fn default_themes() -> Vec<ThemeIdea> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_generator_shape() {
        let json = r##"{
            "themeName": "Autumn Barn",
            "description": "Cozy and rustic.",
            "colorPalette": [{"name": "Burnt Orange", "hex": "#CC5500"}]
        }"##;
        let theme: ThemeIdea = serde_json::from_str(json).unwrap();
        assert_eq!(theme.id, 0);
        assert_eq!(theme.theme_name, "Autumn Barn");
        assert_eq!(theme.color_palette.len(), 1);
        assert!(theme.is_valid());
    }
}
