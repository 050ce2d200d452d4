use std::fs;

use crate::cli::commands::InitArgs;

const CONFIG_TOML_TEMPLATE: &str = r##"[planner]
couple = "{couple}"

# --- Vision board ---
# Theme generation talks to the Gemini API; the key is read from the
# environment, never from this file.
#
# [vision]
# model = "gemini-2.5-flash"
# api_key_env = "GEMINI_API_KEY"

# --- UI Customization ---
# Uncomment and edit to override the dashboard colors.
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# green = "#44FF88"
# yellow = "#FFD700"
"##;

/// Create the aisle/ data directory in the current directory.
pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let aisle_dir = cwd.join("aisle");

    if aisle_dir.exists() && !args.force {
        return Err("aisle/ already exists (use --force to reinitialize)".into());
    }

    let couple = match args.couple {
        Some(name) => name,
        None => cwd
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Our Wedding")
            .to_string(),
    };

    fs::create_dir_all(&aisle_dir)?;
    let config = CONFIG_TOML_TEMPLATE.replace("{couple}", &couple);
    fs::write(aisle_dir.join("config.toml"), config)?;

    println!("Initialized planning directory in {}", aisle_dir.display());
    println!("Next: aisle signin \"your name\", then aisle date set YYYY-MM-DD");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::PlannerConfig;

    #[test]
    fn template_parses_after_substitution() {
        let config_text = CONFIG_TOML_TEMPLATE.replace("{couple}", "Sam & Riley");
        let config: PlannerConfig = toml::from_str(&config_text).unwrap();
        assert_eq!(config.planner.couple, "Sam & Riley");
        // Commented sections fall back to defaults
        assert_eq!(config.vision.model, "gemini-2.5-flash");
    }
}
