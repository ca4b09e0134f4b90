//! `clawbridge config` — Configuration management commands.

use clawbridge_config::AppConfig;

pub fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if config.prompt.max_context_messages == 1 {
                warnings.push(
                    "max_context_messages = 1 keeps only the newest message (or the system message)",
                );
            }

            if config.prompt.max_context_messages > 500 {
                warnings.push("max_context_messages is very large; trimming will rarely fire");
            }

            if config.prompt.big_context_prompt.len() > 4096 {
                warnings.push("big_context_prompt is unusually long for a condensed directive");
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Log level:         {}", config.log_level);
            println!(
                "   Disable artifacts: {}",
                config.prompt.disable_artifacts
            );
            println!(
                "   History cap:       {}",
                config.prompt.max_context_messages
            );
            println!(
                "   Big-context text:  {} chars",
                config.prompt.big_context_prompt.len()
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}
