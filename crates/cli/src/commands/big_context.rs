//! `clawbridge big-context` — print the replacement prompt.

use clawbridge_assembler::PromptAssembler;
use clawbridge_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let assembler = PromptAssembler::new(config.prompt);
    print!("{}", assembler.reset_for_big_context());
    Ok(())
}
