use std::path::Path;

use anyhow::Result;
use lrukit_core::config::Config;

/// Print the effective configuration for `start` as a `.lrukit` document.
pub fn run(start: &Path) -> Result<()> {
    print!("{}", render(&Config::load(start)));
    Ok(())
}

fn render(config: &Config) -> String {
    format!(
        "# effective config (root: {})\n[cache]\ncapacity = {}\n\n[output]\nformat = \"{}\"\n",
        config.root.display(),
        config.capacity,
        config.format,
    )
}
