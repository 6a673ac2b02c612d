//! The `drillbag init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("drillbag.toml").exists() {
        println!("drillbag.toml already exists, skipping.");
    } else {
        std::fs::write("drillbag.toml", SAMPLE_CONFIG)?;
        println!("Created drillbag.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: drillbag practice --pool algebra.mixed@easy --mock");
    println!("  2. Edit drillbag.toml to point [source] at your item service");
    println!("     and export DRILLBAG_API_KEY");
    println!("  3. Run: drillbag check --probe <skill>@<difficulty>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# drillbag configuration

# The built-in mock source works offline. To practice against a real
# item service, replace this section with the remote block below.
[source]
type = "mock"

# [source]
# type = "remote"
# base_url = "https://items.example.com"
# api_key = "${DRILLBAG_API_KEY}"
# timeout_secs = 30

[sampler]
max_attempts = 10

# Size hints are advisory. A pool with a hint resets its bag as soon as
# every distinct item has been seen; a pool without one resets only
# after a cycle of duplicates.
[[pool_hints]]
skill = "quad.graph.vertex"
difficulty = "easy"
size = 12

[[pool_hints]]
skill = "lin.solve"
difficulty = "medium"
size = 20
"#;
