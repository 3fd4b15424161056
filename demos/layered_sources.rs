// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered sources example for the XML configuration crate.
//!
//! This example demonstrates:
//! - Combining a system-wide and a per-user XML file in one service
//! - Overriding file values with a custom high-priority source
//! - Reloading after a file changed on disk
//!
//! To run this example:
//! ```bash
//! cargo run --example layered_sources
//! ```

use std::collections::HashMap;
use xmlcfg::prelude::*;

/// Fixed overrides, e.g. collected from the command line.
struct Overrides {
    values: HashMap<String, String>,
}

impl ConfigSource for Overrides {
    fn name(&self) -> &str {
        "overrides"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }

    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== XML Configuration: Layered Sources ===\n");

    let dir = std::env::temp_dir().join("xmlcfg-layered-sources");
    std::fs::create_dir_all(&dir)?;
    let system = dir.join("system.xml");
    let user = dir.join("user.xml");

    std::fs::write(
        &system,
        r#"<configuration>
  <log level="info"/>
  <server><port>8080</port><workers>4</workers></server>
</configuration>"#,
    )?;
    std::fs::write(
        &user,
        r#"<configuration>
  <log level="debug"/>
</configuration>"#,
    )?;

    let mut overrides = HashMap::new();
    overrides.insert("server.workers".to_string(), "8".to_string());

    // Both files have priority 1; the one added first wins
    let mut service = DefaultConfigService::builder()
        .with_xml_file(&user)?
        .with_xml_file(&system)?
        .with_source(Box::new(Overrides { values: overrides }))
        .build()?;

    for key in service.all_keys() {
        println!("{:<16} = {}", key.as_str(), service.get(&key)?);
    }

    println!("\n--- Changing system.xml ---");
    std::fs::write(
        &system,
        r#"<configuration>
  <log level="warn"/>
  <server><port>9090</port><workers>2</workers></server>
</configuration>"#,
    )?;
    service.reload()?;

    let port = ConfigKey::from("server.port");
    println!("{} = {}", port, service.get(&port)?.as_u32(port.as_str())?);
    println!(
        "timeout = {}",
        service.get_or_default(&ConfigKey::from("server.timeout"), "30")
    );

    Ok(())
}
