// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the XML configuration crate.
//!
//! This example demonstrates:
//! - Loading a configuration from an XML document
//! - Reading elements, nested elements, attributes and lists
//! - Adding, replacing and clearing properties
//! - Saving the result to a file and loading it back
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use xmlcfg::prelude::*;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<configuration>
  <server host="localhost" port="8080"/>
  <database>
    <url>postgres://${server[@host]}/app</url>
    <pool>
      <size>16</size>
    </pool>
  </database>
  <features>
    <feature>search</feature>
    <feature>export</feature>
  </features>
  <debug>yes</debug>
</configuration>
"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== XML Configuration: Basic Usage ===\n");

    let mut config: XmlConfiguration = DOCUMENT.parse()?;

    println!("--- Reading values ---");
    println!("server[@host]        = {:?}", config.get_string("server[@host]"));
    println!("server[@port]        = {}", config.get_u32("server[@port]")?);
    println!("database.url         = {:?}", config.get_string("database.url"));
    println!("database.pool.size   = {}", config.get_i32("database.pool.size")?);
    println!("debug                = {}", config.get_bool("debug")?);
    println!("features.feature     = {:?}", config.get_list("features.feature"));

    println!("\n--- Changing values ---");
    config.add_property("features.feature", "audit");
    config.set_property("server[@port]", "9090");
    config.add_property("server[@alias]", "primary, main");
    config.clear_property("debug");

    println!("features.feature     = {:?}", config.get_list("features.feature"));
    println!("server[@port]        = {}", config.get_u32("server[@port]")?);
    println!("server[@alias]       = {:?}", config.get_list("server[@alias]"));
    println!("debug present        = {}", config.contains_key("debug"));

    println!("\n--- Keys ---");
    for key in config.get_keys() {
        println!("  {}", key);
    }

    println!("\n--- Saving ---");
    let dir = std::env::temp_dir().join("xmlcfg-basic-usage");
    std::fs::create_dir_all(&dir)?;
    config.set_base_path(&dir);
    config.set_file_name("config.xml");
    config.save()?;

    if let Some(file) = config.file() {
        println!("Saved to {}", file.display());
        let copy = XmlConfiguration::from_file(&file)?;
        println!("Reloaded {} keys", copy.get_keys().len());
    }

    println!("\n{}", config.to_xml_string()?);
    Ok(())
}
