//! The `mnemo init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mnemo.toml").exists() {
        println!("mnemo.toml already exists, skipping.");
    } else {
        std::fs::write("mnemo.toml", SAMPLE_CONFIG)?;
        println!("Created mnemo.toml");
    }

    std::fs::create_dir_all("item-sets")?;
    let example_path = std::path::Path::new("item-sets/example.toml");
    if example_path.exists() {
        println!("item-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ITEM_SET)?;
        println!("Created item-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: mnemo validate --item-set item-sets/example.toml");
    println!("  2. Run: mnemo run --difficulty easy");
    println!("  3. Run: mnemo history");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mnemo configuration

default_difficulty = "medium"
data_dir = "./mnemo-data"
# seed = 42
regression_threshold = 5.0

[scoring]
difficulty_weighting = false
"#;

const EXAMPLE_ITEM_SET: &str = r#"[item_set]
id = "example"
name = "Example Item Set"
description = "A few hand-written items to get started"
default_difficulty = "easy"
default_time_limit_secs = 12

[[items]]
id = "wm-1"
category = "working_memory"
kind = "sequence"
prompt = "Enter the numbers in reverse order, separated by commas"
stimulus = ["4", "9", "1", "6"]
expected = { sequence = ["6", "1", "9", "4"] }

[[items]]
id = "st-1"
category = "short_term_memory"
kind = "word_recall"
prompt = "What was the second word?"
stimulus = ["river", "lamp", "orange", "chair"]
options = ["river", "lamp", "orange", "chair", "cloud"]
expected = { exact = "lamp" }

[[items]]
id = "ps-1"
category = "processing_speed"
kind = "math"
prompt = "What is 7 + 8?"
expected = { exact = "15" }
time_limit_secs = 6

[[items]]
id = "vm-1"
category = "visual_memory"
kind = "pattern"
prompt = "What comes next: circle, square, circle, square, ?"
options = ["circle", "square", "triangle"]
expected = { exact = "circle" }

[[items]]
id = "at-1"
category = "attention"
kind = "odd_one_out"
prompt = "Find the odd one out: apple, pear, hammer, plum"
options = ["apple", "pear", "hammer", "plum"]
expected = { any_of = ["hammer", "Hammer"] }
"#;
