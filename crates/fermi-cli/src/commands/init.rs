//! The `fermi init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("fermi.toml").exists() {
        println!("fermi.toml already exists, skipping.");
    } else {
        std::fs::write("fermi.toml", SAMPLE_CONFIG)?;
        println!("Created fermi.toml");
    }

    std::fs::create_dir_all("question-banks")?;
    let bank_path = std::path::Path::new("question-banks/sample.json");
    if bank_path.exists() {
        println!("question-banks/sample.json already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_BANK)?;
        println!("Created question-banks/sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to question-banks/sample.json");
    println!("  2. Run: fermi validate");
    println!("  3. Run: fermi play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# fermi configuration

shuffle = true
max_retries = 2
retry_delay_ms = 500
timeout_secs = 10
# limit = 10

[source]
type = "file"
path = "question-banks/sample.json"

# To load a remote bank instead:
# [source]
# type = "http"
# url = "${FERMI_BANK_URL}"
# format = "auto"
"#;

const SAMPLE_BANK: &str = r#"{
  "Warm-up": [
    { "question": "How many seconds are there in a year?", "answer": 7 },
    { "question": "How many people live on Earth?", "answer": 10 },
    { "question": "How many hairs are on a human head?", "answer": 5 }
  ],
  "Classics": [
    { "question": "How many piano tuners work in Chicago?", "answer": 2 },
    { "question": "How many times does a heart beat in a lifetime?", "answer": 9 }
  ]
}
"#;
