use std::env;
use std::fs;

/// Variables que `config.rs` lee con `option_env!`
const CONFIG_VARS: [&str; 5] = [
    "API_ORIGIN",
    "API_PREFIX",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "NOTIFICATION_POLL_SECONDS",
];

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim().trim_matches('"')))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for var in CONFIG_VARS {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    // .env solo rellena lo que el entorno no define
    let from_file: Vec<(String, String)> = fs::read_to_string(".env")
        .map(|contents| {
            contents
                .lines()
                .filter_map(parse_line)
                .filter(|(key, _)| CONFIG_VARS.contains(key))
                .filter(|(key, _)| env::var(key).is_err())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        })
        .unwrap_or_default();

    for (key, value) in &from_file {
        println!("cargo:rustc-env={}={}", key, value);
    }

    let origin_defined = env::var("API_ORIGIN").is_ok() || from_file.iter().any(|(key, _)| key == "API_ORIGIN");
    if !origin_defined {
        println!("cargo:warning=API_ORIGIN no definido; se usará http://localhost:3000");
    }
}
