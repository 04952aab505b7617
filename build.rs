fn main() {
  let mut version = String::from("0.0.0-dev");
  if let Ok(version_env) = std::env::var("VERSION") {
    let trimmed = version_env.trim();
    if !trimmed.is_empty() {
      version = trimmed.trim_start_matches('v').to_string();
    }
  }

  println!("cargo:rerun-if-env-changed=VERSION");
  println!("cargo:rustc-env=ENVSTAMP_VERSION={version}");
}
