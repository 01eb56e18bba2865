use common::yaml_include::load_yaml_with_includes;
use std::{error::Error, fs, io::Write, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=config");
    println!("cargo:rerun-if-env-changed=FRAUD_FINDER_ENV");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let env = std::env::var("FRAUD_FINDER_ENV").unwrap_or_else(|_| "dev".to_string());
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());

    // Navigate up to the target directory
    let target_dir = out_dir
        .ancestors()
        .find(|p| p.ends_with("target"))
        .ok_or("could not find target directory")?
        .join(&profile);

    let total_config_dir = target_dir.join("config");
    let total_config_file_name = total_config_dir.join("total_config.yaml");
    let source_config = manifest_dir.join("config").join(format!("{env}.yaml"));

    println!("cargo:warning=Loading config env {env:?} profile {profile:?}");
    let config_yaml = load_yaml_with_includes(&source_config)?;

    let mut out_str = String::new();
    {
        let mut emitter = yaml_rust2::YamlEmitter::new(&mut out_str);
        emitter.dump(&config_yaml)?
    }

    println!("cargo:warning=Writing config to {total_config_file_name:?}");

    fs::create_dir_all(total_config_dir)?;
    fs::File::create(total_config_file_name)?.write_all(out_str.as_bytes())?;

    Ok(())
}
