use log::info;

/// Affiche les informations Rust et les dépendances principales de la compilation.
pub fn show_rust_core_dependencies() {
    // Info système (Rust version, OS)
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);

    // versions injectées par build.rs (cargo_metadata)
    let glam_version = option_env!("GLAM").unwrap_or("Unknown");
    let image_version = option_env!("IMAGE").unwrap_or("Unknown");
    let rand_version = option_env!("RAND").unwrap_or("Unknown");

    info!("Rust core dependancies");
    info!("  glam  version: {}", glam_version);
    info!("  image version: {}", image_version);
    info!("  rand  version: {}", rand_version);
}
