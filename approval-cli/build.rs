fn main() {
    built::write_built_file().expect("Failed to acquire build-time information");

    // Allow packagers without a .git directory to inject the commit hash
    println!("cargo:rerun-if-env-changed=APPROVAL_GIT_HASH");
    if let Ok(hash) = std::env::var("APPROVAL_GIT_HASH") {
        println!("cargo:rustc-env=APPROVAL_GIT_HASH={}", hash);
    }
}
