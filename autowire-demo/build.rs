use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    autowire_codegen::configure()
        .files(["src/lib.rs", "src/services.rs", "src/profile.rs"])
        .generate()?;
    Ok(())
}
