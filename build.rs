fn main() {
    // docs.rs can't build the vendored lingeling backend, skip it there
    if std::env::var("DOCS_RS").is_ok() {
        println!("cargo:rustc-env=BOOLECTOR_NO_VENDOR=1");
    }
}
