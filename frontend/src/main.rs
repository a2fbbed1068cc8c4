//! Entry point for the WASM application

pub fn main() {
    imageclass_frontend::run();
}
