// =============================================================================
// Folio Web - WASM Entry Point
// =============================================================================
// This is the main entry point for the WASM binary.
// Trunk compiles this and injects it into index.html after the page markup.
// =============================================================================

fn main() {
    if let Err(err) = folio_web::mount() {
        log::error!("Failed to initialize page behaviors: {:?}", err);
    }
}
