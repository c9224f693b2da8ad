//! Page-facing glue
//!
//! The browser host in `web` does the DOM calls; everything it decides
//! (which ids to look up, how to read data attributes, what HUD text to
//! write) lives in `hud` and `mount` so it can be tested natively.

pub mod hud;
pub mod mount;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use hud::{DomIds, HudUpdate};
pub use mount::MountConfig;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameKind;
    use std::path::Path;

    fn template(name: &str) -> String {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates").join(name);
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
    }

    #[test]
    fn test_pages_import_library_bundle() {
        // The library target carries the start function, so pages must load
        // the bundle named after it
        let bundle = format!("/pixel_pioneers/{}.js", env!("CARGO_CRATE_NAME"));
        for name in [
            "index.html",
            "pacman.html",
            "super-mario.html",
            "space-invaders.html",
            "artists-statement.html",
        ] {
            let page = template(name);
            assert!(page.contains(&bundle), "{name} does not import {bundle}");
            assert!(page.contains("init()"), "{name} never calls init()");
        }
    }

    #[test]
    fn test_pages_expose_mount_points() {
        let index = template("index.html");
        for kind in GameKind::ALL {
            let ids = DomIds::for_kind(kind);
            assert!(
                index.contains(&format!("id=\"{}\"", ids.container)),
                "index has no {}",
                ids.container
            );
        }

        for (name, kind) in [
            ("pacman.html", GameKind::Maze),
            ("super-mario.html", GameKind::Platformer),
            ("space-invaders.html", GameKind::Invaders),
        ] {
            let page = template(name);
            let ids = DomIds::for_kind(kind);
            assert!(page.contains(&format!("id=\"{}\"", ids.canvas)), "{name} has no canvas");
        }
    }
}
