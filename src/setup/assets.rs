//! Files embedded in the binary and written into target projects

/// Inspector overlay script injected into dev pages
pub const CLIENT_SCRIPT: &str = include_str!("../../assets/grabby.js");

/// Self-contained Vite plugin carrying the sync endpoint
pub const VITE_PLUGIN: &str = include_str!("../../assets/vite-plugin.mjs");

/// Generated App Router sync route
pub const NEXT_APP_ROUTE: &str = include_str!("../../assets/next-app-route.ts");

/// Generated Pages Router sync route
pub const NEXT_PAGES_ROUTE: &str = include_str!("../../assets/next-pages-route.ts");

/// Playground page served by `grabby serve`
pub const DEMO_PAGE: &str = include_str!("../../assets/demo.html");

/// File name the Vite plugin is written under in the target project
pub const VITE_PLUGIN_FILE: &str = "grabby.vite.mjs";

/// File name the client script is copied to for Vite projects
pub const VITE_CLIENT_FILE: &str = "grabby.js";

/// File name the client script is copied to for Next.js projects
pub const NEXT_CLIENT_FILE: &str = "grabby-client.js";
