//! Wires the sync endpoint into a Next.js project

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::setup::{assets, SetupReport};

/// Routing flavors a Next.js project can use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextRouter {
    App,
    Pages,
}

impl fmt::Display for NextRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextRouter::App => write!(f, "App Router"),
            NextRouter::Pages => write!(f, "Pages Router"),
        }
    }
}

/// Detect the router flavor from the project layout. App Router wins
/// when both directories exist.
pub fn detect_router(root: &Path) -> Option<NextRouter> {
    if root.join("app").is_dir() {
        Some(NextRouter::App)
    } else if root.join("pages").is_dir() {
        Some(NextRouter::Pages)
    } else {
        None
    }
}

/// Where the sync route file lives for a router flavor
pub fn route_file(root: &Path, router: NextRouter) -> PathBuf {
    match router {
        NextRouter::App => root.join("app/api/grabby-sync/route.ts"),
        NextRouter::Pages => root.join("pages/api/grabby-sync.ts"),
    }
}

/// JSX snippet the user still has to add by hand; Next.js has no config
/// hook that lets us inject a script tag for them
pub fn script_snippet(router: NextRouter) -> &'static str {
    match router {
        NextRouter::App => {
            r#"   // app/layout.tsx
   import Script from 'next/script';

   export default function RootLayout({ children }) {
     return (
       <html>
         <head>
           <Script src="/grabby-client.js" strategy="beforeInteractive" />
         </head>
         <body>{children}</body>
       </html>
     );
   }"#
        }
        NextRouter::Pages => {
            r#"   // pages/_document.tsx
   import Script from 'next/script';

   export default function Document() {
     return (
       <Html>
         <Head>
           <Script src="/grabby-client.js" strategy="beforeInteractive" />
         </Head>
         <body>
           <Main />
           <NextScript />
         </body>
       </Html>
     );
   }"#
        }
    }
}

/// Run the full Next.js setup against a project directory
pub fn apply(root: &Path) -> Result<SetupReport> {
    let Some(router) = detect_router(root) else {
        bail!("Could not detect the Next.js project structure (no app/ or pages/ directory)");
    };

    let mut report = SetupReport::default();

    let route_path = route_file(root, router);
    let (route_body, route_label) = match router {
        NextRouter::App => (assets::NEXT_APP_ROUTE, "app/api/grabby-sync/route.ts"),
        NextRouter::Pages => (assets::NEXT_PAGES_ROUTE, "pages/api/grabby-sync.ts"),
    };

    // The route file belongs to the user once it exists; never overwrite
    if route_path.exists() {
        report
            .skipped
            .push(format!("{route_label} already exists"));
    } else {
        if let Some(parent) = route_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        fs::write(&route_path, route_body)
            .with_context(|| format!("Could not write {}", route_path.display()))?;
        report.changes.push(format!("Created {route_label}"));
    }

    let public = root.join("public");
    fs::create_dir_all(&public)
        .with_context(|| format!("Could not create {}", public.display()))?;

    let client_path = public.join(assets::NEXT_CLIENT_FILE);
    let up_to_date = fs::read_to_string(&client_path)
        .map(|current| current == assets::CLIENT_SCRIPT)
        .unwrap_or(false);
    if up_to_date {
        report
            .skipped
            .push("public/grabby-client.js is up to date".to_string());
    } else {
        fs::write(&client_path, assets::CLIENT_SCRIPT)
            .with_context(|| format!("Could not write {}", client_path.display()))?;
        report
            .changes
            .push("Installed inspector script at public/grabby-client.js".to_string());
    }

    report.manual.push(match router {
        NextRouter::App => {
            "Load /grabby-client.js from your root layout (snippet below)".to_string()
        }
        NextRouter::Pages => {
            "Load /grabby-client.js from pages/_document.tsx (snippet below)".to_string()
        }
    });

    Ok(report)
}
