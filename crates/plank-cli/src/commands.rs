use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use plank_config::{AppDiscovery, BuildEnv, BuildMode, validate_schema};

pub fn plan(root: &Path, app: Option<String>, mode: Option<String>) -> Result<()> {
    let env = resolve_env(app, mode)?;

    let discovery = AppDiscovery::new(root);
    let plan = discovery.plan(env.mode, &env.app)?;
    validate_schema(&plan)?;

    info!(app = %env.app, mode = %env.mode, "build plan composed");
    println!("{}", serde_json::to_string_pretty(&plan.to_value()?)?);
    Ok(())
}

pub fn apps(root: &Path) -> Result<()> {
    let discovery = AppDiscovery::new(root);
    let apps = discovery.list()?;

    if apps.is_empty() {
        eprintln!(
            "no applications found under {}",
            root.join("applications").display()
        );
        return Ok(());
    }
    for name in apps {
        println!("{name}");
    }
    Ok(())
}

/// Flags win over `PLANK_MODE` / `PLANK_APP`; an application must come from
/// one of the two.
fn resolve_env(app: Option<String>, mode: Option<String>) -> Result<BuildEnv> {
    let env = match app {
        Some(app) => {
            let mode = match mode {
                Some(m) => m.parse::<BuildMode>()?,
                None => BuildMode::from_env()?,
            };
            BuildEnv::new(mode, app)
        }
        None => {
            let mut env = BuildEnv::from_env()
                .context("no application selected: pass --app or set PLANK_APP")?;
            if let Some(m) = mode {
                env.mode = m.parse::<BuildMode>()?;
            }
            env
        }
    };
    Ok(env)
}
