//! The built-in `scaffold` app: startproject, startapp, startcommand.
//!
//! Scaffolding is file-copying, deliberately outside the core: these are
//! ordinary command handlers that write skeleton files through `std::fs`
//! and report through the Presentation Engine like any other app would.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use herald_core::application::context::Context;
use herald_core::application::descriptor::{CommandDescriptor, HandlerResult};
use herald_core::domain::{ArgSpec, DomainError, validators};

/// Commands the scaffold app contributes.
pub fn provider() -> Result<Vec<CommandDescriptor>, DomainError> {
    Ok(vec![
        CommandDescriptor::builder("startproject")
            .help("Scaffold a new herald project directory")
            .arg(ArgSpec::required(
                "name",
                validators::string(),
                "Project name; the directory is created under the current one",
            ))?
            .handler(run_startproject)?,
        CommandDescriptor::builder("startapp")
            .help("Scaffold a new app skeleton under apps/")
            .arg(ArgSpec::required(
                "name",
                validators::string(),
                "App name; becomes apps/<name>/",
            ))?
            .handler(run_startapp)?,
        CommandDescriptor::builder("startcommand")
            .help("Add a command skeleton to an existing app")
            .arg(ArgSpec::required(
                "app",
                validators::string(),
                "App the command belongs to",
            ))?
            .arg(ArgSpec::required(
                "name",
                validators::string(),
                "Name of the new command",
            ))?
            .handler(run_startcommand)?,
    ])
}

// ── handlers ──────────────────────────────────────────────────────────────────

fn run_startproject(ctx: Context) -> HandlerResult {
    let name = ctx.str("name").expect("validated argument").to_string();
    validate_name(&name)?;

    let base_dir = PathBuf::from(&name);
    if base_dir.exists() {
        return Err(format!(
            "the directory '{}' already exists; pick another name or remove it",
            base_dir.display()
        )
        .into());
    }

    let subtitle = format!("Creating project '{name}'");
    ctx.ui.header("startproject", Some(&subtitle))?;

    {
        let _spinner = ctx.ui.spinner(&format!("Writing {}", base_dir.display()));

        fs::create_dir_all(base_dir.join("apps").join("demo"))?;
        write_file(&ctx, &base_dir.join("herald.toml"), &settings_template())?;
        write_file(&ctx, &base_dir.join(".env.example"), ENV_EXAMPLE)?;
        write_file(
            &ctx,
            &base_dir.join("apps").join("demo").join("commands.rs"),
            &commands_template("demo", "hello"),
        )?;
    }

    info!(project = %name, "project scaffolded");
    ctx.ui
        .success(&format!("Project '{name}' created! cd {name} && herald"))?;
    Ok(None)
}

fn run_startapp(ctx: Context) -> HandlerResult {
    let name = ctx.str("name").expect("validated argument").to_string();
    validate_name(&name)?;

    let app_dir = Path::new("apps").join(&name);
    if app_dir.exists() {
        return Err(format!("the app directory '{}' already exists", app_dir.display()).into());
    }

    ctx.ui.write(&format!("Creating app '{name}' in apps/..."))?;
    fs::create_dir_all(&app_dir)?;
    write_file(
        &ctx,
        &app_dir.join("commands.rs"),
        &commands_template(&name, &format!("{name}_test")),
    )?;

    info!(app = %name, "app scaffolded");
    ctx.ui.success(&format!("App '{name}' created."))?;
    ctx.ui.warning(&format!(
        "Don't forget to register the provider in your binary and add \"{name}\" to the apps list in herald.toml"
    ))?;
    Ok(None)
}

fn run_startcommand(ctx: Context) -> HandlerResult {
    let app = ctx.str("app").expect("validated argument").to_string();
    let name = ctx.str("name").expect("validated argument").to_string();
    validate_name(&name)?;

    let app_dir = Path::new("apps").join(&app);
    if !app_dir.is_dir() {
        return Err(format!(
            "no app directory at '{}'; run 'herald startapp {app}' first",
            app_dir.display()
        )
        .into());
    }

    let file = app_dir.join(format!("{name}.rs"));
    if file.exists() {
        return Err(format!("'{}' already exists", file.display()).into());
    }

    write_file(&ctx, &file, &commands_template(&app, &name))?;
    ctx.ui.success(&format!(
        "Command '{name}' added to app '{app}'. Wire it into the app's provider to register it."
    ))?;
    Ok(None)
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Project and app names: alphanumerics, `-` and `_`, not starting with a dot.
fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".into());
    }
    if name.starts_with('.') {
        return Err(format!("'{name}' cannot start with '.'"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!(
            "'{name}' may only contain alphanumerics, '-' and '_'"
        ));
    }
    Ok(())
}

fn write_file(ctx: &Context, path: &Path, content: &str) -> std::io::Result<()> {
    if path.exists() {
        // Never clobber; startproject already guards the whole directory.
        let _ = ctx.ui.warning(&format!("Skipping existing file {}", path.display()));
        return Ok(());
    }
    debug!(path = %path.display(), "writing skeleton file");
    fs::write(path, content)
}

// ── templates ─────────────────────────────────────────────────────────────────

const ENV_EXAMPLE: &str = "\
# Environment overrides, loaded by herald at startup.
# HERALD_APPS=scaffold,demo
";

fn settings_template() -> String {
    "\
# Herald settings. Apps load in order; later apps win on command-name
# collisions, so overrides go at the end of the list.
apps = [
    \"scaffold\",
    # \"demo\",  # register the demo provider in your binary, then enable it here
]

[output]
no_color = false
"
    .to_string()
}

fn commands_template(app: &str, command: &str) -> String {
    format!(
        r#"use herald_core::application::descriptor::{{CommandDescriptor, HandlerResult}};
use herald_core::domain::DomainError;

/// Commands the {app} app contributes.
pub fn provider() -> Result<Vec<CommandDescriptor>, DomainError> {{
    Ok(vec![
        CommandDescriptor::builder("{command}")
            .help("Example command for the {app} app")
            .handler(|ctx| -> HandlerResult {{
                ctx.ui.header("{app}", None)?;
                ctx.ui.success("The command works!")?;
                Ok(None)
            }})?,
    ])
}}
"#
    )
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_declares_the_three_commands() {
        let descriptors = provider().unwrap();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["startproject", "startapp", "startcommand"]);
    }

    #[test]
    fn startcommand_declares_two_positional_arguments() {
        let descriptors = provider().unwrap();
        let startcommand = descriptors
            .iter()
            .find(|d| d.name() == "startcommand")
            .unwrap();
        assert_eq!(startcommand.usage(), "startcommand <app:str> <name:str>");
    }

    #[test]
    fn names_are_validated() {
        assert!(validate_name("my-project").is_ok());
        assert!(validate_name("my_app2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("has space").is_err());
    }

    #[test]
    fn settings_template_parses_as_toml() {
        let parsed: toml::Value = toml::from_str(&settings_template()).unwrap();
        let apps = parsed["apps"].as_array().unwrap();
        assert_eq!(apps[0].as_str(), Some("scaffold"));
    }
}
