mod cli;

use std::path::Path;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use selene_engine::device::GpuInit;
use selene_engine::logging::{self, LoggingConfig};
use selene_host::platform::Desktop;
use selene_host::{
    interpret_path, resolve_base_path, AssetSource, HostConfig, HostExit, LogPolicy, SplashConfig,
};
use selene_lua::LuaEngine;

use cli::Cli;

fn main() {
    let exit = match run() {
        Ok(exit) => exit,
        Err(e) => {
            log::error!("{e:#}");
            HostExit::BootFailed
        }
    };
    std::process::exit(exit.code());
}

fn run() -> anyhow::Result<HostExit> {
    let cli = Cli::parse();
    logging::init_logging(LoggingConfig::default());

    if cli.help {
        logging::set_threshold(log::LevelFilter::Info);
        Cli::command().print_help().context("printing usage")?;
        return Ok(HostExit::Info);
    }
    if cli.version {
        logging::set_threshold(log::LevelFilter::Info);
        log::info!("{}", banner());
        return Ok(HostExit::Info);
    }

    let cwd = std::env::current_dir().context("reading the working directory")?;
    let exe_dir = std::env::current_exe()
        .context("locating the executable")?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.clone());

    let args = cli.script_args(std::env::args().next().unwrap_or_else(|| "selene".to_string()));

    let policy = LogPolicy::for_build(cli.log);

    if let Some(file) = &cli.interpret {
        let script = interpret_path(&cwd, file);
        let config = HostConfig {
            base_path: dir_string(script.parent().unwrap_or(&cwd)),
            log_policy: policy,
            args,
            ..HostConfig::default()
        };
        return Ok(selene_host::run_interpret(config, Desktop::new(GpuInit::default()), LuaEngine::new, &script));
    }

    let base = resolve_base_path(cli.path.as_deref(), &cwd, &exe_dir);
    let config = HostConfig {
        base_path: dir_string(&base),
        log_policy: policy,
        skip_splash: cli.no_logo,
        args,
        font: font_source(),
        splash: splash_config(),
        ..HostConfig::default()
    };

    logging::set_threshold(policy.level());
    log::info!("{}", banner());
    log::info!("base path: {}", base.display());

    Ok(selene_host::run_interactive(config, Desktop::new(GpuInit::default()), LuaEngine::new))
}

/// `Selene x.y.z` plus the interpreter version.
fn banner() -> String {
    format!("Selene {} {}", env!("CARGO_PKG_VERSION"), selene_lua::LUA_VERSION)
}

fn dir_string(dir: &Path) -> String {
    dir.to_string_lossy().into_owned()
}

#[cfg(feature = "embed-assets")]
fn font_source() -> AssetSource {
    AssetSource::Embedded(include_bytes!("../assets/fonts/default.ttf"))
}

#[cfg(not(feature = "embed-assets"))]
fn font_source() -> AssetSource {
    HostConfig::default().font
}

#[cfg(feature = "embed-assets")]
fn splash_config() -> SplashConfig {
    SplashConfig {
        logos: [
            AssetSource::Embedded(include_bytes!("../assets/logo/engine_logo.png")),
            AssetSource::Embedded(include_bytes!("../assets/logo/selene_logo.png")),
        ],
        ..SplashConfig::default()
    }
}

#[cfg(not(feature = "embed-assets"))]
fn splash_config() -> SplashConfig {
    SplashConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_host_and_interpreter() {
        assert_eq!(banner(), format!("Selene {} Lua 5.4", env!("CARGO_PKG_VERSION")));
    }

    #[cfg(feature = "embed-assets")]
    #[test]
    fn embedded_build_carries_font_and_logos() {
        assert!(matches!(font_source(), AssetSource::Embedded(bytes) if !bytes.is_empty()));
        for logo in splash_config().logos {
            assert!(matches!(logo, AssetSource::Embedded(bytes) if !bytes.is_empty()));
        }
    }

    #[cfg(not(feature = "embed-assets"))]
    #[test]
    fn default_build_probes_the_filesystem() {
        assert!(matches!(font_source(), AssetSource::Filesystem(_)));
        for logo in splash_config().logos {
            assert!(matches!(logo, AssetSource::Filesystem(_)));
        }
    }
}
