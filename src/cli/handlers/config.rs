//! Configuration and classification handlers for histscrub CLI

use crate::cli::CliApp;
use crate::cli::args::*;
use crate::config::Config;
use crate::error::Result;

pub fn handle_config(app: &CliApp, args: &ConfigArgs) -> Result<()> {
    if args.init {
        let config_path = Config::default_config_path()?;
        Config::default().save_to_path(&config_path)?;
        if !app.quiet {
            println!("Configuration initialized at {}", config_path.display());
        }
    } else if args.validate {
        app.config.validate()?;
        if !app.quiet {
            println!("Configuration is valid");
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&app.config)?);
    }

    Ok(())
}

pub fn handle_classify(_app: &CliApp, args: &ClassifyArgs) -> Result<()> {
    println!("{}", crate::shell::ShellType::classify(&args.name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::history::HistoryRedactor;

    fn app_with(config: Config) -> CliApp {
        CliApp {
            history: HistoryRedactor::new(&config),
            config,
            verbose: false,
            quiet: true,
        }
    }

    fn validate_args() -> ConfigArgs {
        ConfigArgs {
            init: false,
            validate: true,
        }
    }

    #[test]
    fn test_validate_accepts_default_config() {
        assert!(handle_config(&app_with(Config::default()), &validate_args()).is_ok());
    }

    #[test]
    fn test_validate_fails_on_invalid_config() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();

        let err = handle_config(&app_with(config), &validate_args()).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }
}
