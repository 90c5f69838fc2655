use rfstim::config::ConfigManager;

use crate::cmd::ShowArgs;
use crate::exit::{config_error, CliResult, SUCCESS};
use crate::output::{print_config_rows, OutputFormat};

pub fn run(args: ShowArgs, format: OutputFormat) -> CliResult<i32> {
    let mut config = ConfigManager::new();
    for path in &args.configs {
        config
            .add_file(path)
            .map_err(|err| config_error("registering config file", err))?;
    }
    config
        .load_all()
        .map_err(|err| config_error("loading config files", err))?;

    for category in config.categories() {
        let rows = config
            .rows(category)
            .map_err(|err| config_error("reading config rows", err))?;
        let columns: Vec<String> = category
            .columns()
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        print_config_rows(category.name(), &columns, rows, format);
    }

    Ok(SUCCESS)
}
