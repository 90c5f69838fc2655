use rfstim::config::ConfigManager;
use rfstim::RfStim;

use crate::cmd::RunArgs;
use crate::exit::{config_error, sdk_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_run, OutputFormat};

pub fn run(args: RunArgs, format: OutputFormat) -> CliResult<i32> {
    let mut config = ConfigManager::new();
    for path in &args.configs {
        config
            .add_file(path)
            .map_err(|err| config_error("registering config file", err))?;
    }
    config
        .load_all()
        .map_err(|err| config_error("loading config files", err))?;

    let mut rf = RfStim::new(config);
    let port = rf.register_port();

    let session = rf
        .stim(&args.stim)
        .map_err(|err| sdk_error("resolving stim", err))?;
    let channel_type = session.def().channel_type().as_str();

    session
        .load()
        .map_err(|err| sdk_error("loading stim", err))?;

    if let Some(index) = args.freq_index {
        session
            .set_freq_list_index(index)
            .map_err(|err| sdk_error("setting frequency index", err))?;
    }
    if let Some(power) = args.power {
        session
            .set_power(power)
            .map_err(|err| sdk_error("setting power", err))?;
    }
    if let Some(repeat) = args.repeat {
        session
            .set_repeat_count(repeat)
            .map_err(|err| sdk_error("setting repeat count", err))?;
    }
    if !args.no_connect {
        session
            .connect()
            .map_err(|err| sdk_error("connecting stim", err))?;
    }

    let outcome = session
        .execute()
        .map_err(|err| sdk_error("executing command cycle", err))?;

    let (frequency, power) = {
        let port = port
            .lock()
            .map_err(|_| CliError::new(INTERNAL, "register port unavailable"))?;
        (port.frequency(), port.power())
    };

    print_run(&args.stim, channel_type, &outcome, frequency, power, format);
    Ok(SUCCESS)
}
