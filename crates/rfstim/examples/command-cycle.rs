//! Drive one full command cycle against a CW stim backed by inline
//! configuration files.
//!
//! Run with: cargo run -p rfstim --example command-cycle

use rfstim::config::ConfigManager;
use rfstim::RfStim;

const STIM_CSV: &str = "\
StimName,StimType,TriggerType,PinName,FreqListName,FreqListIndex,Power,WaveFile,RepeatCount
stim-cw,CW,SW,RF1,flist-a,0,-10.0,none,1
";

const FLIST_CSV: &str = "\
FreqListName,FreqListValue
flist-a,1.8e9|2.4e9|3.7e9
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join(format!("rfstim-example-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let stim_path = dir.join("site.stim");
    let flist_path = dir.join("site.flist");
    std::fs::write(&stim_path, STIM_CSV)?;
    std::fs::write(&flist_path, FLIST_CSV)?;

    let mut config = ConfigManager::new();
    config.add_file(&stim_path)?;
    config.add_file(&flist_path)?;
    config.load_all()?;

    let mut rf = RfStim::new(config);
    let port = rf.register_port();

    let session = rf.stim("stim-cw")?;
    session.load()?;
    session.set_freq_list_index(2)?;
    session.set_power(-4.5)?;
    session.connect()?;
    let outcome = session.execute()?;

    println!("tasks run: {}", outcome.tasks_run);
    println!("wire bytes: {}", outcome.request.len());
    let port = port.lock().expect("register port");
    println!("applied frequency: {:?}", port.frequency());
    println!("applied power: {:?}", port.power());

    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}
