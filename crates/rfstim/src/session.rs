//! The user-facing SDK session: named stim lookup and the chainable
//! command-cycle API.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rfstim_config::{ConfigCategory, ConfigManager};
use rfstim_dispatch::{
    ChannelRegistry, CommandQueue, ExecuteOutcome, SharedRegisterPort, TaskKey,
};
use rfstim_stim::{module_for, ChannelType, RfModule, StimDef, StimError};
use rfstim_wire::{OrdF64, WireStream};
use tracing::debug;

use crate::error::{Result, SdkError};

/// Activation flag for a wire frequency/power entry: applied by the handler.
const FLAG_ACTIVE: u32 = 1;

/// One stimulus channel's command session.
///
/// Setter calls enqueue deferred tasks; `execute` serializes them in the
/// protocol's fixed order and dispatches the result to this channel
/// type's handler, then clears the queue for the next cycle. Every
/// operation except `load` requires the session to be loaded first.
pub struct StimSession {
    def: StimDef,
    module: Box<dyn RfModule + Send>,
    queue: CommandQueue,
    config: Arc<ConfigManager>,
    registry: Arc<ChannelRegistry>,
    loaded: bool,
}

impl StimSession {
    fn new(def: StimDef, config: Arc<ConfigManager>, registry: Arc<ChannelRegistry>) -> Self {
        let module = module_for(def.channel_type(), def.pin(), def.wave_file());
        let mut queue = CommandQueue::new();
        queue.set_channel_type(def.channel_type().as_str());
        Self {
            def,
            module,
            queue,
            config,
            registry,
            loaded: false,
        }
    }

    /// The parsed stim definition backing this session.
    pub fn def(&self) -> &StimDef {
        &self.def
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_connected(&self) -> bool {
        self.module.is_connected()
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(SdkError::Stim(StimError::NotLoaded))
        }
    }

    fn enqueue_frequency_set(&mut self, freqs: Vec<f64>) {
        self.queue
            .enqueue(TaskKey::SetFrequency, move |stream: &mut WireStream| {
                let mut set = BTreeMap::new();
                for &freq in &freqs {
                    set.insert(OrdF64(freq), FLAG_ACTIVE);
                }
                stream.write(&set);
            });
    }

    fn enqueue_power_set(&mut self, powers: Vec<f64>) {
        self.queue
            .enqueue(TaskKey::SetPower, move |stream: &mut WireStream| {
                let mut set = BTreeMap::new();
                for &power in &powers {
                    set.insert(OrdF64(power), FLAG_ACTIVE);
                }
                stream.write(&set);
            });
    }

    /// Load the session: refresh the frequency-list values, bring up the
    /// channel module (MOD stages its wave file here) and stage the
    /// definition's default frequency and power.
    pub fn load(&mut self) -> Result<&mut Self> {
        self.def.refresh_freq_list(&self.config)?;
        self.module.load()?;

        let default_freq = self.def.frequency()?;
        self.enqueue_frequency_set(vec![default_freq]);
        if let Some(&power) = self.def.powers().first() {
            self.enqueue_power_set(vec![power]);
        }
        self.queue.enqueue(TaskKey::Load, |_stream: &mut WireStream| {
            debug!("load task staged");
        });

        self.loaded = true;
        Ok(self)
    }

    pub fn connect(&mut self) -> Result<&mut Self> {
        self.ensure_loaded()?;
        self.module.connect()?;
        self.queue
            .enqueue(TaskKey::Connect, |_stream: &mut WireStream| {
                debug!("connect task staged");
            });
        Ok(self)
    }

    pub fn disconnect(&mut self) -> Result<&mut Self> {
        self.ensure_loaded()?;
        self.module.disconnect()?;
        self.queue
            .enqueue(TaskKey::Disconnect, |_stream: &mut WireStream| {
                debug!("disconnect task staged");
            });
        Ok(self)
    }

    /// Select one frequency by its list index.
    pub fn set_freq_list_index(&mut self, index: usize) -> Result<&mut Self> {
        self.ensure_loaded()?;
        let freq = self.def.freq_list().frequency_at(index)?;
        self.enqueue_frequency_set(vec![freq]);
        Ok(self)
    }

    /// Select several frequencies by their list indexes.
    pub fn set_freq_list_indexes(&mut self, indexes: &[usize]) -> Result<&mut Self> {
        self.ensure_loaded()?;
        let freqs = self.def.freq_list().frequencies_at(indexes)?;
        self.enqueue_frequency_set(freqs);
        Ok(self)
    }

    /// Switch to a different named frequency list. DT channels track an
    /// index pair, every other type the first index.
    pub fn set_freq_list_name(&mut self, name: &str) -> Result<&mut Self> {
        self.ensure_loaded()?;
        self.def.rename_freq_list(name, &self.config)?;
        match self.def.channel_type() {
            ChannelType::Dt => self.set_freq_list_indexes(&[0, 1]),
            _ => self.set_freq_list_index(0),
        }
    }

    pub fn set_power(&mut self, power: f64) -> Result<&mut Self> {
        self.ensure_loaded()?;
        self.enqueue_power_set(vec![power]);
        Ok(self)
    }

    pub fn set_power_list(&mut self, powers: &[f64]) -> Result<&mut Self> {
        self.ensure_loaded()?;
        self.enqueue_power_set(powers.to_vec());
        Ok(self)
    }

    pub fn set_repeat_count(&mut self, repeat: usize) -> Result<&mut Self> {
        self.ensure_loaded()?;
        self.def.set_repeat_count(repeat);
        debug!(repeat, "repeat count updated");
        Ok(self)
    }

    /// Run the pending command cycle: serialize the queued tasks in fixed
    /// order, dispatch to this channel type's handler and clear the queue
    /// for the next cycle.
    pub fn execute(&mut self) -> Result<ExecuteOutcome> {
        self.ensure_loaded()?;
        let outcome = self.queue.execute(&self.registry)?;
        self.queue.clear();
        Ok(outcome)
    }
}

/// Entry point of the SDK: owns the configuration, the channel-handler
/// registry and one session per configured stim.
pub struct RfStim {
    config: Arc<ConfigManager>,
    registry: Arc<ChannelRegistry>,
    port: SharedRegisterPort,
    sessions: HashMap<String, StimSession>,
}

impl RfStim {
    /// Build an SDK instance over an already-loaded configuration, with
    /// the built-in CW/DT/MOD handlers.
    pub fn new(config: ConfigManager) -> Self {
        let port = SharedRegisterPort::default();
        let registry = Arc::new(ChannelRegistry::with_builtin(Arc::clone(&port)));
        Self::with_registry(config, registry, port)
    }

    /// Build an SDK instance with a caller-provided handler registry.
    pub fn with_registry(
        config: ConfigManager,
        registry: Arc<ChannelRegistry>,
        port: SharedRegisterPort,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry,
            port,
            sessions: HashMap::new(),
        }
    }

    /// The session for a named stim, created from its config row on first
    /// use.
    pub fn stim(&mut self, name: &str) -> Result<&mut StimSession> {
        match self.sessions.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let row = self.config.query(ConfigCategory::Stim, name)?;
                let def = StimDef::from_fields(&row)?;
                debug!(stim = name, channel_type = %def.channel_type(), "stim session created");
                Ok(entry.insert(StimSession::new(
                    def,
                    Arc::clone(&self.config),
                    Arc::clone(&self.registry),
                )))
            }
        }
    }

    /// Reload every already-loaded session from configuration.
    pub fn restore(&mut self) -> Result<()> {
        for session in self.sessions.values_mut() {
            if session.loaded {
                session.load()?;
            }
        }
        Ok(())
    }

    /// The mock register port the built-in handlers write to.
    pub fn register_port(&self) -> SharedRegisterPort {
        Arc::clone(&self.port)
    }

    pub fn registry(&self) -> &Arc<ChannelRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use rfstim_dispatch::{DispatchStatus, STATUS_OK};

    use super::*;

    const STIM_CSV: &str = "\
StimName,StimType,TriggerType,PinName,FreqListName,FreqListIndex,Power,WaveFile,RepeatCount
stim-cw,CW,SW,RF1,flist-a,0,-10.0,none,1
stim-dt,DT,HW,RF2,flist-a,0|1,-3.0,none,4
stim-mod,MOD,SW,RF3,flist-a,1,-6.0,qam64.wfm,1
";

    const FLIST_CSV: &str = "\
FreqListName,FreqListValue
flist-a,1.8e9|2.4e9|3.7e9
flist-b,900e6|1.2e9
";

    fn make_temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rfstim-session-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn sdk(tag: &str) -> (RfStim, PathBuf) {
        let dir = make_temp_dir(tag);
        let stim = write_file(&dir, "site.stim", STIM_CSV);
        let flist = write_file(&dir, "site.flist", FLIST_CSV);

        let mut config = ConfigManager::new();
        config.add_file(&stim).unwrap();
        config.add_file(&flist).unwrap();
        config.load_all().unwrap();

        (RfStim::new(config), dir)
    }

    #[test]
    fn full_command_cycle_applies_registers() {
        let (mut rf, dir) = sdk("cycle");
        let port = rf.register_port();

        let session = rf.stim("stim-cw").unwrap();
        let outcome = session.load().unwrap().connect().unwrap().execute().unwrap();

        assert_eq!(outcome.status, DispatchStatus::Handled(STATUS_OK));
        // Load staged the definition defaults: index 0 of flist-a, first power.
        let port = port.lock().unwrap();
        assert_eq!(port.frequency(), Some(1.8e9));
        assert_eq!(port.power(), Some(-10.0));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn setters_override_defaults_before_execute() {
        let (mut rf, dir) = sdk("override");
        let port = rf.register_port();

        let session = rf.stim("stim-cw").unwrap();
        session.load().unwrap();
        session.set_freq_list_index(2).unwrap();
        session.set_power(-4.5).unwrap();
        session.connect().unwrap();
        session.execute().unwrap();

        let port = port.lock().unwrap();
        assert_eq!(port.frequency(), Some(3.7e9));
        assert_eq!(port.power(), Some(-4.5));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn operations_before_load_are_rejected() {
        let (mut rf, dir) = sdk("unloaded");
        let session = rf.stim("stim-cw").unwrap();

        assert!(matches!(
            session.connect(),
            Err(SdkError::Stim(StimError::NotLoaded))
        ));
        assert!(matches!(
            session.set_power(-1.0),
            Err(SdkError::Stim(StimError::NotLoaded))
        ));
        assert!(matches!(
            session.execute(),
            Err(SdkError::Stim(StimError::NotLoaded))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_stim_name_is_a_config_error() {
        let (mut rf, dir) = sdk("unknown");
        assert!(matches!(
            rf.stim("stim-zzz"),
            Err(SdkError::Config(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn execute_clears_the_cycle() {
        let (mut rf, dir) = sdk("clear");

        let session = rf.stim("stim-cw").unwrap();
        session.load().unwrap().connect().unwrap();
        let first = session.execute().unwrap();
        assert_eq!(first.tasks_run, 4);

        // Next cycle starts empty: no tasks, handler sees an empty stream
        // and fails to decode, clearing back to idle.
        let err = session.execute().unwrap_err();
        assert!(matches!(err, SdkError::Dispatch(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn freq_list_rename_selects_per_channel_indexes() {
        let (mut rf, dir) = sdk("rename");
        let port = rf.register_port();

        let session = rf.stim("stim-cw").unwrap();
        session.load().unwrap();
        session.set_freq_list_name("flist-b").unwrap();
        session.connect().unwrap();
        session.execute().unwrap();

        assert_eq!(port.lock().unwrap().frequency(), Some(900e6));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn dt_session_dispatches_to_stub_handler() {
        let (mut rf, dir) = sdk("dt");

        let session = rf.stim("stim-dt").unwrap();
        let outcome = session.load().unwrap().connect().unwrap().execute().unwrap();
        // DT handler accepts without consuming the stream.
        assert_eq!(outcome.status, DispatchStatus::Handled(STATUS_OK));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn mod_session_stages_wave_file_on_load() {
        let (mut rf, dir) = sdk("mod");

        let session = rf.stim("stim-mod").unwrap();
        session.load().unwrap();
        assert!(session.is_loaded());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn sessions_are_cached_by_name() {
        let (mut rf, dir) = sdk("cache");

        rf.stim("stim-cw").unwrap().load().unwrap();
        // Second lookup returns the same (still loaded) session.
        assert!(rf.stim("stim-cw").unwrap().is_loaded());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn repeat_count_setter_updates_definition() {
        let (mut rf, dir) = sdk("repeat");

        let session = rf.stim("stim-cw").unwrap();
        session.load().unwrap();
        session.set_repeat_count(16).unwrap();
        assert_eq!(session.def().repeat_count(), 16);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
