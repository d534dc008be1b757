//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where adapters are wired together for the
//! CLI. All concrete implementations are instantiated here:
//! - System probe, pip installer, font provisioner, mirror script and
//!   launcher (via vlsetup-runtime)
//! - YAML config store and fixed decisions (via vlsetup-core)
//! - Terminal decisions and the console reporter (this crate)
//!
//! Command handlers receive the composed [`CliContext`] and never build
//! adapters themselves.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use vlsetup_core::{
    CommandLine, DecisionSource, FixedDecisions, SetupEventSink, SetupOptions, SetupOrchestrator,
    SetupPorts, YamlConfigStore,
};
use vlsetup_runtime::{
    DefaultSystemProbe, DetachedLauncher, PipInstaller, RuntimeConfig, ScriptMirrorSelector,
    SystemFontProvisioner,
};

use crate::decisions::TerminalDecisions;
use crate::parser::Cli;
use crate::presentation::ConsoleReporter;

/// Bootstrap configuration for the CLI, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Interpreter, script location and subprocess timeouts.
    pub runtime: RuntimeConfig,
    /// Run-level settings for the orchestrator.
    pub setup: SetupOptions,
    /// YAML file the application reads its settings from.
    pub config_path: PathBuf,
    /// Language given on the command line, if any.
    pub language: Option<String>,
    /// Prompt on the terminal instead of using fixed answers.
    pub interactive: bool,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let runtime = RuntimeConfig {
            python: cli
                .python
                .clone()
                .unwrap_or_else(RuntimeConfig::default_python),
            mirror_script: cli.mirror_script.clone(),
            install_timeout: Duration::from_secs(cli.install_timeout),
            probe_timeout: Duration::from_secs(cli.probe_timeout),
            mirror_timeout: Duration::from_secs(cli.mirror_timeout),
            font_timeout: Duration::from_secs(cli.font_timeout),
        };

        let launch = (!cli.no_launch)
            .then(|| CommandLine::new(cli.launch_program.clone(), cli.launch_args.clone()));

        let setup = SetupOptions {
            manifest: cli.manifest.clone(),
            gpu_check: !cli.skip_gpu_check,
            // Interactive runs offer the mirror and let the operator decline.
            configure_mirror: cli.configure_mirror || cli.interactive,
            launch,
        };

        Self {
            runtime,
            setup,
            config_path: cli.config.clone(),
            language: cli.language.clone(),
            interactive: cli.interactive,
        }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Resolved configuration the context was built from.
    pub config: CliConfig,
    /// Adapters handed to the orchestrator.
    pub ports: SetupPorts,
    probe: Arc<DefaultSystemProbe>,
    store: Arc<YamlConfigStore>,
}

impl CliContext {
    /// Orchestrator for a full setup run.
    pub fn orchestrator(&self) -> SetupOrchestrator {
        SetupOrchestrator::new(self.ports.clone(), self.config.setup.clone())
    }

    /// Concrete probe, for commands that want more than the port offers.
    pub fn probe(&self) -> &DefaultSystemProbe {
        &self.probe
    }

    pub fn config_store(&self) -> &YamlConfigStore {
        &self.store
    }
}

/// Bootstrap the CLI with all adapters composed.
pub fn bootstrap(config: CliConfig) -> CliContext {
    let runtime = &config.runtime;

    let probe = Arc::new(DefaultSystemProbe::new(runtime.probe_timeout));
    let store = Arc::new(YamlConfigStore::new(&config.config_path));

    let decisions: Arc<dyn DecisionSource> = if config.interactive {
        Arc::new(TerminalDecisions::new(config.language.clone()))
    } else {
        Arc::new(FixedDecisions::new(
            config.language.clone(),
            config.setup.configure_mirror,
        ))
    };
    let events: Arc<dyn SetupEventSink> = Arc::new(ConsoleReporter::new());

    let ports = SetupPorts {
        probe: probe.clone(),
        installer: Arc::new(PipInstaller::new(&runtime.python, runtime.install_timeout)),
        fonts: Arc::new(SystemFontProvisioner::new(runtime.font_timeout)),
        config: store.clone(),
        decisions,
        mirror: Arc::new(ScriptMirrorSelector::new(
            &runtime.python,
            &runtime.mirror_script,
            runtime.mirror_timeout,
        )),
        launcher: Arc::new(DetachedLauncher::new()),
        events,
    };

    CliContext {
        config,
        ports,
        probe,
        store,
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`. Output goes
/// to stderr so it never interleaves with console panels.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    // A second init (tests) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
