//! Main CLI parser and top-level argument handling.
//!
//! Every option is global so it can be given before or after the
//! subcommand, and every option can come from a `VLSETUP_*` variable.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the VideoLingo environment setup tool.
#[derive(Parser, Debug)]
#[command(name = "vlsetup")]
#[command(about = "Prepare a Python environment for VideoLingo and launch it")]
#[command(version)]
pub struct Cli {
    /// Python interpreter used for pip and the mirror script
    #[arg(long, global = true, env = "VLSETUP_PYTHON")]
    pub python: Option<PathBuf>,

    /// Application config file that receives the display language
    #[arg(long, global = true, env = "VLSETUP_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Requirements manifest installed after the numeric runtime
    #[arg(
        long,
        global = true,
        env = "VLSETUP_MANIFEST",
        default_value = "requirements.txt"
    )]
    pub manifest: PathBuf,

    /// Display language code (e.g. "en", "zh-CN"); skips the language prompt
    #[arg(long, global = true, env = "VLSETUP_LANGUAGE")]
    pub language: Option<String>,

    /// Ask for language and mirror choices on the terminal
    #[arg(long, global = true, env = "VLSETUP_INTERACTIVE")]
    pub interactive: bool,

    /// Run the PyPI mirror selection script before installing
    #[arg(long = "configure-mirror", global = true, env = "VLSETUP_CONFIGURE_MIRROR")]
    pub configure_mirror: bool,

    /// Mirror selection script, relative to the working directory
    #[arg(
        long = "mirror-script",
        global = true,
        env = "VLSETUP_MIRROR_SCRIPT",
        default_value = "core/pypi_autochoose.py"
    )]
    pub mirror_script: PathBuf,

    /// Do not query for NVIDIA GPUs; installs the CPU-only runtime
    #[arg(long = "skip-gpu-check", global = true, env = "VLSETUP_SKIP_GPU_CHECK")]
    pub skip_gpu_check: bool,

    /// Finish without starting the application
    #[arg(long = "no-launch", global = true, env = "VLSETUP_NO_LAUNCH")]
    pub no_launch: bool,

    /// Program started at the end of setup
    #[arg(
        long = "launch-program",
        global = true,
        env = "VLSETUP_LAUNCH_PROGRAM",
        default_value = "streamlit"
    )]
    pub launch_program: String,

    /// Argument passed to the launch program (repeatable)
    #[arg(
        long = "launch-arg",
        global = true,
        env = "VLSETUP_LAUNCH_ARGS",
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_values = ["run", "st.py"]
    )]
    pub launch_args: Vec<String>,

    /// Timeout in seconds for each pip invocation
    #[arg(
        long = "install-timeout",
        global = true,
        env = "VLSETUP_INSTALL_TIMEOUT",
        default_value_t = 3600
    )]
    pub install_timeout: u64,

    /// Timeout in seconds for GPU/FFmpeg probes
    #[arg(
        long = "probe-timeout",
        global = true,
        env = "VLSETUP_PROBE_TIMEOUT",
        default_value_t = 30
    )]
    pub probe_timeout: u64,

    /// Timeout in seconds for the PyPI mirror selection script
    #[arg(
        long = "mirror-timeout",
        global = true,
        env = "VLSETUP_MIRROR_TIMEOUT",
        default_value_t = 600
    )]
    pub mirror_timeout: u64,

    /// Timeout in seconds for each font package manager command
    #[arg(
        long = "font-timeout",
        global = true,
        env = "VLSETUP_FONT_TIMEOUT",
        default_value_t = 900
    )]
    pub font_timeout: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true, env = "VLSETUP_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
