//! Probe command handler.
//!
//! Reports what a setup run would see without changing anything.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use vlsetup_core::{
    CapabilitySnapshot, CodecGuidance, FontPackagePlan, LinuxDistro, NumericRuntime, OsFamily,
    ProbeOptions,
};

use crate::bootstrap::CliContext;
use crate::presentation::{BOLD, GREEN, RESET, YELLOW};

/// Execute the probe command. Always succeeds unless output fails.
pub async fn execute(ctx: &CliContext, json_output: bool) -> Result<()> {
    let (snapshot, ffmpeg_version) = ctx
        .probe()
        .probe_detailed(ProbeOptions {
            gpu_check: ctx.config.setup.gpu_check,
        })
        .await;
    let distro =
        (snapshot.os_family() == OsFamily::Linux).then(|| LinuxDistro::detect(Path::new("/")));

    if json_output {
        let value = probe_json(&snapshot, ffmpeg_version.as_deref(), distro);
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("Failed to serialize probe result")?
        );
    } else {
        print_probe(&snapshot, ffmpeg_version.as_deref(), distro);
    }
    Ok(())
}

fn probe_json(
    snapshot: &CapabilitySnapshot,
    ffmpeg_version: Option<&str>,
    distro: Option<LinuxDistro>,
) -> serde_json::Value {
    let runtime = NumericRuntime::select(snapshot.os_family(), snapshot.gpu_present());
    json!({
        "capabilities": snapshot,
        "ffmpeg_version": ffmpeg_version,
        "runtime": runtime,
        "runtime_packages": runtime.package_set(),
        "distribution": distro,
    })
}

fn print_probe(
    snapshot: &CapabilitySnapshot,
    ffmpeg_version: Option<&str>,
    distro: Option<LinuxDistro>,
) {
    println!("{BOLD}System{RESET}");
    println!("  {:<14} {}", "OS", snapshot.os_family());
    if let Some(distro) = distro {
        println!("  {:<14} {}", "Distribution", distro.display_name());
    }

    if snapshot.gpu_present() {
        for name in snapshot.gpu_names() {
            println!("  {:<14} {GREEN}{name}{RESET}", "GPU");
        }
    } else {
        println!("  {:<14} {YELLOW}none detected{RESET}", "GPU");
    }

    match (snapshot.ffmpeg_present(), ffmpeg_version) {
        (true, Some(version)) => println!("  {:<14} {GREEN}{version}{RESET}", "FFmpeg"),
        (true, None) => println!("  {:<14} {GREEN}found{RESET}", "FFmpeg"),
        (false, _) => println!("  {:<14} {YELLOW}not found{RESET}", "FFmpeg"),
    }

    let runtime = NumericRuntime::select(snapshot.os_family(), snapshot.gpu_present());
    println!("\n{BOLD}Would install{RESET}");
    println!("  {:<14} {runtime}", "PyTorch");
    let packages = runtime.package_set();
    println!("  {:<14} {}", "Packages", packages.specifiers.join(" "));
    if let Some(url) = &packages.index_url {
        println!("  {:<14} {url}", "Index");
    }
    if let Some(plan) = distro.and_then(FontPackagePlan::for_distro) {
        println!("  {:<14} {} ({})", "Fonts", plan.package, plan.manager);
    }

    if !snapshot.ffmpeg_present() {
        let guidance = CodecGuidance::for_os(snapshot.os_family());
        println!("\n{YELLOW}FFmpeg is required. Install it with:{RESET}");
        for command in &guidance.commands {
            println!("  {command}");
        }
        if let Some(note) = &guidance.note {
            println!("  ({note})");
        }
    }
}
