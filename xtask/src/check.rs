//! Workspace-wide quality checks.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use xshell::{Shell, cmd};

/// Library crates, leaf first, with their directory and layer.
const LIBRARY_CRATES: &[(&str, &str, &str)] = &[
    ("cable-curve", "geometry/cable-curve", "math"),
    ("cable-mesh-types", "mesh/cable-mesh-types", "math"),
    ("cable-tube", "mesh/cable-tube", "geometry"),
    ("cable-path", "cable/cable-path", "data model"),
    ("cable-rig", "cable/cable-rig", "pipeline"),
];

/// Crates a library crate must never pull in.
const FORBIDDEN_DEPENDENCIES: &[&str] = &["bevy", "wgpu", "winit", "rend3", "three-d"];

type Check = fn(&Shell) -> Result<()>;

const CHECKS: &[(&str, Check)] = &[
    ("Formatting", run_fmt_check),
    ("Clippy", run_clippy),
    ("Tests", run_tests),
    ("Documentation", run_doc_check),
    ("Safety", run_safety_scan),
    ("Engine-free", run_layer_check),
];

/// Run all checks, reporting each one.
pub fn run(ci_mode: bool) -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "Cable Workspace Check".bold());
    println!("{}", "=====================".bold());
    println!();

    let mut all_passed = true;
    for (name, check) in CHECKS {
        println!("{}", format!("Running {}...", name.to_lowercase()).dimmed());
        let result = check(&sh);
        report_result(name, &result);
        all_passed &= result.is_ok();
    }

    println!();

    if all_passed {
        println!("{}", "✓ All checks passed!".green().bold());
        Ok(())
    } else if ci_mode {
        println!("{}", "✗ Some checks failed.".red().bold());
        std::process::exit(1);
    } else {
        println!("{}", "⚠ Some checks failed. Fix before committing.".yellow());
        Ok(())
    }
}

/// Run the CI suite: every check, then a summary of failures.
pub fn run_ci() -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "Cable CI Suite".bold());
    println!("{}", "==============".bold());
    println!();

    let mut failures = Vec::new();
    let total = CHECKS.len();
    for (step, (name, check)) in CHECKS.iter().enumerate() {
        println!("{}", format!("Step {}/{total}: {name}...", step + 1).cyan());
        match check(&sh) {
            Ok(()) => println!("  {} {name} OK", "✓".green()),
            Err(e) => {
                println!("  {} {name} failed", "✗".red());
                failures.push(format!("{name}: {e}"));
            }
        }
    }

    println!();

    if failures.is_empty() {
        println!("{}", "  ✓ CI PASSED".green().bold());
        Ok(())
    } else {
        println!("{}", "  ✗ CI FAILED".red().bold());
        println!();
        println!("Failures:");
        for f in &failures {
            println!("  - {}", f.red());
        }
        std::process::exit(1);
    }
}

/// Print the library crates.
pub fn list_crates() {
    println!("{}", "Library crates (leaf first)".bold());
    for (name, dir, layer) in LIBRARY_CRATES {
        println!("  {:<18} {:<24} {}", name.cyan(), dir, layer.dimmed());
    }
}

fn report_result(name: &str, result: &Result<()>) {
    match result {
        Ok(()) => println!("  {} {}", "✓".green(), name),
        Err(e) => println!("  {} {} - {}", "✗".red(), name, e),
    }
}

fn run_fmt_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .context("Formatting check failed")?;
    Ok(())
}

fn run_clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --all-targets --all-features -- -D warnings")
        .run()
        .context("Clippy check failed")?;
    Ok(())
}

fn run_tests(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --all-features")
        .run()
        .context("Tests failed")?;
    Ok(())
}

fn run_doc_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo doc --no-deps --all-features")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run()
        .context("Documentation build failed")?;
    Ok(())
}

/// Count `unwrap`/`expect` calls in library sources, ignoring comments and
/// everything from `#[cfg(test)]` to the end of the file.
fn run_safety_scan(sh: &Shell) -> Result<()> {
    let mut violations = Vec::new();

    for (_, dir, _) in LIBRARY_CRATES {
        let src = Path::new(dir).join("src");
        for entry in sh.read_dir(&src)? {
            if entry.extension().is_none_or(|ext| ext != "rs") {
                continue;
            }
            let text = sh.read_file(&entry)?;
            for (line_no, line) in text.lines().enumerate() {
                let trimmed = line.trim_start();
                if trimmed.starts_with("#[cfg(test)]") {
                    break;
                }
                if trimmed.starts_with("//") {
                    continue;
                }
                if line.contains(".unwrap()") || line.contains(".expect(") {
                    violations.push(format!("{}:{}", entry.display(), line_no + 1));
                }
            }
        }
    }

    if !violations.is_empty() {
        for v in &violations {
            println!("    {}", v.yellow());
        }
        anyhow::bail!(
            "Found {} unwrap/expect calls in library code",
            violations.len()
        );
    }

    Ok(())
}

/// Library crates must not depend on a renderer or engine.
fn run_layer_check(sh: &Shell) -> Result<()> {
    let mut offenders = Vec::new();

    for (name, _, _) in LIBRARY_CRATES {
        let tree = cmd!(sh, "cargo tree -p {name} -e normal --prefix none")
            .read()
            .with_context(|| format!("cargo tree failed for {name}"))?;
        for line in tree.lines() {
            let dep = line.split_whitespace().next().unwrap_or_default();
            if FORBIDDEN_DEPENDENCIES.contains(&dep) {
                offenders.push(format!("{name} -> {dep}"));
            }
        }
    }

    if !offenders.is_empty() {
        offenders.sort();
        offenders.dedup();
        anyhow::bail!("Engine dependencies found: {}", offenders.join(", "));
    }

    Ok(())
}
