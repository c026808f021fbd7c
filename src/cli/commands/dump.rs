//! Dump command - scan, space gate, copy, classify
//!
//! Variants are processed strictly in their fixed configuration order
//! and the aggregate storage gate runs before anything is written.

use crate::cli::args::DumpArgs;
use crate::dump::{classify_copied, copy_variant, DumpRun};
use crate::error::{VoxdumpError, VoxdumpResult};
use crate::inventory::{self, format_bytes, VariantInventory};
use crate::owner::Owner;
use crate::platform::Platform;
use crate::storage;
use crate::ui::{self, CopyProgress, UiContext};
use crate::variant::Variant;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Execute the dump command
pub async fn execute(args: DumpArgs) -> VoxdumpResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);
    ui::intro(
        &ctx,
        &format!("Vox Cache Dump v{}", env!("CARGO_PKG_VERSION")),
    );

    let platform = match args.platform {
        Some(platform) => platform,
        None => Platform::detect()?,
    };
    let mut owner = Owner::resolve(platform)?;
    if let Some(home) = args.home {
        owner.home = home;
    }

    check_privileges(&ctx, platform, &owner)?;
    ui::step_info(
        &ctx,
        &format!("Running as {} on {}", owner.username, platform),
    );

    ui::note(
        &ctx,
        "Live caches",
        "A running Vox client keeps a few files (index, data_0-3) open.\nQuit all Vox instances first to dump those too.",
    );
    if !ui::pause(&ctx, "Continue with the dump?").await? {
        ui::outro_error(&ctx, "Aborted");
        return Ok(());
    }

    let inventories = scan_all(&ctx, platform, &owner).await?;
    let present: Vec<&VariantInventory> = inventories.iter().filter(|inv| inv.present).collect();
    if present.is_empty() {
        ui::outro_success(&ctx, "No cache found");
        return Ok(());
    }

    // All-or-nothing gate across every present variant combined; no
    // directory exists until it passes
    let required: u64 = present.iter().map(|inv| inv.total_bytes).sum();
    let dest = absolute_output(&args.output)?;
    storage::ensure_free_space(&dest, required)?;
    ui::step_ok(
        &ctx,
        &format!("Sufficient storage for {}", format_bytes(required)),
    );

    let run = DumpRun::prepare(&dest, &owner).await?;
    debug!("dump run {} at {}", run.timestamp, run.dir.display());

    let mut copied = 0u64;
    let mut identified = 0u64;
    let mut unreadable = 0u64;
    let mut write_failed = 0u64;

    for inv in &present {
        let progress = CopyProgress::new(&ctx, inv.variant.display_name(), inv.entries.len() as u64);
        let outcome = copy_variant(&run, inv.variant, &inv.entries, &inv.dir, &owner, |name| {
            progress.advance(name)
        })
        .await?;
        progress.finish();

        if outcome.unreadable > 0 {
            ui::step_warn(
                &ctx,
                &format!(
                    "Vox {}: {} file(s) in use by a running client, copied {} of {}",
                    inv.variant,
                    outcome.unreadable,
                    outcome.copied.len(),
                    inv.entries.len()
                ),
            );
        } else {
            ui::step_ok(
                &ctx,
                &format!("Vox {}: copied {} file(s)", inv.variant, outcome.copied.len()),
            );
        }
        if outcome.write_failed > 0 {
            ui::step_warn(
                &ctx,
                &format!(
                    "Vox {}: {} file(s) failed to write",
                    inv.variant, outcome.write_failed
                ),
            );
        }

        if !args.no_classify {
            let classified = classify_copied(&outcome.copied).await;
            ui::step_info(
                &ctx,
                &format!(
                    "Vox {}: identified {} of {} copied file(s)",
                    inv.variant,
                    classified.identified,
                    outcome.copied.len()
                ),
            );
            identified += classified.identified;
        }

        copied += outcome.copied.len() as u64;
        unreadable += outcome.unreadable;
        write_failed += outcome.write_failed;
    }

    let mut summary = format!("Saved {} file(s)", copied);
    if !args.no_classify {
        summary.push_str(&format!(", {} identified", identified));
    }
    if unreadable + write_failed > 0 {
        summary.push_str(&format!(", {} skipped", unreadable + write_failed));
    }
    summary.push_str(&format!(" to {}", run.dir.display()));
    ui::outro_success(&ctx, &summary);

    Ok(())
}

/// Resolve and inventory all variants in fixed order
async fn scan_all(
    ctx: &UiContext,
    platform: Platform,
    owner: &Owner,
) -> VoxdumpResult<Vec<VariantInventory>> {
    let mut inventories = Vec::with_capacity(Variant::ALL.len());

    for variant in Variant::ALL {
        let dir = platform.cache_dir(&owner.home, variant.dir_name());
        let inv = inventory::scan(variant, &dir).await?;

        if inv.present {
            ui::step_ok(
                ctx,
                &format!(
                    "Vox {}: {} cached file(s), {}",
                    variant,
                    inv.entries.len(),
                    format_bytes(inv.total_bytes)
                ),
            );
            if inv.unreadable > 0 {
                ui::remark(
                    ctx,
                    &format!("{} of them unreadable, likely in use", inv.unreadable),
                );
            }
        } else if inv.exists {
            ui::remark(ctx, &format!("Vox {}: cache empty, skipping", variant));
        } else {
            ui::remark(ctx, &format!("Vox {}: not installed", variant));
        }

        inventories.push(inv);
    }

    Ok(inventories)
}

/// Privilege rules inherited from how the platforms lay out caches:
/// macOS cache files are unreadable without elevation; a plain root run
/// on Linux resolves caches against root's own home.
fn check_privileges(ctx: &UiContext, platform: Platform, owner: &Owner) -> VoxdumpResult<()> {
    match platform {
        Platform::MacOs if !owner.is_elevated() => Err(VoxdumpError::ElevationRequired),
        Platform::Linux if owner.is_elevated() => {
            ui::step_warn(ctx, "Running as root; caches resolve against root's home");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Anchor a relative output root to the current working directory
fn absolute_output(output: &Path) -> VoxdumpResult<PathBuf> {
    if output.is_absolute() {
        Ok(output.to_path_buf())
    } else {
        let cwd = std::env::current_dir().map_err(VoxdumpError::CurrentDirUnavailable)?;
        Ok(cwd.join(output))
    }
}
