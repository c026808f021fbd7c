//! Scan command - inventory installed caches without copying

use crate::cli::args::{OutputFormat, ScanArgs};
use crate::error::VoxdumpResult;
use crate::inventory::{self, format_bytes, VariantInventory};
use crate::owner::Owner;
use crate::platform::Platform;
use crate::variant::Variant;

/// Execute the scan command
pub async fn execute(args: ScanArgs) -> VoxdumpResult<()> {
    let platform = match args.platform {
        Some(platform) => platform,
        None => Platform::detect()?,
    };
    let mut owner = Owner::resolve(platform)?;
    if let Some(home) = args.home {
        owner.home = home;
    }

    let mut inventories = Vec::with_capacity(Variant::ALL.len());
    for variant in Variant::ALL {
        let dir = platform.cache_dir(&owner.home, variant.dir_name());
        inventories.push(inventory::scan(variant, &dir).await?);
    }

    match args.format {
        OutputFormat::Table => print_table(&inventories),
        OutputFormat::Json => print_json(&inventories)?,
        OutputFormat::Plain => print_plain(&inventories),
    }

    Ok(())
}

fn print_table(inventories: &[VariantInventory]) {
    println!(
        "{:<14} {:<10} {:>7} {:>10}",
        "VARIANT", "STATUS", "FILES", "SIZE"
    );
    println!("{}", "-".repeat(44));

    for inv in inventories {
        let status = if inv.present {
            "cached"
        } else if inv.exists {
            "empty"
        } else {
            "absent"
        };

        println!(
            "{:<14} {:<10} {:>7} {:>10}",
            inv.variant.display_name(),
            status,
            inv.entries.len(),
            format_bytes(inv.total_bytes)
        );
    }

    let files: usize = inventories.iter().map(|inv| inv.entries.len()).sum();
    let bytes: u64 = inventories.iter().map(|inv| inv.total_bytes).sum();
    println!();
    println!("Total: {} file(s), {}", files, format_bytes(bytes));
}

fn print_json(inventories: &[VariantInventory]) -> VoxdumpResult<()> {
    #[derive(serde::Serialize)]
    struct ScanJson {
        variant: Variant,
        path: String,
        present: bool,
        files: usize,
        bytes: u64,
        unreadable: u64,
    }

    let rows: Vec<ScanJson> = inventories
        .iter()
        .map(|inv| ScanJson {
            variant: inv.variant,
            path: inv.dir.display().to_string(),
            present: inv.present,
            files: inv.entries.len(),
            bytes: inv.total_bytes,
            unreadable: inv.unreadable,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn print_plain(inventories: &[VariantInventory]) {
    for inv in inventories.iter().filter(|inv| inv.present) {
        println!("{}", inv.variant.display_name());
    }
}
