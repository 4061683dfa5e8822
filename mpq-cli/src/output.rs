//! Human-readable table pretty-printers. These are entirely an external
//! concern of the CLI: the library only ever returns structured data.

use anyhow::Result;
use colored::Colorize;
use mopaq::{Archive, BlockFlags};

fn style_section(title: &str) -> String {
    let centered = format!("{title:^53}");
    format!(
        "┌─────────────────────────────────────────────────────┐\n\
         │ {} │\n\
         └─────────────────────────────────────────────────────┘",
        centered.bold().green()
    )
}

/// Print the archive header and, if present, the user-data header.
pub fn print_header(archive: &Archive) {
    let header = archive.header();

    println!("{}", style_section("MPQ HEADER"));
    println!(
        "│ Magic:               {:?}",
        String::from_utf8_lossy(&header.magic)
    );
    println!("│ Header size:         {} bytes", header.header_size);
    println!("│ Archive size:        {} bytes", header.archive_size);
    println!("│ Format version:      v{}", header.format_version as u16 + 1);
    println!("│ Sector size:         {} bytes", header.sector_size());
    println!("│ Hash table offset:   0x{:08X}", header.hash_table_offset);
    println!("│ Block table offset:  0x{:08X}", header.block_table_offset);
    println!("│ Hash table entries:  {}", header.hash_table_entries);
    println!("│ Block table entries: {}", header.block_table_entries);
    println!("│ Header offset:       0x{:08X}", header.offset);

    if header.format_version as u16 == 1 {
        println!("│ Ext. block table off: {}", header.extended_block_table_offset);
        println!("│ Hash table offset hi: {}", header.hash_table_offset_high);
        println!("│ Block table offset hi: {}", header.block_table_offset_high);
    }

    if let Some(user_data) = &header.user_data_header {
        println!("\n{}", style_section("USER DATA HEADER"));
        println!("│ User data size:      {} bytes", user_data.user_data_size);
        println!("│ MPQ header offset:   0x{:08X}", user_data.mpq_header_offset);
        println!("│ Content size:        {} bytes", user_data.user_data_header_size);
    }

    println!();
}

/// Print every hash table entry, including unused and deleted slots.
pub fn print_hash_table(archive: &Archive) {
    println!("{}", style_section("HASH TABLE"));
    println!(
        "│ {:>5}  {:>10}  {:>10}  {:>7}  {:>9}  {:>6}",
        "Index", "HashA", "HashB", "Locale", "Platform", "Block"
    );

    for (index, entry) in archive.hash_entries().iter().enumerate() {
        println!(
            "│ {:>5}  0x{:08X}  0x{:08X}  {:>7}  {:>9}  {:>6}",
            index, entry.hash_a, entry.hash_b, entry.locale, entry.platform, entry.block_table_index
        );
    }

    println!();
}

/// Print every block table entry with its decoded flag names.
pub fn print_block_table(archive: &Archive) {
    println!("{}", style_section("BLOCK TABLE"));
    println!(
        "│ {:>5}  {:>10}  {:>12}  {:>12}  {}",
        "Index", "Offset", "Archived", "Size", "Flags"
    );

    for (index, entry) in archive.block_entries().iter().enumerate() {
        println!(
            "│ {:>5}  0x{:08X}  {:>12}  {:>12}  {}",
            index,
            entry.offset,
            entry.archived_size,
            entry.size,
            describe_flags(entry.flags)
        );
    }

    println!();
}

fn describe_flags(flags: BlockFlags) -> String {
    if !flags.contains(BlockFlags::EXISTS) {
        return "-".dimmed().to_string();
    }

    let mut names = Vec::new();
    if flags.contains(BlockFlags::IMPLODE) {
        names.push("IMPLODE");
    }
    if flags.contains(BlockFlags::COMPRESS) {
        names.push("COMPRESS");
    }
    if flags.contains(BlockFlags::ENCRYPTED) {
        names.push("ENCRYPTED");
    }
    if flags.contains(BlockFlags::FIX_KEY) {
        names.push("FIX_KEY");
    }
    if flags.contains(BlockFlags::SINGLE_UNIT) {
        names.push("SINGLE_UNIT");
    }
    if flags.contains(BlockFlags::DELETE_MARKER) {
        names.push("DELETE_MARKER");
    }
    if flags.contains(BlockFlags::SECTOR_CRC) {
        names.push("SECTOR_CRC");
    }
    names.push("EXISTS");
    names.join(", ")
}

/// Print the archive's enumerated filenames, one per line.
pub fn print_file_list(archive: &Archive) -> Result<()> {
    let names = archive
        .files()
        .ok_or_else(|| anyhow::anyhow!("archive has no listfile; pass without -s to read it"))?;

    println!("{}", style_section("FILE LISTING"));
    for name in names {
        println!("│ {name}");
    }
    println!("\nTotal: {} files", names.len());

    Ok(())
}
