//! fsk - filesystem toolkit
//!
//! Copy, move, rename and delete files and trees from the command line,
//! powered by fskit.

use clap::{Args, Parser, Subcommand};
use fskit::{
    CopyOptions, CopyStats, EntryInfo, EntryKind, Error as FsError, IgnoreRules, MoveOptions,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// fsk - safe file and directory operations
///
/// Every failure is reported as `error[CODE]: message`, where CODE is a
/// namespaced code such as FILE_ENOENT or DIRECTORY_ENOTEMPTY.
#[derive(Parser, Debug)]
#[command(name = "fsk", version, about, long_about = None)]
struct Cli {
    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy a file or directory tree
    Copy(CopyArgs),
    /// Move a file or tree, parking replaced files in a backup directory
    Move {
        source: PathBuf,
        destination: PathBuf,
        /// Name of the backup directory created next to replaced files
        #[arg(long, value_name = "NAME", default_value = MoveOptions::DEFAULT_BACKUP_DIR)]
        backup_dir: String,
        /// Fail with EXDEV instead of copying across filesystems
        #[arg(long)]
        no_fallback: bool,
    },
    /// Rename a file or directory
    Rename {
        source: PathBuf,
        destination: PathBuf,
        /// Fail with EXDEV instead of copying across filesystems
        #[arg(long)]
        no_fallback: bool,
    },
    /// Delete a file or directory
    Rm {
        path: PathBuf,
        /// Delete non-empty directories
        #[arg(short = 'r', long)]
        recursive: bool,
    },
    /// Create a directory
    Mkdir {
        path: PathBuf,
        /// Create missing parents
        #[arg(short = 'p', long)]
        parents: bool,
    },
    /// Show what kind of entry a path is
    Stat {
        path: PathBuf,
        /// Report on a symbolic link itself
        #[arg(long)]
        no_follow: bool,
    },
    /// List directory entries
    Ls {
        path: PathBuf,
        /// Include nested entries
        #[arg(short = 'R', long)]
        recursive: bool,
    },
    /// Print a name made safe for every major platform
    Sanitize { name: String },
    /// Look up the MIME type of an extension or path
    Mime {
        /// Extension (png, .png) or path (photos/cat.png)
        input: String,
        /// Treat INPUT as a MIME type and print its extension
        #[arg(long)]
        to_ext: bool,
    },
    /// Detect a file's extension from its leading bytes
    Ext {
        file: PathBuf,
        /// Use the file name instead of its contents
        #[arg(long)]
        by_name: bool,
    },
    /// Print the MD5 digest of a text
    Hash {
        text: String,
        /// Print the SHA-256 digest instead
        #[arg(long)]
        sha256: bool,
    },
    /// Report whether a text looks like a path, file name or extension
    Check { text: String },
}

#[derive(Args, Debug)]
struct CopyArgs {
    source: PathBuf,
    destination: PathBuf,

    /// Skip folders with this name (case and accent insensitive)
    #[arg(long, value_name = "NAME")]
    ignore_folder: Vec<String>,

    /// Skip files with this name (case and accent insensitive)
    #[arg(long, value_name = "NAME")]
    ignore_file: Vec<String>,

    /// Skip files with this extension
    #[arg(long, value_name = "EXT")]
    ignore_ext: Vec<String>,

    /// Skip folders whose name matches this regex
    #[arg(long, value_name = "REGEX")]
    ignore_regex_folder: Vec<String>,

    /// Skip files whose name matches this regex
    #[arg(long, value_name = "REGEX")]
    ignore_regex_file: Vec<String>,

    /// Deepest level, counted from SOURCE, at which folder rules apply
    #[arg(long, value_name = "N", default_value_t = IgnoreRules::DEFAULT_DEPTH)]
    ignore_depth: usize,

    /// Do not preserve file timestamps
    #[arg(long)]
    no_times: bool,

    /// Do not preserve file permissions
    #[arg(long)]
    no_perms: bool,

    /// Do not call fsync after each file (faster but less safe)
    #[arg(long)]
    no_sync: bool,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("{}", .0.display_message())]
    Fs(#[from] FsError),

    #[error("Unrecognized file signature: {path}")]
    UnknownSignature { path: PathBuf },

    #[error("No known extension for: {input}")]
    UnknownExtension { input: String },

    #[error("No known MIME type for: {input}")]
    UnknownMime { input: String },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> String {
        match self {
            Self::Fs(e) => e.code().to_owned(),
            Self::UnknownSignature { .. }
            | Self::UnknownExtension { .. }
            | Self::UnknownMime { .. } => "INVALID_INPUT".to_owned(),
            Self::JsonSerialize { .. } => "INTERNAL".to_owned(),
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Self::Fs(e) if e.is("EINVALIDPATTERN") => 2,
            Self::UnknownSignature { .. }
            | Self::UnknownExtension { .. }
            | Self::UnknownMime { .. } => 2,
            _ => 1,
        }
    }

    fn to_json_value(&self) -> Value {
        match self {
            Self::Fs(e) => json!({ "error": serde_json::to_value(e).unwrap_or(Value::Null) }),
            other => json!({
                "error": {
                    "code": other.code(),
                    "message": other.to_string(),
                }
            }),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    tracing::debug!(command = ?cli.command, "starting");

    if let Err(error) = run(&cli) {
        if cli.json {
            eprintln!("{}", error.to_json_value());
        } else {
            eprintln!("error[{}]: {}", error.code(), error);
        }
        std::process::exit(error.exit_code());
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Command::Copy(args) => {
            let options = build_copy_options(args, cli)?;
            let stats = fskit::copy(&args.source, &args.destination, &options)?;
            if cli.json {
                print_json_value(&stats_to_json(&stats))
            } else {
                print_stats(&stats);
                Ok(())
            }
        }
        Command::Move {
            source,
            destination,
            backup_dir,
            no_fallback,
        } => {
            let mut options = MoveOptions::default().with_backup_dir(backup_dir.as_str());
            if *no_fallback {
                options = options.without_cross_device_fallback();
            }
            fskit::move_with(source, destination, &options)?;
            report_done(cli, "moved", source, Some(destination))
        }
        Command::Rename {
            source,
            destination,
            no_fallback,
        } => {
            if *no_fallback {
                fskit::rename_plain(source, destination)?;
            } else {
                fskit::rename(source, destination)?;
            }
            report_done(cli, "renamed", source, Some(destination))
        }
        Command::Rm { path, recursive } => {
            if fskit::lstat(path)?.kind == EntryKind::Directory {
                fskit::delete_dir(path, *recursive)?;
            } else {
                fskit::delete_file(path)?;
            }
            report_done(cli, "deleted", path, None)
        }
        Command::Mkdir { path, parents } => {
            fskit::make_dir(path, *parents)?;
            report_done(cli, "created", path, None)
        }
        Command::Stat { path, no_follow } => {
            let info = if *no_follow {
                fskit::lstat(path)?
            } else {
                fskit::stat(path)?
            };
            if cli.json {
                print_json_value(&to_json(&info)?)
            } else {
                print_entry_info(&info);
                Ok(())
            }
        }
        Command::Ls { path, recursive } => {
            let names = fskit::read_dir(path, *recursive)?;
            if cli.json {
                let names: Vec<String> = names.iter().map(|n| display_path(n)).collect();
                print_json_value(&json!(names))
            } else {
                for name in names {
                    println!("{}", name.display());
                }
                Ok(())
            }
        }
        Command::Sanitize { name } => print_text(cli, "sanitized", &fskit::sanitize_filename(name)),
        Command::Mime { input, to_ext } => {
            if *to_ext {
                let ext = fskit::extension_from_mime(input).ok_or_else(|| {
                    CliError::UnknownExtension {
                        input: input.clone(),
                    }
                })?;
                print_text(cli, "extension", ext)
            } else {
                let mime = fskit::mime_from_file(input).ok_or_else(|| CliError::UnknownMime {
                    input: input.clone(),
                })?;
                print_text(cli, "mime", mime)
            }
        }
        Command::Ext { file, by_name } => {
            let ext = if *by_name {
                fskit::extension_from_path(file)
            } else {
                let bytes = fskit::read_file(file)?;
                fskit::extension_from_signature(&bytes).map(str::to_owned)
            };
            let ext = ext.ok_or_else(|| CliError::UnknownSignature { path: file.clone() })?;
            print_text(cli, "extension", &ext)
        }
        Command::Hash { text, sha256 } => {
            if *sha256 {
                print_text(cli, "sha256", &fskit::digest_hex(text))
            } else {
                print_text(cli, "md5", &fskit::md5_hex(text))
            }
        }
        Command::Check { text } => {
            let path = fskit::is_path(text);
            let filename = fskit::is_filename(text);
            let extension = fskit::is_extension(text);
            if cli.json {
                print_json_value(&json!({
                    "path": path,
                    "filename": filename,
                    "extension": extension,
                }))
            } else {
                println!("path: {path}");
                println!("filename: {filename}");
                println!("extension: {extension}");
                Ok(())
            }
        }
    }
}

fn build_copy_options(args: &CopyArgs, cli: &Cli) -> CliResult<CopyOptions> {
    let mut rules = IgnoreRules::new().with_depth(args.ignore_depth);
    for name in &args.ignore_folder {
        rules = rules.with_folder(name.as_str());
    }
    for name in &args.ignore_file {
        rules = rules.with_file(name.as_str());
    }
    for ext in &args.ignore_ext {
        rules = rules.with_extension(ext);
    }
    for expr in &args.ignore_regex_folder {
        rules = rules.with_folder_regex(expr)?;
    }
    for expr in &args.ignore_regex_file {
        rules = rules.with_file_regex(expr)?;
    }

    let mut options = CopyOptions::default().with_ignore(rules);
    if args.no_times {
        options = options.without_timestamps();
    }
    if args.no_perms {
        options = options.without_permissions();
    }
    if args.no_sync {
        options = options.without_fsync();
    }
    if cli.verbose > 0 && !cli.json {
        options = options.with_verbose_handler(|msg| {
            eprintln!("{msg}");
        });
    }
    Ok(options)
}

fn stats_to_json(stats: &CopyStats) -> Value {
    json!({
        "files_copied": stats.files_copied,
        "files_skipped": stats.files_skipped,
        "dirs_created": stats.dirs_created,
        "dirs_skipped": stats.dirs_skipped,
        "bytes_copied": stats.bytes_copied,
        "duration_ms": u64::try_from(stats.duration.as_millis()).unwrap_or(u64::MAX),
    })
}

fn print_stats(stats: &CopyStats) {
    let skipped = stats.files_skipped + stats.dirs_skipped;
    if stats.files_copied == 0 && stats.dirs_created == 0 {
        if skipped > 0 {
            println!("Nothing to copy ({skipped} entries ignored)");
        } else {
            println!("Nothing to copy");
        }
        return;
    }

    let mut parts = vec![format!("{} files", stats.files_copied)];
    if stats.dirs_created > 0 {
        parts.push(format!("{} dirs", stats.dirs_created));
    }
    let mut line = format!(
        "Copied {} ({})",
        parts.join(", "),
        format_bytes(stats.bytes_copied)
    );
    if skipped > 0 {
        line.push_str(&format!(", ignored {skipped}"));
    }
    println!("{line}");
}

fn print_entry_info(info: &EntryInfo) {
    let kind = match info.kind {
        EntryKind::File => "file",
        EntryKind::Directory => "directory",
        EntryKind::Other if info.is_symlink => "symlink",
        EntryKind::Other => "other",
    };
    println!("kind: {kind}");
    println!("size: {}", info.len);
    println!("readonly: {}", info.readonly);
    println!("symlink: {}", info.is_symlink);
}

fn report_done(cli: &Cli, action: &str, path: &Path, target: Option<&Path>) -> CliResult<()> {
    if cli.json {
        let mut value = json!({ "action": action, "path": display_path(path) });
        if let (Some(target), Some(obj)) = (target, value.as_object_mut()) {
            obj.insert("target".to_owned(), Value::String(display_path(target)));
        }
        return print_json_value(&value);
    }
    match target {
        Some(target) => println!("{action} {} -> {}", path.display(), target.display()),
        None => println!("{action} {}", path.display()),
    }
    Ok(())
}

fn print_text(cli: &Cli, key: &str, text: &str) -> CliResult<()> {
    if cli.json {
        print_json_value(&json!({ key: text }))
    } else {
        println!("{text}");
        Ok(())
    }
}

fn to_json(info: &EntryInfo) -> CliResult<Value> {
    serde_json::to_value(info).map_err(|source| CliError::JsonSerialize { source })
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
