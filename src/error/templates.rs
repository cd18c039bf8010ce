//! Static code table used to render user-facing messages.
//!
//! Every platform code resolves to a [`Template`]. Static templates are
//! plain text; dynamic templates receive the [`Failure`] and may mention
//! the offending path.

use std::io;
use std::path::Path;

/// Code used when nothing more specific is known.
pub(crate) const UNKNOWN: &str = "EUNKNOWN";

/// The parts of a raw platform failure a template may look at.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Failure<'a> {
    pub code: &'a str,
    pub path: Option<&'a Path>,
}

/// A user message, either fixed or composed from the failure.
#[derive(Clone, Copy)]
pub(crate) enum Template {
    Static(&'static str),
    Dynamic(fn(&Failure<'_>) -> String),
}

impl Template {
    fn render(self, failure: &Failure<'_>) -> String {
        match self {
            Self::Static(text) => text.to_owned(),
            Self::Dynamic(compose) => compose(failure),
        }
    }
}

static TEMPLATES: &[(&str, Template)] = &[
    ("EACCES", Template::Dynamic(permission_denied)),
    ("EBADF", Template::Static("Invalid file descriptor")),
    ("EBUSY", Template::Dynamic(busy)),
    ("ECONNREFUSED", Template::Static("Connection refused")),
    ("EEXIST", Template::Dynamic(already_exists)),
    ("EFAULT", Template::Static("Invalid address")),
    ("EINVALIDPATTERN", Template::Static("Invalid ignore pattern")),
    ("EINVALIDTYPE", Template::Dynamic(invalid_type)),
    ("EIO", Template::Static("Input/output error")),
    ("EISDIR", Template::Dynamic(is_a_directory)),
    ("ELOOP", Template::Static("Too many levels of symbolic links")),
    ("EMFILE", Template::Static("Too many open files")),
    ("ENAMETOOLONG", Template::Dynamic(name_too_long)),
    ("ENOENT", Template::Dynamic(not_found)),
    ("ENODEV", Template::Static("No such device")),
    ("ENOLINK", Template::Static("Link has been severed")),
    ("ENOSPC", Template::Static("No space left on device")),
    ("ENOTCONN", Template::Static("Socket is not connected")),
    ("ENOTDIR", Template::Dynamic(not_a_directory)),
    ("ENOTEMPTY", Template::Dynamic(not_empty)),
    ("EPERM", Template::Dynamic(not_permitted)),
    ("EROFS", Template::Dynamic(read_only)),
    ("ERR_INVALID_ARG_TYPE", Template::Static("Invalid argument type")),
    ("ETXTBSY", Template::Static("Text file is busy")),
    (UNKNOWN, Template::Static("Unknown error")),
    ("EXDEV", Template::Static("Cross-device link not permitted")),
];

fn lookup(code: &str) -> Option<Template> {
    TEMPLATES
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, template)| *template)
}

/// Render the user message for a failure.
///
/// Unknown codes use the `EUNKNOWN` text; the caller keeps the code itself.
pub(crate) fn render(failure: &Failure<'_>) -> String {
    lookup(failure.code)
        .or_else(|| lookup(UNKNOWN))
        .map(|template| template.render(failure))
        .unwrap_or_default()
}

/// Shorthand for rendering a code against an optional path.
pub(crate) fn message_for(code: &str, path: Option<&Path>) -> String {
    render(&Failure { code, path })
}

fn with_path(message: &str, failure: &Failure<'_>) -> String {
    match failure.path {
        Some(path) => format!("{message}: \"{}\"", path.display()),
        None => message.to_owned(),
    }
}

fn permission_denied(failure: &Failure<'_>) -> String {
    with_path("Permission denied", failure)
}

fn already_exists(failure: &Failure<'_>) -> String {
    with_path("File or directory already exists", failure)
}

fn invalid_type(failure: &Failure<'_>) -> String {
    with_path("Invalid file type", failure)
}

fn is_a_directory(failure: &Failure<'_>) -> String {
    with_path("Expected a file but found a directory", failure)
}

fn name_too_long(failure: &Failure<'_>) -> String {
    with_path("File name too long", failure)
}

fn not_found(failure: &Failure<'_>) -> String {
    with_path("File or directory not found", failure)
}

fn not_a_directory(failure: &Failure<'_>) -> String {
    with_path("Expected a directory but found something else", failure)
}

fn not_empty(failure: &Failure<'_>) -> String {
    with_path("Directory not empty", failure)
}

fn not_permitted(failure: &Failure<'_>) -> String {
    with_path("Operation not permitted", failure)
}

fn read_only(failure: &Failure<'_>) -> String {
    with_path("Read-only file system", failure)
}

fn busy(failure: &Failure<'_>) -> String {
    let Some(name) = failure.path.and_then(Path::file_name) else {
        return "Resource is busy or in use by another process".to_owned();
    };
    let is_dir = Path::new(name).extension().is_none();
    format!(
        "{} \"{}\" is in use by another process",
        if is_dir { "Directory" } else { "File" },
        name.to_string_lossy()
    )
}

/// Resolve the errno-style name of a platform error.
pub(crate) fn errno_name(error: &io::Error) -> &'static str {
    raw_errno_name(error).unwrap_or_else(|| errno_from_kind(error.kind()))
}

#[cfg(unix)]
fn raw_errno_name(error: &io::Error) -> Option<&'static str> {
    error.raw_os_error().and_then(errno_from_raw)
}

#[cfg(not(unix))]
fn raw_errno_name(_error: &io::Error) -> Option<&'static str> {
    None
}

#[cfg(unix)]
fn errno_from_raw(raw: i32) -> Option<&'static str> {
    let name = match raw {
        libc::EACCES => "EACCES",
        libc::EAGAIN => "EAGAIN",
        libc::EBADF => "EBADF",
        libc::EBUSY => "EBUSY",
        libc::ECONNREFUSED => "ECONNREFUSED",
        libc::EEXIST => "EEXIST",
        libc::EFAULT => "EFAULT",
        libc::EFBIG => "EFBIG",
        libc::EINTR => "EINTR",
        libc::EINVAL => "EINVAL",
        libc::EIO => "EIO",
        libc::EISDIR => "EISDIR",
        libc::ELOOP => "ELOOP",
        libc::EMFILE => "EMFILE",
        libc::EMLINK => "EMLINK",
        libc::ENAMETOOLONG => "ENAMETOOLONG",
        libc::ENFILE => "ENFILE",
        libc::ENODEV => "ENODEV",
        libc::ENOENT => "ENOENT",
        libc::ENOLINK => "ENOLINK",
        libc::ENOSPC => "ENOSPC",
        libc::ENOTCONN => "ENOTCONN",
        libc::ENOTDIR => "ENOTDIR",
        libc::ENOTEMPTY => "ENOTEMPTY",
        libc::EPERM => "EPERM",
        libc::EPIPE => "EPIPE",
        libc::EROFS => "EROFS",
        libc::ESPIPE => "ESPIPE",
        libc::ETXTBSY => "ETXTBSY",
        libc::EXDEV => "EXDEV",
        _ => return None,
    };
    Some(name)
}

fn errno_from_kind(kind: io::ErrorKind) -> &'static str {
    use io::ErrorKind;

    match kind {
        ErrorKind::NotFound => "ENOENT",
        ErrorKind::PermissionDenied => "EACCES",
        ErrorKind::AlreadyExists => "EEXIST",
        ErrorKind::NotADirectory => "ENOTDIR",
        ErrorKind::IsADirectory => "EISDIR",
        ErrorKind::DirectoryNotEmpty => "ENOTEMPTY",
        ErrorKind::ResourceBusy => "EBUSY",
        ErrorKind::CrossesDevices => "EXDEV",
        ErrorKind::StorageFull => "ENOSPC",
        ErrorKind::ReadOnlyFilesystem => "EROFS",
        ErrorKind::ExecutableFileBusy => "ETXTBSY",
        ErrorKind::ConnectionRefused => "ECONNREFUSED",
        ErrorKind::NotConnected => "ENOTCONN",
        ErrorKind::InvalidInput => "ERR_INVALID_ARG_TYPE",
        _ => UNKNOWN,
    }
}
