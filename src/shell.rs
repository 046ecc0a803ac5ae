//! Quoting for values that end up on a shell command line
//!
//! Every dynamic value (database names, file names, role names, SQL text)
//! that reaches a spawned shell goes through [`escape`], either directly or
//! via [`quote_args`]. The escaped text is meant to sit inside a
//! double-quoted shell word. SQL delivered through `printf` additionally
//! goes through [`escape_printf_format`].

/// Escape text for a double-quoted shell word.
///
/// Backslashes are doubled first so the later replacements are not escaped
/// twice. Line breaks become the two-character sequence `\n`, which `printf`
/// turns back into a newline. Backticks are escaped along with `$` so no
/// command substitution can happen inside the word.
pub fn escape(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('`', "\\`")
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}

/// Escape text for use as a double-quoted `printf` format string.
///
/// `printf` interprets backslash sequences and `%` directives on top of the
/// shell's own dequoting, so both are neutralized before [`escape`] runs.
/// Line endings come out of `printf` as a single `\n`.
pub fn escape_printf_format(input: &str) -> String {
    escape(&input.replace('\\', "\\\\").replace('%', "%%"))
}

/// Build a command line where every argument is a double-quoted, escaped word
pub fn quote_args<S: AsRef<str>>(command: &str, args: &[S]) -> String {
    let mut line = String::from(command);
    for arg in args {
        line.push_str(" \"");
        line.push_str(&escape(arg.as_ref()));
        line.push('"');
    }
    line
}

/// Join command stages with `|` under `set -o pipefail`.
///
/// The remote shell is bash, so the pipeline exits non-zero when any stage
/// fails, not only the last one.
pub fn pipeline<S: AsRef<str>>(stages: &[S]) -> String {
    let joined = stages
        .iter()
        .map(|stage| stage.as_ref())
        .collect::<Vec<_>>()
        .join(" | ");
    format!("set -o pipefail; {}", joined)
}
